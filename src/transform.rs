//! Record transformation: faculty filtering and author aggregation.
//!
//! Each publication becomes at most one [`ReportRow`]. Author, faculty and
//! department labels are deduplicated in first-seen order and joined with
//! newlines so they stack inside a single spreadsheet cell.

use crate::faculty::FacultyFilter;
use crate::model::{RawPublication, Scalar};
use crate::ordered_set::OrderedSet;
use tracing::debug;

/// Separator for multi-valued cells.
pub const LIST_SEPARATOR: &str = "\n";

/// One output line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub title: String,
    pub work_type: String,
    pub scopus_indexed: bool,
    pub wos_indexed: bool,
    pub country: String,
    pub year: Scalar,
    pub author_names: String,
    pub faculty_names: String,
    pub department_names: String,
}

/// Counts from one transformation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub total: usize,
    pub included: usize,
    pub excluded: usize,
}

/// Filter `records` by `filter` and flatten the survivors into report rows.
///
/// Rows keep the relative order of their source records.
pub fn transform(records: &[RawPublication], filter: &FacultyFilter) -> Vec<ReportRow> {
    transform_with_stats(records, filter).0
}

/// Like [`transform`], also returning inclusion counts.
pub fn transform_with_stats(
    records: &[RawPublication],
    filter: &FacultyFilter,
) -> (Vec<ReportRow>, TransformStats) {
    let rows: Vec<ReportRow> = records
        .iter()
        .filter_map(|record| transform_one(record, filter))
        .collect();

    let stats = TransformStats {
        total: records.len(),
        included: rows.len(),
        excluded: records.len() - rows.len(),
    };
    debug!(?stats, "Transformed publications");

    (rows, stats)
}

fn transform_one(record: &RawPublication, filter: &FacultyFilter) -> Option<ReportRow> {
    let mut authors = OrderedSet::new();
    let mut faculties = OrderedSet::new();
    let mut departments = OrderedSet::new();
    let mut matches_filter = filter.is_empty();

    for authorship in &record.authors {
        authors.insert(&authorship.person_name);
        faculties.insert(&authorship.faculty_name);
        departments.insert(&authorship.department_name);

        if !matches_filter && filter.contains(authorship.faculty_id) {
            matches_filter = true;
        }
    }

    if !matches_filter {
        return None;
    }

    Some(ReportRow {
        title: record.title.clone(),
        work_type: record.work_type.clone(),
        scopus_indexed: record.scopus_indexed(),
        wos_indexed: record.wos_indexed(),
        country: record.country.clone(),
        year: record.year.clone(),
        author_names: authors.join(LIST_SEPARATOR),
        faculty_names: faculties.join(LIST_SEPARATOR),
        department_names: departments.join(LIST_SEPARATOR),
    })
}
