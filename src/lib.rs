//! # pubreport
//!
//! Faculty publication report: reads a JSON export of publication records,
//! keeps the ones touching a selected faculty and writes them to an XLSX
//! spreadsheet.
//!
//! ## Modules
//!
//! - [`model`] - Typed input records and the JSON loader
//! - [`faculty`] - Faculty catalogue and selector expansion
//! - [`transform`] - Filtering and author aggregation
//! - [`report`] - XLSX writer
//! - [`ordered_set`] - Insertion-ordered dedup set
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubreport::{faculty, model, report, transform};
//! use std::path::Path;
//!
//! fn main() -> pubreport::Result<()> {
//!     let records = model::load_publications(Path::new("export.json"))?;
//!     let rows = transform::transform(&records, &faculty::expand_selector(Some(2)));
//!     report::write_report(&rows, Path::new("report.xlsx"))?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod faculty;
pub mod model;
pub mod ordered_set;
pub mod report;
pub mod transform;

pub use error::{ReportError, Result};
