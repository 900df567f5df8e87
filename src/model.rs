//! Typed publication records and the input loader.
//!
//! The export is a JSON array of loosely shaped objects. Each element is
//! converted into a [`RawPublication`] field by field, so a missing or
//! mistyped field is reported with its record index and key name instead
//! of a bare lookup failure.

use crate::error::{ReportError, Result};
use crate::faculty::FacultyId;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Value of the indexing flags that means "not indexed".
pub const NO_SENTINEL: &str = "ні";

/// A scalar cell value taken as-is from the export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Text(String::new())
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Integer(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// One element of the export array.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPublication {
    pub title: String,
    pub work_type: String,
    /// Raw Scopus flag (`indexing`)
    pub indexing: String,
    /// Raw Web of Science flag (`wos`)
    pub wos: String,
    pub country: String,
    pub year: Scalar,
    pub authors: Vec<RawAuthorship>,
}

/// One entry of a publication's `author` list.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAuthorship {
    pub person_name: String,
    pub faculty_name: String,
    pub faculty_id: FacultyId,
    pub department_name: String,
}

impl RawPublication {
    pub fn scopus_indexed(&self) -> bool {
        self.indexing != NO_SENTINEL
    }

    pub fn wos_indexed(&self) -> bool {
        self.wos != NO_SENTINEL
    }

    /// Build a publication from the `index`-th element of the export.
    pub fn from_json(value: Value, index: usize) -> Result<Self> {
        let location = format!("record {index}");
        let mut fields = Fields::from_value(value, &location, "")?;

        let title = fields.text("job_title")?;
        let work_type = fields.text("types")?;
        let indexing = fields.text("indexing")?;
        let wos = fields.text("wos")?;
        let country = fields.text("country")?;
        let year = fields.take::<Option<Scalar>>("pubyear")?.unwrap_or_default();
        let authors = fields
            .take::<Vec<Value>>("author")?
            .into_iter()
            .enumerate()
            .map(|(i, author)| RawAuthorship::from_json(author, index, i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title,
            work_type,
            indexing,
            wos,
            country,
            year,
            authors,
        })
    }
}

impl RawAuthorship {
    fn from_json(value: Value, record: usize, index: usize) -> Result<Self> {
        let location = format!("record {record}, author {index}");
        let mut fields = Fields::from_value(value, &location, "")?;

        let person_name = fields.text("pib")?;
        let mut fac = fields.nested("fac")?;
        let faculty_name = fac.text("faculty")?;
        let faculty_id = fac.take::<FacultyIdRepr>("id")?.resolve(&fac, "id")?;
        let department_name = fields.nested("dep")?.text("department")?;

        Ok(Self {
            person_name,
            faculty_name,
            faculty_id,
            department_name,
        })
    }
}

/// `fac.id` shows up both as a number and as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum FacultyIdRepr {
    Number(FacultyId),
    Text(String),
}

impl FacultyIdRepr {
    fn resolve(self, fields: &Fields<'_>, name: &str) -> Result<FacultyId> {
        match self {
            FacultyIdRepr::Number(id) => Ok(id),
            FacultyIdRepr::Text(s) => s.trim().parse().map_err(|_| {
                fields.error(name, format!("expected a faculty id, got {s:?}"))
            }),
        }
    }
}

/// Owned JSON object consumed one named field at a time.
struct Fields<'a> {
    map: Map<String, Value>,
    location: &'a str,
    prefix: String,
}

impl<'a> Fields<'a> {
    fn from_value(value: Value, location: &'a str, prefix: &str) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                location,
                prefix: prefix.to_string(),
            }),
            other => {
                let message = format!(
                    "expected an object{}, got {}",
                    describe_prefix(prefix),
                    kind(&other)
                );
                Err(ReportError::schema(location, message))
            }
        }
    }

    fn path(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn error(&self, name: &str, message: impl std::fmt::Display) -> ReportError {
        let message = format!("field `{}`: {message}", self.path(name));
        ReportError::schema(self.location, message)
    }

    fn take<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        let value = self.map.remove(name).ok_or_else(|| {
            let message = format!("missing field `{}`", self.path(name));
            ReportError::schema(self.location, message)
        })?;
        serde_json::from_value(value).map_err(|e| self.error(name, e))
    }

    /// Text field; JSON `null` reads as empty.
    fn text(&mut self, name: &str) -> Result<String> {
        Ok(self.take::<Option<String>>(name)?.unwrap_or_default())
    }

    fn nested(&mut self, name: &str) -> Result<Fields<'a>> {
        let prefix = format!("{}.", self.path(name));
        let value = self.take::<Value>(name)?;
        Fields::from_value(value, self.location, &prefix)
    }
}

fn describe_prefix(prefix: &str) -> String {
    match prefix.strip_suffix('.') {
        Some(name) => format!(" for `{name}`"),
        None => String::new(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert a parsed export document into typed publications.
pub fn publications_from_value(document: Value) -> Result<Vec<RawPublication>> {
    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(ReportError::schema(
                "document",
                format!("expected a JSON array of publications, got {}", kind(&other)),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| RawPublication::from_json(item, i))
        .collect()
}

/// Read and type the whole export at `path`.
pub fn load_publications(path: &Path) -> Result<Vec<RawPublication>> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value =
        serde_json::from_str(&content).map_err(|source| ReportError::InputJson {
            path: path.to_path_buf(),
            source,
        })?;

    let publications = publications_from_value(document)?;
    debug!(path = %path.display(), count = publications.len(), "Loaded publications");
    Ok(publications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_record() -> Value {
        json!({
            "job_title": "Thin films",
            "types": "Стаття",
            "indexing": "так",
            "wos": "ні",
            "country": "Україна",
            "pubyear": 2021,
            "extra": "ignored",
            "author": [
                {
                    "pib": "Петренко",
                    "fac": { "faculty": "ЕЛІТ", "id": 2 },
                    "dep": { "department": "Кафедра ЕКТ" }
                },
                {
                    "pib": "Коваль",
                    "fac": { "faculty": "Конотопський", "id": "209" },
                    "dep": { "department": null }
                }
            ]
        })
    }

    fn schema_parts(err: ReportError) -> (String, String) {
        match err {
            ReportError::Schema { location, message } => (location, message),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_record() -> Result<()> {
        let publication = RawPublication::from_json(sample_record(), 0)?;

        assert_eq!(publication.title, "Thin films");
        assert_eq!(publication.year, Scalar::Integer(2021));
        assert!(publication.scopus_indexed());
        assert!(!publication.wos_indexed());
        assert_eq!(publication.authors.len(), 2);
        assert_eq!(publication.authors[0].faculty_id, 2);
        assert_eq!(publication.authors[1].faculty_id, 209);
        assert_eq!(publication.authors[1].department_name, "");
        Ok(())
    }

    #[test]
    fn test_sentinel_is_exact_match() -> Result<()> {
        let mut record = sample_record();
        record["indexing"] = json!("Ні");
        record["wos"] = json!(null);
        let publication = RawPublication::from_json(record, 0)?;
        assert!(publication.scopus_indexed());
        assert!(publication.wos_indexed());
        Ok(())
    }

    #[test]
    fn test_year_as_text() -> Result<()> {
        let mut record = sample_record();
        record["pubyear"] = json!("2020");
        let publication = RawPublication::from_json(record, 0)?;
        assert_eq!(publication.year, Scalar::Text("2020".to_string()));
        assert_eq!(publication.year.to_string(), "2020");
        Ok(())
    }

    #[test]
    fn test_missing_top_level_field() {
        let mut record = sample_record();
        if let Some(obj) = record.as_object_mut() {
            obj.remove("country");
        }
        let err = RawPublication::from_json(record, 4).err();
        let (location, message) = schema_parts(err.expect("should fail"));
        assert_eq!(location, "record 4");
        assert_eq!(message, "missing field `country`");
    }

    #[test]
    fn test_missing_nested_field_names_path() {
        let mut record = sample_record();
        record["author"][1]["fac"] = json!({ "faculty": "X" });
        let err = RawPublication::from_json(record, 0).err();
        let (location, message) = schema_parts(err.expect("should fail"));
        assert_eq!(location, "record 0, author 1");
        assert_eq!(message, "missing field `fac.id`");
    }

    #[test]
    fn test_bad_faculty_id() {
        let mut record = sample_record();
        record["author"][0]["fac"]["id"] = json!("abc");
        let err = RawPublication::from_json(record, 0).err();
        let (_, message) = schema_parts(err.expect("should fail"));
        assert!(message.starts_with("field `fac.id`"), "{message}");
    }

    #[test]
    fn test_mistyped_field_names_field() {
        let mut record = sample_record();
        record["author"] = json!("nobody");
        let err = RawPublication::from_json(record, 0).err();
        let (_, message) = schema_parts(err.expect("should fail"));
        assert!(message.starts_with("field `author`"), "{message}");
    }

    #[test]
    fn test_document_must_be_array() {
        let err = publications_from_value(json!({ "job_title": "x" })).err();
        let (location, message) = schema_parts(err.expect("should fail"));
        assert_eq!(location, "document");
        assert!(message.contains("an object"));
    }

    #[test]
    fn test_load_publications_from_file() -> Result<()> {
        let mut file = NamedTempFile::new().expect("temp file");
        let body = json!([sample_record(), sample_record()]).to_string();
        file.write_all(body.as_bytes()).expect("write");

        let publications = load_publications(file.path())?;
        assert_eq!(publications.len(), 2);
        assert_eq!(publications[1].authors[0].person_name, "Петренко");
        Ok(())
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"[{ not json").expect("write");
        assert!(matches!(
            load_publications(file.path()),
            Err(ReportError::InputJson { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_publications(Path::new("/nonexistent/export.json")),
            Err(ReportError::InputRead { .. })
        ));
    }
}
