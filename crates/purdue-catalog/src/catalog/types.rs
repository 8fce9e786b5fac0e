//! Types for catalog API responses.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level wrapper the OData API puts around every collection response.
///
/// A missing `value` key is treated as an empty collection. This is the only
/// shape validation the scraper performs.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataCollection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// An academic subject (department code) as returned by `/Subjects`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Subject {
    /// Opaque key used to parameterize the per-subject course query.
    #[serde(rename = "Id", deserialize_with = "opaque_key")]
    pub id: String,
    /// Short code, e.g. "CS".
    #[serde(rename = "Abbreviation")]
    pub abbreviation: String,
}

/// A raw course object from `/Courses`, passed through to the output file
/// unmodified. Nested classes, sections, meetings, instructors, and
/// rooms/buildings stay opaque; the scraper only ever looks at whether the
/// `Classes` array is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Course(pub Value);

impl Course {
    /// True if the course has at least one class after the term-scoped
    /// expansion. Courses failing this check are dropped before output.
    pub fn has_classes(&self) -> bool {
        matches!(self.0.get("Classes"), Some(Value::Array(classes)) if !classes.is_empty())
    }
}

/// Accepts a subject id as either a JSON string (GUIDs, the production API)
/// or a bare number, rendering both to a string.
fn opaque_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "subject id must be a string or number, got {other}"
        ))),
    }
}
