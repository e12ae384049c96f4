use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the scholarship dataset.
///
/// The record is kept as the JSON object it was loaded from and serialized
/// back exactly as read. Eligibility fields are read through accessors;
/// a missing or malformed `tags`, `majors` or `states` reads as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarshipRecord {
    fields: Map<String, Value>,
}

impl ScholarshipRecord {
    /// Any field as stored.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// The declared minimum GPA, if present and numeric.
    pub fn minimum_gpa(&self) -> Option<f64> {
        let gpa = match self.get("minGPA")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        gpa.is_finite().then_some(gpa)
    }

    /// Eligibility categories such as `low-income` or `veteran`.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.listed("tags")
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Empty means open to all majors.
    pub fn listed_majors(&self) -> impl Iterator<Item = &str> {
        self.listed("majors")
    }

    /// Empty means no state restriction.
    pub fn listed_states(&self) -> impl Iterator<Item = &str> {
        self.listed("states")
    }

    /// Non-blank strings of an array field.
    fn listed(&self, key: &str) -> impl Iterator<Item = &str> {
        self.get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
