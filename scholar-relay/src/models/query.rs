use super::lenient::{flag, gpa, text};
use serde::Deserialize;

/// Criteria for the scholarship search.
///
/// Deserializes both from URL query strings (every value is text) and from a
/// JSON body (flags as booleans, GPA as a number). Blank text is treated as
/// absent, and an unparseable GPA is dropped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(deserialize_with = "flag")]
    pub low_income: bool,
    #[serde(deserialize_with = "flag")]
    pub first_gen: bool,
    #[serde(deserialize_with = "flag")]
    pub volunteer: bool,
    #[serde(deserialize_with = "flag")]
    pub veteran: bool,
    #[serde(deserialize_with = "flag")]
    pub disability: bool,

    /// The GPA the student holds.
    #[serde(rename = "minGPA", deserialize_with = "gpa")]
    pub gpa: Option<f64>,

    #[serde(deserialize_with = "text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "text")]
    pub major: Option<String>,
    #[serde(deserialize_with = "text")]
    pub ethnicity: Option<String>,
    #[serde(deserialize_with = "text")]
    pub gender: Option<String>,
}

impl FilterQuery {
    /// Number of criteria that will constrain the search.
    pub fn active_criteria(&self) -> usize {
        let flags = [
            self.low_income,
            self.first_gen,
            self.volunteer,
            self.veteran,
            self.disability,
        ]
        .into_iter()
        .filter(|f| *f)
        .count();

        let values = [
            self.gpa.is_some(),
            self.state.is_some(),
            self.major.is_some(),
            self.ethnicity.is_some(),
            self.gender.is_some(),
        ]
        .into_iter()
        .filter(|v| *v)
        .count();

        flags + values
    }

    pub fn is_empty(&self) -> bool {
        self.active_criteria() == 0
    }
}
