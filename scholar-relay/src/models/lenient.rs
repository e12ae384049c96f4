//! Deserializers that accept both query-string text and JSON values.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Bool(b)) => b,
        Some(Loose::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Loose::Number(_)) | None => false,
    })
}

pub(crate) fn gpa<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => Some(n),
        Some(Loose::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Loose::Bool(_)) | None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(Loose::Number(n)) => Some(n.to_string()),
        Some(Loose::Bool(_)) | None => None,
    })
}

/// An array of values, or a single value, as non-blank strings.
pub(crate) fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Option<Loose>>),
        One(Loose),
    }

    let items = match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Loose::Text(s) => Some(s.trim().to_string()),
            Loose::Number(n) => Some(n.to_string()),
            Loose::Bool(_) => None,
        })
        .filter(|s| !s.is_empty())
        .collect())
}
