use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A scalar field rendered as text.
///
/// Exports are not consistent about types (an `Id` may be a string in one
/// file and a number in another), so any non-null JSON value is accepted.
/// Containers are kept as their compact JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Text(String);

impl Text {
    /// Creates text from a string
    pub fn new(s: impl Into<String>) -> Self {
        Text(s.into())
    }

    /// Returns the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Err(serde::de::Error::custom("expected a non-null scalar")),
            Value::String(s) => Ok(Text(s)),
            other => Ok(Text(other.to_string())),
        }
    }
}

/// Deserializes an optional field, treating a value of the wrong shape as
/// absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Deserializes a list, dropping elements of the wrong shape. Anything that
/// is not an array is an empty list.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(collect_lenient(value))
}

/// Same as [`lenient_list`] but a lone value (an object or a scalar) is a
/// list of one.
pub(crate) fn lenient_one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(_) => Ok(collect_lenient(value)),
        Value::Null => Ok(Vec::new()),
        _ => Ok(T::deserialize(value).ok().into_iter().collect()),
    }
}

fn collect_lenient<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|x| T::deserialize(x).ok())
            .collect(),
        _ => Vec::new(),
    }
}
