//! Canonical query-string construction.
//!
//! Parameters keep their insertion order. Absent values and empty strings are
//! dropped entirely rather than serialized as `key=`.

use url::form_urlencoded;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Absent,
}

impl QueryValue {
    /// Serialized form, or `None` when the parameter should be omitted.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Str(s) if s.is_empty() => None,
            Self::Str(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::UInt(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Absent => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Ordered set of named query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Parameters that will actually be serialized.
    pub fn defined(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.pairs
            .iter()
            .filter_map(|(name, value)| value.render().map(|v| (name.as_str(), v)))
    }

    /// Encoded query string without the leading `?`; empty when nothing is defined.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.defined() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }
}

/// Join `path` with the defined parameters.
///
/// Returns `path` unchanged when no parameter has a defined, non-empty value.
#[must_use]
pub fn build_path(path: &str, params: &QueryParams) -> String {
    let query = params.encode();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
