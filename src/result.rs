use std::fmt;

use serde::Serialize;

/// How a probe reached its verdict.
///
/// `Fallback` does not say whether the font was found; read
/// [`FontCheckResult::loaded`] for that.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStatus {
    Loaded,
    Unloaded,
    Error,
    Fallback,
}

impl FontStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStatus::Loaded => "loaded",
            FontStatus::Unloaded => "unloaded",
            FontStatus::Error => "error",
            FontStatus::Fallback => "fallback",
        }
    }
}

impl fmt::Display for FontStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontCheckResult {
    pub name: String,
    pub loaded: bool,
    pub status: FontStatus,
}

impl FontCheckResult {
    pub fn new(name: impl Into<String>, loaded: bool, status: FontStatus) -> Self {
        Self {
            name: name.into(),
            loaded,
            status,
        }
    }

    pub fn loaded(name: impl Into<String>) -> Self {
        Self::new(name, true, FontStatus::Loaded)
    }
}

/// Aggregate outcome of a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontLoadResult {
    pub success: bool,
    /// Failed probes in input order. Empty on success.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_fonts: Vec<FontCheckResult>,
    /// Every probe in input order.
    pub all_fonts: Vec<FontCheckResult>,
}

impl FontLoadResult {
    pub fn from_results(all_fonts: Vec<FontCheckResult>) -> Self {
        let failed_fonts: Vec<_> = all_fonts.iter().filter(|f| !f.loaded).cloned().collect();
        Self {
            success: failed_fonts.is_empty(),
            failed_fonts,
            all_fonts,
        }
    }
}

/// Which fonts a check should look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontQuery {
    /// Every family currently in the registry.
    All,
    One(String),
    Many(Vec<String>),
}

impl From<String> for FontQuery {
    fn from(name: String) -> Self {
        // An empty name means "no names given".
        if name.is_empty() {
            FontQuery::All
        } else {
            FontQuery::One(name)
        }
    }
}

impl From<&str> for FontQuery {
    fn from(name: &str) -> Self {
        FontQuery::from(name.to_owned())
    }
}

impl From<Vec<String>> for FontQuery {
    fn from(names: Vec<String>) -> Self {
        FontQuery::Many(names)
    }
}

impl From<&[&str]> for FontQuery {
    fn from(names: &[&str]) -> Self {
        FontQuery::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FontQuery {
    fn from(names: [&str; N]) -> Self {
        FontQuery::from(&names[..])
    }
}

impl<T: Into<FontQuery>> From<Option<T>> for FontQuery {
    fn from(query: Option<T>) -> Self {
        query.map_or(FontQuery::All, Into::into)
    }
}

/// Strips quote characters from a family name.
pub fn normalize_family(family: &str) -> String {
    family.chars().filter(|c| *c != '\'' && *c != '"').collect()
}

/// CSS font shorthand used for synchronous membership checks.
pub fn probe_shorthand(family: &str) -> String {
    format!("12px '{}'", normalize_family(family))
}
