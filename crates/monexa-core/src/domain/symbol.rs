use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Market symbol/ticker as supplied by the caller.
///
/// Symbols are opaque: parsing only trims surrounding whitespace and rejects
/// the empty string. The original casing is kept for upstream calls, while
/// [`Symbol::normalized`] yields the uppercase form used in responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Splits a comma-delimited list, dropping entries that are blank after trimming.
    ///
    /// Order and duplicates are preserved.
    pub fn parse_list(input: &str) -> Vec<Self> {
        input
            .split(',')
            .filter_map(|raw| Self::parse(raw).ok())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        self.0.to_uppercase()
    }

    /// Case-insensitive suffix match, e.g. `.NS` against `reliance.ns`.
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.0.to_uppercase().ends_with(&suffix.to_uppercase())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
