use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upstream provider identifiers used in logs and resolution reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Alphavantage,
    Yahoo,
    /// Yahoo Finance served through the RapidAPI marketplace.
    RapidYahoo,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphavantage => "alphavantage",
            Self::Yahoo => "yahoo",
            Self::RapidYahoo => "rapidyahoo",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
