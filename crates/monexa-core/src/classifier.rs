//! Market classification by ticker suffix.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Suffix carried by National Stock Exchange of India listings.
pub const DOMESTIC_SUFFIX: &str = ".NS";

/// Routing hint derived from a symbol's market suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegion {
    Domestic,
    International,
}

impl MarketRegion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
        }
    }
}

impl Display for MarketRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `symbol`; anything without the domestic suffix is international.
pub fn classify(symbol: &Symbol) -> MarketRegion {
    if symbol.has_suffix(DOMESTIC_SUFFIX) {
        MarketRegion::Domestic
    } else {
        MarketRegion::International
    }
}
