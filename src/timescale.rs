use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MoneygraphError, Result};

/// How far back a balance or chart window reaches from its reference month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timescale {
    /// From the earliest available data.
    All,
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
}

impl Timescale {
    /// Month count, or `None` for `All`.
    pub fn months(self) -> Option<u32> {
        match self {
            Timescale::All => None,
            Timescale::OneMonth => Some(1),
            Timescale::ThreeMonths => Some(3),
            Timescale::SixMonths => Some(6),
            Timescale::OneYear => Some(12),
            Timescale::TwoYears => Some(24),
            Timescale::FiveYears => Some(60),
        }
    }

    /// Numeric code as used by the dashboard (`All` is 0).
    pub fn code(self) -> u32 {
        self.months().unwrap_or(0)
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.code() == code)
    }

    /// Short token accepted on the command line.
    pub fn token(self) -> &'static str {
        match self {
            Timescale::All => "all",
            Timescale::OneMonth => "1m",
            Timescale::ThreeMonths => "3m",
            Timescale::SixMonths => "6m",
            Timescale::OneYear => "1y",
            Timescale::TwoYears => "2y",
            Timescale::FiveYears => "5y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timescale::All => "All time",
            Timescale::OneMonth => "1 month",
            Timescale::ThreeMonths => "3 months",
            Timescale::SixMonths => "6 months",
            Timescale::OneYear => "1 year",
            Timescale::TwoYears => "2 years",
            Timescale::FiveYears => "5 years",
        }
    }

    pub fn all() -> &'static [Timescale] {
        &[
            Timescale::All,
            Timescale::OneMonth,
            Timescale::ThreeMonths,
            Timescale::SixMonths,
            Timescale::OneYear,
            Timescale::TwoYears,
            Timescale::FiveYears,
        ]
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Timescale {
    type Err = MoneygraphError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(t) = Self::all().iter().copied().find(|t| t.token() == s) {
            return Ok(t);
        }
        s.parse::<u32>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| {
                MoneygraphError::Parse(format!(
                    "unknown timescale {s:?} (expected all, 1m, 3m, 6m, 1y, 2y, 5y or a month count)"
                ))
            })
    }
}

impl TryFrom<String> for Timescale {
    type Error = MoneygraphError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Timescale> for String {
    fn from(value: Timescale) -> Self {
        value.token().to_string()
    }
}
