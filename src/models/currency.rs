//! Supported currencies
//!
//! ISO codes with a display symbol. Amounts are not converted between
//! currencies; a transaction only records the rate it was entered with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency of an account or transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Inr,
    Cny,
    Other,
}

impl Currency {
    pub const ALL: [Currency; 9] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Cad,
        Self::Aud,
        Self::Inr,
        Self::Cny,
        Self::Other,
    ];

    /// ISO 4217 code ("Other" for anything unlisted)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Inr => "INR",
            Self::Cny => "CNY",
            Self::Other => "Other",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy | Self::Cny => "¥",
            Self::Cad => "C$",
            Self::Aud => "A$",
            Self::Inr => "₹",
            Self::Other => "#",
        }
    }

    /// Parse a currency code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let valid: Vec<_> = Self::ALL.iter().map(|c| c.code()).collect();
            format!("Unknown currency '{}'. Valid: {}", s, valid.join(", "))
        })
    }
}
