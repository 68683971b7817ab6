//! Tenor period grammar.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Unit of a tenor period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TenorUnit {
    /// Business days.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl TenorUnit {
    /// Single-letter code used in tenor strings.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'D' => Some(TenorUnit::Days),
            'W' => Some(TenorUnit::Weeks),
            'M' => Some(TenorUnit::Months),
            'Y' => Some(TenorUnit::Years),
            _ => None,
        }
    }
}

/// A positive period such as `1W`, `18M` or `10Y`.
///
/// Parsing accepts a positive integer followed by one unit letter
/// (`D`, `W`, `M`, `Y`, case-insensitive). Display is canonical upper case.
///
/// ```rust
/// use rfr_core::types::{Tenor, TenorUnit};
///
/// let t: Tenor = "18m".parse().unwrap();
/// assert_eq!(t.length(), 18);
/// assert_eq!(t.unit(), TenorUnit::Months);
/// assert_eq!(t.to_string(), "18M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tenor {
    length: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor. Zero-length tenors are rejected.
    pub fn new(length: u32, unit: TenorUnit) -> Result<Self, CoreError> {
        if length == 0 {
            return Err(CoreError::invalid_tenor(
                format!("0{}", unit.code()),
                "length must be positive",
            ));
        }
        Ok(Self { length, unit })
    }

    /// Number of units.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Period unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Tenor expressed in months, if it is a month or year tenor.
    #[must_use]
    pub fn months(&self) -> Option<u32> {
        match self.unit {
            TenorUnit::Months => Some(self.length),
            TenorUnit::Years => Some(self.length * 12),
            _ => None,
        }
    }

    /// Whether the tenor is at most one year long.
    ///
    /// Day and week tenors are always short.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.months().map_or(true, |m| m <= 12)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let mut chars = text.chars();
        let Some(last) = chars.next_back() else {
            return Err(CoreError::invalid_tenor(s, "empty tenor"));
        };
        let digits = chars.as_str();

        let unit = TenorUnit::from_code(last)
            .ok_or_else(|| CoreError::invalid_tenor(s, format!("unknown unit '{last}'")))?;

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::invalid_tenor(s, "expected <n><D|W|M|Y>"));
        }

        let length: u32 = digits
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, "length out of range"))?;

        if length == 0 {
            return Err(CoreError::invalid_tenor(s, "length must be positive"));
        }

        Ok(Self { length, unit })
    }
}

impl Serialize for Tenor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tenor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
