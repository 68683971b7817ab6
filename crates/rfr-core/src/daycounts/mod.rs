//! Day count conventions for overnight-index swap accruals.
//!
//! Day count conventions determine how a date interval maps to a year
//! fraction. Overnight rate markets use the actual-day family only:
//!
//! - [`Act360`]: Actual/360 (SOFR, ESTR)
//! - [`Act365Fixed`]: Actual/365 Fixed (SONIA, TONA)
//!
//! # Usage
//!
//! ```rust
//! use rfr_core::daycounts::{Act360, DayCount};
//! use rfr_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//!
//! assert_eq!(Act360.day_count(start, end), 90);
//! assert_eq!(Act360.year_fraction(start, end), dec!(0.25));
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) so that a curve
/// holding one can be shared across threads.
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g., "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the exact year fraction between two dates.
    ///
    /// Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64` for the numerical engine.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(f64::NAN)
    }
}

/// Runtime-selectable day count convention.
///
/// Serializes to its market name and parses from the usual aliases.
///
/// ```rust
/// use rfr_core::daycounts::DayCountConvention;
///
/// let dc: DayCountConvention = "Actual/365 Fixed".parse().unwrap();
/// assert_eq!(dc, DayCountConvention::Act365Fixed);
/// assert_eq!(dc.name(), "ACT/365F");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/360 - USD and EUR overnight rates
    Act360,

    /// Actual/365 Fixed - GBP and JPY overnight rates
    Act365Fixed,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[DayCountConvention::Act360, DayCountConvention::Act365Fixed]
    }

    /// Returns the year basis (denominator).
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360 => 360,
            DayCountConvention::Act365Fixed => 365,
        }
    }

    /// Year fraction between two dates as `f64`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction_f64(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction_f64(start, end),
        }
    }

    /// Exact year fraction between two dates.
    #[must_use]
    pub fn year_fraction_exact(&self, start: Date, end: Date) -> Decimal {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a string.
    ///
    /// Supports market names ("ACT/360"), enum-style names ("Act365Fixed")
    /// and common aliases ("Actual/360", "A365F").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" | "A360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365FIXED" | "ACT365F" | "ACT365" | "A365F" => Ok(DayCountConvention::Act365Fixed),

            _ => Err(CoreError::UnknownDayCount {
                name: s.to_string(),
            }),
        }
    }
}

impl Serialize for DayCountConvention {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DayCountConvention {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convention_enum() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        for convention in DayCountConvention::all() {
            let dc = convention.to_day_count();
            assert_eq!(dc.name(), convention.name());

            let yf = dc.year_fraction(start, end);
            assert!(yf > dec!(0.4) && yf < dec!(0.6));
            assert_eq!(convention.year_fraction_exact(start, end), yf);
        }
    }

    #[test]
    fn test_f64_matches_exact() {
        let start = Date::from_ymd(2025, 1, 15).unwrap();
        let end = Date::from_ymd(2035, 1, 16).unwrap();

        let days = start.days_between(&end) as f64;
        assert_relative_eq!(
            DayCountConvention::Act360.year_fraction(start, end),
            days / 360.0,
            epsilon = 1e-14
        );
        assert_relative_eq!(
            DayCountConvention::Act365Fixed.year_fraction(start, end),
            days / 365.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_parse_aliases() {
        for name in ["ACT/360", "act/360", "Actual/360", "Act360"] {
            assert_eq!(
                name.parse::<DayCountConvention>().unwrap(),
                DayCountConvention::Act360
            );
        }
        for name in ["ACT/365F", "ACT/365 Fixed", "Act365Fixed", "A365F"] {
            assert_eq!(
                name.parse::<DayCountConvention>().unwrap(),
                DayCountConvention::Act365Fixed
            );
        }
        assert!(matches!(
            "30/360".parse::<DayCountConvention>(),
            Err(CoreError::UnknownDayCount { .. })
        ));
    }

    #[test]
    fn test_serde_uses_market_name() {
        let json = serde_json::to_string(&DayCountConvention::Act365Fixed).unwrap();
        assert_eq!(json, "\"ACT/365F\"");

        let parsed: DayCountConvention = serde_json::from_str("\"Actual/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act360);
    }

    #[test]
    fn test_basis() {
        assert_eq!(DayCountConvention::Act360.basis(), 360);
        assert_eq!(DayCountConvention::Act365Fixed.basis(), 365);
    }
}
