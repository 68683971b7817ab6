//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and business day adjustment
//! - Holiday calendars for the overnight-rate markets
//! - [`Market`], the lookup from market identifier to calendar and day count

use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod conventions;
mod japan;
mod rules;
mod target;
mod uk;
mod us_sofr;

pub use conventions::{adjust, BusinessDayConvention};
pub use japan::JapanCalendar;
pub use target::TargetCalendar;
pub use uk::UkCalendar;
pub use us_sofr::UsSofrCalendar;

use crate::daycounts::DayCountConvention;
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Tenor, TenorUnit};

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Advances a date by a tenor.
    ///
    /// Day tenors count business days. Week, month and year tenors count
    /// calendar periods and the result is adjusted with `convention`.
    fn advance(
        &self,
        date: Date,
        tenor: Tenor,
        convention: BusinessDayConvention,
    ) -> CoreResult<Date> {
        match tenor.unit() {
            TenorUnit::Days => Ok(self.add_business_days(date, tenor.length() as i32)),
            _ => Ok(self.adjust(date.add_tenor(tenor)?, convention)),
        }
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Market identifier selecting a holiday calendar and default day count.
///
/// ```rust
/// use rfr_core::calendars::{Calendar, Market};
/// use rfr_core::daycounts::DayCountConvention;
///
/// let market: Market = "JP".parse().unwrap();
/// assert_eq!(market.calendar().name(), "Japan");
/// assert_eq!(market.default_day_count(), DayCountConvention::Act365Fixed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Market {
    /// United States (SOFR)
    US,
    /// United Kingdom (SONIA)
    UK,
    /// Japan (TONA)
    JP,
    /// Euro area (€STR)
    EU,
}

impl Market {
    /// Holiday calendar for the market.
    #[must_use]
    pub fn calendar(&self) -> &'static dyn Calendar {
        match self {
            Market::US => &UsSofrCalendar,
            Market::UK => &UkCalendar,
            Market::JP => &JapanCalendar,
            Market::EU => &TargetCalendar,
        }
    }

    /// Day count used by the market's overnight index swaps.
    #[must_use]
    pub fn default_day_count(&self) -> DayCountConvention {
        match self {
            Market::US | Market::EU => DayCountConvention::Act360,
            Market::UK | Market::JP => DayCountConvention::Act365Fixed,
        }
    }

    /// Short identifier ("US", "UK", "JP", "EU").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Market::US => "US",
            Market::UK => "UK",
            Market::JP => "JP",
            Market::EU => "EU",
        }
    }

    /// Returns all supported markets.
    #[must_use]
    pub fn all() -> &'static [Market] {
        &[Market::US, Market::UK, Market::JP, Market::EU]
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Market {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "US" | "USA" | "USD" => Ok(Market::US),
            "UK" | "GB" | "GBP" => Ok(Market::UK),
            "JP" | "JAPAN" | "JPY" => Ok(Market::JP),
            "EU" | "EUR" | "TARGET" => Ok(Market::EU),
            _ => Err(CoreError::UnknownMarket {
                name: s.to_string(),
            }),
        }
    }
}

impl Serialize for Market {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Market {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
