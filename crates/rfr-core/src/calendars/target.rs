//! TARGET calendar (€STR).

use super::rules::{is_easter_monday, is_good_friday};
use super::Calendar;
use crate::types::Date;

/// Trans-European Automated Real-time Gross settlement Express Transfer
/// calendar.
///
/// Closing days: New Year's Day, Good Friday, Easter Monday, Labour Day,
/// Christmas Day and Boxing Day.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetCalendar;

impl Calendar for TargetCalendar {
    fn name(&self) -> &'static str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }
        let fixed = matches!(
            (date.month(), date.day()),
            (1, 1) | (5, 1) | (12, 25) | (12, 26)
        );
        !(fixed || is_good_friday(date) || is_easter_monday(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_target_closing_days_2025() {
        let cal = TargetCalendar;
        for date in [
            d(2025, 1, 1),
            d(2025, 4, 18),
            d(2025, 4, 21),
            d(2025, 5, 1),
            d(2025, 12, 25),
            d(2025, 12, 26),
        ] {
            assert!(cal.is_holiday(date), "{date} should be closed");
        }
    }

    #[test]
    fn test_target_open_on_national_holidays() {
        let cal = TargetCalendar;
        // Whit Monday and German Unity Day are not TARGET holidays
        assert!(cal.is_business_day(d(2025, 6, 9)));
        assert!(cal.is_business_day(d(2025, 10, 3)));
    }
}
