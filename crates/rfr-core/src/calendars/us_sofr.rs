//! US government bond calendar as used for SOFR fixings.

use chrono::Weekday;

use super::rules::{is_good_friday, is_last_weekday, is_nth_weekday};
use super::Calendar;
use crate::types::Date;

/// US SOFR calendar.
///
/// Follows the SIFMA government securities calendar: federal holidays plus
/// Good Friday. New Year's Day falling on a Saturday is not observed on the
/// preceding Friday.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsSofrCalendar;

impl UsSofrCalendar {
    fn is_holiday_rule(date: Date) -> bool {
        let year = date.year();
        let month = date.month();
        let day = date.day();
        let weekday = date.weekday();

        match (month, day) {
            // New Year's Day (Sunday moves to Monday)
            (1, 1) => return true,
            (1, 2) if weekday == Weekday::Mon => return true,

            // Juneteenth, observed since 2022
            (6, 19) if year >= 2022 => return true,
            (6, 18) if year >= 2022 && weekday == Weekday::Fri => return true,
            (6, 20) if year >= 2022 && weekday == Weekday::Mon => return true,

            // Independence Day
            (7, 4) => return true,
            (7, 3) if weekday == Weekday::Fri => return true,
            (7, 5) if weekday == Weekday::Mon => return true,

            // Veterans Day (Sunday moves to Monday)
            (11, 11) => return true,
            (11, 12) if weekday == Weekday::Mon => return true,

            // Christmas
            (12, 25) => return true,
            (12, 24) if weekday == Weekday::Fri => return true,
            (12, 26) if weekday == Weekday::Mon => return true,

            _ => {}
        }

        // SOFR was published on Good Friday 2023
        if is_good_friday(date) && year != 2023 {
            return true;
        }

        match month {
            // Martin Luther King Jr. Day
            1 => is_nth_weekday(date, Weekday::Mon, 3),
            // Presidents Day
            2 => is_nth_weekday(date, Weekday::Mon, 3),
            // Memorial Day
            5 => is_last_weekday(date, Weekday::Mon),
            // Labor Day
            9 => is_nth_weekday(date, Weekday::Mon, 1),
            // Columbus Day
            10 => is_nth_weekday(date, Weekday::Mon, 2),
            // Thanksgiving
            11 => is_nth_weekday(date, Weekday::Thu, 4),
            _ => false,
        }
    }
}

impl Calendar for UsSofrCalendar {
    fn name(&self) -> &'static str {
        "US SOFR"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::is_holiday_rule(date)
    }
}
