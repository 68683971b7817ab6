//! UK settlement calendar (SONIA).

use chrono::Weekday;

use super::rules::{is_easter_monday, is_good_friday, is_last_weekday, is_nth_weekday};
use super::Calendar;
use crate::types::Date;

/// UK bank holiday calendar for England and Wales.
///
/// Covers New Year, Easter, the May and August bank holidays, Christmas and
/// Boxing Day with weekend substitutes, and the one-off royal holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct UkCalendar;

impl UkCalendar {
    fn is_holiday_rule(date: Date) -> bool {
        let year = date.year();
        let month = date.month();
        let day = date.day();
        let weekday = date.weekday();

        if is_good_friday(date) || is_easter_monday(date) {
            return true;
        }

        if is_special_holiday(year, month, day) {
            return true;
        }

        match month {
            // New Year's Day, moved to Monday when on a weekend
            1 => day == 1 || ((day == 2 || day == 3) && weekday == Weekday::Mon),

            5 | 6 => is_early_may(date) || is_spring_bank(date),

            // Summer bank holiday
            8 => is_last_weekday(date, Weekday::Mon),

            // Christmas and Boxing Day with substitutes on the following Mon/Tue
            12 => {
                day == 25
                    || day == 26
                    || ((day == 27 || day == 28) && matches!(weekday, Weekday::Mon | Weekday::Tue))
            }

            _ => false,
        }
    }
}

/// Early May bank holiday; moved to VE day in 1995 and 2020.
fn is_early_may(date: Date) -> bool {
    if date.month() != 5 {
        return false;
    }
    match date.year() {
        1995 | 2020 => date.day() == 8,
        _ => is_nth_weekday(date, Weekday::Mon, 1),
    }
}

/// Spring bank holiday; moved into June for the jubilees.
fn is_spring_bank(date: Date) -> bool {
    match date.year() {
        2002 | 2012 => date.month() == 6 && date.day() == 4,
        2022 => date.month() == 6 && date.day() == 2,
        _ => date.month() == 5 && is_last_weekday(date, Weekday::Mon),
    }
}

fn is_special_holiday(year: i32, month: u32, day: u32) -> bool {
    matches!(
        (year, month, day),
        // Millennium
        (1999, 12, 31)
            // Golden Jubilee
            | (2002, 6, 3)
            // Royal Wedding
            | (2011, 4, 29)
            // Diamond Jubilee
            | (2012, 6, 5)
            // Platinum Jubilee
            | (2022, 6, 3)
            // State funeral of Queen Elizabeth II
            | (2022, 9, 19)
            // Coronation of King Charles III
            | (2023, 5, 8)
    )
}

impl Calendar for UkCalendar {
    fn name(&self) -> &'static str {
        "UK Settlement"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::is_holiday_rule(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_uk_regular_holidays_2025() {
        let cal = UkCalendar;
        for date in [
            d(2025, 1, 1),
            d(2025, 4, 18),
            d(2025, 4, 21),
            d(2025, 5, 5),
            d(2025, 5, 26),
            d(2025, 8, 25),
            d(2025, 12, 25),
            d(2025, 12, 26),
        ] {
            assert!(cal.is_holiday(date), "{date} should be a holiday");
        }
        assert!(cal.is_business_day(d(2025, 5, 12)));
    }

    #[test]
    fn test_uk_new_years_substitute() {
        let cal = UkCalendar;
        // Jan 1 2022 is a Saturday, substitute Monday Jan 3
        assert!(cal.is_holiday(d(2022, 1, 3)));
        // Jan 1 2023 is a Sunday, substitute Monday Jan 2
        assert!(cal.is_holiday(d(2023, 1, 2)));
        assert!(cal.is_business_day(d(2023, 1, 3)));
    }

    #[test]
    fn test_uk_christmas_substitute() {
        let cal = UkCalendar;
        // Christmas 2021 on Saturday: Mon 27 and Tue 28
        assert!(cal.is_holiday(d(2021, 12, 27)));
        assert!(cal.is_holiday(d(2021, 12, 28)));
        // Christmas 2020 on Friday: Boxing Day substitute Mon 28
        assert!(cal.is_holiday(d(2020, 12, 28)));
        // Christmas 2022 on Sunday: Mon 26 and Tue 27
        assert!(cal.is_holiday(d(2022, 12, 27)));
        assert!(cal.is_business_day(d(2022, 12, 28)));
    }

    #[test]
    fn test_uk_moved_and_special_holidays() {
        let cal = UkCalendar;
        assert!(cal.is_holiday(d(2020, 5, 8)));
        assert!(cal.is_business_day(d(2020, 5, 4)));

        assert!(cal.is_holiday(d(2022, 6, 2)));
        assert!(cal.is_holiday(d(2022, 6, 3)));
        assert!(cal.is_business_day(d(2022, 5, 30)));

        assert!(cal.is_holiday(d(2012, 6, 4)));
        assert!(cal.is_holiday(d(2012, 6, 5)));
        assert!(cal.is_business_day(d(2012, 5, 28)));

        assert!(cal.is_holiday(d(2022, 9, 19)));
        assert!(cal.is_holiday(d(2023, 5, 8)));
        assert!(cal.is_holiday(d(2011, 4, 29)));
    }
}
