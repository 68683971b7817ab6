//! Japan calendar (TONA).

use chrono::Weekday;

use super::rules::nth_weekday_of_month;
use super::Calendar;
use crate::types::Date;

/// Tokyo banking calendar.
///
/// National holidays with the substitute (furikae kyujitsu) and sandwiched
/// (kokumin no kyujitsu) rules, plus the bank closures on Jan 2, Jan 3 and
/// Dec 31.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapanCalendar;

impl JapanCalendar {
    /// All holidays falling in `year`, unordered.
    #[must_use]
    pub fn holidays(year: i32) -> Vec<Date> {
        let mut holidays = national_holidays(year);

        // A weekday squeezed between two national holidays is itself a holiday.
        let sandwiched: Vec<Date> = holidays
            .iter()
            .map(|h| h.add_days(1))
            .filter(|d| {
                d.weekday() != Weekday::Sun
                    && !holidays.contains(d)
                    && holidays.contains(&d.add_days(1))
            })
            .collect();
        holidays.extend(sandwiched);

        // A holiday on Sunday moves to the next day that is not a holiday.
        let mut substitutes = Vec::new();
        for holiday in holidays.iter().filter(|h| h.weekday() == Weekday::Sun) {
            let mut substitute = holiday.add_days(1);
            while holidays.contains(&substitute) || substitutes.contains(&substitute) {
                substitute = substitute.add_days(1);
            }
            substitutes.push(substitute);
        }
        holidays.extend(substitutes);

        holidays.extend(
            [(1, 2), (1, 3), (12, 31)]
                .into_iter()
                .filter_map(|(m, d)| Date::from_ymd(year, m, d).ok()),
        );

        holidays
    }
}

fn national_holidays(year: i32) -> Vec<Date> {
    let mut days: Vec<(u32, u32)> = vec![
        (1, 1),
        // National Foundation Day
        (2, 11),
        (3, vernal_equinox(year)),
        // Showa Day
        (4, 29),
        // Golden Week
        (5, 3),
        (5, 4),
        (5, 5),
        (9, autumnal_equinox(year)),
        // Culture Day
        (11, 3),
        // Labour Thanksgiving
        (11, 23),
    ];

    // Emperor's Birthday
    if year >= 2020 {
        days.push((2, 23));
    } else if (1989..=2018).contains(&year) {
        days.push((12, 23));
    }

    // Marine Day, Mountain Day and Sports Day moved for the Tokyo Olympics
    match year {
        2020 => days.extend([(7, 23), (7, 24), (8, 10)]),
        2021 => days.extend([(7, 22), (7, 23), (8, 8)]),
        _ => {
            if year >= 2016 {
                days.push((8, 11));
            }
        }
    }

    if year == 2019 {
        // Imperial transition and enthronement ceremony
        days.extend([(4, 30), (5, 1), (5, 2), (10, 22)]);
    }

    let mut holidays: Vec<Date> = days
        .into_iter()
        .filter_map(|(m, d)| Date::from_ymd(year, m, d).ok())
        .collect();

    // Happy Monday holidays
    let mut mondays = vec![
        // Coming of Age Day
        (1, 2),
        // Respect for the Aged Day
        (9, 3),
    ];
    if year != 2020 && year != 2021 {
        // Marine Day and Sports Day
        mondays.extend([(7, 3), (10, 2)]);
    }
    holidays.extend(
        mondays
            .into_iter()
            .filter_map(|(m, n)| nth_weekday_of_month(year, m, Weekday::Mon, n)),
    );

    holidays
}

fn vernal_equinox(year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (20.8431 + 0.242194 * y - (y / 4.0).floor()) as u32
}

fn autumnal_equinox(year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (23.2488 + 0.242194 * y - (y / 4.0).floor()) as u32
}

impl Calendar for JapanCalendar {
    fn name(&self) -> &'static str {
        "Japan"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::holidays(date.year()).contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_japan_holidays_2025() {
        let cal = JapanCalendar;
        for date in [
            d(2025, 1, 1),
            d(2025, 1, 2),
            d(2025, 1, 3),
            d(2025, 1, 13),  // Coming of Age
            d(2025, 2, 11),
            d(2025, 3, 20),  // Vernal Equinox
            d(2025, 4, 29),
            d(2025, 7, 21),  // Marine Day
            d(2025, 8, 11),  // Mountain Day
            d(2025, 9, 15),  // Respect for the Aged
            d(2025, 9, 23),  // Autumnal Equinox
            d(2025, 10, 13), // Sports Day
            d(2025, 11, 3),
            d(2025, 12, 31),
        ] {
            assert!(cal.is_holiday(date), "{date} should be a holiday");
        }
        assert!(cal.is_business_day(d(2025, 1, 14)));
    }

    #[test]
    fn test_japan_substitute_holidays() {
        let cal = JapanCalendar;
        // Emperor's Birthday 2025 on Sunday
        assert!(cal.is_holiday(d(2025, 2, 24)));
        // Greenery Day 2025 on Sunday; Children's Day already Monday so Tuesday
        assert!(cal.is_holiday(d(2025, 5, 6)));
        // Labour Thanksgiving 2025 on Sunday
        assert!(cal.is_holiday(d(2025, 11, 24)));
        assert!(cal.is_business_day(d(2025, 11, 25)));
    }

    #[test]
    fn test_japan_sandwiched_holiday() {
        let cal = JapanCalendar;
        // Between Respect for the Aged (Mon 21) and Autumnal Equinox (Wed 23)
        assert!(cal.is_holiday(d(2026, 9, 22)));
    }

    #[test]
    fn test_japan_olympic_moves() {
        let cal = JapanCalendar;
        assert!(cal.is_holiday(d(2021, 7, 22)));
        assert!(cal.is_holiday(d(2021, 7, 23)));
        // Mountain Day 2021 on Sunday, substitute Monday
        assert!(cal.is_holiday(d(2021, 8, 9)));
        // Regular Marine Day Monday was a business day in 2021
        assert!(cal.is_business_day(d(2021, 7, 19)));
    }
}
