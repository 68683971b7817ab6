//! Date rules shared by the holiday calendars.

use chrono::Weekday;

use crate::types::Date;

/// Returns true if date is the nth occurrence of weekday in its month.
pub(crate) fn is_nth_weekday(date: Date, weekday: Weekday, n: u32) -> bool {
    date.weekday() == weekday && (date.day() - 1) / 7 + 1 == n
}

/// Returns true if date is the last occurrence of weekday in its month.
pub(crate) fn is_last_weekday(date: Date, weekday: Weekday) -> bool {
    date.weekday() == weekday && date.day() + 7 > date.days_in_month()
}

/// The nth occurrence of a weekday in a month.
pub(crate) fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<Date> {
    let first = Date::from_ymd(year, month, 1).ok()?;
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    let day = 1 + offset + 7 * (n - 1);
    Date::from_ymd(year, month, day).ok()
}

/// (month, day) of Easter Sunday in the Gregorian calendar.
///
/// Anonymous Gregorian algorithm (Meeus/Jones/Butcher).
pub(crate) fn easter_sunday(year: i32) -> (u32, u32) {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    (month as u32, day as u32)
}

/// Offset in days from Easter Sunday, if the date lies within a week of it.
pub(crate) fn days_from_easter(date: Date) -> Option<i64> {
    let (month, day) = easter_sunday(date.year());
    let easter = Date::from_ymd(date.year(), month, day).ok()?;
    let offset = easter.days_between(&date);
    (offset.abs() <= 7).then_some(offset)
}

/// Good Friday.
pub(crate) fn is_good_friday(date: Date) -> bool {
    days_from_easter(date) == Some(-2)
}

/// Easter Monday.
pub(crate) fn is_easter_monday(date: Date) -> bool {
    days_from_easter(date) == Some(1)
}
