use chrono::{DateTime, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Default timezone for calendar-day logic.
/// Used when settings do not name one.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to a calendar date in the given timezone.
///
/// This is the single source of truth for deriving a "business date" from a
/// timestamp: the same-day snapshot rule and the chart bucket anchors both go
/// through it.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Returns the UTC instant of local midnight for `date` in `tz`.
///
/// On a DST gap the earliest valid local time is used; if the local midnight
/// does not exist at all the date is interpreted as UTC midnight.
pub fn local_midnight_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => naive.and_utc(),
    }
}

/// Last representable millisecond of `year` in UTC (Dec 31, 23:59:59.999).
pub fn end_of_year_utc(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 12, 31)?
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.and_utc())
}

/// Subtracts whole calendar months, clamping the day to the target month.
///
/// Saturates at the minimum representable instant instead of failing.
pub fn months_before(instant: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    instant
        .checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
