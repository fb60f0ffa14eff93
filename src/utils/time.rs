use std::fmt::Debug;

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};

use crate::errors::{Error, Result};

/// Source of creation timestamps for stored records.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed-width UTC timestamp, so string order is time order.
pub fn to_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn time_now(clock: &dyn Clock) -> String {
    to_timestamp(clock.now())
}

/// Half-open `[start, end)` timestamp range covering one calendar day.
pub fn day_bounds(date: NaiveDate) -> (String, String) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .map(|next| next.and_time(chrono::NaiveTime::MIN).and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (to_timestamp(start), to_timestamp(end))
}

pub fn parse_date(val: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(val.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(val.into()))
}
