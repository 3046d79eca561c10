// src/utils/date.rs

//! Date helpers for the compact encodings used by the school website.
//!
//! The event pages write dates relative to the academic year, which runs
//! from August to July. Every helper has an `_at` variant taking "today"
//! explicitly; the plain variants use the local clock.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{GvpError, Result};

/// Months 1..=7 of a listing belong to the second calendar year of the
/// academic year.
const ROLLOVER_MONTHS: std::ops::RangeInclusive<u32> = 1..=7;

/// Offset between a preliminary month index and its calendar month.
const ACADEMIC_MONTH_OFFSET: u32 = 7;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a listing date such as `"Po 5.9."` or `"Út 3.2.2026"`.
///
/// Returns `None` for blank input. The year is inferred, see
/// [`parse_human_date_at`].
pub fn parse_human_date(text: &str) -> Result<Option<NaiveDate>> {
    parse_human_date_at(text, today())
}

/// Parse a listing date relative to `today`.
///
/// Only day and month are read; a weekday token and any year field are
/// ignored. The year is `today`'s year, plus one when the month is in
/// January..=July.
pub fn parse_human_date_at(text: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    let Some(token) = text.split_whitespace().last() else {
        return Ok(None);
    };

    let mut fields = token.split('.');
    let day = date_field(fields.next(), text)?;
    let month = date_field(fields.next(), text)?;

    let mut year = today.year();
    if ROLLOVER_MONTHS.contains(&month) {
        year += 1;
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| GvpError::decoding("human date", format!("invalid date '{text}'")))
}

fn date_field(field: Option<&str>, text: &str) -> Result<u32> {
    field
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| GvpError::decoding("human date", format!("malformed date '{text}'")))
}

/// Resolve a preliminary month index (1 = August) to the first day of
/// that month.
pub fn parse_preliminary_month(index: u32) -> Result<NaiveDate> {
    parse_preliminary_month_at(index, today())
}

/// Resolve a preliminary month index relative to `today`.
pub fn parse_preliminary_month_at(index: u32, today: NaiveDate) -> Result<NaiveDate> {
    if !(1..=12).contains(&index) {
        return Err(GvpError::decoding(
            "preliminary month",
            format!("month index {index} out of range 1..=12"),
        ));
    }

    let mut month = index + ACADEMIC_MONTH_OFFSET;
    let mut year = today.year();
    if month > 12 {
        month -= 12;
        year += 1;
    }

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        GvpError::decoding("preliminary month", format!("invalid month {month}/{year}"))
    })
}

/// Parse an API timestamp.
///
/// Accepts ISO 8601 with either `T` or a space between date and time,
/// optional fractional seconds, an optional UTC offset (dropped, the wall
/// time is kept), or a bare date meaning midnight.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| {
            GvpError::decoding("timestamp", format!("not an ISO 8601 timestamp: '{text}'"))
        })
}

/// Parse a date typed into an edit form (`2025-09-05` or `5.9.2025`).
pub fn parse_form_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d.%m.%Y"))
        .map_err(|_| GvpError::decoding("form date", format!("unrecognized date '{text}'")))
}

/// Parse a time typed into an edit form. Blank means midnight.
pub fn parse_form_time(text: &str) -> Result<NaiveTime> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(NaiveTime::MIN);
    }
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| GvpError::decoding("form time", format!("unrecognized time '{text}'")))
}
