use crate::domain::model::ExpiryDate;
use crate::utils::error::{ExpiryError, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

/// chrono pattern for the marker's `dd-mm-yyyy` argument.
pub const EXPIRY_DATE_FORMAT: &str = "%d-%m-%Y";

/// How dates are rendered inside diagnostics, zone given as its UTC offset.
pub const RENDERED_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %:z %Y";

// Wall-clock times skipped by a DST jump have no offset.
const RENDERED_NAIVE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

// chrono accepts unpadded fields, so the shape is checked first.
static EXPIRY_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("valid date pattern"));

impl ExpiryDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Local midnight at the start of the expiry day.
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }
}

pub fn parse_expiry_date(text: &str) -> Result<ExpiryDate> {
    if !EXPIRY_DATE_SHAPE.is_match(text) {
        return Err(ExpiryError::DateParse {
            text: text.to_string(),
            reason: "expected dd-mm-yyyy".to_string(),
        });
    }

    NaiveDate::parse_from_str(text, EXPIRY_DATE_FORMAT)
        .map(ExpiryDate)
        .map_err(|e| ExpiryError::DateParse {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

/// True once `now` is strictly past midnight of the expiry day, so a marker
/// dated today has already expired.
pub fn is_expired(expiry: ExpiryDate, now: NaiveDateTime) -> bool {
    now > expiry.start_of_day()
}

/// Renders a local wall-clock instant with the local zone offset.
pub fn render_date(instant: NaiveDateTime) -> String {
    render_date_in(instant, &Local)
}

pub fn render_date_in<Tz: TimeZone>(instant: NaiveDateTime, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.from_local_datetime(&instant).earliest() {
        Some(zoned) => zoned.format(RENDERED_DATE_FORMAT).to_string(),
        None => instant.format(RENDERED_NAIVE_FORMAT).to_string(),
    }
}
