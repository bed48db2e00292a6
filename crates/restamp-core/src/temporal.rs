//! Parses the overlay text, applies the calendar shift, and re-serializes
//! in the original layout.
//!
//! Parsing is a strict per-layout regex, not a general-purpose date parser;
//! ambiguous inputs are rejected rather than guessed at. The month step of
//! the shift is applied first, day overflow rolls against the landing
//! month's actual length, and the day/hour steps then run with full
//! calendar rollover.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use restamp_config::overlay::{LayoutKind, TimeShift};

use crate::error::TemporalError;

/// Two-digit overlay years are taken to mean this century.
const CENTURY_BASE: i32 = 2000;

static DMY_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{2}) (\d{1,2}):(\d{2}) (AM|PM) GMT ([+-]\d{2}:\d{2})$")
        .unwrap()
});
static ISO_STRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2})$").unwrap());

/// A parsed overlay value plus the textual layout needed to re-serialize it.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalValue {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// 24-hour clock internally, whatever the layout shows.
    pub hour: u32,
    pub minute: u32,
    pub second: Option<u32>,
    pub layout: LayoutKind,
    /// UTC offset text copied verbatim from the input, never recomputed.
    pub offset_text: Option<String>,
}

/// Shift the overlay text forward and re-serialize it in the same layout.
///
/// Returns `None` when the text does not match the layout; the caller is
/// responsible for substituting its own placeholder in that case.
pub fn adjust(text: &str, layout: LayoutKind, shift: TimeShift) -> Option<String> {
    let value = parse(text, layout).ok()?;
    let shifted = value.shift(shift).ok()?;
    Some(shifted.serialize())
}

pub fn parse(text: &str, layout: LayoutKind) -> Result<TemporalValue, TemporalError> {
    match layout {
        LayoutKind::DmyGmt => parse_dmy(text),
        LayoutKind::Iso => parse_iso(text),
    }
}

fn parse_dmy(text: &str) -> Result<TemporalValue, TemporalError> {
    let layout = LayoutKind::DmyGmt;
    let caps = DMY_STRICT
        .captures(text)
        .ok_or(TemporalError::NoMatch(layout))?;
    let num = |idx: usize| -> Result<u32, TemporalError> {
        caps[idx].parse().map_err(|_| TemporalError::NoMatch(layout))
    };

    let day = check("day", num(1)?, 1..=31)?;
    let month = check("month", num(2)?, 1..=12)?;
    let year = CENTURY_BASE + num(3)? as i32;
    let hour12 = check("hour", num(4)?, 1..=12)?;
    let minute = check("minute", num(5)?, 0..=59)?;
    let hour = match (&caps[6], hour12) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        (_, h) => h + 12,
    };

    Ok(TemporalValue {
        day,
        month,
        year,
        hour,
        minute,
        second: None,
        layout,
        offset_text: Some(caps[7].to_string()),
    })
}

fn parse_iso(text: &str) -> Result<TemporalValue, TemporalError> {
    let layout = LayoutKind::Iso;
    let caps = ISO_STRICT
        .captures(text)
        .ok_or(TemporalError::NoMatch(layout))?;
    let num = |idx: usize| -> Result<u32, TemporalError> {
        caps[idx].parse().map_err(|_| TemporalError::NoMatch(layout))
    };

    Ok(TemporalValue {
        year: num(1)? as i32,
        month: check("month", num(2)?, 1..=12)?,
        day: check("day", num(3)?, 1..=31)?,
        hour: check("hour", num(4)?, 0..=23)?,
        minute: check("minute", num(5)?, 0..=59)?,
        second: Some(check("second", num(6)?, 0..=59)?),
        layout,
        offset_text: None,
    })
}

fn check(
    field: &'static str,
    value: u32,
    range: std::ops::RangeInclusive<u32>,
) -> Result<u32, TemporalError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(TemporalError::InvalidComponent { field, value })
    }
}

impl TemporalValue {
    /// Apply the shift: months first, then days, then hours.
    ///
    /// The order matters near month boundaries and is fixed: day overflow
    /// after the month step rolls into the following month measured against
    /// the landing month's actual length, and only then do the day and hour
    /// steps run.
    pub fn shift(&self, shift: TimeShift) -> Result<TemporalValue, TemporalError> {
        let months_total = self.month as i32 - 1 + shift.months as i32;
        let mut year = self.year + months_total.div_euclid(12);
        let mut month = (months_total.rem_euclid(12) + 1) as u32;
        let mut day = self.day;

        let len = days_in_month(month, year);
        if day > len {
            day -= len;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(TemporalError::OutOfRange)?;
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, self.second.unwrap_or(0))
            .ok_or(TemporalError::OutOfRange)?;
        let shifted = NaiveDateTime::new(date, time)
            .checked_add_signed(Duration::days(shift.days))
            .and_then(|dt| dt.checked_add_signed(Duration::hours(shift.hours)))
            .ok_or(TemporalError::OutOfRange)?;

        Ok(TemporalValue {
            day: shifted.day(),
            month: shifted.month(),
            year: shifted.year(),
            hour: shifted.hour(),
            minute: shifted.minute(),
            second: self.second.map(|_| shifted.second()),
            layout: self.layout,
            offset_text: self.offset_text.clone(),
        })
    }

    /// Re-serialize in the original layout.
    ///
    /// DMY keeps the 2-digit year, zero-padded day/month, 12-hour clock with
    /// the leading zero suppressed, and the input's UTC offset verbatim.
    pub fn serialize(&self) -> String {
        match self.layout {
            LayoutKind::DmyGmt => {
                let (hour12, meridiem) = to_hour12(self.hour);
                let offset = self.offset_text.as_deref().unwrap_or("+00:00");
                format!(
                    "{:02}/{:02}/{:02} {}:{:02} {} GMT {}",
                    self.day,
                    self.month,
                    self.year.rem_euclid(100),
                    hour12,
                    self.minute,
                    meridiem,
                    offset
                )
            }
            LayoutKind::Iso => format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                self.year,
                self.month,
                self.day,
                self.hour,
                self.minute,
                self.second.unwrap_or(0)
            ),
        }
    }
}

fn to_hour12(hour: u32) -> (u32, &'static str) {
    match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    }
}

/// Gregorian month length: leap years are divisible by 4, except centuries
/// unless divisible by 400.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
    }
}
