//! Codec for the reporting service's `YYYY-MM-DD-HH-MM-SS` timestamps.
//!
//! The string is the service's local wall-clock time (see [`zone`]), never the
//! viewer's. Nothing outside this module should look inside the raw string.

pub mod zone;

use crate::error::{Result, ViewError};
use crate::i18n::Locale;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use self::zone::{LocalMapping, SourceZone};

const FIELD_COUNT: usize = 6;
const CANONICAL_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// (name, min, max) per component, in wire order.
const FIELDS: [(&str, u32, u32); FIELD_COUNT] = [
    ("year", 0, 9999),
    ("month", 1, 12),
    ("day", 1, 31),
    ("hour", 0, 23),
    ("minute", 0, 59),
    ("second", 0, 59),
];

/// Parse a raw report timestamp into an instant.
///
/// Wall-clock times that fall in the autumn fold resolve to the earlier
/// (summer-time) instant; times inside the spring gap are rejected.
pub fn parse(raw: &str) -> Result<DateTime<Utc>> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != FIELD_COUNT {
        return Err(ViewError::malformed(
            raw,
            format!("expected {} components, got {}", FIELD_COUNT, parts.len()),
        ));
    }

    let mut values = [0u32; FIELD_COUNT];
    for ((part, (name, min, max)), slot) in parts.iter().zip(FIELDS).zip(values.iter_mut()) {
        let value = parse_component(raw, part, name)?;
        if !(min..=max).contains(&value) {
            return Err(ViewError::malformed(
                raw,
                format!("{} {} outside {}..={}", name, value, min, max),
            ));
        }
        *slot = value;
    }

    let [year, month, day, hour, minute, second] = values;
    let year = year as i32;

    let local = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ViewError::malformed(raw, "no such calendar date"))?
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| ViewError::malformed(raw, "no such time of day"))?;

    match SourceZone.from_local(local) {
        LocalMapping::Single(dt) | LocalMapping::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalMapping::Skipped => Err(ViewError::malformed(
            raw,
            "falls inside the daylight-saving gap",
        )),
    }
}

fn parse_component(raw: &str, part: &str, name: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ViewError::malformed(raw, format!("{} {:?} is not a number", name, part)));
    }
    part.parse()
        .map_err(|_| ViewError::malformed(raw, format!("{} {:?} out of range", name, part)))
}

/// Render an instant back into the service's own wire format.
pub fn to_raw(instant: DateTime<Utc>) -> String {
    SourceZone.to_local(instant).format(CANONICAL_FORMAT).to_string()
}

/// Date and time (no seconds) in the source zone, laid out per locale.
pub fn format(instant: DateTime<Utc>, locale: Locale) -> String {
    let local = SourceZone.to_local(instant);
    let pattern = match locale {
        Locale::En => "%Y-%m-%d %H:%M",
        Locale::Pl => "%d.%m.%Y %H:%M",
    };
    local.format(pattern).to_string()
}

/// Display string for a report's `generated_at`; the raw string on failure.
pub fn display_generated_at(raw: &str, locale: Locale) -> String {
    match parse(raw) {
        Ok(instant) => format(instant, locale),
        Err(e) => {
            warn!("Showing generated_at verbatim: {}", e);
            raw.to_string()
        }
    }
}
