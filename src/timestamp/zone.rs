//! Wall-clock rules of the reporting service's zone (Europe/Warsaw).
//!
//! CET (UTC+1) in winter, CEST (UTC+2) from the last Sunday of March 01:00 UTC
//! until the last Sunday of October 01:00 UTC, per the EU summer-time directive.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday,
};

const CET: FixedOffset = match FixedOffset::east_opt(3600) {
    Some(offset) => offset,
    None => panic!("CET offset out of range"),
};
const CEST: FixedOffset = match FixedOffset::east_opt(2 * 3600) {
    Some(offset) => offset,
    None => panic!("CEST offset out of range"),
};
const TRANSITION_HOUR_UTC: u32 = 1;

/// Result of mapping a local wall-clock time onto the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalMapping {
    Single(DateTime<FixedOffset>),
    /// Autumn fold: the hour occurs twice. Earlier instant first.
    Ambiguous(DateTime<FixedOffset>, DateTime<FixedOffset>),
    /// Spring gap: the hour never occurs.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceZone;

impl SourceZone {
    pub fn offset_at(&self, utc: DateTime<Utc>) -> FixedOffset {
        if in_summer_time(utc) { CEST } else { CET }
    }

    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc.with_timezone(&self.offset_at(utc))
    }

    pub fn from_local(&self, local: NaiveDateTime) -> LocalMapping {
        let mut hits = [CEST, CET].into_iter().filter_map(|offset| {
            let shift = Duration::seconds(offset.local_minus_utc() as i64);
            let utc = Utc.from_utc_datetime(&local.checked_sub_signed(shift)?);
            (self.offset_at(utc) == offset).then(|| utc.with_timezone(&offset))
        });

        match (hits.next(), hits.next()) {
            (Some(first), Some(second)) => LocalMapping::Ambiguous(first, second),
            (Some(only), None) => LocalMapping::Single(only),
            _ => LocalMapping::Skipped,
        }
    }
}

fn in_summer_time(utc: DateTime<Utc>) -> bool {
    let year = utc.year();
    match (transition(year, 3), transition(year, 10)) {
        (Some(start), Some(end)) => {
            let naive = utc.naive_utc();
            naive >= start && naive < end
        }
        _ => false,
    }
}

/// Last Sunday of `month` at 01:00 UTC.
fn transition(year: i32, month: u32) -> Option<NaiveDateTime> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let mut day = next_month.pred_opt()?;
    while day.weekday() != Weekday::Sun {
        day = day.pred_opt()?;
    }
    day.and_hms_opt(TRANSITION_HOUR_UTC, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_winter_is_utc_plus_one() {
        let utc = Utc.with_ymd_and_hms(2025, 12, 9, 15, 0, 6).unwrap();
        assert_eq!(SourceZone.offset_at(utc).local_minus_utc(), 3600);
    }

    #[test]
    fn test_summer_is_utc_plus_two() {
        let utc = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(SourceZone.offset_at(utc).local_minus_utc(), 7200);
    }

    #[test]
    fn test_switches_at_one_utc_on_last_sunday() {
        // 2025-03-30 and 2025-10-26 are the last Sundays.
        let before = Utc.with_ymd_and_hms(2025, 3, 30, 0, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 3, 30, 1, 0, 0).unwrap();
        assert_eq!(SourceZone.offset_at(before).local_minus_utc(), 3600);
        assert_eq!(SourceZone.offset_at(after).local_minus_utc(), 7200);

        let before = Utc.with_ymd_and_hms(2025, 10, 26, 0, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 10, 26, 1, 0, 0).unwrap();
        assert_eq!(SourceZone.offset_at(before).local_minus_utc(), 7200);
        assert_eq!(SourceZone.offset_at(after).local_minus_utc(), 3600);
    }

    #[test]
    fn test_spring_gap_is_skipped() {
        assert_eq!(SourceZone.from_local(local(2025, 3, 30, 2, 30)), LocalMapping::Skipped);
    }

    #[test]
    fn test_autumn_fold_is_ambiguous_with_earlier_first() {
        match SourceZone.from_local(local(2025, 10, 26, 2, 30)) {
            LocalMapping::Ambiguous(first, second) => {
                assert!(first < second);
                assert_eq!(first.offset().local_minus_utc(), 7200);
                assert_eq!(second.offset().local_minus_utc(), 3600);
            }
            other => panic!("expected fold, got {:?}", other),
        }
    }

    #[test]
    fn test_ordinary_time_maps_once() {
        let mapped = SourceZone.from_local(local(2025, 12, 9, 16, 0));
        let LocalMapping::Single(dt) = mapped else {
            panic!("expected single mapping, got {:?}", mapped);
        };
        assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2025, 12, 9, 15, 0, 0).unwrap());
    }
}
