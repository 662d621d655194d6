//! Flatten a publication document into one time-sorted slot sequence

use crate::entsoe::{Period, PublicationDocument};
use crate::pricing::slot::{Resolution, TimeSlot};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::{debug, warn};

/// Every point of every period of every series, sorted by start.
///
/// Bad data never fails: a missing position counts as 1, a missing or
/// unparsable price as 0, and a period without a usable start is skipped.
/// Duplicate starts from overlapping series are kept.
pub fn normalize(document: &PublicationDocument) -> Vec<TimeSlot> {
    let mut slots: Vec<TimeSlot> = Vec::new();

    for series in &document.time_series {
        for period in &series.periods {
            append_period(period, &mut slots);
        }
    }

    // Stable sort keeps document order among equal starts
    slots.sort_by_key(|s| s.start);

    if tracing::enabled!(tracing::Level::DEBUG) && !slots.is_empty() {
        debug!(
            "--- ENTSO-E timeslots ({}) ---\n{}",
            slots.len(),
            format_slot_table(&slots)
        );
    }
    slots
}

fn append_period(period: &Period, out: &mut Vec<TimeSlot>) {
    let Some(raw_start) = period
        .time_interval
        .as_ref()
        .and_then(|ti| ti.start.as_deref())
    else {
        warn!("Period missing timeInterval.start");
        return;
    };
    let Some(period_start) = parse_instant(raw_start) else {
        warn!("Period has unparsable timeInterval.start '{}'", raw_start);
        return;
    };

    let minutes = Resolution::from_tag(period.resolution.as_deref()).minutes();
    for point in &period.points {
        let position = parse_position(point.position.as_deref());
        let Some(start) = (position - 1)
            .checked_mul(minutes)
            .and_then(Duration::try_minutes)
            .and_then(|offset| period_start.checked_add_signed(offset))
        else {
            warn!("Point position {} out of range, skipped", position);
            continue;
        };
        out.push(TimeSlot::new(start, parse_price(point.price_amount.as_deref())));
    }
}

/// 1-based index read from the leading integer (`"3.0"` and `"3abc"` are 3);
/// absent or garbage is 1
pub fn parse_position(raw: Option<&str>) -> i64 {
    raw.and_then(leading_integer)
        .filter(|p| *p > i64::MIN)
        .unwrap_or(1)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse::<i64>().ok()
}

/// Decimal price; absent, garbage or non-finite is 0
pub fn parse_price(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

/// Accepts RFC 3339 and the minute-precision `2025-01-05T23:00Z` form the
/// platform emits.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|n| n.and_utc())
}

/// CSV-like `DateTime(UTC),Price (ct/kWh)` listing
pub fn format_slot_table(slots: &[TimeSlot]) -> String {
    let mut out = String::from("DateTime(UTC),Price (ct/kWh)\n");
    for slot in slots {
        out.push_str(&format!(
            "{},{}\n",
            slot.start.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            slot.display_price()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn instants_with_and_without_seconds() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 5, 23, 0, 0).unwrap();
        assert_eq!(parse_instant("2025-01-05T23:00Z"), Some(expected));
        assert_eq!(parse_instant("2025-01-05T23:00:00Z"), Some(expected));
        assert_eq!(parse_instant("2025-01-06T00:00+01:00"), Some(expected));
        assert_eq!(parse_instant("yesterday"), None);
    }

    #[test]
    fn lenient_leaf_parsing() {
        assert_eq!(parse_position(None), 1);
        assert_eq!(parse_position(Some(" 7 ")), 7);
        assert_eq!(parse_position(Some("x")), 1);
        assert_eq!(parse_position(Some("3.0")), 3);
        assert_eq!(parse_position(Some("3abc")), 3);
        assert_eq!(parse_position(Some("-")), 1);
        assert_eq!(parse_position(Some("+4")), 4);
        assert_eq!(parse_price(Some("42.5")), 42.5);
        assert_eq!(parse_price(Some("-3.1")), -3.1);
        assert_eq!(parse_price(Some("abc")), 0.0);
        assert_eq!(parse_price(Some("NaN")), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }

    #[test]
    fn slot_table_lists_display_prices() {
        let start = Utc.with_ymd_and_hms(2025, 1, 7, 3, 0, 0).unwrap();
        let table = format_slot_table(&[TimeSlot::new(start, 85.0)]);
        assert_eq!(
            table,
            "DateTime(UTC),Price (ct/kWh)\n2025-01-07T03:00:00.000Z,8.5\n"
        );
    }
}
