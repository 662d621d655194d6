use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Half-open `[start, end)` request window in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RequestWindow {
    /// Window starting at the UTC midnight of `now` and spanning `hours`
    pub fn covering(now: DateTime<Utc>, hours: u32) -> Self {
        let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        Self {
            start,
            end: start + Duration::hours(i64::from(hours)),
        }
    }

    /// `periodStart` query value
    pub fn period_start(&self) -> String {
        format_entsoe_timestamp(self.start)
    }

    /// `periodEnd` query value
    pub fn period_end(&self) -> String {
        format_entsoe_timestamp(self.end)
    }
}

/// Format an instant as the compact `YYYYMMDDHHMM` form the API expects
pub fn format_entsoe_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d%H%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_starts_at_utc_midnight_and_spans_48h() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 17, 0, 23).unwrap();
        let w = RequestWindow::covering(now, 48);
        assert_eq!(w.period_start(), "202501060000");
        assert_eq!(w.period_end(), "202501080000");
    }

    #[test]
    fn formats_minutes_without_separators() {
        let t = Utc.with_ymd_and_hms(2025, 1, 6, 17, 5, 59).unwrap();
        assert_eq!(format_entsoe_timestamp(t), "202501061705");
    }
}
