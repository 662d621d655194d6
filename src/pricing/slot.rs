use chrono::{DateTime, Utc};
use serde::Serialize;

/// Price published when no trustworthy slot covers the current instant.
///
/// 1000 EUR/MWh converts to 100 ct/kWh, the upper bound consumers accept.
pub const FALLBACK_PRICE_EUR_MWH: f64 = 1000.0;

/// Euro/MWh to ct/kWh
pub const DISPLAY_DIVISOR: f64 = 10.0;

/// One price observation and the instant it starts applying
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    /// EUR/MWh
    pub price: f64,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, price: f64) -> Self {
        Self { start, price }
    }

    /// Sentinel slot starting at `now`
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            price: FALLBACK_PRICE_EUR_MWH,
        }
    }

    /// Price in ct/kWh
    pub fn display_price(&self) -> f64 {
        to_display_price(self.price)
    }
}

/// Convert EUR/MWh to ct/kWh
pub fn to_display_price(price_eur_mwh: f64) -> f64 {
    price_eur_mwh / DISPLAY_DIVISOR
}

/// Interval length one point of a period stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    QuarterHour,
    HalfHour,
    Hour,
}

impl Resolution {
    /// Map an ISO-8601 duration tag; anything unknown is hourly
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("PT15M") => Self::QuarterHour,
            Some("PT30M") => Self::HalfHour,
            _ => Self::Hour,
        }
    }

    pub fn minutes(self) -> i64 {
        match self {
            Self::QuarterHour => 15,
            Self::HalfHour => 30,
            Self::Hour => 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_tags() {
        assert_eq!(Resolution::from_tag(Some("PT15M")).minutes(), 15);
        assert_eq!(Resolution::from_tag(Some("PT30M")).minutes(), 30);
        assert_eq!(Resolution::from_tag(Some("PT60M")).minutes(), 60);
        assert_eq!(Resolution::from_tag(Some("P1D")).minutes(), 60);
        assert_eq!(Resolution::from_tag(None).minutes(), 60);
    }

    #[test]
    fn fallback_displays_as_hundred() {
        let slot = TimeSlot::fallback(Utc::now());
        assert_eq!(slot.display_price(), 100.0);
    }
}
