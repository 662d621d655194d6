//! Unit conversion, hour-based change detection and publication

use crate::logging::{StructuredLogger, get_logger};
use crate::pricing::cell::{PriceCell, PriceSnapshot};
use crate::pricing::resolve::ResolvedSlot;
use crate::pricing::slot::TimeSlot;
use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;

/// Outcome of publishing one resolved slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Publication {
    /// ct/kWh
    pub display_price: f64,
    /// Local hour of the slot start
    pub hour: u32,
    /// Whether `hour` differs from the previously published hour
    pub hour_changed: bool,
}

/// Pure part of publication: convert and compare the local hour
pub fn publish(slot: &TimeSlot, previous_hour: Option<u32>, tz: &Tz) -> Publication {
    let hour = slot.start.with_timezone(tz).hour();
    Publication {
        display_price: slot.display_price(),
        hour,
        hour_changed: previous_hour != Some(hour),
    }
}

/// `2025-01-06 02:00 - 03:00` in local time
pub fn describe_slot(slot: &TimeSlot, tz: &Tz) -> String {
    let local = slot.start.with_timezone(tz);
    let end = local + Duration::hours(1);
    format!(
        "{} {} - {}",
        local.format("%Y-%m-%d"),
        local.format("%H:%M"),
        end.format("%H:%M")
    )
}

/// Stateful publisher owning the change-detection hour and the price cell
#[derive(Debug)]
pub struct Publisher {
    tz: Tz,
    last_slot_hour: Option<u32>,
    cell: PriceCell,
    logger: StructuredLogger,
}

impl Publisher {
    pub fn new(tz: Tz, cell: PriceCell) -> Self {
        Self {
            tz,
            last_slot_hour: None,
            cell,
            logger: get_logger("publisher"),
        }
    }

    pub fn cell(&self) -> &PriceCell {
        &self.cell
    }

    pub fn last_slot_hour(&self) -> Option<u32> {
        self.last_slot_hour
    }

    /// Convert, log when the hour moved, and always overwrite the cell
    pub fn publish(&mut self, resolved: &ResolvedSlot, now: DateTime<Utc>) -> Publication {
        let publication = publish(&resolved.slot, self.last_slot_hour, &self.tz);

        if publication.hour_changed {
            self.last_slot_hour = Some(publication.hour);
            self.logger.info(&format!(
                "Current time slot (local time) is {}, EPEX price (Euro/MWh)={}",
                describe_slot(&resolved.slot, &self.tz),
                resolved.slot.price
            ));
            self.logger.info(&format!(
                "Published current EPEX energy price (ct/kWh): {}",
                publication.display_price
            ));
        } else {
            self.logger.debug(&format!(
                "Still hour {}; no new log.",
                publication.hour
            ));
        }

        self.cell.set(PriceSnapshot {
            price_ct_kwh: publication.display_price,
            price_eur_mwh: resolved.slot.price,
            slot_start: resolved.slot.start,
            origin: resolved.origin.clone(),
            updated_at: now,
        });
        publication
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn slot(h: u32, m: u32, price: f64) -> TimeSlot {
        TimeSlot::new(Utc.with_ymd_and_hms(2025, 1, 6, h, m, 0).unwrap(), price)
    }

    #[test]
    fn converts_and_detects_hour_change() {
        let tz = chrono_tz::Europe::Amsterdam;
        let p = publish(&slot(1, 0, 60.0), None, &tz);
        assert_eq!(p.display_price, 6.0);
        // UTC+1 in January
        assert_eq!(p.hour, 2);
        assert!(p.hour_changed);

        let again = publish(&slot(1, 45, 99.0), Some(p.hour), &tz);
        assert!(!again.hour_changed);
    }

    #[test]
    fn describes_local_range() {
        let tz = chrono_tz::Europe::Amsterdam;
        assert_eq!(
            describe_slot(&slot(1, 0, 60.0), &tz),
            "2025-01-06 02:00 - 03:00"
        );
        assert_eq!(
            describe_slot(&slot(22, 45, 60.0), &tz),
            "2025-01-06 23:45 - 00:45"
        );
    }

    #[test]
    fn publisher_overwrites_cell_even_without_hour_change() {
        let cell = PriceCell::new();
        let mut publisher = Publisher::new(chrono_tz::UTC, cell.clone());
        let now = Utc::now();

        publisher.publish(&ResolvedSlot::live(slot(1, 0, 60.0)), now);
        assert_eq!(publisher.last_slot_hour(), Some(1));
        assert_eq!(cell.latest(), Some(6.0));

        let p = publisher.publish(&ResolvedSlot::live(slot(1, 30, 80.0)), now);
        assert!(!p.hour_changed);
        assert_eq!(publisher.last_slot_hour(), Some(1));
        assert_eq!(cell.latest(), Some(8.0));
    }
}
