//! Shared latest-price cell and the retained slot table

use crate::pricing::resolve::SlotOrigin;
use crate::pricing::slot::TimeSlot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Everything consumers get to see about the latest publication
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    /// ct/kWh
    pub price_ct_kwh: f64,
    /// EUR/MWh as published
    pub price_eur_mwh: f64,
    pub slot_start: DateTime<Utc>,
    pub origin: SlotOrigin,
    pub updated_at: DateTime<Utc>,
}

/// Latest known price, shared between the monitor and any number of readers.
///
/// Starts out unknown. Every write replaces the whole snapshot, so readers
/// never observe a partial update.
#[derive(Debug, Clone)]
pub struct PriceCell {
    tx: Arc<watch::Sender<Option<PriceSnapshot>>>,
}

impl PriceCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Overwrite the current value
    pub fn set(&self, snapshot: PriceSnapshot) {
        self.tx.send_replace(Some(snapshot));
    }

    /// Latest display price in ct/kWh, `None` before the first cycle
    pub fn latest(&self) -> Option<f64> {
        self.tx.borrow().as_ref().map(|s| s.price_ct_kwh)
    }

    pub fn snapshot(&self) -> Option<PriceSnapshot> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every publication
    pub fn subscribe(&self) -> watch::Receiver<Option<PriceSnapshot>> {
        self.tx.subscribe()
    }
}

impl Default for PriceCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot sequence produced by the most recent cycle
#[derive(Debug, Clone)]
pub struct SlotTable {
    tx: Arc<watch::Sender<Arc<[TimeSlot]>>>,
}

impl SlotTable {
    pub fn new() -> Self {
        let empty: Arc<[TimeSlot]> = Arc::from(Vec::new());
        let (tx, _rx) = watch::channel(empty);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the whole table
    pub fn replace(&self, slots: Vec<TimeSlot>) {
        self.tx.send_replace(Arc::from(slots));
    }

    pub fn slots(&self) -> Arc<[TimeSlot]> {
        self.tx.borrow().clone()
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(price: f64) -> PriceSnapshot {
        let now = Utc::now();
        PriceSnapshot {
            price_ct_kwh: price / 10.0,
            price_eur_mwh: price,
            slot_start: now,
            origin: SlotOrigin::Live,
            updated_at: now,
        }
    }

    #[test]
    fn unknown_until_first_write() {
        let cell = PriceCell::new();
        assert_eq!(cell.latest(), None);
        cell.set(snap(60.0));
        assert_eq!(cell.latest(), Some(6.0));
    }

    #[test]
    fn slot_table_is_replaced_wholesale() {
        let table = SlotTable::new();
        assert!(table.slots().is_empty());
        let now = Utc::now();
        table.replace(vec![TimeSlot::new(now, 1.0), TimeSlot::new(now, 2.0)]);
        assert_eq!(table.slots().len(), 2);
        table.replace(Vec::new());
        assert!(table.slots().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state_and_subscribers_see_updates() {
        let cell = PriceCell::new();
        let reader = cell.clone();
        let mut rx = cell.subscribe();
        cell.set(snap(85.0));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|s| s.price_eur_mwh), Some(85.0));
        assert_eq!(reader.latest(), Some(8.5));
    }
}
