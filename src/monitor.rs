//! Periodic fetch -> normalize -> resolve -> publish cycle
//!
//! The monitor owns the only writer of the [`PriceCell`]. A cycle never fails:
//! every problem along the way, from a missing API key to an unusable document,
//! ends in the fallback slot and goes through the same publication path as a
//! real price.

use crate::config::Config;
use crate::entsoe::{EntsoeClient, PriceSource, PublicationDocument, RequestWindow};
use crate::error::Result;
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::pricing::{
    FALLBACK_PRICE_EUR_MWH, FallbackReason, PriceCell, Publication, Publisher, ResolvedSlot,
    SlotTable, TimeSlot, normalize, resolve, to_display_price,
};
use crate::sensor::PriceSensor;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior, interval};

/// Drives price cycles and fans the result out to sensors
pub struct PriceMonitor {
    source: Option<Arc<dyn PriceSource>>,
    window_hours: u32,
    refresh_interval: Duration,
    publisher: Publisher,
    slots: SlotTable,
    sensors: Vec<PriceSensor>,
    logger: StructuredLogger,
}

impl PriceMonitor {
    /// Build a monitor talking to ENTSO-E; without an API key no client is created
    pub fn new(config: &Config, cell: PriceCell) -> Result<Self> {
        let source: Option<Arc<dyn PriceSource>> = if config.entsoe.has_credentials() {
            Some(Arc::new(EntsoeClient::new(&config.entsoe)?))
        } else {
            None
        };
        Self::with_source(config, source, cell)
    }

    /// Build a monitor around any price source
    pub fn with_source(
        config: &Config,
        source: Option<Arc<dyn PriceSource>>,
        cell: PriceCell,
    ) -> Result<Self> {
        let tz = config.tz()?;
        let logger = get_logger_with_context(
            LogContext::new("monitor").with_area(config.entsoe.in_domain.clone()),
        );
        Ok(Self {
            source,
            window_hours: config.entsoe.window_hours,
            refresh_interval: Duration::from_secs(config.refresh_interval_minutes.max(1) * 60),
            publisher: Publisher::new(tz, cell),
            slots: SlotTable::new(),
            sensors: Vec::new(),
            logger,
        })
    }

    /// Register a sensor to be notified after every cycle
    pub fn add_sensor(&mut self, sensor: PriceSensor) {
        self.sensors.push(sensor);
    }

    pub fn cell(&self) -> PriceCell {
        self.publisher.cell().clone()
    }

    /// Handle on the slots of the most recent cycle
    pub fn slot_table(&self) -> SlotTable {
        self.slots.clone()
    }

    pub fn last_slot_hour(&self) -> Option<u32> {
        self.publisher.last_slot_hour()
    }

    /// Run one cycle against the wall clock
    pub async fn run_cycle(&mut self) -> Publication {
        self.run_cycle_at(Utc::now()).await
    }

    /// Run one cycle as if the current instant were `now`
    pub async fn run_cycle_at(&mut self, now: DateTime<Utc>) -> Publication {
        let resolved = self.resolve_current(now).await;

        if let Some(reason) = resolved.fallback_reason() {
            self.logger.warn(&format!(
                "{}. Falling back to price={}.",
                reason,
                to_display_price(FALLBACK_PRICE_EUR_MWH)
            ));
        }

        let publication = self.publisher.publish(&resolved, now);
        self.notify_sensors();
        publication
    }

    async fn resolve_current(&mut self, now: DateTime<Utc>) -> ResolvedSlot {
        let fallback = TimeSlot::fallback(now);

        let Some(source) = self.source.clone() else {
            self.slots.replace(Vec::new());
            return ResolvedSlot::fallback(fallback, FallbackReason::MissingCredentials);
        };

        match self.fetch_slots(source.as_ref(), now).await {
            Ok(slots) => {
                let resolved = resolve(&slots, now, fallback);
                self.slots.replace(slots);
                resolved
            }
            Err(e) => {
                self.logger
                    .warn(&format!("Error fetching or parsing ENTSO-E data: {}", e));
                self.slots.replace(Vec::new());
                ResolvedSlot::fallback(
                    fallback,
                    FallbackReason::FetchFailed {
                        message: e.to_string(),
                    },
                )
            }
        }
    }

    async fn fetch_slots(
        &self,
        source: &dyn PriceSource,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>> {
        let window = RequestWindow::covering(now, self.window_hours);
        self.logger.debug(&format!(
            "Request window {} - {} (UTC)",
            window.start.to_rfc3339(),
            window.end.to_rfc3339()
        ));

        let body = source.fetch_document(&window).await?;
        let document = PublicationDocument::from_xml(&body)?;
        if document.time_series.is_empty() {
            match document.reason_text() {
                Some(reason) => self
                    .logger
                    .warn(&format!("No TimeSeries found in ENTSO-E response ({})", reason)),
                None => self.logger.warn("No TimeSeries found in ENTSO-E response"),
            }
        }
        Ok(normalize(&document))
    }

    fn notify_sensors(&self) {
        let price = self.publisher.cell().latest();
        for sensor in &self.sensors {
            sensor.update_price(price);
        }
    }

    /// Cycle immediately, then once per refresh interval until `shutdown` flips
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut ticker = interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.logger.info(&format!(
            "Polling initialized. Interval: {} minutes.",
            self.refresh_interval.as_secs() / 60
        ));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = std::time::Instant::now();
                    let publication = self.run_cycle().await;
                    self.logger.debug(&format!(
                        "Cycle finished in {} ms, price={} ct/kWh",
                        started.elapsed().as_millis(),
                        publication.display_price
                    ));
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.logger.info("Price monitor stopping");
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_credentials_publishes_fallback() {
        let config = Config::default();
        let cell = PriceCell::new();
        let mut monitor = PriceMonitor::new(&config, cell.clone()).unwrap();
        assert_eq!(cell.latest(), None);

        let p = monitor.run_cycle().await;
        assert_eq!(p.display_price, 100.0);
        assert_eq!(cell.latest(), Some(100.0));
        let snapshot = cell.snapshot().unwrap();
        assert!(matches!(
            snapshot.origin,
            crate::pricing::SlotOrigin::Fallback {
                reason: FallbackReason::MissingCredentials
            }
        ));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn missing_credentials_warns_before_falling_back() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        // Thread-local; the current-thread test runtime keeps the cycle here
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut monitor = PriceMonitor::new(&Config::default(), PriceCell::new()).unwrap();
        monitor.run_cycle().await;

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("ENTSO-E API key is missing. Falling back to price=100."));
    }

    #[tokio::test]
    async fn run_cycles_immediately_and_stops_on_shutdown() {
        let config = Config::default();
        let cell = PriceCell::new();
        let mut monitor = PriceMonitor::new(&config, cell.clone()).unwrap();
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { monitor.run(rx).await });
        while cell.latest().is_none() {
            tokio::task::yield_now().await;
        }
        tx.send(true).unwrap();
        handle.await.unwrap().unwrap();
        assert_eq!(cell.latest(), Some(100.0));
    }
}
