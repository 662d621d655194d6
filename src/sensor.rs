//! The published price sensor
//!
//! A thin consumer of the [`PriceCell`]: it carries the identity the price is
//! published under and reads the latest value on demand.

use crate::config::SensorConfig;
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::pricing::PriceCell;
use serde::Serialize;

pub const MANUFACTURER: &str = "ENTSO-E";
pub const MODEL: &str = "Energy Price Monitor";
pub const SERIAL_NUMBER: &str = "123-456-789";

/// Static accessory information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorInfo {
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub serial_number: &'static str,
}

/// Price exposed as a single numeric reading
#[derive(Debug, Clone)]
pub struct PriceSensor {
    info: SensorInfo,
    cell: PriceCell,
    logger: StructuredLogger,
}

impl PriceSensor {
    pub fn new(cfg: &SensorConfig, cell: PriceCell) -> Self {
        let name = if cfg.name.trim().is_empty() {
            "Default Name".to_string()
        } else {
            cfg.name.clone()
        };
        let logger = get_logger_with_context(LogContext::new("sensor").with_field("name", name.clone()));
        Self {
            info: SensorInfo {
                name,
                manufacturer: MANUFACTURER,
                model: MODEL,
                serial_number: SERIAL_NUMBER,
            },
            cell,
            logger,
        }
    }

    pub fn info(&self) -> &SensorInfo {
        &self.info
    }

    /// Push notification from the monitor
    pub fn update_price(&self, price: Option<f64>) {
        match price {
            Some(p) => self
                .logger
                .debug(&format!("Updating price for {}: {}", self.info.name, p)),
            None => self
                .logger
                .warn(&format!("Price unavailable for {}.", self.info.name)),
        }
    }

    /// Read the current value; `None` before the first cycle
    pub fn current_value(&self) -> Option<f64> {
        let price = self.cell.latest();
        if price.is_none() {
            self.logger.warn(&format!(
                "Current price is unavailable for {}",
                self.info.name
            ));
        }
        price
    }
}
