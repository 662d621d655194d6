//! # EPEX Monitor - day-ahead electricity price monitor
//!
//! Fetches the EPEX day-ahead market prices for one bidding zone from the
//! ENTSO-E transparency platform, picks the slot covering the current instant
//! and publishes it as a single ct/kWh reading.
//!
//! ## Architecture
//!
//! - `config`: YAML configuration, environment overrides and validation
//! - `logging`: Structured logging and tracing
//! - `entsoe`: Request window, HTTP client and publication document model
//! - `pricing`: Slot normalization, current-slot resolution and publication
//! - `monitor`: The periodic fetch/publish cycle
//! - `sensor`: The read-only price sensor
//! - `web`: HTTP read API over the latest price

pub mod config;
pub mod entsoe;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod pricing;
pub mod sensor;
#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
mod config_tests;

// Re-export commonly used types
pub use config::Config;
pub use error::{EpexError, Result};
pub use monitor::PriceMonitor;
pub use pricing::PriceCell;
pub use sensor::PriceSensor;
