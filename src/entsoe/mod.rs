//! ENTSO-E transparency platform integration
//!
//! Request window arithmetic, the HTTP client, and the typed publication
//! document the client's XML responses deserialize into.

pub mod client;
pub mod document;
pub mod window;

pub use client::{EntsoeClient, PriceSource, redact_token};
pub use document::{Period, Point, PublicationDocument, Reason, TimeInterval, TimeSeries};
pub use window::{RequestWindow, format_entsoe_timestamp};
