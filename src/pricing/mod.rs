//! Day-ahead price slots: normalization, resolution and publication
//!
//! The flow of one cycle is `normalize` -> `resolve` -> `Publisher::publish`.
//! All three are synchronous and never fail; the async fetch that precedes them
//! lives in the `entsoe` module.

pub mod cell;
pub mod normalize;
pub mod publish;
pub mod resolve;
pub mod slot;

pub use cell::{PriceCell, PriceSnapshot, SlotTable};
pub use normalize::{format_slot_table, normalize, parse_instant};
pub use publish::{Publication, Publisher, describe_slot, publish};
pub use resolve::{FallbackReason, ResolvedSlot, SlotOrigin, last_slot_validity, resolve};
pub use slot::{
    DISPLAY_DIVISOR, FALLBACK_PRICE_EUR_MWH, Resolution, TimeSlot, to_display_price,
};
