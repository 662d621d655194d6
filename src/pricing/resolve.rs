//! Pick the slot that applies at a given instant

use crate::pricing::slot::TimeSlot;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

/// How long the last slot is assumed to stay valid, whatever its resolution
pub fn last_slot_validity() -> Duration {
    Duration::hours(1)
}

/// Why the fallback price was used instead of a real slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No API key configured, nothing was fetched
    MissingCredentials,
    /// Transport or document failure
    FetchFailed { message: String },
    /// The document produced no slots
    NoData,
    /// Every slot starts after now
    AllFuture { first_start: DateTime<Utc> },
    /// The last slot ended before now
    AllPast { last_start: DateTime<Utc> },
    /// Sequence was not contiguous/sorted as expected
    NoMatchingSlot,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "ENTSO-E API key is missing"),
            Self::FetchFailed { message } => write!(f, "fetch failed: {}", message),
            Self::NoData => write!(f, "no timeslots returned by the API"),
            Self::AllFuture { first_start } => write!(
                f,
                "all timeslots are in the future (now < {})",
                first_start.to_rfc3339()
            ),
            Self::AllPast { last_start } => {
                write!(f, "all slots ended by {}", last_start.to_rfc3339())
            }
            Self::NoMatchingSlot => write!(f, "no suitable slot found"),
        }
    }
}

/// Where a resolved slot came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SlotOrigin {
    Live,
    Fallback { reason: FallbackReason },
}

/// Result of resolving "now" against a slot sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSlot {
    pub slot: TimeSlot,
    pub origin: SlotOrigin,
}

impl ResolvedSlot {
    pub fn live(slot: TimeSlot) -> Self {
        Self {
            slot,
            origin: SlotOrigin::Live,
        }
    }

    pub fn fallback(slot: TimeSlot, reason: FallbackReason) -> Self {
        Self {
            slot,
            origin: SlotOrigin::Fallback { reason },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SlotOrigin::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.origin {
            SlotOrigin::Fallback { reason } => Some(reason),
            SlotOrigin::Live => None,
        }
    }
}

/// Select the slot covering `now`.
///
/// `slots` must be sorted by start. A slot covers `[start, next.start)`; the
/// last slot covers `[start, start + 1h)`. Anything outside that range, or an
/// empty sequence, yields `fallback` together with the reason.
pub fn resolve(slots: &[TimeSlot], now: DateTime<Utc>, fallback: TimeSlot) -> ResolvedSlot {
    let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
        return ResolvedSlot::fallback(fallback, FallbackReason::NoData);
    };

    if now < first.start {
        return ResolvedSlot::fallback(
            fallback,
            FallbackReason::AllFuture {
                first_start: first.start,
            },
        );
    }

    // An end beyond the representable range never passes
    let last_end = last.start.checked_add_signed(last_slot_validity());
    if last_end.is_some_and(|end| now >= end) {
        return ResolvedSlot::fallback(
            fallback,
            FallbackReason::AllPast {
                last_start: last.start,
            },
        );
    }

    let found = slots.iter().enumerate().find(|(idx, slot)| match slots.get(idx + 1) {
        None => true,
        Some(next) => slot.start <= now && now < next.start,
    });

    match found {
        Some((_, slot)) => ResolvedSlot::live(*slot),
        None => ResolvedSlot::fallback(fallback, FallbackReason::NoMatchingSlot),
    }
}
