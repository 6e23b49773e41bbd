//! Feature Encoder - Event → FeatureVector
//!
//! Ba features: giờ trong ngày, bucket của eventType, bucket của ip.
//!
//! ## Bucketing digest (wire contract)
//! `code = SHA-256(utf8(s))` read as a big-endian unsigned integer, `mod 1000`.
//! The reduction is exact, so any peer using the same digest agrees on codes.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Timelike};
use sha2::{Digest, Sha256};

use super::clock::{Clock, SystemClock};
use super::event::Event;
use super::layout::HASH_BUCKETS;
use super::vector::FeatureVector;

/// Date part, extended or basic
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Time-of-day part once an hour-only value is widened to `HH:00`.
/// Offsets use the same shapes without the sign.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];

// ============================================================================
// HASH BUCKETING
// ============================================================================

/// Map a string onto `[0, HASH_BUCKETS)` through SHA-256
pub fn hash_bucket(s: &str) -> u32 {
    let digest = Sha256::digest(s.as_bytes());
    let buckets = u64::from(HASH_BUCKETS);

    // Horner fold keeps the full 256-bit value exact modulo the bucket count
    let code = digest
        .iter()
        .fold(0u64, |acc, &byte| (acc * 256 + u64::from(byte)) % buckets);

    code as u32
}

// ============================================================================
// TIMESTAMP PARSING
// ============================================================================

/// Hour of day as written in an ISO-8601 timestamp (offset is not applied)
///
/// Accepts extended and basic forms, reduced precision down to the hour,
/// `Z` or `±HH[:MM[:SS[.f]]]` offsets. Date-only values give hour 0.
pub fn parse_hour(timestamp: &str) -> Option<u32> {
    let (date, time) = match timestamp.find(|c: char| matches!(c, 'T' | 't' | ' ')) {
        Some(i) => (&timestamp[..i], Some(&timestamp[i + 1..])),
        None => (timestamp, None),
    };

    if !DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(date, format).is_ok())
    {
        return None;
    }

    let Some(time) = time else {
        return Some(0);
    };

    let (clock, offset) = match time.find(|c: char| matches!(c, '+' | '-' | 'Z' | 'z')) {
        Some(i) => (&time[..i], Some(&time[i..])),
        None => (time, None),
    };

    match offset {
        None => {}
        Some("Z") | Some("z") => {}
        Some(offset) => {
            let body = offset.strip_prefix(|c: char| matches!(c, '+' | '-'))?;
            parse_time_of_day(body)?;
        }
    }

    parse_time_of_day(clock).map(|t| t.hour())
}

fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.replace(',', ".");
    let value = if value.len() == 2 && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}:00", value)
    } else {
        value
    };

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&value, format).ok())
}

// ============================================================================
// ENCODER
// ============================================================================

/// Deterministic event encoder (except for the clock fallback)
#[derive(Clone)]
pub struct FeatureEncoder {
    clock: Arc<dyn Clock>,
}

impl FeatureEncoder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Hour of the event, or the clock's hour when the timestamp is missing or bad
    pub fn event_hour(&self, event: &Event) -> u32 {
        match event.timestamp.as_deref() {
            Some(ts) => match parse_hour(ts) {
                Some(hour) => hour,
                None => {
                    let hour = self.clock.current_hour();
                    log::debug!("Unparsable timestamp {:?}, using current hour {}", ts, hour);
                    hour
                }
            },
            None => self.clock.current_hour(),
        }
    }

    pub fn encode(&self, event: &Event) -> FeatureVector {
        FeatureVector::new(
            self.event_hour(event),
            hash_bucket(&event.event_type),
            hash_bucket(&event.ip),
        )
    }

    pub fn encode_all(&self, events: &[Event]) -> Vec<FeatureVector> {
        events.iter().map(|e| self.encode(e)).collect()
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for FeatureEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEncoder").finish_non_exhaustive()
    }
}
