//! Identifier generation for newly created entities.
//!
//! # Responsibility
//! - Produce string ids that are practically unique for one user's data.
//!
//! # Invariants
//! - `generate_id` never fails and never panics.
//! - Primary ids are RFC 4122 v4 UUID strings built from OS entropy.
//! - Fallback ids are `<base36 random><base36 epoch ms>` and are only used
//!   when the OS entropy source is unavailable.

use chrono::Utc;
use log::warn;
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Builder;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);
static FALLBACK_WARNED: OnceCell<()> = OnceCell::new();

/// Returns a new entity id.
///
/// Ids are opaque strings. Imported data may carry ids in either format (or
/// any other string), so callers must never parse them.
pub fn generate_id() -> String {
    let mut bytes = [0_u8; 16];
    match getrandom::fill(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string(),
        Err(err) => {
            if FALLBACK_WARNED.set(()).is_ok() {
                warn!("event=id_fallback module=id status=degraded error={err}");
            }
            fallback_id(Utc::now().timestamp_millis())
        }
    }
}

fn fallback_id(now_ms: i64) -> String {
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = Utc::now().timestamp_subsec_nanos();
    let seed = (now_ms as u64).rotate_left(21)
        ^ u64::from(nanos)
        ^ counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let fragment: u64 = StdRng::seed_from_u64(seed).gen();

    let mut id = to_base36(fragment);
    id.push_str(&to_base36(now_ms.max(0) as u64));
    id
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
