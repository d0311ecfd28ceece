//! Challenge identifiers.
//!
//! Seven base-36 segments joined by `-`: three random, the current UTC time in
//! nanoseconds, three random. The six random segments carry 378 bits.

use crate::core::RandomSource;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SEGMENT_COUNT: usize = 7;
pub const SEPARATOR: char = '-';

const RANDOM_BEFORE: usize = 3;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Builds a new identifier from `rng` and the wall clock.
pub fn generate(rng: &mut RandomSource) -> String {
    let mut segments = Vec::with_capacity(SEGMENT_COUNT);

    for _ in 0..RANDOM_BEFORE {
        segments.push(random_segment(rng));
    }
    segments.push(to_base36(timestamp_nanos()));
    for _ in RANDOM_BEFORE + 1..SEGMENT_COUNT {
        segments.push(random_segment(rng));
    }

    segments.join(&SEPARATOR.to_string())
}

fn random_segment(rng: &mut RandomSource) -> String {
    to_base36(rng.int63().unsigned_abs())
}

fn timestamp_nanos() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    u64::try_from(nanos).unwrap_or(u64::MAX)
}

/// Lowercase base-36 rendering of `n`.
#[must_use]
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();

    String::from_utf8_lossy(&buf).into_owned()
}
