//! Various small helper functions

mod backoff;

pub use backoff::Backoff;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::time::Duration;

/// Parses a Duration from a string containing milliseconds.
/// Useful for command line parsing
pub fn parse_millis(src: &str) -> Result<Duration, ParseIntError> {
    let millis = src.trim().parse::<u64>()?;
    Ok(Duration::from_millis(millis))
}

/// Maps a value onto one of `buckets` slots
///
/// The mapping is stable for the lifetime of the process which is all that is required
/// to keep related values on the same slot. Zero buckets are treated as one.
pub fn bucket_of<H: Hash + ?Sized>(value: &H, buckets: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    (hasher.finish() % buckets.max(1) as u64) as usize
}
