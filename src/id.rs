//! Opaque record ID generation.
//!
//! IDs are 16 hex characters produced by hashing the current time together
//! with a process-local counter, so IDs generated in the same process never
//! collide even when created within the same clock tick.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Process-local counter mixed into every ID.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Whether to use deterministic IDs (for testing).
static USE_DETERMINISTIC_IDS: AtomicBool = AtomicBool::new(false);

/// Enable deterministic ID generation for testing.
///
/// When enabled, IDs are taken from a counter instead of random hex.
pub fn enable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(true, Ordering::SeqCst);
    COUNTER.store(0, Ordering::SeqCst);
}

/// Disable deterministic ID generation.
pub fn disable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(false, Ordering::SeqCst);
}

/// Generate a fresh record ID.
#[must_use]
pub fn generate_id() -> String {
    let count = COUNTER.fetch_add(1, Ordering::SeqCst);

    if USE_DETERMINISTIC_IDS.load(Ordering::SeqCst) {
        return format!("{count:016x}");
    }

    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let state = RandomState::new();
    let mut hasher = state.build_hasher();
    // Truncation is intentional - we only need entropy, not precision
    #[allow(clippy::cast_possible_truncation)]
    hasher.write_u64(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64),
    );
    hasher.write_u64(count);
    format!("{:016x}", hasher.finish())
}
