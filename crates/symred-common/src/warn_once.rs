//! Rate-limited diagnostics keyed by a stable string.
//!
//! The first report for a key goes out at WARN; later reports for the same key
//! drop to DEBUG and carry their occurrence number. Resolution can run in a
//! hot loop, so a condition like "GPU requested but not detected" must not
//! repeat at WARN.
//!
//! ```
//! use symred_common::warn_once;
//!
//! warn_once!("gpu_requested_without_gpu", "GPU requested but none detected");
//! assert!(symred_common::warn_once::has_warned("gpu_requested_without_gpu"));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

static OCCURRENCES: OnceLock<Mutex<HashMap<String, u64>>> = OnceLock::new();

fn occurrences_table() -> MutexGuard<'static, HashMap<String, u64>> {
    let table = OCCURRENCES.get_or_init(|| Mutex::new(HashMap::new()));
    // Counters stay consistent even if a holder panicked.
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Report `message` under `key`. Returns `true` when this call emitted the WARN.
pub fn warn_once_fn(key: &str, message: &str) -> bool {
    let occurrence = {
        let mut table = occurrences_table();
        let count = table.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    };

    if occurrence == 1 {
        tracing::warn!(key, "{message}");
        true
    } else {
        tracing::debug!(key, occurrence, "(rate-limited) {message}");
        false
    }
}

/// Whether `key` has been reported at least once in this process.
pub fn has_warned(key: &str) -> bool {
    occurrences_table().contains_key(key)
}

/// How many times `key` has been reported, WARN and rate-limited together.
pub fn occurrences(key: &str) -> u64 {
    occurrences_table().get(key).copied().unwrap_or(0)
}

/// Formatting front-end for [`warn_once_fn`].
#[macro_export]
macro_rules! warn_once {
    ($key:expr, $($arg:tt)*) => {
        $crate::warn_once::warn_once_fn($key, &format!($($arg)*))
    };
}
