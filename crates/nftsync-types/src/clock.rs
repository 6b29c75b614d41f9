use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as Unix seconds, the timestamp format every
/// `created_at`/`updated_at` column in the store uses.
pub fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("system clock before epoch").as_secs() as i64
}
