//! Sources for `oauth_timestamp` and `oauth_nonce`.
//!
//! Nonces are never stored or checked against earlier ones. Replay defense
//! belongs to the provider, which sees the (timestamp, nonce) pair.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use sha1::{Digest, Sha1};

/// Current Unix time in seconds.
pub(crate) fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// 40 hex characters: SHA-1 over the nanosecond clock and a random integer.
pub(crate) fn generate_nonce() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let salt: u64 = rand::thread_rng().gen();

    let mut hasher = Sha1::new();
    hasher.update(nanos.to_be_bytes());
    hasher.update(salt.to_be_bytes());
    hex::encode(hasher.finalize())
}
