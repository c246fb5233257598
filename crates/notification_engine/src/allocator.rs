// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Monotonic, wrap-at-(2^31-1) identifier allocation with write-through
//! durability.

use crate::context::KvStore;

/// The modulus both id spaces wrap at: `2^31 - 1`, i.e. `i32::MAX`.
const WRAP_MODULUS: i64 = i32::MAX as i64;

/// A single durable monotonic counter.
///
/// `next()` computes `c <- (c mod (2^31-1)) + 1`, which always yields a
/// value in `[1, 2^31-1]` and never produces the sentinel `0`.
#[derive(Debug)]
pub struct IdAllocator {
    key: &'static str,
    current: i64,
}

impl IdAllocator {
    /// Loads the counter from `kv` under `key`, defaulting to `0` if the
    /// entry is missing, empty, or unparsable.
    pub fn load(kv: &dyn KvStore, key: &'static str) -> Self {
        let current = kv
            .get(key)
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0);
        Self { key, current }
    }

    /// Allocates the next id, durably persisting the new counter value.
    pub fn next(&mut self, kv: &dyn KvStore) -> i32 {
        self.current = (self.current % WRAP_MODULUS) + 1;
        kv.set(self.key, self.current.to_string());
        self.current as i32
    }
}
