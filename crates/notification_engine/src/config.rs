// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Tunable configuration, mirrored from the shared config registry.

use crate::context::ConfigSource;
use tracing::debug;

/// Extra retention beyond the visible suffix, to absorb edits and
/// short-term history without re-fetching.
pub const EXTRA_GROUP_SIZE: i32 = 10;

/// Floor applied to every computed delay so a timer callback never fires
/// in the past.
pub const MIN_NOTIFICATION_DELAY_MS: i32 = 1;

const MIN_GROUP_COUNT_MAX: i32 = 0;
const MAX_GROUP_COUNT_MAX: i32 = 25;
const DEFAULT_GROUP_COUNT_MAX: i32 = 5;

const MIN_GROUP_SIZE_MAX: i32 = 1;
const MAX_GROUP_SIZE_MAX: i32 = 25;
const DEFAULT_GROUP_SIZE_MAX: i32 = 10;

const DEFAULT_ONLINE_CLOUD_TIMEOUT_MS: i32 = 300_000;
const DEFAULT_ONLINE_CLOUD_DELAY_MS: i32 = 30_000;
const DEFAULT_DEFAULT_DELAY_MS: i32 = 1500;

/// Mirror of the five tunables the flush/delay logic depends on, refreshed
/// from a [`ConfigSource`] on startup and on every config-change callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigMirror {
    /// Visible group window (`notification_group_count_max`).
    pub max_group_count: i32,
    /// Visible items per group (`notification_group_size_max`).
    pub max_group_size: i32,
    /// Presence recency threshold, ms (`online_cloud_timeout_ms`).
    pub online_cloud_timeout_ms: i32,
    /// Delay when another device is/was recently online, ms
    /// (`notification_cloud_delay_ms`).
    pub notification_cloud_delay_ms: i32,
    /// Delay when another device is online now, ms
    /// (`notification_default_delay_ms`).
    pub notification_default_delay_ms: i32,
    /// In-memory retention target per group, derived from `max_group_size`.
    pub keep_size: i32,
}

impl ConfigMirror {
    /// Reads all five tunables from `source`, clamping to their declared
    /// bounds, and derives `keep_size`.
    pub fn load(source: &dyn ConfigSource) -> Self {
        let max_group_count = clamp(
            source.get_int("notification_group_count_max", DEFAULT_GROUP_COUNT_MAX),
            MIN_GROUP_COUNT_MAX,
            MAX_GROUP_COUNT_MAX,
        );
        let max_group_size = clamp(
            source.get_int("notification_group_size_max", DEFAULT_GROUP_SIZE_MAX),
            MIN_GROUP_SIZE_MAX,
            MAX_GROUP_SIZE_MAX,
        );
        let online_cloud_timeout_ms = source.get_int(
            "online_cloud_timeout_ms",
            DEFAULT_ONLINE_CLOUD_TIMEOUT_MS,
        );
        let notification_cloud_delay_ms =
            source.get_int("notification_cloud_delay_ms", DEFAULT_ONLINE_CLOUD_DELAY_MS);
        let notification_default_delay_ms =
            source.get_int("notification_default_delay_ms", DEFAULT_DEFAULT_DELAY_MS);

        let mirror = Self {
            max_group_count,
            max_group_size,
            online_cloud_timeout_ms,
            notification_cloud_delay_ms,
            notification_default_delay_ms,
            keep_size: derive_keep_size(max_group_size),
        };
        debug!(?mirror, "notification config mirror refreshed");
        mirror
    }
}

fn derive_keep_size(max_group_size: i32) -> i32 {
    max_group_size + (EXTRA_GROUP_SIZE / 2).max(max_group_size.min(EXTRA_GROUP_SIZE))
}

fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapConfigSource(Mutex<HashMap<&'static str, i32>>);

    impl ConfigSource for MapConfigSource {
        fn get_int(&self, key: &str, default: i32) -> i32 {
            self.0
                .lock()
                .expect("lock")
                .get(key)
                .copied()
                .unwrap_or(default)
        }
    }

    #[test]
    fn test_defaults() {
        let source = MapConfigSource(Mutex::new(HashMap::new()));
        let mirror = ConfigMirror::load(&source);
        assert_eq!(mirror.max_group_count, DEFAULT_GROUP_COUNT_MAX);
        assert_eq!(mirror.max_group_size, DEFAULT_GROUP_SIZE_MAX);
        assert_eq!(mirror.keep_size, derive_keep_size(DEFAULT_GROUP_SIZE_MAX));
    }

    #[test]
    fn test_clamping_group_count() {
        let mut map = HashMap::new();
        map.insert("notification_group_count_max", 999);
        let source = MapConfigSource(Mutex::new(map));
        let mirror = ConfigMirror::load(&source);
        assert_eq!(mirror.max_group_count, MAX_GROUP_COUNT_MAX);
    }

    #[test]
    fn test_clamping_group_size_low() {
        let mut map = HashMap::new();
        map.insert("notification_group_size_max", -5);
        let source = MapConfigSource(Mutex::new(map));
        let mirror = ConfigMirror::load(&source);
        assert_eq!(mirror.max_group_size, MIN_GROUP_SIZE_MAX);
    }

    #[test]
    fn test_keep_size_formula_small_max_size() {
        // max_size=3: keep_size = 3 + max(5, min(3,10)) = 3 + 5 = 8
        assert_eq!(derive_keep_size(3), 8);
    }

    #[test]
    fn test_keep_size_formula_large_max_size() {
        // max_size=20: keep_size = 20 + max(5, min(20,10)) = 20 + 10 = 30
        assert_eq!(derive_keep_size(20), 30);
    }
}
