// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! In-memory test doubles for [`rustgram_notification_engine`]'s
//! collaborator traits.
//!
//! Mirrors the teacher's `storage`/`config` crates' pattern of shipping a
//! `*-testkit` crate alongside the production crate so downstream callers
//! can exercise the engine without standing up real auth/presence/storage
//! services.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use rustgram_notification_engine::context::{
    AuthSession, Clock, CloseFlag, ConfigSource, KvStore, PresenceOracle, PresenceStatus, TimerWheel, UpdateSink,
};
use rustgram_notification_engine::update::NotificationUpdate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A fixed-answer [`AuthSession`], for either a normal user or a bot.
#[derive(Debug, Clone, Copy)]
pub struct FakeAuthSession {
    is_bot: bool,
}

impl FakeAuthSession {
    /// A non-bot session.
    pub fn user() -> Self {
        Self { is_bot: false }
    }

    /// A bot session.
    pub fn bot() -> Self {
        Self { is_bot: true }
    }
}

impl AuthSession for FakeAuthSession {
    fn is_bot(&self) -> bool {
        self.is_bot
    }
}

/// A mutable, `HashMap`-backed [`ConfigSource`].
#[derive(Debug, Default)]
pub struct FakeConfigSource(Mutex<HashMap<String, i32>>);

impl FakeConfigSource {
    /// Creates an empty config source; every key falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides `key`, taking effect on the next `get_int` call.
    pub fn set(&self, key: &str, value: i32) {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

impl ConfigSource for FakeConfigSource {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or(default)
    }
}

/// An in-memory, `HashMap`-backed [`KvStore`].
#[derive(Debug, Default)]
pub struct FakeKvStore(Mutex<HashMap<String, String>>);

impl FakeKvStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry, as if written by a prior process.
    pub fn seed(&self, key: &str, value: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.into());
    }
}

impl KvStore for FakeKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

/// A mutable [`PresenceOracle`] whose status can be changed between calls.
#[derive(Debug, Default)]
pub struct FakePresenceOracle(Mutex<PresenceStatus>);

impl FakePresenceOracle {
    /// Creates an oracle reporting fully offline, never-seen presence.
    pub fn new() -> Self {
        Self(Mutex::new(PresenceStatus {
            is_online_local: false,
            is_online_remote: false,
            was_online_local: 0.0,
            was_online_remote: 0.0,
        }))
    }

    /// Replaces the reported presence snapshot.
    pub fn set(&self, status: PresenceStatus) {
        *self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = status;
    }
}

impl PresenceOracle for FakePresenceOracle {
    fn get_my_status(&self) -> PresenceStatus {
        *self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// A manually advanceable [`Clock`], with a single time value standing in
/// for both the server-time and monotonic clocks.
#[derive(Debug, Default)]
pub struct FakeClock(Mutex<f64>);

impl FakeClock {
    /// Creates a clock starting at `now` seconds.
    pub fn new(now: f64) -> Self {
        Self(Mutex::new(now))
    }

    /// Advances the clock by `seconds`.
    pub fn advance(&self, seconds: f64) {
        *self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner) += seconds;
    }
}

impl Clock for FakeClock {
    fn server_time_cached(&self) -> f64 {
        *self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn monotonic_now(&self) -> f64 {
        *self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// A recording [`TimerWheel`]: every `set_at` call overwrites the scheduled
/// time for its `group_id`, mirroring the real wheel's one-shot-per-group
/// semantics, without ever actually firing.
#[derive(Debug, Default)]
pub struct FakeTimerWheel(Mutex<HashMap<i64, f64>>);

impl FakeTimerWheel {
    /// Creates an empty timer wheel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently scheduled time for `group_id`, if any.
    pub fn scheduled_at(&self, group_id: i64) -> Option<f64> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&group_id)
            .copied()
    }
}

impl TimerWheel for FakeTimerWheel {
    fn set_at(&self, group_id: i64, at: f64) {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(group_id, at);
    }
}

/// A `Vec`-backed [`UpdateSink`] that records every update it receives, in
/// order, for later inspection by a test.
#[derive(Debug, Clone, Default)]
pub struct RecordingUpdateSink(Arc<Mutex<Vec<NotificationUpdate>>>);

impl RecordingUpdateSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every update recorded so far, in arrival order.
    pub fn updates(&self) -> Vec<NotificationUpdate> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    /// Discards every recorded update.
    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clear();
    }
}

impl UpdateSink for RecordingUpdateSink {
    fn send(&self, update: NotificationUpdate) {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(update);
    }
}

/// A [`CloseFlag`] that can be flipped once shutdown begins.
#[derive(Debug, Clone, Default)]
pub struct FakeCloseFlag(Arc<AtomicBool>);

impl FakeCloseFlag {
    /// Creates a flag reporting "not closing".
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the process as shutting down.
    pub fn close(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl CloseFlag for FakeCloseFlag {
    fn is_closing(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
