// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! External collaborator interfaces.
//!
//! The engine never reaches for a global singleton: every outside
//! dependency (auth state, config, durable storage, presence, clocks, the
//! timer wheel, the UI sink, process shutdown) is injected as a trait
//! object at construction time. This mirrors `rustgram-config`'s and
//! `rustgram-storage`'s pattern of depending on narrow traits rather than
//! concrete managers, generalized here into a single `Context` bundle so
//! `NotificationEngine::new` takes one argument instead of eight.

use crate::update::NotificationUpdate;

/// Read-only authentication/session state.
pub trait AuthSession: Send {
    /// Whether the current session is a bot session.
    ///
    /// Every mutating engine operation is a no-op for bot sessions.
    fn is_bot(&self) -> bool;
}

/// Read-only access to the shared configuration registry.
pub trait ConfigSource: Send {
    /// Reads an integer option, falling back to `default` if unset.
    fn get_int(&self, key: &str, default: i32) -> i32;
}

/// Durable key-value store for the two monotonic id counters.
pub trait KvStore: Send {
    /// Reads a string entry, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes a string entry, replacing any prior value.
    fn set(&self, key: &str, value: String);
}

/// Multi-device online-state snapshot for the local user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceStatus {
    /// Whether the local device is online right now.
    pub is_online_local: bool,
    /// Whether some other device of the same account is online right now.
    pub is_online_remote: bool,
    /// Unix timestamp the local device was last online.
    pub was_online_local: f64,
    /// Unix timestamp some other device was last online.
    pub was_online_remote: f64,
}

/// Presence oracle for the local user's multi-device online state.
pub trait PresenceOracle: Send {
    /// Returns the current presence snapshot.
    fn get_my_status(&self) -> PresenceStatus;
}

/// Time source, split into server-skew-corrected and monotonic clocks.
pub trait Clock: Send {
    /// Current server time, in seconds, possibly cached/approximate.
    fn server_time_cached(&self) -> f64;
    /// Monotonic time, in seconds, for scheduling.
    fn monotonic_now(&self) -> f64;
}

/// The actor's timer wheel: one-shot, per-group-id callbacks.
pub trait TimerWheel: Send {
    /// Schedules (or reschedules) a one-shot callback for `group_id` at the
    /// given absolute monotonic time, replacing any prior callback for the
    /// same `group_id`.
    fn set_at(&self, group_id: i64, at: f64);
}

/// Fire-and-forget consumer of structured update objects.
pub trait UpdateSink: Send {
    /// Delivers an update. Backpressure is not modeled; the call never
    /// blocks the engine.
    fn send(&self, update: NotificationUpdate);
}

/// Process-wide shutdown signal, checked by timer callbacks.
pub trait CloseFlag: Send {
    /// Whether the process is shutting down.
    fn is_closing(&self) -> bool;
}
