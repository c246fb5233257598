// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Notification aggregation and dispatch engine for a multi-dialog
//! messaging client.
//!
//! Coalesces per-message notification events into per-dialog groups,
//! delays and batches them according to multi-device presence, enforces
//! a bounded visible group count and size, and emits structured updates
//! to a UI sink. Based on TDLib's `NotificationManager`, reduced to its
//! message-notification grouping responsibilities.
//!
//! # Example
//!
//! ```rust
//! use rustgram_notification_engine::{EngineContext, NotificationEngine};
//! use rustgram_notification_engine::context::{
//!     AuthSession, Clock, CloseFlag, ConfigSource, KvStore, PresenceOracle, PresenceStatus,
//!     TimerWheel, UpdateSink,
//! };
//! use rustgram_notification_engine::update::NotificationUpdate;
//! # struct NoopAuth;
//! # impl AuthSession for NoopAuth { fn is_bot(&self) -> bool { false } }
//! # struct DefaultConfig;
//! # impl ConfigSource for DefaultConfig { fn get_int(&self, _key: &str, default: i32) -> i32 { default } }
//! # struct NoopKv;
//! # impl KvStore for NoopKv {
//! #     fn get(&self, _key: &str) -> Option<String> { None }
//! #     fn set(&self, _key: &str, _value: String) {}
//! # }
//! # struct OfflineEverywhere;
//! # impl PresenceOracle for OfflineEverywhere {
//! #     fn get_my_status(&self) -> PresenceStatus {
//! #         PresenceStatus { is_online_local: true, is_online_remote: false, was_online_local: 0.0, was_online_remote: 0.0 }
//! #     }
//! # }
//! # struct FixedClock;
//! # impl Clock for FixedClock {
//! #     fn server_time_cached(&self) -> f64 { 0.0 }
//! #     fn monotonic_now(&self) -> f64 { 0.0 }
//! # }
//! # struct NoopTimer;
//! # impl TimerWheel for NoopTimer { fn set_at(&self, _group_id: i64, _at: f64) {} }
//! # struct NoopSink;
//! # impl UpdateSink for NoopSink { fn send(&self, _update: NotificationUpdate) {} }
//! # struct NeverClosing;
//! # impl CloseFlag for NeverClosing { fn is_closing(&self) -> bool { false } }
//! let engine = NotificationEngine::new(EngineContext {
//!     auth: Box::new(NoopAuth),
//!     config: Box::new(DefaultConfig),
//!     kv: Box::new(NoopKv),
//!     presence: Box::new(OfflineEverywhere),
//!     clock: Box::new(FixedClock),
//!     timer: Box::new(NoopTimer),
//!     sink: Box::new(NoopSink),
//!     close_flag: Box::new(NeverClosing),
//! });
//! let _ = engine;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod allocator;
pub mod config;
pub mod context;
mod delay;
mod engine;
mod group;
pub mod error;
pub mod update;

pub use config::ConfigMirror;
pub use engine::{EngineContext, NotificationEngine};
pub use error::{NotificationEngineError, Result};
