// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Error types for the notification engine.

use thiserror::Error;

/// Error type for notification engine operations.
///
/// Contract violations (invalid ids or null content reaching the engine
/// through a path that assumes valid input, an unknown `group_id` reaching
/// the flush engine) are not represented here: those are asserted with
/// `debug_assert!`/`panic!` at the call site, since the engine's contract
/// treats them as not user-reachable under correct use. This type only
/// carries the one user-facing, 400-class failure mode: an invalid id
/// passed to a removal operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationEngineError {
    /// An id supplied to a public operation was not a valid (positive)
    /// identifier.
    #[error("invalid id: {0}")]
    InvalidId(&'static str),
}

/// Result type for notification engine operations.
pub type Result<T> = std::result::Result<T, NotificationEngineError>;
