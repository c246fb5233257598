// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Notification group ID type for Telegram MTProto client.
//!
//! This module implements TDLib's NotificationGroupId class.
//!
//! # Example
//!
//! ```rust
//! use rustgram_notification_group_id::NotificationGroupId;
//!
//! let id = NotificationGroupId::new(42);
//! assert!(id.is_valid());
//! assert_eq!(id.get(), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Notification group identifier.
///
/// Based on TDLib's `NotificationGroupId` class.
///
/// Valid notification group IDs are positive integers (greater than 0).
/// This is used to uniquely identify notification groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NotificationGroupId(i32);

impl NotificationGroupId {
    /// Creates a new NotificationGroupId.
    ///
    /// # Arguments
    ///
    /// * `id` - The group ID value
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_notification_group_id::NotificationGroupId;
    ///
    /// let id = NotificationGroupId::new(123);
    /// ```
    #[inline]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the inner i32 value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_notification_group_id::NotificationGroupId;
    ///
    /// let id = NotificationGroupId::new(456);
    /// assert_eq!(id.get(), 456);
    /// ```
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Checks if this is a valid notification group ID.
    ///
    /// Valid notification group IDs are positive (greater than 0).
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_notification_group_id::NotificationGroupId;
    ///
    /// assert!(NotificationGroupId::new(1).is_valid());
    /// assert!(NotificationGroupId::new(100).is_valid());
    /// assert!(!NotificationGroupId::new(0).is_valid());
    /// assert!(!NotificationGroupId::new(-1).is_valid());
    /// ```
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }

    /// Returns the maximum possible notification group ID.
    #[inline]
    pub const fn max() -> Self {
        Self(i32::MAX)
    }
}

impl Default for NotificationGroupId {
    fn default() -> Self {
        Self(0)
    }
}

impl Hash for NotificationGroupId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Display for NotificationGroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "notification group {}", self.0)
    }
}

impl From<i32> for NotificationGroupId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<NotificationGroupId> for i32 {
    fn from(id: NotificationGroupId) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for NotificationGroupId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for NotificationGroupId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i32::deserialize(deserializer)
            .map(Self)
            .map_err(|e| serde::de::Error::custom(format!("invalid NotificationGroupId: {e}")))
    }
}
