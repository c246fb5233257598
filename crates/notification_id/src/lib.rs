// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Notification ID type for Telegram MTProto client.
//!
//! This module implements TDLib's NotificationId.
//!
//! # Example
//!
//! ```rust
//! use rustgram_notification_id::NotificationId;
//!
//! let id = NotificationId::new(123);
//! assert!(id.is_valid());
//! assert_eq!(id.get(), 123);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use std::fmt::{self, Display, Formatter};
use std::hash::Hash;

/// Notification identifier.
///
/// Based on TDLib's `NotificationId` class.
///
/// Valid notification IDs are positive integers (greater than 0).
/// This is used to uniquely identify notifications within a dialog.
///
/// # Example
///
/// ```rust
/// use rustgram_notification_id::NotificationId;
///
/// let id = NotificationId::new(42);
/// assert!(id.is_valid());
/// assert_eq!(id.get(), 42);
///
/// let invalid = NotificationId::new(0);
/// assert!(!invalid.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct NotificationId(i32);

impl NotificationId {
    /// Creates a new NotificationId.
    ///
    /// # Arguments
    ///
    /// * `id` - The notification ID value
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_notification_id::NotificationId;
    ///
    /// let id = NotificationId::new(123);
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
    /// use rustgram_notification_id::NotificationId;
    ///
    /// let id = NotificationId::new(456);
    /// assert_eq!(id.get(), 456);
    /// ```
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Checks if this is a valid notification ID.
    ///
    /// Valid notification IDs are positive (greater than 0).
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_notification_id::NotificationId;
    ///
    /// assert!(NotificationId::new(1).is_valid());
    /// assert!(NotificationId::new(100).is_valid());
    /// assert!(!NotificationId::new(0).is_valid());
    /// assert!(!NotificationId::new(-1).is_valid());
    /// ```
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }

    /// Returns the maximum possible notification ID.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_notification_id::NotificationId;
    ///
    /// let max = NotificationId::max();
    /// assert_eq!(max.get(), i32::MAX);
    /// ```
    #[inline]
    pub const fn max() -> Self {
        Self(i32::MAX)
    }
}

impl Hash for NotificationId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "notification {}", self.0)
    }
}

impl From<i32> for NotificationId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<NotificationId> for i32 {
    fn from(id: NotificationId) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for NotificationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for NotificationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i32::deserialize(deserializer)
            .map(Self)
            .map_err(|e| serde::de::Error::custom(format!("invalid NotificationId: {e}")))
    }
}
