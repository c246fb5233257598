// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! # Dialog ID
//!
//! Dialog identifier for Telegram MTProto.
//!
//! Based on TDLib's `DialogId` from `td/telegram/DialogId.h`.
//!
//! # Overview
//!
//! A `DialogId` uniquely identifies a conversation in Telegram, which can be
//! a user chat, group chat, channel, or secret chat. The ID space is divided
//! into ranges for different dialog types.
//!
//! # Example
//!
//! ```rust
//! use rustgram_dialog_id::DialogId;
//!
//! let id = DialogId::new(123456);
//! assert!(id.is_valid());
//! ```

#![warn(missing_docs, clippy::all)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Dialog type enumeration.
///
/// Represents the different types of conversations in Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DialogType {
    /// No dialog type (invalid).
    #[default]
    None,
    /// Private chat with a user.
    User,
    /// Group chat.
    Chat,
    /// Channel or supergroup.
    Channel,
    /// Secret chat.
    SecretChat,
}

impl DialogType {
    /// Checks if this is a valid dialog type.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(
            self,
            Self::User | Self::Chat | Self::Channel | Self::SecretChat
        )
    }
}

/// Dialog identifier.
///
/// Represents a unique identifier for a Telegram conversation.
/// The ID space is divided into ranges for different dialog types.
///
/// # Example
///
/// ```
/// use rustgram_dialog_id::DialogId;
///
/// let id = DialogId::new(123456);
/// assert_eq!(id.get(), 123456);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DialogId(i64);

impl DialogId {
    /// Constant for zero secret chat ID.
    pub const ZERO_SECRET_CHAT_ID: i64 = -2_000_000_000_000;

    /// Constant for zero channel ID.
    pub const ZERO_CHANNEL_ID: i64 = -1_000_000_000_000;

    /// Creates a new `DialogId` from an i64 value.
    ///
    /// # Arguments
    ///
    /// * `id` - The raw dialog ID value
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_dialog_id::DialogId;
    ///
    /// let id = DialogId::new(123456);
    /// assert_eq!(id.get(), 123456);
    /// ```
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner i64 value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_dialog_id::DialogId;
    ///
    /// let id = DialogId::new(123456);
    /// assert_eq!(id.get(), 123456);
    /// ```
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Checks if this is a valid dialog ID.
    ///
    /// A valid dialog ID is non-zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_dialog_id::DialogId;
    ///
    /// assert!(DialogId::new(123456).is_valid());
    /// assert!(!DialogId::new(0).is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Returns the dialog type.
    ///
    /// Determines the type of dialog based on the ID value range:
    /// - Positive: User
    /// - Channel ID range: Channel
    /// - Secret chat ID range: SecretChat
    /// - Other negative: Chat (typically -chat_id)
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustgram_dialog_id::{DialogId, DialogType};
    ///
    /// assert_eq!(DialogId::new(123456).get_type(), DialogType::User);
    /// ```
    #[must_use]
    pub fn get_type(self) -> DialogType {
        if self.0 > 0 {
            DialogType::User
        } else if self.0 <= Self::ZERO_SECRET_CHAT_ID {
            DialogType::SecretChat
        } else if self.0 <= Self::ZERO_CHANNEL_ID {
            DialogType::Channel
        } else {
            // Negative but not in special ranges - treat as Chat
            DialogType::Chat
        }
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chat {}", self.0)
    }
}

impl Hash for DialogId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl From<i64> for DialogId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<DialogId> for i64 {
    fn from(id: DialogId) -> Self {
        id.0
    }
}

/// Hasher for DialogId.
///
/// Provides a hashing function for DialogId values, useful for
/// hash map keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogIdHash;

impl DialogIdHash {
    /// Creates a new DialogIdHash.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Hashes a DialogId value.
    #[must_use]
    pub fn hash(self, dialog_id: DialogId) -> u32 {
        // Simple hash using the lower 32 bits
        (dialog_id.0 as u32).wrapping_add((dialog_id.0 >> 32) as u32)
    }
}
