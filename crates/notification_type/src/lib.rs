// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Polymorphic notification content for the notification aggregation engine.
//!
//! A notification's content is not a fixed set of variants: different
//! producers (new message, new call, push payload, ...) know how to turn
//! themselves into wire-level content, and whether they are allowed to sit
//! in a delayed batch. This crate models that as a small capability-set
//! trait rather than an enum, so new content kinds can be added without
//! touching the engine.
//!
//! # Example
//!
//! ```rust
//! use rustgram_notification_type::{NotificationContent, TextNotificationContent};
//! use rustgram_dialog_id::DialogId;
//!
//! let content = TextNotificationContent::new("hello", true);
//! assert!(content.can_be_delayed());
//! assert!(content.render(DialogId::new(1)).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use rustgram_dialog_id::DialogId;
use std::fmt::Debug;

/// The wire-level payload produced by rendering a [`NotificationContent`].
///
/// This is the unit carried in `added_notifications` on an emitted update.
/// The exact shape is opaque to the engine beyond `text`, which is used for
/// logging and equality in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    /// Human-readable text of the rendered notification.
    pub text: String,
}

impl RenderedContent {
    /// Creates a new rendered content payload.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Capability set implemented by every kind of notification content.
///
/// Mirrors TDLib's polymorphic `NotificationType` base class, reduced to the
/// two operations the engine actually calls plus a printable form for logs.
/// Implementors are stored behind `Arc<dyn NotificationContent>` so a
/// `Notification`/`PendingNotification` can stay `Clone` without cloning the
/// content itself.
pub trait NotificationContent: Debug + Send + Sync {
    /// Whether this notification is allowed to sit in a delayed batch.
    ///
    /// Some content (e.g. a secret chat reveal) must never be delayed
    /// regardless of presence state; those implementations return `false`.
    fn can_be_delayed(&self) -> bool;

    /// Renders this content for display in `dialog_id`.
    ///
    /// Returns `None` if the notification is currently unrenderable (e.g.
    /// the underlying message was deleted before the flush fired). A `None`
    /// render is excluded from both the emitted batch and the group's
    /// `total_count` — it never reaches the UI and is never counted.
    fn render(&self, dialog_id: DialogId) -> Option<RenderedContent>;

    /// Short printable description of this content, for logging only.
    fn describe(&self) -> String;
}

/// A plain text notification content, used directly by simple producers and
/// as the content type exercised by the engine's own tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNotificationContent {
    text: String,
    delayable: bool,
}

impl TextNotificationContent {
    /// Creates new text content with the given delayability.
    pub fn new(text: impl Into<String>, delayable: bool) -> Self {
        Self {
            text: text.into(),
            delayable,
        }
    }
}

impl NotificationContent for TextNotificationContent {
    fn can_be_delayed(&self) -> bool {
        self.delayable
    }

    fn render(&self, _dialog_id: DialogId) -> Option<RenderedContent> {
        Some(RenderedContent::new(self.text.clone()))
    }

    fn describe(&self) -> String {
        format!("text({})", self.text)
    }
}

/// Content that always fails to render, used to exercise the render-null
/// drop path deliberately (deleted messages, expired media, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrenderableNotificationContent {
    delayable: bool,
}

impl UnrenderableNotificationContent {
    /// Creates new unrenderable content with the given delayability.
    pub fn new(delayable: bool) -> Self {
        Self { delayable }
    }
}

impl NotificationContent for UnrenderableNotificationContent {
    fn can_be_delayed(&self) -> bool {
        self.delayable
    }

    fn render(&self, _dialog_id: DialogId) -> Option<RenderedContent> {
        None
    }

    fn describe(&self) -> String {
        "unrenderable".to_string()
    }
}
