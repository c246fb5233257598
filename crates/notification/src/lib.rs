// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Notification record types for the notification aggregation engine.
//!
//! Two shapes are modeled: [`Notification`], an *accepted* notification
//! already committed to a group's visible history, and
//! [`PendingNotification`], one still awaiting its group's scheduled flush.
//!
//! # Example
//!
//! ```rust
//! use rustgram_notification::Notification;
//! use rustgram_notification_id::NotificationId;
//! use rustgram_notification_type::TextNotificationContent;
//! use std::sync::Arc;
//!
//! let notification = Notification::new(
//!     NotificationId::new(1),
//!     Arc::new(TextNotificationContent::new("hi", true)),
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use rustgram_dialog_id::DialogId;
use rustgram_notification_id::NotificationId;
use rustgram_notification_type::NotificationContent;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// A notification already committed to a group's visible history.
///
/// Based on TDLib's `Notification` class, reduced to the two fields the
/// engine cares about once a notification has been flushed: its identity
/// and its (possibly replaced, via the edit path) content.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    content: Arc<dyn NotificationContent>,
}

impl Notification {
    /// Creates a new accepted notification.
    pub fn new(id: NotificationId, content: Arc<dyn NotificationContent>) -> Self {
        Self { id, content }
    }

    /// Returns the notification ID.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the notification's content.
    pub fn content(&self) -> &Arc<dyn NotificationContent> {
        &self.content
    }

    /// Replaces this notification's content, as performed by the edit path.
    pub fn set_content(&mut self, content: Arc<dyn NotificationContent>) {
        self.content = content;
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Notification[id={}, {}]", self.id, self.content.describe())
    }
}

/// A notification queued in a group's pending FIFO, awaiting flush.
///
/// Based on TDLib's `Notification` as constructed before being moved into
/// a group's permanent history; carries the extra scheduling fields
/// (`date`, `settings_dialog_id`, `is_silent`) the flush engine needs to
/// compute delay and sub-batch partitioning.
#[derive(Debug, Clone)]
pub struct PendingNotification {
    id: NotificationId,
    content: Arc<dyn NotificationContent>,
    date: i32,
    settings_dialog_id: DialogId,
    is_silent: bool,
}

impl PendingNotification {
    /// Creates a new pending notification.
    pub fn new(
        id: NotificationId,
        content: Arc<dyn NotificationContent>,
        date: i32,
        settings_dialog_id: DialogId,
        is_silent: bool,
    ) -> Self {
        Self {
            id,
            content,
            date,
            settings_dialog_id,
            is_silent,
        }
    }

    /// Returns the notification ID.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the pending notification's content.
    pub fn content(&self) -> &Arc<dyn NotificationContent> {
        &self.content
    }

    /// Returns the notification's date (Unix timestamp, seconds).
    pub fn date(&self) -> i32 {
        self.date
    }

    /// Returns the dialog whose settings govern sound/silence for this item.
    pub fn settings_dialog_id(&self) -> DialogId {
        self.settings_dialog_id
    }

    /// Returns whether this item should be delivered silently.
    pub fn is_silent(&self) -> bool {
        self.is_silent
    }

    /// Replaces this pending item's content, as performed by the edit path
    /// when a matching notification is still queued for flush.
    pub fn set_content(&mut self, content: Arc<dyn NotificationContent>) {
        self.content = content;
    }

    /// The `(settings_dialog_id, is_silent)` pair used to partition a
    /// group's pending queue into sub-batches on flush.
    pub fn batch_key(&self) -> (DialogId, bool) {
        (self.settings_dialog_id, self.is_silent)
    }

    /// Consumes this pending item, turning it into an accepted
    /// [`Notification`] once it has been flushed into a group's history.
    pub fn into_notification(self) -> Notification {
        Notification::new(self.id, self.content)
    }
}

impl Display for PendingNotification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PendingNotification[id={}, date={}, settings_dialog={}, silent={}, {}]",
            self.id,
            self.date,
            self.settings_dialog_id,
            self.is_silent,
            self.content.describe()
        )
    }
}
