// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Structured update objects emitted by the engine to the UI sink.

use rustgram_dialog_id::DialogId;
use rustgram_notification_group_id::NotificationGroupId;
use rustgram_notification_id::NotificationId;
use rustgram_notification_type::RenderedContent;

/// Coalesced notification-group update.
///
/// Mirrors TDLib's `updateNotificationGroup`: a batch of additions and
/// removals for a single group, plus the group's running `total_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUpdate {
    /// Group the update applies to.
    pub group_id: NotificationGroupId,
    /// Dialog the group belongs to.
    pub dialog_id: DialogId,
    /// Dialog whose notification settings govern sound/silence.
    pub settings_dialog_id: DialogId,
    /// Whether this update should be delivered silently.
    pub is_silent: bool,
    /// The group's running total count after this update.
    pub total_count: i32,
    /// Notifications added by this update, in order.
    pub added: Vec<(NotificationId, RenderedContent)>,
    /// Notification ids withdrawn from the visible suffix by this update.
    pub removed_ids: Vec<NotificationId>,
}

/// Single-notification update, used by the edit path.
///
/// Mirrors TDLib's `updateNotification`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleUpdate {
    /// Group the notification belongs to.
    pub group_id: NotificationGroupId,
    /// The edited notification's id.
    pub notification_id: NotificationId,
    /// The notification's freshly rendered content.
    pub rendered: RenderedContent,
}

/// An update emitted to the downstream UI sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationUpdate {
    /// A group-level batch of additions/removals.
    Group(GroupUpdate),
    /// A single edited notification.
    Single(SingleUpdate),
}
