// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Per-dialog notification group state.

use rustgram_notification::{Notification, PendingNotification};
use std::collections::VecDeque;

/// State held for one notification group.
///
/// Groups are looked up by [`rustgram_notification_group_key::NotificationGroupKey`]
/// in the engine's ordered store; this type holds everything that doesn't
/// participate in that ordering.
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// Accepted notifications, oldest first. Never exceeds
    /// `keep_size + EXTRA_GROUP_SIZE` after a flush trim.
    pub notifications: Vec<Notification>,
    /// Running count of notifications ever rendered-and-kept into this
    /// group and still deemed unseen by the UI.
    pub total_count: i32,
    /// Notifications queued for the next flush, in arrival order.
    pub pending_notifications: VecDeque<PendingNotification>,
    /// Absolute monotonic time the next flush is scheduled for, or `0.0`
    /// if none is scheduled.
    pub pending_flush_time: f64,
}

impl Group {
    /// The last `min(notifications.len(), max_group_size)` notifications,
    /// i.e. the suffix the UI currently renders.
    pub fn visible_suffix(&self, max_group_size: usize) -> &[Notification] {
        let start = self.notifications.len().saturating_sub(max_group_size);
        &self.notifications[start..]
    }
}
