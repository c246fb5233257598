// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! The notification aggregation and dispatch engine.

use crate::allocator::IdAllocator;
use crate::config::ConfigMirror;
use crate::context::{AuthSession, Clock, CloseFlag, ConfigSource, KvStore, PresenceOracle, TimerWheel, UpdateSink};
use crate::delay::delay_ms;
use crate::error::{NotificationEngineError, Result};
use crate::group::Group;
use crate::update::{GroupUpdate, NotificationUpdate, SingleUpdate};
use rustgram_dialog_id::DialogId;
use rustgram_notification::{Notification, PendingNotification};
use rustgram_notification_group_id::NotificationGroupId;
use rustgram_notification_group_key::NotificationGroupKey;
use rustgram_notification_id::NotificationId;
use rustgram_notification_type::NotificationContent;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const NOTIFICATION_ID_KEY: &str = "notification_id_current";
const NOTIFICATION_GROUP_ID_KEY: &str = "notification_group_id_current";

/// The notification aggregation and dispatch engine.
///
/// Owned exclusively by a single actor-like unit: every public method
/// takes `&mut self` and runs to completion without suspending, per the
/// single-threaded cooperative model this crate targets. Unlike a
/// TDLib-style manager shared across threads via `Arc<RwLock<_>>`, this
/// type holds its state directly and is not `Clone`/`Sync` — a caller that
/// needs shared access is expected to wrap it in its own actor mailbox.
pub struct NotificationEngine {
    auth: Box<dyn AuthSession>,
    kv: Box<dyn KvStore>,
    presence: Box<dyn PresenceOracle>,
    clock: Box<dyn Clock>,
    timer: Box<dyn TimerWheel>,
    sink: Box<dyn UpdateSink>,
    close_flag: Box<dyn CloseFlag>,

    config: ConfigMirror,
    notification_id_allocator: IdAllocator,
    group_id_allocator: IdAllocator,

    groups: BTreeMap<NotificationGroupKey, Group>,
    group_index: HashMap<NotificationGroupId, NotificationGroupKey>,
}

/// The full set of external collaborators a [`NotificationEngine`] needs.
pub struct EngineContext {
    /// Read-only bot/session predicate.
    pub auth: Box<dyn AuthSession>,
    /// Shared configuration registry.
    pub config: Box<dyn ConfigSource>,
    /// Durable key-value store for the id counters.
    pub kv: Box<dyn KvStore>,
    /// Multi-device presence oracle.
    pub presence: Box<dyn PresenceOracle>,
    /// Clock source.
    pub clock: Box<dyn Clock>,
    /// Per-group one-shot timer wheel.
    pub timer: Box<dyn TimerWheel>,
    /// Outbound update sink.
    pub sink: Box<dyn UpdateSink>,
    /// Process shutdown flag.
    pub close_flag: Box<dyn CloseFlag>,
}

impl NotificationEngine {
    /// Constructs a new engine, loading the durable counters and the
    /// initial config mirror.
    pub fn new(context: EngineContext) -> Self {
        let notification_id_allocator = IdAllocator::load(context.kv.as_ref(), NOTIFICATION_ID_KEY);
        let group_id_allocator = IdAllocator::load(context.kv.as_ref(), NOTIFICATION_GROUP_ID_KEY);
        let config = ConfigMirror::load(context.config.as_ref());
        Self {
            auth: context.auth,
            kv: context.kv,
            presence: context.presence,
            clock: context.clock,
            timer: context.timer,
            sink: context.sink,
            close_flag: context.close_flag,
            config,
            notification_id_allocator,
            group_id_allocator,
            groups: BTreeMap::new(),
            group_index: HashMap::new(),
        }
    }

    /// Re-reads the config mirror. Call on every config-change callback.
    pub fn on_config_changed(&mut self, source: &dyn ConfigSource) {
        self.config = ConfigMirror::load(source);
    }

    /// Allocates the next notification id.
    ///
    /// Returns the sentinel (invalid) id for bot sessions without
    /// consuming a counter value.
    pub fn next_notification_id(&mut self) -> NotificationId {
        if self.auth.is_bot() {
            return NotificationId::new(0);
        }
        NotificationId::new(self.notification_id_allocator.next(self.kv.as_ref()))
    }

    /// Allocates the next notification group id.
    ///
    /// Returns the sentinel (invalid) id for bot sessions without
    /// consuming a counter value.
    pub fn next_notification_group_id(&mut self) -> NotificationGroupId {
        if self.auth.is_bot() {
            return NotificationGroupId::new(0);
        }
        NotificationGroupId::new(self.group_id_allocator.next(self.kv.as_ref()))
    }

    fn key_for_group(&self, group_id: NotificationGroupId, dialog_id: DialogId) -> NotificationGroupKey {
        self.group_index
            .get(&group_id)
            .cloned()
            .unwrap_or_else(|| NotificationGroupKey::new(group_id, dialog_id, 0))
    }

    /// Queues a new notification for its group's next flush.
    ///
    /// All ids must be valid and the group id must either be fresh or
    /// already tracked by this engine; violating that contract is a logic
    /// error in the caller, not a user-reachable failure, so it is
    /// asserted rather than returned as a `Result`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_notification(
        &mut self,
        group_id: NotificationGroupId,
        dialog_id: DialogId,
        date: i32,
        settings_dialog_id: DialogId,
        is_silent: bool,
        notification_id: NotificationId,
        content: Arc<dyn NotificationContent>,
    ) {
        if self.auth.is_bot() {
            return;
        }
        debug_assert!(group_id.is_valid(), "add_notification: invalid group_id");
        debug_assert!(notification_id.is_valid(), "add_notification: invalid notification_id");

        let key = self.key_for_group(group_id, dialog_id);
        let mut group = self.groups.remove(&key).unwrap_or_default();

        let presence = self.presence.get_my_status();
        let server_time_now = self.clock.server_time_cached();
        let delay = delay_ms(
            dialog_id.get_type(),
            content.can_be_delayed(),
            presence,
            server_time_now,
            date,
            &self.config,
        );
        let flush_at = self.clock.monotonic_now() + f64::from(delay) / 1000.0;

        if group.pending_flush_time == 0.0 || flush_at < group.pending_flush_time {
            group.pending_flush_time = flush_at;
            self.timer.set_at(group_id.get() as i64, flush_at);
        }

        group
            .pending_notifications
            .push_back(PendingNotification::new(notification_id, content, date, settings_dialog_id, is_silent));

        debug!(group_id = group_id.get(), notification_id = notification_id.get(), delay, "notification queued");

        self.group_index.insert(group_id, key.clone());
        self.groups.insert(key, group);
    }

    fn boundary_key(&self) -> NotificationGroupKey {
        self.groups
            .keys()
            .nth(self.config.max_group_count.max(0) as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// Called when the timer wheel fires for `group_id`. No-op if the
    /// process is closing or the group is no longer tracked (it may have
    /// been removed between scheduling and firing).
    pub fn on_timer_fired(&mut self, group_id: NotificationGroupId) {
        if self.close_flag.is_closing() {
            return;
        }
        self.flush_group(group_id);
    }

    fn flush_group(&mut self, group_id: NotificationGroupId) {
        let Some(key) = self.group_index.get(&group_id).cloned() else {
            warn!(group_id = group_id.get(), "flush fired for unknown group");
            debug_assert!(false, "flush_group: unknown group_id");
            return;
        };

        // The boundary before this flush, with this group still occupying
        // its old slot, tells us whether it was already visible.
        let boundary_before = self.boundary_key();
        let was_visible = key.last_notification_date != 0 && key < boundary_before;

        let Some(mut group) = self.groups.remove(&key) else {
            debug_assert!(false, "flush_group: group_index and groups disagree");
            return;
        };

        let max_pending_date = match group.pending_notifications.iter().map(PendingNotification::date).max() {
            Some(date) => date,
            None => {
                debug_assert!(false, "flush_group: pending_notifications must be non-empty on the flush path");
                group.pending_flush_time = 0.0;
                self.group_index.insert(group_id, key.clone());
                self.groups.insert(key, group);
                return;
            }
        };

        let mut new_key = key.clone();
        new_key.last_notification_date = key.last_notification_date.max(max_pending_date);

        // Reinsert under the new key (with stale contents, swapped for the
        // real ones at the end) so the boundary computed from here on
        // reflects this group's post-flush position among all others.
        self.groups.insert(new_key.clone(), Group::default());
        let boundary_after = self.boundary_key();
        self.groups.remove(&new_key);

        let is_visible = new_key < boundary_after;
        let evicts_other = is_visible && !was_visible && boundary_after.last_notification_date != 0;

        if !is_visible {
            debug_assert!(!was_visible, "flush_group: group left the window without prior visibility");
            for pending in group.pending_notifications.drain(..) {
                group.notifications.push(pending.into_notification());
            }
        } else {
            if !was_visible {
                if evicts_other {
                    self.emit_remove_group_update(&boundary_after);
                }
                self.emit_add_group_update(&key, &group);
            }
            self.flush_sub_batches(&key, &mut group);
        }

        group.pending_flush_time = 0.0;

        let max_retained = (self.config.keep_size + crate::config::EXTRA_GROUP_SIZE) as usize;
        if group.notifications.len() > max_retained {
            let drop_count = group.notifications.len() - self.config.keep_size.max(0) as usize;
            group.notifications.drain(0..drop_count);
        }

        info!(
            group_id = group_id.get(),
            kept = group.notifications.len(),
            "group flushed"
        );

        self.group_index.insert(group_id, new_key.clone());
        self.groups.insert(new_key, group);
    }

    fn flush_sub_batches(&mut self, key: &NotificationGroupKey, group: &mut Group) {
        let max_group_size = self.config.max_group_size.max(0) as usize;
        let runs = partition_runs(group.pending_notifications.drain(..).collect());

        for run in runs {
            let Some((batch_settings_dialog_id, batch_is_silent)) = run.first().map(PendingNotification::batch_key) else {
                continue;
            };

            let mut rendered: Vec<(NotificationId, Arc<dyn NotificationContent>, rustgram_notification_type::RenderedContent)> = run
                .into_iter()
                .filter_map(|p| {
                    let content = p.content().clone();
                    content.render(key.dialog_id).map(|r| (p.id(), content, r))
                })
                .collect();

            if rendered.len() > max_group_size {
                let drop_count = rendered.len() - max_group_size;
                rendered.drain(0..drop_count);
            }

            if rendered.is_empty() {
                continue;
            }

            let shown_before = group.notifications.len().min(max_group_size);
            let added_count = rendered.len();

            let removed_ids = if shown_before + added_count > max_group_size {
                let evict_count = shown_before + added_count - max_group_size;
                let suffix = group.visible_suffix(max_group_size);
                suffix.iter().take(evict_count).map(Notification::id).collect()
            } else {
                Vec::new()
            };

            group.total_count += added_count as i32;

            self.sink.send(NotificationUpdate::Group(GroupUpdate {
                group_id: key.group_id,
                dialog_id: key.dialog_id,
                settings_dialog_id: batch_settings_dialog_id,
                is_silent: batch_is_silent,
                total_count: group.total_count,
                added: rendered
                    .iter()
                    .map(|(id, _, rendered)| (*id, rendered.clone()))
                    .collect(),
                removed_ids,
            }));

            for (id, content, _) in rendered {
                group.notifications.push(Notification::new(id, content));
            }
        }
    }

    fn emit_remove_group_update(&self, evicted_key: &NotificationGroupKey) {
        let max_group_size = self.config.max_group_size.max(0) as usize;
        let Some(evicted_group) = self.groups.get(evicted_key) else {
            debug_assert!(false, "emit_remove_group_update: evicted key not present");
            return;
        };
        let removed_ids = evicted_group
            .visible_suffix(max_group_size)
            .iter()
            .map(Notification::id)
            .collect();
        self.sink.send(NotificationUpdate::Group(GroupUpdate {
            group_id: evicted_key.group_id,
            dialog_id: evicted_key.dialog_id,
            settings_dialog_id: evicted_key.dialog_id,
            is_silent: true,
            total_count: 0,
            added: Vec::new(),
            removed_ids,
        }));
    }

    fn emit_add_group_update(&self, key: &NotificationGroupKey, group: &Group) {
        let max_group_size = self.config.max_group_size.max(0) as usize;
        let added = group
            .visible_suffix(max_group_size)
            .iter()
            .filter_map(|n| n.content().render(key.dialog_id).map(|r| (n.id(), r)))
            .collect();
        self.sink.send(NotificationUpdate::Group(GroupUpdate {
            group_id: key.group_id,
            dialog_id: key.dialog_id,
            settings_dialog_id: DialogId::default(),
            is_silent: true,
            total_count: 0,
            added,
            removed_ids: Vec::new(),
        }));
    }

    /// Replaces a notification's content in place.
    ///
    /// Emits a single-notification update only if the match is within the
    /// group's currently visible suffix. Continues scanning the pending
    /// FIFO regardless, in case a stale visible copy and a freshly queued
    /// pending copy share an id. No error if the group or notification is
    /// unknown.
    pub fn edit_notification(
        &mut self,
        group_id: NotificationGroupId,
        notification_id: NotificationId,
        content: Arc<dyn NotificationContent>,
    ) {
        let Some(key) = self.group_index.get(&group_id).cloned() else {
            return;
        };
        let Some(group) = self.groups.get_mut(&key) else {
            return;
        };
        let max_group_size = self.config.max_group_size.max(0) as usize;
        let len = group.notifications.len();
        let visible_start = len.saturating_sub(max_group_size);

        if let Some(idx) = group.notifications.iter().position(|n| n.id() == notification_id) {
            group.notifications[idx].set_content(content.clone());
            if idx >= visible_start {
                if let Some(rendered) = content.render(key.dialog_id) {
                    self.sink.send(NotificationUpdate::Single(SingleUpdate {
                        group_id,
                        notification_id,
                        rendered,
                    }));
                }
            }
        }

        for pending in group.pending_notifications.iter_mut() {
            if pending.id() == notification_id {
                pending.set_content(content.clone());
            }
        }
    }

    /// Removes a single notification.
    ///
    /// Bot sessions are a no-op success. An invalid id with no matching
    /// notification anywhere is a 400-class error; a valid-but-absent id
    /// is an idempotent success.
    pub fn remove_notification(&mut self, group_id: NotificationGroupId, notification_id: NotificationId) -> Result<()> {
        if self.auth.is_bot() {
            return Ok(());
        }
        let Some(key) = self.group_index.get(&group_id).cloned() else {
            return absent_id_result(notification_id);
        };
        let Some(group) = self.groups.get_mut(&key) else {
            return absent_id_result(notification_id);
        };

        let max_group_size = self.config.max_group_size.max(0) as usize;
        let len = group.notifications.len();
        let visible_start = len.saturating_sub(max_group_size);

        if let Some(idx) = group.notifications.iter().position(|n| n.id() == notification_id) {
            let was_visible = idx >= visible_start;
            group.notifications.remove(idx);
            if was_visible {
                group.total_count -= 1;
                self.sink.send(NotificationUpdate::Group(GroupUpdate {
                    group_id,
                    dialog_id: key.dialog_id,
                    settings_dialog_id: key.dialog_id,
                    is_silent: true,
                    total_count: group.total_count,
                    added: Vec::new(),
                    removed_ids: vec![notification_id],
                }));
            }
            return Ok(());
        }

        if let Some(pos) = group.pending_notifications.iter().position(|p| p.id() == notification_id) {
            group.pending_notifications.remove(pos);
            return Ok(());
        }

        absent_id_result(notification_id)
    }

    /// Removes every notification in `group_id` with id `<= max_notification_id`
    /// (a `max_notification_id` of `0` removes all of them), emitting at
    /// most one consolidated update for the previously-visible ids removed.
    pub fn remove_notification_group(
        &mut self,
        group_id: NotificationGroupId,
        max_notification_id: NotificationId,
    ) -> Result<()> {
        if self.auth.is_bot() {
            return Ok(());
        }
        let Some(key) = self.group_index.get(&group_id).cloned() else {
            return Ok(());
        };
        let Some(group) = self.groups.get_mut(&key) else {
            return Ok(());
        };

        let max_group_size = self.config.max_group_size.max(0) as usize;
        let threshold = max_notification_id.get();
        let matches = |id: NotificationId| threshold == 0 || id.get() <= threshold;

        let len = group.notifications.len();
        let visible_start = len.saturating_sub(max_group_size);

        let mut removed_ids = Vec::new();
        let mut idx = 0;
        let mut kept = Vec::with_capacity(group.notifications.len());
        for n in group.notifications.drain(..) {
            if matches(n.id()) {
                if idx >= visible_start {
                    removed_ids.push(n.id());
                }
            } else {
                kept.push(n);
            }
            idx += 1;
        }
        group.notifications = kept;
        group.pending_notifications.retain(|p| !matches(p.id()));

        if !removed_ids.is_empty() {
            group.total_count -= removed_ids.len() as i32;
            self.sink.send(NotificationUpdate::Group(GroupUpdate {
                group_id,
                dialog_id: key.dialog_id,
                settings_dialog_id: key.dialog_id,
                is_silent: true,
                total_count: group.total_count,
                added: Vec::new(),
                removed_ids,
            }));
        }

        Ok(())
    }
}

fn absent_id_result(notification_id: NotificationId) -> Result<()> {
    if notification_id.is_valid() {
        Ok(())
    } else {
        Err(NotificationEngineError::InvalidId("notification_id"))
    }
}

/// Splits a FIFO of pending notifications into maximal contiguous runs
/// sharing the same `(settings_dialog_id, is_silent)` pair.
fn partition_runs(pending: Vec<PendingNotification>) -> Vec<Vec<PendingNotification>> {
    let mut runs: Vec<Vec<PendingNotification>> = Vec::new();
    for item in pending {
        match runs.last_mut() {
            Some(run) if run.last().map(PendingNotification::batch_key) == Some(item.batch_key()) => {
                run.push(item);
            }
            _ => runs.push(vec![item]),
        }
    }
    runs
}
