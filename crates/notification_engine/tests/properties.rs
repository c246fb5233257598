// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Property-based and round-trip tests for the quantified invariants.

use proptest::prelude::*;
use rustgram_dialog_id::DialogId;
use rustgram_notification_engine::context::{KvStore, TimerWheel};
use rustgram_notification_engine::update::NotificationUpdate;
use rustgram_notification_engine::{EngineContext, NotificationEngine};
use rustgram_notification_group_id::NotificationGroupId;
use rustgram_notification_id::NotificationId;
use rustgram_notification_testkit::{
    FakeAuthSession, FakeClock, FakeCloseFlag, FakeConfigSource, FakeKvStore, FakePresenceOracle, FakeTimerWheel,
    RecordingUpdateSink,
};
use rustgram_notification_type::{NotificationContent, TextNotificationContent};
use std::sync::Arc;

fn text(s: &str) -> Arc<dyn NotificationContent> {
    Arc::new(TextNotificationContent::new(s, true))
}

#[derive(Clone, Default)]
struct SharedTimerWheel(Arc<FakeTimerWheel>);

impl SharedTimerWheel {
    fn new() -> Self {
        Self(Arc::new(FakeTimerWheel::new()))
    }

    fn scheduled_at(&self, group_id: i64) -> Option<f64> {
        self.0.scheduled_at(group_id)
    }
}

impl TimerWheel for SharedTimerWheel {
    fn set_at(&self, group_id: i64, at: f64) {
        self.0.set_at(group_id, at);
    }
}

struct SharedKv(Arc<FakeKvStore>);

impl KvStore for SharedKv {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }
    fn set(&self, key: &str, value: String) {
        self.0.set(key, value);
    }
}

fn group_updates(updates: &[NotificationUpdate]) -> Vec<rustgram_notification_engine::update::GroupUpdate> {
    updates
        .iter()
        .filter_map(|u| match u {
            NotificationUpdate::Group(g) => Some(g.clone()),
            NotificationUpdate::Single(_) => None,
        })
        .collect()
}

fn offline_presence() -> rustgram_notification_engine::context::PresenceStatus {
    rustgram_notification_engine::context::PresenceStatus {
        is_online_local: true,
        is_online_remote: false,
        was_online_local: 0.0,
        was_online_remote: 0.0,
    }
}

/// Mirrors the partitioning rule described for the flush engine: maximal
/// contiguous runs sharing `(settings, silent)`, each capped at
/// `max_group_size` by dropping the oldest (front) items.
fn expected_runs_rendered_count(items: &[(i32, u8, bool)], max_group_size: usize) -> usize {
    let mut runs: Vec<Vec<(i32, u8, bool)>> = Vec::new();
    for &item in items {
        match runs.last_mut() {
            Some(run) if run.last().map(|(_, s, sl)| (*s, *sl)) == Some((item.1, item.2)) => run.push(item),
            _ => runs.push(vec![item]),
        }
    }
    runs.iter()
        .map(|run| run.len().min(max_group_size))
        .sum()
}

/// (P3, P4) A single flush round's reported `total_count` increases by
/// exactly the rendered-and-kept count, and the sum of
/// `added.len() - removed_ids.len()` across its sub-batches equals the
/// change in `min(shown, max_group_size)`.
#[test]
fn prop_flush_round_matches_total_count_and_diff_formula() {
    proptest!(ProptestConfig::with_cases(48), |(
        items in prop::collection::vec((900i32..1100, 0u8..3, any::<bool>()), 1..7),
        max_group_size in 1i32..6,
    )| {
        let config_source = FakeConfigSource::new();
        config_source.set("notification_group_size_max", max_group_size);

        let presence = FakePresenceOracle::new();
        presence.set(offline_presence());

        let updates = RecordingUpdateSink::new();
        let mut engine = NotificationEngine::new(EngineContext {
            auth: Box::new(FakeAuthSession::user()),
            config: Box::new(config_source),
            kv: Box::new(FakeKvStore::new()),
            presence: Box::new(presence),
            clock: Box::new(FakeClock::new(1000.0)),
            timer: Box::new(SharedTimerWheel::new()),
            sink: Box::new(updates.clone()),
            close_flag: Box::new(FakeCloseFlag::new()),
        });

        let group_id = NotificationGroupId::new(1);
        let dialog_id = DialogId::new(10);
        for (i, &(date, settings, silent)) in items.iter().enumerate() {
            let settings_dialog_id = DialogId::new(100 + i64::from(settings));
            engine.add_notification(
                group_id,
                dialog_id,
                date,
                settings_dialog_id,
                silent,
                NotificationId::new(i as i32 + 1),
                text("x"),
            );
        }
        engine.on_timer_fired(group_id);

        let recorded = updates.updates();
        let batches = group_updates(&recorded);
        let non_empty: Vec<_> = batches.iter().filter(|g| !g.added.is_empty()).collect();

        let rendered_kept = expected_runs_rendered_count(&items, max_group_size as usize);
        let diff: i32 = non_empty.iter().map(|g| g.added.len() as i32 - g.removed_ids.len() as i32).sum();
        let expected_shown_after = rendered_kept.min(max_group_size as usize) as i32;

        prop_assert_eq!(diff, expected_shown_after, "P3: visible-window delta must match the shown-count formula");

        if rendered_kept > 0 {
            let last_total_count = non_empty.last().expect("at least one batch when items render").total_count;
            prop_assert_eq!(last_total_count, rendered_kept as i32, "P4: total_count must advance by rendered-and-kept count");
        } else {
            prop_assert!(non_empty.is_empty(), "a run with zero kept items must emit nothing");
        }
    });
}

/// (P6) The absolute time scheduled on the timer wheel for a group always
/// equals the minimum `flush_at` among its still-pending items: a later
/// add never postpones an earlier flush, but an earlier one preempts it.
#[test]
fn scenario_timer_reflects_minimum_pending_flush_time() {
    let config_source = FakeConfigSource::new();
    config_source.set("notification_cloud_delay_ms", 2000);
    let presence = FakePresenceOracle::new();
    presence.set(rustgram_notification_engine::context::PresenceStatus {
        is_online_local: false,
        is_online_remote: true,
        was_online_local: 0.0,
        was_online_remote: 0.0,
    });
    let updates = RecordingUpdateSink::new();
    let timer = SharedTimerWheel::new();

    let mut engine = NotificationEngine::new(EngineContext {
        auth: Box::new(FakeAuthSession::user()),
        config: Box::new(config_source),
        kv: Box::new(FakeKvStore::new()),
        presence: Box::new(presence),
        clock: Box::new(FakeClock::new(1000.0)),
        timer: Box::new(timer.clone()),
        sink: Box::new(updates),
        close_flag: Box::new(FakeCloseFlag::new()),
    });

    let group_id = NotificationGroupId::new(1);
    let normal_dialog = DialogId::new(10);
    let secret_dialog = DialogId::new(DialogId::ZERO_SECRET_CHAT_ID);

    // Cloud delay applies: flush_at = 1000.0 + 2.0 = 1002.0.
    engine.add_notification(group_id, normal_dialog, 999, normal_dialog, false, NotificationId::new(1), text("a"));
    assert_eq!(timer.scheduled_at(group_id.get() as i64), Some(1002.0));

    // A secret-chat item is never delayed: flush_at = 1000.0 + 0.001, well
    // before the cloud-delayed one, so it preempts the schedule.
    engine.add_notification(group_id, secret_dialog, 1000, normal_dialog, false, NotificationId::new(2), text("b"));
    assert_eq!(timer.scheduled_at(group_id.get() as i64), Some(1000.001));

    // A third, later-flushing item must never postpone the earlier one.
    engine.add_notification(group_id, normal_dialog, 999, normal_dialog, false, NotificationId::new(3), text("c"));
    assert_eq!(timer.scheduled_at(group_id.get() as i64), Some(1000.001));
}

/// (P7) Restarting the engine against the same durable counter store
/// resumes allocation at `current + 1`.
#[test]
fn scenario_cold_start_resumes_counter() {
    let kv = Arc::new(FakeKvStore::new());

    let mut first = NotificationEngine::new(EngineContext {
        auth: Box::new(FakeAuthSession::user()),
        config: Box::new(FakeConfigSource::new()),
        kv: Box::new(SharedKv(kv.clone())),
        presence: Box::new(FakePresenceOracle::new()),
        clock: Box::new(FakeClock::new(1000.0)),
        timer: Box::new(SharedTimerWheel::new()),
        sink: Box::new(RecordingUpdateSink::new()),
        close_flag: Box::new(FakeCloseFlag::new()),
    });
    assert_eq!(first.next_notification_id(), NotificationId::new(1));
    drop(first);

    let mut second = NotificationEngine::new(EngineContext {
        auth: Box::new(FakeAuthSession::user()),
        config: Box::new(FakeConfigSource::new()),
        kv: Box::new(SharedKv(kv)),
        presence: Box::new(FakePresenceOracle::new()),
        clock: Box::new(FakeClock::new(2000.0)),
        timer: Box::new(SharedTimerWheel::new()),
        sink: Box::new(RecordingUpdateSink::new()),
        close_flag: Box::new(FakeCloseFlag::new()),
    });
    assert_eq!(second.next_notification_id(), NotificationId::new(2));
}

/// (P2) A single flush touches exactly one group: even with several
/// tracked groups, one timer fire never emits a nonempty-addition update
/// for more than the group it targets (the eviction seed pair on a window
/// change is the only other group a flush can touch, and it never adds).
#[test]
fn scenario_single_flush_touches_at_most_one_groups_additions() {
    let config_source = FakeConfigSource::new();
    config_source.set("notification_group_count_max", 2);
    let presence = FakePresenceOracle::new();
    presence.set(offline_presence());
    let updates = RecordingUpdateSink::new();

    let mut engine = NotificationEngine::new(EngineContext {
        auth: Box::new(FakeAuthSession::user()),
        config: Box::new(config_source),
        kv: Box::new(FakeKvStore::new()),
        presence: Box::new(presence),
        clock: Box::new(FakeClock::new(1000.0)),
        timer: Box::new(SharedTimerWheel::new()),
        sink: Box::new(updates.clone()),
        close_flag: Box::new(FakeCloseFlag::new()),
    });

    let a = NotificationGroupId::new(1);
    let b = NotificationGroupId::new(2);
    let da = DialogId::new(10);
    let db = DialogId::new(20);
    engine.add_notification(a, da, 1, da, false, NotificationId::new(1), text("a"));
    engine.add_notification(b, db, 2, db, false, NotificationId::new(2), text("b"));

    updates.clear();
    engine.on_timer_fired(a);
    let groups_touched: Vec<_> = group_updates(&updates.updates()).into_iter().filter(|g| !g.added.is_empty()).map(|g| g.group_id).collect();
    assert_eq!(groups_touched, vec![a]);

    updates.clear();
    engine.on_timer_fired(b);
    let groups_touched: Vec<_> = group_updates(&updates.updates()).into_iter().filter(|g| !g.added.is_empty()).map(|g| g.group_id).collect();
    assert_eq!(groups_touched, vec![b]);
}

/// (P5) Two distinct groups never collide in the store: each keeps
/// receiving its own updates, independently addressable by `group_id`,
/// after both have been reinserted under post-flush keys.
#[test]
fn scenario_distinct_groups_remain_independently_addressable() {
    let presence = FakePresenceOracle::new();
    presence.set(offline_presence());
    let updates = RecordingUpdateSink::new();

    let mut engine = NotificationEngine::new(EngineContext {
        auth: Box::new(FakeAuthSession::user()),
        config: Box::new(FakeConfigSource::new()),
        kv: Box::new(FakeKvStore::new()),
        presence: Box::new(presence),
        clock: Box::new(FakeClock::new(1000.0)),
        timer: Box::new(SharedTimerWheel::new()),
        sink: Box::new(updates.clone()),
        close_flag: Box::new(FakeCloseFlag::new()),
    });

    let a = NotificationGroupId::new(1);
    let b = NotificationGroupId::new(2);
    let da = DialogId::new(10);
    let db = DialogId::new(20);
    engine.add_notification(a, da, 5, da, false, NotificationId::new(1), text("a"));
    engine.add_notification(b, db, 7, db, false, NotificationId::new(2), text("b"));
    engine.on_timer_fired(a);
    engine.on_timer_fired(b);

    // Editing group B's notification must not touch group A's.
    updates.clear();
    engine.edit_notification(b, NotificationId::new(2), text("b-edited"));
    let recorded = updates.updates();
    assert_eq!(recorded.len(), 1);
    match &recorded[0] {
        NotificationUpdate::Single(s) => {
            assert_eq!(s.group_id, b);
            assert_eq!(s.notification_id, NotificationId::new(2));
        }
        other => panic!("unexpected update: {other:?}"),
    }
}

/// (P8) Editing a notification emits at most one update, and only when
/// the target is within the group's currently visible suffix.
#[test]
fn scenario_edit_emits_at_most_one_update_and_only_if_visible() {
    let config_source = FakeConfigSource::new();
    config_source.set("notification_group_size_max", 1);
    let presence = FakePresenceOracle::new();
    presence.set(offline_presence());
    let updates = RecordingUpdateSink::new();

    let mut engine = NotificationEngine::new(EngineContext {
        auth: Box::new(FakeAuthSession::user()),
        config: Box::new(config_source),
        kv: Box::new(FakeKvStore::new()),
        presence: Box::new(presence),
        clock: Box::new(FakeClock::new(1000.0)),
        timer: Box::new(SharedTimerWheel::new()),
        sink: Box::new(updates.clone()),
        close_flag: Box::new(FakeCloseFlag::new()),
    });

    let group_id = NotificationGroupId::new(1);
    let dialog_id = DialogId::new(10);
    engine.add_notification(group_id, dialog_id, 1, dialog_id, false, NotificationId::new(1), text("a"));
    engine.on_timer_fired(group_id);
    engine.add_notification(group_id, dialog_id, 2, dialog_id, false, NotificationId::new(2), text("b"));
    engine.on_timer_fired(group_id);
    updates.clear();

    // `max_group_size = 1`: only id 2 is in the visible suffix now.
    engine.edit_notification(group_id, NotificationId::new(2), text("b2"));
    assert_eq!(updates.updates().len(), 1);

    updates.clear();
    engine.edit_notification(group_id, NotificationId::new(1), text("a2"));
    assert!(updates.updates().is_empty(), "editing a non-visible notification must not emit an update");

    updates.clear();
    engine.edit_notification(group_id, NotificationId::new(999), text("nope"));
    assert!(updates.updates().is_empty(), "editing an unknown id must not emit an update");
}
