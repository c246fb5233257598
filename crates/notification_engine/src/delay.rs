// Copyright (c) 2024 rustgram-client contributors
//
// Licensed under MIT OR Apache-2.0

//! Pure delay-policy function.

use crate::config::{ConfigMirror, MIN_NOTIFICATION_DELAY_MS};
use crate::context::PresenceStatus;
use rustgram_dialog_id::DialogType;

/// Computes the delay, in milliseconds, a pending notification should sit
/// before its group's next flush.
///
/// A pure function of the dialog's type, whether the content can be
/// delayed at all, the current presence snapshot, server time, the
/// notification's own timestamp, and the config mirror's tunables.
#[allow(clippy::too_many_arguments)]
pub fn delay_ms(
    dialog_type: DialogType,
    can_be_delayed: bool,
    presence: PresenceStatus,
    server_time_now: f64,
    notification_date: i32,
    config: &ConfigMirror,
) -> i32 {
    let base = if dialog_type == DialogType::SecretChat {
        0
    } else if !can_be_delayed {
        0
    } else {
        let online_cloud_timeout_s = config.online_cloud_timeout_ms as f64 / 1000.0;
        if !presence.is_online_local && presence.is_online_remote {
            config.notification_cloud_delay_ms
        } else if !presence.is_online_local
            && presence.was_online_remote
                > presence
                    .was_online_local
                    .max(server_time_now - online_cloud_timeout_s)
        {
            config.notification_cloud_delay_ms
        } else if presence.is_online_remote {
            config.notification_default_delay_ms
        } else {
            0
        }
    };

    let passed_ms = (0.0_f64)
        .max((server_time_now - notification_date as f64 - 1.0) * 1000.0)
        .round() as i64;

    (base as i64 - passed_ms).max(MIN_NOTIFICATION_DELAY_MS as i64) as i32
}
