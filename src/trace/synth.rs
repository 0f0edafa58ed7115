use crate::config::{AnchorPolicy, TraceConfig};
use crate::log::LogRow;
use crate::source::TaskDefinition;
use crate::trace::category::{CATEGORIES, category_index};
use crate::trace::document::{InstantEvent, LIVE_LOG_MARKER, LiveLogPayload, TraceDocument};
use crate::trace::strings::StringTable;

use chrono::{DateTime, Utc};

/// Build the trace for one task from its parsed (and fixed-up) log rows.
///
/// Rows without a time cannot be placed on the timeline and are skipped.
/// Events keep row order; nothing is sorted.
pub fn build_trace(rows: &[LogRow], task: &TaskDefinition, config: &TraceConfig) -> TraceDocument {
    let anchor = anchor_time(rows, config.anchor);
    let start_time = anchor.map(epoch_ms).unwrap_or(0.0);

    let task_group_url = config.task_group_url(&task.task_group_id);
    let task_group_profile = config.task_group_profile_url(&task.task_group_id);

    let mut string_table = StringTable::new();
    let mut events = Vec::new();
    for row in rows {
        let Some(time) = row.time else {
            continue;
        };
        events.push(InstantEvent {
            start: epoch_ms(time) - start_time,
            category: category_index(&row.component),
            name: string_table.index_for(&row.component),
            data: LiveLogPayload {
                kind: LIVE_LOG_MARKER,
                name: LIVE_LOG_MARKER,
                message: row.message.clone(),
                hour: time.format("%H:%M:%S").to_string(),
                date: time.format("%Y-%m-%d").to_string(),
                task_group_url: task_group_url.clone(),
                task_group_profile: task_group_profile.clone(),
            },
        });
    }

    let before_anchor = events.iter().filter(|e| e.start < 0.0).count();
    if before_anchor > 0 {
        tracing::debug!(before_anchor, "events precede the trace anchor");
    }
    tracing::info!(
        rows = rows.len(),
        events = events.len(),
        strings = string_table.len(),
        "built trace"
    );

    TraceDocument {
        start_time,
        categories: CATEGORIES.to_vec(),
        string_table,
        events,
    }
}

fn anchor_time(rows: &[LogRow], policy: AnchorPolicy) -> Option<DateTime<Utc>> {
    let mut times = rows.iter().filter_map(|row| row.time);
    match policy {
        AnchorPolicy::First => times.next(),
        AnchorPolicy::Earliest => times.min(),
    }
}

fn epoch_ms(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}
