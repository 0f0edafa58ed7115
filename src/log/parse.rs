//! Tokenizer for the live-log line prefix.
//!
//! Grammar, tried at each `[` of the line until one succeeds:
//!   `[` component (`:` level)? ws* timestamp `]` ws* message
//! where component and level are runs of word characters (`A-Za-z0-9_`) and
//! timestamp is a run of `0-9 - : . T Z`.
//!
//! Example:
//! [taskcluster:warn 2024-05-20T14:40:11.353Z] retrying
//!
//! Every token is taken greedily and never backtracked, so a line is scanned
//! in linear time per `[`.

use crate::Result;
use crate::log::row::LogRow;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fs;

/// Parse a log file into rows, one per non-blank line.
///
/// Invalid UTF-8 (binary tool output) is replaced with U+FFFD rather than
/// failing the file.
pub fn parse_log_file(path: &str) -> Result<Vec<LogRow>> {
    let bytes = fs::read(path).with_context(|| format!("read log file {}", path))?;
    let text = String::from_utf8_lossy(&bytes);
    let rows = parse_log_text(&text);
    if rows.iter().all(|row| row.time.is_none()) {
        tracing::warn!(path = %path, rows = rows.len(), "log has no timestamped lines");
    }
    Ok(rows)
}

/// Blank (whitespace-only) lines produce no row; every other line produces
/// exactly one.
pub fn parse_log_text(text: &str) -> Vec<LogRow> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

pub fn parse_line(line: &str) -> LogRow {
    for (idx, _) in line.match_indices('[') {
        if let Some(row) = parse_prefixed(&line[idx + 1..]) {
            return row;
        }
    }
    LogRow::untagged(line)
}

/// `rest` starts right after a `[`.
fn parse_prefixed(rest: &str) -> Option<LogRow> {
    let (component, rest) = take_while(rest, is_word);
    if component.is_empty() {
        return None;
    }

    let (level, rest) = match rest.strip_prefix(':') {
        Some(after) => {
            let (level, after) = take_while(after, is_word);
            if level.is_empty() {
                return None;
            }
            (Some(level), after)
        }
        None => (None, rest),
    };

    let rest = rest.trim_start();
    let (stamp, rest) = take_while(rest, is_timestamp_char);
    if stamp.is_empty() {
        return None;
    }
    let rest = rest.strip_prefix(']')?;
    let time = parse_timestamp(stamp)?;

    Some(LogRow {
        component: component.to_string(),
        level: level.map(str::to_string),
        time: Some(time),
        message: rest.trim_start().to_string(),
    })
}

fn take_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_timestamp_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | ':' | '.' | 'T' | 'Z')
}

/// Accepts RFC 3339 with `Z`, a date-time without zone (read as UTC) and a
/// bare date (UTC midnight). Anything else does not denote an instant.
fn parse_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = stamp.strip_suffix('Z').unwrap_or(stamp);
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}
