use crate::log::row::LogRow;

/// Strip secondary date-times some tools print after the log prefix.
///
/// "[2024-05-20 15:04:26] Ep. 1 : Up. 12 : Sen. 24,225" -> "Ep. 1 : Up. 12 : Sen. 24,225"
pub fn fixup_log_rows(rows: &mut [LogRow]) {
    for row in rows.iter_mut() {
        if let Some(stripped) = strip_leading_datetime(&row.message) {
            row.message = stripped.to_string();
        }
    }
}

/// Some(rest) when `message` opens with a bracketed date-time.
pub fn strip_leading_datetime(message: &str) -> Option<&str> {
    let rest = message.trim_start().strip_prefix('[')?;
    let close = rest.find(']')?;
    let inner = &rest[..close];
    let looks_like_datetime = inner.chars().any(|c| c.is_ascii_digit())
        && inner
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | '.' | 'T' | 'Z' | ' '));
    looks_like_datetime.then(|| rest[close + 1..].trim_start())
}
