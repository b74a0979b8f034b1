//! Prometheus-style duration parsing for group intervals.

use std::time::Duration;

/// Parse a Prometheus duration string into a [`Duration`].
///
/// Supports components: `Xy`, `Xw`, `Xd`, `Xh`, `Xm`, `Xs`, `Xms`.
/// Components can be combined: "1h30m", "2d12h", "1m30s500ms".
/// Returns `None` if the string is empty, unparseable, or totals zero.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let mut total_ms: u64 = 0;
    let mut num_buf = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            num_buf.push(ch);
            continue;
        }

        // A unit must follow a number.
        let n: u64 = num_buf.parse().ok()?;
        num_buf.clear();

        let unit_ms: u64 = match ch {
            'y' => 365 * 86_400_000,
            'w' => 7 * 86_400_000,
            'd' => 86_400_000,
            'h' => 3_600_000,
            'm' if chars.peek() == Some(&'s') => {
                chars.next();
                1
            }
            'm' => 60_000,
            's' => 1_000,
            _ => return None,
        };
        total_ms = total_ms.checked_add(n.checked_mul(unit_ms)?)?;
    }

    // Bare trailing digits ("30m15") are ambiguous.
    if !num_buf.is_empty() {
        return None;
    }

    if total_ms == 0 {
        return None;
    }

    Some(Duration::from_millis(total_ms))
}

/// Whether `s` is usable as a rule group evaluation interval.
pub fn is_valid_interval(s: &str) -> bool {
    parse_duration(s).is_some()
}
