//! Human-readable byte counts, durations, and counters.
//!
//! All internal sizes are integer bytes. Floating point is only used
//! at the display-formatting boundary.

/// Binary unit labels above bytes.
const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

/// Format a byte count using binary units (KiB = 1024).
///
/// - Below 1024 the raw count is shown (`"512 B"`).
/// - Four-digit values show no decimal (`"1023 KiB"`).
/// - Otherwise one decimal is shown only when it is at least 0.1
///   (`"1.2 MiB"`, but `"1 GiB"` for 1.05 GiB).
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0usize;
    value /= 1024.0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let whole = value.floor();
    if whole >= 1000.0 || value - whole < 0.1 {
        format!("{} {}", whole as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Format a duration in seconds as `h:mm:ss` or `m:ss`.
pub fn format_duration(duration: std::time::Duration) -> String {
    let total = duration.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
