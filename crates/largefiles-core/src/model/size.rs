/// Size and count formatting for reports and progress logs.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// Format a byte count as MiB with two decimals, without the unit.
///
/// This is the number printed next to each reported file.
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / crate::config::MIB as f64)
}

/// Format a threshold for headings: whole MiB print without decimals.
pub fn format_threshold(bytes: u64) -> String {
    use crate::config::MIB;
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        format_mib(bytes)
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
