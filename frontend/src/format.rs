//! Human-readable byte sizes.

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const STEP: u64 = 1024;

/// Format a byte count with 1024-based units and one decimal place.
///
/// Trailing `.0` is dropped, so `1024` renders as `1 KB` and
/// `1536` as `1.5 KB`. Sizes past the last unit stay in TB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes / divisor >= STEP {
        divisor *= STEP;
        unit += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 10.0).round() / 10.0;
    format!("{} {}", rounded, UNITS[unit])
}
