// Helper functions for size labels

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Accepts "700MB", "1.5 GB", "4GiB", "12 tb"
    static ref SIZE_RE: Regex =
        Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*(B|KB|MB|GB|TB|KiB|MiB|GiB|TiB)\s*$")
            .expect("size regex is valid");
}

/// Parse a human size label into bytes (1024-based multipliers).
/// Returns None for anything unparseable.
pub fn parse_size(label: &str) -> Option<u64> {
    let caps = SIZE_RE.captures(label)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;

    let multiplier: u64 = match caps.get(2)?.as_str().to_uppercase().as_str() {
        "B" => 1,
        "KB" | "KIB" => 1024,
        "MB" | "MIB" => 1024 * 1024,
        "GB" | "GIB" => 1024 * 1024 * 1024,
        "TB" | "TIB" => 1024u64.pow(4),
        _ => return None,
    };

    Some((value * multiplier as f64) as u64)
}

/// Format a byte count for display
pub fn format_size(bytes: u64) -> String {
    let mb = bytes as f64 / 1_048_576.0;
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{:.0} MB", mb)
    }
}
