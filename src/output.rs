//! CLI output formatting.
//!
//! Each line type has a `format_*` function (pure, returns a `String`) for
//! testability and a `print_*` wrapper that writes to stdout or stderr.
//!
//! ```text
//! photo.png: 1.24 MiB -> 0.36 MiB (29%)
//! broken.png: failed (PNG decode failed)
//! ```

/// Human byte size: `512 B`, `3.4 KiB`, `1.24 MiB`.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.2} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// One successful compression: name, before/after sizes, output percentage.
pub fn format_result(name: &str, before: u64, after: u64) -> String {
    let pct = if before == 0 {
        100
    } else {
        (after * 100 + before / 2) / before
    };
    format!(
        "{name}: {} -> {} ({pct}%)",
        format_size(before),
        format_size(after)
    )
}

/// One failed compression.
pub fn format_failure(name: &str, reason: &str) -> String {
    format!("{name}: failed ({reason})")
}

pub fn print_result(name: &str, before: u64, after: u64) {
    println!("{}", format_result(name, before, after));
}

pub fn print_failure(name: &str, reason: &str) {
    eprintln!("{}", format_failure(name, reason));
}
