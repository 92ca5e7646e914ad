//! Terminal output helpers for the CLI.

/// Width of message box separators.
const BOX_WIDTH: usize = 60;

/// Print a titled message box to stderr.
///
/// ```text
/// ============================================================
/// No Records
/// ============================================================
///
/// <detail>
/// ```
pub fn print_message_box(title: &str, detail: &str) {
    eprintln!("\n{}", "=".repeat(BOX_WIDTH));
    eprintln!("{title}");
    eprintln!("{}", "=".repeat(BOX_WIDTH));
    if !detail.is_empty() {
        eprintln!("\n{detail}");
    }
}

/// Format bytes in human-readable form.
///
/// # Examples
///
/// ```
/// use fieldlog::ui::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 bytes");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1048576), "1.0 MB");
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Shorten a note to one line for list output.
#[must_use]
pub fn note_preview(note: &str, max_chars: usize) -> String {
    let flat: String = note
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let mut cut: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
