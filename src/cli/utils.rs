//! Shared output helpers for diagnostics and help text

use colored::*;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Write a one-line diagnostic such as `error: unknown argument '--bogus'`.
///
/// Newlines in the message are folded so the diagnostic stays on one line.
pub fn write_diagnostic<W: Write + ?Sized>(
    out: &mut W,
    program: &str,
    message: &str,
    color: bool,
) -> io::Result<()> {
    let message = message.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    if color {
        writeln!(out, "{} {}: {}", "error:".red().bold(), program, message)
    } else {
        writeln!(out, "error: {}: {}", program, message)
    }
}

/// Write the hint pointing at `--help` after a usage error.
pub fn write_help_hint<W: Write + ?Sized>(out: &mut W, program: &str, color: bool) -> io::Result<()> {
    let hint = format!("Run '{} --help' for usage.", program);
    if color {
        writeln!(out, "{}", hint.dimmed())
    } else {
        writeln!(out, "{}", hint)
    }
}

/// Style a section heading.
pub fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().underline().to_string()
    } else {
        text.to_string()
    }
}

/// Style a command or flag name.
pub fn emphasis(text: &str, color: bool) -> String {
    if color {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Truncate text to a display width, appending an ellipsis when cut.
///
/// Width is measured in terminal columns, so wide characters count double.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    format!("{}...", truncated)
}
