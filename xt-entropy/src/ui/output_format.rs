//! Formatting of the one-line messages the engine sends to the host output.
//! License: MIT OR Apache-2.0

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Severity of a printed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warn,
    Error,
}

/// Prints `msg` with a level tag, colored when the target supports it.
pub fn print_message<W: Write>(
    writer: &mut W,
    level: MessageLevel,
    msg: &str,
    supports_color: bool,
) -> io::Result<()> {
    let tag = match level {
        MessageLevel::Info => "info",
        MessageLevel::Warn => "warning",
        MessageLevel::Error => "error",
    };

    if !supports_color {
        return writeln!(writer, "{}: {}", tag, msg);
    }

    match level {
        MessageLevel::Info => writeln!(writer, "{}: {}", tag.cyan(), msg),
        MessageLevel::Warn => writeln!(writer, "{}: {}", tag.yellow().bold(), msg),
        MessageLevel::Error => writeln!(writer, "{}: {}", tag.red().bold(), msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let mut out = Vec::new();
        print_message(&mut out, MessageLevel::Warn, "XT_ENTROPY: x. Skipping...", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "warning: XT_ENTROPY: x. Skipping...\n");
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let mut out = Vec::new();
        print_message(&mut out, MessageLevel::Error, "boom", true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.ends_with("boom\n"));
    }
}
