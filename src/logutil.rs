//! Log helpers for user-supplied text (chat messages, words, translations).
//! Keeps every log record on one line and bounds how much user text lands in the log.

/// Longest preview written to the log, in characters.
pub const PREVIEW_CHARS: usize = 120;

/// Single-line, bounded rendering of `s` for log output:
/// - backslash, `\n`, `\r`, `\t` are escaped
/// - other control characters become `\xNN`
/// - anything past [`PREVIEW_CHARS`] characters is replaced by `…`
pub fn preview(s: &str) -> String {
    preview_n(s, PREVIEW_CHARS)
}

pub fn preview_n(s: &str, max_chars: usize) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(s.len().min(max_chars) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= max_chars {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
