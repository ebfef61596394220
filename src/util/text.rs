use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji occupy two columns; combining marks
/// occupy none.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut.
///
/// Returns `Cow::Borrowed` when the string already fits. Widths of 3 or
/// fewer columns return as many characters as fit without the ellipsis,
/// since there is no room for "char + ellipsis".
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Too narrow for an ellipsis: keep whatever characters fit.
    if max_width <= ELLIPSIS_WIDTH {
        let mut width = 0;
        let mut end = 0;
        for (idx, c) in s.char_indices() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if width + w > max_width {
                break;
            }
            width += w;
            end = idx + c.len_utf8();
        }
        return Cow::Owned(s[..end].to_string());
    }

    let target = max_width - ELLIPSIS_WIDTH;
    let mut width = 0;
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > target {
            cut = idx;
            break;
        }
        width += w;
        cut = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS))
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Server-provided error messages end up in the status bar verbatim; a
/// hostile or buggy backend must not be able to move the cursor or retitle
/// the window. Strips C0 controls (except tab/newline/CR), DEL, CSI and OSC
/// sequences, and bare ESC bytes. Returns `Cow::Borrowed` for clean input.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_stripped(b: u8) -> bool {
        b == 0x1b || b == 0x7f || (b < 0x20 && b != 0x09 && b != 0x0a && b != 0x0d)
    }

    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| is_stripped(b)) {
        return Cow::Borrowed(s);
    }

    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        let b = bytes[i];

        if b == 0x1b {
            if i + 1 < len && bytes[i + 1] == b'[' {
                // CSI: skip parameter bytes until the final byte 0x40-0x7e
                i += 2;
                while i < len {
                    let c = bytes[i];
                    i += 1;
                    if (0x40..=0x7e).contains(&c) {
                        break;
                    }
                }
            } else if i + 1 < len && bytes[i + 1] == b']' {
                // OSC: skip until BEL or ST (\x1b\\)
                i += 2;
                while i < len {
                    if bytes[i] == 0x07 {
                        i += 1;
                        break;
                    }
                    if bytes[i] == 0x1b && i + 1 < len && bytes[i + 1] == b'\\' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            } else {
                // Bare ESC
                i += 1;
            }
        } else if is_stripped(b) {
            i += 1;
        } else {
            // Batch-copy the run of safe bytes. Control bytes are ASCII and
            // cannot appear mid-codepoint in valid UTF-8, so the slice
            // boundaries are always char boundaries.
            let start = i;
            i += 1;
            while i < len && !is_stripped(bytes[i]) {
                i += 1;
            }
            out.push_str(&s[start..i]);
        }
    }

    Cow::Owned(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_mixed() {
        assert_eq!(display_width("Hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_truncate_fits_returns_borrowed() {
        let result = truncate_to_width("Short", 10);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Short");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn test_truncate_cjk() {
        // CJK characters are 2 columns wide
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
        assert_eq!(truncate_to_width("你好", 10), "你好");
        // max 5 -> target 2, only one CJK char fits
        assert_eq!(truncate_to_width("你好世界", 5), "你...");
    }

    #[test]
    fn test_truncate_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 2), "Te");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        // CJK char is 2 columns, does not fit in width 1
        assert_eq!(truncate_to_width("你好", 1), "");
    }

    #[test]
    fn test_truncate_never_splits_codepoints() {
        let mixed = "Hello世界";
        let result = truncate_to_width(mixed, 8);
        assert!(result.len() <= mixed.len());
        assert!(std::str::from_utf8(result.as_bytes()).is_ok());
    }

    #[test]
    fn test_strip_clean_text_returns_borrowed() {
        let input = "Category is still in use";
        let result = strip_control_chars(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_preserves_tabs_newlines_cr() {
        let input = "line1\nline2\ttabbed\r\nwindows";
        let result = strip_control_chars(input);
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_removes_controls_and_del() {
        let input = "he\x00ll\x07o\x08 w\x0bor\x0cld\x7f!";
        assert_eq!(strip_control_chars(input), "hello world!");
    }

    #[test]
    fn test_strip_ansi_color_codes() {
        let input = "\x1b[31mRed text\x1b[0m";
        assert_eq!(strip_control_chars(input), "Red text");
    }

    #[test]
    fn test_strip_osc_title_sequences() {
        assert_eq!(
            strip_control_chars("\x1b]0;malicious title\x07safe text"),
            "safe text"
        );
        assert_eq!(
            strip_control_chars("\x1b]0;malicious title\x1b\\safe text"),
            "safe text"
        );
    }

    #[test]
    fn test_strip_bare_esc() {
        assert_eq!(strip_control_chars("before\x1bafter"), "beforeafter");
    }

    #[test]
    fn test_strip_unicode_preserved() {
        let input = "Обувь \x1b[31mкрасный\x1b[0m текст";
        assert_eq!(strip_control_chars(input), "Обувь красный текст");
    }
}
