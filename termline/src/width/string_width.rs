// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::code_point_width;

/// Matches CSI sequences (`ESC [` or the single byte `U+009B`, then parameters, then a
/// final byte) and OSC-like sequences that end in `BEL`.
static ANSI_ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x1B\x{9B}][\[\]()#;?]*",
        r"(?:",
        r"(?:(?:(?:;[-a-zA-Z0-9/#&.:=?%@~_]+)*",
        r"|[a-zA-Z0-9]+(?:;[-a-zA-Z0-9/#&.:=?%@~_]*)*)?\x07)",
        r"|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-PR-TZcf-ntqry=><~])",
        r")",
    ))
    .expect("ANSI escape regex is valid")
});

/// Remove ANSI / VT control sequences. Borrows when there is nothing to remove.
#[must_use]
pub fn strip_vt_control_characters(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE_REGEX.replace_all(text, "")
}

/// Number of columns `text` occupies once printed.
///
/// The text is normalized to NFC first so that a base letter followed by a combining
/// mark is measured the same as its precomposed form. When `strip_ansi` is set, escape
/// sequences are removed before measuring.
#[must_use]
pub fn string_width(text: &str, strip_ansi: bool) -> usize {
    let text = if strip_ansi {
        strip_vt_control_characters(text)
    } else {
        Cow::Borrowed(text)
    };
    text.nfc().map(code_point_width).sum()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("", 0 ; "empty")]
    #[test_case("a", 1 ; "single ascii")]
    #[test_case("hello", 5 ; "ascii word")]
    #[test_case("\u{0301}", 0 ; "lone combining mark")]
    #[test_case("e\u{0301}", 1 ; "decomposed e acute")]
    #[test_case("あ", 2 ; "hiragana")]
    #[test_case("日本語", 6 ; "three cjk")]
    #[test_case("a\tb", 2 ; "tab is zero width here")]
    #[test_case("\x1b[31mred\x1b[0m", 3 ; "colored text")]
    fn test_string_width(text: &str, expected: usize) {
        pretty_assertions::assert_eq!(string_width(text, true), expected);
    }

    #[test]
    fn test_string_width_without_stripping_counts_printable_tail() {
        // ESC is zero width, `[31m` is four printable columns.
        pretty_assertions::assert_eq!(string_width("\x1b[31mred", false), 7);
    }

    #[test]
    fn test_strip_vt_control_characters() {
        pretty_assertions::assert_eq!(
            strip_vt_control_characters("\x1b[1;32mok\x1b[0m \x1b[2K\x1b[10G!"),
            "ok !"
        );
        pretty_assertions::assert_eq!(
            strip_vt_control_characters("\x1b]0;title\x07done"),
            "done"
        );
        assert!(matches!(
            strip_vt_control_characters("plain"),
            Cow::Borrowed("plain")
        ));
    }
}
