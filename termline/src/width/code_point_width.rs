// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_width::UnicodeWidthChar;

/// Code points that never advance the cursor. Checked before the Unicode width tables so
/// that control codes (which `unicode-width` reports as `None`) count as zero.
pub const ZERO_WIDTH_RANGES: &[(char, char)] = &[
    // C0 control codes.
    ('\u{0000}', '\u{001F}'),
    // DEL and C1 control codes.
    ('\u{007F}', '\u{009F}'),
    // Combining diacritical marks.
    ('\u{0300}', '\u{036F}'),
    // Zero width space, non-joiner, joiner, and the LTR / RTL marks.
    ('\u{200B}', '\u{200F}'),
    // Combining diacritical marks for symbols.
    ('\u{20D0}', '\u{20FF}'),
    // Variation selectors.
    ('\u{FE00}', '\u{FE0F}'),
    // Combining half marks.
    ('\u{FE20}', '\u{FE2F}'),
    // Variation selectors supplement.
    ('\u{E0100}', '\u{E01EF}'),
];

#[must_use]
pub fn is_zero_width_code_point(ch: char) -> bool {
    ZERO_WIDTH_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&ch))
}

/// Number of columns `ch` occupies: `0`, `1`, or `2`.
///
/// Wide (`2`) means East Asian Wide or Fullwidth, which covers the CJK blocks, Hangul,
/// fullwidth forms and emoji with default emoji presentation.
#[must_use]
pub fn code_point_width(ch: char) -> usize {
    if is_zero_width_code_point(ch) {
        return 0;
    }
    match ch.width() {
        Some(0) => 0,
        Some(2) => 2,
        _ => 1,
    }
}
