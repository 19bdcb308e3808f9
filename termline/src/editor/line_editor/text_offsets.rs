// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte offsets around a cursor in a UTF-8 line.

/// Byte length of the char that ends at `index`. 0 at the start of the line.
pub fn char_len_left(text: &str, index: usize) -> usize {
    text.get(..index)
        .and_then(|it| it.chars().next_back())
        .map_or(0, char::len_utf8)
}

/// Byte length of the char that starts at `index`. 1 past the end of the line, so that a
/// move right at the end still asks for a (clamped) move.
pub fn char_len_at(text: &str, index: usize) -> usize {
    text.get(index..)
        .and_then(|it| it.chars().next())
        .map_or(1, char::len_utf8)
}

/// The nearest char boundary at or before `index`, clamped to the length of `text`.
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Widen a count for a relative cursor move.
pub fn to_isize(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("abc", 0, 0 ; "start of line")]
    #[test_case("abc", 2, 1 ; "ascii")]
    #[test_case("aé", 3, 2 ; "two byte char")]
    #[test_case("a😀", 5, 4 ; "four byte char")]
    fn test_char_len_left(text: &str, index: usize, expected: usize) {
        pretty_assertions::assert_eq!(char_len_left(text, index), expected);
    }

    #[test_case("abc", 0, 1 ; "ascii")]
    #[test_case("é", 0, 2 ; "two byte char")]
    #[test_case("abc", 3, 1 ; "end of line")]
    fn test_char_len_at(text: &str, index: usize, expected: usize) {
        pretty_assertions::assert_eq!(char_len_at(text, index), expected);
    }

    #[test_case("a😀b", 3, 1 ; "inside four byte char")]
    #[test_case("a😀b", 5, 5 ; "on boundary")]
    #[test_case("ab", 99, 2 ; "past end")]
    fn test_floor_char_boundary(text: &str, index: usize, expected: usize) {
        pretty_assertions::assert_eq!(floor_char_boundary(text, index), expected);
    }
}
