// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CRLF, string_width};

/// Gap between grid columns.
const COLUMN_GAP: usize = 2;

/// Longest prefix shared by all `candidates` (compared char by char).
///
/// Only the lexicographically smallest and largest candidates need comparing: every
/// other candidate sorts between them, so it shares at least their common prefix.
#[must_use]
pub fn common_prefix<S: AsRef<str>>(candidates: &[S]) -> String {
    let mut iter = candidates.iter().map(AsRef::as_ref);
    let Some(first) = iter.next() else {
        return String::new();
    };
    let (min, max) = iter.fold((first, first), |(min, max), it| (min.min(it), max.max(it)));

    let prefix_len = min
        .char_indices()
        .zip(max.chars())
        .find(|((_, lhs), rhs)| lhs != rhs)
        .map_or(min.len(), |((index, _), _)| index);
    min[..prefix_len].to_owned()
}

/// Lay out `candidates` in a column grid for a terminal `columns` wide.
///
/// - Every column is as wide as the widest candidate plus a two space gap.
/// - As many columns as fit are used (at least one; exactly one when `columns` is
///   [None]).
/// - An empty candidate is a group separator: it ends the current row and adds a blank
///   row.
/// - The block starts with `\r\n`, and ends with a blank row when the last row has
///   entries.
///
/// ```
/// use termline::format_completion_grid;
///
/// let grid = format_completion_grid(&["oven", "stove", "washer"], Some(80));
/// assert_eq!(grid, "\r\noven    stove   washer\r\n\r\n");
/// ```
#[must_use]
pub fn format_completion_grid<S: AsRef<str>>(candidates: &[S], columns: Option<usize>) -> String {
    let widths: Vec<usize> = candidates
        .iter()
        .map(|it| string_width(it.as_ref(), true))
        .collect();
    let column_width = widths.iter().copied().max().unwrap_or_default() + COLUMN_GAP;
    let max_columns = columns.map_or(1, |columns| (columns / column_width).max(1));

    let mut output = String::from(CRLF);
    let mut line_index = 0;
    let mut whitespace = 0;

    for (candidate, width) in candidates.iter().map(AsRef::as_ref).zip(widths) {
        if candidate.is_empty() || line_index == max_columns {
            output.push_str(CRLF);
            line_index = 0;
            whitespace = 0;
        } else {
            output.push_str(&" ".repeat(whitespace));
        }

        if candidate.is_empty() {
            output.push_str(CRLF);
        } else {
            output.push_str(candidate);
            whitespace = column_width - width;
            line_index += 1;
        }
    }

    if line_index != 0 {
        output.push_str(CRLF);
        output.push_str(CRLF);
    }
    output
}
