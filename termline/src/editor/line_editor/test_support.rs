// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use crate::{EditorConfig, EditorEvent, Key, KeyDecoder, LineEditor};

/// Editor with the default config and a `"> "` prompt, no wrapping.
pub fn new_editor() -> LineEditor { LineEditor::new(&EditorConfig::default()).unwrap() }

/// Decode `input` as if typed and apply every key, collecting the events.
pub fn type_text(
    editor: &mut LineEditor,
    input: &str,
    term: &mut dyn Write,
) -> Vec<EditorEvent> {
    let mut decoder = KeyDecoder::new();
    let mut keys = decoder.feed_str(input);
    keys.extend(decoder.flush());
    apply_keys(editor, &keys, term)
}

pub fn apply_keys(
    editor: &mut LineEditor,
    keys: &[Key],
    term: &mut dyn Write,
) -> Vec<EditorEvent> {
    keys.iter()
        .filter_map(|key| editor.apply_key(key, term).unwrap())
        .collect()
}
