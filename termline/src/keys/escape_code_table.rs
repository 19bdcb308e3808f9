// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::KeyName;

/// Some terminals encode a modifier in the final byte of the sequence instead of in a
/// `;n` parameter. rxvt sends `ESC [ a` for Shift+Up and `ESC O a` for Ctrl+Up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpliedModifier {
    None,
    Shift,
    Ctrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeCodeEntry {
    /// Sequence without the leading `ESC` and without the modifier parameter.
    pub code: &'static str,
    pub name: KeyName,
    pub implied: ImpliedModifier,
}

const fn entry(code: &'static str, name: KeyName, implied: ImpliedModifier) -> EscapeCodeEntry {
    EscapeCodeEntry {
        code,
        name,
        implied,
    }
}

/// Known escape codes, in lookup order.
pub const ESCAPE_CODE_TABLE: &[EscapeCodeEntry] = &[
    // xterm / gnome: ESC [ letter and ESC O letter.
    entry("[P", KeyName::Function(1), ImpliedModifier::None),
    entry("[Q", KeyName::Function(2), ImpliedModifier::None),
    entry("[R", KeyName::Function(3), ImpliedModifier::None),
    entry("[S", KeyName::Function(4), ImpliedModifier::None),
    entry("OP", KeyName::Function(1), ImpliedModifier::None),
    entry("OQ", KeyName::Function(2), ImpliedModifier::None),
    entry("OR", KeyName::Function(3), ImpliedModifier::None),
    entry("OS", KeyName::Function(4), ImpliedModifier::None),
    // xterm / rxvt: ESC [ number ~.
    entry("[11~", KeyName::Function(1), ImpliedModifier::None),
    entry("[12~", KeyName::Function(2), ImpliedModifier::None),
    entry("[13~", KeyName::Function(3), ImpliedModifier::None),
    entry("[14~", KeyName::Function(4), ImpliedModifier::None),
    // Bracketed paste.
    entry("[200~", KeyName::PasteStart, ImpliedModifier::None),
    entry("[201~", KeyName::PasteEnd, ImpliedModifier::None),
    // Cygwin and libuv.
    entry("[[A", KeyName::Function(1), ImpliedModifier::None),
    entry("[[B", KeyName::Function(2), ImpliedModifier::None),
    entry("[[C", KeyName::Function(3), ImpliedModifier::None),
    entry("[[D", KeyName::Function(4), ImpliedModifier::None),
    entry("[[E", KeyName::Function(5), ImpliedModifier::None),
    // Common.
    entry("[15~", KeyName::Function(5), ImpliedModifier::None),
    entry("[17~", KeyName::Function(6), ImpliedModifier::None),
    entry("[18~", KeyName::Function(7), ImpliedModifier::None),
    entry("[19~", KeyName::Function(8), ImpliedModifier::None),
    entry("[20~", KeyName::Function(9), ImpliedModifier::None),
    entry("[21~", KeyName::Function(10), ImpliedModifier::None),
    entry("[23~", KeyName::Function(11), ImpliedModifier::None),
    entry("[24~", KeyName::Function(12), ImpliedModifier::None),
    // xterm: ESC [ letter.
    entry("[A", KeyName::Up, ImpliedModifier::None),
    entry("[B", KeyName::Down, ImpliedModifier::None),
    entry("[C", KeyName::Right, ImpliedModifier::None),
    entry("[D", KeyName::Left, ImpliedModifier::None),
    entry("[E", KeyName::Clear, ImpliedModifier::None),
    entry("[F", KeyName::End, ImpliedModifier::None),
    entry("[H", KeyName::Home, ImpliedModifier::None),
    // xterm / gnome: ESC O letter.
    entry("OA", KeyName::Up, ImpliedModifier::None),
    entry("OB", KeyName::Down, ImpliedModifier::None),
    entry("OC", KeyName::Right, ImpliedModifier::None),
    entry("OD", KeyName::Left, ImpliedModifier::None),
    entry("OE", KeyName::Clear, ImpliedModifier::None),
    entry("OF", KeyName::End, ImpliedModifier::None),
    entry("OH", KeyName::Home, ImpliedModifier::None),
    // xterm / rxvt: ESC [ number ~.
    entry("[1~", KeyName::Home, ImpliedModifier::None),
    entry("[2~", KeyName::Insert, ImpliedModifier::None),
    entry("[3~", KeyName::Delete, ImpliedModifier::None),
    entry("[4~", KeyName::End, ImpliedModifier::None),
    entry("[5~", KeyName::PageUp, ImpliedModifier::None),
    entry("[6~", KeyName::PageDown, ImpliedModifier::None),
    // putty.
    entry("[[5~", KeyName::PageUp, ImpliedModifier::None),
    entry("[[6~", KeyName::PageDown, ImpliedModifier::None),
    // rxvt.
    entry("[7~", KeyName::Home, ImpliedModifier::None),
    entry("[8~", KeyName::End, ImpliedModifier::None),
    // rxvt keys with modifiers.
    entry("[a", KeyName::Up, ImpliedModifier::Shift),
    entry("[b", KeyName::Down, ImpliedModifier::Shift),
    entry("[c", KeyName::Right, ImpliedModifier::Shift),
    entry("[d", KeyName::Left, ImpliedModifier::Shift),
    entry("[e", KeyName::Clear, ImpliedModifier::Shift),
    entry("[2$", KeyName::Insert, ImpliedModifier::Shift),
    entry("[3$", KeyName::Delete, ImpliedModifier::Shift),
    entry("[5$", KeyName::PageUp, ImpliedModifier::Shift),
    entry("[6$", KeyName::PageDown, ImpliedModifier::Shift),
    entry("[7$", KeyName::Home, ImpliedModifier::Shift),
    entry("[8$", KeyName::End, ImpliedModifier::Shift),
    entry("Oa", KeyName::Up, ImpliedModifier::Ctrl),
    entry("Ob", KeyName::Down, ImpliedModifier::Ctrl),
    entry("Oc", KeyName::Right, ImpliedModifier::Ctrl),
    entry("Od", KeyName::Left, ImpliedModifier::Ctrl),
    entry("Oe", KeyName::Clear, ImpliedModifier::Ctrl),
    entry("[2^", KeyName::Insert, ImpliedModifier::Ctrl),
    entry("[3^", KeyName::Delete, ImpliedModifier::Ctrl),
    entry("[5^", KeyName::PageUp, ImpliedModifier::Ctrl),
    entry("[6^", KeyName::PageDown, ImpliedModifier::Ctrl),
    entry("[7^", KeyName::Home, ImpliedModifier::Ctrl),
    entry("[8^", KeyName::End, ImpliedModifier::Ctrl),
    // Misc.
    entry("[Z", KeyName::Tab, ImpliedModifier::Shift),
];

/// Find the key a terminal means by `code` (for example `"[A"` or `"[24~"`).
#[must_use]
pub fn lookup_escape_code(code: &str) -> Option<&'static EscapeCodeEntry> {
    ESCAPE_CODE_TABLE.iter().find(|it| it.code == code)
}
