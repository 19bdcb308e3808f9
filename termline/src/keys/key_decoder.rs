// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{mem, sync::LazyLock};

use regex::Regex;

use crate::{ESC_CHAR, ImpliedModifier, Key, KeyName, lookup_escape_code};

/// `ESC [ 24 ; 5 ~` style commands: one or two digit key number, optional modifier,
/// `~`, `^` or `$` terminator. Three digit numbers (bracketed paste) take no modifier.
static CSI_NUMERIC_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9][0-9]?)(?:;([0-9]))?([~^$])|([0-9]{3}~))$")
        .expect("CSI numeric form regex is valid")
});

/// `ESC [ 1 ; 5 H` style commands: optional `1;` prefix, optional modifier, then the
/// letter.
static CSI_LETTER_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:[0-9];)?([0-9]))?([A-Za-z])$")
        .expect("CSI letter form regex is valid")
});

/// How far into an escape sequence the decoder is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecoderStage {
    #[default]
    Idle,
    /// `ESC`.
    EscapeSeen,
    /// `ESC ESC`. The second escape is absorbed.
    DoubleEscapeSeen,
    /// `ESC O`.
    Ss3Start,
    /// `ESC O <digit>`, waiting for the letter.
    Ss3AfterModifier,
    /// `ESC [`.
    CsiStart,
    /// `ESC [ [`.
    CsiAfterSecondBracket,
    /// Leading digits of a CSI command, at most three.
    CsiDigits { count: u8 },
    /// `;` after the leading digits.
    CsiAfterSemicolon,
    /// `; <digit>`, the next char ends the command whatever it is.
    CsiAfterModifierDigit,
}

/// Incremental decoder from terminal input chars to [`Key`]s.
///
/// Feed one char at a time with [`Self::feed`]. Each call returns at most one key. When
/// the input so far could still be the start of a longer escape sequence nothing is
/// returned until the sequence is complete.
///
/// A lone `ESC` is ambiguous: it may be the Escape key or the start of a sequence whose
/// remaining bytes haven't arrived yet. The host decides by time. If no more input
/// arrives within the escape timeout it calls [`Self::flush`], which resolves whatever
/// is pending (`ESC` alone becomes [`KeyName::Escape`] with `meta` set).
///
/// ```
/// use termline::{KeyDecoder, KeyName};
///
/// let mut decoder = KeyDecoder::new();
/// assert!(decoder.feed('\x1b').is_none());
/// assert!(decoder.feed('[').is_none());
/// let key = decoder.feed('A').unwrap();
/// assert_eq!(key.name, Some(KeyName::Up));
/// ```
#[derive(Debug, Default)]
pub struct KeyDecoder {
    stage: DecoderStage,
    /// Raw chars of the key being decoded.
    sequence: String,
    /// Escape code being assembled, for [`lookup_escape_code`].
    code: String,
    /// Modifier parameter minus one. Bit 0 shift, bit 2 ctrl, bits 1 and 3 meta.
    modifier: i32,
    /// Byte offset in `sequence` where the CSI command (digits, modifier, final) starts.
    cmd_start: usize,
    escaped: bool,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn feed(&mut self, ch: char) -> Option<Key> { self.step(Some(ch)) }

    /// Resolve a pending partial sequence, if any. Called when the escape timeout
    /// expires. Does nothing when idle.
    pub fn flush(&mut self) -> Option<Key> { self.step(None) }

    /// Feed every char of `text`, collecting the keys produced.
    pub fn feed_str(&mut self, text: &str) -> Vec<Key> {
        text.chars().filter_map(|ch| self.feed(ch)).collect()
    }

    /// `true` when no partial sequence is buffered.
    #[must_use]
    pub fn is_idle(&self) -> bool { self.stage == DecoderStage::Idle }

    /// Drop any partial sequence.
    pub fn reset(&mut self) { *self = Self::default(); }

    fn step(&mut self, input: Option<char>) -> Option<Key> {
        if self.stage == DecoderStage::Idle {
            let ch = input?;
            self.sequence.clear();
            self.sequence.push(ch);
            self.code.clear();
            self.modifier = 0;
            self.escaped = ch == ESC_CHAR;
            if self.escaped {
                self.stage = DecoderStage::EscapeSeen;
                return None;
            }
            return self.resolve_direct(input);
        }

        if let Some(ch) = input {
            self.sequence.push(ch);
        }

        match self.stage {
            DecoderStage::Idle => None,
            DecoderStage::EscapeSeen if input == Some(ESC_CHAR) => {
                self.stage = DecoderStage::DoubleEscapeSeen;
                None
            }
            DecoderStage::EscapeSeen | DecoderStage::DoubleEscapeSeen => {
                self.after_escape(input)
            }
            DecoderStage::Ss3Start => match input {
                Some(digit @ '0'..='9') => {
                    self.modifier = digit_value(digit) - 1;
                    self.stage = DecoderStage::Ss3AfterModifier;
                    None
                }
                other => {
                    self.code.extend(other);
                    self.resolve_escape_code()
                }
            },
            DecoderStage::Ss3AfterModifier => {
                self.code.extend(input);
                self.resolve_escape_code()
            }
            DecoderStage::CsiStart if input == Some('[') => {
                self.code.push('[');
                self.stage = DecoderStage::CsiAfterSecondBracket;
                None
            }
            DecoderStage::CsiStart | DecoderStage::CsiAfterSecondBracket => {
                self.begin_csi_command(input)
            }
            DecoderStage::CsiDigits { count } => match input {
                Some('0'..='9') if count < 3 => {
                    self.stage = DecoderStage::CsiDigits { count: count + 1 };
                    None
                }
                other => self.csi_modifier_or_resolve(other),
            },
            DecoderStage::CsiAfterSemicolon => match input {
                Some('0'..='9') => {
                    self.stage = DecoderStage::CsiAfterModifierDigit;
                    None
                }
                _ => self.resolve_csi(),
            },
            DecoderStage::CsiAfterModifierDigit => self.resolve_csi(),
        }
    }

    fn after_escape(&mut self, input: Option<char>) -> Option<Key> {
        match input {
            Some('O') => {
                self.code.push('O');
                self.stage = DecoderStage::Ss3Start;
                None
            }
            Some('[') => {
                self.code.push('[');
                self.stage = DecoderStage::CsiStart;
                None
            }
            other => self.resolve_direct(other),
        }
    }

    fn begin_csi_command(&mut self, input: Option<char>) -> Option<Key> {
        // The command starts at the last char received, which is the previous char when
        // this step is a flush.
        self.cmd_start = self
            .sequence
            .char_indices()
            .next_back()
            .map_or(0, |(index, _)| index);
        match input {
            Some('0'..='9') => {
                self.stage = DecoderStage::CsiDigits { count: 1 };
                None
            }
            other => self.csi_modifier_or_resolve(other),
        }
    }

    fn csi_modifier_or_resolve(&mut self, input: Option<char>) -> Option<Key> {
        if input == Some(';') {
            self.stage = DecoderStage::CsiAfterSemicolon;
            return None;
        }
        self.resolve_csi()
    }

    fn resolve_csi(&mut self) -> Option<Key> {
        let cmd = self.sequence[self.cmd_start..].to_owned();

        if let Some(caps) = CSI_NUMERIC_FORM.captures(&cmd) {
            if let Some(three_digits) = caps.get(4) {
                self.code.push_str(three_digits.as_str());
            } else {
                self.code.push_str(&caps[1]);
                self.code.push_str(&caps[3]);
                self.modifier = modifier_from_capture(caps.get(2).map(|it| it.as_str()));
            }
        } else if let Some(caps) = CSI_LETTER_FORM.captures(&cmd) {
            self.code.push_str(&caps[2]);
            self.modifier = modifier_from_capture(caps.get(1).map(|it| it.as_str()));
        } else {
            self.code.push_str(&cmd);
        }

        self.resolve_escape_code()
    }

    fn resolve_escape_code(&mut self) -> Option<Key> {
        let code = mem::take(&mut self.code);
        let mut key = Key {
            sequence: mem::take(&mut self.sequence),
            name: None,
            code: None,
            ctrl: self.modifier & 4 != 0,
            meta: self.modifier & 10 != 0,
            shift: self.modifier & 1 != 0,
        };

        match lookup_escape_code(&code) {
            Some(entry) => {
                key.name = Some(entry.name);
                match entry.implied {
                    ImpliedModifier::None => {}
                    ImpliedModifier::Shift => key.shift = true,
                    ImpliedModifier::Ctrl => key.ctrl = true,
                }
            }
            None => {
                tracing::trace!(
                    message = "unrecognized escape sequence",
                    sequence = ?key.sequence,
                    code = ?code
                );
            }
        }
        key.code = Some(code);

        self.finish(key)
    }

    /// Everything that isn't an `ESC O` or `ESC [` sequence: a single char, optionally
    /// preceded by one or two escapes.
    fn resolve_direct(&mut self, input: Option<char>) -> Option<Key> {
        let escaped = self.escaped;
        let mut key = Key {
            sequence: mem::take(&mut self.sequence),
            ..Default::default()
        };

        match input {
            Some('\r') => (key.name, key.meta) = (Some(KeyName::Return), escaped),
            Some('\n') => (key.name, key.meta) = (Some(KeyName::Enter), escaped),
            Some('\t') => (key.name, key.meta) = (Some(KeyName::Tab), escaped),
            Some('\x08' | '\x7f') => {
                (key.name, key.meta) = (Some(KeyName::Backspace), escaped);
            }
            Some(ESC_CHAR) => (key.name, key.meta) = (Some(KeyName::Escape), escaped),
            Some(' ') => (key.name, key.meta) = (Some(KeyName::Space), escaped),
            Some(ch) if !escaped && ch <= '\x1a' => {
                // Ctrl+A is 0x01, Ctrl+Z is 0x1a.
                key.name = char::from_u32(u32::from(ch) + u32::from('a') - 1).map(KeyName::Char);
                key.ctrl = true;
            }
            Some(ch) if ch.is_ascii_alphanumeric() => {
                key.name = Some(KeyName::Char(ch.to_ascii_lowercase()));
                key.shift = ch.is_ascii_uppercase();
                key.meta = escaped;
            }
            Some(_) if escaped => key.meta = true,
            None if escaped => (key.name, key.meta) = (Some(KeyName::Escape), true),
            _ => {}
        }

        self.finish(key)
    }

    fn finish(&mut self, key: Key) -> Option<Key> {
        let escaped = self.escaped;
        self.stage = DecoderStage::Idle;
        self.escaped = false;
        self.modifier = 0;

        let is_single_char = key.sequence.chars().count() == 1;
        if (!key.sequence.is_empty() && (key.name.is_some() || escaped)) || is_single_char {
            Some(key)
        } else {
            tracing::trace!(message = "dropped undecodable input", sequence = ?key.sequence);
            None
        }
    }
}

fn digit_value(digit: char) -> i32 {
    digit
        .to_digit(10)
        .map_or(0, |it| i32::try_from(it).unwrap_or_default())
}

/// `None` (no modifier parameter) means no modifiers.
fn modifier_from_capture(capture: Option<&str>) -> i32 {
    capture
        .and_then(|it| it.chars().next())
        .map_or(0, |digit| digit_value(digit) - 1)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn decode(input: &str) -> Vec<Key> { KeyDecoder::new().feed_str(input) }

    fn decode_one(input: &str) -> Key {
        let mut keys = decode(input);
        pretty_assertions::assert_eq!(keys.len(), 1, "keys: {keys:?}");
        keys.remove(0)
    }

    /// (name, ctrl, meta, shift)
    type Decoded = (Option<KeyName>, bool, bool, bool);

    fn summary(key: &Key) -> Decoded { (key.name, key.ctrl, key.meta, key.shift) }

    #[test]
    fn test_every_ascii_alphanumeric() {
        for ch in ('0'..='9').chain('a'..='z').chain('A'..='Z') {
            let key = decode_one(&ch.to_string());
            pretty_assertions::assert_eq!(
                summary(&key),
                (
                    Some(KeyName::Char(ch.to_ascii_lowercase())),
                    false,
                    false,
                    ch.is_ascii_uppercase()
                )
            );
            pretty_assertions::assert_eq!(key.text(), Some(ch.to_string().as_str()));
        }
    }

    #[test_case("\r", (Some(KeyName::Return), false, false, false) ; "return")]
    #[test_case("\n", (Some(KeyName::Enter), false, false, false) ; "enter")]
    #[test_case("\t", (Some(KeyName::Tab), false, false, false) ; "tab")]
    #[test_case("\x7f", (Some(KeyName::Backspace), false, false, false) ; "del is backspace")]
    #[test_case("\x08", (Some(KeyName::Backspace), false, false, false) ; "bs is backspace")]
    #[test_case(" ", (Some(KeyName::Space), false, false, false) ; "space")]
    #[test_case("\x01", (Some(KeyName::Char('a')), true, false, false) ; "ctrl a")]
    #[test_case("\x03", (Some(KeyName::Char('c')), true, false, false) ; "ctrl c")]
    #[test_case("\x1a", (Some(KeyName::Char('z')), true, false, false) ; "ctrl z")]
    #[test_case("\x00", (Some(KeyName::Char('`')), true, false, false) ; "ctrl space")]
    #[test_case(".", (None, false, false, false) ; "punctuation has no name")]
    #[test_case("é", (None, false, false, false) ; "non ascii has no name")]
    #[test_case("\x1f", (None, false, false, false) ; "unit separator has no name")]
    fn test_single_chars(input: &str, expected: Decoded) {
        let key = decode_one(input);
        pretty_assertions::assert_eq!(summary(&key), expected);
        pretty_assertions::assert_eq!(key.sequence, input);
        pretty_assertions::assert_eq!(key.code, None);
    }

    #[test_case("\x1b[A", (Some(KeyName::Up), false, false, false) ; "up")]
    #[test_case("\x1bOB", (Some(KeyName::Down), false, false, false) ; "ss3 down")]
    #[test_case("\x1b[1;5A", (Some(KeyName::Up), true, false, false) ; "ctrl up")]
    #[test_case("\x1b[1;3C", (Some(KeyName::Right), false, true, false) ; "alt right")]
    #[test_case("\x1b[1;2D", (Some(KeyName::Left), false, false, true) ; "shift left")]
    #[test_case("\x1b[1;6C", (Some(KeyName::Right), true, false, true) ; "ctrl shift right")]
    #[test_case("\x1b[5H", (Some(KeyName::Home), true, false, false) ; "modifier without prefix")]
    #[test_case("\x1b[3~", (Some(KeyName::Delete), false, false, false) ; "delete")]
    #[test_case("\x1b[3;5~", (Some(KeyName::Delete), true, false, false) ; "ctrl delete")]
    #[test_case("\x1b[24;5~", (Some(KeyName::Function(12)), true, false, false) ; "ctrl f12")]
    #[test_case("\x1bOP", (Some(KeyName::Function(1)), false, false, false) ; "ss3 f1")]
    #[test_case("\x1bO5P", (Some(KeyName::Function(1)), true, false, false) ; "ss3 ctrl f1")]
    #[test_case("\x1b[[A", (Some(KeyName::Function(1)), false, false, false) ; "cygwin f1")]
    #[test_case("\x1b[[5~", (Some(KeyName::PageUp), false, false, false) ; "putty pageup")]
    #[test_case("\x1b[200~", (Some(KeyName::PasteStart), false, false, false) ; "paste start")]
    #[test_case("\x1b[201~", (Some(KeyName::PasteEnd), false, false, false) ; "paste end")]
    #[test_case("\x1b[a", (Some(KeyName::Up), false, false, true) ; "rxvt shift up")]
    #[test_case("\x1bOd", (Some(KeyName::Left), true, false, false) ; "rxvt ctrl left")]
    #[test_case("\x1b[7$", (Some(KeyName::Home), false, false, true) ; "rxvt shift home")]
    #[test_case("\x1b[8^", (Some(KeyName::End), true, false, false) ; "rxvt ctrl end")]
    #[test_case("\x1b[Z", (Some(KeyName::Tab), false, false, true) ; "shift tab")]
    #[test_case("\x1b[99~", (None, false, false, false) ; "unknown number")]
    #[test_case("\x1bb", (Some(KeyName::Char('b')), false, true, false) ; "meta b")]
    #[test_case("\x1bB", (Some(KeyName::Char('b')), false, true, true) ; "meta shift b")]
    #[test_case("\x1b\x7f", (Some(KeyName::Backspace), false, true, false) ; "meta backspace")]
    #[test_case("\x1b\r", (Some(KeyName::Return), false, true, false) ; "meta return")]
    #[test_case("\x1b.", (None, false, true, false) ; "meta punctuation")]
    #[test_case("\x1b\x01", (None, false, true, false) ; "escaped control char")]
    #[test_case("\x1b\x1b\x1b", (Some(KeyName::Escape), false, true, false) ; "triple escape")]
    #[test_case("\x1b\x1b[A", (Some(KeyName::Up), false, false, false) ; "double escape then up")]
    fn test_escape_sequences(input: &str, expected: Decoded) {
        let key = decode_one(input);
        pretty_assertions::assert_eq!(summary(&key), expected);
        pretty_assertions::assert_eq!(key.sequence, input);
        pretty_assertions::assert_eq!(key.text(), None);
    }

    #[test]
    fn test_code_excludes_modifier() {
        pretty_assertions::assert_eq!(decode_one("\x1b[1;5A").code.as_deref(), Some("[A"));
        pretty_assertions::assert_eq!(decode_one("\x1b[24;5~").code.as_deref(), Some("[24~"));
        pretty_assertions::assert_eq!(decode_one("\x1bO5P").code.as_deref(), Some("OP"));
        pretty_assertions::assert_eq!(decode_one("\x1b[99~").code.as_deref(), Some("[99~"));
    }

    #[test]
    fn test_partial_sequence_waits_for_more_input() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.feed('\x1b').is_none());
        assert!(decoder.feed('[').is_none());
        assert!(decoder.feed('1').is_none());
        assert!(decoder.feed(';').is_none());
        assert!(decoder.feed('5').is_none());
        assert!(!decoder.is_idle());
        let key = decoder.feed('B').unwrap();
        pretty_assertions::assert_eq!(summary(&key), (Some(KeyName::Down), true, false, false));
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_flush_resolves_lone_escape() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.feed('\x1b').is_none());
        let key = decoder.flush().unwrap();
        pretty_assertions::assert_eq!(summary(&key), (Some(KeyName::Escape), false, true, false));
        pretty_assertions::assert_eq!(key.sequence, "\x1b");
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_flush_resolves_double_escape() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.feed('\x1b').is_none());
        assert!(decoder.feed('\x1b').is_none());
        let key = decoder.flush().unwrap();
        pretty_assertions::assert_eq!(key.name, Some(KeyName::Escape));
        pretty_assertions::assert_eq!(key.sequence, "\x1b\x1b");
    }

    #[test]
    fn test_flush_resolves_partial_csi_without_name() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.feed('\x1b').is_none());
        assert!(decoder.feed('[').is_none());
        let key = decoder.flush().unwrap();
        pretty_assertions::assert_eq!(key.name, None);
        pretty_assertions::assert_eq!(key.sequence, "\x1b[");
        assert!(decoder.is_idle());

        // The decoder is usable again afterwards.
        pretty_assertions::assert_eq!(decoder.feed('x').unwrap().name, Some(KeyName::Char('x')));
    }

    #[test]
    fn test_flush_when_idle_is_noop() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.flush().is_none());
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_mixed_stream() {
        let names: Vec<_> = decode("a\x1b[Bb\x1bOC\r").iter().map(|it| it.name).collect();
        pretty_assertions::assert_eq!(
            names,
            vec![
                Some(KeyName::Char('a')),
                Some(KeyName::Down),
                Some(KeyName::Char('b')),
                Some(KeyName::Right),
                Some(KeyName::Return),
            ]
        );
    }

    #[test]
    fn test_four_digits_end_the_command() {
        // Only three leading digits are buffered, so the fourth ends the command and the
        // `~` that follows is a key of its own.
        let keys = decode("\x1b[1234~");
        pretty_assertions::assert_eq!(keys.len(), 2);
        pretty_assertions::assert_eq!(keys[0].name, None);
        pretty_assertions::assert_eq!(keys[0].sequence, "\x1b[1234");
        pretty_assertions::assert_eq!(keys[1].sequence, "~");
    }

    #[test]
    fn test_reset_drops_partial_sequence() {
        let mut decoder = KeyDecoder::new();
        decoder.feed('\x1b');
        decoder.feed('[');
        decoder.reset();
        assert!(decoder.is_idle());
        pretty_assertions::assert_eq!(decoder.feed('A').unwrap().name, Some(KeyName::Char('a')));
    }
}
