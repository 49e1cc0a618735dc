#![forbid(unsafe_code)]

//! Platform key decoding.
//!
//! A [`KeyDecoder`] turns the raw characters a terminal delivers into one
//! [`KeyEvent`] per physical keypress. Two strategies exist, chosen once at
//! startup through [`Platform`]:
//!
//! | Strategy | Multi-key prefix | Look-ahead |
//! |----------|------------------|------------|
//! | [`EscapePrefixed`] | `ESC` | one char to tell a bare escape from a sequence, one more after `[` / `O` |
//! | [`MarkerPrefixed`] | `\u{e0}` | always exactly one char |
//!
//! # Design Notes
//!
//! - Decoding blocks on the [`KeySource`] for every look-ahead char. A lone
//!   escape press is only resolved once the next key arrives (or a second
//!   `ESC`); there is no timeout.
//! - Anything the [`KeyTable`] does not name passes through as
//!   [`KeyEvent::Char`].
//! - [`KeyReader::poll`] is the producer step: it decodes one key and pushes
//!   it onto the [`InputQueue`] exactly once.

use std::fmt;
use std::io::{self, Read};

use crate::error::Unavailable;
use crate::event::{KeyEvent, KeyName};
use crate::input_queue::InputQueue;

const ESC: char = '\x1b';

/// Prefix char of extended keys on marker-prefixed consoles.
pub const MARKER: char = '\u{e0}';

/// Mapping from raw key codes to canonical key names.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeyTable {
    entries: &'static [(&'static str, KeyName)],
}

impl KeyTable {
    /// Table for terminals that send arrows as `ESC` sequences.
    ///
    /// Raw mode delivers Enter as `\r`, so both line endings map to enter.
    pub const ESCAPE_PREFIXED: Self = Self {
        entries: &[
            ("\n", KeyName::Enter),
            ("\r", KeyName::Enter),
            ("\x7f", KeyName::Backspace),
            ("\t", KeyName::Tab),
            ("\x1b", KeyName::Escape),
            ("\x1bA", KeyName::Up),
            ("\x1bD", KeyName::Left),
            ("\x1bC", KeyName::Right),
            ("\x1bB", KeyName::Down),
        ],
    };

    /// Table for consoles that prefix extended keys with [`MARKER`].
    pub const MARKER_PREFIXED: Self = Self {
        entries: &[
            ("\r", KeyName::Enter),
            ("\x08", KeyName::Backspace),
            ("\x1b", KeyName::Escape),
            ("\t", KeyName::Tab),
            ("\u{e0}H", KeyName::Up),
            ("\u{e0}K", KeyName::Left),
            ("\u{e0}M", KeyName::Right),
            ("\u{e0}P", KeyName::Down),
        ],
    };

    /// Resolve a raw code to its name.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<KeyName> {
        self.entries
            .iter()
            .find_map(|&(code, name)| (code == raw).then_some(name))
    }

    /// The first raw code that produces `name`.
    #[must_use]
    pub fn code(&self, name: KeyName) -> Option<&'static str> {
        self.entries
            .iter()
            .find_map(|&(code, n)| (n == name).then_some(code))
    }

    /// All `(raw code, name)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, KeyName)> + '_ {
        self.entries.iter().copied()
    }

    fn resolve_char(&self, c: char) -> KeyEvent {
        let mut buf = [0; 4];
        self.lookup(c.encode_utf8(&mut buf))
            .map_or(KeyEvent::Char(c), KeyEvent::Named)
    }

    fn resolve_prefixed(&self, prefix: char, c: char) -> KeyEvent {
        let mut raw = String::with_capacity(8);
        raw.push(prefix);
        raw.push(c);
        self.lookup(&raw).map_or(KeyEvent::Char(c), KeyEvent::Named)
    }
}

impl fmt::Debug for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(code, name)| (name, code)))
            .finish()
    }
}

/// A blocking source of characters.
pub trait KeySource {
    /// Block until the next character is available.
    ///
    /// Returns `ErrorKind::UnexpectedEof` once the source is exhausted.
    fn read_char(&mut self) -> io::Result<char>;
}

impl<S: KeySource + ?Sized> KeySource for Box<S> {
    fn read_char(&mut self) -> io::Result<char> {
        (**self).read_char()
    }
}

fn read_byte<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Decodes UTF-8 from any byte reader, one char at a time.
///
/// Invalid or truncated sequences become `U+FFFD`.
#[derive(Debug)]
pub struct Utf8Source<R> {
    reader: R,
}

impl<R: Read> Utf8Source<R> {
    /// Wrap a byte reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

impl<R: Read> KeySource for Utf8Source<R> {
    fn read_char(&mut self) -> io::Result<char> {
        let Some(lead) = read_byte(&mut self.reader)? else {
            return Err(io::ErrorKind::UnexpectedEof.into());
        };
        let len = utf8_len(lead);
        if len == 1 {
            return Ok(char::from(lead));
        }
        if len == 0 {
            return Ok(char::REPLACEMENT_CHARACTER);
        }
        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            match read_byte(&mut self.reader)? {
                Some(byte) => *slot = byte,
                None => return Ok(char::REPLACEMENT_CHARACTER),
            }
        }
        Ok(std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

/// Yields every byte as the char with the same value (`0xE0` is
/// [`MARKER`]).
///
/// Marker-prefixed consoles send the raw byte `0xE0` ahead of a scan code,
/// which is not valid UTF-8 and would be swallowed by [`Utf8Source`].
#[derive(Debug)]
pub struct ByteSource<R> {
    reader: R,
}

impl<R: Read> ByteSource<R> {
    /// Wrap a byte reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> KeySource for ByteSource<R> {
    fn read_char(&mut self) -> io::Result<char> {
        read_byte(&mut self.reader)?
            .map(char::from)
            .ok_or_else(|| io::ErrorKind::UnexpectedEof.into())
    }
}

/// Strategy that resolves exactly one physical keypress per call.
pub trait KeyDecoder: Send {
    /// Block until one key has been fully resolved.
    fn decode(&mut self, source: &mut dyn KeySource) -> io::Result<KeyEvent>;

    /// The key table this decoder resolves names through.
    fn table(&self) -> &KeyTable;
}

/// Decoder for terminals sending arrows as `ESC A`..`ESC D` or
/// `ESC [ A`..`ESC [ D` (and the `ESC O` application-mode form).
#[derive(Debug, Clone)]
pub struct EscapePrefixed {
    table: KeyTable,
}

impl EscapePrefixed {
    /// Decoder over [`KeyTable::ESCAPE_PREFIXED`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: KeyTable::ESCAPE_PREFIXED,
        }
    }
}

impl Default for EscapePrefixed {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder for EscapePrefixed {
    fn decode(&mut self, source: &mut dyn KeySource) -> io::Result<KeyEvent> {
        let c = source.read_char()?;
        if c != ESC {
            return Ok(self.table.resolve_char(c));
        }

        // ESC ESC is a bare escape press.
        let c2 = source.read_char()?;
        if c2 == ESC {
            return Ok(KeyEvent::Named(KeyName::Escape));
        }
        if c2 == '[' || c2 == 'O' {
            let c3 = source.read_char()?;
            return Ok(self.table.resolve_prefixed(ESC, c3));
        }
        Ok(self.table.resolve_prefixed(ESC, c2))
    }

    fn table(&self) -> &KeyTable {
        &self.table
    }
}

/// Decoder for consoles that send [`MARKER`] followed by a scan code.
#[derive(Debug, Clone)]
pub struct MarkerPrefixed {
    table: KeyTable,
}

impl MarkerPrefixed {
    /// Decoder over [`KeyTable::MARKER_PREFIXED`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: KeyTable::MARKER_PREFIXED,
        }
    }
}

impl Default for MarkerPrefixed {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder for MarkerPrefixed {
    fn decode(&mut self, source: &mut dyn KeySource) -> io::Result<KeyEvent> {
        let c = source.read_char()?;
        if c != MARKER {
            return Ok(self.table.resolve_char(c));
        }
        let c2 = source.read_char()?;
        Ok(self.table.resolve_prefixed(MARKER, c2))
    }

    fn table(&self) -> &KeyTable {
        &self.table
    }
}

/// Platform family, which fixes the decoding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Unix-like terminals: [`EscapePrefixed`].
    Posix,
    /// Windows consoles: [`MarkerPrefixed`].
    Windows,
}

impl Platform {
    /// The platform this process runs on.
    pub fn detect() -> Result<Self, Unavailable> {
        if cfg!(unix) {
            Ok(Self::Posix)
        } else if cfg!(windows) {
            Ok(Self::Windows)
        } else {
            let os = std::env::consts::OS;
            tracing::warn!(os, "no key decoder for this platform");
            Err(Unavailable::UnsupportedPlatform(os))
        }
    }

    /// A fresh decoder for this platform.
    #[must_use]
    pub fn decoder(self) -> Box<dyn KeyDecoder> {
        match self {
            Self::Posix => Box::new(EscapePrefixed::new()),
            Self::Windows => Box::new(MarkerPrefixed::new()),
        }
    }

    /// The char source this platform's decoder expects over `reader`.
    ///
    /// Escape-prefixed terminals deliver UTF-8; marker-prefixed consoles
    /// deliver raw bytes.
    pub fn source<R>(self, reader: R) -> Box<dyn KeySource + Send>
    where
        R: Read + Send + 'static,
    {
        match self {
            Self::Posix => Box::new(Utf8Source::new(reader)),
            Self::Windows => Box::new(ByteSource::new(reader)),
        }
    }

    /// The key table used on this platform.
    #[must_use]
    pub const fn table(self) -> KeyTable {
        match self {
            Self::Posix => KeyTable::ESCAPE_PREFIXED,
            Self::Windows => KeyTable::MARKER_PREFIXED,
        }
    }
}

/// Producer: decodes keys from a source and queues them.
pub struct KeyReader {
    decoder: Box<dyn KeyDecoder>,
    source: Box<dyn KeySource + Send>,
    queue: InputQueue,
}

impl KeyReader {
    /// Combine a decoder, its source, and the queue it feeds.
    pub fn new(
        decoder: Box<dyn KeyDecoder>,
        source: Box<dyn KeySource + Send>,
        queue: InputQueue,
    ) -> Self {
        Self {
            decoder,
            source,
            queue,
        }
    }

    /// Block for one keypress, push it onto the queue, and return it.
    pub fn poll(&mut self) -> io::Result<KeyEvent> {
        let event = self.decoder.decode(&mut *self.source)?;
        tracing::trace!(%event, "key decoded");
        self.queue.push(event);
        Ok(event)
    }

    /// The queue this reader feeds.
    #[must_use]
    pub fn queue(&self) -> &InputQueue {
        &self.queue
    }
}

impl fmt::Debug for KeyReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyReader")
            .field("table", self.decoder.table())
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(input: &str) -> Utf8Source<&[u8]> {
        Utf8Source::new(input.as_bytes())
    }

    fn decode_all(decoder: &mut dyn KeyDecoder, input: &str) -> Vec<KeyEvent> {
        let mut src = source(input);
        let mut out = Vec::new();
        loop {
            match decoder.decode(&mut src) {
                Ok(event) => out.push(event),
                Err(err) => {
                    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
                    return out;
                }
            }
        }
    }

    #[test]
    fn escape_then_letter_is_an_arrow() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(
            decode_all(&mut decoder, "\x1bA"),
            vec![KeyEvent::Named(KeyName::Up)]
        );
    }

    #[test]
    fn escape_then_unknown_char_is_that_char() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(decode_all(&mut decoder, "\x1bx"), vec![KeyEvent::Char('x')]);
    }

    #[test]
    fn csi_and_ss3_arrows() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(
            decode_all(&mut decoder, "\x1b[A\x1b[B\x1bOC\x1b[D"),
            vec![
                KeyEvent::Named(KeyName::Up),
                KeyEvent::Named(KeyName::Down),
                KeyEvent::Named(KeyName::Right),
                KeyEvent::Named(KeyName::Left),
            ]
        );
    }

    #[test]
    fn csi_with_unknown_final_is_that_char() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(decode_all(&mut decoder, "\x1b[Z"), vec![KeyEvent::Char('Z')]);
    }

    #[test]
    fn modified_arrow_leaks_its_parameters_as_chars() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(
            decode_all(&mut decoder, "\x1b[1;5A"),
            vec![
                KeyEvent::Char('1'),
                KeyEvent::Char(';'),
                KeyEvent::Char('5'),
                KeyEvent::Char('A'),
            ]
        );
    }

    #[test]
    fn double_escape_is_escape() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(
            decode_all(&mut decoder, "\x1b\x1ba"),
            vec![KeyEvent::Named(KeyName::Escape), KeyEvent::Char('a')]
        );
    }

    #[test]
    fn single_byte_keys() {
        let mut decoder = EscapePrefixed::new();
        assert_eq!(
            decode_all(&mut decoder, "\n\r\x7f\tq é"),
            vec![
                KeyEvent::Named(KeyName::Enter),
                KeyEvent::Named(KeyName::Enter),
                KeyEvent::Named(KeyName::Backspace),
                KeyEvent::Named(KeyName::Tab),
                KeyEvent::Char('q'),
                KeyEvent::Char(' '),
                KeyEvent::Char('é'),
            ]
        );
    }

    #[test]
    fn truncated_sequence_reports_eof() {
        let mut decoder = EscapePrefixed::new();
        let err = decoder.decode(&mut source("\x1b")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    fn decode_bytes(decoder: &mut dyn KeyDecoder, input: &[u8]) -> Vec<KeyEvent> {
        let mut src = ByteSource::new(input);
        let mut out = Vec::new();
        while let Ok(event) = decoder.decode(&mut src) {
            out.push(event);
        }
        out
    }

    #[test]
    fn marker_prefixed_arrows_from_raw_bytes() {
        let mut decoder = MarkerPrefixed::new();
        assert_eq!(
            decode_bytes(&mut decoder, &[0xE0, b'H', 0xE0, b'P', b'a']),
            vec![
                KeyEvent::Named(KeyName::Up),
                KeyEvent::Named(KeyName::Down),
                KeyEvent::Char('a'),
            ]
        );
        assert_eq!(
            decode_bytes(&mut decoder, &[0xE0, b'K', 0xE0, b'M', 0xE0, b'z']),
            vec![
                KeyEvent::Named(KeyName::Left),
                KeyEvent::Named(KeyName::Right),
                KeyEvent::Char('z'),
            ]
        );
    }

    #[test]
    fn windows_source_keeps_the_marker_byte() {
        let queue = InputQueue::new();
        let mut reader = KeyReader::new(
            Platform::Windows.decoder(),
            Platform::Windows.source(&[0xE0, b'H', b'q'][..]),
            queue.clone(),
        );
        assert_eq!(reader.poll().unwrap(), KeyEvent::Named(KeyName::Up));
        assert_eq!(reader.poll().unwrap(), KeyEvent::Char('q'));
        assert!(reader.poll().is_err());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn byte_source_maps_bytes_one_to_one() {
        let mut src = ByteSource::new(&[0xE0u8, 0xC3, b'a'][..]);
        assert_eq!(src.read_char().unwrap(), MARKER);
        assert_eq!(src.read_char().unwrap(), '\u{c3}');
        assert_eq!(src.read_char().unwrap(), 'a');
        assert_eq!(
            src.read_char().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn marker_prefixed_single_keys() {
        let mut decoder = MarkerPrefixed::new();
        assert_eq!(
            decode_all(&mut decoder, "\r\x08\x1b\tA"),
            vec![
                KeyEvent::Named(KeyName::Enter),
                KeyEvent::Named(KeyName::Backspace),
                KeyEvent::Named(KeyName::Escape),
                KeyEvent::Named(KeyName::Tab),
                KeyEvent::Char('A'),
            ]
        );
    }

    #[test]
    fn invalid_utf8_becomes_replacement() {
        let mut src = Utf8Source::new(&[0xFFu8, b'a', 0xC3][..]);
        assert_eq!(src.read_char().unwrap(), char::REPLACEMENT_CHARACTER);
        assert_eq!(src.read_char().unwrap(), 'a');
        assert_eq!(src.read_char().unwrap(), char::REPLACEMENT_CHARACTER);
        assert!(src.read_char().is_err());
    }

    #[test]
    fn table_lookups() {
        let table = KeyTable::ESCAPE_PREFIXED;
        assert_eq!(table.lookup("\x1bB"), Some(KeyName::Down));
        assert_eq!(table.lookup("B"), None);
        assert_eq!(table.code(KeyName::Enter), Some("\n"));
        assert_eq!(Platform::Windows.table().code(KeyName::Up), Some("\u{e0}H"));
    }

    #[test]
    fn detected_platform_has_a_decoder() {
        let platform = Platform::detect().unwrap();
        let decoder = platform.decoder();
        assert_eq!(*decoder.table(), platform.table());
    }

    #[test]
    fn reader_pushes_each_key_once() {
        let queue = InputQueue::new();
        let mut reader = KeyReader::new(
            Platform::Posix.decoder(),
            Box::new(Utf8Source::new(&b"a\x1b[A"[..])),
            queue.clone(),
        );
        assert_eq!(reader.poll().unwrap(), KeyEvent::Char('a'));
        assert_eq!(reader.poll().unwrap(), KeyEvent::Named(KeyName::Up));
        assert!(reader.poll().is_err());
        assert_eq!(queue.len(), 2);
    }
}
