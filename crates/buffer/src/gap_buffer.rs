// Chunk: docs/chunks/gap_buffer - Byte gap buffer with a gapped line-length index

//! Gap buffer implementation for efficient text editing.
//!
//! A gap buffer is a byte array with an unused region (the gap) at the
//! cursor. Insertions and deletions at the cursor only move the gap edges;
//! moving the cursor copies the bytes it passes over from one side of the gap
//! to the other.
//!
//! `"Hello world!"` with the cursor after `"Hello"`:
//!
//! ```text
//! Hello|<gap_start            gap_end>| world!
//! [H e l l o _ _ _ _ _ ' ' w o r l d !]
//! ```
//!
//! The content is stored as UTF-8 and every cursor operation moves over or
//! deletes exactly one encoded character. A [`LineIndex`] with its own gap
//! tracks the byte length of every line; each time the cursor crosses or
//! deletes a `\n`, the index is told through exactly one [`LineCrossing`].

use std::fmt;

use crate::config::{BufferConfig, DEFAULT_CAPACITY};
use crate::error::{ConfigError, DecodeError};
use crate::line_index::{LineCrossing, LineIndex};
use crate::types::Position;
use crate::utf8::{self, Decoded};

/// A UTF-8 gap buffer with line and column tracking for a single cursor.
///
/// All operations act on the cursor; there is no random access. Moving or
/// deleting past either end of the content, or moving vertically past the
/// first or last line, is a silent no-op.
///
/// # Panics
///
/// The buffer only stores whole characters, so its storage is always valid
/// UTF-8. If that ever stops being true, the operation that runs into the
/// broken sequence panics instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapBuffer {
    /// `[content before the cursor | gap | content after the cursor]`
    data: Vec<u8>,
    /// First byte of the gap; the cursor position.
    gap_start: usize,
    /// First byte after the gap.
    gap_end: usize,
    /// Character column that vertical motion tries to reach. Set by
    /// horizontal motion and edits, only read by `move_up`/`move_down`.
    desired_col: usize,
    lines: LineIndex,
    config: BufferConfig,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
    /// Every line crossing reported to the line index, in order.
    #[cfg(test)]
    crossings: Vec<LineCrossing>,
}

impl GapBuffer {
    /// Creates an empty buffer with the default capacity of 1024 bytes.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer that holds `capacity` bytes before growing.
    ///
    /// A capacity of 0 is allowed; the first insertion grows the buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(BufferConfig::default().with_capacity(capacity))
    }

    /// Creates an empty buffer from a custom configuration.
    pub fn with_config(config: BufferConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Creates a buffer holding `text` with the cursor at its end.
    ///
    /// Note: We don't implement `FromStr` because it requires returning `Result`,
    /// but building a GapBuffer from a string cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::from_str_with_capacity(text, DEFAULT_CAPACITY)
    }

    /// Creates a buffer holding `text` with the cursor at its end.
    ///
    /// The capacity is raised to twice the length of `text` if `capacity`
    /// would leave less room than that.
    pub fn from_str_with_capacity(text: &str, capacity: usize) -> Self {
        Self::build_from_str(text, BufferConfig::default().with_capacity(capacity))
    }

    /// Creates a buffer holding `text` from a custom configuration.
    pub fn from_str_with_config(text: &str, config: BufferConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build_from_str(text, config))
    }

    fn build(config: BufferConfig) -> Self {
        let capacity = config.capacity;
        Self {
            data: vec![0; capacity],
            gap_start: 0,
            gap_end: capacity,
            desired_col: 0,
            lines: LineIndex::new(capacity, &config),
            config,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
            #[cfg(test)]
            crossings: Vec::new(),
        }
    }

    fn build_from_str(text: &str, config: BufferConfig) -> Self {
        let size = config.capacity.max(text.len() * config.growth_factor);
        let mut data = vec![0; size];
        data[..text.len()].copy_from_slice(text.as_bytes());

        let mut buffer = Self {
            data,
            gap_start: text.len(),
            gap_end: size,
            desired_col: 0,
            lines: LineIndex::from_str(text, size, &config),
            config,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
            #[cfg(test)]
            crossings: Vec::new(),
        };
        buffer.desired_col = buffer.rune_col();
        buffer
    }

    // ==================== Content ====================

    fn before_gap(&self) -> &[u8] {
        &self.data[..self.gap_start]
    }

    fn after_gap(&self) -> &[u8] {
        &self.data[self.gap_end..]
    }

    /// Returns the whole content as a String.
    pub fn content(&self) -> String {
        let before = expect_decoded(utf8::as_str(self.before_gap()));
        let after = expect_decoded(utf8::as_str(self.after_gap()));
        let mut text = String::with_capacity(before.len() + after.len());
        text.push_str(before);
        text.push_str(after);
        text
    }

    /// Returns the content to the left and to the right of the cursor.
    pub fn content_split_at_cursor(&self) -> (String, String) {
        let before = expect_decoded(utf8::as_str(self.before_gap()));
        let after = expect_decoded(utf8::as_str(self.after_gap()));
        (before.to_owned(), after.to_owned())
    }

    /// Returns the length of the content in bytes.
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    /// Returns true if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the size of the storage in bytes, gap included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    // ==================== Cursor queries ====================

    /// Byte offset of the cursor in the content.
    pub fn cursor(&self) -> usize {
        self.gap_start
    }

    /// Number of bytes between the start of the current line and the cursor.
    pub fn col(&self) -> usize {
        self.gap_start.saturating_sub(self.lines.current_line_start())
    }

    /// Number of characters between the start of the current line and the cursor.
    pub fn rune_col(&self) -> usize {
        let line_start = self.lines.current_line_start();
        if self.gap_start < line_start {
            return 0;
        }
        expect_decoded(utf8::count_chars(&self.data[line_start..self.gap_start]))
    }

    /// Length of the current line in bytes, not counting its `\n`.
    pub fn current_line_length(&self) -> usize {
        let len = self.lines.current_line_length();
        if self.lines.is_last_line() {
            len
        } else {
            len.saturating_sub(1)
        }
    }

    /// 1-based number of the line holding the cursor.
    pub fn line(&self) -> usize {
        self.lines.current_line()
    }

    /// Line and byte column of the cursor.
    pub fn line_col(&self) -> Position {
        Position::new(self.line(), self.col())
    }

    /// Line and character column of the cursor.
    pub fn line_rune_col(&self) -> Position {
        Position::new(self.line(), self.rune_col())
    }

    /// Number of lines; an empty buffer has one.
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// The character column vertical motion aims for.
    pub fn desired_col(&self) -> usize {
        self.desired_col
    }

    // ==================== Horizontal motion ====================

    /// Moves the cursor one character to the left.
    pub fn move_left(&mut self) {
        if self.gap_start == 0 {
            return;
        }

        let decoded = self.decode_before_cursor();
        let width = decoded.width;
        self.data
            .copy_within(self.gap_start - width..self.gap_start, self.gap_end - width);
        self.gap_start -= width;
        self.gap_end -= width;

        if decoded.is_newline() {
            self.cross_line(LineCrossing::Up);
        }
        self.desired_col = self.rune_col();
        self.assert_line_index_consistent();
    }

    /// Moves the cursor one character to the right.
    pub fn move_right(&mut self) {
        if self.gap_end == self.data.len() {
            return;
        }

        let decoded = self.decode_after_cursor();
        let width = decoded.width;
        self.data
            .copy_within(self.gap_end..self.gap_end + width, self.gap_start);
        self.gap_start += width;
        self.gap_end += width;

        if decoded.is_newline() {
            self.cross_line(LineCrossing::Down);
        }
        self.desired_col = self.rune_col();
        self.assert_line_index_consistent();
    }

    // ==================== Vertical motion ====================

    /// Moves the cursor up one line, as close to the desired column as the
    /// line allows.
    ///
    /// ```text
    /// Some text        Some text        Some |text
    /// No          ->   No|         ->   No
    /// More |text       More text        More text
    /// ```
    pub fn move_up(&mut self) {
        if self.lines.is_first_line() {
            return;
        }

        self.cross_line(LineCrossing::Up);
        // The whole target line lies before the gap.
        let line_start = self.lines.current_line_start();
        let content_end = line_start + self.current_line_length();
        let target = self.advance_columns(line_start, content_end);

        let shift = self.gap_start - target;
        self.data
            .copy_within(target..self.gap_start, self.gap_end - shift);
        self.gap_start = target;
        self.gap_end -= shift;
        self.assert_line_index_consistent();
    }

    /// Moves the cursor down one line, as close to the desired column as the
    /// line allows.
    pub fn move_down(&mut self) {
        if self.lines.is_last_line() {
            return;
        }

        self.cross_line(LineCrossing::Down);
        // The whole target line lies after the gap; translate to storage offsets.
        let gap_len = self.gap_len();
        let line_start = self.lines.current_line_start() + gap_len;
        let content_end = line_start + self.current_line_length();
        let target = self.advance_columns(line_start, content_end);

        let shift = target - self.gap_end;
        self.data
            .copy_within(self.gap_end..target, self.gap_start);
        self.gap_start += shift;
        self.gap_end += shift;
        self.assert_line_index_consistent();
    }

    /// Walks up to `desired_col` characters from the storage offset `from`,
    /// stopping at `to`. Returns the storage offset reached.
    fn advance_columns(&self, from: usize, to: usize) -> usize {
        let mut offset = from;
        let mut col = 0;
        while offset < to && col < self.desired_col {
            offset += expect_decoded(utf8::decode_at(&self.data[..to], offset)).width;
            col += 1;
        }
        offset
    }

    // ==================== Mutations ====================

    /// Deletes the character before the cursor (Backspace).
    pub fn delete_left(&mut self) {
        if self.gap_start == 0 {
            return;
        }

        let decoded = self.decode_before_cursor();
        self.gap_start -= decoded.width;

        if decoded.is_newline() {
            self.cross_line(LineCrossing::MergeIntoPrevious);
        } else {
            self.lines.shorten_current_line(decoded.width);
        }
        self.desired_col = self.rune_col();
        self.assert_line_index_consistent();
    }

    /// Deletes the character after the cursor (Delete key).
    pub fn delete_right(&mut self) {
        if self.gap_end == self.data.len() {
            return;
        }

        let decoded = self.decode_after_cursor();
        self.gap_end += decoded.width;

        if decoded.is_newline() {
            self.cross_line(LineCrossing::MergeIntoNext);
        } else {
            self.lines.shorten_current_line(decoded.width);
        }
        self.desired_col = self.rune_col();
        self.assert_line_index_consistent();
    }

    /// Inserts `text` at the cursor and moves the cursor to its end.
    ///
    /// `text` may be a single character or any number of lines.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.grow_to_fit(text.len() + 1);
        self.lines.insert(text, self.gap_start);
        self.data[self.gap_start..self.gap_start + text.len()].copy_from_slice(text.as_bytes());
        self.gap_start += text.len();

        self.desired_col = self.rune_col();
        self.assert_line_index_consistent();
    }

    /// Grows the storage by the configured factor until the gap holds at
    /// least `needed` bytes. The cursor stays where it is.
    fn grow_to_fit(&mut self, needed: usize) {
        if self.gap_len() >= needed {
            return;
        }

        let old_size = self.data.len();
        let content_len = self.len();
        let tail = old_size - self.gap_end;
        let mut new_size = old_size.max(1);
        while new_size - content_len < needed {
            new_size *= self.config.growth_factor;
        }

        let mut grown = vec![0; new_size];
        grown[..self.gap_start].copy_from_slice(self.before_gap());
        let new_gap_end = new_size - tail;
        grown[new_gap_end..].copy_from_slice(self.after_gap());

        self.data = grown;
        self.gap_end = new_gap_end;
        tracing::debug!(old_size, new_size, "grew gap buffer");
    }

    // ==================== Line index pairing ====================

    fn cross_line(&mut self, crossing: LineCrossing) {
        self.lines.cross(crossing);
        #[cfg(test)]
        self.crossings.push(crossing);
    }

    fn decode_before_cursor(&self) -> Decoded {
        expect_decoded(utf8::decode_before(self.before_gap(), self.gap_start))
    }

    fn decode_after_cursor(&self) -> Decoded {
        expect_decoded(utf8::decode_at(&self.data, self.gap_end))
    }

    // ==================== Validation ====================

    /// Debug assertion: verifies that the incremental line index matches
    /// the line lengths of the current content, and that its current line is
    /// the one holding the cursor.
    ///
    /// Checks every 64th mutation so the O(n) rebuild stays out of tight
    /// loops. Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        let content = self.content();
        let expected = crate::line_index::line_lengths(&content);
        let actual: Vec<usize> = self.lines.lengths().collect();
        assert_eq!(
            actual, expected,
            "line index drift detected after {} mutations!\n  cursor: {}\n  content len: {}",
            self.debug_mutation_count,
            self.gap_start,
            content.len(),
        );
        let cursor_line = self.before_gap().iter().filter(|&&b| b == b'\n').count() + 1;
        assert_eq!(
            self.lines.current_line(),
            cursor_line,
            "line index current line does not hold the cursor"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(expect_decoded(utf8::as_str(self.before_gap())))?;
        f.write_str(expect_decoded(utf8::as_str(self.after_gap())))
    }
}

/// Unwraps a decode result; a failure means the storage is corrupted.
fn expect_decoded<T>(result: Result<T, DecodeError>) -> T {
    result.unwrap_or_else(|err| {
        tracing::error!(%err, "gap buffer storage is not valid UTF-8");
        panic!("gap buffer storage is not valid UTF-8: {err}")
    })
}
