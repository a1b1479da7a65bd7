// Chunk: docs/chunks/gap_buffer - Byte gap buffer with a gapped line-length index

//! Line index for tracking line boundaries in the gap buffer.
//!
//! Stores the byte length of every line (terminating `\n` included) in an
//! array that has its own gap, mirroring the content buffer's gap:
//!
//! ```text
//! "ab\ncd|e\nf"       (| is the cursor)
//!
//! lengths: [3, 4, _, _, _, _, 1]
//!              ^gap_start     ^gap_end
//! ```
//!
//! The slot at `gap_start` belongs to the line holding the cursor. Moving the
//! cursor across a `\n` moves exactly one slot across the gap, so line and
//! column queries never rescan the content. Line start offsets are not
//! cached; they are summed on demand, which is O(current line number).
//!
//! The index does not validate its inputs. It is driven only by
//! [`GapBuffer`](crate::GapBuffer), which checks line boundaries before
//! notifying it.

use crate::config::BufferConfig;

/// A cursor transition across a line boundary.
///
/// Every content-side operation that moves over or deletes a `\n` is paired
/// with exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCrossing {
    /// The cursor moved onto the previous line.
    Up,
    /// The cursor moved onto the next line.
    Down,
    /// The `\n` ending the previous line was deleted.
    MergeIntoPrevious,
    /// The `\n` ending the current line was deleted.
    MergeIntoNext,
}

/// Gap buffer of line lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// `[lines up to the current one | gap | lines after the current one]`
    lengths: Vec<usize>,
    /// Slot of the current line.
    gap_start: usize,
    /// First slot after the gap; equals `lengths.len()` on the last line.
    gap_end: usize,
    growth_factor: usize,
}

impl LineIndex {
    /// Creates an index for an empty buffer of `byte_capacity` bytes.
    pub fn new(byte_capacity: usize, config: &BufferConfig) -> Self {
        let slots = config.line_slots_for(byte_capacity);
        Self {
            lengths: vec![0; slots],
            gap_start: 0,
            gap_end: slots,
            growth_factor: config.growth_factor,
        }
    }

    /// Creates an index for a buffer holding `text`, cursor at its end.
    pub fn from_str(text: &str, byte_capacity: usize, config: &BufferConfig) -> Self {
        let mut index = Self::new(byte_capacity, config);
        index.insert(text, 0);
        index
    }

    /// Records the insertion of `text` at the absolute byte offset `pos`,
    /// which lies on the current line. The current line ends up being the
    /// last line touched by `text`.
    ///
    /// ```text
    /// \nfoo|bar\n                      current line: 7 ("foobar\n")
    /// \nfoo insert\n newline|bar\n     11 ("foo insert\n"), 12 (" newlinebar\n")
    /// ```
    pub fn insert(&mut self, text: &str, pos: usize) {
        if text.is_empty() {
            return;
        }

        let line_start = self.current_line_start();
        let line_len = self.current_line_length();
        debug_assert!(
            (line_start..=line_start + line_len).contains(&pos),
            "insert position {pos} outside current line {line_start}..={}",
            line_start + line_len
        );

        let mut lens = line_lengths(text);
        let count = lens.len();
        self.grow_to_fit(count + 1);

        // The old line's head joins the first inserted line, its tail the last.
        lens[0] += pos - line_start;
        lens[count - 1] += line_start + line_len - pos;

        self.lengths[self.gap_start..self.gap_start + count].copy_from_slice(&lens);
        self.gap_start += count - 1;
    }

    /// Applies a line-boundary crossing reported by the content buffer.
    pub fn cross(&mut self, crossing: LineCrossing) {
        tracing::trace!(?crossing, line = self.current_line(), "line crossing");
        match crossing {
            LineCrossing::Up => self.shift_to_previous_line(),
            LineCrossing::Down => self.shift_to_next_line(),
            LineCrossing::MergeIntoPrevious => self.merge_into_previous(),
            LineCrossing::MergeIntoNext => self.merge_into_next(),
        }
    }

    fn shift_to_previous_line(&mut self) {
        debug_assert!(!self.is_first_line(), "shift up from the first line");
        if self.is_first_line() {
            return;
        }
        self.gap_end -= 1;
        self.lengths[self.gap_end] = self.lengths[self.gap_start];
        self.gap_start -= 1;
    }

    fn shift_to_next_line(&mut self) {
        debug_assert!(!self.is_last_line(), "shift down from the last line");
        if self.is_last_line() {
            return;
        }
        self.gap_start += 1;
        self.lengths[self.gap_start] = self.lengths[self.gap_end];
        self.gap_end += 1;
    }

    fn merge_into_previous(&mut self) {
        debug_assert!(!self.is_first_line(), "merge into previous on the first line");
        if self.is_first_line() {
            return;
        }
        let current = self.lengths[self.gap_start];
        self.gap_start -= 1;
        let previous = self.lengths[self.gap_start].saturating_sub(1);
        self.lengths[self.gap_start] = previous + current;
    }

    fn merge_into_next(&mut self) {
        debug_assert!(!self.is_last_line(), "merge into next on the last line");
        if self.is_last_line() {
            return;
        }
        let next = self.lengths[self.gap_end];
        self.gap_end += 1;
        let current = self.lengths[self.gap_start].saturating_sub(1);
        self.lengths[self.gap_start] = current + next;
    }

    /// Shortens the current line by `width` bytes; never goes below zero.
    pub fn shorten_current_line(&mut self, width: usize) {
        let slot = &mut self.lengths[self.gap_start];
        *slot = slot.saturating_sub(width);
    }

    /// Byte offset of the first character of the current line.
    pub fn current_line_start(&self) -> usize {
        self.lengths[..self.gap_start].iter().sum()
    }

    /// Byte offset of the last character of the current line, its `\n`
    /// included. A zero-length line ends where it starts.
    #[allow(dead_code)]
    pub fn current_line_end(&self) -> usize {
        let end: usize = self.lengths[..=self.gap_start].iter().sum();
        if self.current_line_length() == 0 {
            return end;
        }
        end - 1
    }

    /// 1-based number of the current line.
    pub fn current_line(&self) -> usize {
        self.gap_start + 1
    }

    /// Length of the current line in bytes, `\n` included.
    pub fn current_line_length(&self) -> usize {
        self.lengths[self.gap_start]
    }

    pub fn is_first_line(&self) -> bool {
        self.gap_start == 0
    }

    pub fn is_last_line(&self) -> bool {
        self.gap_end == self.lengths.len()
    }

    /// Number of lines, which is one more than the number of `\n` in the content.
    pub fn line_count(&self) -> usize {
        self.gap_start + 1 + (self.lengths.len() - self.gap_end)
    }

    /// Total slots, gap included.
    #[allow(dead_code)]
    pub fn capacity(&self) -> usize {
        self.lengths.len()
    }

    /// Line lengths in document order.
    #[allow(dead_code)]
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.lengths[..=self.gap_start]
            .iter()
            .chain(self.lengths[self.gap_end..].iter())
            .copied()
    }

    /// Grows the slot array until the gap spans at least `needed` slots,
    /// keeping the slots before and after the gap at their respective ends.
    fn grow_to_fit(&mut self, needed: usize) {
        if self.gap_end - self.gap_start >= needed {
            return;
        }

        let old_size = self.lengths.len();
        let tail = old_size - self.gap_end;
        let mut new_size = old_size.max(1);
        while new_size - tail - self.gap_start < needed {
            new_size *= self.growth_factor;
        }

        let mut grown = vec![0; new_size];
        grown[..=self.gap_start].copy_from_slice(&self.lengths[..=self.gap_start]);
        let new_gap_end = new_size - tail;
        grown[new_gap_end..].copy_from_slice(&self.lengths[self.gap_end..]);

        self.lengths = grown;
        self.gap_end = new_gap_end;
        tracing::debug!(old_size, new_size, "grew line index");
    }
}

/// Byte lengths of the lines in `text`, each `\n` counted with its line.
///
/// A trailing `\n` (and the empty string) yields a final zero-length line:
///
/// ```text
/// line_lengths("\nfunny\n") == [1, 6, 0]
/// ```
pub fn line_lengths(text: &str) -> Vec<usize> {
    let mut lens: Vec<usize> = text.split_inclusive('\n').map(str::len).collect();
    if text.is_empty() || text.ends_with('\n') {
        lens.push(0);
    }
    lens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn index_with(lengths: Vec<usize>, gap_start: usize, gap_end: usize) -> LineIndex {
        LineIndex {
            lengths,
            gap_start,
            gap_end,
            growth_factor: 2,
        }
    }

    fn from_str(text: &str, capacity: usize) -> LineIndex {
        LineIndex::from_str(text, capacity, &BufferConfig::default())
    }

    #[test_case("", vec![0] ; "empty")]
    #[test_case("Hello", vec![5] ; "single line")]
    #[test_case("\nfunny\n", vec![1, 6, 0] ; "leading and trailing newline")]
    #[test_case("12\n12\n12\n12", vec![3, 3, 3, 2] ; "unterminated last line")]
    #[test_case("\n\n", vec![1, 1, 0] ; "only newlines")]
    #[test_case("阿保\n", vec![7, 0] ; "multibyte")]
    fn test_line_lengths(text: &str, expected: Vec<usize>) {
        assert_eq!(line_lengths(text), expected);
    }

    #[test]
    fn test_new_sizes_from_capacity() {
        let config = BufferConfig::default();
        assert_eq!(LineIndex::new(1024, &config).capacity(), 102);
        assert_eq!(LineIndex::new(10, &config).capacity(), 10);

        let index = LineIndex::new(0, &config);
        assert_eq!(index.capacity(), 10);
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.current_line(), 1);
        assert!(index.is_first_line());
        assert!(index.is_last_line());
    }

    #[test]
    fn test_line_start_end_ascending() {
        let index = index_with(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0], 8, 10);
        assert_eq!(index.current_line_start(), 1 + 2 + 3 + 4 + 5 + 6 + 7 + 8);
        assert_eq!(index.current_line_end(), 1 + 2 + 3 + 4 + 5 + 6 + 7 + 8 + 8);
    }

    #[test]
    fn test_line_start_end_all_twos() {
        let index = index_with(vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 0], 8, 10);
        assert_eq!(index.current_line_start(), 8 * 2);
        assert_eq!(index.current_line_end(), 8 * 2 + 1);
    }

    #[test]
    fn test_line_end_of_empty_line_is_its_start() {
        let index = index_with(vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 0], 9, 10);
        assert_eq!(index.current_line_start(), 9 * 2);
        assert_eq!(index.current_line_end(), 9 * 2);
    }

    #[test]
    fn test_from_str_layout() {
        let index = from_str("12\n12\n12\n12", 10);
        assert_eq!(index, index_with(vec![3, 3, 3, 2, 0, 0, 0, 0, 0, 0], 3, 10));
        assert_eq!(index.current_line(), 4);
        assert_eq!(index.line_count(), 4);
    }

    #[test_case("12\n12\n12\n12\n12\n12\n12\n12\n12", "34567890", 25,
        vec![3, 3, 3, 3, 3, 3, 3, 3, 10], 9 ; "extend last line")]
    #[test_case("12\n12\n12\n12", "12\n12\n12\n12\n12", 10,
        vec![3, 3, 3, 4, 3, 3, 3, 3], 8 ; "split inside line")]
    #[test_case("12\n12", "\n", 5, vec![3, 3, 0], 3 ; "newline at end")]
    #[test_case("12\n12", "\n", 4, vec![3, 2, 1], 3 ; "newline inside line")]
    #[test_case("Hello ", "\nfunny\n", 6, vec![7, 6, 0], 3 ; "line on its own")]
    #[test_case("Hello ", "\nfunny\n", 5, vec![6, 6, 1], 3 ; "line on its own before space")]
    fn test_insert(initial: &str, text: &str, pos: usize, expected: Vec<usize>, line: usize) {
        let mut index = from_str(initial, 20);
        index.insert(text, pos);
        assert_eq!(index.lengths().collect::<Vec<_>>(), expected);
        assert_eq!(index.current_line(), line);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut index = from_str("ab\ncd", 20);
        let before = index.clone();
        index.insert("", 4);
        assert_eq!(index, before);
    }

    #[test]
    fn test_insert_grows_repeatedly() {
        let mut index = from_str("", 10);
        let text = "x\n".repeat(25);
        index.insert(&text, 0);

        assert_eq!(index.capacity(), 40);
        assert_eq!(index.line_count(), 26);
        assert_eq!(index.current_line(), 26);
        assert_eq!(index.lengths().filter(|&len| len == 2).count(), 25);
    }

    #[test]
    fn test_grow_keeps_lines_after_gap() {
        let mut index = from_str("a\nb\nc\nd\ne\nf\ng\nh\ni\nj", 10);
        assert_eq!(index.capacity(), 20);
        // Walk to line 3 so seven lines sit after the gap.
        for _ in 0..7 {
            index.cross(LineCrossing::Up);
        }
        assert_eq!(index.current_line(), 3);

        index.insert(&"\n".repeat(12), 4);
        assert_eq!(index.capacity(), 40);

        let mut expected = vec![2, 2];
        expected.extend(std::iter::repeat(1).take(12));
        expected.extend([2, 2, 2, 2, 2, 2, 2, 1]);
        assert_eq!(index.lengths().collect::<Vec<_>>(), expected);
        assert_eq!(index.current_line(), 15);
    }

    #[test]
    fn test_up_and_down() {
        let mut index = from_str("ab\ncde\nf", 10);
        assert_eq!(index.current_line(), 3);
        assert_eq!(index.current_line_start(), 7);

        index.cross(LineCrossing::Up);
        assert_eq!(index.current_line(), 2);
        assert_eq!(index.current_line_length(), 4);
        assert_eq!(index.current_line_start(), 3);
        assert_eq!(index.current_line_end(), 6);
        assert!(!index.is_last_line());

        index.cross(LineCrossing::Up);
        assert!(index.is_first_line());
        assert_eq!(index.current_line_length(), 3);

        index.cross(LineCrossing::Down);
        index.cross(LineCrossing::Down);
        assert!(index.is_last_line());
        assert_eq!(index.current_line_length(), 1);
        assert_eq!(index.lengths().collect::<Vec<_>>(), vec![3, 4, 1]);
    }

    #[test]
    fn test_merge_into_previous() {
        // "ab\ncd" with the cursor at the start of "cd", then backspace.
        let mut index = from_str("ab\ncd", 10);
        index.cross(LineCrossing::MergeIntoPrevious);
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.current_line_length(), 4);
        assert_eq!(index.lengths().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_merge_into_next() {
        // "ab\ncd" with the cursor before the newline, then delete.
        let mut index = from_str("ab\ncd", 10);
        index.cross(LineCrossing::Up);
        index.cross(LineCrossing::MergeIntoNext);
        assert_eq!(index.line_count(), 1);
        assert!(index.is_last_line());
        assert_eq!(index.lengths().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_shorten_current_line_floors_at_zero() {
        let mut index = from_str("abc", 10);
        index.shorten_current_line(2);
        assert_eq!(index.current_line_length(), 1);
        index.shorten_current_line(3);
        assert_eq!(index.current_line_length(), 0);
        index.shorten_current_line(1);
        assert_eq!(index.current_line_length(), 0);
    }
}
