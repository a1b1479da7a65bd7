// Chunk: docs/chunks/gap_buffer - Byte gap buffer with a gapped line-length index

//! linegap-buffer: a UTF-8 gap buffer with line and column cursor tracking.
//!
//! This crate provides the backing store for a text editing component: a
//! single mutable text with a single cursor, optimized for edits close to the
//! cursor and for line/column addressed cursor motion. Rendering, input,
//! undo history and file I/O belong to the caller.
//!
//! # Overview
//!
//! The main type is [`GapBuffer`], which provides:
//! - Character-wise cursor motion left/right and line-wise motion up/down
//! - Insertion of arbitrary text and deletion on both sides of the cursor
//! - Byte and character columns, line numbers and line lengths at the cursor
//!
//! Internally the content lives in a byte gap buffer and the line structure
//! in a second gap buffer of line lengths, so line and column queries never
//! rescan the content.
//!
//! # Example
//!
//! ```
//! use linegap_buffer::{GapBuffer, Position};
//!
//! let mut buffer = GapBuffer::from_str("Hello World!");
//! for _ in 0..6 {
//!     buffer.move_left();
//! }
//! buffer.insert("\nfunny\n");
//! assert_eq!(buffer.line_col(), Position::new(3, 0));
//!
//! buffer.move_up();
//! let (left, right) = buffer.content_split_at_cursor();
//! assert_eq!(left, "Hello \n");
//! assert_eq!(right, "funny\nWorld!");
//! ```
//!
//! # Vertical motion
//!
//! Moving up or down lands as close as possible to the *desired column*: the
//! character column last set by horizontal motion or an edit. Consecutive
//! vertical moves keep aiming for the same column, so passing over a short
//! line does not lose the original position.
//!
//! # Limits
//!
//! Only `\n` ends a line (`\r` is ordinary content), columns count Unicode
//! scalar values rather than grapheme clusters, and there is exactly one
//! cursor.

mod config;
mod error;
mod gap_buffer;
mod line_index;
mod types;
mod utf8;

pub use config::{
    BufferConfig, DEFAULT_CAPACITY, GROWTH_FACTOR, LINE_CAPACITY_DIVISOR, MIN_LINE_SLOTS,
};
pub use error::{ConfigError, DecodeError};
pub use gap_buffer::GapBuffer;
pub use line_index::LineCrossing;
pub use types::Position;
