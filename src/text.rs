//! Text manipulation utilities.
//!
//! Position mapping between LSP (UTF-16) columns and byte offsets.

pub mod position;

pub use position::{
    PositionMapper, compute_line_starts, convert_byte_to_utf16_in_line,
    convert_utf16_to_byte_in_line, line_text,
};
