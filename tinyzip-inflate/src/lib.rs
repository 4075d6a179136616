//! A raw RFC 1951 DEFLATE decoder.
//!
//! No zlib or gzip wrapper, no preset dictionary, no output window: the
//! caller supplies the entire output buffer up front and back-references
//! read from already-written positions in that same buffer, since the
//! archive formats this decoder serves (ZIP's STORE/DEFLATE pair) already
//! know the uncompressed size before decoding starts.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod huffman;
mod inflate;
mod tables;

pub use huffman::HuffmanTable;
pub use inflate::{inflate, InflateOutcome};
