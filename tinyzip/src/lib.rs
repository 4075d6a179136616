//! A small-footprint ZIP reader: locate central directory entries by
//! index or name, then extract STORE or DEFLATE entries straight into a
//! caller-provided buffer.
//!
//! ```text
//!  L3  tinyzip          ZIP central directory + extractor  (this crate)
//!       |
//!  L2  tinyzip-inflate   RFC 1951 DEFLATE decoder
//!       |
//!  L1  tinyzip-core      byte source, bit reader, CRC-32, error type
//! ```
//!
//! No multi-disk archives, no ZIP64, no encryption, no archive writing —
//! this reads the common case of a single-disk ZIP file built from STORE
//! and DEFLATE entries.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod archive;
mod directory;
mod entry;

pub use archive::ZipArchive;
pub use entry::{CompressionMethod, FileEntry};
pub use tinyzip_core::{ByteSource, CallbackSource, Error, Result};
