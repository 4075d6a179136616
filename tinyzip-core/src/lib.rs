//! Shared primitives for the tinyzip crates.
//!
//! ```text
//!  L3  tinyzip          ZIP central directory + extractor
//!       |
//!  L2  tinyzip-inflate   RFC 1951 DEFLATE decoder
//!       |
//!  L1  tinyzip-core      byte source, bit reader, CRC-32, error type  (this crate)
//! ```
//!
//! Nothing in this crate allocates on the heap. Input bytes are supplied
//! through [`ByteSource`], a single-byte random-access callback, rather
//! than a `Read`/`Seek` pair, so callers can back it with a memory-mapped
//! file, a network range-read, or a plain slice without an adapter layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod byte_source;
mod bitreader;
mod crc;
mod error;

pub use byte_source::{read_u16_le, read_u32_le, ByteSource, CallbackSource};
pub use bitreader::BitReader;
pub use crc::Crc32;
pub use error::{Error, Result};

/// Convenience re-export of the handful of types most callers need.
pub mod prelude {
    pub use crate::{BitReader, ByteSource, Crc32, Error, Result};
}
