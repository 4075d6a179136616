use thiserror::Error;

/// Every way a tinyzip operation can fail.
///
/// Unlike the sticky-flag error model of a byte-budget-constrained C
/// implementation, each fallible function here returns a `Result`
/// immediately on the first problem it finds — callers never need to
/// check a side-channel flag after the fact.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A read past the end of the underlying byte source.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// No end-of-central-directory record could be found in the archive.
    #[error("end of central directory record not found")]
    EndOfCentralDirectoryNotFound,

    /// `locate_by_index` or `locate_by_name` found no matching entry.
    #[error("no matching central directory entry")]
    EntryNotFound,

    /// The local file header's magic number didn't match.
    #[error("local file header signature mismatch")]
    LocalHeaderMagicMismatch,

    /// The entry uses a compression method other than STORE or DEFLATE.
    #[error("unsupported compression method {0}")]
    UnsupportedCompressionMethod(u16),

    /// A DEFLATE block header used the reserved BTYPE value (3).
    #[error("reserved deflate block type")]
    ReservedBlockType,

    /// A Huffman code length exceeded the maximum of 15 bits.
    #[error("huffman code length exceeds 15 bits")]
    HuffmanCodeTooLong,

    /// A Huffman code failed to resolve to a symbol within 15 bits.
    #[error("huffman code did not terminate within 15 bits")]
    HuffmanCodeUnterminated,

    /// The code-length sequence of a dynamic block was malformed (a
    /// repeat code with nothing to repeat, or too many lengths decoded).
    #[error("malformed dynamic huffman code-length sequence")]
    MalformedDynamicBlock,

    /// A length/literal symbol outside the valid 0..=285 range.
    #[error("invalid length symbol {0}")]
    InvalidLengthSymbol(u16),

    /// A distance symbol outside the valid 0..=29 range.
    #[error("invalid distance symbol {0}")]
    InvalidDistanceSymbol(u16),

    /// A back-reference pointed before the start of the output buffer.
    #[error("back-reference distance {distance} exceeds {written} bytes written so far")]
    BackReferenceBeforeStart {
        /// The offending distance.
        distance: usize,
        /// Bytes written to the output buffer so far.
        written: usize,
    },

    /// A literal or back-reference would write past the end of the
    /// caller-supplied output buffer.
    #[error("output buffer is full")]
    OutputOverflow,

    /// The number of bytes decoded didn't match the entry's recorded
    /// uncompressed size.
    #[error("decoded size {actual} does not match expected size {expected}")]
    OutputSizeMismatch {
        /// Size recorded in the archive.
        expected: u32,
        /// Size actually produced by decoding.
        actual: u32,
    },

    /// The computed CRC-32 of the decoded bytes didn't match the one
    /// recorded for the entry.
    #[error("crc-32 mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        /// CRC recorded in the archive (or data descriptor).
        expected: u32,
        /// CRC computed over the decoded bytes.
        computed: u32,
    },
}

/// Shorthand for `Result<T, Error>`, used throughout the tinyzip crates.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedCompressionMethod(99);
        assert_eq!(err.to_string(), "unsupported compression method 99");

        let err = Error::CrcMismatch {
            expected: 0xCBF4_3926,
            computed: 0,
        };
        assert!(err.to_string().contains("0xcbf43926"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::UnexpectedEof, Error::UnexpectedEof);
        assert_ne!(Error::UnexpectedEof, Error::EntryNotFound);
    }
}
