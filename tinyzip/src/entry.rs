/// Compression method recorded for a ZIP entry.
///
/// Only STORE and DEFLATE can be extracted; any other method is still
/// reported faithfully (so a caller can list an archive's contents even
/// if it can't extract every entry) but fails at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Method 0: bytes stored verbatim, no compression.
    Stored,
    /// Method 8: RFC 1951 DEFLATE.
    Deflate,
    /// Any other method number, recorded but not supported for extraction.
    Unknown(u16),
}

impl CompressionMethod {
    pub(crate) fn from_u16(raw: u16) -> Self {
        match raw {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            other => CompressionMethod::Unknown(other),
        }
    }
}

/// Maximum filename length this library will retain; ZIP filenames longer
/// than this are truncated (the archive's filename field length is not
/// itself capped, but 255 bytes plus a NUL is the long-standing practical
/// limit most tooling assumes).
pub const MAX_NAME_LEN: usize = 255;

/// Metadata for one entry located in a ZIP archive's central directory,
/// with the fields needed to extract it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    /// How the entry's data is compressed.
    pub compression_method: CompressionMethod,
    /// CRC-32 of the uncompressed data, as recorded in the local file
    /// header (zero and not meaningful when `has_data_descriptor` is set —
    /// use the data descriptor instead).
    pub crc32: u32,
    /// Size of the entry's data as stored in the archive.
    pub compressed_size: u32,
    /// Size of the entry's data once decompressed.
    pub uncompressed_size: u32,
    /// Byte offset in the archive where the entry's compressed data
    /// begins.
    pub data_offset: u64,
    /// Whether the true CRC-32 and sizes follow the compressed data in a
    /// data descriptor record, rather than being reliable in the local
    /// header.
    pub has_data_descriptor: bool,
    pub(crate) name_buf: [u8; MAX_NAME_LEN],
    pub(crate) name_len: u8,
}

impl FileEntry {
    /// The entry's filename, as recorded in the central directory.
    pub fn name(&self) -> &[u8] {
        &self.name_buf[..self.name_len as usize]
    }

    /// The entry's filename interpreted as UTF-8, if it is valid UTF-8.
    pub fn name_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_method_from_u16() {
        assert_eq!(CompressionMethod::from_u16(0), CompressionMethod::Stored);
        assert_eq!(CompressionMethod::from_u16(8), CompressionMethod::Deflate);
        assert_eq!(
            CompressionMethod::from_u16(99),
            CompressionMethod::Unknown(99)
        );
    }
}
