use tinyzip_core::{read_u32_le, ByteSource, Crc32, Error, Result};

use crate::directory::{self, Selector, DATA_DESCRIPTOR_SIG};
use crate::entry::{CompressionMethod, FileEntry};

/// A ZIP archive opened for reading.
///
/// Holds only the archive's total size and its central directory offset;
/// every lookup re-scans the central directory from there, which keeps
/// this type `Copy`-free-state-free and avoids building an index up
/// front for archives that are only ever queried for one or two entries.
pub struct ZipArchive<'a, R: ByteSource + ?Sized> {
    source: &'a R,
    central_dir_offset: u64,
}

impl<'a, R: ByteSource + ?Sized> ZipArchive<'a, R> {
    /// Opens an archive of `archive_size` bytes backed by `source`,
    /// locating its end-of-central-directory record.
    pub fn open(source: &'a R, archive_size: u64) -> Result<Self> {
        let central_dir_offset = directory::find_central_directory_offset(source, archive_size)?;
        Ok(Self {
            source,
            central_dir_offset,
        })
    }

    /// Locates the `index`-th entry in the central directory (0-based).
    pub fn locate_by_index(&self, index: u32) -> Result<FileEntry> {
        directory::locate(self.source, self.central_dir_offset, Selector::Index(index))
    }

    /// Locates the entry whose filename matches `name` exactly.
    pub fn locate_by_name(&self, name: &[u8]) -> Result<FileEntry> {
        directory::locate(self.source, self.central_dir_offset, Selector::Name(name))
    }

    /// Extracts `entry` into `output`, returning the number of bytes
    /// written.
    ///
    /// Validates both the decoded size against the entry's recorded
    /// uncompressed size, and the CRC-32 of the decoded bytes against the
    /// entry's recorded checksum (or, when the entry has a trailing data
    /// descriptor, the checksum recorded there instead).
    pub fn extract(&self, entry: &FileEntry, output: &mut [u8]) -> Result<usize> {
        let (written, next_offset) = match entry.compression_method {
            CompressionMethod::Stored => self.extract_stored(entry, output)?,
            CompressionMethod::Deflate => self.extract_deflate(entry, output)?,
            CompressionMethod::Unknown(method) => {
                return Err(Error::UnsupportedCompressionMethod(method))
            }
        };

        if written as u32 != entry.uncompressed_size {
            return Err(Error::OutputSizeMismatch {
                expected: entry.uncompressed_size,
                actual: written as u32,
            });
        }

        let computed = Crc32::compute(&output[..written]);
        let expected = if entry.has_data_descriptor {
            self.read_data_descriptor_crc(next_offset)?
        } else {
            entry.crc32
        };

        if computed != expected {
            return Err(Error::CrcMismatch { expected, computed });
        }

        Ok(written)
    }

    fn extract_stored(&self, entry: &FileEntry, output: &mut [u8]) -> Result<(usize, u64)> {
        let len = entry.uncompressed_size as usize;
        if len > output.len() {
            return Err(Error::OutputOverflow);
        }
        for i in 0..len {
            output[i] = self
                .source
                .read_byte(entry.data_offset + i as u64)
                .ok_or(Error::UnexpectedEof)?;
        }
        Ok((len, entry.data_offset + len as u64))
    }

    fn extract_deflate(&self, entry: &FileEntry, output: &mut [u8]) -> Result<(usize, u64)> {
        let outcome = tinyzip_inflate::inflate(self.source, entry.data_offset, output)?;
        Ok((outcome.bytes_written, outcome.next_offset))
    }

    /// A data descriptor optionally begins with a signature; when it's
    /// present the real CRC follows it, otherwise the first word at this
    /// offset *is* the CRC.
    fn read_data_descriptor_crc(&self, offset: u64) -> Result<u32> {
        let first_word = read_u32_le(self.source, offset)?;
        if first_word == DATA_DESCRIPTOR_SIG {
            read_u32_le(self.source, offset + 4)
        } else {
            Ok(first_word)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Builds a single-entry, single-disk ZIP archive with a STORE entry.
    fn build_stored_archive(name: &[u8], data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        let crc = Crc32::compute(data);

        let local_header_offset = buf.len() as u32;
        push_u32(&mut buf, directory::LOCAL_FILE_SIG);
        push_u16(&mut buf, 20);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0); // stored
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u32(&mut buf, crc);
        push_u32(&mut buf, data.len() as u32);
        push_u32(&mut buf, data.len() as u32);
        push_u16(&mut buf, name.len() as u16);
        push_u16(&mut buf, 0);
        buf.extend_from_slice(name);
        buf.extend_from_slice(data);

        let cdir_offset = buf.len() as u32;
        push_u32(&mut buf, directory::CENTRAL_DIR_SIG);
        push_u16(&mut buf, 20);
        push_u16(&mut buf, 20);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u32(&mut buf, crc);
        push_u32(&mut buf, data.len() as u32);
        push_u32(&mut buf, data.len() as u32);
        push_u16(&mut buf, name.len() as u16);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, local_header_offset);
        buf.extend_from_slice(name);
        let cdir_size = buf.len() as u32 - cdir_offset;

        push_u32(&mut buf, directory::END_OF_CENTRAL_DIR_SIG);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 1);
        push_u16(&mut buf, 1);
        push_u32(&mut buf, cdir_size);
        push_u32(&mut buf, cdir_offset);
        push_u16(&mut buf, 0);

        buf
    }

    #[test]
    fn test_extract_stored_entry() {
        let archive = build_stored_archive(b"hello.txt", b"hello world");
        let zip = ZipArchive::open(archive.as_slice(), archive.len() as u64).unwrap();
        let entry = zip.locate_by_name(b"hello.txt").unwrap();

        let mut out = [0u8; 32];
        let n = zip.extract(&entry, &mut out).unwrap();
        assert_eq!(&out[..n], b"hello world");
    }

    #[test]
    fn test_extract_crc_mismatch_is_an_error() {
        let mut archive = build_stored_archive(b"hello.txt", b"hello world");
        // Corrupt one byte of the stored data without updating the CRC.
        let data_pos = archive
            .windows(b"hello world".len())
            .position(|w| w == b"hello world")
            .unwrap();
        archive[data_pos] = b'H';

        let zip = ZipArchive::open(archive.as_slice(), archive.len() as u64).unwrap();
        let entry = zip.locate_by_name(b"hello.txt").unwrap();
        let mut out = [0u8; 32];
        assert!(matches!(
            zip.extract(&entry, &mut out),
            Err(Error::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_extract_into_undersized_buffer_is_an_error() {
        let archive = build_stored_archive(b"hello.txt", b"hello world");
        let zip = ZipArchive::open(archive.as_slice(), archive.len() as u64).unwrap();
        let entry = zip.locate_by_name(b"hello.txt").unwrap();
        let mut out = [0u8; 4];
        assert_eq!(zip.extract(&entry, &mut out), Err(Error::OutputOverflow));
    }

    #[test]
    fn test_open_rejects_archive_without_eocd() {
        let not_a_zip = b"this is not a zip file";
        let err = ZipArchive::open(not_a_zip.as_slice(), not_a_zip.len() as u64).unwrap_err();
        assert_eq!(err, Error::EndOfCentralDirectoryNotFound);
    }
}
