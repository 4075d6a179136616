use tinyzip_core::{read_u16_le, read_u32_le, ByteSource, Error, Result};

use crate::entry::{CompressionMethod, FileEntry, MAX_NAME_LEN};

pub(crate) const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;
pub(crate) const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
pub(crate) const LOCAL_FILE_SIG: u32 = 0x0403_4b50;
pub(crate) const DATA_DESCRIPTOR_SIG: u32 = 0x0807_4b50;

const MIN_EOCD_LEN: u64 = 22;
const MAX_COMMENT_LEN: u64 = 65535;
const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// Finds the end-of-central-directory record by scanning backward from
/// the end of the archive, and returns the central directory's starting
/// offset.
///
/// The signature alone isn't sufficient evidence, since it can legally
/// appear inside a trailing archive comment or inside compressed entry
/// data; a candidate is only accepted when the comment-length field it
/// carries is consistent with the archive actually ending exactly where
/// that comment would end.
pub(crate) fn find_central_directory_offset<R: ByteSource + ?Sized>(
    source: &R,
    archive_size: u64,
) -> Result<u64> {
    if archive_size < MIN_EOCD_LEN {
        return Err(Error::EndOfCentralDirectoryNotFound);
    }

    let lowest = archive_size.saturating_sub(MIN_EOCD_LEN + MAX_COMMENT_LEN);
    let mut offset = archive_size - MIN_EOCD_LEN;

    loop {
        if read_u32_le(source, offset)? == END_OF_CENTRAL_DIR_SIG {
            let comment_len = read_u16_le(source, offset + 20)? as u64;
            if offset + MIN_EOCD_LEN + comment_len == archive_size {
                return Ok(read_u32_le(source, offset + 16)? as u64);
            }
        }
        if offset == lowest {
            break;
        }
        offset -= 1;
    }

    Err(Error::EndOfCentralDirectoryNotFound)
}

pub(crate) enum Selector<'a> {
    Index(u32),
    Name(&'a [u8]),
}

/// Scans the central directory starting at `central_dir_offset` looking
/// for an entry matching `selector`, then cross-reads its local file
/// header to build a [`FileEntry`].
pub(crate) fn locate<R: ByteSource + ?Sized>(
    source: &R,
    central_dir_offset: u64,
    selector: Selector<'_>,
) -> Result<FileEntry> {
    let mut offset = central_dir_offset;
    let mut remaining_index = match selector {
        Selector::Index(i) => i as i64,
        Selector::Name(_) => -1,
    };

    loop {
        // A signature mismatch ends the scan: either this is genuinely
        // the end of the central directory, or the archive is truncated
        // and there's nothing further to find either way.
        let magic = read_u32_le(source, offset)?;
        if magic != CENTRAL_DIR_SIG {
            return Err(Error::EntryNotFound);
        }

        let name_len = read_u16_le(source, offset + 28)? as u64;
        let extra_len = read_u16_le(source, offset + 30)? as u64;
        let comment_len = read_u16_le(source, offset + 32)? as u64;

        let matched = match selector {
            Selector::Index(_) => {
                let is_match = remaining_index == 0;
                remaining_index -= 1;
                is_match
            }
            Selector::Name(name) => {
                name_len as usize == name.len() && names_equal(source, offset + 46, name)?
            }
        };

        if matched {
            let local_header_offset = read_u32_le(source, offset + 42)? as u64;
            return read_entry(source, local_header_offset, offset + 46, name_len as usize);
        }

        offset += 46 + name_len + extra_len + comment_len;
    }
}

fn names_equal<R: ByteSource + ?Sized>(source: &R, start: u64, name: &[u8]) -> Result<bool> {
    for (i, &want) in name.iter().enumerate() {
        let got = source.read_byte(start + i as u64).ok_or(Error::UnexpectedEof)?;
        if got != want {
            return Ok(false);
        }
    }
    Ok(true)
}

fn read_entry<R: ByteSource + ?Sized>(
    source: &R,
    local_header_offset: u64,
    cdir_name_offset: u64,
    name_len: usize,
) -> Result<FileEntry> {
    if read_u32_le(source, local_header_offset)? != LOCAL_FILE_SIG {
        return Err(Error::LocalHeaderMagicMismatch);
    }

    let flags = read_u16_le(source, local_header_offset + 6)?;
    let method_raw = read_u16_le(source, local_header_offset + 8)?;
    let crc32 = read_u32_le(source, local_header_offset + 14)?;
    let compressed_size = read_u32_le(source, local_header_offset + 18)?;
    let uncompressed_size = read_u32_le(source, local_header_offset + 22)?;
    let lh_name_len = read_u16_le(source, local_header_offset + 26)? as u64;
    let lh_extra_len = read_u16_le(source, local_header_offset + 28)? as u64;
    let data_offset = local_header_offset + 30 + lh_name_len + lh_extra_len;

    let mut entry = FileEntry {
        compression_method: CompressionMethod::from_u16(method_raw),
        crc32,
        compressed_size,
        uncompressed_size,
        data_offset,
        has_data_descriptor: flags & FLAG_DATA_DESCRIPTOR != 0,
        name_buf: [0u8; MAX_NAME_LEN],
        name_len: 0,
    };

    // The filename comes from the central directory record, not the
    // local header: the central directory is guaranteed to enumerate
    // every entry, so that's the copy callers expect when listing an
    // archive, even though the local header is what's authoritative for
    // where the data itself starts.
    let copy_len = name_len.min(MAX_NAME_LEN);
    for i in 0..copy_len {
        entry.name_buf[i] = source
            .read_byte(cdir_name_offset + i as u64)
            .ok_or(Error::UnexpectedEof)?;
    }
    entry.name_len = copy_len as u8;

    Ok(entry)
}
