use crate::error::{Error, Result};

/// Random-access single-byte reader over an archive's bytes.
///
/// This stands in for the callback-based reads of a byte-budget-constrained
/// C implementation: `None` marks an out-of-bounds offset, matching that
/// design's `0x100` sentinel value without needing to smuggle it through a
/// wider integer type.
pub trait ByteSource {
    /// Returns the byte at `offset`, or `None` if `offset` is out of range.
    fn read_byte(&self, offset: u64) -> Option<u8>;
}

impl ByteSource for [u8] {
    fn read_byte(&self, offset: u64) -> Option<u8> {
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.get(i))
            .copied()
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn read_byte(&self, offset: u64) -> Option<u8> {
        (**self).read_byte(offset)
    }
}

/// Adapts a plain closure into a [`ByteSource`], for callers who have a
/// read callback rather than a slice or a type of their own.
pub struct CallbackSource<F>(pub F);

impl<F: Fn(u64) -> Option<u8>> ByteSource for CallbackSource<F> {
    fn read_byte(&self, offset: u64) -> Option<u8> {
        (self.0)(offset)
    }
}

/// Reads a little-endian `u16` starting at `offset`.
pub fn read_u16_le<R: ByteSource + ?Sized>(source: &R, offset: u64) -> Result<u16> {
    let b0 = source.read_byte(offset).ok_or(Error::UnexpectedEof)?;
    let b1 = source.read_byte(offset + 1).ok_or(Error::UnexpectedEof)?;
    Ok(u16::from_le_bytes([b0, b1]))
}

/// Reads a little-endian `u32` starting at `offset`.
pub fn read_u32_le<R: ByteSource + ?Sized>(source: &R, offset: u64) -> Result<u32> {
    let mut buf = [0u8; 4];
    for (i, slot) in buf.iter_mut().enumerate() {
        *slot = source
            .read_byte(offset + i as u64)
            .ok_or(Error::UnexpectedEof)?;
    }
    Ok(u32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_byte_source() {
        let data = [1u8, 2, 3];
        assert_eq!(data.as_slice().read_byte(0), Some(1));
        assert_eq!(data.as_slice().read_byte(2), Some(3));
        assert_eq!(data.as_slice().read_byte(3), None);
    }

    #[test]
    fn test_read_u16_le() {
        let data = [0x34u8, 0x12, 0xff];
        assert_eq!(read_u16_le(data.as_slice(), 0).unwrap(), 0x1234);
        assert_eq!(read_u16_le(data.as_slice(), 2), Err(Error::UnexpectedEof));
    }

    #[test]
    fn test_read_u32_le() {
        let data = [0x78u8, 0x56, 0x34, 0x12];
        assert_eq!(read_u32_le(data.as_slice(), 0).unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_callback_source() {
        let backing = vec![10u8, 20, 30];
        let src = CallbackSource(|offset: u64| backing.get(offset as usize).copied());
        assert_eq!(src.read_byte(1), Some(20));
        assert_eq!(src.read_byte(5), None);
    }
}
