use tinyzip_core::{BitReader, ByteSource, Error, Result};

const MAX_CODE_LENGTH: usize = 15;

/// A canonical Huffman decode table over an alphabet of at most `N`
/// symbols.
///
/// Rather than a materialized binary tree, this keeps only a per-length
/// histogram (`counts`) and a list of symbols sorted by ascending code
/// length then ascending symbol value (`symbols`). Decoding walks bit by
/// bit, tracking the first code value seen at each length; a code
/// terminates as soon as it falls within the count of codes at the
/// current length, and the symbol is read out of `symbols` at an offset
/// derived from how many shorter codes came before it. This needs no
/// allocation and no pointer chasing, at the cost of being, bit for bit,
/// no faster than the length of the code being decoded — fine for an
/// alphabet this small.
#[derive(Debug, Clone)]
pub struct HuffmanTable<const N: usize> {
    counts: [u16; MAX_CODE_LENGTH + 1],
    symbols: [u16; N],
}

impl<const N: usize> HuffmanTable<N> {
    /// Builds a table from a code length per symbol (0 meaning "this
    /// symbol is unused").
    pub fn build(code_lengths: &[u8]) -> Result<Self> {
        debug_assert!(code_lengths.len() <= N);

        let mut counts = [0u16; MAX_CODE_LENGTH + 1];
        for &len in code_lengths {
            if len as usize > MAX_CODE_LENGTH {
                return Err(Error::HuffmanCodeTooLong);
            }
            counts[len as usize] += 1;
        }

        let mut symbols = [0u16; N];
        let mut next = 0usize;
        for length in 1..=MAX_CODE_LENGTH {
            for (symbol, &len) in code_lengths.iter().enumerate() {
                if len as usize == length {
                    symbols[next] = symbol as u16;
                    next += 1;
                }
            }
        }

        Ok(Self { counts, symbols })
    }

    /// Decodes one symbol from `reader`, one bit at a time, MSB-first.
    pub fn decode<R: ByteSource + ?Sized>(&self, reader: &mut BitReader<'_, R>) -> Result<u16> {
        let mut code: u32 = 0;
        let mut code_start: u32 = 0;
        let mut symbol_offset: u32 = 0;

        for length in 1..=MAX_CODE_LENGTH {
            code = (code << 1) | reader.read_bit()?;
            let count = self.counts[length] as u32;
            if code.wrapping_sub(code_start) < count {
                let index = symbol_offset + (code - code_start);
                return Ok(self.symbols[index as usize]);
            }
            code_start = (code_start + count) << 1;
            symbol_offset += count;
        }

        Err(Error::HuffmanCodeUnterminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Three symbols with lengths 1, 2, 2: canonical codes are
    // 0 -> "0", 1 -> "10", 2 -> "11".
    fn three_symbol_lengths() -> [u8; 3] {
        [1, 2, 2]
    }

    #[test]
    fn test_build_rejects_length_over_15() {
        let lengths = [16u8];
        assert_eq!(
            HuffmanTable::<1>::build(&lengths).unwrap_err(),
            Error::HuffmanCodeTooLong
        );
    }

    #[test]
    fn test_decode_each_canonical_code() {
        let table = HuffmanTable::<3>::build(&three_symbol_lengths()).unwrap();

        // Huffman code bits are read one at a time in transmission order,
        // MSB of the code first; since the underlying bit reader pulls
        // its bits LSB-first per byte, the first transmitted bit is the
        // *lowest* bit of the raw byte.

        // Symbol 0, code "0": first bit 0.
        let data = [0b0000_0000u8];
        let mut r = BitReader::new(data.as_slice(), 0);
        assert_eq!(table.decode(&mut r).unwrap(), 0);

        // Symbol 1, code "10": first bit 1, second bit 0.
        let data = [0b0000_0001u8];
        let mut r = BitReader::new(data.as_slice(), 0);
        assert_eq!(table.decode(&mut r).unwrap(), 1);

        // Symbol 2, code "11": first bit 1, second bit 1.
        let data = [0b0000_0011u8];
        let mut r = BitReader::new(data.as_slice(), 0);
        assert_eq!(table.decode(&mut r).unwrap(), 2);
    }

    #[test]
    fn test_decode_unterminated_is_an_error() {
        // A single-symbol table with code length 15 built from all-zero
        // bits never terminates if the stream runs out first.
        let mut lengths = [0u8; 1];
        lengths[0] = 15;
        let table = HuffmanTable::<1>::build(&lengths).unwrap();
        let data: [u8; 1] = [0x00];
        let mut r = BitReader::new(data.as_slice(), 0);
        assert_eq!(table.decode(&mut r), Err(Error::UnexpectedEof));
    }
}
