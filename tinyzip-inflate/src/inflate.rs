use tinyzip_core::{BitReader, ByteSource, Error, Result};

use crate::huffman::HuffmanTable;
use crate::tables::{
    CODE_LENGTH_ORDER, DISTANCE_BASE, DISTANCE_EXTRA_BITS, LENGTH_BASE, LENGTH_EXTRA_BITS,
    MAX_CODE_LENGTH_SYMBOLS, MAX_DISTANCE_SYMBOLS, MAX_LITLEN_SYMBOLS,
};

/// Result of a successful [`inflate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateOutcome {
    /// Number of bytes written to the output buffer.
    pub bytes_written: usize,
    /// Byte offset in the source immediately after the last bit the
    /// decoder consumed. A ZIP entry's optional data descriptor, if any,
    /// starts here.
    pub next_offset: u64,
}

/// Decodes a raw DEFLATE stream starting at `start_offset` in `source`,
/// writing decompressed bytes into `output`.
///
/// Returns an error (rather than truncating) if the stream would produce
/// more bytes than `output` can hold.
pub fn inflate<R: ByteSource + ?Sized>(
    source: &R,
    start_offset: u64,
    output: &mut [u8],
) -> Result<InflateOutcome> {
    let mut engine = Engine {
        reader: BitReader::new(source, start_offset),
        output,
        written: 0,
    };
    engine.run()
}

struct Engine<'a, 'b, R: ByteSource + ?Sized> {
    reader: BitReader<'a, R>,
    output: &'b mut [u8],
    written: usize,
}

impl<R: ByteSource + ?Sized> Engine<'_, '_, R> {
    fn run(&mut self) -> Result<InflateOutcome> {
        loop {
            let is_final = self.reader.read_bit()? != 0;
            let block_type = self.reader.read_bits(2)?;
            match block_type {
                0 => self.stored_block()?,
                1 => self.block_data(None)?,
                2 => self.dynamic_block()?,
                _ => return Err(Error::ReservedBlockType),
            }
            if is_final {
                break;
            }
        }
        Ok(InflateOutcome {
            bytes_written: self.written,
            next_offset: self.reader.position(),
        })
    }

    fn emit_literal(&mut self, byte: u8) -> Result<()> {
        if self.written >= self.output.len() {
            return Err(Error::OutputOverflow);
        }
        self.output[self.written] = byte;
        self.written += 1;
        Ok(())
    }

    fn copy_match(&mut self, distance: usize, length: usize) -> Result<()> {
        if distance == 0 || distance > self.written {
            return Err(Error::BackReferenceBeforeStart {
                distance,
                written: self.written,
            });
        }
        if length > self.output.len() - self.written {
            return Err(Error::OutputOverflow);
        }
        // Copied byte by byte, not via `copy_from_slice`: when
        // `distance < length` the source range overlaps the destination
        // range, and that overlap is exactly how DEFLATE represents a
        // short repeating run.
        for _ in 0..length {
            let byte = self.output[self.written - distance];
            self.output[self.written] = byte;
            self.written += 1;
        }
        Ok(())
    }

    fn stored_block(&mut self) -> Result<()> {
        self.reader.reset_bitstate();
        let len = self.reader.read_bits(16)?;
        let _nlen = self.reader.read_bits(16)?;
        for _ in 0..len {
            let byte = self.reader.read_byte_aligned()?;
            self.emit_literal(byte)?;
        }
        Ok(())
    }

    /// Decodes literal/length/distance symbols until an end-of-block
    /// symbol (256) is seen, writing literals and back-references as they
    /// resolve.
    ///
    /// `dynamic` carries the block's Huffman tables, or `None` for a
    /// static block, which substitutes the fixed code's closed-form
    /// arithmetic decode instead of building (and looking up) a table for
    /// a code that never changes.
    fn block_data(
        &mut self,
        dynamic: Option<(&HuffmanTable<MAX_LITLEN_SYMBOLS>, &HuffmanTable<MAX_DISTANCE_SYMBOLS>)>,
    ) -> Result<()> {
        loop {
            let symbol = match dynamic {
                Some((litlen, _)) => litlen.decode(&mut self.reader)?,
                None => self.decode_static_litlen()?,
            };

            if symbol < 256 {
                self.emit_literal(symbol as u8)?;
                continue;
            }
            if symbol == 256 {
                return Ok(());
            }
            if symbol > 285 {
                return Err(Error::InvalidLengthSymbol(symbol));
            }

            let length_index = (symbol - 257) as usize;
            let extra = self.reader.read_bits(LENGTH_EXTRA_BITS[length_index] as u32)?;
            let length = LENGTH_BASE[length_index] as usize + 3 + extra as usize;

            let distance_symbol = match dynamic {
                Some((_, dist)) => dist.decode(&mut self.reader)?,
                None => self.reader.read_bits_msb_first(5)? as u16,
            };
            if distance_symbol as usize >= DISTANCE_BASE.len() {
                return Err(Error::InvalidDistanceSymbol(distance_symbol));
            }
            let distance_index = distance_symbol as usize;
            let dextra = self
                .reader
                .read_bits(DISTANCE_EXTRA_BITS[distance_index] as u32)?;
            let distance = DISTANCE_BASE[distance_index] as usize + dextra as usize;

            self.copy_match(distance, length)?;
        }
    }

    /// Static-block literal/length symbol decode, using the fixed code's
    /// closed-form arithmetic rather than a built Huffman table: the
    /// fixed code's canonical structure collapses to a 7-bit lookahead
    /// plus a branch, since every code in it is either 7, 8, or 9 bits.
    fn decode_static_litlen(&mut self) -> Result<u16> {
        let t = self.reader.read_bits_msb_first(7)?;
        let symbol = if t <= 0x17 {
            t + 256
        } else if t <= 0x5F {
            let bit = self.reader.read_bit()?;
            (t << 1 | bit).wrapping_sub(48)
        } else if t <= 0x63 {
            let bit = self.reader.read_bit()?;
            (t << 1 | bit) + 88
        } else {
            let bits = self.reader.read_bits_msb_first(2)?;
            (t << 2 | bits).wrapping_sub(256)
        };
        Ok(symbol as u16)
    }

    fn dynamic_block(&mut self) -> Result<()> {
        let hlit = self.reader.read_bits(5)? as usize + 257;
        let hdist = self.reader.read_bits(5)? as usize + 1;
        let hclen = self.reader.read_bits(4)? as usize + 4;

        let mut codelen_lengths = [0u8; MAX_CODE_LENGTH_SYMBOLS];
        for &position in CODE_LENGTH_ORDER.iter().take(hclen) {
            codelen_lengths[position] = self.reader.read_bits(3)? as u8;
        }
        let codelen_table = HuffmanTable::<MAX_CODE_LENGTH_SYMBOLS>::build(&codelen_lengths)?;

        let total = hlit + hdist;
        let mut all_lengths = [0u8; MAX_LITLEN_SYMBOLS + MAX_DISTANCE_SYMBOLS];
        let mut i = 0usize;
        while i < total {
            let symbol = codelen_table.decode(&mut self.reader)?;
            match symbol {
                0..=15 => {
                    all_lengths[i] = symbol as u8;
                    i += 1;
                }
                16 => {
                    if i == 0 {
                        return Err(Error::MalformedDynamicBlock);
                    }
                    let repeat = 3 + self.reader.read_bits(2)? as usize;
                    let previous = all_lengths[i - 1];
                    for _ in 0..repeat {
                        if i >= total {
                            return Err(Error::MalformedDynamicBlock);
                        }
                        all_lengths[i] = previous;
                        i += 1;
                    }
                }
                17 => {
                    let repeat = 3 + self.reader.read_bits(3)? as usize;
                    for _ in 0..repeat {
                        if i >= total {
                            return Err(Error::MalformedDynamicBlock);
                        }
                        all_lengths[i] = 0;
                        i += 1;
                    }
                }
                18 => {
                    let repeat = 11 + self.reader.read_bits(7)? as usize;
                    for _ in 0..repeat {
                        if i >= total {
                            return Err(Error::MalformedDynamicBlock);
                        }
                        all_lengths[i] = 0;
                        i += 1;
                    }
                }
                _ => return Err(Error::MalformedDynamicBlock),
            }
        }

        let litlen_table = HuffmanTable::<MAX_LITLEN_SYMBOLS>::build(&all_lengths[..hlit])?;
        let dist_table =
            HuffmanTable::<MAX_DISTANCE_SYMBOLS>::build(&all_lengths[hlit..hlit + hdist])?;
        self.block_data(Some((&litlen_table, &dist_table)))
    }
}
