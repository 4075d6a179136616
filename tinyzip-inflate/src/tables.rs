//! Constant tables from RFC 1951 §3.2.5.
//!
//! `LENGTH_BASE` stores each length code's base value minus 3 (i.e. the
//! amount to add to 3 once the extra bits are folded in), matching the
//! way the original reference implementation lays the table out — it
//! reads slightly oddly next to the RFC's own table, which lists the
//! length itself, but it means every entry fits in a `u8`.

/// Length code base values, pre-subtracted by 3. Index with `symbol - 257`.
pub const LENGTH_BASE: [u16; 29] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 20, 24, 28, 32, 40, 48, 56, 64, 80, 96, 112, 128,
    160, 192, 224, 255,
];

/// Extra bits to read after each length code, same indexing as [`LENGTH_BASE`].
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Distance code base values. Index with the decoded distance symbol.
pub const DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits to read after each distance code, same indexing as [`DISTANCE_BASE`].
pub const DISTANCE_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Order in which a dynamic block's code-length code lengths are
/// transmitted; wildly non-sequential because short codes are assigned to
/// the lengths that show up most often across real archives (0 and 18).
pub const CODE_LENGTH_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Size of the literal/length alphabet a dynamic block's HLIT field can
/// describe (257..=288, though only 286 symbols are ever meaningful).
pub const MAX_LITLEN_SYMBOLS: usize = 288;

/// Size of the distance alphabet a dynamic block's HDIST field can describe.
pub const MAX_DISTANCE_SYMBOLS: usize = 32;

/// Size of the code-length alphabet used to compress the other two.
pub const MAX_CODE_LENGTH_SYMBOLS: usize = 19;
