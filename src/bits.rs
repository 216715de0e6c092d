//! Most‑significant‑bit‑first bit access.
//!
//! Every fixed permutation in the cipher (PC‑1, PC‑2, P, IP, FP) and every
//! approximation term goes through [`bit`], so bit numbering is defined in
//! exactly one place.

/// Bit `n` of a `width`‑bit value, where `n = 0` is the most significant bit.
#[inline(always)]
pub const fn bit(value: u64, width: u32, n: u32) -> u64 {
    (value >> (width - 1 - n)) & 1
}

/// Gathers input bits into a new value: output bit `j` (MSB‑first, the
/// output is `table.len()` bits wide) is input bit `table[j]`.
///
/// Table entries are 1‑based positions, as printed in FIPS 46‑3.
pub const fn permute(value: u64, width: u32, table: &[u8]) -> u64 {
    let mut out = 0u64;
    let mut j = 0;
    while j < table.len() {
        out = (out << 1) | bit(value, width, table[j] as u32 - 1);
        j += 1;
    }
    out
}

/// Bit `index` of a 32‑bit half, counted from the **least** significant bit
/// (`X[0]` is the LSB). This is the numbering linear approximations of DES
/// are written in.
#[inline(always)]
pub const fn half_bit(half: u32, index: u8) -> u8 {
    bit(half as u64, 32, 31 - index as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first_numbering() {
        assert_eq!(bit(0x80, 8, 0), 1);
        assert_eq!(bit(0x80, 8, 7), 0);
        assert_eq!(bit(0x01, 8, 7), 1);
        assert_eq!(bit(0x8000_0000_0000_0000, 64, 0), 1);
    }

    #[test]
    fn half_bit_counts_from_lsb() {
        assert_eq!(half_bit(0x0000_0001, 0), 1);
        assert_eq!(half_bit(0x8000_0000, 31), 1);
        assert_eq!(half_bit(0x0000_8000, 15), 1);
        assert_eq!(half_bit(0x0000_8000, 16), 0);
    }

    #[test]
    fn permute_reverses_and_selects() {
        // reverse a nibble
        assert_eq!(permute(0b1000, 4, &[4, 3, 2, 1]), 0b0001);
        // duplicate and drop
        assert_eq!(permute(0b10, 2, &[1, 1, 1]), 0b111);
        assert_eq!(permute(0b10, 2, &[2]), 0);
    }
}
