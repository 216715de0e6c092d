//! S‑box level helpers behind the approximations
//! =============================================
//! * `linear_approximation_table` – Matsui's NS(α, β) − 32 for one S‑box.
//! * `influencing_subkey_bits`    – which subkey bits can change a given
//!   output bit of F. This is what fixes the key search to six bits.
//!
//! Both are exhaustive over the 64 inputs of each S‑box, so they are exact.

use crate::tables::{substitute, SP};

#[inline(always)]
fn parity(x: u32) -> u32 {
    x.count_ones() & 1
}

/// `table[α][β]` = #{x : α·x = β·S(x)} − 32 for S‑box `sbox` (0‑based).
pub fn linear_approximation_table(sbox: usize) -> [[i8; 16]; 64] {
    let mut table = [[0i8; 16]; 64];
    for (alpha, row) in table.iter_mut().enumerate() {
        for (beta, cell) in row.iter_mut().enumerate() {
            let agree = (0..64usize)
                .filter(|&x| {
                    parity((alpha & x) as u32) == parity(beta as u32 & substitute(sbox, x) as u32)
                })
                .count();
            *cell = agree as i8 - 32;
        }
    }
    table
}

/// Mask (48‑bit subkey, MSB‑first layout as in [`crate::Subkey`]) of the
/// subkey bits that can flip bit `output_bit` (`X[i]` numbering) of
/// F(R, K).
///
/// Every S‑box input group is reachable from R, so a subkey bit matters iff
/// flipping it changes that output bit for some group value.
pub fn influencing_subkey_bits(output_bit: u8) -> u64 {
    let target = 1u32 << output_bit;
    let mut mask = 0u64;
    for (sbox, row) in SP.iter().enumerate() {
        for key_bit in 0..6 {
            let flip = 1usize << (5 - key_bit);
            if (0..64).any(|x| (row[x] ^ row[x ^ flip]) & target != 0) {
                mask |= 1u64 << (47 - (6 * sbox + key_bit));
            }
        }
    }
    mask
}
