//! Feistel block transform.
//!
//! The attacked cipher is DES **without** IP/FP. Each round except the last
//! does `(L, R) ← (R, F(R, K) ⊕ L)`; the last round leaves the halves in
//! place, `L ← F(R, K) ⊕ L`. Fed the reversed schedule, the same routine
//! decrypts.

use core::ops::BitXor;

use crate::bits::permute;
use crate::block::Block;
use crate::error::AttackError;
use crate::schedule::{Direction, RawKey, RoundKeySchedule, Subkey};
use crate::tables::{FP, IP, SP};

/// Runs a Feistel network with an unswapped final round over any half type.
pub fn feistel<W, K, F>(mut left: W, mut right: W, subkeys: &[K], round: F) -> (W, W)
where
    W: Copy + BitXor<Output = W>,
    F: Fn(W, &K) -> W,
{
    let Some((last, head)) = subkeys.split_last() else {
        return (left, right);
    };
    for subkey in head {
        let next = round(right, subkey) ^ left;
        left = right;
        right = next;
    }
    left = round(right, last) ^ left;
    (left, right)
}

/// The DES round function F(R, K): E expansion → XOR K → S‑boxes → P.
///
/// E is done with rotations: S‑box `i` sees input bits `4i‑1 … 4i+4`
/// (MSB‑first, wrapping), which is the top six bits of `R` rotated left by
/// `4i + 31`.
#[inline(always)]
pub fn round_function(half: u32, subkey: Subkey) -> u32 {
    let mut out = 0u32;
    for (i, sp) in SP.iter().enumerate() {
        let group = (half.rotate_left((4 * i as u32 + 31) % 32) >> 26) as usize;
        out |= sp[group ^ subkey.group(i)];
    }
    out
}

/// Transforms one block with `schedule`. Encrypts or decrypts depending on
/// which direction the schedule was generated for.
#[inline]
pub fn crypt(block: Block, schedule: &RoundKeySchedule) -> Block {
    let (left, right) = feistel(
        block.left(),
        block.right(),
        schedule.subkeys(),
        |half, subkey| round_function(half, *subkey),
    );
    Block::from_halves(left, right)
}

pub fn initial_permutation(block: Block) -> Block {
    Block(permute(block.0, 64, &IP))
}

pub fn final_permutation(block: Block) -> Block {
    Block(permute(block.0, 64, &FP))
}

/// Both schedules for one key and round count.
#[derive(Clone, Debug)]
pub struct Des {
    encrypt: RoundKeySchedule,
    decrypt: RoundKeySchedule,
}

impl Des {
    pub fn new(key: RawKey, rounds: usize) -> Result<Self, AttackError> {
        Ok(Des {
            encrypt: RoundKeySchedule::new(key, Direction::Encrypt, rounds)?,
            decrypt: RoundKeySchedule::new(key, Direction::Decrypt, rounds)?,
        })
    }

    pub fn rounds(&self) -> usize {
        self.encrypt.rounds()
    }

    pub fn encryption_schedule(&self) -> &RoundKeySchedule {
        &self.encrypt
    }

    pub fn decryption_schedule(&self) -> &RoundKeySchedule {
        &self.decrypt
    }

    /// Core transform, no IP/FP. This is what the attacks observe.
    pub fn encrypt_block(&self, block: Block) -> Block {
        crypt(block, &self.encrypt)
    }

    pub fn decrypt_block(&self, block: Block) -> Block {
        crypt(block, &self.decrypt)
    }

    /// FIPS 46‑3 DES (with IP/FP). With 16 rounds this matches published
    /// test vectors.
    pub fn encrypt_standard(&self, block: Block) -> Block {
        final_permutation(crypt(initial_permutation(block), &self.encrypt))
    }

    pub fn decrypt_standard(&self, block: Block) -> Block {
        final_permutation(crypt(initial_permutation(block), &self.decrypt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{substitute, E, P};

    /// PRESENT 4‑bit S‑box, used for a toy 8‑bit Feistel cipher.
    const TOY_SBOX: [u8; 16] = [
        0xC, 0x5, 0x6, 0xB, 0x9, 0x0, 0xA, 0xD, 0x3, 0xE, 0xF, 0x8, 0x4, 0x7, 0x1, 0x2,
    ];

    fn toy_round(half: u8, key: &u8) -> u8 {
        TOY_SBOX[((half ^ key) & 0xF) as usize]
    }

    #[test]
    fn toy_feistel_round_trips_every_block() {
        let keys = [0x3u8, 0x9, 0xC, 0x5, 0xE];
        for rounds in 1..=keys.len() {
            let enc = &keys[..rounds];
            let mut dec = [0u8; 5];
            for (i, k) in enc.iter().rev().enumerate() {
                dec[i] = *k;
            }
            for block in 0..=255u8 {
                let (l, r) = feistel(block >> 4, block & 0xF, enc, toy_round);
                let (l2, r2) = feistel(l, r, &dec[..rounds], toy_round);
                assert_eq!((l2 << 4) | r2, block, "rounds={rounds} block={block:#04x}");
            }
        }
    }

    #[test]
    fn feistel_without_subkeys_is_identity() {
        let keys: [u8; 0] = [];
        assert_eq!(feistel(0x3u8, 0x7u8, &keys, toy_round), (0x3, 0x7));
    }

    /// Straight table‑driven F, to check the rotation/SP shortcut.
    fn round_function_by_tables(half: u32, subkey: Subkey) -> u32 {
        let expanded = permute(half as u64, 32, &E) ^ subkey.bits();
        let mut substituted = 0u64;
        for i in 0..8 {
            let group = ((expanded >> (42 - 6 * i)) & 0x3F) as usize;
            substituted = (substituted << 4) | substitute(i, group) as u64;
        }
        permute(substituted, 32, &P) as u32
    }

    #[test]
    fn round_function_matches_tables() {
        let mut half = 0x89AB_CDEFu32;
        let mut key = 0x1B02_EFFC_7072u64;
        for _ in 0..500 {
            let subkey = Subkey::new(key);
            assert_eq!(
                round_function(half, subkey),
                round_function_by_tables(half, subkey)
            );
            half = half.wrapping_mul(0x9E37_79B9).rotate_left(7) ^ 0x5A5A_A5A5;
            key = key.wrapping_mul(0x2545_F491_4F6C_DD1D).rotate_left(13);
        }
    }

    #[test]
    fn permutations_are_inverse() {
        let block = Block(0x0123_4567_89AB_CDEF);
        assert_eq!(final_permutation(initial_permutation(block)), block);
        assert_eq!(initial_permutation(final_permutation(block)), block);
    }

    #[test]
    fn fips_textbook_vector() {
        let des = Des::new(RawKey(0x1334_5779_9BBC_DFF1), 16).unwrap();
        let ct = des.encrypt_standard(Block(0x0123_4567_89AB_CDEF));
        assert_eq!(ct, Block(0x85E8_1354_0F0A_B405));
        assert_eq!(des.decrypt_standard(ct), Block(0x0123_4567_89AB_CDEF));
    }

    #[test]
    fn reduced_round_core_round_trips() {
        let key = RawKey(0x0123_45FF_89AB_CDEF);
        let pt = Block(0x0123_4567_89AB_CDE7);
        for rounds in 1..=16 {
            let des = Des::new(key, rounds).unwrap();
            assert_eq!(des.decrypt_block(des.encrypt_block(pt)), pt);
        }
    }
}
