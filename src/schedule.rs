//! Round‑key schedule.
//!
//! PC‑1 splits the raw key into two 28‑bit registers C and D (parity bits are
//! dropped). Before every round both registers rotate left by 1 or 2 and PC‑2
//! compresses C‖D into that round's 48‑bit subkey. A decryption schedule is
//! the same subkeys stored back to front.

use core::fmt;

use log::trace;

use crate::bits::permute;
use crate::error::AttackError;
use crate::tables::{PC1_C, PC1_D, PC2, ROTATIONS};

/// Longest schedule the rotation table supports.
pub const MAX_ROUNDS: usize = 16;

const SUBKEY_MASK: u64 = (1 << 48) - 1;
const REGISTER_MASK: u32 = (1 << 28) - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// 64‑bit raw key including the (ignored) parity bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawKey(pub u64);

impl From<[u8; 8]> for RawKey {
    fn from(bytes: [u8; 8]) -> Self {
        RawKey(u64::from_be_bytes(bytes))
    }
}

impl From<u64> for RawKey {
    fn from(value: u64) -> Self {
        RawKey(value)
    }
}

/// One 48‑bit round subkey, held in the low 48 bits. Subkey bit 0 (MSB‑first)
/// feeds the first input bit of S1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subkey(u64);

impl Subkey {
    pub const ZERO: Subkey = Subkey(0);

    /// Keeps the low 48 bits of `bits`.
    pub const fn new(bits: u64) -> Self {
        Subkey(bits & SUBKEY_MASK)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// The 6‑bit slice that is XORed into S‑box `sbox`'s input, `sbox < 8`.
    #[inline(always)]
    pub(crate) const fn group(self, sbox: usize) -> usize {
        debug_assert!(sbox < 8);
        ((self.0 >> (42 - 6 * sbox)) & 0x3F) as usize
    }

    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < 6 {
            bits = (bits << 8) | bytes[i] as u64;
            i += 1;
        }
        Subkey(bits)
    }

    pub const fn to_bytes(self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }
}

impl fmt::Display for Subkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012X}", self.0)
    }
}

/// Ordered subkeys for one key, one direction and one round count.
///
/// Schedules are never edited in place: a different round count or
/// direction means generating a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundKeySchedule {
    subkeys: [Subkey; MAX_ROUNDS],
    rounds: usize,
    direction: Direction,
}

impl RoundKeySchedule {
    /// Derives the schedule for `rounds` rounds (1..=16).
    pub fn new(key: RawKey, direction: Direction, rounds: usize) -> Result<Self, AttackError> {
        if !(1..=MAX_ROUNDS).contains(&rounds) {
            return Err(AttackError::InvalidRoundCount(rounds));
        }
        Ok(Self::generate(key, direction, rounds))
    }

    /// Caller guarantees `1 <= rounds <= MAX_ROUNDS`.
    pub(crate) fn generate(key: RawKey, direction: Direction, rounds: usize) -> Self {
        debug_assert!((1..=MAX_ROUNDS).contains(&rounds));

        let mut c = permute(key.0, 64, &PC1_C) as u32;
        let mut d = permute(key.0, 64, &PC1_D) as u32;
        let mut subkeys = [Subkey::ZERO; MAX_ROUNDS];

        for (i, &shift) in ROTATIONS.iter().take(rounds).enumerate() {
            c = rotate28(c, shift);
            d = rotate28(d, shift);
            let slot = match direction {
                Direction::Encrypt => i,
                Direction::Decrypt => rounds - 1 - i,
            };
            subkeys[slot] = Subkey(permute(((c as u64) << 28) | d as u64, 56, &PC2));
        }

        trace!("generated {:?} schedule for {} rounds", direction, rounds);
        RoundKeySchedule {
            subkeys,
            rounds,
            direction,
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Subkeys in the order the block transform applies them.
    pub fn subkeys(&self) -> &[Subkey] {
        &self.subkeys[..self.rounds]
    }

    /// Subkey of the last *encryption* round, whichever direction this
    /// schedule was generated for.
    pub fn final_round_subkey(&self) -> Subkey {
        match self.direction {
            Direction::Encrypt => self.subkeys[self.rounds - 1],
            Direction::Decrypt => self.subkeys[0],
        }
    }
}

#[inline(always)]
fn rotate28(register: u32, shift: u32) -> u32 {
    ((register << shift) | (register >> (28 - shift))) & REGISTER_MASK
}
