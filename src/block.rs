//! 64‑bit cipher block and its two Feistel halves.

use core::fmt;

/// Which 32‑bit half of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Half {
    Left,
    Right,
}

/// One 64‑bit block. Byte 0 of the big‑endian encoding is the most
/// significant byte; the left half is the high 32 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block(pub u64);

impl Block {
    pub const ZERO: Block = Block(0);

    #[inline(always)]
    pub const fn from_halves(left: u32, right: u32) -> Self {
        Block(((left as u64) << 32) | right as u64)
    }

    #[inline(always)]
    pub const fn left(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline(always)]
    pub const fn right(self) -> u32 {
        self.0 as u32
    }

    #[inline(always)]
    pub const fn half(self, half: Half) -> u32 {
        match half {
            Half::Left => self.left(),
            Half::Right => self.right(),
        }
    }

    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Block(u64::from_be_bytes(bytes))
    }

    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<[u8; 8]> for Block {
    fn from(bytes: [u8; 8]) -> Self {
        Block::from_bytes(bytes)
    }
}

impl From<Block> for [u8; 8] {
    fn from(block: Block) -> Self {
        block.to_bytes()
    }
}

impl From<u64> for Block {
    fn from(value: u64) -> Self {
        Block(value)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}
