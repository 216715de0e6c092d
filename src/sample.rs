//! Known plaintext/ciphertext pairs and where the plaintexts come from.

use alloc::vec::Vec;

use log::debug;

use crate::block::Block;
use crate::cipher::crypt;
use crate::error::AttackError;
use crate::schedule::{Direction, RawKey, RoundKeySchedule};

/// Anything that can hand out plaintext blocks, one at a time.
pub trait SampleSource {
    fn next_plaintext(&mut self) -> Block;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn next_plaintext(&mut self) -> Block {
        (**self).next_plaintext()
    }
}

/// Adapts a closure into a [`SampleSource`].
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> Block> SampleSource for FnSource<F> {
    fn next_plaintext(&mut self) -> Block {
        (self.0)()
    }
}

/// Rounds used by [`ChainedSource`] for each step.
pub const CHAIN_ROUNDS: usize = 8;

/// Rolling‑state generator: the current state keys an 8‑round schedule,
/// encrypting block 0 gives the next state and block 1 the emitted
/// plaintext.
#[derive(Clone, Debug)]
pub struct ChainedSource {
    state: Block,
}

impl ChainedSource {
    pub fn new(iv: Block) -> Self {
        ChainedSource { state: iv }
    }
}

impl SampleSource for ChainedSource {
    fn next_plaintext(&mut self) -> Block {
        let schedule =
            RoundKeySchedule::generate(RawKey(self.state.0), Direction::Encrypt, CHAIN_ROUNDS);
        self.state = crypt(Block(0), &schedule);
        crypt(Block(1), &schedule)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KnownPair {
    pub plaintext: Block,
    pub ciphertext: Block,
}

/// Pairs produced under one key and one round count. Read‑only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleSet {
    rounds: usize,
    pairs: Vec<KnownPair>,
}

impl SampleSet {
    /// Draws `size` plaintexts from `source` and encrypts each with `oracle`.
    pub fn acquire<S: SampleSource>(
        source: &mut S,
        oracle: &RoundKeySchedule,
        size: usize,
    ) -> Result<Self, AttackError> {
        if oracle.direction() != Direction::Encrypt {
            return Err(AttackError::DecryptionOracle);
        }
        let mut pairs = Vec::with_capacity(size);
        for _ in 0..size {
            let plaintext = source.next_plaintext();
            pairs.push(KnownPair {
                plaintext,
                ciphertext: crypt(plaintext, oracle),
            });
        }
        debug!("acquired {} pairs at {} rounds", size, oracle.rounds());
        Ok(SampleSet {
            rounds: oracle.rounds(),
            pairs,
        })
    }

    /// Wraps pairs obtained elsewhere. The caller vouches that all of them
    /// came from one `rounds`‑round schedule.
    pub fn from_pairs(rounds: usize, pairs: Vec<KnownPair>) -> Self {
        SampleSet { rounds, pairs }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn pairs(&self) -> &[KnownPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
