//! Final‑round subkey fragment search for the 8‑round attack.
//!
//! Bit 15 of F(C_R, K8) comes out of S1 (through P), so only the six subkey
//! bits XORed into S1's input matter; all other bits of the guess are zero.
//! Candidate `i` is the subkey whose first byte is `i << 2`, i.e. K8\[47..42\]
//! in `X[i]` numbering. Every one of the 64 candidates is tried and the one
//! whose counters lie furthest from 50/50 wins.

use log::{debug, info};

use crate::approximation::DEEPEST_ROUNDS;
use crate::bias::{try_accumulate, BiasCounters};
use crate::error::AttackError;
use crate::sample::SampleSet;
use crate::schedule::{RoundKeySchedule, Subkey};

#[cfg(feature = "parallel")]
use alloc::vec::Vec;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of hypothesised subkey bits.
pub const FRAGMENT_BITS: usize = 6;

/// Size of the candidate space.
pub const CANDIDATES: usize = 1 << FRAGMENT_BITS;

/// Position of the fragment's lowest bit inside the 48‑bit subkey.
const FRAGMENT_SHIFT: u32 = 42;

/// The subkey hypothesis for `candidate`: first byte `candidate << 2`,
/// everything else zero.
pub const fn candidate_subkey(candidate: usize) -> Subkey {
    Subkey::new(((candidate & (CANDIDATES - 1)) as u64) << FRAGMENT_SHIFT)
}

/// Splits a candidate into recovered key bits, `bits[j]` = K8\[42 + j\].
pub const fn decode_fragment(candidate: usize) -> [u8; FRAGMENT_BITS] {
    let byte = candidate_subkey(candidate).to_bytes()[0];
    let mut bits = [0u8; FRAGMENT_BITS];
    let mut j = 0;
    while j < FRAGMENT_BITS {
        bits[j] = (byte >> (2 + j)) & 1;
        j += 1;
    }
    bits
}

/// The fragment actually present in a schedule's final round subkey.
pub fn actual_fragment(schedule: &RoundKeySchedule) -> usize {
    (schedule.final_round_subkey().bits() >> FRAGMENT_SHIFT) as usize
}

/// Index of the counters with the greatest |zeros − ones|. Only a strictly
/// greater magnitude replaces the incumbent, so ties keep the lowest index.
pub fn strongest_candidate(counters: &[BiasCounters]) -> usize {
    let mut best = 0;
    let mut best_magnitude = counters.first().map_or(0, BiasCounters::magnitude);
    for (candidate, c) in counters.iter().enumerate().skip(1) {
        if c.magnitude() > best_magnitude {
            best = candidate;
            best_magnitude = c.magnitude();
        }
    }
    best
}

/// Outcome of a full candidate sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentSearch {
    pub winner: usize,
    pub counters: [BiasCounters; CANDIDATES],
    pub key_bits: [u8; FRAGMENT_BITS],
}

impl FragmentSearch {
    fn from_counters(counters: [BiasCounters; CANDIDATES]) -> Self {
        let winner = strongest_candidate(&counters);
        FragmentSearch {
            winner,
            counters,
            key_bits: decode_fragment(winner),
        }
    }

    pub fn winning_subkey(&self) -> Subkey {
        candidate_subkey(self.winner)
    }

    pub fn winning_counters(&self) -> BiasCounters {
        self.counters[self.winner]
    }
}

/// Runs the 8‑round approximation once per candidate over `samples`.
///
/// `samples` must have been produced by an 8‑round schedule.
pub fn search(samples: &SampleSet) -> Result<FragmentSearch, AttackError> {
    let mut counters = [BiasCounters::default(); CANDIDATES];
    for (candidate, slot) in counters.iter_mut().enumerate() {
        *slot = try_accumulate(samples, DEEPEST_ROUNDS, Some(candidate_subkey(candidate)))?;
        debug!(
            "candidate {:02}: zeros={} ones={} |diff|={}",
            candidate,
            slot.zeros,
            slot.ones,
            slot.magnitude()
        );
    }
    let outcome = FragmentSearch::from_counters(counters);
    info!(
        "fragment search over {} pairs: candidate {} (|diff|={})",
        samples.len(),
        outcome.winner,
        outcome.winning_counters().magnitude()
    );
    Ok(outcome)
}

/// [`search`] with candidates evaluated on Rayon workers. The argmax is taken
/// afterwards in candidate order, so the winner is the same.
#[cfg(feature = "parallel")]
pub fn search_parallel(samples: &SampleSet) -> Result<FragmentSearch, AttackError> {
    let evaluated = (0..CANDIDATES)
        .into_par_iter()
        .map(|candidate| try_accumulate(samples, DEEPEST_ROUNDS, Some(candidate_subkey(candidate))))
        .collect::<Result<Vec<_>, _>>()?;
    let mut counters = [BiasCounters::default(); CANDIDATES];
    counters.copy_from_slice(&evaluated);
    Ok(FragmentSearch::from_counters(counters))
}
