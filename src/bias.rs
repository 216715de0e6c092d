//! Zero/one tallies of an approximation over a sample set.

use core::ops::{Add, AddAssign};

use log::warn;

use crate::approximation::LinearApproximation;
use crate::cipher::round_function;
use crate::error::AttackError;
use crate::sample::{KnownPair, SampleSet};
use crate::schedule::Subkey;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How often the approximation evaluated to 0 and to 1.
///
/// Counters are `i64`, wide enough for any sample set that fits in memory.
/// `(-1, -1)` is the sentinel for "no approximation for this round count".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BiasCounters {
    pub zeros: i64,
    pub ones: i64,
}

impl BiasCounters {
    pub const SENTINEL: BiasCounters = BiasCounters { zeros: -1, ones: -1 };

    pub const fn is_sentinel(&self) -> bool {
        self.zeros == -1 && self.ones == -1
    }

    pub const fn total(&self) -> i64 {
        self.zeros + self.ones
    }

    /// |zeros − ones|.
    pub const fn magnitude(&self) -> u64 {
        self.zeros.abs_diff(self.ones)
    }

    /// Observed P(bit = 0) − 1/2.
    pub fn bias(&self) -> f64 {
        if self.total() <= 0 {
            return 0.0;
        }
        self.zeros as f64 / self.total() as f64 - 0.5
    }

    /// The more frequent bit value; ties go to 0.
    pub const fn majority(&self) -> u8 {
        if self.zeros >= self.ones {
            0
        } else {
            1
        }
    }

    #[inline(always)]
    fn record(&mut self, bit: u8) {
        if bit == 0 {
            self.zeros += 1;
        } else {
            self.ones += 1;
        }
    }
}

impl Add for BiasCounters {
    type Output = BiasCounters;

    fn add(self, rhs: BiasCounters) -> BiasCounters {
        BiasCounters {
            zeros: self.zeros + rhs.zeros,
            ones: self.ones + rhs.ones,
        }
    }
}

impl AddAssign for BiasCounters {
    fn add_assign(&mut self, rhs: BiasCounters) {
        *self = *self + rhs;
    }
}

/// Checks everything that does not depend on sample content, once, before
/// any pair is looked at.
fn resolve(
    samples: &SampleSet,
    rounds: usize,
    guess: Option<Subkey>,
) -> Result<(&'static LinearApproximation, Option<Subkey>), AttackError> {
    let approximation =
        LinearApproximation::for_rounds(rounds).ok_or(AttackError::UnsupportedRoundCount(rounds))?;
    let guess = if approximation.needs_round_output() {
        Some(guess.ok_or(AttackError::MissingRoundOutput(rounds))?)
    } else {
        None
    };
    if samples.rounds() != rounds {
        return Err(AttackError::InconsistentSample {
            expected: rounds,
            actual: samples.rounds(),
        });
    }
    Ok((approximation, guess))
}

// ---------------------------------------------------------------------------
// Hot loop
// ---------------------------------------------------------------------------

#[inline]
fn tally(
    approximation: &LinearApproximation,
    pairs: &[KnownPair],
    guess: Option<Subkey>,
) -> BiasCounters {
    let mut counters = BiasCounters::default();
    for pair in pairs {
        let round_output = match guess {
            Some(subkey) => round_function(pair.ciphertext.right(), subkey),
            None => 0,
        };
        counters.record(approximation.parity(pair.plaintext, pair.ciphertext, round_output));
    }
    counters
}

/// Tallies the `rounds`‑round approximation over `samples`.
///
/// `guess` is the final‑round subkey hypothesis; only the 8‑round
/// approximation uses it and there it is required.
pub fn try_accumulate(
    samples: &SampleSet,
    rounds: usize,
    guess: Option<Subkey>,
) -> Result<BiasCounters, AttackError> {
    let (approximation, guess) = resolve(samples, rounds, guess)?;
    Ok(tally(approximation, samples.pairs(), guess))
}

/// Like [`try_accumulate`], but any error becomes [`BiasCounters::SENTINEL`].
pub fn accumulate(samples: &SampleSet, rounds: usize, guess: Option<Subkey>) -> BiasCounters {
    try_accumulate(samples, rounds, guess).unwrap_or_else(|err| {
        warn!("bias accumulation aborted: {}", err);
        BiasCounters::SENTINEL
    })
}

/// Pairs per Rayon task.
#[cfg(feature = "parallel")]
const SHARD_PAIRS: usize = 4096;

/// [`try_accumulate`] sharded over Rayon workers; shard counters are summed.
#[cfg(feature = "parallel")]
pub fn try_accumulate_parallel(
    samples: &SampleSet,
    rounds: usize,
    guess: Option<Subkey>,
) -> Result<BiasCounters, AttackError> {
    let (approximation, guess) = resolve(samples, rounds, guess)?;
    Ok(samples
        .pairs()
        .par_chunks(SHARD_PAIRS)
        .map(|shard| tally(approximation, shard, guess))
        .reduce(BiasCounters::default, |a, b| a + b))
}

#[cfg(feature = "parallel")]
pub fn accumulate_parallel(
    samples: &SampleSet,
    rounds: usize,
    guess: Option<Subkey>,
) -> BiasCounters {
    try_accumulate_parallel(samples, rounds, guess).unwrap_or_else(|err| {
        warn!("bias accumulation aborted: {}", err);
        BiasCounters::SENTINEL
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::sample::ChainedSource;
    use crate::schedule::{Direction, RawKey, RoundKeySchedule};

    fn samples(rounds: usize, size: usize) -> SampleSet {
        let oracle =
            RoundKeySchedule::new(RawKey(0x0123_45FF_89AB_CDEF), Direction::Encrypt, rounds).unwrap();
        let mut source = ChainedSource::new(Block(0x0123_4567_89AB_CDEF));
        SampleSet::acquire(&mut source, &oracle, size).unwrap()
    }

    #[test]
    fn counters_cover_every_pair() {
        for rounds in [3, 5, 7] {
            let set = samples(rounds, 300);
            let counters = accumulate(&set, rounds, None);
            assert_eq!(counters.total(), 300);
            assert!(!counters.is_sentinel());
        }
        let set = samples(8, 300);
        let counters = accumulate(&set, 8, Some(Subkey::new(0x1234_5678_9ABC)));
        assert_eq!(counters.total(), 300);
    }

    #[test]
    fn unsupported_round_count_gives_sentinel() {
        let set = samples(4, 50);
        assert_eq!(accumulate(&set, 4, None), BiasCounters::SENTINEL);
        assert_eq!(
            try_accumulate(&set, 4, None),
            Err(AttackError::UnsupportedRoundCount(4))
        );
        // also when the set itself is empty
        let empty = SampleSet::from_pairs(6, alloc::vec::Vec::new());
        assert!(accumulate(&empty, 6, None).is_sentinel());
    }

    #[test]
    fn mismatched_sample_is_rejected() {
        let set = samples(5, 20);
        assert_eq!(
            try_accumulate(&set, 3, None),
            Err(AttackError::InconsistentSample { expected: 3, actual: 5 })
        );
        assert!(accumulate(&set, 3, None).is_sentinel());
    }

    #[test]
    fn deepest_needs_a_guess() {
        let set = samples(8, 10);
        assert_eq!(
            try_accumulate(&set, 8, None),
            Err(AttackError::MissingRoundOutput(8))
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let set = samples(8, 200);
        let guess = Some(Subkey::new(0xFC00_0000_0000));
        assert_eq!(accumulate(&set, 8, guess), accumulate(&set, 8, guess));
    }

    #[test]
    fn empty_set_counts_nothing() {
        let empty = SampleSet::from_pairs(7, alloc::vec::Vec::new());
        assert_eq!(accumulate(&empty, 7, None), BiasCounters::default());
    }

    #[test]
    fn counter_helpers() {
        let c = BiasCounters { zeros: 70, ones: 30 };
        assert_eq!(c.magnitude(), 40);
        assert_eq!(c.majority(), 0);
        assert!(c.bias() > 0.2 - 1e-12 && c.bias() < 0.2 + 1e-12);
        assert_eq!(
            c + BiasCounters { zeros: 1, ones: 2 },
            BiasCounters { zeros: 71, ones: 32 }
        );
        assert_eq!(BiasCounters::default().bias(), 0.0);
        assert_eq!(BiasCounters::SENTINEL.bias(), 0.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let set = samples(8, 10_000);
        let guess = Some(Subkey::new(0x2C00_0000_0000));
        assert_eq!(accumulate_parallel(&set, 8, guess), accumulate(&set, 8, guess));
        assert!(accumulate_parallel(&set, 9, guess).is_sentinel());
    }
}
