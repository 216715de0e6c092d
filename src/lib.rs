//! DES-LINEAR: Reduced-Round DES Linear Cryptanalysis
//! ================================================
//! A **known-plaintext attack engine** against DES cut down to a handful of
//! rounds. Fixed XOR-combinations of plaintext and ciphertext bits are tallied
//! over a sample set; their bias away from 1/2 reveals key material, and for
//! the 8-round variant an exhaustive 6-bit guess on the final subkey picks the
//! candidate with the strongest bias.
//!
//! ## Cipher core
//! * 64‑bit block  = two 32‑bit halves
//! * Key schedule  : PC‑1 → per‑round rotation (1 or 2) → PC‑2, 1..=16 rounds
//! * Round function: E expansion → subkey XOR → eight S‑boxes → P
//! * The core runs **without IP/FP** and skips the half swap in its final
//!   round, so one routine serves both directions ([`cipher::crypt`]).
//!   [`cipher::Des::encrypt_standard`] wraps it with IP/FP for FIPS vectors.
//!
//! ## Attack pipeline
//! schedule setup → [`sample::SampleSet::acquire`] →
//! [`bias::accumulate`] (per candidate) → [`search::search`] argmax →
//! bit decoding.
//!
//! | Rounds | Approximation uses                       | Key search |
//! |-------:|------------------------------------------|:----------:|
//! | 3      | P, C                                     | no         |
//! | 5      | P, C                                     | no         |
//! | 7      | P, C                                     | no         |
//! | 8      | P, C, F(C_R, K8′)\[15\]                  | 64 guesses |
//!
//! ## Implementation notes
//! * Entire core is **`no_std` + `alloc`**: permutation and S‑box/P tables are
//!   evaluated at compile time, and the inner loops never allocate.
//! * Feature‑gated **Rayon** variants ([`bias::accumulate_parallel`],
//!   [`search::search_parallel`]) shard the work without changing results.
//! * Diagnostics go through the `log` facade; install any logger to see them.

#![no_std]

extern crate alloc;

// Optional multi‑threaded accumulation needs `std` + Rayon
#[cfg(feature = "parallel")]
extern crate std;

pub mod analysis;
pub mod approximation;
pub mod bias;
pub mod bits;
pub mod block;
pub mod cipher;
pub mod error;
pub mod sample;
pub mod schedule;
pub mod search;
mod tables;

pub use approximation::{evaluate, LinearApproximation, DEEPEST_ROUNDS, SUPPORTED_ROUNDS};
pub use bias::{accumulate, try_accumulate, BiasCounters};
pub use block::{Block, Half};
pub use cipher::{crypt, round_function, Des};
pub use error::AttackError;
pub use sample::{ChainedSource, FnSource, KnownPair, SampleSet, SampleSource};
pub use schedule::{Direction, RawKey, RoundKeySchedule, Subkey, MAX_ROUNDS};
pub use search::{search, FragmentSearch, CANDIDATES, FRAGMENT_BITS};

#[cfg(feature = "parallel")]
pub use bias::{accumulate_parallel, try_accumulate_parallel};
#[cfg(feature = "parallel")]
pub use search::search_parallel;
