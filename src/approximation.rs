//! Round‑count‑specific linear approximations.
//!
//! Each entry lists the plaintext and ciphertext bits whose XOR is correlated
//! with a fixed XOR of subkey bits. Bit indices are `X[i]` with `X[0]` the
//! least significant bit of a 32‑bit half. These are hand‑derived results and
//! are reproduced as data, not computed.
//!
//! | r | terms                                                                        |
//! |---|------------------------------------------------------------------------------|
//! | 3 | P_R\[15\] C_L\[15\] P_L\[7,18,24,29\] C_R\[7,18,24,29\]                      |
//! | 5 | P_L\[15\] P_R\[7,18,24,27–31\] C_R\[15\] C_L\[7,18,24,27–31\]               |
//! | 7 | P_L\[7,18,24\] P_R\[12,16\] C_L\[7,18,24,29\] C_R\[15\]                      |
//! | 8 | P_L\[7,18,24\] P_R\[12,16\] C_R\[7,18,24,29\] C_L\[15\] F(C_R, K8′)\[15\]    |

use crate::bits::half_bit;
use crate::block::{Block, Half};
use crate::error::AttackError;

/// Round counts with a known approximation.
pub const SUPPORTED_ROUNDS: [usize; 4] = [3, 5, 7, 8];

/// The only round count whose approximation needs a partially decrypted
/// final round.
pub const DEEPEST_ROUNDS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Text {
    Plaintext,
    Ciphertext,
}

/// One bit of the XOR.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub text: Text,
    pub half: Half,
    /// `X[i]` numbering: 0 is the least significant bit of the half.
    pub bit: u8,
}

impl Term {
    #[inline(always)]
    fn read(&self, plaintext: Block, ciphertext: Block) -> u8 {
        let block = match self.text {
            Text::Plaintext => plaintext,
            Text::Ciphertext => ciphertext,
        };
        half_bit(block.half(self.half), self.bit)
    }
}

const fn pl(bit: u8) -> Term {
    Term { text: Text::Plaintext, half: Half::Left, bit }
}
const fn pr(bit: u8) -> Term {
    Term { text: Text::Plaintext, half: Half::Right, bit }
}
const fn cl(bit: u8) -> Term {
    Term { text: Text::Ciphertext, half: Half::Left, bit }
}
const fn cr(bit: u8) -> Term {
    Term { text: Text::Ciphertext, half: Half::Right, bit }
}

/// Static description of one approximation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearApproximation {
    pub rounds: usize,
    pub terms: &'static [Term],
    /// Bit of F(C_R, K′) to include, if any (`X[i]` numbering).
    pub round_output_bit: Option<u8>,
}

static APPROXIMATIONS: [LinearApproximation; 4] = [
    LinearApproximation {
        rounds: 3,
        terms: &[
            pr(15), cl(15), //
            pl(7), pl(18), pl(24), pl(29), //
            cr(7), cr(18), cr(24), cr(29),
        ],
        round_output_bit: None,
    },
    LinearApproximation {
        rounds: 5,
        terms: &[
            pl(15), //
            pr(7), pr(18), pr(24), pr(27), pr(28), pr(29), pr(30), pr(31), //
            cr(15), //
            cl(7), cl(18), cl(24), cl(27), cl(28), cl(29), cl(30), cl(31),
        ],
        round_output_bit: None,
    },
    LinearApproximation {
        rounds: 7,
        terms: &[
            pl(7), pl(18), pl(24), //
            pr(12), pr(16), //
            cl(7), cl(18), cl(24), cl(29), //
            cr(15),
        ],
        round_output_bit: None,
    },
    LinearApproximation {
        rounds: 8,
        terms: &[
            pl(7), pl(18), pl(24), //
            pr(12), pr(16), //
            cr(7), cr(18), cr(24), cr(29), //
            cl(15),
        ],
        round_output_bit: Some(15),
    },
];

impl LinearApproximation {
    pub fn for_rounds(rounds: usize) -> Option<&'static LinearApproximation> {
        APPROXIMATIONS.iter().find(|a| a.rounds == rounds)
    }

    pub fn needs_round_output(&self) -> bool {
        self.round_output_bit.is_some()
    }

    /// XOR of all terms. `round_output` is ignored unless the approximation
    /// uses it.
    #[inline]
    pub fn parity(&self, plaintext: Block, ciphertext: Block, round_output: u32) -> u8 {
        let mut acc = self
            .terms
            .iter()
            .fold(0u8, |acc, term| acc ^ term.read(plaintext, ciphertext));
        if let Some(bit) = self.round_output_bit {
            acc ^= half_bit(round_output, bit);
        }
        acc
    }
}

/// Evaluates the `rounds`‑round approximation on one pair.
///
/// `round_output` is F(C_R, K′) for the 8‑round approximation and is ignored
/// otherwise. An `Err` is the error sentinel: it is never a 0/1 observation.
pub fn evaluate(
    plaintext: Block,
    ciphertext: Block,
    rounds: usize,
    round_output: Option<u32>,
) -> Result<u8, AttackError> {
    let approximation =
        LinearApproximation::for_rounds(rounds).ok_or(AttackError::UnsupportedRoundCount(rounds))?;
    let round_output = match (approximation.needs_round_output(), round_output) {
        (true, None) => return Err(AttackError::MissingRoundOutput(rounds)),
        (_, value) => value.unwrap_or(0),
    };
    Ok(approximation.parity(plaintext, ciphertext, round_output))
}
