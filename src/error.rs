use thiserror::Error;

/// Everything that can stop an attack run. None of these are transient:
/// they indicate a caller passed parameters that can never work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackError {
    /// The key schedule only has rotation amounts for rounds 1..=16.
    #[error("round count {0} is outside the key schedule range 1..=16")]
    InvalidRoundCount(usize),

    /// No linear approximation is known for this many rounds.
    #[error("no linear approximation is defined for {0} rounds")]
    UnsupportedRoundCount(usize),

    /// The sample set was encrypted with a different round count than the
    /// attack assumes.
    #[error("sample set was produced with {actual} rounds, attack expects {expected}")]
    InconsistentSample { expected: usize, actual: usize },

    /// The approximation needs F(C_R, K′) but no subkey guess was supplied.
    #[error("the {0}-round approximation needs a final-round subkey guess")]
    MissingRoundOutput(usize),

    /// Samples must come from an encryption-direction schedule.
    #[error("samples must be encrypted with an encryption-direction schedule")]
    DecryptionOracle,
}
