use std::fmt;

use thiserror::Error;

/// Invalid parameters or key material. Always recoverable by supplying
/// different inputs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error(transparent)]
    Backend(#[from] backend::BuildError),
    #[error("number of replications must be a power of two, got {0}")]
    InvalidNumReplications(usize),
    #[error("replication is not allowed with algebraic MACs, got {0} replications")]
    ReplicationNotAllowed(usize),
    #[error("algebraic MACs require exactly one PRF key, got {0}")]
    InvalidNumDistinctPrfKeys(usize),
    #[error("ring of {n} slots cannot pack a protocol message, at least {min} slots are required")]
    RingTooSmall { n: usize, min: usize },
    #[error("alpha = {alpha} is not invertible modulo {t}")]
    NonInvertibleAlpha { alpha: u64, t: u64 },
}

/// Identity checked by the polynomial protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityCheck {
    /// The packed message does not have the expected layout.
    Packing,
    /// w_0 against the decrypted result evaluated at delta.
    Evaluation,
    /// HH against the linear combination of the w_i at beta.
    LinearCombination,
    /// The w_i at alpha against the MAC evaluated at delta.
    Mac,
}

impl fmt::Display for IdentityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            IdentityCheck::Packing => "packing",
            IdentityCheck::Evaluation => "evaluation",
            IdentityCheck::LinearCombination => "linear combination",
            IdentityCheck::Mac => "mac",
        };
        f.write_str(name)
    }
}

/// Rejection of a result: the server misbehaved or the data was corrupted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("verification failed due to a MAC mismatch at slot {slot}")]
    MacMismatch { slot: usize },
    #[error("verification failed: {0} check of the polynomial protocol does not hold")]
    IdentityCheck(IdentityCheck),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error("invalid parameter configuration: {0}")]
    Config(#[from] serde_json::Error),
}
