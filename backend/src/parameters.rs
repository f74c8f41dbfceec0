use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modulus::Modulus;

pub const MAX_LOG_N: usize = 17;
pub const MAX_LOG_T: u32 = 61;

/// Serialisable description of a parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParametersLiteral {
    /// log2 of the number of slots.
    pub log_n: usize,
    /// Plaintext modulus.
    pub t: u64,
}

pub const DEFAULT_PARAMETERS: ParametersLiteral = ParametersLiteral { log_n: 6, t: 65537 };

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("log_n must be in [1, 17], got {0}")]
    InvalidLogN(usize),
    #[error("plaintext modulus must be an odd value in [3, 2^61), got {0}")]
    InvalidPlaintextModulus(u64),
    #[error("plaintext modulus {0} is not prime")]
    NonPrimePlaintextModulus(u64),
}

/// Slots are laid out as a 2 x (N/2) matrix, the batching layout of BFV.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    log_n: usize,
    t: Modulus,
}

impl Parameters {
    pub fn new(literal: ParametersLiteral) -> Result<Self, BuildError> {
        if literal.log_n == 0 || literal.log_n > MAX_LOG_N {
            return Err(BuildError::InvalidLogN(literal.log_n));
        }
        if literal.t < 3 || literal.t & 1 == 0 || literal.t >> MAX_LOG_T != 0 {
            return Err(BuildError::InvalidPlaintextModulus(literal.t));
        }
        let t: Modulus = Modulus::new(literal.t);
        if !t.is_prime() {
            return Err(BuildError::NonPrimePlaintextModulus(literal.t));
        }
        Ok(Self {
            log_n: literal.log_n,
            t,
        })
    }

    pub fn literal(&self) -> ParametersLiteral {
        ParametersLiteral {
            log_n: self.log_n,
            t: self.t.q(),
        }
    }

    pub fn log_n(&self) -> usize {
        self.log_n
    }

    /// Number of slots.
    pub fn n(&self) -> usize {
        1 << self.log_n
    }

    /// Number of columns of the 2 x (N/2) slot matrix.
    pub fn n_cols(&self) -> usize {
        self.n() >> 1
    }

    pub fn t(&self) -> u64 {
        self.t.q()
    }

    pub fn modulus(&self) -> &Modulus {
        &self.t
    }
}
