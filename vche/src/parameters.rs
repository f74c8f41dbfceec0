use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, ParameterError},
    requadratization::MAX_REQUAD_LEN,
};

/// The packed protocol message holds HH, the length and up to
/// [MAX_REQUAD_LEN] evaluations.
pub const MIN_N: usize = MAX_REQUAD_LEN + 2;

fn one() -> usize {
    1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParametersLiteral {
    #[serde(flatten)]
    pub he: backend::ParametersLiteral,
    #[serde(default = "one")]
    pub num_replications: usize,
    #[serde(default = "one")]
    pub num_distinct_prf_keys: usize,
}

pub const DEFAULT_PARAMETERS: ParametersLiteral = ParametersLiteral {
    he: backend::DEFAULT_PARAMETERS,
    num_replications: 1,
    num_distinct_prf_keys: 1,
};

impl ParametersLiteral {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    he: backend::Parameters,
    num_replications: usize,
    num_distinct_prf_keys: usize,
}

impl Parameters {
    pub fn new(literal: ParametersLiteral) -> Result<Self, ParameterError> {
        let he: backend::Parameters = backend::Parameters::new(literal.he)?;
        if he.n() < MIN_N {
            return Err(ParameterError::RingTooSmall { n: he.n(), min: MIN_N });
        }
        if literal.num_replications == 0 || !literal.num_replications.is_power_of_two() {
            return Err(ParameterError::InvalidNumReplications(literal.num_replications));
        }
        // Replicas of a slot share the dataset half of their tag, which
        // leaks alpha through the closed-form PRF.
        if literal.num_replications > 1 {
            return Err(ParameterError::ReplicationNotAllowed(literal.num_replications));
        }
        if literal.num_distinct_prf_keys != 1 {
            return Err(ParameterError::InvalidNumDistinctPrfKeys(literal.num_distinct_prf_keys));
        }
        Ok(Self {
            he,
            num_replications: literal.num_replications,
            num_distinct_prf_keys: literal.num_distinct_prf_keys,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(Self::new(ParametersLiteral::from_json(json)?)?)
    }

    pub fn literal(&self) -> ParametersLiteral {
        ParametersLiteral {
            he: self.he.literal(),
            num_replications: self.num_replications,
            num_distinct_prf_keys: self.num_distinct_prf_keys,
        }
    }

    pub fn he(&self) -> &backend::Parameters {
        &self.he
    }

    pub fn n(&self) -> usize {
        self.he.n()
    }

    /// Number of distinct values a plaintext carries, N / NumReplications.
    pub fn n_slots(&self) -> usize {
        self.he.n() / self.num_replications
    }

    pub fn n_cols(&self) -> usize {
        self.he.n_cols()
    }

    pub fn t(&self) -> u64 {
        self.he.t()
    }

    pub fn modulus(&self) -> &backend::modulus::Modulus {
        self.he.modulus()
    }

    pub fn num_replications(&self) -> usize {
        self.num_replications
    }

    pub fn num_distinct_prf_keys(&self) -> usize {
        self.num_distinct_prf_keys
    }
}
