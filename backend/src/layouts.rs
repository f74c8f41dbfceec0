use crate::parameters::Parameters;

/// Slot-domain plaintext for additive use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plaintext {
    pub data: Vec<u64>,
}

/// Slot-domain plaintext prepared for multiplication. Only valid as a
/// multiplicative operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaintextMul {
    pub data: Vec<u64>,
}

impl Plaintext {
    pub fn alloc(params: &Parameters) -> Self {
        Self {
            data: vec![0u64; params.n()],
        }
    }
}

impl PlaintextMul {
    pub fn alloc(params: &Parameters) -> Self {
        Self {
            data: vec![0u64; params.n()],
        }
    }
}

/// Ciphertext of degree `value.len() - 1`, decrypting to `sum_i value[i] * s^i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub value: Vec<Vec<u64>>,
}

impl Ciphertext {
    pub fn alloc(params: &Parameters, degree: usize) -> Self {
        Self {
            value: vec![vec![0u64; params.n()]; degree + 1],
        }
    }

    pub fn degree(&self) -> usize {
        self.value.len() - 1
    }

    pub fn n(&self) -> usize {
        self.value[0].len()
    }
}

/// Operand of a homomorphic operation.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Ciphertext(&'a Ciphertext),
    Plaintext(&'a Plaintext),
    PlaintextMul(&'a PlaintextMul),
}

impl Operand<'_> {
    pub fn degree(&self) -> usize {
        match self {
            Operand::Ciphertext(ct) => ct.degree(),
            Operand::Plaintext(_) | Operand::PlaintextMul(_) => 0,
        }
    }

    /// Components viewed as a degree-0 or higher ciphertext. Panics on
    /// [Operand::PlaintextMul], which has no additive form.
    pub(crate) fn additive_components(&self) -> Vec<&[u64]> {
        match self {
            Operand::Ciphertext(ct) => ct.value.iter().map(|c| c.as_slice()).collect(),
            Operand::Plaintext(pt) => vec![pt.data.as_slice()],
            Operand::PlaintextMul(_) => panic!("a PlaintextMul cannot be used as an additive operand"),
        }
    }
}

impl<'a> From<&'a Ciphertext> for Operand<'a> {
    fn from(ct: &'a Ciphertext) -> Self {
        Operand::Ciphertext(ct)
    }
}

impl<'a> From<&'a Plaintext> for Operand<'a> {
    fn from(pt: &'a Plaintext) -> Self {
        Operand::Plaintext(pt)
    }
}

impl<'a> From<&'a PlaintextMul> for Operand<'a> {
    fn from(pt: &'a PlaintextMul) -> Self {
        Operand::PlaintextMul(pt)
    }
}
