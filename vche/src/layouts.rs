use crate::parameters::Parameters;

/// Outer coefficients `[m, rho, ...]` of an authenticated plaintext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plaintext {
    pub value: Vec<backend::Plaintext>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaintextMul {
    pub value: Vec<backend::PlaintextMul>,
}

/// Polynomial in the outer variable with ciphertext coefficients. After
/// decryption, evaluating it at alpha yields the MAC value of the slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub value: Vec<backend::Ciphertext>,
}

impl Plaintext {
    pub fn alloc(params: &Parameters, len: usize) -> Self {
        Self {
            value: vec![backend::Plaintext::alloc(params.he()); len],
        }
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl PlaintextMul {
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Ciphertext {
    pub fn alloc(params: &Parameters, len: usize, degree: usize) -> Self {
        Self {
            value: vec![backend::Ciphertext::alloc(params.he(), degree); len],
        }
    }

    /// Number of outer coefficients.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn outer_degree(&self) -> usize {
        self.value.len() - 1
    }

    /// Largest degree of the inner ciphertexts.
    pub fn inner_degree(&self) -> usize {
        self.value.iter().map(|ct| ct.degree()).max().unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Ciphertext(&'a Ciphertext),
    Plaintext(&'a Plaintext),
    PlaintextMul(&'a PlaintextMul),
}

impl<'a> Operand<'a> {
    pub fn len(&self) -> usize {
        match self {
            Operand::Ciphertext(ct) => ct.len(),
            Operand::Plaintext(pt) => pt.len(),
            Operand::PlaintextMul(pt) => pt.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outer coefficient `i` as an operand of the underlying scheme.
    pub fn get(&self, i: usize) -> backend::Operand<'a> {
        match *self {
            Operand::Ciphertext(ct) => backend::Operand::Ciphertext(&ct.value[i]),
            Operand::Plaintext(pt) => backend::Operand::Plaintext(&pt.value[i]),
            Operand::PlaintextMul(pt) => backend::Operand::PlaintextMul(&pt.value[i]),
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
