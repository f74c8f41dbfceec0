use crate::{
    layouts::{Plaintext, PlaintextMul},
    modulus::Modulus,
    parameters::Parameters,
};

/// Maps integer vectors to slot plaintexts. Short inputs are zero padded.
pub struct Encoder {
    params: Parameters,
}

impl Encoder {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
        }
    }

    fn check_len(&self, len: usize) {
        assert!(
            len <= self.params.n(),
            "cannot encode {} values into {} slots",
            len,
            self.params.n()
        );
    }

    fn slots_uint(&self, coeffs: &[u64]) -> Vec<u64> {
        self.check_len(coeffs.len());
        let t: &Modulus = self.params.modulus();
        let mut data: Vec<u64> = vec![0u64; self.params.n()];
        data.iter_mut().zip(coeffs.iter()).for_each(|(d, c)| *d = t.reduce(*c));
        data
    }

    fn slots_int(&self, coeffs: &[i64]) -> Vec<u64> {
        self.check_len(coeffs.len());
        let t: &Modulus = self.params.modulus();
        let mut data: Vec<u64> = vec![0u64; self.params.n()];
        data.iter_mut().zip(coeffs.iter()).for_each(|(d, c)| *d = t.reduce_i64(*c));
        data
    }

    pub fn encode_uint(&self, coeffs: &[u64]) -> Plaintext {
        Plaintext {
            data: self.slots_uint(coeffs),
        }
    }

    pub fn encode_int(&self, coeffs: &[i64]) -> Plaintext {
        Plaintext {
            data: self.slots_int(coeffs),
        }
    }

    pub fn encode_uint_mul(&self, coeffs: &[u64]) -> PlaintextMul {
        PlaintextMul {
            data: self.slots_uint(coeffs),
        }
    }

    pub fn encode_int_mul(&self, coeffs: &[i64]) -> PlaintextMul {
        PlaintextMul {
            data: self.slots_int(coeffs),
        }
    }

    pub fn decode_uint(&self, pt: &Plaintext) -> Vec<u64> {
        let t: &Modulus = self.params.modulus();
        pt.data.iter().map(|x| t.reduce(*x)).collect()
    }

    /// Centred decoding, values at or above (T+1)/2 map to v - T.
    pub fn decode_int(&self, pt: &Plaintext) -> Vec<i64> {
        let t: &Modulus = self.params.modulus();
        pt.data.iter().map(|x| t.center(*x)).collect()
    }
}
