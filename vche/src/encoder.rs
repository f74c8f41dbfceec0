use backend::modulus::Modulus;
use log::debug;

use crate::{
    error::VerificationError,
    keys::SecretKey,
    layouts::{Plaintext, PlaintextMul},
    parameters::Parameters,
    plaintext_evaluator::Poly,
    prf::{Prf, PrfMode},
    tag::Tag,
};

/// Encodes messages as `[m, rho]` with `m + alpha * rho = PRF(tag)`, and
/// checks decrypted results against their MAC state.
pub struct Encoder {
    params: Parameters,
    encoder: backend::Encoder,
    prf: Prf,
    alpha: u64,
    alpha_inv: u64,
    mode: PrfMode,
}

impl Encoder {
    pub fn new(params: &Parameters, sk: &SecretKey, mode: PrfMode) -> Self {
        Self {
            params: params.clone(),
            encoder: backend::Encoder::new(params.he()),
            prf: Prf::new(&sk.k),
            alpha: sk.alpha(),
            alpha_inv: sk.alpha_inv(),
            mode,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    fn check_tags(&self, tags: &[Tag]) {
        assert_eq!(
            tags.len(),
            self.params.n_slots(),
            "expected one tag per slot ({}), got {}",
            self.params.n_slots(),
            tags.len()
        );
    }

    /// `(r - m) * alpha^-1` slot-wise.
    fn mac_slots(&self, m: &[u64], tags: &[Tag]) -> Vec<u64> {
        self.check_tags(tags);
        let t: &Modulus = self.params.modulus();
        let r: Vec<u64> = self.prf.eval_tags(tags, t.q(), self.mode);
        m.iter()
            .zip(r.iter())
            .map(|(m, r)| t.mul(t.sub(*r, *m), self.alpha_inv))
            .collect()
    }

    pub fn encode_uint(&self, coeffs: &[u64], tags: &[Tag]) -> Plaintext {
        let m: backend::Plaintext = self.encoder.encode_uint(coeffs);
        let rho: Vec<u64> = self.mac_slots(&m.data, tags);
        Plaintext {
            value: vec![m, backend::Plaintext { data: rho }],
        }
    }

    pub fn encode_int(&self, coeffs: &[i64], tags: &[Tag]) -> Plaintext {
        let m: backend::Plaintext = self.encoder.encode_int(coeffs);
        let rho: Vec<u64> = self.mac_slots(&m.data, tags);
        Plaintext {
            value: vec![m, backend::Plaintext { data: rho }],
        }
    }

    pub fn encode_uint_mul(&self, coeffs: &[u64], tags: &[Tag]) -> PlaintextMul {
        let m: backend::PlaintextMul = self.encoder.encode_uint_mul(coeffs);
        let rho: Vec<u64> = self.mac_slots(&m.data, tags);
        PlaintextMul {
            value: vec![m, backend::PlaintextMul { data: rho }],
        }
    }

    pub fn encode_int_mul(&self, coeffs: &[i64], tags: &[Tag]) -> PlaintextMul {
        let m: backend::PlaintextMul = self.encoder.encode_int_mul(coeffs);
        let rho: Vec<u64> = self.mac_slots(&m.data, tags);
        PlaintextMul {
            value: vec![m, backend::PlaintextMul { data: rho }],
        }
    }

    /// Horner evaluation of the outer coefficients at alpha, compared
    /// slot-wise with `value + shift`.
    pub fn verify(&self, pt: &Plaintext, mac: &Poly) -> Result<(), VerificationError> {
        assert!(!pt.is_empty(), "cannot decode an empty plaintext");
        let t: &Modulus = self.params.modulus();
        let expected: Vec<u64> = mac.authenticated(t);
        let mut acc: Vec<u64> = pt.value[pt.len() - 1].data.iter().map(|x| t.reduce(*x)).collect();
        pt.value[..pt.len() - 1].iter().rev().for_each(|p| {
            acc.iter_mut()
                .zip(p.data.iter())
                .for_each(|(a, p)| *a = t.add(t.mul(*a, self.alpha), t.reduce(*p)));
        });
        match acc.iter().zip(expected.iter()).position(|(a, e)| a != e) {
            Some(slot) => {
                debug!("MAC mismatch at slot {} over {} outer coefficients", slot, pt.len());
                Err(VerificationError::MacMismatch { slot })
            }
            None => Ok(()),
        }
    }

    pub fn decode_uint(&self, pt: &Plaintext, mac: &Poly) -> Result<Vec<u64>, VerificationError> {
        self.verify(pt, mac)?;
        Ok(self.encoder.decode_uint(&pt.value[0]))
    }

    pub fn decode_int(&self, pt: &Plaintext, mac: &Poly) -> Result<Vec<i64>, VerificationError> {
        self.verify(pt, mac)?;
        Ok(self.encoder.decode_int(&pt.value[0]))
    }
}
