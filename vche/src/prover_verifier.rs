//! The two roles of the interactive protocols. The prover holds the
//! ciphertexts and evaluation keys, the verifier holds the secret key and
//! draws fresh randomness for every run.

use backend::{EvaluationKey, Operand, modulus::Modulus};
use sampling::source::Source;

use crate::{
    error::{IdentityCheck, VerificationError},
    keys::SecretKey,
    layouts::Ciphertext,
    parameters::Parameters,
};

pub struct Prover {
    params: Parameters,
    eval: backend::Evaluator,
    encoder: backend::Encoder,
}

impl Prover {
    /// Needs the inner-sum rotation keys for the polynomial protocol and a
    /// relinearization key when inner ciphertexts have degree above 1.
    pub fn new(params: &Parameters, evk: EvaluationKey) -> Self {
        Self {
            params: params.clone(),
            eval: backend::Evaluator::new(params.he(), evk),
            encoder: backend::Encoder::new(params.he()),
        }
    }

    pub fn with_key(&self, evk: EvaluationKey) -> Self {
        Self {
            params: self.params.clone(),
            eval: self.eval.with_key(evk),
            encoder: backend::Encoder::new(self.params.he()),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub(crate) fn evaluator(&self) -> &backend::Evaluator {
        &self.eval
    }

    /// The coefficient carrying the message.
    pub fn result<'a>(&self, ct: &'a Ciphertext) -> &'a backend::Ciphertext {
        &ct.value[0]
    }

    /// `w_i = sum_j c_i[j] * x^j` in every slot, for each outer coefficient.
    pub fn evaluate_at(&self, ct: &Ciphertext, x: u64) -> Ciphertext {
        let t: &Modulus = self.params.modulus();
        let mut powers: Vec<u64> = vec![0u64; self.params.n()];
        let mut acc: u64 = 1 % t.q();
        powers.iter_mut().for_each(|p| {
            *p = acc;
            acc = t.mul(acc, x);
        });
        let powers: backend::PlaintextMul = self.encoder.encode_uint_mul(&powers);
        Ciphertext {
            value: ct
                .value
                .iter()
                .map(|c| {
                    let c: backend::Ciphertext = self.eval.relinearize(c);
                    self.eval.inner_sum(&self.eval.mul(&c, Operand::PlaintextMul(&powers)))
                })
                .collect(),
        }
    }

    /// Horner evaluation of the outer polynomial at `x`.
    pub fn linearly_combine(&self, ct: &Ciphertext, x: u64) -> backend::Ciphertext {
        let (last, rest) = match ct.value.split_last() {
            Some(split) => split,
            None => panic!("cannot combine an empty outer ciphertext"),
        };
        rest.iter().rev().fold(last.clone(), |acc, c| {
            let acc: backend::Ciphertext = self.eval.mul_scalar(&acc, x);
            self.eval.add((&acc).into(), c.into())
        })
    }

    fn one_hot(&self, slot: usize) -> backend::PlaintextMul {
        let mut coeffs: Vec<u64> = vec![0u64; self.params.n()];
        coeffs[slot] = 1;
        self.encoder.encode_uint_mul(&coeffs)
    }

    /// Packs `HH`, the number of `w_i` and the `w_i` into slots 0, 1 and
    /// 2.. of a single ciphertext. [Parameters] guarantee room for
    /// [crate::requadratization::MAX_REQUAD_LEN] evaluations.
    pub fn pack(&self, hh: &backend::Ciphertext, ws: &Ciphertext) -> backend::Ciphertext {
        assert!(
            ws.len() + 2 <= self.params.n(),
            "cannot pack {} evaluations into {} slots",
            ws.len(),
            self.params.n()
        );
        let mut res: backend::Ciphertext = self.eval.mul(hh, Operand::PlaintextMul(&self.one_hot(0)));
        ws.value.iter().enumerate().for_each(|(i, w)| {
            let masked: backend::Ciphertext = self.eval.mul(w, Operand::PlaintextMul(&self.one_hot(i + 2)));
            self.eval.add_inplace(&mut res, (&masked).into());
        });
        let mut len: Vec<u64> = vec![0u64; self.params.n()];
        len[1] = ws.len() as u64;
        self.eval.add_inplace(&mut res, Operand::Plaintext(&self.encoder.encode_uint(&len)));
        res
    }
}

pub struct Verifier {
    pub(crate) params: Parameters,
    pub(crate) sk: SecretKey,
    decryptor: backend::Decryptor,
    encryptor: backend::Encryptor,
    source: Source,
}

impl Verifier {
    /// Verifier with randomness seeded from the operating system.
    pub fn new(params: &Parameters, sk: &SecretKey) -> Self {
        Self::with_source(params, sk, Source::from_entropy())
    }

    /// Deterministic verifier, for reproducible runs.
    pub fn with_seed(params: &Parameters, sk: &SecretKey, seed: [u8; 32]) -> Self {
        Self::with_source(params, sk, Source::new(seed))
    }

    fn with_source(params: &Parameters, sk: &SecretKey, source: Source) -> Self {
        Self {
            params: params.clone(),
            sk: sk.clone(),
            decryptor: backend::Decryptor::new(params.he(), &sk.he),
            encryptor: backend::Encryptor::new_sk(params.he(), &sk.he),
            source,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn sk(&self) -> &SecretKey {
        &self.sk
    }

    /// Uniform in [0, T).
    pub fn random_point(&mut self) -> u64 {
        self.source.next_u64_mod(self.params.t())
    }

    /// Uniform in [1, T).
    pub fn random_nonzero_point(&mut self) -> u64 {
        self.source.next_u64_nonzero_mod(self.params.t())
    }

    pub fn random_poly(&mut self) -> Vec<u64> {
        let mut poly: Vec<u64> = vec![0u64; self.params.n()];
        self.source.fill_u64_mod(self.params.t(), &mut poly);
        poly
    }

    /// `sum_i poly[i] * x^i`.
    pub fn evaluate_at(&self, poly: &[u64], x: u64) -> u64 {
        let t: &Modulus = self.params.modulus();
        poly.iter().rev().fold(0u64, |acc, p| t.add(t.mul(acc, x), t.reduce(*p)))
    }

    pub fn linearly_combine(&self, evals: &[u64], x: u64) -> u64 {
        self.evaluate_at(evals, x)
    }

    pub fn check_equal(&self, lhs: u64, rhs: u64, check: IdentityCheck) -> Result<(), VerificationError> {
        if lhs == rhs {
            Ok(())
        } else {
            Err(VerificationError::IdentityCheck(check))
        }
    }

    pub fn decrypt(&self, ct: &backend::Ciphertext) -> Vec<u64> {
        let t: &Modulus = self.params.modulus();
        self.decryptor.decrypt(ct).data.iter().map(|x| t.reduce(*x)).collect()
    }

    pub fn encrypt(&mut self, data: Vec<u64>) -> backend::Ciphertext {
        self.encryptor.encrypt(&backend::Plaintext { data }, &mut self.source)
    }

    /// Inverse of [Prover::pack], returns `(HH, ws)`.
    pub fn unpack(&self, m: &[u64]) -> Result<(u64, Vec<u64>), VerificationError> {
        let len: usize = m[1] as usize;
        if len == 0 || len + 2 > m.len() {
            return Err(VerificationError::IdentityCheck(IdentityCheck::Packing));
        }
        Ok((m[0], m[2..len + 2].to_vec()))
    }
}
