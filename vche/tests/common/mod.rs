#![allow(dead_code)]

use backend::{EvaluationKey, RotationKeySet, modulus::Modulus};
use sampling::source::Source;
use vche::{
    Ciphertext, Decryptor, Encoder, EncoderCfPrf, EncoderPlaintext, Encryptor, Evaluator, KeyGenerator, Parameters,
    ParametersLiteral, Plaintext, PlaintextEvaluator, Poly, PrfMode, Prover, SecretKey, Tag, VerificationError,
    Verifier, VerifPlaintext,
};

pub struct Context {
    pub params: Parameters,
    pub kgen: KeyGenerator,
    pub sk: SecretKey,
    pub encoder: Encoder,
    pub encoder_pt: EncoderPlaintext,
    pub encoder_cf: EncoderCfPrf,
    pub encryptor: Encryptor,
    pub decryptor: Decryptor,
    pub eval: Evaluator,
    pub eval_pt: PlaintextEvaluator,
    pub source: Source,
}

pub fn params(log_n: usize) -> Parameters {
    Parameters::new(ParametersLiteral {
        he: backend::ParametersLiteral { log_n, t: 65537 },
        num_replications: 1,
        num_distinct_prf_keys: 1,
    })
    .unwrap()
}

/// Relinearization key up to degree 4, inner-sum rotations and offsets 3, -1.
pub fn gen_evaluation_key(kgen: &KeyGenerator, sk: &SecretKey, source: &mut Source) -> EvaluationKey {
    let mut rtks: RotationKeySet = kgen.gen_rotation_keys_for_inner_sum(sk, source);
    rtks.merge(kgen.gen_rotation_keys_for_rotations(&[3, -1], false, sk, source));
    EvaluationKey {
        rlk: Some(kgen.gen_relinearization_key(sk, 3, source)),
        rtks: Some(rtks),
    }
}

impl Context {
    pub fn new(log_n: usize, mode: PrfMode) -> Self {
        let params: Parameters = params(log_n);
        let mut source: Source = Source::new([0u8; 32]);
        let kgen: KeyGenerator = KeyGenerator::new(&params);
        let sk: SecretKey = kgen.gen_secret_key(&mut source);
        let evk: EvaluationKey = gen_evaluation_key(&kgen, &sk, &mut source);
        Self {
            encoder: Encoder::new(&params, &sk, mode),
            encoder_pt: EncoderPlaintext::new(&params, &sk, mode),
            encoder_cf: EncoderCfPrf::new(&params, &sk),
            encryptor: Encryptor::new_sk(&params, &sk),
            decryptor: Decryptor::new(&params, &sk),
            eval: Evaluator::new(&params, evk),
            eval_pt: PlaintextEvaluator::new(&params),
            params,
            kgen,
            sk,
            source,
        }
    }

    pub fn t(&self) -> Modulus {
        *self.params.modulus()
    }

    pub fn random(&mut self) -> Vec<u64> {
        let mut data: Vec<u64> = vec![0u64; self.params.n()];
        self.source.fill_u64_mod(self.params.t(), &mut data);
        data
    }

    pub fn encrypt(&mut self, coeffs: &[u64], tags: &[Tag]) -> Ciphertext {
        let pt: Plaintext = self.encoder.encode_uint(coeffs, tags);
        self.encryptor.encrypt(&pt, &mut self.source)
    }

    /// Ciphertext and directly evaluated MAC state of `coeffs`.
    pub fn input(&mut self, coeffs: &[u64], tags: &[Tag]) -> (Ciphertext, Poly) {
        (self.encrypt(coeffs, tags), self.encoder_pt.encode(tags))
    }

    /// Ciphertext and symbolic MAC state of `coeffs`.
    pub fn input_cf(&mut self, coeffs: &[u64], tags: &[Tag]) -> (Ciphertext, VerifPlaintext) {
        (self.encrypt(coeffs, tags), self.encoder_cf.encode(tags))
    }

    pub fn decode(&self, ct: &Ciphertext, mac: &Poly) -> Result<Vec<u64>, VerificationError> {
        self.encoder.decode_uint(&self.decryptor.decrypt(ct), mac)
    }

    pub fn prover_verifier(&mut self) -> (Prover, Verifier) {
        let evk: EvaluationKey = gen_evaluation_key(&self.kgen, &self.sk, &mut self.source);
        (
            Prover::new(&self.params, evk),
            Verifier::with_seed(&self.params, &self.sk, self.source.new_seed()),
        )
    }
}

pub fn slotwise(t: &Modulus, a: &[u64], b: &[u64], f: impl Fn(&Modulus, u64, u64) -> u64) -> Vec<u64> {
    a.iter().zip(b.iter()).map(|(a, b)| f(t, *a, *b)).collect()
}

/// Left rotation of each row of the 2 x (n/2) slot matrix.
pub fn rotate(a: &[u64], k: i64) -> Vec<u64> {
    let n_cols: usize = a.len() / 2;
    let k: usize = k.rem_euclid(n_cols as i64) as usize;
    a.chunks_exact(n_cols)
        .flat_map(|row| (0..n_cols).map(move |i| row[(i + k) % n_cols]))
        .collect()
}

pub fn swap_rows(a: &[u64]) -> Vec<u64> {
    let n_cols: usize = a.len() / 2;
    a[n_cols..].iter().chain(a[..n_cols].iter()).copied().collect()
}
