use backend::{
    EvaluationKey, PublicKey, RelinearizationKey, RotationKeySet, SwitchingKey, modulus::Modulus,
};
use sampling::source::Source;

use crate::{error::ParameterError, parameters::Parameters, prf::PrfKey};

/// Secret key of the underlying scheme extended with the MAC material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey {
    pub he: backend::SecretKey,
    pub k: PrfKey,
    alpha: u64,
    alpha_inv: u64,
}

impl SecretKey {
    pub fn from_parts(params: &Parameters, he: backend::SecretKey, k: PrfKey, alpha: u64) -> Result<Self, ParameterError> {
        let t: &Modulus = params.modulus();
        match t.inv(t.reduce(alpha)) {
            Some(alpha_inv) => Ok(Self {
                he,
                k,
                alpha: t.reduce(alpha),
                alpha_inv,
            }),
            None => Err(ParameterError::NonInvertibleAlpha { alpha, t: t.q() }),
        }
    }

    pub fn alpha(&self) -> u64 {
        self.alpha
    }

    pub fn alpha_inv(&self) -> u64 {
        self.alpha_inv
    }
}

pub struct KeyGenerator {
    params: Parameters,
    he: backend::KeyGenerator,
}

impl KeyGenerator {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
            he: backend::KeyGenerator::new(params.he()),
        }
    }

    /// Draws alpha uniformly in [1, T) until it is invertible.
    pub fn gen_secret_key(&self, source: &mut Source) -> SecretKey {
        let t: &Modulus = self.params.modulus();
        let he: backend::SecretKey = self.he.gen_secret_key(source);
        let k: PrfKey = PrfKey::generate(source);
        loop {
            let alpha: u64 = source.next_u64_nonzero_mod(t.q());
            if let Some(alpha_inv) = t.inv(alpha) {
                return SecretKey {
                    he,
                    k,
                    alpha,
                    alpha_inv,
                };
            }
        }
    }

    pub fn gen_secret_key_with_alpha(&self, alpha: u64, source: &mut Source) -> Result<SecretKey, ParameterError> {
        let he: backend::SecretKey = self.he.gen_secret_key(source);
        let k: PrfKey = PrfKey::generate(source);
        SecretKey::from_parts(&self.params, he, k, alpha)
    }

    pub fn gen_public_key(&self, sk: &SecretKey, source: &mut Source) -> PublicKey {
        self.he.gen_public_key(&sk.he, source)
    }

    pub fn gen_key_pair(&self, source: &mut Source) -> (SecretKey, PublicKey) {
        let sk: SecretKey = self.gen_secret_key(source);
        let pk: PublicKey = self.gen_public_key(&sk, source);
        (sk, pk)
    }

    pub fn gen_relinearization_key(&self, sk: &SecretKey, max_degree: usize, source: &mut Source) -> RelinearizationKey {
        self.he.gen_relinearization_key(&sk.he, max_degree, source)
    }

    pub fn gen_switching_key(&self, sk_in: &SecretKey, sk_out: &SecretKey, source: &mut Source) -> SwitchingKey {
        assert_eq!(
            sk_in.alpha, sk_out.alpha,
            "alpha of old and new key must be the same to generate a switching key"
        );
        self.he.gen_switching_key(&sk_in.he, &sk_out.he, source)
    }

    /// Rotation keys for slot offsets `ks`, scaled to the physical layout.
    pub fn gen_rotation_keys_for_rotations(
        &self,
        ks: &[i64],
        include_swap_rows: bool,
        sk: &SecretKey,
        source: &mut Source,
    ) -> RotationKeySet {
        let r: i64 = self.params.num_replications() as i64;
        let scaled: Vec<i64> = ks.iter().map(|k| k * r).collect();
        self.he.gen_rotation_keys_for_rotations(&scaled, include_swap_rows, &sk.he, source)
    }

    pub fn gen_rotation_keys_for_inner_sum(&self, sk: &SecretKey, source: &mut Source) -> RotationKeySet {
        self.he.gen_rotation_keys_for_inner_sum(&sk.he, source)
    }

    /// Relinearization key and inner-sum rotation keys, enough for the
    /// polynomial protocol on products of two fresh ciphertexts.
    pub fn gen_evaluation_key(&self, sk: &SecretKey, source: &mut Source) -> EvaluationKey {
        EvaluationKey {
            rlk: Some(self.gen_relinearization_key(sk, 3, source)),
            rtks: Some(self.gen_rotation_keys_for_inner_sum(sk, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::DEFAULT_PARAMETERS;

    #[test]
    fn alpha_is_invertible() {
        let params: Parameters = Parameters::new(DEFAULT_PARAMETERS).unwrap();
        let kgen: KeyGenerator = KeyGenerator::new(&params);
        let mut source: Source = Source::new([0u8; 32]);
        (0..16).for_each(|_| {
            let sk: SecretKey = kgen.gen_secret_key(&mut source);
            assert_ne!(sk.alpha(), 0);
            assert_eq!(params.modulus().mul(sk.alpha(), sk.alpha_inv()), 1);
        });
    }

    #[test]
    fn rejects_zero_alpha() {
        let params: Parameters = Parameters::new(DEFAULT_PARAMETERS).unwrap();
        let kgen: KeyGenerator = KeyGenerator::new(&params);
        let mut source: Source = Source::new([0u8; 32]);
        assert_eq!(
            kgen.gen_secret_key_with_alpha(params.t(), &mut source),
            Err(ParameterError::NonInvertibleAlpha {
                alpha: params.t(),
                t: params.t()
            })
        );
        assert_eq!(kgen.gen_secret_key_with_alpha(3, &mut source).unwrap().alpha(), 3);
    }

    #[test]
    #[should_panic(expected = "alpha of old and new key must be the same")]
    fn switching_key_requires_same_alpha() {
        let params: Parameters = Parameters::new(DEFAULT_PARAMETERS).unwrap();
        let kgen: KeyGenerator = KeyGenerator::new(&params);
        let mut source: Source = Source::new([0u8; 32]);
        let sk0: SecretKey = kgen.gen_secret_key_with_alpha(3, &mut source).unwrap();
        let sk1: SecretKey = kgen.gen_secret_key_with_alpha(5, &mut source).unwrap();
        kgen.gen_switching_key(&sk0, &sk1, &mut source);
    }
}
