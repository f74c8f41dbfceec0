use sampling::source::Source;

use crate::{
    keys::{PublicKey, RelinearizationKey, RotationKeySet, SecretKey, SwitchingKey},
    modulus::{Modulus, ONCE},
    parameters::Parameters,
    slots::{canonical_offset, rotate_columns, swap_rows},
};

pub struct KeyGenerator {
    params: Parameters,
}

impl KeyGenerator {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
        }
    }

    pub fn gen_secret_key(&self, source: &mut Source) -> SecretKey {
        let mut value: Vec<u64> = vec![0u64; self.params.n()];
        source.fill_u64_mod(self.params.t(), &mut value);
        SecretKey { value }
    }

    pub fn gen_public_key(&self, sk: &SecretKey, source: &mut Source) -> PublicKey {
        let t: &Modulus = self.params.modulus();
        let mut a: Vec<u64> = vec![0u64; self.params.n()];
        source.fill_u64_mod(t.q(), &mut a);
        let mut b: Vec<u64> = vec![0u64; self.params.n()];
        t.va_mul_vb_into_vc(&a, &sk.value, &mut b);
        t.va_neg_into_va(&mut b);
        PublicKey { value: [b, a] }
    }

    pub fn gen_key_pair(&self, source: &mut Source) -> (SecretKey, PublicKey) {
        let sk: SecretKey = self.gen_secret_key(source);
        let pk: PublicKey = self.gen_public_key(&sk, source);
        (sk, pk)
    }

    /// Key switching ciphertexts under `s_in` into ciphertexts under `sk_out`.
    fn gen_switching_key_from(&self, s_in: &[u64], sk_out: &SecretKey, source: &mut Source) -> SwitchingKey {
        let t: &Modulus = self.params.modulus();
        let mut k1: Vec<u64> = vec![0u64; self.params.n()];
        source.fill_u64_mod(t.q(), &mut k1);
        let mut k0: Vec<u64> = vec![0u64; self.params.n()];
        t.va_mul_vb_into_vc(&k1, &sk_out.value, &mut k0);
        t.va_sub_vb_into_vb::<ONCE>(s_in, &mut k0);
        t.va_neg_into_va(&mut k0);
        SwitchingKey { value: [k0, k1] }
    }

    pub fn gen_switching_key(&self, sk_in: &SecretKey, sk_out: &SecretKey, source: &mut Source) -> SwitchingKey {
        self.gen_switching_key_from(&sk_in.value, sk_out, source)
    }

    /// Relinearization key for ciphertexts of degree up to `max_degree + 1`.
    pub fn gen_relinearization_key(&self, sk: &SecretKey, max_degree: usize, source: &mut Source) -> RelinearizationKey {
        assert!(max_degree >= 1, "invalid relinearization degree: {}", max_degree);
        let t: &Modulus = self.params.modulus();
        let mut power: Vec<u64> = sk.value.clone();
        let keys: Vec<SwitchingKey> = (0..max_degree)
            .map(|_| {
                t.va_mul_vb_into_vb(&sk.value, &mut power);
                self.gen_switching_key_from(&power, sk, source)
            })
            .collect();
        RelinearizationKey { keys }
    }

    /// Rotation keys for the given column offsets and, optionally, the row swap.
    pub fn gen_rotation_keys_for_rotations(
        &self,
        ks: &[i64],
        include_swap_rows: bool,
        sk: &SecretKey,
        source: &mut Source,
    ) -> RotationKeySet {
        let n_cols: usize = self.params.n_cols();
        let mut rtks: RotationKeySet = RotationKeySet::default();
        let mut rotated: Vec<u64> = vec![0u64; self.params.n()];
        ks.iter().for_each(|k| {
            let offset: usize = canonical_offset(*k, n_cols);
            if offset == 0 || rtks.columns.contains_key(&offset) {
                return;
            }
            rotate_columns(&sk.value, offset, &mut rotated);
            let key: SwitchingKey = self.gen_switching_key_from(&rotated, sk, source);
            rtks.columns.insert(offset, key);
        });
        if include_swap_rows {
            swap_rows(&sk.value, &mut rotated);
            rtks.rows = Some(self.gen_switching_key_from(&rotated, sk, source));
        }
        rtks
    }

    /// Column offsets 1, 2, 4, ..., N/4 and the row swap.
    pub fn gen_rotation_keys_for_inner_sum(&self, sk: &SecretKey, source: &mut Source) -> RotationKeySet {
        let ks: Vec<i64> = inner_sum_offsets(self.params.n_cols());
        self.gen_rotation_keys_for_rotations(&ks, true, sk, source)
    }
}

pub fn inner_sum_offsets(n_cols: usize) -> Vec<i64> {
    let mut ks: Vec<i64> = Vec::new();
    let mut i: usize = 1;
    while i < n_cols {
        ks.push(i as i64);
        i <<= 1;
    }
    ks
}
