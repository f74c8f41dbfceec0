use std::sync::Arc;

use crate::{
    keys::{EvaluationKey, RelinearizationKey, RotationKeySet, SwitchingKey},
    layouts::{Ciphertext, Operand},
    modulus::{Modulus, NONE, ONCE, REDUCEMOD},
    parameters::Parameters,
    scratch::ScratchPool,
    slots::{canonical_offset, rotate_columns, swap_rows},
};

/// Number of accumulation steps between two reductions of the u128
/// accumulators of [Evaluator::convolve].
const CONVOLVE_LAZY_STEPS: usize = 4;

/// Homomorphic evaluator. Keys are shared between copies, the scratch
/// pool is not.
pub struct Evaluator {
    params: Parameters,
    evk: Arc<EvaluationKey>,
    pool: ScratchPool,
}

impl Clone for Evaluator {
    fn clone(&self) -> Self {
        self.shallow_copy()
    }
}

impl Evaluator {
    pub fn new(params: &Parameters, evk: EvaluationKey) -> Self {
        Self {
            params: params.clone(),
            evk: Arc::new(evk),
            pool: ScratchPool::new(params.n()),
        }
    }

    /// New evaluator sharing the evaluation keys with a fresh scratch pool.
    pub fn shallow_copy(&self) -> Self {
        Self {
            params: self.params.clone(),
            evk: Arc::clone(&self.evk),
            pool: ScratchPool::new(self.params.n()),
        }
    }

    /// New evaluator with a fresh scratch pool and the given keys.
    pub fn with_key(&self, evk: EvaluationKey) -> Self {
        Self::new(&self.params, evk)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn evaluation_key(&self) -> &EvaluationKey {
        &self.evk
    }

    pub fn shares_keys_with(&self, other: &Evaluator) -> bool {
        Arc::ptr_eq(&self.evk, &other.evk)
    }

    fn t(&self) -> &Modulus {
        self.params.modulus()
    }

    fn combine<const REDUCE: REDUCEMOD, const SUB: bool>(&self, op0: Operand, op1: Operand) -> Ciphertext {
        let t: &Modulus = self.t();
        let a: Vec<&[u64]> = op0.additive_components();
        let b: Vec<&[u64]> = op1.additive_components();
        let n: usize = self.params.n();
        let value: Vec<Vec<u64>> = (0..a.len().max(b.len()))
            .map(|i| {
                let mut out: Vec<u64> = vec![0u64; n];
                match (a.get(i), b.get(i)) {
                    (Some(a), Some(b)) if SUB => t.va_sub_vb_into_vc::<REDUCE>(a, b, &mut out),
                    (Some(a), Some(b)) => t.va_add_vb_into_vc::<REDUCE>(a, b, &mut out),
                    (Some(a), None) => out.copy_from_slice(a),
                    (None, Some(b)) if SUB => t.va_neg_into_vb(b, &mut out),
                    (None, Some(b)) => out.copy_from_slice(b),
                    (None, None) => unreachable!(),
                }
                out
            })
            .collect();
        Ciphertext { value }
    }

    pub fn add(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<ONCE, false>(op0, op1)
    }

    /// Addition without the final modular reduction, coefficients stay in [0, 2T).
    pub fn add_no_mod(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<NONE, false>(op0, op1)
    }

    pub fn sub(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<ONCE, true>(op0, op1)
    }

    pub fn sub_no_mod(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<NONE, true>(op0, op1)
    }

    pub fn add_inplace(&self, ct: &mut Ciphertext, op: Operand) {
        let t: &Modulus = self.t();
        let b: Vec<&[u64]> = op.additive_components();
        b.iter().enumerate().for_each(|(i, b)| {
            if i < ct.value.len() {
                t.va_add_vb_into_vb::<ONCE>(b, &mut ct.value[i]);
            } else {
                ct.value.push(b.to_vec());
            }
        });
    }

    pub fn sub_inplace(&self, ct: &mut Ciphertext, op: Operand) {
        let t: &Modulus = self.t();
        let b: Vec<&[u64]> = op.additive_components();
        b.iter().enumerate().for_each(|(i, b)| {
            if i < ct.value.len() {
                t.va_sub_vb_into_vb::<ONCE>(b, &mut ct.value[i]);
            } else {
                let mut neg: Vec<u64> = vec![0u64; b.len()];
                t.va_neg_into_vb(b, &mut neg);
                ct.value.push(neg);
            }
        });
    }

    pub fn neg(&self, ct: &Ciphertext) -> Ciphertext {
        let mut out: Ciphertext = ct.clone();
        out.value.iter_mut().for_each(|c| self.t().va_neg_into_va(c));
        out
    }

    pub fn reduce(&self, ct: &Ciphertext) -> Ciphertext {
        let mut out: Ciphertext = ct.clone();
        out.value.iter_mut().for_each(|c| self.t().va_reduce_into_va(c));
        out
    }

    pub fn mul_scalar(&self, ct: &Ciphertext, scalar: u64) -> Ciphertext {
        let mut out: Ciphertext = ct.clone();
        out.value.iter_mut().for_each(|c| self.t().sa_mul_vb_into_vb(scalar, c));
        out
    }

    /// Tensor product with a ciphertext, component-wise scaling with a plaintext.
    pub fn mul(&self, ct: &Ciphertext, op: Operand) -> Ciphertext {
        let t: &Modulus = self.t();
        match op {
            Operand::Ciphertext(b) => {
                let n: usize = self.params.n();
                let mut out: Ciphertext = Ciphertext {
                    value: vec![vec![0u64; n]; ct.value.len() + b.value.len() - 1],
                };
                ct.value.iter().enumerate().for_each(|(i, a)| {
                    b.value.iter().enumerate().for_each(|(j, b)| {
                        t.va_mul_vb_add_vc_into_vc(a, b, &mut out.value[i + j]);
                    });
                });
                out
            }
            Operand::Plaintext(pt) => self.mul_slots(ct, &pt.data),
            Operand::PlaintextMul(pt) => self.mul_slots(ct, &pt.data),
        }
    }

    fn mul_slots(&self, ct: &Ciphertext, data: &[u64]) -> Ciphertext {
        let mut out: Ciphertext = ct.clone();
        out.value.iter_mut().for_each(|c| self.t().va_mul_vb_into_vb(data, c));
        out
    }

    fn rlk(&self) -> &RelinearizationKey {
        match &self.evk.rlk {
            Some(rlk) => rlk,
            None => panic!("missing relinearization key"),
        }
    }

    fn rtks(&self) -> &RotationKeySet {
        match &self.evk.rtks {
            Some(rtks) => rtks,
            None => panic!("missing rotation keys"),
        }
    }

    /// Brings the ciphertext back to degree 1.
    pub fn relinearize(&self, ct: &Ciphertext) -> Ciphertext {
        if ct.degree() <= 1 {
            return ct.clone();
        }
        let rlk: &RelinearizationKey = self.rlk();
        assert!(
            ct.degree() <= rlk.max_ciphertext_degree(),
            "relinearization key supports degree up to {}, got {}",
            rlk.max_ciphertext_degree(),
            ct.degree()
        );
        let t: &Modulus = self.t();
        let mut out: Ciphertext = Ciphertext {
            value: ct.value[..2].to_vec(),
        };
        ct.value[2..].iter().zip(rlk.keys.iter()).for_each(|(c, key)| {
            let (c0, c1) = out.value.split_at_mut(1);
            t.va_mul_vb_add_vc_into_vc(c, &key.value[0], &mut c0[0]);
            t.va_mul_vb_add_vc_into_vc(c, &key.value[1], &mut c1[0]);
        });
        out
    }

    fn key_switch(&self, c0: &[u64], c1: &[u64], key: &SwitchingKey) -> Ciphertext {
        let t: &Modulus = self.t();
        let mut out0: Vec<u64> = c0.to_vec();
        t.va_mul_vb_add_vc_into_vc(c1, &key.value[0], &mut out0);
        let mut out1: Vec<u64> = vec![0u64; c1.len()];
        t.va_mul_vb_into_vc(c1, &key.value[1], &mut out1);
        Ciphertext {
            value: vec![out0, out1],
        }
    }

    fn check_degree_one(&self, ct: &Ciphertext, op: &str) {
        assert_eq!(ct.degree(), 1, "{} requires a ciphertext of degree 1, got {}", op, ct.degree());
    }

    pub fn switch_keys(&self, ct: &Ciphertext, swk: &SwitchingKey) -> Ciphertext {
        self.check_degree_one(ct, "key switching");
        self.key_switch(&ct.value[0], &ct.value[1], swk)
    }

    /// Rotates the columns of both rows left by `k`.
    pub fn rotate_columns(&self, ct: &Ciphertext, k: i64) -> Ciphertext {
        self.check_degree_one(ct, "column rotation");
        let offset: usize = canonical_offset(k, self.params.n_cols());
        if offset == 0 {
            return ct.clone();
        }
        let key: &SwitchingKey = self.rtks().column_key(offset);
        let n: usize = self.params.n();
        let mut c0: Vec<u64> = vec![0u64; n];
        let mut c1: Vec<u64> = vec![0u64; n];
        rotate_columns(&ct.value[0], offset, &mut c0);
        rotate_columns(&ct.value[1], offset, &mut c1);
        self.key_switch(&c0, &c1, key)
    }

    pub fn rotate_rows(&self, ct: &Ciphertext) -> Ciphertext {
        self.check_degree_one(ct, "row rotation");
        let key: &SwitchingKey = self.rtks().row_key();
        let n: usize = self.params.n();
        let mut c0: Vec<u64> = vec![0u64; n];
        let mut c1: Vec<u64> = vec![0u64; n];
        swap_rows(&ct.value[0], &mut c0);
        swap_rows(&ct.value[1], &mut c1);
        self.key_switch(&c0, &c1, key)
    }

    /// Every slot of the result holds the sum of all slots.
    pub fn inner_sum(&self, ct: &Ciphertext) -> Ciphertext {
        let mut acc: Ciphertext = ct.clone();
        let mut i: usize = 1;
        while i < self.params.n_cols() {
            let rotated: Ciphertext = self.rotate_columns(&acc, i as i64);
            self.add_inplace(&mut acc, Operand::Ciphertext(&rotated));
            i <<= 1;
        }
        let swapped: Ciphertext = self.rotate_rows(&acc);
        self.add_inplace(&mut acc, Operand::Ciphertext(&swapped));
        acc
    }

    /// Product of the polynomials with ciphertext coefficients `a` and `b`,
    /// fused into one pass with lazily reduced accumulators. All inputs must
    /// have degree at most 1, every output has degree 2.
    pub fn convolve(&mut self, a: &[Ciphertext], b: &[Ciphertext]) -> Vec<Ciphertext> {
        assert!(!a.is_empty() && !b.is_empty(), "cannot convolve empty ciphertext vectors");
        assert!(
            a.iter().chain(b.iter()).all(|ct| ct.degree() <= 1),
            "convolution requires ciphertexts of degree at most 1"
        );
        let n: usize = self.params.n();
        let t: Modulus = *self.params.modulus();
        let acc: &mut [u128] = self.pool.acc_mut(3 * n);
        (0..a.len() + b.len() - 1)
            .map(|k| {
                acc.fill(0);
                let lo: usize = k.saturating_sub(b.len() - 1);
                let hi: usize = k.min(a.len() - 1);
                (lo..=hi).enumerate().for_each(|(step, i)| {
                    accumulate_tensor(acc, &a[i], &b[k - i], n);
                    if (step + 1) % CONVOLVE_LAZY_STEPS == 0 {
                        acc.iter_mut().for_each(|x| *x %= t.q() as u128);
                    }
                });
                Ciphertext {
                    value: acc.chunks_exact(n).map(|c| c.iter().map(|x| t.reduce_u128(*x)).collect()).collect(),
                }
            })
            .collect()
    }
}

/// acc[0..n] += a0 b0, acc[n..2n] += a0 b1 + a1 b0, acc[2n..3n] += a1 b1.
#[inline(always)]
fn accumulate_tensor(acc: &mut [u128], a: &Ciphertext, b: &Ciphertext, n: usize) {
    let (e0, rest) = acc.split_at_mut(n);
    let (e1, e2) = rest.split_at_mut(n);
    let a1: Option<&Vec<u64>> = a.value.get(1);
    let b1: Option<&Vec<u64>> = b.value.get(1);
    (0..n).for_each(|x| {
        let a0: u128 = a.value[0][x] as u128;
        let b0: u128 = b.value[0][x] as u128;
        e0[x] += a0 * b0;
        if let Some(b1) = b1 {
            e1[x] += a0 * b1[x] as u128;
        }
        if let Some(a1) = a1 {
            let a1: u128 = a1[x] as u128;
            e1[x] += a1 * b0;
            if let Some(b1) = b1 {
                e2[x] += a1 * b1[x] as u128;
            }
        }
    });
}
