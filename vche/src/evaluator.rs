//! Homomorphic evaluation over outer ciphertexts.
//!
//! Every operation of the underlying scheme is applied coefficient-wise.
//! Multiplication is a polynomial product in the outer variable and picks
//! between a fused convolution, Karatsuba and the schoolbook product.

use backend::{EvaluationKey, SwitchingKey};
use log::trace;

use crate::{
    layouts::{Ciphertext, Operand},
    parameters::Parameters,
};

/// Outer evaluator. Copies share the evaluation keys and own their scratch
/// space, see [backend::Evaluator::shallow_copy].
pub struct Evaluator {
    params: Parameters,
    eval: backend::Evaluator,
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
            eval: backend::Evaluator::new(params.he(), evk),
        }
    }

    pub fn shallow_copy(&self) -> Self {
        Self {
            params: self.params.clone(),
            eval: self.eval.shallow_copy(),
        }
    }

    pub fn with_key(&self, evk: EvaluationKey) -> Self {
        Self {
            params: self.params.clone(),
            eval: self.eval.with_key(evk),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    fn combine<const SUB: bool, const LAZY: bool>(&self, op0: Operand, op1: Operand) -> Ciphertext {
        let zero: backend::Plaintext = backend::Plaintext::alloc(self.params.he());
        let zero: backend::Operand = backend::Operand::Plaintext(&zero);
        let value: Vec<backend::Ciphertext> = (0..op0.len().max(op1.len()))
            .map(|i| {
                let a: backend::Operand = if i < op0.len() { op0.get(i) } else { zero };
                let b: backend::Operand = if i < op1.len() { op1.get(i) } else { zero };
                match (SUB, LAZY) {
                    (false, false) => self.eval.add(a, b),
                    (false, true) => self.eval.add_no_mod(a, b),
                    (true, false) => self.eval.sub(a, b),
                    (true, true) => self.eval.sub_no_mod(a, b),
                }
            })
            .collect();
        Ciphertext { value }
    }

    /// Pads the shorter operand with zeros.
    pub fn add(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<false, false>(op0, op1)
    }

    pub fn add_no_mod(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<false, true>(op0, op1)
    }

    /// Coefficients of `op1` beyond the length of `op0` are negated.
    pub fn sub(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<true, false>(op0, op1)
    }

    pub fn sub_no_mod(&self, op0: Operand, op1: Operand) -> Ciphertext {
        self.combine::<true, true>(op0, op1)
    }

    fn map(&self, ct: &Ciphertext, f: impl Fn(&backend::Evaluator, &backend::Ciphertext) -> backend::Ciphertext) -> Ciphertext {
        Ciphertext {
            value: ct.value.iter().map(|c| f(&self.eval, c)).collect(),
        }
    }

    pub fn neg(&self, ct: &Ciphertext) -> Ciphertext {
        self.map(ct, |eval, c| eval.neg(c))
    }

    pub fn reduce(&self, ct: &Ciphertext) -> Ciphertext {
        self.map(ct, |eval, c| eval.reduce(c))
    }

    pub fn mul_scalar(&self, ct: &Ciphertext, scalar: u64) -> Ciphertext {
        self.map(ct, |eval, c| eval.mul_scalar(c, scalar))
    }

    pub fn relinearize(&self, ct: &Ciphertext) -> Ciphertext {
        self.map(ct, |eval, c| eval.relinearize(c))
    }

    pub fn switch_keys(&self, ct: &Ciphertext, swk: &SwitchingKey) -> Ciphertext {
        self.map(ct, |eval, c| eval.switch_keys(c, swk))
    }

    /// Rotates the slots left by `k`.
    pub fn rotate_columns(&self, ct: &Ciphertext, k: i64) -> Ciphertext {
        let k: i64 = k * self.params.num_replications() as i64;
        self.map(ct, |eval, c| eval.rotate_columns(c, k))
    }

    pub fn rotate_rows(&self, ct: &Ciphertext) -> Ciphertext {
        self.map(ct, |eval, c| eval.rotate_rows(c))
    }

    pub fn inner_sum(&self, ct: &Ciphertext) -> Ciphertext {
        self.map(ct, |eval, c| eval.inner_sum(c))
    }

    /// Outer product. Uses the fused convolution when every inner ciphertext
    /// has degree at most 1, Karatsuba for other ciphertext operands and the
    /// schoolbook product for plaintext operands.
    pub fn mul(&mut self, ct: &Ciphertext, op: Operand) -> Ciphertext {
        let out: Ciphertext = match op {
            Operand::Ciphertext(b) if ct.inner_degree() <= 1 && b.inner_degree() <= 1 => {
                trace!("outer mul {}x{}: fused convolution", ct.len(), b.len());
                Ciphertext {
                    value: self.eval.convolve(&ct.value, &b.value),
                }
            }
            Operand::Ciphertext(b) => {
                trace!("outer mul {}x{}: karatsuba", ct.len(), b.len());
                self.mul_karatsuba(ct, b)
            }
            _ => self.mul_naive(ct, op),
        };
        assert_eq!(
            out.len(),
            ct.len() + op.len() - 1,
            "outer degree of the product does not match the degrees of its operands"
        );
        out
    }

    /// Schoolbook product, `len(ct) * len(op)` multiplications of the
    /// underlying scheme.
    pub fn mul_naive(&self, ct: &Ciphertext, op: Operand) -> Ciphertext {
        assert!(!ct.is_empty() && !op.is_empty(), "cannot multiply empty outer ciphertexts");
        let mut value: Vec<Option<backend::Ciphertext>> = vec![None; ct.len() + op.len() - 1];
        ct.value.iter().enumerate().for_each(|(i, a)| {
            (0..op.len()).for_each(|j| {
                let prod: backend::Ciphertext = self.eval.mul(a, op.get(j));
                match &mut value[i + j] {
                    Some(acc) => self.eval.add_inplace(acc, backend::Operand::Ciphertext(&prod)),
                    slot => *slot = Some(prod),
                }
            })
        });
        Ciphertext {
            value: value.into_iter().flatten().collect(),
        }
    }

    /// Karatsuba product, operands may have different lengths.
    pub fn mul_karatsuba(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        assert!(!a.is_empty() && !b.is_empty(), "cannot multiply empty outer ciphertexts");
        Ciphertext {
            value: self.karatsuba(&a.value, &b.value),
        }
    }

    fn karatsuba(&self, a: &[backend::Ciphertext], b: &[backend::Ciphertext]) -> Vec<backend::Ciphertext> {
        if a.len() == 1 {
            return b.iter().map(|y| self.eval.mul(&a[0], y.into())).collect();
        }
        if b.len() == 1 {
            return a.iter().map(|x| self.eval.mul(x, (&b[0]).into())).collect();
        }

        let cut: usize = (a.len().max(b.len()) / 2).min(a.len().min(b.len()) - 1);
        let (a0, a1) = a.split_at(cut);
        let (b0, b1) = b.split_at(cut);

        let z0: Vec<backend::Ciphertext> = self.karatsuba(a0, b0);
        let z2: Vec<backend::Ciphertext> = self.karatsuba(a1, b1);
        let mut z1: Vec<backend::Ciphertext> = self.karatsuba(&self.add_slices(a0, a1), &self.add_slices(b0, b1));
        z1.iter_mut().enumerate().for_each(|(i, z)| {
            if let Some(x) = z0.get(i) {
                self.eval.sub_inplace(z, x.into());
            }
            if let Some(x) = z2.get(i) {
                self.eval.sub_inplace(z, x.into());
            }
        });

        let mut out: Vec<Option<backend::Ciphertext>> = vec![None; a.len() + b.len() - 1];
        [(0, z0), (cut, z1), (2 * cut, z2)].into_iter().for_each(|(offset, z)| {
            z.into_iter().enumerate().for_each(|(i, z)| match &mut out[offset + i] {
                Some(acc) => self.eval.add_inplace(acc, (&z).into()),
                slot => *slot = Some(z),
            })
        });
        out.into_iter().flatten().collect()
    }

    fn add_slices(&self, a: &[backend::Ciphertext], b: &[backend::Ciphertext]) -> Vec<backend::Ciphertext> {
        (0..a.len().max(b.len()))
            .map(|i| match (a.get(i), b.get(i)) {
                (Some(x), Some(y)) => self.eval.add(x.into(), y.into()),
                (Some(x), None) | (None, Some(x)) => x.clone(),
                (None, None) => unreachable!(),
            })
            .collect()
    }
}
