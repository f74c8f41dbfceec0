//! MAC side of a computation with directly evaluated PRF outputs.
//!
//! A [Poly] holds one MAC value per slot plus the correction term added by
//! requadratization. Every operation mirrors the one applied to the
//! ciphertexts by [crate::evaluator::Evaluator].

use backend::{
    modulus::{Modulus, NONE, ONCE},
    slots::{canonical_offset, rotate_columns, swap_rows},
};

use crate::{
    keys::SecretKey,
    parameters::Parameters,
    prf::{Prf, PrfMode},
    tag::Tag,
};

/// Authenticated value of every slot is `value + shift`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    pub value: Vec<u64>,
    pub shift: Vec<u64>,
}

impl Poly {
    pub fn alloc(params: &Parameters) -> Self {
        Self {
            value: vec![0u64; params.n()],
            shift: vec![0u64; params.n()],
        }
    }

    /// `value + shift` slot-wise.
    pub fn authenticated(&self, t: &Modulus) -> Vec<u64> {
        let mut out: Vec<u64> = vec![0u64; self.value.len()];
        t.va_add_vb_into_vc::<ONCE>(&self.value, &self.shift, &mut out);
        out.iter_mut().for_each(|x| *x = t.reduce(*x));
        out
    }
}

/// Derives the MAC state of fresh inputs from their tags.
pub struct EncoderPlaintext {
    params: Parameters,
    prf: Prf,
    mode: PrfMode,
}

impl EncoderPlaintext {
    pub fn new(params: &Parameters, sk: &SecretKey, mode: PrfMode) -> Self {
        Self {
            params: params.clone(),
            prf: Prf::new(&sk.k),
            mode,
        }
    }

    pub fn encode(&self, tags: &[Tag]) -> Poly {
        assert_eq!(
            tags.len(),
            self.params.n_slots(),
            "expected one tag per slot ({}), got {}",
            self.params.n_slots(),
            tags.len()
        );
        Poly {
            value: self.prf.eval_tags(tags, self.params.t(), self.mode),
            shift: vec![0u64; self.params.n()],
        }
    }
}

#[derive(Clone)]
pub struct PlaintextEvaluator {
    params: Parameters,
}

impl PlaintextEvaluator {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
        }
    }

    fn t(&self) -> &Modulus {
        self.params.modulus()
    }

    fn map2(&self, op0: &Poly, op1: &Poly, f: impl Fn(&Modulus, &[u64], &[u64], &mut [u64])) -> Poly {
        let mut out: Poly = Poly::alloc(&self.params);
        f(self.t(), &op0.value, &op1.value, &mut out.value);
        f(self.t(), &op0.shift, &op1.shift, &mut out.shift);
        out
    }

    fn map1(&self, op: &Poly, f: impl Fn(&Modulus, &mut [u64])) -> Poly {
        let mut out: Poly = op.clone();
        f(self.t(), &mut out.value);
        f(self.t(), &mut out.shift);
        out
    }

    pub fn add(&self, op0: &Poly, op1: &Poly) -> Poly {
        self.map2(op0, op1, |t, a, b, c| t.va_add_vb_into_vc::<ONCE>(a, b, c))
    }

    pub fn add_no_mod(&self, op0: &Poly, op1: &Poly) -> Poly {
        self.map2(op0, op1, |t, a, b, c| t.va_add_vb_into_vc::<NONE>(a, b, c))
    }

    pub fn sub(&self, op0: &Poly, op1: &Poly) -> Poly {
        self.map2(op0, op1, |t, a, b, c| t.va_sub_vb_into_vc::<ONCE>(a, b, c))
    }

    pub fn sub_no_mod(&self, op0: &Poly, op1: &Poly) -> Poly {
        self.map2(op0, op1, |t, a, b, c| t.va_sub_vb_into_vc::<NONE>(a, b, c))
    }

    pub fn neg(&self, op: &Poly) -> Poly {
        self.map1(op, |t, a| t.va_neg_into_va(a))
    }

    pub fn reduce(&self, op: &Poly) -> Poly {
        self.map1(op, |t, a| t.va_reduce_into_va(a))
    }

    pub fn mul_scalar(&self, op: &Poly, scalar: u64) -> Poly {
        self.map1(op, |t, a| t.sa_mul_vb_into_vb(scalar, a))
    }

    /// `(p0 + s0)(p1 + s1) = p0 p1 + (s0 s1 + s0 p1 + s1 p0)`.
    pub fn mul(&self, op0: &Poly, op1: &Poly) -> Poly {
        let t: &Modulus = self.t();
        let mut out: Poly = Poly::alloc(&self.params);
        t.va_mul_vb_into_vc(&op0.value, &op1.value, &mut out.value);
        t.va_mul_vb_into_vc(&op0.shift, &op1.shift, &mut out.shift);
        t.va_mul_vb_add_vc_into_vc(&op0.shift, &op1.value, &mut out.shift);
        t.va_mul_vb_add_vc_into_vc(&op1.shift, &op0.value, &mut out.shift);
        out
    }

    pub fn relinearize(&self, op: &Poly) -> Poly {
        op.clone()
    }

    pub fn switch_keys(&self, op: &Poly) -> Poly {
        op.clone()
    }

    pub fn rotate_columns(&self, op: &Poly, k: i64) -> Poly {
        let offset: usize = canonical_offset(k * self.params.num_replications() as i64, self.params.n_cols());
        let mut out: Poly = Poly::alloc(&self.params);
        rotate_columns(&op.value, offset, &mut out.value);
        rotate_columns(&op.shift, offset, &mut out.shift);
        out
    }

    pub fn rotate_rows(&self, op: &Poly) -> Poly {
        let mut out: Poly = Poly::alloc(&self.params);
        swap_rows(&op.value, &mut out.value);
        swap_rows(&op.shift, &mut out.shift);
        out
    }

    /// Every slot holds the sum of all slots.
    pub fn inner_sum(&self, op: &Poly) -> Poly {
        let t: &Modulus = self.t();
        let sum = |a: &[u64]| -> u64 { t.reduce_u128(a.iter().map(|x| *x as u128).sum()) };
        Poly {
            value: vec![sum(&op.value); op.value.len()],
            shift: vec![sum(&op.shift); op.shift.len()],
        }
    }
}
