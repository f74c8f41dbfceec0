//! Keyed pseudorandom functions on tags, built on SHAKE128.
//!
//! Inputs are length-prefixed before being absorbed, then a big-endian round
//! counter is appended and 8 bytes are squeezed. The word is masked to the
//! bit length of `q - 1` and rejected while it is not below `q`, so outputs
//! are uniform in `[0, q)`.

use rayon::prelude::*;
use sampling::source::{Source, mask_for};
use sha3::{
    Shake128,
    digest::{ExtendableOutput, Update, XofReader},
};

use crate::tag::Tag;

const DOMAIN: &[u8] = b"vche/prf/";

pub const PRF_KEY_LEN: usize = 32;

/// Keys of the index half (`k1`) and of the dataset half (`k2`) of a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrfKey {
    pub k1: [u8; PRF_KEY_LEN],
    pub k2: [u8; PRF_KEY_LEN],
}

impl PrfKey {
    pub fn generate(source: &mut Source) -> Self {
        Self {
            k1: source.new_seed(),
            k2: source.new_seed(),
        }
    }
}

/// Terms of the closed-form PRF `a * u + b * v`. `u, v` depend on the index
/// of the tag only, `a, b` on its dataset only and are never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosedForm {
    pub u: u64,
    pub v: u64,
    pub a: u64,
    pub b: u64,
}

/// How per-slot PRF outputs are derived. Encoders and MAC evaluators of one
/// computation must use the same mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrfMode {
    Direct,
    ClosedForm,
}

#[derive(Clone)]
pub struct Prf {
    xof1: Shake128,
    xof2: Shake128,
}

fn keyed(key: &[u8]) -> Shake128 {
    let mut xof: Shake128 = Shake128::default();
    xof.update(DOMAIN);
    xof.update(key);
    xof
}

fn sample_mod(keyed: &Shake128, inputs: &[&[u8]], q: u64) -> u64 {
    let mut base: Shake128 = keyed.clone();
    inputs.iter().for_each(|x| {
        base.update(&(x.len() as u64).to_be_bytes());
        base.update(x);
    });
    let mask: u64 = mask_for(q);
    let mut buf: [u8; 8] = [0u8; 8];
    let mut round: u64 = 0;
    loop {
        let mut xof: Shake128 = base.clone();
        xof.update(&round.to_be_bytes());
        xof.finalize_xof().read(&mut buf);
        let x: u64 = u64::from_be_bytes(buf) & mask;
        if x < q {
            return x;
        }
        round += 1;
    }
}

impl Prf {
    pub fn new(key: &PrfKey) -> Self {
        Self {
            xof1: keyed(&key.k1),
            xof2: keyed(&key.k2),
        }
    }

    /// Direct PRF, uniform in [0, t).
    pub fn direct(&self, tag: &Tag, t: u64) -> u64 {
        sample_mod(&self.xof1, &[&tag.dataset, &tag.index], t)
    }

    /// `(u, v)`, uniform in [0, t).
    pub fn index_terms(&self, index: &[u8], t: u64) -> (u64, u64) {
        (
            sample_mod(&self.xof1, &[index, b"u"], t),
            sample_mod(&self.xof1, &[index, b"v"], t),
        )
    }

    /// `(a, b)`, uniform in [1, t).
    pub fn dataset_terms(&self, dataset: &[u8], t: u64) -> (u64, u64) {
        (
            1 + sample_mod(&self.xof2, &[dataset, b"a"], t - 1),
            1 + sample_mod(&self.xof2, &[dataset, b"b"], t - 1),
        )
    }

    pub fn closed_form_terms(&self, tag: &Tag, t: u64) -> ClosedForm {
        let (u, v) = self.index_terms(&tag.index, t);
        let (a, b) = self.dataset_terms(&tag.dataset, t);
        ClosedForm { u, v, a, b }
    }

    /// `a * u + b * v mod t`.
    pub fn closed_form(&self, tag: &Tag, t: u64) -> u64 {
        let cf: ClosedForm = self.closed_form_terms(tag, t);
        let t: u128 = t as u128;
        ((cf.a as u128 * cf.u as u128 + cf.b as u128 * cf.v as u128) % t) as u64
    }

    pub fn eval(&self, tag: &Tag, t: u64, mode: PrfMode) -> u64 {
        match mode {
            PrfMode::Direct => self.direct(tag, t),
            PrfMode::ClosedForm => self.closed_form(tag, t),
        }
    }

    /// One output per tag, derived in parallel.
    pub fn eval_tags(&self, tags: &[Tag], t: u64, mode: PrfMode) -> Vec<u64> {
        tags.par_iter().map(|tag| self.eval(tag, t, mode)).collect()
    }
}
