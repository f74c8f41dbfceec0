//! Lazy MAC evaluation with the closed-form PRF `a * u + b * v`.
//!
//! The MAC state of a value is a map from the rotation applied to the
//! slots to a bivariate polynomial in the formal variables `U, V`. Rotations
//! only re-key the map, and the per-slot values are produced once at
//! verification time from memoized powers of the rotated `u, v` vectors.

use std::sync::Arc;

use backend::{
    modulus::Modulus,
    slots::{rotate_columns, swap_rows_inplace},
};
use log::trace;
use rayon::prelude::*;
use utils::map::Map;

use crate::{
    bivariate::BivariatePoly,
    keys::SecretKey,
    parameters::Parameters,
    plaintext_evaluator::Poly,
    prf::Prf,
    tag::Tag,
};

/// Cumulative column rotation, canonical in [0, N/2), and row-swap flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RotInfo {
    pub num_rots: usize,
    pub rotated_rows: bool,
}

impl RotInfo {
    pub const NO_ROT: RotInfo = RotInfo {
        num_rots: 0,
        rotated_rows: false,
    };

    /// `x` with the columns of each row rotated left and the rows then
    /// swapped if flagged.
    pub fn apply(&self, x: &[u64]) -> Vec<u64> {
        let mut out: Vec<u64> = vec![0u64; x.len()];
        rotate_columns(x, self.num_rots, &mut out);
        if self.rotated_rows {
            swap_rows_inplace(&mut out);
        }
        out
    }
}

/// One polynomial per distinct PRF key, keyed by rotation.
pub type RotPolys = Map<RotInfo, Vec<BivariatePoly>>;

/// Symbolic MAC state. The authenticated value is `eval(poly) + eval(shift)`,
/// both maps always have the same key set.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifPlaintext {
    pub u: Arc<Vec<u64>>,
    pub v: Arc<Vec<u64>>,
    pub poly: RotPolys,
    pub shift: RotPolys,
}

fn zero_polys(params: &Parameters) -> Vec<BivariatePoly> {
    vec![BivariatePoly::new(1); params.num_distinct_prf_keys()]
}

impl VerifPlaintext {
    /// Number of distinct rotations aggregated in the state.
    pub fn len(&self) -> usize {
        self.poly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poly.is_empty()
    }

    /// Largest polynomial degree of every rotation over both maps.
    pub fn degrees(&self) -> Map<RotInfo, usize> {
        let mut degrees: Map<RotInfo, usize> = Map::new();
        [&self.poly, &self.shift].iter().for_each(|polys| {
            polys.iter().for_each(|(rot, ps)| {
                let d: usize = ps.iter().map(|p| p.degree()).max().unwrap_or(0);
                let entry: usize = degrees.get(rot).copied().unwrap_or(0);
                degrees.insert(*rot, entry.max(d));
            })
        });
        degrees
    }
}

/// Builds the symbolic state of fresh inputs. The `u, v` vectors are
/// memoized on the index tags, so states of inputs sharing their index tags
/// share their vectors.
pub struct EncoderCfPrf {
    params: Parameters,
    prf: Prf,
    uv: Option<(Vec<Vec<u8>>, Arc<Vec<u64>>, Arc<Vec<u64>>)>,
}

impl EncoderCfPrf {
    pub fn new(params: &Parameters, sk: &SecretKey) -> Self {
        Self {
            params: params.clone(),
            prf: Prf::new(&sk.k),
            uv: None,
        }
    }

    fn uv(&mut self, tags: &[Tag]) -> (Arc<Vec<u64>>, Arc<Vec<u64>>) {
        if let Some((index, u, v)) = &self.uv {
            if index.len() == tags.len() && index.iter().zip(tags.iter()).all(|(i, tag)| *i == tag.index) {
                return (Arc::clone(u), Arc::clone(v));
            }
        }
        let t: u64 = self.params.t();
        let (u, v): (Vec<u64>, Vec<u64>) = tags
            .par_iter()
            .map(|tag| self.prf.index_terms(&tag.index, t))
            .unzip();
        let (u, v) = (Arc::new(u), Arc::new(v));
        let index: Vec<Vec<u8>> = tags.iter().map(|tag| tag.index.clone()).collect();
        self.uv = Some((index, Arc::clone(&u), Arc::clone(&v)));
        (u, v)
    }

    pub fn encode(&mut self, tags: &[Tag]) -> VerifPlaintext {
        assert_eq!(
            tags.len(),
            self.params.n_slots(),
            "expected one tag per slot ({}), got {}",
            self.params.n_slots(),
            tags.len()
        );
        tags.iter().enumerate().for_each(|(i, tag)| {
            assert!(
                tag.dataset == tags[0].dataset,
                "mismatched PRF outputs at position {}, the dataset tag should be the same for the entire plaintext",
                i
            )
        });
        let (u, v) = self.uv(tags);
        let (a, b) = self.prf.dataset_terms(&tags[0].dataset, self.params.t());
        let mut poly: RotPolys = Map::new();
        poly.insert(RotInfo::NO_ROT, vec![BivariatePoly::linear(a, b); self.params.num_distinct_prf_keys()]);
        let mut shift: RotPolys = Map::new();
        shift.insert(RotInfo::NO_ROT, zero_polys(&self.params));
        VerifPlaintext { u, v, poly, shift }
    }
}

/// Powers `U_rot^i V_rot^j` per rotation, indexed `[i][j]`.
struct Memo {
    u: Arc<Vec<u64>>,
    v: Arc<Vec<u64>>,
    powers: Map<RotInfo, Vec<Vec<Vec<u64>>>>,
}

pub struct CfPrfEvaluator {
    params: Parameters,
    memo: Option<Memo>,
}

#[cfg(debug_assertions)]
fn check_same_uv(op0: &VerifPlaintext, op1: &VerifPlaintext) {
    assert!(
        Arc::ptr_eq(&op0.u, &op1.u) || op0.u == op1.u,
        "PRF vectors u are different in source operands, make sure to use the same index tags for all inputs"
    );
    assert!(
        Arc::ptr_eq(&op0.v, &op1.v) || op0.v == op1.v,
        "PRF vectors v are different in source operands, make sure to use the same index tags for all inputs"
    );
}

#[cfg(debug_assertions)]
fn check_shift_keys(op: &VerifPlaintext) {
    assert!(op.poly.same_keys(&op.shift), "MAC state and shift aggregate different rotations");
}

fn merge(
    op0: &RotPolys,
    op1: &RotPolys,
    both: impl Fn(&BivariatePoly, &BivariatePoly) -> BivariatePoly,
    only1: impl Fn(&BivariatePoly) -> BivariatePoly,
) -> RotPolys {
    let mut out: RotPolys = Map::new();
    op0.iter().for_each(|(rot, p0)| {
        let p: Vec<BivariatePoly> = match op1.get(rot) {
            Some(p1) => p0.iter().zip(p1.iter()).map(|(a, b)| both(a, b)).collect(),
            None => p0.clone(),
        };
        out.insert(*rot, p);
    });
    op1.iter().filter(|(rot, _)| !op0.contains_key(rot)).for_each(|(rot, p1)| {
        out.insert(*rot, p1.iter().map(&only1).collect());
    });
    out
}

fn map_polys(op: &RotPolys, f: impl Fn(&BivariatePoly) -> BivariatePoly) -> RotPolys {
    op.iter()
        .map(|(rot, ps)| (*rot, ps.iter().map(&f).collect()))
        .collect()
}

fn rekey(op: &RotPolys, f: impl Fn(&RotInfo) -> RotInfo) -> RotPolys {
    op.iter().map(|(rot, ps)| (f(rot), ps.clone())).collect()
}

fn mul_polys(op0: &RotPolys, op1: &RotPolys, t: &Modulus) -> RotPolys {
    assert!(op0.same_keys(op1), "cannot multiply MAC states aggregating different rotations");
    op0.iter()
        .map(|(rot, p0)| {
            let p1: &Vec<BivariatePoly> = &op1.0[rot];
            (*rot, p0.iter().zip(p1.iter()).map(|(a, b)| a.mul(b, t)).collect())
        })
        .collect()
}

impl CfPrfEvaluator {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
            memo: None,
        }
    }

    fn t(&self) -> &Modulus {
        self.params.modulus()
    }

    fn merge_state(
        &self,
        op0: &VerifPlaintext,
        op1: &VerifPlaintext,
        both: impl Fn(&BivariatePoly, &BivariatePoly) -> BivariatePoly,
        only1: impl Fn(&BivariatePoly) -> BivariatePoly,
    ) -> VerifPlaintext {
        #[cfg(debug_assertions)]
        check_same_uv(op0, op1);
        VerifPlaintext {
            u: Arc::clone(&op0.u),
            v: Arc::clone(&op0.v),
            poly: merge(&op0.poly, &op1.poly, &both, &only1),
            shift: merge(&op0.shift, &op1.shift, &both, &only1),
        }
    }

    fn map_state(&self, op: &VerifPlaintext, f: impl Fn(&BivariatePoly) -> BivariatePoly) -> VerifPlaintext {
        VerifPlaintext {
            u: Arc::clone(&op.u),
            v: Arc::clone(&op.v),
            poly: map_polys(&op.poly, &f),
            shift: map_polys(&op.shift, &f),
        }
    }

    fn rekey_state(&self, op: &VerifPlaintext, f: impl Fn(&RotInfo) -> RotInfo) -> VerifPlaintext {
        VerifPlaintext {
            u: Arc::clone(&op.u),
            v: Arc::clone(&op.v),
            poly: rekey(&op.poly, &f),
            shift: rekey(&op.shift, &f),
        }
    }

    pub fn add(&self, op0: &VerifPlaintext, op1: &VerifPlaintext) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.merge_state(op0, op1, |a, b| a.add(b, t), |b| b.clone())
    }

    pub fn add_no_mod(&self, op0: &VerifPlaintext, op1: &VerifPlaintext) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.merge_state(op0, op1, |a, b| a.add_no_mod(b, t), |b| b.clone())
    }

    /// Rotations present in `op1` only are negated.
    pub fn sub(&self, op0: &VerifPlaintext, op1: &VerifPlaintext) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.merge_state(op0, op1, |a, b| a.sub(b, t), |b| b.neg(t))
    }

    pub fn sub_no_mod(&self, op0: &VerifPlaintext, op1: &VerifPlaintext) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.merge_state(op0, op1, |a, b| a.sub_no_mod(b, t), |b| b.neg(t))
    }

    pub fn neg(&self, op: &VerifPlaintext) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.map_state(op, |p| p.neg(t))
    }

    pub fn reduce(&self, op: &VerifPlaintext) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.map_state(op, |p| p.reduce(t))
    }

    pub fn mul_scalar(&self, op: &VerifPlaintext, scalar: u64) -> VerifPlaintext {
        let t: &Modulus = self.t();
        self.map_state(op, |p| p.mul_scalar(scalar, t))
    }

    /// Both operands must aggregate the same rotations. The shift of the
    /// product is `s0 s1 + s0 p1 + p0 s1`.
    pub fn mul(&self, op0: &VerifPlaintext, op1: &VerifPlaintext) -> VerifPlaintext {
        #[cfg(debug_assertions)]
        {
            check_same_uv(op0, op1);
            check_shift_keys(op0);
            check_shift_keys(op1);
        }
        let t: &Modulus = self.t();
        let poly: RotPolys = mul_polys(&op0.poly, &op1.poly, t);
        let add = |a: &BivariatePoly, b: &BivariatePoly| a.add(b, t);
        let shift: RotPolys = merge(
            &merge(
                &mul_polys(&op0.shift, &op1.shift, t),
                &mul_polys(&op0.shift, &op1.poly, t),
                add,
                |b| b.clone(),
            ),
            &mul_polys(&op0.poly, &op1.shift, t),
            add,
            |b| b.clone(),
        );
        VerifPlaintext {
            u: Arc::clone(&op0.u),
            v: Arc::clone(&op0.v),
            poly,
            shift,
        }
    }

    pub fn relinearize(&self, op: &VerifPlaintext) -> VerifPlaintext {
        op.clone()
    }

    pub fn switch_keys(&self, op: &VerifPlaintext) -> VerifPlaintext {
        op.clone()
    }

    pub fn rotate_columns(&self, op: &VerifPlaintext, k: i64) -> VerifPlaintext {
        let n_cols: usize = self.params.n_cols();
        let k: usize = backend::slots::canonical_offset(k * self.params.num_replications() as i64, n_cols);
        self.rekey_state(op, |rot| RotInfo {
            num_rots: (rot.num_rots + k) % n_cols,
            rotated_rows: rot.rotated_rows,
        })
    }

    pub fn rotate_rows(&self, op: &VerifPlaintext) -> VerifPlaintext {
        self.rekey_state(op, |rot| RotInfo {
            num_rots: rot.num_rots,
            rotated_rows: !rot.rotated_rows,
        })
    }

    pub fn inner_sum(&self, op: &VerifPlaintext) -> VerifPlaintext {
        let mut acc: VerifPlaintext = op.clone();
        let mut i: usize = 1;
        while i < self.params.n_cols() {
            acc = self.add(&self.rotate_columns(&acc, i as i64), &acc);
            i <<= 1;
        }
        self.add(&acc, &self.rotate_rows(&acc))
    }

    /// Memoizes the powers of the rotated `u, v` vectors needed to evaluate
    /// `op`, replacing any previous memo.
    pub fn compute_memo(&mut self, op: &VerifPlaintext) {
        let t: Modulus = *self.t();
        let powers: Map<RotInfo, Vec<Vec<Vec<u64>>>> = op
            .degrees()
            .iter()
            .collect::<Vec<(&RotInfo, &usize)>>()
            .par_iter()
            .map(|(rot, degree)| {
                let u: Vec<u64> = rot.apply(&op.u);
                let v: Vec<u64> = rot.apply(&op.v);
                let mut table: Vec<Vec<Vec<u64>>> = Vec::with_capacity(**degree + 1);
                let mut u_pow: Vec<u64> = vec![1u64; u.len()];
                (0..=**degree).for_each(|i| {
                    if i > 0 {
                        t.va_mul_vb_into_vb(&u, &mut u_pow);
                    }
                    let mut row: Vec<Vec<u64>> = Vec::with_capacity(**degree + 1);
                    row.push(u_pow.clone());
                    (1..=**degree).for_each(|j| {
                        let mut next: Vec<u64> = vec![0u64; u.len()];
                        t.va_mul_vb_into_vc(&row[j - 1], &v, &mut next);
                        row.push(next);
                    });
                    table.push(row);
                });
                (**rot, table)
            })
            .collect::<Vec<(RotInfo, Vec<Vec<Vec<u64>>>)>>()
            .into_iter()
            .collect();
        trace!(
            "cfprf memo: {} rotations, {} power vectors",
            powers.len(),
            powers.values().map(|table| table.len() * table.len()).sum::<usize>()
        );
        self.memo = Some(Memo {
            u: Arc::clone(&op.u),
            v: Arc::clone(&op.v),
            powers,
        });
    }

    pub fn has_memo(&self) -> bool {
        self.memo.is_some()
    }

    /// Per-slot values of a polynomial map. Requires a memo covering every
    /// rotation and degree of `polys`.
    pub fn eval_polys(&self, polys: &RotPolys) -> Vec<u64> {
        assert_eq!(
            self.params.num_distinct_prf_keys(),
            1,
            "memoized evaluation requires a single PRF key"
        );
        let memo: &Memo = match &self.memo {
            Some(memo) => memo,
            None => panic!("cannot evaluate a MAC state before computing its memo"),
        };
        let t: &Modulus = self.t();
        let mut out: Vec<u64> = vec![0u64; self.params.n()];
        polys.iter().for_each(|(rot, ps)| {
            let table: &Vec<Vec<Vec<u64>>> = match memo.powers.get(rot) {
                Some(table) => table,
                None => panic!("memo does not cover rotation {:?}", rot),
            };
            assert!(
                ps[0].degree() < table.len(),
                "memo for rotation {:?} holds degree {}, polynomial has degree {}",
                rot,
                table.len() - 1,
                ps[0].degree()
            );
            ps[0].terms().for_each(|(i, j, c)| {
                if i == 0 && j == 0 {
                    t.sa_add_vb_into_vb(t.reduce(c), &mut out);
                } else {
                    let c: u128 = t.reduce(c) as u128;
                    out.iter_mut()
                        .zip(table[i][j].iter())
                        .for_each(|(o, p)| *o = t.reduce_u128(c * *p as u128 + *o as u128));
                }
            });
        });
        out
    }

    /// Panics if the memo was computed for a state with other index tags.
    pub fn eval(&self, op: &VerifPlaintext) -> Poly {
        #[cfg(debug_assertions)]
        check_shift_keys(op);
        if let Some(memo) = &self.memo {
            assert!(
                (Arc::ptr_eq(&memo.u, &op.u) || memo.u == op.u) && (Arc::ptr_eq(&memo.v, &op.v) || memo.v == op.v),
                "memo was computed for different PRF vectors"
            );
        }
        Poly {
            value: self.eval_polys(&op.poly),
            shift: self.eval_polys(&op.shift),
        }
    }

    /// Computes the memo for `op` and evaluates it.
    pub fn eval_fresh(&mut self, op: &VerifPlaintext) -> Poly {
        self.compute_memo(op);
        self.eval(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        keys::KeyGenerator,
        parameters::{DEFAULT_PARAMETERS, ParametersLiteral},
        plaintext_evaluator::{EncoderPlaintext, PlaintextEvaluator},
        prf::PrfMode,
        tag::{index_tags, random_tags, random_tags_same_index},
    };
    use sampling::source::Source;

    fn small_params() -> Parameters {
        Parameters::new(ParametersLiteral {
            he: backend::ParametersLiteral { log_n: 4, t: 65537 },
            num_replications: 1,
            num_distinct_prf_keys: 1,
        })
        .unwrap()
    }

    #[test]
    fn fresh_state_evaluates_to_closed_form() {
        let params: Parameters = Parameters::new(DEFAULT_PARAMETERS).unwrap();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let mut encoder: EncoderCfPrf = EncoderCfPrf::new(&params, &sk);
        let tags: Vec<Tag> = random_tags_same_index(params.n_slots(), &mut source);
        let state: VerifPlaintext = encoder.encode(&tags);
        let mut eval: CfPrfEvaluator = CfPrfEvaluator::new(&params);
        let poly: Poly = eval.eval_fresh(&state);
        let prf: Prf = Prf::new(&sk.k);
        (0..params.n()).for_each(|i| assert_eq!(poly.value[i], prf.closed_form(&tags[i], params.t())));
        assert!(poly.shift.iter().all(|x| *x == 0));
    }

    #[test]
    fn encoder_reuses_index_vectors() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let mut encoder: EncoderCfPrf = EncoderCfPrf::new(&params, &sk);
        let a: VerifPlaintext = encoder.encode(&index_tags(b"A", params.n_slots()));
        let b: VerifPlaintext = encoder.encode(&index_tags(b"B", params.n_slots()));
        assert!(Arc::ptr_eq(&a.u, &b.u) && Arc::ptr_eq(&a.v, &b.v));
        assert_ne!(a.poly, b.poly);
    }

    #[test]
    #[should_panic(expected = "mismatched PRF outputs at position 3")]
    fn encoder_rejects_mixed_datasets() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let mut tags: Vec<Tag> = index_tags(b"A", params.n_slots());
        tags[3].dataset = b"B".to_vec();
        EncoderCfPrf::new(&params, &sk).encode(&tags);
    }

    #[test]
    fn ops_track_direct_evaluation() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let mut encoder: EncoderCfPrf = EncoderCfPrf::new(&params, &sk);
        let encoder_pt: EncoderPlaintext = EncoderPlaintext::new(&params, &sk, PrfMode::ClosedForm);
        let tags_a: Vec<Tag> = index_tags(b"A", params.n_slots());
        let tags_b: Vec<Tag> = index_tags(b"B", params.n_slots());

        let cf: CfPrfEvaluator = CfPrfEvaluator::new(&params);
        let direct: PlaintextEvaluator = PlaintextEvaluator::new(&params);
        let (a, b) = (encoder.encode(&tags_a), encoder.encode(&tags_b));
        let (pa, pb) = (encoder_pt.encode(&tags_a), encoder_pt.encode(&tags_b));

        let state: VerifPlaintext = cf.sub(&cf.add_no_mod(&cf.mul(&a, &b), &a), &cf.mul_scalar(&b, 3));
        let state: VerifPlaintext = cf.add(&cf.rotate_rows(&cf.rotate_columns(&state, 3)), &cf.rotate_columns(&state, -1));
        let state: VerifPlaintext = cf.inner_sum(&cf.neg(&state));

        let expected: Poly = direct.sub(&direct.add_no_mod(&direct.mul(&pa, &pb), &pa), &direct.mul_scalar(&pb, 3));
        let expected: Poly = direct.add(
            &direct.rotate_rows(&direct.rotate_columns(&expected, 3)),
            &direct.rotate_columns(&expected, -1),
        );
        let expected: Poly = direct.inner_sum(&direct.neg(&expected));

        let state: VerifPlaintext = cf.reduce(&state);
        let mut cf: CfPrfEvaluator = cf;
        let got: Poly = cf.eval_fresh(&state);
        assert_eq!(got.authenticated(params.modulus()), expected.authenticated(params.modulus()));
    }

    #[test]
    #[should_panic(expected = "cannot multiply MAC states aggregating different rotations")]
    fn mul_rejects_different_rotations() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let mut encoder: EncoderCfPrf = EncoderCfPrf::new(&params, &sk);
        let a: VerifPlaintext = encoder.encode(&index_tags(b"A", params.n_slots()));
        let cf: CfPrfEvaluator = CfPrfEvaluator::new(&params);
        cf.mul(&a, &cf.rotate_columns(&a, 1));
    }

    #[test]
    #[should_panic(expected = "cannot evaluate a MAC state before computing its memo")]
    fn eval_requires_memo() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let a: VerifPlaintext = EncoderCfPrf::new(&params, &sk).encode(&index_tags(b"A", params.n_slots()));
        CfPrfEvaluator::new(&params).eval(&a);
    }

    #[test]
    #[should_panic(expected = "memo was computed for different PRF vectors")]
    fn eval_rejects_memo_of_other_index_tags() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let mut encoder: EncoderCfPrf = EncoderCfPrf::new(&params, &sk);
        let a: VerifPlaintext = encoder.encode(&index_tags(b"A", params.n_slots()));
        let b: VerifPlaintext = encoder.encode(&random_tags(params.n_slots(), &mut source));
        let mut cf: CfPrfEvaluator = CfPrfEvaluator::new(&params);
        cf.compute_memo(&a);
        cf.eval(&b);
    }

    #[test]
    fn rotate_columns_is_canonical() {
        let params: Parameters = small_params();
        let mut source: Source = Source::new([0u8; 32]);
        let sk: SecretKey = KeyGenerator::new(&params).gen_secret_key(&mut source);
        let a: VerifPlaintext = EncoderCfPrf::new(&params, &sk).encode(&index_tags(b"A", params.n_slots()));
        let cf: CfPrfEvaluator = CfPrfEvaluator::new(&params);
        let n_cols: i64 = params.n_cols() as i64;
        assert_eq!(cf.rotate_columns(&a, n_cols), a);
        assert_eq!(cf.rotate_columns(&cf.rotate_columns(&a, 5), n_cols - 5), a);
        assert_eq!(cf.rotate_rows(&cf.rotate_rows(&a)), a);
    }
}
