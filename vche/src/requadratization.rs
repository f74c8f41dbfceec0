//! Brings an outer ciphertext with four or five coefficients back to three.
//!
//! The prover sends `c3` (and `c4`). The verifier decrypts them, folds
//! them into blinded corrections `p1, p2` of the lower coefficients and
//! returns their encryptions. The blinding term `alpha * r_bar` becomes the
//! shift of the MAC state.

use backend::modulus::Modulus;
use log::debug;

use crate::{
    bivariate::BivariatePoly,
    cfprf::{CfPrfEvaluator, RotInfo, RotPolys, VerifPlaintext},
    layouts::Ciphertext,
    plaintext_evaluator::Poly,
    prover_verifier::{Prover, Verifier},
};

pub const MAX_REQUAD_LEN: usize = 5;

impl Prover {
    /// Coefficients sent to the verifier, `None` when the ciphertext has at
    /// most three coefficients.
    pub fn requad_request<'a>(&self, ct: &'a Ciphertext) -> Option<(&'a backend::Ciphertext, Option<&'a backend::Ciphertext>)> {
        assert!(
            ct.len() <= MAX_REQUAD_LEN,
            "requadratization supports at most {} outer coefficients, got {}",
            MAX_REQUAD_LEN,
            ct.len()
        );
        match ct.len() {
            0..=3 => None,
            4 => Some((&ct.value[3], None)),
            _ => Some((&ct.value[3], Some(&ct.value[4]))),
        }
    }

    /// `(c0, c1 + c1_bar, c2 + c2_bar)`.
    pub fn requad_fold(&self, ct: &Ciphertext, c1_bar: &backend::Ciphertext, c2_bar: &backend::Ciphertext) -> Ciphertext {
        let eval: &backend::Evaluator = self.evaluator();
        Ciphertext {
            value: vec![
                ct.value[0].clone(),
                eval.add((&ct.value[1]).into(), c1_bar.into()),
                eval.add((&ct.value[2]).into(), c2_bar.into()),
            ],
        }
    }
}

impl Verifier {
    /// `p1 = a^2 p3 + a^3 p4 - a p2 - shift / a + r_bar` and
    /// `p2 = a k1 p3 + a^2 k2 p4 + r`, computed slot-wise.
    fn requad_corrections(
        &mut self,
        c3: &backend::Ciphertext,
        c4: Option<&backend::Ciphertext>,
        prev_shift: &[u64],
        r_bar: &[u64],
    ) -> (Vec<u64>, Vec<u64>) {
        let t: Modulus = *self.params.modulus();
        let p3: Vec<u64> = self.decrypt(c3);
        let p4: Option<Vec<u64>> = c4.map(|c4| self.decrypt(c4));
        let (k1, k2) = (self.random_point(), self.random_point());
        let r: Vec<u64> = self.random_poly();

        let alpha: u64 = self.sk.alpha();
        let alpha_inv: u64 = self.sk.alpha_inv();
        let alpha2: u64 = t.mul(alpha, alpha);
        let alpha3: u64 = t.mul(alpha2, alpha);
        let alpha_k1: u64 = t.mul(alpha, k1);
        let alpha2_k2: u64 = t.mul(alpha2, k2);

        let n: usize = self.params.n();
        let mut p2: Vec<u64> = vec![0u64; n];
        let mut p1: Vec<u64> = vec![0u64; n];
        (0..n).for_each(|i| {
            let x4: u64 = p4.as_ref().map_or(0, |p4| p4[i]);
            p2[i] = t.add(t.add(t.mul(alpha_k1, p3[i]), t.mul(alpha2_k2, x4)), r[i]);
            let folded: u64 = t.add(t.mul(alpha2, p3[i]), t.mul(alpha3, x4));
            let corr: u64 = t.add(t.mul(alpha, p2[i]), t.mul(alpha_inv, t.reduce(prev_shift[i])));
            p1[i] = t.add(t.sub(folded, corr), r_bar[i]);
        });
        (p1, p2)
    }

    /// Verifier side with a directly evaluated MAC state.
    pub fn compute_requad(
        &mut self,
        c3: &backend::Ciphertext,
        c4: Option<&backend::Ciphertext>,
        mac: &Poly,
    ) -> (backend::Ciphertext, backend::Ciphertext, Poly) {
        let r_bar: Vec<u64> = self.random_poly();
        let (p1, p2) = self.requad_corrections(c3, c4, &mac.shift, &r_bar);
        let (c1_bar, c2_bar) = (self.encrypt(p1), self.encrypt(p2));
        let t: &Modulus = self.params.modulus();
        let mut shift: Vec<u64> = r_bar;
        t.sa_mul_vb_into_vb(self.sk.alpha(), &mut shift);
        let mac: Poly = Poly {
            value: mac.value.clone(),
            shift,
        };
        (c1_bar, c2_bar, mac)
    }

    /// Verifier side with a symbolic MAC state. The blinding term is drawn
    /// as a fresh closed-form PRF output `a' U + b' V` over the rotation
    /// keys of the state.
    pub fn compute_requad_cfprf(
        &mut self,
        c3: &backend::Ciphertext,
        c4: Option<&backend::Ciphertext>,
        mac: &VerifPlaintext,
    ) -> (backend::Ciphertext, backend::Ciphertext, VerifPlaintext) {
        let r_bar_a: u64 = self.random_nonzero_point();
        let r_bar_b: u64 = self.random_nonzero_point();
        let blind: BivariatePoly = BivariatePoly::linear(r_bar_a, r_bar_b);

        let target: RotInfo = if mac.poly.contains_key(&RotInfo::NO_ROT) {
            RotInfo::NO_ROT
        } else {
            mac.poly.keys().min().copied().unwrap_or(RotInfo::NO_ROT)
        };
        let num_keys: usize = self.params.num_distinct_prf_keys();
        let mut r_bar_polys: RotPolys = mac
            .poly
            .keys()
            .map(|rot| (*rot, vec![BivariatePoly::new(1); num_keys]))
            .collect();
        r_bar_polys.insert(target, vec![blind; num_keys]);

        let mut eval: CfPrfEvaluator = CfPrfEvaluator::new(&self.params);
        eval.compute_memo(mac);
        let r_bar: Vec<u64> = eval.eval_polys(&r_bar_polys);
        let prev_shift: Vec<u64> = eval.eval_polys(&mac.shift);

        let (p1, p2) = self.requad_corrections(c3, c4, &prev_shift, &r_bar);
        let (c1_bar, c2_bar) = (self.encrypt(p1), self.encrypt(p2));

        let alpha: u64 = self.sk.alpha();
        let t: &Modulus = self.params.modulus();
        let shift: RotPolys = r_bar_polys
            .iter()
            .map(|(rot, ps)| (*rot, ps.iter().map(|p| p.mul_scalar(alpha, t)).collect()))
            .collect();
        let mac: VerifPlaintext = VerifPlaintext {
            u: mac.u.clone(),
            v: mac.v.clone(),
            poly: mac.poly.clone(),
            shift,
        };
        (c1_bar, c2_bar, mac)
    }
}

pub fn run_requadratization_protocol(prover: &Prover, verifier: &mut Verifier, ct: &Ciphertext, mac: &Poly) -> (Ciphertext, Poly) {
    match prover.requad_request(ct) {
        None => {
            debug!("requadratization skipped, {} outer coefficients", ct.len());
            (ct.clone(), mac.clone())
        }
        Some((c3, c4)) => {
            debug!("requadratization of {} outer coefficients", ct.len());
            let (c1_bar, c2_bar, mac) = verifier.compute_requad(c3, c4, mac);
            (prover.requad_fold(ct, &c1_bar, &c2_bar), mac)
        }
    }
}

pub fn run_requadratization_protocol_cfprf(
    prover: &Prover,
    verifier: &mut Verifier,
    ct: &Ciphertext,
    mac: &VerifPlaintext,
) -> (Ciphertext, VerifPlaintext) {
    match prover.requad_request(ct) {
        None => {
            debug!("requadratization skipped, {} outer coefficients", ct.len());
            (ct.clone(), mac.clone())
        }
        Some((c3, c4)) => {
            debug!("requadratization of {} outer coefficients with a symbolic MAC", ct.len());
            let (c1_bar, c2_bar, mac) = verifier.compute_requad_cfprf(c3, c4, mac);
            (prover.requad_fold(ct, &c1_bar, &c2_bar), mac)
        }
    }
}
