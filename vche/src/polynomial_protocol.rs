//! Verification of a result through a Schwartz-Zippel identity check.
//!
//! The verifier decrypts `c0` and one packed ciphertext carrying the outer
//! coefficients evaluated at a random `delta` and their combination at a
//! random `beta`, instead of every outer coefficient.

use backend::modulus::Modulus;
use log::{debug, info};

use crate::{
    cfprf::{CfPrfEvaluator, VerifPlaintext},
    error::{IdentityCheck, VerificationError},
    layouts::Ciphertext,
    plaintext_evaluator::Poly,
    prover_verifier::{Prover, Verifier},
};

fn run_polynomial_protocol(prover: &Prover, verifier: &mut Verifier, ct: &Ciphertext, mac: &Poly) -> Result<Vec<u64>, VerificationError> {
    assert_eq!(
        prover.params(),
        verifier.params(),
        "prover and verifier must use the same parameters"
    );

    // P -> V: y0
    let y0: Vec<u64> = verifier.decrypt(prover.result(ct));

    // V -> P: beta, delta
    let beta: u64 = verifier.random_point();
    let delta: u64 = verifier.random_point();

    // P -> V: (HH, d, w_0, ..., w_d)
    let ws: Ciphertext = prover.evaluate_at(ct, delta);
    let hh: backend::Ciphertext = prover.linearly_combine(&ws, beta);
    let m: backend::Ciphertext = prover.pack(&hh, &ws);

    let m: Vec<u64> = verifier.decrypt(&m);
    let (hh, ws) = verifier.unpack(&m)?;
    debug!("polynomial protocol: {} outer evaluations received", ws.len());

    verifier.check_equal(ws[0], verifier.evaluate_at(&y0, delta), IdentityCheck::Evaluation)?;
    verifier.check_equal(hh, verifier.linearly_combine(&ws, beta), IdentityCheck::LinearCombination)?;
    let t: &Modulus = verifier.params().modulus();
    let expected: u64 = verifier.evaluate_at(&mac.authenticated(t), delta);
    verifier.check_equal(verifier.linearly_combine(&ws, verifier.sk().alpha()), expected, IdentityCheck::Mac)?;

    info!("polynomial protocol accepted a result of {} outer coefficients", ct.len());
    Ok(y0)
}

pub fn run_polynomial_protocol_uint(
    prover: &Prover,
    verifier: &mut Verifier,
    ct: &Ciphertext,
    mac: &Poly,
) -> Result<Vec<u64>, VerificationError> {
    run_polynomial_protocol(prover, verifier, ct, mac)
}

/// Values at or above `(T + 1) / 2` are returned as `v - T`.
pub fn run_polynomial_protocol_int(
    prover: &Prover,
    verifier: &mut Verifier,
    ct: &Ciphertext,
    mac: &Poly,
) -> Result<Vec<i64>, VerificationError> {
    let ys: Vec<u64> = run_polynomial_protocol(prover, verifier, ct, mac)?;
    let t: &Modulus = verifier.params().modulus();
    Ok(ys.iter().map(|y| t.center(*y)).collect())
}

fn eval_state(verifier: &Verifier, mac: &VerifPlaintext) -> Poly {
    let mut eval: CfPrfEvaluator = CfPrfEvaluator::new(verifier.params());
    eval.eval_fresh(mac)
}

pub fn run_polynomial_protocol_cfprf_uint(
    prover: &Prover,
    verifier: &mut Verifier,
    ct: &Ciphertext,
    mac: &VerifPlaintext,
) -> Result<Vec<u64>, VerificationError> {
    let mac: Poly = eval_state(verifier, mac);
    run_polynomial_protocol_uint(prover, verifier, ct, &mac)
}

pub fn run_polynomial_protocol_cfprf_int(
    prover: &Prover,
    verifier: &mut Verifier,
    ct: &Ciphertext,
    mac: &VerifPlaintext,
) -> Result<Vec<i64>, VerificationError> {
    let mac: Poly = eval_state(verifier, mac);
    run_polynomial_protocol_int(prover, verifier, ct, &mac)
}
