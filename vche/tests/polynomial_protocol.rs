mod common;

use backend::modulus::Modulus;
use common::{Context, slotwise};
use vche::{
    CfPrfEvaluator, MIN_N, ParameterError, Parameters, ParametersLiteral, Ciphertext, IdentityCheck, Plaintext, Poly, PrfMode, Prover, Tag, VerificationError, Verifier,
    VerifPlaintext, index_tags, random_tags, run_polynomial_protocol_cfprf_int, run_polynomial_protocol_cfprf_uint,
    run_polynomial_protocol_int, run_polynomial_protocol_uint, run_requadratization_protocol,
    run_requadratization_protocol_cfprf,
};

#[test]
fn polynomial_protocol_uint() {
    [1usize, 2, 3].iter().for_each(|depth| {
        println!("test polynomial_protocol_uint depth: {}", depth);
        test_polynomial_protocol_uint(*depth)
    });
}

/// Accepts `a^(depth+1) + a` for every outer length reached along the way.
fn test_polynomial_protocol_uint(depth: usize) {
    let mut ctx: Context = Context::new(5, PrfMode::Direct);
    let t: Modulus = ctx.t();
    let (prover, mut verifier): (Prover, Verifier) = ctx.prover_verifier();
    let a: Vec<u64> = ctx.random();
    let tags: Vec<Tag> = random_tags(ctx.params.n_slots(), &mut ctx.source);
    let (ct_a, mac_a) = ctx.input(&a, &tags);

    let mut ct: Ciphertext = ct_a.clone();
    let mut mac: Poly = mac_a.clone();
    let mut want: Vec<u64> = a.clone();
    (0..depth).for_each(|_| {
        let prod: Ciphertext = ctx.eval.mul(&ct, (&ct_a).into());
        ct = ctx.eval.relinearize(&prod);
        mac = ctx.eval_pt.mul(&mac, &mac_a);
        want = slotwise(&t, &want, &a, |t, x, y| t.mul(x, y));
    });
    let ct: Ciphertext = ctx.eval.add((&ct).into(), (&ct_a).into());
    let mac: Poly = ctx.eval_pt.add(&mac, &mac_a);
    let want: Vec<u64> = slotwise(&t, &want, &a, |t, x, y| t.add(x, y));
    assert_eq!(ct.len(), depth + 2);

    assert_eq!(run_polynomial_protocol_uint(&prover, &mut verifier, &ct, &mac).unwrap(), want);
}

#[test]
fn polynomial_protocol_int() {
    let mut ctx: Context = Context::new(5, PrfMode::Direct);
    let (prover, mut verifier): (Prover, Verifier) = ctx.prover_verifier();
    let coeffs: Vec<i64> = (0..ctx.params.n() as i64).map(|i| i - 16).collect();
    let tags: Vec<Tag> = random_tags(ctx.params.n_slots(), &mut ctx.source);
    let pt: Plaintext = ctx.encoder.encode_int(&coeffs, &tags);
    let ct: Ciphertext = ctx.encryptor.encrypt(&pt, &mut ctx.source);
    let mac: Poly = ctx.encoder_pt.encode(&tags);

    let sq: Ciphertext = ctx.eval.mul(&ct, (&ct).into());
    let sq: Ciphertext = ctx.eval.relinearize(&sq);
    let ct: Ciphertext = ctx.eval.sub((&ct).into(), (&sq).into());
    let mac: Poly = ctx.eval_pt.sub(&mac, &ctx.eval_pt.mul(&mac, &mac));

    let want: Vec<i64> = coeffs.iter().map(|x| x - x * x).collect();
    assert_eq!(run_polynomial_protocol_int(&prover, &mut verifier, &ct, &mac).unwrap(), want);
}

#[test]
fn polynomial_protocol_cfprf() {
    let mut ctx: Context = Context::new(5, PrfMode::ClosedForm);
    let t: Modulus = ctx.t();
    let cf: CfPrfEvaluator = CfPrfEvaluator::new(&ctx.params);
    let (prover, mut verifier): (Prover, Verifier) = ctx.prover_verifier();

    let a: Vec<u64> = ctx.random();
    let b: Vec<u64> = ctx.random();
    let (ct_a, mac_a) = ctx.input_cf(&a, &index_tags(b"dataset-A", ctx.params.n_slots()));
    let (ct_b, mac_b) = ctx.input_cf(&b, &index_tags(b"dataset-B", ctx.params.n_slots()));

    let ct: Ciphertext = ctx.eval.mul(&ct_a, (&ct_b).into());
    let ct: Ciphertext = ctx.eval.rotate_columns(&ctx.eval.relinearize(&ct), -1);
    let mac: VerifPlaintext = cf.rotate_columns(&cf.mul(&mac_a, &mac_b), -1);
    let want: Vec<u64> = common::rotate(&slotwise(&t, &a, &b, |t, x, y| t.mul(x, y)), -1);
    assert_eq!(run_polynomial_protocol_cfprf_uint(&prover, &mut verifier, &ct, &mac).unwrap(), want);

    let tags: Vec<Tag> = index_tags(b"dataset-C", ctx.params.n_slots());
    let coeffs: Vec<i64> = (0..ctx.params.n() as i64).map(|i| 1 - 2 * i).collect();
    let pt: Plaintext = ctx.encoder.encode_int(&coeffs, &tags);
    let ct: Ciphertext = ctx.encryptor.encrypt(&pt, &mut ctx.source);
    let mac: VerifPlaintext = ctx.encoder_cf.encode(&tags);
    let ct: Ciphertext = ctx.eval.mul_scalar(&ct, 3);
    let mac: VerifPlaintext = cf.mul_scalar(&mac, 3);
    let want: Vec<i64> = coeffs.iter().map(|x| 3 * x).collect();
    assert_eq!(run_polynomial_protocol_cfprf_int(&prover, &mut verifier, &ct, &mac).unwrap(), want);
}

#[test]
fn polynomial_protocol_rejects_modified_coefficient() {
    let mut ctx: Context = Context::new(5, PrfMode::Direct);
    let (prover, mut verifier): (Prover, Verifier) = ctx.prover_verifier();
    let a: Vec<u64> = ctx.random();
    let tags: Vec<Tag> = random_tags(ctx.params.n_slots(), &mut ctx.source);
    let (ct, mac) = ctx.input(&a, &tags);
    let ct: Ciphertext = ctx.eval.mul(&ct, (&ct).into());
    let mut ct: Ciphertext = ctx.eval.relinearize(&ct);
    let mac: Poly = ctx.eval_pt.mul(&mac, &mac);
    assert!(run_polynomial_protocol_uint(&prover, &mut verifier, &ct, &mac).is_ok());

    // c0 is untouched so the result and its evaluations stay consistent
    ct.value[1].value[0][0] = ctx.t().add(ct.value[1].value[0][0], 1);
    assert_eq!(
        run_polynomial_protocol_uint(&prover, &mut verifier, &ct, &mac),
        Err(VerificationError::IdentityCheck(IdentityCheck::Mac))
    );
}

#[test]
fn polynomial_protocol_after_requadratization() {
    [PrfMode::Direct, PrfMode::ClosedForm].iter().for_each(|mode| {
        println!("test polynomial_protocol_after_requadratization mode: {:?}", mode);
        test_polynomial_protocol_after_requadratization(*mode)
    });
}

/// `((c1 * c2) + c1)^2` with `c1 = 5, c2 = 7` in slot 0.
fn test_polynomial_protocol_after_requadratization(mode: PrfMode) {
    let mut ctx: Context = Context::new(5, mode);
    let t: Modulus = ctx.t();
    let (prover, mut verifier): (Prover, Verifier) = ctx.prover_verifier();
    let n: usize = ctx.params.n_slots();

    let mut x1: Vec<u64> = ctx.random();
    let mut x2: Vec<u64> = ctx.random();
    x1[0] = 5;
    x2[0] = 7;
    let tags1: Vec<Tag> = index_tags(b"dataset-A", n);
    let tags2: Vec<Tag> = index_tags(b"dataset-B", n);
    let c1: Ciphertext = ctx.encrypt(&x1, &tags1);
    let c2: Ciphertext = ctx.encrypt(&x2, &tags2);

    let ct: Ciphertext = ctx.eval.mul(&c1, (&c2).into());
    let ct: Ciphertext = ctx.eval.relinearize(&ct);
    let ct: Ciphertext = ctx.eval.add((&ct).into(), (&c1).into());
    let ct: Ciphertext = ctx.eval.mul(&ct, (&ct).into());
    let ct: Ciphertext = ctx.eval.relinearize(&ct);
    assert_eq!(ct.len(), 5);

    let want: Vec<u64> = slotwise(&t, &x1, &x2, |t, a, b| {
        let y: u64 = t.add(t.mul(a, b), a);
        t.mul(y, y)
    });
    assert_eq!(want[0], 1600);

    let out: Vec<u64> = match mode {
        PrfMode::Direct => {
            let m1: Poly = ctx.encoder_pt.encode(&tags1);
            let m2: Poly = ctx.encoder_pt.encode(&tags2);
            let mac: Poly = ctx.eval_pt.add(&ctx.eval_pt.mul(&m1, &m2), &m1);
            let mac: Poly = ctx.eval_pt.mul(&mac, &mac);
            let (ct, mac) = run_requadratization_protocol(&prover, &mut verifier, &ct, &mac);
            assert_eq!(ct.len(), 3);
            run_polynomial_protocol_uint(&prover, &mut verifier, &ct, &mac).unwrap()
        }
        PrfMode::ClosedForm => {
            let cf: CfPrfEvaluator = CfPrfEvaluator::new(&ctx.params);
            let m1: VerifPlaintext = ctx.encoder_cf.encode(&tags1);
            let m2: VerifPlaintext = ctx.encoder_cf.encode(&tags2);
            let mac: VerifPlaintext = cf.add(&cf.mul(&m1, &m2), &m1);
            let mac: VerifPlaintext = cf.mul(&mac, &mac);
            let (ct, mac) = run_requadratization_protocol_cfprf(&prover, &mut verifier, &ct, &mac);
            assert_eq!(ct.len(), 3);
            run_polynomial_protocol_cfprf_uint(&prover, &mut verifier, &ct, &mac).unwrap()
        }
    };
    assert_eq!(out, want);
    assert_eq!(out[0], 1600);
}

#[test]
fn polynomial_protocol_on_smallest_ring() {
    let mut literal: ParametersLiteral = vche::DEFAULT_PARAMETERS;
    literal.he.log_n = 2;
    assert_eq!(
        Parameters::new(literal),
        Err(ParameterError::RingTooSmall { n: 4, min: MIN_N })
    );

    // N = 8 packs the five evaluations of an unrequadratized x^4
    let mut ctx: Context = Context::new(3, PrfMode::Direct);
    let t: Modulus = ctx.t();
    let (prover, mut verifier): (Prover, Verifier) = ctx.prover_verifier();
    let x: Vec<u64> = ctx.random();
    let tags: Vec<Tag> = random_tags(ctx.params.n_slots(), &mut ctx.source);
    let (ct, mac) = ctx.input(&x, &tags);
    let sq: Ciphertext = ctx.eval.mul(&ct, (&ct).into());
    let sq: Ciphertext = ctx.eval.relinearize(&sq);
    let quad: Ciphertext = ctx.eval.mul(&sq, (&sq).into());
    let quad: Ciphertext = ctx.eval.relinearize(&quad);
    let mac: Poly = ctx.eval_pt.mul(&mac, &mac);
    let mac: Poly = ctx.eval_pt.mul(&mac, &mac);
    assert_eq!(quad.len(), 5);

    let x2: Vec<u64> = slotwise(&t, &x, &x, |t, a, b| t.mul(a, b));
    let want: Vec<u64> = slotwise(&t, &x2, &x2, |t, a, b| t.mul(a, b));
    assert_eq!(run_polynomial_protocol_uint(&prover, &mut verifier, &quad, &mac).unwrap(), want);
}
