//! Verifiable computation over homomorphic ciphertexts with algebraic MACs.
//!
//! A message `m` with tag `tag` is encrypted together with its MAC
//! `rho = (PRF(tag) - m) / alpha`, as the outer polynomial `m + rho X`.
//! Every homomorphic operation is mirrored on the MAC state, either with
//! directly evaluated PRF outputs ([plaintext_evaluator]) or symbolically
//! with the closed-form PRF ([cfprf]). A result is accepted when its
//! decrypted outer polynomial evaluated at `alpha` matches the MAC state,
//! checked directly by [encoder::Encoder::decode_uint] or interactively by
//! [polynomial_protocol].

pub mod bivariate;
pub mod cfprf;
pub mod decryptor;
pub mod encoder;
pub mod encryptor;
pub mod error;
pub mod evaluator;
pub mod keys;
pub mod layouts;
pub mod parameters;
pub mod plaintext_evaluator;
pub mod polynomial_protocol;
pub mod prf;
pub mod prover_verifier;
pub mod requadratization;
pub mod tag;

pub use bivariate::BivariatePoly;
pub use cfprf::{CfPrfEvaluator, EncoderCfPrf, RotInfo, VerifPlaintext};
pub use decryptor::Decryptor;
pub use encoder::Encoder;
pub use encryptor::Encryptor;
pub use error::{Error, IdentityCheck, ParameterError, VerificationError};
pub use evaluator::Evaluator;
pub use keys::{KeyGenerator, SecretKey};
pub use layouts::{Ciphertext, Operand, Plaintext, PlaintextMul};
pub use parameters::{DEFAULT_PARAMETERS, MIN_N, Parameters, ParametersLiteral};
pub use plaintext_evaluator::{EncoderPlaintext, PlaintextEvaluator, Poly};
pub use polynomial_protocol::{
    run_polynomial_protocol_cfprf_int, run_polynomial_protocol_cfprf_uint, run_polynomial_protocol_int,
    run_polynomial_protocol_uint,
};
pub use prf::{PrfKey, PrfMode};
pub use prover_verifier::{Prover, Verifier};
pub use requadratization::{run_requadratization_protocol, run_requadratization_protocol_cfprf};
pub use tag::{Tag, index_tags, random_tags, random_tags_same_index};
