//! Slot-domain stand-in for a BFV-style scheme with plaintext modulus T.
//!
//! Ciphertexts are noise-free and the construction offers no security: a
//! ciphertext `(c_0, ..., c_d)` decrypts to `sum_i c_i * s^i` slot-wise.
//! It exposes the interface of a batched BFV implementation (keys, public
//! and secret key encryption, relinearization, key switching, slot
//! rotations) so that the layers above can be exercised end to end.

pub mod decryptor;
pub mod encoder;
pub mod encryptor;
pub mod evaluator;
pub mod key_generator;
pub mod keys;
pub mod layouts;
pub mod modulus;
pub mod parameters;
pub mod scratch;
pub mod slots;

pub use decryptor::Decryptor;
pub use encoder::Encoder;
pub use encryptor::Encryptor;
pub use evaluator::Evaluator;
pub use key_generator::KeyGenerator;
pub use keys::{EvaluationKey, PublicKey, RelinearizationKey, RotationKeySet, SecretKey, SwitchingKey};
pub use layouts::{Ciphertext, Operand, Plaintext, PlaintextMul};
pub use parameters::{BuildError, DEFAULT_PARAMETERS, Parameters, ParametersLiteral};
