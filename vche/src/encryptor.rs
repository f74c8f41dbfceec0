use backend::PublicKey;
use sampling::source::Source;

use crate::{
    keys::SecretKey,
    layouts::{Ciphertext, Plaintext},
    parameters::Parameters,
};

/// Encrypts every outer coefficient independently.
pub struct Encryptor {
    encryptor: backend::Encryptor,
}

impl Encryptor {
    pub fn new_sk(params: &Parameters, sk: &SecretKey) -> Self {
        Self {
            encryptor: backend::Encryptor::new_sk(params.he(), &sk.he),
        }
    }

    pub fn new_pk(params: &Parameters, pk: &PublicKey) -> Self {
        Self {
            encryptor: backend::Encryptor::new_pk(params.he(), pk),
        }
    }

    pub fn encrypt(&self, pt: &Plaintext, source: &mut Source) -> Ciphertext {
        Ciphertext {
            value: pt.value.iter().map(|p| self.encryptor.encrypt(p, source)).collect(),
        }
    }
}
