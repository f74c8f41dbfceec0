use crate::{
    keys::SecretKey,
    layouts::{Ciphertext, Plaintext},
    parameters::Parameters,
};

pub struct Decryptor {
    decryptor: backend::Decryptor,
}

impl Decryptor {
    pub fn new(params: &Parameters, sk: &SecretKey) -> Self {
        Self {
            decryptor: backend::Decryptor::new(params.he(), &sk.he),
        }
    }

    pub fn decrypt(&self, ct: &Ciphertext) -> Plaintext {
        Plaintext {
            value: ct.value.iter().map(|c| self.decryptor.decrypt(c)).collect(),
        }
    }
}
