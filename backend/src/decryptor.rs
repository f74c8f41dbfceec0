use crate::{
    keys::SecretKey,
    layouts::{Ciphertext, Plaintext},
    modulus::{Modulus, ONCE},
    parameters::Parameters,
};

pub struct Decryptor {
    params: Parameters,
    sk: SecretKey,
}

impl Decryptor {
    pub fn new(params: &Parameters, sk: &SecretKey) -> Self {
        Self {
            params: params.clone(),
            sk: sk.clone(),
        }
    }

    /// Horner evaluation of the components at s.
    pub fn decrypt(&self, ct: &Ciphertext) -> Plaintext {
        let t: &Modulus = self.params.modulus();
        let mut pt: Plaintext = Plaintext::alloc(&self.params);
        pt.data.copy_from_slice(&ct.value[ct.degree()]);
        t.va_reduce_into_va(&mut pt.data);
        ct.value[..ct.degree()].iter().rev().for_each(|c| {
            t.va_mul_vb_into_vb(&self.sk.value, &mut pt.data);
            t.va_add_vb_into_vb::<ONCE>(c, &mut pt.data);
        });
        pt
    }
}
