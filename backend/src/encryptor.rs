use sampling::source::Source;

use crate::{
    keys::{PublicKey, SecretKey},
    layouts::{Ciphertext, Plaintext},
    modulus::{Modulus, ONCE},
    parameters::Parameters,
};

enum EncryptionKey {
    Secret(SecretKey),
    Public(PublicKey),
}

pub struct Encryptor {
    params: Parameters,
    key: EncryptionKey,
}

impl Encryptor {
    pub fn new_sk(params: &Parameters, sk: &SecretKey) -> Self {
        Self {
            params: params.clone(),
            key: EncryptionKey::Secret(sk.clone()),
        }
    }

    pub fn new_pk(params: &Parameters, pk: &PublicKey) -> Self {
        Self {
            params: params.clone(),
            key: EncryptionKey::Public(pk.clone()),
        }
    }

    pub fn encrypt(&self, pt: &Plaintext, source: &mut Source) -> Ciphertext {
        let t: &Modulus = self.params.modulus();
        let n: usize = self.params.n();
        let mut ct: Ciphertext = Ciphertext::alloc(&self.params, 1);
        match &self.key {
            EncryptionKey::Secret(sk) => {
                // (m - a * s, a)
                source.fill_u64_mod(t.q(), &mut ct.value[1]);
                let (c0, c1) = ct.value.split_at_mut(1);
                t.va_mul_vb_into_vc(&c1[0], &sk.value, &mut c0[0]);
                t.va_sub_vb_into_vb::<ONCE>(&pt.data, &mut c0[0]);
                t.va_neg_into_va(&mut c0[0]);
            }
            EncryptionKey::Public(pk) => {
                // (p0 * u + m, p1 * u)
                let mut u: Vec<u64> = vec![0u64; n];
                source.fill_u64_mod(t.q(), &mut u);
                t.va_mul_vb_into_vc(&pk.value[0], &u, &mut ct.value[0]);
                t.va_add_vb_into_vb::<ONCE>(&pt.data, &mut ct.value[0]);
                t.va_mul_vb_into_vc(&pk.value[1], &u, &mut ct.value[1]);
            }
        }
        ct
    }
}

#[cfg(test)]
mod tests {
    use sampling::source::Source;

    use crate::{
        Decryptor, Encoder, Encryptor, KeyGenerator, Parameters, PublicKey, SecretKey,
        layouts::{Ciphertext, Plaintext},
        parameters::ParametersLiteral,
    };

    #[test]
    fn encrypt_sk() {
        (2..6).for_each(|log_n| {
            println!("test encrypt_sk log_n: {}", log_n);
            test_encrypt(log_n, false);
        });
    }

    #[test]
    fn encrypt_pk() {
        (2..6).for_each(|log_n| {
            println!("test encrypt_pk log_n: {}", log_n);
            test_encrypt(log_n, true);
        });
    }

    fn test_encrypt(log_n: usize, public: bool) {
        let params: Parameters = Parameters::new(ParametersLiteral { log_n, t: 65537 }).unwrap();
        let mut source: Source = Source::new([0u8; 32]);
        let kgen: KeyGenerator = KeyGenerator::new(&params);
        let (sk, pk): (SecretKey, PublicKey) = kgen.gen_key_pair(&mut source);

        let encoder: Encoder = Encoder::new(&params);
        let data: Vec<u64> = (0..params.n() as u64).map(|i| i * 1000 + 7).collect();
        let pt: Plaintext = encoder.encode_uint(&data);

        let encryptor: Encryptor = if public {
            Encryptor::new_pk(&params, &pk)
        } else {
            Encryptor::new_sk(&params, &sk)
        };
        let ct: Ciphertext = encryptor.encrypt(&pt, &mut source);
        assert_ne!(ct.value[0], pt.data);

        let decryptor: Decryptor = Decryptor::new(&params, &sk);
        assert_eq!(encoder.decode_uint(&decryptor.decrypt(&ct)), data);
    }
}
