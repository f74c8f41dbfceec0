use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

/// Fresh seed drawn from the thread-local OS-seeded generator.
pub fn new_seed() -> [u8; 32] {
    let mut seed: [u8; 32] = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    seed
}

pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Source {
        Source::new(new_seed())
    }

    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Rejection samples `x & mask` until `x < max`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform element of [0, q).
    #[inline(always)]
    pub fn next_u64_mod(&mut self, q: u64) -> u64 {
        debug_assert!(q > 0);
        let mask: u64 = mask_for(q);
        self.next_u64n(q, mask)
    }

    /// Uniform element of [1, q).
    #[inline(always)]
    pub fn next_u64_nonzero_mod(&mut self, q: u64) -> u64 {
        debug_assert!(q > 1);
        1 + self.next_u64_mod(q - 1)
    }

    pub fn fill_u64_mod(&mut self, q: u64, data: &mut [u64]) {
        let mask: u64 = mask_for(q);
        data.iter_mut().for_each(|x| *x = self.next_u64n(q, mask));
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }
}

/// Smallest all-ones mask covering every value below `q`.
#[inline(always)]
pub fn mask_for(q: u64) -> u64 {
    if q <= 1 {
        return 0;
    }
    let bits: u32 = u64::BITS - (q - 1).leading_zeros();
    if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
