use itertools::izip;

pub type REDUCEMOD = u8;

/// Leaves the result in [0, 2q).
pub const NONE: REDUCEMOD = 0;
/// Maps the result to [0, q).
pub const ONCE: REDUCEMOD = 1;

pub trait WordOps<O> {
    fn log2(self) -> O;
    fn mask(self) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> u64 {
        (u64::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn mask(self) -> u64 {
        let log2: u64 = self.log2();
        if log2 == 64 { u64::MAX } else { (1 << log2) - 1 }
    }
}

pub trait ReduceOnce<O> {
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
    fn reduce_once_assign(&mut self, q: O);
}

impl ReduceOnce<u64> for u64 {
    #[inline(always)]
    fn reduce_once(&self, q: u64) -> u64 {
        if *self >= q { *self - q } else { *self }
    }
    #[inline(always)]
    fn reduce_once_assign(&mut self, q: u64) {
        if *self >= q {
            *self -= q
        }
    }
}

/// Word-sized prime modulus with scalar (`sa_`) and vector (`va_`) arithmetic.
/// Inputs of the vector operations may be lazily reduced in [0, 2q).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modulus {
    q: u64,
}

impl Modulus {
    pub fn new(q: u64) -> Self {
        assert!(q > 1, "invalid modulus: {}", q);
        Self { q }
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn reduce(&self, a: u64) -> u64 {
        a % self.q
    }

    #[inline(always)]
    pub fn reduce_u128(&self, a: u128) -> u64 {
        (a % self.q as u128) as u64
    }

    #[inline(always)]
    pub fn reduce_i64(&self, a: i64) -> u64 {
        a.rem_euclid(self.q as i64) as u64
    }

    /// Maps `a` in [0, q) to its centred representative in (-q/2, q/2].
    #[inline(always)]
    pub fn center(&self, a: u64) -> i64 {
        let a: u64 = self.reduce(a);
        if a >= self.q.div_ceil(2) {
            a as i64 - self.q as i64
        } else {
            a as i64
        }
    }

    #[inline(always)]
    pub fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        if REDUCE == ONCE {
            a.reduce_once_assign(self.q);
        }
    }

    #[inline(always)]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        (self.reduce(a) + self.reduce(b)).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        (self.reduce(a) + self.q - self.reduce(b)).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn neg(&self, a: u64) -> u64 {
        (self.q - self.reduce(a)).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.reduce_u128(a as u128 * b as u128)
    }

    pub fn pow(&self, a: u64, mut e: u64) -> u64 {
        let mut base: u64 = self.reduce(a);
        let mut acc: u64 = 1 % self.q;
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        acc
    }

    /// Multiplicative inverse, `None` if `a` shares a factor with q.
    pub fn inv(&self, a: u64) -> Option<u64> {
        let (mut r0, mut r1): (i128, i128) = (self.q as i128, self.reduce(a) as i128);
        let (mut t0, mut t1): (i128, i128) = (0, 1);
        while r1 != 0 {
            let quot: i128 = r0 / r1;
            (r0, r1) = (r1, r0 - quot * r1);
            (t0, t1) = (t1, t0 - quot * t1);
        }
        if r0 != 1 {
            return None;
        }
        Some(t0.rem_euclid(self.q as i128) as u64)
    }

    #[inline(always)]
    pub fn va_reduce_into_va(&self, a: &mut [u64]) {
        a.iter_mut().for_each(|x| *x = self.reduce(*x));
    }

    #[inline(always)]
    pub fn va_add_vb_into_vc<const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        izip!(a.iter(), b.iter(), c.iter_mut()).for_each(|(a, b, c)| {
            *c = a.reduce_once(self.q) + b.reduce_once(self.q);
            self.sa_reduce_into_sa::<REDUCE>(c);
        });
    }

    #[inline(always)]
    pub fn va_add_vb_into_vb<const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        izip!(a.iter(), b.iter_mut()).for_each(|(a, b)| {
            *b = a.reduce_once(self.q) + b.reduce_once(self.q);
            self.sa_reduce_into_sa::<REDUCE>(b);
        });
    }

    /// c <- a - b
    #[inline(always)]
    pub fn va_sub_vb_into_vc<const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        izip!(a.iter(), b.iter(), c.iter_mut()).for_each(|(a, b, c)| {
            *c = a.reduce_once(self.q) + self.q - b.reduce_once(self.q);
            self.sa_reduce_into_sa::<REDUCE>(c);
        });
    }

    /// b <- b - a
    #[inline(always)]
    pub fn va_sub_vb_into_vb<const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        izip!(a.iter(), b.iter_mut()).for_each(|(a, b)| {
            *b = b.reduce_once(self.q) + self.q - a.reduce_once(self.q);
            self.sa_reduce_into_sa::<REDUCE>(b);
        });
    }

    #[inline(always)]
    pub fn va_neg_into_va(&self, a: &mut [u64]) {
        a.iter_mut().for_each(|x| *x = self.neg(*x));
    }

    #[inline(always)]
    pub fn va_neg_into_vb(&self, a: &[u64], b: &mut [u64]) {
        izip!(a.iter(), b.iter_mut()).for_each(|(a, b)| *b = self.neg(*a));
    }

    #[inline(always)]
    pub fn va_mul_vb_into_vc(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        izip!(a.iter(), b.iter(), c.iter_mut()).for_each(|(a, b, c)| *c = self.mul(*a, *b));
    }

    #[inline(always)]
    pub fn va_mul_vb_into_vb(&self, a: &[u64], b: &mut [u64]) {
        izip!(a.iter(), b.iter_mut()).for_each(|(a, b)| *b = self.mul(*a, *b));
    }

    /// c <- c + a * b
    #[inline(always)]
    pub fn va_mul_vb_add_vc_into_vc(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        izip!(a.iter(), b.iter(), c.iter_mut())
            .for_each(|(a, b, c)| *c = self.reduce_u128(*a as u128 * *b as u128 + *c as u128));
    }

    #[inline(always)]
    pub fn sa_mul_vb_into_vb(&self, a: u64, b: &mut [u64]) {
        b.iter_mut().for_each(|x| *x = self.mul(a, *x));
    }

    #[inline(always)]
    pub fn sa_mul_vb_into_vc(&self, a: u64, b: &[u64], c: &mut [u64]) {
        izip!(b.iter(), c.iter_mut()).for_each(|(b, c)| *c = self.mul(a, *b));
    }

    #[inline(always)]
    pub fn sa_add_vb_into_vb(&self, a: u64, b: &mut [u64]) {
        b.iter_mut().for_each(|x| *x = self.add(a, *x));
    }

    /// Deterministic Miller-Rabin over u64.
    pub fn is_prime(&self) -> bool {
        let q: u64 = self.q;
        if q < 2 {
            return false;
        }
        const BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
        for p in BASES {
            if q % p == 0 {
                return q == p;
            }
        }
        let s: u32 = (q - 1).trailing_zeros();
        let d: u64 = (q - 1) >> s;
        'witness: for a in BASES {
            let mut x: u64 = self.pow(a, d);
            if x == 1 || x == q - 1 {
                continue;
            }
            for _ in 1..s {
                x = self.mul(x, x);
                if x == q - 1 {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }
}
