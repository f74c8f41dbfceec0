use backend::modulus::Modulus;

/// Polynomial in the formal variables `U, V` with a (degree + 1) x (degree + 1)
/// coefficient matrix. `coeff(i, j)` multiplies `U^i V^j`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BivariatePoly {
    coeffs: Vec<Vec<u64>>,
}

impl BivariatePoly {
    pub fn new(degree: usize) -> Self {
        Self {
            coeffs: vec![vec![0u64; degree + 1]; degree + 1],
        }
    }

    /// `a * U + b * V`.
    pub fn linear(a: u64, b: u64) -> Self {
        let mut p: Self = Self::new(1);
        p.set_coeff(1, 0, a);
        p.set_coeff(0, 1, b);
        p
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coeff(&self, i: usize, j: usize) -> u64 {
        self.coeffs[i][j]
    }

    pub fn set_coeff(&mut self, i: usize, j: usize, value: u64) {
        self.coeffs[i][j] = value;
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().flatten().all(|c| *c == 0)
    }

    /// Non-zero coefficients as `(i, j, coeff)`.
    pub fn terms(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.coeffs.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c != 0)
                .map(move |(j, c)| (i, j, *c))
        })
    }

    fn combine(&self, other: &Self, f: impl Fn(u64, u64) -> u64) -> Self {
        let mut out: Self = Self::new(self.degree().max(other.degree()));
        (0..=out.degree()).for_each(|i| {
            (0..=out.degree()).for_each(|j| {
                let a: u64 = self.coeffs.get(i).and_then(|row| row.get(j)).copied().unwrap_or(0);
                let b: u64 = other.coeffs.get(i).and_then(|row| row.get(j)).copied().unwrap_or(0);
                out.coeffs[i][j] = f(a, b);
            })
        });
        out
    }

    fn map(&self, f: impl Fn(u64) -> u64) -> Self {
        Self {
            coeffs: self
                .coeffs
                .iter()
                .map(|row| row.iter().map(|c| f(*c)).collect())
                .collect(),
        }
    }

    pub fn add(&self, other: &Self, t: &Modulus) -> Self {
        self.combine(other, |a, b| t.add(t.reduce(a), t.reduce(b)))
    }

    /// Coefficients are left in [0, 2T).
    pub fn add_no_mod(&self, other: &Self, t: &Modulus) -> Self {
        self.combine(other, |a, b| t.reduce(a) + t.reduce(b))
    }

    pub fn sub(&self, other: &Self, t: &Modulus) -> Self {
        self.combine(other, |a, b| t.sub(t.reduce(a), t.reduce(b)))
    }

    pub fn sub_no_mod(&self, other: &Self, t: &Modulus) -> Self {
        self.combine(other, |a, b| t.reduce(a) + t.q() - t.reduce(b))
    }

    pub fn neg(&self, t: &Modulus) -> Self {
        self.map(|c| t.neg(t.reduce(c)))
    }

    pub fn reduce(&self, t: &Modulus) -> Self {
        self.map(|c| t.reduce(c))
    }

    pub fn mul_scalar(&self, scalar: u64, t: &Modulus) -> Self {
        self.map(|c| t.mul(c, scalar))
    }

    /// Full convolution, the result has degree `deg(self) + deg(other)`.
    pub fn mul(&self, other: &Self, t: &Modulus) -> Self {
        let mut acc: Vec<Vec<u128>> = vec![vec![0u128; self.degree() + other.degree() + 1]; self.degree() + other.degree() + 1];
        self.terms().for_each(|(i0, j0, c0)| {
            other.terms().for_each(|(i1, j1, c1)| {
                let x: &mut u128 = &mut acc[i0 + i1][j0 + j1];
                *x = (*x + c0 as u128 * c1 as u128) % t.q() as u128;
            })
        });
        Self {
            coeffs: acc
                .into_iter()
                .map(|row| row.into_iter().map(|c| c as u64).collect())
                .collect(),
        }
    }

    /// Evaluates at `(u, v)`.
    pub fn eval(&self, u: u64, v: u64, t: &Modulus) -> u64 {
        self.terms()
            .fold(0u64, |acc, (i, j, c)| t.add(acc, t.mul(t.reduce(c), t.mul(t.pow(u, i as u64), t.pow(v, j as u64)))))
    }
}
