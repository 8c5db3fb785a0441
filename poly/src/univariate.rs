use crate::error::Error;
use crate::multivariate::MultivariatePolynomial;
use crate::ring::{FieldElement, RingElement};
use realclosure_nzq::{Natural, Rational};
use std::fmt;

/// A polynomial in one variable with coefficients in `C`. No main-variable
/// bookkeeping lives here — that belongs to whoever builds a `Polynomial<C>`
/// view of a multivariate object (see `MultivariatePolynomial::to_univariate`)
/// — this type is the pure algebraic object, generic the way the teacher
/// workspace's own `Polynomial<Ring::Set>` is generic, but bounded by the
/// small `RingElement`/`FieldElement` traits instead of the full Structure
/// hierarchy, since every instantiation here is either `Rational` or another
/// polynomial ring over the rationals.
///
/// Invariant: `coeffs` never has a trailing zero entry; the zero polynomial
/// is the empty vector.
#[derive(Clone, PartialEq)]
pub struct Polynomial<C: RingElement> {
    coeffs: Vec<C>,
}

impl<C: RingElement> fmt::Debug for Polynomial<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.coeffs.iter()).finish()
    }
}

impl<C: RingElement> Polynomial<C> {
    pub fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    pub fn constant(c: C) -> Self {
        Self::from_coeffs(vec![c])
    }

    pub fn monomial(c: C, degree: usize) -> Self {
        if c.ring_is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![C::ring_zero(); degree + 1];
        coeffs[degree] = c;
        Self { coeffs }
    }

    /// `coeffs[i]` is the coefficient of `x^i`.
    pub fn from_coeffs(mut coeffs: Vec<C>) -> Self {
        while matches!(coeffs.last(), Some(c) if c.ring_is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn into_coeffs(self) -> Vec<C> {
        self.coeffs
    }

    pub fn coeffs(&self) -> &[C] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// The lowest-degree term with a nonzero coefficient (`ldegree` in §6).
    pub fn low_degree(&self) -> Option<usize> {
        self.coeffs.iter().position(|c| !c.ring_is_zero())
    }

    pub fn leading_coeff(&self) -> Option<C> {
        self.coeffs.last().cloned()
    }

    pub fn trailing_coeff(&self) -> Option<C> {
        self.low_degree().map(|i| self.coeffs[i].clone())
    }

    pub fn coeff(&self, i: usize) -> C {
        self.coeffs.get(i).cloned().unwrap_or_else(C::ring_zero)
    }

    pub fn is_monic(&self) -> bool {
        matches!(self.leading_coeff(), Some(c) if c == C::ring_one())
    }

    pub fn neg(&self) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| c.ring_neg()).collect())
    }

    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(self.coeff(i).ring_add(&other.coeff(i)));
        }
        Self::from_coeffs(out)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scalar_mul(&self, s: &C) -> Self {
        if s.ring_is_zero() {
            return Self::zero();
        }
        Self::from_coeffs(self.coeffs.iter().map(|c| c.ring_mul(s)).collect())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out = vec![C::ring_zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.ring_is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] = out[i + j].ring_add(&a.ring_mul(b));
            }
        }
        Self::from_coeffs(out)
    }

    pub fn diff(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        let out = self.coeffs[1..]
            .iter()
            .enumerate()
            .map(|(i, c)| c.ring_mul(&C::ring_from_i64((i + 1) as i64)))
            .collect();
        Self::from_coeffs(out)
    }

    /// Horner evaluation; `x` lives in the same ring as the coefficients.
    pub fn eval(&self, x: &C) -> C {
        let mut acc = C::ring_zero();
        for c in self.coeffs.iter().rev() {
            acc = acc.ring_mul(x).ring_add(c);
        }
        acc
    }

    pub fn apply_map<C2: RingElement>(&self, f: impl Fn(&C) -> C2) -> Polynomial<C2> {
        Polynomial::from_coeffs(self.coeffs.iter().map(f).collect())
    }

    /// Classical pseudo-division: returns `(q, r)` with
    /// `lc(other)^k * self = q * other + r`, `deg(r) < deg(other)`, for
    /// `k = max(deg(self) - deg(other) + 1, 0)`. Works over any ring, no
    /// division of coefficients is ever performed.
    pub fn pseudo_divide(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "pseudo-division by the zero polynomial");
        let n = other.degree().unwrap();
        let lc_b = other.leading_coeff().unwrap();
        let mut r = self.clone();
        let mut q = Self::zero();
        let max_iters = match self.degree() {
            Some(m) if m >= n => m - n + 1,
            _ => 0,
        };
        let mut iterations = 0usize;
        while let Some(dr) = r.degree() {
            if dr < n {
                break;
            }
            let lc_r = r.leading_coeff().unwrap();
            let shift = dr - n;
            r = r.scalar_mul(&lc_b).sub(&Self::monomial(lc_r.clone(), shift).mul(other));
            q = q.scalar_mul(&lc_b).add(&Self::monomial(lc_r, shift));
            iterations += 1;
        }
        for _ in iterations..max_iters {
            r = r.scalar_mul(&lc_b);
            q = q.scalar_mul(&lc_b);
        }
        (q, r)
    }

    pub fn prem(&self, other: &Self) -> Self {
        self.pseudo_divide(other).1
    }

    pub fn pquo(&self, other: &Self) -> Self {
        self.pseudo_divide(other).0
    }

    /// The (unnormalised) pseudo-remainder sequence of `(self, other)`:
    /// `p0 = self, p1 = other, p_{i+1} = prem(p_{i-1}, p_i)`, stopping at the
    /// first zero remainder. Each `p_i` has strictly decreasing degree.
    pub fn pseudo_remainder_chain(&self, other: &Self) -> Vec<Self> {
        let mut chain = vec![self.clone(), other.clone()];
        loop {
            let len = chain.len();
            if chain[len - 1].is_zero() {
                break;
            }
            let r = chain[len - 2].prem(&chain[len - 1]);
            if r.is_zero() {
                break;
            }
            chain.push(r);
        }
        chain
    }

    /// The leading coefficients of the pseudo-remainder chain of `(self, other)`,
    /// one per distinct degree the chain passes through. These are the
    /// quantities Hong's projection operator (§4.6) needs as "principal
    /// subresultant coefficients" of `(t, t')`/`(t, q)`: using the plain
    /// pseudo-remainder chain instead of Collins' normalised subresultant PRS
    /// over-includes a few extra (square) scalar factors, which only ever
    /// widens the projected elimination set — harmless for soundness, and the
    /// simplification this crate makes (see DESIGN.md).
    pub fn principal_subresultant_coefficients(&self, other: &Self) -> Vec<C> {
        self.pseudo_remainder_chain(other)
            .iter()
            .filter_map(Polynomial::leading_coeff)
            .collect()
    }

    /// The resultant of `self` and `other`, computed as the determinant of
    /// their Sylvester matrix via fraction-free (Bareiss) Gaussian
    /// elimination — exact over any commutative ring, no field division
    /// required anywhere in this crate's `RingElement` bound.
    pub fn resultant(&self, other: &Self) -> C {
        let (Some(m), Some(n)) = (self.degree(), other.degree()) else {
            return C::ring_zero();
        };
        let size = m + n;
        let mut mat = vec![vec![C::ring_zero(); size]; size];
        let a_coeffs: Vec<C> = (0..=m).rev().map(|i| self.coeff(i)).collect();
        let b_coeffs: Vec<C> = (0..=n).rev().map(|i| other.coeff(i)).collect();
        for i in 0..n {
            for (k, c) in a_coeffs.iter().enumerate() {
                mat[i][i + k] = c.clone();
            }
        }
        for j in 0..m {
            for (k, c) in b_coeffs.iter().enumerate() {
                mat[n + j][j + k] = c.clone();
            }
        }
        bareiss_determinant(mat)
    }
}

/// Fraction-free Gaussian elimination (Bareiss' algorithm): every division
/// performed is exact over any integral domain, which is why it is the
/// standard way to compute a resultant generically instead of needing a
/// field.
fn bareiss_determinant<C: RingElement>(mut m: Vec<Vec<C>>) -> C {
    let n = m.len();
    if n == 0 {
        return C::ring_one();
    }
    let mut prev_pivot = C::ring_one();
    let mut sign = C::ring_one();
    for k in 0..n - 1 {
        if m[k][k].ring_is_zero() {
            match (k + 1..n).find(|&r| !m[r][k].ring_is_zero()) {
                Some(swap_row) => {
                    m.swap(k, swap_row);
                    sign = sign.ring_neg();
                }
                None => return C::ring_zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = m[k][k].ring_mul(&m[i][j]).ring_sub(&m[i][k].ring_mul(&m[k][j]));
                m[i][j] = num.ring_exact_div(&prev_pivot);
            }
            m[i][k] = C::ring_zero();
        }
        prev_pivot = m[k][k].clone();
    }
    sign.ring_mul(&m[n - 1][n - 1])
}

impl<C: FieldElement> Polynomial<C> {
    /// True polynomial long division; requires invertible coefficients.
    pub fn divide(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "division by the zero polynomial");
        let n = other.degree().unwrap();
        let lc_b = other.leading_coeff().unwrap();
        let mut r = self.clone();
        let mut q = Self::zero();
        while let Some(dr) = r.degree() {
            if dr < n {
                break;
            }
            let lc_r = r.leading_coeff().unwrap();
            let factor = lc_r.ring_div(&lc_b);
            let shift = dr - n;
            r = r.sub(&Self::monomial(factor.clone(), shift).mul(other));
            q = q.add(&Self::monomial(factor, shift));
        }
        (q, r)
    }

    pub fn rem(&self, other: &Self) -> Self {
        self.divide(other).1
    }

    pub fn quo(&self, other: &Self) -> Self {
        self.divide(other).0
    }

    pub fn normalize_monic(&self) -> Self {
        match self.leading_coeff() {
            None => Self::zero(),
            Some(lc) => self.scalar_mul(&C::ring_one().ring_div(&lc)),
        }
    }

    /// Euclidean gcd, normalised to be monic (or zero).
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a.normalize_monic()
    }
}

/// A `UnivariatePolynomial` whose coefficients are all exact rationals (§3).
/// Distinct from `Polynomial<Rational>` only in that construction from a
/// general parametric polynomial validates rationality; once built it is a
/// thin, total-API wrapper around the generic engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalUnivariatePolynomial(Polynomial<Rational>);

impl RationalUnivariatePolynomial {
    pub fn from_coeffs(coeffs: Vec<Rational>) -> Self {
        Self(Polynomial::from_coeffs(coeffs))
    }

    pub fn zero() -> Self {
        Self(Polynomial::zero())
    }

    pub fn constant(c: Rational) -> Self {
        Self(Polynomial::constant(c))
    }

    pub fn monomial(c: Rational, degree: usize) -> Self {
        Self(Polynomial::monomial(c, degree))
    }

    pub fn inner(&self) -> &Polynomial<Rational> {
        &self.0
    }

    pub fn into_inner(self) -> Polynomial<Rational> {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_constant(&self) -> bool {
        self.0.is_constant()
    }

    pub fn degree(&self) -> Option<usize> {
        self.0.degree()
    }

    pub fn low_degree(&self) -> Option<usize> {
        self.0.low_degree()
    }

    pub fn leading_coeff(&self) -> Option<Rational> {
        self.0.leading_coeff()
    }

    pub fn trailing_coeff(&self) -> Option<Rational> {
        self.0.trailing_coeff()
    }

    pub fn coeff(&self, i: usize) -> Rational {
        self.0.coeff(i)
    }

    pub fn coeffs(&self) -> &[Rational] {
        self.0.coeffs()
    }

    pub fn diff(&self) -> Self {
        Self(self.0.diff())
    }

    pub fn eval(&self, x: &Rational) -> Rational {
        self.0.eval(x)
    }

    pub fn sign_at(&self, x: &Rational) -> i32 {
        self.eval(x).sign()
    }

    pub fn neg(&self) -> Self {
        Self(self.0.neg())
    }
    pub fn add(&self, other: &Self) -> Self {
        Self(self.0.add(&other.0))
    }
    pub fn sub(&self, other: &Self) -> Self {
        Self(self.0.sub(&other.0))
    }
    pub fn mul(&self, other: &Self) -> Self {
        Self(self.0.mul(&other.0))
    }
    pub fn scalar_mul(&self, s: &Rational) -> Self {
        Self(self.0.scalar_mul(s))
    }

    pub fn divide(&self, other: &Self) -> (Self, Self) {
        let (q, r) = self.0.divide(&other.0);
        (Self(q), Self(r))
    }
    pub fn rem(&self, other: &Self) -> Self {
        Self(self.0.rem(&other.0))
    }
    pub fn quo(&self, other: &Self) -> Self {
        Self(self.0.quo(&other.0))
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }

    pub fn resultant(&self, other: &Self) -> Rational {
        self.0.resultant(&other.0)
    }

    /// `0` is a root; returns the polynomial with that factor of `x` removed.
    pub fn has_zero_root(&self) -> bool {
        !self.is_zero() && self.coeff(0).is_zero()
    }

    pub fn strip_zero_root(&self) -> Self {
        debug_assert!(self.has_zero_root());
        let shift = self.low_degree().unwrap_or(0);
        Self(Polynomial::from_coeffs(self.0.coeffs()[shift..].to_vec()))
    }

    /// `gcd(numerators) / lcm(denominators)`, signed to match the leading
    /// coefficient. `primitive_part` divides it out.
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return Rational::ZERO;
        }
        let mut g = Rational::ZERO;
        for c in self.0.coeffs() {
            g = Rational::gcd(&g, c);
        }
        if self.leading_coeff().unwrap().sign() < 0 {
            -g
        } else {
            g
        }
    }

    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let c = self.content();
        self.scalar_mul(&(Rational::ONE / c))
    }

    /// `p / gcd(p, p')`, i.e. the separable part — every root of `p` becomes
    /// a simple root of the square-free part, with the same real roots.
    pub fn square_free_part(&self) -> Self {
        if self.is_zero() || self.is_constant() {
            return self.clone();
        }
        let g = self.gcd(&self.diff());
        self.divide(&g).0.primitive_part()
    }

    /// Sum of absolute values of the non-leading coefficients, divided by the
    /// absolute value of the leading coefficient — `∞`-norm style bound used
    /// to initialise real-root search intervals (§4.2).
    pub fn cauchy_bound(&self) -> Rational {
        let Some(lc) = self.leading_coeff() else {
            return Rational::ZERO;
        };
        debug_assert!(!lc.is_zero());
        let mut sum = Rational::ZERO;
        if let Some(d) = self.degree() {
            for i in 0..d {
                sum += self.coeff(i).abs();
            }
        }
        sum / lc.abs()
    }

    /// `max |c_i|` over all coefficients, used to tighten the Cauchy bound
    /// (`original_source/src/lib/RationalUnivariatePolynomial.h`'s `maximumNorm`).
    pub fn maximum_norm(&self) -> Rational {
        self.0
            .coeffs()
            .iter()
            .map(|c| c.abs_ref())
            .max()
            .unwrap_or(Rational::ZERO)
    }

    pub fn one_norm(&self) -> Rational {
        self.0.coeffs().iter().fold(Rational::ZERO, |acc, c| acc + c.abs_ref())
    }

    pub fn is_polynomial_in(&self) -> bool {
        true
    }
}

impl TryFrom<&Polynomial<MultivariatePolynomial>> for RationalUnivariatePolynomial {
    type Error = Error;

    fn try_from(p: &Polynomial<MultivariatePolynomial>) -> Result<Self, Error> {
        let mut coeffs = Vec::with_capacity(p.coeffs().len());
        for c in p.coeffs() {
            coeffs.push(c.as_rational_constant().ok_or(Error::InvalidPolynomial)?);
        }
        Ok(RationalUnivariatePolynomial::from_coeffs(coeffs))
    }
}

/// Full multivariate-coefficient univariate polynomial view (§3): a
/// polynomial in one main variable whose coefficients may themselves depend
/// on the remaining variables. Used by CAD projection and evaluation-isolation.
pub type ParametricUnivariatePolynomial = Polynomial<MultivariatePolynomial>;

pub const MAX_FASTSAMPLE_BOUND: i64 = i16::MAX as i64;

// Used by isolation/refinement to round the number of representation bits
// a bound occupies.
pub fn fits_fast_sample_bound(n: &Natural) -> bool {
    n.bit_length() < 16
}
