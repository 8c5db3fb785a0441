use realclosure_nzq::Rational;
use std::fmt::Debug;

/// The ring operations `Polynomial<C>` needs from its coefficients. Kept
/// deliberately minimal (no generic `Signature`/`Structure` machinery, since
/// this crate only ever instantiates it at `Rational` and at `MultivariatePolynomial`
/// — a polynomial ring over the rationals is all §2's Non-goals ask for).
///
/// `ring_exact_div` is only ever called where the subresultant/pseudo-division
/// theory guarantees the division is exact; implementations assert on it
/// instead of returning a `Result`, matching the crate's treatment of
/// internal invariant violations as bugs rather than caller-facing errors.
pub trait RingElement: Clone + PartialEq + Debug {
    fn ring_zero() -> Self;
    fn ring_one() -> Self;
    fn ring_is_zero(&self) -> bool;
    fn ring_neg(&self) -> Self;
    fn ring_add(&self, rhs: &Self) -> Self;
    fn ring_sub(&self, rhs: &Self) -> Self {
        self.ring_add(&rhs.ring_neg())
    }
    fn ring_mul(&self, rhs: &Self) -> Self;
    fn ring_exact_div(&self, rhs: &Self) -> Self;

    fn ring_from_i64(n: i64) -> Self {
        let mut acc = Self::ring_zero();
        let one = Self::ring_one();
        let neg = n < 0;
        let mut k = n.unsigned_abs();
        while k > 0 {
            acc = acc.ring_add(&one);
            k -= 1;
        }
        if neg { acc.ring_neg() } else { acc }
    }
}

/// Marks a `RingElement` whose nonzero elements are invertible, enabling true
/// (non-pseudo) polynomial division, Euclidean gcd and square-free part.
pub trait FieldElement: RingElement {
    fn ring_div(&self, rhs: &Self) -> Self;
}

impl RingElement for Rational {
    fn ring_zero() -> Self {
        Rational::ZERO
    }
    fn ring_one() -> Self {
        Rational::ONE
    }
    fn ring_is_zero(&self) -> bool {
        self.is_zero()
    }
    fn ring_neg(&self) -> Self {
        -self.clone()
    }
    fn ring_add(&self, rhs: &Self) -> Self {
        self + rhs
    }
    fn ring_sub(&self, rhs: &Self) -> Self {
        self - rhs
    }
    fn ring_mul(&self, rhs: &Self) -> Self {
        self * rhs
    }
    fn ring_exact_div(&self, rhs: &Self) -> Self {
        debug_assert!(!rhs.is_zero());
        self / rhs
    }
    fn ring_from_i64(n: i64) -> Self {
        Rational::from(n)
    }
}

impl FieldElement for Rational {
    fn ring_div(&self, rhs: &Self) -> Self {
        debug_assert!(!rhs.is_zero());
        self / rhs
    }
}
