use crate::error::Error;
use realclosure_nzq::Rational;
use realclosure_poly::{MultivariatePolynomial, Variable};
use std::collections::BTreeMap;

/// An open interval `(l, r)` with rational endpoints, `l <= r`. Degenerate
/// intervals with `l == r` are allowed and represent the single point `l`
/// exactly — the spec's "zero interval" (`l = r = 0`) is the special case of
/// this used before a real-algebraic number's value is pinned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenInterval {
    l: Rational,
    r: Rational,
}

impl OpenInterval {
    pub fn new(l: Rational, r: Rational) -> Self {
        debug_assert!(l <= r, "interval bounds out of order");
        Self { l, r }
    }

    pub fn zero() -> Self {
        Self::new(Rational::ZERO, Rational::ZERO)
    }

    pub fn point(v: Rational) -> Self {
        Self::new(v.clone(), v)
    }

    pub fn l(&self) -> &Rational {
        &self.l
    }

    pub fn r(&self) -> &Rational {
        &self.r
    }

    pub fn is_point(&self) -> bool {
        self.l == self.r
    }

    pub fn is_zero(&self) -> bool {
        self.l.is_zero() && self.r.is_zero()
    }

    /// Does the interval contain `0` other than as a boundary, i.e. can
    /// arithmetic that divides by this interval proceed.
    pub fn contains_zero(&self) -> bool {
        self.contains(&Rational::ZERO)
    }

    pub fn contains(&self, n: &Rational) -> bool {
        if self.is_point() {
            &self.l == n
        } else {
            &self.l < n && &self.r > n
        }
    }

    pub fn contains_interval(&self, o: &Self) -> bool {
        self.l <= o.l && self.r >= o.r
    }

    pub fn meets(&self, n: &Rational) -> bool {
        self.l <= *n && *n <= self.r
    }

    pub fn intersection(&self, o: &Self) -> Self {
        if self.r < o.l || o.r < self.l {
            return Self::zero();
        }
        let l = if self.l >= o.l { self.l.clone() } else { o.l.clone() };
        let r = if self.r <= o.r { self.r.clone() } else { o.r.clone() };
        Self::new(l, r)
    }

    pub fn midpoint(&self) -> Rational {
        (&self.l + &self.r) / Rational::TWO
    }

    pub fn neg(&self) -> Self {
        Self::new(-self.r.clone(), -self.l.clone())
    }

    pub fn add(&self, o: &Self) -> Self {
        Self::new(&self.l + &o.l, &self.r + &o.r)
    }

    pub fn sub(&self, o: &Self) -> Self {
        self.add(&o.neg())
    }

    pub fn mul(&self, o: &Self) -> Self {
        let products = [&self.l * &o.l, &self.l * &o.r, &self.r * &o.l, &self.r * &o.r];
        let mut min = products[0].clone();
        let mut max = products[0].clone();
        for p in &products[1..] {
            if *p < min {
                min = p.clone();
            }
            if *p > max {
                max = p.clone();
            }
        }
        Self::new(min, max)
    }

    pub fn div(&self, o: &Self) -> Result<Self, Error> {
        if o.contains_zero() {
            return Err(Error::DivisionByZero);
        }
        // neither endpoint of o is zero unless o is the single-point interval
        // {c} for c != 0, in which case l == r and both quotients agree.
        let quotients = [&self.l / &o.l, &self.l / &o.r, &self.r / &o.l, &self.r / &o.r];
        let mut min = quotients[0].clone();
        let mut max = quotients[0].clone();
        for q in &quotients[1..] {
            if *q < min {
                min = q.clone();
            }
            if *q > max {
                max = q.clone();
            }
        }
        Ok(Self::new(min, max))
    }

    pub fn pow(&self, e: u32) -> Self {
        if e % 2 == 1 || self.l >= Rational::ZERO {
            Self::new(self.l.pow(e as u64), self.r.pow(e as u64))
        } else if self.r < Rational::ZERO {
            Self::new(self.r.pow(e as u64), self.l.pow(e as u64))
        } else {
            let a = self.l.pow(e as u64);
            let b = self.r.pow(e as u64);
            Self::new(Rational::ZERO, if a > b { a } else { b })
        }
    }

    pub fn abs(&self) -> Self {
        let l = self.l.abs_ref();
        let r = self.r.abs_ref();
        if self.l.is_zero() || self.r.is_zero() || self.l.sign() == self.r.sign() {
            let (min, max) = if l <= r { (l, r) } else { (r, l) };
            Self::new(min, max)
        } else {
            Self::new(Rational::ZERO, if l > r { l } else { r })
        }
    }

    /// The rational with the smallest denominator strictly between the
    /// bounds; `0` if the interval straddles or equals zero. Built directly
    /// on `Rational::simplest_rational_in_open_interval`, which implements
    /// the same denominator-search algorithm this crate would otherwise
    /// have to hand-roll.
    pub fn sample(&self) -> Rational {
        if self.contains_zero() || self.is_zero() {
            return Rational::ZERO;
        }
        if self.is_point() {
            return self.l.clone();
        }
        Rational::simplest_rational_in_open_interval(&self.l, &self.r)
    }

    /// `sample`, but falls back to the midpoint when either bound's
    /// numerator/denominator would overflow the fast-path bound used
    /// upstream by the isolator (`MAX_FASTSAMPLE_BOUND`).
    pub fn sample_fast(&self, max_fastsample_bound: i64) -> Rational {
        if fits_fast_bound(&self.l, max_fastsample_bound) && fits_fast_bound(&self.r, max_fastsample_bound) {
            self.sample()
        } else {
            self.midpoint()
        }
    }
}

fn fits_fast_bound(q: &Rational, bound: i64) -> bool {
    let bound = realclosure_nzq::Natural::from(bound.unsigned_abs());
    q.numerator().abs() <= bound && q.denominator() <= bound
}

/// Evaluates a multivariate polynomial under an assignment of (some of) its
/// variables to open intervals, via nested Horner's method over the
/// outermost variable (`original_source/src/lib/OpenInterval.cpp`'s
/// `evaluate`). Errors if a variable appearing in `p` is missing from
/// `assignment`.
pub fn eval_under_assignment(
    p: &MultivariatePolynomial,
    assignment: &BTreeMap<Variable, OpenInterval>,
) -> Result<OpenInterval, Error> {
    if let Some(c) = p.as_rational_constant() {
        return Ok(OpenInterval::point(c));
    }
    let main = p.variables().into_iter().next().expect("non-constant polynomial has a variable");
    let main_interval = assignment.get(&main).ok_or(Error::AssignmentIncomplete)?;
    let uni = p.to_univariate(main);
    let mut acc = OpenInterval::zero();
    for coeff in uni.coeffs().iter().rev() {
        let coeff_interval = eval_under_assignment(coeff, assignment)?;
        acc = acc.mul(main_interval).add(&coeff_interval);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn mul_picks_extremes_across_sign_changes() {
        let a = OpenInterval::new(rat(-2), rat(3));
        let b = OpenInterval::new(rat(-1), rat(4));
        let p = a.mul(&b);
        assert_eq!(p.l(), &rat(-8));
        assert_eq!(p.r(), &rat(12));
    }

    #[test]
    fn sample_of_zero_straddling_interval_is_zero() {
        let i = OpenInterval::new(rat(-3), rat(5));
        assert_eq!(i.sample(), Rational::ZERO);
    }

    #[test]
    fn sample_lies_strictly_inside() {
        let i = OpenInterval::new(rat(3), rat(4));
        let s = i.sample();
        assert!(i.contains(&s));
    }

    #[test]
    fn pow_even_exponent_straddling_interval_includes_zero() {
        let i = OpenInterval::new(rat(-2), rat(3));
        let p = i.pow(2);
        assert_eq!(p.l(), &rat(0));
        assert_eq!(p.r(), &rat(9));
    }
}
