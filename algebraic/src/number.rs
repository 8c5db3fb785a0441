use crate::error::Error;
use crate::interval::OpenInterval;
use realclosure_nzq::Rational;
use realclosure_poly::{Monomial, MultivariatePolynomial, RationalUnivariatePolynomial as Poly, Term, Variable};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

const VX: Variable = Variable(0);
const VY: Variable = Variable(1);

/// The interval-represented side of a `RealAlgebraicNumber`: a square-free,
/// non-constant defining polynomial, an isolating interval, its cached Sturm
/// sequence, a refinement counter, and (once discovered) the exact rational
/// value — kept behind `Rc<RefCell<_>>` so the sample tree, per-level
/// `SampleList` FIFO views and parent/child ordering can all hold a handle to
/// the same refinable number (§5).
#[derive(Debug)]
pub struct IntervalRep {
    poly: Poly,
    interval: OpenInterval,
    sturm: Vec<Poly>,
    refinement_count: u64,
    value: Option<Rational>,
    is_root: bool,
}

/// A real algebraic number: either an exact rational, or a root pinned down
/// by a square-free defining polynomial and a shrinking isolating interval.
/// See `original_source/src/lib/RealAlgebraicNumberNR.h` /
/// `RealAlgebraicNumberIR.h` for the two-variant split this mirrors.
#[derive(Debug, Clone)]
pub enum RealAlgebraicNumber {
    Numeric(Rational, bool),
    Interval(Rc<RefCell<IntervalRep>>),
}

impl RealAlgebraicNumber {
    pub fn from_rational(value: Rational) -> Self {
        RealAlgebraicNumber::Numeric(value, false)
    }

    pub fn zero() -> Self {
        Self::from_rational(Rational::ZERO)
    }

    /// Builds a number from a (not necessarily square-free) defining
    /// polynomial and an isolating interval. Reduces to the square-free part
    /// first (the interval still isolates the same unique root, since
    /// dividing out repeated factors cannot remove it), and collapses
    /// straight to `Numeric` for degree <= 1 (§4.3).
    pub fn from_isolating_interval(poly: Poly, interval: OpenInterval, is_root: bool) -> Self {
        debug_assert!(!poly.is_zero());
        let poly = poly.square_free_part();
        match poly.degree() {
            Some(0) | None => unreachable!("isolating interval given for a constant polynomial"),
            Some(1) => {
                // a*x + b = 0 => x = -b/a
                let a = poly.coeff(1);
                let b = poly.coeff(0);
                Self::Numeric(-(b / a), is_root)
            }
            _ => {
                let interval = normalize_away_from_zero(&poly, interval);
                let sturm = realclosure_poly::standard_sturm_sequence(&poly);
                debug_assert_eq!(
                    realclosure_poly::root_count_open(&sturm, interval.l(), interval.r()),
                    1,
                    "interval does not isolate exactly one root"
                );
                Self::Interval(Rc::new(RefCell::new(IntervalRep {
                    poly,
                    interval,
                    sturm,
                    refinement_count: 0,
                    value: None,
                    is_root,
                })))
            }
        }
    }

    pub fn is_root(&self) -> bool {
        match self {
            RealAlgebraicNumber::Numeric(_, is_root) => *is_root,
            RealAlgebraicNumber::Interval(rep) => rep.borrow().is_root,
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            RealAlgebraicNumber::Numeric(..) => true,
            RealAlgebraicNumber::Interval(rep) => rep.borrow().value.is_some(),
        }
    }

    /// The exact value, if known (numeric, or an interval side that has
    /// refined down to an exact rational root).
    pub fn exact_value(&self) -> Option<Rational> {
        match self {
            RealAlgebraicNumber::Numeric(v, _) => Some(v.clone()),
            RealAlgebraicNumber::Interval(rep) => rep.borrow().value.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.exact_value().is_some_and(|v| v.is_zero())
            || matches!(self, RealAlgebraicNumber::Interval(rep) if rep.borrow().interval.is_zero())
    }

    /// A polynomial having this number as a root: `x - v` for a numeric
    /// value, the live defining polynomial otherwise (remains valid even
    /// after an `Interval` number has refined down to an exact value, since
    /// that value was discovered as an actual root of `poly`).
    pub fn defining_polynomial(&self) -> Poly {
        match self {
            RealAlgebraicNumber::Numeric(v, _) => Poly::from_coeffs(vec![-v.clone(), Rational::ONE]),
            RealAlgebraicNumber::Interval(rep) => rep.borrow().poly.clone(),
        }
    }

    /// The number's current bracket: a single point once pinned down exactly,
    /// otherwise the live isolating interval.
    pub fn current_interval(&self) -> OpenInterval {
        match self {
            RealAlgebraicNumber::Numeric(v, _) => OpenInterval::point(v.clone()),
            RealAlgebraicNumber::Interval(rep) => {
                let rep = rep.borrow();
                match &rep.value {
                    Some(v) => OpenInterval::point(v.clone()),
                    None => rep.interval.clone(),
                }
            }
        }
    }

    /// Halves the isolating interval by one pivot, per `strategy`. No-op on
    /// an already-numeric value.
    pub fn refine(&self, strategy: RefinementStrategy) {
        let RealAlgebraicNumber::Interval(rep) = self else { return };
        let mut rep = rep.borrow_mut();
        if rep.value.is_some() {
            return;
        }
        refine_once(&mut rep, strategy);
    }

    /// Refines until the isolating interval no longer meets `n`. Returns
    /// `true` if `n` turned out to be this number's exact value (in which
    /// case the number is upgraded to numeric).
    pub fn refine_avoiding(&self, n: &Rational) -> bool {
        match self {
            RealAlgebraicNumber::Numeric(v, _) => v == n,
            RealAlgebraicNumber::Interval(rep) => {
                loop {
                    let mut r = rep.borrow_mut();
                    if let Some(v) = &r.value {
                        return v == n;
                    }
                    if !r.interval.meets(n) {
                        return false;
                    }
                    if r.poly.eval(n).is_zero() {
                        r.value = Some(n.clone());
                        return true;
                    }
                    refine_once(&mut r, RefinementStrategy::Generic);
                }
            }
        }
    }

    /// Sign of `q` evaluated at this number: rational sign if numeric,
    /// otherwise the Sturm-based sign of `q` over the isolating interval
    /// using the sequence `(p, p' * q)` (§4.3).
    pub fn sign_of(&self, q: &Poly) -> i32 {
        match self.exact_value() {
            Some(v) => q.eval(&v).sign(),
            None => {
                let RealAlgebraicNumber::Interval(rep) = self else { unreachable!() };
                let rep = rep.borrow();
                let pq = rep.poly.diff().mul(q);
                let seq = realclosure_poly::generalized_sturm_sequence(&rep.poly, &pq);
                let va = realclosure_poly::sign_variations(
                    &seq.iter().map(|p| p.sign_at(rep.interval.l())).collect::<Vec<_>>(),
                );
                let vb = realclosure_poly::sign_variations(
                    &seq.iter().map(|p| p.sign_at(rep.interval.r())).collect::<Vec<_>>(),
                );
                match va as i64 - vb as i64 {
                    0 => 0,
                    1 => 1,
                    -1 => -1,
                    other => unreachable!("sign variation difference {other} out of range for an isolating interval"),
                }
            }
        }
    }

    pub fn neg(&self) -> Self {
        match self {
            RealAlgebraicNumber::Numeric(v, is_root) => RealAlgebraicNumber::Numeric(-v.clone(), *is_root),
            RealAlgebraicNumber::Interval(rep) => {
                let rep = rep.borrow();
                if let Some(v) = &rep.value {
                    return RealAlgebraicNumber::Numeric(-v.clone(), rep.is_root);
                }
                let negated = negate_poly(&rep.poly);
                Self::from_isolating_interval(negated, rep.interval.neg(), rep.is_root)
            }
        }
    }

    pub fn inverse(&self) -> Result<Self, Error> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        match self {
            RealAlgebraicNumber::Numeric(v, is_root) => Ok(RealAlgebraicNumber::Numeric(Rational::ONE / v.clone(), *is_root)),
            RealAlgebraicNumber::Interval(rep) => {
                let rep = rep.borrow();
                if let Some(v) = &rep.value {
                    return Ok(RealAlgebraicNumber::Numeric(Rational::ONE / v.clone(), rep.is_root));
                }
                let reversed = reverse_poly(&rep.poly);
                let inverted = OpenInterval::new(
                    Rational::ONE / rep.interval.r().clone(),
                    Rational::ONE / rep.interval.l().clone(),
                );
                Ok(Self::from_isolating_interval(reversed, inverted, rep.is_root))
            }
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        match (self.exact_value(), other.exact_value()) {
            (Some(a), Some(b)) => RealAlgebraicNumber::Numeric(a + b, false),
            (Some(c), None) => add_constant(&c, other),
            (None, Some(c)) => add_constant(&c, self),
            (None, None) => add_interval_interval(self, other),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        match (self.exact_value(), other.exact_value()) {
            (Some(a), Some(b)) => RealAlgebraicNumber::Numeric(a * b, false),
            (Some(c), None) => scale_by_constant(&c, other),
            (None, Some(c)) => scale_by_constant(&c, self),
            (None, None) => mul_interval_interval(self, other),
        }
    }

    pub fn pow(&self, mut n: u32) -> Self {
        let mut base = self.clone();
        let mut result = RealAlgebraicNumber::Numeric(Rational::ONE, false);
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            n >>= 1;
        }
        result
    }

    pub fn partial_cmp_refining(&self, other: &Self) -> Ordering {
        let d = self.sub(other);
        sign_of_number(&d).cmp(&0)
    }

    pub fn equal_refining(&self, other: &Self) -> bool {
        self.partial_cmp_refining(other) == Ordering::Equal
    }

    /// An upper bound on the isolating interval's width, used by `SampleList`
    /// to decide when a `simplify()` pass should try to upgrade a sample.
    pub fn refinement_count(&self) -> u64 {
        match self {
            RealAlgebraicNumber::Numeric(..) => 0,
            RealAlgebraicNumber::Interval(rep) => rep.borrow().refinement_count,
        }
    }
}

/// Determines the sign of a (possibly still-interval) real-algebraic number
/// by refining until `0` is excluded from its interval, or confirmed as the
/// exact value. Always terminates: either `0` is the unique root (detected
/// in O(1) once the interval contains it) or the interval geometrically
/// shrinks past it.
fn sign_of_number(n: &RealAlgebraicNumber) -> i32 {
    loop {
        if let Some(v) = n.exact_value() {
            return v.sign();
        }
        let RealAlgebraicNumber::Interval(rep) = n else { unreachable!() };
        {
            let r = rep.borrow();
            if !r.interval.contains_zero() {
                return if r.interval.l() > &Rational::ZERO { 1 } else { -1 };
            }
            if r.poly.eval(&Rational::ZERO).is_zero() {
                drop(r);
                rep.borrow_mut().value = Some(Rational::ZERO);
                return 0;
            }
        }
        n.refine(RefinementStrategy::Generic);
    }
}

fn refine_once(rep: &mut IntervalRep, strategy: RefinementStrategy) {
    let (l, r) = (rep.interval.l().clone(), rep.interval.r().clone());
    let pivot = match strategy {
        RefinementStrategy::Generic | RefinementStrategy::BinaryNewton if rep.refinement_count == 0 => rep.interval.midpoint(),
        RefinementStrategy::Generic => rep.interval.midpoint(),
        RefinementStrategy::BinarySample => rep.interval.sample(),
        RefinementStrategy::BinaryNewton => newton_pivot(&rep.poly, &l, &r).unwrap_or_else(|| rep.interval.midpoint()),
        RefinementStrategy::BinaryMidpointSample => {
            if rep.refinement_count % 2 == 0 {
                rep.interval.midpoint()
            } else {
                rep.interval.sample()
            }
        }
    };
    rep.refinement_count += 1;
    if rep.poly.eval(&pivot).is_zero() {
        rep.value = Some(pivot);
        return;
    }
    let left_half = OpenInterval::new(l.clone(), pivot.clone());
    if realclosure_poly::root_count_open(&rep.sturm, left_half.l(), left_half.r()) == 1 {
        rep.interval = left_half;
    } else {
        rep.interval = OpenInterval::new(pivot, r);
    }
}

fn newton_pivot(p: &Poly, l: &Rational, r: &Rational) -> Option<Rational> {
    let m = (l + r) / Rational::TWO;
    let dp = p.diff();
    let slope = dp.eval(&m);
    if slope.is_zero() {
        return None;
    }
    let next = &m - p.eval(&m) / slope;
    if &next > l && &next < r { Some(next) } else { None }
}

/// Shifts the isolating interval away from zero by the construction
/// described in §4.3: if it straddles zero without the root being exactly
/// zero, pull whichever bound sits on the root's side in to `+-1/(1+||p||)`.
fn normalize_away_from_zero(poly: &Poly, interval: OpenInterval) -> OpenInterval {
    if !(interval.l() < &Rational::ZERO && interval.r() > &Rational::ZERO) {
        return interval;
    }
    let bound = Rational::ONE / (Rational::ONE + poly.maximum_norm());
    let sign_l = poly.sign_at(interval.l());
    let sign_zero = poly.sign_at(&Rational::ZERO);
    debug_assert_ne!(sign_zero, 0, "root at exactly zero must be handled before interval normalisation");
    if sign_l != sign_zero {
        OpenInterval::new(interval.l().clone(), -bound)
    } else {
        OpenInterval::new(bound, interval.r().clone())
    }
}

fn negate_poly(p: &Poly) -> Poly {
    let coeffs: Vec<Rational> = (0..=p.degree().unwrap_or(0))
        .map(|i| if i % 2 == 1 { -p.coeff(i) } else { p.coeff(i) })
        .collect();
    Poly::from_coeffs(coeffs)
}

fn reverse_poly(p: &Poly) -> Poly {
    let d = p.degree().unwrap();
    let coeffs: Vec<Rational> = (0..=d).map(|i| p.coeff(d - i)).collect();
    Poly::from_coeffs(coeffs)
}

/// `p(x - shift)`: roots of the result are `shift` plus the roots of `p`.
fn shift_poly(p: &Poly, shift: &Rational) -> Poly {
    let x_minus_shift = Poly::from_coeffs(vec![-shift.clone(), Rational::ONE]);
    let mut result = Poly::zero();
    let mut power = Poly::constant(Rational::ONE);
    for i in 0..=p.degree().unwrap_or(0) {
        result = result.add(&power.scalar_mul(&p.coeff(i)));
        power = power.mul(&x_minus_shift);
    }
    result
}

/// `c^deg(p) * p(x / c)`: roots of the result are `c` times the roots of `p`.
fn scale_poly(p: &Poly, c: &Rational) -> Poly {
    debug_assert!(!c.is_zero());
    let d = p.degree().unwrap();
    let coeffs: Vec<Rational> = (0..=d).map(|i| p.coeff(i) * c.pow((d - i) as u64)).collect();
    Poly::from_coeffs(coeffs)
}

fn to_bivariate_in_x(p: &Poly) -> MultivariatePolynomial {
    let terms: Vec<Term> = p
        .coeffs()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .map(|(i, c)| Term {
            coeff: c.clone(),
            monomial: Monomial::single(VX, i as u32),
        })
        .collect();
    MultivariatePolynomial::from_terms(terms)
}

fn to_bivariate_in_y(p: &Poly) -> MultivariatePolynomial {
    let terms: Vec<Term> = p
        .coeffs()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .map(|(i, c)| Term {
            coeff: c.clone(),
            monomial: Monomial::single(VY, i as u32),
        })
        .collect();
    MultivariatePolynomial::from_terms(terms)
}

/// `p(x - y)` as a bivariate polynomial, built by Horner-style accumulation
/// of `a_i * (x - y)^i`.
fn substitute_x_minus_y(p: &Poly) -> MultivariatePolynomial {
    let x_minus_y = MultivariatePolynomial::variable(VX).sub(&MultivariatePolynomial::variable(VY));
    let mut result = MultivariatePolynomial::zero();
    let mut power = MultivariatePolynomial::constant(Rational::ONE);
    for i in 0..=p.degree().unwrap_or(0) {
        result = result.add(&power.scalar_mul(&p.coeff(i)));
        power = power.mul(&x_minus_y);
    }
    result
}

/// `y^deg(p) * p(x / y)`, i.e. `sum_i a_i x^i y^(d-i)`.
fn homogenize_x_over_y(p: &Poly) -> MultivariatePolynomial {
    let d = p.degree().unwrap();
    let terms: Vec<Term> = (0..=d)
        .filter_map(|i| {
            let a_i = p.coeff(i);
            if a_i.is_zero() {
                return None;
            }
            Some(Term {
                coeff: a_i,
                monomial: Monomial::from_exponents([(VX, i as u32), (VY, (d - i) as u32)]),
            })
        })
        .collect();
    MultivariatePolynomial::from_terms(terms)
}

fn eliminate_y(bivariate: &MultivariatePolynomial, q_y: &MultivariatePolynomial) -> Poly {
    let lhs = bivariate.to_univariate(VY);
    let rhs = q_y.to_univariate(VY);
    let resultant = lhs.resultant(&rhs);
    let as_univariate_x = resultant.to_univariate(VX);
    Poly::try_from(&as_univariate_x).expect("resultant eliminating y must leave only x")
}

/// `c + other`, for `other` an interval number (`shift_poly(p, c)` has root
/// `c + root(p)`).
fn add_constant(c: &Rational, other: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    let RealAlgebraicNumber::Interval(rep) = other else {
        unreachable!("add_constant called with a numeric `other`")
    };
    let rep = rep.borrow();
    let shifted = shift_poly(&rep.poly, c);
    RealAlgebraicNumber::from_isolating_interval(shifted, rep.interval.add(&OpenInterval::point(c.clone())), false)
}

/// `c * other`, for `other` an interval number and `c != 0`.
fn scale_by_constant(c: &Rational, other: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    let RealAlgebraicNumber::Interval(rep) = other else {
        unreachable!("scale_by_constant called with a numeric `other`")
    };
    let rep = rep.borrow();
    let scaled = scale_poly(&rep.poly, c);
    RealAlgebraicNumber::from_isolating_interval(scaled, rep.interval.mul(&OpenInterval::point(c.clone())), false)
}

fn interval_rep_snapshot(n: &RealAlgebraicNumber) -> (Poly, OpenInterval) {
    let RealAlgebraicNumber::Interval(rep) = n else {
        unreachable!("interval_rep_snapshot called on a numeric value")
    };
    let rep = rep.borrow();
    (rep.poly.clone(), rep.interval.clone())
}

fn add_interval_interval(a: &RealAlgebraicNumber, b: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    let (pa, _) = interval_rep_snapshot(a);
    let (qb, _) = interval_rep_snapshot(b);
    let bivariate = substitute_x_minus_y(&pa);
    let q_y = to_bivariate_in_y(&qb);
    let resultant = eliminate_y(&bivariate, &q_y).square_free_part();
    refine_until_isolated(&resultant, a, b, |ia, ib| ia.add(ib), false)
}

fn mul_interval_interval(a: &RealAlgebraicNumber, b: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    let (pa, _) = interval_rep_snapshot(a);
    let (qb, _) = interval_rep_snapshot(b);
    let bivariate = homogenize_x_over_y(&pa);
    let q_y = to_bivariate_in_y(&qb);
    let resultant = eliminate_y(&bivariate, &q_y).square_free_part();
    refine_until_isolated(&resultant, a, b, |ia, ib| ia.mul(ib), false)
}

/// Shared tail of `add`/`mul` on two interval numbers: refine both operands
/// until `combine(I(a), I(b))` isolates exactly one root of `resultant`.
fn refine_until_isolated(
    resultant: &Poly,
    a: &RealAlgebraicNumber,
    b: &RealAlgebraicNumber,
    combine: impl Fn(&OpenInterval, &OpenInterval) -> OpenInterval,
    is_root: bool,
) -> RealAlgebraicNumber {
    let sturm = realclosure_poly::standard_sturm_sequence(resultant);
    loop {
        let ia = a.current_interval();
        let ib = b.current_interval();
        let bracket = combine(&ia, &ib);
        if bracket.is_point() {
            return RealAlgebraicNumber::from_rational(bracket.l().clone());
        }
        if realclosure_poly::root_count_open(&sturm, bracket.l(), bracket.r()) == 1 {
            return RealAlgebraicNumber::from_isolating_interval(resultant.clone(), bracket, is_root);
        }
        a.refine(RefinementStrategy::Generic);
        b.refine(RefinementStrategy::Generic);
    }
}

/// Strategy for halving an `Interval` number's bracket during refinement
/// (§6: `{Generic, BinarySample, BinaryNewton, BinaryMidpointSample}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefinementStrategy {
    #[default]
    Generic,
    BinarySample,
    BinaryNewton,
    BinaryMidpointSample,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> Rational {
        Rational::from(n)
    }

    fn sqrt2() -> RealAlgebraicNumber {
        let p = Poly::from_coeffs(vec![rat(-2), rat(0), rat(1)]);
        RealAlgebraicNumber::from_isolating_interval(p, OpenInterval::new(rat(1), rat(2)), true)
    }

    #[test]
    fn sqrt2_squared_is_two() {
        let s = sqrt2();
        let sq = s.mul(&s);
        assert!(sq.equal_refining(&RealAlgebraicNumber::from_rational(rat(2))));
    }

    #[test]
    fn sqrt2_is_positive_and_between_one_and_two() {
        let s = sqrt2();
        assert_eq!(sign_of_number(&s), 1);
        // 0 isn't sqrt(2): refine_avoiding returns false and excludes 0.
        assert!(!s.refine_avoiding(&rat(0)));
    }

    #[test]
    fn negation_of_sqrt2_is_negative() {
        let s = sqrt2();
        let neg = s.neg();
        assert_eq!(sign_of_number(&neg), -1);
    }

    #[test]
    fn inverse_of_two_is_one_half() {
        let two = RealAlgebraicNumber::from_rational(rat(2));
        let half = two.inverse().unwrap();
        assert_eq!(half.exact_value(), Some(Rational::ONE / rat(2)));
    }
}
