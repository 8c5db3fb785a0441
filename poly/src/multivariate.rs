use crate::monomial::{Monomial, MonomialOrder};
use crate::ring::RingElement;
use crate::univariate::Polynomial;
use crate::variable::Variable;
use itertools::Itertools;
use realclosure_nzq::Rational;
use std::collections::BTreeSet;

/// One nonzero coefficient-monomial pair of a `MultivariatePolynomial`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coeff: Rational,
    pub monomial: Monomial,
}

/// A polynomial in any number of variables with rational coefficients,
/// stored as a dense list of nonzero terms. Terms are kept in a fixed
/// canonical order (`Lex`, descending) purely so that two equal polynomials
/// compare equal with `derive(PartialEq)` — callers needing a *leading
/// term* with respect to a Groebner monomial order pass that order
/// explicitly to `leading_term`, rather than this type carrying one around.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultivariatePolynomial {
    terms: Vec<Term>,
}

const CANONICAL_ORDER: MonomialOrder = MonomialOrder::Lex;

impl MultivariatePolynomial {
    pub fn zero() -> Self {
        Self { terms: vec![] }
    }

    pub fn constant(c: Rational) -> Self {
        Self::from_terms(vec![Term {
            coeff: c,
            monomial: Monomial::one(),
        }])
    }

    pub fn variable(v: Variable) -> Self {
        Self::from_terms(vec![Term {
            coeff: Rational::ONE,
            monomial: Monomial::single(v, 1),
        }])
    }

    pub fn monomial_term(coeff: Rational, monomial: Monomial) -> Self {
        Self::from_terms(vec![Term { coeff, monomial }])
    }

    /// Combines duplicate monomials, drops zero coefficients, and sorts into
    /// canonical order. The normal-form entry point every constructor goes
    /// through.
    pub fn from_terms(terms: Vec<Term>) -> Self {
        let mut combined: Vec<Term> = Vec::with_capacity(terms.len());
        for t in terms {
            if let Some(existing) = combined.iter_mut().find(|e: &&mut Term| e.monomial == t.monomial) {
                existing.coeff = &existing.coeff + &t.coeff;
            } else {
                combined.push(t);
            }
        }
        combined.retain(|t| !t.coeff.is_zero());
        combined.sort_by(|a, b| CANONICAL_ORDER.compare(&b.monomial, &a.monomial));
        Self { terms: combined }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty() || (self.terms.len() == 1 && self.terms[0].monomial.is_one())
    }

    pub fn as_rational_constant(&self) -> Option<Rational> {
        if self.terms.is_empty() {
            Some(Rational::ZERO)
        } else if self.terms.len() == 1 && self.terms[0].monomial.is_one() {
            Some(self.terms[0].coeff.clone())
        } else {
            None
        }
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        self.terms.iter().flat_map(|t| t.monomial.variables()).collect()
    }

    pub fn leading_term(&self, order: &MonomialOrder) -> Option<&Term> {
        self.terms
            .iter()
            .max_by(|a, b| order.compare(&a.monomial, &b.monomial))
    }

    pub fn leading_monomial(&self, order: &MonomialOrder) -> Option<Monomial> {
        self.leading_term(order).map(|t| t.monomial.clone())
    }

    pub fn leading_coeff(&self, order: &MonomialOrder) -> Option<Rational> {
        self.leading_term(order).map(|t| t.coeff.clone())
    }

    pub fn neg(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term {
                    coeff: -t.coeff.clone(),
                    monomial: t.monomial.clone(),
                })
                .collect(),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Self::from_terms(terms)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scalar_mul(&self, s: &Rational) -> Self {
        if s.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term {
                    coeff: &t.coeff * s,
                    monomial: t.monomial.clone(),
                })
                .collect(),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let terms = self
            .terms
            .iter()
            .cartesian_product(other.terms.iter())
            .map(|(a, b)| Term {
                coeff: &a.coeff * &b.coeff,
                monomial: a.monomial.mul(&b.monomial),
            })
            .collect();
        Self::from_terms(terms)
    }

    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::constant(Rational::ONE);
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }
        result
    }

    /// Exact division of `self` by a single divisor that is known (by the
    /// caller's own invariant, not checked here beyond a `debug_assert`) to
    /// divide it exactly in the polynomial ring. Since leading monomials are
    /// multiplicative under any admissible order (`LM(fg) = LM(f)LM(g)`),
    /// ordinary single-divisor reduction under a fixed order terminates with
    /// zero remainder whenever true exact division exists.
    pub fn exact_div(&self, divisor: &Self) -> Self {
        debug_assert!(!divisor.is_zero());
        let order = MonomialOrder::GrLex;
        let div_lt = divisor.leading_term(&order).unwrap();
        let mut rest = self.clone();
        let mut quotient = Self::zero();
        while !rest.is_zero() {
            let rest_lt = rest.leading_term(&order).unwrap().clone();
            assert!(
                div_lt.monomial.divides(&rest_lt.monomial),
                "exact_div called on a non-dividing pair"
            );
            let factor = Term {
                coeff: &rest_lt.coeff / &div_lt.coeff,
                monomial: rest_lt.monomial.div_exact(&div_lt.monomial),
            };
            let factor_poly = Self::monomial_term(factor.coeff.clone(), factor.monomial.clone());
            rest = rest.sub(&factor_poly.mul(divisor));
            quotient = quotient.add(&factor_poly);
        }
        quotient
    }

    /// Full multivariate division by a list of divisors (the textbook
    /// "division algorithm" used both directly and as the reduction step of
    /// Buchberger's algorithm): returns `(quotients, remainder)` with
    /// `self = sum(q_i * divisors[i]) + remainder`, and no term of
    /// `remainder` divisible by any `divisors[i]`'s leading term.
    pub fn divide_by_set(&self, divisors: &[Self], order: &MonomialOrder) -> (Vec<Self>, Self) {
        let mut quotients = vec![Self::zero(); divisors.len()];
        let mut remainder = Self::zero();
        let mut rest = self.clone();
        'outer: while !rest.is_zero() {
            let rest_lt = rest.leading_term(order).unwrap().clone();
            for (i, d) in divisors.iter().enumerate() {
                if d.is_zero() {
                    continue;
                }
                let d_lt = d.leading_term(order).unwrap();
                if d_lt.monomial.divides(&rest_lt.monomial) {
                    let factor = Term {
                        coeff: &rest_lt.coeff / &d_lt.coeff,
                        monomial: rest_lt.monomial.div_exact(&d_lt.monomial),
                    };
                    let factor_poly = Self::monomial_term(factor.coeff, factor.monomial);
                    rest = rest.sub(&factor_poly.mul(d));
                    quotients[i] = quotients[i].add(&factor_poly);
                    continue 'outer;
                }
            }
            remainder = remainder.add(&Self::from_terms(vec![rest_lt.clone()]));
            rest = rest.sub(&Self::from_terms(vec![rest_lt]));
        }
        (quotients, remainder)
    }

    pub fn reduce(&self, divisors: &[Self], order: &MonomialOrder) -> Self {
        self.divide_by_set(divisors, order).1
    }

    /// The S-polynomial of `f` and `g` with respect to `order`: cancels
    /// leading terms via their monomial lcm.
    pub fn s_polynomial(f: &Self, g: &Self, order: &MonomialOrder) -> Self {
        let f_lt = f.leading_term(order).expect("s_polynomial of zero polynomial");
        let g_lt = g.leading_term(order).expect("s_polynomial of zero polynomial");
        let lcm = f_lt.monomial.lcm(&g_lt.monomial);
        let f_factor = Self::monomial_term(
            g_lt.coeff.clone(),
            lcm.div_exact(&f_lt.monomial),
        );
        let g_factor = Self::monomial_term(
            f_lt.coeff.clone(),
            lcm.div_exact(&g_lt.monomial),
        );
        f_factor.mul(f).sub(&g_factor.mul(g))
    }

    /// `gcd(numerators)/lcm(denominators)` over all coefficients, signed by
    /// the canonical leading term — same convention as
    /// `RationalUnivariatePolynomial::content`.
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return Rational::ZERO;
        }
        let mut g = Rational::ZERO;
        for t in &self.terms {
            g = Rational::gcd(&g, &t.coeff);
        }
        if self.terms[0].coeff.sign() < 0 {
            -g
        } else {
            g
        }
    }

    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.scalar_mul(&(Rational::ONE / self.content()))
    }

    /// Re-views `self` as a univariate polynomial in `main`, with
    /// coefficients that are multivariate polynomials in the remaining
    /// variables — the representation Hong projection and evaluation-based
    /// isolation both need (§3, §4.6).
    pub fn to_univariate(&self, main: Variable) -> Polynomial<MultivariatePolynomial> {
        if self.is_zero() {
            return Polynomial::zero();
        }
        let degree = self
            .terms
            .iter()
            .map(|t| t.monomial.exponent(main))
            .max()
            .unwrap() as usize;
        let mut coeffs = vec![MultivariatePolynomial::zero(); degree + 1];
        for t in &self.terms {
            let d = t.monomial.exponent(main) as usize;
            let rest = Monomial::from_exponents(t.monomial.iter().filter(|&(v, _)| v != main));
            coeffs[d] = coeffs[d].add(&MultivariatePolynomial::monomial_term(t.coeff.clone(), rest));
        }
        Polynomial::from_coeffs(coeffs)
    }

    pub fn from_univariate(main: Variable, p: &Polynomial<MultivariatePolynomial>) -> Self {
        let mut acc = Self::zero();
        for (d, c) in p.coeffs().iter().enumerate() {
            let x_d = Self::monomial_term(Rational::ONE, Monomial::single(main, d as u32));
            acc = acc.add(&c.mul(&x_d));
        }
        acc
    }
}

impl RingElement for MultivariatePolynomial {
    fn ring_zero() -> Self {
        Self::zero()
    }
    fn ring_one() -> Self {
        Self::constant(Rational::ONE)
    }
    fn ring_is_zero(&self) -> bool {
        self.is_zero()
    }
    fn ring_neg(&self) -> Self {
        self.neg()
    }
    fn ring_add(&self, rhs: &Self) -> Self {
        self.add(rhs)
    }
    fn ring_sub(&self, rhs: &Self) -> Self {
        self.sub(rhs)
    }
    fn ring_mul(&self, rhs: &Self) -> Self {
        self.mul(rhs)
    }
    fn ring_exact_div(&self, rhs: &Self) -> Self {
        self.exact_div(rhs)
    }
    fn ring_from_i64(n: i64) -> Self {
        Self::constant(Rational::from(n))
    }
}

/// A set of multivariate polynomials with no distinguished order (§4.6's
/// `UnivariatePolynomialSet` generalised to many variables): used to collect
/// a projection level's polynomials and by Groebner-basis post-processing.
#[derive(Debug, Clone, Default)]
pub struct PolySet {
    polys: Vec<MultivariatePolynomial>,
}

impl PolySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(polys: Vec<MultivariatePolynomial>) -> Self {
        Self { polys }
    }

    pub fn insert(&mut self, p: MultivariatePolynomial) {
        if p.is_zero() || self.polys.contains(&p) {
            return;
        }
        self.polys.push(p);
    }

    pub fn remove_constants(&mut self) {
        self.polys.retain(|p| !p.is_constant());
    }

    pub fn make_primitive(&mut self) {
        for p in &mut self.polys {
            *p = p.primitive_part();
        }
    }

    pub fn polys(&self) -> &[MultivariatePolynomial] {
        &self.polys
    }

    pub fn into_vec(self) -> Vec<MultivariatePolynomial> {
        self.polys
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MultivariatePolynomial> {
        self.polys.iter()
    }
}
