use crate::error::Error;
use crate::interval::{eval_under_assignment, OpenInterval};
use crate::number::RealAlgebraicNumber;
use realclosure_nzq::Rational;
use realclosure_poly::{RationalUnivariatePolynomial as Poly, Variable};
use std::collections::BTreeMap;

/// How `search_real_roots` picks separating points when an interval's Sturm
/// count is greater than one. `TernarySample` is the default (matches the
/// teacher's `RealAlgebraicNumberSettings` default).
/// See `original_source/src/lib/RealAlgebraicNumberFactory.cpp`'s
/// `searchRealRoots` for the five strategies this mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationStrategy {
    Simple,
    Generic,
    BinarySample,
    #[default]
    TernarySample,
    TernaryNewton,
}

/// All distinct real roots of `p`, isolated using `strategy`.
///
/// Squarefrees `p` first (repeated roots would otherwise break Sturm's sign-
/// variation count), pulls off an exact root at zero if present, then
/// recursively bisects `[-cauchy_bound, 0]` and `[0, cauchy_bound]`.
pub fn real_roots(p: &Poly, strategy: IsolationStrategy) -> Vec<RealAlgebraicNumber> {
    if p.degree().unwrap_or(0) == 0 {
        return Vec::new();
    }
    let sqfree = p.square_free_part();
    let zero_root = sqfree.has_zero_root();
    let q = if zero_root { sqfree.strip_zero_root() } else { sqfree };

    let mut roots = Vec::new();
    if q.degree().unwrap_or(0) > 0 {
        let seq = realclosure_poly::standard_sturm_sequence(&q);
        let bound = realclosure_poly::cauchy_root_bound(&q);
        search_real_roots(&q, &seq, &OpenInterval::new(-bound.clone(), Rational::ZERO), &mut roots, 0, strategy);
        search_real_roots(&q, &seq, &OpenInterval::new(Rational::ZERO, bound), &mut roots, 0, strategy);
    }
    if zero_root {
        roots.push(RealAlgebraicNumber::Numeric(Rational::ZERO, true));
    }
    roots
}

fn variations_at(seq: &[Poly], x: &Rational) -> usize {
    realclosure_poly::sign_variations(&seq.iter().map(|p| p.sign_at(x)).collect::<Vec<_>>())
}

fn isolate(p: &Poly, interval: OpenInterval) -> RealAlgebraicNumber {
    RealAlgebraicNumber::from_isolating_interval(p.clone(), interval, false)
}

/// Recursive divide-and-conquer search for the roots of `p` (whose Sturm
/// sequence is `seq`) inside `interval`, following `original_source`'s
/// `searchRealRoots`. `offset` corrects the Sturm-count-derived root count
/// for roots already counted at a shared boundary (in particular when a
/// pivot from an earlier split turned out to be an exact root).
fn search_real_roots(
    p: &Poly,
    seq: &[Poly],
    interval: &OpenInterval,
    roots: &mut Vec<RealAlgebraicNumber>,
    offset: i64,
    strategy: IsolationStrategy,
) {
    let var_left = variations_at(seq, interval.l());
    let var_right = variations_at(seq, interval.r());
    let root_count = var_left as i64 - var_right as i64 - offset;
    if root_count <= 0 {
        return;
    }

    let pivot = interval.midpoint();
    let middle_is_root = p.sign_at(&pivot) == 0;

    match strategy {
        IsolationStrategy::Simple => {
            if root_count == 1 {
                roots.push(isolate(p, interval.clone()));
                return;
            }
            let offset = if middle_is_root { offset + 1 } else { offset };
            let before = roots.len();
            search_real_roots(p, seq, &OpenInterval::new(interval.l().clone(), pivot.clone()), roots, offset, strategy);
            let mut middle_l = interval.l().clone();
            if middle_is_root && roots.len() > before {
                let last = roots.last().unwrap();
                last.refine_avoiding(&pivot);
                middle_l = last.current_interval().r().clone();
            }
            let before_right = roots.len();
            search_real_roots(p, seq, &OpenInterval::new(pivot.clone(), interval.r().clone()), roots, offset, strategy);
            if middle_is_root && roots.len() > before_right {
                let last = roots.last().unwrap();
                last.refine_avoiding(&pivot);
                let middle_r = last.current_interval().l().clone();
                roots.push(isolate(p, OpenInterval::new(middle_l, middle_r)));
            }
        }
        IsolationStrategy::Generic => {
            if root_count == 1 {
                if middle_is_root {
                    return;
                }
                roots.push(isolate(p, interval.clone()));
                return;
            }
            let offset = if middle_is_root { offset + 1 } else { offset };
            search_real_roots(p, seq, &OpenInterval::new(interval.l().clone(), pivot.clone()), roots, offset, strategy);
            search_real_roots(p, seq, &OpenInterval::new(pivot, interval.r().clone()), roots, offset, strategy);
        }
        IsolationStrategy::BinarySample => {
            if root_count == 1 {
                if middle_is_root {
                    return;
                }
                let sample = interval.sample();
                if p.sign_at(&sample) == 0 {
                    roots.push(RealAlgebraicNumber::Numeric(sample, true));
                } else {
                    roots.push(isolate(p, interval.clone()));
                }
                return;
            }
            let sample = interval.sample();
            let mut offset = offset;
            if p.sign_at(&sample) == 0 {
                roots.push(RealAlgebraicNumber::Numeric(sample.clone(), true));
                offset += 1;
            }
            search_real_roots(p, seq, &OpenInterval::new(interval.l().clone(), sample.clone()), roots, offset, strategy);
            search_real_roots(p, seq, &OpenInterval::new(sample, interval.r().clone()), roots, offset, strategy);
        }
        IsolationStrategy::TernarySample | IsolationStrategy::TernaryNewton => {
            if root_count == 1 {
                if middle_is_root {
                    return;
                }
                let candidate = ternary_pivot(strategy, p, &pivot, interval);
                if p.sign_at(&candidate) == 0 {
                    roots.push(RealAlgebraicNumber::Numeric(candidate, true));
                } else {
                    roots.push(isolate(p, interval.clone()));
                }
                return;
            }
            let candidate = ternary_pivot(strategy, p, &pivot, interval);
            if candidate == pivot {
                search_real_roots(p, seq, &OpenInterval::new(interval.l().clone(), pivot.clone()), roots, offset, strategy);
                search_real_roots(p, seq, &OpenInterval::new(pivot, interval.r().clone()), roots, offset, strategy);
                return;
            }
            let mut offset = offset;
            if p.sign_at(&candidate) == 0 {
                roots.push(RealAlgebraicNumber::Numeric(candidate.clone(), true));
                offset += 1;
            }
            if middle_is_root {
                offset += 1;
            }
            let (lo, hi) = if candidate < pivot { (candidate, pivot) } else { (pivot, candidate) };
            search_real_roots(p, seq, &OpenInterval::new(interval.l().clone(), lo.clone()), roots, offset, strategy);
            search_real_roots(p, seq, &OpenInterval::new(lo, hi.clone()), roots, offset, strategy);
            search_real_roots(p, seq, &OpenInterval::new(hi, interval.r().clone()), roots, offset, strategy);
        }
    }
}

fn ternary_pivot(strategy: IsolationStrategy, p: &Poly, pivot: &Rational, interval: &OpenInterval) -> Rational {
    match strategy {
        IsolationStrategy::TernarySample => interval.sample(),
        IsolationStrategy::TernaryNewton => newton_step(p, pivot, interval).unwrap_or_else(|| interval.sample()),
        _ => unreachable!("ternary_pivot called for a non-ternary strategy"),
    }
}

fn newton_step(p: &Poly, at: &Rational, interval: &OpenInterval) -> Option<Rational> {
    let dp = p.diff();
    let slope = dp.eval(at);
    if slope.is_zero() {
        return None;
    }
    let next = at - p.eval(at) / slope;
    if &next > interval.l() && &next < interval.r() { Some(next) } else { None }
}

/// The real roots of `p` (whose main variable is `main`) after plugging in
/// `assignment` for every other variable, found by eliminating each assigned
/// variable in turn via a resultant and isolating the roots of what remains
/// — `original_source`'s `realRootsEval`.
pub fn real_roots_eval(
    p: &realclosure_poly::ParametricUnivariatePolynomial,
    main: Variable,
    assignment: &BTreeMap<Variable, RealAlgebraicNumber>,
    strategy: IsolationStrategy,
) -> Result<Vec<RealAlgebraicNumber>, Error> {
    if assignment.contains_key(&main) {
        return Err(Error::VariableMismatch);
    }
    if assignment.is_empty() {
        let as_univariate = Poly::try_from(p)?;
        return Ok(real_roots(&as_univariate, strategy));
    }

    let mut intervals: BTreeMap<Variable, OpenInterval> = BTreeMap::new();
    let mut current = p.clone();
    for (&var, number) in assignment {
        let operand = univariate_as_multivariate(&number.defining_polynomial(), var);
        current = eliminate_variable(&current, main, var, &operand);
        intervals.insert(var, number.current_interval());
    }
    let res = Poly::try_from(&current)?;
    let sqfree = res.square_free_part();
    let zero_root = sqfree.has_zero_root();
    let q = if zero_root { sqfree.strip_zero_root() } else { sqfree };

    let mut roots = Vec::new();
    if q.degree().unwrap_or(0) > 0 {
        let seq = realclosure_poly::standard_sturm_sequence(&q);
        let bound = cauchy_bound_under_assignment(p, &intervals)?;
        search_real_roots(&q, &seq, &OpenInterval::new(-bound.clone(), Rational::ZERO), &mut roots, 0, strategy);
        search_real_roots(&q, &seq, &OpenInterval::new(Rational::ZERO, bound), &mut roots, 0, strategy);
    }
    if zero_root {
        roots.push(RealAlgebraicNumber::Numeric(Rational::ZERO, true));
    }
    Ok(roots)
}

fn univariate_as_multivariate(poly: &Poly, var: Variable) -> realclosure_poly::MultivariatePolynomial {
    let terms: Vec<realclosure_poly::Term> = poly
        .coeffs()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .map(|(i, c)| realclosure_poly::Term {
            coeff: c.clone(),
            monomial: realclosure_poly::Monomial::single(var, i as u32),
        })
        .collect();
    realclosure_poly::MultivariatePolynomial::from_terms(terms)
}

/// Eliminates `var` from `current` (a polynomial in `main` with coefficients
/// that may depend on `var` and other variables) against `operand`, a
/// polynomial purely in `var`, via a resultant in `var`. Mirrors
/// `RealAlgebraicNumber::add`'s bivariate-elimination trick, generalized to
/// an arbitrary pair of variables.
fn eliminate_variable(
    current: &realclosure_poly::ParametricUnivariatePolynomial,
    main: Variable,
    var: Variable,
    operand: &realclosure_poly::MultivariatePolynomial,
) -> realclosure_poly::ParametricUnivariatePolynomial {
    let as_mv = realclosure_poly::MultivariatePolynomial::from_univariate(main, current);
    let lhs = as_mv.to_univariate(var);
    let rhs = operand.to_univariate(var);
    let resultant = lhs.resultant(&rhs);
    resultant.to_univariate(main)
}

/// An interval guaranteed to contain every root of `p` once its
/// non-main-variable arguments are replaced by `assignment`: the raw Cauchy
/// bound `sum |a_i / a_d|` evaluated with interval arithmetic over each
/// coefficient, tightened to `min(raw, 1 + maxNorm / |a_d|)` exactly as
/// `cauchy_root_bound` tightens the non-assignment bound.
fn cauchy_bound_under_assignment(
    p: &realclosure_poly::ParametricUnivariatePolynomial,
    assignment: &BTreeMap<Variable, OpenInterval>,
) -> Result<Rational, Error> {
    let d = p.degree().ok_or(Error::DegreeTooLow)?;
    let lc_interval = eval_under_assignment(&p.coeff(d), assignment)?.abs();
    if lc_interval.is_zero() {
        return Err(Error::DegreeTooLow);
    }
    let mut acc = OpenInterval::zero();
    let mut max_norm = Rational::ZERO;
    for i in 0..=d {
        let c = eval_under_assignment(&p.coeff(i), assignment)?.abs();
        if *c.r() > max_norm {
            max_norm = c.r().clone();
        }
        if i < d {
            acc = acc.add(&c.div(&lc_interval)?);
        }
    }
    let raw_cauchy_bound = acc.r().clone();
    let norm_bound = Rational::ONE + (max_norm / lc_interval.r().clone());
    Ok(if norm_bound < raw_cauchy_bound { norm_bound } else { raw_cauchy_bound })
}

/// The common real roots of a collection of polynomials: the real roots of
/// the one with lowest degree, filtered to those on which every other
/// polynomial vanishes too.
pub fn common_real_roots(polys: &[Poly], strategy: IsolationStrategy) -> Vec<RealAlgebraicNumber> {
    let Some(p) = polys.iter().min_by_key(|p| p.degree().unwrap_or(0)) else {
        return Vec::new();
    };
    real_roots(p, strategy)
        .into_iter()
        .filter(|root| polys.iter().all(|q| root.sign_of(q) == 0))
        .collect()
}
