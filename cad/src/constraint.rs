use crate::error::Error;
use realclosure_algebraic::{eval_under_assignment, OpenInterval, RealAlgebraicNumber, RealAlgebraicPoint, RefinementStrategy};
use realclosure_poly::{MultivariatePolynomial, Variable};
use std::collections::BTreeMap;

/// The sign a constraint compares a polynomial's value against (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    fn matches(self, s: i32) -> bool {
        match self {
            Sign::Negative => s < 0,
            Sign::Zero => s == 0,
            Sign::Positive => s > 0,
        }
    }
}

/// A sign condition `p.sgn(v) == s` (or `!= s` when `negated`) over an
/// explicit, ordered list of variables.
#[derive(Debug, Clone)]
pub struct Constraint {
    poly: MultivariatePolynomial,
    sign: Sign,
    variables: Vec<Variable>,
    negated: bool,
}

impl Constraint {
    /// `VariableMismatch` if `poly` depends on a variable outside `variables`
    /// (mirrors `Constraint::checkVariables` in the teacher).
    pub fn new(poly: MultivariatePolynomial, sign: Sign, variables: Vec<Variable>, negated: bool) -> Result<Self, Error> {
        if !poly.variables().iter().all(|v| variables.contains(v)) {
            return Err(Error::VariableMismatch);
        }
        Ok(Self { poly, sign, variables, negated })
    }

    pub fn poly(&self) -> &MultivariatePolynomial {
        &self.poly
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Substitutes `point`'s components for `self.variables()` in ascending
    /// order (the point may have more components than the constraint has
    /// variables) and compares the resulting sign against `self.sign`.
    pub fn satisfied_by(&self, point: &RealAlgebraicPoint) -> bool {
        debug_assert!(
            self.variables.len() <= point.dim(),
            "point has fewer components than the constraint has variables"
        );
        let assignment: BTreeMap<Variable, RealAlgebraicNumber> = self
            .variables
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, point[i].clone()))
            .collect();
        let s = sign_under_assignment(&self.poly, &assignment);
        if self.negated { !self.sign.matches(s) } else { self.sign.matches(s) }
    }
}

/// The sign of `poly` evaluated at `assignment`, determined by interval
/// arithmetic refined until the image excludes (or pins down) zero — the
/// multivariate analogue of `RealAlgebraicNumber`'s own `sign_of_number`
/// refine-loop.
fn sign_under_assignment(poly: &MultivariatePolynomial, assignment: &BTreeMap<Variable, RealAlgebraicNumber>) -> i32 {
    loop {
        let intervals: BTreeMap<Variable, OpenInterval> = assignment.iter().map(|(&v, n)| (v, n.current_interval())).collect();
        let bound = eval_under_assignment(poly, &intervals).expect("constraint variables cover every free variable of its polynomial");
        if !bound.contains_zero() {
            return bound.l().sign();
        }
        if assignment.values().all(RealAlgebraicNumber::is_numeric) {
            return 0;
        }
        for n in assignment.values() {
            if !n.is_numeric() {
                n.refine(RefinementStrategy::default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realclosure_nzq::Rational;

    fn rat(n: i64) -> RealAlgebraicNumber {
        RealAlgebraicNumber::from_rational(Rational::from(n))
    }

    #[test]
    fn positive_constraint_satisfied_by_a_positive_point() {
        let x = MultivariatePolynomial::variable(Variable(0));
        let c = Constraint::new(x, Sign::Positive, vec![Variable(0)], false).unwrap();
        let point = RealAlgebraicPoint::from_coordinates(vec![rat(3)]);
        assert!(c.satisfied_by(&point));
        let point = RealAlgebraicPoint::from_coordinates(vec![rat(-3)]);
        assert!(!c.satisfied_by(&point));
    }

    #[test]
    fn negated_constraint_inverts_the_sign_check() {
        let x = MultivariatePolynomial::variable(Variable(0));
        let c = Constraint::new(x, Sign::Zero, vec![Variable(0)], true).unwrap();
        let point = RealAlgebraicPoint::from_coordinates(vec![rat(0)]);
        assert!(!c.satisfied_by(&point));
        let point = RealAlgebraicPoint::from_coordinates(vec![rat(5)]);
        assert!(c.satisfied_by(&point));
    }

    #[test]
    fn constraint_over_unlisted_variable_is_rejected() {
        let xy = MultivariatePolynomial::variable(Variable(0)).add(&MultivariatePolynomial::variable(Variable(1)));
        let result = Constraint::new(xy, Sign::Zero, vec![Variable(0)], false);
        assert_eq!(result.unwrap_err(), Error::VariableMismatch);
    }
}
