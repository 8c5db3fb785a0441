//! Cylindrical algebraic decomposition over the rationals: Hong's
//! elimination operator, an incrementally-explored sample tree, and the
//! `liftCheck` satisfiability search (§3, §4.6-4.8 of the CAD module).

mod cad;
mod constraint;
mod error;
mod project;
mod sample_list;
mod settings;
mod tree;

pub use cad::Cad;
pub use constraint::{Constraint, Sign};
pub use error::Error;
pub use settings::{EliminationOrder, SamplePreference, Settings};

#[cfg(test)]
mod tests {
    use super::*;
    use realclosure_nzq::Rational;
    use realclosure_poly::{MultivariatePolynomial, Variable};

    fn constant(n: i64) -> MultivariatePolynomial {
        MultivariatePolynomial::constant(Rational::from(n))
    }

    fn var(i: u32) -> MultivariatePolynomial {
        MultivariatePolynomial::variable(Variable(i))
    }

    #[test]
    fn unit_circle_has_a_point_with_positive_x_and_y() {
        // x^2 + y^2 - 1 = 0, x > 0, y > 0: satisfiable (e.g. near (0.7, 0.7)).
        let x = var(0);
        let y = var(1);
        let circle = x.mul(&x).add(&y.mul(&y)).sub(&constant(1));
        let variables = vec![Variable(0), Variable(1)];
        let mut cad = Cad::new(vec![circle.clone()], variables.clone(), Settings::default());
        let eq = Constraint::new(circle, Sign::Zero, variables.clone(), false).unwrap();
        let x_pos = Constraint::new(var(0), Sign::Positive, variables.clone(), false).unwrap();
        let y_pos = Constraint::new(var(1), Sign::Positive, variables, false).unwrap();
        let witness = cad.check(&[eq, x_pos, y_pos]);
        assert!(witness.is_some());
    }

    #[test]
    fn empty_circle_interior_outside_unit_disc_is_unsatisfiable() {
        // x^2 + y^2 - 1 = 0 together with x^2 + y^2 < 0 is never satisfiable.
        let x = var(0);
        let y = var(1);
        let circle = x.mul(&x).add(&y.mul(&y)).sub(&constant(1));
        let sum_sq = var(0).mul(&var(0)).add(&var(1).mul(&var(1)));
        let variables = vec![Variable(0), Variable(1)];
        let mut cad = Cad::new(vec![circle.clone()], variables.clone(), Settings::default());
        let eq = Constraint::new(circle, Sign::Zero, variables.clone(), false).unwrap();
        let impossible = Constraint::new(sum_sq, Sign::Negative, variables, false).unwrap();
        let witness = cad.check(&[eq, impossible]);
        assert!(witness.is_none());
        assert!(cad.is_complete());
    }

    #[test]
    fn a_single_linear_equation_is_satisfiable() {
        // x - 3 = 0.
        let x = var(0);
        let poly = x.sub(&constant(3));
        let variables = vec![Variable(0)];
        let mut cad = Cad::new(vec![poly.clone()], variables.clone(), Settings::default());
        let eq = Constraint::new(poly, Sign::Zero, variables, false).unwrap();
        let witness = cad.check(&[eq]).expect("x = 3 satisfies x - 3 = 0");
        assert_eq!(witness.coordinates()[0].exact_value(), Some(Rational::from(3)));
    }
}
