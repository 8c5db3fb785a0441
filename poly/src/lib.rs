pub mod error;
pub mod monomial;
pub mod multivariate;
pub mod ring;
pub mod sturm;
pub mod univariate;
pub mod variable;

pub use error::Error;
pub use monomial::{Monomial, MonomialOrder};
pub use multivariate::{MultivariatePolynomial, PolySet, Term};
pub use ring::{FieldElement, RingElement};
pub use sturm::{
    cauchy_root_bound, generalized_sturm_sequence, root_count_all, root_count_open, sign_variations,
    standard_sturm_sequence,
};
pub use univariate::{ParametricUnivariatePolynomial, Polynomial, RationalUnivariatePolynomial};
pub use variable::Variable;
