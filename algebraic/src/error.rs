use std::fmt;

/// Errors surfaced at the real-algebraic-number API boundary. An isolating
/// interval that turns out not to isolate is an internal bug, not a value
/// here — it is caught by `debug_assert!` where it would be detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Non-rational input where a rational polynomial or value was required.
    InvalidPolynomial,
    /// Two univariate polynomials (or a polynomial and a constraint) disagree
    /// on their variable.
    VariableMismatch,
    /// Interval division by an interval containing zero, or inversion of the
    /// zero real-algebraic number.
    DivisionByZero,
    /// A subresultant/evaluation path reached a degenerate case.
    DegreeTooLow,
    /// An evaluation needs more of the assignment than it was given.
    AssignmentIncomplete,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPolynomial => write!(f, "expression is not a polynomial of the expected kind"),
            Error::VariableMismatch => write!(f, "polynomials disagree on variable"),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::DegreeTooLow => write!(f, "degenerate degree for this operation"),
            Error::AssignmentIncomplete => write!(f, "assignment does not cover every free variable"),
        }
    }
}

impl std::error::Error for Error {}

impl From<realclosure_poly::Error> for Error {
    fn from(e: realclosure_poly::Error) -> Self {
        match e {
            realclosure_poly::Error::InvalidPolynomial => Error::InvalidPolynomial,
            realclosure_poly::Error::VariableMismatch => Error::VariableMismatch,
            realclosure_poly::Error::DivisionByZero => Error::DivisionByZero,
            realclosure_poly::Error::DegreeTooLow => Error::DegreeTooLow,
        }
    }
}
