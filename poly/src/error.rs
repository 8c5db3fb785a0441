use std::fmt;

/// Errors surfaced at the polynomial-layer API boundary. Internal invariant
/// violations (an isolating interval that does not isolate, a subresultant
/// division that is not exact) are not represented here: they are bugs and are
/// caught by `debug_assert!` at the point of detection instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The given expression/coefficients do not form a polynomial of the
    /// expected kind (e.g. a rational-coefficient constructor was handed
    /// coefficients depending on other variables).
    InvalidPolynomial,
    /// An operation combined two polynomials that disagree on main variable,
    /// or a polynomial's variable set does not match what the caller expected.
    VariableMismatch,
    /// Division by the zero polynomial or zero interval.
    DivisionByZero,
    /// A subresultant/evaluation path reached a degenerate case the caller
    /// is not prepared to handle (e.g. resultant of two constants).
    DegreeTooLow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPolynomial => write!(f, "expression is not a polynomial of the expected kind"),
            Error::VariableMismatch => write!(f, "polynomials disagree on variable"),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::DegreeTooLow => write!(f, "degenerate degree for this operation"),
        }
    }
}

impl std::error::Error for Error {}
