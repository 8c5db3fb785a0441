//! Re-exports every component crate under one name: exact rational and
//! integer arithmetic (`nzq`), univariate/multivariate polynomials (`poly`),
//! real-algebraic numbers and points (`algebraic`), Groebner bases
//! (`groebner`), and cylindrical algebraic decomposition (`cad`).

pub use realclosure_algebraic as algebraic;
pub use realclosure_cad as cad;
pub use realclosure_groebner as groebner;
pub use realclosure_nzq as nzq;
pub use realclosure_poly as poly;
