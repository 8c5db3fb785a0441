//! Hong's elimination operator (§4.6): projects a set of polynomials with
//! main variable `main` down to a set free of `main`, plus the simplifying
//! post-processing passes (`simplify_by_*`) and bottom-level squarefreeing
//! and root-counting.

use crate::settings::Settings;
use realclosure_groebner::groebner_basis;
use realclosure_nzq::Rational;
use realclosure_poly::{MonomialOrder, MultivariatePolynomial, ParametricUnivariatePolynomial, PolySet, RationalUnivariatePolynomial, Variable};

/// `{p, p - lt(p), p - lt(p) - lt(p - lt(p)), ...}`, stopping once the
/// truncation is constant (the constant is included).
fn truncations(p: &ParametricUnivariatePolynomial) -> Vec<ParametricUnivariatePolynomial> {
    let mut out = Vec::new();
    let mut t = p.clone();
    loop {
        out.push(t.clone());
        let Some(d) = t.degree() else { break };
        if d == 0 {
            break;
        }
        let lc = t.leading_coeff().expect("nonzero degree implies a leading coefficient");
        t = t.sub(&ParametricUnivariatePolynomial::monomial(lc, d));
    }
    out
}

/// Hong's operator applied to one level's polynomials (already viewed as
/// univariate in `main`): truncation families' leading coefficients and
/// `(t, t')` PSCs, plus `(t(p), q)` PSCs for each unordered pair `{p, q}`
/// visited once, truncating only the lower-indexed side.
fn project_level(level: &[ParametricUnivariatePolynomial]) -> Vec<MultivariatePolynomial> {
    let mut out = Vec::new();
    for p in level {
        for t in truncations(p) {
            if let Some(lc) = t.leading_coeff() {
                out.push(lc);
            }
            out.extend(t.principal_subresultant_coefficients(&t.diff()));
        }
    }
    for i in 0..level.len() {
        for j in (i + 1)..level.len() {
            for t in truncations(&level[i]) {
                out.extend(t.principal_subresultant_coefficients(&level[j]));
            }
        }
    }
    out
}

/// Drops numeric constants and makes every surviving polynomial primitive —
/// the projection operator's mandatory post-processing, applied at every
/// level. Routed through `PolySet` (the `UnivariatePolynomialSet` analogue),
/// whose `remove_constants`/`make_primitive` this is grounded on.
fn drop_constants_and_make_primitive(polys: Vec<MultivariatePolynomial>) -> Vec<MultivariatePolynomial> {
    let mut set = PolySet::from_vec(polys);
    set.remove_constants();
    set.make_primitive();
    set.into_vec()
}

/// `p` re-viewed as a rational univariate polynomial in its sole remaining
/// variable `var`; `None` if `p` still depends on some other variable (a
/// caller bug at the bottom-most elimination level).
fn as_univariate_rational(p: &MultivariatePolynomial, var: Variable) -> Option<RationalUnivariatePolynomial> {
    let uni = p.to_univariate(var);
    let coeffs: Option<Vec<Rational>> = uni.coeffs().iter().map(|c| c.as_rational_constant()).collect();
    coeffs.map(RationalUnivariatePolynomial::from_coeffs)
}

/// The bottom-most level's two simplification passes, which need a genuine
/// univariate view since they rely on `RationalUnivariatePolynomial`'s
/// square-free part and real-root count.
fn simplify_bottom_level(polys: Vec<MultivariatePolynomial>, var: Variable, settings: &Settings) -> Vec<MultivariatePolynomial> {
    if !settings.simplify_by_squarefreeing && !settings.simplify_by_root_counting {
        return polys;
    }
    polys
        .into_iter()
        .filter_map(|p| {
            let Some(uni) = as_univariate_rational(&p, var) else {
                return Some(p);
            };
            let uni = if settings.simplify_by_squarefreeing {
                uni.square_free_part()
            } else {
                uni
            };
            if settings.simplify_by_root_counting {
                let degree = uni.degree().unwrap_or(0);
                let seq = realclosure_poly::standard_sturm_sequence(&uni);
                if degree % 2 == 0 && realclosure_poly::root_count_all(&seq) == 0 {
                    return None;
                }
            }
            Some(multivariate_from_univariate(&uni, var))
        })
        .collect()
}

fn multivariate_from_univariate(p: &RationalUnivariatePolynomial, var: Variable) -> MultivariatePolynomial {
    let terms: Vec<realclosure_poly::Term> = p
        .coeffs()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .map(|(i, c)| realclosure_poly::Term {
            coeff: c.clone(),
            monomial: realclosure_poly::Monomial::single(var, i as u32),
        })
        .collect();
    MultivariatePolynomial::from_terms(terms)
}

/// The total order `liftCheck`'s lifting-position queue walks the elimination
/// set under, per `settings.elimination_order`.
fn order_elimination_set(mut polys: Vec<MultivariatePolynomial>, order: crate::settings::EliminationOrder) -> Vec<MultivariatePolynomial> {
    use crate::settings::EliminationOrder::*;
    let degree_of = |p: &MultivariatePolynomial| p.terms().iter().map(|t| t.monomial.total_degree()).max().unwrap_or(0);
    match order {
        Default => {}
        LowDegreeFirst => polys.sort_by_key(degree_of),
        OddDegreeFirst => polys.sort_by_key(|p| (degree_of(p) % 2 == 0, degree_of(p))),
        EvenDegreeFirst => polys.sort_by_key(|p| (degree_of(p) % 2 == 1, degree_of(p))),
    }
    polys
}

/// Builds every elimination level (§3's CAD state, "vector of elimination
/// sets"), level 0 holding the input polynomials and level `n-1` holding
/// univariate polynomials in `variables[n-1]`.
pub fn build_elimination_sets(inputs: &[MultivariatePolynomial], variables: &[Variable], settings: &Settings) -> Vec<Vec<MultivariatePolynomial>> {
    let n = variables.len();
    let mut current = if settings.simplify_by_groebner {
        groebner_basis(inputs, &MonomialOrder::GrLex)
    } else {
        inputs.to_vec()
    };
    current = drop_constants_and_make_primitive(current);
    let mut levels = Vec::with_capacity(n);
    levels.push(order_elimination_set(current.clone(), settings.elimination_order));

    for k in 0..n.saturating_sub(1) {
        let main = variables[k];
        let as_parametric: Vec<ParametricUnivariatePolynomial> = current.iter().map(|p| p.to_univariate(main)).collect();
        let projected = drop_constants_and_make_primitive(project_level(&as_parametric));
        let is_bottom = k + 1 == n - 1;
        current = if is_bottom {
            simplify_bottom_level(projected, variables[n - 1], settings)
        } else {
            projected
        };
        levels.push(order_elimination_set(current.clone(), settings.elimination_order));
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> Rational {
        Rational::from(n)
    }

    fn var(i: u32) -> MultivariatePolynomial {
        MultivariatePolynomial::variable(Variable(i))
    }

    fn constant(n: i64) -> MultivariatePolynomial {
        MultivariatePolynomial::constant(rat(n))
    }

    #[test]
    fn circle_projects_to_a_univariate_set_with_a_root_at_plus_minus_one() {
        // x^2 + y^2 - 1 = 0, variables [x, y]: eliminating x should leave a
        // polynomial in y vanishing at y = +-1 (the circle's y-extent).
        let x = var(0);
        let y = var(1);
        let circle = x.mul(&x).add(&y.mul(&y)).sub(&constant(1));
        let settings = Settings::default();
        let levels = build_elimination_sets(&[circle], &[Variable(0), Variable(1)], &settings);
        assert_eq!(levels.len(), 2);
        assert!(!levels[1].is_empty());
        let vanishes_at_one = levels[1].iter().any(|p| {
            as_univariate_rational(p, Variable(1))
                .map(|uni| uni.sign_at(&rat(1)) == 0)
                .unwrap_or(false)
        });
        assert!(vanishes_at_one, "projection should contain a factor of the circle's y-extent, y^2 - 1");
    }

    #[test]
    fn drop_constants_and_make_primitive_removes_numeric_entries() {
        let x = var(0);
        let scaled = x.scalar_mul(&rat(4));
        let polys = drop_constants_and_make_primitive(vec![scaled, constant(7)]);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0], var(0));
    }

    #[test]
    fn low_degree_first_sorts_ascending() {
        let x = var(0);
        let cubic = x.pow(3);
        let linear = x.clone();
        let ordered = order_elimination_set(vec![cubic, linear.clone()], crate::settings::EliminationOrder::LowDegreeFirst);
        assert_eq!(ordered[0].leading_monomial(&MonomialOrder::Lex), linear.leading_monomial(&MonomialOrder::Lex));
    }

    #[test]
    fn truncations_of_a_quadratic_end_in_a_constant() {
        let main = Variable(0);
        let p = MultivariatePolynomial::variable(main).pow(2).add(&MultivariatePolynomial::constant(rat(3)));
        let parametric = p.to_univariate(main);
        let ts = truncations(&parametric);
        assert!(ts.last().unwrap().degree().unwrap_or(0) == 0);
        assert_eq!(ts[0].degree(), Some(2));
    }
}
