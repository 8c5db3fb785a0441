//! Buchberger's algorithm over a pair queue, minimisation and reduction to
//! the reduced Groebner basis — `original_source/src/lib/Groebner.cpp`.

use realclosure_poly::{Monomial, MonomialOrder, MultivariatePolynomial};
use std::collections::VecDeque;

/// The reduced Groebner basis of the ideal generated by `polys`, under
/// `order`. If the ideal is the whole ring, returns the single constant `1`
/// (matching the teacher's early-out in `Groebner::solve` when an S-
/// polynomial's remainder turns out to be a nonzero constant).
pub fn groebner_basis(polys: &[MultivariatePolynomial], order: &MonomialOrder) -> Vec<MultivariatePolynomial> {
    let mut basis: Vec<MultivariatePolynomial> = polys.iter().filter(|p| !p.is_zero()).cloned().collect();
    if basis.is_empty() {
        return basis;
    }

    let mut pairs: VecDeque<(usize, usize)> = VecDeque::new();
    for i in 0..basis.len() {
        for j in (i + 1)..basis.len() {
            pairs.push_back((i, j));
        }
    }

    while let Some((i, j)) = pairs.pop_front() {
        let s = MultivariatePolynomial::s_polynomial(&basis[i], &basis[j], order);
        let remainder = s.reduce(&basis, order);
        if remainder.is_zero() {
            continue;
        }
        if remainder.is_constant() {
            return vec![remainder];
        }
        let new_index = basis.len();
        for k in 0..new_index {
            pairs.push_back((k, new_index));
        }
        basis.push(remainder);
    }

    reduce_basis(minimize(basis, order), order)
}

/// Drops any basis element whose leading monomial is divisible by another's
/// — equal leading monomials are broken by keeping the earlier index so a
/// basis never empties itself out by mutual "redundancy".
fn minimize(basis: Vec<MultivariatePolynomial>, order: &MonomialOrder) -> Vec<MultivariatePolynomial> {
    let leads: Vec<Monomial> = basis
        .iter()
        .map(|p| p.leading_monomial(order).expect("groebner basis elements are never zero"))
        .collect();
    let mut keep = vec![true; basis.len()];
    for i in 0..basis.len() {
        for (j, lead_j) in leads.iter().enumerate() {
            if i == j {
                continue;
            }
            let redundant = lead_j.divides(&leads[i]) && (leads[i] != *lead_j || j < i);
            if redundant {
                keep[i] = false;
                break;
            }
        }
    }
    basis.into_iter().zip(keep).filter_map(|(p, k)| k.then_some(p)).collect()
}

/// Reduces each minimal-basis element against the rest (already-reduced
/// ones), so every term of every polynomial is irreducible by the others.
fn reduce_basis(minimal: Vec<MultivariatePolynomial>, order: &MonomialOrder) -> Vec<MultivariatePolynomial> {
    let mut reduced: Vec<MultivariatePolynomial> = Vec::with_capacity(minimal.len());
    for (i, p) in minimal.iter().enumerate() {
        let others: Vec<MultivariatePolynomial> = minimal
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, q)| q.clone())
            .collect();
        reduced.push(p.reduce(&others, order).primitive_part());
    }
    reduced
}

/// The normal form of `p` modulo the ideal generated by `basis`: repeatedly
/// divides by whichever basis element's leading term divides the current
/// remainder's leading term, until nothing divides it.
pub fn multivariate_divide(p: &MultivariatePolynomial, basis: &[MultivariatePolynomial], order: &MonomialOrder) -> MultivariatePolynomial {
    p.reduce(basis, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use realclosure_nzq::Rational;
    use realclosure_poly::Variable;

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
    fn basis_of_two_lines_is_the_point() {
        // x - y = 0, x + y - 2 = 0 define the ideal of the point (1,1).
        let x = var(0);
        let y = var(1);
        let p1 = x.sub(&y);
        let p2 = x.add(&y).sub(&constant(2));
        let gb = groebner_basis(&[p1, p2], &MonomialOrder::GrLex);
        assert_eq!(gb.len(), 2);
        // x - 1 and y - 1 (in some order), up to scalar.
        for g in &gb {
            assert_eq!(g.leading_monomial(&MonomialOrder::GrLex).unwrap().total_degree(), 1);
        }
    }

    #[test]
    fn inconsistent_system_reduces_to_constant_ideal() {
        let x = var(0);
        let gb = groebner_basis(&[x.clone(), x.sub(&constant(1))], &MonomialOrder::GrLex);
        assert_eq!(gb.len(), 1);
        assert!(gb[0].is_constant());
    }

    #[test]
    fn multivariate_divide_reduces_modulo_basis() {
        let x = var(0);
        let y = var(1);
        let basis = vec![x.sub(&y)];
        let reduced = multivariate_divide(&x, &basis, &MonomialOrder::GrLex);
        assert_eq!(reduced, y);
    }
}
