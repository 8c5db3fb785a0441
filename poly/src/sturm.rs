use crate::univariate::RationalUnivariatePolynomial as Poly;
use realclosure_nzq::Rational;

/// The standard Sturm sequence of `p`: `p0 = p`, `p1 = p'`,
/// `p_{i+1} = -prem(p_{i-1}, p_i)`, terminating at the first zero remainder
/// (`p_k`, a gcd of `p` and `p'` up to sign, is the last entry).
///
/// `standard_sturm_sequence` of the zero polynomial is the length-one
/// sequence `[0]` rather than an empty vector — callers always get at least
/// one entry to evaluate, matching the convention fixed for this crate (see
/// DESIGN.md's Open Question notes).
pub fn standard_sturm_sequence(p: &Poly) -> Vec<Poly> {
    if p.is_zero() {
        return vec![Poly::zero()];
    }
    generalized_sturm_sequence(p, &p.diff())
}

/// A Sturm-like sequence seeded at an arbitrary `(p0, p1)` pair instead of
/// `(p, p')` — used for the sign-on-polynomial test (§4.3), which needs the
/// sequence for `(p, p' * q)`. If either seed is zero, the sequence is just
/// the other (or `[0]` if both are), matching `standard_sturm_sequence`'s own
/// convention.
pub fn generalized_sturm_sequence(p0: &Poly, p1: &Poly) -> Vec<Poly> {
    if p0.is_zero() && p1.is_zero() {
        return vec![Poly::zero()];
    }
    if p0.is_zero() {
        return vec![p1.clone()];
    }
    if p1.is_zero() {
        return vec![p0.clone()];
    }
    let mut seq = vec![p0.clone(), p1.clone()];
    loop {
        let len = seq.len();
        if seq[len - 1].is_zero() {
            break;
        }
        let r = seq[len - 2].inner().prem(seq[len - 1].inner()).neg();
        let r = Poly::from_coeffs(r.coeffs().to_vec());
        if r.is_zero() {
            break;
        }
        seq.push(r);
    }
    seq
}

/// Number of sign changes in `values`, skipping zeros, per Sturm's theorem's
/// usual convention.
pub fn sign_variations(values: &[i32]) -> usize {
    let mut count = 0;
    let mut last: Option<i32> = None;
    for &v in values {
        if v == 0 {
            continue;
        }
        if let Some(l) = last {
            if l.signum() != v.signum() {
                count += 1;
            }
        }
        last = Some(v);
    }
    count
}

fn variations_at(seq: &[Poly], x: &Rational) -> usize {
    let signs: Vec<i32> = seq.iter().map(|p| p.sign_at(x)).collect();
    sign_variations(&signs)
}

/// Sturm's theorem: the number of distinct real roots of `p` in the open
/// interval `(a, b)`, given `a < b` and `p(a) != 0 != p(b)`.
pub fn root_count_open(seq: &[Poly], a: &Rational, b: &Rational) -> usize {
    debug_assert!(a < b);
    let va = variations_at(seq, a);
    let vb = variations_at(seq, b);
    debug_assert!(va >= vb);
    va - vb
}

/// Total number of distinct real roots of `p`, obtained from the sign
/// variations at `-infinity`/`+infinity` (the sign of each Sturm sequence
/// entry's leading coefficient, adjusted for degree parity at `-infinity`).
pub fn root_count_all(seq: &[Poly]) -> usize {
    let signs_pos_inf: Vec<i32> = seq
        .iter()
        .map(|p| p.leading_coeff().map(|c| c.sign()).unwrap_or(0))
        .collect();
    let signs_neg_inf: Vec<i32> = seq
        .iter()
        .map(|p| {
            let lc = p.leading_coeff().map(|c| c.sign()).unwrap_or(0);
            let deg = p.degree().unwrap_or(0);
            if deg % 2 == 1 { -lc } else { lc }
        })
        .collect();
    let v_neg = sign_variations(&signs_neg_inf);
    let v_pos = sign_variations(&signs_pos_inf);
    debug_assert!(v_neg >= v_pos);
    v_neg - v_pos
}

/// An interval guaranteed (by the Cauchy bound, possibly tightened by the
/// coefficient norms) to contain every real root of a nonzero polynomial.
pub fn cauchy_root_bound(p: &Poly) -> Rational {
    debug_assert!(!p.is_zero());
    let cauchy = p.cauchy_bound();
    let norm_bound = Rational::ONE + p.maximum_norm() / p.leading_coeff().unwrap().abs();
    if norm_bound < cauchy { norm_bound } else { cauchy }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn sturm_sequence_of_difference_of_squares() {
        // p = x^2 - 1, roots at -1 and 1.
        let p = Poly::from_coeffs(vec![rat(-1), rat(0), rat(1)]);
        let seq = standard_sturm_sequence(&p);
        assert_eq!(root_count_open(&seq, &rat(-2), &rat(2)), 2);
        assert_eq!(root_count_open(&seq, &rat(0), &rat(2)), 1);
        assert_eq!(root_count_all(&seq), 2);
    }

    #[test]
    fn sign_variations_counts_changes_and_skips_zeros() {
        assert_eq!(sign_variations(&[1, 0, -1, -1, 1]), 2);
        assert_eq!(sign_variations(&[1, 1, 1]), 0);
    }
}
