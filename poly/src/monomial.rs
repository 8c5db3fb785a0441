use crate::variable::Variable;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// An exponent vector over a finite set of variables, stored sparsely.
/// Variables absent from the map have exponent zero. `Variable`'s numeric
/// id doubles as the monomial order's variable priority (smaller id is more
/// significant), matching the convention `x0 > x1 > ... ` used throughout
/// the Groebner-basis and CAD layers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Monomial(BTreeMap<Variable, u32>);

impl Monomial {
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    pub fn single(v: Variable, exp: u32) -> Self {
        let mut m = BTreeMap::new();
        if exp > 0 {
            m.insert(v, exp);
        }
        Self(m)
    }

    pub fn from_exponents(exps: impl IntoIterator<Item = (Variable, u32)>) -> Self {
        let mut m = BTreeMap::new();
        for (v, e) in exps {
            if e > 0 {
                m.insert(v, e);
            }
        }
        Self(m)
    }

    pub fn exponent(&self, v: Variable) -> u32 {
        self.0.get(&v).copied().unwrap_or(0)
    }

    pub fn total_degree(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, u32)> + '_ {
        self.0.iter().map(|(&v, &e)| (v, e))
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut out = self.0.clone();
        for (&v, &e) in other.0.iter() {
            *out.entry(v).or_insert(0) += e;
        }
        Self(out)
    }

    pub fn divides(&self, other: &Self) -> bool {
        self.0.iter().all(|(v, &e)| other.exponent(*v) >= e)
    }

    /// `self / other`, assuming `other` divides `self`.
    pub fn div_exact(&self, other: &Self) -> Self {
        debug_assert!(other.divides(self));
        let mut out = self.0.clone();
        for (&v, &e) in other.0.iter() {
            match out.get_mut(&v) {
                Some(slot) if *slot > e => *slot -= e,
                Some(slot) if *slot == e => {
                    out.remove(&v);
                }
                _ => unreachable!("other does not divide self"),
            }
        }
        Self(out)
    }

    pub fn lcm(&self, other: &Self) -> Self {
        let mut out = self.0.clone();
        for (&v, &e) in other.0.iter() {
            let slot = out.entry(v).or_insert(0);
            *slot = (*slot).max(e);
        }
        Self(out)
    }

    pub fn gcd(&self, other: &Self) -> Self {
        let mut out = BTreeMap::new();
        for (&v, &e) in self.0.iter() {
            let g = e.min(other.exponent(v));
            if g > 0 {
                out.insert(v, g);
            }
        }
        Self(out)
    }
}

/// Monomial admissible orders used by the Groebner-basis engine (§5 GLOSSARY).
/// `GrLex` is this crate's default, matching `original_source`'s
/// `ProjectAndLiftingOrder`'s own grading-first convention for elimination
/// problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonomialOrder {
    /// Pure lexicographic: compares exponent-by-exponent in variable order.
    Lex,
    /// Graded lexicographic: total degree first, lexicographic to break ties.
    #[default]
    GrLex,
    /// Graded reverse lexicographic: total degree first, then the *last*
    /// differing variable (by priority) with reversed sign breaks ties.
    GrevLex,
}

impl MonomialOrder {
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            MonomialOrder::Lex => lex_compare(a, b),
            MonomialOrder::GrLex => a
                .total_degree()
                .cmp(&b.total_degree())
                .then_with(|| lex_compare(a, b)),
            MonomialOrder::GrevLex => a
                .total_degree()
                .cmp(&b.total_degree())
                .then_with(|| grevlex_tiebreak(a, b)),
        }
    }
}

fn lex_compare(a: &Monomial, b: &Monomial) -> Ordering {
    let mut vars: Vec<Variable> = a.variables().chain(b.variables()).collect();
    vars.sort_unstable();
    vars.dedup();
    for v in vars {
        match a.exponent(v).cmp(&b.exponent(v)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn grevlex_tiebreak(a: &Monomial, b: &Monomial) -> Ordering {
    let mut vars: Vec<Variable> = a.variables().chain(b.variables()).collect();
    vars.sort_unstable();
    vars.dedup();
    for v in vars.into_iter().rev() {
        match a.exponent(v).cmp(&b.exponent(v)) {
            Ordering::Equal => continue,
            other => return other.reverse(),
        }
    }
    Ordering::Equal
}
