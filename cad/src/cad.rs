//! The CAD object itself: elimination sets, sample tree and `liftCheck`
//! (§4.7). `Cad::check` is the entry point a host program calls.

use crate::constraint::Constraint;
use crate::project;
use crate::sample_list::SampleList;
use crate::settings::{SamplePreference, Settings};
use crate::tree::SampleNode;
use realclosure_algebraic::{real_roots_eval, OpenInterval, RealAlgebraicNumber, RealAlgebraicPoint, RefinementStrategy};
use realclosure_nzq::Rational;
use realclosure_poly::{MultivariatePolynomial, Variable};
use std::collections::BTreeMap;

pub struct Cad {
    inputs: Vec<MultivariatePolynomial>,
    variables: Vec<Variable>,
    elimination_sets: Vec<Vec<MultivariatePolynomial>>,
    tree: SampleNode,
    complete: bool,
    settings: Settings,
}

impl Cad {
    pub fn new(polynomials: Vec<MultivariatePolynomial>, variables: Vec<Variable>, settings: Settings) -> Self {
        let elimination_sets = project::build_elimination_sets(&polynomials, &variables, &settings);
        Self {
            inputs: polynomials,
            variables,
            elimination_sets,
            tree: SampleNode::root(),
            complete: false,
            settings,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn elimination_sets(&self) -> &[Vec<MultivariatePolynomial>] {
        &self.elimination_sets
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// All full-dimensional sample points produced so far (the tree's
    /// depth-`n` leaves), in tree order.
    pub fn samples(&self) -> Vec<RealAlgebraicPoint> {
        let n = self.variables.len();
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_leaves(&self.tree, &mut path, n, &mut out);
        out
    }

    /// `check(constraints)`: the sample tree's current complete leaves first
    /// (fast path), then `liftCheck` from the root if none satisfy and the
    /// CAD is not yet complete.
    pub fn check(&mut self, constraints: &[Constraint]) -> Option<RealAlgebraicPoint> {
        let n = self.variables.len();
        if let Some(p) = find_satisfying_leaf(&self.tree, &mut Vec::new(), n, constraints) {
            return Some(p);
        }
        if self.complete {
            return None;
        }
        let mut partial = Vec::new();
        let mut witness = None;
        lift_check(
            &mut self.tree,
            n,
            &self.elimination_sets,
            &self.variables,
            &self.settings,
            &mut partial,
            constraints,
            &mut witness,
            &mut self.complete,
        );
        witness
    }

    /// Merges `new_variables` in front of the existing order, reprojects
    /// every elimination level from scratch, and resets the lifting-position
    /// queues and completeness flag. The sample tree itself is kept — its
    /// existing nodes still describe valid (variable, value) pairs under the
    /// new variable order (see `tree.rs`'s depth convention) and the next
    /// `check` resumes producing fresh samples under them.
    pub fn add_polynomials(&mut self, polys: Vec<MultivariatePolynomial>, new_variables: Vec<Variable>) {
        let mut merged: Vec<Variable> = new_variables.into_iter().filter(|v| !self.variables.contains(v)).collect();
        merged.extend(self.variables.iter().copied());
        self.variables = merged;
        self.inputs.extend(polys);
        self.elimination_sets = project::build_elimination_sets(&self.inputs, &self.variables, &self.settings);
        self.complete = false;
        reset_lifting_queues(&mut self.tree);
    }
}

fn reset_lifting_queues(node: &mut SampleNode) {
    node.lifting_queue.clear();
    node.lifting_queue_len = 0;
    for child in node.children.iter_mut() {
        reset_lifting_queues(child);
    }
}

fn collect_leaves(node: &SampleNode, path: &mut Vec<RealAlgebraicNumber>, depth_remaining: usize, out: &mut Vec<RealAlgebraicPoint>) {
    if depth_remaining == 0 {
        out.push(RealAlgebraicPoint::from_coordinates(path.iter().rev().cloned().collect()));
        return;
    }
    for child in &node.children {
        path.push(child.value.clone().expect("non-root node"));
        collect_leaves(child, path, depth_remaining - 1, out);
        path.pop();
    }
}

fn find_satisfying_leaf(
    node: &SampleNode,
    path: &mut Vec<RealAlgebraicNumber>,
    depth_remaining: usize,
    constraints: &[Constraint],
) -> Option<RealAlgebraicPoint> {
    if depth_remaining == 0 {
        let point = RealAlgebraicPoint::from_coordinates(path.iter().rev().cloned().collect());
        return if constraints.iter().all(|c| c.satisfied_by(&point)) {
            Some(point)
        } else {
            None
        };
    }
    for child in &node.children {
        path.push(child.value.clone().expect("non-root node"));
        if let Some(p) = find_satisfying_leaf(child, path, depth_remaining - 1, constraints) {
            path.pop();
            return Some(p);
        }
        path.pop();
    }
    None
}

/// The central recursive routine (§4.7). `level` is the elimination level
/// just finished by the *caller* (or `n` for the initial call); `node` is
/// the tree node whose children this call produces and consumes samples
/// under.
#[allow(clippy::too_many_arguments)]
fn lift_check(
    node: &mut SampleNode,
    level: usize,
    elimination_sets: &[Vec<MultivariatePolynomial>],
    variables: &[Variable],
    settings: &Settings,
    partial: &mut Vec<RealAlgebraicNumber>,
    constraints: &[Constraint],
    witness: &mut Option<RealAlgebraicPoint>,
    complete: &mut bool,
) -> bool {
    if level == 0 {
        let point = RealAlgebraicPoint::from_coordinates(partial.iter().rev().cloned().collect());
        let satisfied = constraints.iter().all(|c| c.satisfied_by(&point));
        if satisfied {
            *witness = Some(point);
        }
        return satisfied;
    }

    let is_top = partial.is_empty();
    let l = level - 1;
    let n = variables.len();
    let main = variables[l];
    let assigned_vars = &variables[l + 1..n];

    loop {
        if node.samples.is_empty() || (preferred_bucket_empty(&node.samples, settings.sample_preference) && !node.lifting_queue.is_empty()) {
            node.ensure_lifting_queue(elimination_sets[l].len());
            if let Some(idx) = node.lifting_queue.pop_front() {
                let poly = elimination_sets[l][idx].clone();
                let roots = construct_samples(&poly, main, assigned_vars, partial, settings.isolation_strategy);
                insert_samples(node, roots);
                if settings.eager_lifting {
                    node.samples.simplify();
                }
            }
        }

        let Some(i) = choose_next(&node.samples, settings.sample_preference) else {
            if node.lifting_queue.is_empty() {
                break;
            }
            continue;
        };
        let value = node.samples.entries()[i].value.clone();
        let child_idx = node.insert_child(value.clone());
        partial.push(value);
        let success = lift_check(
            &mut node.children[child_idx],
            l,
            elimination_sets,
            variables,
            settings,
            partial,
            constraints,
            witness,
            complete,
        );
        partial.pop();
        if success {
            return true;
        }
        node.samples.take(i);
        if node.samples.is_empty() && node.lifting_queue.is_empty() {
            break;
        }
    }

    if is_top {
        *complete = true;
    }
    false
}

fn preferred_bucket_empty(samples: &SampleList, pref: SamplePreference) -> bool {
    match pref {
        SamplePreference::Fifo => samples.is_empty(),
        SamplePreference::PreferNumeric => samples.next_numeric().is_none(),
        SamplePreference::PreferRootSamples => samples.next_root().is_none(),
        SamplePreference::PreferNonRootSamples => samples.next_non_root().is_none(),
    }
}

fn choose_next(samples: &SampleList, pref: SamplePreference) -> Option<usize> {
    match pref {
        SamplePreference::Fifo => samples.next_overall(),
        SamplePreference::PreferNumeric => samples.next_numeric().or_else(|| samples.next_overall()),
        SamplePreference::PreferRootSamples => samples.next_root().or_else(|| samples.next_overall()),
        SamplePreference::PreferNonRootSamples => samples.next_non_root().or_else(|| samples.next_overall()),
    }
}

/// Evaluation-isolation of `poly` (viewed univariate in `main`) at the
/// partial sample: eliminates every already-assigned variable via a
/// resultant and isolates what remains. A degenerate elimination (e.g. the
/// leading coefficient vanishes under this particular assignment) yields no
/// samples from this polynomial rather than failing the whole lift.
fn construct_samples(
    poly: &MultivariatePolynomial,
    main: Variable,
    assigned_vars: &[Variable],
    partial: &[RealAlgebraicNumber],
    strategy: realclosure_algebraic::IsolationStrategy,
) -> Vec<RealAlgebraicNumber> {
    let assignment: BTreeMap<Variable, RealAlgebraicNumber> = assigned_vars.iter().rev().copied().zip(partial.iter().cloned()).collect();
    let parametric = poly.to_univariate(main);
    real_roots_eval(&parametric, main, &assignment, strategy).unwrap_or_default()
}

/// Inserts newly found roots (skipping any already a child of `node`) and
/// the intermediate rational samples between/around them, matching "sample
/// construction" (§4.7): exactly one rational between each consecutive pair
/// of sample points and one beyond each end, with roots marked `is_root`.
fn insert_samples(node: &mut SampleNode, roots: Vec<RealAlgebraicNumber>) {
    if roots.is_empty() {
        if node.children.is_empty() {
            let zero = RealAlgebraicNumber::from_rational(Rational::ZERO);
            node.samples.push(zero.clone(), false);
            node.insert_child(zero);
        }
        return;
    }
    let mut inserted_any = false;
    for r in roots {
        if node.find_child(&r).is_none() {
            node.samples.push(r.clone(), true);
            node.insert_child(r);
            inserted_any = true;
        }
    }
    if inserted_any {
        add_intermediate_samples(node);
    }
}

fn add_intermediate_samples(node: &mut SampleNode) {
    let values: Vec<RealAlgebraicNumber> = node.children.iter().map(|c| c.value.clone().expect("non-root node")).collect();
    if values.is_empty() {
        return;
    }
    let below = rational_below(&values[0]);
    maybe_add_intermediate(node, below);
    for pair in values.windows(2) {
        let mid = rational_strictly_between(&pair[0], &pair[1]);
        maybe_add_intermediate(node, mid);
    }
    let above = rational_above(values.last().expect("non-empty"));
    maybe_add_intermediate(node, above);
}

fn maybe_add_intermediate(node: &mut SampleNode, value: RealAlgebraicNumber) {
    if node.find_child(&value).is_none() {
        node.samples.push(value.clone(), false);
        node.insert_child(value);
    }
}

fn rational_below(n: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    RealAlgebraicNumber::from_rational(n.current_interval().l() - &Rational::ONE)
}

fn rational_above(n: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    RealAlgebraicNumber::from_rational(n.current_interval().r() + &Rational::ONE)
}

/// A rational strictly between `a` and `b` (`a < b` already established by
/// the caller via the tree's sorted children): refines both until their
/// isolating intervals are disjoint, then samples the gap.
fn rational_strictly_between(a: &RealAlgebraicNumber, b: &RealAlgebraicNumber) -> RealAlgebraicNumber {
    loop {
        let ia = a.current_interval();
        let ib = b.current_interval();
        if ia.r() < ib.l() {
            let sample = OpenInterval::new(ia.r().clone(), ib.l().clone()).sample();
            return RealAlgebraicNumber::from_rational(sample);
        }
        if a.is_numeric() && b.is_numeric() {
            let va = a.exact_value().expect("numeric");
            let vb = b.exact_value().expect("numeric");
            return RealAlgebraicNumber::from_rational((va + vb) / Rational::TWO);
        }
        if !a.is_numeric() {
            a.refine(RefinementStrategy::default());
        }
        if !b.is_numeric() {
            b.refine(RefinementStrategy::default());
        }
    }
}
