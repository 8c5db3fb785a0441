use crate::sample_list::SampleList;
use realclosure_algebraic::RealAlgebraicNumber;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// A node of the sample tree (§3 Data Model). The root (depth 0) carries no
/// value; a node at depth `i` carries the `i`-th coordinate of a partial
/// sample point, in lifting order (opposite to elimination order). Children
/// are kept strictly ordered by real-algebraic less-than.
///
/// Each node also owns the lifting state for *its own* children: the
/// `SampleList` currently being exhausted and the queue of elimination-set
/// indices not yet tried at this node. The distilled spec models these as
/// per-level singletons, which is equivalent only for a single uninterrupted
/// top-to-bottom descent; since `check` may be called repeatedly against a
/// sample tree that persists across calls, this crate keeps the state
/// per-node instead so a later `check` resumes exactly where an earlier one
/// left off at every branch, not just the most recent one (see DESIGN.md).
#[derive(Debug, Clone)]
pub struct SampleNode {
    pub value: Option<RealAlgebraicNumber>,
    pub children: Vec<SampleNode>,
    pub samples: SampleList,
    pub lifting_queue: VecDeque<usize>,
    pub lifting_queue_len: usize,
}

impl SampleNode {
    pub fn root() -> Self {
        Self {
            value: None,
            children: Vec::new(),
            samples: SampleList::default(),
            lifting_queue: VecDeque::new(),
            lifting_queue_len: 0,
        }
    }

    fn leaf(value: RealAlgebraicNumber) -> Self {
        Self {
            value: Some(value),
            children: Vec::new(),
            samples: SampleList::default(),
            lifting_queue: VecDeque::new(),
            lifting_queue_len: 0,
        }
    }

    /// Tops the lifting queue up to `total` positions (0-indexed), used both
    /// on first visit to a node at a level and after `add_polynomials` grows
    /// an elimination set.
    pub fn ensure_lifting_queue(&mut self, total: usize) {
        for i in self.lifting_queue_len..total {
            self.lifting_queue.push_back(i);
        }
        self.lifting_queue_len = total;
    }

    /// Index of the child equal to `value` by real-algebraic equality, if any.
    pub fn find_child(&self, value: &RealAlgebraicNumber) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.value.as_ref().expect("non-root node").equal_refining(value))
    }

    /// Inserts `value` as a child in sorted position, or returns the index of
    /// the existing equal child.
    pub fn insert_child(&mut self, value: RealAlgebraicNumber) -> usize {
        if let Some(i) = self.find_child(&value) {
            return i;
        }
        let pos = self
            .children
            .iter()
            .position(|c| c.value.as_ref().expect("non-root node").partial_cmp_refining(&value) != Ordering::Less)
            .unwrap_or(self.children.len());
        self.children.insert(pos, SampleNode::leaf(value));
        pos
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realclosure_nzq::Rational;

    fn rat(n: i64) -> RealAlgebraicNumber {
        RealAlgebraicNumber::from_rational(Rational::from(n))
    }

    #[test]
    fn children_stay_sorted_by_real_algebraic_less_than() {
        let mut root = SampleNode::root();
        root.insert_child(rat(3));
        root.insert_child(rat(1));
        root.insert_child(rat(2));
        let values: Vec<Rational> = root
            .children
            .iter()
            .map(|c| c.value.as_ref().unwrap().exact_value().unwrap())
            .collect();
        assert_eq!(values, vec![Rational::from(1), Rational::from(2), Rational::from(3)]);
    }

    #[test]
    fn inserting_an_equal_value_does_not_duplicate() {
        let mut root = SampleNode::root();
        let i = root.insert_child(rat(5));
        let j = root.insert_child(rat(5));
        assert_eq!(i, j);
        assert_eq!(root.children.len(), 1);
    }
}
