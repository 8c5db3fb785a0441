use realclosure_algebraic::{RealAlgebraicNumber, RefinementStrategy};

/// One sample produced while lifting at a node: its value and whether it is
/// a root of the lifting polynomial (`is_root=false` samples are the
/// intermediate rationals inserted to keep cylindrical cells separated).
#[derive(Debug, Clone)]
pub struct SampleEntry {
    pub value: RealAlgebraicNumber,
    pub is_root: bool,
}

/// Samples produced so far at a node, in insertion order, with the several
/// FIFO "views" `liftCheck`'s consumption phase needs (§4.7): next overall,
/// next numeric, next interval-represented, next root, next non-root.
/// Consuming a sample removes it from every view at once, since they all
/// read the same backing vector.
#[derive(Debug, Clone, Default)]
pub struct SampleList {
    entries: Vec<SampleEntry>,
}

impl SampleList {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, value: RealAlgebraicNumber, is_root: bool) {
        self.entries.push(SampleEntry { value, is_root });
    }

    pub fn entries(&self) -> &[SampleEntry] {
        &self.entries
    }

    fn position(&self, pred: impl Fn(&SampleEntry) -> bool) -> Option<usize> {
        self.entries.iter().position(|e| pred(e))
    }

    pub fn next_overall(&self) -> Option<usize> {
        if self.entries.is_empty() { None } else { Some(0) }
    }

    pub fn next_numeric(&self) -> Option<usize> {
        self.position(|e| e.value.is_numeric())
    }

    pub fn next_interval(&self) -> Option<usize> {
        self.position(|e| !e.value.is_numeric())
    }

    pub fn next_root(&self) -> Option<usize> {
        self.position(|e| e.is_root)
    }

    pub fn next_non_root(&self) -> Option<usize> {
        self.position(|e| !e.is_root)
    }

    /// Removes and returns the entry at `i`; the caller picked `i` from one
    /// of the `next_*` views above.
    pub fn take(&mut self, i: usize) -> SampleEntry {
        self.entries.remove(i)
    }

    /// Tries to upgrade every interval-represented sample to a numeric by one
    /// refinement step. Entries that become exact are replaced in place, so
    /// every view (and the sample tree node the caller mirrors this into)
    /// sees the same upgraded value consistently.
    pub fn simplify(&mut self) {
        for e in self.entries.iter_mut() {
            if !e.value.is_numeric() {
                e.value.refine(RefinementStrategy::default());
                if let Some(v) = e.value.exact_value() {
                    e.value = RealAlgebraicNumber::from_rational(v);
                }
            }
        }
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
    fn views_find_first_match_and_take_removes_from_all() {
        let mut list = SampleList::default();
        list.push(rat(1), false);
        list.push(rat(2), true);
        assert_eq!(list.next_root(), Some(1));
        assert_eq!(list.next_non_root(), Some(0));
        list.take(0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.next_non_root(), None);
    }
}
