/// A compact, totally-ordered, hashable handle standing in for a polynomial
/// variable. Kept as a small `Copy` integer rather than a boxed symbol so
/// that monomial exponent vectors are cheap to sort and hash.
///
/// Callers allocate and track the mapping from names to ids themselves
/// (there is deliberately no process-wide pool — see the design note on the
/// original `VariableListPool` singleton); this crate only ever sees the
/// resulting handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub u32);
