use realclosure_algebraic::IsolationStrategy;

/// The total order imposed on an elimination set before lifting positions are
/// queued. The three ordering flags in the distilled spec are mutually
/// exclusive in practice — the C++ original's `LOWDEG_CADSETTING &
/// EVENDEG_CADSETTING` branch is unreachable dead code, since both are
/// distinct powers of two — so this crate models the choice as a 4-way enum
/// rather than three independent bools (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EliminationOrder {
    /// Insertion order, ties broken lexicographically on the canonical term
    /// representation.
    #[default]
    Default,
    LowDegreeFirst,
    OddDegreeFirst,
    EvenDegreeFirst,
}

/// Which bucket of a level's `SampleList` `liftCheck`'s consumption phase
/// prefers. `PreferNumeric` and `PreferByIsRoot` are mutually exclusive;
/// `PreferByIsRoot` further chooses between root and non-root samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplePreference {
    #[default]
    Fifo,
    PreferNumeric,
    PreferRootSamples,
    PreferNonRootSamples,
}

/// The settings bundle threaded through a `Cad`'s construction, projection
/// and lifting. `Default` matches the distilled spec's defaults: insertion
/// order, plain FIFO consumption, no eager lifting, no simplification passes,
/// `TernarySample` isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub elimination_order: EliminationOrder,
    pub sample_preference: SamplePreference,
    pub eager_lifting: bool,
    pub simplify_by_groebner: bool,
    pub simplify_by_root_counting: bool,
    pub simplify_by_squarefreeing: bool,
    pub isolation_strategy: IsolationStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            elimination_order: EliminationOrder::default(),
            sample_preference: SamplePreference::default(),
            eager_lifting: false,
            simplify_by_groebner: false,
            simplify_by_root_counting: false,
            simplify_by_squarefreeing: false,
            isolation_strategy: IsolationStrategy::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// `eager_lifting` pushes `prefer_numeric_samples`, per the external
    /// interfaces section: numeric samples settle a branch outright instead
    /// of leaving an unrefined interval to recurse through.
    pub fn with_eager_lifting(mut self) -> Self {
        self.eager_lifting = true;
        self.sample_preference = SamplePreference::PreferNumeric;
        self
    }

    pub fn with_elimination_order(mut self, order: EliminationOrder) -> Self {
        self.elimination_order = order;
        self
    }

    pub fn with_sample_preference(mut self, pref: SamplePreference) -> Self {
        self.sample_preference = pref;
        self
    }
}
