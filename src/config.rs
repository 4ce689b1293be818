/// The order the attack visits puzzle pieces in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOrder {
    /// As the words appear in the phrase.
    Phrase,
    /// Most constrained piece first. Ties keep phrase order.
    FewestCandidates,
    /// Longest cypher word first. Ties keep phrase order.
    LongestFirst,
}

impl Default for PieceOrder {
    fn default() -> Self {
        PieceOrder::Phrase
    }
}

/// Knobs for the word block attack. The default is the plain exhaustive search: phrase
/// order, no lookahead, no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub order: PieceOrder,

    /// After each word is placed, give up on the branch if some piece we haven't reached yet
    /// has no candidate left.
    pub forward_check: bool,

    /// Stop after this many search nodes, keeping whatever was found so far. Loosely
    /// constrained puzzles branch exponentially, so this is the only way to bound run time.
    pub node_limit: Option<u64>,
}

impl SolverConfig {
    pub fn with_order(mut self, order: PieceOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_forward_check(mut self, forward_check: bool) -> Self {
        self.forward_check = forward_check;
        self
    }

    pub fn with_node_limit(mut self, limit: impl Into<Option<u64>>) -> Self {
        self.node_limit = limit.into();
        self
    }
}
