//! Composition configuration types.

/// Configuration for substitution composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionConfig {
    /// Also drop `x -> x` bindings inherited from the right operand.
    /// Off by default: only the rewritten left side is pruned.
    pub prune_trivial_right: bool,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        CompositionConfig {
            prune_trivial_right: false,
        }
    }
}
