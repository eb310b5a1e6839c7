//! Search statistics.
//!
//! Plain counters owned by a single searcher. Parallel workers keep their
//! own and the owner merges them, so no atomics are needed.

use std::fmt;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_explored: u64,
    pub leaf_nodes: u64,
    /// Deepest ply reached below the root
    pub achieved_depth: u32,
    pub cache_hits: u64,
    /// Siblings skipped by alpha-beta cutoffs
    pub cutoffs: u64,
    /// Branches dropped because the move could not be applied
    pub pruned_branches: u64,
    /// Nodes evaluated early because the deadline passed
    pub timeouts: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_explored += other.nodes_explored;
        self.leaf_nodes += other.leaf_nodes;
        self.achieved_depth = self.achieved_depth.max(other.achieved_depth);
        self.cache_hits += other.cache_hits;
        self.cutoffs += other.cutoffs;
        self.pruned_branches += other.pruned_branches;
        self.timeouts += other.timeouts;
    }

    pub fn timed_out(&self) -> bool {
        self.timeouts > 0
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes explored: {}, leaf nodes: {}, achieved depth: {}, cache hits: {}, cutoffs: {}, \
             pruned: {}, timeouts: {}, elapsed: {:.1}ms",
            self.nodes_explored,
            self.leaf_nodes,
            self.achieved_depth,
            self.cache_hits,
            self.cutoffs,
            self.pruned_branches,
            self.timeouts,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}
