//! Time-bounded minimax search with alpha-beta pruning and memoization.
//!
//! This module provides:
//! - `SearchConfig` for depth, time budget and parallelism
//! - `MinimaxAgent`, which owns the worker pool and the per-call cache
//! - `Searcher`, the recursive node evaluator
//!
//! The player handed to [`MinimaxAgent::find_optimal_move`] is the
//! maximizer; every other player minimizes the same scalar. This is exact
//! for two players and a paranoid approximation beyond that.
//!
//! In parallel mode the siblings of a node are evaluated concurrently, each
//! with the window as it stood at dispatch. Cutoffs are applied only when the
//! results are reduced, so parallel search visits more nodes than serial
//! alpha-beta but returns the same value.

use std::time::{Duration, Instant};

use azul_engine::{legal_actions, Action, GameState, Phase, PlayerIdx};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::heuristic::evaluate;
use crate::stats::SearchStats;
use crate::transposition::{Entry, StateKey, TranspositionTable};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("failed to build search thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for the minimax search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Plies searched below the root.
    pub max_depth: u32,

    /// Wall-clock budget per call. Nodes reached after it expires are
    /// evaluated heuristically; the root is always expanded.
    pub time_limit: Duration,

    /// Evaluate sibling moves on the worker pool.
    pub parallel: bool,

    /// Worker threads. None = rayon default (num CPUs).
    pub num_threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            time_limit: Duration::from_secs(1),
            parallel: true,
            num_threads: None,
        }
    }
}

/// Result of one search call.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub action: Action,
    /// Root value from the maximizer's point of view.
    pub score: f64,
    pub stats: SearchStats,
}

pub struct MinimaxAgent {
    config: SearchConfig,
    pool: Option<rayon::ThreadPool>,
    table: TranspositionTable,
    last_stats: SearchStats,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        if config.max_depth == 0 {
            return Err(SearchError::ZeroDepth);
        }

        let pool = if config.parallel {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = config.num_threads {
                builder = builder.num_threads(n);
            }
            Some(builder.build()?)
        } else {
            None
        };

        Ok(Self {
            config,
            pool,
            table: TranspositionTable::new(),
            last_stats: SearchStats::default(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    pub fn last_stats(&self) -> &SearchStats {
        &self.last_stats
    }

    /// Best move for `player`, or `None` when no legal move exists.
    pub fn find_optimal_move(&mut self, state: &GameState, player: PlayerIdx) -> Option<Action> {
        self.search(state, player).map(|outcome| outcome.action)
    }

    /// Full search from `state` with `player` as the maximizer.
    pub fn search(&mut self, state: &GameState, player: PlayerIdx) -> Option<SearchOutcome> {
        if state.phase() == Phase::GameOver {
            return None;
        }
        if player != state.current_player() {
            warn!(
                player,
                to_move = state.current_player(),
                "search requested for a player who is not to move"
            );
            return None;
        }

        let started = Instant::now();
        let ctx = SearchContext {
            maximizer: player,
            root_round: state.round(),
            deadline: started + self.config.time_limit,
            parallel: self.pool.is_some(),
        };

        // Fresh cache per call.
        let mut table = std::mem::take(&mut self.table);
        table.clear();
        let mut root = Searcher::root(ctx, table);

        let depth = self.config.max_depth;
        let result = match &self.pool {
            Some(pool) => {
                pool.install(|| root.node(state, depth, f64::NEG_INFINITY, f64::INFINITY, 0))
            }
            None => root.node(state, depth, f64::NEG_INFINITY, f64::INFINITY, 0),
        };

        let mut stats = root.stats;
        stats.elapsed = started.elapsed();
        self.table = root.table;
        self.last_stats = stats.clone();

        debug!(
            player,
            round = state.round(),
            nodes = stats.nodes_explored,
            leaves = stats.leaf_nodes,
            depth = stats.achieved_depth,
            cache_hits = stats.cache_hits,
            timeouts = stats.timeouts,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search finished"
        );

        let scored = result?;
        let action = scored.best?;
        Some(SearchOutcome {
            action,
            score: scored.score,
            stats,
        })
    }
}

/// Immutable per-call parameters shared by every searcher in the tree.
#[derive(Copy, Clone, Debug)]
struct SearchContext {
    maximizer: PlayerIdx,
    root_round: u32,
    deadline: Instant,
    parallel: bool,
}

#[derive(Copy, Clone, Debug)]
struct Scored {
    score: f64,
    best: Option<Action>,
}

/// Sequential fold of sibling values into a node's best move and window.
struct Reduction {
    maximizing: bool,
    alpha: f64,
    beta: f64,
    best: Option<Scored>,
}

impl Reduction {
    /// Fold in one sibling. Returns true when the remaining siblings can be cut.
    fn push(&mut self, stats: &mut SearchStats, mv: Action, score: Option<f64>) -> bool {
        let Some(score) = score else {
            stats.pruned_branches += 1;
            return false;
        };

        let improves = match self.best {
            None => true,
            Some(b) if self.maximizing => score > b.score,
            Some(b) => score < b.score,
        };
        if improves {
            self.best = Some(Scored {
                score,
                best: Some(mv),
            });
        }

        if self.maximizing {
            self.alpha = self.alpha.max(score);
        } else {
            self.beta = self.beta.min(score);
        }
        self.beta <= self.alpha
    }
}

/// Recursive evaluator. Each searcher owns its cache and counters; a worker
/// reads its ancestors' caches but writes only its own.
struct Searcher<'p> {
    parent: Option<&'p Searcher<'p>>,
    ctx: SearchContext,
    table: TranspositionTable,
    stats: SearchStats,
}

impl<'p> Searcher<'p> {
    fn root(ctx: SearchContext, table: TranspositionTable) -> Self {
        Searcher {
            parent: None,
            ctx,
            table,
            stats: SearchStats::default(),
        }
    }

    fn worker(&self) -> Searcher<'_> {
        Searcher {
            parent: Some(self),
            ctx: self.ctx,
            table: TranspositionTable::new(),
            stats: SearchStats::default(),
        }
    }

    fn probe(&self, key: &StateKey) -> Option<&Entry> {
        self.table
            .get(key)
            .or_else(|| self.parent.and_then(|p| p.probe(key)))
    }

    fn leaf(&mut self, state: &GameState) -> Option<Scored> {
        self.stats.leaf_nodes += 1;
        evaluate(state, self.ctx.maximizer).map(|score| Scored { score, best: None })
    }

    /// Value of `state` searched `depth` plies deep within `(alpha, beta)`.
    /// `None` means every branch below was pruned as illegal.
    fn node(
        &mut self,
        state: &GameState,
        depth: u32,
        alpha: f64,
        beta: f64,
        ply: u32,
    ) -> Option<Scored> {
        self.stats.nodes_explored += 1;
        self.stats.achieved_depth = self.stats.achieved_depth.max(ply);

        if ply > 0 {
            if Instant::now() >= self.ctx.deadline {
                self.stats.timeouts += 1;
                return self.leaf(state);
            }
            let round_ended =
                state.round() != self.ctx.root_round || state.phase() == Phase::GameOver;
            if depth == 0 || round_ended || state.is_round_over() {
                return self.leaf(state);
            }
        }

        let key = StateKey::new(state, depth);
        if let Some(entry) = self.probe(&key).copied() {
            if entry.is_conclusive(alpha, beta) {
                self.stats.cache_hits += 1;
                return Some(Scored {
                    score: entry.score,
                    best: entry.best_move,
                });
            }
        }

        let player = state.current_player();
        let moves = legal_actions(state, player);
        if moves.is_empty() {
            return if ply == 0 { None } else { self.leaf(state) };
        }

        let (alpha0, beta0) = (alpha, beta);
        let mut reduction = Reduction {
            maximizing: player == self.ctx.maximizer,
            alpha,
            beta,
            best: None,
        };

        if self.ctx.parallel && moves.len() > 1 {
            let this = &*self;
            let results: Vec<(Action, Option<f64>, TranspositionTable, SearchStats)> = moves
                .par_iter()
                .map(|&mv| {
                    let mut worker = this.worker();
                    let score = worker.child(state, player, mv, depth, alpha0, beta0, ply);
                    (mv, score, worker.table, worker.stats)
                })
                .collect();

            let mut scores = Vec::with_capacity(results.len());
            for (mv, score, table, stats) in results {
                self.table.merge(table);
                self.stats.merge(&stats);
                scores.push((mv, score));
            }

            let total = scores.len();
            for (i, (mv, score)) in scores.into_iter().enumerate() {
                if reduction.push(&mut self.stats, mv, score) {
                    self.stats.cutoffs += (total - i - 1) as u64;
                    break;
                }
            }
        } else {
            let total = moves.len();
            for (i, &mv) in moves.iter().enumerate() {
                let score =
                    self.child(state, player, mv, depth, reduction.alpha, reduction.beta, ply);
                if reduction.push(&mut self.stats, mv, score) {
                    self.stats.cutoffs += (total - i - 1) as u64;
                    break;
                }
            }
        }

        let best = reduction.best?;
        if Instant::now() < self.ctx.deadline {
            self.table
                .insert(key, Entry::from_window(best.score, best.best, alpha0, beta0));
        }
        Some(best)
    }

    #[allow(clippy::too_many_arguments)]
    fn child(
        &mut self,
        state: &GameState,
        player: PlayerIdx,
        mv: Action,
        depth: u32,
        alpha: f64,
        beta: f64,
        ply: u32,
    ) -> Option<f64> {
        match state.clone().play(player, mv) {
            Ok(next) => self
                .node(&next, depth - 1, alpha, beta, ply + 1)
                .map(|scored| scored.score),
            Err(err) => {
                warn!(%mv, %err, "pruning branch that could not be applied");
                None
            }
        }
    }
}
