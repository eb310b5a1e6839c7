//! Benchmark for the minimax search
//!
//! Measures MinimaxAgent::find_optimal_move from a fresh two-player game,
//! serial versus parallel, across depths.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use azul_engine::{GameConfig, GameState};
use azul_search::{MinimaxAgent, SearchConfig};

fn bench_minimax_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax_search");
    group.sample_size(10);

    let state = GameState::new(&GameConfig::standard(2).unwrap(), 42).unwrap();

    for depth in [1, 2, 3] {
        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "serial" };
            group.bench_with_input(BenchmarkId::new(label, depth), &depth, |b, &depth| {
                let mut agent = MinimaxAgent::new(SearchConfig {
                    max_depth: depth,
                    // Generous budget so the bench measures full-depth searches.
                    time_limit: Duration::from_secs(60),
                    parallel,
                    num_threads: None,
                })
                .unwrap();

                b.iter(|| black_box(agent.find_optimal_move(black_box(&state), 0)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_minimax_search);
criterion_main!(benches);
