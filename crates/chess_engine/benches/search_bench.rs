//! Chess Engine Benchmarks
//!
//! Performance benchmarks for the evaluation and the bounded search using
//! Criterion. The search must stay interactive at the hard tier.

use chess_engine::api::{legal_candidates, parse_position};
use chess_engine::{evaluate_position, search_move, Difficulty, Side};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const ITALIAN_FEN: &str = "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_legal_candidates_starting(c: &mut Criterion) {
    let pos = parse_position(START_FEN).unwrap();

    c.bench_function("legal_candidates_starting_position", |b| {
        b.iter(|| black_box(legal_candidates(&pos)))
    });
}

fn bench_evaluate_position_starting(c: &mut Criterion) {
    let pos = parse_position(START_FEN).unwrap();

    c.bench_function("evaluate_position_starting", |b| {
        b.iter(|| black_box(evaluate_position(&pos, Side::White)))
    });
}

fn bench_search_by_difficulty(c: &mut Criterion) {
    let pos = parse_position(ITALIAN_FEN).unwrap();
    let mut group = c.benchmark_group("search_italian");
    group.sample_size(10);

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        group.bench_function(difficulty.as_str(), |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(search_move(&pos, difficulty, Side::White, &mut rng)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_legal_candidates_starting,
    bench_evaluate_position_starting,
    bench_search_by_difficulty,
);
criterion_main!(benches);
