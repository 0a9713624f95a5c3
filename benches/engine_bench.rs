use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pixelwar::board::Grid;
use pixelwar::config::{corner_seeds, SimConfig};
use pixelwar::engine::Sim;

fn bench_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.factions = 4;
    config.grid = Grid::new(20, 20);
    config.seed = 1;
    config.time_limit_secs = 3600;
    config
}

fn bench_resolve_turn(c: &mut Criterion) {
    c.bench_function("resolve_first_turn", |b| {
        b.iter(|| {
            let config = bench_config();
            let seeds = corner_seeds(&config);
            let mut sim = Sim::new(config, &seeds).unwrap();
            black_box(sim.resolve_turn())
        })
    });
}

fn bench_resolve_crowded_board(c: &mut Criterion) {
    c.bench_function("resolve_turn_30_deep", |b| {
        b.iter(|| {
            let config = bench_config();
            let seeds = corner_seeds(&config);
            let mut sim = Sim::new(config, &seeds).unwrap();
            for _ in 0..30 {
                if black_box(sim.resolve_turn()).outcome.is_some() {
                    break;
                }
            }
        })
    });
}

criterion_group!(benches, bench_resolve_turn, bench_resolve_crowded_board);
criterion_main!(benches);
