//! Benchmarks for level generation and per-frame tile planning.
//!
//! Run with: cargo bench --bench generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use delve::generation::utils::create_rng;
use delve::{
    Camera, GameState, GenerationConfig, Generator, Grid, RoomCorridorGenerator, Viewport,
    ViewportRenderer,
};

fn bench_room_corridor_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("room_corridor");

    for size in [50_u32, 100, 200].iter() {
        let config = GenerationConfig {
            width: *size,
            height: *size,
            ..GenerationConfig::new(12345)
        };
        let generator = RoomCorridorGenerator::new();
        let mut grid = Grid::new(config.width, config.height, config.tile_size).unwrap();
        let mut rng = create_rng(&config);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            size,
            |b, _| {
                b.iter(|| {
                    let layout = generator.generate(black_box(&mut grid), &config, &mut rng);
                    black_box(layout)
                });
            },
        );
    }

    group.finish();
}

fn bench_viewport_plan(c: &mut Criterion) {
    let state = GameState::new(GenerationConfig::new(12345)).unwrap();
    let grid = state.world.grid();
    let viewport = Viewport::new(1000, 700);
    let mut camera = Camera::new();
    camera.follow(state.player.position, grid.tile_size(), viewport.size(), grid.pixel_size());

    c.bench_function("viewport_plan", |b| {
        b.iter(|| {
            let draws = ViewportRenderer::plan(black_box(grid), camera, viewport);
            black_box(draws)
        });
    });
}

fn bench_full_level_population(c: &mut Criterion) {
    c.bench_function("game_state_new", |b| {
        b.iter(|| {
            let state = GameState::new(GenerationConfig::new(black_box(777)));
            black_box(state)
        });
    });
}

criterion_group!(
    benches,
    bench_room_corridor_generation,
    bench_viewport_plan,
    bench_full_level_population,
);
criterion_main!(benches);
