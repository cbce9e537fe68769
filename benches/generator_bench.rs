use criterion::{criterion_group, criterion_main, Criterion};
use grid_maze::{MazeBuilder, MazeConfig, GRID_SIZE_OPTIONS, WALL_DENSITY_OPTIONS};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn generate_bench(c: &mut Criterion) {
    for size in GRID_SIZE_OPTIONS {
        for density in WALL_DENSITY_OPTIONS {
            let config = MazeConfig::new(size, density);
            let mut rng = StdRng::seed_from_u64(0);
            c.bench_function(format!("generate {size}x{size}, density {density}").as_str(), |b| {
                b.iter(|| black_box(config.generate(&mut rng)))
            });
        }
    }
}

fn carve_bench(c: &mut Criterion) {
    for size in GRID_SIZE_OPTIONS {
        let mut rng = StdRng::seed_from_u64(0);
        c.bench_function(format!("carve {size}x{size}").as_str(), |b| {
            b.iter(|| {
                let mut builder = MazeBuilder::new(size);
                builder.carve_passages(&mut rng);
                black_box(builder.build())
            })
        });
    }
}

criterion_group!(benches, generate_bench, carve_bench);
criterion_main!(benches);
