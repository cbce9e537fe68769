use criterion::{criterion_group, criterion_main, Criterion};
use grid_maze::{
    AstarSolver, BfsSolver, DfsSolver, GridSolver, MazeConfig, MazeGrid, GRID_SIZE_OPTIONS,
    WALL_DENSITY_OPTIONS,
};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

const N_MAZES: usize = 16;

fn bench_mazes(size: usize, density: f64) -> (MazeConfig, Vec<MazeGrid>) {
    let config = MazeConfig::new(size, density);
    let mut rng = StdRng::seed_from_u64(0);
    let mazes = (0..N_MAZES)
        .filter_map(|_| config.generate(&mut rng).ok())
        .collect();
    (config, mazes)
}

fn maze_bench_solver<S, FS>(c: &mut Criterion, solver_name: &str, create_solver: FS)
where
    S: GridSolver,
    FS: Fn() -> S,
{
    let solver = create_solver();
    for size in GRID_SIZE_OPTIONS {
        for density in WALL_DENSITY_OPTIONS {
            let (config, mazes) = bench_mazes(size, density);
            c.bench_function(
                format!("{size}x{size}, density {density}, {solver_name}").as_str(),
                |b| {
                    b.iter(|| {
                        for maze in &mazes {
                            black_box(solver.search(maze, config.start, config.goal));
                        }
                    })
                },
            );
        }
    }
}

fn maze_bench_astar(c: &mut Criterion) {
    maze_bench_solver(c, "Astar", AstarSolver::new);
}

fn maze_bench_dfs(c: &mut Criterion) {
    maze_bench_solver(c, "DFS", || DfsSolver);
}

fn maze_bench_bfs(c: &mut Criterion) {
    maze_bench_solver(c, "BFS", || BfsSolver);
}

criterion_group!(benches, maze_bench_astar, maze_bench_dfs, maze_bench_bfs);
criterion_main!(benches);
