use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use pathsearch::algorithms::astar::AStarSearch;
use pathsearch::algorithms::traversal::TraversalSearch;
use pathsearch::data_structures::frontier::Discipline;
use pathsearch::problems::grid::ChebyshevDistance;
use pathsearch::problems::grid::Grid;
use pathsearch::problems::grid::GridCell;

fn traversal(grid: &Grid, start: GridCell, goal: GridCell, discipline: Discipline) -> usize {
    TraversalSearch::new(grid, start, goal, discipline)
        .and_then(|s| s.run())
        .map_or(0, |p| p.len())
}

fn astar(grid: &Grid, start: GridCell, goal: GridCell) -> usize {
    AStarSearch::<ChebyshevDistance>::with_heuristic(grid, start, goal)
        .ok()
        .and_then(|mut s| s.run().ok())
        .map_or(0, |p| p.len())
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid Search");

    for size in [32usize, 128] {
        for i in 0..3 {
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let mut grid = Grid::random(&mut rng, size, size, 0.25).unwrap();
            let (start, goal) = (GridCell::new(0, 0), GridCell::new(size - 1, size - 1));
            grid.set_blocked(start, false).unwrap();
            grid.set_blocked(goal, false).unwrap();

            let instance_name = format!("{size}x{size}:{i}");
            for discipline in [Discipline::Fifo, Discipline::Priority] {
                group.bench_with_input(
                    BenchmarkId::new(discipline.search_name(), &instance_name),
                    &grid,
                    |b, g| b.iter(|| traversal(g, start, goal, discipline)),
                );
            }
            group.bench_with_input(BenchmarkId::new("A*", &instance_name), &grid, |b, g| {
                b.iter(|| astar(g, start, goal))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
