use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minefield_core::*;
use std::hint::black_box;

fn generate_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for tier in Tier::RANKED {
        let Some(config) = tier.config() else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("swap", tier), &config, |b, &config| {
            b.iter(|| SwapShuffleGenerator::new(black_box(7)).generate(config))
        });
        group.bench_with_input(BenchmarkId::new("uniform", tier), &config, |b, &config| {
            b.iter(|| UniformGenerator::new(black_box(7)).generate(config))
        });
    }
    group.finish();
}

fn flood_fill_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for tier in Tier::RANKED {
        let Some(config) = tier.config() else {
            continue;
        };
        // mines packed into the rightmost columns so one click opens the rest
        let (width, height) = config.size();
        let mines: Vec<Coord2> = (0..width)
            .rev()
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .take(config.mines().into())
            .collect();
        let layout = match MineLayout::from_mine_coords(config.size(), &mines) {
            Ok(layout) if layout.mine_count() == config.mines() => layout,
            _ => continue,
        };
        group.bench_with_input(BenchmarkId::from_parameter(tier), &layout, |b, layout| {
            b.iter(|| {
                let mut session = Session::new(config, layout.clone()).unwrap();
                session.reveal(black_box((0, 0)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, generate_tiers, flood_fill_tiers);
criterion_main!(benches);
