//! Benchmark for block plan generation.
//!
//! TARGET: a 100x50x100 mine (500,000 cells) planned well inside one second
//!
//! Run with: cargo bench --package quarry_procedural --bench plan_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use quarry_core::{BlockPos, BlockType, RegionBounds};
use quarry_procedural::{BlockPalette, BlockPlan, PaletteEntry};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ore_palette() -> BlockPalette {
    BlockPalette::new(vec![
        PaletteEntry::new(BlockType::STONE, 70.0),
        PaletteEntry::new(BlockType::COAL_ORE, 15.0),
        PaletteEntry::new(BlockType::IRON_ORE, 8.0),
        PaletteEntry::new(BlockType::GOLD_ORE, 4.0),
        PaletteEntry::new(BlockType::DIAMOND_ORE, 1.0),
    ])
    .expect("static palette is valid")
}

fn benchmark_selection(c: &mut Criterion) {
    let palette = ore_palette();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("weighted_select", |b| {
        b.iter(|| black_box(palette.select(&mut rng)));
    });
}

fn benchmark_plan_sizes(c: &mut Criterion) {
    let palette = ore_palette();
    let mut group = c.benchmark_group("plan_generation");
    group.sample_size(10);

    for side in [16, 64, 100] {
        let bounds =
            RegionBounds::new(BlockPos::new(0, 10, 0), BlockPos::new(side - 1, 59, side - 1));
        group.throughput(Throughput::Elements(bounds.total_block_count()));
        group.bench_function(format!("{side}x50x{side}"), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            b.iter(|| black_box(BlockPlan::generate(bounds, &palette, &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_selection, benchmark_plan_sizes);
criterion_main!(benches);
