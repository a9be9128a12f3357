//! Benchmark for applying a staged plan.
//!
//! TARGET: one 100ms page covers tens of thousands of blocks on the
//! in-memory host
//!
//! Run with: cargo bench --package quarry_reset --bench paging_benchmark

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use quarry_core::{
    BlockPos, BlockType, MineSite, RegionBounds, ResetConfig, ResetVerdict, SystemClock,
};
use quarry_procedural::{BlockPalette, GeneratedPlan, PaletteEntry};
use quarry_reset::{PageStatus, PagedResetScheduler, ResetContext};
use quarry_sim::{ManualClock, SimHost};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_full_reset(c: &mut Criterion) {
    let palette = BlockPalette::new(vec![
        PaletteEntry::new(BlockType::STONE, 80.0),
        PaletteEntry::new(BlockType::COAL_ORE, 15.0),
    ])
    .expect("static palette is valid");

    let mut group = c.benchmark_group("paged_reset");
    group.sample_size(10);

    for fill_mode in [false, true] {
        let site = MineSite::new(
            "bench",
            "world",
            RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(63, 39, 63)),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let clock = SystemClock::new();
        let generated = GeneratedPlan::generate(site.bounds, &palette, &mut rng, &clock);
        let config = ResetConfig {
            fill_mode,
            ..ResetConfig::default()
        };
        group.throughput(Throughput::Elements(site.bounds.total_block_count()));

        let name = if fill_mode { "fill_64x40x64" } else { "overwrite_64x40x64" };
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut scheduler = PagedResetScheduler::new(site.clone(), config.clone());
                    scheduler
                        .stage_plan(generated.clone())
                        .expect("plan matches mine");
                    (scheduler, SimHost::new().with_world("world"))
                },
                |(mut scheduler, mut host)| {
                    let clock = ManualClock::new();
                    let mut signal = |_: &MineSite| ResetVerdict::Proceed;
                    let status =
                        scheduler.resume(&mut ResetContext::new(&mut host, &mut signal, &clock));
                    assert_eq!(status, PageStatus::Complete);
                    host
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_full_reset);
criterion_main!(benches);
