//! # QUARRY Sim Driver
//!
//! Resets one in-memory mine the way a server would: the plan is generated
//! on a worker thread, then applied one page per host tick.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug quarry_sim --config reset.toml --side 64 --seed 7
//! ```

use std::process::ExitCode;

use quarry_core::{
    BlockPos, BlockType, Location, MineSite, RegionBounds, ResetConfig, ResetResult, ResetVerdict,
    SystemClock,
};
use quarry_procedural::{BlockPalette, PaletteEntry};
use quarry_reset::{broadcast_pending, Mine, PageStatus, PagedResetScheduler, ResetContext};
use quarry_sim::{SimHost, TickLoop, HOST_TICK_RATE};
use tracing_subscriber::EnvFilter;

const WORLD: &str = "world";

struct Args {
    config: Option<String>,
    side: i32,
    seed: u64,
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: None,
        side: 64,
        seed: 7,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--config" | "-c" => {
                parsed.config = value.cloned();
                i += 1;
            }
            "--side" | "-s" => {
                parsed.side = value.and_then(|v| v.parse().ok()).unwrap_or(64).clamp(1, 512);
                i += 1;
            }
            "--seed" => {
                parsed.seed = value.and_then(|v| v.parse().ok()).unwrap_or(7);
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: quarry_sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>   Reset configuration (TOML)");
                println!("  -s, --side <N>        Mine width and depth in blocks (default: 64)");
                println!("      --seed <N>        Plan seed (default: 7)");
                println!("  -h, --help            Show this help");
                return None;
            }
            _ => {}
        }
        i += 1;
    }
    Some(parsed)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(args) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    match run(&args) {
        Ok(PageStatus::Complete) => ExitCode::SUCCESS,
        Ok(status) => {
            tracing::error!(?status, "reset did not complete");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ResetResult<PageStatus> {
    let config = match &args.config {
        Some(path) => ResetConfig::load(path)?,
        None => ResetConfig {
            log_stats: true,
            ..ResetConfig::default()
        },
    };

    let side = args.side;
    let bounds = RegionBounds::new(BlockPos::new(0, 10, 0), BlockPos::new(side - 1, 49, side - 1));
    let site = MineSite::new("demo", WORLD, bounds);
    let palette = BlockPalette::new(vec![
        PaletteEntry::new(BlockType::STONE, 70.0),
        PaletteEntry::new(BlockType::COAL_ORE, 15.0),
        PaletteEntry::new(BlockType::IRON_ORE, 8.0),
        PaletteEntry::new(BlockType::GOLD_ORE, 4.0),
        PaletteEntry::new(BlockType::DIAMOND_ORE, 1.0),
    ])?;
    let mine = Mine::new(site.clone(), palette);

    let mut host = SimHost::new().with_world(WORLD);
    let center = f64::from(side) / 2.0;
    host.add_player("miner", WORLD, Location::new(center, 20.0, center));
    host.add_player("watcher", WORLD, Location::new(center + 40.0, 50.0, center));

    let told = broadcast_pending(&mut host, &mine.site, config.broadcast_radius_blocks, 5)?;
    tracing::info!(mine = %mine.name(), told, "reset announced");

    let job = mine.spawn_plan(args.seed)?;
    let mut scheduler = PagedResetScheduler::new(site, config);
    let mut staged = false;

    let clock = SystemClock::new();
    let mut signal = |resetting: &MineSite| {
        tracing::info!(mine = %resetting.name, "mine is resetting");
        ResetVerdict::Proceed
    };
    let mut tick_loop = TickLoop::new(HOST_TICK_RATE);

    let status = loop {
        if !tick_loop.should_tick() {
            tick_loop.wait_for_next_tick();
            continue;
        }
        let start = tick_loop.begin_tick();

        // The tick keeps running while the worker generates.
        let status = if staged {
            scheduler.resume(&mut ResetContext::new(&mut host, &mut signal, &clock))
        } else if let Some(generated) = job.try_take() {
            let generated = generated?;
            tracing::info!(
                mine = %mine.name(),
                blocks = generated.plan.len(),
                air = generated.plan.air_count(),
                generation_ms = generated.generation_time.as_secs_f64() * 1_000.0,
                "plan ready"
            );
            scheduler.stage_plan(generated)?;
            staged = true;
            tracing::info!(
                mine = %mine.name(),
                fill_percent = scheduler.cursor().fill_percent(),
                "plan staged"
            );
            PageStatus::Continue
        } else {
            PageStatus::Continue
        };
        tick_loop.end_tick(start);

        if status != PageStatus::Continue {
            break status;
        }
    };

    let ticks = tick_loop.stats();
    tracing::info!(
        mine = %mine.name(),
        pages = scheduler.cursor().page(),
        ticks = tick_loop.tick_count(),
        late_ticks = ticks.late_ticks,
        max_tick_ms = ticks.max_tick.as_secs_f64() * 1_000.0,
        "{}",
        scheduler.stats()
    );
    tracing::info!(messages = host.messages().len(), writes = host.write_count(), "host activity");

    Ok(status)
}
