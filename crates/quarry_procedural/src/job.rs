//! # Plan Jobs
//!
//! Background plan generation.
//!
//! Generating a plan is pure computation, so the host may run it on a worker
//! thread and pick up the result from its tick:
//!
//! ```text
//! tick thread                       worker
//! ───────────                       ──────
//! spawn_plan_generation() ────────> generate plan
//! try_take() -> None                     │
//! try_take() -> None                     │
//! try_take() -> Some(Ok(plan)) <─────────┘ (channel)
//! scheduler.stage_plan(plan)
//! ```

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use quarry_core::{Clock, RegionBounds, ResetError, ResetResult, SystemClock};

use crate::palette::BlockPalette;
use crate::plan::BlockPlan;

/// A plan together with how long it took to generate.
#[derive(Clone, Debug)]
pub struct GeneratedPlan {
    /// The plan.
    pub plan: BlockPlan,
    /// Time spent generating it, as read from the generating clock.
    pub generation_time: Duration,
}

impl GeneratedPlan {
    /// Generates a plan on the current thread, timed against `clock`.
    pub fn generate<R, C>(
        bounds: RegionBounds,
        palette: &BlockPalette,
        rng: &mut R,
        clock: &C,
    ) -> Self
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        let start = clock.now();
        let plan = BlockPlan::generate(bounds, palette, rng);
        Self {
            plan,
            generation_time: clock.since(start),
        }
    }
}

/// Handle to a plan being generated on a worker thread.
#[derive(Debug)]
pub struct PlanJob {
    receiver: Receiver<GeneratedPlan>,
}

impl PlanJob {
    /// Non-blocking poll, meant to be called from the tick thread.
    ///
    /// Returns `None` while the worker is still busy. Yields the plan exactly
    /// once; polling again afterwards reports the worker as gone.
    pub fn try_take(&self) -> Option<ResetResult<GeneratedPlan>> {
        match self.receiver.try_recv() {
            Ok(generated) => Some(Ok(generated)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_gone())),
        }
    }

    /// Blocks until the plan is ready.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::GenerationFailed`] if the worker died without
    /// delivering a plan.
    pub fn wait(self) -> ResetResult<GeneratedPlan> {
        self.receiver.recv().map_err(|_| worker_gone())
    }
}

fn worker_gone() -> ResetError {
    ResetError::GenerationFailed("generation worker exited without a plan".into())
}

/// Starts generating a plan on a new worker thread.
///
/// The worker seeds its own `ChaCha8Rng` from `seed`, so the same seed always
/// yields the same plan. Generation is timed with a [`SystemClock`] on the
/// worker.
///
/// # Errors
///
/// Returns [`ResetError::GenerationFailed`] if the thread cannot be spawned.
pub fn spawn_plan_generation(
    bounds: RegionBounds,
    palette: BlockPalette,
    seed: u64,
) -> ResetResult<PlanJob> {
    let (sender, receiver) = bounded(1);

    thread::Builder::new()
        .name("quarry-plan".into())
        .spawn(move || {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let clock = SystemClock::new();
            let generated = GeneratedPlan::generate(bounds, &palette, &mut rng, &clock);
            // Nobody listening any more means the reset was dropped.
            let _ = sender.send(generated);
        })
        .map_err(|e| ResetError::GenerationFailed(e.to_string()))?;

    Ok(PlanJob { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteEntry;
    use quarry_core::{BlockPos, BlockType};
    use std::cell::Cell;

    /// Moves forward by `step` every time it is read.
    struct SteppingClock {
        now: Cell<Duration>,
        step: Duration,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> Duration {
            let now = self.now.get() + self.step;
            self.now.set(now);
            now
        }
    }

    fn palette() -> BlockPalette {
        BlockPalette::new(vec![
            PaletteEntry::new(BlockType::STONE, 50.0),
            PaletteEntry::new(BlockType::IRON_ORE, 25.0),
        ])
        .unwrap()
    }

    fn bounds() -> RegionBounds {
        RegionBounds::new(BlockPos::new(0, 0, 0), BlockPos::new(15, 15, 15))
    }

    #[test]
    fn test_worker_delivers_plan() {
        let job = spawn_plan_generation(bounds(), palette(), 9).unwrap();
        let generated = job.wait().unwrap();
        assert_eq!(generated.plan.len(), 16 * 16 * 16);
    }

    #[test]
    fn test_worker_matches_inline_generation() {
        let job = spawn_plan_generation(bounds(), palette(), 31).unwrap();
        let threaded = job.wait().unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let inline = GeneratedPlan::generate(bounds(), &palette(), &mut rng, &SystemClock::new());
        assert!(threaded.plan.iter().eq(inline.plan.iter()));
    }

    #[test]
    fn test_generation_time_comes_from_the_clock() {
        let clock = SteppingClock {
            now: Cell::new(Duration::from_secs(40)),
            step: Duration::from_millis(7),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let generated = GeneratedPlan::generate(bounds(), &palette(), &mut rng, &clock);

        // One read before generating, one after.
        assert_eq!(generated.generation_time, Duration::from_millis(7));
        assert_eq!(clock.now.get(), Duration::from_millis(40_014));
    }

    #[test]
    fn test_poll_until_ready_then_gone() {
        let job = spawn_plan_generation(bounds(), palette(), 1).unwrap();
        let generated = loop {
            if let Some(result) = job.try_take() {
                break result.unwrap();
            }
            thread::yield_now();
        };
        assert_eq!(generated.plan.bounds(), &bounds());

        // The sender drops once the worker returns.
        let after = loop {
            if let Some(result) = job.try_take() {
                break result;
            }
            thread::yield_now();
        };
        assert!(matches!(after, Err(ResetError::GenerationFailed(_))));
    }
}
