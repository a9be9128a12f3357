//! # Paged Reset Scheduler
//!
//! Spreads one reset over many host ticks.
//!
//! ## State Machine
//!
//! ```text
//!   stage_plan()                       resume()
//!  ┌──────────┐   page 0   ┌────────────┐  veto   ┌──────────┐
//!  │   IDLE   │ ─────────► │ INITIATING │ ──────► │ CANCELED │
//!  └──────────┘            └────────────┘         └──────────┘
//!       ▲  world missing /        │ evacuate
//!       │  host failure           ▼
//!       │                   ┌────────────┐  resume() per tick
//!       ├────────────────── │   PAGING   │ ◄──────┐
//!       │                   └────────────┘ ───────┘ budget spent
//!       │                         │ plan exhausted
//!       │                         ▼
//!       │                   ┌────────────┐
//!       └────────────────── │ FINALIZING │  evacuate, broadcast, stats
//!                           └────────────┘
//! ```
//!
//! ## Page Budget
//!
//! A page applies plan entries in order and samples the clock every
//! `page_check_block_stride` entries. Once a page has run longer than
//! `page_elapsed_budget_ms` it stops and returns [`PageStatus::Continue`];
//! the next [`PagedResetScheduler::resume`] picks up at the first entry
//! that was not applied. The budget is soft: a page can overshoot by up to
//! one stride of work.
//!
//! The scheduler never schedules itself. The host calls `resume` once per
//! tick for as long as it answers `Continue`.

use quarry_core::{
    Clock, Host, MineSite, PreResetSignal, ResetConfig, ResetError, ResetResult, ResetVerdict,
};
use quarry_procedural::{BlockPlan, GeneratedPlan};

use crate::apply::apply_block;
use crate::broadcast::broadcast_completed;
use crate::context::ResetContext;
use crate::cursor::ResetCursor;
use crate::safety::evacuate;
use crate::stats::{log_summary, ResetStats};

/// Lifecycle of a paged reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No cycle running. A staged plan waits here for the first resume.
    #[default]
    Idle,
    /// Signal, world lookup and first evacuation.
    Initiating,
    /// Applying the plan a page at a time.
    Paging,
    /// Plan fully applied, second evacuation and broadcast done.
    Finalizing,
    /// A listener vetoed the cycle before anything was touched.
    Canceled,
}

/// What one call to [`PagedResetScheduler::resume`] achieved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageStatus {
    /// Page budget spent. Call again next tick.
    Continue,
    /// The whole cycle is done.
    Complete,
    /// The cycle was vetoed or its world is gone. Nothing to resume.
    Canceled,
    /// A host call failed. The cycle was abandoned and logged.
    Failed,
}

enum Initiation {
    Proceed,
    Vetoed,
    WorldMissing,
}

/// Resumable, time-sliced reset of one mine.
#[derive(Debug)]
pub struct PagedResetScheduler {
    mine: MineSite,
    config: ResetConfig,
    state: SchedulerState,
    plan: Option<BlockPlan>,
    cursor: ResetCursor,
    stats: ResetStats,
}

impl PagedResetScheduler {
    /// Creates an idle scheduler for `mine`.
    #[must_use]
    pub fn new(mine: MineSite, config: ResetConfig) -> Self {
        Self {
            mine,
            config,
            state: SchedulerState::Idle,
            plan: None,
            cursor: ResetCursor::default(),
            stats: ResetStats::default(),
        }
    }

    /// The mine this scheduler resets.
    #[must_use]
    pub fn mine(&self) -> &MineSite {
        &self.mine
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Progress through the current plan.
    #[must_use]
    pub const fn cursor(&self) -> &ResetCursor {
        &self.cursor
    }

    /// Timings of the current or last cycle.
    #[must_use]
    pub const fn stats(&self) -> &ResetStats {
        &self.stats
    }

    /// The staged plan, while a cycle holds one.
    #[must_use]
    pub fn plan(&self) -> Option<&BlockPlan> {
        self.plan.as_ref()
    }

    /// True while a cycle is between its first and last page.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self.state,
            SchedulerState::Initiating | SchedulerState::Paging
        )
    }

    /// Stages a freshly generated plan for the next cycle.
    ///
    /// Resets the cursor and starts new stats seeded with the generation
    /// time. A plan left over from a finished or canceled cycle is replaced.
    ///
    /// # Errors
    ///
    /// [`ResetError::CycleInProgress`] while a cycle is paging, and
    /// [`ResetError::PlanMismatch`] if the plan covers different bounds.
    pub fn stage_plan(&mut self, generated: GeneratedPlan) -> ResetResult<()> {
        if self.is_in_flight() {
            return Err(ResetError::CycleInProgress {
                mine: self.mine.name.clone(),
            });
        }
        if *generated.plan.bounds() != self.mine.bounds {
            return Err(ResetError::PlanMismatch {
                mine: self.mine.name.clone(),
            });
        }

        self.cursor = ResetCursor::for_plan(&generated.plan);
        self.stats = ResetStats::with_generation(generated.generation_time);
        self.plan = Some(generated.plan);
        self.state = SchedulerState::Idle;
        Ok(())
    }

    /// Runs one page of the reset.
    ///
    /// The first call of a cycle raises the pre-reset signal, resolves the
    /// world and evacuates players before its page. The call that applies
    /// the last entry also evacuates again, broadcasts and records stats.
    pub fn resume<H, S, C>(&mut self, ctx: &mut ResetContext<'_, H, S, C>) -> PageStatus
    where
        H: Host,
        S: PreResetSignal + ?Sized,
        C: Clock + ?Sized,
    {
        match self.state {
            SchedulerState::Idle => {
                if self.plan.is_none() {
                    let err = ResetError::NoPlanStaged {
                        mine: self.mine.name.clone(),
                    };
                    tracing::error!(mine = %self.mine.name, error = %err, "nothing to reset");
                    return PageStatus::Failed;
                }
                self.state = SchedulerState::Initiating;
                match self.initiate(ctx) {
                    Ok(Initiation::Proceed) => {}
                    Ok(Initiation::Vetoed | Initiation::WorldMissing) => {
                        return PageStatus::Canceled;
                    }
                    Err(err) => return self.abandon(&err),
                }
            }
            SchedulerState::Initiating | SchedulerState::Paging => {}
            SchedulerState::Finalizing => return PageStatus::Complete,
            SchedulerState::Canceled => return PageStatus::Canceled,
        }

        self.state = SchedulerState::Paging;
        if let Err(err) = self.run_page(ctx) {
            return self.abandon(&err);
        }
        if !self.cursor.is_complete() {
            return PageStatus::Continue;
        }

        self.state = SchedulerState::Finalizing;
        match self.finalize(ctx) {
            Ok(()) => PageStatus::Complete,
            Err(err) => self.abandon(&err),
        }
    }

    fn initiate<H, S, C>(&mut self, ctx: &mut ResetContext<'_, H, S, C>) -> ResetResult<Initiation>
    where
        H: Host,
        S: PreResetSignal + ?Sized,
        C: Clock + ?Sized,
    {
        let start = ctx.clock.now();

        if ctx.signal.pre_reset(&self.mine) == ResetVerdict::Cancel {
            tracing::debug!(mine = %self.mine.name, "reset canceled by listener");
            self.state = SchedulerState::Canceled;
            self.plan = None;
            self.stats.total += ctx.clock.since(start);
            return Ok(Initiation::Vetoed);
        }

        let Some(world) = ctx.host.resolve_world(&self.mine.world) else {
            let err = ResetError::WorldUnresolved {
                mine: self.mine.name.clone(),
                world: self.mine.world.clone(),
            };
            tracing::error!(mine = %self.mine.name, error = %err, "mine reset aborted");
            self.state = SchedulerState::Idle;
            self.plan = None;
            self.stats.total += ctx.clock.since(start);
            return Ok(Initiation::WorldMissing);
        };

        self.stats.teleport_first = evacuate(&mut *ctx.host, &world, &self.mine, ctx.clock)
            .map_err(|e| ResetError::host(&self.mine.name, e))?;
        self.stats.total += ctx.clock.since(start);
        Ok(Initiation::Proceed)
    }

    fn run_page<H, S, C>(&mut self, ctx: &mut ResetContext<'_, H, S, C>) -> ResetResult<()>
    where
        H: Host,
        S: PreResetSignal + ?Sized,
        C: Clock + ?Sized,
    {
        let plan = self.plan.as_ref().ok_or_else(|| ResetError::NoPlanStaged {
            mine: self.mine.name.clone(),
        })?;
        let world = ctx
            .host
            .resolve_world(&self.mine.world)
            .ok_or_else(|| ResetError::WorldUnresolved {
                mine: self.mine.name.clone(),
                world: self.mine.world.clone(),
            })?;

        let page_start = ctx.clock.now();
        let budget = self.config.page_budget();
        let stride = usize::try_from(self.config.page_check_block_stride.max(1))
            .unwrap_or(usize::MAX);
        let fill_mode = self.config.fill_mode;

        let mut position = self.cursor.position();
        let mut visited = 0_usize;
        let outcome = loop {
            let Some(entry) = plan.entry(position) else {
                break Ok(());
            };
            if let Err(e) = apply_block(&mut *ctx.host, &world, entry, fill_mode) {
                break Err(e);
            }
            position += 1;
            visited += 1;
            if visited % stride == 0 && ctx.clock.since(page_start) > budget {
                break Ok(());
            }
        };

        let elapsed = ctx.clock.since(page_start);
        self.cursor.finish_page(position);
        self.stats.record_page(elapsed);

        tracing::debug!(
            mine = %self.mine.name,
            page = self.cursor.page(),
            applied = visited,
            remaining = self.cursor.remaining(),
            "reset page done"
        );
        if elapsed > budget * 2 {
            tracing::warn!(
                mine = %self.mine.name,
                ?elapsed,
                ?budget,
                "reset page overran its budget"
            );
        }

        outcome.map_err(|e| ResetError::host(&self.mine.name, e))
    }

    fn finalize<H, S, C>(&mut self, ctx: &mut ResetContext<'_, H, S, C>) -> ResetResult<()>
    where
        H: Host,
        S: PreResetSignal + ?Sized,
        C: Clock + ?Sized,
    {
        let world = ctx
            .host
            .resolve_world(&self.mine.world)
            .ok_or_else(|| ResetError::WorldUnresolved {
                mine: self.mine.name.clone(),
                world: self.mine.world.clone(),
            })?;
        let host_err = |e| ResetError::host(&self.mine.name, e);
        let start = ctx.clock.now();

        self.stats.teleport_second =
            evacuate(&mut *ctx.host, &world, &self.mine, ctx.clock).map_err(host_err)?;
        self.stats.broadcast = broadcast_completed(
            &mut *ctx.host,
            &world,
            &self.mine,
            self.config.broadcast_radius_blocks,
            ctx.clock,
        )
        .map_err(host_err)?;
        self.stats.total += ctx.clock.since(start);
        self.plan = None;

        tracing::debug!(mine = %self.mine.name, pages = self.cursor.page(), "mine reset complete");
        if self.config.log_stats {
            log_summary(&self.mine, &self.stats);
        }
        Ok(())
    }

    fn abandon(&mut self, err: &ResetError) -> PageStatus {
        tracing::error!(
            mine = %self.mine.name,
            page = self.cursor.page(),
            error = %err,
            "mine reset abandoned"
        );
        self.state = SchedulerState::Idle;
        self.plan = None;
        PageStatus::Failed
    }
}
