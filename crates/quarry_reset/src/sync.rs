//! # Synchronous Reset
//!
//! The whole cycle in one call: signal, generate, evacuate, apply, evacuate,
//! broadcast. The host tick stalls for as long as it takes, so this is for
//! small mines and admin commands.

use quarry_core::{Clock, Host, PreResetSignal, ResetConfig, ResetError, ResetResult, ResetVerdict};
use rand::Rng;

use crate::apply::apply_all;
use crate::broadcast::broadcast_completed;
use crate::context::ResetContext;
use crate::mine::Mine;
use crate::safety::evacuate;
use crate::stats::{log_summary, ResetStats};

/// How a reset cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetStatus {
    /// Every phase ran.
    Completed,
    /// A pre-reset listener vetoed the cycle. Nothing was touched.
    Canceled,
    /// The world was missing or a host call failed. Already logged.
    Failed,
}

/// Outcome of [`SyncResetRunner::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetReport {
    /// How the cycle ended.
    pub status: ResetStatus,
    /// Phase timings up to where it ended.
    pub stats: ResetStats,
}

/// Runs complete reset cycles in a single call.
#[derive(Clone, Debug, Default)]
pub struct SyncResetRunner {
    config: ResetConfig,
}

impl SyncResetRunner {
    /// Creates a runner.
    #[must_use]
    pub fn new(config: ResetConfig) -> Self {
        Self { config }
    }

    /// Runs one full reset cycle for `mine`.
    ///
    /// Never panics on host failure: the error is logged with the mine name
    /// and reported as [`ResetStatus::Failed`].
    pub fn run<H, S, C, R>(
        &self,
        mine: &Mine,
        ctx: &mut ResetContext<'_, H, S, C>,
        rng: &mut R,
    ) -> ResetReport
    where
        H: Host,
        S: PreResetSignal + ?Sized,
        C: Clock + ?Sized,
        R: Rng + ?Sized,
    {
        let start = ctx.clock.now();
        let mut stats = ResetStats::default();

        let status = if ctx.signal.pre_reset(&mine.site) == ResetVerdict::Cancel {
            tracing::debug!(mine = %mine.name(), "reset canceled by listener");
            ResetStatus::Canceled
        } else {
            match self.reset(mine, ctx, rng, &mut stats) {
                Ok(()) => ResetStatus::Completed,
                Err(err) => {
                    tracing::error!(mine = %mine.name(), error = %err, "mine reset failed");
                    ResetStatus::Failed
                }
            }
        };

        stats.total = ctx.clock.since(start);
        if status == ResetStatus::Completed && self.config.log_stats {
            log_summary(&mine.site, &stats);
        }

        ResetReport { status, stats }
    }

    fn reset<H, S, C, R>(
        &self,
        mine: &Mine,
        ctx: &mut ResetContext<'_, H, S, C>,
        rng: &mut R,
        stats: &mut ResetStats,
    ) -> ResetResult<()>
    where
        H: Host,
        S: PreResetSignal + ?Sized,
        C: Clock + ?Sized,
        R: Rng + ?Sized,
    {
        let site = &mine.site;
        let world = ctx
            .host
            .resolve_world(&site.world)
            .ok_or_else(|| ResetError::WorldUnresolved {
                mine: site.name.clone(),
                world: site.world.clone(),
            })?;
        let host_err = |e| ResetError::host(&site.name, e);

        let generated = mine.generate_plan(rng, ctx.clock);
        stats.generation = generated.generation_time;

        stats.teleport_first =
            evacuate(&mut *ctx.host, &world, site, ctx.clock).map_err(host_err)?;

        let update_start = ctx.clock.now();
        apply_all(&mut *ctx.host, &world, &generated.plan, self.config.fill_mode)
            .map_err(host_err)?;
        stats.block_update = ctx.clock.since(update_start);
        drop(generated);

        stats.teleport_second =
            evacuate(&mut *ctx.host, &world, site, ctx.clock).map_err(host_err)?;

        stats.broadcast = broadcast_completed(
            &mut *ctx.host,
            &world,
            site,
            self.config.broadcast_radius_blocks,
            ctx.clock,
        )
        .map_err(host_err)?;

        Ok(())
    }
}
