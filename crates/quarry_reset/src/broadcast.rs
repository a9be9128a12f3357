//! # Broadcasts
//!
//! Notices to players near a mine. "Near" is a sphere of
//! `broadcast_radius_blocks` around the mine center.

use std::time::Duration;

use quarry_core::{Clock, Host, HostResult, MineSite, Notice, ResetError, ResetResult};

/// Tells nearby players the mine has just reset. Returns the time it took.
///
/// # Errors
///
/// Stops at the first messaging failure and returns it.
pub fn broadcast_completed<H, C>(
    host: &mut H,
    world: &H::World,
    mine: &MineSite,
    radius: u32,
    clock: &C,
) -> HostResult<Duration>
where
    H: Host,
    C: Clock + ?Sized,
{
    let start = clock.now();
    let notice = Notice::ResetCompleted {
        mine: mine.name.clone(),
    };
    broadcast(host, world, mine, radius, &notice)?;
    Ok(clock.since(start))
}

/// Warns nearby players that the mine resets in `seconds_until` seconds.
///
/// Returns how many players were told.
///
/// # Errors
///
/// Returns [`ResetError::WorldUnresolved`] if the mine's world is gone, or
/// the messaging failure wrapped in [`ResetError::Host`].
pub fn broadcast_pending<H: Host>(
    host: &mut H,
    mine: &MineSite,
    radius: u32,
    seconds_until: u64,
) -> ResetResult<usize> {
    let world = host
        .resolve_world(&mine.world)
        .ok_or_else(|| ResetError::WorldUnresolved {
            mine: mine.name.clone(),
            world: mine.world.clone(),
        })?;
    let notice = Notice::ResetPending {
        mine: mine.name.clone(),
        seconds_until,
    };
    broadcast(host, &world, mine, radius, &notice).map_err(|e| ResetError::host(&mine.name, e))
}

fn broadcast<H: Host>(
    host: &mut H,
    world: &H::World,
    mine: &MineSite,
    radius: u32,
    notice: &Notice,
) -> HostResult<usize> {
    let players = host.players_or_online(world);
    let mut told = 0;
    for player in players
        .iter()
        .filter(|p| mine.bounds.within_radius(p.location, radius))
    {
        host.send(player.id, notice)?;
        told += 1;
    }
    Ok(told)
}
