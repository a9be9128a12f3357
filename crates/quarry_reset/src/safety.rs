//! # Player Safety
//!
//! Moves players out of a mine before and after its blocks change.
//!
//! The target is the mine's spawn point, or the top-center of the region.
//! If the block under the target is empty it is turned into glass first so
//! nobody lands in a hole.

use std::time::Duration;

use quarry_core::{BlockType, Clock, Host, HostResult, MineSite, Notice, PlayerView};

/// Teleports every player standing inside the mine to safety.
///
/// The roster is the mine's world when the host can scope it, otherwise
/// every online player. Returns the time the pass took.
///
/// # Errors
///
/// Stops at the first host failure and returns it.
pub fn evacuate<H, C>(
    host: &mut H,
    world: &H::World,
    mine: &MineSite,
    clock: &C,
) -> HostResult<Duration>
where
    H: Host,
    C: Clock + ?Sized,
{
    let start = clock.now();
    let players = host.players_or_online(world);

    let mut moved = 0_usize;
    for player in players.iter().filter(|p| mine.bounds.contains(p.location)) {
        teleport_out(host, world, mine, player)?;
        moved += 1;
    }

    if moved > 0 {
        tracing::debug!(mine = %mine.name, moved, "players evacuated");
    }
    Ok(clock.since(start))
}

/// Teleports one player to the mine's evacuation target and tells them why.
///
/// # Errors
///
/// Returns the host failure from the glass placement, teleport or message.
pub fn teleport_out<H: Host>(
    host: &mut H,
    world: &H::World,
    mine: &MineSite,
    player: &PlayerView,
) -> HostResult<()> {
    let target = mine.evacuation_target();
    let floor = target.block().below();
    if host.is_empty(world, floor)? {
        host.set_block_type(world, floor, BlockType::GLASS)?;
    }

    host.teleport(player.id, target)?;
    host.send(
        player.id,
        &Notice::Teleported {
            mine: mine.name.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{BlockPos, Location, RegionBounds, WorldResolver};
    use quarry_sim::{ManualClock, SimHost};

    fn site() -> MineSite {
        MineSite::new(
            "north",
            "world",
            RegionBounds::new(BlockPos::new(0, 10, 0), BlockPos::new(9, 19, 9)),
        )
    }

    #[test]
    fn test_only_players_inside_are_moved() {
        let mut host = SimHost::new().with_world("world");
        let inside = host.add_player("miner", "world", Location::new(3.5, 12.0, 3.5));
        let outside = host.add_player("walker", "world", Location::new(30.5, 12.0, 3.5));
        let world = host.resolve_world("world").unwrap();

        evacuate(&mut host, &world, &site(), &ManualClock::new()).unwrap();

        let target = Location::new(5.0, 20.0, 5.0);
        assert_eq!(host.player(inside).unwrap().location, target);
        assert_eq!(host.player(outside).unwrap().location, Location::new(30.5, 12.0, 3.5));
        assert_eq!(
            host.messages_for(inside),
            vec![Notice::Teleported { mine: "north".into() }]
        );
        assert!(host.messages_for(outside).is_empty());
    }

    #[test]
    fn test_glass_is_placed_under_empty_target() {
        let mut host = SimHost::new().with_world("world");
        let id = host.add_player("miner", "world", Location::new(1.5, 11.0, 1.5));
        let world = host.resolve_world("world").unwrap();
        let view = host.player_view(id).unwrap();

        teleport_out(&mut host, &world, &site(), &view).unwrap();

        assert_eq!(host.block_at("world", BlockPos::new(5, 19, 5)), BlockType::GLASS);
    }

    #[test]
    fn test_solid_floor_is_left_alone() {
        let mut host = SimHost::new().with_world("world");
        host.set_block("world", BlockPos::new(5, 19, 5), BlockType::STONE);
        let id = host.add_player("miner", "world", Location::new(1.5, 11.0, 1.5));
        let world = host.resolve_world("world").unwrap();
        let view = host.player_view(id).unwrap();

        teleport_out(&mut host, &world, &site(), &view).unwrap();

        assert_eq!(host.block_at("world", BlockPos::new(5, 19, 5)), BlockType::STONE);
    }

    #[test]
    fn test_spawn_point_wins() {
        let spawn = Location::new(-20.5, 64.0, 4.5);
        let site = site().with_spawn(spawn);
        let mut host = SimHost::new().with_world("world");
        let id = host.add_player("miner", "world", Location::new(1.5, 11.0, 1.5));
        let world = host.resolve_world("world").unwrap();

        evacuate(&mut host, &world, &site, &ManualClock::new()).unwrap();

        assert_eq!(host.player(id).unwrap().location, spawn);
        assert_eq!(host.block_at("world", BlockPos::new(-21, 63, 4)), BlockType::GLASS);
    }

    #[test]
    fn test_falls_back_to_online_roster() {
        let mut host = SimHost::new().with_world("world").with_world("nether");
        host.set_scoped_roster(false);
        // Same coordinates, other world: the unscoped roster cannot tell.
        let id = host.add_player("visitor", "nether", Location::new(2.5, 12.0, 2.5));
        let world = host.resolve_world("world").unwrap();

        evacuate(&mut host, &world, &site(), &ManualClock::new()).unwrap();

        assert_eq!(host.player(id).unwrap().location, Location::new(5.0, 20.0, 5.0));
    }

    #[test]
    fn test_teleport_failure_propagates() {
        let mut host = SimHost::new().with_world("world");
        host.add_player("miner", "world", Location::new(1.5, 11.0, 1.5));
        host.fail_teleports(true);
        let world = host.resolve_world("world").unwrap();

        assert!(evacuate(&mut host, &world, &site(), &ManualClock::new()).is_err());
    }
}
