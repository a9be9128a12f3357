//! # Simulated Host
//!
//! Worlds are sparse maps of non-air blocks. Players live in a flat list.
//! Every notice sent is kept so tests can read it back.
//!
//! ## Fault Injection
//!
//! - [`SimHost::fail_writes_after`]: the write after the first `n` fails
//! - [`SimHost::fail_teleports`]: every teleport fails
//! - [`SimHost::remove_world`]: the world stops resolving
//! - [`SimHost::charge_writes`]: each write advances a [`ManualClock`]

use std::collections::HashMap;
use std::time::Duration;

use quarry_core::{
    BlockPos, BlockType, HostError, HostResult, Location, MessageSink, Notice, PlayerId,
    PlayerRoster, PlayerView, RegionBounds, WorldMutator, WorldResolver,
};

use crate::clock::ManualClock;

/// A player known to the simulated host.
#[derive(Clone, Debug, PartialEq)]
pub struct SimPlayer {
    /// Identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// World the player is in.
    pub world: String,
    /// Current position.
    pub location: Location,
}

impl SimPlayer {
    fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            location: self.location,
        }
    }
}

/// In-memory host platform.
#[derive(Debug)]
pub struct SimHost {
    worlds: HashMap<String, HashMap<BlockPos, BlockType>>,
    players: Vec<SimPlayer>,
    next_player: u128,
    scoped_roster: bool,
    messages: Vec<(PlayerId, Notice)>,
    write_log: Vec<(BlockPos, BlockType)>,
    fail_writes_after: Option<usize>,
    fail_teleports: bool,
    write_charge: Option<(ManualClock, Duration)>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self {
            worlds: HashMap::new(),
            players: Vec::new(),
            next_player: 1,
            scoped_roster: true,
            messages: Vec::new(),
            write_log: Vec::new(),
            fail_writes_after: None,
            fail_teleports: false,
            write_charge: None,
        }
    }
}

impl SimHost {
    /// A host with no worlds and no players.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty world (builder form).
    #[must_use]
    pub fn with_world(mut self, name: &str) -> Self {
        self.add_world(name);
        self
    }

    /// Adds an empty world. An existing world of that name is kept.
    pub fn add_world(&mut self, name: &str) {
        self.worlds.entry(name.to_owned()).or_default();
    }

    /// Unloads a world. Its blocks are gone.
    pub fn remove_world(&mut self, name: &str) {
        self.worlds.remove(name);
    }

    /// Block at `pos`. Air for unknown worlds and untouched cells.
    #[must_use]
    pub fn block_at(&self, world: &str, pos: BlockPos) -> BlockType {
        self.worlds
            .get(world)
            .and_then(|blocks| blocks.get(&pos))
            .copied()
            .unwrap_or(BlockType::AIR)
    }

    /// Places a block without going through the write log.
    pub fn set_block(&mut self, world: &str, pos: BlockPos, block: BlockType) {
        if let Some(blocks) = self.worlds.get_mut(world) {
            store(blocks, pos, block);
        }
    }

    /// Fills a whole region without going through the write log.
    pub fn fill(&mut self, world: &str, bounds: RegionBounds, block: BlockType) {
        let Some(blocks) = self.worlds.get_mut(world) else {
            return;
        };
        let (min, max) = (bounds.min(), bounds.max());
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                for z in min.z..=max.z {
                    store(blocks, BlockPos::new(x, y, z), block);
                }
            }
        }
    }

    /// Adds an online player and returns their id.
    pub fn add_player(&mut self, name: &str, world: &str, location: Location) -> PlayerId {
        let id = PlayerId(self.next_player);
        self.next_player += 1;
        self.players.push(SimPlayer {
            id,
            name: name.to_owned(),
            world: world.to_owned(),
            location,
        });
        id
    }

    /// Looks a player up.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&SimPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The snapshot the engine would see for a player.
    #[must_use]
    pub fn player_view(&self, id: PlayerId) -> Option<PlayerView> {
        self.player(id).map(SimPlayer::view)
    }

    /// Moves a player without a teleport (walking).
    pub fn move_player(&mut self, id: PlayerId, to: Location) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.location = to;
        }
    }

    /// Whether [`PlayerRoster::players_in`] can answer per world.
    ///
    /// When false the engine falls back to every online player.
    pub fn set_scoped_roster(&mut self, scoped: bool) {
        self.scoped_roster = scoped;
    }

    /// Every notice sent, in order.
    #[must_use]
    pub fn messages(&self) -> &[(PlayerId, Notice)] {
        &self.messages
    }

    /// Notices sent to one player, in order.
    #[must_use]
    pub fn messages_for(&self, id: PlayerId) -> Vec<Notice> {
        self.messages
            .iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    /// Engine block writes, in order.
    #[must_use]
    pub fn write_log(&self) -> &[(BlockPos, BlockType)] {
        &self.write_log
    }

    /// Number of engine block writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_log.len()
    }

    /// Lets `n` more writes succeed, then fails every write after them.
    pub fn fail_writes_after(&mut self, n: usize) {
        self.fail_writes_after = Some(self.write_log.len() + n);
    }

    /// Makes every teleport fail.
    pub fn fail_teleports(&mut self, fail: bool) {
        self.fail_teleports = fail;
    }

    /// Advances `clock` by `cost` on every block write.
    pub fn charge_writes(&mut self, clock: ManualClock, cost: Duration) {
        self.write_charge = Some((clock, cost));
    }

    fn world_blocks(&self, world: &str) -> HostResult<&HashMap<BlockPos, BlockType>> {
        self.worlds
            .get(world)
            .ok_or_else(|| HostError::Other(format!("world {world} is not loaded")))
    }
}

fn store(blocks: &mut HashMap<BlockPos, BlockType>, pos: BlockPos, block: BlockType) {
    if block.is_empty() {
        blocks.remove(&pos);
    } else {
        blocks.insert(pos, block);
    }
}

impl WorldResolver for SimHost {
    type World = String;

    fn resolve_world(&self, name: &str) -> Option<String> {
        self.worlds.contains_key(name).then(|| name.to_owned())
    }
}

impl WorldMutator for SimHost {
    fn is_empty(&self, world: &String, pos: BlockPos) -> HostResult<bool> {
        Ok(!self.world_blocks(world)?.contains_key(&pos))
    }

    fn set_block_type(
        &mut self,
        world: &String,
        pos: BlockPos,
        block: BlockType,
    ) -> HostResult<()> {
        if self
            .fail_writes_after
            .is_some_and(|limit| self.write_log.len() >= limit)
        {
            return Err(HostError::BlockAccess {
                pos,
                reason: "injected write failure".into(),
            });
        }
        let blocks = self
            .worlds
            .get_mut(world)
            .ok_or_else(|| HostError::Other(format!("world {world} is not loaded")))?;

        store(blocks, pos, block);
        self.write_log.push((pos, block));
        if let Some((clock, cost)) = &self.write_charge {
            clock.advance(*cost);
        }
        Ok(())
    }
}

impl PlayerRoster for SimHost {
    fn players_in(&self, world: &String) -> Option<Vec<PlayerView>> {
        self.scoped_roster.then(|| {
            self.players
                .iter()
                .filter(|p| p.world == *world)
                .map(SimPlayer::view)
                .collect()
        })
    }

    fn online_players(&self) -> Vec<PlayerView> {
        self.players.iter().map(SimPlayer::view).collect()
    }

    fn teleport(&mut self, player: PlayerId, to: Location) -> HostResult<()> {
        let fail = self.fail_teleports;
        let Some(target) = self.players.iter_mut().find(|p| p.id == player) else {
            return Err(HostError::Teleport {
                player: format!("#{}", player.0),
                reason: "player is offline".into(),
            });
        };
        if fail {
            return Err(HostError::Teleport {
                player: target.name.clone(),
                reason: "injected teleport failure".into(),
            });
        }
        target.location = to;
        Ok(())
    }
}

impl MessageSink for SimHost {
    fn send(&mut self, player: PlayerId, notice: &Notice) -> HostResult<()> {
        self.messages.push((player, notice.clone()));
        Ok(())
    }
}
