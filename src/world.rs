//! The overworld tile map and the wild encounter generator.

use crate::battle::state::TurnRng;
use crate::player::Roster;
use schema::{SpawnEntry, Tile};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Tile generation thresholds on a unit roll
const WATER_BELOW: f64 = 0.12;
const GRASS_BELOW: f64 = 0.45;

// Wild level = active level + uniform(0..=4) - 2, floored at 2
const LEVEL_SPREAD: u32 = 4;
const LEVEL_OFFSET: i64 = 2;
const MIN_WILD_LEVEL: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMap {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
    player_pos: Position,
}

impl WorldMap {
    /// Random map with the player standing on ground in the centre.
    pub fn generate(width: usize, height: usize, rng: &mut TurnRng) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut grid: Vec<Vec<Tile>> = Vec::with_capacity(height);
        for _ in 0..height {
            let row: Vec<Tile> = (0..width)
                .map(|_| {
                    let roll = rng.next_unit("map tile");
                    if roll < WATER_BELOW {
                        Tile::Water
                    } else if roll < GRASS_BELOW {
                        Tile::Grass
                    } else {
                        Tile::Ground
                    }
                })
                .collect();
            grid.push(row);
        }

        let player_pos = Position {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
        };
        grid[player_pos.y as usize][player_pos.x as usize] = Tile::Ground;

        Self {
            width,
            height,
            grid,
            player_pos,
        }
    }

    /// Map from an explicit grid. Rows must all have the same length.
    pub fn from_grid(grid: Vec<Vec<Tile>>, player_pos: Position) -> Self {
        let height = grid.len();
        let width = grid.first().map_or(0, Vec::len);
        Self {
            width,
            height,
            grid,
            player_pos,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_pos(&self) -> Position {
        self.player_pos
    }

    /// Tile at the given coordinates. Everything off the map is water.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 {
            return Tile::Water;
        }
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(Tile::Water)
    }

    /// Move the player by one step. Returns the entered tile, or None when
    /// the target is not walkable and the player stays put.
    pub fn step(&mut self, dx: i32, dy: i32) -> Option<Tile> {
        let target = Position {
            x: self.player_pos.x + dx,
            y: self.player_pos.y + dy,
        };
        let tile = self.tile_at(target.x, target.y);
        if !tile.is_walkable() {
            return None;
        }
        self.player_pos = target;
        Some(tile)
    }

    /// ASCII rendering: `~` water, `"` grass, `.` ground, `@` player.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for (y, row) in self.grid.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let symbol = if x as i32 == self.player_pos.x && y as i32 == self.player_pos.y {
                    '@'
                } else {
                    match tile {
                        Tile::Water => '~',
                        Tile::Grass => '"',
                        Tile::Ground => '.',
                    }
                };
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }
}

/// A wild creature waiting to be fought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub species_id: String,
    pub level: u32,
}

/// Decides when and what the player runs into on grass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterGenerator {
    pool: Vec<SpawnEntry>,
    skip_next: bool,
}

impl EncounterGenerator {
    pub fn new(pool: Vec<SpawnEntry>) -> Self {
        Self {
            pool,
            skip_next: false,
        }
    }

    pub fn pool(&self) -> &[SpawnEntry] {
        &self.pool
    }

    /// Skip the next encounter check, e.g. right after a battle.
    pub fn suppress_next(&mut self) {
        self.skip_next = true;
    }

    pub fn is_suppressed(&self) -> bool {
        self.skip_next
    }

    pub fn try_encounter(
        &mut self,
        tile: Tile,
        base_chance: f64,
        roster: &Roster,
        rng: &mut TurnRng,
    ) -> Option<Encounter> {
        let active = roster.active_alive()?;

        if self.skip_next {
            debug!("Encounter suppressed");
            self.skip_next = false;
            return None;
        }
        if tile != Tile::Grass {
            return None;
        }
        if rng.next_unit("encounter chance") >= base_chance {
            return None;
        }

        let entry = self.sample_species(rng)?;
        let offset = rng.next_int(0, LEVEL_SPREAD, "wild level") as i64;
        let level = (active.level as i64 + offset - LEVEL_OFFSET).max(MIN_WILD_LEVEL) as u32;
        debug!("Wild encounter: {} at level {}", entry.id, level);

        Some(Encounter {
            species_id: entry.id.clone(),
            level,
        })
    }

    /// Weighted pick among entries with a positive, finite weight.
    pub fn sample_species(&self, rng: &mut TurnRng) -> Option<&SpawnEntry> {
        let valid: Vec<&SpawnEntry> = self
            .pool
            .iter()
            .filter(|entry| entry.weight.is_finite() && entry.weight > 0.0)
            .collect();
        let total: f64 = valid.iter().map(|entry| entry.weight).sum();
        if valid.is_empty() || !total.is_finite() || total <= 0.0 {
            warn!("Wild spawn pool has no usable weights");
            return None;
        }

        let roll = rng.next_unit("spawn pick") * total;
        let mut cumulative = 0.0;
        for entry in &valid {
            cumulative += entry.weight;
            if roll <= cumulative {
                return Some(entry);
            }
        }
        valid.last().copied()
    }
}
