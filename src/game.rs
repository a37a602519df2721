//! Session driver: the world, the roster and the battles fought on it.

use crate::battle::engine::{Battle, BattleOutcome, BattleRules, PlayerAction};
use crate::battle::observer::BattleObserver;
use crate::battle::state::TurnRng;
use crate::config::GameConfig;
use crate::data::GameData;
use crate::errors::{ActionResult, BattleResult, SpeciesDataError};
use crate::player::Roster;
use crate::progression::{LevelUpReport, RewardCalculator};
use crate::species::PokemonFactory;
use crate::world::{Encounter, EncounterGenerator, WorldMap};
use tracing::info;

/// One play session.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    data: GameData,
    factory: PokemonFactory,
    roster: Roster,
    world: WorldMap,
    encounters: EncounterGenerator,
    rng: TurnRng,
    rewards: RewardCalculator,
}

/// A running battle together with the session's randomness source.
pub struct BattleSession<'a> {
    pub battle: Battle<'a>,
    rng: &'a mut TurnRng,
}

impl<'a> BattleSession<'a> {
    /// Apply a player action and, if it queued one, the enemy's reply.
    pub fn play(&mut self, action: PlayerAction) -> ActionResult<()> {
        self.battle.step(action, self.rng)
    }

    pub fn submit(&mut self, action: PlayerAction) -> ActionResult<()> {
        self.battle.submit(action, self.rng)
    }

    pub fn resolve_enemy_turn(&mut self) -> bool {
        self.battle.resolve_enemy_turn(self.rng)
    }

    pub fn is_over(&self) -> bool {
        self.battle.is_over()
    }

    pub fn into_outcome(self) -> BattleOutcome {
        self.battle.into_outcome()
    }
}

impl Game {
    pub fn new(config: GameConfig, data: GameData) -> BattleResult<Self> {
        let rng = match config.rng_seed {
            Some(seed) => TurnRng::seeded(seed),
            None => TurnRng::new_random(),
        };
        Self::with_rng(config, data, rng)
    }

    /// Build a session drawing all randomness from `rng`.
    pub fn with_rng(config: GameConfig, data: GameData, mut rng: TurnRng) -> BattleResult<Self> {
        let factory = PokemonFactory::new(data.species.clone());
        if let Some(missing) = config
            .starters
            .iter()
            .find(|id| factory.find_spec(id).is_none())
        {
            return Err(SpeciesDataError::SpeciesNotFound(missing.clone()).into());
        }

        let world = WorldMap::generate(config.map_width, config.map_height, &mut rng);
        let encounters = EncounterGenerator::new(data.wild_pool.clone());
        let roster = Roster::with_inventory(config.starting_inventory.clone());

        Ok(Self {
            config,
            data,
            factory,
            roster,
            world,
            encounters,
            rng,
            rewards: RewardCalculator,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn factory(&self) -> &PokemonFactory {
        &self.factory
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn encounters(&self) -> &EncounterGenerator {
        &self.encounters
    }

    pub fn rng_mut(&mut self) -> &mut TurnRng {
        &mut self.rng
    }

    /// Empty party, starting inventory and a fresh map.
    pub fn new_game(&mut self) {
        self.roster.reset(self.config.starting_inventory.clone());
        self.world = WorldMap::generate(self.config.map_width, self.config.map_height, &mut self.rng);
        self.encounters = EncounterGenerator::new(self.data.wild_pool.clone());
        info!("New game on a {}x{} map", self.world.width(), self.world.height());
    }

    /// Create the starter and step into the world. The first step never
    /// triggers an encounter.
    pub fn choose_starter(&mut self, species_id: &str) -> BattleResult<()> {
        let starter = self.factory.create(species_id, self.config.starter_level)?;
        info!("Starter chosen: {} (Lv {})", starter.name, starter.level);
        self.roster.choose_starter(starter);
        self.encounters.suppress_next();
        Ok(())
    }

    /// Move one step. Returns the wild creature the player ran into, if any.
    pub fn walk(&mut self, dx: i32, dy: i32) -> Option<Encounter> {
        let tile = self.world.step(dx, dy)?;
        self.encounters
            .try_encounter(tile, self.config.encounter_chance, &self.roster, &mut self.rng)
    }

    /// Build the wild creature and start the battle. `observers` are
    /// registered first so they see the start announcement.
    pub fn start_battle(
        &mut self,
        encounter: &Encounter,
        observers: Vec<Box<dyn BattleObserver>>,
    ) -> BattleResult<BattleSession<'_>> {
        let enemy = self.factory.create(&encounter.species_id, encounter.level)?;
        let rules = BattleRules {
            factory: &self.factory,
            type_chart: &self.data.type_chart,
            drop_table: &self.data.drop_table,
            enemy_turn_delay_ms: self.config.enemy_turn_delay_ms,
        };
        let mut battle = Battle::new(&mut self.roster, enemy, rules);
        for observer in observers {
            battle.add_observer(observer);
        }
        battle.start()?;
        Ok(BattleSession {
            battle,
            rng: &mut self.rng,
        })
    }

    /// Apply the cross-battle effects of a finished battle: suppress the next
    /// encounter, credit drops, and on victory grant the defeat experience
    /// to the active creature. `on_evolve(from, to, slot)` fires per evolution.
    pub fn conclude_battle<F>(&mut self, outcome: &BattleOutcome, on_evolve: F) -> Option<LevelUpReport>
    where
        F: FnMut(&str, &str, usize),
    {
        self.encounters.suppress_next();

        for drop in &outcome.drops {
            self.roster.add_item(drop.item.clone(), drop.quantity);
        }

        if !outcome.is_victory() {
            info!("Battle against {} ended: {:?}", outcome.enemy_species, outcome.status);
            return None;
        }

        let exp = self.rewards.exp_for_defeating(outcome.enemy_level);
        info!("Victory over {}: +{} exp", outcome.enemy_species, exp);
        self.roster.give_exp_to_active(exp, &self.factory, on_evolve)
    }

    /// True once no living creature is left in the party.
    pub fn is_game_over(&self) -> bool {
        !self.roster.has_living_member()
    }
}
