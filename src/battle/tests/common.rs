use crate::battle::engine::{Battle, BattleRules};
use crate::battle::observer::BattleObserver;
use crate::battle::drops::ItemDrop;
use crate::battle::state::{BattleEvent, TurnRng};
use crate::player::Roster;
use crate::pokemon::{MoveInstance, PokemonInst};
use crate::species::PokemonFactory;
use schema::{BaseStats, DropEntry, EvolutionRule, MoveData, PokemonType, SpeciesData, TypeChart};
use std::cell::RefCell;
use std::rc::Rc;

pub fn move_data(id: &str, name: &str, power: u32, move_type: PokemonType, pp: u32) -> MoveData {
    MoveData {
        id: id.to_string(),
        name: name.to_string(),
        power,
        move_type,
        pp,
    }
}

fn species(
    id: &str,
    name: &str,
    pokemon_type: PokemonType,
    (hp, atk, def, spd): (u32, u32, u32, u32),
    moves: Vec<MoveData>,
    evolution: &[(&str, u32)],
) -> SpeciesData {
    SpeciesData {
        id: id.to_string(),
        name: name.to_string(),
        pokemon_type,
        base_stats: BaseStats { hp, atk, def, spd },
        moves,
        evolution: evolution
            .iter()
            .map(|(to, level)| EvolutionRule {
                to: to.to_string(),
                level: *level,
            })
            .collect(),
    }
}

/// A small species table covering every evolution shape the engine cares about:
/// three-stage chains, a two-stage chain, a standalone species, an unsorted
/// branching rule list and a rule pointing at a species that does not exist.
pub fn sample_species() -> Vec<SpeciesData> {
    use PokemonType::*;

    let tackle = move_data("tackle", "Tackle", 40, Normal, 35);
    let scratch = move_data("scratch", "Scratch", 40, Normal, 35);
    let ember = move_data("ember", "Ember", 40, Fire, 25);
    let double_kick = move_data("double_kick", "Double Kick", 30, Fighting, 30);
    let blaze_kick = move_data("blaze_kick", "Blaze Kick", 85, Fire, 10);
    let water_gun = move_data("water_gun", "Water Gun", 40, Water, 25);
    let mud_slap = move_data("mud_slap", "Mud-Slap", 20, Ground, 10);
    let pound = move_data("pound", "Pound", 40, Normal, 35);
    let absorb = move_data("absorb", "Absorb", 20, Grass, 25);
    let poison_sting = move_data("poison_sting", "Poison Sting", 15, Poison, 35);
    let bug_bite = move_data("bug_bite", "Bug Bite", 60, Bug, 20);
    let gust = move_data("gust", "Gust", 40, Flying, 35);
    let quick_attack = move_data("quick_attack", "Quick Attack", 40, Normal, 30);
    let thunder_shock = move_data("thunder_shock", "Thunder Shock", 40, Electric, 30);
    let lick = move_data("lick", "Lick", 30, Ghost, 30);

    let fire_moves = vec![
        scratch.clone(),
        ember.clone(),
        double_kick.clone(),
        blaze_kick.clone(),
    ];

    vec![
        species("torchic", "Torchic", Fire, (45, 60, 40, 45), fire_moves.clone(), &[("combusken", 16)]),
        species("combusken", "Combusken", Fire, (60, 85, 60, 55), fire_moves.clone(), &[("blaziken", 36)]),
        species("blaziken", "Blaziken", Fire, (80, 120, 70, 80), fire_moves, &[]),
        species(
            "mudkip",
            "Mudkip",
            Water,
            (50, 70, 50, 40),
            vec![tackle.clone(), water_gun.clone(), mud_slap.clone()],
            &[("marshtomp", 16)],
        ),
        species(
            "marshtomp",
            "Marshtomp",
            Water,
            (70, 85, 70, 50),
            vec![tackle.clone(), water_gun.clone(), mud_slap],
            &[],
        ),
        species("treecko", "Treecko", Grass, (40, 45, 35, 70), vec![pound.clone(), absorb.clone()], &[("grovyle", 16)]),
        species("grovyle", "Grovyle", Grass, (50, 65, 45, 95), vec![pound, absorb], &[]),
        species("zigzagoon", "Zigzagoon", Normal, (38, 30, 41, 60), vec![tackle.clone()], &[]),
        species(
            "wurmple",
            "Wurmple",
            Bug,
            (45, 45, 35, 20),
            vec![tackle.clone(), poison_sting.clone()],
            &[("silcoon", 7)],
        ),
        species(
            "silcoon",
            "Silcoon",
            Bug,
            (50, 35, 55, 15),
            vec![tackle.clone(), poison_sting.clone(), bug_bite.clone()],
            &[("beautifly", 10)],
        ),
        species(
            "beautifly",
            "Beautifly",
            Bug,
            (60, 70, 50, 65),
            vec![tackle.clone(), poison_sting, bug_bite, gust],
            &[],
        ),
        species(
            "eevee",
            "Eevee",
            Normal,
            (55, 55, 50, 55),
            vec![tackle.clone(), quick_attack],
            &[("vaporeon", 20), ("jolteon", 10)],
        ),
        species("vaporeon", "Vaporeon", Water, (130, 65, 60, 65), vec![tackle.clone(), water_gun], &[]),
        species("jolteon", "Jolteon", Electric, (65, 65, 60, 130), vec![tackle, thunder_shock], &[]),
        species("wisp", "Wisp", Ghost, (30, 30, 30, 30), vec![lick], &[("phantom", 5)]),
    ]
}

pub fn sample_factory() -> PokemonFactory {
    PokemonFactory::new(sample_species())
}

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("torchic", 10)
///     .with_moves(vec![move_data("tackle", "Tackle", 40, PokemonType::Normal, 35)])
///     .with_hp(5)
///     .build(&factory);
/// ```
pub struct TestPokemonBuilder {
    species: String,
    level: u32,
    moves: Option<Vec<MoveData>>,
    base_stats: Option<BaseStats>,
    current_hp: Option<u32>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &str, level: u32) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: None,
            base_stats: None,
            current_hp: None,
        }
    }

    /// Replaces the moveset, each move at full PP.
    pub fn with_moves(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Overrides base stats. HP is refilled to the new maximum.
    pub fn with_base_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = Some(base_stats);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self, factory: &PokemonFactory) -> PokemonInst {
        let mut pokemon = match factory.create(&self.species, self.level) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to create test pokemon {}: {}", self.species, err),
        };

        if let Some(moves) = self.moves {
            pokemon.moves = moves.into_iter().map(MoveInstance::new).collect();
        }
        if let Some(base_stats) = self.base_stats {
            pokemon.base_stats = base_stats;
        }

        match self.current_hp {
            Some(hp) => pokemon.set_hp(hp),
            None => pokemon.set_hp_to_max(),
        }

        pokemon
    }
}

/// Static data shared by the battles of one test.
pub struct BattleFixture {
    pub factory: PokemonFactory,
    pub type_chart: TypeChart,
    pub drop_table: Vec<DropEntry>,
}

impl BattleFixture {
    /// Sample species, the standard type chart and no drops, so scripted
    /// RNG sequences don't need drop rolls.
    pub fn new() -> Self {
        Self {
            factory: sample_factory(),
            type_chart: TypeChart::standard(),
            drop_table: Vec::new(),
        }
    }

    pub fn with_drop_table(mut self, drop_table: Vec<DropEntry>) -> Self {
        self.drop_table = drop_table;
        self
    }

    pub fn rules(&self) -> BattleRules<'_> {
        BattleRules {
            factory: &self.factory,
            type_chart: &self.type_chart,
            drop_table: &self.drop_table,
            enemy_turn_delay_ms: 300,
        }
    }

    pub fn pokemon(&self, species: &str, level: u32) -> TestPokemonBuilder {
        TestPokemonBuilder::new(species, level)
    }

    /// Roster holding the given party, first member active, default inventory.
    pub fn roster(&self, party: Vec<PokemonInst>) -> Roster {
        let mut roster = Roster::new();
        for pokemon in party {
            assert!(roster.add_to_party(pokemon), "test party too large");
        }
        roster
    }

    /// Build a battle and move it to Active.
    pub fn start_battle<'a>(&'a self, roster: &'a mut Roster, enemy: PokemonInst) -> Battle<'a> {
        self.start_observed_battle(roster, enemy, Vec::new())
    }

    /// Like [`BattleFixture::start_battle`], with observers registered
    /// before the start announcement.
    pub fn start_observed_battle<'a>(
        &'a self,
        roster: &'a mut Roster,
        enemy: PokemonInst,
        observers: Vec<Box<dyn BattleObserver>>,
    ) -> Battle<'a> {
        let mut battle = Battle::new(roster, enemy, self.rules());
        for observer in observers {
            battle.add_observer(observer);
        }
        if let Err(err) = battle.start() {
            panic!("Failed to start test battle: {}", err);
        }
        battle
    }
}

/// Notification captured by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Update,
    Event(BattleEvent),
    Drop(ItemDrop),
    End(bool),
}

/// Observer that appends every notification to a shared log.
pub struct RecordingObserver {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingObserver {
    pub fn new() -> (Self, Rc<RefCell<Vec<Notification>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl BattleObserver for RecordingObserver {
    fn on_update(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Notification::Update);
        Ok(())
    }

    fn on_event(&mut self, event: &BattleEvent) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Notification::Event(event.clone()));
        Ok(())
    }

    fn on_drop(&mut self, drop: &ItemDrop) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Notification::Drop(drop.clone()));
        Ok(())
    }

    fn on_end(&mut self, victory: bool) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Notification::End(victory));
        Ok(())
    }
}

/// Creates a `TurnRng` that always draws the middle of the range.
/// Variance comes out at exactly 1.0; useful where the outcome doesn't matter.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.5; 100])
}
