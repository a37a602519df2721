//! Headless auto-play demo.
//!
//! Usage: `monster-tamer [config.ron] [data-dir]`

use anyhow::{Context, Result};
use monster_tamer::{
    BattleEvent, BattleObserver, BattleSession, Game, GameConfig, GameData, Item, ItemDrop,
    PlayerAction,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_STEPS: u32 = 500;
const POTION_BELOW: f64 = 0.3;
const CATCH_BELOW: f64 = 0.4;
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

fn main() -> Result<()> {
    setup_logging();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&PathBuf::from(&path))
            .with_context(|| format!("loading configuration from {}", path))?,
        None => GameConfig::default(),
    };
    let data_dir = args.next().map_or_else(|| PathBuf::from("data"), PathBuf::from);
    let data = GameData::load_dir(&data_dir)
        .with_context(|| format!("loading data set from {}", data_dir.display()))?;

    let mut game = Game::new(config, data)?;
    game.new_game();
    let starter = game
        .config()
        .starters
        .first()
        .cloned()
        .context("configuration lists no starters")?;
    game.choose_starter(&starter)?;
    print!("{}", game.world().render());

    for step in 0..MAX_STEPS {
        if game.is_game_over() {
            println!("All your creatures have fainted. Game over.");
            break;
        }

        let direction = game.rng_mut().next_int(0, 3, "walk direction") as usize;
        let (dx, dy) = DIRECTIONS[direction];
        let Some(encounter) = game.walk(dx, dy) else {
            continue;
        };
        info!("Step {}: encountered {} (Lv {})", step, encounter.species_id, encounter.level);

        let outcome = {
            let observers: Vec<Box<dyn BattleObserver>> = vec![Box::new(BattleLog)];
            let mut session = game.start_battle(&encounter, observers)?;
            auto_battle(&mut session);
            session.into_outcome()
        };

        game.conclude_battle(&outcome, |from, to, _| {
            println!("{} evolved into {}!", from, to);
        });
    }

    println!("Final party:");
    for pokemon in game.roster().party() {
        println!(
            "  {} Lv {} ({}/{} HP)",
            pokemon.name,
            pokemon.level,
            pokemon.current_hp(),
            pokemon.max_hp()
        );
    }
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Prints the battle log as it happens.
struct BattleLog;

impl BattleObserver for BattleLog {
    fn on_event(&mut self, event: &BattleEvent) -> Result<()> {
        if let Some(line) = event.format() {
            println!("{}", line);
        }
        Ok(())
    }

    fn on_drop(&mut self, drop: &ItemDrop) -> Result<()> {
        println!("Picked up {} x{}", drop.item, drop.quantity);
        Ok(())
    }
}

fn auto_battle(session: &mut BattleSession<'_>) {
    while !session.is_over() {
        let action = choose_action(session);
        if let Err(reason) = session.play(action) {
            warn!("Auto-play action refused: {}", reason);
            if session.play(PlayerAction::Run).is_err() {
                break;
            }
        }
    }
}

fn choose_action(session: &BattleSession<'_>) -> PlayerAction {
    let roster = session.battle.roster();
    let enemy = session.battle.enemy();
    let Some(active) = roster.active() else {
        return PlayerAction::Run;
    };

    if active.hp_fraction() < POTION_BELOW && roster.item_count(&Item::Potion) > 0 {
        return PlayerAction::UseItem { item: Item::Potion };
    }

    if enemy.hp_fraction() < CATCH_BELOW && roster.can_catch() {
        for ball in [Item::GreatBall, Item::PokeBall] {
            if roster.item_count(&ball) > 0 {
                return PlayerAction::Catch { ball };
            }
        }
    }

    match active.moves.iter().position(|m| m.pp > 0) {
        Some(move_index) => PlayerAction::Attack { move_index },
        None => PlayerAction::Run,
    }
}
