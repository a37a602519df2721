use crate::battle::calculators::{calculate_damage, effectiveness, escape_chance, roll_variance};
use crate::battle::catch::{calculate_catch_chance, can_attempt_catch, roll_catch_success};
use crate::battle::drops::{roll_drops, ItemDrop};
use crate::battle::observer::{BattleObserver, ObserverList};
use crate::battle::state::{BattleEvent, BattleStatus, EventBus, Side, TurnPhase, TurnRng};
use crate::errors::{ActionRejection, ActionResult};
use crate::player::Roster;
use crate::pokemon::PokemonInst;
use crate::progression::RewardCalculator;
use crate::species::PokemonFactory;
use schema::{DropEntry, Item, TypeChart};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const POTION_HEAL: u32 = 20;
const CAUGHT_HP_RATIO: f64 = 0.5;

/// A single player decision.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum PlayerAction {
    // The index refers to the move's position in the active pokemon's move list.
    Attack { move_index: usize },
    UseItem { item: Item },
    // The index refers to the pokemon's position in the party.
    Switch { team_index: usize },
    Run,
    Catch { ball: Item },
}

/// Read-only data a battle needs besides the two combatants.
#[derive(Debug, Clone, Copy)]
pub struct BattleRules<'a> {
    pub factory: &'a PokemonFactory,
    pub type_chart: &'a TypeChart,
    pub drop_table: &'a [DropEntry],
    /// Advisory pause before the enemy acts, for presentation layers
    pub enemy_turn_delay_ms: u64,
}

/// What the caller needs once the battle is over.
#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub status: BattleStatus,
    pub enemy_species: String,
    pub enemy_level: u32,
    pub drops: Vec<ItemDrop>,
    pub events: EventBus,
}

impl BattleOutcome {
    pub fn is_victory(&self) -> bool {
        self.status.is_victory()
    }
}

/// Numbers produced by one resolved attack, captured so events can be
/// emitted once the combatant borrows are released.
struct AttackReport {
    attacker: String,
    defender: String,
    move_name: String,
    multiplier: f64,
    damage: u32,
    remaining_hp: u32,
    fainted: bool,
}

/// One wild encounter from start to finish.
///
/// The battle borrows the roster for its whole lifetime and mutates it
/// directly (HP, PP, inventory, party). Cross-battle effects such as the
/// victory experience award and crediting drops belong to the caller, who
/// gets them from [`Battle::into_outcome`].
pub struct Battle<'a> {
    roster: &'a mut Roster,
    enemy: PokemonInst,
    rules: BattleRules<'a>,
    status: BattleStatus,
    events: EventBus,
    observers: ObserverList,
    drops: Vec<ItemDrop>,
    rewards: RewardCalculator,
}

impl<'a> Battle<'a> {
    pub fn new(roster: &'a mut Roster, enemy: PokemonInst, rules: BattleRules<'a>) -> Self {
        Self {
            roster,
            enemy,
            rules,
            status: BattleStatus::Idle,
            events: EventBus::new(),
            observers: ObserverList::new(),
            drops: Vec::new(),
            rewards: RewardCalculator,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.add(observer);
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn awaiting_enemy(&self) -> bool {
        self.status == BattleStatus::Active(TurnPhase::AwaitingEnemyResolution)
    }

    pub fn enemy(&self) -> &PokemonInst {
        &self.enemy
    }

    pub fn roster(&self) -> &Roster {
        self.roster
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn drops(&self) -> &[ItemDrop] {
        &self.drops
    }

    /// Move from Idle to Active and announce the encounter.
    pub fn start(&mut self) -> ActionResult<()> {
        match self.status {
            BattleStatus::Idle => {}
            status if status.is_terminal() => return Err(self.reject(ActionRejection::BattleOver)),
            _ => return Ok(()),
        }
        let active = match self.roster.active_alive() {
            Some(active) => active.name.clone(),
            None => return Err(self.reject(ActionRejection::NoActivePokemon)),
        };

        self.status = BattleStatus::Active(TurnPhase::AwaitingPlayerAction);
        info!(
            "Battle started: {} (Lv {}) vs {}",
            self.enemy.name, self.enemy.level, active
        );
        self.update();
        self.emit(BattleEvent::BattleStarted {
            enemy: self.enemy.name.clone(),
            enemy_level: self.enemy.level,
            active,
        });
        Ok(())
    }

    /// Check an action against the current state without changing anything.
    pub fn validate_action(&self, action: &PlayerAction) -> ActionResult<()> {
        match self.status {
            BattleStatus::Idle => return Err(ActionRejection::NotStarted),
            BattleStatus::Active(TurnPhase::AwaitingEnemyResolution) => {
                return Err(ActionRejection::TurnLocked)
            }
            BattleStatus::Active(TurnPhase::AwaitingPlayerAction) => {}
            _ => return Err(ActionRejection::BattleOver),
        }

        match action {
            PlayerAction::Attack { move_index } => {
                let active = self.living_active()?;
                let move_instance = active
                    .move_at(*move_index)
                    .ok_or(ActionRejection::InvalidMoveIndex(*move_index))?;
                if move_instance.pp == 0 {
                    return Err(ActionRejection::NoPpRemaining(move_instance.name().to_string()));
                }
            }
            PlayerAction::UseItem { item } => match item {
                Item::Potion | Item::PpRestore => {
                    if self.roster.item_count(item) == 0 {
                        return Err(ActionRejection::OutOfItem(item.clone()));
                    }
                    if self.roster.active().is_none() {
                        return Err(ActionRejection::NoActivePokemon);
                    }
                }
                other => return Err(ActionRejection::UnsupportedItem(other.clone())),
            },
            PlayerAction::Switch { team_index } => {
                if Some(*team_index) == self.roster.active_index() {
                    return Err(ActionRejection::AlreadyActive);
                }
                if !self.roster.can_switch_to(*team_index) {
                    return Err(ActionRejection::InvalidSwitchTarget(*team_index));
                }
            }
            PlayerAction::Run => {
                self.living_active()?;
            }
            PlayerAction::Catch { ball } => can_attempt_catch(self.roster(), ball)?,
        }
        Ok(())
    }

    /// Apply one player action. On success the battle is either over or
    /// waiting for [`Battle::resolve_enemy_turn`].
    pub fn submit(&mut self, action: PlayerAction, rng: &mut TurnRng) -> ActionResult<()> {
        if let Err(reason) = self.validate_action(&action) {
            return Err(self.reject(reason));
        }
        debug!("Player action: {:?}", action);

        match action {
            PlayerAction::Attack { move_index } => self.execute_player_attack(move_index, rng),
            PlayerAction::UseItem { item } => self.execute_item(item),
            PlayerAction::Switch { team_index } => self.execute_switch(team_index),
            PlayerAction::Run => self.execute_run(rng),
            PlayerAction::Catch { ball } => self.execute_catch(ball, rng),
        }
        Ok(())
    }

    pub fn attack(&mut self, move_index: usize, rng: &mut TurnRng) -> ActionResult<()> {
        self.submit(PlayerAction::Attack { move_index }, rng)
    }

    pub fn use_item(&mut self, item: Item, rng: &mut TurnRng) -> ActionResult<()> {
        self.submit(PlayerAction::UseItem { item }, rng)
    }

    pub fn switch(&mut self, team_index: usize, rng: &mut TurnRng) -> ActionResult<()> {
        self.submit(PlayerAction::Switch { team_index }, rng)
    }

    pub fn run(&mut self, rng: &mut TurnRng) -> ActionResult<()> {
        self.submit(PlayerAction::Run, rng)
    }

    pub fn catch(&mut self, ball: Item, rng: &mut TurnRng) -> ActionResult<()> {
        self.submit(PlayerAction::Catch { ball }, rng)
    }

    /// Submit an action and immediately resolve the enemy turn it queued.
    pub fn step(&mut self, action: PlayerAction, rng: &mut TurnRng) -> ActionResult<()> {
        self.submit(action, rng)?;
        self.resolve_enemy_turn(rng);
        Ok(())
    }

    /// Run the pending enemy turn. Returns false when no enemy turn was pending.
    pub fn resolve_enemy_turn(&mut self, rng: &mut TurnRng) -> bool {
        if !self.awaiting_enemy() {
            return false;
        }
        self.status = BattleStatus::Active(TurnPhase::AwaitingPlayerAction);

        if self.enemy.is_fainted() || self.roster.active_alive().is_none() {
            return true;
        }

        let usable = self.enemy.move_at(0).is_some_and(|m| m.pp > 0);
        if !usable {
            info!("{} has no usable move and skips its turn", self.enemy.name);
            self.emit(BattleEvent::EnemyTurnSkipped {
                pokemon: self.enemy.name.clone(),
            });
            return true;
        }

        if let Some(report) = self.perform_attack(Side::Enemy, 0, rng) {
            self.announce_attack(Side::Enemy, &report);
            if report.fainted {
                self.handle_player_fainted();
            }
        }
        true
    }

    pub fn into_outcome(self) -> BattleOutcome {
        BattleOutcome {
            status: self.status,
            enemy_species: self.enemy.species,
            enemy_level: self.enemy.level,
            drops: self.drops,
            events: self.events,
        }
    }

    // --- Action execution ---

    fn execute_player_attack(&mut self, move_index: usize, rng: &mut TurnRng) {
        let Some(report) = self.perform_attack(Side::Player, move_index, rng) else {
            return;
        };
        self.announce_attack(Side::Player, &report);
        if report.fainted {
            self.handle_enemy_fainted(rng);
        } else {
            self.enter_enemy_phase();
        }
    }

    fn execute_item(&mut self, item: Item) {
        self.roster.consume_item(&item);
        let Some(active) = self.roster.active_mut() else {
            return;
        };
        let pokemon = active.name.clone();
        let follow_up = match item {
            Item::Potion => {
                let amount = active.heal(POTION_HEAL);
                BattleEvent::PokemonHealed {
                    pokemon: pokemon.clone(),
                    amount,
                    new_hp: active.current_hp(),
                }
            }
            _ => {
                active.restore_all_pp();
                BattleEvent::PpRestored {
                    pokemon: pokemon.clone(),
                }
            }
        };
        info!("Used {} on {}", item, pokemon);

        self.update();
        self.emit(BattleEvent::ItemUsed {
            item,
            target: Side::Player,
            pokemon,
        });
        self.emit(follow_up);
        self.enter_enemy_phase();
    }

    fn execute_switch(&mut self, team_index: usize) {
        self.roster.switch_to(team_index);
        let pokemon = self.active_name();
        info!("Switched to {}", pokemon);
        self.update();
        self.emit(BattleEvent::PokemonSwitched { pokemon });
        self.enter_enemy_phase();
    }

    fn execute_run(&mut self, rng: &mut TurnRng) {
        let chance = match self.roster.active_alive() {
            Some(active) => escape_chance(active, &self.enemy),
            None => return,
        };
        let success = rng.next_unit("escape roll") < chance;
        self.emit(BattleEvent::RunAttempted { success });
        if success {
            self.finish(BattleStatus::Fled);
        } else {
            self.enter_enemy_phase();
        }
    }

    fn execute_catch(&mut self, ball: Item, rng: &mut TurnRng) {
        // The ball is spent whatever happens next
        self.roster.consume_item(&ball);
        let chance = calculate_catch_chance(&self.enemy, &ball);
        let success = roll_catch_success(chance, rng);
        info!(
            "Threw {} at {} ({:.0}% chance): {}",
            ball,
            self.enemy.name,
            chance * 100.0,
            if success { "caught" } else { "broke free" }
        );

        self.update();
        self.emit(BattleEvent::BallThrown {
            ball,
            pokemon: self.enemy.name.clone(),
            success,
        });

        if !success {
            self.enter_enemy_phase();
            return;
        }

        let caught = self.fresh_catch();
        let name = caught.name.clone();
        let level = caught.level;
        if self.roster.add_to_party(caught) {
            self.update();
            self.emit(BattleEvent::PokemonCaught {
                pokemon: name,
                level,
            });
            self.finish(BattleStatus::Victory);
        } else {
            info!("Party full, {} was released", name);
            self.emit(BattleEvent::CaughtButReleased { pokemon: name });
            self.enter_enemy_phase();
        }
    }

    /// New instance of the enemy's species at the enemy's level with half HP.
    fn fresh_catch(&self) -> PokemonInst {
        let mut caught = match self.rules.factory.create(&self.enemy.species, self.enemy.level) {
            Ok(pokemon) => pokemon,
            Err(err) => {
                warn!("Could not rebuild caught pokemon ({err}), keeping the enemy instance");
                let mut pokemon = self.enemy.clone();
                pokemon.restore_all_pp();
                pokemon
            }
        };
        let hp = ((caught.max_hp() as f64 * CAUGHT_HP_RATIO).floor() as u32).max(1);
        caught.set_hp(hp);
        caught
    }

    // --- Attack resolution ---

    /// Spend PP and apply damage. Returns None if either combatant is missing
    /// or the move slot is empty.
    fn perform_attack(
        &mut self,
        attacker_side: Side,
        move_index: usize,
        rng: &mut TurnRng,
    ) -> Option<AttackReport> {
        let (attacker, defender) = match attacker_side {
            Side::Player => (self.roster.active_mut()?, &mut self.enemy),
            Side::Enemy => {
                let active = self.roster.active_mut()?;
                (&mut self.enemy, active)
            }
        };

        let move_instance = attacker.moves.get_mut(move_index)?;
        move_instance.use_move();
        let move_data = move_instance.data.clone();

        let multiplier = effectiveness(
            self.rules.type_chart,
            move_data.move_type,
            defender.pokemon_type,
        );
        let variance = roll_variance(rng);
        let damage = calculate_damage(
            attacker.attack(),
            move_data.power,
            defender.defense(),
            multiplier,
            variance,
        );
        debug!(
            "{} -> {}: {} (power {}, atk {}, def {}, x{}, variance {:.3}) = {}",
            attacker.name,
            defender.name,
            move_data.name,
            move_data.power,
            attacker.attack(),
            defender.defense(),
            multiplier,
            variance,
            damage
        );
        defender.take_damage(damage);

        Some(AttackReport {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            move_name: move_data.name,
            multiplier,
            damage,
            remaining_hp: defender.current_hp(),
            fainted: defender.is_fainted(),
        })
    }

    fn announce_attack(&mut self, attacker_side: Side, report: &AttackReport) {
        let target = match attacker_side {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        };
        self.update();
        self.emit(BattleEvent::MoveUsed {
            side: attacker_side,
            pokemon: report.attacker.clone(),
            move_name: report.move_name.clone(),
            damage: report.damage,
        });
        self.emit(BattleEvent::AttackTypeEffectiveness {
            multiplier: report.multiplier,
        });
        self.emit(BattleEvent::DamageDealt {
            target,
            pokemon: report.defender.clone(),
            damage: report.damage,
            remaining_hp: report.remaining_hp,
        });
    }

    // --- Fainting ---

    fn handle_enemy_fainted(&mut self, rng: &mut TurnRng) {
        info!("Wild {} fainted", self.enemy.name);
        self.emit(BattleEvent::PokemonFainted {
            side: Side::Enemy,
            pokemon: self.enemy.name.clone(),
        });

        self.award_battle_exp();

        let drops = roll_drops(self.rules.drop_table, rng);
        for drop in &drops {
            info!("Dropped {} x{}", drop.item, drop.quantity);
            self.emit(BattleEvent::ItemDropped {
                item: drop.item.clone(),
                quantity: drop.quantity,
            });
            self.observers.drop_item(drop);
        }
        self.drops.extend(drops);

        self.finish(BattleStatus::Victory);
    }

    fn award_battle_exp(&mut self) {
        let amount = self.rewards.exp_for_defeating(self.enemy.level);
        let pokemon = self.active_name();
        let factory = self.rules.factory;
        let Some(report) = self.roster.give_exp_to_active(amount, factory, |_, _, _| {}) else {
            return;
        };

        self.emit(BattleEvent::ExpGained {
            pokemon: pokemon.clone(),
            amount,
        });
        if report.leveled_up() {
            let new_level = self.roster.active().map(|p| p.level).unwrap_or_default();
            self.emit(BattleEvent::LevelUp {
                pokemon,
                new_level,
            });
        }
        for outcome in report.evolutions {
            self.emit(BattleEvent::PokemonEvolved {
                from: outcome.from_species().to_string(),
                to: outcome.to_species().to_string(),
            });
        }
        self.update();
    }

    /// Remove the fainted active creature and bring in the next living one.
    fn handle_player_fainted(&mut self) {
        let Some(index) = self.roster.active_index() else {
            return;
        };
        let Some(fainted) = self.roster.remove_at(index) else {
            return;
        };
        info!("{} fainted and left the party", fainted.name);
        self.emit(BattleEvent::PokemonFainted {
            side: Side::Player,
            pokemon: fainted.name,
        });

        if self.roster.activate_first_alive().is_some() {
            let pokemon = self.active_name();
            self.update();
            self.emit(BattleEvent::PokemonSwitched { pokemon });
        } else {
            self.update();
            self.finish(BattleStatus::Defeat);
        }
    }

    // --- State transitions and notifications ---

    fn enter_enemy_phase(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = BattleStatus::Active(TurnPhase::AwaitingEnemyResolution);
        self.emit(BattleEvent::EnemyTurnPending {
            delay_ms: self.rules.enemy_turn_delay_ms,
        });
    }

    fn finish(&mut self, status: BattleStatus) {
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        info!("Battle ended: {:?}", status);
        self.emit(BattleEvent::BattleEnded { status });
        self.observers.end(status.is_victory());
    }

    fn reject(&mut self, reason: ActionRejection) -> ActionRejection {
        info!("Action rejected: {}", reason);
        self.emit(BattleEvent::ActionFailed {
            reason: reason.clone(),
        });
        reason
    }

    fn emit(&mut self, event: BattleEvent) {
        self.observers.event(&event);
        self.events.push(event);
    }

    fn update(&mut self) {
        self.observers.update();
    }

    fn living_active(&self) -> ActionResult<&PokemonInst> {
        let active = self.roster.active().ok_or(ActionRejection::NoActivePokemon)?;
        if active.is_fainted() {
            return Err(ActionRejection::ActiveFainted);
        }
        Ok(active)
    }

    fn active_name(&self) -> String {
        self.roster
            .active()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }
}
