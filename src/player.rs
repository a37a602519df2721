use crate::pokemon::PokemonInst;
use crate::progression::{gain_exp, LevelUpReport};
use crate::species::PokemonFactory;
use schema::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Maximum number of creatures the player can carry.
pub const PARTY_CAPACITY: usize = 3;

/// Inventory every new game starts with.
pub fn default_inventory() -> HashMap<Item, u32> {
    HashMap::from([
        (Item::PokeBall, 5),
        (Item::GreatBall, 2),
        (Item::Potion, 3),
        (Item::PpRestore, 1),
    ])
}

/// The player's party and bag.
///
/// `active_index` is `None` only while the party is empty; otherwise it
/// points into `party`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    party: Vec<PokemonInst>,
    active_index: Option<usize>,
    inventory: HashMap<Item, u32>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::with_inventory(default_inventory())
    }

    pub fn with_inventory(inventory: HashMap<Item, u32>) -> Self {
        Self {
            party: Vec::new(),
            active_index: None,
            inventory,
        }
    }

    /// Empty the party and restore the given inventory
    pub fn reset(&mut self, inventory: HashMap<Item, u32>) {
        self.party.clear();
        self.active_index = None;
        self.inventory = inventory;
    }

    pub fn party(&self) -> &[PokemonInst] {
        &self.party
    }

    pub fn party_size(&self) -> usize {
        self.party.len()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Replace the whole party with a single starter
    pub fn choose_starter(&mut self, starter: PokemonInst) {
        info!("Chose {} as starter", starter.name);
        self.party = vec![starter];
        self.active_index = Some(0);
    }

    /// Append a creature. Returns false, leaving the party untouched, when full.
    pub fn add_to_party(&mut self, pokemon: PokemonInst) -> bool {
        if !self.can_catch() {
            debug!("Party full, cannot add {}", pokemon.name);
            return false;
        }
        self.party.push(pokemon);
        if self.active_index.is_none() {
            self.active_index = Some(self.party.len() - 1);
        }
        true
    }

    pub fn can_catch(&self) -> bool {
        self.party.len() < PARTY_CAPACITY
    }

    /// Whether `index` names a living party member other than the active one
    pub fn can_switch_to(&self, index: usize) -> bool {
        Some(index) != self.active_index
            && self.party.get(index).is_some_and(|p| !p.is_fainted())
    }

    pub fn switch_to(&mut self, index: usize) -> bool {
        if !self.can_switch_to(index) {
            return false;
        }
        self.active_index = Some(index);
        true
    }

    pub fn active(&self) -> Option<&PokemonInst> {
        self.active_index.and_then(|i| self.party.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut PokemonInst> {
        self.active_index.and_then(|i| self.party.get_mut(i))
    }

    /// Active creature, only if it can still fight
    pub fn active_alive(&self) -> Option<&PokemonInst> {
        self.active().filter(|p| !p.is_fainted())
    }

    /// Remove a party member, keeping `active_index` pointing at the same
    /// creature where possible. Removing the active creature leaves no
    /// active selection; the caller picks a replacement.
    pub fn remove_at(&mut self, index: usize) -> Option<PokemonInst> {
        if index >= self.party.len() {
            return None;
        }
        let removed = self.party.remove(index);
        self.active_index = match self.active_index {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Some(removed)
    }

    /// Make the first living member active. Returns its index, or `None`
    /// if nobody can fight.
    pub fn activate_first_alive(&mut self) -> Option<usize> {
        let index = self.party.iter().position(|p| !p.is_fainted())?;
        self.active_index = Some(index);
        Some(index)
    }

    pub fn has_living_member(&self) -> bool {
        self.party.iter().any(|p| !p.is_fainted())
    }

    /// Grant experience to the active creature through the progression engine.
    /// `on_evolve(from, to, slot)` is called once per evolution step.
    pub fn give_exp_to_active<F>(
        &mut self,
        amount: u32,
        factory: &PokemonFactory,
        mut on_evolve: F,
    ) -> Option<LevelUpReport>
    where
        F: FnMut(&str, &str, usize),
    {
        let slot = self.active_index?;
        let pokemon = self.party.get_mut(slot)?;
        let report = gain_exp(pokemon, amount, factory);
        for outcome in &report.evolutions {
            on_evolve(outcome.from_species(), outcome.to_species(), slot);
        }
        Some(report)
    }

    pub fn inventory(&self) -> &HashMap<Item, u32> {
        &self.inventory
    }

    pub fn item_count(&self, item: &Item) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, item: Item, quantity: u32) {
        let count = self.inventory.entry(item).or_insert(0);
        *count = count.saturating_add(quantity);
    }

    /// Take one of `item` out of the bag. Returns false if there was none.
    pub fn consume_item(&mut self, item: &Item) -> bool {
        match self.inventory.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}
