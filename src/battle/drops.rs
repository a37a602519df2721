use crate::battle::state::TurnRng;
use schema::{DropEntry, Item};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One triggered drop table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    pub item: Item,
    pub quantity: u32,
}

/// Roll every entry of the drop table independently.
/// Each entry triggers when its roll is below `chance`; the quantity is
/// uniform in `[min, max]`.
pub fn roll_drops(table: &[DropEntry], rng: &mut TurnRng) -> Vec<ItemDrop> {
    let mut drops = Vec::new();
    for entry in table {
        let roll = rng.next_unit("drop chance");
        if roll >= entry.chance {
            continue;
        }
        let quantity = if entry.min >= entry.max {
            entry.min
        } else {
            rng.next_int(entry.min, entry.max, "drop quantity")
        };
        debug!("Drop triggered: {} x{} (roll {:.3})", entry.id, quantity, roll);
        drops.push(ItemDrop {
            item: entry.id.clone(),
            quantity,
        });
    }
    drops
}
