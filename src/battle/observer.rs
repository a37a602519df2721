use crate::battle::drops::ItemDrop;
use crate::battle::state::BattleEvent;
use tracing::warn;

/// Listener for battle notifications.
///
/// Every callback is advisory. A returned error is logged and dropped, and
/// never changes the battle's state.
pub trait BattleObserver {
    /// State changed (HP, PP, inventory, party or active slot)
    fn on_update(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Something visible happened
    fn on_event(&mut self, _event: &BattleEvent) -> anyhow::Result<()> {
        Ok(())
    }

    /// An item dropped; always fired before `on_end`
    fn on_drop(&mut self, _drop: &ItemDrop) -> anyhow::Result<()> {
        Ok(())
    }

    /// Battle reached a terminal state. Fired exactly once.
    fn on_end(&mut self, _victory: bool) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Fan-out to every registered observer with failures isolated.
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Box<dyn BattleObserver>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn update(&mut self) {
        for observer in &mut self.observers {
            if let Err(err) = observer.on_update() {
                warn!("Battle observer failed on update: {err:#}");
            }
        }
    }

    pub fn event(&mut self, event: &BattleEvent) {
        for observer in &mut self.observers {
            if let Err(err) = observer.on_event(event) {
                warn!("Battle observer failed on event {:?}: {err:#}", event);
            }
        }
    }

    pub fn drop_item(&mut self, drop: &ItemDrop) {
        for observer in &mut self.observers {
            if let Err(err) = observer.on_drop(drop) {
                warn!("Battle observer failed on drop: {err:#}");
            }
        }
    }

    pub fn end(&mut self, victory: bool) {
        for observer in &mut self.observers {
            if let Err(err) = observer.on_end(victory) {
                warn!("Battle observer failed on end: {err:#}");
            }
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.observers.len())
            .finish()
    }
}
