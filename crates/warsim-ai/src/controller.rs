//! Id-keyed arena of AI contexts that persists across ticks.

use std::collections::HashMap;

use warsim_core::components::Unit;
use warsim_core::enums::AiStateKind;
use warsim_core::types::UnitId;

use crate::context::AiContext;
use crate::profiles::BehaviorTable;

/// Contexts handed out for one tick, aligned with the unit list they were
/// checked out against.
#[derive(Debug)]
pub struct Checkout {
    /// `None` for destroyed units, which take no AI turn.
    pub contexts: Vec<Option<AiContext>>,
    /// Contexts dropped because their unit vanished or was destroyed.
    pub evicted: usize,
}

#[derive(Debug, Default)]
pub struct AiController {
    behaviors: BehaviorTable,
    contexts: HashMap<UnitId, AiContext>,
}

impl AiController {
    pub fn new(behaviors: BehaviorTable) -> Self {
        Self {
            behaviors,
            contexts: HashMap::new(),
        }
    }

    pub fn behaviors(&self) -> &BehaviorTable {
        &self.behaviors
    }

    /// Take one context per live unit out of the arena, creating contexts
    /// for units seen for the first time. Contexts of destroyed units, and
    /// whatever remains afterwards, are evicted.
    pub fn checkout(&mut self, units: &[Unit]) -> Checkout {
        let mut evicted = 0;
        let contexts = units
            .iter()
            .map(|unit| {
                let existing = self.contexts.remove(&unit.id);
                if unit.is_destroyed() {
                    evicted += usize::from(existing.is_some());
                    return None;
                }
                Some(existing.unwrap_or_else(|| AiContext::new(self.behaviors.profile_for(unit))))
            })
            .collect();

        evicted += self.contexts.len();
        self.contexts.clear();
        Checkout { contexts, evicted }
    }

    /// Return contexts after the tick.
    pub fn checkin(&mut self, contexts: impl IntoIterator<Item = (UnitId, AiContext)>) {
        self.contexts.extend(contexts);
    }

    pub fn state_of(&self, unit: UnitId) -> Option<AiStateKind> {
        self.contexts.get(&unit).map(|ctx| ctx.state)
    }

    pub fn context(&self, unit: UnitId) -> Option<&AiContext> {
        self.contexts.get(&unit)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
