//! Passive-ability trigger dispatch.
//!
//! Collaborators (relics, passives) subscribe handlers before an encounter;
//! the combat loop fires events at fixed points. The registry is handed to
//! the loop explicitly, there is no global bus.

use crate::character::Stats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    BattleStart,
    TurnStart,
    TurnEnd,
    BattleEnd,
    RoomEnter,
}

impl TriggerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerEvent::BattleStart => "battle_start",
            TriggerEvent::TurnStart => "turn_start",
            TriggerEvent::TurnEnd => "turn_end",
            TriggerEvent::BattleEnd => "battle_end",
            TriggerEvent::RoomEnter => "room_enter",
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of the encounter an entity fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Party,
    Foe,
}

pub type TriggerHandler = Box<dyn FnMut(&mut Stats, Side) + Send>;

#[derive(Default)]
pub struct TriggerRegistry {
    handlers: HashMap<TriggerEvent, Vec<TriggerHandler>>,
    fired: HashMap<TriggerEvent, usize>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, event: TriggerEvent, handler: F)
    where
        F: FnMut(&mut Stats, Side) + Send + 'static,
    {
        self.handlers.entry(event).or_default().push(Box::new(handler));
    }

    /// Runs every handler subscribed to `event` against `entity`, in
    /// subscription order.
    pub fn trigger(&mut self, event: TriggerEvent, entity: &mut Stats, side: Side) {
        trace!(event = %event, entity = entity.label(), "trigger");
        *self.fired.entry(event).or_default() += 1;
        if let Some(handlers) = self.handlers.get_mut(&event) {
            for handler in handlers.iter_mut() {
                handler(entity, side);
            }
        }
    }

    /// How many times `event` has fired, across all entities.
    pub fn fired(&self, event: TriggerEvent) -> usize {
        self.fired.get(&event).copied().unwrap_or(0)
    }

    pub fn subscriber_count(&self, event: TriggerEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}
