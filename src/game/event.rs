//! Frame-scoped event queues
//!
//! Combat and binding outcomes are pushed onto typed queues during the
//! update pass and drained once per frame by the diagnostic/HUD pass,
//! so the resolver never needs to know who is listening. Queues are
//! cleared at end of frame.

use super::npc::NpcId;

/// A queue for events of a single type. Collected during the frame,
/// drained at a defined point, cleared afterwards.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Damage applied to an NPC by the combat resolver.
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub npc: NpcId,
    pub amount: i32,
}

/// An NPC's health reached zero this frame.
#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    pub npc: NpcId,
}

/// The player was healed by a wielded Healing attachment.
#[derive(Debug, Clone, Copy)]
pub struct HealEvent {
    pub amount: i32,
}

/// Outcome of a drag-release snap attempt.
#[derive(Debug, Clone, Copy)]
pub enum BindingEvent {
    /// Weapon snapped onto a slot.
    Bound { slot: usize },
    /// In-range slot was occupied by a different weapon.
    Refused { slot: usize },
    /// No eligible slot in range; dropped where it was released.
    Dropped,
}

/// Container for all game event queues.
pub struct Events {
    pub damage: EventQueue<DamageEvent>,
    pub death: EventQueue<DeathEvent>,
    pub heal: EventQueue<HealEvent>,
    pub binding: EventQueue<BindingEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            damage: EventQueue::new(),
            death: EventQueue::new(),
            heal: EventQueue::new(),
            binding: EventQueue::new(),
        }
    }

    /// Clear every queue. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.damage.clear();
        self.death.clear();
        self.heal.clear();
        self.binding.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}
