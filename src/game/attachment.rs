//! Attachment / Weapon Entity
//!
//! A detachable tool the player can drag around and snap onto a body
//! slot. The grip state machine:
//!
//! ```text
//! Free --pointer-down in range--> Dragging --release near empty slot--> Attached
//!  ^                                 |  (occupied or out of range)
//!  +---------------------------------+
//! Attached --pointer-down in range--> Dragging   (detach-and-grab, atomic)
//! ```
//!
//! All slot occupancy changes go through the `SlotTable`, so the table
//! and the grip state cannot disagree. Ground weapons are created at
//! world setup and never destroyed.

use macroquad::math::Vec2;

use super::chain::SegmentChain;
use super::event::{BindingEvent, Events};
use super::health::Health;
use super::projectile::ProjectileSet;
use super::slots::{AttachmentId, BindError, SlotTable};
use super::weapons::{KinematicSample, WeaponKind};

/// Grab radius; the snap radius on release is twice this.
pub const ATTACHMENT_SIZE: f32 = 50.0;

/// How the attachment is currently held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grip {
    /// On the ground at its position.
    Free,
    /// Following the pointer; `offset` keeps the grab point stable
    /// under the cursor instead of snapping the center to it.
    Dragging { offset: Vec2 },
    /// Bound to a body slot; position is forced to the segment each tick.
    Attached { slot: usize },
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub pos: Vec2,
    pub kind: WeaponKind,
    pub size: f32,
    grip: Grip,
    /// Facing in degrees; drives fire directions and sprite rotation.
    angle_deg: f32,
    /// Last tick's pose, captured before any mutation this tick.
    prev: KinematicSample,
    cooldown: u32,
}

impl Attachment {
    pub fn new(pos: Vec2, kind: WeaponKind) -> Self {
        Self {
            pos,
            kind,
            size: ATTACHMENT_SIZE,
            grip: Grip::Free,
            angle_deg: 0.0,
            prev: KinematicSample::new(pos, 0.0),
            cooldown: 0,
        }
    }

    pub fn grip(&self) -> Grip {
        self.grip
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.grip, Grip::Attached { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.grip, Grip::Dragging { .. })
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Pointer-down in world space. Starts a drag if the press lands
    /// within `size` of the attachment; an attached weapon is unbound in
    /// the same transition. Returns true if the grab took hold.
    pub fn handle_press(&mut self, id: AttachmentId, pointer_world: Vec2, slots: &mut SlotTable) -> bool {
        if self.pos.distance(pointer_world) > self.size {
            return false;
        }
        if let Grip::Attached { .. } = self.grip {
            slots.unbind(id);
        }
        self.grip = Grip::Dragging {
            offset: self.pos - pointer_world,
        };
        true
    }

    /// Pointer-up. Scans eligible slots in ascending index order; the
    /// first one in snap range (2 * size) decides the outcome: empty
    /// binds, occupied refuses (no swap), nothing in range drops free.
    pub fn handle_release(
        &mut self,
        id: AttachmentId,
        chain: &SegmentChain,
        slots: &mut SlotTable,
        events: &mut Events,
    ) {
        if !self.is_dragging() {
            return;
        }
        self.grip = Grip::Free;

        let snap_range = self.size * 2.0;
        for slot in slots.eligible_indices(chain.len()) {
            let Some(segment) = chain.get(slot) else { continue };
            if self.pos.distance(segment) >= snap_range {
                continue;
            }
            match slots.bind(slot, id, chain.len()) {
                Ok(()) => {
                    self.grip = Grip::Attached { slot };
                    self.pos = segment;
                    events.binding.send(BindingEvent::Bound { slot });
                }
                Err(BindError::Occupied { slot }) => {
                    println!("[slots] node {} already has a weapon", slot);
                    events.binding.send(BindingEvent::Refused { slot });
                }
                Err(err) => {
                    // Eligibility was checked by the scan itself
                    println!("[slots] bind refused: {}", err);
                }
            }
            return;
        }
        events.binding.send(BindingEvent::Dropped);
    }

    /// Per-tick sync while attached: capture last tick's pose first
    /// (velocity inheritance reads it), then force the position onto the
    /// bound segment and take the segment's facing.
    pub fn sync_to_segment(&mut self, segment_pos: Vec2, facing_deg: f32) {
        self.prev = KinematicSample::new(self.pos, self.angle_deg);
        self.pos = segment_pos;
        self.angle_deg = facing_deg;
    }

    /// Per-tick update while dragging: follow the pointer (plus grab
    /// offset) and face it. A grab exactly on the center keeps the old
    /// facing rather than normalizing a zero vector.
    pub fn update_drag(&mut self, pointer_world: Vec2) {
        let Grip::Dragging { offset } = self.grip else {
            return;
        };
        self.prev = KinematicSample::new(self.pos, self.angle_deg);
        self.pos = pointer_world + offset;
        let to_pointer = pointer_world - self.pos;
        if to_pointer.length_squared() > 0.0 {
            self.angle_deg = to_pointer.to_angle().to_degrees();
        }
    }

    /// Attack through the cooldown gate: while cooling down the trigger
    /// only decrements the counter; otherwise the behavior runs and the
    /// cooldown resets to the weapon type's period.
    pub fn attack(
        &mut self,
        projectiles: &mut ProjectileSet,
        wielder_health: &mut Health,
        events: &mut Events,
    ) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return;
        }
        let now = KinematicSample::new(self.pos, self.angle_deg);
        self.kind.attack(now, self.prev, projectiles, wielder_health, events);
        self.cooldown = self.kind.spec().cooldown;
    }
}
