//! Player entity
//!
//! Owns the body chain, the attachment slot table, and the player's own
//! health pool (the Healing behavior's target). Attachments themselves
//! live in the session's attachment list; the player only references
//! them through slot bindings.

use macroquad::math::Vec2;

use super::attachment::Attachment;
use super::chain::SegmentChain;
use super::health::Health;
use super::slots::SlotTable;

pub const PLAYER_MAX_HP: i32 = 100;

/// Body girth drives every derived radius and the segment spacing.
pub const GIRTH: f32 = 60.0;
pub const SEGMENT_LENGTH: f32 = GIRTH * 0.8;
pub const MOVE_SPEED: f32 = 15.0;

pub const WEAPON_START_INDEX: usize = 1;
pub const WEAPON_INTERVAL: usize = 3;

pub struct Player {
    pub chain: SegmentChain,
    pub slots: SlotTable,
    pub health: Health,
    pub girth: f32,
    /// Right button held: the head chases the pointer.
    pub move_enabled: bool,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            chain: SegmentChain::new(spawn, SEGMENT_LENGTH, MOVE_SPEED),
            slots: SlotTable::new(WEAPON_START_INDEX, WEAPON_INTERVAL),
            health: Health::new(PLAYER_MAX_HP),
            girth: GIRTH,
            move_enabled: false,
        }
    }

    /// Append one body segment (growth).
    pub fn grow(&mut self) {
        self.chain.append_segment();
    }

    /// Per-tick movement: chase the pointer while move is held, then run
    /// the body follow pass either way so the tail keeps settling.
    pub fn update(&mut self, pointer_world: Vec2) {
        if self.move_enabled {
            self.chain.set_head_target(pointer_world);
        }
        self.chain.advance();
    }

    /// Stop chasing: pin the target to wherever the head is now.
    pub fn stop(&mut self) {
        self.chain.set_head_target(self.chain.head());
    }

    /// Re-read segment positions for every bound attachment. The facing
    /// handed down is the segment's direction toward the head side of
    /// the body; a degenerate direction keeps the attachment's previous
    /// facing (the sync still runs so the kinematic sample stays fresh).
    pub fn sync_attachments(&self, attachments: &mut [Attachment]) {
        for (slot, id) in self.slots.iter() {
            let Some(attachment) = attachments.get_mut(id.0) else {
                continue;
            };
            let Some(segment) = self.chain.get(slot) else {
                continue;
            };
            let facing = self
                .chain
                .get(slot - 1)
                .map(|toward_head| toward_head - segment)
                .filter(|delta| delta.length_squared() > 0.0)
                .map(|delta| delta.to_angle().to_degrees())
                .unwrap_or_else(|| attachment.angle_deg());
            attachment.sync_to_segment(segment, facing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::slots::AttachmentId;
    use crate::game::weapons::WeaponKind;

    fn player_with_body() -> Player {
        let mut player = Player::new(Vec2::ZERO);
        for _ in 0..3 {
            player.grow();
        }
        player
    }

    #[test]
    fn test_update_only_chases_while_enabled() {
        let mut player = player_with_body();
        player.update(Vec2::new(500.0, 0.0));
        assert_eq!(player.chain.head(), Vec2::ZERO);

        player.move_enabled = true;
        player.update(Vec2::new(500.0, 0.0));
        assert!((player.chain.head().x - MOVE_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_stop_pins_target_to_head() {
        let mut player = player_with_body();
        player.move_enabled = true;
        player.update(Vec2::new(500.0, 0.0));
        player.move_enabled = false;
        player.stop();
        let head = player.chain.head();
        player.update(Vec2::new(500.0, 0.0));
        assert_eq!(player.chain.head(), head);
    }

    #[test]
    fn test_sync_forces_attachment_onto_segment() {
        let mut player = player_with_body();
        let mut attachments = vec![Attachment::new(Vec2::new(999.0, 999.0), WeaponKind::Gun)];
        player
            .slots
            .bind(1, AttachmentId(0), player.chain.len())
            .unwrap();

        player.sync_attachments(&mut attachments);
        assert_eq!(attachments[0].pos, player.chain.get(1).unwrap());

        // Moves with the body
        player.move_enabled = true;
        player.update(Vec2::new(300.0, 120.0));
        player.sync_attachments(&mut attachments);
        assert_eq!(attachments[0].pos, player.chain.get(1).unwrap());
    }
}
