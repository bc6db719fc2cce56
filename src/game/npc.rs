//! NPC state: health, movement-to-target, animation
//!
//! NPCs reuse the move-toward-target pattern of the player chain head:
//! a position chasing a target at a capped per-tick speed, snapping when
//! within one step. Health is mutated only by the combat resolver
//! (damage) and the healing behavior (restore); hitting zero is a
//! one-way transition into the Dead animation state, which freezes
//! movement targeting for good.

use macroquad::math::Vec2;

use super::health::Health;

/// Stable identity of an NPC within one session. Used by melee sweeps
/// to guarantee at most one hit per target per swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NpcId(pub usize);

/// Failed lookup of an NPC kind by name (tuning file / asset prefix).
/// Fatal at world construction, like an unknown weapon type.
#[derive(Debug, Clone)]
pub struct UnknownNpcKind(pub String);

impl std::fmt::Display for UnknownNpcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown NPC kind: {}", self.0)
    }
}

impl std::error::Error for UnknownNpcKind {}

/// NPC registry. The name doubles as the texture folder identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcKind {
    Wizard,
    Vampire,
}

impl NpcKind {
    pub fn name(self) -> &'static str {
        match self {
            NpcKind::Wizard => "wizard",
            NpcKind::Vampire => "vampire",
        }
    }

    pub fn max_hp(self) -> i32 {
        match self {
            NpcKind::Wizard => 5,
            NpcKind::Vampire => 10,
        }
    }

    pub fn hostile(self) -> bool {
        matches!(self, NpcKind::Vampire)
    }

    pub fn from_name(name: &str) -> Result<Self, UnknownNpcKind> {
        match name {
            "wizard" => Ok(NpcKind::Wizard),
            "vampire" => Ok(NpcKind::Vampire),
            other => Err(UnknownNpcKind(other.to_string())),
        }
    }
}

/// Animation states. Names match the texture folder convention
/// `textures/npcs/{identity}/{state}/{frame}.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Running,
    Dead,
}

impl AnimState {
    pub fn name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Running => "running",
            AnimState::Dead => "dead",
        }
    }
}

pub const NPC_MOVE_SPEED: f32 = 8.0;
pub const NPC_SIZE: f32 = 200.0;

/// One NPC character.
#[derive(Debug, Clone)]
pub struct Npc {
    pub kind: NpcKind,
    pub pos: Vec2,
    pub target_pos: Vec2,
    pub health: Health,
    pub active: bool,
    /// Visual height; the hit radius is half of this.
    pub size: f32,
    move_speed: f32,
    anim: AnimState,
    frame: usize,
    frame_timer: u32,
    frame_delay: u32,
}

impl Npc {
    pub fn new(kind: NpcKind, spawn: Vec2, active: bool) -> Self {
        let mut npc = Self {
            kind,
            pos: spawn,
            target_pos: spawn,
            health: Health::new(kind.max_hp()),
            active,
            size: NPC_SIZE,
            move_speed: NPC_MOVE_SPEED,
            anim: AnimState::Idle,
            frame: 0,
            frame_timer: 0,
            frame_delay: 0,
        };
        npc.frame_delay = npc.delay_for(AnimState::Idle);
        npc
    }

    pub fn anim(&self) -> AnimState {
        self.anim
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_dead(&self) -> bool {
        self.anim == AnimState::Dead
    }

    /// Radius used by the combat resolver for point-projectile hits.
    pub fn hit_radius(&self) -> f32 {
        self.size * 0.5
    }

    /// Command a move relative to the current position. Ignored once dead.
    pub fn set_target_offset(&mut self, offset: Vec2) {
        if self.is_dead() {
            return;
        }
        self.target_pos = self.pos + offset;
        self.change_anim(AnimState::Running);
    }

    /// Step toward the target at capped speed, snapping within one step.
    /// Arrival drops back to Idle.
    pub fn update(&mut self) {
        if self.is_dead() || self.pos == self.target_pos {
            return;
        }
        let to_target = self.target_pos - self.pos;
        let distance = to_target.length();
        if distance < self.move_speed {
            self.pos = self.target_pos;
            self.change_anim(AnimState::Idle);
        } else {
            self.pos += to_target / distance * self.move_speed;
        }
    }

    /// Apply damage. Returns true if this hit killed the NPC. A hit on an
    /// already-dead NPC is a no-op so coincident-tick projectiles cannot
    /// re-fire the death transition.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.is_dead() {
            return false;
        }
        let died = self.health.damage(amount);
        if died {
            self.change_anim(AnimState::Dead);
            self.target_pos = self.pos;
        }
        died
    }

    /// Restore health, clamped to max. Does not revive the dead.
    pub fn apply_heal(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        if self.health.heal(amount) {
            self.change_anim(AnimState::Idle);
        }
    }

    fn delay_for(&self, state: AnimState) -> u32 {
        match state {
            AnimState::Running => 3,
            _ => (self.move_speed * 2.0) as u32,
        }
    }

    fn change_anim(&mut self, new_state: AnimState) {
        if self.anim == new_state {
            return;
        }
        self.anim = new_state;
        self.frame = 0;
        self.frame_timer = 0;
        self.frame_delay = self.delay_for(new_state);
    }

    /// Advance the animation frame with wraparound at `frame_count`,
    /// honoring the current state's frame delay. A zero frame count
    /// (missing assets) pins the frame at 0.
    pub fn advance_frame(&mut self, frame_count: usize) {
        self.frame_timer += 1;
        if self.frame_timer >= self.frame_delay {
            self.frame_timer = 0;
            self.frame = if frame_count > 0 {
                (self.frame + 1) % frame_count
            } else {
                0
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vampire() -> Npc {
        Npc::new(NpcKind::Vampire, Vec2::ZERO, true)
    }

    #[test]
    fn test_damage_kills_once() {
        let mut npc = vampire();
        assert!(!npc.apply_damage(5));
        assert!(npc.apply_damage(5));
        assert!(npc.is_dead());
        assert_eq!(npc.health.current, 0);

        // Coincident-tick second hit: no underflow, no second death
        assert!(!npc.apply_damage(10));
        assert_eq!(npc.health.current, 0);
        assert!(npc.is_dead());
    }

    #[test]
    fn test_dead_freezes_targeting() {
        let mut npc = vampire();
        npc.apply_damage(10);
        npc.set_target_offset(Vec2::new(100.0, 0.0));
        assert_eq!(npc.target_pos, npc.pos);
        let before = npc.pos;
        npc.update();
        assert_eq!(npc.pos, before);
    }

    #[test]
    fn test_heal_does_not_revive() {
        let mut npc = vampire();
        npc.apply_damage(10);
        npc.apply_heal(10);
        assert!(npc.is_dead());
        assert_eq!(npc.health.current, 0);
    }

    #[test]
    fn test_heal_clamps_and_returns_to_idle() {
        let mut npc = vampire();
        npc.apply_damage(4);
        npc.set_target_offset(Vec2::new(500.0, 0.0));
        assert_eq!(npc.anim(), AnimState::Running);
        npc.apply_heal(100);
        assert_eq!(npc.health.current, 10);
        assert_eq!(npc.anim(), AnimState::Idle);
    }

    #[test]
    fn test_movement_snaps_on_arrival() {
        let mut npc = vampire();
        npc.set_target_offset(Vec2::new(20.0, 0.0));
        npc.update(); // 8 of 20
        npc.update(); // 16 of 20
        npc.update(); // within one step: snap + idle
        assert_eq!(npc.pos, Vec2::new(20.0, 0.0));
        assert_eq!(npc.anim(), AnimState::Idle);
    }

    #[test]
    fn test_frame_advance_wraps() {
        let mut npc = vampire();
        npc.set_target_offset(Vec2::new(1000.0, 0.0)); // Running, delay 3
        for _ in 0..3 {
            npc.advance_frame(4);
        }
        assert_eq!(npc.frame(), 1);
        for _ in 0..9 {
            npc.advance_frame(4);
        }
        assert_eq!(npc.frame(), 0); // wrapped 4 -> 0
    }

    #[test]
    fn test_frame_pinned_without_assets() {
        let mut npc = vampire();
        for _ in 0..100 {
            npc.advance_frame(0);
        }
        assert_eq!(npc.frame(), 0);
    }

    #[test]
    fn test_kind_registry() {
        assert_eq!(NpcKind::from_name("wizard").unwrap(), NpcKind::Wizard);
        assert!(NpcKind::from_name("slime").is_err());
        assert_eq!(NpcKind::Vampire.max_hp(), 10);
        assert!(NpcKind::Vampire.hostile());
        assert!(!NpcKind::Wizard.hostile());
    }
}
