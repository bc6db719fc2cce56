//! Projectile Set
//!
//! Two transient entity families share one owning collection:
//! - `Shot`: a moving point projectile, killed on first hit or when it
//!   leaves the world bounds box.
//! - `MeleeSweep`: a stationary damage zone with a tick lifespan and a
//!   struck-set guaranteeing at most one hit per NPC per swing.
//!
//! The set is pruned exactly once per tick, *after* the collision pass,
//! so a projectile that dies during the tick is still observable as a
//! (not-alive) entry by that tick's resolver.

use std::collections::HashSet;

use macroquad::math::Vec2;

use super::npc::NpcId;

/// Symmetric world bounds; a shot beyond this box is dead.
pub const WORLD_BOUND: f32 = 3000.0;

pub const SHOT_RADIUS: f32 = 6.0;
pub const SHOT_BASE_SPEED: f32 = 15.0;

/// A moving point projectile.
#[derive(Debug, Clone)]
pub struct Shot {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: i32,
    pub alive: bool,
}

impl Shot {
    pub fn new(pos: Vec2, velocity: Vec2, damage: i32) -> Self {
        Self {
            pos,
            velocity,
            radius: SHOT_RADIUS,
            damage,
            alive: true,
        }
    }
}

/// A stationary, lifespan-limited melee damage zone.
#[derive(Debug, Clone)]
pub struct MeleeSweep {
    pub pos: Vec2,
    pub radius: f32,
    pub damage: i32,
    pub lifespan: u32,
    pub struck: HashSet<NpcId>,
    pub alive: bool,
}

impl MeleeSweep {
    pub fn new(pos: Vec2, radius: f32, damage: i32, lifespan: u32) -> Self {
        Self {
            pos,
            radius,
            damage,
            lifespan,
            struck: HashSet::new(),
            alive: true,
        }
    }
}

/// The session-wide collection of transient combat entities.
/// Single-writer: only the tick loop mutates it, behaviors spawn
/// through it, the resolver marks hits through it.
#[derive(Debug, Default)]
pub struct ProjectileSet {
    shots: Vec<Shot>,
    sweeps: Vec<MeleeSweep>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_shot(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    pub fn spawn_sweep(&mut self, sweep: MeleeSweep) {
        self.sweeps.push(sweep);
    }

    /// Advance shot kinematics and sweep lifespans. Sweeps stay at their
    /// spawn position for their whole lifespan.
    pub fn update(&mut self) {
        for shot in &mut self.shots {
            if !shot.alive {
                continue;
            }
            shot.pos += shot.velocity;
            if shot.pos.x.abs() >= WORLD_BOUND || shot.pos.y.abs() >= WORLD_BOUND {
                shot.alive = false;
            }
        }
        for sweep in &mut self.sweeps {
            if !sweep.alive {
                continue;
            }
            sweep.lifespan = sweep.lifespan.saturating_sub(1);
            if sweep.lifespan == 0 {
                sweep.alive = false;
            }
        }
    }

    /// Drop not-alive entries. Call once per tick, after collision.
    pub fn prune(&mut self) {
        self.shots.retain(|shot| shot.alive);
        self.sweeps.retain(|sweep| sweep.alive);
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn shots_mut(&mut self) -> &mut [Shot] {
        &mut self.shots
    }

    pub fn sweeps(&self) -> &[MeleeSweep] {
        &self.sweeps
    }

    pub fn sweeps_mut(&mut self) -> &mut [MeleeSweep] {
        &mut self.sweeps
    }

    pub fn len(&self) -> usize {
        self.shots.len() + self.sweeps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty() && self.sweeps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_advances_by_velocity() {
        let mut set = ProjectileSet::new();
        set.spawn_shot(Shot::new(Vec2::ZERO, Vec2::new(15.0, 0.0), 10));
        set.update();
        assert_eq!(set.shots()[0].pos, Vec2::new(15.0, 0.0));
        assert!(set.shots()[0].alive);
    }

    #[test]
    fn test_shot_dies_out_of_bounds() {
        let mut set = ProjectileSet::new();
        set.spawn_shot(Shot::new(Vec2::new(2995.0, 0.0), Vec2::new(15.0, 0.0), 10));
        set.update();
        // Dead but still present until the post-collision prune
        assert!(!set.shots()[0].alive);
        assert_eq!(set.len(), 1);
        set.prune();
        assert!(set.is_empty());
    }

    #[test]
    fn test_sweep_lives_exact_lifespan() {
        let mut set = ProjectileSet::new();
        set.spawn_sweep(MeleeSweep::new(Vec2::ZERO, 60.0, 2, 8));
        for tick in 1..=8 {
            set.update();
            if tick < 8 {
                assert!(set.sweeps()[0].alive, "dead too early at tick {}", tick);
            }
        }
        // Observable as a dead entry on its final tick, gone after prune
        assert!(!set.sweeps()[0].alive);
        set.prune();
        assert!(set.is_empty());
    }

    #[test]
    fn test_sweep_is_stationary() {
        let mut set = ProjectileSet::new();
        set.spawn_sweep(MeleeSweep::new(Vec2::new(5.0, 7.0), 60.0, 2, 8));
        set.update();
        set.update();
        assert_eq!(set.sweeps()[0].pos, Vec2::new(5.0, 7.0));
    }
}
