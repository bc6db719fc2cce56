//! Weapon Behavior Strategy
//!
//! Each weapon type is one variant of `WeaponKind`, selected once at
//! attachment construction; nothing else in the game inspects the type.
//! An attack consumes the attachment's kinematic samples (this tick and
//! last tick) so fired projectiles inherit the wielding segment's linear
//! and angular motion.
//!
//! The registry's `power` field is deliberately dual-use: damage for
//! Gun/Sword, heal amount for Healing.

use std::f32::consts::FRAC_PI_2;

use macroquad::math::Vec2;

use super::event::{Events, HealEvent};
use super::health::Health;
use super::projectile::{MeleeSweep, ProjectileSet, Shot, SHOT_BASE_SPEED};

/// Distance from the attachment at which projectiles and sweeps spawn,
/// along each fire direction.
pub const FIRE_OFFSET: f32 = 80.0;

pub const SWEEP_RADIUS: f32 = 60.0;
pub const SWEEP_LIFESPAN: u32 = 8;

/// Attachment built with a type identity nobody registered. This is a
/// programming/config error and fatal at construction.
#[derive(Debug, Clone)]
pub struct UnknownWeaponType(pub String);

impl std::fmt::Display for UnknownWeaponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown weapon type: {}", self.0)
    }
}

impl std::error::Error for UnknownWeaponType {}

/// Position + facing snapshot taken once per tick, before any mutation.
/// Behaviors diff two of these for velocity inheritance, which keeps the
/// math independent of update ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSample {
    pub pos: Vec2,
    /// Facing angle in degrees (converted to radians only for the
    /// angular-velocity term).
    pub angle_deg: f32,
}

impl KinematicSample {
    pub fn new(pos: Vec2, angle_deg: f32) -> Self {
        Self { pos, angle_deg }
    }
}

/// Static per-type data. Names match the texture file prefixes.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub name: &'static str,
    /// Ticks between attacks.
    pub cooldown: u32,
    /// Damage for Gun/Sword, heal amount for Healing.
    pub power: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Gun,
    Sword,
    Healing,
}

const GUN_SPEC: WeaponSpec = WeaponSpec { name: "Gun", cooldown: 100, power: 10 };
const SWORD_SPEC: WeaponSpec = WeaponSpec { name: "Sword", cooldown: 10, power: 2 };
const HEALING_SPEC: WeaponSpec = WeaponSpec { name: "Healing", cooldown: 200, power: 20 };

impl WeaponKind {
    pub fn spec(self) -> &'static WeaponSpec {
        match self {
            WeaponKind::Gun => &GUN_SPEC,
            WeaponKind::Sword => &SWORD_SPEC,
            WeaponKind::Healing => &HEALING_SPEC,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// The fatal boundary for data-driven construction (tuning file).
    pub fn from_name(name: &str) -> Result<Self, UnknownWeaponType> {
        match name {
            "Gun" => Ok(WeaponKind::Gun),
            "Sword" => Ok(WeaponKind::Sword),
            "Healing" => Ok(WeaponKind::Healing),
            other => Err(UnknownWeaponType(other.to_string())),
        }
    }

    /// Execute this weapon's attack. `now`/`prev` are the wielding
    /// attachment's kinematic samples for this tick and the last one;
    /// `wielder_health` is the player's own pool (Healing's target).
    pub fn attack(
        self,
        now: KinematicSample,
        prev: KinematicSample,
        projectiles: &mut ProjectileSet,
        wielder_health: &mut Health,
        events: &mut Events,
    ) {
        let spec = self.spec();
        match self {
            WeaponKind::Gun => {
                for dir in fire_directions(now.angle_deg) {
                    let spawn = now.pos + dir * FIRE_OFFSET;
                    let velocity = dir * SHOT_BASE_SPEED + inherited_velocity(now, prev, dir);
                    projectiles.spawn_shot(Shot::new(spawn, velocity, spec.power));
                }
            }
            WeaponKind::Sword => {
                for dir in fire_directions(now.angle_deg) {
                    let spawn = now.pos + dir * FIRE_OFFSET;
                    projectiles.spawn_sweep(MeleeSweep::new(
                        spawn,
                        SWEEP_RADIUS,
                        spec.power,
                        SWEEP_LIFESPAN,
                    ));
                }
            }
            WeaponKind::Healing => {
                wielder_health.heal(spec.power);
                events.heal.send(HealEvent { amount: spec.power });
            }
        }
    }
}

/// The two fire directions, at +-90 degrees from the facing angle.
fn fire_directions(angle_deg: f32) -> [Vec2; 2] {
    let facing = angle_deg.to_radians();
    [
        Vec2::from_angle(facing + FRAC_PI_2),
        Vec2::from_angle(facing - FRAC_PI_2),
    ]
}

/// Motion imparted by the wielding segment: linear velocity (position
/// delta since last tick) plus the tangential component of the angular
/// delta at the spawn offset.
fn inherited_velocity(now: KinematicSample, prev: KinematicSample, fire_dir: Vec2) -> Vec2 {
    let linear = now.pos - prev.pos;
    let omega = (now.angle_deg - prev.angle_deg).to_radians();
    linear + fire_dir.perp() * (omega * FIRE_OFFSET)
}
