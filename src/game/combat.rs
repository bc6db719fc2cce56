//! Collision / Combat Resolver
//!
//! One pass per tick, after projectile kinematics and before pruning.
//! Point shots are single-use: first NPC within hit radius takes the
//! damage and the shot dies. Melee sweeps keep living until their
//! lifespan expires but record every NPC they strike, so a target is
//! damaged at most once per swing no matter how long the radius keeps
//! overlapping it.

use super::event::{DamageEvent, DeathEvent, Events};
use super::npc::{Npc, NpcId};
use super::projectile::ProjectileSet;

pub fn resolve(projectiles: &mut ProjectileSet, npcs: &mut [Npc], events: &mut Events) {
    for shot in projectiles.shots_mut() {
        if !shot.alive {
            continue;
        }
        for (index, npc) in npcs.iter_mut().enumerate() {
            if !npc.active {
                continue;
            }
            if shot.pos.distance(npc.pos) < npc.hit_radius() {
                let id = NpcId(index);
                events.damage.send(DamageEvent { npc: id, amount: shot.damage });
                if npc.apply_damage(shot.damage) {
                    events.death.send(DeathEvent { npc: id });
                }
                shot.alive = false;
                break;
            }
        }
    }

    for sweep in projectiles.sweeps_mut() {
        if !sweep.alive {
            continue;
        }
        for (index, npc) in npcs.iter_mut().enumerate() {
            if !npc.active {
                continue;
            }
            let id = NpcId(index);
            if sweep.struck.contains(&id) {
                continue;
            }
            if sweep.pos.distance(npc.pos) < sweep.radius {
                events.damage.send(DamageEvent { npc: id, amount: sweep.damage });
                if npc.apply_damage(sweep.damage) {
                    events.death.send(DeathEvent { npc: id });
                }
                sweep.struck.insert(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::npc::NpcKind;
    use crate::game::projectile::{MeleeSweep, Shot};
    use macroquad::math::Vec2;

    fn vampire_at(pos: Vec2) -> Npc {
        Npc::new(NpcKind::Vampire, pos, true)
    }

    #[test]
    fn test_shot_hits_once_and_dies() {
        let mut projectiles = ProjectileSet::new();
        projectiles.spawn_shot(Shot::new(Vec2::ZERO, Vec2::ZERO, 4));
        // Two overlapping NPCs; a single-use shot may only damage one
        let mut npcs = vec![vampire_at(Vec2::new(10.0, 0.0)), vampire_at(Vec2::new(-10.0, 0.0))];
        let mut events = Events::new();

        resolve(&mut projectiles, &mut npcs, &mut events);

        assert!(!projectiles.shots()[0].alive);
        let total: i32 = npcs.iter().map(|npc| npc.kind.max_hp() - npc.health.current).sum();
        assert_eq!(total, 4);
        assert_eq!(events.damage.len(), 1);
    }

    #[test]
    fn test_shot_misses_outside_hit_radius() {
        let mut projectiles = ProjectileSet::new();
        projectiles.spawn_shot(Shot::new(Vec2::ZERO, Vec2::ZERO, 4));
        let mut npcs = vec![vampire_at(Vec2::new(150.0, 0.0))]; // hit radius is 100
        let mut events = Events::new();

        resolve(&mut projectiles, &mut npcs, &mut events);
        assert!(projectiles.shots()[0].alive);
        assert_eq!(npcs[0].health.current, 10);
    }

    #[test]
    fn test_sweep_never_double_hits_same_npc() {
        let mut projectiles = ProjectileSet::new();
        projectiles.spawn_sweep(MeleeSweep::new(Vec2::ZERO, 60.0, 2, 8));
        let mut npcs = vec![vampire_at(Vec2::new(10.0, 0.0))];
        let mut events = Events::new();

        // Radius keeps overlapping for many ticks; one hit total
        for _ in 0..5 {
            resolve(&mut projectiles, &mut npcs, &mut events);
        }
        assert_eq!(npcs[0].health.current, 8);
        assert_eq!(events.damage.len(), 1);
        assert!(projectiles.sweeps()[0].alive);
    }

    #[test]
    fn test_sweep_still_hits_other_npcs_after_first() {
        let mut projectiles = ProjectileSet::new();
        projectiles.spawn_sweep(MeleeSweep::new(Vec2::ZERO, 60.0, 2, 8));
        let mut npcs = vec![vampire_at(Vec2::new(10.0, 0.0)), vampire_at(Vec2::new(500.0, 0.0))];
        let mut events = Events::new();

        resolve(&mut projectiles, &mut npcs, &mut events);
        assert_eq!(npcs[0].health.current, 8);
        assert_eq!(npcs[1].health.current, 10);

        // Second NPC wanders into the zone later in the swing
        npcs[1].pos = Vec2::new(20.0, 0.0);
        resolve(&mut projectiles, &mut npcs, &mut events);
        assert_eq!(npcs[1].health.current, 8);
        // And the first one is still protected by the struck set
        assert_eq!(npcs[0].health.current, 8);
    }

    #[test]
    fn test_coincident_kill_shots_do_not_underflow() {
        let mut projectiles = ProjectileSet::new();
        projectiles.spawn_shot(Shot::new(Vec2::ZERO, Vec2::ZERO, 10));
        projectiles.spawn_shot(Shot::new(Vec2::new(1.0, 0.0), Vec2::ZERO, 10));
        let mut npcs = vec![vampire_at(Vec2::new(5.0, 0.0))];
        let mut events = Events::new();

        resolve(&mut projectiles, &mut npcs, &mut events);

        assert_eq!(npcs[0].health.current, 0);
        assert!(npcs[0].is_dead());
        // Exactly one death event despite two same-tick hits
        assert_eq!(events.death.len(), 1);
    }

    #[test]
    fn test_inactive_npcs_ignored() {
        let mut projectiles = ProjectileSet::new();
        projectiles.spawn_shot(Shot::new(Vec2::ZERO, Vec2::ZERO, 4));
        let mut npc = vampire_at(Vec2::ZERO);
        npc.active = false;
        let mut npcs = vec![npc];
        let mut events = Events::new();

        resolve(&mut projectiles, &mut npcs, &mut events);
        assert!(projectiles.shots()[0].alive);
        assert_eq!(npcs[0].health.current, 10);
    }
}
