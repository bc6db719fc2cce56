//! Draw pass
//!
//! Read-only: everything here consumes final positions computed by the
//! update pass. World-to-screen conversion is `world + origin`
//! everywhere; the origin is recomputed per frame to keep the chain
//! head centered.

use macroquad::prelude::*;

use crate::anim::AnimationLibrary;
use crate::game::attachment::Attachment;
use crate::game::npc::Npc;
use crate::game::player::Player;
use crate::game::projectile::ProjectileSet;

const BODY_SMOOTHING: usize = 5;

const BODY_OUTLINE: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const BODY_FILL: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const HEAD_FILL: Color = Color::new(0.39, 1.0, 0.39, 1.0);
const EYE_WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const PUPIL: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const SHOT_COLOR: Color = Color::new(1.0, 0.78, 0.78, 1.0);
const NODE_COLOR: Color = Color::new(0.0, 1.0, 1.0, 1.0);
const NODE_HIGHLIGHT: Color = Color::new(1.0, 1.0, 0.0, 1.0);
const BAR_BACK: Color = Color::new(0.78, 0.2, 0.2, 1.0);
const BAR_FILL: Color = Color::new(0.2, 0.78, 0.2, 1.0);

/// Body outline and head from overlapping circles along the smoothed
/// polyline: all outlines first, then all fills, so the seams between
/// sample circles disappear.
pub fn draw_player(player: &Player, origin: Vec2) {
    let girth = player.girth;
    let outline = player.chain.smoothed_outline(BODY_SMOOTHING);
    let head = origin + player.chain.head();

    for point in &outline {
        let p = origin + *point;
        draw_circle(p.x, p.y, girth / 2.0, BODY_OUTLINE);
    }
    draw_circle(head.x, head.y, girth / 1.5, BODY_OUTLINE);

    for point in &outline {
        let p = origin + *point;
        draw_circle(p.x, p.y, girth / 2.5, BODY_FILL);
    }
    draw_circle(head.x, head.y, girth / 1.75, HEAD_FILL);

    draw_eyes(player, origin);
}

/// Two forward-facing eyes; `facing` already falls back to a canonical
/// direction when the head and neck coincide.
fn draw_eyes(player: &Player, origin: Vec2) {
    let girth = player.girth;
    let dir = player.chain.facing();
    let perp = dir.perp();

    let eye_radius = girth / 5.0;
    let pupil_radius = eye_radius * 0.5;
    let eye_distance = girth * 0.3;

    let head = origin + player.chain.head() + dir * (girth * 0.2);
    let pupil_offset = dir * (girth * 0.1);

    for side in [1.0f32, -1.0] {
        let eye = head + perp * (eye_distance * side);
        draw_circle(eye.x, eye.y, eye_radius, EYE_WHITE);
        let pupil = eye + pupil_offset;
        draw_circle(pupil.x, pupil.y, pupil_radius, PUPIL);
    }
}

/// Attachment node markers, shown while a weapon is being dragged.
/// The node closest to the dragged weapon is highlighted.
pub fn draw_attachment_nodes(player: &Player, dragged_pos: Vec2, origin: Vec2) {
    let closest = player
        .slots
        .eligible_indices(player.chain.len())
        .filter_map(|slot| player.chain.get(slot).map(|pos| (slot, pos.distance(dragged_pos))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(slot, _)| slot);

    for slot in player.slots.eligible_indices(player.chain.len()) {
        let Some(segment) = player.chain.get(slot) else { continue };
        let p = origin + segment;
        if Some(slot) == closest {
            draw_circle(p.x, p.y, 10.0, NODE_HIGHLIGHT);
        } else {
            draw_circle(p.x, p.y, 5.0, NODE_COLOR);
        }
    }
}

/// Weapons, attached or on the ground. A missing sprite degrades to a
/// flat disc so the weapon stays visible and grabbable.
pub fn draw_attachments(
    attachments: &[Attachment],
    sprites: &std::collections::HashMap<&'static str, Texture2D>,
    origin: Vec2,
) {
    for attachment in attachments {
        let screen_pos = origin + attachment.pos;
        // Sprites point up; attached ones are drawn across the body
        let mut rotation = attachment.angle_deg().to_radians();
        if attachment.is_attached() {
            rotation += std::f32::consts::FRAC_PI_2;
        }

        match sprites.get(attachment.kind.name()) {
            Some(texture) => {
                let height = attachment.size * 2.0;
                let width = height * texture.width() / texture.height();
                draw_texture_ex(
                    texture,
                    screen_pos.x - width * 0.5,
                    screen_pos.y - height * 0.5,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(Vec2::new(width, height)),
                        rotation,
                        ..Default::default()
                    },
                );
            }
            None => {
                draw_circle(screen_pos.x, screen_pos.y, attachment.size * 0.5, NODE_COLOR);
            }
        }
    }
}

/// Point shots only; melee sweeps are intentionally invisible (the
/// swing is telegraphed by the weapon itself).
pub fn draw_projectiles(projectiles: &ProjectileSet, origin: Vec2) {
    for shot in projectiles.shots() {
        if !shot.alive {
            continue;
        }
        let p = origin + shot.pos;
        draw_circle(p.x, p.y, shot.radius, SHOT_COLOR);
    }
}

/// NPC sprite scaled to its size, anchored so the feet sit near the
/// world position, with an overhead health bar once damaged. A missing
/// animation frame skips the draw; the NPC still exists and fights.
pub fn draw_npc(npc: &Npc, library: &AnimationLibrary, origin: Vec2) {
    if !npc.active {
        return;
    }
    let identity = npc.kind.name();
    let state = npc.anim().name();
    let Some(texture) = library.frame(identity, state, npc.frame()) else {
        return;
    };

    let scale = npc.size / texture.height();
    let width = texture.width() * scale;
    let screen_pos = origin + npc.pos - Vec2::new(width * 0.5, npc.size * 0.8);

    draw_texture_ex(
        texture,
        screen_pos.x,
        screen_pos.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(width, npc.size)),
            ..Default::default()
        },
    );

    if npc.health.current < npc.health.max {
        draw_npc_health_bar(npc, screen_pos, width);
    }
}

fn draw_npc_health_bar(npc: &Npc, sprite_pos: Vec2, bar_width: f32) {
    let bar_height = 10.0;
    let y = sprite_pos.y - 20.0;
    draw_rectangle(sprite_pos.x, y, bar_width, bar_height, BAR_BACK);
    let filled = bar_width * npc.health.ratio();
    if filled > 0.0 {
        draw_rectangle(sprite_pos.x, y, filled, bar_height, BAR_FILL);
    }
}
