//! Snakes & Guns: a cursor-chasing segmented snake that picks up and
//! wields slot-bound weapons against NPCs in a single hub room.
//!
//! One frame = one tick: input sampling, state update, collision
//! resolution, render - in that order, single-threaded. The camera
//! origin is recomputed each frame to keep the snake's head centered;
//! everything world-space is drawn at `world + origin`.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod anim;
mod game;
mod hud;
mod render;
mod room;
mod tuning;

use std::collections::HashMap;

use macroquad::prelude::*;

use anim::{load_sprite, weapon_sprite_path, AnimationLibrary};
use game::npc::UnknownNpcKind;
use game::weapons::UnknownWeaponType;
use game::{combat, Attachment, AttachmentId, BindingEvent, Events, Npc, NpcKind, Player, ProjectileSet, WeaponKind};
use hud::{HudAction, PlayerHud};
use room::Room;
use tuning::{Tuning, TUNING_PATH};

const ANIM_STATES: [&str; 3] = ["idle", "running", "dead"];

/// Scripted wizard patrol interval (liveness demo).
const PATROL_PERIOD: u64 = 300;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Snakes & Guns v{}", VERSION),
        window_width: 1280,
        window_height: 900,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// World construction failed on invalid configuration. Unlike missing
/// textures this is fatal: an unknown type identity is a config bug.
#[derive(Debug)]
enum SetupError {
    Weapon(UnknownWeaponType),
    Npc(UnknownNpcKind),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Weapon(err) => write!(f, "{}", err),
            SetupError::Npc(err) => write!(f, "{}", err),
        }
    }
}

impl From<UnknownWeaponType> for SetupError {
    fn from(e: UnknownWeaponType) -> Self {
        SetupError::Weapon(e)
    }
}

impl From<UnknownNpcKind> for SetupError {
    fn from(e: UnknownNpcKind) -> Self {
        SetupError::Npc(e)
    }
}

struct Game {
    player: Player,
    attachments: Vec<Attachment>,
    npcs: Vec<Npc>,
    projectiles: ProjectileSet,
    events: Events,
    hud: PlayerHud,
    room: Room,
    npc_anims: AnimationLibrary,
    weapon_sprites: HashMap<&'static str, Texture2D>,
    origin: Vec2,
    dragging: Option<AttachmentId>,
    tick: u64,
}

impl Game {
    async fn new() -> Result<Self, SetupError> {
        let tuning = Tuning::load_or_default(TUNING_PATH);

        let mut player = Player::new(Vec2::ZERO);
        for _ in 0..tuning.starting_growth {
            player.grow();
        }

        let mut attachments = Vec::new();
        let mut weapon_sprites = HashMap::new();
        for spawn in &tuning.ground_weapons {
            let kind = WeaponKind::from_name(&spawn.kind)?;
            attachments.push(Attachment::new(Vec2::new(spawn.pos.0, spawn.pos.1), kind));
            if !weapon_sprites.contains_key(kind.name()) {
                if let Some(texture) = load_sprite(&weapon_sprite_path(kind.name())).await {
                    weapon_sprites.insert(kind.name(), texture);
                }
            }
        }

        let mut npcs = Vec::new();
        let mut npc_anims = AnimationLibrary::new("npcs");
        for spawn in &tuning.npcs {
            let kind = NpcKind::from_name(&spawn.kind)?;
            npcs.push(Npc::new(kind, Vec2::new(spawn.pos.0, spawn.pos.1), spawn.active));
            npc_anims.load_states(kind.name(), &ANIM_STATES).await;
        }

        let room = Room::hub(Vec2::ZERO).await;

        println!("[setup] world ready: {} weapons, {} NPCs", attachments.len(), npcs.len());

        Ok(Self {
            player,
            attachments,
            npcs,
            projectiles: ProjectileSet::new(),
            events: Events::new(),
            hud: PlayerHud::new(),
            room,
            npc_anims,
            weapon_sprites,
            origin: Vec2::ZERO,
            dragging: None,
            tick: 0,
        })
    }

    fn pointer_world(&self) -> Vec2 {
        Vec2::from(mouse_position()) - self.origin
    }

    fn handle_input(&mut self) {
        let pointer_screen = Vec2::from(mouse_position());
        let pointer_world = self.pointer_world();

        if is_mouse_button_pressed(MouseButton::Left) {
            match self.hud.clicked(pointer_screen) {
                Some(HudAction::Options) => println!("[hud] options"),
                None => {
                    self.dragging = None;
                    for (index, attachment) in self.attachments.iter_mut().enumerate() {
                        let id = AttachmentId(index);
                        if attachment.handle_press(id, pointer_world, &mut self.player.slots) {
                            self.dragging = Some(id);
                            break;
                        }
                    }
                }
            }
        }

        if is_mouse_button_released(MouseButton::Left) {
            for (index, attachment) in self.attachments.iter_mut().enumerate() {
                attachment.handle_release(
                    AttachmentId(index),
                    &self.player.chain,
                    &mut self.player.slots,
                    &mut self.events,
                );
            }
            self.dragging = None;
        }

        if is_mouse_button_pressed(MouseButton::Right) {
            self.player.move_enabled = true;
        }
        if is_mouse_button_released(MouseButton::Right) {
            self.player.move_enabled = false;
            self.player.stop();
        }

        if is_key_pressed(KeyCode::Space) {
            self.player.grow();
        }
    }

    /// One simulation tick. Order matters: the chain moves first, bound
    /// attachments re-read their segments (capturing last tick's pose),
    /// attacks fire with fresh samples, then collision and prune.
    fn update(&mut self) {
        let pointer_world = self.pointer_world();

        self.player.update(pointer_world);
        self.player.sync_attachments(&mut self.attachments);

        if let Some(id) = self.dragging {
            if let Some(attachment) = self.attachments.get_mut(id.0) {
                attachment.update_drag(pointer_world);
            }
        }

        self.projectiles.update();

        let bound: Vec<AttachmentId> = self.player.slots.iter().map(|(_, id)| id).collect();
        for id in bound {
            if let Some(attachment) = self.attachments.get_mut(id.0) {
                attachment.attack(&mut self.projectiles, &mut self.player.health, &mut self.events);
            }
        }

        combat::resolve(&mut self.projectiles, &mut self.npcs, &mut self.events);

        for npc in &mut self.npcs {
            npc.update();
            let frames = self.npc_anims.frame_count(npc.kind.name(), npc.anim().name());
            npc.advance_frame(frames);
        }

        self.projectiles.prune();
        self.patrol();
        self.drain_events();

        self.tick += 1;
    }

    /// Scripted wizard walkabout, kept as a liveness demo until real AI
    /// exists.
    fn patrol(&mut self) {
        let Some(wizard) = self.npcs.iter_mut().find(|npc| npc.kind == NpcKind::Wizard) else {
            return;
        };
        if self.tick % (PATROL_PERIOD * 2) == PATROL_PERIOD {
            wizard.set_target_offset(Vec2::new(1000.0, 600.0));
        } else if self.tick > 0 && self.tick % (PATROL_PERIOD * 2) == 0 {
            wizard.set_target_offset(Vec2::new(-1000.0, -600.0));
        }
    }

    /// Diagnostic pass: every absorbed combat/binding outcome leaves a
    /// trace on stdout.
    fn drain_events(&mut self) {
        for event in self.events.damage.drain() {
            if let Some(npc) = self.npcs.get(event.npc.0) {
                println!(
                    "[combat] {} took {} damage, {} HP left",
                    npc.kind.name(),
                    event.amount,
                    npc.health.current
                );
            }
        }
        for event in self.events.death.drain() {
            if let Some(npc) = self.npcs.get(event.npc.0) {
                println!("[combat] {} has died", npc.kind.name());
            }
        }
        for event in self.events.heal.drain() {
            println!("[heal] +{} ({}/{})", event.amount, self.player.health.current, self.player.health.max);
        }
        for event in self.events.binding.drain() {
            match event {
                BindingEvent::Bound { slot } => println!("[slots] weapon snapped to node {}", slot),
                BindingEvent::Refused { slot } => println!("[slots] node {} refused the weapon", slot),
                BindingEvent::Dropped => println!("[slots] weapon dropped without snapping"),
            }
        }
        self.events.clear_all();
    }

    fn render(&mut self) {
        clear_background(BLACK);

        // Keep the head centered
        let head = self.player.chain.head();
        self.origin = Vec2::new(screen_width() * 0.5, screen_height() * 0.5) - head;

        self.room.render(self.origin);
        render::draw_player(&self.player, self.origin);

        if let Some(id) = self.dragging {
            if let Some(attachment) = self.attachments.get(id.0) {
                render::draw_attachment_nodes(&self.player, attachment.pos, self.origin);
            }
        }

        render::draw_attachments(&self.attachments, &self.weapon_sprites, self.origin);
        render::draw_projectiles(&self.projectiles, self.origin);
        for npc in &self.npcs {
            render::draw_npc(npc, &self.npc_anims, self.origin);
        }

        self.hud.render(&self.player);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut game = match Game::new().await {
        Ok(game) => game,
        Err(err) => {
            println!("[setup] fatal: {}", err);
            return;
        }
    };

    loop {
        game.handle_input();
        game.update();
        game.render();
        next_frame().await;
    }
}
