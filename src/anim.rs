//! Animation frame source
//!
//! Frames follow the folder convention
//! `textures/{category}/{identity}/{state}/{frame}.png`, numbered from 0.
//! At startup we probe each (identity, state) pair by loading frames
//! until one is missing; the count is what the game logic consumes
//! ("current frame, advance with wraparound"). A missing folder or first
//! frame is non-fatal: one diagnostic, zero frames, the draw for that
//! character is skipped while combat and movement carry on.

use std::collections::HashMap;

use macroquad::texture::{load_texture, Texture2D};

pub const TEXTURE_ROOT: &str = "textures";

/// Safety cap while probing a frame folder.
const MAX_FRAMES: usize = 64;

#[derive(Debug)]
pub enum AnimError {
    /// No frames found for (identity, state).
    MissingAnimation(String),
}

impl std::fmt::Display for AnimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimError::MissingAnimation(path) => write!(f, "missing animation: {}", path),
        }
    }
}

impl std::error::Error for AnimError {}

/// Path of one animation frame.
pub fn frame_path(category: &str, identity: &str, state: &str, frame: usize) -> String {
    format!("{}/{}/{}/{}/{}.png", TEXTURE_ROOT, category, identity, state, frame)
}

/// Loaded frames for one (identity, state).
#[derive(Default)]
pub struct AnimationSet {
    frames: Vec<Texture2D>,
}

impl AnimationSet {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&Texture2D> {
        self.frames.get(index)
    }
}

/// All animation sets for one category (e.g. "npcs"), keyed by
/// (identity, state).
#[derive(Default)]
pub struct AnimationLibrary {
    category: String,
    sets: HashMap<(String, String), AnimationSet>,
}

impl AnimationLibrary {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            sets: HashMap::new(),
        }
    }

    /// Probe and cache every listed state for one identity. Absorbs
    /// missing assets: logs once per empty animation and stores an
    /// empty set so lookups stay cheap.
    pub async fn load_states(&mut self, identity: &str, states: &[&str]) {
        for &state in states {
            let mut set = AnimationSet::default();
            for frame in 0..MAX_FRAMES {
                let path = frame_path(&self.category, identity, state, frame);
                match load_texture(&path).await {
                    Ok(texture) => set.frames.push(texture),
                    Err(_) => break,
                }
            }
            if set.frame_count() == 0 {
                let err = AnimError::MissingAnimation(frame_path(&self.category, identity, state, 0));
                println!("[anim] {}", err);
            }
            self.sets.insert((identity.to_string(), state.to_string()), set);
        }
    }

    pub fn frame_count(&self, identity: &str, state: &str) -> usize {
        self.sets
            .get(&(identity.to_string(), state.to_string()))
            .map(|set| set.frame_count())
            .unwrap_or(0)
    }

    pub fn frame(&self, identity: &str, state: &str, index: usize) -> Option<&Texture2D> {
        self.sets
            .get(&(identity.to_string(), state.to_string()))
            .and_then(|set| set.frame(index))
    }
}

/// Load a single standalone sprite, absorbing a miss with a diagnostic.
pub async fn load_sprite(path: &str) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(texture) => Some(texture),
        Err(err) => {
            println!("[anim] failed to load {}: {}", path, err);
            None
        }
    }
}

/// Sprite path for a weapon attachment texture.
pub fn weapon_sprite_path(weapon_name: &str) -> String {
    format!("{}/player/attachments/{}_attachment.png", TEXTURE_ROOT, weapon_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_path_convention() {
        assert_eq!(
            frame_path("npcs", "wizard", "idle", 3),
            "textures/npcs/wizard/idle/3.png"
        );
    }

    #[test]
    fn test_weapon_sprite_path() {
        assert_eq!(
            weapon_sprite_path("Gun"),
            "textures/player/attachments/Gun_attachment.png"
        );
    }

    #[test]
    fn test_empty_library_reports_zero_frames() {
        let library = AnimationLibrary::new("npcs");
        assert_eq!(library.frame_count("wizard", "idle"), 0);
        assert!(library.frame("wizard", "idle", 0).is_none());
    }
}
