//! Hub room
//!
//! Static background centered on the room position plus axis-aligned
//! wall rectangles. Walls are decoration with a point-containment query;
//! they do not block movement (there is no physics here).

use macroquad::prelude::*;

use crate::anim::load_sprite;

/// Background images are scaled to this height, preserving aspect.
const BACKGROUND_HEIGHT: f32 = 900.0;

#[derive(Debug, Clone)]
pub struct Wall {
    pub rect: Rect,
    pub color: Color,
    pub blocks: bool,
}

impl Wall {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            color: Color::from_rgba(100, 100, 100, 255),
            blocks: true,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }
}

pub struct Room {
    pos: Vec2,
    background: Option<Texture2D>,
    draw_size: Vec2,
    pub walls: Vec<Wall>,
}

impl Room {
    /// The single hub room, background centered on `center`.
    pub async fn hub(center: Vec2) -> Self {
        let background = load_sprite("textures/tarain/hub/HUB.png").await;
        let draw_size = background
            .as_ref()
            .map(|texture| {
                let scale = BACKGROUND_HEIGHT / texture.height();
                Vec2::new(texture.width() * scale, BACKGROUND_HEIGHT)
            })
            .unwrap_or(Vec2::new(BACKGROUND_HEIGHT, BACKGROUND_HEIGHT));

        Self {
            pos: center - draw_size * 0.5,
            background,
            draw_size,
            walls: vec![Wall::new(100.0, 100.0, 500.0, 500.0), Wall::new(-500.0, 400.0, 60.0, 200.0)],
        }
    }

    /// First blocking wall containing the point. Nothing consumes this
    /// yet; movement blocking is out of scope until a physics pass exists.
    #[allow(dead_code)]
    pub fn wall_at(&self, point: Vec2) -> Option<&Wall> {
        self.walls.iter().find(|wall| wall.blocks && wall.contains(point))
    }

    pub fn render(&self, origin: Vec2) {
        let screen_pos = origin + self.pos;
        if let Some(texture) = &self.background {
            draw_texture_ex(
                texture,
                screen_pos.x,
                screen_pos.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(self.draw_size),
                    ..Default::default()
                },
            );
        }
        for wall in &self.walls {
            draw_rectangle(
                origin.x + wall.rect.x,
                origin.y + wall.rect.y,
                wall.rect.w,
                wall.rect.h,
                wall.color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_containment() {
        let wall = Wall::new(100.0, 100.0, 500.0, 500.0);
        assert!(wall.contains(Vec2::new(300.0, 300.0)));
        assert!(!wall.contains(Vec2::new(50.0, 300.0)));
    }
}
