//! Player HUD
//!
//! Screen-space bar stack in the top-left corner (armor backplate,
//! health, mana, body length) plus an options button in the bottom-left
//! whose click region is checked before world input, so a HUD click
//! never grabs a weapon underneath it.

use macroquad::prelude::*;

use crate::game::Player;

/// What a HUD click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    Options,
}

pub const MAX_ARMOR: i32 = 10;
pub const MAX_MANA: i32 = 100;
pub const MAX_LENGTH: usize = 50;

const OUTLINE: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const BACKDROP: Color = Color::new(0.16, 0.16, 0.16, 1.0);
const HEALTH_COLOR: Color = Color::new(1.0, 0.2, 0.2, 1.0);
const MANA_COLOR: Color = Color::new(0.2, 1.0, 1.0, 1.0);
const LENGTH_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const ARMOR_COLOR: Color = Color::new(0.51, 0.47, 0.59, 1.0);

/// Filled width of a value bar, clamped to `[0, width]`.
pub fn fill_width(value: i32, max_value: i32, width: f32) -> f32 {
    if max_value <= 0 {
        return 0.0;
    }
    (value as f32 / max_value as f32).clamp(0.0, 1.0) * width
}

pub struct PlayerHud {
    // Placeholder stats until armor/mana systems exist
    armor: i32,
    mana: i32,
}

impl PlayerHud {
    pub fn new() -> Self {
        Self {
            armor: MAX_ARMOR,
            mana: MAX_MANA,
        }
    }

    /// Bottom-left options button, sized off the screen height.
    fn options_rect(&self) -> Rect {
        let size = screen_height() * 0.1;
        Rect::new(screen_width() * 0.01, screen_height() * 0.99 - size, size, size)
    }

    /// Hit-test a screen-space click against HUD regions.
    pub fn clicked(&self, mouse: Vec2) -> Option<HudAction> {
        if self.options_rect().contains(mouse) {
            return Some(HudAction::Options);
        }
        None
    }

    pub fn render(&self, player: &Player) {
        let bar_width = screen_width() * 0.16;
        let bar_height = screen_height() * 0.02;
        let x = screen_width() * 0.015;
        let mut y = screen_height() * 0.02;
        let spacing = bar_height + 6.0;

        // Armor backplate sits behind the health bar, slightly larger
        let pad = 7.0;
        draw_bar(
            self.armor,
            MAX_ARMOR,
            x - pad,
            y - pad,
            bar_width + pad * 2.0,
            bar_height + pad * 2.0,
            ARMOR_COLOR,
        );
        draw_bar(player.health.current, player.health.max, x, y, bar_width, bar_height, HEALTH_COLOR);
        y += spacing + pad;

        draw_bar(self.mana, MAX_MANA, x, y, bar_width, bar_height, MANA_COLOR);
        y += spacing;

        draw_bar(
            player.chain.len() as i32,
            MAX_LENGTH as i32,
            x,
            y,
            bar_width,
            bar_height,
            LENGTH_COLOR,
        );

        let options = self.options_rect();
        draw_rectangle(options.x, options.y, options.w, options.h, BACKDROP);
        draw_rectangle_lines(options.x, options.y, options.w, options.h, 3.0, OUTLINE);
        // Burger lines
        for i in 0..3 {
            let line_y = options.y + options.h * (0.3 + 0.2 * i as f32);
            draw_rectangle(options.x + options.w * 0.2, line_y, options.w * 0.6, 3.0, OUTLINE);
        }
    }
}

impl Default for PlayerHud {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_bar(value: i32, max_value: i32, x: f32, y: f32, width: f32, height: f32, fill: Color) {
    draw_rectangle_lines(x - 1.0, y - 1.0, width + 2.0, height + 2.0, 2.0, OUTLINE);
    draw_rectangle(x, y, width, height, BACKDROP);
    let filled = fill_width(value, max_value, width);
    if filled > 0.0 {
        draw_rectangle(x, y, filled, height, fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_width_clamps() {
        assert_eq!(fill_width(5, 10, 100.0), 50.0);
        assert_eq!(fill_width(15, 10, 100.0), 100.0);
        assert_eq!(fill_width(-5, 10, 100.0), 0.0);
        assert_eq!(fill_width(5, 0, 100.0), 0.0);
    }
}
