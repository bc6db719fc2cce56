//! Health pool shared by the player and NPCs.

/// Current/maximum hit points, clamped into `[0, max]` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Reduce health, clamping at zero. Returns true if this call
    /// brought health to zero (the caller owns the death transition).
    pub fn damage(&mut self, amount: i32) -> bool {
        let was_alive = self.current > 0;
        self.current = (self.current - amount).max(0);
        was_alive && self.current == 0
    }

    /// Restore health, clamping at max. Returns true if now full.
    pub fn heal(&mut self, amount: i32) -> bool {
        self.current = (self.current + amount).min(self.max);
        self.current == self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Fill fraction in `[0, 1]` for bar rendering.
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut h = Health::new(10);
        assert!(h.damage(25));
        assert_eq!(h.current, 0);
        // A second overkill hit neither underflows nor reports a new death
        assert!(!h.damage(10));
        assert_eq!(h.current, 0);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut h = Health::new(10);
        h.damage(4);
        assert!(h.heal(100));
        assert_eq!(h.current, 10);
    }

    #[test]
    fn test_death_reported_once() {
        let mut h = Health::new(10);
        assert!(!h.damage(5));
        assert!(h.damage(5));
        assert!(!h.damage(5));
    }

    #[test]
    fn test_ratio() {
        let mut h = Health::new(10);
        h.damage(5);
        assert!((h.ratio() - 0.5).abs() < 1e-6);
    }
}
