//! Kinematic Segment Chain
//!
//! The snake's body is an ordered list of 2D points, index 0 = head.
//! The head chases an externally set target at a capped speed; every
//! following segment is pulled toward its predecessor in a single
//! sequential pass so that no consecutive pair ever exceeds
//! `segment_length`. This is constraint satisfaction, not physics:
//! segment i is corrected against segment i-1's *already updated*
//! position, one pass, no iteration to convergence.

use macroquad::math::Vec2;

/// Canonical direction used whenever a direction vector degenerates
/// to zero length (screen coordinates, y-down, so this points up).
pub const FALLBACK_DIR: Vec2 = Vec2::new(0.0, -1.0);

/// The ordered body chain. Never holds fewer than 2 segments.
#[derive(Debug, Clone)]
pub struct SegmentChain {
    segments: Vec<Vec2>,
    target: Vec2,
    segment_length: f32,
    move_speed: f32,
}

impl SegmentChain {
    /// Create a two-segment chain at `spawn`, tail extending straight up.
    pub fn new(spawn: Vec2, segment_length: f32, move_speed: f32) -> Self {
        Self {
            segments: vec![spawn, spawn + FALLBACK_DIR * segment_length],
            target: spawn,
            segment_length,
            move_speed,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.segments.get(index).copied()
    }

    pub fn segments(&self) -> &[Vec2] {
        &self.segments
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Set the point the head will chase on the next `advance`.
    pub fn set_head_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Move the head at most `move_speed` toward the target (snapping if
    /// closer than that), then run the follow pass over the body.
    pub fn advance(&mut self) {
        let head = self.segments[0];
        let to_target = self.target - head;
        let distance = to_target.length();

        if distance < self.move_speed {
            self.segments[0] = self.target;
        } else {
            self.segments[0] = head + to_target / distance * self.move_speed;
        }

        for i in 1..self.segments.len() {
            let prev = self.segments[i - 1];
            let delta = self.segments[i] - prev;
            let dist = delta.length();
            if dist > self.segment_length {
                self.segments[i] = prev + delta / dist * self.segment_length;
            }
        }
    }

    /// Append a tail segment collinear with the last two segments, at
    /// exactly `segment_length` past the current tail.
    ///
    /// If the last two segments coincide the extension direction is
    /// undefined; we fall back to the canonical up direction.
    pub fn append_segment(&mut self) {
        let tail = self.segments[self.segments.len() - 1];
        let before_tail = self.segments[self.segments.len() - 2];
        let delta = tail - before_tail;

        let direction = if delta.length_squared() > 0.0 {
            delta.normalize()
        } else {
            println!("[chain] degenerate tail direction, appending along fallback");
            FALLBACK_DIR
        };

        self.segments.push(tail + direction * self.segment_length);
    }

    /// Unit vector from the neck toward the head, for eye placement and
    /// head-mounted facing. Falls back to the canonical up direction when
    /// head and neck coincide.
    pub fn facing(&self) -> Vec2 {
        let delta = self.segments[0] - self.segments[1];
        if delta.length_squared() > 0.0 {
            delta.normalize()
        } else {
            FALLBACK_DIR
        }
    }

    /// Cosmetic smoothing of the body polyline: for every interior
    /// segment, a quadratic Bezier whose control point is the raw segment
    /// position and whose endpoints are the midpoints to its neighbors,
    /// sampled at `resolution` subdivisions. Tail-to-head order so the
    /// head is painted on top. Never feeds back into `segments`.
    pub fn smoothed_outline(&self, resolution: usize) -> Vec<Vec2> {
        let mut points = Vec::new();
        for i in (1..self.segments.len().saturating_sub(1)).rev() {
            let current = self.segments[i];
            let start = (self.segments[i - 1] + current) * 0.5;
            let end = (self.segments[i + 1] + current) * 0.5;
            sample_quad_bezier(start, end, current, resolution, &mut points);
        }
        points
    }
}

/// Sample a quadratic Bezier at `resolution` subdivisions (inclusive of
/// both endpoints), appending to `out`.
fn sample_quad_bezier(start: Vec2, end: Vec2, control: Vec2, resolution: usize, out: &mut Vec<Vec2>) {
    for i in 0..=resolution {
        let t = i as f32 / resolution as f32;
        let u = 1.0 - t;
        out.push(start * (u * u) + control * (2.0 * u * t) + end * (t * t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn chain() -> SegmentChain {
        SegmentChain::new(Vec2::ZERO, 48.0, 15.0)
    }

    #[test]
    fn test_head_moves_capped_distance() {
        let mut c = chain();
        c.set_head_target(Vec2::new(1000.0, 0.0));
        c.advance();
        assert!((c.head().x - 15.0).abs() < EPS);
        assert!(c.head().y.abs() < EPS);
    }

    #[test]
    fn test_head_reaches_target_exactly() {
        let mut c = chain();
        c.set_head_target(Vec2::new(1000.0, 0.0));
        // ceil(1000 / 15) ticks to arrive, snapping on the last one
        for _ in 0..(1000f32 / 15.0).ceil() as usize {
            c.advance();
        }
        assert_eq!(c.head(), Vec2::new(1000.0, 0.0));
    }

    #[test]
    fn test_head_snaps_within_move_speed() {
        let mut c = chain();
        c.set_head_target(Vec2::new(10.0, 0.0));
        c.advance();
        assert_eq!(c.head(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_spacing_invariant_after_advance() {
        let mut c = chain();
        for _ in 0..6 {
            c.append_segment();
        }
        let targets = [
            Vec2::new(500.0, 300.0),
            Vec2::new(-200.0, 100.0),
            Vec2::new(40.0, -900.0),
        ];
        for target in targets {
            c.set_head_target(target);
            for _ in 0..30 {
                c.advance();
                for pair in c.segments().windows(2) {
                    assert!(pair[0].distance(pair[1]) <= c.segment_length() + EPS);
                }
            }
        }
    }

    #[test]
    fn test_append_collinear_at_exact_length() {
        let mut c = chain();
        let tail = c.segments()[c.len() - 1];
        let before = c.segments()[c.len() - 2];
        let direction = (tail - before).normalize();

        c.append_segment();
        let appended = c.segments()[c.len() - 1];
        assert!((appended.distance(tail) - 48.0).abs() < EPS);

        let new_dir = (appended - tail).normalize();
        assert!(new_dir.distance(direction) < EPS);
    }

    #[test]
    fn test_append_degenerate_uses_fallback() {
        let mut c = chain();
        // Force the last two segments to coincide
        c.segments[1] = c.segments[0];
        c.append_segment();
        let appended = c.segments()[c.len() - 1];
        assert!(appended.distance(c.segments()[1] + FALLBACK_DIR * 48.0) < EPS);
    }

    #[test]
    fn test_facing_fallback_when_coincident() {
        let mut c = chain();
        c.segments[1] = c.segments[0];
        assert_eq!(c.facing(), FALLBACK_DIR);
    }

    #[test]
    fn test_smoothing_does_not_mutate_segments() {
        let mut c = chain();
        for _ in 0..3 {
            c.append_segment();
        }
        let before = c.segments().to_vec();
        let outline = c.smoothed_outline(5);
        assert!(!outline.is_empty());
        assert_eq!(before, c.segments());
        // 3 interior segments, 6 samples each
        assert_eq!(outline.len(), 3 * 6);
    }

    #[test]
    fn test_never_below_two_segments() {
        let c = chain();
        assert_eq!(c.len(), 2);
    }
}
