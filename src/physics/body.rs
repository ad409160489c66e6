use super::vector::Vector2;
use crate::config::BODY_ANGULAR_VELOCITY;

/// A circular particle ("ball"). Mass equals radius.
///
/// Collision handling lives in `Simulation`; a body knows nothing about its
/// neighbours or the wiper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Centre position.
    pub pos: Vector2,
    /// Velocity in full-frame units.
    pub v: Vector2,
    pub r: f32,
    pub mass: f32,

    /// Cosmetic spin only; never feeds back into the physics.
    pub angle: f32,
    pub angular_velocity: f32,
    /// Opaque look picked at spawn time; the renderer maps it to a texture.
    pub variant: usize,
}

impl Body {
    /// Create a body at rest at `pos`.
    pub fn new(pos: Vector2, r: f32) -> Self {
        Self {
            pos,
            v: Vector2::ZERO,
            r,
            mass: r,
            angle: 0.0,
            angular_velocity: BODY_ANGULAR_VELOCITY,
            variant: 0,
        }
    }

    pub fn with_velocity(mut self, v: Vector2) -> Self {
        self.v = v;
        self
    }

    pub fn with_variant(mut self, variant: usize) -> Self {
        self.variant = variant;
        self
    }

    // --------------------- Forces ---------------------

    /// Impulse in full-step units: v += F / m
    pub fn apply_force(&mut self, force: Vector2) {
        self.v = self.v + force / self.mass;
    }

    /// v *= coeff. Coefficients in (0, 1) damp; 1 is a no-op.
    pub fn apply_friction(&mut self, coeff: f32) {
        self.v = self.v * coeff;
    }

    // --------------------- Integration & bounds ---------------------

    /// Advance by one substep. Every body in a substep must get the same
    /// `step_division` so full-step velocities are split evenly.
    pub fn integrate(&mut self, step_division: f32) {
        self.pos = self.pos + self.v / step_division;
        self.angle += self.angular_velocity;
    }

    /// Clamp into `[0, width] x [0, height]` (accounting for the radius) and
    /// flip the velocity component of every edge that was touched.
    pub fn bounce_in_bounds(&mut self, width: f32, height: f32) {
        if self.pos.x - self.r < 0.0 {
            self.pos.x = self.r;
            self.v.x = -self.v.x;
        }
        if self.pos.y - self.r < 0.0 {
            self.pos.y = self.r;
            self.v.y = -self.v.y;
        }
        if self.pos.x + self.r >= width {
            self.pos.x = width - self.r;
            self.v.x = -self.v.x;
        }
        if self.pos.y + self.r >= height {
            self.pos.y = height - self.r;
            self.v.y = -self.v.y;
        }
    }

    /// Fully past the left, right or bottom edge. Bodies above the top edge
    /// are still falling in from their spawn point and do not count.
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.pos.x + self.r < 0.0 || self.pos.x - self.r >= width || self.pos.y - self.r >= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_equals_radius() {
        let b = Body::new(Vector2::new(1.0, 2.0), 17.0);
        assert_eq!(b.mass, 17.0);
        assert_eq!(b.v, Vector2::ZERO);
    }

    #[test]
    fn force_is_scaled_by_mass() {
        let mut b = Body::new(Vector2::ZERO, 10.0);
        b.apply_force(Vector2::new(20.0, -5.0));
        assert_eq!(b.v, Vector2::new(2.0, -0.5));
    }

    #[test]
    fn integrate_splits_velocity_across_substeps() {
        let mut b = Body::new(Vector2::ZERO, 10.0).with_velocity(Vector2::new(3.0, 6.0));
        for _ in 0..3 {
            b.integrate(3.0);
        }
        assert!((b.pos.x - 3.0).abs() < 1e-5);
        assert!((b.pos.y - 6.0).abs() < 1e-5);
        assert!((b.angle - 3.0 * BODY_ANGULAR_VELOCITY).abs() < 1e-6);
    }

    #[test]
    fn friction_scales_speed_exactly() {
        let mut b = Body::new(Vector2::ZERO, 10.0).with_velocity(Vector2::new(3.0, -4.0));
        let before = b.v.length();
        b.apply_friction(0.9);
        assert!((b.v.length() - 0.9 * before).abs() < 1e-5);

        let v = b.v;
        b.apply_friction(1.0);
        assert_eq!(b.v, v);
    }

    #[test]
    fn bounce_clamps_and_reflects() {
        let mut b = Body::new(Vector2::new(-3.0, 105.0), 10.0).with_velocity(Vector2::new(-2.0, 4.0));
        b.bounce_in_bounds(200.0, 100.0);
        assert_eq!(b.pos, Vector2::new(10.0, 90.0));
        assert_eq!(b.v, Vector2::new(2.0, -4.0));
    }

    #[test]
    fn outside_ignores_top_edge() {
        let (w, h) = (100.0, 100.0);
        assert!(!Body::new(Vector2::new(50.0, -500.0), 5.0).is_outside(w, h));
        assert!(Body::new(Vector2::new(-6.0, 50.0), 5.0).is_outside(w, h));
        assert!(Body::new(Vector2::new(105.0, 50.0), 5.0).is_outside(w, h));
        assert!(Body::new(Vector2::new(50.0, 105.0), 5.0).is_outside(w, h));
        assert!(!Body::new(Vector2::new(-4.0, 50.0), 5.0).is_outside(w, h));
    }
}
