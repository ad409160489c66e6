use super::vector::Vector2;
use std::f64::consts::TAU;

/// Which part of the tapered capsule a body's projection falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WiperRegion {
    /// Behind the pivot: circle cap with the base radius.
    BaseCap,
    /// Past the tip: circle cap with the tip radius.
    TipCap,
    /// Alongside the shaft: radius lerps from base to tip.
    Shaft,
}

/// Rotating tapered capsule swept around a fixed pivot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wiper {
    /// Pivot (world space).
    pub pos: Vector2,
    /// Half of the `length` passed to `new`. This is the full pivot-to-tip
    /// distance, so the swept circle has diameter `length`.
    pub half_len: f32,
    pub base_radius: f32,
    pub tip_radius: f32,

    local_base: Vector2,
    local_tip: Vector2,

    /// World-space endpoints, recomputed by `update`.
    pub base: Vector2,
    pub tip: Vector2,
    /// Unit vector base -> tip.
    pub dir: Vector2,
    /// Unit left-perpendicular of `dir`.
    pub nor: Vector2,
}

impl Wiper {
    pub fn new(pos: Vector2, length: f32, base_radius: f32, tip_radius: f32) -> Self {
        let half_len = length / 2.0;
        let mut wiper = Self {
            pos,
            half_len,
            base_radius,
            tip_radius,
            local_base: Vector2::ZERO,
            local_tip: Vector2::new(0.0, -half_len),
            base: pos,
            tip: pos,
            dir: Vector2::ZERO,
            nor: Vector2::ZERO,
        };
        wiper.update(0.0);
        wiper
    }

    /// Recompute endpoints and axes for the absolute `rotation` (radians).
    pub fn update(&mut self, rotation: f32) {
        let turn = Vector2::from_angle(rotation);
        self.base = turn.rotate(self.local_base) + self.pos;
        self.tip = turn.rotate(self.local_tip) + self.pos;
        self.dir = (self.tip - self.base).normalize();
        self.nor = self.dir.perp();
    }

    pub fn midpoint(&self) -> Vector2 {
        (self.base + self.tip) / 2.0
    }

    /// Broad-phase radius around `midpoint` that encloses the whole capsule.
    pub fn reach(&self) -> f32 {
        self.half_len / 2.0 + self.base_radius.max(self.tip_radius)
    }

    /// Signed projection ("bound") of `point` onto the wiper axis, measured
    /// from the base.
    pub fn bound(&self, point: Vector2) -> f32 {
        self.dir.dot(point - self.base)
    }

    /// Regions that apply for a given bound. Exactly one, except at
    /// `bound == half_len` where the tip cap and the shaft both apply.
    pub fn regions(&self, bound: f32) -> impl Iterator<Item = WiperRegion> {
        let len = self.half_len;
        [
            (bound < 0.0, WiperRegion::BaseCap),
            (bound >= len, WiperRegion::TipCap),
            ((0.0..=len).contains(&bound), WiperRegion::Shaft),
        ]
        .into_iter()
        .filter_map(|(hit, region)| hit.then_some(region))
    }

    /// Fraction of the way from base (0) to tip (1).
    pub fn bounds_percentage(&self, bound: f32) -> f32 {
        bound / self.half_len
    }

    /// Shaft radius at `bound`, linearly interpolated between the caps.
    pub fn radius_at(&self, bound: f32) -> f32 {
        let t = self.bounds_percentage(bound);
        t * self.tip_radius + (1.0 - t) * self.base_radius
    }

    /// Outline corners in drawing order, offset from the axis by the cap radii.
    pub fn quad(&self) -> [Vector2; 4] {
        [
            self.base - self.nor * self.base_radius,
            self.tip - self.nor * self.tip_radius,
            self.tip + self.nor * self.tip_radius,
            self.base + self.nor * self.base_radius,
        ]
    }
}

/// Absolute sweep angle for the wall-clock time `now_ms`: one full turn per
/// `period_ms`.
pub fn sweep_angle(now_ms: f64, period_ms: f64) -> f32 {
    (TAU * now_ms.rem_euclid(period_ms) / period_ms) as f32
}

/// Push-strength modulation in [0, 1]: |cos(now * speed / 1000)|.
pub fn angle_differential(now_ms: f64, wiper_speed: f32) -> f32 {
    (now_ms * wiper_speed as f64 / 1000.0).cos().abs() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn wiper() -> Wiper {
        Wiper::new(Vector2::new(100.0, 100.0), 80.0, 5.0, 3.0)
    }

    #[test]
    fn constructor_halves_length() {
        let w = wiper();
        assert_eq!(w.half_len, 40.0);
        assert_eq!(w.base, Vector2::new(100.0, 100.0));
        assert!((w.tip.x - 100.0).abs() < EPS);
        assert!((w.tip.y - 60.0).abs() < EPS);
        assert!((w.base.distance(w.tip) - w.half_len).abs() < EPS);
    }

    #[test]
    fn axes_stay_orthonormal_for_any_rotation() {
        let mut w = wiper();
        for i in 0..64 {
            w.update(i as f32 * 0.37);
            assert!((w.dir.length() - 1.0).abs() < EPS);
            assert!((w.nor.length() - 1.0).abs() < EPS);
            assert!(w.dir.dot(w.nor).abs() < EPS);
            assert!((w.base.distance(w.tip) - w.half_len).abs() < EPS);
        }
    }

    #[test]
    fn update_is_absolute_not_incremental() {
        let mut a = wiper();
        a.update(0.5);
        a.update(0.5);
        let mut b = wiper();
        b.update(0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn regions_partition_the_axis() {
        let w = wiper();
        let collect = |b: f32| w.regions(b).collect::<Vec<_>>();
        assert_eq!(collect(-0.1), vec![WiperRegion::BaseCap]);
        assert_eq!(collect(0.0), vec![WiperRegion::Shaft]);
        assert_eq!(collect(20.0), vec![WiperRegion::Shaft]);
        assert_eq!(collect(40.0), vec![WiperRegion::TipCap, WiperRegion::Shaft]);
        assert_eq!(collect(40.1), vec![WiperRegion::TipCap]);
    }

    #[test]
    fn radius_tapers_linearly() {
        let w = wiper();
        assert_eq!(w.radius_at(0.0), 5.0);
        assert_eq!(w.radius_at(40.0), 3.0);
        assert!((w.radius_at(20.0) - 4.0).abs() < EPS);
    }

    #[test]
    fn quad_spans_both_radii() {
        let w = wiper();
        let q = w.quad();
        assert!((q[0].distance(q[3]) - 10.0).abs() < EPS);
        assert!((q[1].distance(q[2]) - 6.0).abs() < EPS);
    }

    #[test]
    fn sweep_timing_is_periodic() {
        assert_eq!(sweep_angle(0.0, 1000.0), 0.0);
        assert!((sweep_angle(250.0, 1000.0) - std::f32::consts::FRAC_PI_2).abs() < EPS);
        assert!((sweep_angle(1250.0, 1000.0) - sweep_angle(250.0, 1000.0)).abs() < EPS);
        assert_eq!(angle_differential(0.0, 1.5), 1.0);
        let d = angle_differential(1234.0, 1.5);
        assert!((0.0..=1.0).contains(&d));
    }
}
