/// Simulation-space 2D vector: glam's `Vec2` from bevy's math re-export.
///
/// `normalize` of a zero vector yields NaN components; glam only asserts on
/// that under its `glam_assert` features, which bevy leaves off. Callers must
/// not normalize zero velocities or directions. `perp` is the left
/// perpendicular `(-y, x)`.
pub type Vector2 = bevy::math::Vec2;

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn normalized_has_unit_length() {
        for v in [
            Vector2::new(3.0, 4.0),
            Vector2::new(-0.001, 0.002),
            Vector2::new(1234.5, -987.0),
            Vector2::new(0.0, -7.0),
        ] {
            assert!((v.normalize().length() - 1.0).abs() < EPS, "{v:?}");
        }
    }

    #[test]
    fn normalizing_zero_propagates_nan() {
        assert!(!Vector2::ZERO.normalize().is_finite());
    }

    #[test]
    fn scalar_forms_touch_both_components() {
        let v = Vector2::new(2.0, 6.0);
        assert_eq!(v + 1.0, Vector2::new(3.0, 7.0));
        assert_eq!(v - 1.0, Vector2::new(1.0, 5.0));
        assert_eq!(v * Vector2::new(3.0, -1.0), Vector2::new(6.0, -6.0));
    }

    #[test]
    fn rotate_quarter_turn_matches_perp() {
        let v = Vector2::new(1.0, 0.0);
        assert_eq!(v.perp(), Vector2::new(0.0, 1.0));
        let quarter = Vector2::from_angle(std::f32::consts::FRAC_PI_2);
        assert!(quarter.rotate(v).abs_diff_eq(v.perp(), EPS));
    }
}
