/// Per-position placement transform: a rotation about the origin followed by
/// a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation in degrees, applied before the translation.
    pub angle: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Transform {
    #[must_use]
    pub fn new(angle: f64, dx: f64, dy: f64) -> Self {
        Self { angle, dx, dy }
    }

    #[must_use]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(0.0, dx, dy)
    }

    /// Rotate `[x, y]` about the origin, then translate.
    #[must_use]
    pub fn apply(&self, pair: [f64; 2]) -> [f64; 2] {
        let [x, y] = rotate_vec(pair, self.angle);
        [x + self.dx, y + self.dy]
    }

    pub fn apply_pair(&self, x: &mut f64, y: &mut f64) {
        let [nx, ny] = self.apply([*x, *y]);
        *x = nx;
        *y = ny;
    }

    /// Orientation of an entity after this transform, normalized to [0, 360).
    #[must_use]
    pub fn angle_plus(&self, r: f64) -> f64 {
        (r + self.angle).rem_euclid(360.0)
    }

    #[must_use]
    pub fn rotates(&self) -> bool {
        self.angle.rem_euclid(360.0) != 0.0
    }
}

fn rotate_vec(v: [f64; 2], angle_deg: f64) -> [f64; 2] {
    // Grid turns are axis-aligned; keep them exact instead of going through
    // sin/cos and picking up 1e-16 residue.
    match angle_deg.rem_euclid(360.0) {
        a if a == 0.0 => v,
        a if a == 90.0 => [-v[1], v[0]],
        a if a == 180.0 => [-v[0], -v[1]],
        a if a == 270.0 => [v[1], -v[0]],
        a => {
            let (s, c) = a.to_radians().sin_cos();
            [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn translation_only() {
        let t = Transform::translation(10.0, -5.0);
        assert_eq!(t.apply([3.0, 4.0]), [13.0, -1.0]);
    }

    #[test]
    fn half_turn_is_exact() {
        let t = Transform::new(180.0, 10.0, 0.0);
        assert_eq!(t.apply([3.0, 4.0]), [7.0, -4.0]);
    }

    #[test]
    fn rotation_precedes_translation() {
        let t = Transform::new(90.0, 1.0, 0.0);
        let [x, y] = t.apply([2.0, 0.0]);
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn arbitrary_angle_goes_through_sin_cos() {
        let t = Transform::new(45.0, 0.0, 0.0);
        let [x, y] = t.apply([1.0, 0.0]);
        assert_abs_diff_eq!(x, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(y, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn angle_plus_wraps() {
        let t = Transform::new(180.0, 0.0, 0.0);
        assert_abs_diff_eq!(t.angle_plus(270.0), 90.0, epsilon = 1e-9);
        assert!(!Transform::translation(1.0, 1.0).rotates());
        assert!(t.rotates());
    }
}
