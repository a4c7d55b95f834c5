use rand::Rng;
use std::f32::consts::PI;

/// Angular extents within this many radians of a full turn are a full turn.
pub const ANGLE_TOLERANCE: f32 = 1.0e-5;

pub const FULL_TURN: f32 = 2.0 * PI;

pub fn is_full_phi(delta_phi: f32) -> bool {
    delta_phi >= FULL_TURN - ANGLE_TOLERANCE
}

/// Snaps an azimuthal extent of about a full turn or more to exactly a full turn.
pub fn normalize_delta_phi(delta_phi: f32) -> f32 {
    if is_full_phi(delta_phi) {
        FULL_TURN
    } else {
        delta_phi
    }
}

pub fn sample_phi<R: Rng>(rng: &mut R, start_phi: f32, delta_phi: f32) -> f32 {
    start_phi + normalize_delta_phi(delta_phi) * rng.gen::<f32>()
}

/// Signed arc distance of `(x, y)` to the wedge `[start_phi, start_phi + delta_phi]`,
/// negative inside the wedge.
///
/// Full turns and points on the z axis are never constrained.
pub fn phi_margin(x: f32, y: f32, start_phi: f32, delta_phi: f32) -> f32 {
    let rho = x.hypot(y);
    if is_full_phi(delta_phi) || rho == 0.0 {
        return ::std::f32::NEG_INFINITY;
    }

    let offset = (y.atan2(x) - start_phi).rem_euclid(FULL_TURN);
    let arc = if offset <= delta_phi {
        -offset.min(delta_phi - offset)
    } else {
        (offset - delta_phi).min(FULL_TURN - offset)
    };

    arc * rho
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_full_turn() {
        assert_eq!(FULL_TURN, normalize_delta_phi(2.0 * PI));
        assert_eq!(FULL_TURN, normalize_delta_phi(7.0));
        assert_eq!(1.0, normalize_delta_phi(1.0));
    }

    #[test]
    fn test_phi_margin_quarter_wedge() {
        // Wedge covering the first quadrant
        let delta = 0.5 * PI;
        assert_relative_eq!(-0.25 * PI * 2.0f32.sqrt(), phi_margin(1.0, 1.0, 0.0, delta), max_relative = 1.0e-5);
        assert!(phi_margin(1.0, -1.0, 0.0, delta) > 0.0);
        assert!(phi_margin(-1.0, 1.0, 0.0, delta) > 0.0);
        assert_relative_eq!(0.0, phi_margin(2.0, 0.0, 0.0, delta), epsilon = 1.0e-6);
    }

    #[test]
    fn test_phi_margin_wraps_around() {
        // Wedge from 350 to 10 degrees
        let start = -10.0f32.to_radians();
        let delta = 20.0f32.to_radians();
        assert!(phi_margin(1.0, 0.0, start, delta) < 0.0);
        assert!(phi_margin(0.0, 1.0, start, delta) > 0.0);
    }

    #[test]
    fn test_phi_margin_unconstrained() {
        assert_eq!(::std::f32::NEG_INFINITY, phi_margin(1.0, 0.0, 0.0, FULL_TURN));
        assert_eq!(::std::f32::NEG_INFINITY, phi_margin(0.0, 0.0, 0.0, 1.0));
    }
}
