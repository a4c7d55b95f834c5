use super::uniform::Uniform;
use geom::prelude::*;
use geom::Vec3;
use rand::Rng;

/// Ball rejection keeps drawing until the candidate is at least this far
/// from the center, so that normalizing it is numerically safe.
const MIN_DIRECTION_MAGNITUDE2: f32 = 1.0e-12;

/// The sphere of radius 1 around the origin.
///
/// Samples the unit ball in volume mode and a uniformly random direction
/// in surface mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSphere;

impl Uniform for UnitSphere {
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3 {
        if on_surface {
            unit_direction(rng)
        } else {
            unit_ball(rng).0
        }
    }
}

/// Draws points in the cube `[-1, 1)³` until one falls inside the unit ball.
///
/// Returns the accepted point along with the number of drawn candidates,
/// which on average is `6 / π`.
pub(crate) fn unit_ball<R: Rng>(rng: &mut R) -> (Vec3, u32) {
    let mut trials = 0;
    loop {
        trials += 1;
        let candidate = Vec3::new(
            rng.gen_range(-1.0f32, 1.0),
            rng.gen_range(-1.0f32, 1.0),
            rng.gen_range(-1.0f32, 1.0),
        );

        if candidate.magnitude2() <= 1.0 {
            return (candidate, trials);
        }
    }
}

/// Uniform direction obtained by normalizing a point of the unit ball.
///
/// Candidates outside the ball must be rejected rather than normalized,
/// otherwise directions towards the cube corners would be favored.
pub(crate) fn unit_direction<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let (candidate, _) = unit_ball(rng);
        if candidate.magnitude2() > MIN_DIRECTION_MAGNITUDE2 {
            return candidate.normalize();
        }
    }
}
