use geom::Vec3;
use rand::Rng;

/// Samples any point inside the implementer, or on its surface.
/// All possible points have approximately equal probability.
pub trait Uniform {
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3;
}
