//! Construction of deterministic random sources for the samplers.

use rand::{SeedableRng, XorShiftRng};

/// Builds a fast generator whose sequence is fully determined by `seed`.
///
/// Any seed is valid, including zero. The seed is spread over the four words
/// of xorshift state such that the state is never all zeros.
pub fn seeded(seed: u64) -> XorShiftRng {
    let lo = seed as u32;
    let hi = (seed >> 32) as u32;

    XorShiftRng::from_seed([
        lo ^ 0x193a_6754,
        hi ^ 0xa8a7_d469,
        lo.rotate_left(16) ^ 0x9783_0e05,
        hi.rotate_left(16) ^ 0x113b_a7bb,
    ])
}
