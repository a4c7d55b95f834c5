//! Endless sequences of sampled points.

mod vertices;

pub use self::vertices::Vertices;
