use crate::confinement::{Confinement, Vertex};
use rand::Rng;

/// Endless sequence of vertices confined to the volumes of a
/// [`Confinement`](../struct.Confinement.html).
pub struct Vertices<'a, R: 'a> {
    confinement: &'a Confinement,
    rng: &'a mut R,
}

impl<'a, R: Rng> Vertices<'a, R> {
    pub(crate) fn new(confinement: &'a Confinement, rng: &'a mut R) -> Self {
        Vertices { confinement, rng }
    }
}

impl<'a, R: Rng> Iterator for Vertices<'a, R> {
    type Item = Vertex<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.confinement.sample(self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::max_value(), None)
    }
}
