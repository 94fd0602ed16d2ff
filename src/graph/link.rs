use rand::Rng;

/// Weighted edge from a node in layer `i` to a node in layer `i + 1`.
///
/// Endpoints are indices into the owning graph's node table; the graph owns
/// the link, nodes only list its index.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl Link {
    /// New link with a weight drawn uniformly from [-1, 0).
    pub fn new<R: Rng + ?Sized>(from: usize, to: usize, rng: &mut R) -> Link {
        Link { from, to, weight: rng.gen::<f64>() - 1.0 }
    }
}
