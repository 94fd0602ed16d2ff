use crate::activation::ActivationFunction;
use crate::graph::link::Link;

/// Topology record of one node. Its activation value and error live in the
/// graph's flat buffers at the node's index.
#[derive(Debug, Clone)]
pub struct Node {
    pub activation: ActivationFunction,
    incoming: Vec<usize>,
    outgoing: Vec<usize>,
}

impl Node {
    pub fn new(activation: ActivationFunction) -> Node {
        Node { activation, incoming: Vec::new(), outgoing: Vec::new() }
    }

    /// Indices of links ending at this node.
    pub fn incoming(&self) -> &[usize] {
        &self.incoming
    }

    /// Indices of links starting at this node.
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    pub(crate) fn attach_incoming(&mut self, link: usize) {
        self.incoming.push(link);
    }

    pub(crate) fn attach_outgoing(&mut self, link: usize) {
        self.outgoing.push(link);
    }

    /// Activated weighted sum of the incoming links. `values` must cover
    /// every source node.
    pub fn eval(&self, values: &[f64], links: &[Link]) -> f64 {
        let sum: f64 = self.incoming.iter()
            .map(|&l| {
                let link = &links[l];
                values[link.from] * link.weight
            })
            .sum();
        self.activation.function(sum)
    }
}
