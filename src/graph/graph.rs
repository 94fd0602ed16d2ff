use std::ops::Range;

use rand::Rng;
use rayon::prelude::*;

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::graph::link::Link;
use crate::graph::node::Node;

/// Layered node/link graph stored as a flat arena.
///
/// Nodes are numbered layer by layer, so every layer is a contiguous index
/// range and every link points from a lower range into the next one.
/// Activation values and accumulated errors are kept in two buffers indexed
/// by node.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    layers: Vec<Range<usize>>,
    nodes: Vec<Node>,
    links: Vec<Link>,
    values: Vec<f64>,
    errors: Vec<f64>,
}

/// Checks a layer-size descriptor: at least two layers, none of them empty.
pub fn validate_structure(structure: &[usize]) -> Result<()> {
    if structure.len() < 2 {
        return Err(NetworkError::InvalidStructure(format!(
            "expected at least 2 layers, got {}",
            structure.len()
        )));
    }
    if let Some(layer) = structure.iter().position(|&size| size == 0) {
        return Err(NetworkError::InvalidStructure(format!("layer {layer} has no nodes")));
    }
    Ok(())
}

impl NodeGraph {
    /// Builds the graph and fully connects each layer to the next one.
    pub fn build<R: Rng + ?Sized>(
        structure: &[usize],
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<NodeGraph> {
        validate_structure(structure)?;

        let mut layers = Vec::with_capacity(structure.len());
        let mut start = 0;
        for &size in structure {
            layers.push(start..start + size);
            start += size;
        }
        let node_count = start;

        let mut nodes = vec![Node::new(activation); node_count];
        let link_count: usize = structure.windows(2).map(|pair| pair[0] * pair[1]).sum();
        let mut links = Vec::with_capacity(link_count);

        for pair in layers.windows(2) {
            for from in pair[0].clone() {
                for to in pair[1].clone() {
                    let index = links.len();
                    links.push(Link::new(from, to, rng));
                    nodes[from].attach_outgoing(index);
                    nodes[to].attach_incoming(index);
                }
            }
        }

        Ok(NodeGraph {
            layers,
            nodes,
            links,
            values: vec![0.0; node_count],
            errors: vec![0.0; node_count],
        })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.len()).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_size(&self) -> usize {
        self.output_range().len()
    }

    fn output_range(&self) -> Range<usize> {
        self.layers[self.layers.len() - 1].clone()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Activation values of the output layer.
    pub fn output(&self) -> Vec<f64> {
        self.values[self.output_range()].to_vec()
    }

    /// Loads `input` into the input layer and evaluates every later layer in
    /// order. The caller checks `input.len()` against the input layer.
    pub fn forward(&mut self, input: &[f64], parallel: bool) {
        let input_range = self.layers[0].clone();
        self.values[input_range].copy_from_slice(input);

        for layer in 1..self.layers.len() {
            self.evaluate_layer(layer, parallel);
        }
    }

    /// Nodes of one layer only read the previous layer, so they can be
    /// evaluated in any order or concurrently.
    fn evaluate_layer(&mut self, layer: usize, parallel: bool) {
        let range = self.layers[layer].clone();
        let (earlier, rest) = self.values.split_at_mut(range.start);
        let earlier: &[f64] = earlier;
        let current = &mut rest[..range.len()];
        let nodes = &self.nodes[range];
        let links = &self.links;

        if parallel {
            current.par_iter_mut()
                .zip(nodes.par_iter())
                .for_each(|(value, node)| *value = node.eval(earlier, links));
        } else {
            for (value, node) in current.iter_mut().zip(nodes.iter()) {
                *value = node.eval(earlier, links);
            }
        }
    }

    /// Delta-rule sweep from the output layer back to the input layer.
    ///
    /// Each node scales its accumulated error by the activation derivative,
    /// pushes it to its source nodes through the current weights and then
    /// moves those weights. A layer is only processed after the whole next
    /// layer has finished accumulating into it.
    pub fn backward(&mut self, output_error: &[f64], learning_rate: f64) {
        self.errors.fill(0.0);

        let output_range = self.output_range();
        for (error, &seed) in self.errors[output_range].iter_mut().zip(output_error) {
            *error = seed;
        }

        for layer in self.layers.iter().rev() {
            for index in layer.clone() {
                let node = &self.nodes[index];
                let error = self.errors[index] * node.activation.derivative_from_output(self.values[index]);
                self.errors[index] = error;

                for &l in node.incoming() {
                    let link = &mut self.links[l];
                    self.errors[link.from] += error * link.weight;
                    link.weight += learning_rate * error * self.values[link.from];
                }
            }
        }
    }
}
