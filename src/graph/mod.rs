pub mod graph;
pub mod link;
pub mod node;

pub use graph::{NodeGraph, validate_structure};
pub use link::Link;
pub use node::Node;
