//! Storage of the statistic nodes, which the flow checking reads the live metrics from.

mod node_storage;

pub use node_storage::*;
