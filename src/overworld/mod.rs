// Overworld module - level selection over a node graph
//
// This module contains:
// - graph.rs: NodeGraph, nodes and their gated directional paths
// - icon.rs: the cursor that travels the waypoint routes between nodes

pub mod graph;
pub mod icon;

pub use graph::{GraphError, GridPos, Node, NodeGraph, PathDirection, PathEdge};
pub use icon::{Icon, IconState, RouteError};
