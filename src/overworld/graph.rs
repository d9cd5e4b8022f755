//! Overworld node graph: level markers connected by gated directional paths
//!
//! Each node owns a map from direction to an edge descriptor: the level the
//! player must have unlocked to travel it, and the pixel waypoint route the
//! icon follows when it does. The graph is static for the life of an
//! overworld; only the player's `unlocked_level` changes which edges are
//! open.
//!
//! Graph data ships as JSON next to the overworld map and is loaded through
//! serde, e.g.:
//!
//! ```json
//! {
//!   "nodes": [
//!     {
//!       "grid": [5, 3],
//!       "level": 0,
//!       "paths": {
//!         "right": {
//!           "required_level": 1,
//!           "waypoints": [{"x": 352.0, "y": 224.0}, {"x": 608.0, "y": 224.0}]
//!         }
//!       }
//!     }
//!   ]
//! }
//! ```

use crate::geometry::Vec2;
use crate::settings::TILE_SIZE;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Node key: overworld position in tile units
pub type GridPos = (i32, i32);

/// Travel direction out of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDirection {
    Up,
    Down,
    Left,
    Right,
}

/// One directional edge: its unlock gate and the route the icon follows.
/// Waypoint routes are axis-aligned between consecutive points; the first
/// waypoint is the origin node's center.
#[derive(Debug, Clone, Deserialize)]
pub struct PathEdge {
    pub required_level: u32,
    pub waypoints: Vec<Vec2>,
}

/// A level marker on the overworld
#[derive(Debug, Clone)]
pub struct Node {
    pub grid_pos: GridPos,
    /// Level this node starts when selected
    pub level: u32,
    pub paths: HashMap<PathDirection, PathEdge>,
}

impl Node {
    /// Pixel center of the node's tile
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.grid_pos.0 as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            self.grid_pos.1 as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }

    /// True iff an edge exists in `direction` and its gate is open. A missing
    /// edge is normal graph topology, so it answers false rather than erroring.
    pub fn can_move(&self, direction: PathDirection, unlocked_level: u32) -> bool {
        self.paths
            .get(&direction)
            .is_some_and(|edge| edge.required_level <= unlocked_level)
    }

    pub fn path(&self, direction: PathDirection) -> Option<&PathEdge> {
        self.paths.get(&direction)
    }
}

/// All nodes of one overworld, keyed by grid position
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    nodes: HashMap<GridPos, Node>,
}

/// On-disk shape of the graph file
#[derive(Deserialize)]
struct GraphFile {
    nodes: Vec<NodeData>,
}

#[derive(Deserialize)]
struct NodeData {
    grid: [i32; 2],
    level: u32,
    #[serde(default)]
    paths: HashMap<PathDirection, PathEdge>,
}

impl NodeGraph {
    pub fn new() -> Self {
        NodeGraph {
            nodes: HashMap::new(),
        }
    }

    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.grid_pos, node);
    }

    pub fn node(&self, grid_pos: GridPos) -> Option<&Node> {
        self.nodes.get(&grid_pos)
    }

    /// The node that starts the given level, if any
    pub fn node_for_level(&self, level: u32) -> Option<&Node> {
        self.nodes.values().find(|node| node.level == level)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let file: GraphFile = serde_json::from_str(json)?;

        let mut graph = NodeGraph::new();
        for data in file.nodes {
            graph.insert(Node {
                grid_pos: (data.grid[0], data.grid[1]),
                level: data.level,
                paths: data.paths,
            });
        }
        Ok(graph)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let content = fs::read_to_string(path.as_ref())?;
        let graph = Self::from_json_str(&content)?;

        println!(
            "Loaded overworld graph: {} nodes from {}",
            graph.len(),
            path.as_ref().display()
        );

        Ok(graph)
    }
}

/// Errors that can occur while loading a graph file
#[derive(Debug)]
pub enum GraphError {
    /// Could not read the file
    Io(std::io::Error),
    /// File contents were not a valid graph
    Parse(serde_json::Error),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GraphError::Io(err) => write!(f, "Failed to read graph file: {}", err),
            GraphError::Parse(err) => write!(f, "Invalid graph file: {}", err),
        }
    }
}

impl std::error::Error for GraphError {}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Io(err)
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_graph() -> NodeGraph {
        NodeGraph::from_json_str(
            r#"{
                "nodes": [
                    {
                        "grid": [2, 5],
                        "level": 0,
                        "paths": {
                            "up": {
                                "required_level": 2,
                                "waypoints": [
                                    {"x": 160.0, "y": 352.0},
                                    {"x": 160.0, "y": 96.0}
                                ]
                            },
                            "right": {
                                "required_level": 3,
                                "waypoints": [
                                    {"x": 160.0, "y": 352.0},
                                    {"x": 416.0, "y": 352.0}
                                ]
                            }
                        }
                    },
                    {"grid": [2, 1], "level": 1, "paths": {}}
                ]
            }"#,
        )
        .expect("sample graph parses")
    }

    #[test]
    fn test_can_move_respects_gate() {
        let graph = sample_graph();
        let node = graph.node((2, 5)).unwrap();

        assert!(node.can_move(PathDirection::Up, 2));
        assert!(node.can_move(PathDirection::Up, 5));
        assert!(!node.can_move(PathDirection::Up, 1));
    }

    #[test]
    fn test_can_move_missing_edge_is_false() {
        let graph = sample_graph();
        let node = graph.node((2, 5)).unwrap();

        assert!(!node.can_move(PathDirection::Down, 99));
        assert!(!node.can_move(PathDirection::Left, 99));
    }

    #[test]
    fn test_locked_edge_with_lower_unlock() {
        let graph = sample_graph();
        let node = graph.node((2, 5)).unwrap();

        // gate at 3, player unlocked only 2
        assert!(!node.can_move(PathDirection::Right, 2));
        assert!(node.can_move(PathDirection::Right, 3));
    }

    #[test]
    fn test_node_center_is_tile_center() {
        let graph = sample_graph();
        let node = graph.node((2, 5)).unwrap();

        assert_eq!(node.center(), Vec2::new(2.0 * 64.0 + 32.0, 5.0 * 64.0 + 32.0));
    }

    #[test]
    fn test_node_for_level() {
        let graph = sample_graph();

        assert_eq!(graph.node_for_level(1).unwrap().grid_pos, (2, 1));
        assert!(graph.node_for_level(9).is_none());
    }

    #[test]
    fn test_edge_waypoints_survive_loading() {
        let graph = sample_graph();
        let edge = graph.node((2, 5)).unwrap().path(PathDirection::Up).unwrap();

        assert_eq!(edge.required_level, 2);
        assert_eq!(edge.waypoints.len(), 2);
        assert_eq!(edge.waypoints[0], Vec2::new(160.0, 352.0));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"grid": [0, 0], "level": 0, "paths": {{}}}}]}}"#
        )
        .unwrap();

        let graph = NodeGraph::load_from_file(file.path()).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            NodeGraph::load_from_file("/nonexistent/overworld.json"),
            Err(GraphError::Io(_))
        ));
        assert!(matches!(
            NodeGraph::from_json_str("not json"),
            Err(GraphError::Parse(_))
        ));
    }
}
