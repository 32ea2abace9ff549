use std::collections::HashSet;
use std::fmt;

use eframe::egui::{Pos2, pos2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Fixed,
    Float,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Float => "float",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, pos: Pos2) -> Self {
        Self {
            id,
            x: pos.x,
            y: pos.y,
            kind,
        }
    }

    pub fn pos(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn set_pos(&mut self, pos: Pos2) {
        self.x = pos.x;
        self.y = pos.y;
    }
}

/// An undirected weighted link. `source_id`/`target_id` only record the
/// order in which the link gesture picked the endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub weight: f32,
}

impl Connection {
    pub const DEFAULT_WEIGHT: f32 = 1.0;

    pub fn new(id: ConnectionId, source_id: NodeId, target_id: NodeId) -> Self {
        Self {
            id,
            source_id,
            target_id,
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source_id == node || self.target_id == node
    }

    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.source_id == node {
            Some(self.target_id)
        } else if self.target_id == node {
            Some(self.source_id)
        } else {
            None
        }
    }

    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.source_id == a && self.target_id == b) || (self.source_id == b && self.target_id == a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConnectionRejected {
    #[error("a node cannot be connected to itself ({0})")]
    SelfLoop(NodeId),
    #[error("{0} and {1} are already connected")]
    Duplicate(NodeId, NodeId),
    #[error("unknown endpoint {0}")]
    UnknownNode(NodeId),
    #[error("connection id {0} is already in use")]
    IdInUse(ConnectionId),
}

/// Structural problems found in a graph that came from outside the editor.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphIssue {
    #[error("node id {0} appears more than once")]
    DuplicateNodeId(NodeId),
    #[error("connection id {0} appears more than once")]
    DuplicateConnectionId(ConnectionId),
    #[error("connection {connection} references missing node {node}")]
    DanglingEndpoint {
        connection: ConnectionId,
        node: NodeId,
    },
    #[error("connection {0} joins a node to itself")]
    SelfLoop(ConnectionId),
    #[error("connection {0} duplicates an existing node pair")]
    DuplicatePair(ConnectionId),
    #[error("connection {connection} has invalid weight {weight}")]
    InvalidWeight {
        connection: ConnectionId,
        weight: f32,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph without enforcing the store invariants; pair with
    /// [`Graph::validate`] when the parts come from an external source.
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { nodes, connections }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|connection| connection.id == id)
    }

    pub fn connection_between(&self, a: NodeId, b: NodeId) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|connection| connection.joins(a, b))
    }

    pub fn incident(&self, node: NodeId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .iter()
            .filter(move |connection| connection.touches(node))
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.incident(node).count()
    }

    /// Fixed nodes always follow the pointer; float nodes only while the
    /// solver leaves them alone (at most one connection).
    pub fn is_draggable(&self, id: NodeId) -> bool {
        match self.node(id) {
            Some(node) => match node.kind {
                NodeKind::Fixed => true,
                NodeKind::Float => self.degree(id) <= 1,
            },
            None => false,
        }
    }

    pub fn add_node(&mut self, node: Node) -> bool {
        if self.node(node.id).is_some() {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        self.connections.retain(|connection| !connection.touches(id));
        Some(self.nodes.remove(index))
    }

    pub fn set_node_pos(&mut self, id: NodeId, pos: Pos2) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.set_pos(pos);
                true
            }
            None => false,
        }
    }

    pub fn check_connection(&self, a: NodeId, b: NodeId) -> Result<(), ConnectionRejected> {
        if a == b {
            return Err(ConnectionRejected::SelfLoop(a));
        }
        for endpoint in [a, b] {
            if self.node(endpoint).is_none() {
                return Err(ConnectionRejected::UnknownNode(endpoint));
            }
        }
        if self.connection_between(a, b).is_some() {
            return Err(ConnectionRejected::Duplicate(a, b));
        }
        Ok(())
    }

    pub fn add_connection(&mut self, connection: Connection) -> Result<(), ConnectionRejected> {
        self.check_connection(connection.source_id, connection.target_id)?;
        if self.connection(connection.id).is_some() {
            return Err(ConnectionRejected::IdInUse(connection.id));
        }
        self.connections.push(connection);
        Ok(())
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let index = self
            .connections
            .iter()
            .position(|connection| connection.id == id)?;
        Some(self.connections.remove(index))
    }

    pub fn set_weight(&mut self, id: ConnectionId, weight: f32) -> Option<f32> {
        let connection = self
            .connections
            .iter_mut()
            .find(|connection| connection.id == id)?;
        connection.weight = weight.max(0.0);
        Some(connection.weight)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    pub fn max_id(&self) -> u64 {
        let node_max = self.nodes.iter().map(|node| node.id.0).max().unwrap_or(0);
        let connection_max = self
            .connections
            .iter()
            .map(|connection| connection.id.0)
            .max()
            .unwrap_or(0);
        node_max.max(connection_max)
    }

    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id) {
                issues.push(GraphIssue::DuplicateNodeId(node.id));
            }
        }

        let mut connection_ids = HashSet::with_capacity(self.connections.len());
        let mut pairs = HashSet::with_capacity(self.connections.len());
        for connection in &self.connections {
            if !connection_ids.insert(connection.id) {
                issues.push(GraphIssue::DuplicateConnectionId(connection.id));
            }

            for endpoint in [connection.source_id, connection.target_id] {
                if !node_ids.contains(&endpoint) {
                    issues.push(GraphIssue::DanglingEndpoint {
                        connection: connection.id,
                        node: endpoint,
                    });
                }
            }

            if connection.source_id == connection.target_id {
                issues.push(GraphIssue::SelfLoop(connection.id));
            } else {
                let pair = if connection.source_id < connection.target_id {
                    (connection.source_id, connection.target_id)
                } else {
                    (connection.target_id, connection.source_id)
                };
                if !pairs.insert(pair) {
                    issues.push(GraphIssue::DuplicatePair(connection.id));
                }
            }

            if !(connection.weight >= 0.0 && connection.weight.is_finite()) {
                issues.push(GraphIssue::InvalidWeight {
                    connection: connection.id,
                    weight: connection.weight,
                });
            }
        }

        issues
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.connections
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new(NodeId(1), NodeKind::Fixed, pos2(0.0, 0.0)));
        graph.add_node(Node::new(NodeId(2), NodeKind::Fixed, pos2(100.0, 0.0)));
        graph.add_node(Node::new(NodeId(3), NodeKind::Float, pos2(50.0, 50.0)));
        graph
            .add_connection(Connection::new(ConnectionId(10), NodeId(1), NodeId(3)))
            .unwrap();
        graph
            .add_connection(Connection::new(ConnectionId(11), NodeId(2), NodeId(3)))
            .unwrap();
        graph
    }

    #[test]
    fn rejects_duplicates_in_either_direction() {
        let mut graph = triangle();
        let before = graph.clone();

        let reversed = graph.add_connection(Connection::new(ConnectionId(12), NodeId(3), NodeId(1)));
        assert_eq!(reversed, Err(ConnectionRejected::Duplicate(NodeId(3), NodeId(1))));

        let same = graph.add_connection(Connection::new(ConnectionId(13), NodeId(1), NodeId(3)));
        assert!(same.is_err());
        assert_eq!(graph, before);
    }

    #[test]
    fn rejects_self_loops_and_unknown_endpoints() {
        let mut graph = triangle();
        assert_eq!(
            graph.add_connection(Connection::new(ConnectionId(20), NodeId(2), NodeId(2))),
            Err(ConnectionRejected::SelfLoop(NodeId(2)))
        );
        assert_eq!(
            graph.add_connection(Connection::new(ConnectionId(21), NodeId(2), NodeId(99))),
            Err(ConnectionRejected::UnknownNode(NodeId(99)))
        );
        assert_eq!(graph.connection_count(), 2);
    }

    #[test]
    fn removing_a_node_drops_its_connections() {
        let mut graph = triangle();
        let removed = graph.remove_node(NodeId(3));
        assert_eq!(removed.map(|node| node.kind), Some(NodeKind::Float));
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.validate().is_empty());
    }

    #[test]
    fn draggable_depends_on_kind_and_degree() {
        let mut graph = triangle();
        assert!(graph.is_draggable(NodeId(1)));
        assert!(!graph.is_draggable(NodeId(3)));

        graph.remove_connection(ConnectionId(11));
        assert!(graph.is_draggable(NodeId(3)));
        assert!(!graph.is_draggable(NodeId(42)));
    }

    #[test]
    fn weight_is_floored_at_zero() {
        let mut graph = triangle();
        assert_eq!(graph.set_weight(ConnectionId(10), -3.0), Some(0.0));
        assert_eq!(graph.set_weight(ConnectionId(99), 2.0), None);
    }

    #[test]
    fn validate_reports_foreign_damage() {
        let graph = Graph::from_parts(
            vec![Node::new(NodeId(1), NodeKind::Fixed, pos2(0.0, 0.0))],
            vec![
                Connection::new(ConnectionId(5), NodeId(1), NodeId(1)),
                Connection::new(ConnectionId(6), NodeId(1), NodeId(7)),
            ],
        );
        let issues = graph.validate();
        assert!(issues.contains(&GraphIssue::SelfLoop(ConnectionId(5))));
        assert!(issues.contains(&GraphIssue::DanglingEndpoint {
            connection: ConnectionId(6),
            node: NodeId(7),
        }));
        assert_eq!(graph.max_id(), 6);
    }

    proptest! {
        #[test]
        fn arbitrary_link_attempts_never_duplicate_a_pair(
            attempts in prop::collection::vec((1u64..=5, 1u64..=5), 0..40)
        ) {
            let mut graph = Graph::new();
            for id in 1..=5 {
                graph.add_node(Node::new(NodeId(id), NodeKind::Float, pos2(id as f32, 0.0)));
            }
            for (index, (a, b)) in attempts.into_iter().enumerate() {
                let before = graph.clone();
                let connection = Connection::new(ConnectionId(100 + index as u64), NodeId(a), NodeId(b));
                if graph.add_connection(connection).is_err() {
                    prop_assert_eq!(&graph, &before);
                }
            }
            prop_assert!(graph.validate().is_empty());
        }
    }
}
