use eframe::egui::Pos2;
use tracing::{debug, info};

use super::config::EditorConfig;
use super::geometry::{self, Hit};
use super::history::History;
use super::model::{
    Connection, ConnectionId, ConnectionRejected, Graph, GraphIssue, Node, NodeId, NodeKind,
};
use super::relax::relax_floats;

/// The editable graph: store, undo history and id allocation. Every edit
/// re-settles the float nodes before returning; undo and redo put snapshots
/// back exactly as they were taken.
#[derive(Debug)]
pub struct Document {
    graph: Graph,
    history: History,
    next_id: u64,
    config: EditorConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Document {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            graph: Graph::new(),
            history: History::new(),
            next_id: 1,
            config,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn hit_test(&self, point: Pos2) -> Hit {
        geometry::hit_test(&self.graph, point, &self.config)
    }

    pub fn settle(&mut self) -> bool {
        relax_floats(&mut self.graph, self.config.live_sweeps)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn restore(&mut self, graph: Graph) {
        self.next_id = self.next_id.max(graph.max_id().saturating_add(1));
        self.graph = graph;
    }

    fn install(&mut self, graph: Graph) {
        self.restore(graph);
        self.settle();
    }

    pub fn add_node(&mut self, kind: NodeKind, pos: Pos2) -> NodeId {
        self.history.checkpoint(&self.graph);
        let id = NodeId(self.allocate_id());
        self.graph.add_node(Node::new(id, kind, pos));
        debug!(%id, kind = kind.label(), x = pos.x, y = pos.y, "node created");
        self.settle();
        id
    }

    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<ConnectionId, ConnectionRejected> {
        if let Err(rejected) = self.graph.check_connection(source, target) {
            debug!(%source, %target, %rejected, "connection rejected");
            return Err(rejected);
        }

        self.history.checkpoint(&self.graph);
        let id = ConnectionId(self.allocate_id());
        self.graph
            .add_connection(Connection::new(id, source, target))?;
        debug!(%id, %source, %target, "connection created");
        self.settle();
        Ok(id)
    }

    pub fn delete_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        self.graph.connection(id)?;
        self.history.checkpoint(&self.graph);
        let removed = self.graph.remove_connection(id);
        debug!(%id, "connection deleted");
        self.settle();
        removed
    }

    pub fn move_node(&mut self, id: NodeId, pos: Pos2) -> bool {
        if !self.graph.set_node_pos(id, pos) {
            return false;
        }
        self.settle();
        true
    }

    pub fn set_weight(&mut self, id: ConnectionId, weight: f32) -> Option<f32> {
        let stored = self.graph.set_weight(id, weight)?;
        self.settle();
        Some(stored)
    }

    pub fn begin_gesture(&mut self) {
        self.history.begin_gesture(&self.graph);
    }

    pub fn finish_gesture(&mut self) -> bool {
        self.history.finish_gesture(&self.graph)
    }

    pub fn clear(&mut self) {
        self.history.cancel_gesture();
        self.history.checkpoint(&self.graph);
        self.graph.clear();
        info!("graph cleared");
    }

    pub fn undo(&mut self) -> bool {
        self.history.cancel_gesture();
        match self.history.undo(&self.graph) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.history.cancel_gesture();
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Replaces the graph with one loaded from a file. The previous graph
    /// stays reachable through undo. Structural issues are reported, not
    /// repaired.
    pub fn load(&mut self, graph: Graph) -> Vec<GraphIssue> {
        let issues = graph.validate();
        self.history.checkpoint(&self.graph);
        info!(
            nodes = graph.node_count(),
            connections = graph.connection_count(),
            issues = issues.len(),
            "graph loaded"
        );
        self.install(graph);
        issues
    }

    pub fn load_scenario(&mut self, graph: Graph) {
        self.history.clear();
        self.install(graph);
    }
}
