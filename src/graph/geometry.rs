use std::f32::consts::{PI, TAU};

use eframe::egui::Pos2;

use super::config::EditorConfig;
use super::model::{Connection, ConnectionId, Graph, Node, NodeId, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    pub start: Pos2,
    pub end: Pos2,
}

impl EdgeSegment {
    pub fn midpoint(&self) -> Pos2 {
        self.start.lerp(self.end, 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleHit {
    pub connection: ConnectionId,
    pub center: Pos2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    Handle(HandleHit),
    Edge(ConnectionId),
    Node(NodeId),
    None,
}

/// Trims the center-to-center segment by `radius` at both ends. Coincident
/// centers come back untouched.
pub fn edge_points(a: Pos2, b: Pos2, radius: f32) -> EdgeSegment {
    let delta = b - a;
    let distance = delta.length();
    if distance == 0.0 {
        return EdgeSegment { start: a, end: b };
    }

    let unit = delta / distance;
    EdgeSegment {
        start: a + unit * radius,
        end: b - unit * radius,
    }
}

pub fn projection_param(point: Pos2, start: Pos2, end: Pos2) -> Option<f32> {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return None;
    }
    Some((point - start).dot(segment) / length_sq)
}

pub fn point_to_segment_distance(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let t = projection_param(point, start, end)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let closest = start + (end - start) * t;
    point.distance(closest)
}

pub fn angle_between(center: Pos2, point: Pos2) -> f32 {
    let delta = point - center;
    delta.y.atan2(delta.x)
}

/// Folds an angular difference into `(-π, π]`.
pub fn wrap_angle(mut delta: f32) -> f32 {
    while delta > PI {
        delta -= TAU;
    }
    while delta <= -PI {
        delta += TAU;
    }
    delta
}

pub fn endpoints<'a>(graph: &'a Graph, connection: &Connection) -> Option<(&'a Node, &'a Node)> {
    Some((
        graph.node(connection.source_id)?,
        graph.node(connection.target_id)?,
    ))
}

pub fn has_handle(source: &Node, target: &Node) -> bool {
    source.kind == NodeKind::Float || target.kind == NodeKind::Float
}

pub fn connection_segment(
    graph: &Graph,
    connection: &Connection,
    config: &EditorConfig,
) -> Option<EdgeSegment> {
    let (source, target) = endpoints(graph, connection)?;
    Some(edge_points(source.pos(), target.pos(), config.node_radius))
}

pub fn handle_center(graph: &Graph, connection: &Connection, config: &EditorConfig) -> Option<Pos2> {
    let (source, target) = endpoints(graph, connection)?;
    if !has_handle(source, target) {
        return None;
    }
    Some(edge_points(source.pos(), target.pos(), config.node_radius).midpoint())
}

pub fn handle_at(graph: &Graph, point: Pos2, config: &EditorConfig) -> Option<HandleHit> {
    graph.connections().iter().find_map(|connection| {
        let center = handle_center(graph, connection, config)?;
        (point.distance(center) <= config.handle_radius).then_some(HandleHit {
            connection: connection.id,
            center,
        })
    })
}

pub fn connection_at(graph: &Graph, point: Pos2, config: &EditorConfig) -> Option<ConnectionId> {
    for connection in graph.connections() {
        let Some((source, target)) = endpoints(graph, connection) else {
            continue;
        };
        let segment = edge_points(source.pos(), target.pos(), config.node_radius);

        if has_handle(source, target) && point.distance(segment.midpoint()) <= config.handle_radius
        {
            continue;
        }

        let Some(t) = projection_param(point, segment.start, segment.end) else {
            continue;
        };
        if !(0.0..=1.0).contains(&t) {
            continue;
        }

        if point_to_segment_distance(point, segment.start, segment.end) <= config.edge_hit_threshold {
            return Some(connection.id);
        }
    }

    None
}

pub fn node_at(graph: &Graph, point: Pos2, config: &EditorConfig) -> Option<NodeId> {
    graph
        .nodes()
        .iter()
        .find(|node| node.pos().distance(point) <= config.node_radius)
        .map(|node| node.id)
}

pub fn hit_test(graph: &Graph, point: Pos2, config: &EditorConfig) -> Hit {
    if let Some(handle) = handle_at(graph, point, config) {
        return Hit::Handle(handle);
    }
    if let Some(connection) = connection_at(graph, point, config) {
        return Hit::Edge(connection);
    }
    if let Some(node) = node_at(graph, point, config) {
        return Hit::Node(node);
    }
    Hit::None
}
