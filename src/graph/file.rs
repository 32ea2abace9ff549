use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::model::{Connection, Graph, Node};

#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("graph file is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("graph file must contain a JSON object")]
    NotAnObject,
    #[error("graph file has no `{0}` list")]
    MissingKey(&'static str),
    #[error("graph file has a malformed `{key}` list")]
    Schema {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode graph")]
    Encode(#[source] serde_json::Error),
}

pub fn serialize(graph: &Graph) -> Result<Vec<u8>, GraphFileError> {
    serde_json::to_vec_pretty(graph).map_err(GraphFileError::Encode)
}

/// Checks that both top-level lists exist before anything is replaced.
/// Structural checks beyond the schema are left to [`Graph::validate`].
pub fn deserialize(bytes: &[u8]) -> Result<Graph, GraphFileError> {
    let parsed: Value = serde_json::from_slice(bytes).map_err(GraphFileError::InvalidJson)?;
    let object = parsed.as_object().ok_or(GraphFileError::NotAnObject)?;

    let nodes_value = object
        .get("nodes")
        .filter(|value| !value.is_null())
        .ok_or(GraphFileError::MissingKey("nodes"))?;
    let connections_value = object
        .get("connections")
        .filter(|value| !value.is_null())
        .ok_or(GraphFileError::MissingKey("connections"))?;

    let nodes = Vec::<Node>::deserialize(nodes_value).map_err(|source| GraphFileError::Schema {
        key: "nodes",
        source,
    })?;
    let connections =
        Vec::<Connection>::deserialize(connections_value).map_err(|source| GraphFileError::Schema {
            key: "connections",
            source,
        })?;

    Ok(Graph::from_parts(nodes, connections))
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;
    use crate::graph::model::{ConnectionId, NodeId, NodeKind};

    #[test]
    fn empty_document_loads() {
        let graph = deserialize(br#"{"nodes":[],"connections":[]}"#).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn missing_keys_are_reported() {
        assert!(matches!(
            deserialize(br#"{"nodes":[]}"#),
            Err(GraphFileError::MissingKey("connections"))
        ));
        assert!(matches!(
            deserialize(br#"{"connections":[], "nodes": null}"#),
            Err(GraphFileError::MissingKey("nodes"))
        ));
        assert!(matches!(deserialize(b"[1, 2]"), Err(GraphFileError::NotAnObject)));
        assert!(matches!(deserialize(b"{nodes"), Err(GraphFileError::InvalidJson(_))));
    }

    #[test]
    fn reads_the_editor_wire_format() {
        let raw = br#"{
            "nodes": [
                {"id": 1712000000001, "x": 10.5, "y": 20, "type": "fixed"},
                {"id": 1712000000002, "x": 30, "y": 40, "type": "float"}
            ],
            "connections": [
                {"id": 1712000000003, "sourceId": 1712000000001, "targetId": 1712000000002, "weight": 2.5}
            ]
        }"#;
        let graph = deserialize(raw).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.nodes()[0].pos(), pos2(10.5, 20.0));
        assert_eq!(graph.nodes()[1].kind, NodeKind::Float);
        let connection = graph.connection(ConnectionId(1_712_000_000_003)).unwrap();
        assert_eq!(connection.source_id, NodeId(1_712_000_000_001));
        assert_eq!(connection.weight, 2.5);
    }

    #[test]
    fn writes_type_and_camel_case_keys() {
        let mut graph = Graph::new();
        graph.add_node(Node::new(NodeId(1), NodeKind::Fixed, pos2(0.0, 0.0)));
        graph.add_node(Node::new(NodeId(2), NodeKind::Float, pos2(5.0, 5.0)));
        graph
            .add_connection(Connection::new(ConnectionId(3), NodeId(1), NodeId(2)))
            .unwrap();

        let bytes = serialize(&graph).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["nodes"][1]["type"], "float");
        assert_eq!(value["connections"][0]["sourceId"], 1);
        assert_eq!(value["connections"][0]["targetId"], 2);
        assert_eq!(deserialize(&bytes).unwrap(), graph);
    }

    #[test]
    fn double_precision_input_narrows_once_then_round_trips() {
        let raw = br#"{
            "nodes": [{"id": 1, "x": 10.123456789012, "y": 0.1, "type": "fixed"}],
            "connections": []
        }"#;
        let graph = deserialize(raw).unwrap();
        assert_eq!(graph.nodes()[0].x, 10.123_456_789_012_f64 as f32);
        assert_ne!(f64::from(graph.nodes()[0].x), 10.123_456_789_012);

        let first = serialize(&graph).unwrap();
        let second = serialize(&deserialize(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_node_kind_is_a_schema_error() {
        let raw = br#"{"nodes":[{"id":1,"x":0,"y":0,"type":"pinned"}],"connections":[]}"#;
        assert!(matches!(
            deserialize(raw),
            Err(GraphFileError::Schema { key: "nodes", .. })
        ));
    }
}
