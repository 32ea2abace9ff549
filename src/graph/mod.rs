mod config;
mod document;
mod file;
mod geometry;
mod history;
mod interaction;
mod model;
mod relax;
mod scenario;

pub use config::EditorConfig;
pub use document::Document;
pub use file::{GraphFileError, deserialize, serialize};
pub use geometry::{
    EdgeSegment, HandleHit, Hit, angle_between, connection_at, connection_segment, edge_points,
    handle_at, handle_center, has_handle, hit_test, node_at, point_to_segment_distance, wrap_angle,
};
pub use history::History;
pub use interaction::{
    InteractionState, Mode, PointerEvent, WeightDial, pointer_down, pointer_move, pointer_up,
};
pub use model::{
    Connection, ConnectionId, ConnectionRejected, Graph, GraphIssue, Node, NodeId, NodeKind,
};
pub use relax::{is_relaxed, relax_floats, settle, weighted_centroid};
pub use scenario::{Scenario, ScenarioConfig, ScenarioWarning, generate_scenario};
