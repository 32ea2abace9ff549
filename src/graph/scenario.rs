use std::ops::RangeInclusive;

use eframe::egui::{Pos2, Rect, Vec2, pos2};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{info, warn};

use super::config::EditorConfig;
use super::model::{Connection, ConnectionId, Graph, Node, NodeId, NodeKind};
use super::relax::relax_floats;

#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    pub fixed_count: RangeInclusive<usize>,
    pub float_count: RangeInclusive<usize>,
    pub float_degree: RangeInclusive<usize>,
    pub extra_connections: RangeInclusive<usize>,
    pub margin: f32,
    pub spacing_factor: f32,
    pub placement_attempts: usize,
    pub weight_range: RangeInclusive<f32>,
    pub target_sweeps: usize,
    pub solved_tolerance: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            fixed_count: 4..=5,
            float_count: 4..=5,
            float_degree: 2..=3,
            extra_connections: 3..=7,
            margin: 80.0,
            spacing_factor: 0.5,
            placement_attempts: 1000,
            weight_range: 0.25..=3.0,
            target_sweeps: EditorConfig::TARGET_SWEEPS,
            solved_tolerance: 8.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScenarioWarning {
    #[error("placed {placed} of {requested} fixed nodes within the spacing budget")]
    FixedShortfall { requested: usize, placed: usize },
}

/// A generated puzzle: `target` is the solved layout, `start` the
/// scrambled state handed to the player.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub start: Graph,
    pub target: Graph,
    pub warnings: Vec<ScenarioWarning>,
    pub solved_tolerance: f32,
}

impl Scenario {
    /// Mean distance between each target float node and the node with the
    /// same id in `graph`. `None` when no float node can be matched.
    pub fn mean_error(&self, graph: &Graph) -> Option<f32> {
        let mut total = 0.0_f32;
        let mut matched = 0usize;
        for target in self
            .target
            .nodes()
            .iter()
            .filter(|node| node.kind == NodeKind::Float)
        {
            let Some(current) = graph.node(target.id) else {
                continue;
            };
            total += current.pos().distance(target.pos());
            matched += 1;
        }
        (matched > 0).then(|| total / matched as f32)
    }

    pub fn is_solved(&self, graph: &Graph) -> bool {
        self.mean_error(graph)
            .is_some_and(|error| error <= self.solved_tolerance)
    }
}

fn placement_rect(viewport: Vec2, margin: f32) -> Rect {
    let margin_x = margin.min(viewport.x * 0.25).max(0.0);
    let margin_y = margin.min(viewport.y * 0.25).max(0.0);
    Rect::from_min_max(
        pos2(margin_x, margin_y),
        pos2(
            (viewport.x - margin_x).max(margin_x + 1.0),
            (viewport.y - margin_y).max(margin_y + 1.0),
        ),
    )
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, rect: Rect) -> Pos2 {
    pos2(
        rng.gen_range(rect.min.x..=rect.max.x),
        rng.gen_range(rect.min.y..=rect.max.y),
    )
}

fn place_fixed<R: Rng + ?Sized>(
    rng: &mut R,
    rect: Rect,
    requested: usize,
    min_distance: f32,
    attempts: usize,
) -> Vec<Pos2> {
    let mut placed: Vec<Pos2> = Vec::with_capacity(requested);
    for _ in 0..attempts {
        if placed.len() >= requested {
            break;
        }
        let candidate = random_point(rng, rect);
        if placed
            .iter()
            .all(|existing| existing.distance(candidate) >= min_distance)
        {
            placed.push(candidate);
        }
    }
    placed
}

fn may_connect(graph: &Graph, a: NodeId, b: NodeId) -> bool {
    if graph.check_connection(a, b).is_err() {
        return false;
    }
    let both_fixed = [a, b]
        .iter()
        .all(|id| graph.node(*id).is_some_and(|node| node.kind == NodeKind::Fixed));
    !both_fixed
}

struct Builder {
    graph: Graph,
    next_id: u64,
}

impl Builder {
    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn add_node(&mut self, kind: NodeKind, pos: Pos2) -> NodeId {
        let id = NodeId(self.allocate());
        self.graph.add_node(Node::new(id, kind, pos));
        id
    }

    fn try_connect<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        a: NodeId,
        b: NodeId,
        weights: &RangeInclusive<f32>,
    ) -> bool {
        if !may_connect(&self.graph, a, b) {
            return false;
        }
        let mut connection = Connection::new(ConnectionId(self.allocate()), a, b);
        connection.weight = rng.gen_range(weights.clone());
        self.graph.add_connection(connection).is_ok()
    }
}

pub fn generate_scenario<R: Rng + ?Sized>(
    viewport: Vec2,
    config: &ScenarioConfig,
    rng: &mut R,
) -> Scenario {
    let rect = placement_rect(viewport, config.margin);
    let fixed_requested = rng.gen_range(config.fixed_count.clone());
    let float_requested = rng.gen_range(config.float_count.clone());
    let total = (fixed_requested + float_requested).max(1);
    let min_distance = (rect.area() / total as f32).sqrt() * config.spacing_factor;

    let mut warnings = Vec::new();
    let fixed_positions = place_fixed(
        rng,
        rect,
        fixed_requested,
        min_distance,
        config.placement_attempts,
    );
    if fixed_positions.len() < fixed_requested {
        let warning = ScenarioWarning::FixedShortfall {
            requested: fixed_requested,
            placed: fixed_positions.len(),
        };
        warn!(%warning, min_distance, "scenario placement fell short");
        warnings.push(warning);
    }

    let mut builder = Builder {
        graph: Graph::new(),
        next_id: 1,
    };
    for pos in fixed_positions {
        builder.add_node(NodeKind::Fixed, pos);
    }
    let floats = (0..float_requested)
        .map(|_| builder.add_node(NodeKind::Float, rect.center()))
        .collect::<Vec<_>>();
    let all_ids = builder
        .graph
        .nodes()
        .iter()
        .map(|node| node.id)
        .collect::<Vec<_>>();

    for &float in &floats {
        let wanted = rng.gen_range(config.float_degree.clone());
        let mut candidates = all_ids
            .iter()
            .copied()
            .filter(|id| *id != float)
            .collect::<Vec<_>>();
        candidates.shuffle(rng);

        let mut added = 0usize;
        for other in candidates {
            if added >= wanted {
                break;
            }
            if builder.try_connect(rng, float, other, &config.weight_range) {
                added += 1;
            }
        }
    }

    let extras_wanted = rng.gen_range(config.extra_connections.clone());
    let mut extras_added = 0usize;
    if all_ids.len() >= 2 {
        for _ in 0..extras_wanted * 20 {
            if extras_added >= extras_wanted {
                break;
            }
            let a = all_ids[rng.gen_range(0..all_ids.len())];
            let b = all_ids[rng.gen_range(0..all_ids.len())];
            if builder.try_connect(rng, a, b, &config.weight_range) {
                extras_added += 1;
            }
        }
    }

    let mut target = builder.graph;
    relax_floats(&mut target, config.target_sweeps);

    let mut start = target.clone();
    for node in start.nodes_mut() {
        if node.kind == NodeKind::Fixed {
            node.set_pos(random_point(rng, rect));
        }
    }
    for connection in start.connections_mut() {
        connection.weight = rng.gen_range(config.weight_range.clone());
    }

    info!(
        fixed = target.nodes().len() - floats.len(),
        floats = floats.len(),
        connections = target.connection_count(),
        extras = extras_added,
        "scenario generated"
    );

    Scenario {
        start,
        target,
        warnings,
        solved_tolerance: config.solved_tolerance,
    }
}
