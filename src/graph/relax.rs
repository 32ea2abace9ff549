use std::collections::HashMap;

use eframe::egui::{Pos2, Vec2};

use super::model::{Graph, NodeId, NodeKind};

struct Spring {
    neighbor: usize,
    weight: f32,
}

struct RelaxedNode {
    index: usize,
    springs: Vec<Spring>,
}

pub fn is_relaxed(graph: &Graph, id: NodeId) -> bool {
    graph
        .node(id)
        .is_some_and(|node| node.kind == NodeKind::Float && graph.degree(id) > 1)
}

pub fn weighted_centroid(graph: &Graph, id: NodeId) -> Option<Pos2> {
    let mut sum = Vec2::ZERO;
    let mut total_weight = 0.0_f32;
    for connection in graph.incident(id) {
        let Some(other) = connection.other_end(id).and_then(|other| graph.node(other)) else {
            continue;
        };
        sum += other.pos().to_vec2() * connection.weight;
        total_weight += connection.weight;
    }

    (total_weight > 0.0).then(|| (sum / total_weight).to_pos2())
}

fn relaxed_nodes(graph: &Graph) -> Vec<RelaxedNode> {
    let mut index_by_id = HashMap::with_capacity(graph.node_count());
    for (index, node) in graph.nodes().iter().enumerate() {
        index_by_id.entry(node.id).or_insert(index);
    }

    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| is_relaxed(graph, node.id))
        .map(|(index, node)| RelaxedNode {
            index,
            springs: graph
                .incident(node.id)
                .filter_map(|connection| {
                    let other = connection.other_end(node.id)?;
                    Some(Spring {
                        neighbor: *index_by_id.get(&other)?,
                        weight: connection.weight,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Runs `sweeps` simultaneous (Jacobi) sweeps in place. Every sweep reads
/// the positions left by the previous one. Returns whether any node ended
/// up somewhere else.
pub fn relax_floats(graph: &mut Graph, sweeps: usize) -> bool {
    let relaxed = relaxed_nodes(graph);
    if relaxed.is_empty() || sweeps == 0 {
        return false;
    }

    let start = graph.nodes().iter().map(|node| node.pos()).collect::<Vec<_>>();
    let mut current = start.clone();
    let mut next = start.clone();

    for _ in 0..sweeps {
        next.copy_from_slice(&current);
        for node in &relaxed {
            let mut sum = Vec2::ZERO;
            let mut total_weight = 0.0_f32;
            for spring in &node.springs {
                sum += current[spring.neighbor].to_vec2() * spring.weight;
                total_weight += spring.weight;
            }
            if total_weight > 0.0 {
                next[node.index] = (sum / total_weight).to_pos2();
            }
        }
        std::mem::swap(&mut current, &mut next);
    }

    let mut moved = false;
    for (node, (before, after)) in graph
        .nodes_mut()
        .iter_mut()
        .zip(start.iter().zip(current.iter()))
    {
        if before != after {
            node.set_pos(*after);
            moved = true;
        }
    }
    moved
}

pub fn settle(graph: &Graph, sweeps: usize) -> Graph {
    let mut settled = graph.clone();
    relax_floats(&mut settled, sweeps);
    settled
}
