use std::f32::consts::PI;

use eframe::egui::Pos2;

use super::document::Document;
use super::geometry::{angle_between, connection_at, handle_at, node_at, wrap_angle};
use super::model::{ConnectionId, NodeId};

/// Angular weight edit in progress. `center` is the handle the gesture
/// started on, `click` the point that was pressed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightDial {
    pub connection: ConnectionId,
    pub center: Pos2,
    pub click: Pos2,
    pub last_angle: f32,
    pub weight: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,
    Dragging(NodeId),
    Linking(NodeId),
    EditingWeight(WeightDial),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub mode: Mode,
    pub hovered: Option<ConnectionId>,
    pub pointer: Pos2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
    pub link_modifier: bool,
}

impl PointerEvent {
    pub fn at(pos: Pos2) -> Self {
        Self {
            pos,
            link_modifier: false,
        }
    }

    pub fn linking(pos: Pos2) -> Self {
        Self {
            pos,
            link_modifier: true,
        }
    }
}

impl InteractionState {
    fn with_mode(self, mode: Mode, pointer: Pos2) -> Self {
        Self {
            mode,
            pointer,
            ..self
        }
    }

    pub fn link_preview(&self, document: &Document) -> Option<(Pos2, Pos2)> {
        match self.mode {
            Mode::Linking(source) => document
                .graph()
                .node(source)
                .map(|node| (node.pos(), self.pointer)),
            _ => None,
        }
    }

    pub fn dial(&self) -> Option<&WeightDial> {
        match &self.mode {
            Mode::EditingWeight(dial) => Some(dial),
            _ => None,
        }
    }

    pub fn dragged(&self) -> Option<NodeId> {
        match self.mode {
            Mode::Dragging(node) => Some(node),
            _ => None,
        }
    }
}

pub fn pointer_down(
    document: &mut Document,
    state: InteractionState,
    event: PointerEvent,
) -> InteractionState {
    let config = *document.config();

    if let Some(handle) = handle_at(document.graph(), event.pos, &config) {
        let Some(weight) = document
            .graph()
            .connection(handle.connection)
            .map(|connection| connection.weight)
        else {
            return state.with_mode(Mode::Idle, event.pos);
        };
        document.begin_gesture();
        let dial = WeightDial {
            connection: handle.connection,
            center: handle.center,
            click: event.pos,
            last_angle: angle_between(handle.center, event.pos),
            weight,
        };
        return state.with_mode(Mode::EditingWeight(dial), event.pos);
    }

    if let Some(hovered) = state.hovered {
        document.delete_connection(hovered);
        return InteractionState {
            mode: Mode::Idle,
            hovered: None,
            pointer: event.pos,
        };
    }

    let Some(node) = node_at(document.graph(), event.pos, &config) else {
        return state.with_mode(Mode::Idle, event.pos);
    };

    if event.link_modifier {
        return state.with_mode(Mode::Linking(node), event.pos);
    }

    if let Mode::Linking(source) = state.mode {
        if source != node {
            // Duplicates and self links are a silent no-op.
            let _ = document.connect(source, node);
        }
        return state.with_mode(Mode::Idle, event.pos);
    }

    if document.graph().is_draggable(node) {
        document.begin_gesture();
        return state.with_mode(Mode::Dragging(node), event.pos);
    }

    state.with_mode(Mode::Idle, event.pos)
}

pub fn pointer_move(
    document: &mut Document,
    state: InteractionState,
    event: PointerEvent,
) -> InteractionState {
    match state.mode {
        Mode::EditingWeight(mut dial) => {
            let angle = angle_between(dial.center, event.pos);
            let delta = wrap_angle(angle - dial.last_angle);
            let Some(current) = document
                .graph()
                .connection(dial.connection)
                .map(|connection| connection.weight)
            else {
                return state.with_mode(Mode::Idle, event.pos);
            };

            if let Some(stored) = document.set_weight(dial.connection, current + delta / PI) {
                dial.weight = stored;
            }
            dial.last_angle = angle;
            state.with_mode(Mode::EditingWeight(dial), event.pos)
        }
        Mode::Dragging(node) => {
            document.move_node(node, event.pos);
            InteractionState {
                mode: state.mode,
                hovered: None,
                pointer: event.pos,
            }
        }
        Mode::Linking(_) => InteractionState {
            pointer: event.pos,
            ..state
        },
        Mode::Idle => InteractionState {
            mode: Mode::Idle,
            hovered: connection_at(document.graph(), event.pos, document.config()),
            pointer: event.pos,
        },
    }
}

pub fn pointer_up(document: &mut Document, state: InteractionState) -> InteractionState {
    match state.mode {
        Mode::Dragging(_) | Mode::EditingWeight(_) => {
            document.finish_gesture();
            InteractionState {
                mode: Mode::Idle,
                ..state
            }
        }
        Mode::Idle | Mode::Linking(_) => state,
    }
}
