use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Sense, Shape, Stroke, Ui, vec2};

use balanca::graph::{Mode, NodeKind, connection_segment, handle_center};
use balanca::util::format_weight;

use super::super::EditorApp;
use super::super::render_utils::{
    DIAL_COLOR, EDGE_COLOR, EDGE_HOVER_COLOR, HANDLE_COLOR, LABEL_COLOR, LINK_COLOR,
    canvas_to_screen, dial_indicator, draw_background, edge_width, ghost_color, node_color,
};

const DIAL_RADIUS: f32 = 50.0;

impl EditorApp {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.canvas_origin = rect.min;
        self.canvas_size = rect.size();

        self.handle_canvas_input(ui, rect, &response);

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        if self.document.graph().is_empty() && self.scenario.is_none() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Right-click to add a node",
                FontId::proportional(16.0),
                ghost_color(LABEL_COLOR, 0.4),
            );
        }

        self.draw_target_overlay(&painter, rect);
        self.draw_connections(&painter, rect);
        self.draw_link_preview(&painter, rect);
        self.draw_nodes(&painter, rect);
        self.draw_weight_dial(&painter, rect);
        self.draw_delete_marker(&painter, rect);
    }

    fn draw_target_overlay(&self, painter: &Painter, rect: Rect) {
        let Some(scenario) = &self.scenario else {
            return;
        };
        let radius = self.document.config().node_radius;
        let target = &scenario.target;

        for connection in target.connections() {
            let (Some(source), Some(end)) = (
                target.node(connection.source_id),
                target.node(connection.target_id),
            ) else {
                continue;
            };
            painter.line_segment(
                [
                    canvas_to_screen(rect, source.pos()),
                    canvas_to_screen(rect, end.pos()),
                ],
                Stroke::new(1.5, ghost_color(LABEL_COLOR, 0.12)),
            );
        }

        for node in target.nodes().iter().filter(|node| node.kind == NodeKind::Float) {
            painter.circle_stroke(
                canvas_to_screen(rect, node.pos()),
                radius,
                Stroke::new(2.0, ghost_color(node_color(node.kind), 0.35)),
            );
        }
    }

    fn draw_connections(&self, painter: &Painter, rect: Rect) {
        let graph = self.document.graph();
        let config = self.document.config();

        for connection in graph.connections() {
            let Some(segment) = connection_segment(graph, connection, config) else {
                continue;
            };
            let color = if self.interaction.hovered == Some(connection.id) {
                EDGE_HOVER_COLOR
            } else {
                EDGE_COLOR
            };
            painter.line_segment(
                [
                    canvas_to_screen(rect, segment.start),
                    canvas_to_screen(rect, segment.end),
                ],
                Stroke::new(edge_width(connection.weight), color),
            );

            if let Some(center) = handle_center(graph, connection, config) {
                let center = canvas_to_screen(rect, center);
                painter.circle_filled(center, config.handle_radius, HANDLE_COLOR);
                painter.text(
                    center + vec2(0.0, -config.handle_radius - 8.0),
                    Align2::CENTER_CENTER,
                    format_weight(connection.weight),
                    FontId::monospace(11.0),
                    ghost_color(LABEL_COLOR, 0.75),
                );
            }
        }
    }

    fn draw_link_preview(&self, painter: &Painter, rect: Rect) {
        let Some((from, to)) = self.interaction.link_preview(&self.document) else {
            return;
        };
        painter.extend(Shape::dashed_line(
            &[canvas_to_screen(rect, from), canvas_to_screen(rect, to)],
            Stroke::new(2.0, LINK_COLOR),
            8.0,
            6.0,
        ));
    }

    fn draw_nodes(&self, painter: &Painter, rect: Rect) {
        let graph = self.document.graph();
        let radius = self.document.config().node_radius;
        let dragged = self.interaction.dragged();
        let link_source = match self.interaction.mode {
            Mode::Linking(source) => Some(source),
            _ => None,
        };

        for node in graph.nodes() {
            let center = canvas_to_screen(rect, node.pos());
            painter.circle_filled(center, radius, node_color(node.kind));

            let outline = if Some(node.id) == dragged || Some(node.id) == link_source {
                Stroke::new(3.0, LINK_COLOR)
            } else if graph.is_draggable(node.id) {
                Stroke::new(1.5, Color32::WHITE)
            } else {
                Stroke::new(1.0, ghost_color(Color32::BLACK, 0.6))
            };
            painter.circle_stroke(center, radius, outline);
        }
    }

    fn draw_weight_dial(&self, painter: &Painter, rect: Rect) {
        let Some(dial) = self.interaction.dial() else {
            return;
        };
        let center = canvas_to_screen(rect, dial.click);
        painter.circle_filled(center, DIAL_RADIUS, ghost_color(DIAL_COLOR, 0.12));
        painter.circle_stroke(center, DIAL_RADIUS, Stroke::new(2.0, DIAL_COLOR));

        let tip = dial_indicator(center, dial.last_angle, DIAL_RADIUS);
        painter.line_segment([center, tip], Stroke::new(2.0, DIAL_COLOR));
        painter.text(
            center + vec2(0.0, DIAL_RADIUS + 14.0),
            Align2::CENTER_CENTER,
            format!("weight {}", format_weight(dial.weight)),
            FontId::proportional(14.0),
            LABEL_COLOR,
        );
    }

    fn draw_delete_marker(&self, painter: &Painter, rect: Rect) {
        if self.interaction.hovered.is_none() {
            return;
        }
        let center = canvas_to_screen(rect, self.interaction.pointer);
        let arm = 6.0;
        let stroke = Stroke::new(2.5, EDGE_HOVER_COLOR);
        painter.line_segment([center + vec2(-arm, -arm), center + vec2(arm, arm)], stroke);
        painter.line_segment([center + vec2(-arm, arm), center + vec2(arm, -arm)], stroke);
    }
}
