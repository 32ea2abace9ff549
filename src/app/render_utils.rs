use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use balanca::graph::NodeKind;

pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(128, 136, 148);
pub(super) const EDGE_HOVER_COLOR: Color32 = Color32::from_rgb(226, 78, 72);
pub(super) const HANDLE_COLOR: Color32 = Color32::from_rgb(150, 206, 250);
pub(super) const DIAL_COLOR: Color32 = Color32::from_rgb(250, 210, 90);
pub(super) const LINK_COLOR: Color32 = Color32::from_rgb(120, 220, 150);
pub(super) const LABEL_COLOR: Color32 = Color32::from_rgb(235, 238, 242);

pub(super) fn node_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Fixed => Color32::from_rgb(66, 133, 244),
        NodeKind::Float => Color32::from_rgb(255, 152, 56),
    }
}

pub(super) fn ghost_color(color: Color32, alpha: f32) -> Color32 {
    let alpha = alpha.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (255.0 * alpha) as u8)
}

/// Edge stroke width grows with weight so heavier springs read as thicker.
pub(super) fn edge_width(weight: f32) -> f32 {
    (2.0 + weight.max(0.0) * 2.0).clamp(2.0, 10.0)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 40.0;
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left();
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        x += step;
    }

    let mut y = rect.top();
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        y += step;
    }
}

/// Graph coordinates are canvas-local; the canvas origin is its top-left.
pub(super) fn canvas_to_screen(rect: Rect, canvas: Pos2) -> Pos2 {
    rect.min + canvas.to_vec2()
}

pub(super) fn screen_to_canvas(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

pub(super) fn dial_indicator(center: Pos2, angle: f32, length: f32) -> Pos2 {
    center + Vec2::angled(angle) * length
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn canvas_and_screen_coordinates_invert() {
        let rect = Rect::from_min_size(pos2(12.0, 48.0), vec2(800.0, 600.0));
        let canvas = pos2(100.0, 40.0);
        let screen = canvas_to_screen(rect, canvas);
        assert_eq!(screen, pos2(112.0, 88.0));
        assert_eq!(screen_to_canvas(rect, screen), canvas);
    }

    #[test]
    fn edge_width_is_bounded() {
        assert_eq!(edge_width(0.0), 2.0);
        assert_eq!(edge_width(1.0), 4.0);
        assert_eq!(edge_width(100.0), 10.0);
    }
}
