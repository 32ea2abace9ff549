use eframe::egui::{self, Context, Event, Key, Order, PointerButton, Rect, Response, Ui};
use tracing::debug;

use balanca::graph::{NodeKind, PointerEvent, pointer_down, pointer_move, pointer_up};

use super::super::EditorApp;
use super::super::render_utils::{canvas_to_screen, screen_to_canvas};

impl EditorApp {
    /// Replays this frame's raw pointer events through the editor state
    /// machine, in order, so a press and release in one frame both land.
    pub(in crate::app) fn handle_canvas_input(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        let over_canvas = response.contains_pointer();
        let events = ui.input(|input| input.events.clone());

        for event in events {
            match event {
                Event::PointerMoved(pos) => {
                    let event = PointerEvent::at(screen_to_canvas(rect, pos));
                    self.interaction = pointer_move(&mut self.document, self.interaction, event);
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers,
                } if over_canvas && rect.contains(pos) => {
                    self.context_menu = None;
                    let event = PointerEvent {
                        pos: screen_to_canvas(rect, pos),
                        link_modifier: modifiers.command,
                    };
                    self.interaction = pointer_down(&mut self.document, self.interaction, event);
                }
                Event::PointerButton {
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    self.interaction = pointer_up(&mut self.document, self.interaction);
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Secondary,
                    pressed: true,
                    ..
                } if over_canvas && rect.contains(pos) => {
                    self.context_menu = Some(screen_to_canvas(rect, pos));
                }
                _ => {}
            }
        }
    }

    pub(in crate::app) fn draw_context_menu(&mut self, ctx: &Context) {
        let Some(at) = self.context_menu else {
            return;
        };
        let screen = canvas_to_screen(Rect::from_min_size(self.canvas_origin, self.canvas_size), at);

        let mut chosen = None;
        let mut dismissed = ctx.input(|input| input.key_pressed(Key::Escape));
        egui::Area::new(egui::Id::new("add_node_menu"))
            .order(Order::Foreground)
            .fixed_pos(screen)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if ui.button("Create Fixed Node").clicked() {
                        chosen = Some(NodeKind::Fixed);
                    }
                    if ui.button("Create Float Node").clicked() {
                        chosen = Some(NodeKind::Float);
                    }
                    if ui.button("Cancel").clicked() {
                        dismissed = true;
                    }
                });
            });

        if let Some(kind) = chosen {
            let id = self.document.add_node(kind, at);
            debug!(%id, kind = kind.label(), "created node from context menu");
            self.context_menu = None;
        } else if dismissed {
            self.context_menu = None;
        }
    }
}
