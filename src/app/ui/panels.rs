use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use balanca::util::format_distance;

use super::super::EditorApp;

impl EditorApp {
    pub(in crate::app) fn draw_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("balança");
            ui.separator();

            if ui
                .add_enabled(self.document.can_undo(), egui::Button::new("Undo"))
                .on_hover_text("Ctrl+Z")
                .clicked()
            {
                self.undo();
            }
            if ui
                .add_enabled(self.document.can_redo(), egui::Button::new("Redo"))
                .on_hover_text("Ctrl+Y / Ctrl+Shift+Z")
                .clicked()
            {
                self.redo();
            }
            ui.separator();

            if ui
                .button("Save")
                .on_hover_text(self.save_path.display().to_string())
                .clicked()
            {
                self.save();
            }
            if ui
                .button("Load")
                .on_hover_text(self.save_path.display().to_string())
                .clicked()
            {
                let path = self.save_path.clone();
                self.load_from(&path);
            }
            if ui.button("Clear").clicked() {
                self.clear();
            }
            ui.separator();

            if ui.button("New puzzle").clicked() {
                self.new_scenario();
            }
            if self.scenario.is_some() && ui.button("Sandbox").clicked() {
                self.scenario = None;
            }

            if let Some(progress) = self.scenario_progress_text() {
                ui.separator();
                ui.label(progress);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(format!(
                    "nodes: {}  connections: {}",
                    self.document.graph().node_count(),
                    self.document.graph().connection_count()
                ));
                if let Some(status) = &self.status {
                    let color = if status.is_error {
                        Color32::from_rgb(236, 110, 100)
                    } else {
                        Color32::from_rgb(150, 210, 160)
                    };
                    ui.label(RichText::new(&status.text).color(color));
                }
            });
        });
    }

    fn scenario_progress_text(&self) -> Option<RichText> {
        let scenario = self.scenario.as_ref()?;
        let graph = self.document.graph();
        if scenario.is_solved(graph) {
            return Some(RichText::new("Solved!").color(Color32::from_rgb(120, 220, 150)));
        }
        let error = scenario.mean_error(graph)?;
        Some(RichText::new(format!("off by {}", format_distance(error))))
    }
}
