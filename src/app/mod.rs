use std::path::PathBuf;

use eframe::egui::{self, Context, Pos2, Vec2};
use rand::rngs::StdRng;
use tracing::warn;

use balanca::graph::{
    Document, EditorConfig, InteractionState, Scenario, ScenarioConfig, generate_scenario,
};
use balanca::util::scenario_rng;

mod files;
mod graph;
mod render_utils;
mod ui;

pub struct Settings {
    pub startup_graph: Option<PathBuf>,
    pub save_path: PathBuf,
    pub start_with_scenario: bool,
    pub seed: Option<u64>,
}

pub struct EditorApp {
    document: Document,
    interaction: InteractionState,
    save_path: PathBuf,
    scenario: Option<Scenario>,
    scenario_config: ScenarioConfig,
    scenario_requested: bool,
    rng: StdRng,
    context_menu: Option<Pos2>,
    canvas_origin: Pos2,
    canvas_size: Vec2,
    status: Option<Status>,
}

struct Status {
    text: String,
    is_error: bool,
}

impl EditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut app = Self {
            document: Document::new(EditorConfig::default()),
            interaction: InteractionState::default(),
            save_path: settings.save_path,
            scenario: None,
            scenario_config: ScenarioConfig::default(),
            scenario_requested: settings.start_with_scenario,
            rng: scenario_rng(settings.seed),
            context_menu: None,
            canvas_origin: Pos2::ZERO,
            canvas_size: Vec2::ZERO,
            status: None,
        };

        if let Some(path) = settings.startup_graph {
            app.load_from(&path);
        }

        app
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        let text = text.into();
        if is_error {
            warn!(%text, "editor error");
        }
        self.status = Some(Status { text, is_error });
    }

    fn reset_interaction(&mut self) {
        self.interaction = InteractionState {
            pointer: self.interaction.pointer,
            ..InteractionState::default()
        };
        self.context_menu = None;
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        use egui::{Key, KeyboardShortcut, Modifiers};

        let redo_shift = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

        let (wants_redo, wants_undo) = ctx.input_mut(|input| {
            let redo_pressed =
                input.consume_shortcut(&redo_shift) || input.consume_shortcut(&redo);
            let undo_pressed = input.consume_shortcut(&undo);
            (redo_pressed, undo_pressed)
        });

        if wants_redo {
            self.redo();
        } else if wants_undo {
            self.undo();
        }
    }

    fn new_scenario(&mut self) {
        let scenario = generate_scenario(self.canvas_size, &self.scenario_config, &mut self.rng);
        self.document.load_scenario(scenario.start.clone());
        self.reset_interaction();

        match scenario.warnings.first() {
            Some(warning) => self.set_status(warning.to_string(), true),
            None => self.set_status("drag the anchors and turn the weights to match the outlines", false),
        }
        self.scenario = Some(scenario);
    }

    fn clear(&mut self) {
        self.document.clear();
        self.scenario = None;
        self.reset_interaction();
        self.status = None;
    }

    fn undo(&mut self) {
        if self.document.undo() {
            self.reset_interaction();
        }
    }

    fn redo(&mut self) {
        if self.document.redo() {
            self.reset_interaction();
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| self.draw_toolbar(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_canvas(ui));

        self.draw_context_menu(ctx);

        if self.scenario_requested && self.canvas_size.x > 0.0 {
            self.scenario_requested = false;
            self.new_scenario();
        }

        if self.document.settle() {
            ctx.request_repaint();
        }
    }
}
