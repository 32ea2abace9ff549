mod app;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph file to open at startup.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// File used by the Save and Load buttons.
    #[arg(long, default_value = "graph.json")]
    save_path: PathBuf,

    /// Start with a generated puzzle instead of an empty canvas.
    #[arg(long)]
    scenario: bool,

    /// Seed for puzzle generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 840.0]),
        ..Default::default()
    };

    let settings = app::Settings {
        startup_graph: args.graph,
        save_path: args.save_path,
        start_with_scenario: args.scenario,
        seed: args.seed,
    };

    eframe::run_native(
        "balança",
        options,
        Box::new(move |cc| Ok(Box::new(app::EditorApp::new(cc, settings)))),
    )
}
