use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{info, warn};

use balanca::graph::{Graph, deserialize, serialize};

use super::EditorApp;

pub(super) fn write_graph(path: &Path, graph: &Graph) -> Result<()> {
    let bytes = serialize(graph)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

pub(super) fn read_graph(path: &Path) -> Result<Graph> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    deserialize(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

impl EditorApp {
    pub(in crate::app) fn save(&mut self) {
        match write_graph(&self.save_path, self.document.graph()) {
            Ok(()) => {
                info!(
                    path = %self.save_path.display(),
                    nodes = self.document.graph().node_count(),
                    "graph saved"
                );
                self.set_status(format!("saved to {}", self.save_path.display()), false);
            }
            Err(error) => self.set_status(format!("{error:#}"), true),
        }
    }

    /// A failed read leaves the current graph untouched.
    pub(in crate::app) fn load_from(&mut self, path: &Path) {
        let graph = match read_graph(path) {
            Ok(graph) => graph,
            Err(error) => {
                self.set_status(format!("{error:#}"), true);
                return;
            }
        };

        let issues = self.document.load(graph);
        for issue in &issues {
            warn!(%issue, path = %path.display(), "loaded graph has a structural issue");
        }
        self.scenario = None;
        self.reset_interaction();

        if issues.is_empty() {
            self.set_status(format!("loaded {}", path.display()), false);
        } else {
            self.set_status(
                format!("loaded {} with {} issue(s)", path.display(), issues.len()),
                true,
            );
        }
    }
}
