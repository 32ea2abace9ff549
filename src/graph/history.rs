use tracing::debug;

use super::model::Graph;

/// Linear undo/redo over whole-graph snapshots.
///
/// `entries[..cursor]` hold states that can be returned to. While the
/// cursor sits past the last entry the live graph is newer than anything
/// stored; the first undo from there stores the live graph so that redo
/// can come back to it.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Graph>,
    cursor: usize,
    gesture_start: Option<Graph>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checkpoint(&mut self, current: &Graph) {
        self.entries.truncate(self.cursor);
        self.entries.push(current.clone());
        self.cursor = self.entries.len();
        debug!(entries = self.entries.len(), "history checkpoint");
    }

    pub fn undo(&mut self, current: &Graph) -> Option<Graph> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push(current.clone());
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, entries = self.entries.len(), "undo");
        self.entries.get(self.cursor).cloned()
    }

    pub fn redo(&mut self) -> Option<Graph> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, entries = self.entries.len(), "redo");
        self.entries.get(self.cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.gesture_start = None;
    }

    pub fn begin_gesture(&mut self, current: &Graph) {
        self.gesture_start = Some(current.clone());
    }

    pub fn cancel_gesture(&mut self) {
        self.gesture_start = None;
    }

    /// Commits the state saved by [`History::begin_gesture`] if the gesture
    /// changed anything. Returns whether a checkpoint was taken.
    pub fn finish_gesture(&mut self, current: &Graph) -> bool {
        let Some(start) = self.gesture_start.take() else {
            return false;
        };
        if &start == current {
            return false;
        }
        self.entries.truncate(self.cursor);
        self.entries.push(start);
        self.cursor = self.entries.len();
        debug!(entries = self.entries.len(), "gesture checkpoint");
        true
    }
}
