#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    pub node_radius: f32,
    pub handle_radius: f32,
    pub edge_hit_threshold: f32,
    pub live_sweeps: usize,
    pub target_sweeps: usize,
}

impl EditorConfig {
    pub const LIVE_SWEEPS: usize = 20;
    pub const TARGET_SWEEPS: usize = 50;
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            handle_radius: 10.0,
            edge_hit_threshold: 10.0,
            live_sweeps: Self::LIVE_SWEEPS,
            target_sweeps: Self::TARGET_SWEEPS,
        }
    }
}
