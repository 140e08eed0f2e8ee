pub mod animator;
pub mod application;
pub mod camera;
pub mod cube;
pub mod keyboard;
pub mod messages;
pub mod scene;
pub mod wgpu_context;

/// Runtime knobs that come in from the command line.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Duration of one quarter turn, in seconds.
    pub turn_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { turn_seconds: 0.4 }
    }
}
