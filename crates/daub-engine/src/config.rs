/// Scene configuration.
///
/// Consumed by [`Scene::with_config`](crate::scene::Scene::with_config) and
/// [`TimerRefresh::from_config`](crate::time::TimerRefresh::from_config).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Drawing surface width in logical pixels.
    pub width: f32,
    /// Drawing surface height in logical pixels.
    pub height: f32,
    /// Iterations per second of the timer refresh fallback.
    pub target_fps: u32,
    /// Whether the listener dispatches input from the start.
    pub capture_events: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            target_fps: 60,
            capture_events: true,
        }
    }
}
