use serde::{Deserialize, Serialize};

/// Window and swapchain setup, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowOptions {
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Open the window fullscreen on the primary monitor.
    pub fullscreen: bool,
    /// Synchronize presentation with the display refresh rate.
    pub vsync: bool,
    /// Multisample anti-aliasing sample count (1 disables MSAA).
    pub msaa: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
            msaa: 4,
        }
    }
}
