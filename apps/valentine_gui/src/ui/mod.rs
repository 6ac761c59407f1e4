//! UI layer: app shell, screens, confetti effect, theme, and viewport tracking.

pub mod app;
pub mod confetti;
pub mod theme;
pub mod viewport;

pub use app::ValentineApp;
