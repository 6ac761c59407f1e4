//! Window size tracking for the confetti layer. Never touches interaction state.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewportObserver {
    current: Viewport,
}

impl ViewportObserver {
    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Records the latest window size; true when it differs from the last one.
    pub fn observe(&mut self, size: egui::Vec2) -> bool {
        let next = Viewport::new(size.x, size.y);
        if (next.width - self.current.width).abs() < 0.5
            && (next.height - self.current.height).abs() < 0.5
        {
            return false;
        }

        tracing::trace!(width = next.width, height = next.height, "viewport resized");
        self.current = next;
        true
    }
}
