//! View-only state for the image preview.

use crate::constants::{ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Preview zoom. Reset whenever the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { zoom: ZOOM_DEFAULT }
    }
}

impl ViewState {
    /// Current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom in one step, up to the maximum.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    /// Zoom out one step, down to the minimum.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN);
    }

    /// Back to the default zoom.
    pub fn reset(&mut self) {
        self.zoom = ZOOM_DEFAULT;
    }

    /// Zoom as a whole percentage, for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_limits() {
        let mut view = ViewState::default();
        for _ in 0..20 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), ZOOM_MAX);
        for _ in 0..20 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), ZOOM_MIN);
        view.reset();
        assert_eq!(view.zoom(), ZOOM_DEFAULT);
    }

    #[test]
    fn test_zoom_percent() {
        let mut view = ViewState::default();
        view.zoom_in();
        assert_eq!(view.zoom_percent(), 125);
    }
}
