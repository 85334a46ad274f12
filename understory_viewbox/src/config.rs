// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Wheel pan distance in user units per client pixel of delta.
pub const SCROLL_PAN_COEFFICIENT: f64 = 0.5;

/// Gain applied to wheel zoom deltas relative to the window extent.
pub const ZOOM_COEFFICIENT: f64 = 5.0;

/// Client-space distance past which a click after a drag is swallowed.
pub const CLICK_SLOP: f64 = 50.0;

/// Fallback pixels per wheel line when the host cannot measure one.
pub const DEFAULT_LINE_HEIGHT: f64 = 16.0;

/// Tunables for [`crate::ViewportEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Pixels per line for wheel events reported in `DeltaMode::Line`.
    pub line_height: f64,
    /// See [`SCROLL_PAN_COEFFICIENT`].
    pub scroll_pan_coefficient: f64,
    /// See [`ZOOM_COEFFICIENT`].
    pub zoom_coefficient: f64,
    /// See [`CLICK_SLOP`]. Only distances strictly greater suppress.
    pub click_slop: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            scroll_pan_coefficient: SCROLL_PAN_COEFFICIENT,
            zoom_coefficient: ZOOM_COEFFICIENT,
            click_slop: CLICK_SLOP,
        }
    }
}

impl ViewportConfig {
    /// Sets the measured line height.
    #[must_use]
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Sets the wheel pan coefficient.
    #[must_use]
    pub fn with_scroll_pan_coefficient(mut self, coefficient: f64) -> Self {
        self.scroll_pan_coefficient = coefficient;
        self
    }

    /// Sets the wheel zoom coefficient.
    #[must_use]
    pub fn with_zoom_coefficient(mut self, coefficient: f64) -> Self {
        self.zoom_coefficient = coefficient;
        self
    }

    /// Sets the click suppression distance.
    #[must_use]
    pub fn with_click_slop(mut self, slop: f64) -> Self {
        self.click_slop = slop;
        self
    }
}
