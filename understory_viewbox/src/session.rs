// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-interaction scratch state.

use kurbo::Point;

/// Transient state for the gesture currently driving the viewbox.
///
/// Every field is client-space; conversion to user space happens when the
/// engine applies a move.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GestureSession {
    /// Touch points recorded at the last two-finger `touchstart`.
    pub(crate) pinch: Option<[Point; 2]>,
    /// Pointer position at the last `mousedown`.
    ///
    /// Kept after the drag ends so the following `click` can be measured.
    pub(crate) drag_origin: Option<Point>,
    pub(crate) dragging: bool,
    /// A two-finger touch owns the transform; trackpad gestures stand down.
    pub(crate) two_finger: bool,
}

impl GestureSession {
    pub(crate) fn begin_pinch(&mut self, touches: [Point; 2]) {
        self.pinch = Some(touches);
        self.two_finger = true;
    }

    pub(crate) fn end_touch(&mut self) {
        self.two_finger = false;
    }

    pub(crate) fn begin_drag(&mut self, client: Point) {
        self.drag_origin = Some(client);
        self.dragging = true;
    }

    /// Returns the drag origin while a drag is active.
    pub(crate) fn active_drag(&self) -> Option<Point> {
        if self.dragging {
            self.drag_origin
        } else {
            None
        }
    }

    pub(crate) fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Client distance from the last drag origin to `client`.
    pub(crate) fn distance_from_origin(&self, client: Point) -> Option<f64> {
        self.drag_origin.map(|origin| (client - origin).hypot())
    }
}
