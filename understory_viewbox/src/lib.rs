// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Viewbox: pan/zoom/gesture engine for SVG viewboxes.
//!
//! This crate drives the `viewBox` of an SVG canvas (or anything shaped like
//! one) from touch, mouse, wheel and trackpad-gesture input. It focuses on:
//! - A [`ViewBox`] rectangle in the canvas's own user units.
//! - Programmatic zoom in/out/reset that keeps the visible center fixed.
//! - Two-finger pinch, mouse drag, wheel pan/zoom and WebKit
//!   `gesturechange` zoom, combined into one consistent state.
//! - Click suppression at the end of a drag.
//!
//! It is headless. Hosts supply two ports:
//! - [`Surface`]: reads and writes the element's viewbox, converts client
//!   pixels into user space, and reports the window size.
//! - [`InputSource`]: registers the engine's [`LISTENERS`] with the native
//!   event system and delivers events back through
//!   [`ViewportEngine::handle`].
//!
//! The browser adapter lives in `understory_viewbox_web`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_viewbox::{
//!     ConversionError, Surface, ViewBox, ViewBoxError, ViewportConfig, ViewportEngine,
//! };
//!
//! // A canvas whose client box is exactly its initial viewbox.
//! struct Canvas(ViewBox);
//!
//! impl Surface for Canvas {
//!     fn view_box(&self) -> Result<ViewBox, ViewBoxError> {
//!         Ok(self.0)
//!     }
//!     fn set_view_box(&mut self, view_box: ViewBox) {
//!         self.0 = view_box;
//!     }
//!     fn screen_to_local(&self, client: Point) -> Result<Point, ConversionError> {
//!         Ok(Point::new(
//!             self.0.x + client.x * self.0.width / 100.0,
//!             self.0.y + client.y * self.0.height / 100.0,
//!         ))
//!     }
//!     fn window_size(&self) -> Size {
//!         Size::new(100.0, 100.0)
//!     }
//! }
//!
//! let mut engine =
//!     ViewportEngine::new(Canvas(ViewBox::new(0.0, 0.0, 100.0, 100.0)), ViewportConfig::default())
//!         .unwrap();
//!
//! engine.zoom_in(0.5);
//! assert_eq!(engine.view_box(), ViewBox::new(25.0, 25.0, 50.0, 50.0));
//!
//! // Drag the map 10 px to the right.
//! engine.on_mouse_down(Point::new(10.0, 10.0));
//! engine.on_mouse_move(Point::new(20.0, 10.0)).unwrap();
//! engine.on_mouse_up();
//! assert_eq!(engine.view_box().x, 20.0);
//!
//! engine.reset();
//! assert_eq!(engine.surface().0, ViewBox::new(0.0, 0.0, 100.0, 100.0));
//! ```
//!
//! ## Design notes
//!
//! - Every interaction snapshots a baseline viewbox and computes its result
//!   from that baseline, so repeated gestures do not accumulate error.
//! - A viewbox without a finite, positive extent is never committed; scale
//!   factors that would produce one are ignored.
//! - Trackpad `gesturechange` zoom is relative to the original viewbox, and
//!   stands down while a two-finger touch is active so one physical pinch is
//!   not applied twice.
//! - Wheel line deltas are converted with [`ViewportConfig::line_height`],
//!   which the host measures or configures.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod config;
mod engine;
mod input;
mod session;
mod surface;
mod viewbox;

pub use config::{
    CLICK_SLOP, DEFAULT_LINE_HEIGHT, SCROLL_PAN_COEFFICIENT, ViewportConfig, ZOOM_COEFFICIENT,
};
pub use engine::{ViewportEngine, ViewportEngineDebugInfo};
pub use input::{
    DeltaMode, EventActions, EventName, GestureInput, Handler, InputEvent, LISTENERS, Listener,
    ListenerOptions, Modifiers, TouchInput, WheelInput,
};
pub use surface::{ConversionError, InputSource, Surface};
pub use viewbox::{ViewBox, ViewBoxError};
