// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser bindings for `understory_viewbox`.
//!
//! When targeting `wasm32`, this crate drives a live `<svg>` element:
//! - `SvgSurface` reads and writes the `viewBox` attribute and converts
//!   client coordinates with the inverse of `getScreenCTM()`.
//! - `measure_line_height` finds the pixel height of one wheel "line" by
//!   rendering text in a hidden frame.
//! - `SvgViewport` ties these together into the control a host component
//!   holds: zoom in/out, reset, enable/disable, teardown. It registers the
//!   engine's handlers with `addEventListener`, non-passive where a handler
//!   may cancel the event, and applies the returned actions
//!   (`preventDefault`/`stopPropagation`).
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn mount(
//!     svg: web_sys::SvgsvgElement,
//! ) -> Result<understory_viewbox_web::SvgViewport, understory_viewbox_web::SetupError> {
//!     let viewport = understory_viewbox_web::SvgViewport::new(svg)?;
//!     viewport.zoom_in(0.2);
//!     Ok(viewport)
//! }
//! ```
//!
//! Notes:
//! - Coordinate conversion failures (the element has no screen CTM, usually
//!   because it was detached) are rethrown into JS from the event handler.
//! - WebKit `gesturechange` events are read reflectively since `web-sys`
//!   does not model them.
//!
//! On other targets only the error types are available.

#![no_std]

extern crate alloc;

mod error;

#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod probe;
#[cfg(target_arch = "wasm32")]
mod surface;
#[cfg(target_arch = "wasm32")]
mod viewport;

pub use error::{ProbeError, SetupError};

#[cfg(target_arch = "wasm32")]
pub use probe::measure_line_height;
#[cfg(target_arch = "wasm32")]
pub use surface::SvgSurface;
#[cfg(target_arch = "wasm32")]
pub use viewport::SvgViewport;
