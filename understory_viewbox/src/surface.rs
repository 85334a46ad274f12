// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ports between the engine and its host.

use core::fmt;

use kurbo::{Point, Size};

use crate::input::Listener;
use crate::viewbox::{ViewBox, ViewBoxError};

/// The element whose viewbox the engine drives.
///
/// In a browser this is an `<svg>` element; the conversion is its inverse
/// screen CTM. Hosts that draw their own canvas map client pixels onto the
/// current viewbox however their layout dictates.
pub trait Surface {
    /// Reads the element's current viewbox.
    fn view_box(&self) -> Result<ViewBox, ViewBoxError>;

    /// Writes a new viewbox onto the element.
    fn set_view_box(&mut self, view_box: ViewBox);

    /// Converts a client (screen pixel) point into user space under the
    /// element's current viewbox.
    ///
    /// Fails when the element has no screen transform, for example while it
    /// is detached from a rendered document.
    fn screen_to_local(&self, client: Point) -> Result<Point, ConversionError>;

    /// Inner size of the host window in client pixels.
    fn window_size(&self) -> Size;
}

/// Something that can deliver native events to engine handlers.
///
/// Implementations must treat `remove_listener` with a value equal to one
/// passed to `add_listener` as removing exactly that registration.
pub trait InputSource {
    /// Starts delivering `listener.event` to `listener.handler`.
    fn add_listener(&mut self, listener: &Listener);

    /// Stops delivering a registration previously added.
    fn remove_listener(&mut self, listener: &Listener);
}

/// The surface could not produce a screen-to-user-space transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionError;

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("missing conversion matrix")
    }
}

impl core::error::Error for ConversionError {}
