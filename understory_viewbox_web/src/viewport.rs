// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

use understory_viewbox::{ViewBox, ViewportConfig, ViewportEngine};
use web_sys::{EventTarget, SvgsvgElement, Window};

use crate::error::SetupError;
use crate::listeners::{DomListeners, SharedEngine};
use crate::probe::measure_line_height;
use crate::surface::SvgSurface;

/// Pan/zoom control bound to one `<svg>` element.
///
/// Listeners are registered on construction and removed on
/// [`teardown`](Self::teardown) or drop.
#[derive(Debug)]
pub struct SvgViewport {
    engine: SharedEngine,
    listeners: DomListeners,
}

impl SvgViewport {
    /// Binds to `svg`, which must already be in the document and carry a
    /// `viewBox` attribute.
    ///
    /// Measures the wheel line height with a hidden frame first; see
    /// [`measure_line_height`].
    pub fn new(svg: SvgsvgElement) -> Result<Self, SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoWindow)?;
        let line_height = measure_line_height(&document)?;
        Self::with_config(
            svg,
            window,
            ViewportConfig::default().with_line_height(line_height),
        )
    }

    /// Binds to `svg` with an explicit configuration, skipping the probe.
    pub fn with_config(
        svg: SvgsvgElement,
        window: Window,
        config: ViewportConfig,
    ) -> Result<Self, SetupError> {
        let target: EventTarget = svg.clone().into();
        let engine = ViewportEngine::new(SvgSurface::new(svg, window), config)?;
        let engine = Rc::new(RefCell::new(engine));
        let mut listeners = DomListeners::new(target, Rc::clone(&engine));
        engine.borrow_mut().enable(&mut listeners);
        Ok(Self { engine, listeners })
    }

    /// See [`ViewportEngine::zoom_in`].
    pub fn zoom_in(&self, percent: f64) {
        self.engine.borrow_mut().zoom_in(percent);
    }

    /// See [`ViewportEngine::zoom_out`].
    pub fn zoom_out(&self, percent: f64) {
        self.engine.borrow_mut().zoom_out(percent);
    }

    /// See [`ViewportEngine::reset`].
    pub fn reset(&self) {
        self.engine.borrow_mut().reset();
    }

    /// Re-registers all listeners.
    pub fn enable(&mut self) {
        self.engine.borrow_mut().enable(&mut self.listeners);
    }

    /// Removes all listeners, leaving the page to scroll and zoom natively.
    pub fn disable(&mut self) {
        self.engine.borrow_mut().disable(&mut self.listeners);
    }

    /// Same as [`disable`](Self::disable).
    pub fn teardown(&mut self) {
        self.engine.borrow_mut().teardown(&mut self.listeners);
    }

    /// Returns `true` while listeners are registered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.engine.borrow().is_enabled()
    }

    /// Current viewbox.
    #[must_use]
    pub fn view_box(&self) -> ViewBox {
        self.engine.borrow().view_box()
    }
}

impl Drop for SvgViewport {
    fn drop(&mut self) {
        // The callbacks die with `listeners`; nothing may stay registered.
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.disable(&mut self.listeners);
        }
    }
}
