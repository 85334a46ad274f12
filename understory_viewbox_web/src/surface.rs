// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;

use kurbo::{Point, Size};
use tracing::warn;
use understory_viewbox::{ConversionError, Surface, ViewBox, ViewBoxError};
use wasm_bindgen::JsValue;
use web_sys::{SvgPoint, SvgsvgElement, Window};

/// [`Surface`] over a live `<svg>` element.
///
/// Conversion goes through the element's inverse screen CTM, using one
/// `SVGPoint` allocated up front and reused for every call.
#[derive(Debug)]
pub struct SvgSurface {
    svg: SvgsvgElement,
    point: SvgPoint,
    window: Window,
}

impl SvgSurface {
    /// Wraps `svg`, sizing wheel zoom against `window`.
    #[must_use]
    pub fn new(svg: SvgsvgElement, window: Window) -> Self {
        let point = svg.create_svg_point();
        Self { svg, point, window }
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &SvgsvgElement {
        &self.svg
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "SVGPoint coordinates are single precision."
)]
fn f64_to_f32(v: f64) -> f32 {
    v as f32
}

/// `innerWidth`/`innerHeight` in CSS pixels, or zero if unavailable.
fn window_extent(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Surface for SvgSurface {
    fn view_box(&self) -> Result<ViewBox, ViewBoxError> {
        self.svg
            .get_attribute("viewBox")
            .ok_or(ViewBoxError::Missing)?
            .parse()
    }

    fn set_view_box(&mut self, view_box: ViewBox) {
        if let Err(err) = self.svg.set_attribute("viewBox", &view_box.to_string()) {
            warn!(?err, "failed to write viewBox");
        }
    }

    fn screen_to_local(&self, client: Point) -> Result<Point, ConversionError> {
        let ctm = self.svg.get_screen_ctm().ok_or(ConversionError)?;
        let inverse = ctm.inverse().map_err(|_| ConversionError)?;
        self.point.set_x(f64_to_f32(client.x));
        self.point.set_y(f64_to_f32(client.y));
        let local = self.point.matrix_transform(&inverse);
        Ok(Point::new(f64::from(local.x()), f64::from(local.y())))
    }

    fn window_size(&self) -> Size {
        Size::new(
            window_extent(self.window.inner_width()),
            window_extent(self.window.inner_height()),
        )
    }
}
