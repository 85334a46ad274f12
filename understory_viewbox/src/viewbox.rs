// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size, Vec2};

/// Visible region of an SVG canvas, in the canvas's own user units.
///
/// This mirrors the four numbers of the SVG `viewBox` attribute: the
/// top‑left corner followed by the extent. A valid viewbox has a finite,
/// strictly positive extent; [`ViewBox::is_valid`] checks this and the
/// engine never commits a viewbox that fails it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    /// Left edge in user units.
    pub x: f64,
    /// Top edge in user units.
    pub y: f64,
    /// Horizontal extent in user units.
    pub width: f64,
    /// Vertical extent in user units.
    pub height: f64,
}

impl ViewBox {
    /// Creates a viewbox from its corner and extent.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a viewbox covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Returns the viewbox as a `kurbo::Rect`.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Top‑left corner.
    #[must_use]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent as a `kurbo::Size`.
    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point in user units.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns `true` if every component is finite and the extent is positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Returns a copy moved by `delta` user units.
    #[must_use]
    pub fn translated(self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Returns a copy whose corner is `origin`, keeping the extent.
    #[must_use]
    pub fn with_origin(self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Returns a copy resized to `width` × `height` around the same center.
    ///
    /// Half of the change in each dimension is taken off the corner, so
    /// [`ViewBox::center`] is preserved.
    #[must_use]
    pub fn resized_about_center(self, width: f64, height: f64) -> Self {
        Self::new(
            self.x - (width - self.width) / 2.0,
            self.y - (height - self.height) / 2.0,
            width,
            height,
        )
    }

    /// Returns a copy with the width scaled by `sx` and the height by `sy`,
    /// recentered on the current center.
    #[must_use]
    pub fn scaled_about_center(self, sx: f64, sy: f64) -> Self {
        self.resized_about_center(self.width * sx, self.height * sy)
    }

    /// Maps an absolute user‑space point to its position relative to this
    /// viewbox, where `(0, 0)` is the corner and `(1, 1)` the far corner.
    #[must_use]
    pub fn normalize(self, pt: Point) -> Vec2 {
        Vec2::new((pt.x - self.x) / self.width, (pt.y - self.y) / self.height)
    }
}

impl From<Rect> for ViewBox {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<ViewBox> for Rect {
    fn from(vb: ViewBox) -> Self {
        vb.to_rect()
    }
}

/// Formats as the SVG attribute value `"x y width height"`.
impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Parses the SVG `viewBox` attribute grammar: four numbers separated by
/// whitespace and/or commas.
impl FromStr for ViewBox {
    type Err = ViewBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0.0_f64; 4];
        let mut tokens = s
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|t| !t.is_empty());
        for slot in &mut values {
            let token = tokens.next().ok_or(ViewBoxError::Malformed)?;
            *slot = token.parse().map_err(|_| ViewBoxError::Malformed)?;
        }
        if tokens.next().is_some() {
            return Err(ViewBoxError::Malformed);
        }
        let vb = Self::new(values[0], values[1], values[2], values[3]);
        if !vb.is_valid() {
            return Err(ViewBoxError::Degenerate);
        }
        Ok(vb)
    }
}

/// Error produced when a surface cannot supply a usable viewbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewBoxError {
    /// The element carries no `viewBox` attribute.
    Missing,
    /// The attribute is not four numbers.
    Malformed,
    /// The extent is zero, negative, or not finite.
    Degenerate,
}

impl fmt::Display for ViewBoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("element has no viewBox attribute"),
            Self::Malformed => f.write_str("viewBox is not four numbers"),
            Self::Degenerate => f.write_str("viewBox extent must be finite and positive"),
        }
    }
}

impl core::error::Error for ViewBoxError {}
