// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary shared between the engine and platform adapters.
//!
//! Adapters translate native events into the plain values here and apply
//! the returned [`EventActions`] back onto the native event.

use bitflags::bitflags;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// DOM event names consumed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
    /// `mousedown`
    MouseDown,
    /// `click`
    Click,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `mouseleave`
    MouseLeave,
    /// `wheel`
    Wheel,
    /// `gesturestart` (WebKit)
    GestureStart,
    /// `gesturechange` (WebKit)
    GestureChange,
    /// `gestureend` (WebKit)
    GestureEnd,
}

impl EventName {
    /// The DOM event type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::MouseDown => "mousedown",
            Self::Click => "click",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::MouseLeave => "mouseleave",
            Self::Wheel => "wheel",
            Self::GestureStart => "gesturestart",
            Self::GestureChange => "gesturechange",
            Self::GestureEnd => "gestureend",
        }
    }
}

/// Identity of one engine handler.
///
/// Registering and unregistering use the same `Handler` value, which is what
/// adapters key their native callbacks on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Two-finger pinch baseline.
    TouchStart,
    /// Two-finger pan and zoom.
    TouchMove,
    /// Clears the two-finger flag.
    TouchEnd,
    /// Drag baseline.
    MouseDown,
    /// Post-drag click suppression.
    Click,
    /// Drag pan.
    MouseMove,
    /// Ends a drag.
    MouseUp,
    /// Ends a drag when the pointer leaves the element.
    MouseLeave,
    /// Wheel pan, or zoom with Ctrl/Meta.
    Wheel,
    /// Only suppresses the browser's native action.
    SuppressNative,
    /// Trackpad pinch zoom.
    GestureChange,
}

/// Options passed alongside a registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// `Some(false)` requests a non-passive listener so the handler may
    /// cancel the default action. `None` keeps the platform default.
    pub passive: Option<bool>,
}

impl ListenerOptions {
    /// Platform default options.
    pub const DEFAULT: Self = Self { passive: None };
    /// Explicitly non-passive.
    pub const ACTIVE: Self = Self {
        passive: Some(false),
    };
}

/// One event registration: which handler to run for which event name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Listener {
    /// Event the handler is attached to.
    pub event: EventName,
    /// Handler run when the event fires.
    pub handler: Handler,
    /// Registration options.
    pub options: ListenerOptions,
}

impl Listener {
    /// A non-passive registration, for handlers that may cancel the event.
    const fn active(event: EventName, handler: Handler) -> Self {
        Self {
            event,
            handler,
            options: ListenerOptions::ACTIVE,
        }
    }

    /// A registration with platform default options.
    const fn plain(event: EventName, handler: Handler) -> Self {
        Self {
            event,
            handler,
            options: ListenerOptions::DEFAULT,
        }
    }
}

/// Every registration the engine makes, in registration order.
///
/// `gesturechange` appears twice: once to suppress the native zoom and once
/// for the zoom handler itself.
pub const LISTENERS: [Listener; 13] = [
    Listener::active(EventName::TouchStart, Handler::TouchStart),
    Listener::active(EventName::TouchMove, Handler::TouchMove),
    Listener::active(EventName::TouchEnd, Handler::TouchEnd),
    Listener::plain(EventName::MouseDown, Handler::MouseDown),
    Listener::plain(EventName::Click, Handler::Click),
    Listener::plain(EventName::MouseMove, Handler::MouseMove),
    Listener::plain(EventName::MouseUp, Handler::MouseUp),
    Listener::plain(EventName::MouseLeave, Handler::MouseLeave),
    Listener::active(EventName::Wheel, Handler::Wheel),
    Listener::active(EventName::GestureStart, Handler::SuppressNative),
    Listener::active(EventName::GestureChange, Handler::SuppressNative),
    Listener::active(EventName::GestureChange, Handler::GestureChange),
    Listener::active(EventName::GestureEnd, Handler::SuppressNative),
];

/// Active touch points of a touch event, in client pixels.
///
/// `count` is the number of touches the platform reports; `points` holds the
/// items that could actually be read, so a reported touch without a readable
/// item shows up as `points.len() < count`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchInput {
    /// Reported number of active touches.
    pub count: usize,
    /// Client coordinates of the readable touches.
    pub points: SmallVec<[Point; 4]>,
}

impl TouchInput {
    /// Builds an input where every reported touch is readable.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            count: points.len(),
            points: SmallVec::from_slice(points),
        }
    }

    /// Returns the touch at `index`, if readable.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<Point> {
        if index < self.count {
            self.points.get(index).copied()
        } else {
            None
        }
    }

    /// Returns both touches of a two-finger contact.
    ///
    /// `None` unless exactly two touches are reported and both are readable.
    #[must_use]
    pub fn pair(&self) -> Option<[Point; 2]> {
        if self.count != 2 {
            return None;
        }
        Some([self.item(0)?, self.item(1)?])
    }
}

/// Unit of wheel deltas, as in `WheelEvent.deltaMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaMode {
    /// `DOM_DELTA_PIXEL`
    Pixel,
    /// `DOM_DELTA_LINE`
    Line,
    /// `DOM_DELTA_PAGE`
    Page,
    /// Any other raw value.
    Unknown(u32),
}

impl DeltaMode {
    /// Maps the raw `deltaMode` value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Pixel,
            1 => Self::Line,
            2 => Self::Page,
            other => Self::Unknown(other),
        }
    }
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn zoom_modifier(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// A wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// `deltaX` / `deltaY` in `mode` units.
    pub delta: Vec2,
    /// Unit of `delta`.
    pub mode: DeltaMode,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

/// A WebKit `gesturechange` event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInput {
    /// Cumulative scale since the gesture began.
    pub scale: f64,
}

/// A native event translated for the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// `touchstart` / `touchmove` / `touchend`.
    Touch(TouchInput),
    /// Mouse events, at the pointer's client position.
    Mouse(Point),
    /// `wheel`.
    Wheel(WheelInput),
    /// `gesturestart` / `gesturechange` / `gestureend`.
    Gesture(GestureInput),
}

bitflags! {
    /// What the adapter should do to the native event after a handler ran.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventActions: u8 {
        /// Call `preventDefault()`.
        const PREVENT_DEFAULT = 1 << 0;
        /// Call `stopPropagation()`.
        const STOP_PROPAGATION = 1 << 1;
    }
}
