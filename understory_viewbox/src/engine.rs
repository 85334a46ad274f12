// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use tracing::{debug, trace, warn};

use crate::config::ViewportConfig;
use crate::input::{
    DeltaMode, EventActions, GestureInput, Handler, InputEvent, LISTENERS, TouchInput, WheelInput,
};
use crate::session::GestureSession;
use crate::surface::{ConversionError, InputSource, Surface};
use crate::viewbox::{ViewBox, ViewBoxError};

/// Pan/zoom state machine over one element's viewbox.
///
/// The engine owns three rectangles:
/// - the **original** viewbox read at construction, which [`reset`](Self::reset)
///   restores;
/// - the **current** viewbox, written to the [`Surface`] after every change;
/// - the **initial** viewbox, a per-interaction baseline snapshotted at each
///   touch start, mouse down, wheel tick and trackpad gesture step.
///
/// Moves are always computed from the baseline rather than accumulated
/// frame to frame, so long gestures do not drift.
///
/// Input arrives through the `on_*` handlers (or [`handle`](Self::handle),
/// which dispatches by [`Handler`]). Each returns the [`EventActions`] the
/// adapter should apply to the native event.
#[derive(Clone, Debug)]
pub struct ViewportEngine<S> {
    surface: S,
    config: ViewportConfig,
    original: ViewBox,
    initial: ViewBox,
    current: ViewBox,
    session: GestureSession,
    enabled: bool,
}

impl<S: Surface> ViewportEngine<S> {
    /// Creates an engine over `surface`, capturing its current viewbox as
    /// the reset target.
    ///
    /// No listeners are registered; see [`attach`](Self::attach).
    pub fn new(surface: S, config: ViewportConfig) -> Result<Self, ViewBoxError> {
        let view_box = surface.view_box()?;
        if !view_box.is_valid() {
            return Err(ViewBoxError::Degenerate);
        }
        Ok(Self {
            surface,
            config,
            original: view_box,
            initial: view_box,
            current: view_box,
            session: GestureSession::default(),
            enabled: false,
        })
    }

    /// Creates an engine and registers all of its listeners on `source`.
    pub fn attach<I: InputSource + ?Sized>(
        surface: S,
        config: ViewportConfig,
        source: &mut I,
    ) -> Result<Self, ViewBoxError> {
        let mut engine = Self::new(surface, config)?;
        engine.enable(source);
        Ok(engine)
    }

    /// Current viewbox.
    #[must_use]
    pub fn view_box(&self) -> ViewBox {
        self.current
    }

    /// Viewbox captured at construction.
    #[must_use]
    pub fn original_view_box(&self) -> ViewBox {
        self.original
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The driven surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the driven surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns `true` while listeners are registered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` between a mouse down and the following up/leave.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.dragging
    }

    /// Returns `true` while a two-finger touch owns the transform.
    #[must_use]
    pub fn is_two_finger_touch(&self) -> bool {
        self.session.two_finger
    }

    /// Converts a client point into user space under the current viewbox.
    pub fn svg_point(&self, client: Point) -> Result<Point, ConversionError> {
        self.surface.screen_to_local(client)
    }

    /// Shrinks the visible extent by `percent` (a fraction), keeping the center.
    pub fn zoom_in(&mut self, percent: f64) {
        self.zoom_by(1.0 - percent);
    }

    /// Grows the visible extent by `percent` (a fraction), keeping the center.
    pub fn zoom_out(&mut self, percent: f64) {
        self.zoom_by(1.0 + percent);
    }

    /// Restores the viewbox captured at construction.
    pub fn reset(&mut self) {
        debug!(view_box = ?self.original, "reset viewbox");
        self.commit(self.original);
    }

    /// Registers every entry of [`LISTENERS`] on `source`, in order.
    ///
    /// Does nothing if already enabled.
    pub fn enable<I: InputSource + ?Sized>(&mut self, source: &mut I) {
        if self.enabled {
            return;
        }
        for listener in &LISTENERS {
            source.add_listener(listener);
        }
        self.enabled = true;
        debug!("viewport input enabled");
    }

    /// Removes every entry of [`LISTENERS`] from `source`, in the same order
    /// they were added.
    ///
    /// Does nothing if not enabled.
    pub fn disable<I: InputSource + ?Sized>(&mut self, source: &mut I) {
        if !self.enabled {
            return;
        }
        for listener in &LISTENERS {
            source.remove_listener(listener);
        }
        self.enabled = false;
        debug!("viewport input disabled");
    }

    /// Alias of [`disable`](Self::disable) for hosts tearing the widget down.
    pub fn teardown<I: InputSource + ?Sized>(&mut self, source: &mut I) {
        self.disable(source);
    }

    /// Runs `handler` for a delivered event.
    ///
    /// A handler paired with an event of the wrong kind does nothing.
    pub fn handle(
        &mut self,
        handler: Handler,
        event: &InputEvent,
    ) -> Result<EventActions, ConversionError> {
        let actions = match (handler, event) {
            (Handler::SuppressNative, _) => self.on_suppress_native(),
            (Handler::TouchStart, InputEvent::Touch(touches)) => self.on_touch_start(touches),
            (Handler::TouchMove, InputEvent::Touch(touches)) => self.on_touch_move(touches)?,
            (Handler::TouchEnd, InputEvent::Touch(touches)) => self.on_touch_end(touches),
            (Handler::MouseDown, InputEvent::Mouse(client)) => self.on_mouse_down(*client),
            (Handler::Click, InputEvent::Mouse(client)) => self.on_click(*client),
            (Handler::MouseMove, InputEvent::Mouse(client)) => self.on_mouse_move(*client)?,
            (Handler::MouseUp, InputEvent::Mouse(_)) => self.on_mouse_up(),
            (Handler::MouseLeave, InputEvent::Mouse(_)) => self.on_mouse_leave(),
            (Handler::Wheel, InputEvent::Wheel(wheel)) => self.on_wheel(wheel),
            (Handler::GestureChange, InputEvent::Gesture(gesture)) => {
                self.on_gesture_change(gesture)
            }
            _ => EventActions::empty(),
        };
        Ok(actions)
    }

    /// `touchstart`: records the pinch baseline for a two-finger contact.
    pub fn on_touch_start(&mut self, touches: &TouchInput) -> EventActions {
        let Some(pair) = touches.pair() else {
            return EventActions::empty();
        };
        self.session.begin_pinch(pair);
        self.snapshot();
        debug!(a = ?pair[0], b = ?pair[1], "pinch start");
        EventActions::PREVENT_DEFAULT
    }

    /// `touchmove`: pans and zooms so the point under the initial finger
    /// midpoint stays under the current midpoint.
    pub fn on_touch_move(&mut self, touches: &TouchInput) -> Result<EventActions, ConversionError> {
        let (Some(current), Some(initial)) = (touches.pair(), self.active_pinch()) else {
            return Ok(EventActions::empty());
        };
        let initial_magnitude = (initial[1] - initial[0]).hypot();
        let current_magnitude = (current[1] - current[0]).hypot();
        let ratio = initial_magnitude / current_magnitude;
        if !ratio.is_finite() || ratio <= 0.0 {
            trace!(
                initial_magnitude,
                current_magnitude,
                "ignoring degenerate pinch"
            );
            return Ok(EventActions::empty());
        }

        // Positions relative to the viewbox do not depend on which viewbox
        // is applied, so both midpoints can be read under the current one
        // and replayed onto the baseline.
        let from = self
            .current
            .normalize(self.svg_point(initial[0].midpoint(initial[1]))?);
        let to = self
            .current
            .normalize(self.svg_point(current[0].midpoint(current[1]))?);

        let base = self.initial;
        let width = base.width * ratio;
        let height = base.height * ratio;
        let next = ViewBox::new(
            base.x + from.x * base.width - to.x * width,
            base.y + from.y * base.height - to.y * height,
            width,
            height,
        );
        trace!(ratio, view_box = ?next, "pinch move");
        self.commit(next);
        Ok(EventActions::empty())
    }

    /// `touchend`: releases trackpad gestures once fewer than two touches remain.
    pub fn on_touch_end(&mut self, touches: &TouchInput) -> EventActions {
        if touches.count < 2 {
            self.session.end_touch();
        }
        EventActions::empty()
    }

    /// `mousedown`: records the drag origin and baseline.
    pub fn on_mouse_down(&mut self, client: Point) -> EventActions {
        self.session.begin_drag(client);
        self.snapshot();
        debug!(?client, "drag start");
        EventActions::STOP_PROPAGATION
    }

    /// `mousemove`: pans so the point grabbed at mouse down follows the cursor.
    pub fn on_mouse_move(&mut self, client: Point) -> Result<EventActions, ConversionError> {
        let Some(origin) = self.session.active_drag() else {
            return Ok(EventActions::empty());
        };
        let delta = self.svg_point(client)? - self.svg_point(origin)?;
        let next = self.initial.with_origin(self.initial.origin() - delta);
        trace!(?delta, view_box = ?next, "drag move");
        self.commit(next);
        Ok(EventActions::empty())
    }

    /// `mouseup`: ends the drag.
    pub fn on_mouse_up(&mut self) -> EventActions {
        self.session.end_drag();
        EventActions::empty()
    }

    /// `mouseleave`: ends the drag.
    pub fn on_mouse_leave(&mut self) -> EventActions {
        self.session.end_drag();
        EventActions::empty()
    }

    /// `click`: swallows the click ending a drag longer than the click slop.
    pub fn on_click(&mut self, client: Point) -> EventActions {
        match self.session.distance_from_origin(client) {
            Some(distance) if distance > self.config.click_slop => {
                trace!(distance, "suppressing click after drag");
                EventActions::STOP_PROPAGATION
            }
            _ => EventActions::empty(),
        }
    }

    /// `wheel`: pans, or zooms while Ctrl/Meta is held.
    pub fn on_wheel(&mut self, wheel: &WheelInput) -> EventActions {
        let delta = match wheel.mode {
            DeltaMode::Pixel => wheel.delta,
            DeltaMode::Line => wheel.delta * self.config.line_height,
            DeltaMode::Page | DeltaMode::Unknown(_) => return EventActions::empty(),
        };
        self.snapshot();
        let base = self.initial;
        let next = if wheel.modifiers.zoom_modifier() {
            let window = self.surface.window_size();
            let k = self.config.zoom_coefficient;
            base.scaled_about_center(
                1.0 + delta.y / window.width * k,
                1.0 + delta.y / window.height * k,
            )
        } else {
            base.translated(delta * self.config.scroll_pan_coefficient)
        };
        trace!(?delta, view_box = ?next, "wheel");
        self.commit(next);
        EventActions::PREVENT_DEFAULT
    }

    /// `gesturechange`: zooms to `original / scale`, unless a two-finger
    /// touch is already driving the transform.
    ///
    /// The scale is cumulative for the platform gesture, so the extent is
    /// taken relative to the original viewbox, not the baseline.
    pub fn on_gesture_change(&mut self, gesture: &GestureInput) -> EventActions {
        if self.session.two_finger {
            return EventActions::empty();
        }
        let scale = gesture.scale;
        if !scale.is_finite() || scale <= 0.0 {
            trace!(scale, "ignoring degenerate gesture scale");
            return EventActions::empty();
        }
        self.snapshot();
        let next = self
            .initial
            .resized_about_center(self.original.width / scale, self.original.height / scale);
        trace!(scale, view_box = ?next, "gesture zoom");
        self.commit(next);
        EventActions::empty()
    }

    /// `gesturestart` / `gestureend`: keeps the browser from zooming the page.
    pub fn on_suppress_native(&mut self) -> EventActions {
        EventActions::PREVENT_DEFAULT
    }

    /// Snapshot of the engine state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportEngineDebugInfo {
        ViewportEngineDebugInfo {
            view_box: self.current,
            original_view_box: self.original,
            gesture_baseline: self.initial,
            enabled: self.enabled,
            dragging: self.session.dragging,
            two_finger_touch: self.session.two_finger,
            drag_origin: self.session.drag_origin,
        }
    }

    fn active_pinch(&self) -> Option<[Point; 2]> {
        if self.session.two_finger {
            self.session.pinch
        } else {
            None
        }
    }

    fn snapshot(&mut self) {
        self.initial = self.current;
    }

    fn zoom_by(&mut self, factor: f64) {
        let next = self.current.scaled_about_center(factor, factor);
        self.commit(next);
    }

    /// Applies `next` if it keeps a positive, finite extent.
    fn commit(&mut self, next: ViewBox) {
        if !next.is_valid() {
            warn!(view_box = ?next, "rejecting viewbox without a positive extent");
            return;
        }
        self.current = next;
        self.surface.set_view_box(next);
    }
}

/// Debug snapshot of a [`ViewportEngine`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportEngineDebugInfo {
    /// Current viewbox.
    pub view_box: ViewBox,
    /// Viewbox restored by `reset`.
    pub original_view_box: ViewBox,
    /// Baseline of the most recent interaction.
    pub gesture_baseline: ViewBox,
    /// Whether listeners are registered.
    pub enabled: bool,
    /// Whether a mouse drag is active.
    pub dragging: bool,
    /// Whether a two-finger touch is active.
    pub two_finger_touch: bool,
    /// Client position of the last mouse down.
    pub drag_origin: Option<Point>,
}
