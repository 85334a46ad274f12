// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ViewportEngine`.
//!
//! The test surface lays its viewbox over a fixed client rectangle (no
//! aspect-ratio preservation), which is how an `<svg>` with
//! `preserveAspectRatio="none"` maps client pixels into user space.

use kurbo::{Point, Rect, Size, Vec2};
use understory_viewbox::{
    ConversionError, DeltaMode, EventActions, EventName, GestureInput, Handler, InputEvent,
    InputSource, LISTENERS, Listener, Modifiers, Surface, TouchInput, ViewBox, ViewBoxError,
    ViewportConfig, ViewportEngine, WheelInput,
};

const EPS: f64 = 1e-9;

#[derive(Debug)]
struct TestSurface {
    client: Rect,
    view_box: ViewBox,
    window: Size,
    detached: bool,
    writes: usize,
}

impl TestSurface {
    /// Client box and viewbox coincide, so conversion starts as identity.
    fn identity(extent: f64) -> Self {
        Self {
            client: Rect::new(0.0, 0.0, extent, extent),
            view_box: ViewBox::new(0.0, 0.0, extent, extent),
            window: Size::new(1000.0, 500.0),
            detached: false,
            writes: 0,
        }
    }

    fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = view_box;
        self
    }
}

impl Surface for TestSurface {
    fn view_box(&self) -> Result<ViewBox, ViewBoxError> {
        Ok(self.view_box)
    }

    fn set_view_box(&mut self, view_box: ViewBox) {
        self.view_box = view_box;
        self.writes += 1;
    }

    fn screen_to_local(&self, client: Point) -> Result<Point, ConversionError> {
        if self.detached {
            return Err(ConversionError);
        }
        let vb = self.view_box;
        Ok(Point::new(
            vb.x + (client.x - self.client.x0) * vb.width / self.client.width(),
            vb.y + (client.y - self.client.y0) * vb.height / self.client.height(),
        ))
    }

    fn window_size(&self) -> Size {
        self.window
    }
}

#[derive(Debug, Default)]
struct RecordingSource {
    added: Vec<Listener>,
    removed: Vec<Listener>,
}

impl InputSource for RecordingSource {
    fn add_listener(&mut self, listener: &Listener) {
        self.added.push(*listener);
    }

    fn remove_listener(&mut self, listener: &Listener) {
        self.removed.push(*listener);
    }
}

fn engine(surface: TestSurface) -> ViewportEngine<TestSurface> {
    let config = ViewportConfig::default();
    ViewportEngine::new(surface, config).unwrap()
}

fn assert_vb_eq(actual: ViewBox, expected: ViewBox) {
    assert!(
        (actual.x - expected.x).abs() < EPS
            && (actual.y - expected.y).abs() < EPS
            && (actual.width - expected.width).abs() < EPS
            && (actual.height - expected.height).abs() < EPS,
        "{actual:?} != {expected:?}"
    );
}

fn touches(points: &[(f64, f64)]) -> TouchInput {
    let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    TouchInput::from_points(&points)
}

fn wheel(dx: f64, dy: f64, mode: DeltaMode, modifiers: Modifiers) -> WheelInput {
    WheelInput {
        delta: Vec2::new(dx, dy),
        mode,
        modifiers,
    }
}

#[test]
fn construction_captures_original_and_rejects_degenerate() {
    let vb = ViewBox::new(5.0, 6.0, 70.0, 80.0);
    let e = engine(TestSurface::identity(100.0).with_view_box(vb));
    assert_eq!(e.view_box(), vb);
    assert_eq!(e.original_view_box(), vb);
    assert!(!e.is_enabled());

    let degenerate = ViewBox::new(0.0, 0.0, 0.0, 10.0);
    let bad = TestSurface::identity(100.0).with_view_box(degenerate);
    assert_eq!(
        ViewportEngine::new(bad, ViewportConfig::default()).err(),
        Some(ViewBoxError::Degenerate)
    );
}

#[test]
fn zoom_in_and_out_single_step() {
    let start = ViewBox::new(10.0, 10.0, 10.0, 10.0);

    let mut e = engine(TestSurface::identity(100.0).with_view_box(start));
    e.zoom_in(0.1);
    assert_vb_eq(e.view_box(), ViewBox::new(10.5, 10.5, 9.0, 9.0));
    assert_eq!(e.surface().view_box, e.view_box());

    let mut e = engine(TestSurface::identity(100.0).with_view_box(start));
    e.zoom_out(0.1);
    assert_vb_eq(e.view_box(), ViewBox::new(9.5, 9.5, 11.0, 11.0));
}

#[test]
fn each_zoom_preserves_center() {
    let start = ViewBox::new(3.0, -7.0, 40.0, 25.0);
    let mut e = engine(TestSurface::identity(100.0).with_view_box(start));
    let center = e.view_box().center();
    for p in [0.1, 0.25, 0.5, 0.05] {
        e.zoom_in(p);
        assert!((e.view_box().center() - center).hypot() < EPS);
        e.zoom_out(p);
        assert!((e.view_box().center() - center).hypot() < EPS);
    }
    // (1 - p)(1 + p) != 1, so the extent does not round-trip.
    assert!(e.view_box().width < 40.0);
}

#[test]
fn zoom_that_would_collapse_extent_is_ignored() {
    let mut e = engine(TestSurface::identity(100.0));
    e.zoom_in(1.0);
    assert_eq!(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));
    e.zoom_in(1.5);
    assert_eq!(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(e.surface().writes, 0);
}

#[test]
fn reset_restores_original_exactly() {
    let original = ViewBox::new(0.1, 0.2, 33.3, 44.4);
    let mut e = engine(TestSurface::identity(100.0).with_view_box(original));

    e.zoom_in(0.3);
    e.zoom_out(0.7);
    e.on_mouse_down(Point::new(1.0, 2.0));
    e.on_mouse_move(Point::new(9.0, 17.0)).unwrap();
    e.on_mouse_up();
    e.on_wheel(&wheel(13.0, -4.0, DeltaMode::Pixel, Modifiers::empty()));
    e.on_wheel(&wheel(0.0, 3.0, DeltaMode::Line, Modifiers::CTRL));
    e.on_gesture_change(&GestureInput { scale: 1.7 });

    e.reset();
    assert_eq!(e.view_box(), original);
    assert_eq!(e.surface().view_box, original);
}

#[test]
fn drag_pans_with_cursor() {
    let mut e = engine(TestSurface::identity(100.0));
    assert_eq!(
        e.on_mouse_down(Point::new(10.0, 10.0)),
        EventActions::STOP_PROPAGATION
    );
    assert!(e.is_dragging());

    e.on_mouse_move(Point::new(20.0, 10.0)).unwrap();
    assert_vb_eq(e.view_box(), ViewBox::new(-10.0, 0.0, 100.0, 100.0));

    // Later frames are still measured from the mouse-down baseline.
    e.on_mouse_move(Point::new(25.0, 4.0)).unwrap();
    assert_vb_eq(e.view_box(), ViewBox::new(-15.0, 6.0, 100.0, 100.0));
}

#[test]
fn drag_keeps_grabbed_point_under_cursor_when_zoomed() {
    let mut e = engine(TestSurface::identity(100.0));
    e.zoom_in(0.5);
    let grab = Point::new(30.0, 60.0);
    let grabbed = e.svg_point(grab).unwrap();

    e.on_mouse_down(grab);
    let cursor = Point::new(70.0, 20.0);
    e.on_mouse_move(cursor).unwrap();
    let under_cursor = e.svg_point(cursor).unwrap();
    assert!((under_cursor - grabbed).hypot() < EPS);
}

#[test]
fn mouse_move_without_drag_is_noop() {
    let mut e = engine(TestSurface::identity(100.0));
    e.on_mouse_move(Point::new(50.0, 50.0)).unwrap();
    assert_eq!(e.surface().writes, 0);

    e.on_mouse_down(Point::new(0.0, 0.0));
    e.on_mouse_leave();
    assert!(!e.is_dragging());
    e.on_mouse_move(Point::new(50.0, 50.0)).unwrap();
    assert_eq!(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));

    e.on_mouse_down(Point::new(0.0, 0.0));
    e.on_mouse_up();
    e.on_mouse_up();
    assert!(!e.is_dragging());
}

#[test]
fn click_suppression_threshold_is_exclusive() {
    let mut e = engine(TestSurface::identity(100.0));
    // No mouse down yet.
    assert_eq!(e.on_click(Point::new(500.0, 500.0)), EventActions::empty());

    e.on_mouse_down(Point::new(10.0, 10.0));
    e.on_mouse_up();

    // Exactly 50 px away (3-4-5 triangle scaled by 10).
    assert_eq!(e.on_click(Point::new(40.0, 50.0)), EventActions::empty());
    assert_eq!(e.on_click(Point::new(60.0, 10.0)), EventActions::empty());
    assert_eq!(
        e.on_click(Point::new(210.0, 10.0)),
        EventActions::STOP_PROPAGATION
    );
    assert_eq!(
        e.on_click(Point::new(10.0, 60.5)),
        EventActions::STOP_PROPAGATION
    );
}

#[test]
fn two_finger_pinch_scales_by_magnitude_ratio_and_pins_midpoint() {
    let mut e = engine(TestSurface::identity(100.0));
    let start = touches(&[(11.0, 11.0), (19.0, 19.0)]);
    assert_eq!(e.on_touch_start(&start), EventActions::PREVENT_DEFAULT);
    assert!(e.is_two_finger_touch());

    let pinned = e.svg_point(Point::new(15.0, 15.0)).unwrap();

    // Magnitude halves (≈11.3 → ≈5.66): the extent doubles.
    let pinch = touches(&[(13.0, 13.0), (17.0, 17.0)]);
    e.on_touch_move(&pinch).unwrap();
    assert_vb_eq(e.view_box(), ViewBox::new(-15.0, -15.0, 200.0, 200.0));
    let still = e.svg_point(Point::new(15.0, 15.0)).unwrap();
    assert!((still - pinned).hypot() < EPS);

    // Spread and slide: magnitude doubles, midpoint moves to (60, 40).
    let spread = touches(&[(52.0, 32.0), (68.0, 48.0)]);
    e.on_touch_move(&spread).unwrap();
    let vb = e.view_box();
    assert!((vb.width - 50.0).abs() < EPS);
    assert!((vb.height - 50.0).abs() < EPS);
    let under = e.svg_point(Point::new(60.0, 40.0)).unwrap();
    assert!((under - pinned).hypot() < EPS);
}

#[test]
fn pinch_has_no_drift_across_frames() {
    let mut e = engine(TestSurface::identity(100.0));
    e.on_touch_start(&touches(&[(20.0, 50.0), (80.0, 50.0)]));
    for step in 0..200 {
        let wobble = f64::from(step % 7) - 3.0;
        let frame = touches(&[(20.0 + wobble, 50.0), (80.0 - wobble, 50.0)]);
        e.on_touch_move(&frame).unwrap();
    }
    let settled = touches(&[(20.0, 50.0), (80.0, 50.0)]);
    e.on_touch_move(&settled).unwrap();
    assert_vb_eq(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn touch_events_with_other_counts_are_ignored() {
    let mut e = engine(TestSurface::identity(100.0));
    assert_eq!(
        e.on_touch_start(&touches(&[(1.0, 1.0)])),
        EventActions::empty()
    );
    assert!(!e.is_two_finger_touch());
    assert_eq!(
        e.on_touch_start(&touches(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])),
        EventActions::empty()
    );
    assert!(!e.is_two_finger_touch());

    e.on_touch_start(&touches(&[(10.0, 10.0), (30.0, 30.0)]));
    e.on_touch_move(&touches(&[(10.0, 10.0)])).unwrap();
    let three = touches(&[(10.0, 10.0), (20.0, 20.0), (5.0, 5.0)]);
    e.on_touch_move(&three).unwrap();
    let unreadable = TouchInput {
        count: 2,
        points: [Point::new(10.0, 10.0)].into_iter().collect(),
    };
    e.on_touch_move(&unreadable).unwrap();
    // Fingers collapsed onto one point.
    let collapsed = touches(&[(15.0, 15.0), (15.0, 15.0)]);
    e.on_touch_move(&collapsed).unwrap();
    assert_eq!(e.surface().writes, 0);
}

#[test]
fn touch_end_clears_two_finger_only_below_two() {
    let mut e = engine(TestSurface::identity(100.0));
    e.on_touch_start(&touches(&[(10.0, 10.0), (30.0, 30.0)]));
    e.on_touch_end(&touches(&[(10.0, 10.0), (30.0, 30.0)]));
    assert!(e.is_two_finger_touch());
    e.on_touch_end(&touches(&[(10.0, 10.0)]));
    assert!(!e.is_two_finger_touch());

    // With the flag clear, stale baselines are not replayed.
    let stale = touches(&[(0.0, 0.0), (90.0, 90.0)]);
    e.on_touch_move(&stale).unwrap();
    assert_eq!(e.surface().writes, 0);
}

#[test]
fn wheel_pans_by_half_the_pixel_delta() {
    let mut e = engine(TestSurface::identity(100.0));
    let actions = e.on_wheel(&wheel(10.0, -20.0, DeltaMode::Pixel, Modifiers::SHIFT));
    assert_eq!(actions, EventActions::PREVENT_DEFAULT);
    assert_vb_eq(e.view_box(), ViewBox::new(5.0, -10.0, 100.0, 100.0));
}

#[test]
fn wheel_line_mode_uses_line_height() {
    let config = ViewportConfig::default().with_line_height(20.0);
    let surface = TestSurface::identity(100.0);
    let mut e = ViewportEngine::new(surface, config).unwrap();
    e.on_wheel(&wheel(1.0, 3.0, DeltaMode::Line, Modifiers::empty()));
    assert_vb_eq(e.view_box(), ViewBox::new(10.0, 30.0, 100.0, 100.0));
}

#[test]
fn wheel_with_unsupported_delta_mode_changes_nothing() {
    let mut e = engine(TestSurface::identity(100.0));
    for mode in [DeltaMode::Page, DeltaMode::Unknown(9)] {
        let actions = e.on_wheel(&wheel(10.0, 10.0, mode, Modifiers::CTRL));
        assert_eq!(actions, EventActions::empty());
    }
    assert_eq!(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(e.surface().writes, 0);
}

#[test]
fn ctrl_wheel_zooms_each_axis_against_its_window_extent() {
    // Window is 1000 x 500.
    let mut e = engine(TestSurface::identity(100.0));
    let actions = e.on_wheel(&wheel(0.0, 10.0, DeltaMode::Pixel, Modifiers::CTRL));
    assert_eq!(actions, EventActions::PREVENT_DEFAULT);
    // width * (1 + 10/1000 * 5) = 105, height * (1 + 10/500 * 5) = 110.
    assert_vb_eq(e.view_box(), ViewBox::new(-2.5, -5.0, 105.0, 110.0));

    let mut e = engine(TestSurface::identity(100.0));
    e.on_wheel(&wheel(0.0, -10.0, DeltaMode::Pixel, Modifiers::META));
    assert_vb_eq(e.view_box(), ViewBox::new(2.5, 5.0, 95.0, 90.0));
    let center = e.view_box().center();
    assert!((center - Point::new(50.0, 50.0)).hypot() < EPS);
}

#[test]
fn ctrl_wheel_that_would_invert_extent_is_ignored() {
    let mut e = engine(TestSurface::identity(100.0));
    let actions = e.on_wheel(&wheel(0.0, -200.0, DeltaMode::Pixel, Modifiers::CTRL));
    // The deltas were accepted even though the zoom was not applied.
    assert_eq!(actions, EventActions::PREVENT_DEFAULT);
    assert_eq!(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn gesture_change_zooms_relative_to_original() {
    let mut e = engine(TestSurface::identity(100.0));
    e.zoom_in(0.5);
    e.on_gesture_change(&GestureInput { scale: 2.0 });
    // 100 / 2, not 50 / 2; centered on the prior center.
    assert_vb_eq(e.view_box(), ViewBox::new(25.0, 25.0, 50.0, 50.0));

    e.on_gesture_change(&GestureInput { scale: 4.0 });
    assert_vb_eq(e.view_box(), ViewBox::new(37.5, 37.5, 25.0, 25.0));

    e.on_gesture_change(&GestureInput { scale: 0.0 });
    e.on_gesture_change(&GestureInput { scale: f64::NAN });
    assert_vb_eq(e.view_box(), ViewBox::new(37.5, 37.5, 25.0, 25.0));
}

#[test]
fn gesture_change_defers_to_two_finger_touch() {
    let mut e = engine(TestSurface::identity(100.0));
    e.on_touch_start(&touches(&[(10.0, 10.0), (30.0, 30.0)]));
    e.on_gesture_change(&GestureInput { scale: 3.0 });
    assert_eq!(e.surface().writes, 0);

    e.on_touch_end(&TouchInput::default());
    e.on_gesture_change(&GestureInput { scale: 2.0 });
    assert_vb_eq(e.view_box(), ViewBox::new(25.0, 25.0, 50.0, 50.0));
}

#[test]
fn conversion_failure_propagates_and_leaves_viewbox() {
    let mut e = engine(TestSurface::identity(100.0));
    e.on_mouse_down(Point::new(10.0, 10.0));
    e.surface_mut().detached = true;
    let moved = InputEvent::Mouse(Point::new(20.0, 20.0));
    assert_eq!(
        e.on_mouse_move(Point::new(20.0, 20.0)),
        Err(ConversionError)
    );
    assert_eq!(e.handle(Handler::MouseMove, &moved), Err(ConversionError));

    e.on_touch_start(&touches(&[(10.0, 10.0), (30.0, 30.0)]));
    let pinch = touches(&[(0.0, 0.0), (40.0, 40.0)]);
    assert!(e.on_touch_move(&pinch).is_err());
    assert_eq!(e.view_box(), ViewBox::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(ConversionError.to_string(), "missing conversion matrix");
}

#[test]
fn listener_registration_is_symmetric() {
    let mut source = RecordingSource::default();
    let surface = TestSurface::identity(100.0);
    let cfg = ViewportConfig::default();
    let mut e = ViewportEngine::attach(surface, cfg, &mut source).unwrap();
    assert!(e.is_enabled());
    assert_eq!(source.added, LISTENERS.to_vec());

    // Idempotent in both directions.
    e.enable(&mut source);
    assert_eq!(source.added.len(), LISTENERS.len());

    e.teardown(&mut source);
    e.disable(&mut source);
    assert!(!e.is_enabled());
    assert_eq!(source.removed, source.added);

    e.enable(&mut source);
    assert_eq!(source.added.len(), 2 * LISTENERS.len());
}

#[test]
fn listener_table_options() {
    let names: Vec<&str> = LISTENERS.iter().map(|l| l.event.as_str()).collect();
    assert_eq!(
        names,
        [
            "touchstart",
            "touchmove",
            "touchend",
            "mousedown",
            "click",
            "mousemove",
            "mouseup",
            "mouseleave",
            "wheel",
            "gesturestart",
            "gesturechange",
            "gesturechange",
            "gestureend",
        ]
    );
    for l in &LISTENERS {
        let cancelable = matches!(
            l.event,
            EventName::TouchStart
                | EventName::TouchMove
                | EventName::TouchEnd
                | EventName::Wheel
                | EventName::GestureStart
                | EventName::GestureChange
                | EventName::GestureEnd
        );
        assert_eq!(l.options.passive == Some(false), cancelable, "{l:?}");
    }
}

#[test]
fn handle_dispatches_and_ignores_mismatched_events() {
    let mut e = engine(TestSurface::identity(100.0));
    let down = InputEvent::Mouse(Point::new(10.0, 10.0));
    assert_eq!(
        e.handle(Handler::MouseDown, &down),
        Ok(EventActions::STOP_PROPAGATION)
    );
    let moved = InputEvent::Mouse(Point::new(20.0, 10.0));
    assert_eq!(
        e.handle(Handler::MouseMove, &moved),
        Ok(EventActions::empty())
    );
    assert_vb_eq(e.view_box(), ViewBox::new(-10.0, 0.0, 100.0, 100.0));
    e.handle(Handler::MouseUp, &down).unwrap();
    assert!(!e.is_dragging());

    let gesture = InputEvent::Gesture(GestureInput { scale: 2.0 });
    assert_eq!(
        e.handle(Handler::SuppressNative, &gesture),
        Ok(EventActions::PREVENT_DEFAULT)
    );
    assert_eq!(
        e.handle(Handler::Wheel, &gesture),
        Ok(EventActions::empty())
    );
    let scroll = InputEvent::Wheel(wheel(0.0, 4.0, DeltaMode::Pixel, Modifiers::empty()));
    assert_eq!(
        e.handle(Handler::Wheel, &scroll),
        Ok(EventActions::PREVENT_DEFAULT)
    );
    assert_vb_eq(e.view_box(), ViewBox::new(-10.0, 2.0, 100.0, 100.0));

    let info = e.debug_info();
    assert_eq!(info.view_box, e.view_box());
    assert_eq!(info.drag_origin, Some(Point::new(10.0, 10.0)));
    assert!(!info.dragging);
}
