// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event plumbing for [`ViewportEngine`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::RefCell;

use js_sys::{Function, Reflect};
use kurbo::{Point, Vec2};
use tracing::warn;
use understory_viewbox::{
    DeltaMode, EventActions, GestureInput, Handler, InputEvent, InputSource, Listener, Modifiers,
    TouchInput, ViewportEngine, WheelInput,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, MouseEvent, Touch, TouchEvent, TouchList,
    WheelEvent,
};

use crate::surface::SvgSurface;

pub(crate) type SharedEngine = Rc<RefCell<ViewportEngine<SvgSurface>>>;

type Callback = Closure<dyn FnMut(Event)>;

/// [`InputSource`] that attaches engine handlers to a DOM event target.
///
/// One JS callback is created per [`Handler`] and reused for every
/// registration naming it, so removal always passes the same function
/// object that was added.
#[derive(Debug)]
pub(crate) struct DomListeners {
    target: EventTarget,
    engine: SharedEngine,
    callbacks: Vec<(Handler, Callback)>,
}

impl DomListeners {
    pub(crate) fn new(target: EventTarget, engine: SharedEngine) -> Self {
        Self {
            target,
            engine,
            callbacks: Vec::new(),
        }
    }

    fn callback_index(&mut self, handler: Handler) -> usize {
        if let Some(index) = self.callbacks.iter().position(|(h, _)| *h == handler) {
            return index;
        }
        let callback = make_callback(Rc::clone(&self.engine), handler);
        self.callbacks.push((handler, callback));
        self.callbacks.len() - 1
    }

    fn function(&self, index: usize) -> &Function {
        self.callbacks[index].1.as_ref().unchecked_ref()
    }
}

impl InputSource for DomListeners {
    fn add_listener(&mut self, listener: &Listener) {
        let index = self.callback_index(listener.handler);
        let options = AddEventListenerOptions::new();
        if let Some(passive) = listener.options.passive {
            options.set_passive(passive);
        }
        let name = listener.event.as_str();
        if let Err(err) = self
            .target
            .add_event_listener_with_callback_and_add_event_listener_options(
                name,
                self.function(index),
                &options,
            )
        {
            warn!(event = name, ?err, "failed to add listener");
        }
    }

    fn remove_listener(&mut self, listener: &Listener) {
        let Some(index) = self
            .callbacks
            .iter()
            .position(|(h, _)| *h == listener.handler)
        else {
            return;
        };
        let name = listener.event.as_str();
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(name, self.function(index))
        {
            warn!(event = name, ?err, "failed to remove listener");
        }
    }
}

fn make_callback(engine: SharedEngine, handler: Handler) -> Callback {
    Closure::wrap(Box::new(move |event: Event| {
        let Some(input) = translate(handler, &event) else {
            return;
        };
        let result = engine.borrow_mut().handle(handler, &input);
        match result {
            Ok(actions) => apply(&event, actions),
            // Conversion failures are integration bugs; surface them to JS.
            Err(err) => wasm_bindgen::throw_str(&err.to_string()),
        }
    }) as Box<dyn FnMut(Event)>)
}

fn apply(event: &Event, actions: EventActions) {
    if actions.contains(EventActions::PREVENT_DEFAULT) {
        event.prevent_default();
    }
    if actions.contains(EventActions::STOP_PROPAGATION) {
        event.stop_propagation();
    }
}

/// Reads the native event a handler is registered for.
///
/// Returns `None` when the event is not of the expected interface.
fn translate(handler: Handler, event: &Event) -> Option<InputEvent> {
    match handler {
        Handler::TouchStart | Handler::TouchMove | Handler::TouchEnd => event
            .dyn_ref::<TouchEvent>()
            .map(|touch| InputEvent::Touch(touch_input(&touch.touches()))),
        Handler::MouseDown
        | Handler::Click
        | Handler::MouseMove
        | Handler::MouseUp
        | Handler::MouseLeave => event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| InputEvent::Mouse(mouse_point(mouse))),
        Handler::Wheel => event
            .dyn_ref::<WheelEvent>()
            .map(|wheel| InputEvent::Wheel(wheel_input(wheel))),
        Handler::GestureChange => gesture_scale(event).map(gesture_input),
        Handler::SuppressNative => Some(gesture_input(gesture_scale(event).unwrap_or(1.0))),
    }
}

fn gesture_input(scale: f64) -> InputEvent {
    InputEvent::Gesture(GestureInput { scale })
}

fn touch_input(list: &TouchList) -> TouchInput {
    let count = list.length();
    TouchInput {
        count: count as usize,
        points: (0..count)
            .map_while(|i| list.item(i))
            .map(|touch| touch_point(&touch))
            .collect(),
    }
}

fn touch_point(touch: &Touch) -> Point {
    Point::new(f64::from(touch.client_x()), f64::from(touch.client_y()))
}

fn mouse_point(mouse: &MouseEvent) -> Point {
    Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
}

fn wheel_input(wheel: &WheelEvent) -> WheelInput {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, wheel.shift_key());
    modifiers.set(Modifiers::CTRL, wheel.ctrl_key());
    modifiers.set(Modifiers::ALT, wheel.alt_key());
    modifiers.set(Modifiers::META, wheel.meta_key());
    WheelInput {
        delta: Vec2::new(wheel.delta_x(), wheel.delta_y()),
        mode: DeltaMode::from_raw(wheel.delta_mode()),
        modifiers,
    }
}

/// `GestureEvent` is WebKit-only and absent from `web-sys`; read `scale`
/// reflectively.
fn gesture_scale(event: &Event) -> Option<f64> {
    Reflect::get(event.as_ref(), &JsValue::from_str("scale"))
        .ok()?
        .as_f64()
}
