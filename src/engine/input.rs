use crate::browser;
use crate::engine::Point;
use anyhow::{anyhow, Result};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::collections::HashSet;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, TouchEvent};

pub const FIRE_KEY: &str = " ";

/// Raw events forwarded by the DOM listeners, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
}

/// Input as the simulation reads it once per tick. It does not know whether
/// the pointer came from a touch or a mouse.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pressed: HashSet<String>,
    pointer: Option<Point>,
    fire_latched: bool,
    taps: u32,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(code) => {
                if code == FIRE_KEY {
                    self.fire_latched = true;
                }
                self.pressed.insert(code);
            }
            InputEvent::KeyUp(code) => {
                self.pressed.remove(&code);
            }
            InputEvent::PointerDown(point) => {
                self.pointer = Some(point);
                self.taps += 1;
            }
            InputEvent::PointerMove(point) => self.pointer = Some(point),
            InputEvent::PointerUp => self.pointer = None,
        }
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn release_pointer(&mut self) {
        self.pointer = None;
    }

    /// Shots requested since the last call: one per tap, plus one if the fire
    /// key went down (however often it repeated)
    pub fn take_fire_requests(&mut self) -> u32 {
        let requests = self.taps + u32::from(self.fire_latched);
        self.taps = 0;
        self.fire_latched = false;
        requests
    }
}

pub fn process_input(state: &mut InputState, receiver: &mut UnboundedReceiver<InputEvent>) {
    // try_next : Ok(Some) = event, Ok(None) = closed, Err = empty for now
    while let Ok(Some(event)) = receiver.try_next() {
        state.apply(event);
    }
}

/// Registers keyboard listeners on the window and touch listeners on the
/// canvas; every event lands in the returned channel
pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (sender, receiver) = unbounded();
    let window = browser::window()?;
    let canvas = browser::canvas()?;

    let keydown_sender = sender.clone();
    let on_keydown = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keydown_sender, InputEvent::KeyDown(event.key()));
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let keyup_sender = sender.clone();
    let on_keyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keyup_sender, InputEvent::KeyUp(event.key()));
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let touchstart_sender = sender.clone();
    let on_touchstart = browser::closure_wrap(Box::new(move |event: TouchEvent| {
        event.prevent_default();
        if let Some(point) = first_touch(&event) {
            send(&touchstart_sender, InputEvent::PointerDown(point));
        }
    }) as Box<dyn FnMut(TouchEvent)>);

    let touchmove_sender = sender.clone();
    let on_touchmove = browser::closure_wrap(Box::new(move |event: TouchEvent| {
        event.prevent_default();
        if let Some(point) = first_touch(&event) {
            send(&touchmove_sender, InputEvent::PointerMove(point));
        }
    }) as Box<dyn FnMut(TouchEvent)>);

    let on_touchend = browser::closure_wrap(Box::new(move |_event: TouchEvent| {
        send(&sender, InputEvent::PointerUp);
    }) as Box<dyn FnMut(TouchEvent)>);

    let listen = |target: &web_sys::EventTarget, name: &str, callback: &js_sys::Function| {
        target
            .add_event_listener_with_callback(name, callback)
            .map_err(|err| anyhow!("Cannot listen for '{}' : {:#?}", name, err))
    };
    listen(&window, "keydown", on_keydown.as_ref().unchecked_ref())?;
    listen(&window, "keyup", on_keyup.as_ref().unchecked_ref())?;
    listen(&canvas, "touchstart", on_touchstart.as_ref().unchecked_ref())?;
    listen(&canvas, "touchmove", on_touchmove.as_ref().unchecked_ref())?;
    listen(&canvas, "touchend", on_touchend.as_ref().unchecked_ref())?;

    // listeners live as long as the page
    on_keydown.forget();
    on_keyup.forget();
    on_touchstart.forget();
    on_touchmove.forget();
    on_touchend.forget();

    Ok(receiver)
}

fn first_touch(event: &TouchEvent) -> Option<Point> {
    event
        .touches()
        .get(0)
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
    if let Err(err) = sender.unbounded_send(event) {
        log::warn!("Input: dropped event : {:#?}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_key_repeats_collapse_into_one_request() {
        let mut input = InputState::default();
        input.apply(InputEvent::KeyDown(FIRE_KEY.to_string()));
        input.apply(InputEvent::KeyDown(FIRE_KEY.to_string()));

        assert_eq!(input.take_fire_requests(), 1);
        assert_eq!(input.take_fire_requests(), 0);
    }

    #[test]
    fn every_tap_fires_and_moves_the_pointer() {
        let mut input = InputState::default();
        input.apply(InputEvent::PointerDown(Point::new(10.0, 20.0)));
        input.apply(InputEvent::PointerDown(Point::new(30.0, 40.0)));

        assert_eq!(input.pointer(), Some(Point::new(30.0, 40.0)));
        assert_eq!(input.take_fire_requests(), 2);

        input.apply(InputEvent::PointerUp);
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn key_up_releases_the_key() {
        let mut input = InputState::default();
        input.apply(InputEvent::KeyDown("ArrowLeft".to_string()));
        assert!(input.is_pressed("ArrowLeft"));

        input.apply(InputEvent::KeyUp("ArrowLeft".to_string()));
        assert!(!input.is_pressed("ArrowLeft"));
    }

    #[test]
    fn process_input_drains_the_channel() {
        let (sender, mut receiver) = unbounded();
        sender
            .unbounded_send(InputEvent::KeyDown("ArrowUp".to_string()))
            .unwrap();
        sender
            .unbounded_send(InputEvent::PointerMove(Point::new(1.0, 2.0)))
            .unwrap();

        let mut input = InputState::default();
        process_input(&mut input, &mut receiver);

        assert!(input.is_pressed("ArrowUp"));
        assert_eq!(input.pointer(), Some(Point::new(1.0, 2.0)));
    }
}
