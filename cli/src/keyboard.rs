use std::collections::VecDeque;

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use vm8::{KeyEvent, KeyboardSource};

use crate::keymap::keymap;

/// Keypad input read from the SDL event queue.
///
/// Closing the window or pressing Escape asks the interpreter to stop.
pub struct SdlKeyboard {
    events: EventPump,
    pending: VecDeque<KeyEvent>,
    quit: bool,
}

impl SdlKeyboard {
    pub fn new(events: EventPump) -> Self {
        SdlKeyboard {
            events,
            pending: VecDeque::new(),
            quit: false,
        }
    }

    fn pump(&mut self) {
        while let Some(event) = self.events.poll_event() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.quit = true,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        self.pending.push_back(KeyEvent::press(kc));
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        self.pending.push_back(KeyEvent::release(kc));
                    }
                }
                _ => continue,
            }
        }
    }
}

impl KeyboardSource for SdlKeyboard {
    fn current_key_event(&mut self) -> Option<KeyEvent> {
        self.pump();
        let event = self.pending.pop_front();
        if let Some(event) = event {
            debug!("{:?}", event);
        }
        event
    }

    fn quit_requested(&mut self) -> bool {
        self.pump();
        self.quit
    }
}
