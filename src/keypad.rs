use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// The keypad only knows which of the 16 keys are held right now; it is
/// brought up to date from a `KeyboardSource` before each cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    pressed: u16,
}

/// A key changing state, already translated to the 0x0..0xF key space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: u8,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(key: u8) -> Self {
        KeyEvent { key, pressed: true }
    }

    pub fn release(key: u8) -> Self {
        KeyEvent {
            key,
            pressed: false,
        }
    }
}

/// Anything that can report key presses to the interpreter.
///
/// Raw symbols that don't map onto the keypad should never be reported.
pub trait KeyboardSource {
    /// The next pending key event, without blocking
    fn current_key_event(&mut self) -> Option<KeyEvent>;

    /// Whether the user asked to stop the machine
    fn quit_requested(&mut self) -> bool;
}

impl Keypad {
    pub fn new() -> Self {
        Keypad { pressed: 0 }
    }

    /// Record a press or release; keys outside 0x0..0xF are ignored
    pub fn apply(&mut self, event: KeyEvent) {
        if event.key > 0xF {
            return;
        }
        let bit = 1 << event.key;
        if event.pressed {
            self.pressed |= bit;
        } else {
            self.pressed &= !bit;
        }
    }

    /// Drain every pending event from `source`.
    ///
    /// Events are applied in order and only the resulting state is kept, so a
    /// press and release queued between two cycles leave the key up and are
    /// never seen by a key wait.
    pub fn sync(&mut self, source: &mut dyn KeyboardSource) {
        while let Some(event) = source.current_key_event() {
            self.apply(event);
        }
    }

    pub fn is_down(&self, key: u8) -> bool {
        key <= 0xF && self.pressed & (1 << key) != 0
    }

    /// The lowest key currently held, if any
    pub fn poll_pressed_key(&self) -> Option<u8> {
        lowest_key(self.pressed)
    }

    /// Every key's state as a bitmask, bit n set when key n is held
    pub fn pressed_mask(&self) -> u16 {
        self.pressed
    }
}

pub(crate) fn lowest_key(mask: u16) -> Option<u8> {
    if mask == 0 {
        None
    } else {
        Some(mask.trailing_zeros() as u8)
    }
}

enum Input {
    Key(KeyEvent),
    Quit,
}

/// Producer half of `channel`; can be moved to an input thread
#[derive(Clone)]
pub struct KeySender {
    tx: Sender<Input>,
}

impl KeySender {
    pub fn press(&self, key: u8) {
        self.send(Input::Key(KeyEvent::press(key)));
    }

    pub fn release(&self, key: u8) {
        self.send(Input::Key(KeyEvent::release(key)));
    }

    pub fn request_quit(&self) {
        self.send(Input::Quit);
    }

    fn send(&self, input: Input) {
        // the receiver is gone once the machine stops, nothing is listening
        let _ = self.tx.send(input);
    }
}

/// Consumer half of `channel`, read by the interpreter without blocking
pub struct KeyReceiver {
    rx: Receiver<Input>,
    pending: VecDeque<KeyEvent>,
    quit: bool,
}

impl KeyReceiver {
    /// Move everything the producer has sent so far into `pending`
    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(Input::Key(event)) => self.pending.push_back(event),
                Ok(Input::Quit) => self.quit = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.quit = true;
                    break;
                }
            }
        }
    }
}

impl KeyboardSource for KeyReceiver {
    fn current_key_event(&mut self) -> Option<KeyEvent> {
        self.drain();
        self.pending.pop_front()
    }

    /// Also true once every `KeySender` has been dropped
    fn quit_requested(&mut self) -> bool {
        self.drain();
        self.quit
    }
}

/// A keyboard source fed from another thread
pub fn channel() -> (KeySender, KeyReceiver) {
    let (tx, rx) = mpsc::channel();
    let receiver = KeyReceiver {
        rx,
        pending: VecDeque::new(),
        quit: false,
    };
    (KeySender { tx }, receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.apply(KeyEvent::press(0xE));
        assert!(keypad.is_down(0xE));
        assert!(!keypad.is_down(0x1));
        keypad.apply(KeyEvent::release(0xE));
        assert!(!keypad.is_down(0xE));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut keypad = Keypad::new();
        keypad.apply(KeyEvent::press(0x10));
        assert_eq!(keypad.pressed_mask(), 0);
        assert!(!keypad.is_down(0x10));
    }

    #[test]
    fn test_poll_returns_lowest_key() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.poll_pressed_key(), None);
        keypad.apply(KeyEvent::press(0xA));
        keypad.apply(KeyEvent::press(0x3));
        assert_eq!(keypad.poll_pressed_key(), Some(0x3));
    }

    #[test]
    fn test_sync_from_channel() {
        let (tx, mut rx) = channel();
        tx.press(0x5);
        tx.press(0x6);
        tx.release(0x5);
        let mut keypad = Keypad::new();
        keypad.sync(&mut rx);
        assert_eq!(keypad.pressed_mask(), 1 << 0x6);
        assert!(!rx.quit_requested());
    }

    #[test]
    fn test_quit_from_another_thread() {
        let (tx, mut rx) = channel();
        let producer = thread::spawn(move || {
            tx.press(0x1);
            tx.request_quit();
        });
        producer.join().unwrap();
        assert!(rx.quit_requested());
        // the key sent before quitting is still delivered
        assert_eq!(rx.current_key_event(), Some(KeyEvent::press(0x1)));
        assert_eq!(rx.current_key_event(), None);
    }

    #[test]
    fn test_dropped_sender_means_quit() {
        let (tx, mut rx) = channel();
        drop(tx);
        assert!(rx.quit_requested());
    }
}
