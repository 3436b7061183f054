pub use chip8::{Chip8, Status, Step};
pub use clock::{Clock, ManualClock, Pacer, SystemClock};
pub use config::Config;
pub use display::DisplaySink;
pub use error::{DisplayError, Error, Fault, FaultKind, LoadError, Result};
pub use frame::{Frame, FrameBuffer};
pub use instruction::Instruction;
pub use keypad::{channel, KeyEvent, KeyReceiver, KeySender, KeyboardSource, Keypad};
pub use memory::Memory;
pub use opcode::Opcode;
pub use registers::Registers;

mod chip8;
mod clock;
mod config;
pub mod constants;
mod display;
mod error;
mod frame;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod registers;
mod state;
