use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, error, info, trace, warn};

use crate::clock::{Clock, Pacer};
use crate::config::Config;
use crate::display::DisplaySink;
use crate::error::{DisplayError, Error, Fault, LoadError};
use crate::frame::Frame;
use crate::instruction::Instruction;
use crate::keypad::{lowest_key, KeyEvent, Keypad, KeyboardSource};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::operations::{execute, Flow};
use crate::registers::Registers;
use crate::state::State;

/// Where the interpreter is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Blocked on Fx0A. `held` is the set of keys that were already down at
    /// the last poll and so can't satisfy the wait.
    WaitingForKey { register: u8, held: u16 },
    /// Terminal; no further instructions run
    Halted(Fault),
}

/// The outcome of a single cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// Still blocked on Fx0A
    Waiting,
    /// Fx0A was satisfied by this key
    KeyPressed(u8),
    /// The word matched no instruction and was skipped
    Unknown(Opcode),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`: registers, memory, frame
///  - `keypad` with public interfaces for manipulating it
///  - `status`: running, waiting for a key, or halted on a fault
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing the CPU and its timers
/// - running against a display, keyboard and clock until quit or halt
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    status: Status,
    config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        let mut state = State::new(config.seed);
        state.registers.pc = config.load_offset;
        Chip8 {
            state,
            keypad: Keypad::new(),
            status: Status::Running,
            config,
        }
    }

    /// Load a program from a file
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        info!("loading {}", path.display());
        let program = fs::read(path).map_err(|source| LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&program)
    }

    /// Load a program already in memory and point the PC at it
    pub fn load_bytes(&mut self, program: &[u8]) -> Result<(), LoadError> {
        let offset = self.config.load_offset;
        self.state.memory.load_program(offset, program)?;
        self.state.registers.pc = offset;
        info!("{} bytes loaded at {:#05X}", program.len(), offset);
        Ok(())
    }

    /// Back to power-on state with the loaded program still in memory
    pub fn reset(&mut self) {
        self.state.registers.reset();
        self.state.registers.pc = self.config.load_offset;
        self.state.frame.clear();
        self.state.draw_flag = true;
        self.keypad = Keypad::new();
        self.status = Status::Running;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn frame(&self) -> &Frame {
        &self.state.frame
    }

    /// Set the pressed status of key
    pub fn key_press(&mut self, key: u8) {
        self.keypad.apply(KeyEvent::press(key));
    }

    /// Unset the pressed status of key
    pub fn key_release(&mut self, key: u8) {
        self.keypad.apply(KeyEvent::release(key));
    }

    /// Bring the keypad up to date with everything `source` has queued
    pub fn sync_keys(&mut self, source: &mut dyn KeyboardSource) {
        self.keypad.sync(source);
    }

    /// Whether the buzzer should be sounding
    pub fn sound_active(&self) -> bool {
        self.state.registers.sound_timer != 0
    }

    /// Advances the CPU by a single cycle
    /// - re-polls the keypad if awaiting a keypress
    /// - otherwise fetches, decodes and executes the next opcode
    pub fn step(&mut self) -> Result<Step, Fault> {
        match self.status {
            Status::Halted(fault) => Err(fault),
            Status::WaitingForKey { register, held } => Ok(self.poll_key(register, held)),
            Status::Running => self.advance_cpu(),
        }
    }

    fn advance_cpu(&mut self) -> Result<Step, Fault> {
        let pc = self.state.registers.pc;
        let op = Opcode(self.state.memory.read_word(pc));
        self.state.registers.pc = pc.wrapping_add(2);
        trace!(
            "{} pc{:04X} v{:02X?} i{:04X}",
            op,
            pc,
            self.state.registers.v,
            self.state.registers.i()
        );

        let instruction = match Instruction::decode(op) {
            Some(instruction) => instruction,
            None => {
                warn!("unknown opcode {} at {:#05X}", op, pc);
                return Ok(Step::Unknown(op));
            }
        };

        match execute(instruction, &mut self.state, &self.keypad) {
            Ok(Flow::Next) => {}
            Ok(Flow::AwaitKey(register)) => {
                // stay on Fx0A until a key arrives
                self.state.registers.pc = pc;
                self.status = Status::WaitingForKey {
                    register,
                    held: self.keypad.pressed_mask(),
                };
                debug!("waiting for a key press into V{:X}", register);
            }
            Err(kind) => {
                let fault = Fault {
                    kind,
                    opcode: op.0,
                    pc,
                };
                error!("halting: {}", fault);
                self.status = Status::Halted(fault);
                return Err(fault);
            }
        }
        Ok(Step::Executed(instruction))
    }

    /// Only a key that went down since the last poll ends the wait
    fn poll_key(&mut self, register: u8, held: u16) -> Step {
        let pressed = self.keypad.pressed_mask();
        match lowest_key(pressed & !held) {
            Some(key) => {
                self.state.registers.v[register as usize] = key;
                self.state.registers.pc = self.state.registers.pc.wrapping_add(2);
                self.status = Status::Running;
                debug!("key {:X} pressed into V{:X}", key, register);
                Step::KeyPressed(key)
            }
            None => {
                self.status = Status::WaitingForKey {
                    register,
                    held: pressed,
                };
                Step::Waiting
            }
        }
    }

    /// One 60Hz timer period
    /// - decrements the delay and sound timers, stopping at 0
    pub fn tick(&mut self) {
        let registers = &mut self.state.registers;
        registers.delay_timer = registers.delay_timer.saturating_sub(1);
        registers.sound_timer = registers.sound_timer.saturating_sub(1);
    }

    /// Send the frame to `display` if it changed since the last flush
    fn flush(&mut self, display: &mut dyn DisplaySink, force: bool) -> Result<(), DisplayError> {
        if self.state.draw_flag || force {
            display.render(self.state.frame.pixels())?;
            self.state.draw_flag = false;
        }
        Ok(())
    }

    /// Run until `keyboard` asks to quit or the machine halts.
    ///
    /// Instructions run at `clock_hz`. Independently, at `timer_hz` the
    /// timers tick and the frame is flushed, including while blocked on a key.
    pub fn run(
        &mut self,
        display: &mut dyn DisplaySink,
        keyboard: &mut dyn KeyboardSource,
        clock: &mut dyn Clock,
    ) -> Result<(), Error> {
        let mut cpu = Pacer::new(self.config.clock_hz);
        let mut timers = Pacer::new(self.config.timer_hz);
        let start = clock.now();
        let mut first_frame = true;
        let mut buzzing = false;

        display.clear()?;
        loop {
            let now = clock.now().checked_sub(start).unwrap_or_default();

            let ticks = timers.due(now);
            if ticks > 0 {
                for _ in 0..ticks {
                    self.tick();
                }
                self.flush(display, first_frame)?;
                first_frame = false;

                if self.sound_active() != buzzing {
                    buzzing = !buzzing;
                    debug!("buzzer {}", if buzzing { "on" } else { "off" });
                }
            }

            for _ in 0..cpu.due(now) {
                if keyboard.quit_requested() {
                    info!("quit requested");
                    return Ok(());
                }
                self.sync_keys(keyboard);
                self.step()?;
            }

            let next = cpu.next_deadline().min(timers.next_deadline());
            if next > now {
                clock.sleep(next - now);
            }
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
