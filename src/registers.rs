use crate::constants::STACK_DEPTH;
use crate::error::FaultKind;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register, clobbered by arithmetic and draws
/// - (i) a 16-bit memory address register, only the low 12 bits are kept
/// - (pc) a 16-bit program counter
/// - (stack) up to 16 return addresses; `sp` is the number in use
/// - 2 8-bit timers (delay & sound), both count down at 60Hz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    i: u16,
    pub pc: u16,
    sp: usize,
    stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: 0,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    /// Zero every register and empty the stack
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value & 0x0FFF;
    }

    /// Current call depth
    pub fn sp(&self) -> usize {
        self.sp
    }

    pub fn push(&mut self, return_address: u16) -> Result<(), FaultKind> {
        if self.sp == STACK_DEPTH {
            return Err(FaultKind::StackOverflow);
        }
        self.stack[self.sp] = return_address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, FaultKind> {
        if self.sp == 0 {
            return Err(FaultKind::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
