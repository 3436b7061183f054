use crate::constants::{DEFAULT_CLOCK_HZ, PROGRAM_START, TIMER_HZ};

/// Knobs for a single machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Where programs are loaded and execution starts
    pub load_offset: u16,
    /// Instructions executed per second
    pub clock_hz: u32,
    /// Rate of the timers and display flushes
    pub timer_hz: u32,
    /// Seed for Cxkk; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            load_offset: PROGRAM_START,
            clock_hz: DEFAULT_CLOCK_HZ,
            timer_hz: TIMER_HZ,
            seed: None,
        }
    }
}
