use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::frame::Frame;
use crate::memory::Memory;
use crate::registers::Registers;

/// Everything an instruction may read or write
///
/// ## CPU
/// - `registers` V0..VF, I, PC, the call stack and both timers
///
/// ## Memory
/// - 4096 bytes with the font in the reserved low region
///
/// ## Display
/// - 64x32 frame plus `draw_flag`, set whenever the frame changes and
///   cleared once it has been flushed
///
/// ## Randomness
/// - source for Cxkk, seedable so runs can be reproduced
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub frame: Frame,
    pub draw_flag: bool,
    pub rng: StdRng,
}

impl State {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        State {
            registers: Registers::new(),
            memory: Memory::new(),
            frame: Frame::new(),
            draw_flag: false,
            rng,
        }
    }
}
