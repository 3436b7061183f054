use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;

use vm8::{Chip8, Config, SystemClock};
use vm8_display::SdlDisplay;

use crate::keyboard::SdlKeyboard;

pub fn run(rom: &Path, config: Config, scale: u32) -> Result<()> {
    let mut chip8 = Chip8::new(config);
    chip8.load(rom)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("initialising SDL")?;
    let mut display = SdlDisplay::new(&sdl, scale)?;
    let events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut keyboard = SdlKeyboard::new(events);
    let mut clock = SystemClock::new();

    info!(
        "running {} at {}Hz",
        rom.display(),
        chip8.config().clock_hz
    );
    chip8.run(&mut display, &mut keyboard, &mut clock)?;
    Ok(())
}
