/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Start of the region programs may occupy; everything below is reserved
pub const PROGRAM_START: u16 = 0x200;

/// Where the hex font lives in memory
pub const FONT_ADDRESS: u16 = 0x000;

/// Bytes per font glyph
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Maximum depth of the call stack
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Instructions executed per second unless configured otherwise
pub const DEFAULT_CLOCK_HZ: u32 = 500;

/// Rate at which the timers count down and the display is flushed
pub const TIMER_HZ: u32 = 60;

/// # Sprite sheet
/// Built-in glyphs for the hex digits 0..F, 5 bytes each.
///
/// Each byte is one row of a 4 pixel wide glyph; only the high nibble is used.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
