use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame
/// The 64x32 monochrome display buffer.
///
/// Sprites are XORed onto the frame; only `clear` ever overwrites it.
/// Drawing starts at the wrapped coordinates of the sprite's top left corner,
/// anything past the right or bottom edge is clipped rather than wrapped.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: FrameBuffer,
}

impl Frame {
    pub fn new() -> Self {
        Frame {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XOR `rows` onto the frame with the top left corner at (x, y).
    /// Returns whether any set pixel was hit.
    pub fn blit(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let x = x % DISPLAY_WIDTH;
        let y = y % DISPLAY_HEIGHT;
        let mut collided = false;

        for (dy, row) in rows.iter().enumerate() {
            let py = y + dy;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            for bit in 0..8 {
                let px = x + bit;
                if px >= DISPLAY_WIDTH {
                    break;
                }
                if (row >> (7 - bit)) & 1 == 1 {
                    let pixel = &mut self.pixels[py][px];
                    collided |= *pixel;
                    *pixel ^= true;
                }
            }
        }
        collided
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn pixels(&self) -> &FrameBuffer {
        &self.pixels
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
