use log::debug;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::render::WindowCanvas;

use vm8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vm8::{DisplayError, DisplaySink, FrameBuffer};

const TITLE: &str = "vm8";

/// # Display
/// A window showing the 64x32 black/white frame, each pixel drawn as a
/// `scale` x `scale` square.
pub struct SdlDisplay {
    canvas: WindowCanvas,
}

impl SdlDisplay {
    /// Opens a window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video()?;
        let width = DISPLAY_WIDTH as u32 * scale;
        let height = DISPLAY_HEIGHT as u32 * scale;
        let window = video_subsystem
            .window(TITLE, width, height)
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| DisplayError(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| DisplayError(e.to_string()))?;
        debug!("opened {}x{} window", width, height);

        Ok(SdlDisplay { canvas })
    }

    /// Formats a FrameBuffer for rendering as an SDL2 RGB24 texture.
    ///
    /// The texture is the frame's rows concatenated, with every pixel
    /// repeated for its R, G and B bytes at full or zero intensity.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&on| std::iter::repeat(if on { 255 } else { 0 }).take(3))
            .collect()
    }
}

impl DisplaySink for SdlDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();
        self.canvas.present();
        Ok(())
    }

    fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| DisplayError(e.to_string()))?;

        let pixels = SdlDisplay::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: FrameBuffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[false, true]);
        frame[1][0..2].copy_from_slice(&[true, false]);
        let texture = SdlDisplay::frame_to_sdl_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_blank_frame_is_black() {
        let frame: FrameBuffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        let texture = SdlDisplay::frame_to_sdl_texture(&frame);
        assert_eq!(texture.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        assert!(texture.iter().all(|&b| b == 0));
    }
}
