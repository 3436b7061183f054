use crate::error::DisplayError;
use crate::frame::FrameBuffer;

/// # Display
/// Anything able to show a 64x32 monochrome frame.
///
/// The interpreter only calls `render` on a timer tick, never once per
/// instruction, so implementations may be slow.
pub trait DisplaySink {
    /// Blank the output
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Show `frame`, indexed as [y][x]
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}
