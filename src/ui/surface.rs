// Presentation adapter seams: drawing, input, timing
// All coordinates are in game units (the configured field size)

use std::io;
use std::time::Duration;

use crate::game::{InputEvent, Key};

pub type Rgb = [u8; 3];

/// Where a text item is placed relative to its (x, y) point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// x is the horizontal center, y the top line
    TopCenter,
    /// x and y are the center of the text block
    Center,
}

/// Fixed-size drawable area
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, anchor: Anchor, color: Rgb);
    /// Show everything drawn since the last `clear`.
    fn present(&mut self) -> io::Result<()>;
}

pub trait Controls {
    /// Drain the events that arrived since the previous call.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
    fn is_held(&self, key: Key) -> bool;
}

pub trait Clock {
    /// Block until the next frame is due.
    fn tick(&mut self);
    fn delay(&mut self, duration: Duration);
}
