pub mod braille;
pub mod render;
pub mod surface;
pub mod terminal;

pub use render::{render, render_start_screen, render_win_banner};
pub use surface::{Clock, Controls, Surface};
pub use terminal::{TerminalControls, TerminalGuard, TerminalSurface};
