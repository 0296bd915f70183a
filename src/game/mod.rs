pub mod state;
pub mod physics;
pub mod input;

pub use state::{GameState, Side};
pub use physics::update;
pub use input::{apply_paddle_input, InputEvent, Key, PaddleInput};
