mod common;
mod local;

pub use common::FrameClock;
pub use local::run_game_local;
