// Pong configuration types
// Defaults reproduce the fixed arcade setup: 700x500 field, first to 10

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

pub const MAX_TARGET_FPS: u64 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Config {
    /// Reject geometry and timing values the game loop cannot run with.
    ///
    /// Called once at startup; a failure here is fatal.
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;

        ensure!(p.width > 0.0 && p.height > 0.0, "field must have a positive size");
        ensure!(p.winning_score > 0, "winning_score must be at least 1");
        ensure!(p.paddle_width > 0.0, "paddle_width must be positive");
        ensure!(
            p.paddle_height > 0.0 && p.paddle_height < p.height,
            "paddle_height ({}) must be positive and smaller than the field height ({})",
            p.paddle_height,
            p.height
        );
        ensure!(
            2.0 * (p.paddle_margin + p.paddle_width) < p.width,
            "paddles overlap: margin {} + width {} on both sides exceeds field width {}",
            p.paddle_margin,
            p.paddle_width,
            p.width
        );
        ensure!(p.paddle_margin >= 0.0, "paddle_margin must not be negative");
        ensure!(
            p.ball_radius > 0.0 && 2.0 * p.ball_radius < p.height,
            "ball_radius ({}) must be positive and fit inside the field",
            p.ball_radius
        );
        ensure!(p.ball_max_velocity > 0.0, "ball_max_velocity must be positive");
        ensure!(
            p.paddle_velocity > 0.0 && p.paddle_velocity < p.height - p.paddle_height,
            "paddle_velocity ({}) must be positive and smaller than the paddle's travel",
            p.paddle_velocity
        );
        ensure!(
            (1..=MAX_TARGET_FPS).contains(&self.display.target_fps),
            "target_fps ({}) must be between 1 and {}",
            self.display.target_fps,
            MAX_TARGET_FPS
        );

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Field size in game units
    pub width: f32,
    pub height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,

    // Gap between each paddle and its side wall
    pub paddle_margin: f32,

    pub ball_radius: f32,

    // Units moved per frame while a paddle key is held
    pub paddle_velocity: f32,

    // Horizontal ball speed, and the cap for deflected vertical speed
    pub ball_max_velocity: f32,

    // Points needed to win a match
    pub winning_score: u8,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
            paddle_width: 20.0,
            paddle_height: 100.0,
            paddle_margin: 10.0,
            ball_radius: 7.0,
            paddle_velocity: 4.0,
            ball_max_velocity: 5.0,
            winning_score: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Shown in the terminal title bar
    pub title: String,

    // Frames per second
    pub target_fps: u64,

    // How long the win banner stays up before the next match
    pub win_delay_ms: u64,

    // Terminals without key-release reporting: a key counts as held
    // for this long after its last press or repeat event
    pub key_hold_ms: u64,

    // RGB colors (0-255)
    pub background_color: [u8; 3],
    pub foreground_color: [u8; 3],
    pub score_color: [u8; 3],
    pub banner_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Pong".to_string(),
            target_fps: 60,
            win_delay_ms: 5000,
            key_hold_ms: 150,
            background_color: [0, 0, 0],
            foreground_color: [255, 255, 255],
            score_color: [255, 255, 255],
            banner_color: [255, 255, 255],
        }
    }
}

/// Which dashes of the center line are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterLineParity {
    Even,
    Odd,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    // Serve with a random vertical velocity instead of a flat one
    pub randomize_initial_y_vel: bool,

    // Show the instructions screen and wait for Space before the first match
    pub show_start_screen: bool,

    pub center_line: CenterLineParity,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            randomize_initial_y_vel: false,
            show_start_screen: true,
            center_line: CenterLineParity::Even,
        }
    }
}
