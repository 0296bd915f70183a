use std::io;

use crate::config::{CenterLineParity, Config};
use crate::game::{GameState, Side};

use super::surface::{Anchor, Surface};

const SCORE_TOP: f32 = 20.0;
const DASH_WIDTH: f32 = 10.0;
const DASH_START: u32 = 10;
const START_SCREEN_LINE_SPACING: f32 = 40.0;

/// Draw one frame of play: scores, paddles, center line, ball.
pub fn render(surface: &mut impl Surface, state: &GameState, config: &Config) -> io::Result<()> {
    let display = &config.display;
    let fg = display.foreground_color;

    surface.clear(display.background_color);

    let width = state.field_width;
    surface.draw_text(
        &state.scores.left.to_string(),
        width / 4.0,
        SCORE_TOP,
        Anchor::TopCenter,
        display.score_color,
    );
    surface.draw_text(
        &state.scores.right.to_string(),
        width * 3.0 / 4.0,
        SCORE_TOP,
        Anchor::TopCenter,
        display.score_color,
    );

    for paddle in [&state.left_paddle, &state.right_paddle] {
        surface.fill_rect(paddle.x, paddle.y, paddle.width, paddle.height, fg);
    }

    for (x, y, w, h) in center_line_segments(width, state.field_height, config.rules.center_line) {
        surface.fill_rect(x, y, w, h, fg);
    }

    let ball = &state.ball;
    surface.fill_circle(ball.x, ball.y, ball.radius, fg);

    surface.present()
}

/// Dashes of the center line as `(x, y, width, height)`.
///
/// Candidate dashes start at y = 10 and repeat every twentieth of the
/// field height; only those whose start row has the chosen parity are drawn.
pub fn center_line_segments(
    width: f32,
    height: f32,
    parity: CenterLineParity,
) -> Vec<(f32, f32, f32, f32)> {
    let step = (height / 20.0).floor().max(1.0) as u32;
    let x = (width / 2.0).floor() - DASH_WIDTH / 2.0;
    let wanted = match parity {
        CenterLineParity::Even => 0,
        CenterLineParity::Odd => 1,
    };

    (DASH_START..height as u32)
        .step_by(step as usize)
        .filter(|i| i % 2 == wanted)
        .map(|i| (x, i as f32, DASH_WIDTH, step as f32))
        .collect()
}

pub fn win_message(side: Side) -> String {
    format!("{} Player Won!", side.label())
}

/// Banner over whatever was drawn last; presented immediately.
pub fn render_win_banner(surface: &mut impl Surface, side: Side, config: &Config) -> io::Result<()> {
    let physics = &config.physics;
    surface.draw_text(
        &win_message(side),
        physics.width / 2.0,
        physics.height / 2.0,
        Anchor::Center,
        config.display.banner_color,
    );
    surface.present()
}

pub fn start_screen_lines(config: &Config) -> Vec<String> {
    vec![
        "Left player: W / S".to_string(),
        "Right player: Up / Down".to_string(),
        format!("First to {} points wins", config.physics.winning_score),
        "Press SPACE to begin".to_string(),
    ]
}

pub fn render_start_screen(surface: &mut impl Surface, config: &Config) -> io::Result<()> {
    let physics = &config.physics;
    let display = &config.display;
    let lines = start_screen_lines(config);

    surface.clear(display.background_color);

    let block_height = START_SCREEN_LINE_SPACING * (lines.len() - 1) as f32;
    let top = physics.height / 2.0 - block_height / 2.0;
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(
            line,
            physics.width / 2.0,
            top + START_SCREEN_LINE_SPACING * i as f32,
            Anchor::Center,
            display.foreground_color,
        );
    }

    surface.present()
}
