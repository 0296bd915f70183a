use std::io;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::game::{self, apply_paddle_input, GameState, InputEvent, Key, PaddleInput};
use crate::ui::{self, Clock, Controls, Surface};

/// Run local 2-player game until the player quits
pub fn run_game_local(
    surface: &mut impl Surface,
    controls: &mut impl Controls,
    clock: &mut impl Clock,
    config: &Config,
) -> io::Result<()> {
    if config.rules.show_start_screen && !wait_for_start(surface, controls, clock, config)? {
        info!("quit from start screen");
        return Ok(());
    }

    let mut game_state = GameState::new(&config.physics, &config.rules);
    play(surface, controls, clock, config, &mut game_state)
}

/// Show the instructions until Space is pressed. Returns false on quit.
fn wait_for_start(
    surface: &mut impl Surface,
    controls: &mut impl Controls,
    clock: &mut impl Clock,
    config: &Config,
) -> io::Result<bool> {
    info!("waiting on start screen");
    loop {
        clock.tick();
        ui::render_start_screen(surface, config)?;

        for event in controls.poll_events()? {
            match event {
                InputEvent::Quit => return Ok(false),
                InputEvent::KeyDown(Key::Space) => return Ok(true),
                InputEvent::KeyDown(_) => {}
            }
        }
    }
}

fn play(
    surface: &mut impl Surface,
    controls: &mut impl Controls,
    clock: &mut impl Clock,
    config: &Config,
    game_state: &mut GameState,
) -> io::Result<()> {
    let win_delay = Duration::from_millis(config.display.win_delay_ms);
    info!(winning_score = game_state.winning_score, "match started");

    loop {
        clock.tick();

        ui::render(surface, game_state, config)?;

        if controls.poll_events()?.contains(&InputEvent::Quit) {
            info!(
                left = game_state.scores.left,
                right = game_state.scores.right,
                "quit requested"
            );
            return Ok(());
        }

        let input = PaddleInput::from_held(|key| controls.is_held(key));
        apply_paddle_input(game_state, &input);

        let events = game::update(game_state);
        if events.any() {
            debug!(?events, "frame events");
        }

        if let Some(winner) = events.match_won {
            info!(winner = winner.label(), "match won");
            ui::render_win_banner(surface, winner, config)?;
            clock.delay(win_delay);
            game_state.reset_match();
            info!("match started");
        }
    }
}
