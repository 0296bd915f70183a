use super::state::{GameState, Paddle};

/// Keys the game reacts to, independent of the input backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Snapshot of which paddle keys are held this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl PaddleInput {
    pub fn from_held(is_held: impl Fn(Key) -> bool) -> Self {
        Self {
            left_up: is_held(Key::W),
            left_down: is_held(Key::S),
            right_up: is_held(Key::Up),
            right_down: is_held(Key::Down),
        }
    }
}

/// Move both paddles according to the held keys, never past the field edges.
///
/// Up and down are checked independently, so holding both keys moves the
/// paddle up and then back down.
pub fn apply_paddle_input(state: &mut GameState, input: &PaddleInput) {
    let field_height = state.field_height;
    move_paddle(&mut state.left_paddle, input.left_up, input.left_down, field_height);
    move_paddle(&mut state.right_paddle, input.right_up, input.right_down, field_height);
}

fn move_paddle(paddle: &mut Paddle, up: bool, down: bool, field_height: f32) {
    if up && paddle.y - paddle.velocity >= 0.0 {
        paddle.move_by(true);
    }
    if down && paddle.y + paddle.velocity + paddle.height <= field_height {
        paddle.move_by(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PhysicsConfig, RulesConfig};

    fn state() -> GameState {
        GameState::with_seed(&PhysicsConfig::default(), &RulesConfig::default(), 3)
    }

    #[test]
    fn test_from_held_maps_keys_to_paddles() {
        let input = PaddleInput::from_held(|key| matches!(key, Key::W | Key::Down));
        assert_eq!(
            input,
            PaddleInput {
                left_up: true,
                left_down: false,
                right_up: false,
                right_down: true,
            }
        );
    }

    #[test]
    fn test_paddles_move_independently() {
        let mut state = state();
        let input = PaddleInput {
            left_up: true,
            right_down: true,
            ..PaddleInput::default()
        };

        apply_paddle_input(&mut state, &input);

        assert_eq!(state.left_paddle.y, 196.0);
        assert_eq!(state.right_paddle.y, 204.0);
    }

    #[test]
    fn test_paddle_stops_at_top() {
        let mut state = state();
        state.left_paddle.y = 3.0;
        let input = PaddleInput {
            left_up: true,
            ..PaddleInput::default()
        };

        apply_paddle_input(&mut state, &input);
        assert_eq!(state.left_paddle.y, 3.0);

        state.left_paddle.y = 4.0;
        apply_paddle_input(&mut state, &input);
        assert_eq!(state.left_paddle.y, 0.0);
    }

    #[test]
    fn test_paddle_stops_at_bottom() {
        let mut state = state();
        state.right_paddle.y = 397.0;
        let input = PaddleInput {
            right_down: true,
            ..PaddleInput::default()
        };

        apply_paddle_input(&mut state, &input);
        assert_eq!(state.right_paddle.y, 397.0);
    }

    #[test]
    fn test_paddles_stay_on_screen_under_any_input() {
        let mut state = state();
        for frame in 0..2_000u32 {
            let input = PaddleInput {
                left_up: frame % 300 < 150,
                left_down: frame % 7 == 0,
                right_up: frame % 5 == 0,
                right_down: frame % 400 < 250,
            };
            apply_paddle_input(&mut state, &input);

            for paddle in [&state.left_paddle, &state.right_paddle] {
                assert!(paddle.y >= 0.0);
                assert!(paddle.y <= state.field_height - paddle.height);
            }
        }
    }
}
