use tracing::{debug, info};

use super::state::{Ball, GameState, Paddle, Side};

/// What happened during one physics step
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub wall_collision: bool,
    pub paddle_collision: Option<Side>,
    pub point_scored: Option<Side>,
    pub match_won: Option<Side>,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.wall_collision
            || self.paddle_collision.is_some()
            || self.point_scored.is_some()
            || self.match_won.is_some()
    }
}

/// Advance the ball one frame: move, bounce, score, check for a winner.
///
/// Paddles are not moved here; see `input::apply_paddle_input`.
pub fn update(state: &mut GameState) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    state.ball.step();

    events.wall_collision = bounce_off_walls(&mut state.ball, state.field_height);
    events.paddle_collision = check_paddle_collision(state);

    if state.ball.x < 0.0 {
        events.point_scored = Some(Side::Right);
    } else if state.ball.x > state.field_width {
        events.point_scored = Some(Side::Left);
    }

    if let Some(side) = events.point_scored {
        state.scores.add_point(side);
        state.reset_ball();
        info!(
            scorer = side.label(),
            left = state.scores.left,
            right = state.scores.right,
            "point scored"
        );
    }

    events.match_won = state.winner();
    events
}

/// Invert vertical velocity when the ball touches the floor or ceiling.
/// Position is left alone; the ball may poke past the edge for a frame.
fn bounce_off_walls(ball: &mut Ball, field_height: f32) -> bool {
    if ball.y + ball.radius >= field_height || ball.y - ball.radius <= 0.0 {
        ball.y_vel = -ball.y_vel;
        return true;
    }
    false
}

/// Only the paddle the ball is travelling towards is tested.
fn check_paddle_collision(state: &mut GameState) -> Option<Side> {
    let ball = &mut state.ball;

    if ball.x_vel < 0.0 {
        let paddle = &state.left_paddle;
        if in_paddle_range(ball, paddle) && ball.x - ball.radius <= paddle.right() {
            bounce_off_paddle(ball, paddle);
            debug!(y = ball.y, y_vel = ball.y_vel, "left paddle hit");
            return Some(Side::Left);
        }
    } else {
        let paddle = &state.right_paddle;
        if in_paddle_range(ball, paddle) && ball.x + ball.radius >= paddle.x {
            bounce_off_paddle(ball, paddle);
            debug!(y = ball.y, y_vel = ball.y_vel, "right paddle hit");
            return Some(Side::Right);
        }
    }

    None
}

fn in_paddle_range(ball: &Ball, paddle: &Paddle) -> bool {
    paddle.y <= ball.y && ball.y <= paddle.y + paddle.height
}

fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle) {
    ball.x_vel = -ball.x_vel;
    ball.y_vel = deflection(paddle, ball.y, ball.max_velocity);
}

/// Outgoing vertical velocity for a ball hitting `paddle` at `ball_y`.
///
/// Linear in the distance from the paddle's middle: zero at the center,
/// `max_velocity` in magnitude at either end. Hits above the middle send
/// the ball upwards.
pub fn deflection(paddle: &Paddle, ball_y: f32, max_velocity: f32) -> f32 {
    let offset = paddle.middle_y() - ball_y;
    let reduction_factor = (paddle.height / 2.0) / max_velocity;
    -(offset / reduction_factor)
}
