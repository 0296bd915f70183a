use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{PhysicsConfig, RulesConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Paddle position is its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    original_x: f32,
    original_y: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, velocity: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            velocity,
            original_x: x,
            original_y: y,
        }
    }

    /// Move one step. No clamping happens here; callers check bounds first.
    pub fn move_by(&mut self, up: bool) {
        if up {
            self.y -= self.velocity;
        } else {
            self.y += self.velocity;
        }
    }

    pub fn reset(&mut self) {
        self.x = self.original_x;
        self.y = self.original_y;
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn middle_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Ball position is its center. Horizontal speed is always exactly
/// `max_velocity`; only its sign changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub x_vel: f32,
    pub y_vel: f32,
    pub max_velocity: f32,
    original_x: f32,
    original_y: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, radius: f32, max_velocity: f32) -> Self {
        Self {
            x,
            y,
            radius,
            x_vel: max_velocity,
            y_vel: 0.0,
            max_velocity,
            original_x: x,
            original_y: y,
        }
    }

    pub fn step(&mut self) {
        self.x += self.x_vel;
        self.y += self.y_vel;
    }

    /// Back to the center, serving towards the side that just conceded.
    pub fn reset(&mut self, y_vel: f32) {
        self.x = self.original_x;
        self.y = self.original_y;
        self.x_vel = -self.x_vel;
        self.y_vel = y_vel;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub left: u32,
    pub right: u32,
}

impl Scores {
    pub fn add_point(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// Left is checked first, so it wins a (theoretical) tie.
    pub fn winner(&self, winning_score: u32) -> Option<Side> {
        if self.left >= winning_score {
            Some(Side::Left)
        } else if self.right >= winning_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub scores: Scores,
    pub field_width: f32,
    pub field_height: f32,
    pub winning_score: u32,
    pub randomize_y_vel: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new(physics: &PhysicsConfig, rules: &RulesConfig) -> Self {
        Self::with_rng(physics, rules, StdRng::from_entropy())
    }

    pub fn with_seed(physics: &PhysicsConfig, rules: &RulesConfig, seed: u64) -> Self {
        Self::with_rng(physics, rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(physics: &PhysicsConfig, rules: &RulesConfig, rng: StdRng) -> Self {
        let width = physics.width;
        let height = physics.height;

        // Whole-unit centering keeps positions on the integer grid
        let paddle_y = (height / 2.0).floor() - (physics.paddle_height / 2.0).floor();
        let left_paddle = Paddle::new(
            physics.paddle_margin,
            paddle_y,
            physics.paddle_width,
            physics.paddle_height,
            physics.paddle_velocity,
        );
        let right_paddle = Paddle::new(
            width - physics.paddle_margin - physics.paddle_width,
            paddle_y,
            physics.paddle_width,
            physics.paddle_height,
            physics.paddle_velocity,
        );

        let ball = Ball::new(
            (width / 2.0).floor(),
            (height / 2.0).floor(),
            physics.ball_radius,
            physics.ball_max_velocity,
        );

        let mut state = Self {
            ball,
            left_paddle,
            right_paddle,
            scores: Scores::default(),
            field_width: width,
            field_height: height,
            winning_score: u32::from(physics.winning_score),
            randomize_y_vel: rules.randomize_initial_y_vel,
            rng,
        };
        state.ball.y_vel = state.serve_y_vel();
        state
    }

    /// Vertical velocity for a fresh serve: flat, or a random whole number
    /// in `[-max, max]`.
    fn serve_y_vel(&mut self) -> f32 {
        if self.randomize_y_vel {
            let max = self.ball.max_velocity.trunc() as i32;
            self.rng.gen_range(-max..=max) as f32
        } else {
            0.0
        }
    }

    pub fn reset_ball(&mut self) {
        let y_vel = self.serve_y_vel();
        self.ball.reset(y_vel);
    }

    /// Reset scores, paddles and ball for a new match.
    pub fn reset_match(&mut self) {
        self.reset_ball();
        self.left_paddle.reset();
        self.right_paddle.reset();
        self.scores = Scores::default();
    }

    pub fn winner(&self) -> Option<Side> {
        self.scores.winner(self.winning_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_state() -> GameState {
        GameState::with_seed(&PhysicsConfig::default(), &RulesConfig::default(), 7)
    }

    #[test]
    fn test_initial_layout() {
        let state = default_state();

        assert_eq!(state.left_paddle.x, 10.0);
        assert_eq!(state.right_paddle.x, 670.0);
        assert_eq!(state.left_paddle.y, 200.0);
        assert_eq!(state.right_paddle.y, 200.0);

        assert_eq!((state.ball.x, state.ball.y), (350.0, 250.0));
        assert_eq!(state.ball.x_vel, 5.0);
        assert_eq!(state.ball.y_vel, 0.0);
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_paddle_reset_restores_constructed_position() {
        let mut paddle = Paddle::new(10.0, 200.0, 20.0, 100.0, 4.0);
        for _ in 0..7 {
            paddle.move_by(true);
        }
        paddle.move_by(false);
        assert_eq!(paddle.y, 176.0);

        paddle.reset();
        assert_eq!((paddle.x, paddle.y), (10.0, 200.0));
    }

    #[test]
    fn test_ball_reset_flips_direction_and_recenters() {
        let mut state = default_state();
        state.ball.x = -3.0;
        state.ball.y = 40.0;
        state.ball.y_vel = 2.5;

        state.reset_ball();

        assert_eq!((state.ball.x, state.ball.y), (350.0, 250.0));
        assert_eq!(state.ball.x_vel, -5.0);
        assert_eq!(state.ball.y_vel, 0.0);
    }

    #[test]
    fn test_random_serve_stays_in_range() {
        let rules = RulesConfig {
            randomize_initial_y_vel: true,
            ..RulesConfig::default()
        };
        let mut state = GameState::with_seed(&PhysicsConfig::default(), &rules, 42);

        for _ in 0..200 {
            state.reset_ball();
            let y_vel = state.ball.y_vel;
            assert!((-5.0..=5.0).contains(&y_vel));
            assert_eq!(y_vel, y_vel.trunc());
            assert_eq!(state.ball.x_vel.abs(), 5.0);
        }
    }

    #[test]
    fn test_scores_winner() {
        let mut scores = Scores::default();
        for _ in 0..9 {
            scores.add_point(Side::Right);
        }
        assert_eq!(scores.winner(10), None);
        scores.add_point(Side::Right);
        assert_eq!(scores.winner(10), Some(Side::Right));
    }

    #[test]
    fn test_reset_match_clears_everything() {
        let mut state = default_state();
        state.scores = Scores { left: 10, right: 4 };
        state.left_paddle.y = 0.0;
        state.right_paddle.y = 400.0;

        state.reset_match();

        assert_eq!(state.scores, Scores::default());
        assert_eq!((state.left_paddle.x, state.left_paddle.y), (10.0, 200.0));
        assert_eq!((state.right_paddle.x, state.right_paddle.y), (670.0, 200.0));
        assert_eq!((state.ball.x, state.ball.y), (350.0, 250.0));
    }
}
