//! Difficulty-tiered AI paddle.
//!
//! The AI keeps a scalar speed that changes by at most one acceleration step
//! per tick. When the ball enters its detection zone the medium and hard tiers
//! predict where the ball will cross the paddle plane and steer for that
//! point; the easy tier (and a clumsy medium roll) chases the ball's live
//! position instead.

use crate::controller::{ControlContext, PaddleController};
use crate::predictor::predict_crossing;
use crate::{Difficulty, Paddle, Params, TierParams};

/// Snapshot taken when the ball entered the detection zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionState {
    /// Predicted crossing coordinate; `None` until the trajectory is predictable
    pub target_y: Option<f32>,
    /// Paddle position when detection began
    pub start_y: f32,
    /// Single uniform draw deciding how a medium AI reacts to this ball
    pub decision_roll: f32,
}

/// AI paddle controller
#[derive(Debug, Clone)]
pub struct AiController {
    difficulty: Difficulty,
    params: TierParams,
    speed: f32,
    in_zone: bool,
    prediction: Option<PredictionState>,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            params: difficulty.params(),
            speed: 0.0,
            in_zone: false,
            prediction: None,
        }
    }

    pub fn prediction(&self) -> Option<PredictionState> {
        self.prediction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    fn predicts(&self) -> bool {
        matches!(self.difficulty, Difficulty::Medium | Difficulty::Hard)
    }

    fn predict(&self, paddle: &Paddle, ctx: &ControlContext<'_>) -> Option<f32> {
        let dx = ctx.board.paddle_x(paddle.side) - ctx.ball.pos.x;
        predict_crossing(
            dx,
            ctx.ball.vel,
            ctx.ball.pos.y,
            ctx.board.half_height(),
            ctx.board.span(),
        )
        .map(|y| ctx.board.clamp_ball_y(y))
    }

    fn on_detect(&mut self, paddle: &Paddle, ctx: &mut ControlContext<'_>) {
        if !self.predicts() {
            return;
        }
        let target_y = self.predict(paddle, ctx);
        let decision_roll = ctx.rng.next_unit();
        tracing::trace!(
            difficulty = %self.difficulty,
            ?target_y,
            decision_roll,
            "ball entered detection zone"
        );
        self.prediction = Some(PredictionState {
            target_y,
            start_y: paddle.y,
            decision_roll,
        });
    }

    fn accelerated(&self, upward: bool, dt: f32, limit: f32) -> f32 {
        let step = self.params.acceleration * dt;
        let speed = if upward {
            self.speed + step
        } else {
            self.speed - step
        };
        speed.clamp(-limit, limit)
    }

    /// Chase the ball's live vertical position
    fn track_ball(&self, paddle: &Paddle, ctx: &ControlContext<'_>) -> f32 {
        let target = ctx.ball.pos.y;
        if (target - paddle.y).abs() < Params::AI_TARGET_TOLERANCE {
            return 0.0;
        }
        self.accelerated(target > paddle.y, ctx.dt, Params::AI_TRACK_SPEED_LIMIT)
    }

    /// Accelerate towards the predicted point until halfway there, then brake
    fn track_prediction(&self, paddle: &Paddle, target: f32, start: f32, dt: f32) -> f32 {
        if (target - paddle.y).abs() < Params::AI_TARGET_TOLERANCE {
            return 0.0;
        }
        // Below the midpoint this either speeds an upward move or brakes a downward one
        let midpoint = (start + target) / 2.0;
        self.accelerated(paddle.y < midpoint, dt, Params::AI_PREDICTED_SPEED_LIMIT)
    }

    /// Bring the paddle to rest gradually once the ball is heading away
    fn decelerate(&self, dt: f32) -> f32 {
        if self.speed < -Params::AI_STOP_THRESHOLD {
            self.accelerated(true, dt, Params::AI_TRACK_SPEED_LIMIT)
        } else if self.speed > Params::AI_STOP_THRESHOLD {
            self.accelerated(false, dt, Params::AI_TRACK_SPEED_LIMIT)
        } else {
            0.0
        }
    }
}

impl PaddleController for AiController {
    fn next_velocity(&mut self, paddle: &Paddle, ctx: &mut ControlContext<'_>) -> f32 {
        let paddle_pos = glam::Vec2::new(ctx.board.paddle_x(paddle.side), paddle.y);
        let inside = ctx.ball.pos.distance(paddle_pos) <= self.params.detection_radius;
        if inside && !self.in_zone {
            self.on_detect(paddle, ctx);
        }
        self.in_zone = inside;

        // Retry a prediction that was deferred for lack of horizontal speed
        if inside && self.predicts() {
            if let Some(state) = self.prediction.filter(|s| s.target_y.is_none()) {
                let target_y = self.predict(paddle, ctx);
                self.prediction = Some(PredictionState { target_y, ..state });
            }
        }

        let heading_here = ctx.ball.vel.x * paddle.side.direction() >= 0.0;
        if !heading_here {
            self.speed = self.decelerate(ctx.dt);
            return self.speed * ctx.dt * Params::AI_PADDLE_GAIN;
        }
        if !inside {
            return paddle.vel;
        }

        let clumsy = match self.difficulty {
            Difficulty::Easy => true,
            Difficulty::Medium => self
                .prediction
                .map_or(true, |s| s.decision_roll <= Params::AI_DECISION_THRESHOLD),
            Difficulty::Hard => false,
        };

        self.speed = if clumsy {
            self.track_ball(paddle, ctx)
        } else {
            match self.prediction {
                Some(PredictionState {
                    target_y: Some(target),
                    start_y,
                    ..
                }) => self.track_prediction(paddle, target, start_y, ctx.dt),
                // Not predictable yet: hold the current motion
                _ => return paddle.vel,
            }
        };
        self.speed * ctx.dt * Params::AI_PADDLE_GAIN
    }

    fn reset(&mut self) {
        self.speed = 0.0;
        self.in_zone = false;
        self.prediction = None;
    }

    fn on_wall_stop(&mut self) {
        self.speed = 0.0;
    }
}
