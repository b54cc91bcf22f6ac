use glam::Vec2;

use crate::{Board, InputState, Paddle, Params, RandomSource};

/// Ball state published to controllers each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Everything a controller may read while deciding its next move
pub struct ControlContext<'a> {
    pub ball: BallView,
    pub board: &'a Board,
    pub dt: f32,
    pub input: &'a InputState,
    pub rng: &'a mut dyn RandomSource,
}

/// Drives a paddle's vertical velocity
pub trait PaddleController: Send + Sync {
    /// Vertical displacement to apply to `paddle` this tick
    fn next_velocity(&mut self, paddle: &Paddle, ctx: &mut ControlContext<'_>) -> f32;

    /// Drop transient state; called on every serve and paddle reset
    fn reset(&mut self) {}

    /// The paddle was pinned against a wall and stopped
    fn on_wall_stop(&mut self) {}
}

/// Maps a human input axis to paddle movement
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanController;

impl HumanController {
    pub fn new() -> Self {
        Self
    }
}

impl PaddleController for HumanController {
    fn next_velocity(&mut self, paddle: &Paddle, ctx: &mut ControlContext<'_>) -> f32 {
        ctx.input.axis(paddle.owner) * ctx.dt * Params::HUMAN_PADDLE_GAIN
    }
}
