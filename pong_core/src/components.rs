use glam::Vec2;
use serde::Serialize;

use crate::controller::PaddleController;

/// Which end of the board a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the paddle plane along x
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleOwner {
    HumanOne,
    HumanTwo,
    Ai,
}

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub owner: PaddleOwner,
    pub y: f32,
    /// Vertical displacement applied on the last tick
    pub vel: f32,
}

impl Paddle {
    pub fn new(side: Side, owner: PaddleOwner) -> Self {
        Self {
            side,
            owner,
            y: 0.0,
            vel: 0.0,
        }
    }

    /// Back to the home position at the centre line
    pub fn reset_position(&mut self) {
        self.y = 0.0;
        self.vel = 0.0;
    }
}

/// Ball component
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Set during the serve countdown; velocity is not integrated while frozen
    pub frozen: bool,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            frozen: false,
        }
    }

    /// Park the ball at the centre with a fresh serve velocity, frozen until released
    pub fn reset(&mut self, vel: Vec2) {
        self.pos = Vec2::ZERO;
        self.vel = vel;
        self.frozen = true;
    }
}

/// Boxed controller attached to each paddle entity
pub struct Controller(pub Box<dyn PaddleController>);

impl Controller {
    pub fn new(controller: impl PaddleController + 'static) -> Self {
        Self(Box::new(controller))
    }
}
