//! Deterministic core of a two-paddle Pong match.
//!
//! Everything a presentation layer needs lives here: board geometry, the
//! ball and paddle simulation, the AI opponent, the serve sequence and the
//! match state machine. Rendering, audio and input devices stay outside.

pub mod ai;
pub mod board;
pub mod components;
pub mod config;
pub mod controller;
pub mod fsm;
pub mod game;
pub mod params;
pub mod predictor;
pub mod resources;
pub mod serve;
pub mod systems;

pub use ai::*;
pub use board::*;
pub use components::*;
pub use config::*;
pub use controller::{BallView, ControlContext, HumanController, PaddleController};
pub use fsm::*;
pub use game::*;
pub use params::*;
pub use predictor::*;
pub use resources::*;
pub use serve::*;

use hecs::World;

/// Helper to create a paddle entity
pub fn create_paddle(
    world: &mut World,
    side: Side,
    owner: PaddleOwner,
    controller: Controller,
) -> hecs::Entity {
    world.spawn((Paddle::new(side, owner), controller))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}
