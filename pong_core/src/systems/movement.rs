use crate::controller::{BallView, ControlContext};
use crate::{Ball, Board, Controller, InputState, Paddle, RandomSource};
use hecs::World;

/// Move the ball unless it is frozen for a serve
pub fn move_ball(world: &mut World, dt: f32) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if !ball.frozen {
            ball.pos += ball.vel * dt;
        }
    }
}

/// Ask each paddle's controller for a velocity and apply it within the board
pub fn move_paddles(
    world: &mut World,
    board: &Board,
    input: &InputState,
    rng: &mut dyn RandomSource,
    dt: f32,
) {
    let ball = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| BallView {
            pos: ball.pos,
            vel: ball.vel,
        })
    };

    let Some(ball) = ball else {
        return;
    };

    let mut ctx = ControlContext {
        ball,
        board,
        dt,
        input,
        rng,
    };

    for (_entity, (paddle, controller)) in world.query_mut::<(&mut Paddle, &mut Controller)>() {
        let vel = controller.0.next_velocity(paddle, &mut ctx);
        let target = paddle.y + vel;
        let clamped = board.clamp_paddle_y(target);

        if clamped != target {
            // Pinned against a wall
            paddle.vel = 0.0;
            controller.0.on_wall_stop();
        } else {
            paddle.vel = vel;
        }
        paddle.y = clamped;

        debug_assert!(
            paddle.y.abs() <= board.paddle_limit(),
            "paddle escaped the board: {}",
            paddle.y
        );
    }
}
