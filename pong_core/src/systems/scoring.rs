use crate::{Ball, Board, Controller, Events, GameEvent, Paddle, Score, Side};
use hecs::World;

/// Check if the ball crossed a goal line; credits the scoring side and returns it
pub fn check_scoring(
    world: &mut World,
    board: &Board,
    score: &mut Score,
    events: &mut Events,
) -> Option<Side> {
    let scorer = world
        .query::<&Ball>()
        .iter()
        .next()
        .and_then(|(_e, ball)| {
            if ball.pos.x > board.goal_line_x {
                // Past the right paddle
                Some(Side::Left)
            } else if ball.pos.x < -board.goal_line_x {
                Some(Side::Right)
            } else {
                None
            }
        })?;

    let total = score.increment(scorer);
    events.push(GameEvent::ScoreChanged {
        side: scorer,
        score: total,
    });
    tracing::debug!(side = ?scorer, left = score.left, right = score.right, "goal scored");

    Some(scorer)
}

/// Send both paddles home and clear their controllers' transient state
pub fn reset_paddles(world: &mut World) {
    for (_entity, (paddle, controller)) in world.query_mut::<(&mut Paddle, &mut Controller)>() {
        paddle.reset_position();
        controller.0.reset();
    }
}
