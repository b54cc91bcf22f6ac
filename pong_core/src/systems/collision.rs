use crate::{Ball, Board, Events, GameEvent, Paddle, Params, Side};
use glam::Vec2;
use hecs::World;

/// What the ball touched
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Wall,
    /// Paddle contact carries the paddle's per-tick vertical displacement
    Paddle { velocity: f32 },
}

/// Elastic reflection of `v` about the unit normal `n`
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - 2.0 * v.dot(n) * n
}

/// Raise |v.x| to at least `min`, keeping its sign (zero counts as positive)
pub fn apply_speed_floor(v: Vec2, min: f32) -> Vec2 {
    if v.x.abs() >= min {
        return v;
    }
    let x = if v.x >= 0.0 { min } else { -min };
    Vec2::new(x, v.y)
}

/// Post-contact ball velocity: reflect, enforce the speed floor, then add paddle spin
pub fn resolve_contact(v: Vec2, n: Vec2, contact: Contact, dt: f32) -> Vec2 {
    let mut out = apply_speed_floor(reflect(v, n), Params::MIN_H_SPEED);
    if let Contact::Paddle { velocity } = contact {
        if dt > 0.0 {
            out.y += velocity / (dt * Params::PADDLE_SPIN_DIVISOR);
        }
    }
    out
}

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, board: &Board, dt: f32, events: &mut Events) {
    // First, collect ball data without holding borrows
    let ball_data = {
        let mut ball_query = world.query::<&Ball>();
        ball_query
            .iter()
            .next()
            .map(|(_e, ball)| (ball.pos, ball.vel, ball.frozen))
    };

    let (mut ball_pos, mut ball_vel) = match ball_data {
        Some((pos, vel, false)) => (pos, vel),
        _ => return, // No ball, or parked for a serve
    };

    // Walls
    let limit = board.half_height();
    let wall_normal = if ball_pos.y >= limit && ball_vel.y > 0.0 {
        Some(Vec2::new(0.0, -1.0))
    } else if ball_pos.y <= -limit && ball_vel.y < 0.0 {
        Some(Vec2::new(0.0, 1.0))
    } else {
        None
    };

    if let Some(normal) = wall_normal {
        ball_vel = resolve_contact(ball_vel, normal, Contact::Wall, dt);
        events.push(GameEvent::WallHit);
    }
    ball_pos.y = board.clamp_ball_y(ball_pos.y);

    // Paddles
    let paddles: Vec<(Side, f32, f32)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| (p.side, p.y, p.vel))
        .collect();

    let reach_x = board.paddle_half_thickness + board.ball_radius;
    let reach_y = board.paddle_half_extent + board.ball_radius;

    for (side, paddle_y, paddle_vel) in paddles {
        let paddle_x = board.paddle_x(side);
        let dx = (ball_pos.x - paddle_x).abs();
        let dy = (ball_pos.y - paddle_y).abs();
        let approaching = ball_vel.x * side.direction() > 0.0;

        if dx <= reach_x && dy <= reach_y && approaching {
            let normal = Vec2::new(-side.direction(), 0.0);
            ball_vel = resolve_contact(
                ball_vel,
                normal,
                Contact::Paddle {
                    velocity: paddle_vel,
                },
                dt,
            );
            // Push the ball back out in front of the paddle face
            ball_pos.x = paddle_x - side.direction() * reach_x;
            events.push(GameEvent::PaddleHit {
                side,
                paddle_velocity: paddle_vel,
            });
            break;
        }
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos = ball_pos;
        ball.vel = ball_vel;
    }
}
