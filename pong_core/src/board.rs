use crate::{Params, Side};

/// Static board geometry
#[derive(Debug, Clone)]
pub struct Board {
    pub paddle_plane_x: f32,
    pub goal_line_x: f32,
    pub wall_half_height: f32,
    pub paddle_half_extent: f32,
    pub paddle_half_thickness: f32,
    pub ball_radius: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            paddle_plane_x: Params::PADDLE_PLANE_X,
            goal_line_x: Params::GOAL_LINE_X,
            wall_half_height: Params::WALL_HALF_HEIGHT,
            paddle_half_extent: Params::PADDLE_HALF_EXTENT,
            paddle_half_thickness: Params::PADDLE_HALF_THICKNESS,
            ball_radius: Params::BALL_RADIUS,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Furthest |y| the ball centre reaches before touching a wall
    pub fn half_height(&self) -> f32 {
        self.wall_half_height - self.ball_radius
    }

    /// Full wall-to-wall span
    pub fn span(&self) -> f32 {
        2.0 * self.wall_half_height
    }

    /// Get X position of a paddle's plane
    pub fn paddle_x(&self, side: Side) -> f32 {
        side.direction() * self.paddle_plane_x
    }

    /// Largest legal |y| for a paddle centre
    pub fn paddle_limit(&self) -> f32 {
        self.half_height() - self.paddle_half_extent
    }

    /// Clamp paddle Y to the legal range
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let limit = self.paddle_limit();
        y.clamp(-limit, limit)
    }

    /// Clamp a vertical ball coordinate to the reachable range
    pub fn clamp_ball_y(&self, y: f32) -> f32 {
        let limit = self.half_height();
        y.clamp(-limit, limit)
    }
}
