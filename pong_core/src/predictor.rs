//! Ball trajectory prediction for the AI paddle.

use glam::Vec2;

use crate::Params;

/// Predict the vertical coordinate at which the ball crosses a paddle plane.
///
/// * `dx` - horizontal distance from the ball to the plane
/// * `vel` - current ball velocity
/// * `y0` - current vertical ball position
/// * `half_height` - largest |y| the crossing can take without bouncing
/// * `span` - wall-to-wall distance folded away per traversal
///
/// A projection that leaves the field by less than a full span is mirrored
/// off the wall it hits. Longer projections cross the board at least once and
/// are shifted one span at a time towards the centre until they lie inside
/// the walls. Returns `None` while the horizontal speed is too small to
/// project.
pub fn predict_crossing(dx: f32, vel: Vec2, y0: f32, half_height: f32, span: f32) -> Option<f32> {
    if vel.x.abs() < Params::PREDICTION_MIN_VX {
        return None;
    }

    let scalar = dx.abs() / vel.x.abs();
    let projected = scalar * vel.y;
    let mut y = y0 + projected;

    if y.abs() < half_height {
        return Some(y);
    }

    if projected.abs() < span {
        // Single bounce off the wall the ball is heading for
        let wall = if projected > 0.0 { half_height } else { -half_height };
        return Some((2.0 * wall - y).clamp(-half_height, half_height));
    }

    // Jump straight to the last fold, then settle any rounding one span at a time
    let folds = ((y.abs() - half_height) / span).floor();
    if y > 0.0 {
        y -= folds * span;
        while y >= half_height {
            y -= span;
        }
    } else {
        y += folds * span;
        while y <= -half_height {
            y += span;
        }
    }

    Some(y.clamp(-half_height, half_height))
}
