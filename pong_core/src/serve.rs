//! Serve sequencing and serve velocity randomisation.

use glam::Vec2;

use crate::{Params, RandomSource};

/// Draw a horizontal serve factor in [-0.42, 0.42] outside the (-0.3, 0.3) dead zone
pub fn horizontal_factor(rng: &mut dyn RandomSource) -> f32 {
    loop {
        let factor = rng.next_unit() - Params::SERVE_H_OFFSET;
        let in_range = (-Params::SERVE_H_OFFSET..=Params::SERVE_H_OFFSET).contains(&factor);
        let in_dead_zone = factor > -Params::SERVE_H_DEAD_ZONE && factor < Params::SERVE_H_DEAD_ZONE;
        if in_range && !in_dead_zone {
            return factor;
        }
    }
}

/// Draw a vertical serve factor.
///
/// Draws above the 0.15 ceiling are rejected along with anything outside
/// [-0.32, 0.32], so accepted factors lie in [-0.32, 0.15]. There is no
/// dead zone around zero on this axis.
pub fn vertical_factor(rng: &mut dyn RandomSource) -> f32 {
    loop {
        let factor = rng.next_unit() - Params::SERVE_V_OFFSET;
        let in_range = (-Params::SERVE_V_OFFSET..=Params::SERVE_V_OFFSET).contains(&factor);
        if in_range && factor <= Params::SERVE_V_CEILING {
            return factor;
        }
    }
}

/// Fresh serve velocity for the given speed bounds
pub fn serve_velocity(rng: &mut dyn RandomSource, h_max: f32, v_max: f32) -> Vec2 {
    let fx = horizontal_factor(rng);
    let fy = vertical_factor(rng);
    Vec2::new(fx * h_max, fy * v_max)
}

/// Current phase of the serve countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServePhase {
    Idle,
    /// Ball frozen and the clock held; `announce` shows "Ready?" / "GO!"
    Ready { remaining: f32, announce: bool },
    /// "GO!" on screen, match already playing, ball still frozen
    Go { remaining: f32 },
}

/// What the serve sequence did on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeStep {
    Waiting,
    /// Ready elapsed on an announced serve: show "GO!" and start playing
    Go,
    /// Sequence finished: clear the display and release the ball
    Released,
}

/// Explicit serve timer, advanced once per tick
#[derive(Debug, Clone, Copy)]
pub struct ServeSequence {
    phase: ServePhase,
}

impl Default for ServeSequence {
    fn default() -> Self {
        Self {
            phase: ServePhase::Idle,
        }
    }
}

impl ServeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ServePhase {
        self.phase
    }

    pub fn begin(&mut self, announce: bool) {
        self.phase = ServePhase::Ready {
            remaining: Params::SERVE_READY_DURATION,
            announce,
        };
    }

    pub fn cancel(&mut self) {
        self.phase = ServePhase::Idle;
    }

    pub fn is_running(&self) -> bool {
        self.phase != ServePhase::Idle
    }

    /// The clock is held near zero while waiting on "Ready?"
    pub fn holds_clock(&self) -> bool {
        matches!(self.phase, ServePhase::Ready { .. })
    }

    pub fn advance(&mut self, dt: f32) -> ServeStep {
        match self.phase {
            ServePhase::Idle => ServeStep::Waiting,
            ServePhase::Ready {
                remaining,
                announce,
            } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = ServePhase::Ready {
                        remaining,
                        announce,
                    };
                    ServeStep::Waiting
                } else if announce {
                    self.phase = ServePhase::Go {
                        remaining: Params::SERVE_GO_DURATION,
                    };
                    ServeStep::Go
                } else {
                    self.phase = ServePhase::Idle;
                    ServeStep::Released
                }
            }
            ServePhase::Go { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = ServePhase::Go { remaining };
                    ServeStep::Waiting
                } else {
                    self.phase = ServePhase::Idle;
                    ServeStep::Released
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameRng, ScriptedRandom};
    use proptest::prelude::*;

    #[test]
    fn test_horizontal_factor_rejects_dead_zone() {
        // 0.5 - 0.42 = 0.08 sits in the dead zone, 0.9 - 0.42 = 0.48 is out of range
        let mut rng = ScriptedRandom::new(vec![0.5, 0.9, 0.05]);
        let factor = horizontal_factor(&mut rng);
        assert!((factor - (-0.37)).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_factor_rejects_above_ceiling() {
        // 0.6 - 0.32 = 0.28 is in range but above the ceiling
        let mut rng = ScriptedRandom::new(vec![0.6, 0.40]);
        let factor = vertical_factor(&mut rng);
        assert!((factor - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_factor_accepts_near_zero() {
        let mut rng = ScriptedRandom::new(vec![0.32]);
        assert!(vertical_factor(&mut rng).abs() < 1e-6);
    }

    #[test]
    fn test_serve_bounds_over_many_draws() {
        let mut rng = GameRng::new(99);
        for _ in 0..10_000 {
            let vel = serve_velocity(&mut rng, 10.0, 5.0);
            assert!(vel.x.abs() <= 4.2 + 1e-5, "horizontal {} out of range", vel.x);
            assert!(vel.x.abs() >= 3.0 - 1e-5, "horizontal {} in dead zone", vel.x);
            assert!(
                vel.y >= -1.6 - 1e-5 && vel.y <= 0.75 + 1e-5,
                "vertical {} out of range",
                vel.y
            );
        }
    }

    #[test]
    fn test_unannounced_serve_releases_after_ready() {
        let mut serve = ServeSequence::new();
        serve.begin(false);
        assert!(serve.holds_clock());

        let mut steps = 0;
        let mut last = ServeStep::Waiting;
        while serve.is_running() {
            last = serve.advance(0.25);
            steps += 1;
        }

        assert_eq!(last, ServeStep::Released);
        assert_eq!(steps, 6, "1.5s at 0.25s per tick");
    }

    #[test]
    fn test_announced_serve_goes_then_releases() {
        let mut serve = ServeSequence::new();
        serve.begin(true);

        let mut seen = Vec::new();
        while serve.is_running() {
            let step = serve.advance(0.25);
            if step != ServeStep::Waiting {
                seen.push(step);
            }
            if step == ServeStep::Go {
                assert!(!serve.holds_clock(), "clock runs during GO!");
            }
        }

        assert_eq!(seen, vec![ServeStep::Go, ServeStep::Released]);
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut serve = ServeSequence::new();
        assert_eq!(serve.advance(1.0), ServeStep::Waiting);
        assert_eq!(serve.phase(), ServePhase::Idle);
    }

    proptest! {
        #[test]
        fn prop_serve_factors_in_bounds(seed in any::<u64>()) {
            let mut rng = GameRng::new(seed);
            let fx = horizontal_factor(&mut rng);
            let fy = vertical_factor(&mut rng);
            prop_assert!((-0.42..=0.42).contains(&fx));
            prop_assert!(fx <= -0.3 || fx >= 0.3);
            prop_assert!((-0.32..=0.15).contains(&fy));
        }
    }
}
