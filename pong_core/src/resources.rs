use rand::Rng;
use serde::Serialize;

use crate::{PaddleOwner, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,    // Real delta time for this step
    pub now: f32,   // Total elapsed real time
    pub scale: f32, // Clock scale: 0 while paused, near zero during a serve
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self {
            dt,
            now,
            scale: 1.0,
        }
    }

    /// Delta time as seen by the ball and paddles
    pub fn scaled_dt(&self) -> f32 {
        self.dt * self.scale
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(crate::Params::FIXED_DT, 0.0)
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a goal for `side` and return its new total
    pub fn increment(&mut self, side: Side) -> u32 {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot += 1;
        *slot
    }

    /// A side wins when its score equals the threshold exactly
    pub fn has_winner(&self, win_threshold: u32) -> Option<Side> {
        if self.left == win_threshold {
            Some(Side::Left)
        } else if self.right == win_threshold {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Source of uniform random draws consumed by the simulation
pub trait RandomSource {
    /// Uniform draw in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Uniform index in [0, len)
    fn next_index(&mut self, len: usize) -> usize;
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn next_index(&mut self, len: usize) -> usize {
        let unit = self.next_unit();
        ((unit * len as f32) as usize).min(len.saturating_sub(1))
    }
}

/// Per-tick input axes for the human paddles
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    axes: [f32; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a human axis; values are clamped to [-1, 1]
    pub fn set_axis(&mut self, owner: PaddleOwner, value: f32) {
        match owner {
            PaddleOwner::HumanOne => self.axes[0] = value.clamp(-1.0, 1.0),
            PaddleOwner::HumanTwo => self.axes[1] = value.clamp(-1.0, 1.0),
            PaddleOwner::Ai => {}
        }
    }

    pub fn axis(&self, owner: PaddleOwner) -> f32 {
        match owner {
            PaddleOwner::HumanOne => self.axes[0],
            PaddleOwner::HumanTwo => self.axes[1],
            PaddleOwner::Ai => 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.axes = [0.0; 2];
    }
}

/// Something that happened during a frame, for presentation and audio
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    WallHit,
    PaddleHit { side: Side, paddle_velocity: f32 },
    Goal { side: Side },
    ServeReady,
    ServeGo,
    ServeClear,
    ScoreChanged { side: Side, score: u32 },
    Win { side: Side },
    PauseToggled { paused: bool },
    Comment { side: Side, text: String },
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub list: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.list.push(event);
    }

    /// Hand over the collected events, leaving the list empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.list)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.list.iter()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.list.contains(event)
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new();
        assert_eq!(score.increment(Side::Left), 1);
        assert_eq!(score.increment(Side::Left), 2);
        assert_eq!(score.increment(Side::Right), 1);
        assert_eq!(score.get(Side::Left), 2);
        assert_eq!(score.get(Side::Right), 1);
    }

    #[test]
    fn test_score_has_winner_left() {
        let mut score = Score::new();
        for _ in 0..5 {
            score.increment(Side::Left);
        }
        assert_eq!(
            score.has_winner(5),
            Some(Side::Left),
            "Left player should win at 5"
        );
    }

    #[test]
    fn test_score_has_winner_right() {
        let mut score = Score::new();
        for _ in 0..10 {
            score.increment(Side::Right);
        }
        assert_eq!(score.has_winner(10), Some(Side::Right));
    }

    #[test]
    fn test_score_no_winner_below_threshold() {
        let mut score = Score::new();
        for _ in 0..4 {
            score.increment(Side::Left);
        }
        assert_eq!(score.has_winner(5), None, "No winner below threshold");
    }

    #[test]
    fn test_score_reset() {
        let mut score = Score { left: 3, right: 4 };
        score.reset();
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_time_scaled_dt() {
        let mut time = Time::new(0.02, 0.0);
        assert_eq!(time.scaled_dt(), 0.02);
        time.scale = 0.0;
        assert_eq!(time.scaled_dt(), 0.0);
    }

    #[test]
    fn test_game_rng_unit_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn test_scripted_random_cycles() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.9);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_index(8), 7);
    }

    #[test]
    fn test_input_axis_clamped() {
        let mut input = InputState::new();
        input.set_axis(PaddleOwner::HumanOne, 3.0);
        input.set_axis(PaddleOwner::HumanTwo, -0.5);
        assert_eq!(input.axis(PaddleOwner::HumanOne), 1.0);
        assert_eq!(input.axis(PaddleOwner::HumanTwo), -0.5);
        assert_eq!(input.axis(PaddleOwner::Ai), 0.0);
        input.clear();
        assert_eq!(input.axis(PaddleOwner::HumanOne), 0.0);
    }

    #[test]
    fn test_events_drain_empties_list() {
        let mut events = Events::new();
        events.push(GameEvent::ServeReady);
        events.push(GameEvent::PauseToggled { paused: true });

        let drained = events.drain();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1], GameEvent::PauseToggled { paused: true });
        assert!(events.is_empty());
    }
}
