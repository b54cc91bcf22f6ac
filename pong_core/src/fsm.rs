//! Match State Machine
//!
//! Owns the match lifecycle and the single "simulation active" gate consumed
//! by the ball and paddle systems.

use crate::Score;

/// Match states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Title,
    Countdown,
    Playing,
    Paused,
    Over,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    StartMatch,
    CountdownDone,
    TogglePause,
    ScoreReached,
    PlayAgain,
    Quit,
}

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_state: MatchState,
    to_state: MatchState,
    action: MatchAction,
}

impl TransitionResult {
    pub fn success(&self) -> bool {
        self.success
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> MatchState {
        self.from_state
    }

    pub fn to_state(&self) -> MatchState {
        self.to_state
    }

    pub fn action(&self) -> MatchAction {
        self.action
    }
}

/// Match Finite State Machine
#[derive(Debug, Clone)]
pub struct MatchFsm {
    state: MatchState,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self {
            state: MatchState::Title,
        }
    }

    /// Get current state
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.next_state(action) {
            self.state = next_state;
            tracing::debug!(?from_state, ?next_state, ?action, "match state changed");
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            tracing::warn!(state = ?from_state, ?action, "rejected match transition");
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn next_state(&self, action: MatchAction) -> Option<MatchState> {
        match (self.state, action) {
            (MatchState::Title, MatchAction::StartMatch) => Some(MatchState::Countdown),

            (MatchState::Countdown, MatchAction::CountdownDone) => Some(MatchState::Playing),

            (MatchState::Playing, MatchAction::TogglePause) => Some(MatchState::Paused),
            (MatchState::Playing, MatchAction::ScoreReached) => Some(MatchState::Over),

            (MatchState::Paused, MatchAction::TogglePause) => Some(MatchState::Playing),
            (MatchState::Paused, MatchAction::PlayAgain) => Some(MatchState::Countdown),
            (MatchState::Paused, MatchAction::Quit) => Some(MatchState::Title),

            (MatchState::Over, MatchAction::PlayAgain) => Some(MatchState::Countdown),
            (MatchState::Over, MatchAction::Quit) => Some(MatchState::Title),

            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == MatchState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == MatchState::Paused
    }

    pub fn is_over(&self) -> bool {
        self.state == MatchState::Over
    }

    /// The sole gate for ball and paddle ticks
    pub fn simulation_active(&self, score: &Score, win_threshold: u32) -> bool {
        self.is_playing() && score.has_winner(win_threshold).is_none()
    }
}

impl Default for MatchFsm {
    fn default() -> Self {
        Self::new()
    }
}
