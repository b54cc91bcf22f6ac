//! Match driver.
//!
//! `Game` owns every piece of match state and is passed around explicitly;
//! presentation layers issue commands, call `step` once per frame and then
//! `drain_events` to collect everything emitted since the previous drain,
//! including events raised by commands issued between frames.

use glam::Vec2;
use hecs::World;

use crate::fsm::{MatchAction, MatchFsm, MatchState};
use crate::serve::{serve_velocity, ServeSequence, ServeStep};
use crate::systems::*;
use crate::{
    create_ball, create_paddle, AiController, Ball, Board, ConfigError, Controller, Events,
    GameEvent, GameRng, HumanController, InputState, MatchConfig, Paddle, PaddleOwner, Params,
    PlayerCount, RandomSource, Score, Side, Time, LEFT_GOAL_MESSAGES, RIGHT_GOAL_MESSAGES,
};

pub struct Game {
    pub world: World,
    pub time: Time,
    pub board: Board,
    pub config: MatchConfig,
    pub score: Score,
    pub events: Events,
    pub input: InputState,
    rng: Box<dyn RandomSource + Send>,
    fsm: MatchFsm,
    serve: ServeSequence,
}

impl Game {
    /// New match sitting on the title screen, seeded for reproducible play
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::new(seed))
    }

    pub fn with_rng(
        config: MatchConfig,
        rng: impl RandomSource + Send + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        create_ball(&mut world, Vec2::ZERO, Vec2::ZERO);
        for (_e, ball) in world.query_mut::<&mut Ball>() {
            ball.frozen = true;
        }

        create_paddle(
            &mut world,
            Side::Left,
            PaddleOwner::HumanOne,
            Controller::new(HumanController::new()),
        );
        match config.players {
            PlayerCount::One => create_paddle(
                &mut world,
                Side::Right,
                PaddleOwner::Ai,
                Controller::new(AiController::new(config.difficulty)),
            ),
            PlayerCount::Two => create_paddle(
                &mut world,
                Side::Right,
                PaddleOwner::HumanTwo,
                Controller::new(HumanController::new()),
            ),
        };

        tracing::debug!(
            difficulty = %config.difficulty,
            players = u8::from(config.players),
            win_threshold = config.win_threshold,
            "match created"
        );

        Ok(Self {
            world,
            time: Time::default(),
            board: Board::new(),
            config,
            score: Score::new(),
            events: Events::new(),
            input: InputState::new(),
            rng: Box::new(rng),
            fsm: MatchFsm::new(),
            serve: ServeSequence::new(),
        })
    }

    pub fn state(&self) -> MatchState {
        self.fsm.state()
    }

    pub fn serve(&self) -> &ServeSequence {
        &self.serve
    }

    pub fn simulation_active(&self) -> bool {
        self.fsm
            .simulation_active(&self.score, self.config.win_threshold)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    pub fn set_input(&mut self, owner: PaddleOwner, axis: f32) {
        self.input.set_axis(owner, axis);
    }

    /// Title -> Countdown, then serve with "Ready?"
    pub fn start_match(&mut self) -> bool {
        if !self.fsm.transition(MatchAction::StartMatch).success() {
            return false;
        }
        tracing::info!("match started");
        self.begin_serve();
        true
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        if !self.fsm.transition(MatchAction::TogglePause).success() {
            return false;
        }
        let paused = self.fsm.is_paused();
        self.time.scale = self.clock_scale();
        self.events.push(GameEvent::PauseToggled { paused });
        tracing::debug!(paused, "pause toggled");
        true
    }

    /// Over (or Paused) -> Countdown with scores, paddles and ball reset
    pub fn play_again(&mut self) -> bool {
        if !self.fsm.transition(MatchAction::PlayAgain).success() {
            return false;
        }
        tracing::info!("match restarted");
        self.reset_match();
        for side in [Side::Left, Side::Right] {
            self.events.push(GameEvent::ScoreChanged { side, score: 0 });
        }
        self.begin_serve();
        true
    }

    /// Over (or Paused) -> Title
    pub fn quit(&mut self) -> bool {
        if !self.fsm.transition(MatchAction::Quit).success() {
            return false;
        }
        self.reset_match();
        self.serve.cancel();
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            ball.reset(Vec2::ZERO);
        }
        tracing::info!("returned to title");
        true
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Advance the match by one frame of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        // Clamp dt to prevent large jumps
        let clamped_dt = dt.clamp(0.0, Params::MAX_DT);

        // Fixed micro-steps for stable physics
        let mut remaining_dt = clamped_dt;
        while remaining_dt > 0.0 {
            let step_dt = remaining_dt.min(Params::FIXED_DT);
            remaining_dt -= step_dt;
            self.tick(step_dt);
        }

        self.time.now += clamped_dt;
    }

    fn tick(&mut self, dt: f32) {
        self.time.dt = dt;

        // The serve timer runs on real time but stops while paused
        if self.serve.is_running() && !self.fsm.is_paused() {
            match self.serve.advance(dt) {
                ServeStep::Waiting => {}
                ServeStep::Go => {
                    self.events.push(GameEvent::ServeGo);
                    if self.fsm.state() == MatchState::Countdown {
                        self.fsm.transition(MatchAction::CountdownDone);
                    }
                }
                ServeStep::Released => {
                    self.events.push(GameEvent::ServeClear);
                    for (_e, ball) in self.world.query_mut::<&mut Ball>() {
                        ball.frozen = false;
                    }
                    tracing::debug!("ball released");
                }
            }
        }
        self.time.scale = self.clock_scale();

        if !self.simulation_active() {
            return;
        }

        let sim_dt = self.time.scaled_dt();

        // 1. Move paddles from input and AI
        move_paddles(
            &mut self.world,
            &self.board,
            &self.input,
            self.rng.as_mut(),
            sim_dt,
        );

        // 2. Move ball
        move_ball(&mut self.world, sim_dt);

        // 3. Check collisions (ball vs walls, paddles)
        check_collisions(&mut self.world, &self.board, sim_dt, &mut self.events);

        // 4. Check scoring (ball crossed a goal line)
        if let Some(side) =
            check_scoring(&mut self.world, &self.board, &mut self.score, &mut self.events)
        {
            self.handle_goal(side);
        }
    }

    fn clock_scale(&self) -> f32 {
        if self.fsm.is_paused() {
            0.0
        } else if self.serve.holds_clock() {
            Params::SERVE_TIME_SCALE
        } else {
            1.0
        }
    }

    fn handle_goal(&mut self, side: Side) {
        let won = self.score.has_winner(self.config.win_threshold) == Some(side);
        if won {
            self.fsm.transition(MatchAction::ScoreReached);
            self.events.push(GameEvent::Win { side });
            tracing::info!(winner = ?side, left = self.score.left, right = self.score.right, "match over");
        }

        reset_paddles(&mut self.world);
        self.maybe_comment(side, won);

        if !self.fsm.is_over() {
            self.events.push(GameEvent::Goal { side });
            self.begin_serve();
        }
    }

    /// One-player matches sometimes comment on a goal
    fn maybe_comment(&mut self, side: Side, won: bool) {
        if !self.config.is_single_player() || won {
            return;
        }
        if self.rng.next_unit() >= self.config.taunt_probability {
            return;
        }
        let pool: &[&str] = match side {
            Side::Left => &LEFT_GOAL_MESSAGES,
            Side::Right => &RIGHT_GOAL_MESSAGES,
        };
        let text = pool[self.rng.next_index(pool.len())].to_string();
        self.events.push(GameEvent::Comment { side, text });
    }

    /// Freeze the ball at the centre with a fresh velocity and start the serve timer
    fn begin_serve(&mut self) {
        let (h_max, v_max) = self.config.serve_bounds();
        let vel = serve_velocity(self.rng.as_mut(), h_max, v_max);
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            ball.reset(vel);
        }
        reset_paddles(&mut self.world);

        let announce = self.config.announce_every_serve || !self.fsm.is_playing();
        if announce {
            self.events.push(GameEvent::ServeReady);
        }
        self.serve.begin(announce);
        self.time.scale = self.clock_scale();
        tracing::debug!(vx = vel.x, vy = vel.y, announce, "serve started");
    }

    fn reset_match(&mut self) {
        self.score.reset();
        self.input.clear();
        reset_paddles(&mut self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Difficulty, ScriptedRandom};

    const FRAME: f32 = 1.0 / 60.0;

    fn run_frames(game: &mut Game, frames: usize) -> Vec<GameEvent> {
        let mut seen = Vec::new();
        for _ in 0..frames {
            game.step(FRAME);
            seen.extend(game.drain_events());
        }
        seen
    }

    /// Drop the ball just past the goal line on the given side
    fn push_ball_past(game: &mut Game, scoring_side: Side) {
        let x = match scoring_side {
            Side::Left => game.board.goal_line_x + 0.2,
            Side::Right => -game.board.goal_line_x - 0.2,
        };
        for (_e, ball) in game.world.query_mut::<&mut Ball>() {
            ball.pos = Vec2::new(x, 0.0);
            ball.frozen = false;
        }
    }

    fn playing_game(config: MatchConfig) -> Game {
        let mut game = Game::new(config, 7).unwrap();
        assert!(game.start_match());
        // Ready 1.5s + Go 0.6s
        run_frames(&mut game, 140);
        assert_eq!(game.state(), MatchState::Playing);
        game
    }

    #[test]
    fn test_new_game_starts_on_title() {
        let game = Game::new(MatchConfig::default(), 1).unwrap();
        assert_eq!(game.state(), MatchState::Title);
        assert!(!game.simulation_active());
        let ball = game.ball().unwrap();
        assert_eq!(ball.pos, Vec2::ZERO);
        assert!(ball.frozen);
        assert_eq!(game.paddle(Side::Right).unwrap().owner, PaddleOwner::Ai);
    }

    #[test]
    fn test_two_player_right_paddle_is_human() {
        let config = MatchConfig {
            players: PlayerCount::Two,
            ..MatchConfig::default()
        };
        let game = Game::new(config, 1).unwrap();
        assert_eq!(game.paddle(Side::Right).unwrap().owner, PaddleOwner::HumanTwo);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig {
            win_threshold: 7,
            ..MatchConfig::default()
        };
        assert!(matches!(
            Game::new(config, 1),
            Err(ConfigError::UnsupportedWinThreshold(7))
        ));
    }

    #[test]
    fn test_start_match_announces_serve() {
        let mut game = Game::new(MatchConfig::default(), 3).unwrap();
        assert!(game.start_match());
        assert!(game.events.contains(&GameEvent::ServeReady));
        assert_eq!(game.state(), MatchState::Countdown);
        assert!(game.serve().holds_clock());
        assert!(!game.start_match(), "already started");
    }

    #[test]
    fn test_countdown_releases_ball() {
        let mut game = Game::new(MatchConfig::default(), 3).unwrap();
        game.start_match();

        let seen = run_frames(&mut game, 140);

        let go = seen.iter().position(|e| *e == GameEvent::ServeGo).unwrap();
        let clear = seen.iter().position(|e| *e == GameEvent::ServeClear).unwrap();
        assert!(go < clear);
        assert!(!game.ball().unwrap().frozen);
        assert_eq!(game.time.scale, 1.0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = playing_game(MatchConfig::default());
        run_frames(&mut game, 10);

        assert!(game.toggle_pause());
        assert!(game.events.contains(&GameEvent::PauseToggled { paused: true }));
        let before = game.ball().unwrap();
        run_frames(&mut game, 30);
        let after = game.ball().unwrap();

        assert_eq!(before.pos, after.pos);
        assert_eq!(game.time.scale, 0.0);

        assert!(game.toggle_pause());
        assert_eq!(game.state(), MatchState::Playing);
    }

    #[test]
    fn test_command_events_survive_next_step() {
        let mut game = playing_game(MatchConfig::default());

        game.toggle_pause();
        game.step(FRAME);

        let seen = game.drain_events();
        assert!(seen.contains(&GameEvent::PauseToggled { paused: true }));
        assert!(game.drain_events().is_empty(), "Drained events are gone");
    }

    #[test]
    fn test_pause_rejected_outside_play() {
        let mut game = Game::new(MatchConfig::default(), 3).unwrap();
        assert!(!game.toggle_pause());
        game.start_match();
        assert!(!game.toggle_pause(), "no pause during the opening countdown");
    }

    #[test]
    fn test_goal_serve_is_announced() {
        let config = MatchConfig {
            taunt_probability: 0.0,
            ..MatchConfig::default()
        };
        let mut game = playing_game(config);
        push_ball_past(&mut game, Side::Right);

        game.step(FRAME);
        assert!(game.events.contains(&GameEvent::ServeReady));
        assert_eq!(game.state(), MatchState::Playing);

        let seen = run_frames(&mut game, 140);
        let go = seen.iter().position(|e| *e == GameEvent::ServeGo).unwrap();
        let clear = seen.iter().position(|e| *e == GameEvent::ServeClear).unwrap();
        assert!(go < clear);
        assert_eq!(game.state(), MatchState::Playing);
    }

    #[test]
    fn test_goal_serves_without_announcement() {
        let config = MatchConfig {
            taunt_probability: 0.0,
            announce_every_serve: false,
            ..MatchConfig::default()
        };
        let mut game = playing_game(config);
        push_ball_past(&mut game, Side::Left);

        game.step(FRAME);

        assert_eq!(game.score.left, 1);
        assert!(game.events.contains(&GameEvent::Goal { side: Side::Left }));
        assert!(!game.events.contains(&GameEvent::ServeReady));
        assert_eq!(game.state(), MatchState::Playing);
        let ball = game.ball().unwrap();
        assert_eq!(ball.pos, Vec2::ZERO);
        assert!(ball.frozen);
    }

    #[test]
    fn test_winning_goal_ends_match() {
        let config = MatchConfig {
            taunt_probability: 0.0,
            ..MatchConfig::default()
        };
        let mut game = playing_game(config);
        game.score.right = 4;
        push_ball_past(&mut game, Side::Right);

        game.step(FRAME);

        assert_eq!(game.score.right, 5);
        assert_eq!(game.state(), MatchState::Over);
        assert!(game.events.contains(&GameEvent::Win { side: Side::Right }));
        assert!(!game.events.contains(&GameEvent::Goal { side: Side::Right }));
        assert!(!game.simulation_active());
    }

    #[test]
    fn test_taunt_on_goal_in_single_player() {
        let config = MatchConfig {
            taunt_probability: 1.0,
            ..MatchConfig::default()
        };
        let mut game = Game::with_rng(config, ScriptedRandom::new(vec![0.0])).unwrap();
        game.start_match();
        run_frames(&mut game, 140);
        push_ball_past(&mut game, Side::Left);

        game.step(FRAME);

        let comment = game
            .events
            .iter()
            .find(|e| matches!(e, GameEvent::Comment { .. }))
            .cloned();
        assert_eq!(
            comment,
            Some(GameEvent::Comment {
                side: Side::Left,
                text: LEFT_GOAL_MESSAGES[0].to_string(),
            })
        );
    }

    #[test]
    fn test_no_taunt_in_two_player() {
        let config = MatchConfig {
            players: PlayerCount::Two,
            taunt_probability: 1.0,
            ..MatchConfig::default()
        };
        let mut game = playing_game(config);
        push_ball_past(&mut game, Side::Right);

        game.step(FRAME);

        assert!(!game
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Comment { .. })));
    }

    #[test]
    fn test_play_again_resets_score() {
        let config = MatchConfig {
            difficulty: Difficulty::Hard,
            taunt_probability: 0.0,
            ..MatchConfig::default()
        };
        let mut game = playing_game(config);
        game.score.left = 4;
        push_ball_past(&mut game, Side::Left);
        game.step(FRAME);
        assert_eq!(game.state(), MatchState::Over);

        assert!(game.play_again());

        assert_eq!(game.score, Score::new());
        assert_eq!(game.state(), MatchState::Countdown);
        assert!(game.events.contains(&GameEvent::ServeReady));
        assert!(game.events.contains(&GameEvent::ScoreChanged {
            side: Side::Right,
            score: 0
        }));
    }

    #[test]
    fn test_quit_returns_to_title() {
        let mut game = playing_game(MatchConfig::default());
        game.toggle_pause();

        assert!(game.quit());

        assert_eq!(game.state(), MatchState::Title);
        assert!(!game.serve().is_running());
        assert!(game.ball().unwrap().frozen);
        assert!(game.start_match(), "a new match can begin from the title");
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut game = Game::new(MatchConfig::default(), 3).unwrap();
        game.step(5.0);
        assert!((game.time.now - Params::MAX_DT).abs() < 1e-6);
    }
}
