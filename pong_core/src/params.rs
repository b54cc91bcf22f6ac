/// Game tuning parameters for the Pong variant
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Board (centred on the origin; x runs paddle to paddle, y wall to wall)
    pub const PADDLE_PLANE_X: f32 = 7.5;
    pub const GOAL_LINE_X: f32 = 8.0;
    pub const WALL_HALF_HEIGHT: f32 = 2.4;

    // Paddle
    pub const PADDLE_HALF_EXTENT: f32 = 0.5;
    pub const PADDLE_HALF_THICKNESS: f32 = 0.1;
    pub const HUMAN_PADDLE_GAIN: f32 = 2.8;
    pub const AI_PADDLE_GAIN: f32 = 2.5;

    // Ball
    pub const BALL_RADIUS: f32 = 0.05;
    pub const MIN_H_SPEED: f32 = 1.0;
    pub const PADDLE_SPIN_DIVISOR: f32 = 2.5;

    // AI
    pub const AI_TRACK_SPEED_LIMIT: f32 = 1.0;
    pub const AI_PREDICTED_SPEED_LIMIT: f32 = 2.0;
    pub const AI_TARGET_TOLERANCE: f32 = 0.02;
    pub const AI_STOP_THRESHOLD: f32 = 0.05;
    pub const AI_DECISION_THRESHOLD: f32 = 0.5;
    pub const PREDICTION_MIN_VX: f32 = 1e-4;

    // Serve
    pub const SERVE_READY_DURATION: f32 = 1.5;
    pub const SERVE_GO_DURATION: f32 = 0.6;
    pub const SERVE_TIME_SCALE: f32 = 0.0001;
    pub const SERVE_H_OFFSET: f32 = 0.42;
    pub const SERVE_H_DEAD_ZONE: f32 = 0.3;
    pub const SERVE_V_OFFSET: f32 = 0.32;
    pub const SERVE_V_CEILING: f32 = 0.15;

    // Match
    pub const WIN_THRESHOLDS: [u32; 4] = [5, 10, 20, 50];
    pub const TAUNT_PROBABILITY: f32 = 0.3;

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    pub const MAX_DT: f32 = 0.1;
}

/// Lines shown when the left player scores in a one-player match
pub const LEFT_GOAL_MESSAGES: [&str; 8] = [
    "GOAL!!",
    "One point for you",
    "Right on!",
    "BAM",
    "Bullseye!",
    "You're going out.",
    "Keep it up!",
    "WHOO!",
];

/// Lines shown when the AI scores in a one-player match
pub const RIGHT_GOAL_MESSAGES: [&str; 8] = [
    "Bad luck, player!",
    "C'mon, what you doing?",
    "Hey! Get moving, will you?",
    "Uh-oh, we're in trouble!",
    "But why?",
    "Oh, dangnabit.",
    "What the...?",
    "NOOOOO!!!",
];
