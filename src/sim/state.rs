//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here, owned by one `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::PickupKind;
use crate::consts::*;
use crate::highscores::HighScores;

/// Top-level mode - exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Main menu (initial state, and where a run ends)
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Best-score screen, reachable only from the menu
    HighScoreDisplay,
}

/// Logical play field size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Create a viewport, clamping each side to the minimum floor
    pub fn new(width: f32, height: f32) -> Self {
        let width = if width.is_finite() { width.max(MIN_WIDTH) } else { MIN_WIDTH };
        let height = if height.is_finite() { height.max(MIN_HEIGHT) } else { MIN_HEIGHT };
        Self { width, height }
    }

    /// Velocity scale relative to a 600px reference field
    #[inline]
    pub fn speed_scale(&self) -> f32 {
        self.width.min(self.height) / SPEED_REFERENCE
    }

    /// Gap between the paddle top and a ball riding on it
    #[inline]
    pub fn stick_gap(&self) -> f32 {
        self.height * 0.005
    }
}

/// The player's paddle (axis-aligned rectangle, top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center the paddle on `x`, keeping it inside the viewport
    pub fn move_to(&mut self, x: f32, viewport: &Viewport) {
        self.x = crate::clamp_span(x - self.width * 0.5, self.width, viewport.width);
    }

    /// Pull the paddle back inside the viewport after a width change
    pub fn clamp_into(&mut self, viewport: &Viewport) {
        self.x = crate::clamp_span(self.x, self.width, viewport.width);
    }
}

/// A brick in the grid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
    /// Elevated pickup odds, drawn with a gold marker
    pub golden: bool,
    /// Only mega balls or an active zap can break it
    pub unbreakable: bool,
}

impl Brick {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Fixed rows x cols brick grid with a maintained alive counter
///
/// Flags may only go from alive to dead through [`BrickGrid::destroy`] during play,
/// which keeps `alive_count` exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
    alive: usize,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGrid {
    pub fn new() -> Self {
        Self {
            bricks: vec![Brick::default(); BRICK_COUNT],
            alive: 0,
        }
    }

    /// Flat index for (row, col)
    #[inline]
    pub fn index(row: usize, col: usize) -> usize {
        row * BRICK_COLS + col
    }

    /// (row, col) for a flat index
    #[inline]
    pub fn row_col(index: usize) -> (usize, usize) {
        (index / BRICK_COLS, index % BRICK_COLS)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index)
    }

    /// Bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Mutable access for layout and level setup; call [`BrickGrid::recount`] afterwards
    pub(crate) fn bricks_mut(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }

    /// Recompute the alive counter from the flags
    pub fn recount(&mut self) -> usize {
        self.alive = self.bricks.iter().filter(|b| b.alive).count();
        self.alive
    }

    /// Kill a brick. Returns the brick as it was, or `None` if it was already dead.
    pub fn destroy(&mut self, index: usize) -> Option<Brick> {
        let brick = self.bricks.get_mut(index)?;
        if !brick.alive {
            return None;
        }
        let before = *brick;
        brick.alive = false;
        brick.golden = false;
        self.alive -= 1;
        Some(before)
    }

    /// Clear every unbreakable flag (zap)
    pub fn clear_unbreakable(&mut self) {
        for brick in &mut self.bricks {
            brick.unbreakable = false;
        }
    }

    /// First alive brick (row-major) matching `pred`
    pub fn first_alive_where(&self, mut pred: impl FnMut(&Brick) -> bool) -> Option<usize> {
        self.bricks.iter().position(|b| b.alive && pred(b))
    }
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Unit-scale velocity, multiplied by the effective speed each tick
    pub vel: Vec2,
    /// Riding the paddle, not simulated
    pub stuck: bool,
    /// Enlarged, pierces unbreakable bricks
    pub mega: bool,
    /// Reduced effective speed
    pub gravity_slow: bool,
}

impl Ball {
    /// Radius of a normal ball for this viewport
    pub fn base_radius(viewport: &Viewport) -> f32 {
        (viewport.height * 0.013).max(MIN_BALL_RADIUS)
    }

    /// A fresh ball stuck to the paddle center
    pub fn new_stuck(paddle: &Paddle, viewport: &Viewport) -> Self {
        let scale = viewport.speed_scale();
        let mut ball = Self {
            pos: Vec2::ZERO,
            radius: Self::base_radius(viewport),
            vel: Vec2::new(BALL_START_COMPONENT * scale, -BALL_START_COMPONENT * scale),
            stuck: true,
            mega: false,
            gravity_slow: false,
        };
        ball.follow_paddle(paddle, viewport);
        ball
    }

    /// Sit on top of the paddle center
    pub fn follow_paddle(&mut self, paddle: &Paddle, viewport: &Viewport) {
        self.pos = Vec2::new(
            paddle.center_x(),
            paddle.y - self.radius - viewport.stick_gap(),
        );
    }

    /// Unstick and make sure the ball heads upward
    pub fn release(&mut self, viewport: &Viewport) {
        self.stuck = false;
        self.vel.y = if self.vel.y == 0.0 {
            -BALL_START_COMPONENT * viewport.speed_scale()
        } else {
            -self.vel.y.abs()
        };
    }

    /// Pixels moved per unit of velocity this tick
    #[inline]
    pub fn effective_speed(&self, speed_multiplier: f32) -> f32 {
        let gravity = if self.gravity_slow { GRAVITY_SLOW_FACTOR } else { 1.0 };
        BALL_SPEED_SCALE * speed_multiplier * gravity
    }
}

/// A falling power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Pixels per tick
    pub fall_speed: f32,
    /// Cleared pickups are dropped on the next pickup pass
    pub active: bool,
}

impl Pickup {
    /// Display glyph for this pickup
    pub fn glyph(&self) -> &'static str {
        self.kind.spec().glyph
    }
}

/// A laser bolt travelling up from the paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    /// Center x, top y
    pub pos: Vec2,
    pub length: f32,
}

/// The single active power-up record (HUD + revert), last applied wins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PickupKind,
    /// Simulation clock time (seconds) when the effect ends
    pub expires_at: f64,
}

/// Timed paddle-width change, tracked apart from the active effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleModifier {
    /// Multiplier on the layout width; stacked resizes multiply in
    pub factor: f32,
    pub expires_at: f64,
}

/// Gameplay rules that can be tuned per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub starting_lives: u32,
    /// Chance a destroyed brick drops a pickup
    pub pickup_chance: f64,
    /// Same, for golden bricks
    pub golden_pickup_chance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            pickup_chance: 0.45,
            golden_pickup_chance: 0.9,
        }
    }
}

/// Things that happened during a tick, drained by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed { index: usize },
    PickupSpawned { kind: PickupKind },
    PickupCollected { kind: PickupKind },
    EffectExpired { kind: PickupKind },
    LifeLost { lives_left: u32 },
    GameOver { score: u64 },
    LevelCleared { level: u32 },
    /// Short audible/visual notification pulse
    Notify,
}

/// Complete game session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub mode: Mode,
    pub viewport: Viewport,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub balls: Vec<Ball>,
    pub pickups: Vec<Pickup>,
    pub lasers: Vec<Laser>,
    pub score: u64,
    pub lives: u32,
    /// Best score this process has seen
    pub high_score: u64,
    /// Current level (1..=LEVEL_COUNT)
    pub level: u32,
    /// Global ball speed multiplier
    pub speed_multiplier: f32,
    /// Next paddle contact sticks the ball
    pub grab_pending: bool,
    pub laser_enabled: bool,
    /// A run is in progress (Resume is available from the menu)
    pub game_started: bool,
    pub active_effect: Option<ActiveEffect>,
    pub paddle_modifier: Option<PaddleModifier>,
    /// Simulation clock in seconds
    pub clock: f64,
    pub rules: Rules,
    /// Finished runs this session
    pub leaderboard: HighScores,
    /// Exit was chosen from the menu
    pub quit_requested: bool,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default viewport and rules
    pub fn new(seed: u64) -> Self {
        Self::with_rules(seed, Viewport::default(), Rules::default())
    }

    /// Create a new session sitting in the menu with level 1 laid out
    pub fn with_rules(seed: u64, viewport: Viewport, rules: Rules) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: Mode::Menu,
            viewport,
            paddle: Paddle {
                x: -1.0,
                ..Default::default()
            },
            bricks: BrickGrid::new(),
            balls: Vec::new(),
            pickups: Vec::new(),
            lasers: Vec::new(),
            score: 0,
            lives: rules.starting_lives,
            high_score: 0,
            level: 1,
            speed_multiplier: 1.0,
            grab_pending: false,
            laser_enabled: false,
            game_started: false,
            active_effect: None,
            paddle_modifier: None,
            clock: 0.0,
            rules,
            leaderboard: HighScores::new(),
            quit_requested: false,
            events: Vec::new(),
        };

        super::layout::recompute_layout(&mut state);
        super::level::load_level(&mut state, 1);
        state.reset_balls_to_paddle();

        state
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Replace all balls with one fresh ball stuck to the paddle
    pub fn reset_balls_to_paddle(&mut self) {
        self.balls.clear();
        self.balls.push(Ball::new_stuck(&self.paddle, &self.viewport));
    }

    /// Current paddle width multiplier (1.0 without a modifier)
    pub fn paddle_width_factor(&self) -> f32 {
        self.paddle_modifier.map_or(1.0, |m| m.factor)
    }

    pub fn any_ball_stuck(&self) -> bool {
        self.balls.iter().any(|b| b.stuck)
    }

    /// Raise the high score if the current score beats it
    pub fn update_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Resume is offered only for a run in progress while in the menu
    pub fn resume_available(&self) -> bool {
        self.game_started && self.mode == Mode::Menu
    }

    /// Active effect kind, if any
    pub fn active_kind(&self) -> Option<PickupKind> {
        self.active_effect.map(|e| e.kind)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_sits_in_menu() {
        let state = GameState::new(7);
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.bricks.alive_count(), BRICK_COUNT);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].stuck);
        assert!(!state.resume_available());
    }

    #[test]
    fn test_viewport_floor() {
        let vp = Viewport::new(10.0, -5.0);
        assert_eq!(vp.width, MIN_WIDTH);
        assert_eq!(vp.height, MIN_HEIGHT);
        let vp = Viewport::new(f32::NAN, 640.0);
        assert_eq!(vp.width, MIN_WIDTH);
        assert_eq!(vp.height, 640.0);
    }

    #[test]
    fn test_destroy_is_exactly_once() {
        let mut grid = BrickGrid::new();
        for brick in grid.bricks_mut() {
            brick.alive = true;
        }
        grid.bricks_mut()[3].golden = true;
        assert_eq!(grid.recount(), BRICK_COUNT);

        let destroyed = grid.destroy(3);
        assert!(destroyed.is_some_and(|b| b.golden));
        assert_eq!(grid.alive_count(), BRICK_COUNT - 1);
        assert!(!grid.get(3).is_some_and(|b| b.golden));

        assert!(grid.destroy(3).is_none());
        assert_eq!(grid.alive_count(), BRICK_COUNT - 1);
        assert!(grid.destroy(BRICK_COUNT).is_none());
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(BrickGrid::index(2, 3), 23);
        assert_eq!(BrickGrid::row_col(23), (2, 3));
    }

    #[test]
    fn test_fresh_ball_rides_paddle() {
        let vp = Viewport::default();
        let paddle = Paddle {
            x: 100.0,
            y: 550.0,
            width: 100.0,
            height: 15.0,
        };
        let ball = Ball::new_stuck(&paddle, &vp);
        assert!(ball.stuck);
        assert_eq!(ball.pos.x, 150.0);
        assert!(ball.pos.y + ball.radius < paddle.y);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_release_forces_upward() {
        let vp = Viewport::default();
        let mut ball = Ball::new_stuck(&Paddle::default(), &vp);
        ball.vel.y = 0.3;
        ball.release(&vp);
        assert!(!ball.stuck);
        assert_eq!(ball.vel.y, -0.3);

        ball.vel.y = 0.0;
        ball.release(&vp);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_effective_speed() {
        let vp = Viewport::default();
        let mut ball = Ball::new_stuck(&Paddle::default(), &vp);
        assert_eq!(ball.effective_speed(1.0), 10.0);
        ball.gravity_slow = true;
        assert!((ball.effective_speed(0.5) - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1);
        state.push_event(GameEvent::Notify);
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Notify]);
        assert!(state.events().is_empty());
    }
}
