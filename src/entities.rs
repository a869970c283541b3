/// All game entity types — plain data, the rules live in `compute`.

use crate::config::GameConfig;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// Units per millisecond on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position, size and motion shared by every entity kind.
///
/// `remainder` holds the sub-pixel part of movement that did not yet add up
/// to a whole pixel, so slow entities still move at short time steps.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Body {
    pub rect: Rect,
    pub velocity: Velocity,
    pub remainder: (f64, f64),
}

impl Body {
    pub fn new(rect: Rect, velocity: Velocity) -> Self {
        Self {
            rect,
            velocity,
            remainder: (0.0, 0.0),
        }
    }
}

/// Anything that owns a `Body` and can be moved or collided.
pub trait Kinematic {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn rect(&self) -> &Rect {
        &self.body().rect
    }
}

// ── Player, projectiles & enemies ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub active: bool,
}

/// A descending enemy; its descent speed is `body.velocity.y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub active: bool,
}

impl Player {
    pub fn new(rect: Rect) -> Self {
        Self {
            body: Body::new(rect, Velocity::default()),
        }
    }
}

impl Projectile {
    pub fn new(rect: Rect, velocity: Velocity) -> Self {
        Self {
            body: Body::new(rect, velocity),
            active: true,
        }
    }
}

impl Enemy {
    pub fn new(rect: Rect, descent_speed: f64) -> Self {
        Self {
            body: Body::new(rect, Velocity::new(0.0, descent_speed)),
            active: true,
        }
    }
}

macro_rules! impl_kinematic {
    ($($ty:ty),*) => {
        $(impl Kinematic for $ty {
            fn body(&self) -> &Body {
                &self.body
            }

            fn body_mut(&mut self) -> &mut Body {
                &mut self.body
            }
        })*
    };
}

impl_kinematic!(Player, Projectile, Enemy);

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one run needs between ticks.  Cloneable so `tick` can return
/// a new state without touching the one it was given.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Simulation time of the last accepted shot, `None` before the first.
    pub last_fire_ms: Option<u64>,
    /// Simulated milliseconds since the run started.
    pub clock_ms: u64,
    pub frame: u64,
    pub status: GameStatus,
    pub config: GameConfig,
}
