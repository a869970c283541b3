/// Game rules: movement, firing, the projectile and enemy lifecycles, and
/// the per-tick orchestration that ties them together.
///
/// `tick` takes an immutable reference to the current `GameState` and
/// returns a brand-new one.  Randomness only enters through the injected RNG,
/// so a seeded RNG makes a run fully reproducible.

use rand::Rng;

use crate::config::{ArenaConfig, GameConfig};
use crate::entities::{Body, Enemy, GameState, GameStatus, Kinematic, Player, Projectile, Velocity};
use crate::geometry::{overlaps, Rect};
use crate::input::Controls;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state of a run.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        player: Player::new(config.player_start()),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        last_fire_ms: None,
        clock_ms: 0,
        frame: 0,
        status: GameStatus::Playing,
        config,
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Advance `body` by its velocity over `dt_ms`.  Whole pixels land in the
/// rectangle; the fraction is carried into the next call.
pub fn integrate(body: &mut Body, dt_ms: u64) {
    let dt = dt_ms as f64;

    let dx = body.velocity.x * dt + body.remainder.0;
    let dy = body.velocity.y * dt + body.remainder.1;
    let (whole_x, whole_y) = (dx.trunc(), dy.trunc());

    body.rect.x += whole_x as i32;
    body.rect.y += whole_y as i32;
    body.remainder = (dx - whole_x, dy - whole_y);
}

/// Keep the whole rectangle inside the arena.  Only the player is clamped.
pub fn clamp_to_arena(body: &mut Body, arena: &ArenaConfig) {
    let (clamped_x, clamped_y) = body.rect.clamp_within(arena.width, arena.height);
    if clamped_x {
        body.remainder.0 = 0.0;
    }
    if clamped_y {
        body.remainder.1 = 0.0;
    }
}

fn is_off_arena(rect: &Rect, arena: &ArenaConfig) -> bool {
    rect.bottom() < 0 || rect.y >= arena.height
}

// ── Fire control ─────────────────────────────────────────────────────────────

/// Spawn a projectile from the top-center of the player, unless the last
/// accepted shot is within the cooldown.
pub fn try_fire(
    player: &Player,
    now_ms: u64,
    last_fire_ms: Option<u64>,
    config: &GameConfig,
) -> Option<Projectile> {
    let cooled_down = match last_fire_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > config.projectile.cooldown_ms,
    };
    if !cooled_down {
        return None;
    }

    let shot = &config.projectile;
    let origin = player.rect();
    let rect = Rect::new(origin.center_x() - shot.width / 2, origin.y, shot.width, shot.height);
    Some(Projectile::new(rect, Velocity::new(0.0, -shot.speed)))
}

/// Attempt a shot at the current simulation time.  The cooldown timestamp
/// only moves when the shot is accepted.
pub fn fire(state: &mut GameState) {
    if let Some(projectile) =
        try_fire(&state.player, state.clock_ms, state.last_fire_ms, &state.config)
    {
        log::trace!("Shot fired at {} ms", state.clock_ms);
        state.projectiles.push(projectile);
        state.last_fire_ms = Some(state.clock_ms);
    }
}

// ── Projectile lifecycle ─────────────────────────────────────────────────────

/// Compact, advance, retire off-arena shots, then resolve hits.  Returns the
/// score gained this tick.
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut [Enemy],
    dt_ms: u64,
    config: &GameConfig,
) -> u32 {
    projectiles.retain(|p| p.active);

    let mut gained = 0;
    for projectile in projectiles.iter_mut() {
        integrate(&mut projectile.body, dt_ms);
        if is_off_arena(projectile.rect(), &config.arena) {
            projectile.active = false;
            continue;
        }

        let target = enemies
            .iter_mut()
            .find(|enemy| enemy.active && overlaps(projectile.rect(), enemy.rect()));
        if let Some(enemy) = target {
            log::debug!("Enemy destroyed at ({}, {})", enemy.body.rect.x, enemy.body.rect.y);
            enemy.active = false;
            projectile.active = false;
            gained += config.enemy.score_per_hit;
        }
    }
    gained
}

// ── Enemy lifecycle ──────────────────────────────────────────────────────────

/// Roll for a new enemy at a random spot along the top edge.
pub fn spawn_enemy(rng: &mut impl Rng, config: &GameConfig) -> Option<Enemy> {
    let kind = &config.enemy;
    if !rng.gen_bool(kind.spawn_chance) {
        return None;
    }
    let span = config.arena.width - kind.width;
    let x = if span > 0 { rng.gen_range(0..span) } else { 0 };
    Some(Enemy::new(Rect::new(x, 0, kind.width, kind.height), kind.speed))
}

/// Drop enemies destroyed on earlier ticks, move the rest down, and retire
/// the ones that left through the bottom.
pub fn update_enemies(enemies: &mut Vec<Enemy>, dt_ms: u64, config: &GameConfig) {
    enemies.retain(|e| e.active);

    for enemy in enemies.iter_mut() {
        integrate(&mut enemy.body, dt_ms);
        if enemy.rect().y >= config.arena.height {
            enemy.active = false;
        }
    }
}

// ── Terminal condition ───────────────────────────────────────────────────────

/// True when the player touches any enemy that is still active.
pub fn check_game_over(player: &Player, enemies: &[Enemy]) -> bool {
    enemies
        .iter()
        .any(|enemy| enemy.active && overlaps(player.rect(), enemy.rect()))
}

// ── Per-tick orchestration ───────────────────────────────────────────────────

/// Advance the simulation by `dt_ms`.  A finished run is returned unchanged.
pub fn tick(
    state: &GameState,
    controls: &Controls,
    dt_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    if next.status == GameStatus::GameOver {
        return next;
    }
    let config = &state.config;

    // ── 1. Input ─────────────────────────────────────────────────────────────
    next.player.body.velocity = controls.velocity(config.player.speed);
    if controls.fire {
        fire(&mut next);
    }

    // ── 2. Player movement ───────────────────────────────────────────────────
    integrate(&mut next.player.body, dt_ms);
    clamp_to_arena(&mut next.player.body, &config.arena);

    // ── 3. Projectiles & hits ────────────────────────────────────────────────
    next.score += update_projectiles(&mut next.projectiles, &mut next.enemies, dt_ms, config);

    // ── 4. Enemies ───────────────────────────────────────────────────────────
    if let Some(enemy) = spawn_enemy(rng, config) {
        next.enemies.push(enemy);
    }
    update_enemies(&mut next.enemies, dt_ms, config);

    // ── 5. Game over ─────────────────────────────────────────────────────────
    if check_game_over(&next.player, &next.enemies) {
        log::info!("Player hit at frame {}, final score {}", next.frame, next.score);
        next.status = GameStatus::GameOver;
    }

    next.clock_ms += dt_ms;
    next.frame += 1;
    next
}
