use std::io::{stdout, BufWriter, Stdout, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arena_shooter::compute::{init_state, tick};
use arena_shooter::display::{self, Viewport, MIN_COLS, MIN_ROWS};
use arena_shooter::entities::{GameState, GameStatus};
use arena_shooter::input::{is_quit, HeldKeys};
use arena_shooter::{GameConfig, GameError};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// How long the game-over overlay stays up before the program exits.
const GAME_OVER_PAUSE: Duration = Duration::from_millis(1500);

enum Outcome {
    Quit,
    GameOver(u32),
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Raw mode, alternate screen and hidden cursor for as long as this lives.
/// Dropping it restores the terminal on every exit path.
struct TerminalSession {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    fn start() -> Result<Self, GameError> {
        terminal::enable_raw_mode().map_err(GameError::terminal("raw mode"))?;
        let mut session = TerminalSession {
            out: BufWriter::new(stdout()),
            keyboard_enhanced: false,
        };

        session
            .out
            .execute(terminal::EnterAlternateScreen)
            .map_err(GameError::terminal("alternate screen"))?;
        session
            .out
            .execute(cursor::Hide)
            .map_err(GameError::terminal("cursor"))?;

        // Key-release events make held keys exact; without them we fall back
        // to the hold window.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            session
                .out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .map_err(GameError::terminal("keyboard enhancement"))?;
            session.keyboard_enhanced = true;
        } else {
            log::warn!("Terminal does not report key releases; using hold window");
        }

        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Poll input, run as many fixed simulation steps as wall-clock time allows,
/// render.  Returns when the player quits or the run ends.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    mut viewport: Viewport,
    keyboard_enhanced: bool,
    rng: &mut StdRng,
) -> Result<Outcome, GameError> {
    let timing = state.config.timing.clone();
    let step = Duration::from_millis(timing.tick_ms);
    let max_backlog = step * timing.max_substeps;

    let mut keys = HeldKeys::new(keyboard_enhanced, timing.hold_window_ms);
    let started = Instant::now();
    let mut last_frame = started;
    let mut accumulator = Duration::ZERO;

    loop {
        let frame_start = Instant::now();
        let now_ms = started.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => return Ok(Outcome::Quit),
                Event::Key(key) => keys.handle(&key, now_ms),
                Event::Resize(cols, rows) => {
                    viewport = Viewport::new(cols, rows, &state.config.arena);
                }
                _ => {}
            }
        }
        let controls = keys.controls(now_ms);

        // ── Fixed-step simulation ─────────────────────────────────────────────
        accumulator = (accumulator + (frame_start - last_frame)).min(max_backlog);
        last_frame = frame_start;
        while accumulator >= step && state.status == GameStatus::Playing {
            state = tick(&state, &controls, timing.tick_ms, rng);
            accumulator -= step;
        }

        display::render(out, &state, &viewport)?;

        if state.status == GameStatus::GameOver {
            std::thread::sleep(GAME_OVER_PAUSE);
            return Ok(Outcome::GameOver(state.score));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(Outcome::GameOver(score)) => {
            log::info!("Game over with score {}", score);
            println!("Game Over! Score: {}", score);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Quit) => {
            log::info!("Quit by player");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("arena_shooter: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<Outcome, GameError> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => GameConfig::load(Path::new(&path))?,
        None => GameConfig::default(),
    };

    let (cols, rows) = terminal::size().map_err(GameError::terminal("terminal size"))?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    let viewport = Viewport::new(cols, rows, &config.arena);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("Starting run on a {}x{} terminal", cols, rows);

    // The session is dropped, restoring the terminal, before `main` prints.
    let mut session = TerminalSession::start()?;
    let keyboard_enhanced = session.keyboard_enhanced;
    game_loop(&mut session.out, init_state(config), viewport, keyboard_enhanced, &mut rng)
}
