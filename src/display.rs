/// Rendering layer — all terminal drawing lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; the arena is scaled onto the
/// terminal grid and every active entity becomes a block of coloured cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::ArenaConfig;
use crate::entities::{GameState, GameStatus, Kinematic};
use crate::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::Red;
const C_PROJECTILE: Color = Color::Blue;
const C_ENEMY: Color = Color::Green;
const C_SCORE: Color = Color::White;

const BLOCK: &str = "█";

/// Smallest terminal the arena can reasonably be drawn on.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 15;

// ── Arena → terminal mapping ──────────────────────────────────────────────────

/// A span of terminal cells: column, row, width, height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    cols: u16,
    rows: u16,
    arena_width: i32,
    arena_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, arena: &ArenaConfig) -> Self {
        Self {
            cols,
            rows,
            arena_width: arena.width,
            arena_height: arena.height,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Cells covered by `rect`, clipped to the screen.  Anything with area
    /// inside the arena covers at least one cell; `None` if fully off-screen.
    pub fn to_cells(&self, rect: &Rect) -> Option<CellRect> {
        let (c0, c1) = scale_span(rect.x, rect.right(), self.cols, self.arena_width);
        let (r0, r1) = scale_span(rect.y, rect.bottom(), self.rows, self.arena_height);
        if c1 <= c0 || r1 <= r0 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            width: (c1 - c0) as u16,
            height: (r1 - r0) as u16,
        })
    }
}

/// Map the arena interval `[from, to)` onto `[0, cells)`, widening outward
/// to whole cells.
fn scale_span(from: i32, to: i32, cells: u16, extent: i32) -> (i64, i64) {
    let cells = i64::from(cells);
    let extent = i64::from(extent.max(1));
    let start = (i64::from(from) * cells).div_euclid(extent);
    let end = -((-i64::from(to) * cells).div_euclid(extent));
    (start.clamp(0, cells), end.clamp(0, cells))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for projectile in state.projectiles.iter().filter(|p| p.active) {
        draw_rect(out, viewport, projectile.rect(), C_PROJECTILE)?;
    }
    for enemy in state.enemies.iter().filter(|e| e.active) {
        draw_rect(out, viewport, enemy.rect(), C_ENEMY)?;
    }
    draw_rect(out, viewport, state.player.rect(), C_PLAYER)?;

    draw_score(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, viewport)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_rect<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    let Some(cells) = viewport.to_cells(rect) else {
        return Ok(());
    };
    let line = BLOCK.repeat(cells.width as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in cells.row..cells.row + cells.height {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_score<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;
    Ok(())
}

// ── Game-over banner ──────────────────────────────────────────────────────────

const C_BANNER: Color = Color::DarkRed;
const C_BANNER_TEXT: Color = Color::White;

/// A red band across the full width of the arena, three rows tall and
/// centred vertically, with the final score in the middle row.  The
/// entities underneath stay visible above and below it.
fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let text = format!("GAME OVER - Final score: {}", state.score);
    let width = viewport.cols();
    let middle = viewport.rows() / 2;
    let blank = " ".repeat(width as usize);

    out.queue(style::SetBackgroundColor(C_BANNER))?;
    for row in middle.saturating_sub(1)..=middle + 1 {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }

    let col = width.saturating_sub(text.chars().count() as u16) / 2;
    out.queue(style::SetForegroundColor(C_BANNER_TEXT))?;
    out.queue(cursor::MoveTo(col, middle))?;
    out.queue(Print(&text))?;

    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    Ok(())
}
