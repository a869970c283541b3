/// Keyboard handling: which keys are held, and what that means for the
/// player this tick.
///
/// Rather than acting on each key event, we record when every game key was
/// last pressed (or repeated) and derive a `Controls` snapshot once per tick.
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol and friends): real
///   `Release` events remove the key immediately.
/// * **Classic terminals**: only `Press` events, with OS key-repeat showing
///   up as repeated presses.  A key expires after `hold_window_ms` of
///   silence, which is longer than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Velocity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

/// What the player is asking for during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl Controls {
    /// Velocity from the held directions.  Opposite keys cancel out, and
    /// releasing one of them leaves the other in effect.
    pub fn velocity(&self, speed: f64) -> Velocity {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f64 * speed;
        Velocity::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Map a key to the game action it drives.  Arrows and WASD both move.
pub fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Down),
        KeyCode::Char(' ') => Some(Action::Fire),
        _ => None,
    }
}

/// Q, Esc or Ctrl-C.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Debug)]
pub struct HeldKeys {
    /// Each held key → the time (ms) it was last seen pressed.
    last_seen: HashMap<KeyCode, u64>,
    release_events: bool,
    hold_window_ms: u64,
}

impl HeldKeys {
    pub fn new(release_events: bool, hold_window_ms: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            release_events,
            hold_window_ms,
        }
    }

    pub fn handle(&mut self, event: &KeyEvent, now_ms: u64) {
        if action_for(&event.code).is_none() {
            return;
        }
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(event.code, now_ms);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&event.code);
            }
        }
    }

    fn is_key_held(&self, last: u64, now_ms: u64) -> bool {
        self.release_events || now_ms.saturating_sub(last) <= self.hold_window_ms
    }

    /// True while any key bound to `action` is held; arrow and letter
    /// aliases count independently.
    pub fn is_held(&self, action: Action, now_ms: u64) -> bool {
        self.last_seen
            .iter()
            .any(|(code, &last)| action_for(code) == Some(action) && self.is_key_held(last, now_ms))
    }

    pub fn controls(&self, now_ms: u64) -> Controls {
        Controls {
            left: self.is_held(Action::Left, now_ms),
            right: self.is_held(Action::Right, now_ms),
            up: self.is_held(Action::Up, now_ms),
            down: self.is_held(Action::Down, now_ms),
            fire: self.is_held(Action::Fire, now_ms),
        }
    }
}
