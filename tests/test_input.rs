use arena_shooter::entities::Velocity;
use arena_shooter::input::*;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    }
}

fn press(code: KeyCode) -> KeyEvent {
    key(code, KeyEventKind::Press)
}

fn release(code: KeyCode) -> KeyEvent {
    key(code, KeyEventKind::Release)
}

// ── key mapping ───────────────────────────────────────────────────────────────

#[test]
fn arrows_and_wasd_map_to_the_same_actions() {
    assert_eq!(action_for(&KeyCode::Left), Some(Action::Left));
    assert_eq!(action_for(&KeyCode::Char('a')), Some(Action::Left));
    assert_eq!(action_for(&KeyCode::Right), action_for(&KeyCode::Char('D')));
    assert_eq!(action_for(&KeyCode::Up), action_for(&KeyCode::Char('w')));
    assert_eq!(action_for(&KeyCode::Down), action_for(&KeyCode::Char('s')));
    assert_eq!(action_for(&KeyCode::Char(' ')), Some(Action::Fire));
    assert_eq!(action_for(&KeyCode::Char('x')), None);
}

#[test]
fn quit_keys() {
    assert!(is_quit(&press(KeyCode::Char('q'))));
    assert!(is_quit(&press(KeyCode::Esc)));
    assert!(!is_quit(&press(KeyCode::Char('c'))));
    assert!(!is_quit(&release(KeyCode::Esc)));

    let ctrl_c = KeyEvent {
        modifiers: KeyModifiers::CONTROL,
        ..press(KeyCode::Char('c'))
    };
    assert!(is_quit(&ctrl_c));
}

// ── Controls::velocity ────────────────────────────────────────────────────────

#[test]
fn velocity_from_single_direction() {
    let c = Controls { left: true, ..Controls::default() };
    assert_eq!(c.velocity(0.2), Velocity::new(-0.2, 0.0));
    let c = Controls { down: true, ..Controls::default() };
    assert_eq!(c.velocity(0.2), Velocity::new(0.0, 0.2));
}

#[test]
fn opposite_directions_cancel() {
    let c = Controls { left: true, right: true, up: true, ..Controls::default() };
    assert_eq!(c.velocity(0.2), Velocity::new(0.0, -0.2));
}

// ── HeldKeys with release events ──────────────────────────────────────────────

#[test]
fn press_then_release_clears_key() {
    let mut keys = HeldKeys::new(true, 150);
    keys.handle(&press(KeyCode::Right), 0);
    assert!(keys.controls(10).right);
    keys.handle(&release(KeyCode::Right), 20);
    assert!(!keys.controls(30).right);
}

#[test]
fn held_key_never_expires_when_releases_are_reported() {
    let mut keys = HeldKeys::new(true, 150);
    keys.handle(&press(KeyCode::Char(' ')), 0);
    assert!(keys.controls(10_000).fire);
}

#[test]
fn releasing_one_of_two_opposite_keys_keeps_the_other() {
    let mut keys = HeldKeys::new(true, 150);
    keys.handle(&press(KeyCode::Left), 0);
    keys.handle(&press(KeyCode::Right), 5);
    assert_eq!(keys.controls(10).velocity(0.2), Velocity::new(0.0, 0.0));

    keys.handle(&release(KeyCode::Right), 20);
    assert_eq!(keys.controls(30).velocity(0.2), Velocity::new(-0.2, 0.0));
}

#[test]
fn releasing_one_alias_keeps_the_action_held() {
    let mut keys = HeldKeys::new(true, 150);
    keys.handle(&press(KeyCode::Left), 0);
    keys.handle(&press(KeyCode::Char('a')), 5);

    keys.handle(&release(KeyCode::Left), 20);
    assert_eq!(keys.controls(30).velocity(0.2), Velocity::new(-0.2, 0.0));

    keys.handle(&release(KeyCode::Char('a')), 40);
    assert!(!keys.controls(50).left);
}

#[test]
fn unmapped_keys_are_ignored() {
    let mut keys = HeldKeys::new(true, 150);
    keys.handle(&press(KeyCode::Char('z')), 0);
    assert_eq!(keys.controls(0), Controls::default());
}

// ── HeldKeys without release events ───────────────────────────────────────────

#[test]
fn key_expires_after_hold_window() {
    let mut keys = HeldKeys::new(false, 150);
    keys.handle(&press(KeyCode::Up), 100);
    assert!(keys.is_held(Action::Up, 250));
    assert!(!keys.is_held(Action::Up, 251));
}

#[test]
fn repeat_events_refresh_hold_window() {
    let mut keys = HeldKeys::new(false, 150);
    keys.handle(&press(KeyCode::Up), 0);
    keys.handle(&key(KeyCode::Up, KeyEventKind::Repeat), 100);
    keys.handle(&key(KeyCode::Up, KeyEventKind::Repeat), 200);
    assert!(keys.controls(300).up);
}

#[test]
fn aliases_expire_independently() {
    let mut keys = HeldKeys::new(false, 150);
    keys.handle(&press(KeyCode::Down), 0);
    keys.handle(&press(KeyCode::Char('s')), 100);
    assert!(keys.is_held(Action::Down, 200));
    assert!(keys.is_held(Action::Down, 250));
    assert!(!keys.is_held(Action::Down, 251));
}
