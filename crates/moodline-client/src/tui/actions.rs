use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::{App, PopupState};
use super::ui;

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    // Help popup → any key dismisses
    if app.popup.is_some() {
        app.popup = None;
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.quit(now);
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(now),
        KeyCode::Char('?') => app.popup = Some(PopupState::Help),

        // Browsing behaves like tapping the neighbouring item
        KeyCode::Char('h') | KeyCode::Left => app.tap_relative(-1, now),
        KeyCode::Char('l') | KeyCode::Right => app.tap_relative(1, now),

        // Navigation from "elsewhere in the app"
        KeyCode::Char('[') => app.navigate_weeks(-1, now),
        KeyCode::Char(']') => app.navigate_weeks(1, now),
        KeyCode::Char('t') => app.go_to_today(now),
        KeyCode::Char('s') => app.toggle_suppress(now),

        KeyCode::Char(c @ '1'..='5') => {
            if let Some(rating) = c.to_digit(10) {
                app.record_mood(rating as u8, now);
            }
        }

        _ => {}
    }
}

/// Handle a mouse event; only the strip reacts to the pointer
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) {
    if app.popup.is_some() {
        return;
    }

    let strip = ui::layout(app.screen).strip;
    let inside = mouse.row >= strip.y && mouse.row < strip.y + strip.height;
    let column = mouse.column.saturating_sub(strip.x);

    let signals = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => app.surface.press(column, now),
        // Drags and releases keep tracking once started, even off the strip
        MouseEventKind::Drag(MouseButton::Left) => app.surface.drag_to(column, now),
        MouseEventKind::Up(MouseButton::Left) => app.surface.release(column, now),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if inside => {
            app.surface.wheel(1)
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if inside => app.surface.wheel(-1),
        _ => Vec::new(),
    };

    app.apply_signals(signals, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::NaiveDate;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::time::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> (App, Instant) {
        let t0 = Instant::now();
        let mut app = App::new(Config::default(), day(15), day(15), false, t0).unwrap();
        app.resize(81, 24);
        app.after_draw(t0);
        let t = t0 + Duration::from_millis(200);
        app.tick(t);
        (app, t)
    }

    #[test]
    fn help_popup_swallows_next_key() {
        let (mut app, t) = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')), t);
        assert_eq!(app.popup, Some(PopupState::Help));
        handle_key_event(&mut app, key(KeyCode::Char('q')), t);
        assert!(app.popup.is_none());
        assert!(app.running);
    }

    #[test]
    fn digits_record_moods() {
        let (mut app, t) = app();
        handle_key_event(&mut app, key(KeyCode::Char('3')), t);
        assert_eq!(app.moods.get(day(15)).map(|m| m.rating()), Some(3));
        handle_key_event(&mut app, key(KeyCode::Char('9')), t);
        assert_eq!(app.moods.len(), 1);
    }

    #[test]
    fn click_on_strip_taps_the_item() {
        let (mut app, t) = app();
        // Anchor is centered: its cell starts at column 38, pitch 7
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 46, 3), t);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 46, 3), t);
        assert_eq!(app.selected, day(16));
    }

    #[test]
    fn click_outside_strip_is_ignored() {
        let (mut app, t) = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 46, 12), t);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 46, 12), t);
        assert_eq!(app.selected, day(15));
    }

    #[test]
    fn drag_on_strip_drives_controller_phase() {
        let (mut app, t) = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 40, 2), t);
        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Drag(MouseButton::Left), 30, 2),
            t + Duration::from_millis(30),
        );
        assert_eq!(app.phase(), moodline_common::Phase::Dragging);

        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Up(MouseButton::Left), 30, 2),
            t + Duration::from_millis(60),
        );
        assert_eq!(app.phase(), moodline_common::Phase::Settling);
        assert_eq!(app.selected, day(15));
    }
}
