//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::viewport::Axis;

use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: isize = 3;
/// Columns panned per horizontal wheel notch.
const WHEEL_COLS: isize = 4;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Pager => handle_pager_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

// ── Pager view (configurable bindings) ──────────────────────────

fn handle_pager_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::ScrollUp => state.scroll_by(Axis::Vertical, -1),
        Action::ScrollDown => state.scroll_by(Axis::Vertical, 1),
        Action::ScrollLeft => state.scroll_by(Axis::Horizontal, -1),
        Action::ScrollRight => state.scroll_by(Axis::Horizontal, 1),
        Action::PageUp => state.page(-1),
        Action::PageDown => state.page(1),
        Action::Top => state.scroll_to(Axis::Vertical, 0),
        Action::Bottom => state.scroll_to(Axis::Vertical, usize::MAX),
        Action::Reload => {
            state.needs_reload = true;
            state.status_message = Some("Reloading…".into());
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Settings popup ──────────────────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Pager;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Wheel scrolls vertically; Shift+wheel (or a horizontal wheel) pans.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Pager {
        return;
    }
    let shifted = mouse.modifiers.contains(KeyModifiers::SHIFT);

    match mouse.kind {
        MouseEventKind::ScrollUp if shifted => state.scroll_by(Axis::Horizontal, -WHEEL_COLS),
        MouseEventKind::ScrollDown if shifted => state.scroll_by(Axis::Horizontal, WHEEL_COLS),
        MouseEventKind::ScrollUp => state.scroll_by(Axis::Vertical, -WHEEL_ROWS),
        MouseEventKind::ScrollDown => state.scroll_by(Axis::Vertical, WHEEL_ROWS),
        MouseEventKind::ScrollLeft => state.scroll_by(Axis::Horizontal, -WHEEL_COLS),
        MouseEventKind::ScrollRight => state.scroll_by(Axis::Horizontal, WHEEL_COLS),
        _ => {}
    }
}
