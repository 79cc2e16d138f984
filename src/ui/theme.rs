//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── pager ──────────────────────────────────────────────────
    pub fn content_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn error_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::LightRed)
    }

    // ── popups ─────────────────────────────────────────────────
    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_item_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn popup_hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn toggle_on_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn value_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
