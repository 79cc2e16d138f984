//! Bottom status bar: key hints or messages on the left, fade readout and
//! last reload time on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use unicode_width::UnicodeWidthStr;

use crate::app::state::{ActiveView, AppState};
use crate::core::{fade::FadeState, viewport::Axis};

use super::theme::Theme;

pub struct StatusBar<'a> {
    pub state: &'a AppState,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        Paragraph::new("").style(Theme::status_bar_style()).render(area, buf);

        let left = if let Some(ref err) = state.reload_error {
            Span::styled(format!(" {err}"), Theme::error_style())
        } else if state.active_view == ActiveView::SettingsMenu {
            Span::styled("", Theme::status_bar_style())
        } else {
            let text = state
                .status_message
                .clone()
                .unwrap_or_else(|| state.config.status_bar_hint());
            Span::styled(format!(" {text}"), Theme::status_bar_style())
        };

        let mut right = fade_readout(
            state.fade_state(Axis::Vertical),
            state.fade_state(Axis::Horizontal),
        );
        if let Some(at) = state.last_reload {
            right.push_str(&format!(" · {} ", at.format("%H:%M:%S")));
        }
        let right_width = right.width() as u16;

        let left_width = area.width.saturating_sub(right_width);
        buf.set_line(area.x, area.y, &Line::from(left), left_width);
        if right_width <= area.width {
            buf.set_line(
                area.x + area.width - right_width,
                area.y,
                &Line::styled(right, Theme::status_bar_style()),
                right_width,
            );
        }
    }
}

/// Compact opacity readout, e.g. `"▲0.50 ▼1.00 ◀0.00 ▶0.00"`.
pub fn fade_readout(vertical: FadeState, horizontal: FadeState) -> String {
    format!(
        "▲{:.2} ▼{:.2} ◀{:.2} ▶{:.2}",
        vertical.leading_opacity,
        vertical.trailing_opacity,
        horizontal.leading_opacity,
        horizontal.trailing_opacity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_formats_all_edges() {
        let v = FadeState {
            leading_opacity: 0.5,
            trailing_opacity: 1.0,
        };
        assert_eq!(fade_readout(v, FadeState::default()), "▲0.50 ▼1.00 ◀0.00 ▶0.00");
    }
}
