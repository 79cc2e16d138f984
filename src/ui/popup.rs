//! Popup overlay for the settings menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;

use super::theme::Theme;

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Settings ")
            .title_style(Theme::popup_title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::popup_border_style());

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = if i == self.state.settings_selected {
                (" ▸ ", Theme::popup_selected_style())
            } else {
                ("   ", Theme::popup_item_style())
            };

            let (suffix, suffix_style) = match item {
                SettingsItem::Toggle { get, .. } => {
                    if get(self.state) {
                        ("[ON]".to_string(), Theme::toggle_on_style())
                    } else {
                        ("[OFF]".to_string(), Theme::popup_hint_style())
                    }
                }
                SettingsItem::Cycle { value, .. } => (value(self.state), Theme::value_style()),
            };

            let label_col = format!("{prefix}{:<20}", item.label());
            lines.push(Line::from(vec![
                Span::styled(label_col, style),
                Span::styled(format!("  {suffix}"), suffix_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Theme::popup_hint_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
