//! Edge fade overlays painted on top of an already-rendered pane.
//!
//! A terminal can't draw a translucent gradient, so the overlay blends the
//! colours of the cells underneath toward the fade background instead.  The
//! blend is strongest at the edge and falls off linearly across the overlay
//! width, scaled by the edge's opacity from a [`FadeState`].

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::core::{fade::FadeState, viewport::Axis};

/// Foreground assumed for cells that use the terminal default.
const DEFAULT_FG: (u8, u8, u8) = (229, 229, 229);

/// Cosmetic overlay settings; none of these affect the opacity maths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaderStyle {
    /// Overlay thickness in cells.
    pub width: u16,
    /// Cells to skip before the leading overlay starts (e.g. a sticky header).
    pub leading_offset: u16,
    /// Fade toward white instead of black.
    pub light: bool,
}

impl Default for FaderStyle {
    fn default() -> Self {
        Self {
            width: 2,
            leading_offset: 0,
            light: false,
        }
    }
}

impl FaderStyle {
    fn target(&self) -> (u8, u8, u8) {
        if self.light {
            (255, 255, 255)
        } else {
            (0, 0, 0)
        }
    }
}

/// Leading + trailing overlays for one axis.
pub struct EdgeFader {
    axis: Axis,
    state: FadeState,
    style: FaderStyle,
}

impl EdgeFader {
    pub fn new(axis: Axis, state: FadeState, style: FaderStyle) -> Self {
        Self { axis, state, style }
    }
}

impl Widget for EdgeFader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.is_suppressed() {
            return;
        }
        paint(area, buf, self.style.target(), |x, y| self.strength_at(area, x, y));
    }
}

impl EdgeFader {
    /// Overlay thickness that fits `extent`; the two bands never overlap.
    fn band(&self, extent: u16) -> u16 {
        self.style.width.min(extent / 2)
    }

    /// Blend strength for the cell at `(x, y)` inside `area`.
    fn strength_at(&self, area: Rect, x: u16, y: u16) -> f64 {
        let (at, extent) = match self.axis {
            Axis::Vertical => (y - area.y, area.height),
            Axis::Horizontal => (x - area.x, area.width),
        };
        let band = self.band(extent);
        if band == 0 {
            return 0.0;
        }
        // i = 0 is the cell touching the edge.
        let falloff = |i: u16| f64::from(band - i) / f64::from(band);

        let trailing_start = extent - band;
        if at >= trailing_start {
            return self.state.trailing_opacity * falloff(extent - 1 - at);
        }
        match at.checked_sub(self.style.leading_offset) {
            Some(i) if i < band => self.state.leading_opacity * falloff(i),
            _ => 0.0,
        }
    }
}

/// Both axes' overlays in one pass.  A corner cell covered by both is
/// blended once, with the stronger of the two.
pub struct EdgeFaders {
    pub vertical: EdgeFader,
    pub horizontal: EdgeFader,
}

impl Widget for EdgeFaders {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.vertical.state.is_suppressed() && self.horizontal.state.is_suppressed() {
            return;
        }
        let target = self.vertical.style.target();
        paint(area, buf, target, |x, y| {
            self.vertical
                .strength_at(area, x, y)
                .max(self.horizontal.strength_at(area, x, y))
        });
    }
}

fn paint(area: Rect, buf: &mut Buffer, target: (u8, u8, u8), strength: impl Fn(u16, u16) -> f64) {
    if area.is_empty() {
        return;
    }
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let strength = strength(x, y);
            if strength <= 0.0 {
                continue;
            }
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            let (r, g, b) = blend(rgb_of(cell.fg).unwrap_or(DEFAULT_FG), target, strength);
            cell.fg = Color::Rgb(r, g, b);
            // Only tint explicit backgrounds; the terminal default is left alone.
            if let Some(bg) = rgb_of(cell.bg) {
                let (r, g, b) = blend(bg, target, strength);
                cell.bg = Color::Rgb(r, g, b);
            }
        }
    }
}

/// Linear mix of `from` toward `to`; `t` is clamped to `[0, 1]`.
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// RGB approximation of a terminal colour.  `None` for the terminal default.
fn rgb_of(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Indexed(_) => DEFAULT_FG,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    fn filled(area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        for y in area.top()..area.bottom() {
            buf.set_string(area.x, y, "x".repeat(area.width as usize), Style::default().fg(Color::White));
        }
        buf
    }

    fn full() -> FadeState {
        FadeState {
            leading_opacity: 1.0,
            trailing_opacity: 1.0,
        }
    }

    #[test]
    fn suppressed_state_leaves_buffer_alone() {
        let area = Rect::new(0, 0, 6, 6);
        let mut buf = filled(area);
        let before = buf.clone();
        EdgeFader::new(Axis::Vertical, FadeState::default(), FaderStyle::default()).render(area, &mut buf);
        assert_eq!(buf, before);
    }

    #[test]
    fn vertical_overlay_darkens_edges_with_falloff() {
        let area = Rect::new(0, 0, 4, 8);
        let mut buf = filled(area);
        EdgeFader::new(Axis::Vertical, full(), FaderStyle::default()).render(area, &mut buf);

        assert_eq!(buf[(0u16, 0u16)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0u16, 1u16)].fg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(0u16, 4u16)].fg, Color::White);
        assert_eq!(buf[(3u16, 7u16)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn only_the_visible_edge_is_painted() {
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = filled(area);
        let state = FadeState {
            leading_opacity: 0.0,
            trailing_opacity: 1.0,
        };
        EdgeFader::new(Axis::Horizontal, state, FaderStyle { width: 1, ..FaderStyle::default() })
            .render(area, &mut buf);

        assert_eq!(buf[(0u16, 1u16)].fg, Color::White);
        assert_eq!(buf[(7u16, 1u16)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn leading_offset_and_light_variant() {
        let area = Rect::new(0, 0, 3, 6);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "abc", Style::default().fg(Color::Black));
        buf.set_string(0, 1, "abc", Style::default().fg(Color::Black));
        let style = FaderStyle {
            width: 1,
            leading_offset: 1,
            light: true,
        };
        let state = FadeState {
            leading_opacity: 1.0,
            trailing_opacity: 0.0,
        };
        EdgeFader::new(Axis::Vertical, state, style).render(area, &mut buf);

        assert_eq!(buf[(0u16, 0u16)].fg, Color::Black);
        assert_eq!(buf[(0u16, 1u16)].fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn short_extent_keeps_bands_apart() {
        let area = Rect::new(0, 0, 2, 3);
        let mut buf = filled(area);
        EdgeFader::new(Axis::Vertical, full(), FaderStyle::default()).render(area, &mut buf);

        assert_eq!(buf[(0u16, 0u16)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0u16, 1u16)].fg, Color::White);
        assert_eq!(buf[(0u16, 2u16)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn corners_are_blended_once() {
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = filled(area);
        let half = FadeState {
            leading_opacity: 0.5,
            trailing_opacity: 0.5,
        };
        let style = FaderStyle {
            width: 1,
            ..FaderStyle::default()
        };
        EdgeFaders {
            vertical: EdgeFader::new(Axis::Vertical, half, style),
            horizontal: EdgeFader::new(Axis::Horizontal, half, style),
        }
        .render(area, &mut buf);

        assert_eq!(buf[(0u16, 0u16)].fg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(3u16, 3u16)].fg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(1u16, 0u16)].fg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(1u16, 1u16)].fg, Color::White);
    }

    #[test]
    fn blend_is_clamped() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
        assert_eq!(blend((10, 10, 10), (0, 0, 0), 2.0), (0, 0, 0));
        assert_eq!(blend((10, 10, 10), (0, 0, 0), -1.0), (10, 10, 10));
    }
}
