//! Scrollable text pane: the viewport the fade controllers observe, plus the
//! widget that draws its visible window.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::core::{
    error::ViewportError,
    fade::ScrollMetrics,
    source::Content,
    viewport::{Axis, Viewport},
};

use super::theme::Theme;

// ───────────────────────────────────────── viewport ──────────

/// Content lines plus the scroll window onto them.
///
/// Offsets are kept within the scrollable range whenever content or size
/// changes, so a shrinking file never leaves the window past the end.
#[derive(Debug, Default)]
pub struct PagerViewport {
    content: Option<Content>,
    content_width: usize,
    /// First visible row.
    row: usize,
    /// First visible column.
    col: usize,
    width: u16,
    height: u16,
}

impl PagerViewport {
    pub fn new(content: Content) -> Self {
        let mut viewport = Self::default();
        viewport.set_content(content);
        viewport
    }

    /// Replace the lines.  Returns `true` if they actually differ.
    pub fn set_content(&mut self, content: Content) -> bool {
        let changed = self
            .content
            .as_ref()
            .map_or(true, |c| c.fingerprint != content.fingerprint);
        self.content_width = content.width();
        self.content = Some(content);
        self.clamp();
        changed
    }

    pub fn lines(&self) -> &[String] {
        self.content
            .as_ref()
            .map(|c| c.lines.as_slice())
            .unwrap_or(&[])
    }

    /// Record the visible size.  Returns `true` if it changed.
    pub fn set_size(&mut self, width: u16, height: u16) -> bool {
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.clamp();
        true
    }

    pub fn offset(&self, axis: Axis) -> usize {
        match axis {
            Axis::Vertical => self.row,
            Axis::Horizontal => self.col,
        }
    }

    /// Largest valid offset along `axis`.
    pub fn max_offset(&self, axis: Axis) -> usize {
        match axis {
            Axis::Vertical => self.lines().len().saturating_sub(self.height as usize),
            Axis::Horizontal => self.content_width.saturating_sub(self.width as usize),
        }
    }

    /// Scroll by `delta` rows/columns.  Returns `true` if the offset moved.
    pub fn scroll_by(&mut self, axis: Axis, delta: isize) -> bool {
        let current = self.offset(axis);
        let target = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize)
        };
        self.scroll_to(axis, target)
    }

    /// Jump to `offset`, clamped.  Returns `true` if the offset moved.
    pub fn scroll_to(&mut self, axis: Axis, offset: usize) -> bool {
        let offset = offset.min(self.max_offset(axis));
        let slot = match axis {
            Axis::Vertical => &mut self.row,
            Axis::Horizontal => &mut self.col,
        };
        if *slot == offset {
            return false;
        }
        *slot = offset;
        true
    }

    pub fn page_size(&self) -> usize {
        (self.height as usize).max(1)
    }

    fn clamp(&mut self) {
        self.row = self.row.min(self.max_offset(Axis::Vertical));
        self.col = self.col.min(self.max_offset(Axis::Horizontal));
    }
}

impl Viewport for PagerViewport {
    fn scroll_metrics(&self, axis: Axis) -> Result<ScrollMetrics, ViewportError> {
        if self.content.is_none() {
            return Err(ViewportError::Detached);
        }
        let metrics = match axis {
            Axis::Vertical => ScrollMetrics::new(
                self.row as f64,
                self.lines().len() as f64,
                f64::from(self.height),
            ),
            Axis::Horizontal => ScrollMetrics::new(
                self.col as f64,
                self.content_width as f64,
                f64::from(self.width),
            ),
        };
        Ok(metrics)
    }
}

// ───────────────────────────────────────── widget ────────────

/// Draws the visible window of a [`PagerViewport`].  Created fresh each frame.
pub struct PagerWidget<'a> {
    viewport: &'a PagerViewport,
    block: Option<Block<'a>>,
}

impl<'a> PagerWidget<'a> {
    pub fn new(viewport: &'a PagerViewport) -> Self {
        Self {
            viewport,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PagerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let visible = self
            .viewport
            .lines()
            .iter()
            .skip(self.viewport.row)
            .take(inner.height as usize);

        for (i, text) in visible.enumerate() {
            let y = inner.y + i as u16;
            let shown = column_window(text, self.viewport.col, inner.width as usize);
            let line = Line::styled(shown, Theme::content_style());
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

/// The part of `text` that falls in columns `start..start + width`.
///
/// A wide glyph cut by the left edge leaves blank cells in its place, and one
/// that would overflow the right edge is dropped.
fn column_window(text: &str, start: usize, width: usize) -> String {
    let mut shown = String::new();
    let mut col = 0;
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        let end = col + w;
        if col < start {
            if end > start {
                let pad = (end - start).min(width - used);
                shown.extend(std::iter::repeat(' ').take(pad));
                used += pad;
            }
            col = end;
            continue;
        }
        if used + w > width {
            break;
        }
        shown.push(ch);
        used += w;
        col = end;
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(rows: usize, cols: usize) -> Content {
        Content::new((0..rows).map(|i| format!("{i:0>width$}", width = cols)).collect())
    }

    #[test]
    fn metrics_follow_offsets_and_size() {
        let mut vp = PagerViewport::new(content(100, 120));
        vp.set_size(80, 20);
        vp.scroll_by(Axis::Vertical, 5);
        vp.scroll_by(Axis::Horizontal, 3);

        assert_eq!(
            vp.scroll_metrics(Axis::Vertical).unwrap(),
            ScrollMetrics::new(5.0, 100.0, 20.0)
        );
        assert_eq!(
            vp.scroll_metrics(Axis::Horizontal).unwrap(),
            ScrollMetrics::new(3.0, 120.0, 80.0)
        );
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut vp = PagerViewport::new(content(30, 10));
        vp.set_size(10, 10);

        assert!(!vp.scroll_by(Axis::Vertical, -4));
        assert!(vp.scroll_by(Axis::Vertical, 1000));
        assert_eq!(vp.offset(Axis::Vertical), 20);
        assert!(!vp.scroll_by(Axis::Horizontal, 5));
    }

    #[test]
    fn shrinking_content_pulls_offset_back() {
        let mut vp = PagerViewport::new(content(50, 10));
        vp.set_size(10, 10);
        vp.scroll_to(Axis::Vertical, 40);

        assert!(vp.set_content(content(15, 10)));
        assert_eq!(vp.offset(Axis::Vertical), 5);
    }

    #[test]
    fn identical_content_is_not_a_change() {
        let mut vp = PagerViewport::new(content(5, 5));
        assert!(!vp.set_content(content(5, 5)));
    }

    #[test]
    fn empty_viewport_is_detached() {
        let vp = PagerViewport::default();
        assert_eq!(vp.scroll_metrics(Axis::Vertical), Err(ViewportError::Detached));
    }

    #[test]
    fn wide_glyphs_are_measured_in_columns() {
        let mut vp = PagerViewport::new(Content::new(vec!["漢".repeat(30)]));
        vp.set_size(40, 5);

        let metrics = vp.scroll_metrics(Axis::Horizontal).unwrap();
        assert_eq!(metrics, ScrollMetrics::new(0.0, 60.0, 40.0));
        assert_eq!(vp.max_offset(Axis::Horizontal), 20);

        let state = crate::core::fade::compute_fade_state(metrics, 3.0);
        assert_eq!(state.trailing_opacity, 1.0);
    }

    #[test]
    fn column_window_clips_by_display_width() {
        assert_eq!(column_window("漢字abc", 0, 3), "漢");
        assert_eq!(column_window("漢字abc", 1, 3), " 字");
        assert_eq!(column_window("漢字abc", 4, 10), "abc");
        assert_eq!(column_window("plain", 2, 2), "ai");
    }

    #[test]
    fn widget_draws_visible_window() {
        let mut vp = PagerViewport::new(Content::new(vec![
            "first".into(),
            "second".into(),
            "third".into(),
        ]));
        vp.set_size(3, 2);
        vp.scroll_to(Axis::Vertical, 1);
        vp.scroll_to(Axis::Horizontal, 2);

        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        PagerWidget::new(&vp).render(area, &mut buf);

        assert_eq!(buf[(0u16, 0u16)].symbol(), "c");
        assert_eq!(buf[(2u16, 0u16)].symbol(), "n");
        assert_eq!(buf[(0u16, 1u16)].symbol(), "i");
    }
}
