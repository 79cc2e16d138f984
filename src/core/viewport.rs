//! The seam between the fade core and whatever actually scrolls.

use super::error::ViewportError;
use super::fade::ScrollMetrics;

/// Scroll direction a controller observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Leading edge = top, trailing edge = bottom.
    Vertical,
    /// Leading edge = left, trailing edge = right.
    Horizontal,
}

impl Axis {
    pub fn label(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }
}

/// Anything that can report its scroll geometry.
///
/// The host owns the viewport and decides when scroll, resize and content
/// mutation happen; it forwards those as calls on the bound
/// [`ScrollFadeController`](super::controller::ScrollFadeController).
pub trait Viewport {
    fn scroll_metrics(&self, axis: Axis) -> Result<ScrollMetrics, ViewportError>;
}
