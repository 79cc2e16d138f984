//! Edge-fade opacity computation.
//!
//! A scrollable viewport gets two overlays: one at the leading edge (top or
//! left) and one at the trailing edge (bottom or right).  Each overlay's
//! opacity ramps over `fade_distance` units, so an overlay is fully visible
//! once there is at least that much content hidden beyond its edge and fades
//! out as the viewport reaches the edge.
//!
//! Everything here is pure; see [`super::controller`] for the part that keeps
//! a [`FadeState`] in sync with a live viewport.

use super::error::{FadeError, ViewportError};

// ───────────────────────────────────────── metrics ───────────

/// Snapshot of a viewport's geometry along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the leading edge.
    pub scroll_offset: f64,
    /// Total size of the content along the axis.
    pub content_size: f64,
    /// Size of the visible window along the axis.
    pub viewport_size: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_offset: f64, content_size: f64, viewport_size: f64) -> Self {
        Self {
            scroll_offset,
            content_size,
            viewport_size,
        }
    }

    /// How far the content can scroll.  Zero or negative when it fits.
    pub fn scrollable(&self) -> f64 {
        self.content_size - self.viewport_size
    }

    /// Reject metrics a viewport should never report: non-finite values or
    /// negative sizes/offsets.
    pub fn validate(self) -> Result<Self, ViewportError> {
        let fields = [self.scroll_offset, self.content_size, self.viewport_size];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ViewportError::Malformed(self));
        }
        Ok(self)
    }
}

// ───────────────────────────────────────── config ────────────

/// Controller configuration.  Immutable once a controller is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeConfig {
    fade_distance: f64,
}

impl FadeConfig {
    /// `fade_distance` must be finite and strictly positive.
    pub fn new(fade_distance: f64) -> Result<Self, FadeError> {
        if !fade_distance.is_finite() || fade_distance <= 0.0 {
            return Err(FadeError::InvalidFadeDistance(fade_distance));
        }
        Ok(Self { fade_distance })
    }

    pub fn fade_distance(&self) -> f64 {
        self.fade_distance
    }
}

// ───────────────────────────────────────── state ─────────────

/// Opacities of the two edge overlays, each in `[0, 1]`.
///
/// The default is the suppressed state: both overlays hidden.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FadeState {
    pub leading_opacity: f64,
    pub trailing_opacity: f64,
}

impl FadeState {
    /// True when neither overlay would paint anything.
    pub fn is_suppressed(&self) -> bool {
        self.leading_opacity == 0.0 && self.trailing_opacity == 0.0
    }
}

/// Derive overlay opacities from a metrics snapshot.
///
/// Content that fits the viewport gets no overlays at all.  Otherwise the
/// leading overlay ramps 0 → 1 over the first `fade_distance` units of scroll
/// and the trailing overlay ramps 1 → 0 over the last `fade_distance` units.
pub fn compute_fade_state(metrics: ScrollMetrics, fade_distance: f64) -> FadeState {
    let scrollable = metrics.scrollable();
    if scrollable <= 0.0 {
        return FadeState::default();
    }

    let offset = metrics.scroll_offset;

    let leading = (offset / fade_distance).min(1.0);

    let trailing = if offset < scrollable - fade_distance {
        1.0
    } else {
        (scrollable - offset) / fade_distance
    };

    FadeState {
        leading_opacity: leading.clamp(0.0, 1.0),
        trailing_opacity: trailing.clamp(0.0, 1.0),
    }
}
