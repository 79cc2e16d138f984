//! Keeps a [`FadeState`] in sync with a live viewport.
//!
//! The controller never subscribes to anything itself.  It exposes one
//! callback per observed event ([`on_scroll`], [`on_resize`],
//! [`on_content_mutation`]) and the host calls them from its own event loop.
//! The viewport is held weakly: once the host drops it, callbacks become
//! no-ops instead of errors.
//!
//! [`on_scroll`]: ScrollFadeController::on_scroll
//! [`on_resize`]: ScrollFadeController::on_resize
//! [`on_content_mutation`]: ScrollFadeController::on_content_mutation

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use super::error::ViewportError;
use super::fade::{compute_fade_state, FadeConfig, FadeState, ScrollMetrics};
use super::viewport::{Axis, Viewport};

/// Events a bound controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observation {
    Scroll,
    Resize,
    ContentMutation,
}

impl Observation {
    pub const ALL: &[Observation] = &[
        Observation::Scroll,
        Observation::Resize,
        Observation::ContentMutation,
    ];
}

/// Derives edge-fade opacities for one axis of a viewport.
pub struct ScrollFadeController<V: Viewport> {
    axis: Axis,
    config: FadeConfig,
    viewport: Option<Weak<RefCell<V>>>,
    /// Active observation bindings.  Empty when inert or disposed.
    bindings: HashSet<Observation>,
    state: FadeState,
    /// Number of successful recomputations.
    recomputes: u64,
}

impl<V: Viewport> ScrollFadeController<V> {
    /// Bind to `viewport` and compute the initial state.
    ///
    /// With no viewport the controller is inert: it holds no bindings and
    /// reports the suppressed [`FadeState`] forever.
    pub fn initialize(viewport: Option<&Rc<RefCell<V>>>, axis: Axis, config: FadeConfig) -> Self {
        let mut controller = Self {
            axis,
            config,
            viewport: viewport.map(Rc::downgrade),
            bindings: HashSet::new(),
            state: FadeState::default(),
            recomputes: 0,
        };

        if controller.viewport.is_none() {
            tracing::debug!(axis = axis.label(), "fade controller has no viewport; staying inert");
            return controller;
        }

        controller.bindings.extend(Observation::ALL.iter().copied());
        controller.recompute();
        controller
    }

    pub fn on_scroll(&mut self) -> bool {
        self.observe(Observation::Scroll)
    }

    pub fn on_resize(&mut self) -> bool {
        self.observe(Observation::Resize)
    }

    pub fn on_content_mutation(&mut self) -> bool {
        self.observe(Observation::ContentMutation)
    }

    /// Drop every binding and the viewport handle.  Idempotent.
    pub fn dispose(&mut self) {
        if self.viewport.take().is_some() {
            tracing::debug!(axis = self.axis.label(), recomputes = self.recomputes, "fade controller disposed");
        }
        self.bindings.clear();
    }

    pub fn fade_state(&self) -> FadeState {
        self.state
    }

    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Returns `true` when the stored state changed.
    fn observe(&mut self, observation: Observation) -> bool {
        if !self.bindings.contains(&observation) {
            return false;
        }
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let metrics = match self.current_metrics() {
            Ok(m) => m,
            Err(err) => {
                tracing::debug!(axis = self.axis.label(), %err, "fade recompute skipped");
                return false;
            }
        };

        self.recomputes += 1;
        let next = compute_fade_state(metrics, self.config.fade_distance());
        let changed = next != self.state;
        self.state = next;
        changed
    }

    fn current_metrics(&self) -> Result<ScrollMetrics, ViewportError> {
        let viewport = self
            .viewport
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(ViewportError::Detached)?;
        // A viewport borrowed mutably elsewhere is mid-update; skip this round.
        let viewport = viewport.try_borrow().map_err(|_| ViewportError::Detached)?;
        viewport.scroll_metrics(self.axis)?.validate()
    }
}
