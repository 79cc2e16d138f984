//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//!
//! The pager viewport is shared as `Rc<RefCell<_>>`: the state owns it, the
//! fade controllers only hold weak handles.  Every mutation of the viewport
//! goes through a method here that then fires the matching controller
//! callback.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::config::AppConfig;
use crate::core::{
    controller::ScrollFadeController,
    error::FadeError,
    fade::{FadeConfig, FadeState},
    source::{Content, ContentSource},
    viewport::Axis,
};
use crate::ui::{fader::FaderStyle, pager::PagerViewport};

use super::watch::ContentUpdate;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Pager,
    SettingsMenu,
}

// ───────────────────────────────────────── faders ────────────

/// One controller per scroll axis, bound to the same viewport.
pub struct Faders {
    pub vertical: ScrollFadeController<PagerViewport>,
    pub horizontal: ScrollFadeController<PagerViewport>,
}

impl Faders {
    pub fn bind(viewport: &Rc<RefCell<PagerViewport>>, fade_distance: u16) -> Result<Self, FadeError> {
        let config = FadeConfig::new(f64::from(fade_distance))?;
        Ok(Self {
            vertical: ScrollFadeController::initialize(Some(viewport), Axis::Vertical, config),
            horizontal: ScrollFadeController::initialize(Some(viewport), Axis::Horizontal, config),
        })
    }

    pub fn get(&self, axis: Axis) -> &ScrollFadeController<PagerViewport> {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn on_scroll(&mut self) -> bool {
        let v = self.vertical.on_scroll();
        let h = self.horizontal.on_scroll();
        v || h
    }

    pub fn on_resize(&mut self) -> bool {
        let v = self.vertical.on_resize();
        let h = self.horizontal.on_resize();
        v || h
    }

    pub fn on_content_mutation(&mut self) -> bool {
        let v = self.vertical.on_content_mutation();
        let h = self.horizontal.on_content_mutation();
        v || h
    }

    pub fn dispose(&mut self) {
        self.vertical.dispose();
        self.horizontal.dispose();
    }
}

// ───────────────────────────────────────── state ─────────────

/// Top-level application state.
pub struct AppState {
    /// Where the pager's lines come from.
    pub source: ContentSource,
    /// The scroll window (shared with the fade controllers).
    pub viewport: Rc<RefCell<PagerViewport>>,
    pub faders: Faders,
    /// User configuration (bindings + fade settings).
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last reload failure, shown until the next successful reload.
    pub reload_error: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// When the content last changed on screen.
    pub last_reload: Option<DateTime<Local>>,
    /// Monotonic generation id used to ignore stale reload results.
    pub reload_generation: u64,
    /// `true` while a reload thread is running.
    pub reload_in_flight: bool,
    /// Set by handlers to request a reload on the next loop iteration.
    pub needs_reload: bool,
    /// When the watcher last polled the source.
    pub last_poll: Instant,
}

impl AppState {
    pub fn new(source: ContentSource, content: Content, config: AppConfig) -> Result<Self, FadeError> {
        let viewport = Rc::new(RefCell::new(PagerViewport::new(content)));
        let faders = Faders::bind(&viewport, config.fade_distance)?;
        Ok(Self {
            source,
            viewport,
            faders,
            config,
            should_quit: false,
            status_message: None,
            reload_error: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            last_reload: Some(Local::now()),
            reload_generation: 0,
            reload_in_flight: false,
            needs_reload: false,
            last_poll: Instant::now(),
        })
    }

    pub fn fade_state(&self, axis: Axis) -> FadeState {
        self.faders.get(axis).fade_state()
    }

    pub fn fader_style(&self) -> FaderStyle {
        FaderStyle {
            width: self.config.fader_width,
            leading_offset: self.config.fader_offset,
            light: self.config.light,
        }
    }

    // ── viewport mutations ──────────────────────────────────────

    /// Scroll by `delta` rows/columns and notify the faders.
    pub fn scroll_by(&mut self, axis: Axis, delta: isize) {
        let moved = self.viewport.borrow_mut().scroll_by(axis, delta);
        if moved {
            self.faders.on_scroll();
        }
    }

    /// Jump to an absolute offset (clamped) and notify the faders.
    pub fn scroll_to(&mut self, axis: Axis, offset: usize) {
        let moved = self.viewport.borrow_mut().scroll_to(axis, offset);
        if moved {
            self.faders.on_scroll();
        }
    }

    pub fn page(&mut self, pages: isize) {
        let page = self.viewport.borrow().page_size() as isize;
        self.scroll_by(Axis::Vertical, pages * page);
    }

    /// Push the pane's current inner size into the viewport.  Called every
    /// frame; only an actual change counts as a resize.
    pub fn sync_viewport_size(&mut self, width: u16, height: u16) {
        let resized = self.viewport.borrow_mut().set_size(width, height);
        if resized {
            tracing::debug!(width, height, "pager resized");
            self.faders.on_resize();
        }
    }

    /// Swap in freshly loaded content; a real change counts as a mutation.
    pub fn apply_content(&mut self, content: Content) {
        let changed = self.viewport.borrow_mut().set_content(content);
        if changed {
            self.faders.on_content_mutation();
            self.last_reload = Some(Local::now());
        }
    }

    /// Handle a finished background reload.
    pub fn apply_reload(&mut self, update: ContentUpdate) {
        if update.generation != self.reload_generation {
            return;
        }
        self.reload_in_flight = false;
        match update.result {
            Ok(content) => {
                self.reload_error = None;
                self.apply_content(content);
            }
            Err(err) => {
                tracing::warn!("reload failed: {err}");
                self.reload_error = Some(err.to_string());
            }
        }
    }

    /// Start a new reload generation.  Returns the generation to tag it with,
    /// or `None` if one is already running.
    pub fn begin_reload(&mut self, now: Instant) -> Option<u64> {
        self.needs_reload = false;
        self.last_poll = now;
        if self.reload_in_flight {
            return None;
        }
        self.reload_in_flight = true;
        self.reload_generation = self.reload_generation.wrapping_add(1);
        Some(self.reload_generation)
    }

    /// Whether the watcher should poll the source at `now`.
    pub fn poll_due(&self, now: Instant) -> bool {
        if self.needs_reload {
            return true;
        }
        self.config.watch
            && now.duration_since(self.last_poll) >= Duration::from_millis(self.config.poll_ms)
    }

    /// Rebind the controllers after the fade distance changed.  Controller
    /// configuration is immutable, so the old pair is disposed and replaced.
    pub fn rebuild_faders(&mut self) {
        match Faders::bind(&self.viewport, self.config.fade_distance) {
            Ok(faders) => {
                self.faders.dispose();
                self.faders = faders;
            }
            Err(err) => {
                tracing::warn!("keeping previous faders: {err}");
                self.status_message = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize, cols: usize) -> Content {
        Content::new((0..rows).map(|i| format!("{i:0>cols$}")).collect())
    }

    fn state(rows: usize) -> AppState {
        let source = ContentSource::File("unused.txt".into());
        let mut config = AppConfig::default();
        config.fade_distance = 4;
        let mut state = AppState::new(source, numbered(rows, 10), config).unwrap();
        state.sync_viewport_size(10, 10);
        state
    }

    #[test]
    fn scrolling_drives_vertical_fader() {
        let mut s = state(100);
        assert_eq!(s.fade_state(Axis::Vertical).leading_opacity, 0.0);
        assert_eq!(s.fade_state(Axis::Vertical).trailing_opacity, 1.0);

        s.scroll_by(Axis::Vertical, 2);
        assert_eq!(s.fade_state(Axis::Vertical).leading_opacity, 0.5);

        s.scroll_to(Axis::Vertical, usize::MAX);
        assert_eq!(s.fade_state(Axis::Vertical).trailing_opacity, 0.0);
        assert!(s.fade_state(Axis::Horizontal).is_suppressed());
    }

    #[test]
    fn resize_recomputes() {
        let mut s = state(12);
        assert_eq!(s.fade_state(Axis::Vertical).trailing_opacity, 0.5);

        s.sync_viewport_size(10, 20);
        assert!(s.fade_state(Axis::Vertical).is_suppressed());
    }

    #[test]
    fn content_mutation_recomputes() {
        let mut s = state(5);
        assert!(s.fade_state(Axis::Vertical).is_suppressed());

        s.apply_content(numbered(50, 30));
        assert_eq!(s.fade_state(Axis::Vertical).trailing_opacity, 1.0);
        assert_eq!(s.fade_state(Axis::Horizontal).trailing_opacity, 1.0);
    }

    #[test]
    fn stale_reloads_are_ignored() {
        let mut s = state(5);
        let now = Instant::now();
        let first = s.begin_reload(now).unwrap();
        assert!(s.begin_reload(now).is_none());

        s.apply_reload(ContentUpdate {
            generation: first.wrapping_add(7),
            result: Ok(numbered(50, 10)),
        });
        assert!(s.fade_state(Axis::Vertical).is_suppressed());
        assert!(s.reload_in_flight);

        s.apply_reload(ContentUpdate {
            generation: first,
            result: Ok(numbered(50, 10)),
        });
        assert!(!s.reload_in_flight);
        assert_eq!(s.fade_state(Axis::Vertical).trailing_opacity, 1.0);
    }

    #[test]
    fn rebuilding_faders_applies_new_distance() {
        let mut s = state(100);
        s.scroll_to(Axis::Vertical, 2);
        assert_eq!(s.fade_state(Axis::Vertical).leading_opacity, 0.5);

        s.config.fade_distance = 8;
        s.rebuild_faders();
        assert_eq!(s.fade_state(Axis::Vertical).leading_opacity, 0.25);
    }

    #[test]
    fn poll_respects_watch_flag_and_interval() {
        let mut s = state(5);
        let start = s.last_poll;
        let later = start + Duration::from_millis(s.config.poll_ms);
        assert!(!s.poll_due(start));
        assert!(s.poll_due(later));

        s.config.watch = false;
        assert!(!s.poll_due(later));
        s.needs_reload = true;
        assert!(s.poll_due(later));
    }
}
