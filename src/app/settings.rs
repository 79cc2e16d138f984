//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and the popup renderer consume the same source of truth.

use super::state::AppState;
use crate::config::{FADER_WIDTHS, FADE_DISTANCES};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Apply the item's action (flip a toggle or advance a cycle).
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// Next entry after `current` in `choices`, wrapping; unknown values restart
/// from the first entry.
fn next_choice(choices: &[u16], current: u16) -> u16 {
    match choices.iter().position(|&c| c == current) {
        Some(idx) => choices[(idx + 1) % choices.len()],
        None => choices[0],
    }
}

fn persist(state: &mut AppState) {
    if let Err(err) = state.config.save() {
        tracing::warn!("cannot save config: {err}");
        state.status_message = Some(format!("Config not saved: {err}"));
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Cycle {
        label: "Fade Distance",
        value: |s| format!("{} rows", s.config.fade_distance),
        cycle: |s| {
            s.config.fade_distance = next_choice(FADE_DISTANCES, s.config.fade_distance);
            // Controllers keep their distance for life; swap in a new pair.
            s.rebuild_faders();
            persist(s);
            s.status_message = Some(format!("Fade distance: {}", s.config.fade_distance));
        },
    },
    SettingsItem::Cycle {
        label: "Fader Width",
        value: |s| format!("{} cells", s.config.fader_width),
        cycle: |s| {
            s.config.fader_width = next_choice(FADER_WIDTHS, s.config.fader_width);
            persist(s);
            s.status_message = Some(format!("Fader width: {}", s.config.fader_width));
        },
    },
    SettingsItem::Toggle {
        label: "Light Faders",
        get: |s| s.config.light,
        set: |s, v| {
            s.config.light = v;
            persist(s);
        },
    },
    SettingsItem::Toggle {
        label: "Watch Content",
        get: |s| s.config.watch,
        set: |s, v| {
            s.config.watch = v;
            persist(s);
            if v {
                s.needs_reload = true;
            }
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_choice_wraps_and_recovers() {
        assert_eq!(next_choice(&[1, 2, 3], 1), 2);
        assert_eq!(next_choice(&[1, 2, 3], 3), 1);
        assert_eq!(next_choice(&[1, 2, 3], 9), 1);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = SETTINGS_ITEMS.iter().map(|i| i.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SETTINGS_ITEMS.len());
    }
}
