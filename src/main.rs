//! A terminal pager with scroll-fade edge indicators.
//!
//! Run the binary on a file or directory to page through it.  Overlays at the
//! top/bottom and left/right edges fade in when there is more content to
//! scroll to in that direction.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
    watch::{self, ContentUpdate},
};
use crate::config::AppConfig;
use crate::core::{
    source::{ContentSource, ListingConfig},
    viewport::Axis,
};
use crate::ui::{
    fader::{EdgeFader, EdgeFaders}, layout::AppLayout, pager::PagerWidget, popup::SettingsPopup,
    status::StatusBar, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Pager with scroll-fade edge indicators")]
struct Cli {
    /// File or directory to page (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Rows/columns over which an edge overlay ramps to full opacity.
    #[arg(long)]
    fade_distance: Option<u16>,

    /// Overlay thickness in cells.
    #[arg(long)]
    fader_width: Option<u16>,

    /// Cells skipped before the leading overlay.
    #[arg(long)]
    fader_offset: Option<u16>,

    /// Fade toward white (for light terminal themes).
    #[arg(long)]
    light: bool,

    /// Don't poll the content for changes.
    #[arg(long)]
    no_watch: bool,

    /// Maximum listing depth when PATH is a directory.
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Include hidden (dot) files in directory listings.
    #[arg(long)]
    hidden: bool,

    /// Write logs here instead of stderr (which the TUI occupies).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(d) = self.fade_distance {
            config.fade_distance = d.max(1);
        }
        if let Some(w) = self.fader_width {
            config.fader_width = w;
        }
        if let Some(o) = self.fader_offset {
            config.fader_offset = o;
        }
        if self.light {
            config.light = true;
        }
        if self.no_watch {
            config.watch = false;
        }
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(), // never pollute stdout
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    let block = Block::default()
        .title(format!(" {} ", state.source.path().display()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let inner = block.inner(layout.pager_area);

    // Layout is only known now; feed it back before anything reads metrics.
    state.sync_viewport_size(inner.width, inner.height);

    {
        let viewport = state.viewport.borrow();
        frame.render_widget(PagerWidget::new(&viewport).block(block), layout.pager_area);
    }

    let style = state.fader_style();
    let faders = EdgeFaders {
        vertical: EdgeFader::new(Axis::Vertical, state.fade_state(Axis::Vertical), style),
        horizontal: EdgeFader::new(Axis::Horizontal, state.fade_state(Axis::Horizontal), style),
    };
    frame.render_widget(faders, inner);

    frame.render_widget(StatusBar { state: &*state }, layout.status_area);

    if state.active_view == ActiveView::SettingsMenu {
        frame.render_widget(SettingsPopup { state: &*state }, frame.area());
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    // ── load content ──────────────────────────────────────────
    let listing = ListingConfig {
        max_depth: cli.depth.max(1),
        show_hidden: cli.hidden,
        ..ListingConfig::default()
    };
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("cannot open {}", cli.path.display()))?;
    let source = ContentSource::detect(&root, listing);
    let content = source.load()?;

    let mut config = AppConfig::load();
    cli.apply_overrides(&mut config);
    let mut state = AppState::new(source, content, config)?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (reload_tx, mut reload_rx) = tokio::sync::mpsc::unbounded_channel::<ContentUpdate>();

    // ── event loop ────────────────────────────────────────────
    let result: Result<()> = loop {
        if let Err(err) = terminal.draw(|frame| draw(frame, &mut state)) {
            break Err(err.into());
        }

        // ── kick off a reload AFTER draw ─────────────────────────
        let now = Instant::now();
        if state.poll_due(now) {
            if let Some(generation) = state.begin_reload(now) {
                watch::spawn_reload(reload_tx.clone(), generation, state.source.clone());
            }
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    // The next draw pushes the new size into the viewport.
                    AppEvent::Resize(_, _) => {}
                    AppEvent::FocusGained => state.needs_reload = true,
                    AppEvent::Tick => {}
                }
            }

            Some(update) = reload_rx.recv() => {
                state.apply_reload(update);
            }
        }

        if state.should_quit {
            break Ok(());
        }
    };

    // ── teardown ──────────────────────────────────────────────
    state.faders.dispose();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}
