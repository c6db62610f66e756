use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::Config;
use crate::core::power_monitor::{HttpSource, PollEvent, PollRuntime, PowerMonitor};

use super::event_handler::MonitorEvent;
use super::render::render_ui;

/// Redraw cadence, independent of the poll period.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Monitor application state
pub struct MonitorApp {
    pub monitor: PowerMonitor,
    pub source_url: String,
    pub interval_ms: u64,
    pub should_quit: bool,
    pub show_help: bool,
    pub paused: bool,
}

impl MonitorApp {
    pub fn new(config: &Config) -> Result<Self> {
        let source_url = config
            .source_url()
            .context("Invalid data source")?
            .to_string();

        Ok(Self {
            monitor: PowerMonitor::new(config),
            source_url,
            interval_ms: config.period_ms,
            should_quit: false,
            show_help: false,
            paused: false,
        })
    }

    /// Feed one poll outcome into the gauges. Readings are dropped while paused.
    pub fn handle_poll_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::Reading(_) if self.paused => {}
            other => self.monitor.handle(other),
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleHelp => self.show_help = !self.show_help,
            MonitorEvent::Reset => self.monitor.reset(),
            MonitorEvent::TogglePause => self.paused = !self.paused,
            MonitorEvent::None => {}
        }
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(config: Config) -> Result<()> {
    let mut app = MonitorApp::new(&config)?;
    let source = HttpSource::from_config(&config)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut terminal = or_restore(enter_screen, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    // Polling starts once the screen is ready
    let result = PollRuntime::start(Duration::from_millis(config.period_ms), source)
        .and_then(|mut runtime| {
            let outcome = run_loop(&mut terminal, &mut app, &mut runtime);
            runtime.shutdown();
            outcome
        });

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Run `setup`, calling `restore` if it fails.
fn or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MonitorApp,
    runtime: &mut PollRuntime,
) -> Result<()> {
    loop {
        // This thread is the only writer of the gauges
        while let Some(event) = runtime.try_next() {
            app.handle_poll_event(event);
        }

        terminal.draw(|frame| render_ui(frame, &*app))?;

        if event::poll(FRAME_INTERVAL).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    app.handle_event(MonitorEvent::from_key(key.code));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
