use crossterm::event::KeyCode;

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Zero all gauges
    Reset,
    /// Stop/resume applying incoming readings
    TogglePause,
    /// No action
    None,
}

impl MonitorEvent {
    pub fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => MonitorEvent::ToggleHelp,
            KeyCode::Char('r') => MonitorEvent::Reset,
            KeyCode::Char('p') | KeyCode::Char(' ') => MonitorEvent::TogglePause,
            _ => MonitorEvent::None,
        }
    }
}
