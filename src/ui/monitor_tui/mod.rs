//! Terminal User Interface for power monitoring.
//!
//! Provides a real-time gauge dashboard using ratatui.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_monitor_app, MonitorApp};
pub use event_handler::MonitorEvent;
pub use widgets::{band_color, segment_bar};
