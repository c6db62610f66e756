// Core business logic module

pub mod config;
pub mod power_monitor;

// Re-export commonly used items
pub use config::Config;
pub use power_monitor::{PollEvent, PowerMonitor, Reading};
