// UI and formatting module

pub mod formatters;
pub mod monitor_tui;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_age, format_extras, format_time};
pub use prompts::{confirm, dimmed, error, info, success};
