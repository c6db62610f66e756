//! Power-monitor sampling and display core.
//!
//! A [`Poller`] fetches `/pm` payloads on a fixed period, each payload becomes
//! a [`Reading`], and the [`PowerMonitor`] context pushes readings into four
//! [`GaugeChannel`]s through the display adapter.

mod channel;
mod context;
pub mod display;
mod gauge;
mod poller;
mod reading;
mod runtime;
mod source;

pub use channel::{default_maxima, ChannelDescriptor, ChannelKind, CHANNELS};
pub use context::{PollStats, PowerMonitor};
pub use display::GaugeChannel;
pub use gauge::{
    Band, GaugeBanding, GaugeConfig, GaugeWidget, Label, SegmentGauge, TextLabel,
};
pub use poller::{poll_once, PollEvent, Poller, EVENT_CHANNEL_CAPACITY};
pub use reading::{Reading, ReadingExtras};
pub use runtime::{build_runtime, read_once, PollRuntime};
pub use source::{source_fn, FnSource, HttpSource, MetricsSource};
