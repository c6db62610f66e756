//! Display adapter: pushes a [`Reading`] into the four gauge channels.

use super::channel::{ChannelDescriptor, CHANNELS};
use super::gauge::{GaugeBanding, GaugeConfig, GaugeWidget, Label, SegmentGauge, TextLabel};
use super::reading::Reading;

/// One gauge with its label, bound to a channel descriptor.
#[derive(Debug, Clone)]
pub struct GaugeChannel<W = SegmentGauge, L = TextLabel> {
    pub descriptor: &'static ChannelDescriptor,
    pub widget: W,
    pub label: L,
}

impl<W, L> GaugeChannel<W, L> {
    pub fn new(descriptor: &'static ChannelDescriptor, widget: W, label: L) -> Self {
        Self {
            descriptor,
            widget,
            label,
        }
    }
}

impl GaugeChannel {
    /// Build the standard four channels from their maxima (in channel order).
    pub fn standard(banding: GaugeBanding, maxima: [f64; 4]) -> [GaugeChannel; 4] {
        std::array::from_fn(|i| {
            let config = GaugeConfig {
                banding,
                max: maxima[i],
            };
            GaugeChannel::new(&CHANNELS[i], SegmentGauge::new(config), TextLabel::new())
        })
    }
}

/// Write every channel's formatted value into its widget and label.
pub fn apply<W: GaugeWidget, L: Label>(reading: &Reading, channels: &mut [GaugeChannel<W, L>; 4]) {
    for channel in channels.iter_mut() {
        let text = channel.descriptor.formatted(reading);
        channel.widget.write_value(&text);
        channel.label.set_text(&text);
    }
}

/// Zero every channel.
pub fn reset<W: GaugeWidget, L: Label>(channels: &mut [GaugeChannel<W, L>; 4]) {
    for channel in channels.iter_mut() {
        channel.widget.write_value("0");
        channel.label.set_text("0");
    }
}
