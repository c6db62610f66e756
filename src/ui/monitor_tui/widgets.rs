use ratatui::prelude::*;

use crate::core::power_monitor::{Band, SegmentGauge};

const LIT: &str = "█";
const UNLIT: &str = "░";

/// Color of a gauge band
pub fn band_color(band: Band) -> Color {
    match band {
        Band::Green => Color::Green,
        Band::Yellow => Color::LightYellow,
        Band::Red => Color::Red,
    }
}

/// Render a gauge as one horizontal row of boxes fitting `width` columns.
///
/// Each box gets `width / box_count` columns, of which `box_gap_fraction` is
/// left blank. Narrow areas fall back to one column per box.
pub fn segment_bar(gauge: &SegmentGauge, width: u16) -> Line<'static> {
    let banding = gauge.config().banding;
    let count = banding.box_count.max(1);

    let slot = (width / count).max(1) as usize;
    let gap = if slot > 1 {
        ((slot as f64 * banding.box_gap_fraction).round() as usize).min(slot - 1)
    } else {
        0
    };
    let fill = slot - gap;

    let spans: Vec<Span<'static>> = gauge
        .boxes()
        .into_iter()
        .flat_map(|(band, lit)| {
            let style = if lit {
                Style::default().fg(band_color(band))
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let glyph = if lit { LIT } else { UNLIT };
            [
                Span::styled(glyph.repeat(fill), style),
                Span::raw(" ".repeat(gap)),
            ]
        })
        .collect();

    Line::from(spans)
}
