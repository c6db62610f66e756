use chrono::Utc;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::MonitorApp;
use super::widgets::segment_bar;
use crate::core::power_monitor::GaugeChannel;
use crate::ui::formatters::{format_age, format_extras, format_time};

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &MonitorApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Gauges
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_gauges(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_footer(frame, chunks[3]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let stats = app.monitor.stats();

    let last = match stats.last_reading_at {
        Some(at) => format!(
            "{} ({})",
            format_time(at),
            format_age(Some(at), Utc::now())
        ),
        None => "never".to_string(),
    };

    let mut title = format!(
        " pmview │ {} │ Refresh: {}ms │ Last: {} │ OK {} / ERR {} ",
        app.source_url, app.interval_ms, last, stats.readings, stats.errors
    );
    if app.paused {
        title.push_str("│ PAUSED ");
    }

    let border_color = if stats.last_error.is_some() {
        Color::Red
    } else if app.paused {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(block, area);
}

fn render_gauges(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let channels = app.monitor.channels();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (channel, row) in channels.iter().zip(rows.iter()) {
        render_channel(frame, *row, channel);
    }
}

fn render_channel(frame: &mut Frame, area: Rect, channel: &GaugeChannel) {
    let descriptor = channel.descriptor;
    let gauge = &channel.widget;

    let block = Block::default()
        .title(format!(
            " {} ({}) - max {} ",
            descriptor.title,
            descriptor.unit,
            gauge.config().max
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let label_width = 14u16.min(inner.width);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(label_width), Constraint::Min(1)])
        .split(inner);

    let label = Paragraph::new(Line::from(vec![
        Span::styled(
            channel.label.text().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(descriptor.unit, Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(label, columns[0]);

    let bar_area = columns[1];
    let bar = segment_bar(gauge, bar_area.width.saturating_sub(1));
    let lines = vec![bar; bar_area.height as usize];
    frame.render_widget(
        Paragraph::new(lines),
        Rect {
            x: bar_area.x + 1,
            width: bar_area.width.saturating_sub(1),
            ..bar_area
        },
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let stats = app.monitor.stats();

    let para = if let Some(ref err) = stats.last_error {
        Paragraph::new(format!(" ⚠ {} (showing last good values)", err))
            .style(Style::default().fg(Color::Red))
    } else if stats.readings == 0 {
        Paragraph::new(" Waiting for the first reading...")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!(" {}", format_extras(&stats.last_extras)))
            .style(Style::default().fg(Color::Gray))
    };

    frame.render_widget(para, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = " q: Quit │ ?: Help │ r: Reset gauges │ p: Pause ";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    pmview - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    q / Esc     Quit the application
    ? / h       Toggle this help screen
    r           Reset all gauges to zero
    p / Space   Pause or resume live updates

    Failed polls keep the last good values on screen.
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    // Center the help popup
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
