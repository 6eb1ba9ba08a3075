//! Frame rendering. Everything is derived from the dashboard state and the
//! frame area; nothing here mutates state.

use airdeck_core::sensor::{self, present_sensors};
use airdeck_core::{Device, TempUnit};
use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

use crate::layout::{self, FrameAreas};
use crate::prompt::{Prompt, PromptStep};
use crate::state::Dashboard;
use crate::theme;
use crate::widgets::bars::ratio_bar;
use crate::widgets::text::{pad_left, pad_right, truncate_text};

const LABEL_WIDTH: usize = 14;
const VALUE_WIDTH: usize = 12;

/// Render the full dashboard frame.
pub fn render(frame: &mut Frame, dash: &Dashboard) {
    let area = frame.area();
    let FrameAreas {
        header,
        grid,
        log,
        status,
    } = layout::frame_areas(area);

    render_header(frame, header);
    if dash.registry.is_empty() {
        render_empty_state(frame, grid, dash.discovery_enabled);
    } else {
        render_grid(frame, grid, dash);
    }
    render_log(frame, log, dash);
    render_status_bar(frame, status);

    if let Some(prompt) = &dash.prompt {
        render_prompt(frame, layout::prompt_rect(grid, area), prompt);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let line = Line::from(vec![
        Span::styled(" airdeck ", theme::title_style()),
        Span::styled(" Air quality monitor", theme::muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_empty_state(frame: &mut Frame, area: Rect, discovery_enabled: bool) {
    if area.is_empty() {
        return;
    }
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let searching = if discovery_enabled {
        "Searching via mDNS discovery..."
    } else {
        "Discovery is off; add devices by IP"
    };
    let hint = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(key, theme::key_hint_key()),
            Span::raw(text),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled("No sensors found", bold)),
        Line::from(""),
        Line::from(searching),
        Line::from(""),
        hint("a", " to manually add a device IP"),
    ];
    if discovery_enabled {
        lines.push(hint("d", " to restart discovery"));
    }
    lines.push(hint("q", " to quit"));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let text_area = Rect::new(area.x, top, area.width, height).intersection(area);

    frame.render_widget(
        Paragraph::new(lines)
            .style(theme::muted())
            .alignment(Alignment::Center),
        text_area,
    );
}

fn render_grid(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let devices: Vec<&Device> = dash.registry.ordered_devices().collect();
    let rects = layout::cell_rects(area, devices.len());
    for (device, rect) in devices.into_iter().zip(rects) {
        let rect = rect.intersection(frame.area());
        if rect.is_empty() {
            continue;
        }
        render_cell(frame, rect, device, dash.unit);
    }
}

fn render_cell(frame: &mut Frame, rect: Rect, device: &Device, unit: TempUnit) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
        .padding(Padding::horizontal(1));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.is_empty() {
        return;
    }

    let interior = layout::interior_width(rect.width);
    let lines = cell_lines(device, unit, interior);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Text content of one device cell.
fn cell_lines(device: &Device, unit: TempUnit, interior: u16) -> Vec<Line<'static>> {
    let width = usize::from(interior);
    let title = Span::styled(
        truncate_text(&device.title(), width),
        theme::title_style(),
    );
    let mut lines = vec![Line::from(title)];

    let Some(reading) = &device.reading else {
        lines.push(Line::from(""));
        if let Some(err) = &device.last_error {
            lines.push(Line::styled(
                truncate_text(&format!("Error: {err}"), width),
                theme::error(),
            ));
            lines.push(Line::from(""));
            lines.push(Line::styled("Retrying…", theme::muted()));
        } else {
            lines.push(Line::styled(
                "Connecting…",
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        }
        return lines;
    };

    let bar_width = layout::bar_width(interior);
    let score_tier = sensor::score_tier(reading.score);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    lines.push(Line::from(vec![
        Span::styled("Awair Score", bold),
        Span::raw("    "),
        Span::styled(
            format!("{} {}", reading.score, sensor::score_label(reading.score)),
            theme::tier_style(score_tier).add_modifier(Modifier::BOLD),
        ),
    ]));

    if bar_width > 0 {
        let ratio = f64::from(u8::try_from(reading.score.clamp(0, 100)).unwrap_or(0)) / 100.0;
        lines.push(bar_line(ratio, bar_width, theme::tier_style(score_tier)));
    }
    lines.push(Line::from(""));

    for (sensor, raw) in present_sensors(reading) {
        let rated = sensor.rating_value(raw);
        let style = theme::tier_style(sensor.rate(rated));
        let mut spans = vec![
            Span::styled(pad_right(sensor.label(), LABEL_WIDTH), bold),
            Span::raw(" "),
            Span::styled(pad_left(&sensor.format(raw, unit), VALUE_WIDTH), style),
        ];
        if bar_width > 0 {
            let (filled, empty) = ratio_bar(sensor.bar_ratio(rated), bar_width);
            spans.push(Span::raw("  "));
            spans.push(Span::styled(filled, style));
            spans.push(Span::styled(empty, theme::muted()));
        }
        lines.push(Line::from(spans));
    }

    if let Some(at) = device.last_update {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Updated: {}", at.format("%H:%M:%S")),
            theme::muted(),
        ));
    }

    if let Some(err) = &device.last_error {
        lines.push(Line::styled(
            truncate_text(&format!("Last poll failed: {err}"), width),
            theme::error(),
        ));
    }

    lines
}

fn bar_line(ratio: f64, width: u16, style: Style) -> Line<'static> {
    let (filled, empty) = ratio_bar(ratio, width);
    Line::from(vec![
        Span::styled(filled, style),
        Span::styled(empty, theme::muted()),
    ])
}

fn render_log(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    if area.is_empty() {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = dash
        .log
        .visible()
        .map(|entry| {
            Line::from(vec![
                Span::styled(entry.stamp(), theme::muted()),
                Span::raw(" "),
                Span::styled(entry.message.clone(), theme::text()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in [
        ("q", "Quit"),
        ("r", "Refresh"),
        ("a", "Add device"),
        ("d", "Discovery"),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, theme::key_hint_key()));
        spans.push(Span::styled(format!(" {label}"), theme::key_hint()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_DARK)),
        area,
    );
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    if area.is_empty() {
        return;
    }
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", prompt.title()))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.is_empty() {
        return;
    }

    let value = prompt.input.value();
    if value.is_empty() {
        let placeholder = match prompt.step {
            PromptStep::AwaitingIp => "192.168.1.100",
            PromptStep::AwaitingName { .. } => "(optional)",
        };
        frame.render_widget(Paragraph::new(Span::styled(placeholder, theme::muted())), inner);
    } else {
        let scroll = prompt.input.visual_scroll(usize::from(inner.width.saturating_sub(1)));
        let scroll_u16 = u16::try_from(scroll).unwrap_or(0);
        frame.render_widget(
            Paragraph::new(Span::styled(value.to_owned(), theme::text())).scroll((0, scroll_u16)),
            inner,
        );
    }

    let scroll = prompt.input.visual_scroll(usize::from(inner.width.saturating_sub(1)));
    let offset = prompt.input.visual_cursor().saturating_sub(scroll);
    let offset = u16::try_from(offset).unwrap_or(0).min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
}
