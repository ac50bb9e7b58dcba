//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table};

use super::runtime::App;
use super::style;
use crate::report::{MITIGATION_ADVICE, NO_PEAKS, PEAK_TIP};
use crate::tariff::PEAK_THRESHOLD_KWH;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(10),    // chart + table
            Constraint::Length(10), // summary panel
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, body[0]);
    render_table(frame, app, body[1]);
    render_summary(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: tariff, row count, peak count.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let a = &app.analysis;
    let header = Line::from(vec![
        Span::styled(
            " PEAK-SHIFT ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ tariff {} (night {:.2}) │ {} rows │ {} peak ",
            a.tariff,
            a.summary.night_tariff,
            a.records.len(),
            a.peak_hours.len(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Consumption per hour against the peak threshold.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let consumption = style::chart_points(&app.analysis.records);

    let x_lo = consumption.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_hi = consumption.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let (x_lo, x_hi) = if x_lo.is_finite() {
        (x_lo, x_hi.max(x_lo + 1.0))
    } else {
        (0.0, 23.0)
    };
    let threshold = [(x_lo, PEAK_THRESHOLD_KWH), (x_hi, PEAK_THRESHOLD_KWH)];
    let y_bounds = style::auto_bounds_y(&consumption, PEAK_THRESHOLD_KWH);

    let datasets = vec![
        Dataset::default()
            .name("Consumption")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::CONSUMPTION_COLOR))
            .data(&consumption),
        Dataset::default()
            .name("Peak threshold")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::THRESHOLD_COLOR))
            .data(&threshold),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Consumption over the day ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{x_lo}"), format!("{x_hi}")]),
        )
        .y_axis(
            Axis::default()
                .title("kWh")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Annotated table, peak rows highlighted.
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.visible_records().iter().map(|r| {
        let style = if r.is_peak {
            Style::default().fg(style::PEAK_COLOR)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(r.hour.to_string()),
            Cell::from(format!("{:.2}", r.consumption_kwh)),
            Cell::from(if r.is_peak { "yes" } else { "" }),
            Cell::from(r.recommendation.as_str()),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["Hour", "kWh", "Peak", "Recommendation"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" Table ").borders(Borders::ALL));

    frame.render_widget(table, area);
}

/// Peak hours, savings figures and advisories.
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let a = &app.analysis;
    let s = &a.summary;

    let peaks = if a.peak_hours.is_empty() {
        NO_PEAKS.to_string()
    } else {
        let hours: Vec<String> = a.peak_hours.iter().map(ToString::to_string).collect();
        format!("Peak hours: {}", hours.join(", "))
    };

    let mut lines = vec![
        Line::from(format!("  {peaks}")),
        Line::from(format!(
            "  total={:.2} kWh  peak={:.2} kWh",
            s.total_kwh, s.peak_kwh
        )),
        Line::from(format!(
            "  current cost={:.2}  optimized={:.2}",
            s.total_cost, s.optimized_cost
        )),
        Line::from(Span::styled(
            format!("  savings={:.2} ({:.1}%)", s.savings, s.savings_percent),
            Style::default()
                .fg(style::savings_color(s.savings_percent))
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if !a.peak_hours.is_empty() {
        lines.push(Line::from(format!("  {PEAK_TIP}")));
    }
    if s.recommends_mitigation() {
        lines.push(Line::from(format!("  {MITIGATION_ADVICE}")));
    }
    if let Some(status) = &app.status {
        lines.push(Line::from(format!("  {status}")));
    }

    let block = Block::default()
        .title(" Potential savings ")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  +/-:Tariff ±0.1  ↑/↓:Scroll  e:Export xlsx",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
