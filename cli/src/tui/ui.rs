use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Padding, Paragraph},
};
use solarh2_core::{MonthlyDataset, MonthlySummary, Series, PLANT_INFO};
use unicode_width::UnicodeWidthStr;

use crate::render::metrics;
use crate::tui::app::DashboardApp;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    max: Color,
    min: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    max: Color::Red,
    min: Color::Blue,
};

fn series_color(series: Series) -> Color {
    match series {
        Series::PvTotal => Color::Rgb(70, 130, 180),
        Series::H2Produced => Color::Rgb(46, 139, 87),
        Series::BattToH2 => Color::Rgb(255, 213, 128),
        Series::PvToH2 => Color::Rgb(244, 180, 0),
        Series::H2EnergyTotal => Color::Rgb(255, 165, 0),
        Series::H2Duration => Color::Rgb(255, 140, 0),
        Series::FinalSoc => Color::Magenta,
        Series::BatteryCycles => Color::Gray,
    }
}

pub fn draw(frame: &mut Frame, app: &DashboardApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + side panel
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let Some((dataset, summary)) = app.current() else {
        frame.render_widget(
            Paragraph::new("No valid data loaded").alignment(Alignment::Center),
            main_layout[1],
        );
        return;
    };

    draw_header(frame, app, main_layout[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(72),
            Constraint::Length(1),
            Constraint::Percentage(28),
        ])
        .split(main_layout[1]);

    draw_chart(frame, dataset, app.series(), content[0]);
    draw_side_panel(frame, dataset, summary, app.series(), content[2]);

    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("CHART: ", Style::default().fg(THEME.muted)),
        Span::styled("↑/↓ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(
        Paragraph::new(help).alignment(Alignment::Center),
        main_layout[2],
    );
}

fn draw_header(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let title = match app.current() {
        Some((dataset, _)) => format!(" {} {} ", dataset.month.name(), app.year),
        None => String::new(),
    };
    let nav_width = title.width() as u16 + 6;

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(1),
            Constraint::Length(nav_width),
        ])
        .split(area);

    let app_title = Paragraph::new(Span::styled(
        "SOLAR-H₂ DASHBOARD",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav_style = |enabled: bool| Style::default().fg(if enabled { THEME.text } else { THEME.muted });
    let nav = Paragraph::new(Line::from(vec![
        Span::styled(" < ", nav_style(app.has_previous())),
        Span::styled(title, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", nav_style(app.has_next())),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted)),
        area,
    );
}

fn draw_chart(frame: &mut Frame, dataset: &MonthlyDataset, series: Series, area: Rect) {
    let points = series.points(&dataset.records);
    let extrema = series.extrema(&dataset.records);

    // Bars carry integers; scale by ten to keep one decimal.
    let bar_items: Vec<Bar> = points
        .iter()
        .map(|&(day, value)| {
            let color = match extrema {
                Some(e) if day == e.max_day => THEME.max,
                Some(e) if day == e.min_day => THEME.min,
                _ => series_color(series),
            };
            Bar::default()
                .label(day.to_string())
                .value((value.max(0.0) * 10.0).round() as u64)
                .style(Style::default().fg(color))
                .text_value(format!("{:.1}", value))
        })
        .collect();

    let title = match extrema {
        Some(e) => format!(
            " {} ({}) · Max: {:.2} (day {}) · Min: {:.2} (day {}) ",
            series.title(),
            series.unit(),
            e.max,
            e.max_day,
            e.min,
            e.min_day
        ),
        None => format!(" {} ({}) · no values ", series.title(), series.unit()),
    };

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title);

    let count = bar_items.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / count).saturating_sub(1).max(1);

    let mut chart = BarChart::default()
        .block(chart_block)
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bar_items));

    // Fixed scales for bounded quantities.
    match series {
        Series::H2Duration => chart = chart.max(240),
        Series::FinalSoc => chart = chart.max(1000),
        _ => {}
    }

    frame.render_widget(chart, area);
}

fn draw_side_panel(
    frame: &mut Frame,
    dataset: &MonthlyDataset,
    summary: &MonthlySummary,
    series: Series,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Metrics
            Constraint::Length(7),  // System
            Constraint::Min(1),     // Chart details
        ])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "Overview",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    for (label, value) in metrics(summary) {
        lines.push(Line::from(Span::styled(label, Style::default().fg(THEME.muted))));
        lines.push(Line::from(Span::styled(
            value,
            Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(panel(" Summary ")),
        chunks[0],
    );

    let system = vec![
        info_line("PV Plant", PLANT_INFO.pv_plant),
        info_line("Battery", PLANT_INFO.battery),
        info_line("Electrolyzer", PLANT_INFO.electrolyzer),
        Line::from(Span::styled(
            format!("Simulated in {}", PLANT_INFO.simulation),
            Style::default().fg(THEME.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(system).block(panel(" System ")), chunks[1]);

    let details = vec![
        info_line("Days", &dataset.len().to_string()),
        info_line(
            "Range",
            &match (dataset.first_day(), dataset.last_day()) {
                (Some(first), Some(last)) => format!("{first}–{last}"),
                _ => "-".to_string(),
            },
        ),
        info_line("Axis step", &format!("{} {}", series.axis_step(&dataset.records), series.unit())),
        info_line("Source", &dataset.source),
    ];
    frame.render_widget(
        Paragraph::new(details)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(panel(" Data ")),
        chunks[2],
    );
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title)
}

fn info_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(THEME.muted)),
        Span::styled(value.to_string(), Style::default().fg(THEME.text)),
    ])
}
