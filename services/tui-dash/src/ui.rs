// services/tui-dash/src/ui.rs
//
// Frame rendering: everything drawn here comes from the controller's page view

use dashkit::charts::{BarPlot, UNSUPPORTED_PLACEHOLDER};
use dashkit::types::format_number;
use dashkit::views::{summary_cards, LOADING_MESSAGE};
use dashkit::{AnomalyPanel, CardBody, ChartCard, DashError, DashboardReport, PageBody, PageView, Phase, Plot, ReportView};
use ratatui::{
    prelude::*,
    widgets::*,
};

use crate::palette::{self, UiPalette};
use crate::state::{AppState, InputMode};

const CHART_CARD_HEIGHT: u16 = 12;
const BAR_SCALE: u64 = 1_000;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn draw(frame: &mut Frame, state: &AppState) {
    let page = state.controller.view();
    let ui = palette::for_theme(page.theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(ui.tone(ui.bg))),
        area,
    );

    let banner_height = if page.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(3),             // Upload bar
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(8),                // Page body
            Constraint::Length(6),             // Activity
            Constraint::Length(2),             // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state, &page, &ui);
    draw_upload_bar(frame, chunks[1], state, &page, &ui);
    if let Some(error) = page.error {
        draw_error_banner(frame, chunks[2], error, &ui);
    }

    match &page.body {
        PageBody::Welcome => draw_welcome(frame, chunks[3], &ui),
        PageBody::Loading => draw_loading(frame, chunks[3], state.ticks, &ui),
        PageBody::Report(view) => draw_report(frame, chunks[3], view, state.chart_scroll, &ui),
    }

    draw_activity_panel(frame, chunks[4], state, &ui);
    draw_footer(frame, chunks[5], &ui);
}

fn panel_block<'a>(title: &'a str, ui: &UiPalette) -> Block<'a> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(ui.tone(ui.text)).bold()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ui.tone(ui.border)))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(ui.tone(ui.panel)))
}

fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, page: &PageView, ui: &UiPalette) {
    let (status, status_color) = match page.phase {
        Phase::Idle => ("IDLE", ui.muted),
        Phase::Loading => ("ANALYZING", ui.warn),
        Phase::Ready => ("READY", ui.success),
        Phase::Failed => ("FAILED", ui.alert),
    };

    let mut spans = vec![
        Span::styled(
            " NIRIKSHAN ",
            Style::default().fg(ui.tone(ui.panel)).bg(ui.tone(ui.brand)).bold(),
        ),
        Span::raw("  "),
        Span::styled("CSV DASHBOARD", Style::default().fg(ui.tone(ui.accent)).bold()),
        Span::raw("  "),
        Span::styled(format!("[{}]", state.mode_label), Style::default().fg(ui.tone(ui.muted))),
        Span::raw("  "),
        Span::styled(format!("[{}]", status), Style::default().fg(ui.tone(status_color)).bold()),
    ];

    if let PageBody::Report(view) = &page.body {
        if let Some(meta) = &view.report.meta {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(meta.caption(), Style::default().fg(ui.tone(ui.text))));
        }
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(ui.tone(ui.brand)))
                .style(Style::default().bg(ui.tone(ui.bg))),
        );

    frame.render_widget(header, area);
}

fn draw_upload_bar(frame: &mut Frame, area: Rect, state: &AppState, page: &PageView, ui: &UiPalette) {
    let muted = Style::default().fg(ui.tone(ui.muted));

    let line = match &state.input {
        InputMode::EditingPath(buffer) => Line::from(vec![
            Span::styled("Path: ", muted),
            Span::styled(format!("{}_", buffer), Style::default().fg(ui.tone(ui.text)).bold()),
            Span::styled("   [ENTER] select  [ESC] cancel", muted),
        ]),
        InputMode::Normal => {
            let analyze = if page.analyze_enabled {
                Style::default().fg(ui.tone(ui.panel)).bg(ui.tone(ui.accent)).bold()
            } else {
                muted.add_modifier(Modifier::DIM)
            };
            Line::from(vec![
                Span::styled("[O] ", Style::default().fg(ui.tone(ui.accent))),
                Span::styled(page.upload_label, Style::default().fg(ui.tone(ui.text)).bold()),
                Span::raw("   "),
                Span::styled(" [A] Analyze ", analyze),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line).block(panel_block(" UPLOAD ", ui)), area);
}

fn draw_error_banner(frame: &mut Frame, area: Rect, error: &DashError, ui: &UiPalette) {
    let alert = Style::default().fg(ui.tone(ui.alert));
    let banner = Paragraph::new(Line::from(Span::styled(error.to_string(), alert.bold())))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" ERROR ", alert.bold()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(alert)
                .style(Style::default().bg(ui.tone(ui.panel))),
        );

    frame.render_widget(banner, area);
}

fn draw_welcome(frame: &mut Frame, area: Rect, ui: &UiPalette) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Upload a CSV to build its dashboard", Style::default().fg(ui.tone(ui.text)).bold())),
        Line::from(""),
        Line::from(Span::styled(
            "[O] choose a file, then [A] analyze",
            Style::default().fg(ui.tone(ui.muted)),
        )),
    ];

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(panel_block(" DASHBOARD ", ui)),
        area,
    );
}

fn draw_loading(frame: &mut Frame, area: Rect, ticks: u64, ui: &UiPalette) {
    let spinner = SPINNER[(ticks % SPINNER.len() as u64) as usize];
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(ui.tone(ui.accent)).bold()),
            Span::styled(LOADING_MESSAGE, Style::default().fg(ui.tone(ui.text))),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(panel_block(" DASHBOARD ", ui)),
        area,
    );
}

fn draw_report(frame: &mut Frame, area: Rect, view: &ReportView, scroll: usize, ui: &UiPalette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Summary
            Constraint::Min(10),    // Charts
            Constraint::Length(8),  // Anomalies + insights
        ])
        .split(area);

    draw_summary(frame, chunks[0], view.report, ui);
    draw_charts(frame, chunks[1], view, scroll, ui);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    draw_anomalies(frame, bottom[0], &view.anomalies, ui);
    draw_insights(frame, bottom[1], &view.report.insights, ui);
}

fn draw_summary(frame: &mut Frame, area: Rect, report: &DashboardReport, ui: &UiPalette) {
    let cards: Vec<(&str, &str)> = summary_cards(&report.summary).collect();
    if cards.is_empty() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, cards.len() as u32)))
        .split(area);

    for ((title, value), slot) in cards.iter().zip(chunks.iter()) {
        draw_stat_box(frame, *slot, title, value, ui);
    }
}

fn draw_stat_box(frame: &mut Frame, area: Rect, label: &str, value: &str, ui: &UiPalette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ui.tone(ui.border)))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(ui.tone(ui.panel)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(
            label.to_uppercase(),
            Style::default().fg(ui.tone(ui.muted)).add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(value, Style::default().fg(ui.tone(ui.text)).bold())),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn draw_charts(frame: &mut Frame, area: Rect, view: &ReportView, scroll: usize, ui: &UiPalette) {
    let mut block = panel_block(" CHARTS ", ui);
    if let Some(label) = view.chart_toggle {
        block = block.title_bottom(
            Line::from(Span::styled(format!(" [M] {} ", label), Style::default().fg(ui.tone(ui.accent))))
                .right_aligned(),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.charts.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No charts suggested", Style::default().fg(ui.tone(ui.muted))))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let fitting = (inner.height / CHART_CARD_HEIGHT).max(1) as usize;
    let rows: Vec<&[ChartCard]> = view.charts.chunks(2).skip(scroll).take(fitting).collect();

    let mut constraints: Vec<Constraint> = rows.iter().map(|_| Constraint::Length(CHART_CARD_HEIGHT)).collect();
    constraints.push(Constraint::Min(0));
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (cards, row_area) in rows.iter().zip(row_areas.iter()) {
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);
        for (card, slot) in cards.iter().zip(slots.iter()) {
            draw_chart_card(frame, *slot, card, ui);
        }
    }
}

fn draw_chart_card(frame: &mut Frame, area: Rect, card: &ChartCard, ui: &UiPalette) {
    let title = format!(" {} ", card.chart_type.to_uppercase());
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ui.tone(ui.accent)).bold()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ui.tone(ui.border)))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(ui.tone(ui.panel)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(3)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Columns: ", Style::default().fg(ui.tone(ui.muted))),
            Span::styled(card.columns.as_str(), Style::default().fg(ui.tone(ui.text))),
        ])),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            card.reason.as_str(),
            Style::default().fg(ui.tone(ui.muted)).add_modifier(Modifier::ITALIC),
        )),
        chunks[1],
    );

    match &card.body {
        CardBody::Plot(Plot::Bar(plot)) => draw_bar_plot(frame, chunks[2], plot, ui),
        other => {
            let message = other.placeholder().unwrap_or(UNSUPPORTED_PLACEHOLDER);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(message, Style::default().fg(ui.tone(ui.muted)))),
                ])
                .alignment(Alignment::Center),
                chunks[2],
            );
        }
    }
}

fn draw_bar_plot(frame: &mut Frame, area: Rect, plot: &BarPlot, ui: &UiPalette) {
    let colors = palette::plot_colors(plot.palette, ui);
    let max = plot.max_value();

    let bars: Vec<Bar> = plot
        .categories
        .iter()
        .map(|category| {
            let scaled = if max > 0.0 && category.value.is_finite() {
                (category.value.max(0.0) / max * BAR_SCALE as f64).round() as u64
            } else {
                0
            };
            Bar::default()
                .value(scaled)
                .text_value(format_number(category.value))
                .label(Line::from(category.label.as_str()))
        })
        .collect();

    let count = bars.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2 + count) / count).clamp(1, 9);

    // Top gridline first; tall bars draw over it.
    frame.render_widget(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(colors.grid))
            .title(Span::styled(plot.series_label.as_str(), Style::default().fg(colors.axis))),
        area,
    );

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM)
                .border_style(Style::default().fg(colors.axis)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(colors.bar))
        .value_style(Style::default().fg(ui.tone(ui.panel)).bg(colors.bar))
        .label_style(Style::default().fg(colors.axis))
        .max(BAR_SCALE);

    frame.render_widget(chart, area);
}

fn draw_anomalies(frame: &mut Frame, area: Rect, panel: &AnomalyPanel, ui: &UiPalette) {
    let alert = Style::default().fg(ui.tone(ui.alert));
    let block = if panel.is_alert() {
        Block::default()
            .title(Span::styled(" ANOMALIES ", alert.bold()))
            .borders(Borders::ALL)
            .border_style(alert)
            .border_type(BorderType::Thick)
            .style(Style::default().bg(ui.tone(ui.panel)))
    } else {
        panel_block(" ANOMALIES ", ui)
    };

    let lines: Vec<Line> = match panel.message() {
        Some(message) => vec![Line::from(Span::styled(message, Style::default().fg(ui.tone(ui.success))))],
        None => panel
            .items()
            .iter()
            .map(|anomaly| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(ui.tone(ui.alert))),
                    Span::styled(anomaly.column.as_str(), Style::default().fg(ui.tone(ui.text)).bold()),
                    Span::styled(
                        format!(": {} irregular values", anomaly.count),
                        Style::default().fg(ui.tone(ui.text)),
                    ),
                ])
            })
            .collect(),
    };

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_insights(frame: &mut Frame, area: Rect, insights: &[String], ui: &UiPalette) {
    let lines: Vec<Line> = insights
        .iter()
        .map(|insight| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(ui.tone(ui.accent))),
                Span::styled(insight.as_str(), Style::default().fg(ui.tone(ui.text))),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel_block(" INSIGHTS ", ui)).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_activity_panel(frame: &mut Frame, area: Rect, state: &AppState, ui: &UiPalette) {
    let visible = area.height.saturating_sub(2) as usize;
    let logs: Vec<Line> = state
        .activity_log
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                "ERROR" => ("[ERR]", ui.alert),
                "WARN" => ("[WRN]", ui.warn),
                "INFO" => ("[INF]", ui.success),
                _ => ("[---]", ui.muted),
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(ui.tone(ui.muted)).add_modifier(Modifier::DIM),
                ),
                Span::styled(format!("{} ", prefix), Style::default().fg(ui.tone(color))),
                Span::styled(entry.message.as_str(), Style::default().fg(ui.tone(ui.text))),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(logs).block(panel_block(" ACTIVITY ", ui)), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, ui: &UiPalette) {
    let key = Style::default().fg(ui.tone(ui.panel)).bg(ui.tone(ui.brand));
    let text = Style::default().fg(ui.tone(ui.muted));

    let help = Line::from(vec![
        Span::styled(" [O] ", key),
        Span::styled(" Open ", text),
        Span::styled(" [A] ", key),
        Span::styled(" Analyze ", text),
        Span::styled(" [T] ", key),
        Span::styled(" Theme ", text),
        Span::styled(" [M] ", key),
        Span::styled(" More/Less ", text),
        Span::styled(" [UP/DOWN] ", key),
        Span::styled(" Scroll ", text),
        Span::styled(" [Q] ", key),
        Span::styled(" Quit ", text),
    ]);

    frame.render_widget(
        Paragraph::new(help).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(ui.tone(ui.border)))
                .style(Style::default().bg(ui.tone(ui.bg))),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dashkit::{AnalysisService, Anomaly, ChartData, ChartSpec, SelectedFile, SummaryItem, Theme};
    use ratatui::backend::TestBackend;

    struct Fixed(dashkit::Result<DashboardReport>);

    #[async_trait]
    impl AnalysisService for Fixed {
        async fn analyze(&self, _file: &SelectedFile) -> dashkit::Result<DashboardReport> {
            self.0.clone()
        }
    }

    fn render(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 60)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn reference_report() -> DashboardReport {
        DashboardReport {
            meta: None,
            summary: vec![SummaryItem { title: "Rows".into(), value: "100".into() }],
            charts: vec![ChartSpec {
                chart_type: "bar".into(),
                columns: vec!["age".into()],
                reason: "distribution".into(),
                chart_data: Some(ChartData {
                    labels: vec!["0-18".into(), "19-40".into()],
                    values: vec![30.0, 70.0],
                }),
            }],
            anomalies: Vec::new(),
            insights: vec!["No major issues found".into()],
        }
    }

    async fn state_with(report: dashkit::Result<DashboardReport>, theme: Theme) -> AppState {
        let mut state = AppState::new(theme, "DEMO");
        state.controller.select_file(SelectedFile::new("people.csv", b"age\n1\n".to_vec()));
        state.controller.analyze(&Fixed(report)).await.unwrap();
        state
    }

    #[test]
    fn idle_screen_prompts_for_a_file() {
        let screen = render(&AppState::new(Theme::Light, "DEMO"));
        assert!(screen.contains("NIRIKSHAN"));
        assert!(screen.contains("Choose CSV File"));
        assert!(screen.contains("[IDLE]"));
    }

    #[tokio::test]
    async fn reference_report_fills_every_section() {
        let screen = render(&state_with(Ok(reference_report()), Theme::Light).await);

        assert!(screen.contains("ROWS"));
        assert!(screen.contains("100"));
        assert!(screen.contains(" BAR "));
        assert!(screen.contains("Columns: age"));
        assert!(screen.contains("0-18"));
        assert!(screen.contains("No anomalies detected"));
        assert!(screen.contains("No major issues found"));
        assert!(!screen.contains("Show More Charts"));
    }

    #[tokio::test]
    async fn loading_hides_the_report() {
        let mut state = state_with(Ok(reference_report()), Theme::Dark).await;
        let _ticket = state.request_analysis().unwrap();

        let screen = render(&state);
        assert!(screen.contains(LOADING_MESSAGE));
        assert!(screen.contains("[ANALYZING]"));
        assert!(!screen.contains("No major issues found"));
    }

    #[tokio::test]
    async fn failure_shows_banner_above_prior_report() {
        let mut state = state_with(Ok(reference_report()), Theme::Light).await;
        state
            .controller
            .analyze(&Fixed(Err(DashError::ServerError {
                status: 400,
                message: "CSV must be UTF-8 encoded.".into(),
            })))
            .await
            .unwrap();

        let screen = render(&state);
        assert!(screen.contains("CSV must be UTF-8 encoded."));
        assert!(screen.contains("[FAILED]"));
        assert!(screen.contains("No major issues found"));
    }

    #[tokio::test]
    async fn many_charts_show_toggle_placeholder_and_alert() {
        let mut report = reference_report();
        report.charts.extend((0..5).map(|i| ChartSpec {
            chart_type: "scatter".into(),
            columns: vec![format!("x{}", i), "y".into()],
            reason: "correlation".into(),
            chart_data: None,
        }));
        report.anomalies = vec![Anomaly { column: "income".into(), count: 3 }];

        let screen = render(&state_with(Ok(report), Theme::Dark).await);
        assert!(screen.contains("[M] Show More Charts"));
        assert!(screen.contains(UNSUPPORTED_PLACEHOLDER));
        assert!(screen.contains("income: 3 irregular values"));
        assert!(!screen.contains("No anomalies detected"));
    }
}
