// services/tui-dash/src/state.rs
//
// Terminal app state: the dashboard controller plus key handling and the activity log

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use dashkit::{AnalysisOutcome, DashError, DashboardController, SelectedFile, Theme, UploadTicket};

const ACTIVITY_LOG_LIMIT: usize = 100;
const CHART_COLUMNS: usize = 2;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: &'static str,  // INFO, WARN, ERROR
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Analyze,
}

#[derive(Debug)]
pub struct AppState {
    pub controller: DashboardController,
    pub activity_log: Vec<LogEntry>,
    pub input: InputMode,
    pub chart_scroll: usize,
    pub mode_label: String,
    pub ticks: u64,
}

impl AppState {
    pub fn new(theme: Theme, mode_label: impl Into<String>) -> Self {
        Self {
            controller: DashboardController::new(theme),
            activity_log: Vec::new(),
            input: InputMode::Normal,
            chart_scroll: 0,
            mode_label: mode_label.into(),
            ticks: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if let InputMode::EditingPath(buffer) = &mut self.input {
            match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Esc => self.input = InputMode::Normal,
                KeyCode::Enter => {
                    let path = buffer.trim().to_string();
                    self.input = InputMode::Normal;
                    if !path.is_empty() {
                        self.select_path(&path);
                    }
                }
                _ => {}
            }
            return Command::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Command::Quit,
            KeyCode::Char('a') | KeyCode::Enter => return Command::Analyze,
            KeyCode::Char('o') => self.input = InputMode::EditingPath(String::new()),
            KeyCode::Char('t') => {
                let theme = self.controller.toggle_theme();
                self.add_log("INFO", format!("Switched to {} theme", theme));
            }
            KeyCode::Char('m') => {
                self.controller.toggle_charts();
                self.chart_scroll = 0;
            }
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            _ => {}
        }
        Command::None
    }

    pub fn select_path(&mut self, path: &str) {
        match SelectedFile::from_path(path) {
            Ok(file) => {
                self.add_log("INFO", format!("Selected {} ({} bytes)", file.name(), file.len()));
                self.controller.select_file(file);
            }
            Err(e) => {
                self.add_log("ERROR", e.to_string());
                self.controller.record_error(e);
            }
        }
    }

    /// A ticket when an analysis may start; refusals are logged and otherwise ignored.
    pub fn request_analysis(&mut self) -> Option<UploadTicket> {
        match self.controller.begin_analysis() {
            Ok(ticket) => {
                self.chart_scroll = 0;
                self.add_log("INFO", format!("Uploading {}", ticket.file().name()));
                Some(ticket)
            }
            Err(DashError::NoFileSelected) => {
                self.add_log("WARN", "Select a CSV file first ([O] to open)");
                None
            }
            Err(e) => {
                self.add_log("WARN", e.to_string());
                None
            }
        }
    }

    pub fn complete(&mut self, outcome: AnalysisOutcome) {
        match outcome.result() {
            Ok(report) => {
                let message = format!(
                    "Report ready for {}: {} charts, {} anomalies",
                    outcome.file_name(),
                    report.charts.len(),
                    report.anomalies.len()
                );
                self.add_log("INFO", message);
            }
            Err(e) => {
                let message = format!("Analysis of {} failed: {}", outcome.file_name(), e);
                self.add_log("ERROR", message);
            }
        }
        self.controller.finish(outcome);
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.chart_scroll = self.chart_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.chart_scroll + 1 < self.chart_rows() {
            self.chart_scroll += 1;
        }
    }

    /// Rows in the two-column chart grid for the currently visible cards.
    pub fn chart_rows(&self) -> usize {
        let visible = self
            .controller
            .report()
            .map_or(0, |r| self.controller.chart_view().visible(&r.charts).len());
        visible.div_ceil(CHART_COLUMNS)
    }

    pub fn add_log(&mut self, level: &'static str, message: impl Into<String>) {
        self.activity_log.push(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.into(),
        });

        if self.activity_log.len() > ACTIVITY_LOG_LIMIT {
            self.activity_log.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dashkit::{AnalysisService, ChartSpec, DashboardReport, Phase};
    use async_trait::async_trait;

    struct Fixed(dashkit::Result<DashboardReport>);

    #[async_trait]
    impl AnalysisService for Fixed {
        async fn analyze(&self, _file: &SelectedFile) -> dashkit::Result<DashboardReport> {
            self.0.clone()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn charts(n: usize) -> Vec<ChartSpec> {
        (0..n)
            .map(|i| ChartSpec {
                chart_type: "scatter".into(),
                columns: vec![format!("c{}", i)],
                reason: "pairs".into(),
                chart_data: None,
            })
            .collect()
    }

    #[test]
    fn quit_and_analyze_keys() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), Command::Analyze);
        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), Command::Analyze);
    }

    #[test]
    fn path_prompt_swallows_command_keys() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        state.handle_key(key(KeyCode::Char('o')));
        typed(&mut state, "qa");
        assert_eq!(state.input, InputMode::EditingPath("qa".into()));

        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.input, InputMode::EditingPath("q".into()));

        assert_eq!(state.handle_key(key(KeyCode::Esc)), Command::None);
        assert_eq!(state.input, InputMode::Normal);
    }

    #[test]
    fn unreadable_path_is_reported_not_selected() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        state.handle_key(key(KeyCode::Char('o')));
        typed(&mut state, "/definitely/not/here.csv");
        state.handle_key(key(KeyCode::Enter));

        assert!(state.controller.upload().selected().is_none());
        assert!(matches!(state.controller.error(), Some(DashError::FileReadError(_))));
        assert_eq!(state.activity_log.last().map(|e| e.level), Some("ERROR"));
    }

    #[test]
    fn analyze_without_file_only_logs() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        assert!(state.request_analysis().is_none());
        assert_eq!(state.controller.phase(), Phase::Idle);
        assert_eq!(state.activity_log.last().map(|e| e.level), Some("WARN"));
    }

    #[tokio::test]
    async fn ticket_round_trip_updates_controller_and_log() {
        let mut state = AppState::new(Theme::Dark, "DEMO");
        state.controller.select_file(SelectedFile::new("sales.csv", b"a\n1\n".to_vec()));

        let ticket = state.request_analysis().unwrap();
        assert!(state.request_analysis().is_none());

        let report = DashboardReport { charts: charts(7), ..DashboardReport::default() };
        state.complete(ticket.submit(&Fixed(Ok(report))).await);

        assert_eq!(state.controller.phase(), Phase::Ready);
        assert!(state.activity_log.last().unwrap().message.contains("7 charts"));
    }

    #[tokio::test]
    async fn scrolling_is_bounded_by_visible_rows() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        state.controller.select_file(SelectedFile::new("wide.csv", b"a\n".to_vec()));
        let report = DashboardReport { charts: charts(7), ..DashboardReport::default() };
        state.controller.analyze(&Fixed(Ok(report))).await.unwrap();

        assert_eq!(state.chart_rows(), 2);
        for _ in 0..5 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.chart_scroll, 1);

        state.handle_key(key(KeyCode::Char('m')));
        assert_eq!(state.chart_scroll, 0);
        assert_eq!(state.chart_rows(), 4);
    }

    mod navigation {
        use super::*;
        use proptest::prelude::*;

        fn nav_key() -> impl Strategy<Value = KeyCode> {
            prop_oneof![
                Just(KeyCode::Up),
                Just(KeyCode::Down),
                Just(KeyCode::Char('m')),
                Just(KeyCode::Char('t')),
            ]
        }

        proptest! {
            #[test]
            fn scroll_stays_within_the_grid(chart_count in 0usize..12, keys in prop::collection::vec(nav_key(), 0..40)) {
                let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
                let mut state = AppState::new(Theme::Light, "DEMO");
                state.controller.select_file(SelectedFile::new("grid.csv", b"a\n".to_vec()));
                let report = DashboardReport { charts: charts(chart_count), ..DashboardReport::default() };
                runtime.block_on(state.controller.analyze(&Fixed(Ok(report)))).unwrap();

                for code in keys {
                    prop_assert_eq!(state.handle_key(key(code)), Command::None);
                    prop_assert!(state.chart_scroll < state.chart_rows().max(1));
                    prop_assert!(state.chart_rows() <= chart_count.div_ceil(CHART_COLUMNS));
                }
            }
        }
    }

    #[test]
    fn activity_log_is_bounded() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        for i in 0..(ACTIVITY_LOG_LIMIT + 25) {
            state.add_log("INFO", format!("entry {}", i));
        }
        assert_eq!(state.activity_log.len(), ACTIVITY_LOG_LIMIT);
        assert_eq!(state.activity_log[0].message, "entry 25");
    }

    #[test]
    fn theme_key_toggles_and_logs() {
        let mut state = AppState::new(Theme::Light, "DEMO");
        state.handle_key(key(KeyCode::Char('t')));
        assert_eq!(state.controller.theme(), Theme::Dark);
        assert!(state.activity_log.last().unwrap().message.contains("dark"));
    }
}
