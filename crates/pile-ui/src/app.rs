//! Main application state and TUI event loop.
//!
//! [`App`] owns the session, the intake form and the UI-only state (theme,
//! table scroll offset, last status message).  Every key event is handled
//! synchronously and followed by a full redraw.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame, Terminal,
};

use pile_core::export;
use pile_core::session::{Session, ADDED_MESSAGE};

use crate::charts;
use crate::components::{key_hints_line, Header, StatusMessage};
use crate::form::MeasurementForm;
use crate::table_view;
use crate::themes::Theme;

/// Rows moved per `PageUp` / `PageDown`.
const SCROLL_PAGE: usize = 5;

/// Width of the form column.
const FORM_WIDTH: u16 = 44;

/// What the event loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Root application state.
pub struct App {
    pub theme: Theme,
    pub session: Session,
    pub form: MeasurementForm,
    /// Directory the CSV report is written to.
    pub export_dir: PathBuf,
    /// First table row shown.
    pub table_offset: usize,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(theme_name: &str, export_dir: PathBuf) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            session: Session::new(),
            form: MeasurementForm::new(),
            export_dir,
            table_offset: 0,
            status: None,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive session until `Esc` / `Ctrl+C`, then hand the
    /// session back so the caller can log a summary.
    pub fn run(mut self) -> io::Result<Session> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if self.handle_key(key) == AppAction::Quit {
                            break Ok(());
                        }
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result.map(|()| self.session)
    }

    // ── Input handling ────────────────────────────────────────────────────────

    /// Apply one key event to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return AppAction::Quit,
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('e') if ctrl => self.export(),
            KeyCode::Char('u') if ctrl => self.clear_field(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Up => self.form.step_up(),
            KeyCode::Down => self.form.step_down(),
            KeyCode::PageDown => self.scroll_down(SCROLL_PAGE),
            KeyCode::PageUp => self.scroll_up(SCROLL_PAGE),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !ctrl => {
                if !self.form.insert_char(c) {
                    tracing::debug!(
                        field = self.form.focused_field().label,
                        "Rejected key {c:?}"
                    );
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// "Add Measurement": append the form values to the session.
    pub fn submit(&mut self) {
        let input = self.form.to_input();
        self.session.add_measurement(input);
        self.status = Some(StatusMessage::Success(ADDED_MESSAGE.to_string()));
    }

    fn clear_field(&mut self) {
        self.form.clear_focused();
        self.status = Some(StatusMessage::Info(format!(
            "Cleared {}",
            self.form.focused_field().label
        )));
    }

    /// Write the CSV report; failures end up on the status line.
    pub fn export(&mut self) {
        match export::write_report(self.session.dataset(), &self.export_dir) {
            Ok(path) => {
                self.status = Some(StatusMessage::Success(format!(
                    "Report written to {}",
                    path.display()
                )));
            }
            Err(e) => {
                tracing::error!("Export failed: {e}");
                self.status = Some(StatusMessage::Error(format!("Export failed: {e}")));
            }
        }
    }

    fn scroll_down(&mut self, rows: usize) {
        let max = self.session.dataset().len().saturating_sub(1);
        self.table_offset = (self.table_offset + rows).min(max);
    }

    fn scroll_up(&mut self, rows: usize) {
        self.table_offset = self.table_offset.saturating_sub(rows);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the whole screen from the current state.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let limits = self.session.limits();
        frame.render_widget(
            Paragraph::new(Header::new(limits, &self.theme).to_lines()),
            header_area,
        );

        let [left, right] =
            Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(0)]).areas(body_area);

        let [form_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(left);
        self.form.render(frame, form_area, &self.theme);
        if let Some(status) = &self.status {
            frame.render_widget(
                Paragraph::new(status.to_line(&self.theme))
                    .wrap(ratatui::widgets::Wrap { trim: true }),
                status_area,
            );
        }

        let [table_area, charts_area] =
            Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(right);
        let dataset = self.session.dataset();
        table_view::render_table_view(frame, table_area, dataset, self.table_offset, &self.theme);
        charts::render_deviation_analysis(frame, charts_area, dataset, limits, &self.theme);

        frame.render_widget(Paragraph::new(key_hints_line(&self.theme)), footer_area);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pile_core::export::REPORT_FILE_NAME;
    use pile_core::ToleranceStatus;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn new_app(dir: &TempDir) -> App {
        App::new("dark", dir.path().to_path_buf())
    }

    /// Fill the form: id, then overwrite every numeric field.
    fn enter_measurement(app: &mut App, id: &str, values: [&str; 6]) {
        while app.form.focused() != MeasurementForm::PILE_ID {
            app.handle_key(press(KeyCode::Tab));
        }
        app.handle_key(ctrl('u'));
        type_text(app, id);
        for v in values {
            app.handle_key(press(KeyCode::Tab));
            app.handle_key(ctrl('u'));
            type_text(app, v);
        }
        app.handle_key(press(KeyCode::Enter));
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let tmp = TempDir::new().expect("tempdir");
        let app = new_app(&tmp);
        assert!(app.session.dataset().is_empty());
        assert_eq!(app.table_offset, 0);
        assert!(app.status.is_none());
        assert_eq!(app.export_dir, tmp.path());
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        let app = App::new("neon", PathBuf::from("."));
        assert!(app.theme.header.fg.is_some());
    }

    // ── Quit keys ─────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        assert_eq!(app.handle_key(press(KeyCode::Esc)), AppAction::Quit);
        assert_eq!(app.handle_key(ctrl('c')), AppAction::Quit);
        // Plain 'q' is text input, not quit.
        assert_eq!(
            app.handle_key(press(KeyCode::Char('q'))),
            AppAction::Continue
        );
        assert_eq!(app.form.focused_field().buffer(), "q");
    }

    #[test]
    fn test_key_release_ignored() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert_eq!(app.form.focused_field().buffer(), "");
    }

    // ── Submit ────────────────────────────────────────────────────────────────

    #[test]
    fn test_submit_appends_and_acknowledges() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);

        enter_measurement(&mut app, "P-1", ["0", "0", "2.5", "0.1", "0.05", "2.5"]);

        assert_eq!(app.session.dataset().len(), 1);
        let r = &app.session.dataset().records()[0];
        assert_eq!(r.pile_id(), "P-1");
        assert_eq!(r.status(), ToleranceStatus::InTolerance);
        assert_eq!(
            app.status,
            Some(StatusMessage::Success(ADDED_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_submit_keeps_form_values() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);

        enter_measurement(&mut app, "P-1", ["0", "0", "2.5", "0", "0", "2.8"]);
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.session.dataset().len(), 2);
        let records = app.session.dataset().records();
        assert_eq!(records[0], records[1]);
        assert_eq!(records[1].status(), ToleranceStatus::OutOfTolerance);
    }

    #[test]
    fn test_submit_in_order() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);

        enter_measurement(&mut app, "A", ["0", "0", "2.5", "0", "0", "2.5"]);
        enter_measurement(&mut app, "B", ["0", "0", "2.5", "0.5", "0", "2.5"]);
        enter_measurement(&mut app, "C", ["1", "1", "2.5", "1", "1", "2.5"]);

        let ids: Vec<&str> = app
            .session
            .dataset()
            .iter()
            .map(|r| r.pile_id())
            .collect();
        assert_eq!(ids, ["A", "B", "C"]);
        assert_eq!(
            app.session.dataset().records()[1].status(),
            ToleranceStatus::OutOfTolerance
        );
    }

    #[test]
    fn test_step_keys_on_numeric_field() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        for _ in 0..MeasurementForm::INSTALLED_HEIGHT {
            app.handle_key(press(KeyCode::Tab));
        }
        app.handle_key(press(KeyCode::Up));
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.form.focused_field().buffer(), "0.2");
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.form.focused_field().buffer(), "0.1");
    }

    #[test]
    fn test_ctrl_u_clears_field_with_info_message() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        type_text(&mut app, "P-7");

        app.handle_key(ctrl('u'));

        assert_eq!(app.form.focused_field().buffer(), "");
        assert_eq!(
            app.status,
            Some(StatusMessage::Info("Cleared Pile ID".to_string()))
        );
    }

    #[test]
    fn test_back_tab_moves_focus_back() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.form.focused(), MeasurementForm::INSTALLED_HEIGHT);
    }

    // ── Export ────────────────────────────────────────────────────────────────

    #[test]
    fn test_export_writes_report() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        enter_measurement(&mut app, "P-1", ["0", "0", "2.5", "0.1", "0.05", "2.5"]);
        enter_measurement(&mut app, "P-2", ["0", "0", "2.5", "0.5", "0", "2.5"]);

        app.handle_key(ctrl('e'));

        let path = tmp.path().join(REPORT_FILE_NAME);
        let csv_text = std::fs::read_to_string(&path).expect("report exists");
        assert_eq!(csv_text.lines().count(), 3);
        assert!(matches!(app.status, Some(StatusMessage::Success(ref m)) if m.contains(REPORT_FILE_NAME)));
    }

    #[test]
    fn test_export_failure_reported_on_status_line() {
        let tmp = TempDir::new().expect("tempdir");
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut app = App::new("dark", blocker);

        app.handle_key(ctrl('e'));

        assert!(matches!(app.status, Some(StatusMessage::Error(ref m)) if m.starts_with("Export failed")));
        assert!(app.session.dataset().is_empty());
    }

    // ── Scrolling ─────────────────────────────────────────────────────────────

    #[test]
    fn test_scroll_clamped_to_dataset() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.table_offset, 0);

        for _ in 0..8 {
            app.handle_key(press(KeyCode::Enter));
        }
        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.table_offset, 5);
        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.table_offset, 7);
        app.handle_key(press(KeyCode::PageUp));
        app.handle_key(press(KeyCode::PageUp));
        assert_eq!(app.table_offset, 0);
        assert_eq!(app.session.dataset().len(), 8);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_empty_session() {
        let tmp = TempDir::new().expect("tempdir");
        let app = new_app(&tmp);
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("SOLAR PILE TOLERANCE MEASUREMENT"));
        assert!(text.contains("Enter Pile Measurement Data"));
        assert!(text.contains("No measurements yet"));
    }

    #[test]
    fn test_render_after_submit_shows_everything() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        enter_measurement(&mut app, "P-7", ["0", "0", "2.5", "0", "0", "2.8"]);
        let mut terminal = Terminal::new(TestBackend::new(200, 50)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains(ADDED_MESSAGE));
        assert!(text.contains("P-7"));
        assert!(text.contains("Height Deviation per Pile"));
        assert!(!text.contains("No measurements yet"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let tmp = TempDir::new().expect("tempdir");
        let mut app = new_app(&tmp);
        app.submit();
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
