//! Ratatui-based terminal form.
//!
//! The TUI renders the ten input fields, runs the estimate pipeline on an
//! explicit predict action, and shows either the formatted price or the
//! prediction error. The form stays usable after a failed prediction.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::pipeline::EstimateOutput;
use crate::cli::ModelArgs;
use crate::error::AppError;
use crate::model::GbdtModel;

mod form;

use form::{FIELDS, FormState};

/// Start the TUI.
pub fn run(args: ModelArgs) -> Result<(), AppError> {
    // Load the model before touching the terminal: a failed load must abort
    // startup with a plain fatal error, not a broken alternate screen.
    let (client, model) = crate::app::pipeline::load_model(args.model_url.as_deref())?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(model, client.url().to_string());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Outcome region state. A failed prediction clears any previous price; the
/// price is never shown alongside an error.
enum EstimateState {
    Empty,
    Priced(EstimateOutput),
    Failed(String),
}

struct App {
    form: FormState,
    model: GbdtModel,
    model_url: String,
    result: EstimateState,
    status: String,
}

impl App {
    fn new(model: GbdtModel, model_url: String) -> Self {
        let status = format!(
            "Model loaded ({} trees, trained {}).",
            model.tree_count(),
            model.trained_at(),
        );
        Self {
            form: FormState::new(),
            model,
            model_url,
            result: EstimateState::Empty,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.form.editing {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.form.select_prev(),
            KeyCode::Down => self.form.select_next(),
            KeyCode::Left => self.form.adjust(-1),
            KeyCode::Right => self.form.adjust(1),
            KeyCode::Enter => {
                if self.form.begin_edit() {
                    self.status =
                        "Editing value (digits only). Enter to apply, Esc to cancel.".to_string();
                } else {
                    self.status = "Use Left/Right to change this field.".to_string();
                }
            }
            KeyCode::Char('p') => self.run_predict(),
            KeyCode::Char('d') => self.write_debug_bundle(),
            _ => {}
        }

        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.form.cancel_edit();
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => match self.form.apply_edit() {
                Ok(()) => {
                    self.status = format!(
                        "{}: {}",
                        FIELDS[self.form.selected].label,
                        self.form.value_label(self.form.selected),
                    );
                }
                Err(message) => self.status = message,
            },
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.push_digit(c),
            _ => {}
        }
    }

    fn run_predict(&mut self) {
        match crate::app::pipeline::run_estimate(&self.model, &self.form.features) {
            Ok(out) => {
                self.status = format!(
                    "Estimated price: {}",
                    crate::report::format_price(out.price)
                );
                self.result = EstimateState::Priced(out);
            }
            Err(err) => {
                self.status = "Prediction failed.".to_string();
                self.result = EstimateState::Failed(format!("Prediction failed: {err}"));
            }
        }
    }

    fn write_debug_bundle(&mut self) {
        let outcome = crate::app::pipeline::run_estimate(&self.model, &self.form.features);
        match crate::debug::write_debug_bundle(
            &self.model,
            &self.model_url,
            &self.form.features,
            &outcome,
        ) {
            Ok(path) => {
                self.status = format!("Wrote debug bundle: {}", path.display());
            }
            Err(err) => {
                self.status = format!("Debug write failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("hp", Style::default().fg(Color::Cyan)),
            Span::raw(" — house price estimator"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "model: trained {} | trees={} | features={}",
                self.model.trained_at(),
                self.model.tree_count(),
                self.model.n_features(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FIELDS
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                ListItem::new(format!("{:<22} {}", spec.label, self.form.value_label(idx)))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("House features").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.form.selected));
        frame.render_stateful_widget(list, area, &mut state);

        if self.form.editing {
            let hint = Paragraph::new("Editing value…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Estimate").borders(Borders::ALL);

        let text = match &self.result {
            EstimateState::Empty => Text::from(Span::styled(
                "No estimate yet. Press p to predict.",
                Style::default().fg(Color::Gray),
            )),
            EstimateState::Priced(out) => {
                let mut lines: Vec<Line> = Vec::new();
                lines.push(Line::from(Span::styled(
                    crate::report::format_price(out.price),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::raw(""));
                let parts: Vec<String> =
                    out.vector.iter().map(|v| format!("{v:.0}")).collect();
                lines.push(Line::from(Span::styled(
                    format!("vector: [{}]", parts.join(", ")),
                    Style::default().fg(Color::Gray),
                )));
                Text::from(lines)
            }
            EstimateState::Failed(message) => Text::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
        };

        let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  p predict  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FEATURE_COUNT;
    use crate::model::{ARTIFACT_TOOL, ARTIFACT_VERSION, ModelFile, Tree, TreeNode};
    use chrono::NaiveDate;

    fn test_app(n_features: usize) -> App {
        let file = ModelFile {
            tool: ARTIFACT_TOOL.to_string(),
            version: ARTIFACT_VERSION,
            trained_at: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            n_features,
            feature_names: (0..n_features).map(|i| format!("f{i}")).collect(),
            base_score: 200_000.0,
            trees: vec![Tree {
                nodes: vec![TreeNode::Leaf { value: 0.0 }],
            }],
        };
        let model = GbdtModel::from_file(file).unwrap();
        App::new(model, "http://localhost:1/m.json".to_string())
    }

    #[test]
    fn predict_key_populates_the_price_region() {
        let mut app = test_app(FEATURE_COUNT);
        app.handle_key(KeyCode::Char('p'));

        match &app.result {
            EstimateState::Priced(out) => assert_eq!(out.price, 200_000.0),
            _ => panic!("expected a priced result"),
        }
        assert!(app.status.contains("$200,000.00"));
    }

    #[test]
    fn failed_prediction_shows_error_and_clears_price() {
        // Model trained on a different width: every submission fails.
        let mut app = test_app(12);
        app.handle_key(KeyCode::Char('p'));

        match &app.result {
            EstimateState::Failed(message) => {
                assert!(message.starts_with("Prediction failed:"));
            }
            _ => panic!("expected a failed result"),
        }

        // The session stays usable: keys still move the form.
        app.handle_key(KeyCode::Down);
        assert_eq!(app.form.selected, 1);
    }

    #[test]
    fn quit_key_exits_the_loop() {
        let mut app = test_app(FEATURE_COUNT);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(!app.handle_key(KeyCode::Down));
    }
}
