//! Terminal rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::Clock;

/// Renders the calculator UI to the frame
pub fn render<C: Clock>(app: &CalculatorApp<C>, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Where the keypad lands on a screen of size `area`
///
/// Mouse hit-testing uses this, so it must agree with the render layout.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    horizontal_layout(area)[1]
}

fn horizontal_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(30),    // display and state
            Constraint::Length(26), // keypad
            Constraint::Length(22), // help sidebar
        ])
        .split(area)
        .to_vec()
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a, C: Clock> {
    app: &'a CalculatorApp<C>,
}

impl<'a, C: Clock> CalculatorUI<'a, C> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp<C>) -> Self {
        Self { app }
    }

    fn create_layout(&self, area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // display
                Constraint::Min(7),    // state
            ])
            .split(area)
            .to_vec()
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let display = self.app.display();

        let previous_style = if display.error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let current_style = if display.error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(display.previous, previous_style)),
            Line::from(Span::styled(display.current, current_style)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_state(&self, area: Rect, buf: &mut Buffer) {
        let session = self.app.session();
        let state = session.state();

        let recovery = match session.recovery_deadline_ms() {
            Some(deadline) => format!(
                "clears in {} ms",
                deadline.saturating_sub(session.now_ms())
            ),
            None => "idle".to_string(),
        };
        let operator = state
            .operation
            .map_or_else(|| "-".to_string(), |op| op.symbol().to_string());
        let reset = if state.should_reset_display { "yes" } else { "no" };

        let rows = [
            ("current", format!("{:?}", state.current_operand)),
            ("previous", format!("{:?}", state.previous_operand)),
            ("operator", operator),
            ("reset", reset.to_string()),
            ("recovery", recovery),
        ];
        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|(name, value)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{name:>9} "), Style::default().fg(Color::Gray)),
                    Span::styled(value, Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" State ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(area);

        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            HELP_OPERATORS,
            Style::default().fg(Color::Cyan),
        ))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(chunks[1], buf);
    }
}

impl<C: Clock> Widget for CalculatorUI<'_, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let h_chunks = horizontal_layout(area);
        if h_chunks.len() < 3 {
            return;
        }

        let chunks = self.create_layout(h_chunks[0]);
        self.render_display(chunks[0], buf);
        self.render_state(chunks[1], buf);

        KeypadWidget::new(self.app.keypad()).render(h_chunks[1], buf);
        self.render_help_sidebar(h_chunks[2], buf);
    }
}

/// Window title
pub const TITLE: &str = " Keypad Calculator ";

/// Key bindings shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("Enter", "Calculate"),
    ("=", "Calculate"),
    ("%", "Percent"),
    ("Bksp", "Delete"),
    ("Esc", "Clear"),
    ("Click", "Keypad"),
    ("Ctrl+C", "Quit"),
];

/// Operator keys
pub const HELP_OPERATORS: &str = "Ops: + - * / (x)";
