//! Clickable keypad for the terminal calculator
//!
//! The grid mirrors the browser widget:
//!
//! ```text
//! [ C ] [ ⌫ ] [ % ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [   0     ] [ . ] [ = ]
//! ```
//!
//! A pressed button lights up until its feedback deadline passes; the
//! chosen operator stays highlighted while it is pending.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{Action, Digit, Operation};

/// Default press highlight duration
pub const PRESS_FEEDBACK_MS: u64 = 150;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: Action,
    /// Grid row
    pub row: usize,
    /// Leftmost grid column
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
    /// Press highlight deadline in clock milliseconds
    pub pressed_until: Option<u64>,
    /// Persistent highlight of the pending operator
    pub active: bool,
}

impl KeypadButton {
    /// Creates a one-column button
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        Self {
            action,
            row,
            col,
            span: 1,
            pressed_until: None,
            active: false,
        }
    }

    /// Widens the button to `span` columns
    #[must_use]
    pub fn spanning(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// Label drawn on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.action.label()
    }

    /// Whether the press highlight is showing
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed_until.is_some()
    }

    /// Whether the button covers grid cell (`row`, `col`)
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }
}

/// The 5x4 keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
    feedback_ms: u64,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad with the default press feedback
    #[must_use]
    pub fn new() -> Self {
        Self::with_feedback_ms(PRESS_FEEDBACK_MS)
    }

    /// Creates the standard keypad with a custom press feedback duration
    #[must_use]
    pub fn with_feedback_ms(feedback_ms: u64) -> Self {
        let digit = |d: Digit| Action::Digit(d);
        let op = |o: Operation| Action::Operator(o);
        let buttons = vec![
            KeypadButton::new(Action::Clear, 0, 0),
            KeypadButton::new(Action::Backspace, 0, 1),
            KeypadButton::new(Action::Percent, 0, 2),
            KeypadButton::new(op(Operation::Divide), 0, 3),
            KeypadButton::new(digit(Digit::Seven), 1, 0),
            KeypadButton::new(digit(Digit::Eight), 1, 1),
            KeypadButton::new(digit(Digit::Nine), 1, 2),
            KeypadButton::new(op(Operation::Multiply), 1, 3),
            KeypadButton::new(digit(Digit::Four), 2, 0),
            KeypadButton::new(digit(Digit::Five), 2, 1),
            KeypadButton::new(digit(Digit::Six), 2, 2),
            KeypadButton::new(op(Operation::Subtract), 2, 3),
            KeypadButton::new(digit(Digit::One), 3, 0),
            KeypadButton::new(digit(Digit::Two), 3, 1),
            KeypadButton::new(digit(Digit::Three), 3, 2),
            KeypadButton::new(op(Operation::Add), 3, 3),
            KeypadButton::new(digit(Digit::Zero), 4, 0).spanning(2),
            KeypadButton::new(digit(Digit::Point), 4, 2),
            KeypadButton::new(Action::Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
            feedback_ms,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds the button that performs `action`
    #[must_use]
    pub fn find_action(&self, action: Action) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Lights up the button for `action` until the feedback deadline
    pub fn press_action(&mut self, action: Action, now_ms: u64) {
        let deadline = now_ms.saturating_add(self.feedback_ms);
        if let Some(btn) = self.buttons.iter_mut().find(|b| b.action == action) {
            btn.pressed_until = Some(deadline);
        }
    }

    /// Releases buttons whose feedback has expired; returns whether any did
    pub fn release_expired(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        for btn in &mut self.buttons {
            if btn.pressed_until.is_some_and(|until| now_ms >= until) {
                btn.pressed_until = None;
                changed = true;
            }
        }
        changed
    }

    /// Releases all buttons immediately
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed_until = None;
        }
    }

    /// Highlights the pending operator, clearing any previous highlight
    pub fn set_active_operator(&mut self, op: Option<Operation>) {
        for btn in &mut self.buttons {
            btn.active = matches!(btn.action, Action::Operator(o) if Some(o) == op);
        }
    }

    /// Operator currently highlighted
    #[must_use]
    pub fn active_operator(&self) -> Option<Operation> {
        self.buttons.iter().find_map(|b| match b.action {
            Action::Operator(op) if b.active => Some(op),
            _ => None,
        })
    }

    /// Converts a click position to the action under it
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<Action> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // border
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = usize::from((rel_x - 1) / btn_width);
        let row = usize::from((rel_y - 1) / btn_height);
        self.get_button_at(row, col).map(|b| b.action)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

fn button_style(btn: &KeypadButton) -> Style {
    if btn.is_pressed() {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    if btn.active {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
    }
    match btn.action {
        Action::Digit(_) => Style::default().fg(Color::White),
        Action::Operator(_) => Style::default().fg(Color::Yellow),
        Action::Equals => Style::default().fg(Color::Green),
        Action::Clear => Style::default().fg(Color::Red),
        Action::Backspace | Action::Percent => Style::default().fg(Color::Cyan),
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for btn in self.keypad.buttons() {
            let width = btn_width * btn.span as u16;
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height;

            if width >= 3 {
                let label = format!("[{}]", btn.label());
                let label_width = label.chars().count() as u16;
                let label_x = x + width.saturating_sub(label_width) / 2;
                let label_y = y + btn_height / 2;

                if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                    buf.set_span(label_x, label_y, &Span::styled(label, button_style(btn)), width);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_layout() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 19);
        assert_eq!(keypad.dimensions(), (5, 4));
    }

    #[test]
    fn test_keypad_rows() {
        let keypad = Keypad::new();
        let labels = |row: usize| -> Vec<String> {
            (0..4)
                .filter_map(|col| keypad.get_button_at(row, col))
                .map(KeypadButton::label)
                .collect()
        };
        assert_eq!(labels(0), ["C", "⌫", "%", "÷"]);
        assert_eq!(labels(1), ["7", "8", "9", "×"]);
        assert_eq!(labels(4), ["0", "0", ".", "="]);
    }

    #[test]
    fn test_zero_spans_two_columns() {
        let keypad = Keypad::new();
        let zero = Action::Digit(Digit::Zero);
        assert_eq!(keypad.get_button_at(4, 0).map(|b| b.action), Some(zero));
        assert_eq!(keypad.get_button_at(4, 1).map(|b| b.action), Some(zero));
        assert!(keypad.get_button_at(5, 0).is_none());
    }

    #[test]
    fn test_every_action_has_one_button() {
        let keypad = Keypad::new();
        for d in Digit::ALL {
            assert!(keypad.find_action(Action::Digit(d)).is_some());
        }
        for op in Operation::ALL {
            assert!(keypad.find_action(Action::Operator(op)).is_some());
        }
        for action in [Action::Equals, Action::Clear, Action::Backspace, Action::Percent] {
            assert!(keypad.find_action(action).is_some());
        }
    }

    #[test]
    fn test_press_feedback_expires() {
        let mut keypad = Keypad::new();
        let five = Action::Digit(Digit::Five);
        keypad.press_action(five, 1000);
        let idx = keypad.find_action(five).unwrap();
        assert!(keypad.get_button(idx).unwrap().is_pressed());

        assert!(!keypad.release_expired(1149));
        assert!(keypad.get_button(idx).unwrap().is_pressed());
        assert!(keypad.release_expired(1150));
        assert!(!keypad.get_button(idx).unwrap().is_pressed());
    }

    #[test]
    fn test_custom_feedback_duration() {
        let mut keypad = Keypad::with_feedback_ms(40);
        keypad.press_action(Action::Equals, 0);
        assert!(keypad.release_expired(40));
    }

    #[test]
    fn test_release_all() {
        let mut keypad = Keypad::new();
        keypad.press_action(Action::Clear, 0);
        keypad.press_action(Action::Percent, 0);
        keypad.release_all();
        assert!(keypad.buttons().all(|b| !b.is_pressed()));
    }

    #[test]
    fn test_active_operator_is_exclusive() {
        let mut keypad = Keypad::new();
        keypad.set_active_operator(Some(Operation::Add));
        assert_eq!(keypad.active_operator(), Some(Operation::Add));
        keypad.set_active_operator(Some(Operation::Divide));
        assert_eq!(keypad.active_operator(), Some(Operation::Divide));
        assert_eq!(keypad.buttons().filter(|b| b.active).count(), 1);
        keypad.set_active_operator(None);
        assert_eq!(keypad.active_operator(), None);
    }

    #[test]
    fn test_hit_test() {
        let keypad = Keypad::new();
        // 4 columns x 6 wide, 5 rows x 2 tall inside the border
        let area = Rect::new(10, 5, 26, 12);
        assert_eq!(keypad.hit_test(area, 11, 6), Some(Action::Clear));
        assert_eq!(
            keypad.hit_test(area, 29, 6),
            Some(Action::Operator(Operation::Divide))
        );
        assert_eq!(
            keypad.hit_test(area, 17, 15),
            Some(Action::Digit(Digit::Zero))
        );
        assert_eq!(keypad.hit_test(area, 30, 15), Some(Action::Equals));
    }

    #[test]
    fn test_hit_test_outside_and_border() {
        let keypad = Keypad::new();
        let area = Rect::new(10, 5, 26, 12);
        assert_eq!(keypad.hit_test(area, 0, 0), None);
        assert_eq!(keypad.hit_test(area, 10, 6), None);
        assert_eq!(keypad.hit_test(area, 11, 5), None);
        assert_eq!(keypad.hit_test(area, 35, 6), None);
    }

    #[test]
    fn test_hit_test_too_small() {
        let keypad = Keypad::new();
        assert_eq!(keypad.hit_test(Rect::new(0, 0, 4, 4), 1, 1), None);
    }

    #[test]
    fn test_render_labels() {
        let keypad = Keypad::new();
        let area = Rect::new(0, 0, 26, 12);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad).render(area, &mut buf);
        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        for label in ["[C]", "[÷]", "[7]", "[0]", "[=]"] {
            assert!(content.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_render_too_small_draws_border_only() {
        let keypad = Keypad::new();
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad).render(area, &mut buf);
        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!content.contains('['));
    }

    #[test]
    fn test_pressed_style() {
        let mut btn = KeypadButton::new(Action::Digit(Digit::One), 0, 0);
        btn.pressed_until = Some(10);
        assert_eq!(button_style(&btn).bg, Some(Color::Yellow));
        btn.pressed_until = None;
        btn.active = true;
        assert_eq!(button_style(&btn).bg, Some(Color::Cyan));
    }
}
