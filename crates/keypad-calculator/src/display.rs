//! Display text shared by every adapter
//!
//! Two lines: the current operand (large) and the pending expression with a
//! live preview (small). Numbers are grouped in threes with `,` and switch to
//! exponent notation once the raw text gets too long.

use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::core::number::{operand_text, parse_operand, to_exponential};
use crate::core::{CalcError, CalculatorState, Operation, Preview};

/// Text shown on the current line while an error is displayed
pub const ERROR_TEXT: &str = "Error";

/// Number formatting parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormat {
    /// Raw text longer than this is shown in exponent notation
    pub scientific_threshold: usize,
    /// Fraction digits used in exponent notation
    pub exponent_digits: usize,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            scientific_threshold: 15,
            exponent_digits: 6,
        }
    }
}

impl From<&CalculatorConfig> for DisplayFormat {
    fn from(config: &CalculatorConfig) -> Self {
        Self {
            scientific_threshold: config.scientific_threshold,
            exponent_digits: config.exponent_digits,
        }
    }
}

impl DisplayFormat {
    /// Formats operand text for display
    #[must_use]
    pub fn format_number(&self, text: &str) -> String {
        if text.chars().count() > self.scientific_threshold {
            let value = parse_operand(text).unwrap_or(f64::NAN);
            return to_exponential(value, self.exponent_digits);
        }

        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text, None),
        };
        let integer = group_integer(integer);
        match fraction {
            Some(fraction) => format!("{integer}.{fraction}"),
            None => integer,
        }
    }

    /// Current line: the operand being typed, `0` while awaiting input
    #[must_use]
    pub fn current_line(&self, state: &CalculatorState) -> String {
        if state.current_operand.is_empty() {
            self.format_number("0")
        } else {
            self.format_number(&state.current_operand)
        }
    }

    /// Previous line: `lhs op`, then ` rhs` and ` = preview` once available
    #[must_use]
    pub fn previous_line(&self, state: &CalculatorState, preview: Preview) -> String {
        let Some(op) = state.operation else {
            return String::new();
        };
        if state.previous_operand.is_empty() {
            return String::new();
        }

        let mut line = format!("{} {}", self.format_number(&state.previous_operand), op);
        if !state.current_operand.is_empty() && !state.should_reset_display {
            line.push(' ');
            line.push_str(&self.format_number(&state.current_operand));
            if let Preview::Value(value) = preview {
                line.push_str(" = ");
                line.push_str(&self.format_number(&operand_text(value)));
            }
        }
        line
    }

    /// Snapshot of a normal (non-error) display
    #[must_use]
    pub fn snapshot(&self, state: &CalculatorState, preview: Preview) -> DisplaySnapshot {
        DisplaySnapshot {
            current: self.current_line(state),
            previous: self.previous_line(state, preview),
            error: false,
            active_operator: state.operation,
        }
    }
}

/// Formats operand text with the default parameters
#[must_use]
pub fn format_number(text: &str) -> String {
    DisplayFormat::default().format_number(text)
}

/// Rounds the integer part half away from zero and groups it in threes
///
/// Unparseable text renders as nothing so `.5` stays `.5`.
fn group_integer(text: &str) -> String {
    let Some(value) = parse_operand(text) else {
        return String::new();
    };

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}∞");
    }

    // Display prints the shortest round-trip digits padded with zeros
    let digits = format!("{}", value.abs().round());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

/// What an adapter renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Large line
    pub current: String,
    /// Small line above it
    pub previous: String,
    /// Whether the error indicator is showing
    pub error: bool,
    /// Operator to highlight on the keypad
    pub active_operator: Option<Operation>,
}

impl DisplaySnapshot {
    /// Error indicator: `Error` over the user-facing message
    #[must_use]
    pub fn error(err: CalcError, active_operator: Option<Operation>) -> Self {
        Self {
            current: ERROR_TEXT.to_string(),
            previous: err.message().to_string(),
            error: true,
            active_operator,
        }
    }
}
