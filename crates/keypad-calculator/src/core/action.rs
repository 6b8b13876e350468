//! Input actions and the single routing point into the engine

use tracing::debug;

use super::engine::CalculatorEngine;
use super::operations::Operation;
use super::CalcResult;

/// One of the eleven operand entry tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Digit {
    /// 0
    Zero,
    /// 1
    One,
    /// 2
    Two,
    /// 3
    Three,
    /// 4
    Four,
    /// 5
    Five,
    /// 6
    Six,
    /// 7
    Seven,
    /// 8
    Eight,
    /// 9
    Nine,
    /// Decimal point
    Point,
}

impl Digit {
    /// All tokens, digits in ascending order then the point
    pub const ALL: [Self; 11] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Point,
    ];

    /// Character appended to the operand
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Point => '.',
        }
    }

    /// Parses `0`-`9` or `.`
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_char() == c)
    }

    /// Digit for a value in `0..=9`
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied().filter(|d| *d != Self::Point)
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Everything a user can ask the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Enter a digit or the decimal point
    Digit(Digit),
    /// Choose an operator
    Operator(Operation),
    /// Calculate the pending operation
    Equals,
    /// Reset everything
    Clear,
    /// Delete the last character
    Backspace,
    /// Divide the current operand by 100
    Percent,
}

impl Action {
    /// Maps a browser `KeyboardEvent.key` name
    ///
    /// Returns `None` for keys the calculator doesn't handle.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Escape" => Some(Self::Clear),
            "Backspace" => Some(Self::Backspace),
            "%" => Some(Self::Percent),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Digit::from_char(c)
                    .map(Self::Digit)
                    .or_else(|| Operation::from_key(c).map(Self::Operator))
            }
        }
    }

    /// Maps a button's `data-action` attribute value
    #[must_use]
    pub fn from_dom_action(name: &str) -> Option<Self> {
        match name {
            "calculate" => Some(Self::Equals),
            "clear" => Some(Self::Clear),
            "delete" => Some(Self::Backspace),
            "percent" => Some(Self::Percent),
            _ => Operation::from_action_name(name).map(Self::Operator),
        }
    }

    /// Name used in `data-action` attributes, `None` for digits
    #[must_use]
    pub const fn dom_action(self) -> Option<&'static str> {
        match self {
            Self::Digit(_) => None,
            Self::Operator(op) => Some(op.action_name()),
            Self::Equals => Some("calculate"),
            Self::Clear => Some("clear"),
            Self::Backspace => Some("delete"),
            Self::Percent => Some("percent"),
        }
    }

    /// Keypad label
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Percent => "%".to_string(),
        }
    }
}

/// Routes an action to exactly one engine operation
///
/// Returns the committed value for equals, percent and chained operators.
pub fn dispatch(engine: &mut CalculatorEngine, action: Action) -> CalcResult<Option<f64>> {
    debug!(?action, "dispatch");
    match action {
        Action::Digit(digit) => {
            engine.input_digit(digit);
            Ok(None)
        }
        Action::Operator(op) => engine.choose_operator(op),
        Action::Equals => engine.calculate(),
        Action::Clear => {
            engine.clear();
            Ok(None)
        }
        Action::Backspace => {
            engine.backspace();
            Ok(None)
        }
        Action::Percent => Ok(engine.percent()),
    }
}
