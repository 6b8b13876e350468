//! Operand entry state machine
//!
//! State transitions:
//! - digits append to the current operand (or replace it after a result)
//! - an operator moves the current operand to the left-hand side, finishing
//!   any pending calculation first (operator chaining)
//! - equals and percent commit a value and arm the reset-on-next-input flag

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::action::Digit;
use super::number::{operand_text, parse_operand, round_to_precision, DEFAULT_PRECISION};
use super::operations::Operation;
use super::{CalcError, CalcResult};

/// The engine's complete state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Operand being typed; empty means "awaiting first digit"
    pub current_operand: String,
    /// Left-hand operand once an operator was chosen; empty when none pending
    pub previous_operand: String,
    /// Pending operator
    pub operation: Option<Operation>,
    /// Next digit starts a fresh operand instead of appending
    pub should_reset_display: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_operand: "0".to_string(),
            previous_operand: String::new(),
            operation: None,
            should_reset_display: false,
        }
    }
}

/// Non-committing projection of the pending calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    /// Nothing to preview: no operator or an operand doesn't parse
    None,
    /// The rounded value `calculate` would commit
    Value(f64),
    /// The divisor is zero
    DivideByZero,
}

impl Preview {
    /// Returns the previewed value, if any
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::None | Self::DivideByZero => None,
        }
    }
}

/// Two-operand calculator engine
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    state: CalculatorState,
    precision: u32,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates an engine in the initial state, rounding to 9 decimal places
    #[must_use]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Creates an engine rounding committed results to `precision` places
    #[must_use]
    pub fn with_precision(precision: u32) -> Self {
        Self {
            state: CalculatorState::default(),
            precision,
        }
    }

    /// Creates an engine resuming from an existing state
    #[must_use]
    pub fn from_state(state: CalculatorState) -> Self {
        Self {
            state,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Read-only view of the state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Operand currently being typed
    #[must_use]
    pub fn current_operand(&self) -> &str {
        &self.state.current_operand
    }

    /// Pending left-hand operand
    #[must_use]
    pub fn previous_operand(&self) -> &str {
        &self.state.previous_operand
    }

    /// Pending operator
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.state.operation
    }

    /// Whether the next digit starts a fresh operand
    #[must_use]
    pub fn should_reset_display(&self) -> bool {
        self.state.should_reset_display
    }

    /// Decimal places kept by `calculate`
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Enters a digit or the decimal point
    pub fn input_digit(&mut self, digit: Digit) {
        let state = &mut self.state;
        if digit == Digit::Point && state.current_operand.contains('.') {
            return;
        }

        if state.should_reset_display {
            state.current_operand.clear();
            state.should_reset_display = false;
        }

        if state.current_operand == "0" && digit != Digit::Point {
            state.current_operand.clear();
        }
        state.current_operand.push(digit.as_char());
    }

    /// Chooses an operator, finishing a pending calculation first
    ///
    /// Returns the value committed by the implicit calculation, if one ran.
    /// On error the operator is not recorded and the state is left as it was.
    pub fn choose_operator(&mut self, op: Operation) -> CalcResult<Option<f64>> {
        if self.state.current_operand.is_empty() {
            return Ok(None);
        }

        let mut committed = None;
        if !self.state.previous_operand.is_empty() && !self.state.should_reset_display {
            committed = self.calculate()?;
        }

        self.state.operation = Some(op);
        self.state.previous_operand = std::mem::take(&mut self.state.current_operand);
        self.state.should_reset_display = false;
        debug!(operator = ?op, lhs = %self.state.previous_operand, "operator chosen");
        Ok(committed)
    }

    /// Applies the pending operator and commits the rounded result
    ///
    /// Returns `Ok(None)` without touching the state when there is nothing to
    /// calculate.
    pub fn calculate(&mut self) -> CalcResult<Option<f64>> {
        let Some((lhs, op, rhs)) = self.pending() else {
            return Ok(None);
        };

        let raw = op.apply(lhs, rhs).inspect_err(|e| {
            warn!(lhs, rhs, operator = ?op, error = %e, "calculation rejected");
        })?;
        let result = round_to_precision(raw, self.precision);

        self.state.current_operand = operand_text(result);
        self.state.operation = None;
        self.state.previous_operand.clear();
        self.state.should_reset_display = true;
        info!(lhs, rhs, operator = ?op, result, "calculation committed");
        Ok(Some(result))
    }

    /// Resets to the initial state
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
        debug!("engine cleared");
    }

    /// Removes the last typed character; discards a displayed result entirely
    pub fn backspace(&mut self) {
        if self.state.should_reset_display {
            self.clear();
            return;
        }

        let operand = &mut self.state.current_operand;
        if operand.chars().count() <= 1 {
            *operand = "0".to_string();
        } else {
            operand.pop();
        }
    }

    /// Divides the current operand by 100 and commits it
    ///
    /// Operands that don't parse (a lone `.`) are left alone.
    pub fn percent(&mut self) -> Option<f64> {
        if self.state.current_operand.is_empty() {
            return None;
        }
        let value = parse_operand(&self.state.current_operand)? / 100.0;

        self.state.current_operand = operand_text(value);
        self.state.should_reset_display = true;
        debug!(value, "percent applied");
        Some(value)
    }

    /// What `calculate` would produce, without mutating anything
    #[must_use]
    pub fn preview_result(&self) -> Preview {
        let Some((lhs, op, rhs)) = self.pending() else {
            return Preview::None;
        };
        match op.apply(lhs, rhs) {
            Err(CalcError::DivideByZero) => Preview::DivideByZero,
            _ => Preview::Value(round_to_precision(
                op.apply_unchecked(lhs, rhs),
                self.precision,
            )),
        }
    }

    /// Parsed operands and operator, when a calculation is possible
    fn pending(&self) -> Option<(f64, Operation, f64)> {
        let lhs = parse_operand(&self.state.previous_operand)?;
        let rhs = parse_operand(&self.state.current_operand)?;
        let op = self.state.operation?;
        Some((lhs, op, rhs))
    }
}
