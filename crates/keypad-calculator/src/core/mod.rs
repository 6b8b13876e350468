//! Calculator core: the two-operand state machine and everything it needs
//!
//! Nothing in here knows about terminals or the DOM. Adapters translate
//! input into [`Action`]s, route them through [`dispatch`], and render
//! [`CalculatorState`].

mod action;
mod clock;
mod engine;
pub mod number;
mod operations;
mod recovery;

pub use action::{dispatch, Action, Digit};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{CalculatorEngine, CalculatorState, Preview};
pub use operations::Operation;
pub use recovery::ErrorRecovery;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Recoverable calculation errors
///
/// None of these abort the session. The session shows an error indicator and
/// schedules an auto-clear through [`ErrorRecovery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a zero right-hand operand
    #[error("Division by zero")]
    DivideByZero,
    /// Result overflowed to infinity
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Result is NaN
    #[error("Invalid result: NaN")]
    InvalidResult,
}

impl CalcError {
    /// User-facing message shown next to the error indicator
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DivideByZero => "Cannot divide by zero!",
            Self::Overflow => "Result too large!",
            Self::InvalidResult => "Invalid result!",
        }
    }
}
