//! Keypad Calculator
//!
//! A browser-style two-operand calculator: a digit/operator/equals state
//! machine with a live preview, thousands grouping, and an error indicator
//! that clears itself after a delay.
//!
//! One [`session::CalculatorSession`] owns the engine and its timers. Two
//! front ends drive it:
//!
//! - **Terminal** (`tui` feature): ratatui rendering, keyboard and mouse input
//! - **Browser** (`wasm` feature): wasm-bindgen export, with a mock DOM for
//!   native tests
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! for action in [
//!     Action::Digit(Digit::One),
//!     Action::Digit(Digit::Two),
//!     Action::Operator(Operation::Add),
//!     Action::Digit(Digit::Three),
//! ] {
//!     dispatch(&mut engine, action).unwrap();
//! }
//! assert_eq!(engine.preview_result(), Preview::Value(15.0));
//!
//! assert_eq!(dispatch(&mut engine, Action::Equals), Ok(Some(15.0)));
//! assert_eq!(engine.current_operand(), "15");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

/// Browser front end; the mock DOM is always available for testing
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::{
        dispatch, Action, CalcError, CalcResult, CalculatorEngine, CalculatorState, Clock, Digit,
        ErrorRecovery, ManualClock, Operation, Preview, SystemClock,
    };
    pub use crate::display::{format_number, DisplayFormat, DisplaySnapshot};
    pub use crate::driver::CalculatorDriver;
    pub use crate::session::CalculatorSession;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut engine = CalculatorEngine::new();
        dispatch(&mut engine, Action::Digit(Digit::Seven)).unwrap();
        assert_eq!(engine.current_operand(), "7");
    }

    #[test]
    fn test_session_through_prelude() {
        let clock = ManualClock::new();
        let mut session = CalculatorSession::with_clock(CalculatorConfig::default(), clock.clone());
        for key in ["8", "/", "0", "Enter"] {
            assert!(session.handle_key(key));
        }
        assert_eq!(session.error(), Some(CalcError::DivideByZero));

        clock.advance(Duration::from_millis(2000));
        assert!(session.tick());
        assert_eq!(session.display().current, "0");
    }

    #[test]
    fn test_format_number_through_prelude() {
        assert_eq!(format_number("1234.5"), "1,234.5");
    }

    #[test]
    fn test_drivers_agree() {
        let mut wasm = WasmDriver::new();
        wasm.type_keys("6*7=");
        assert_eq!(wasm.current_display(), "42");

        #[cfg(feature = "tui")]
        {
            let mut tui = TuiDriver::new();
            tui.type_keys("6*7=");
            assert_eq!(tui.current_display(), wasm.current_display());
            assert_eq!(tui.state(), wasm.state());
        }
    }
}
