//! Platform-neutral calculator driver
//!
//! Behaviour is written once against [`CalculatorDriver`] and run against
//! every front end: the terminal app here and the mock DOM in
//! [`crate::wasm::WasmDriver`].
//!
//! ```rust,ignore
//! let mut driver = TuiDriver::new();
//! driver.type_keys("5+3=");
//! assert_eq!(driver.current_display(), "8");
//! ```

use std::time::Duration;

use crate::core::{Action, CalcResult, CalculatorState};

/// Abstract driver over one calculator front end
pub trait CalculatorDriver {
    /// Performs an action as if its button was clicked
    fn press(&mut self, action: Action) -> CalcResult<Option<f64>>;

    /// Presses a key by its browser name; returns `false` if it was ignored
    fn press_key(&mut self, key: &str) -> bool;

    /// Text of the current (large) display line
    fn current_display(&self) -> String;

    /// Text of the previous (small) display line
    fn previous_display(&self) -> String;

    /// Whether the error indicator is showing
    fn is_error(&self) -> bool;

    /// Lets time pass and runs any timers that came due
    fn advance(&mut self, by: Duration);

    /// Engine state
    fn state(&self) -> CalculatorState;

    /// Presses one key per character
    fn type_keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.press_key(&c.to_string());
        }
    }
}

/// Terminal driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use std::time::Duration;

    use super::CalculatorDriver;
    use crate::config::CalculatorConfig;
    use crate::core::{Action, CalcResult, CalculatorState, ManualClock};
    use crate::session::CalculatorSession;
    use crate::tui::{key_event_from_name, CalculatorApp, KeyAction};

    /// Drives [`CalculatorApp`] on a manual clock
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp<ManualClock>,
        clock: ManualClock,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a driver with default config
        #[must_use]
        pub fn new() -> Self {
            Self::with_config(CalculatorConfig::default())
        }

        /// Creates a driver with the given config
        #[must_use]
        pub fn with_config(config: CalculatorConfig) -> Self {
            let clock = ManualClock::new();
            let session = CalculatorSession::with_clock(config, clock.clone());
            Self {
                app: CalculatorApp::with_session(session),
                clock,
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp<ManualClock> {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp<ManualClock> {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: Action) -> CalcResult<Option<f64>> {
            self.app.apply(action)
        }

        fn press_key(&mut self, key: &str) -> bool {
            key_event_from_name(key)
                .is_some_and(|event| matches!(self.app.handle_key_event(event), KeyAction::Calc(_)))
        }

        fn current_display(&self) -> String {
            self.app.display().current
        }

        fn previous_display(&self) -> String {
            self.app.display().previous
        }

        fn is_error(&self) -> bool {
            self.app.display().error
        }

        fn advance(&mut self, by: Duration) {
            self.clock.advance(by);
            self.app.tick();
        }

        fn state(&self) -> CalculatorState {
            self.app.session().state().clone()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared Verifications =====
// These run against any CalculatorDriver implementation

fn reset<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");
}

/// Verifies the four operators through the keyboard
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("5+3=", "8"), ("10-4=", "6"), ("6*7=", "42"), ("20/4=", "5")] {
        reset(driver);
        driver.type_keys(keys);
        assert_eq!(driver.current_display(), expected, "keys {keys}");
        assert_eq!(driver.previous_display(), "");
    }
}

/// Verifies that binary float noise never reaches the display
pub fn verify_decimal_rounding<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("0.1+0.2=");
    assert_eq!(driver.current_display(), "0.3");
    assert_eq!(driver.state().current_operand, "0.3");
}

/// Verifies that a second operator finishes the pending calculation
pub fn verify_operator_chaining<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("3+4*");
    assert_eq!(driver.state().previous_operand, "7");
    assert_eq!(driver.previous_display(), "7 ×");
    assert_eq!(driver.current_display(), "0");

    driver.type_keys("2=");
    assert_eq!(driver.current_display(), "14");
}

/// Verifies digit entry rules
pub fn verify_entry_rules<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.press_key("Backspace");
    assert_eq!(driver.current_display(), "0");

    driver.type_keys("7");
    assert_eq!(driver.current_display(), "7");

    reset(driver);
    driver.type_keys("3.5.");
    assert_eq!(driver.state().current_operand, "3.5");

    reset(driver);
    driver.type_keys("12.");
    assert_eq!(driver.current_display(), "12.");

    reset(driver);
    driver.type_keys("50%");
    assert_eq!(driver.current_display(), "0.5");
    assert!(driver.state().should_reset_display);
    driver.type_keys("4");
    assert_eq!(driver.current_display(), "4");
}

/// Verifies backspace on a displayed result clears everything
pub fn verify_backspace_after_result<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("2*21=");
    assert_eq!(driver.current_display(), "42");
    driver.press_key("Backspace");
    assert_eq!(driver.state(), CalculatorState::default());
}

/// Verifies the live preview and its divide-by-zero suppression
pub fn verify_preview<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("12+3");
    assert_eq!(driver.previous_display(), "12 + 3 = 15");

    reset(driver);
    driver.type_keys("5/0");
    assert_eq!(driver.previous_display(), "5 ÷ 0");
    assert!(!driver.is_error());
}

/// Verifies thousands grouping and exponent notation
pub fn verify_number_formatting<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("1234567");
    assert_eq!(driver.current_display(), "1,234,567");

    reset(driver);
    driver.type_keys("1234567890123456");
    assert_eq!(driver.current_display(), "1.234568e+15");
}

/// Verifies the divide-by-zero indicator and its timed auto-clear
pub fn verify_divide_by_zero_recovery<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("5/0");
    assert!(driver.press(Action::Equals).is_err());
    assert!(driver.is_error());
    assert_eq!(driver.current_display(), "Error");
    assert_eq!(driver.previous_display(), "Cannot divide by zero!");
    assert_eq!(driver.state().previous_operand, "5");

    driver.advance(Duration::from_millis(1999));
    assert!(driver.is_error());

    driver.advance(Duration::from_millis(1));
    assert!(!driver.is_error());
    assert_eq!(driver.current_display(), "0");
    assert_eq!(driver.state(), CalculatorState::default());
}

/// Verifies the overflow indicator
pub fn verify_overflow<D: CalculatorDriver>(driver: &mut D) {
    reset(driver);
    driver.type_keys("99999999");
    for _ in 0..60 {
        driver.type_keys("*99999999=");
        if driver.is_error() {
            break;
        }
    }
    assert!(driver.is_error());
    assert_eq!(driver.previous_display(), "Result too large!");

    driver.advance(Duration::from_millis(2000));
    assert!(!driver.is_error());
    assert_eq!(driver.state(), CalculatorState::default());
}

/// Runs every verification
pub fn run_all_verifications<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_decimal_rounding(driver);
    verify_operator_chaining(driver);
    verify_entry_rules(driver);
    verify_backspace_after_result(driver);
    verify_preview(driver);
    verify_number_formatting(driver);
    verify_divide_by_zero_recovery(driver);
    verify_overflow(driver);
}
