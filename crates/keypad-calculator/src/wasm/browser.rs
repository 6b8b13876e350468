//! Browser bindings
//!
//! The page owns the DOM and the timers. It forwards clicks and keydowns
//! here with `performance.now()`, reads the display lines back, and calls
//! [`BrowserCalculator::tick`] from its animation loop so the error
//! auto-clear can fire. Every entry point takes the page time, so a delay
//! always counts from the input that raised the error.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::CalculatorConfig;
use crate::core::{Action, Digit, ManualClock};
use crate::session::CalculatorSession;

/// Calculator widget exported to JavaScript
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    session: CalculatorSession<ManualClock>,
    clock: ManualClock,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator with the default 2 s error auto-clear
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator with a custom error auto-clear delay
    ///
    /// A zero delay is raised to 1 ms, the smallest one config accepts.
    #[wasm_bindgen(js_name = withRecoveryDelay)]
    pub fn with_recovery_delay(delay_ms: u32) -> Self {
        let delay_ms = u64::from(delay_ms.max(1));
        Self::with_config(CalculatorConfig::default().with_recovery_delay_ms(delay_ms))
    }

    /// Handles a click on a `data-number` button
    #[wasm_bindgen(js_name = clickNumber)]
    pub fn click_number(&mut self, number: &str, now_ms: f64) -> bool {
        let mut chars = number.chars();
        let digit = match (chars.next().and_then(Digit::from_char), chars.next()) {
            (Some(digit), None) => digit,
            _ => return false,
        };
        self.catch_up(now_ms);
        let _ = self.session.handle(Action::Digit(digit));
        true
    }

    /// Handles a click on a `data-action` button
    #[wasm_bindgen(js_name = clickAction)]
    pub fn click_action(&mut self, action: &str, now_ms: f64) -> bool {
        match Action::from_dom_action(action) {
            Some(action) => {
                self.catch_up(now_ms);
                let _ = self.session.handle(action);
                true
            }
            None => false,
        }
    }

    /// Handles a document keydown; `false` means the key was ignored
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, now_ms: f64) -> bool {
        let Some(action) = Action::from_key(key) else {
            return false;
        };
        self.catch_up(now_ms);
        let _ = self.session.handle(action);
        true
    }

    /// Advances to `now_ms` and fires the auto-clear if due
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.set_now(now_ms);
        self.session.tick()
    }

    /// Text for `#currentDisplay`
    #[wasm_bindgen(getter, js_name = currentDisplay)]
    pub fn current_display(&self) -> String {
        self.session.display().current
    }

    /// Text for `#previousDisplay`
    #[wasm_bindgen(getter, js_name = previousDisplay)]
    pub fn previous_display(&self) -> String {
        self.session.display().previous
    }

    /// Whether `#currentDisplay` should carry the `error` class
    #[wasm_bindgen(getter, js_name = isError)]
    pub fn is_error(&self) -> bool {
        self.session.is_error()
    }

    /// `data-action` name of the operator button to highlight
    #[wasm_bindgen(getter, js_name = activeOperator)]
    pub fn active_operator(&self) -> Option<String> {
        self.session
            .display()
            .active_operator
            .map(|op| op.action_name().to_string())
    }

    /// When the pending auto-clear fires, in clock milliseconds
    #[wasm_bindgen(getter, js_name = recoveryDeadlineMs)]
    pub fn recovery_deadline_ms(&self) -> Option<f64> {
        self.session.recovery_deadline_ms().map(|ms| ms as f64)
    }

    /// Engine state as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        self.session
            .state_json()
            .unwrap_or_else(|_| "{}".to_string())
    }
}

impl BrowserCalculator {
    /// Moves the clock to page time; non-finite and non-positive values are ignored
    fn set_now(&self, now_ms: f64) {
        if now_ms.is_finite() && now_ms > 0.0 {
            self.clock.set_ms(now_ms as u64);
        }
    }

    /// Runs a due auto-clear before the input at `now_ms`, like the page timer would have
    fn catch_up(&mut self, now_ms: f64) {
        self.set_now(now_ms);
        self.session.tick();
    }

    /// Creates a calculator from a full config
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        console_error_panic_hook::set_once();

        let clock = ManualClock::new();
        Self {
            session: CalculatorSession::with_clock(config, clock.clone()),
            clock,
        }
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Keypad calculator initialized".into());
}
