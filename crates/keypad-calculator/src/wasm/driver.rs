//! Mock-DOM driver
//!
//! Plays the browser widget against [`MockDom`]: clicks are routed through
//! `data-*` attributes, keydowns through [`Action::from_key`], and every
//! change is rendered back into element text and CSS classes.

use std::time::Duration;

use tracing::debug;

use super::dom::{DomEvent, MockDom, CURRENT_DISPLAY_ID, PREVIOUS_DISPLAY_ID};
use super::keypad::WasmKeypad;
use crate::config::CalculatorConfig;
use crate::core::{Action, CalcResult, CalculatorState, Clock, ManualClock};
use crate::driver::CalculatorDriver;
use crate::session::CalculatorSession;

/// Class toggled on the current display while an error shows
pub const ERROR_CLASS: &str = "error";

/// Class marking the pending operator's button
pub const ACTIVE_CLASS: &str = "active";

/// Class applied to a button during its press feedback
pub const PRESSED_CLASS: &str = "pressed";

/// Driver over the mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    session: CalculatorSession<ManualClock>,
    clock: ManualClock,
    dom: MockDom,
    keypad: WasmKeypad,
    /// (button id, release deadline)
    pressed: Vec<(String, u64)>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a driver with the given config
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let clock = ManualClock::new();
        let keypad = WasmKeypad::new();
        let mut driver = Self {
            session: CalculatorSession::with_clock(config, clock.clone()),
            clock,
            dom: MockDom::calculator_with_keypad(&keypad),
            keypad,
            pressed: Vec::new(),
        };
        driver.render();
        driver
    }

    /// Returns a reference to the session
    #[must_use]
    pub fn session(&self) -> &CalculatorSession<ManualClock> {
        &self.session
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Clicks the element with `element_id`
    ///
    /// Returns `None` when the element carries neither `data-number` nor
    /// `data-action`.
    pub fn click(&mut self, element_id: &str) -> Option<CalcResult<Option<f64>>> {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let action = self
            .dom
            .get_element(element_id)
            .and_then(WasmKeypad::action_for_element)?;

        let result = self.session.handle(action);
        self.animate(element_id.to_string());
        self.render();
        Some(result)
    }

    /// Dispatches a document keydown; returns `false` for unhandled keys
    pub fn key_down(&mut self, key: &str) -> bool {
        self.dom.dispatch_event(DomEvent::key_down(key));
        let Some(action) = Action::from_key(key) else {
            return false;
        };

        let _ = self.session.handle(action);
        let button = self
            .keypad
            .find_button_for_action(action)
            .map(|b| b.id.clone());
        if let Some(id) = button {
            self.animate(id);
        }
        self.render();
        true
    }

    /// Runs timers that came due at the current clock time
    pub fn tick(&mut self) {
        self.session.tick();
        let now = self.clock.now_ms();
        let (expired, pending): (Vec<_>, Vec<_>) = self
            .pressed
            .drain(..)
            .partition(|(_, deadline)| now >= *deadline);
        self.pressed = pending;
        for (id, _) in expired {
            self.dom.toggle_class(&id, PRESSED_CLASS, false);
        }
        self.render();
    }

    /// Id of the button carrying the `active` class
    #[must_use]
    pub fn active_button(&self) -> Option<String> {
        self.dom.ids_with_class(ACTIVE_CLASS).into_iter().next()
    }

    /// Whether the button with `id` shows press feedback
    #[must_use]
    pub fn is_pressed(&self, id: &str) -> bool {
        self.dom
            .get_element(id)
            .is_some_and(|e| e.has_class(PRESSED_CLASS))
    }

    fn animate(&mut self, id: String) {
        let deadline = self
            .clock
            .now_ms()
            .saturating_add(self.session.config().press_feedback_ms);
        self.dom.toggle_class(&id, PRESSED_CLASS, true);
        self.pressed.retain(|(pressed, _)| *pressed != id);
        self.pressed.push((id, deadline));
    }

    fn render(&mut self) {
        let snapshot = self.session.display();
        self.dom.set_element_text(CURRENT_DISPLAY_ID, &snapshot.current);
        self.dom
            .toggle_class(CURRENT_DISPLAY_ID, ERROR_CLASS, snapshot.error);
        self.dom.set_element_text(PREVIOUS_DISPLAY_ID, &snapshot.previous);

        let active_id = snapshot
            .active_operator
            .and_then(|op| self.keypad.find_button_for_action(Action::Operator(op)))
            .map(|b| b.id.clone());
        for id in self.dom.ids_with_class("btn-operator") {
            let on = active_id.as_deref() == Some(id.as_str());
            self.dom.toggle_class(&id, ACTIVE_CLASS, on);
        }
        debug!(current = %snapshot.current, previous = %snapshot.previous, "dom rendered");
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, action: Action) -> CalcResult<Option<f64>> {
        match self
            .keypad
            .find_button_for_action(action)
            .map(|b| b.id.clone())
            .and_then(|id| self.click(&id))
        {
            Some(result) => result,
            None => Ok(None),
        }
    }

    fn press_key(&mut self, key: &str) -> bool {
        self.key_down(key)
    }

    fn current_display(&self) -> String {
        self.dom
            .get_element_text(CURRENT_DISPLAY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn previous_display(&self) -> String {
        self.dom
            .get_element_text(PREVIOUS_DISPLAY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn is_error(&self) -> bool {
        self.dom
            .get_element(CURRENT_DISPLAY_ID)
            .is_some_and(|e| e.has_class(ERROR_CLASS))
    }

    fn advance(&mut self, by: Duration) {
        self.clock.advance(by);
        self.tick();
    }

    fn state(&self) -> CalculatorState {
        self.session.state().clone()
    }
}
