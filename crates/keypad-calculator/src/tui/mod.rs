//! Terminal front end: ratatui rendering, crossterm input, clickable keypad

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{browser_key_name, key_event_from_name, InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget, PRESS_FEEDBACK_MS};
pub use ui::{keypad_area, render, CalculatorUI};
