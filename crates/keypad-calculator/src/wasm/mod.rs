//! Browser front end
//!
//! `BrowserCalculator` is the wasm-bindgen export. The mock DOM and
//! [`WasmDriver`] reproduce the page's DOM contract so the browser
//! behaviour is testable natively.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{
    DomElement, DomEvent, MockDom, CURRENT_DISPLAY_ID, EVENT_HISTORY_LIMIT, PREVIOUS_DISPLAY_ID,
};
pub use driver::{WasmDriver, ACTIVE_CLASS, ERROR_CLASS, PRESSED_CLASS};
pub use keypad::{KeypadButtonDef, WasmKeypad};
