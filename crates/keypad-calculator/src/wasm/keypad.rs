//! Keypad buttons of the browser widget
//!
//! Each button carries either `data-number` or `data-action`. Clicks are
//! routed by reading those attributes back, like a delegated listener on
//! the document.

use super::dom::DomElement;
use crate::core::{Action, Digit, Operation};

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: Action,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        let id = match action {
            Action::Digit(Digit::Point) => "btn-decimal".to_string(),
            Action::Digit(d) => format!("btn-{d}"),
            other => format!("btn-{}", other.dom_action().unwrap_or("unknown")),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }

    /// CSS classes the widget styles this button with
    #[must_use]
    pub fn classes(&self) -> Vec<&'static str> {
        let kind = match self.action {
            Action::Digit(_) => "btn-number",
            Action::Operator(_) => "btn-operator",
            Action::Equals => "btn-equals",
            Action::Clear => "btn-clear",
            Action::Backspace | Action::Percent => "btn-function",
        };
        vec!["btn", kind]
    }

    /// Builds the `<button>` element
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let mut elem = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.action.label());
        for class in self.classes() {
            elem = elem.with_class(class);
        }
        match self.action {
            Action::Digit(d) => elem.with_attr("data-number", &d.to_string()),
            other => match other.dom_action() {
                Some(name) => elem.with_attr("data-action", name),
                None => elem,
            },
        }
    }
}

/// Keypad layout of the browser widget
///
/// ```text
/// [ C ] [ ⌫ ] [ % ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [   0     ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct WasmKeypad {
    buttons: Vec<KeypadButtonDef>,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let grid: [&[Action]; 5] = [
            &[
                Action::Clear,
                Action::Backspace,
                Action::Percent,
                Action::Operator(Operation::Divide),
            ],
            &[
                Action::Digit(Digit::Seven),
                Action::Digit(Digit::Eight),
                Action::Digit(Digit::Nine),
                Action::Operator(Operation::Multiply),
            ],
            &[
                Action::Digit(Digit::Four),
                Action::Digit(Digit::Five),
                Action::Digit(Digit::Six),
                Action::Operator(Operation::Subtract),
            ],
            &[
                Action::Digit(Digit::One),
                Action::Digit(Digit::Two),
                Action::Digit(Digit::Three),
                Action::Operator(Operation::Add),
            ],
            &[
                Action::Digit(Digit::Zero),
                Action::Digit(Digit::Point),
                Action::Equals,
            ],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self { buttons }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing `action`
    #[must_use]
    pub fn find_button_for_action(&self, action: Action) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Creates the keypad container with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.buttons.iter().fold(
            DomElement::new("div").with_class("buttons"),
            |container, btn| container.with_child(btn.to_element()),
        )
    }

    /// Action for a clicked element, read from its `data-*` attributes
    #[must_use]
    pub fn action_for_element(element: &DomElement) -> Option<Action> {
        if let Some(number) = element.data("number") {
            let mut chars = number.chars();
            let digit = chars.next().and_then(Digit::from_char)?;
            return chars.next().is_none().then_some(Action::Digit(digit));
        }
        element.data("action").and_then(Action::from_dom_action)
    }
}
