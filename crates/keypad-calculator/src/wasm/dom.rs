//! Mock DOM for the browser widget
//!
//! Reproduces the widget's DOM contract (element ids, `data-*` attributes,
//! CSS classes) so the browser behaviour can be tested without a browser.

use std::collections::HashMap;

use super::keypad::WasmKeypad;

/// Id of the large display line
pub const CURRENT_DISPLAY_ID: &str = "currentDisplay";

/// Id of the small display line
pub const PREVIOUS_DISPLAY_ID: &str = "previousDisplay";

/// Events kept by [`MockDom`]; older ones are dropped first
pub const EVENT_HISTORY_LIMIT: usize = 256;

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class if missing
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds or removes a class
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Gets a `data-*` attribute, `data("number")` reads `data-number`
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        self.get_attr(&format!("data-{name}"))
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Document-level keydown
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for testing the calculator without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Most recent events, at most [`EVENT_HISTORY_LIMIT`]
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator widget's DOM
    #[must_use]
    pub fn calculator() -> Self {
        Self::calculator_with_keypad(&WasmKeypad::new())
    }

    /// Creates the calculator DOM with the given keypad
    #[must_use]
    pub fn calculator_with_keypad(keypad: &WasmKeypad) -> Self {
        let mut dom = Self::new();

        let previous = DomElement::new("div")
            .with_id(PREVIOUS_DISPLAY_ID)
            .with_class("previous-operand");
        let current = DomElement::new("div")
            .with_id(CURRENT_DISPLAY_ID)
            .with_class("current-operand")
            .with_text("0");
        let display = DomElement::new("div")
            .with_class("display")
            .with_child(previous.clone())
            .with_child(current.clone());

        let buttons = keypad.create_keypad_element();

        dom.root = DomElement::new("div")
            .with_class("calculator")
            .with_child(display)
            .with_child(buttons.clone());

        dom.register_element(previous);
        dom.register_element(current);
        for button in buttons.children {
            dom.register_element(button);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event, forgetting the oldest once the history is full
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if self.event_history.len() >= EVENT_HISTORY_LIMIT {
            let excess = self.event_history.len() + 1 - EVENT_HISTORY_LIMIT;
            self.event_history.drain(..excess);
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// First element whose attribute `key` equals `value`
    ///
    /// Like `querySelector('[key="value"]')`.
    #[must_use]
    pub fn query_attr(&self, key: &str, value: &str) -> Option<&DomElement> {
        let mut matches: Vec<&DomElement> = self
            .elements
            .values()
            .filter(|e| e.get_attr(key) == Some(value))
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches.into_iter().next()
    }

    /// Ids of all elements carrying `class`, sorted
    #[must_use]
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .elements
            .values()
            .filter(|e| e.has_class(class))
            .map(|e| e.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Adds or removes a class on the element with `id`
    pub fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.toggle_class(class, on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_element_builders() {
        let elem = DomElement::new("button")
            .with_id("btn-7")
            .with_text("7")
            .with_class("btn")
            .with_attr("data-number", "7");
        assert_eq!(elem.tag, "button");
        assert_eq!(elem.id, "btn-7");
        assert_eq!(elem.text_content, "7");
        assert!(elem.has_class("btn"));
        assert_eq!(elem.data("number"), Some("7"));
        assert_eq!(elem.data("action"), None);
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_classes() {
        let mut elem = DomElement::new("div");
        elem.add_class("foo");
        elem.add_class("foo");
        assert_eq!(elem.classes.len(), 1);
        elem.toggle_class("bar", true);
        assert!(elem.has_class("bar"));
        elem.toggle_class("bar", false);
        assert!(!elem.has_class("bar"));
        elem.remove_class("foo");
        assert!(elem.classes.is_empty());
    }

    #[test]
    fn test_dom_event_constructors() {
        assert_eq!(
            DomEvent::click("btn-1"),
            DomEvent::Click {
                element_id: "btn-1".into()
            }
        );
        assert_eq!(
            DomEvent::key_down("Enter"),
            DomEvent::KeyDown {
                key: "Enter".into()
            }
        );
    }

    #[test]
    fn test_calculator_dom_displays() {
        let dom = MockDom::calculator();
        assert_eq!(dom.get_element_text(CURRENT_DISPLAY_ID), Some("0"));
        assert_eq!(dom.get_element_text(PREVIOUS_DISPLAY_ID), Some(""));
        assert_eq!(dom.root.children.len(), 2);
    }

    #[test]
    fn test_calculator_dom_number_buttons() {
        let dom = MockDom::calculator();
        for n in ["0", "1", "5", "9", "."] {
            let btn = dom.query_attr("data-number", n).unwrap();
            assert_eq!(btn.text_content, n);
            assert!(btn.has_class("btn"));
        }
    }

    #[test]
    fn test_calculator_dom_action_buttons() {
        let dom = MockDom::calculator();
        for name in [
            "add", "subtract", "multiply", "divide", "calculate", "clear", "delete", "percent",
        ] {
            assert!(dom.query_attr("data-action", name).is_some(), "{name}");
        }
        assert!(dom.query_attr("data-action", "power").is_none());
    }

    #[test]
    fn test_calculator_dom_operator_class() {
        let dom = MockDom::calculator();
        assert_eq!(dom.ids_with_class("btn-operator").len(), 4);
        assert_eq!(dom.ids_with_class("btn-equals").len(), 1);
        assert_eq!(dom.ids_with_class("btn-clear").len(), 1);
    }

    #[test]
    fn test_event_history() {
        let mut dom = MockDom::new();
        dom.dispatch_event(DomEvent::click("a"));
        dom.dispatch_event(DomEvent::key_down("1"));
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_event_history_is_bounded() {
        let mut dom = MockDom::new();
        for i in 0..EVENT_HISTORY_LIMIT + 10 {
            dom.dispatch_event(DomEvent::key_down(&i.to_string()));
        }
        let history = dom.event_history();
        assert_eq!(history.len(), EVENT_HISTORY_LIMIT);
        assert_eq!(history[0], DomEvent::key_down("10"));
        assert_eq!(
            history.last(),
            Some(&DomEvent::key_down(&(EVENT_HISTORY_LIMIT + 9).to_string()))
        );
    }

    #[test]
    fn test_toggle_class_by_id() {
        let mut dom = MockDom::calculator();
        dom.toggle_class(CURRENT_DISPLAY_ID, "error", true);
        assert!(dom.get_element(CURRENT_DISPLAY_ID).unwrap().has_class("error"));
        dom.toggle_class("missing", "error", true);
        assert!(dom.get_element("missing").is_none());
    }

    #[test]
    fn test_set_element_text() {
        let mut dom = MockDom::calculator();
        dom.set_element_text(CURRENT_DISPLAY_ID, "42");
        assert_eq!(dom.get_element_text(CURRENT_DISPLAY_ID), Some("42"));
        if let Some(elem) = dom.get_element_mut(PREVIOUS_DISPLAY_ID) {
            elem.set_text("6 × 7");
        }
        assert_eq!(dom.get_element_text(PREVIOUS_DISPLAY_ID), Some("6 × 7"));
    }
}
