//! The element tree handed to a form, and its bound counterpart.
//!
//! A [`Node`] describes one element of the child tree an embedding layer
//! composes: a bindable [`Control`], a [`Container`] that only groups
//! other nodes, or a plain [`Text`](Node::Text) leaf. The form's render
//! pass walks this tree and produces a [`BoundNode`] tree of the same
//! shape, where every control has its current value (or checked state)
//! and its externally supplied error messages injected.
//!
//! Presentation is out of scope: the embedding layer decides what a
//! `Container` tag or a `ControlKind` actually looks like on screen.

use std::fmt;

use crate::rules::RuleSet;
use crate::value::FieldValue;

/// The fixed set of bindable control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// A single-line text input.
    TextInput,
    /// A multi-line text area.
    Textarea,
    /// A selection list.
    Select,
    /// A checkbox-style toggle; binds checked state, not text.
    Checkbox,
}

impl ControlKind {
    /// Returns `true` for kinds that bind a [`FieldValue::Toggle`].
    pub const fn is_toggle(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// The control's default value when the store has no entry for it.
    pub fn default_value(self) -> FieldValue {
        if self.is_toggle() {
            FieldValue::Toggle(false)
        } else {
            FieldValue::empty()
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::Textarea => "Textarea",
            Self::Select => "Select",
            Self::Checkbox => "Checkbox",
        };
        write!(f, "{name}")
    }
}

/// A bindable control declaration: kind, field name, and optionally a
/// control-declared rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// What kind of control this is.
    pub kind: ControlKind,
    /// The field name this control binds to.
    pub name: String,
    /// Validation rules declared inline on the control.
    pub rules: Option<RuleSet>,
}

impl Control {
    /// Creates a control of the given kind with no inline rules.
    pub fn new(kind: ControlKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            rules: None,
        }
    }

    /// A single-line text input.
    pub fn text_input(name: impl Into<String>) -> Self {
        Self::new(ControlKind::TextInput, name)
    }

    /// A multi-line text area.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(ControlKind::Textarea, name)
    }

    /// A selection list.
    pub fn select(name: impl Into<String>) -> Self {
        Self::new(ControlKind::Select, name)
    }

    /// A checkbox-style toggle.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(ControlKind::Checkbox, name)
    }

    /// Attaches inline validation rules to this control.
    #[must_use]
    pub fn validate(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }
}

/// A non-bindable grouping element with nested children.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// An opaque tag the embedding layer interprets (e.g. `"div"`).
    pub tag: String,
    /// The nested child nodes, walked recursively.
    pub children: Vec<Node>,
}

/// One element of the child tree a form is given to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A bindable control.
    Control(Control),
    /// A grouping element; its children are walked recursively.
    Container(Container),
    /// A plain text leaf, passed through unchanged.
    Text(String),
}

impl Node {
    /// A grouping node with the given tag and children.
    pub fn container(tag: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Container(Container {
            tag: tag.into(),
            children,
        })
    }

    /// A plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<Control> for Node {
    fn from(control: Control) -> Self {
        Self::Control(control)
    }
}

/// A control after the render walk: the declaration plus its injected
/// current value and the externally supplied errors for its field.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundControl {
    /// What kind of control this is.
    pub kind: ControlKind,
    /// The field name this control binds to.
    pub name: String,
    /// The current value (or checked state) to display.
    pub value: FieldValue,
    /// Error messages for this field from the external error set.
    pub errors: Vec<String>,
}

/// The transformed tree produced by the render walk. Same shape as the
/// input [`Node`] tree, with values and errors injected into controls.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundNode {
    /// A control with injected state.
    Control(BoundControl),
    /// A grouping element with transformed children.
    Container {
        /// The container's tag, unchanged.
        tag: String,
        /// The transformed children.
        children: Vec<BoundNode>,
    },
    /// A plain text leaf, unchanged.
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    #[test]
    fn test_control_constructors() {
        let input = Control::text_input("firstName");
        assert_eq!(input.kind, ControlKind::TextInput);
        assert_eq!(input.name, "firstName");
        assert!(input.rules.is_none());

        assert_eq!(Control::textarea("bio").kind, ControlKind::Textarea);
        assert_eq!(Control::select("country").kind, ControlKind::Select);
        assert_eq!(Control::checkbox("terms").kind, ControlKind::Checkbox);
    }

    #[test]
    fn test_only_checkbox_is_toggle() {
        assert!(ControlKind::Checkbox.is_toggle());
        assert!(!ControlKind::TextInput.is_toggle());
        assert!(!ControlKind::Textarea.is_toggle());
        assert!(!ControlKind::Select.is_toggle());
    }

    #[test]
    fn test_default_values_per_kind() {
        assert_eq!(
            ControlKind::Checkbox.default_value(),
            FieldValue::Toggle(false)
        );
        assert_eq!(ControlKind::TextInput.default_value(), FieldValue::empty());
    }

    #[test]
    fn test_validate_attaches_rules() {
        let control =
            Control::text_input("firstName").validate(RuleSet::new().with(Rule::new("notEmpty")));
        assert!(control.rules.expect("rules").get("notEmpty").is_some());
    }

    #[test]
    fn test_nested_tree_construction() {
        let tree = Node::container(
            "div",
            vec![
                Node::text("Name:"),
                Control::text_input("name").into(),
            ],
        );
        match tree {
            Node::Container(container) => {
                assert_eq!(container.tag, "div");
                assert_eq!(container.children.len(), 2);
            }
            _ => panic!("expected a container"),
        }
    }
}
