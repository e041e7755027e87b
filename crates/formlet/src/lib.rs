//! # formlet
//!
//! A declarative form-state engine. Hand a [`Form`] the element tree you
//! want to display and it handles value binding and validation: the
//! render walk discovers bindable controls and injects their current
//! values, edits flow in through [`Form::set_value`], and
//! [`Form::submit`] validates the finalized values against the merged
//! rule configuration and reports either the validated value set or a
//! per-field error map.
//!
//! Rendering itself stays with the embedding layer: the walk returns a
//! [`BoundNode`] tree describing what to display, never pixels or HTML.
//!
//! ```
//! use formlet::{Control, Form, Node, Rule, RuleSet, SubmitOutcome};
//!
//! let mut form = Form::new().on_success(|_| formlet::ValueMap::new());
//! let tree = vec![
//!     Node::container("div", vec![
//!         Control::text_input("firstName")
//!             .validate(RuleSet::new().with(Rule::new("notEmpty").msg("Enter a first name.")))
//!             .into(),
//!     ]),
//! ];
//!
//! form.render(&tree);
//! form.set_value("firstName", "Stan");
//! match form.submit().expect("well-configured form") {
//!     SubmitOutcome::Valid(values) => assert_eq!(values["firstName"].as_text(), "Stan"),
//!     SubmitOutcome::Invalid(errors) => panic!("unexpected errors: {errors:?}"),
//! }
//! ```

pub mod engine;
pub mod form;
pub mod predicates;
pub mod registry;
pub mod rules;
pub mod store;
pub mod tree;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use engine::ErrorMap;
pub use form::{Form, SubmitOutcome};
pub use formlet_core::{FormError, FormResult};
pub use predicates::PredicateSet;
pub use registry::Registry;
pub use rules::{Rule, RuleSet, ValidatorConfig};
pub use tree::{BoundControl, BoundNode, Container, Control, ControlKind, Node};
pub use value::{FieldValue, ValueMap};
