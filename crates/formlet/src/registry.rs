//! Field discovery: the render walk over the child tree.
//!
//! [`walk`] is a pure depth-first traversal. It returns the transformed
//! [`BoundNode`] tree together with the [`Registry`] built from it as an
//! explicit pair — nothing is mutated behind the caller's back, and the
//! form rebuilds its registry from scratch on every render pass, so
//! controls that drop out of the tree drop out of the registry too.

use tracing::trace;

use crate::engine::ErrorMap;
use crate::rules::ValidatorConfig;
use crate::tree::{BoundControl, BoundNode, Control, Node};
use crate::value::ValueMap;

/// What one render walk discovered: the bindable field names in first-seen
/// order, and the control-declared validation rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    fields: Vec<String>,
    rules: ValidatorConfig,
}

impl Registry {
    fn new() -> Self {
        Self::default()
    }

    /// The discovered field names, in first-seen traversal order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The control-declared validation rules, keyed by field name.
    pub fn rules(&self) -> &ValidatorConfig {
        &self.rules
    }

    /// Returns `true` if the field was discovered by this walk.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    fn register(&mut self, control: &Control) {
        // First occurrence fixes the position; re-registering is a no-op
        // for ordering.
        if !self.contains(&control.name) {
            trace!(field = %control.name, kind = %control.kind, "registered field");
            self.fields.push(control.name.clone());
        }
        // Rules are last-write-wins within a single walk.
        if let Some(rules) = &control.rules {
            self.rules.insert(control.name.clone(), rules.clone());
        }
    }
}

/// Walks the child tree, producing the bound tree and the registry.
///
/// Controls get their current value from `values` (falling back to the
/// kind's default) and their error list from `errors`; containers are
/// rebuilt with transformed children; text leaves pass through unchanged.
pub fn walk(children: &[Node], values: &ValueMap, errors: &ErrorMap) -> (Vec<BoundNode>, Registry) {
    let mut registry = Registry::new();
    let bound = walk_nodes(children, values, errors, &mut registry);
    (bound, registry)
}

fn walk_nodes(
    children: &[Node],
    values: &ValueMap,
    errors: &ErrorMap,
    registry: &mut Registry,
) -> Vec<BoundNode> {
    children
        .iter()
        .map(|node| walk_node(node, values, errors, registry))
        .collect()
}

fn walk_node(
    node: &Node,
    values: &ValueMap,
    errors: &ErrorMap,
    registry: &mut Registry,
) -> BoundNode {
    match node {
        Node::Control(control) => {
            registry.register(control);
            let value = values
                .get(&control.name)
                .cloned()
                .unwrap_or_else(|| control.kind.default_value());
            let field_errors = errors.get(&control.name).cloned().unwrap_or_default();
            BoundNode::Control(BoundControl {
                kind: control.kind,
                name: control.name.clone(),
                value,
                errors: field_errors,
            })
        }
        Node::Container(container) => BoundNode::Container {
            tag: container.tag.clone(),
            children: walk_nodes(&container.children, values, errors, registry),
        },
        Node::Text(text) => BoundNode::Text(text.clone()),
    }
}
