//! The form instance: binding, editing, and submission.
//!
//! A [`Form`] owns the value store and the field registry for one mounted
//! form. The embedding layer drives it with three calls: [`render`] on
//! every render pass (walks the child tree, rebuilds the registry,
//! returns the bound tree to display), [`set_value`] on every edit, and
//! [`submit`] on the submission event. Externally controlled values flow
//! back in through [`reconcile`].
//!
//! Submission always runs to completion: the unconditional observer fires
//! with the finalized values, then exactly one of the failure handler
//! (error map, store untouched) or the success reducer (finalized values
//! in, next store contents out) runs. A configuration error aborts the
//! attempt before any callback fires.
//!
//! [`render`]: Form::render
//! [`set_value`]: Form::set_value
//! [`submit`]: Form::submit
//! [`reconcile`]: Form::reconcile

use std::fmt;

use tracing::debug;

use formlet_core::FormResult;

use crate::engine::{self, ErrorMap};
use crate::predicates::PredicateSet;
use crate::registry::{self, Registry};
use crate::rules::ValidatorConfig;
use crate::store::ValueStore;
use crate::tree::{BoundNode, Node};
use crate::value::{FieldValue, ValueMap};

type SubmitObserver = Box<dyn FnMut(&ValueMap)>;
type SuccessReducer = Box<dyn FnMut(ValueMap) -> ValueMap>;
type ErrorHandler = Box<dyn FnMut(&ErrorMap)>;

/// The result of one completed submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No rule failed; carries the finalized value set.
    Valid(ValueMap),
    /// At least one rule failed; carries the full error map.
    Invalid(ErrorMap),
}

/// One mounted form: value store, field registry, configuration, and
/// outcome callbacks.
pub struct Form {
    store: ValueStore,
    registry: Registry,
    external_errors: ErrorMap,
    validate: ValidatorConfig,
    predicates: PredicateSet,
    on_submit: Option<SubmitObserver>,
    on_success: Option<SuccessReducer>,
    on_error: Option<ErrorHandler>,
}

impl Form {
    /// Creates a form with no values, no configuration, and the built-in
    /// predicate set.
    pub fn new() -> Self {
        Self {
            store: ValueStore::default(),
            registry: Registry::default(),
            external_errors: ErrorMap::new(),
            validate: ValidatorConfig::new(),
            predicates: PredicateSet::builtin(),
            on_submit: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Seeds the value store with externally supplied initial values.
    #[must_use]
    pub fn with_values(mut self, values: ValueMap) -> Self {
        self.store = ValueStore::new(values);
        self
    }

    /// Sets the externally supplied error set (injected into bound
    /// controls on render, and consulted by reconciliation).
    #[must_use]
    pub fn with_errors(mut self, errors: ErrorMap) -> Self {
        self.external_errors = errors;
        self
    }

    /// Sets the form-declared validation configuration, merged over
    /// control-declared rules on every submission.
    #[must_use]
    pub fn with_validate(mut self, config: ValidatorConfig) -> Self {
        self.validate = config;
        self
    }

    /// Replaces the injected predicate set (defaults to the built-ins).
    #[must_use]
    pub fn with_predicates(mut self, predicates: PredicateSet) -> Self {
        self.predicates = predicates;
        self
    }

    /// Sets the unconditional per-attempt observer. It receives the
    /// finalized values on every completed attempt, success or failure.
    #[must_use]
    pub fn on_submit(mut self, observer: impl FnMut(&ValueMap) + 'static) -> Self {
        self.on_submit = Some(Box::new(observer));
        self
    }

    /// Sets the success reducer: finalized values in, next value store
    /// contents out. Return an empty map to clear the form, or the values
    /// back to keep them. Without a reducer the finalized values are kept.
    #[must_use]
    pub fn on_success(mut self, reducer: impl FnMut(ValueMap) -> ValueMap + 'static) -> Self {
        self.on_success = Some(Box::new(reducer));
        self
    }

    /// Sets the failure handler, invoked with the error map when any rule
    /// fails.
    #[must_use]
    pub fn on_error(mut self, handler: impl FnMut(&ErrorMap) + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Runs the render walk over the child tree.
    ///
    /// Rebuilds the field registry and the control-declared rules from
    /// scratch — only controls present in this tree are known afterwards
    /// — and returns the bound tree with current values and external
    /// errors injected.
    pub fn render(&mut self, children: &[Node]) -> Vec<BoundNode> {
        let (bound, registry) =
            registry::walk(children, self.store.values(), &self.external_errors);
        debug!(fields = registry.fields().len(), "render walk complete");
        self.registry = registry;
        bound
    }

    /// The change-handler path: writes one field's new value.
    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.store.write(field, value);
    }

    /// Reconciles externally controlled values and errors.
    ///
    /// The store is replaced wholesale only when the values differ from
    /// the previous external set and `errors` is empty; the error set is
    /// adopted either way for subsequent renders. Returns `true` if the
    /// store was replaced.
    pub fn reconcile(&mut self, values: &ValueMap, errors: &ErrorMap) -> bool {
        let replaced = self.store.reconcile(values, errors);
        self.external_errors = errors.clone();
        replaced
    }

    /// The live value store contents.
    pub fn values(&self) -> &ValueMap {
        self.store.values()
    }

    /// The field names discovered by the most recent render walk.
    pub fn fields(&self) -> &[String] {
        self.registry.fields()
    }

    /// Runs one submission attempt.
    ///
    /// Finalizes the values (every known field present, empty-string
    /// default), merges control- and form-declared rules, validates, and
    /// dispatches: the observer always fires; on failure the error
    /// handler runs and the store is left untouched; on success the
    /// reducer's return value becomes the new store contents.
    ///
    /// `Err` means a configuration error (unknown predicate or unusable
    /// arguments), not a validation failure.
    pub fn submit(&mut self) -> FormResult<SubmitOutcome> {
        let finalized = self.store.finalize(self.registry.fields());
        let merged = engine::merge_configs(self.registry.rules(), &self.validate);
        let errors = engine::validate(&finalized, &merged, &self.predicates)?;

        if let Some(observer) = &mut self.on_submit {
            observer(&finalized);
        }

        if !errors.is_empty() {
            debug!(failing = errors.len(), "submission rejected");
            if let Some(handler) = &mut self.on_error {
                handler(&errors);
            }
            return Ok(SubmitOutcome::Invalid(errors));
        }

        debug!("submission accepted");
        let next = match &mut self.on_success {
            Some(reducer) => reducer(finalized.clone()),
            None => finalized.clone(),
        };
        self.store.replace(next);
        Ok(SubmitOutcome::Valid(finalized))
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .field("external_errors", &self.external_errors)
            .field("validate", &self.validate)
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}
