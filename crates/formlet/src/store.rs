//! The value store: the single owner of a form's current values.
//!
//! Seeded from externally supplied initial values, written on every edit,
//! and reconciled when a new external value set arrives. Reconciliation
//! is the controlled-reset path: the store is replaced wholesale only
//! when the external values actually changed since the last push *and*
//! the external error set is empty — a stale external push never
//! clobbers in-progress invalid edits.

use tracing::debug;

use crate::engine::ErrorMap;
use crate::value::{FieldValue, ValueMap};

/// Holds the current value for every edited field, plus the external
/// value set it was last reconciled against.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: ValueMap,
    external: ValueMap,
}

impl ValueStore {
    /// Creates a store seeded from externally supplied initial values.
    pub fn new(initial: ValueMap) -> Self {
        Self {
            values: initial.clone(),
            external: initial,
        }
    }

    /// Returns the stored value for `field`, or empty text if unset.
    pub fn read(&self, field: &str) -> FieldValue {
        self.values.get(field).cloned().unwrap_or_default()
    }

    /// Sets `field` to `value`, leaving all other entries untouched.
    pub fn write(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Replaces the whole store contents (the success-reducer path).
    pub fn replace(&mut self, values: ValueMap) {
        self.values = values;
    }

    /// The live store contents.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Reconciles against a newly supplied external value set.
    ///
    /// The store is replaced when `external_values` differs from the
    /// previously supplied external set and `external_errors` is empty.
    /// Either way, the supplied set becomes the reference for the next
    /// comparison. Returns `true` if the store was replaced.
    pub fn reconcile(&mut self, external_values: &ValueMap, external_errors: &ErrorMap) -> bool {
        let changed = *external_values != self.external;
        let replaced = changed && external_errors.is_empty();
        if replaced {
            debug!(fields = external_values.len(), "reconciled value store from external values");
            self.values = external_values.clone();
        }
        self.external = external_values.clone();
        replaced
    }

    /// Produces the complete value set for a submission attempt: every
    /// field in `fields` present, defaulted to empty text, overlaid with
    /// whatever the store holds for it.
    ///
    /// Fields not in `fields` (e.g. controls hidden since their last
    /// edit) are not reported, even if the store still holds a value.
    pub fn finalize(&self, fields: &[String]) -> ValueMap {
        fields
            .iter()
            .map(|field| (field.clone(), self.read(field)))
            .collect()
    }
}
