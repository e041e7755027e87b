//! Error types for the formlet engine.
//!
//! Only *configuration* mistakes are modeled here — a rule naming a
//! predicate that was never registered, or a rule handing a predicate
//! arguments it cannot interpret. These are programmer errors: they abort
//! the submission attempt instead of being folded into the per-field
//! error map, since continuing silently would hide a miswired form.
//!
//! Ordinary validation failures are not errors in this sense. They are
//! expected, user-input-driven, and travel through the error map returned
//! to the failure callback.

use thiserror::Error;

/// The error type for form configuration problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A validation rule resolved to a predicate name that is not present
    /// in the injected predicate set.
    #[error("no predicate registered for rule `{rule}` (resolved to `{predicate}`)")]
    UnknownPredicate {
        /// The rule name as configured.
        rule: String,
        /// The predicate name the rule resolved to.
        predicate: String,
    },

    /// A predicate could not interpret the arguments configured for its
    /// rule (wrong arity or wrong types).
    #[error("rule `{rule}` passed arguments its predicate cannot use: {reason}")]
    PredicateArgs {
        /// The rule name as configured.
        rule: String,
        /// What the predicate objected to.
        reason: String,
    },
}

/// A convenient `Result` alias using [`FormError`].
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_predicate_display() {
        let err = FormError::UnknownPredicate {
            rule: "email".to_string(),
            predicate: "isEmail".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no predicate registered for rule `email` (resolved to `isEmail`)"
        );
    }

    #[test]
    fn test_predicate_args_display() {
        let err = FormError::PredicateArgs {
            rule: "matches".to_string(),
            reason: "expected a string pattern".to_string(),
        };
        assert!(err.to_string().contains("matches"));
        assert!(err.to_string().contains("expected a string pattern"));
    }
}
