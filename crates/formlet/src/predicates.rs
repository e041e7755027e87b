//! The injected predicate capability set.
//!
//! Rules do not call validation code directly. They name a predicate,
//! and the name is resolved against a [`PredicateSet`] supplied at form
//! construction. Resolution follows the validator-library convention the
//! original rule configs were written against: `contains`, `equals`, and
//! `matches` (and anything already starting with `is`) are used verbatim;
//! any other rule name gets `is` prepended with its first letter
//! capitalized, so rule `email` resolves to predicate `isEmail`.
//!
//! A rule naming an unregistered predicate is a configuration error, not
//! a validation failure: it aborts the submission attempt.
//!
//! Predicates take the field's textual value first and the rule's
//! positional arguments after it. Returning `Err` means the arguments
//! themselves were unusable (wrong arity or type) — also a configuration
//! error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use formlet_core::{FormError, FormResult};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid regex"));

/// The signature every predicate implements: textual field value first,
/// configured rule arguments after. `Ok(false)` is a validation failure;
/// `Err` is an argument problem (a configuration error).
pub type PredicateFn =
    Arc<dyn Fn(&str, &[serde_json::Value]) -> Result<bool, String> + Send + Sync>;

/// A named collection of predicates, injected at form construction.
#[derive(Clone)]
pub struct PredicateSet {
    entries: HashMap<String, PredicateFn>,
}

impl PredicateSet {
    /// Creates a set with no predicates registered.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a set containing the built-in predicates.
    ///
    /// Covers the common string checks: `isEmail`, `isUrl`, `isNumeric`,
    /// `isInt`, `isAlpha`, `isAlphanumeric`, `isLowercase`,
    /// `isUppercase`, `isLength`, `contains`, `equals`, `matches`.
    pub fn builtin() -> Self {
        let mut set = Self::empty();
        set.register("isEmail", |value, _| Ok(EMAIL_RE.is_match(value)));
        set.register("isUrl", |value, _| Ok(URL_RE.is_match(value)));
        set.register("isNumeric", |value, _| {
            Ok(!value.is_empty() && value.chars().all(|c| c.is_ascii_digit()))
        });
        set.register("isInt", |value, _| Ok(value.parse::<i64>().is_ok()));
        set.register("isAlpha", |value, _| {
            Ok(!value.is_empty() && value.chars().all(char::is_alphabetic))
        });
        set.register("isAlphanumeric", |value, _| {
            Ok(!value.is_empty() && value.chars().all(char::is_alphanumeric))
        });
        set.register("isLowercase", |value, _| Ok(value == value.to_lowercase()));
        set.register("isUppercase", |value, _| Ok(value == value.to_uppercase()));
        set.register("isLength", |value, args| {
            let min = int_arg(args, 0)?;
            let max = match args.get(1) {
                Some(_) => Some(int_arg(args, 1)?),
                None => None,
            };
            let len = value.chars().count() as u64;
            Ok(len >= min && max.map_or(true, |m| len <= m))
        });
        set.register("contains", |value, args| {
            let seed = str_arg(args, 0)?;
            Ok(value.contains(seed))
        });
        set.register("equals", |value, args| {
            let expected = args
                .first()
                .ok_or_else(|| "missing comparison argument".to_string())?;
            let expected = match expected {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(value == expected)
        });
        set.register("matches", |value, args| {
            let pattern = str_arg(args, 0)?;
            let re = Regex::new(pattern).map_err(|e| format!("invalid pattern: {e}"))?;
            Ok(re.is_match(value))
        });
        set
    }

    /// Registers a predicate under the given name, replacing any existing
    /// predicate with that name.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&str, &[serde_json::Value]) -> Result<bool, String> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(predicate));
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str, &[serde_json::Value]) -> Result<bool, String> + Send + Sync + 'static,
    {
        self.register(name, predicate);
        self
    }

    /// Returns `true` if a predicate is registered under `name` (the
    /// already-resolved name, not the rule name).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolves a rule name to its predicate.
    ///
    /// Applies the naming convention, then looks the resolved name up.
    /// A miss is a fatal configuration error.
    pub fn resolve(&self, rule: &str) -> FormResult<&PredicateFn> {
        let predicate = predicate_name(rule);
        self.entries
            .get(&predicate)
            .ok_or(FormError::UnknownPredicate {
                rule: rule.to_string(),
                predicate,
            })
    }
}

impl Default for PredicateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for PredicateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("PredicateSet").field("names", &names).finish()
    }
}

/// Maps a rule name to the predicate name it resolves to.
///
/// `contains`/`equals`/`matches` and names already starting with `is` are
/// kept verbatim; everything else gets the `is` prefix with the first
/// letter capitalized.
pub fn predicate_name(rule: &str) -> String {
    if matches!(rule, "contains" | "equals" | "matches") || rule.starts_with("is") {
        return rule.to_string();
    }
    let mut chars = rule.chars();
    chars.next().map_or_else(
        || "is".to_string(),
        |first| format!("is{}{}", first.to_uppercase(), chars.as_str()),
    )
}

fn str_arg<'a>(args: &'a [serde_json::Value], index: usize) -> Result<&'a str, String> {
    args.get(index)
        .ok_or_else(|| format!("missing argument {index}"))?
        .as_str()
        .ok_or_else(|| format!("argument {index} must be a string"))
}

fn int_arg(args: &[serde_json::Value], index: usize) -> Result<u64, String> {
    args.get(index)
        .ok_or_else(|| format!("missing argument {index}"))?
        .as_u64()
        .ok_or_else(|| format!("argument {index} must be a non-negative integer"))
}
