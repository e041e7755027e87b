//! Validation rule declarations.
//!
//! A [`Rule`] is one named check configured for a field: a rule name, an
//! optional positional argument list for the predicate, and an optional
//! message override (the default message is the rule name itself). A
//! [`RuleSet`] is an ordered, name-keyed collection of rules; rule order
//! is declaration order, and redeclaring a name replaces the earlier
//! entry in place.
//!
//! Rule sets deserialize from the JSON shapes an embedding configuration
//! typically uses:
//!
//! ```json
//! {
//!   "notEmpty": { "msg": "You must enter a first name for this form." },
//!   "isLength": [2, 40],
//!   "equals": { "args": ["yes"], "msg": "Please confirm." },
//!   "email": true
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Per-field validation configuration: field name to its ordered rules.
pub type ValidatorConfig = HashMap<String, RuleSet>;

/// One named validation check with optional arguments and message.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The rule name (e.g. `notEmpty`, `email`, `matches`).
    pub name: String,
    /// Positional arguments appended after the field value.
    pub args: Vec<serde_json::Value>,
    /// Message override; the rule name is used when absent.
    pub msg: Option<String>,
}

impl Rule {
    /// Creates a rule with no arguments and the default message.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            msg: None,
        }
    }

    /// Appends one positional argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<serde_json::Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the failure message for this rule.
    #[must_use]
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    /// The message recorded on failure: the override, or the rule name.
    pub fn message(&self) -> &str {
        self.msg.as_deref().unwrap_or(&self.name)
    }
}

/// An ordered, name-keyed set of rules for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, rule: Rule) -> Self {
        self.insert(rule);
        self
    }

    /// Inserts a rule. If a rule with the same name already exists it is
    /// replaced in place, keeping its position in declaration order.
    pub fn insert(&mut self, rule: Rule) {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.name == rule.name) {
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    /// Looks a rule up by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Layers `over` on top of this set: rules in `over` replace
    /// same-named rules in place; rules only in `over` append after.
    ///
    /// This is the merge used at submission time, with control-declared
    /// rules as the base and form-declared rules layered over them.
    pub fn layered_with(&self, over: &Self) -> Self {
        let mut merged = self.clone();
        for rule in over.iter() {
            merged.insert(rule.clone());
        }
        merged
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

/// The accepted wire shapes for a single rule's configuration value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSpec {
    /// A bare positional argument list: `"isLength": [2, 40]`.
    Args(Vec<serde_json::Value>),
    /// An object with optional `args` and `msg`: `"notEmpty": {"msg": "..."}`.
    Detail {
        args: Option<Vec<serde_json::Value>>,
        msg: Option<String>,
    },
    /// A bare flag: `"email": true`. The rule runs with no arguments;
    /// `false` drops the rule from the set entirely.
    Flag(bool),
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleSetVisitor;

        impl<'de> Visitor<'de> for RuleSetVisitor {
            type Value = RuleSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of rule names to rule configurations")
            }

            // Entries are visited in document order, which is what makes
            // declaration order observable to the engine.
            fn visit_map<A>(self, mut map: A) -> Result<RuleSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = RuleSet::new();
                while let Some((name, spec)) = map.next_entry::<String, RuleSpec>()? {
                    let mut rule = Rule::new(name);
                    match spec {
                        RuleSpec::Args(args) => rule.args = args,
                        RuleSpec::Detail { args, msg } => {
                            rule.args = args.unwrap_or_default();
                            rule.msg = msg;
                        }
                        RuleSpec::Flag(enabled) => {
                            if !enabled {
                                continue;
                            }
                        }
                    }
                    set.insert(rule);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(RuleSetVisitor)
    }
}
