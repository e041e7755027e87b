//! The validation engine.
//!
//! Runs at submission time against the finalized value set and the merged
//! validation configuration. Errors accumulate rather than
//! short-circuiting, so every failing rule for every field is reported at
//! once, in declared rule order.
//!
//! Validation failures and configuration errors are kept strictly apart:
//! a failing predicate records a message in the [`ErrorMap`]; a rule that
//! cannot even run (unknown predicate, unusable arguments) aborts the
//! whole attempt with a [`FormError`].

use std::collections::HashMap;

use tracing::{debug, trace};

use formlet_core::{FormError, FormResult};

use crate::predicates::PredicateSet;
use crate::rules::ValidatorConfig;
use crate::value::ValueMap;

/// Per-field validation failures: field name to its ordered, non-empty
/// list of failure messages. A field absent from the map is valid. The
/// map is rebuilt fully on every submission attempt.
pub type ErrorMap = HashMap<String, Vec<String>>;

/// Merges control-declared rules with form-declared rules.
///
/// The control-declared fragment is the base; form-declared rules take
/// precedence per rule-key, and rules only the form declares append after
/// the control-declared order. Fields present in just one source carry
/// over unchanged.
pub fn merge_configs(control: &ValidatorConfig, form: &ValidatorConfig) -> ValidatorConfig {
    let mut merged = control.clone();
    for (field, rules) in form {
        match merged.get_mut(field) {
            Some(base) => *base = base.layered_with(rules),
            None => {
                merged.insert(field.clone(), rules.clone());
            }
        }
    }
    merged
}

/// Validates the finalized values against the merged configuration.
///
/// Per field, per rule in declaration order: `notEmpty` is handled
/// internally (empty or whitespace-only text fails); every other rule
/// name is resolved against `predicates` and executed with the field's
/// textual value first and the rule's arguments appended. Processing
/// never stops at the first failure — messages accumulate per field.
pub fn validate(
    values: &ValueMap,
    config: &ValidatorConfig,
    predicates: &PredicateSet,
) -> FormResult<ErrorMap> {
    let mut errors = ErrorMap::new();

    for (field, rules) in config {
        let value = values.get(field).cloned().unwrap_or_default();
        let text = value.as_text();

        for rule in rules {
            let failed = if rule.name == "notEmpty" {
                text.trim().is_empty()
            } else {
                let predicate = predicates.resolve(&rule.name)?;
                let passed = predicate(text, &rule.args).map_err(|reason| {
                    FormError::PredicateArgs {
                        rule: rule.name.clone(),
                        reason,
                    }
                })?;
                !passed
            };

            if failed {
                trace!(field = %field, rule = %rule.name, "rule failed");
                // The entry is created on first failure, so a present
                // field always has at least one message.
                errors
                    .entry(field.clone())
                    .or_default()
                    .push(rule.message().to_string());
            }
        }
    }

    debug!(
        fields = config.len(),
        failing = errors.len(),
        "validation pass complete"
    );
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleSet};
    use crate::value::FieldValue;
    use serde_json::json;

    fn config(field: &str, rules: RuleSet) -> ValidatorConfig {
        let mut config = ValidatorConfig::new();
        config.insert(field.to_string(), rules);
        config
    }

    fn text_values(pairs: &[(&str, &str)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_not_empty_fails_on_empty_and_whitespace() {
        let config = config("name", RuleSet::new().with(Rule::new("notEmpty").msg("Required.")));
        let predicates = PredicateSet::builtin();

        for bad in ["", " ", "\t", " \r\n "] {
            let errors =
                validate(&text_values(&[("name", bad)]), &config, &predicates).expect("validate");
            assert_eq!(errors["name"], vec!["Required."], "value: {bad:?}");
        }

        let errors = validate(&text_values(&[("name", "Stan")]), &config, &predicates)
            .expect("validate");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_default_message_is_rule_name() {
        let config = config("name", RuleSet::new().with(Rule::new("notEmpty")));
        let errors = validate(
            &text_values(&[("name", "")]),
            &config,
            &PredicateSet::builtin(),
        )
        .expect("validate");
        assert_eq!(errors["name"], vec!["notEmpty"]);
    }

    #[test]
    fn test_multiple_failures_accumulate_in_rule_order() {
        let config = config(
            "email",
            RuleSet::new()
                .with(Rule::new("notEmpty").msg("Enter your email."))
                .with(Rule::new("isLength").arg(5).msg("Too short."))
                .with(Rule::new("email").msg("Not an email.")),
        );
        let errors = validate(
            &text_values(&[("email", "")]),
            &config,
            &PredicateSet::builtin(),
        )
        .expect("validate");
        assert_eq!(
            errors["email"],
            vec!["Enter your email.", "Too short.", "Not an email."]
        );
    }

    #[test]
    fn test_rule_args_are_appended_after_value() {
        let config = config(
            "code",
            RuleSet::new().with(Rule::new("matches").arg(r"^\d{4}$").msg("Four digits.")),
        );
        let predicates = PredicateSet::builtin();

        let errors = validate(&text_values(&[("code", "1234")]), &config, &predicates)
            .expect("validate");
        assert!(errors.is_empty());

        let errors =
            validate(&text_values(&[("code", "12")]), &config, &predicates).expect("validate");
        assert_eq!(errors["code"], vec!["Four digits."]);
    }

    #[test]
    fn test_unknown_predicate_aborts_attempt() {
        let config = config("card", RuleSet::new().with(Rule::new("creditCard")));
        let result = validate(
            &text_values(&[("card", "4111")]),
            &config,
            &PredicateSet::builtin(),
        );
        assert_eq!(
            result.expect_err("config error"),
            FormError::UnknownPredicate {
                rule: "creditCard".to_string(),
                predicate: "isCreditCard".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_predicate_args_abort_attempt() {
        let config = config("code", RuleSet::new().with(Rule::new("matches").arg(7)));
        let result = validate(
            &text_values(&[("code", "1234")]),
            &config,
            &PredicateSet::builtin(),
        );
        match result.expect_err("config error") {
            FormError::PredicateArgs { rule, .. } => assert_eq!(rule, "matches"),
            other => panic!("expected PredicateArgs, got {other:?}"),
        }
    }

    #[test]
    fn test_field_missing_from_values_defaults_to_empty() {
        let config = config("ghost", RuleSet::new().with(Rule::new("notEmpty")));
        let errors =
            validate(&ValueMap::new(), &config, &PredicateSet::builtin()).expect("validate");
        assert_eq!(errors["ghost"], vec!["notEmpty"]);
    }

    #[test]
    fn test_toggle_values_run_through_text_rendering() {
        let mut values = ValueMap::new();
        values.insert("terms".to_string(), FieldValue::Toggle(false));
        let config = config(
            "terms",
            RuleSet::new().with(Rule::new("notEmpty").msg("You must accept the terms.")),
        );
        let errors = validate(&values, &config, &PredicateSet::builtin()).expect("validate");
        assert_eq!(errors["terms"], vec!["You must accept the terms."]);

        values.insert("terms".to_string(), FieldValue::Toggle(true));
        let errors = validate(&values, &config, &PredicateSet::builtin()).expect("validate");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_no_empty_message_lists() {
        let config = config(
            "name",
            RuleSet::new()
                .with(Rule::new("notEmpty"))
                .with(Rule::new("isLength").arg(1)),
        );
        let errors = validate(
            &text_values(&[("name", "Stan")]),
            &config,
            &PredicateSet::builtin(),
        )
        .expect("validate");
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn test_merge_configs_form_wins_per_rule_key() {
        let control = config(
            "firstName",
            RuleSet::new()
                .with(Rule::new("notEmpty").msg("control message"))
                .with(Rule::new("isLength").arg(2)),
        );
        let form = config(
            "firstName",
            RuleSet::new()
                .with(Rule::new("notEmpty").msg("form message"))
                .with(Rule::new("email")),
        );

        let merged = merge_configs(&control, &form);
        let rules = &merged["firstName"];
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["notEmpty", "isLength", "email"]);
        assert_eq!(rules.get("notEmpty").expect("present").message(), "form message");
    }

    #[test]
    fn test_merge_configs_disjoint_fields_carry_over() {
        let control = config("a", RuleSet::new().with(Rule::new("notEmpty")));
        let form = config("b", RuleSet::new().with(Rule::new("email")));
        let merged = merge_configs(&control, &form);
        assert_eq!(merged.len(), 2);
        assert!(merged["a"].get("notEmpty").is_some());
        assert!(merged["b"].get("email").is_some());
    }

    #[test]
    fn test_validate_with_json_config() {
        let config: ValidatorConfig = serde_json::from_value(json!({
            "password": {
                "notEmpty": {"msg": "Enter a password."},
                "isLength": {"args": [8], "msg": "At least 8 characters."}
            }
        }))
        .expect("parse");
        let errors = validate(
            &text_values(&[("password", "short")]),
            &config,
            &PredicateSet::builtin(),
        )
        .expect("validate");
        assert_eq!(errors["password"], vec!["At least 8 characters."]);
    }
}
