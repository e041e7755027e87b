//! A minimal embedding of the form engine: a two-field name form that is
//! submitted twice, first empty (rejected) and then filled in (accepted,
//! clearing the form).
//!
//! Run with `cargo run --example name_form`.

use formlet::{Control, Form, Node, Rule, RuleSet, SubmitOutcome, ValidatorConfig, ValueMap};

fn tree() -> Vec<Node> {
    vec![
        Node::text("Example Form"),
        Node::container(
            "div",
            vec![
                Node::text("First Name:"),
                Control::text_input("firstName").into(),
            ],
        ),
        Node::container(
            "div",
            vec![
                Node::text("Last Name:"),
                Control::text_input("lastName")
                    .validate(RuleSet::new().with(
                        Rule::new("notEmpty").msg("You must enter a last name for this form."),
                    ))
                    .into(),
            ],
        ),
    ]
}

fn main() -> formlet::FormResult<()> {
    formlet_core::logging::init("formlet=debug", true);

    let validate: ValidatorConfig = serde_json::from_str(
        r#"{"firstName": {"notEmpty": {"msg": "You must enter a first name for this form."}}}"#,
    )
    .expect("static config parses");

    let mut form = Form::new()
        .with_validate(validate)
        .on_submit(|values| println!("attempt: {values:?}"))
        .on_success(|_| ValueMap::new())
        .on_error(|errors| println!("rejected: {errors:?}"));

    form.render(&tree());

    // First attempt: nothing filled in.
    match form.submit()? {
        SubmitOutcome::Invalid(errors) => println!("{} field(s) failed", errors.len()),
        SubmitOutcome::Valid(_) => unreachable!("empty form cannot pass"),
    }

    // The user types into both fields and resubmits.
    form.set_value("firstName", "Stan");
    form.set_value("lastName", "Lemon");
    match form.submit()? {
        SubmitOutcome::Valid(values) => println!("accepted: {values:?}"),
        SubmitOutcome::Invalid(errors) => unreachable!("unexpected errors: {errors:?}"),
    }

    // The success reducer returned an empty map, so the form is blank.
    assert!(form.values().is_empty());
    Ok(())
}
