use std::sync::atomic::{AtomicUsize, Ordering};

use itertools::Itertools as _;
use pretty_assertions::assert_eq;

use crate::{
    Argument, Field, FieldResult, GraphQLError, InputObjectMeta, ObjectMeta, ResolveParams, RuleError,
    SchemaType, SourcePosition, Type, Value, Variables, execute, execute_validated_query_async,
    get_operation, graphql_value, graphql_vars, parse_document_source,
};

use super::error_summary;

/// Counts resolver invocations.
#[derive(Default)]
struct Calls(AtomicUsize);

fn echo(
    name: &'static str,
) -> impl Fn(ResolveParams<'_, Calls>) -> FieldResult<Value> + Send + Sync + 'static {
    move |p| {
        p.context.0.fetch_add(1, Ordering::SeqCst);
        Ok(p.args.get(name).cloned().unwrap_or(Value::Null))
    }
}

fn schema() -> SchemaType<Calls> {
    SchemaType::builder("Query")
        .register(
            InputObjectMeta::new("ComplexInput")
                .field(Argument::new("requiredField", Type::non_null_named("Boolean")))
                .field(Argument::new("intField", Type::named("Int")).default_value(42))
                .field(Argument::new("stringListField", Type::named("String").list())),
        )
        .register(
            ObjectMeta::new("Query")
                .field(
                    Field::new("stringListArgField", Type::named("String"))
                        .argument(Argument::new("stringListArg", Type::named("String").list()))
                        .resolve_sync(echo("stringListArg")),
                )
                .field(
                    Field::new("intArgField", Type::named("Int"))
                        .argument(Argument::new("intArg", Type::named("Int")))
                        .resolve_sync(echo("intArg")),
                )
                .field(
                    Field::new("nonNullIntArgField", Type::named("Int"))
                        .argument(Argument::new("nonNullIntArg", Type::non_null_named("Int")))
                        .resolve_sync(echo("nonNullIntArg")),
                )
                .field(
                    Field::new("complexArgField", Type::named("String"))
                        .argument(Argument::new("complexArg", Type::named("ComplexInput")))
                        .resolve_sync(echo("complexArg")),
                )
                .field(
                    Field::new("multipleOpts", Type::named("String"))
                        .argument(Argument::new("opt1", Type::named("Int")).default_value(0))
                        .argument(Argument::new("opt2", Type::named("Int")).default_value(0))
                        .resolve_sync(|p| {
                            Ok(Value::from(
                                p.args.iter().map(|(k, v)| format!("{k}={v}")).join(","),
                            ))
                        }),
                ),
        )
        .build()
        .expect("valid schema")
}

async fn run_variable_query(query: &str, vars: Variables, calls: &Calls) -> Value {
    let (result, errs) = execute(query, None, &schema(), Value::Null, &vars, calls)
        .await
        .expect("Execution failed");

    assert_eq!(errs, []);

    result
}

async fn run_query(query: &str) -> Value {
    run_variable_query(query, graphql_vars! {}, &Calls::default()).await
}

async fn validation_errors(query: &str, calls: &Calls) -> Vec<RuleError> {
    match execute(query, None, &schema(), Value::Null, &graphql_vars! {}, calls).await {
        Err(GraphQLError::ValidationError(errs)) => errs,
        res => panic!("expected validation errors, got {res:?}"),
    }
}

/// Executes skipping validation, so every problem surfaces as a field error.
async fn run_unvalidated(query: &str, vars: Variables, calls: &Calls) -> (Value, Vec<String>) {
    let doc = parse_document_source(query).expect("parses");
    let op = get_operation(&doc, None).expect("has an operation");
    let (result, errs) =
        execute_validated_query_async(&doc, op, &schema(), Value::Null, &vars, calls)
            .await
            .expect("Execution failed");
    (result, error_summary(&errs))
}

#[tokio::test]
async fn list_element_failure_fails_validation() {
    let calls = Calls::default();
    let errs = validation_errors(r#"{ stringListArgField(stringListArg: ["one", 2]) }"#, &calls).await;

    assert_eq!(
        errs,
        [RuleError::new(
            "Argument \"stringListArg\" has invalid value [\"one\", 2].\n\
             In element #2: Expected type \"String\", found 2.\n\
             In element #2: Error: String cannot represent non-string literal: 2",
            &[SourcePosition::new(36, 0, 36)],
        )],
    );
    assert_eq!(calls.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn list_element_failure_skips_resolver() {
    let calls = Calls::default();
    let (result, errs) = run_unvalidated(
        r#"{ stringListArgField(stringListArg: ["one", 2]) }"#,
        graphql_vars! {},
        &calls,
    )
    .await;

    assert_eq!(result, graphql_value!({"stringListArgField": null}));
    assert_eq!(
        errs,
        [
            "stringListArgField: Argument \"stringListArg\" has invalid value [\"one\", 2].\n\
             In element #2: Expected type \"String\", found 2.\n\
             In element #2: Error: String cannot represent non-string literal: 2",
        ],
    );
    assert_eq!(calls.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn single_value_coerces_into_list() {
    assert_eq!(
        run_query(r#"{ stringListArgField(stringListArg: "one") }"#).await,
        graphql_value!({"stringListArgField": "[\"one\"]"}),
    );
}

#[tokio::test]
async fn applies_argument_defaults() {
    assert_eq!(
        run_query("{ multipleOpts(opt2: 3) }").await,
        graphql_value!({"multipleOpts": "opt1=0,opt2=3"}),
    );
}

#[tokio::test]
async fn coerces_input_objects_with_defaults() {
    assert_eq!(
        run_query(r#"{ complexArgField(complexArg: {requiredField: true, stringListField: "x"}) }"#)
            .await,
        graphql_value!({
            "complexArgField": r#"{"requiredField": true, "intField": 42, "stringListField": ["x"]}"#,
        }),
    );
}

#[tokio::test]
async fn input_object_missing_required_field() {
    let errs = validation_errors(
        "{ complexArgField(complexArg: {intField: 1}) }",
        &Calls::default(),
    )
    .await;

    assert_eq!(
        errs,
        [RuleError::new(
            "Argument \"complexArg\" has invalid value {intField: 1}.\n\
             In field \"requiredField\": Expected \"Boolean!\", found null.",
            &[SourcePosition::new(30, 0, 30)],
        )],
    );
}

#[tokio::test]
async fn input_object_unknown_field() {
    let errs = validation_errors(
        "{ complexArgField(complexArg: {requiredField: true, extra: 1}) }",
        &Calls::default(),
    )
    .await;

    assert_eq!(
        errs,
        [RuleError::new(
            "Argument \"complexArg\" has invalid value {requiredField: true, extra: 1}.\n\
             In field \"extra\": Unknown field.",
            &[SourcePosition::new(30, 0, 30)],
        )],
    );
}

#[tokio::test]
async fn int_literal_range() {
    assert_eq!(
        run_query("{ intArgField(intArg: 9007199254740991) }").await,
        graphql_value!({"intArgField": 9_007_199_254_740_991_i64}),
    );

    let errs = validation_errors("{ intArgField(intArg: 9007199254740992) }", &Calls::default()).await;
    assert_eq!(
        errs,
        [RuleError::new(
            "Argument \"intArg\" has invalid value 9007199254740992.\n\
             Expected type \"Int\", found 9007199254740992.\n\
             Error: Int cannot represent value out of range: 9007199254740992",
            &[SourcePosition::new(22, 0, 22)],
        )],
    );
}

#[tokio::test]
async fn int_variables_truncate_floats_and_parse_strings() {
    let query = "query q($i: Int) { intArgField(intArg: $i) }";
    let calls = Calls::default();

    for (input, expected) in [
        (graphql_value!(2.9), 2),
        (graphql_value!((-2.9)), -2),
        (graphql_value!("12"), 12),
        (graphql_value!(true), 1),
    ] {
        let vars = [("i".to_owned(), input)].into_iter().collect();
        assert_eq!(
            run_variable_query(query, vars, &calls).await,
            graphql_value!({"intArgField": expected}),
        );
    }
}

#[tokio::test]
async fn missing_required_argument_is_field_error() {
    let calls = Calls::default();
    let (result, errs) =
        run_unvalidated("{ nonNullIntArgField a: intArgField }", graphql_vars! {}, &calls).await;

    assert_eq!(result, graphql_value!({"nonNullIntArgField": null, "a": null}));
    assert_eq!(
        errs,
        ["nonNullIntArgField: Argument \"nonNullIntArg\" of required type \"Int!\" was not provided."],
    );
    assert_eq!(calls.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn variable_of_wrong_type_is_field_error() {
    let (result, errs) = run_unvalidated(
        "query q($s: String) { intArgField(intArg: $s) }",
        graphql_vars! {"s": "abc"},
        &Calls::default(),
    )
    .await;

    assert_eq!(result, graphql_value!({"intArgField": null}));
    assert_eq!(
        errs,
        [
            "intArgField: Variable \"$s\" of type \"String\" cannot be coerced to argument \
             \"intArg\" of type \"Int\": Expected type \"Int\", found \"abc\".\n\
             Error: Int cannot represent non-integer value: \"abc\"",
        ],
    );
}
