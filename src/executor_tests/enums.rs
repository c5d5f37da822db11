use pretty_assertions::assert_eq;

use crate::{
    Argument, EnumMeta, Field, GraphQLError, ObjectMeta, RuleError, SchemaType, SourcePosition,
    Type, Value, Variables, execute, execute_validated_query_async, get_operation,
    graphql_value, graphql_vars, parse_document_source,
};

use super::error_summary;

fn schema() -> SchemaType<()> {
    SchemaType::builder("Query")
        .register(
            EnumMeta::new("Color")
                .value("RED", 0)
                .value("GREEN", 1)
                .value("BLUE", 2),
        )
        .register(
            ObjectMeta::new("Query")
                .field(
                    Field::new("colorEnum", Type::named("Color"))
                        .argument(Argument::new("fromEnum", Type::named("Color")))
                        .argument(Argument::new("fromInt", Type::named("Int")))
                        .argument(Argument::new("fromString", Type::named("String")))
                        .resolve_sync(|p| {
                            Ok(["fromEnum", "fromInt", "fromString"]
                                .iter()
                                .find_map(|name| p.args.get(name))
                                .cloned()
                                .unwrap_or(Value::Null))
                        }),
                )
                .field(
                    Field::new("colorInt", Type::named("Int"))
                        .argument(Argument::new("fromEnum", Type::non_null_named("Color")))
                        .resolve_sync(|p| Ok(p.args.get("fromEnum").cloned().unwrap_or(Value::Null))),
                ),
        )
        .build()
        .expect("valid schema")
}

async fn run_variable_query(
    query: &str,
    vars: Variables,
) -> Result<(Value, Vec<crate::ExecutionError>), GraphQLError> {
    execute(query, None, &schema(), Value::Null, &vars, &()).await
}

async fn run_query(query: &str) -> Value {
    let (result, errs) = run_variable_query(query, graphql_vars! {})
        .await
        .expect("Execution failed");

    assert_eq!(errs, []);

    result
}

#[tokio::test]
async fn serializes_internal_values_by_name() {
    assert_eq!(
        run_query("{ colorEnum(fromInt: 1) }").await,
        graphql_value!({"colorEnum": "GREEN"}),
    );
}

#[tokio::test]
async fn accepts_enum_literals() {
    assert_eq!(
        run_query("{ colorEnum(fromEnum: GREEN) }").await,
        graphql_value!({"colorEnum": "GREEN"}),
    );
}

#[tokio::test]
async fn passes_internal_value_to_resolvers() {
    assert_eq!(
        run_query("{ colorInt(fromEnum: BLUE) zero: colorInt(fromEnum: RED) }").await,
        graphql_value!({"colorInt": 2, "zero": 0}),
    );
}

#[tokio::test]
async fn does_not_accept_string_literals() {
    let res = run_variable_query(r#"{ colorEnum(fromEnum: "GREEN") }"#, graphql_vars! {}).await;

    assert_eq!(
        res,
        Err(GraphQLError::ValidationError(vec![RuleError::new(
            "Argument \"fromEnum\" has invalid value \"GREEN\".\n\
             Expected type \"Color\", found \"GREEN\".\n\
             Error: Enum Color cannot parse value: \"GREEN\"",
            &[SourcePosition::new(22, 0, 22)],
        )])),
    );
}

#[tokio::test]
async fn names_are_case_sensitive() {
    let res = run_variable_query("{ colorEnum(fromEnum: green) }", graphql_vars! {}).await;

    assert_eq!(
        res,
        Err(GraphQLError::ValidationError(vec![RuleError::new(
            "Argument \"fromEnum\" has invalid value green.\n\
             Expected type \"Color\", found green.\n\
             Error: Enum Color cannot parse value: green",
            &[SourcePosition::new(22, 0, 22)],
        )])),
    );
}

#[tokio::test]
async fn accepts_strings_in_variables() {
    let (result, errs) = run_variable_query(
        "query q($color: Color) { colorEnum(fromEnum: $color) }",
        graphql_vars! {"color": "BLUE"},
    )
    .await
    .expect("Execution failed");

    assert_eq!(errs, []);
    assert_eq!(result, graphql_value!({"colorEnum": "BLUE"}));
}

#[tokio::test]
async fn does_not_accept_internal_values_in_variables() {
    let res = run_variable_query(
        "query q($color: Color) { colorEnum(fromEnum: $color) }",
        graphql_vars! {"color": 2},
    )
    .await;

    assert_eq!(
        res,
        Err(GraphQLError::ValidationError(vec![RuleError::new(
            "Variable \"$color\" got invalid value 2.\n\
             Expected type \"Color\", found 2.\n\
             Error: Enum Color cannot parse value: 2",
            &[SourcePosition::new(8, 0, 8)],
        )])),
    );
}

#[tokio::test]
async fn accepts_enum_literals_as_variable_defaults() {
    assert_eq!(
        run_query(
            "query q($color: Color! = GREEN) { colorEnum(fromEnum: $color) colorInt(fromEnum: $color) }",
        )
        .await,
        graphql_value!({"colorEnum": "GREEN", "colorInt": 1}),
    );
}

#[tokio::test]
async fn does_not_accept_string_literals_as_variable_defaults() {
    let res = run_variable_query(
        r#"query q($color: Color = "GREEN") { colorEnum(fromEnum: $color) }"#,
        graphql_vars! {},
    )
    .await;

    assert_eq!(
        res,
        Err(GraphQLError::ValidationError(vec![RuleError::new(
            "Variable \"$color\" has invalid default value \"GREEN\".\n\
             Expected type \"Color\", found \"GREEN\".\n\
             Error: Enum Color cannot parse value: \"GREEN\"",
            &[SourcePosition::new(24, 0, 24)],
        )])),
    );
}

#[tokio::test]
async fn int_variable_defaults_need_integer_literals() {
    for (default, details) in [
        (
            r#""1""#,
            "Expected type \"Int\", found \"1\".\n\
             Error: Int cannot represent non-integer literal: \"1\"",
        ),
        (
            "1.9",
            "Expected type \"Int\", found 1.9.\n\
             Error: Int cannot represent non-integer literal: 1.9",
        ),
    ] {
        let query = format!("query q($n: Int = {default}) {{ colorEnum(fromInt: $n) }}");
        let res = run_variable_query(&query, graphql_vars! {}).await;

        assert_eq!(
            res,
            Err(GraphQLError::ValidationError(vec![RuleError::new(
                &format!("Variable \"$n\" has invalid default value {default}.\n{details}"),
                &[SourcePosition::new(18, 0, 18)],
            )])),
        );
    }
}

#[tokio::test]
async fn ignores_invalid_variable_defaults_without_validation() {
    let schema = schema();
    let doc = parse_document_source(
        r#"query q($color: Color = "GREEN") { colorEnum(fromEnum: $color) }"#,
    )
    .expect("valid query");
    let operation = get_operation(&doc, None).expect("single operation");

    let (result, errs) = execute_validated_query_async(
        &doc,
        operation,
        &schema,
        Value::Null,
        &graphql_vars! {},
        &(),
    )
    .await
    .expect("Execution failed");

    assert_eq!(errs, []);
    assert_eq!(result, graphql_value!({"colorEnum": null}));
}

#[tokio::test]
async fn fails_to_serialize_unknown_internal_values() {
    let (result, errs) = run_variable_query(
        r#"{ colorEnum(fromString: "GREEN") }"#,
        graphql_vars! {},
    )
    .await
    .expect("Execution failed");

    assert_eq!(result, graphql_value!({"colorEnum": null}));
    assert_eq!(
        error_summary(&errs),
        ["colorEnum: Enum Color cannot represent value: \"GREEN\""],
    );
}

#[tokio::test]
async fn rejects_conflicting_fields_under_one_response_key() {
    let res = run_variable_query(
        "{ c: colorEnum(fromInt: 0) c: colorEnum(fromInt: 2) \
           d: colorEnum(fromInt: 1) d: colorInt(fromEnum: RED) }",
        graphql_vars! {},
    )
    .await;

    assert_eq!(
        res,
        Err(GraphQLError::ValidationError(vec![
            RuleError::new(
                "Fields \"c\" conflict because they have differing arguments. \
                 Use different aliases on the fields to fetch both if this was intentional",
                &[SourcePosition::new(2, 0, 2), SourcePosition::new(27, 0, 27)],
            ),
            RuleError::new(
                "Fields \"d\" conflict because colorEnum and colorInt are different fields. \
                 Use different aliases on the fields to fetch both if this was intentional",
                &[SourcePosition::new(52, 0, 52), SourcePosition::new(77, 0, 77)],
            ),
        ])),
    );
}

#[tokio::test]
async fn merges_identical_fields_under_one_response_key() {
    assert_eq!(
        run_query("{ c: colorEnum(fromInt: 0) c: colorEnum(fromInt: 0) colorInt(fromEnum: RED) }")
            .await,
        graphql_value!({"c": "RED", "colorInt": 0}),
    );
}
