use pretty_assertions::assert_eq;

use crate::{
    Argument, Field, GraphQLError, InputObjectMeta, ObjectMeta, RuleError, SchemaType,
    SourcePosition, Type, Value, Variables, execute, graphql_value, graphql_vars,
};

/// Field echoing its `input` argument as text, `null` when it's absent.
fn echo_field(name: &str, arg: Argument) -> Field<()> {
    Field::new(name, Type::named("String"))
        .argument(arg)
        .resolve_sync(|p| {
            Ok(p.args
                .get("input")
                .map_or(Value::Null, |v| Value::from(v.to_string())))
        })
}

fn input(ty: Type) -> Argument {
    Argument::new("input", ty)
}

fn schema() -> SchemaType<()> {
    SchemaType::builder("TestType")
        .register(
            InputObjectMeta::new("TestInputObject")
                .field(Argument::new("a", Type::named("String")))
                .field(Argument::new("b", Type::named("String").list()))
                .field(Argument::new("c", Type::non_null_named("String"))),
        )
        .register(
            ObjectMeta::new("TestType")
                .field(echo_field(
                    "fieldWithObjectInput",
                    input(Type::named("TestInputObject")),
                ))
                .field(echo_field(
                    "fieldWithNullableStringInput",
                    input(Type::named("String")),
                ))
                .field(echo_field(
                    "fieldWithNonNullableStringInput",
                    input(Type::non_null_named("String")),
                ))
                .field(echo_field(
                    "fieldWithDefaultArgumentValue",
                    input(Type::named("String")).default_value("Hello World"),
                ))
                .field(echo_field("list", input(Type::named("String").list())))
                .field(echo_field("nnList", input(Type::named("String").list().non_null())))
                .field(echo_field("listNN", input(Type::non_null_named("String").list())))
                .field(
                    Field::new("fieldWithDateTime", Type::named("DateTime"))
                        .argument(Argument::new("at", Type::named("DateTime")))
                        .resolve_sync(|p| Ok(p.args.get("at").cloned().unwrap_or(Value::Null))),
                ),
        )
        .build()
        .expect("valid schema")
}

async fn run_variable_query(query: &str, vars: Variables) -> Value {
    let (result, errs) = execute(query, None, &schema(), Value::Null, &vars, &())
        .await
        .expect("Execution failed");

    assert_eq!(errs, []);

    result
}

async fn variable_errors(query: &str, vars: Variables) -> Vec<RuleError> {
    match execute(query, None, &schema(), Value::Null, &vars, &()).await {
        Err(GraphQLError::ValidationError(errs)) => errs,
        res => panic!("expected validation errors, got {res:?}"),
    }
}

const OBJECT_QUERY: &str =
    "query q($input: TestInputObject) { fieldWithObjectInput(input: $input) }";

#[tokio::test]
async fn inline_object_with_variable_field() {
    assert_eq!(
        run_variable_query(
            r#"query q($s: String!) { fieldWithObjectInput(input: {a: "foo", b: ["bar"], c: $s}) }"#,
            graphql_vars! {"s": "baz"},
        )
        .await,
        graphql_value!({"fieldWithObjectInput": r#"{"a": "foo", "b": ["bar"], "c": "baz"}"#}),
    );
}

#[tokio::test]
async fn object_variable() {
    assert_eq!(
        run_variable_query(
            OBJECT_QUERY,
            graphql_vars! {"input": {"a": "foo", "b": ["bar"], "c": "baz"}},
        )
        .await,
        graphql_value!({"fieldWithObjectInput": r#"{"a": "foo", "b": ["bar"], "c": "baz"}"#}),
    );
}

#[tokio::test]
async fn object_variable_single_value_into_list() {
    assert_eq!(
        run_variable_query(OBJECT_QUERY, graphql_vars! {"input": {"a": "foo", "b": "bar", "c": "baz"}})
            .await,
        graphql_value!({"fieldWithObjectInput": r#"{"a": "foo", "b": ["bar"], "c": "baz"}"#}),
    );
}

#[tokio::test]
async fn object_variable_null_for_non_null_field() {
    assert_eq!(
        variable_errors(OBJECT_QUERY, graphql_vars! {"input": {"a": "foo", "b": "bar", "c": null}})
            .await,
        [RuleError::new(
            "Variable \"$input\" got invalid value {\"a\": \"foo\", \"b\": \"bar\", \"c\": null}.\n\
             In field \"c\": Expected \"String!\", found null.",
            &[SourcePosition::new(8, 0, 8)],
        )],
    );
}

#[tokio::test]
async fn object_variable_unknown_field() {
    assert_eq!(
        variable_errors(
            OBJECT_QUERY,
            graphql_vars! {"input": {"a": "foo", "c": "baz", "extra": "dog"}},
        )
        .await,
        [RuleError::new(
            "Variable \"$input\" got invalid value {\"a\": \"foo\", \"c\": \"baz\", \"extra\": \"dog\"}.\n\
             In field \"extra\": Unknown field.",
            &[SourcePosition::new(8, 0, 8)],
        )],
    );
}

#[tokio::test]
async fn object_variable_of_wrong_shape() {
    assert_eq!(
        variable_errors(OBJECT_QUERY, graphql_vars! {"input": "foo bar"}).await,
        [RuleError::new(
            "Variable \"$input\" got invalid value \"foo bar\".\n\
             Expected \"TestInputObject\", found not an object.",
            &[SourcePosition::new(8, 0, 8)],
        )],
    );
}

#[tokio::test]
async fn nullable_variable_omitted_null_or_given() {
    let query = "query q($value: String) { fieldWithNullableStringInput(input: $value) }";

    assert_eq!(
        run_variable_query(query, graphql_vars! {}).await,
        graphql_value!({"fieldWithNullableStringInput": null}),
    );
    assert_eq!(
        run_variable_query(query, graphql_vars! {"value": null}).await,
        graphql_value!({"fieldWithNullableStringInput": "null"}),
    );
    assert_eq!(
        run_variable_query(query, graphql_vars! {"value": "a"}).await,
        graphql_value!({"fieldWithNullableStringInput": "\"a\""}),
    );
}

#[tokio::test]
async fn variable_default_value() {
    assert_eq!(
        run_variable_query(
            r#"query q($value: String = "Hello") { fieldWithNullableStringInput(input: $value) }"#,
            graphql_vars! {},
        )
        .await,
        graphql_value!({"fieldWithNullableStringInput": "\"Hello\""}),
    );
}

#[tokio::test]
async fn variable_default_values_are_coerced_as_literals() {
    assert_eq!(
        run_variable_query(
            r#"query q($input: [String] = "A", $obj: TestInputObject = {c: "C", b: "B"}) {
                list(input: $input)
                fieldWithObjectInput(input: $obj)
            }"#,
            graphql_vars! {},
        )
        .await,
        graphql_value!({
            "list": "[\"A\"]",
            "fieldWithObjectInput": r#"{"b": ["B"], "c": "C"}"#,
        }),
    );
    assert_eq!(
        run_variable_query(
            r#"query q($input: [String] = "A") { list(input: $input) }"#,
            graphql_vars! {"input": null},
        )
        .await,
        graphql_value!({"list": "null"}),
    );
}

#[tokio::test]
async fn invalid_variable_default_value() {
    assert_eq!(
        variable_errors(
            "query q($value: String = 1) { fieldWithNullableStringInput(input: $value) }",
            graphql_vars! {},
        )
        .await,
        [RuleError::new(
            "Variable \"$value\" has invalid default value 1.\n\
             Expected type \"String\", found 1.\n\
             Error: String cannot represent non-string literal: 1",
            &[SourcePosition::new(25, 0, 25)],
        )],
    );
}

#[tokio::test]
async fn required_variable_missing_or_null() {
    let query = "query q($value: String!) { fieldWithNonNullableStringInput(input: $value) }";

    for vars in [graphql_vars! {}, graphql_vars! {"value": null}] {
        assert_eq!(
            variable_errors(query, vars).await,
            [RuleError::new(
                "Variable \"$value\" of required type \"String!\" was not provided.",
                &[SourcePosition::new(8, 0, 8)],
            )],
        );
    }
}

#[tokio::test]
async fn argument_default_value() {
    assert_eq!(
        run_variable_query("{ fieldWithDefaultArgumentValue }", graphql_vars! {}).await,
        graphql_value!({"fieldWithDefaultArgumentValue": "\"Hello World\""}),
    );
    assert_eq!(
        run_variable_query(
            "query q($optional: String) { fieldWithDefaultArgumentValue(input: $optional) }",
            graphql_vars! {},
        )
        .await,
        graphql_value!({"fieldWithDefaultArgumentValue": "\"Hello World\""}),
    );
}

#[tokio::test]
async fn list_variables() {
    let query = "query q($input: [String]) { list(input: $input) }";

    assert_eq!(
        run_variable_query(query, graphql_vars! {"input": ["A", null, "B"]}).await,
        graphql_value!({"list": "[\"A\", null, \"B\"]"}),
    );
    assert_eq!(
        run_variable_query(query, graphql_vars! {"input": "A"}).await,
        graphql_value!({"list": "[\"A\"]"}),
    );
}

#[tokio::test]
async fn non_null_list_variable() {
    assert_eq!(
        run_variable_query(
            "query q($input: [String]!) { nnList(input: $input) }",
            graphql_vars! {"input": ["A"]},
        )
        .await,
        graphql_value!({"nnList": "[\"A\"]"}),
    );
}

#[tokio::test]
async fn list_of_non_null_rejects_null_element() {
    assert_eq!(
        variable_errors(
            "query q($input: [String!]) { listNN(input: $input) }",
            graphql_vars! {"input": ["A", null, "B"]},
        )
        .await,
        [RuleError::new(
            "Variable \"$input\" got invalid value [\"A\", null, \"B\"].\n\
             In element #2: Expected \"String!\", found null.",
            &[SourcePosition::new(8, 0, 8)],
        )],
    );
}

#[tokio::test]
async fn date_time_variable() {
    let query = "query q($at: DateTime) { fieldWithDateTime(at: $at) }";

    assert_eq!(
        run_variable_query(query, graphql_vars! {"at": "2017-07-23T03:46:56+02:00"}).await,
        graphql_value!({"fieldWithDateTime": "2017-07-23T03:46:56+02:00"}),
    );

    let errs = variable_errors(query, graphql_vars! {"at": 42}).await;
    assert_eq!(errs.len(), 1);
    assert!(
        errs[0]
            .message()
            .starts_with("Variable \"$at\" got invalid value 42.\nExpected type \"DateTime\", found 42."),
        "{}",
        errs[0].message(),
    );
}
