use pretty_assertions::assert_eq;

use crate::{
    Argument, CoercionError, Field, GraphQLError, InputValue, ObjectMeta, RuleError, ScalarMeta,
    SchemaType, SourcePosition, Type, Value, Variables, execute, graphql_value, graphql_vars,
};

use super::error_summary;

/// Identifiers kept as integers internally and exposed as `ID-<n>` strings.
fn custom_id() -> ScalarMeta {
    fn from_str(s: &str) -> Option<Value> {
        s.strip_prefix("ID-")?.parse::<i32>().ok().map(Value::from)
    }

    ScalarMeta::new("CustomID")
        .description("Prefixed numeric identifier")
        .serialize(|v| match v {
            Value::Int(n) => Ok(Value::from(format!("ID-{n}"))),
            _ => Err(CoercionError::new(format!("CustomID cannot represent value: {v}"))),
        })
        .parse_value(|v| match v {
            Value::String(s) => from_str(s),
            _ => None,
        }
        .ok_or_else(|| CoercionError::new(format!("CustomID cannot parse value: {v}"))))
        .parse_literal(|lit| match lit {
            InputValue::String(s) => from_str(s),
            _ => None,
        }
        .ok_or_else(|| CoercionError::new(format!("CustomID cannot parse literal: {lit}"))))
}

fn schema() -> SchemaType<()> {
    SchemaType::builder("Query")
        .register(custom_id())
        .register(
            ObjectMeta::new("User")
                .field(Field::new("id", Type::named("CustomID")))
                .field(Field::new("name", Type::named("String"))),
        )
        .register(
            ObjectMeta::new("Query")
                .field(
                    Field::new("user", Type::named("User"))
                        .argument(Argument::new("id", Type::non_null_named("CustomID")))
                        .resolve_sync(|p| {
                            let id = p.args.get("id").cloned().unwrap_or(Value::Null);
                            Ok(graphql_value!({
                                "id": (id.clone()),
                                "name": (format!("User {}", id)),
                            }))
                        }),
                )
                .field(
                    Field::new("echo", Type::named("CustomID"))
                        .argument(Argument::new("ids", Type::named("CustomID").list()))
                        .resolve_sync(|p| {
                            Ok(match p.args.get("ids") {
                                Some(Value::List(ids)) => ids.first().cloned().unwrap_or(Value::Null),
                                _ => Value::Null,
                            })
                        }),
                )
                .field(
                    Field::new("badId", Type::named("CustomID"))
                        .resolve_sync(|_| Ok(Value::from("oops"))),
                ),
        )
        .build()
        .expect("valid schema")
}

async fn run(query: &str, vars: Variables) -> Result<(Value, Vec<String>), GraphQLError> {
    execute(query, None, &schema(), Value::Null, &vars, &())
        .await
        .map(|(v, errs)| (v, error_summary(&errs)))
}

#[tokio::test]
async fn parses_literal_and_serializes_result() {
    assert_eq!(
        run(r#"{ user(id: "ID-7") { id name } }"#, graphql_vars! {}).await,
        Ok((
            graphql_value!({"user": {"id": "ID-7", "name": "User 7"}}),
            vec![],
        )),
    );
}

#[tokio::test]
async fn parses_variable_value() {
    assert_eq!(
        run(
            "query q($id: CustomID!) { user(id: $id) { id } }",
            graphql_vars! {"id": "ID-3"},
        )
        .await,
        Ok((graphql_value!({"user": {"id": "ID-3"}}), vec![])),
    );
}

#[tokio::test]
async fn single_literal_for_list_argument() {
    assert_eq!(
        run(r#"{ echo(ids: "ID-1") }"#, graphql_vars! {}).await,
        Ok((graphql_value!({"echo": "ID-1"}), vec![])),
    );
}

#[tokio::test]
async fn rejects_invalid_literal() {
    assert_eq!(
        run(r#"{ user(id: "7") { id } }"#, graphql_vars! {}).await,
        Err(GraphQLError::ValidationError(vec![RuleError::new(
            "Argument \"id\" has invalid value \"7\".\n\
             Expected type \"CustomID\", found \"7\".\n\
             Error: CustomID cannot parse literal: \"7\"",
            &[SourcePosition::new(11, 0, 11)],
        )])),
    );
}

#[tokio::test]
async fn rejects_invalid_variable() {
    assert_eq!(
        run(
            "query q($id: CustomID!) { user(id: $id) { id } }",
            graphql_vars! {"id": 7},
        )
        .await,
        Err(GraphQLError::ValidationError(vec![RuleError::new(
            "Variable \"$id\" got invalid value 7.\n\
             Expected type \"CustomID\", found 7.\n\
             Error: CustomID cannot parse value: 7",
            &[SourcePosition::new(8, 0, 8)],
        )])),
    );
}

#[tokio::test]
async fn serialization_failure_is_field_error() {
    assert_eq!(
        run("{ badId }", graphql_vars! {}).await,
        Ok((
            graphql_value!({"badId": null}),
            vec!["badId: CustomID cannot represent value: \"oops\"".to_owned()],
        )),
    );
}
