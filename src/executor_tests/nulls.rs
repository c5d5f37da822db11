use pretty_assertions::assert_eq;

use crate::{
    Field, FieldError, ObjectMeta, SchemaType, Type, Value, execute, graphql_value, graphql_vars,
};

use super::error_summary;

fn data_type() -> ObjectMeta<()> {
    ObjectMeta::new("DataType")
        .field(Field::new("sync", Type::named("String")).resolve_sync(|_| Ok(Value::from("sync"))))
        .field(
            Field::new("syncError", Type::named("String"))
                .resolve_sync(|_| Err(FieldError::from("sync error"))),
        )
        .field(
            Field::new("syncNonNull", Type::non_null_named("String"))
                .resolve_sync(|_| Ok(Value::from("sync"))),
        )
        .field(
            Field::new("syncNonNullError", Type::non_null_named("String"))
                .resolve_sync(|_| Err(FieldError::from("sync non-null error"))),
        )
        .field(
            Field::new("syncNonNullNull", Type::non_null_named("String"))
                .resolve_sync(|_| Ok(Value::Null)),
        )
        .field(
            Field::new("panics", Type::named("String"))
                .resolve_sync(|_| panic!("resolver exploded")),
        )
        .field(
            Field::new("list", Type::named("String").list())
                .resolve_sync(|_| Ok(graphql_value!(["a", null, "c"]))),
        )
        .field(
            Field::new("listOfNonNull", Type::non_null_named("String").list())
                .resolve_sync(|_| Ok(graphql_value!(["a", null, "c"]))),
        )
        .field(
            Field::new("nonNullListOfNonNull", Type::non_null_named("String").list().non_null())
                .resolve_sync(|_| Ok(graphql_value!(["a", null, "c"]))),
        )
        .field(
            Field::new("notAList", Type::named("String").list())
                .resolve_sync(|_| Ok(Value::from("a"))),
        )
        .field(Field::new("nest", Type::named("DataType")).resolve_sync(|_| Ok(graphql_value!({}))))
        .field(
            Field::new("nonNullNest", Type::non_null_named("DataType"))
                .resolve_sync(|_| Ok(graphql_value!({}))),
        )
}

fn schema() -> SchemaType<()> {
    SchemaType::builder("DataType")
        .register(data_type())
        .build()
        .expect("valid schema")
}

async fn run(query: &str) -> (Value, Vec<String>) {
    let (result, errs) = execute(query, None, &schema(), Value::Null, &graphql_vars! {}, &())
        .await
        .expect("Execution failed");
    (result, error_summary(&errs))
}

#[tokio::test]
async fn nullable_field_error_keeps_siblings() {
    let (result, errs) = run("{ a: syncError b: sync }").await;

    assert_eq!(result, graphql_value!({"a": null, "b": "sync"}));
    assert_eq!(errs, ["a: sync error"]);
}

#[tokio::test]
async fn non_null_root_field_error_nulls_data() {
    let (result, errs) = run("{ a: syncNonNullError b: sync }").await;

    assert_eq!(result, Value::Null);
    assert_eq!(errs, ["a: sync non-null error"]);
}

#[tokio::test]
async fn non_null_error_bubbles_to_nearest_nullable_ancestor() {
    let (result, errs) = run(
        "{
            nest {
                sync
                nonNullNest { nonNullNest { syncNonNullError } }
            }
            sync
        }",
    )
    .await;

    assert_eq!(result, graphql_value!({"nest": null, "sync": "sync"}));
    assert_eq!(
        errs,
        ["nest.nonNullNest.nonNullNest.syncNonNullError: sync non-null error"],
    );
}

#[tokio::test]
async fn propagating_null_stops_at_nullable_field() {
    let (result, errs) = run("{ nest { nest { syncNonNullError } sync } }").await;

    assert_eq!(result, graphql_value!({"nest": {"nest": null, "sync": "sync"}}));
    assert_eq!(errs, ["nest.nest.syncNonNullError: sync non-null error"]);
}

#[tokio::test]
async fn null_returned_for_non_null_field() {
    let (result, errs) = run("{ nest { syncNonNullNull } syncNonNull }").await;

    assert_eq!(result, graphql_value!({"nest": null, "syncNonNull": "sync"}));
    assert_eq!(
        errs,
        ["nest.syncNonNullNull: Cannot return null for non-nullable field DataType.syncNonNullNull."],
    );
}

#[tokio::test]
async fn panicking_resolver_becomes_field_error() {
    let (result, errs) = run("{ panics sync }").await;

    assert_eq!(result, graphql_value!({"panics": null, "sync": "sync"}));
    assert_eq!(errs, ["panics: resolver exploded"]);
}

#[tokio::test]
async fn nullable_list_elements_stay_null() {
    let (result, errs) = run("{ list }").await;

    assert_eq!(result, graphql_value!({"list": ["a", null, "c"]}));
    assert_eq!(errs, Vec::<String>::new());
}

#[tokio::test]
async fn null_element_of_non_null_items_nulls_the_list() {
    let (result, errs) = run("{ listOfNonNull sync }").await;

    assert_eq!(result, graphql_value!({"listOfNonNull": null, "sync": "sync"}));
    assert_eq!(
        errs,
        ["listOfNonNull.1: Cannot return null for non-nullable field DataType.listOfNonNull."],
    );
}

#[tokio::test]
async fn null_element_of_non_null_list_bubbles_further() {
    let (result, errs) = run("{ nest { nonNullListOfNonNull } sync }").await;

    assert_eq!(result, graphql_value!({"nest": null, "sync": "sync"}));
    assert_eq!(
        errs,
        [
            "nest.nonNullListOfNonNull.1: \
             Cannot return null for non-nullable field DataType.nonNullListOfNonNull.",
        ],
    );
}

#[tokio::test]
async fn non_list_value_for_list_field() {
    let (result, errs) = run("{ notAList }").await;

    assert_eq!(result, graphql_value!({"notAList": null}));
    assert_eq!(
        errs,
        ["notAList: Expected an iterable, but did not find one for field DataType.notAList."],
    );
}

#[tokio::test]
async fn every_failure_is_reported() {
    let (result, errs) = run("{ a: syncError b: nest { syncError } c: panics }").await;

    assert_eq!(
        result,
        graphql_value!({"a": null, "b": {"syncError": null}, "c": null}),
    );
    assert_eq!(
        errs,
        [
            "a: sync error",
            "b.syncError: sync error",
            "c: resolver exploded",
        ],
    );
}
