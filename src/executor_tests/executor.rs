use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use futures::FutureExt as _;
use itertools::Itertools as _;
use pretty_assertions::assert_eq;

use crate::{
    Argument, Field, FieldError, ObjectMeta, SchemaType, Type, Value, Variables, execute,
    execute_validated_query_async, get_operation, graphql_value, graphql_vars,
    parse_document_source,
};

use super::error_summary;

/// Records the order resolvers finish in.
#[derive(Default)]
struct Finished(Mutex<Vec<&'static str>>);

impl Finished {
    fn push(&self, name: &'static str) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(name);
    }

    fn order(&self) -> Vec<&'static str> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

fn path_field() -> Field<Finished> {
    Field::new("path", Type::named("String"))
        .resolve_sync(|p| Ok(Value::from(p.info.path.iter().join("."))))
}

fn delayed(name: &'static str, millis: u64) -> Field<Finished> {
    Field::<Finished>::new(name, Type::named("String")).resolve(move |p| {
        let finished = p.context;
        async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            finished.push(name);
            Ok::<_, FieldError>(Value::from(name))
        }
        .boxed()
    })
}

fn schema() -> SchemaType<Finished> {
    SchemaType::builder("DataType")
        .register(
            ObjectMeta::new("DeepDataType")
                .field(
                    Field::new("a", Type::named("String"))
                        .resolve_sync(|_| Ok(Value::from("Already Been Done"))),
                )
                .field(
                    Field::new("b", Type::named("String"))
                        .resolve_sync(|_| Ok(Value::from("Boring"))),
                )
                .field(
                    Field::new("c", Type::named("String").list())
                        .resolve_sync(|_| Ok(graphql_value!(["Contrived", null, "Confusing"]))),
                )
                .field(
                    Field::new("deeper", Type::named("DeepDataType").list())
                        .resolve_sync(|_| Ok(graphql_value!([{}, null, {}]))),
                )
                .field(path_field()),
        )
        .register(
            ObjectMeta::new("Plain")
                .field(Field::new("x", Type::named("Int")))
                .field(Field::new("y", Type::named("String"))),
        )
        .register(
            ObjectMeta::new("DataType")
                .field(
                    Field::new("a", Type::named("String"))
                        .resolve_sync(|_| Ok(Value::from("Apple"))),
                )
                .field(
                    Field::new("b", Type::named("String"))
                        .resolve_sync(|_| Ok(Value::from("Banana"))),
                )
                .field(
                    Field::new("pic", Type::named("String"))
                        .argument(Argument::new("size", Type::named("Int")).default_value(50))
                        .resolve_sync(|p| {
                            let size = p.args.get("size").cloned().unwrap_or(Value::Null);
                            Ok(Value::from(format!("Pic of size: {size}")))
                        }),
                )
                .field(
                    Field::new("deep", Type::named("DeepDataType"))
                        .resolve_sync(|_| Ok(graphql_value!({}))),
                )
                .field(
                    Field::new("plain", Type::named("Plain"))
                        .resolve_sync(|_| Ok(graphql_value!({"x": 1, "y": "two", "z": 3}))),
                )
                .field(Field::new("rootField", Type::named("String")))
                .field(Field::new("info", Type::named("String")).resolve_sync(|p| {
                    Ok(Value::from(format!(
                        "{}.{} as {}: {}",
                        p.info.parent_type,
                        p.info.field_name,
                        p.info.response_key,
                        p.info.return_type,
                    )))
                }))
                .field(delayed("slow", 60))
                .field(delayed("fast", 0))
                .field(path_field()),
        )
        .build()
        .expect("valid schema")
}

async fn run_with_root(query: &str, root: Value, vars: Variables, ctx: &Finished) -> Value {
    let (result, errs) = execute(query, None, &schema(), root, &vars, ctx)
        .await
        .expect("Execution failed");

    assert_eq!(errs, []);

    result
}

async fn run_query(query: &str) -> Value {
    run_with_root(query, Value::Null, graphql_vars! {}, &Finished::default()).await
}

#[tokio::test]
async fn nested_objects_and_lists() {
    assert_eq!(
        run_query("{ a deep { a b c deeper { a } } }").await,
        graphql_value!({
            "a": "Apple",
            "deep": {
                "a": "Already Been Done",
                "b": "Boring",
                "c": ["Contrived", null, "Confusing"],
                "deeper": [{"a": "Already Been Done"}, null, {"a": "Already Been Done"}],
            },
        }),
    );
}

#[tokio::test]
async fn merges_fields_in_first_appearance_order() {
    assert_eq!(
        run_query("{ deep { a } a ...F deep { b } } fragment F on DataType { b a }").await,
        graphql_value!({
            "deep": {"a": "Already Been Done", "b": "Boring"},
            "a": "Apple",
            "b": "Banana",
        }),
    );
}

#[tokio::test]
async fn aliases_and_argument_defaults() {
    assert_eq!(
        run_query("{ first: pic(size: 10) second: pic b: a }").await,
        graphql_value!({
            "first": "Pic of size: 10",
            "second": "Pic of size: 50",
            "b": "Apple",
        }),
    );
}

#[tokio::test]
async fn inline_fragments_and_typename() {
    assert_eq!(
        run_query("{ __typename ... on DataType { a } deep { __typename ... { b } } }").await,
        graphql_value!({
            "__typename": "DataType",
            "a": "Apple",
            "deep": {"__typename": "DeepDataType", "b": "Boring"},
        }),
    );
}

#[tokio::test]
async fn fields_without_resolvers_read_source_object() {
    assert_eq!(
        run_with_root(
            "{ rootField plain { y x } }",
            graphql_value!({"rootField": "from root"}),
            graphql_vars! {},
            &Finished::default(),
        )
        .await,
        graphql_value!({"rootField": "from root", "plain": {"y": "two", "x": 1}}),
    );
}

#[tokio::test]
async fn resolve_info_describes_field() {
    assert_eq!(
        run_query("{ i: info }").await,
        graphql_value!({"i": "DataType.info as i: String"}),
    );
}

#[tokio::test]
async fn resolve_info_path_includes_list_indices() {
    assert_eq!(
        run_query("{ path d: deep { deeper { path } } }").await,
        graphql_value!({
            "path": "path",
            "d": {"deeper": [{"path": "d.deeper.0.path"}, null, {"path": "d.deeper.2.path"}]},
        }),
    );
}

#[tokio::test]
async fn sibling_fields_resolve_concurrently() {
    let finished = Finished::default();

    assert_eq!(
        run_with_root("{ slow fast }", Value::Null, graphql_vars! {}, &finished).await,
        graphql_value!({"slow": "slow", "fast": "fast"}),
    );
    assert_eq!(finished.order(), ["fast", "slow"]);
}

#[tokio::test]
async fn unknown_field_without_validation() {
    let doc = parse_document_source("{ a nope }").expect("parses");
    let op = get_operation(&doc, None).expect("has an operation");
    let (result, errs) = execute_validated_query_async(
        &doc,
        op,
        &schema(),
        Value::Null,
        &graphql_vars! {},
        &Finished::default(),
    )
    .await
    .expect("Execution failed");

    assert_eq!(result, graphql_value!({"a": "Apple", "nope": null}));
    assert_eq!(
        error_summary(&errs),
        ["nope: Unknown field \"nope\" on type \"DataType\""],
    );
}
