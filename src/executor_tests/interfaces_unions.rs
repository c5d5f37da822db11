use arcstr::ArcStr;
use pretty_assertions::assert_eq;

use crate::{
    Field, InterfaceMeta, ObjectMeta, SchemaType, Type, UnionMeta, Value, execute, graphql_value,
    graphql_vars,
};

use super::error_summary;

fn has_field(value: &Value, name: &str) -> bool {
    value
        .as_object_value()
        .is_some_and(|obj| obj.get_field_value(name).is_some())
}

fn kind(value: &Value) -> Option<ArcStr> {
    value
        .as_object_value()?
        .get_field_value("kind")?
        .as_string_value()
        .map(ArcStr::from)
}

fn name_field() -> Field<()> {
    Field::new("name", Type::named("String"))
}

fn schema() -> SchemaType<()> {
    SchemaType::builder("Query")
        .register(InterfaceMeta::new("Pet").field(name_field()))
        .register(
            ObjectMeta::new("Dog")
                .interfaces(&["Pet"])
                .field(name_field())
                .field(Field::new("woofs", Type::named("Boolean")))
                .is_type_of(|v, _| has_field(v, "woofs")),
        )
        .register(
            ObjectMeta::new("Cat")
                .interfaces(&["Pet"])
                .field(name_field())
                .field(Field::new("meows", Type::named("Boolean")))
                .is_type_of(|v, _| has_field(v, "meows")),
        )
        .register(ObjectMeta::new("Human").field(name_field()))
        .register(UnionMeta::new("CatOrDog", &["Cat", "Dog"]).resolve_type(|v, _| kind(v)))
        .register(
            ObjectMeta::new("Query")
                .field(Field::new("pets", Type::named("Pet").list()).resolve_sync(|_| {
                    Ok(graphql_value!([
                        {"name": "Odie", "woofs": true},
                        {"name": "Garfield", "meows": false},
                    ]))
                }))
                .field(
                    Field::new("unknownPet", Type::named("Pet"))
                        .resolve_sync(|_| Ok(graphql_value!({"name": "Nemo"}))),
                )
                .field(
                    Field::new("catOrDogs", Type::named("CatOrDog").list()).resolve_sync(|_| {
                        Ok(graphql_value!([
                            {"kind": "Dog", "name": "Odie"},
                            {"kind": "Human", "name": "Jon"},
                            {"kind": "Fish", "name": "Nemo"},
                            {"kind": "Cat", "name": "Garfield"},
                        ]))
                    }),
                ),
        )
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
async fn interface_falls_back_to_is_type_of() {
    let (result, errs) = run(
        "{ pets { __typename name ... on Dog { woofs } ... on Cat { meows } } }",
    )
    .await;

    assert_eq!(
        result,
        graphql_value!({
            "pets": [
                {"__typename": "Dog", "name": "Odie", "woofs": true},
                {"__typename": "Cat", "name": "Garfield", "meows": false},
            ],
        }),
    );
    assert_eq!(errs, Vec::<String>::new());
}

#[tokio::test]
async fn interface_without_matching_type() {
    let (result, errs) = run("{ unknownPet { name } }").await;

    assert_eq!(result, graphql_value!({"unknownPet": null}));
    assert_eq!(
        errs,
        [
            "unknownPet: Abstract type Pet must resolve to an Object type at runtime for field \
             Query.unknownPet with value {\"name\": \"Nemo\"}, received null.",
        ],
    );
}

#[tokio::test]
async fn union_resolves_through_resolve_type() {
    let (result, errs) = run(
        "{ catOrDogs { __typename ... on Dog { name } ... on Cat { meows: name } } }",
    )
    .await;

    assert_eq!(
        result,
        graphql_value!({
            "catOrDogs": [
                {"__typename": "Dog", "name": "Odie"},
                null,
                null,
                {"__typename": "Cat", "meows": "Garfield"},
            ],
        }),
    );
    assert_eq!(
        errs,
        [
            "catOrDogs.1: Runtime Object type \"Human\" is not a possible type for \"CatOrDog\".",
            "catOrDogs.2: Abstract type CatOrDog must resolve to an Object type at runtime for \
             field Query.catOrDogs with value {\"kind\": \"Fish\", \"name\": \"Nemo\"}, \
             received \"Fish\".",
        ],
    );
}
