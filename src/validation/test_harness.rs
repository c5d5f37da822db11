use std::sync::LazyLock;

use crate::{
    ast::{Document, Type},
    parser::parse_document_source,
    schema::{
        meta::{Argument, EnumMeta, Field, InputObjectMeta, InterfaceMeta, ObjectMeta, UnionMeta},
        model::SchemaType,
    },
    validation::{MultiVisitor, RuleError, ValidatorContext, Visitor, visit},
};

pub(crate) static SCHEMA: LazyLock<SchemaType<()>> = LazyLock::new(|| {
    let name = || {
        Field::new("name", Type::named("String"))
            .argument(Argument::new("surname", Type::named("Boolean")))
    };
    let int_arg_field = |field: &str, arg: &str, ty: Type| {
        Field::new(field, Type::named("String")).argument(Argument::new(arg, ty))
    };

    SchemaType::builder("QueryRoot")
        .mutation("MutationRoot")
        .register(
            EnumMeta::new("DogCommand")
                .value("SIT", 0)
                .value("HEEL", 1)
                .value("DOWN", 2),
        )
        .register(
            EnumMeta::new("FurColor")
                .value("BROWN", 0)
                .value("BLACK", 1)
                .value("TAN", 2)
                .value("SPOTTED", 3),
        )
        .register(InterfaceMeta::new("Being").field(name()))
        .register(InterfaceMeta::new("Pet").field(name()))
        .register(InterfaceMeta::new("Canine").field(name()))
        .register(InterfaceMeta::new("Intelligent").field(Field::new("iq", Type::named("Int"))))
        .register(
            ObjectMeta::new("Dog")
                .interfaces(&["Being", "Pet", "Canine"])
                .field(name())
                .field(Field::new("nickname", Type::named("String")))
                .field(Field::new("barkVolume", Type::named("Int")))
                .field(Field::new("barks", Type::named("Boolean")))
                .field(
                    Field::new("doesKnowCommand", Type::named("Boolean"))
                        .argument(Argument::new("dogCommand", Type::named("DogCommand"))),
                )
                .field(
                    Field::new("isHousetrained", Type::named("Boolean")).argument(
                        Argument::new("atOtherHomes", Type::named("Boolean")).default_value(true),
                    ),
                )
                .field(
                    Field::new("isAtLocation", Type::named("Boolean"))
                        .argument(Argument::new("x", Type::named("Int")))
                        .argument(Argument::new("y", Type::named("Int"))),
                ),
        )
        .register(
            ObjectMeta::new("Cat")
                .interfaces(&["Being", "Pet"])
                .field(name())
                .field(Field::new("nickname", Type::named("String")))
                .field(Field::new("meows", Type::named("Boolean")))
                .field(Field::new("meowVolume", Type::named("Int")))
                .field(Field::new("furColor", Type::named("FurColor"))),
        )
        .register(UnionMeta::new("CatOrDog", &["Cat", "Dog"]))
        .register(
            ObjectMeta::new("Human")
                .interfaces(&["Being", "Intelligent"])
                .field(name())
                .field(Field::new("pets", Type::named("Pet").list()))
                .field(Field::new("relatives", Type::named("Human").list()))
                .field(Field::new("iq", Type::named("Int"))),
        )
        .register(
            ObjectMeta::new("Alien")
                .interfaces(&["Being", "Intelligent"])
                .field(name())
                .field(Field::new("iq", Type::named("Int")))
                .field(Field::new("numEyes", Type::named("Int"))),
        )
        .register(UnionMeta::new("DogOrHuman", &["Dog", "Human"]))
        .register(UnionMeta::new("HumanOrAlien", &["Human", "Alien"]))
        .register(
            InputObjectMeta::new("ComplexInput")
                .field(Argument::new("requiredField", Type::non_null_named("Boolean")))
                .field(Argument::new("intField", Type::named("Int")))
                .field(Argument::new("stringField", Type::named("String")))
                .field(Argument::new("booleanField", Type::named("Boolean")))
                .field(Argument::new("stringListField", Type::named("String").list())),
        )
        .register(
            ObjectMeta::new("ComplicatedArgs")
                .field(int_arg_field("intArgField", "intArg", Type::named("Int")))
                .field(int_arg_field(
                    "nonNullIntArgField",
                    "nonNullIntArg",
                    Type::non_null_named("Int"),
                ))
                .field(int_arg_field("stringArgField", "stringArg", Type::named("String")))
                .field(int_arg_field("booleanArgField", "booleanArg", Type::named("Boolean")))
                .field(int_arg_field("enumArgField", "enumArg", Type::named("FurColor")))
                .field(int_arg_field("floatArgField", "floatArg", Type::named("Float")))
                .field(int_arg_field("idArgField", "idArg", Type::named("ID")))
                .field(int_arg_field(
                    "stringListArgField",
                    "stringListArg",
                    Type::named("String").list(),
                ))
                .field(int_arg_field(
                    "nonNullStringListArgField",
                    "nonNullStringListArg",
                    Type::non_null_named("String").list().non_null(),
                ))
                .field(int_arg_field(
                    "complexArgField",
                    "complexArg",
                    Type::named("ComplexInput"),
                ))
                .field(
                    Field::new("multipleReqs", Type::named("String"))
                        .argument(Argument::new("req1", Type::non_null_named("Int")))
                        .argument(Argument::new("req2", Type::non_null_named("Int"))),
                )
                .field(
                    Field::new("multipleOpts", Type::named("String"))
                        .argument(Argument::new("opt1", Type::named("Int")).default_value(0))
                        .argument(Argument::new("opt2", Type::named("Int")).default_value(0)),
                )
                .field(
                    Field::new("multipleOptAndReq", Type::named("String"))
                        .argument(Argument::new("req1", Type::non_null_named("Int")))
                        .argument(Argument::new("req2", Type::non_null_named("Int")))
                        .argument(Argument::new("opt1", Type::named("Int")).default_value(0))
                        .argument(Argument::new("opt2", Type::named("Int")).default_value(0)),
                ),
        )
        .register(
            ObjectMeta::new("QueryRoot")
                .field(
                    Field::new("human", Type::named("Human"))
                        .argument(Argument::new("id", Type::named("ID"))),
                )
                .field(Field::new("alien", Type::named("Alien")))
                .field(Field::new("dog", Type::named("Dog")))
                .field(Field::new("cat", Type::named("Cat")))
                .field(Field::new("pet", Type::named("Pet")))
                .field(Field::new("catOrDog", Type::named("CatOrDog")))
                .field(Field::new("dogOrHuman", Type::named("DogOrHuman")))
                .field(Field::new("humanOrAlien", Type::named("HumanOrAlien")))
                .field(Field::new("complicatedArgs", Type::named("ComplicatedArgs"))),
        )
        .register(
            ObjectMeta::new("MutationRoot").field(
                Field::new("testInput", Type::named("Int"))
                    .argument(Argument::new("input", Type::named("ComplexInput"))),
            ),
        )
        .build()
        .expect("valid test schema")
});

pub(crate) fn validate<'a, F>(q: &'a str, visit_fn: F) -> Vec<RuleError>
where
    F: FnOnce(&mut ValidatorContext<'a, ()>, &'a Document<'a>),
{
    // Leaked to let visitors borrow the document for as long as they live.
    let doc: &'a Document<'a> = Box::leak(
        parse_document_source(q)
            .expect("parse error on input")
            .into_boxed_slice(),
    );

    let mut ctx = ValidatorContext::new(&*SCHEMA, doc);
    visit_fn(&mut ctx, doc);
    ctx.into_errors()
}

pub(crate) fn expect_passes_rule<'a, V, F>(factory: F, q: &'a str)
where
    V: Visitor<'a, ()> + 'a,
    F: FnOnce() -> V,
{
    let errs = validate(q, move |ctx, doc| {
        let mut mv = MultiVisitor::new(vec![Box::new(factory())]);
        visit(&mut mv, ctx, doc);
    });

    if !errs.is_empty() {
        print_errors(&errs);
        panic!("Expected rule to pass, but errors found");
    }
}

pub(crate) fn expect_fails_rule<'a, V, F>(factory: F, q: &'a str, expected_errors: &[RuleError])
where
    V: Visitor<'a, ()> + 'a,
    F: FnOnce() -> V,
{
    let errs = validate(q, move |ctx, doc| {
        let mut mv = MultiVisitor::new(vec![Box::new(factory())]);
        visit(&mut mv, ctx, doc);
    });

    if errs.is_empty() {
        panic!("Expected rule to fail, but no errors were found");
    } else if errs != expected_errors {
        println!("==> Expected errors:");
        print_errors(expected_errors);

        println!("\n==> Actual errors:");
        print_errors(&errs);

        panic!("Unexpected set of errors found");
    }
}

fn print_errors(errs: &[RuleError]) {
    for err in errs {
        for p in err.locations() {
            print!("[{:>3},{:>3},{:>3}]  ", p.index(), p.line(), p.column());
        }
        println!("{}", err.message());
    }
}
