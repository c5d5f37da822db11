use crate::{
    ast::{
        Arguments, Definition, Directive, Document, Field, FragmentSpread, InlineFragment,
        InputValue, Selection, Type, VariableDefinitions,
    },
    parser::Spanning,
    schema::meta::{Argument, MetaType},
    validation::{ValidatorContext, Visitor},
};

#[doc(hidden)]
pub fn visit<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    d: &'a Document<'a>,
) {
    v.enter_document(ctx, d);
    visit_definitions(v, ctx, d);
    v.exit_document(ctx, d);
}

fn visit_definitions<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    d: &'a Document<'a>,
) {
    for def in d {
        let def_type = match def {
            Definition::Fragment(f) => Some(Type::non_null_named(f.item.type_condition.item)),
            Definition::Operation(op) => ctx
                .schema
                .root_type(op.item.operation_type)
                .map(|t| Type::non_null_named(t.name().clone())),
        };

        ctx.with_pushed_type(def_type.as_ref(), |ctx| match def {
            Definition::Operation(op) => {
                v.enter_operation_definition(ctx, op);
                visit_variable_definitions(v, ctx, op.item.variable_definitions.as_ref());
                visit_directives(v, ctx, op.item.directives.as_deref());
                visit_selection_set(v, ctx, &op.item.selection_set);
                v.exit_operation_definition(ctx, op);
            }
            Definition::Fragment(f) => {
                v.enter_fragment_definition(ctx, f);
                visit_directives(v, ctx, f.item.directives.as_deref());
                visit_selection_set(v, ctx, &f.item.selection_set);
                v.exit_fragment_definition(ctx, f);
            }
        });
    }
}

fn visit_variable_definitions<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    defs: Option<&'a Spanning<VariableDefinitions<'a>>>,
) {
    for def in defs.into_iter().flat_map(|defs| defs.item.iter()) {
        ctx.with_pushed_input_type(Some(&def.1.var_type.item), |ctx| {
            v.enter_variable_definition(ctx, def);

            if let Some(default_value) = &def.1.default_value {
                visit_input_value(v, ctx, default_value);
            }

            v.exit_variable_definition(ctx, def);
        });
    }
}

fn visit_directives<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    directives: Option<&'a [Spanning<Directive<'a>>]>,
) {
    for directive in directives.into_iter().flatten() {
        let directive_arguments = ctx
            .schema
            .directive_by_name(directive.item.name.item)
            .map(|d| &d.arguments[..]);

        v.enter_directive(ctx, directive);
        visit_arguments(v, ctx, directive_arguments, directive.item.arguments.as_ref());
        v.exit_directive(ctx, directive);
    }
}

fn visit_arguments<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    meta_args: Option<&'a [Argument]>,
    arguments: Option<&'a Spanning<Arguments<'a>>>,
) {
    for argument in arguments.into_iter().flat_map(|a| a.item.iter()) {
        let arg_type = meta_args
            .and_then(|args| args.iter().find(|a| a.name == argument.0.item))
            .map(|a| &a.arg_type);

        ctx.with_pushed_input_type(arg_type, |ctx| {
            v.enter_argument(ctx, argument);
            visit_input_value(v, ctx, &argument.1);
            v.exit_argument(ctx, argument);
        });
    }
}

fn visit_selection_set<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    selection_set: &'a [Selection<'a>],
) {
    ctx.with_pushed_parent_type(|ctx| {
        v.enter_selection_set(ctx, selection_set);

        for selection in selection_set {
            match selection {
                Selection::Field(field) => visit_field(v, ctx, field),
                Selection::FragmentSpread(spread) => visit_fragment_spread(v, ctx, spread),
                Selection::InlineFragment(fragment) => visit_inline_fragment(v, ctx, fragment),
            }
        }

        v.exit_selection_set(ctx, selection_set);
    });
}

fn visit_field<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    field: &'a Spanning<Field<'a>>,
) {
    let meta_field = ctx
        .parent_type()
        .and_then(|t| t.field_by_name(field.item.name.item));

    let typename_type;
    let field_type = match meta_field {
        Some(f) => Some(&f.field_type),
        None if field.item.name.item == "__typename"
            && ctx.parent_type().is_some_and(MetaType::is_composite) =>
        {
            typename_type = Type::non_null_named("String");
            Some(&typename_type)
        }
        None => None,
    };
    let field_args = meta_field.map(|f| &f.arguments[..]);

    ctx.with_pushed_type(field_type, |ctx| {
        v.enter_field(ctx, field);

        visit_arguments(v, ctx, field_args, field.item.arguments.as_ref());
        visit_directives(v, ctx, field.item.directives.as_deref());

        if let Some(selection_set) = &field.item.selection_set {
            visit_selection_set(v, ctx, selection_set);
        }

        v.exit_field(ctx, field);
    });
}

fn visit_fragment_spread<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    spread: &'a Spanning<FragmentSpread<'a>>,
) {
    v.enter_fragment_spread(ctx, spread);
    visit_directives(v, ctx, spread.item.directives.as_deref());
    v.exit_fragment_spread(ctx, spread);
}

fn visit_inline_fragment<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    fragment: &'a Spanning<InlineFragment<'a>>,
) {
    let visit_fn = |v: &mut V, ctx: &mut ValidatorContext<'a, Ctx>| {
        v.enter_inline_fragment(ctx, fragment);
        visit_directives(v, ctx, fragment.item.directives.as_deref());
        visit_selection_set(v, ctx, &fragment.item.selection_set);
        v.exit_inline_fragment(ctx, fragment);
    };

    if let Some(type_condition) = &fragment.item.type_condition {
        let ty = Type::non_null_named(type_condition.item);
        ctx.with_pushed_type(Some(&ty), |ctx| visit_fn(v, ctx));
    } else {
        visit_fn(v, ctx);
    }
}

fn visit_input_value<'a, Ctx, V: Visitor<'a, Ctx>>(
    v: &mut V,
    ctx: &mut ValidatorContext<'a, Ctx>,
    input_value: &'a Spanning<InputValue>,
) {
    match &input_value.item {
        InputValue::Variable(name) => {
            let name = Spanning::new(input_value.span, name.as_str());
            v.enter_variable_value(ctx, name);
            v.exit_variable_value(ctx, name);
        }
        InputValue::Object(fields) => {
            for field in fields {
                let inner_type = ctx
                    .current_input_type_literal()
                    .filter(|t| !t.is_list())
                    .and_then(|t| ctx.schema.concrete_type_by_name(t.innermost_name()))
                    .and_then(|ct| ct.input_field_by_name(&field.0.item))
                    .map(|f| &f.arg_type);

                ctx.with_pushed_input_type(inner_type, |ctx| {
                    v.enter_object_field(ctx, field);
                    visit_input_value(v, ctx, &field.1);
                    v.exit_object_field(ctx, field);
                });
            }
        }
        InputValue::List(items) => {
            let inner_type = ctx.current_input_type_literal().and_then(|t| match t.nullable() {
                Type::List(inner) => Some((**inner).clone()),
                _ => None,
            });
            let list = Spanning::new(input_value.span, &items[..]);

            v.enter_list_value(ctx, list);
            ctx.with_pushed_input_type(inner_type.as_ref(), |ctx| {
                for item in items {
                    visit_input_value(v, ctx, item);
                }
            });
            v.exit_list_value(ctx, list);
        }
        _ => {}
    }
}
