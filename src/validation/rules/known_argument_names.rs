use crate::{
    ast::{Directive, Field, InputValue},
    parser::Spanning,
    schema::meta::Argument,
    validation::{ValidatorContext, Visitor},
};

#[derive(Debug)]
enum ArgumentPosition<'a> {
    Directive(&'a str),
    Field(&'a str, &'a str),
}

pub struct KnownArgumentNames<'a> {
    current_args: Option<(ArgumentPosition<'a>, &'a [Argument])>,
}

pub fn factory<'a>() -> KnownArgumentNames<'a> {
    KnownArgumentNames { current_args: None }
}

impl<'a, Ctx> Visitor<'a, Ctx> for KnownArgumentNames<'a> {
    fn enter_directive(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        directive: &'a Spanning<Directive<'a>>,
    ) {
        self.current_args = ctx
            .schema
            .directive_by_name(directive.item.name.item)
            .map(|d| {
                (
                    ArgumentPosition::Directive(directive.item.name.item),
                    &d.arguments[..],
                )
            });
    }

    fn exit_directive(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Directive<'a>>) {
        self.current_args = None;
    }

    fn enter_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, field: &'a Spanning<Field<'a>>) {
        self.current_args = ctx.parent_type().and_then(|parent_type| {
            let field_name = field.item.name.item;
            parent_type.field_by_name(field_name).map(|f| {
                (
                    ArgumentPosition::Field(field_name, parent_type.name().as_str()),
                    &f.arguments[..],
                )
            })
        });
    }

    fn exit_field(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Field<'a>>) {
        self.current_args = None;
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        (arg_name, _): &'a (Spanning<&'a str>, Spanning<InputValue>),
    ) {
        if let Some((pos, args)) = &self.current_args {
            if !args.iter().any(|a| a.name == arg_name.item) {
                let message = match *pos {
                    ArgumentPosition::Field(field_name, type_name) => {
                        field_error_message(arg_name.item, field_name, type_name)
                    }
                    ArgumentPosition::Directive(directive_name) => {
                        directive_error_message(arg_name.item, directive_name)
                    }
                };

                ctx.report_error(&message, &[arg_name.span.start]);
            }
        }
    }
}

fn field_error_message(arg_name: &str, field_name: &str, type_name: &str) -> String {
    format!(r#"Unknown argument "{arg_name}" on field "{field_name}" of type "{type_name}""#)
}

fn directive_error_message(arg_name: &str, directive_name: &str) -> String {
    format!(r#"Unknown argument "{arg_name}" on directive "@{directive_name}""#)
}
