use crate::{
    ast::{Field, Type},
    parser::Spanning,
    validation::{ValidatorContext, Visitor},
};

pub struct ScalarLeafs;

pub fn factory() -> ScalarLeafs {
    ScalarLeafs
}

impl<'a, Ctx> Visitor<'a, Ctx> for ScalarLeafs {
    fn enter_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, field: &'a Spanning<Field<'a>>) {
        let field_name = field.item.name.item;

        let message = match (ctx.current_type(), ctx.current_type_literal()) {
            (Some(field_type), Some(type_literal)) => {
                match (field_type.is_leaf(), &field.item.selection_set) {
                    (true, Some(_)) => Some(no_allowed_error_message(field_name, type_literal)),
                    (false, None) => Some(required_error_message(field_name, type_literal)),
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(message) = message {
            ctx.report_error(&message, &[field.span.start]);
        }
    }
}

fn no_allowed_error_message(field_name: &str, type_name: &Type) -> String {
    format!(
        r#"Field "{field_name}" must not have a selection since type {type_name} has no subfields"#,
    )
}

fn required_error_message(field_name: &str, type_name: &Type) -> String {
    format!(
        r#"Field "{field_name}" of type "{type_name}" must have a selection of subfields. Did you mean "{field_name} {{ ... }}"?"#,
    )
}
