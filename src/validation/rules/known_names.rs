//! Fragment spreads and type references must name something the document or
//! the schema defines.

use crate::{
    ast::{Fragment, FragmentSpread, InlineFragment, VariableDefinition},
    parser::Spanning,
    validation::{ValidatorContext, Visitor},
};

pub struct KnownNames;

pub fn factory() -> KnownNames {
    KnownNames
}

impl KnownNames {
    fn check_type<Ctx>(ctx: &mut ValidatorContext<'_, Ctx>, name: Spanning<&str>) {
        if ctx.schema.concrete_type_by_name(name.item).is_none() {
            ctx.report_error(&format!(r#"Unknown type "{}""#, name.item), &[name.span.start]);
        }
    }
}

impl<'a, Ctx> Visitor<'a, Ctx> for KnownNames {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        spread: &'a Spanning<FragmentSpread<'a>>,
    ) {
        let name = &spread.item.name;
        if !ctx.is_known_fragment(name.item) {
            ctx.report_error(&format!(r#"Unknown fragment: "{}""#, name.item), &[name.span.start]);
        }
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        fragment: &'a Spanning<Fragment<'a>>,
    ) {
        Self::check_type(ctx, fragment.item.type_condition);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        fragment: &'a Spanning<InlineFragment<'a>>,
    ) {
        if let Some(cond) = fragment.item.type_condition {
            Self::check_type(ctx, cond);
        }
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        (_, def): &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        let ty = &def.var_type;
        Self::check_type(ctx, Spanning::new(ty.span, ty.item.innermost_name().as_str()));
    }
}
