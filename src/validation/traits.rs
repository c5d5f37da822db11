use crate::{
    ast::{
        Directive, Document, Field, Fragment, FragmentSpread, InlineFragment, InputValue,
        Operation, Selection, VariableDefinition,
    },
    parser::Spanning,
    validation::ValidatorContext,
};

#[doc(hidden)]
pub trait Visitor<'a, Ctx> {
    fn enter_document(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Document<'a>) {}
    fn exit_document(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Document<'a>) {}

    fn enter_operation_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<Operation<'a>>,
    ) {
    }
    fn exit_operation_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<Operation<'a>>,
    ) {
    }

    fn enter_fragment_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<Fragment<'a>>,
    ) {
    }
    fn exit_fragment_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<Fragment<'a>>,
    ) {
    }

    fn enter_variable_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
    }
    fn exit_variable_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
    }

    fn enter_directive(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<Directive<'a>>,
    ) {
    }
    fn exit_directive(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Directive<'a>>) {
    }

    fn enter_argument(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a (Spanning<&'a str>, Spanning<InputValue>),
    ) {
    }
    fn exit_argument(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a (Spanning<&'a str>, Spanning<InputValue>),
    ) {
    }

    fn enter_selection_set(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a [Selection<'a>]) {}
    fn exit_selection_set(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a [Selection<'a>]) {}

    fn enter_field(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Field<'a>>) {}
    fn exit_field(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Field<'a>>) {}

    fn enter_fragment_spread(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<FragmentSpread<'a>>,
    ) {
    }
    fn exit_fragment_spread(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<FragmentSpread<'a>>,
    ) {
    }

    fn enter_inline_fragment(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<InlineFragment<'a>>,
    ) {
    }
    fn exit_inline_fragment(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<InlineFragment<'a>>,
    ) {
    }

    fn enter_variable_value(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: Spanning<&'a str>) {}
    fn exit_variable_value(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: Spanning<&'a str>) {}

    fn enter_list_value(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: Spanning<&'a [Spanning<InputValue>]>,
    ) {
    }
    fn exit_list_value(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: Spanning<&'a [Spanning<InputValue>]>,
    ) {
    }

    fn enter_object_field(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a (Spanning<String>, Spanning<InputValue>),
    ) {
    }
    fn exit_object_field(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a (Spanning<String>, Spanning<InputValue>),
    ) {
    }
}
