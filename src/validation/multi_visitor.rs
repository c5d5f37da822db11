use crate::{
    ast::{
        Directive, Document, Field, Fragment, FragmentSpread, InlineFragment, InputValue,
        Operation, Selection, VariableDefinition,
    },
    parser::Spanning,
    validation::{ValidatorContext, Visitor},
};

/// Runs several visitors over the document in a single traversal.
#[doc(hidden)]
pub struct MultiVisitor<'a, Ctx> {
    visitors: Vec<Box<dyn Visitor<'a, Ctx> + 'a>>,
}

impl<'a, Ctx> MultiVisitor<'a, Ctx> {
    #[doc(hidden)]
    pub fn new(visitors: Vec<Box<dyn Visitor<'a, Ctx> + 'a>>) -> Self {
        Self { visitors }
    }

    fn visit_all(&mut self, mut f: impl FnMut(&mut (dyn Visitor<'a, Ctx> + 'a))) {
        for v in &mut self.visitors {
            f(v.as_mut());
        }
    }
}

impl<'a, Ctx> Visitor<'a, Ctx> for MultiVisitor<'a, Ctx> {
    fn enter_document(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, doc: &'a Document<'a>) {
        self.visit_all(|v| v.enter_document(ctx, doc));
    }
    fn exit_document(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, doc: &'a Document<'a>) {
        self.visit_all(|v| v.exit_document(ctx, doc));
    }

    fn enter_operation_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        op: &'a Spanning<Operation<'a>>,
    ) {
        self.visit_all(|v| v.enter_operation_definition(ctx, op));
    }
    fn exit_operation_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        op: &'a Spanning<Operation<'a>>,
    ) {
        self.visit_all(|v| v.exit_operation_definition(ctx, op));
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        f: &'a Spanning<Fragment<'a>>,
    ) {
        self.visit_all(|v| v.enter_fragment_definition(ctx, f));
    }
    fn exit_fragment_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        f: &'a Spanning<Fragment<'a>>,
    ) {
        self.visit_all(|v| v.exit_fragment_definition(ctx, f));
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        def: &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        self.visit_all(|v| v.enter_variable_definition(ctx, def));
    }
    fn exit_variable_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        def: &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        self.visit_all(|v| v.exit_variable_definition(ctx, def));
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        d: &'a Spanning<Directive<'a>>,
    ) {
        self.visit_all(|v| v.enter_directive(ctx, d));
    }
    fn exit_directive(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, d: &'a Spanning<Directive<'a>>) {
        self.visit_all(|v| v.exit_directive(ctx, d));
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        arg: &'a (Spanning<&'a str>, Spanning<InputValue>),
    ) {
        self.visit_all(|v| v.enter_argument(ctx, arg));
    }
    fn exit_argument(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        arg: &'a (Spanning<&'a str>, Spanning<InputValue>),
    ) {
        self.visit_all(|v| v.exit_argument(ctx, arg));
    }

    fn enter_selection_set(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, s: &'a [Selection<'a>]) {
        self.visit_all(|v| v.enter_selection_set(ctx, s));
    }
    fn exit_selection_set(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, s: &'a [Selection<'a>]) {
        self.visit_all(|v| v.exit_selection_set(ctx, s));
    }

    fn enter_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, f: &'a Spanning<Field<'a>>) {
        self.visit_all(|v| v.enter_field(ctx, f));
    }
    fn exit_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, f: &'a Spanning<Field<'a>>) {
        self.visit_all(|v| v.exit_field(ctx, f));
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        s: &'a Spanning<FragmentSpread<'a>>,
    ) {
        self.visit_all(|v| v.enter_fragment_spread(ctx, s));
    }
    fn exit_fragment_spread(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        s: &'a Spanning<FragmentSpread<'a>>,
    ) {
        self.visit_all(|v| v.exit_fragment_spread(ctx, s));
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        f: &'a Spanning<InlineFragment<'a>>,
    ) {
        self.visit_all(|v| v.enter_inline_fragment(ctx, f));
    }
    fn exit_inline_fragment(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        f: &'a Spanning<InlineFragment<'a>>,
    ) {
        self.visit_all(|v| v.exit_inline_fragment(ctx, f));
    }

    fn enter_variable_value(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, n: Spanning<&'a str>) {
        self.visit_all(|v| v.enter_variable_value(ctx, n));
    }
    fn exit_variable_value(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, n: Spanning<&'a str>) {
        self.visit_all(|v| v.exit_variable_value(ctx, n));
    }

    fn enter_list_value(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        l: Spanning<&'a [Spanning<InputValue>]>,
    ) {
        self.visit_all(|v| v.enter_list_value(ctx, l));
    }
    fn exit_list_value(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        l: Spanning<&'a [Spanning<InputValue>]>,
    ) {
        self.visit_all(|v| v.exit_list_value(ctx, l));
    }

    fn enter_object_field(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        f: &'a (Spanning<String>, Spanning<InputValue>),
    ) {
        self.visit_all(|v| v.enter_object_field(ctx, f));
    }
    fn exit_object_field(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        f: &'a (Spanning<String>, Spanning<InputValue>),
    ) {
        self.visit_all(|v| v.exit_object_field(ctx, f));
    }
}
