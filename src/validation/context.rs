use std::fmt;

use fnv::FnvHashSet;
use itertools::Itertools as _;

use crate::{
    ast::{Definition, Document, Type},
    parser::SourcePosition,
    schema::{meta::MetaType, model::SchemaType},
};

/// Query validation error.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct RuleError {
    locations: Vec<SourcePosition>,
    message: String,
}

impl RuleError {
    #[doc(hidden)]
    pub fn new(message: &str, locations: &[SourcePosition]) -> Self {
        Self {
            message: message.into(),
            locations: locations.to_vec(),
        }
    }

    /// Access the message for a validation error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Access the positions of the validation error.
    ///
    /// Most validation errors point to at least one source position, some
    /// supply extra context through several of them. Errors about a variable
    /// used in a position of an incompatible type carry none.
    pub fn locations(&self) -> &[SourcePosition] {
        &self.locations
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.locations.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}. At {}", self.message, self.locations.iter().join(", "))
        }
    }
}

impl std::error::Error for RuleError {}

#[doc(hidden)]
pub struct ValidatorContext<'a, Ctx> {
    pub schema: &'a SchemaType<Ctx>,
    errors: Vec<RuleError>,
    type_stack: Vec<Option<&'a MetaType<Ctx>>>,
    type_literal_stack: Vec<Option<Type>>,
    input_type_literal_stack: Vec<Option<Type>>,
    parent_type_stack: Vec<Option<&'a MetaType<Ctx>>>,
    fragment_names: FnvHashSet<&'a str>,
}

impl<'a, Ctx> ValidatorContext<'a, Ctx> {
    #[doc(hidden)]
    pub fn new(schema: &'a SchemaType<Ctx>, document: &Document<'a>) -> Self {
        Self {
            errors: Vec::new(),
            schema,
            type_stack: Vec::new(),
            type_literal_stack: Vec::new(),
            parent_type_stack: Vec::new(),
            input_type_literal_stack: Vec::new(),
            fragment_names: document
                .iter()
                .filter_map(|def| match def {
                    Definition::Fragment(frag) => Some(frag.item.name.item),
                    Definition::Operation(_) => None,
                })
                .collect(),
        }
    }

    #[doc(hidden)]
    pub fn append_errors(&mut self, mut errors: Vec<RuleError>) {
        self.errors.append(&mut errors);
    }

    #[doc(hidden)]
    pub fn report_error(&mut self, message: &str, locations: &[SourcePosition]) {
        self.errors.push(RuleError::new(message, locations));
    }

    #[doc(hidden)]
    pub fn into_errors(mut self) -> Vec<RuleError> {
        self.errors.sort();
        self.errors
    }

    #[doc(hidden)]
    pub fn with_pushed_type<F, R>(&mut self, t: Option<&Type>, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.type_stack
            .push(t.and_then(|t| self.schema.concrete_type_by_name(t.innermost_name())));
        self.type_literal_stack.push(t.cloned());

        let res = f(self);

        self.type_literal_stack.pop();
        self.type_stack.pop();

        res
    }

    #[doc(hidden)]
    pub fn with_pushed_parent_type<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.parent_type_stack.push(self.current_type());
        let res = f(self);
        self.parent_type_stack.pop();

        res
    }

    #[doc(hidden)]
    pub fn with_pushed_input_type<F, R>(&mut self, t: Option<&Type>, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.input_type_literal_stack.push(t.cloned());
        let res = f(self);
        self.input_type_literal_stack.pop();

        res
    }

    #[doc(hidden)]
    pub fn current_type(&self) -> Option<&'a MetaType<Ctx>> {
        self.type_stack.last().copied().flatten()
    }

    #[doc(hidden)]
    pub fn current_type_literal(&self) -> Option<&Type> {
        self.type_literal_stack.last()?.as_ref()
    }

    #[doc(hidden)]
    pub fn parent_type(&self) -> Option<&'a MetaType<Ctx>> {
        self.parent_type_stack.last().copied().flatten()
    }

    #[doc(hidden)]
    pub fn current_input_type_literal(&self) -> Option<&Type> {
        self.input_type_literal_stack.last()?.as_ref()
    }

    #[doc(hidden)]
    pub fn is_known_fragment(&self, name: &str) -> bool {
        self.fragment_names.contains(name)
    }
}
