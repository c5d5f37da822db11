//! Assembled schema and the builder checking it.

use std::fmt;

use arcstr::ArcStr;
use auto_enums::auto_enum;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use static_assertions as sa;

use crate::{
    ast::{OperationType, Type},
    schema::meta::{
        Argument, EnumMeta, Field, InputObjectMeta, InterfaceMeta, MetaType, ObjectMeta,
        UnionMeta,
    },
    types::{name::Name, scalars},
};

type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

/// Metadata for a schema.
///
/// Immutable once built, so a single instance may serve any number of
/// concurrent executions.
#[derive(Debug)]
pub struct SchemaType<Ctx> {
    pub(crate) description: Option<ArcStr>,
    pub(crate) types: FnvIndexMap<ArcStr, MetaType<Ctx>>,
    pub(crate) query_type_name: ArcStr,
    pub(crate) mutation_type_name: Option<ArcStr>,
    pub(crate) subscription_type_name: Option<ArcStr>,
    directives: FnvIndexMap<ArcStr, DirectiveType>,
}

sa::assert_impl_all!(SchemaType<()>: Send, Sync);

/// Directive declared by a schema.
#[derive(Clone, Debug)]
pub struct DirectiveType {
    #[expect(missing_docs, reason = "self-explanatory")]
    pub name: ArcStr,
    #[expect(missing_docs, reason = "self-explanatory")]
    pub description: Option<ArcStr>,
    /// Places in a document the directive may be written at.
    pub locations: Vec<DirectiveLocation>,
    #[expect(missing_docs, reason = "self-explanatory")]
    pub arguments: Vec<Argument>,
}

/// Place in an executable document a directive is attached to.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
pub enum DirectiveLocation {
    #[display("query")]
    Query,
    #[display("mutation")]
    Mutation,
    #[display("subscription")]
    Subscription,
    #[display("field")]
    Field,
    #[display("fragment definition")]
    FragmentDefinition,
    #[display("fragment spread")]
    FragmentSpread,
    #[display("inline fragment")]
    InlineFragment,
    #[display("variable definition")]
    VariableDefinition,
}

impl DirectiveType {
    /// Declares a new directive.
    pub fn new(
        name: impl Into<ArcStr>,
        locations: &[DirectiveLocation],
        arguments: &[Argument],
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.to_vec(),
            arguments: arguments.to_vec(),
        }
    }

    fn new_skip() -> Self {
        Self::new(
            "skip",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new("if", Type::non_null_named("Boolean"))],
        )
        .description("Directs the executor to skip this field or fragment when the `if` argument is true.")
    }

    fn new_include() -> Self {
        Self::new(
            "include",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new("if", Type::non_null_named("Boolean"))],
        )
        .description("Directs the executor to include this field or fragment only when the `if` argument is true.")
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn argument_by_name(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

impl<Ctx> SchemaType<Ctx> {
    /// Starts building a schema whose query root is the object type named
    /// `query_type_name`.
    pub fn builder(query_type_name: impl Into<ArcStr>) -> SchemaBuilder<Ctx> {
        SchemaBuilder::new(query_type_name)
    }

    /// Description of the schema, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        self.description.as_ref()
    }

    /// Looks up a type by its name.
    pub fn concrete_type_by_name(&self, name: &str) -> Option<&MetaType<Ctx>> {
        self.types.get(name)
    }

    /// All the types, in registration order, built-in scalars first.
    pub fn concrete_type_list(&self) -> impl Iterator<Item = &MetaType<Ctx>> {
        self.types.values()
    }

    /// Name of the query root type.
    pub fn query_type_name(&self) -> &ArcStr {
        &self.query_type_name
    }

    /// Root type of the given operation kind, if the schema has one.
    pub fn root_type(&self, operation_type: OperationType) -> Option<&MetaType<Ctx>> {
        let name = match operation_type {
            OperationType::Query => Some(&self.query_type_name),
            OperationType::Mutation => self.mutation_type_name.as_ref(),
            OperationType::Subscription => self.subscription_type_name.as_ref(),
        }?;
        self.concrete_type_by_name(name)
    }

    /// All the declared directives.
    pub fn directive_list(&self) -> impl Iterator<Item = &DirectiveType> {
        self.directives.values()
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    /// Object types an abstract type may resolve to.
    ///
    /// Empty for non-abstract types.
    #[auto_enum(Iterator)]
    pub fn possible_types<'s>(
        &'s self,
        t: &'s MetaType<Ctx>,
    ) -> impl Iterator<Item = &'s MetaType<Ctx>> + 's {
        match t {
            MetaType::Union(UnionMeta { of_type_names, .. }) => of_type_names
                .iter()
                .filter_map(|n| self.concrete_type_by_name(n)),
            MetaType::Interface(InterfaceMeta { name, .. }) => {
                self.types.values().filter(move |t| match t {
                    MetaType::Object(ObjectMeta {
                        interface_names, ..
                    }) => interface_names.iter().any(|i| i == name),
                    _ => false,
                })
            }
            _ => std::iter::empty(),
        }
    }

    /// Whether `possible_type` is one of the types `abstract_type` may
    /// resolve to.
    pub fn is_possible_type(
        &self,
        abstract_type: &MetaType<Ctx>,
        possible_type: &MetaType<Ctx>,
    ) -> bool {
        self.possible_types(abstract_type)
            .any(|t| t.name() == possible_type.name())
    }

    /// Whether a value of one composite type may also be a value of the
    /// other one.
    pub fn type_overlap(&self, t1: &MetaType<Ctx>, t2: &MetaType<Ctx>) -> bool {
        if t1.name() == t2.name() {
            return true;
        }

        match (t1.is_abstract(), t2.is_abstract()) {
            (true, true) => self
                .possible_types(t1)
                .any(|t| self.is_possible_type(t2, t)),
            (true, false) => self.is_possible_type(t1, t2),
            (false, true) => self.is_possible_type(t2, t1),
            (false, false) => false,
        }
    }

    /// Whether a value of `sub_type` is acceptable where `super_type` is
    /// expected.
    pub fn is_subtype(&self, sub_type: &Type, super_type: &Type) -> bool {
        use Type::{List, Named, NonNull};

        if super_type == sub_type {
            return true;
        }

        match (super_type, sub_type) {
            (NonNull(super_inner), NonNull(sub_inner)) => self.is_subtype(sub_inner, super_inner),
            (NonNull(_), _) => false,
            (_, NonNull(sub_inner)) => self.is_subtype(sub_inner, super_type),
            (Named(super_name), Named(sub_name)) => self.is_named_subtype(sub_name, super_name),
            (List(super_inner), List(sub_inner)) => self.is_subtype(sub_inner, super_inner),
            _ => false,
        }
    }

    /// Whether the type named `sub_type_name` is, or is a possible type of,
    /// the type named `super_type_name`.
    pub fn is_named_subtype(&self, sub_type_name: &str, super_type_name: &str) -> bool {
        if sub_type_name == super_type_name {
            true
        } else if let (Some(sub_type), Some(super_type)) = (
            self.concrete_type_by_name(sub_type_name),
            self.concrete_type_by_name(super_type_name),
        ) {
            super_type.is_abstract() && self.is_possible_type(super_type, sub_type)
        } else {
            false
        }
    }
}

/// Reason a [`SchemaBuilder`] refused to build a schema.
#[derive(Clone, Debug, derive_more::Display, derive_more::Error, Eq, PartialEq)]
pub enum SchemaError {
    /// Two types, fields, arguments or enum values share a name.
    #[display("\"{name}\" is defined more than once in {owner}")]
    Duplicate {
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
        /// Where the collision happened.
        owner: String,
    },

    /// A name isn't a valid GraphQL name, or uses the reserved `__` prefix.
    #[display("\"{name}\" is not a valid name in {owner}")]
    InvalidName {
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
        /// Where the name is declared.
        owner: String,
    },

    /// A type reference names no registered type.
    #[display("{owner} references unknown type \"{name}\"")]
    UnknownType {
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
        /// Where the reference is declared.
        owner: String,
    },

    /// An input position references an output-only type.
    #[display("{owner} must be of an input type, but \"{name}\" is not")]
    NotInputType {
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
        /// Where the reference is declared.
        owner: String,
    },

    /// An output position references an input object type.
    #[display("{owner} must be of an output type, but \"{name}\" is not")]
    NotOutputType {
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
        /// Where the reference is declared.
        owner: String,
    },

    /// An object claims to implement a type which is not an interface.
    #[display("Type \"{object}\" cannot implement non-interface type \"{name}\"")]
    NotInterface {
        #[expect(missing_docs, reason = "self-explanatory")]
        object: ArcStr,
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
    },

    /// A union lists a member which is not an object type.
    #[display("Union \"{union}\" can only include object types, but \"{name}\" is not one")]
    NotObject {
        #[expect(missing_docs, reason = "self-explanatory")]
        union: ArcStr,
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
    },

    /// A root operation type is missing or isn't an object type.
    #[display("Root {operation} type \"{name}\" must be a registered object type")]
    InvalidRootType {
        #[expect(missing_docs, reason = "self-explanatory")]
        operation: OperationType,
        #[expect(missing_docs, reason = "self-explanatory")]
        name: ArcStr,
    },
}

/// Assembles and checks a [`SchemaType`].
///
/// ```rust
/// # use juniper_dynamic::{Field, ObjectMeta, SchemaType, Type};
/// let schema = SchemaType::<()>::builder("Query")
///     .register(ObjectMeta::new("Query").field(Field::new("hello", Type::named("String"))))
///     .build()
///     .unwrap();
/// assert!(schema.concrete_type_by_name("Query").is_some());
/// ```
#[derive(Debug)]
pub struct SchemaBuilder<Ctx> {
    description: Option<ArcStr>,
    types: Vec<MetaType<Ctx>>,
    query_type_name: ArcStr,
    mutation_type_name: Option<ArcStr>,
    subscription_type_name: Option<ArcStr>,
    directives: Vec<DirectiveType>,
}

impl<Ctx> SchemaBuilder<Ctx> {
    /// Starts a schema whose query root is the object named
    /// `query_type_name`.
    pub fn new(query_type_name: impl Into<ArcStr>) -> Self {
        Self {
            description: None,
            types: vec![],
            query_type_name: query_type_name.into(),
            mutation_type_name: None,
            subscription_type_name: None,
            directives: vec![],
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the mutation root type name.
    #[must_use]
    pub fn mutation(mut self, name: impl Into<ArcStr>) -> Self {
        self.mutation_type_name = Some(name.into());
        self
    }

    /// Sets the subscription root type name.
    #[must_use]
    pub fn subscription(mut self, name: impl Into<ArcStr>) -> Self {
        self.subscription_type_name = Some(name.into());
        self
    }

    /// Registers a type.
    #[must_use]
    pub fn register(mut self, meta: impl Into<MetaType<Ctx>>) -> Self {
        self.types.push(meta.into());
        self
    }

    /// Declares a directive in addition to the built-in `@skip` and
    /// `@include`.
    #[must_use]
    pub fn directive(mut self, directive: DirectiveType) -> Self {
        self.directives.push(directive);
        self
    }

    /// Checks the registered types and assembles the schema.
    pub fn build(self) -> Result<SchemaType<Ctx>, SchemaError> {
        let mut types = FnvIndexMap::default();
        let builtins = scalars::builtin_scalars().map(MetaType::Scalar);
        for meta in builtins.into_iter().chain(self.types) {
            let name = meta.name().clone();
            check_name(&name, "schema")?;
            if types.insert(name.clone(), meta).is_some() {
                return Err(SchemaError::Duplicate {
                    name,
                    owner: "schema".into(),
                });
            }
        }

        let mut directives = FnvIndexMap::default();
        for directive in [DirectiveType::new_skip(), DirectiveType::new_include()]
            .into_iter()
            .chain(self.directives)
        {
            let name = directive.name.clone();
            check_name(&name, "directives")?;
            let owner = format!("directive \"@{name}\"");
            check_arguments(&types, &directive.arguments, &owner)?;
            if directives.insert(name.clone(), directive).is_some() {
                return Err(SchemaError::Duplicate {
                    name,
                    owner: "directives".into(),
                });
            }
        }

        for meta in types.values() {
            check_type(&types, meta)?;
        }

        let roots = [
            (OperationType::Query, Some(&self.query_type_name)),
            (OperationType::Mutation, self.mutation_type_name.as_ref()),
            (OperationType::Subscription, self.subscription_type_name.as_ref()),
        ];
        for (operation, name) in roots {
            if let Some(name) = name {
                if !matches!(types.get(name), Some(MetaType::Object(_))) {
                    return Err(SchemaError::InvalidRootType {
                        operation,
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(SchemaType {
            description: self.description,
            types,
            query_type_name: self.query_type_name,
            mutation_type_name: self.mutation_type_name,
            subscription_type_name: self.subscription_type_name,
            directives,
        })
    }
}

fn check_name(name: &ArcStr, owner: impl fmt::Display) -> Result<(), SchemaError> {
    if Name::is_valid(name) && !name.starts_with("__") {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            name: name.clone(),
            owner: owner.to_string(),
        })
    }
}

fn check_unique<'n>(
    names: impl IntoIterator<Item = &'n ArcStr>,
    owner: &str,
) -> Result<(), SchemaError> {
    let mut seen = Vec::new();
    for name in names {
        check_name(name, owner)?;
        if seen.contains(&name) {
            return Err(SchemaError::Duplicate {
                name: name.clone(),
                owner: owner.into(),
            });
        }
        seen.push(name);
    }
    Ok(())
}

fn check_type_ref<Ctx>(
    types: &FnvIndexMap<ArcStr, MetaType<Ctx>>,
    ty: &Type,
    owner: &str,
    input: bool,
) -> Result<(), SchemaError> {
    let name = ty.innermost_name();
    let Some(meta) = types.get(name) else {
        return Err(SchemaError::UnknownType {
            name: name.clone(),
            owner: owner.into(),
        });
    };
    match (input, meta.is_input(), meta.is_output()) {
        (true, false, _) => Err(SchemaError::NotInputType {
            name: name.clone(),
            owner: owner.into(),
        }),
        (false, _, false) => Err(SchemaError::NotOutputType {
            name: name.clone(),
            owner: owner.into(),
        }),
        _ => Ok(()),
    }
}

fn check_arguments<Ctx>(
    types: &FnvIndexMap<ArcStr, MetaType<Ctx>>,
    arguments: &[Argument],
    owner: &str,
) -> Result<(), SchemaError> {
    check_unique(arguments.iter().map(|a| &a.name), owner)?;
    for arg in arguments {
        let arg_owner = format!("{owner} argument \"{}\"", arg.name);
        check_type_ref(types, &arg.arg_type, &arg_owner, true)?;
    }
    Ok(())
}

fn check_fields<Ctx>(
    types: &FnvIndexMap<ArcStr, MetaType<Ctx>>,
    type_name: &ArcStr,
    fields: &[Field<Ctx>],
) -> Result<(), SchemaError> {
    let owner = format!("type \"{type_name}\"");
    check_unique(fields.iter().map(|f| &f.name), &owner)?;
    for field in fields {
        let field_owner = format!("field \"{type_name}.{}\"", field.name);
        check_type_ref(types, &field.field_type, &field_owner, false)?;
        check_arguments(types, &field.arguments, &field_owner)?;
    }
    Ok(())
}

fn check_type<Ctx>(
    types: &FnvIndexMap<ArcStr, MetaType<Ctx>>,
    meta: &MetaType<Ctx>,
) -> Result<(), SchemaError> {
    match meta {
        MetaType::Scalar(_) => Ok(()),
        MetaType::Enum(EnumMeta { name, values, .. }) => {
            let owner = format!("enum \"{name}\"");
            check_unique(values.iter().map(|v| &v.name), &owner)
        }
        MetaType::Object(ObjectMeta {
            name,
            fields,
            interface_names,
            ..
        }) => {
            check_fields(types, name, fields)?;
            for iface in interface_names {
                if !matches!(types.get(iface), Some(MetaType::Interface(_))) {
                    return Err(SchemaError::NotInterface {
                        object: name.clone(),
                        name: iface.clone(),
                    });
                }
            }
            Ok(())
        }
        MetaType::Interface(InterfaceMeta { name, fields, .. }) => {
            check_fields(types, name, fields)
        }
        MetaType::Union(UnionMeta {
            name,
            of_type_names,
            ..
        }) => {
            for member in of_type_names {
                if !matches!(types.get(member), Some(MetaType::Object(_))) {
                    return Err(SchemaError::NotObject {
                        union: name.clone(),
                        name: member.clone(),
                    });
                }
            }
            Ok(())
        }
        MetaType::InputObject(InputObjectMeta {
            name, input_fields, ..
        }) => check_arguments(types, input_fields, &format!("input object \"{name}\"")),
    }
}
