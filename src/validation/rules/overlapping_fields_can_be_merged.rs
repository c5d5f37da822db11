use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::{
    ast::{Arguments, Definition, Document, Field, Fragment, InlineFragment, Selection, Type},
    parser::Spanning,
    schema::{meta::MetaType, model::SchemaType},
    validation::{ValidatorContext, Visitor},
};

pub struct OverlappingFieldsCanBeMerged<'a> {
    fragments: HashMap<&'a str, &'a Fragment<'a>>,
    in_inline_fragment: bool,
}

pub fn factory<'a>() -> OverlappingFieldsCanBeMerged<'a> {
    OverlappingFieldsCanBeMerged {
        fragments: HashMap::new(),
        in_inline_fragment: false,
    }
}

/// Field selected under some response key, along with where it came from.
struct Selected<'a> {
    /// Type the field is selected on, if known.
    parent: Option<&'a str>,
    field: &'a Spanning<Field<'a>>,
    /// Which fragment spread of the checked selection set brought it in.
    spread: Option<usize>,
    /// Which of the compared parent fields it's a subfield of.
    origin: usize,
}

/// Fields of one or more selection sets grouped by response key.
#[derive(Default)]
struct Collection<'a> {
    by_key: IndexMap<&'a str, Vec<Selected<'a>>>,
    visited: HashSet<&'a str>,
    spreads: usize,
}

impl<'a, Ctx> Visitor<'a, Ctx> for OverlappingFieldsCanBeMerged<'a> {
    fn enter_document(&mut self, _: &mut ValidatorContext<'a, Ctx>, doc: &'a Document<'a>) {
        self.fragments = doc
            .iter()
            .filter_map(|def| match def {
                Definition::Fragment(f) => Some((f.item.name.item, &f.item)),
                Definition::Operation(_) => None,
            })
            .collect();
    }

    fn enter_inline_fragment(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<InlineFragment<'a>>,
    ) {
        self.in_inline_fragment = true;
    }

    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        set: &'a [Selection<'a>],
    ) {
        // Inline fragment contents are checked as part of the enclosing set.
        if std::mem::take(&mut self.in_inline_fragment) {
            return;
        }

        let parent = ctx.parent_type().map(|t| t.name().as_str());
        let mut collected = Collection::default();
        self.collect(parent, set, None, 0, &mut collected);

        for (key, fields) in &collected.by_key {
            for (i, a) in fields.iter().enumerate() {
                for b in &fields[i + 1..] {
                    // Fragments get checked on their own.
                    if a.spread.is_some() && a.spread == b.spread {
                        continue;
                    }
                    if let Some(reason) = self.conflict(ctx.schema, a, b, false) {
                        ctx.report_error(
                            &error_message(key, &reason),
                            &[a.field.span.start, b.field.span.start],
                        );
                    }
                }
            }
        }
    }
}

impl<'a> OverlappingFieldsCanBeMerged<'a> {
    /// Gathers the fields of `set` by response key, looking into fragments.
    fn collect(
        &self,
        parent: Option<&'a str>,
        set: &'a [Selection<'a>],
        spread: Option<usize>,
        origin: usize,
        out: &mut Collection<'a>,
    ) {
        for selection in set {
            match selection {
                Selection::Field(field) => {
                    out.by_key
                        .entry(field.item.response_key())
                        .or_default()
                        .push(Selected {
                            parent,
                            field,
                            spread,
                            origin,
                        });
                }
                Selection::InlineFragment(frag) => {
                    let parent = frag
                        .item
                        .type_condition
                        .as_ref()
                        .map_or(parent, |t| Some(t.item));
                    self.collect(parent, &frag.item.selection_set, spread, origin, out);
                }
                Selection::FragmentSpread(s) => {
                    let name = s.item.name.item;
                    let Some(&frag) = self.fragments.get(name) else {
                        continue;
                    };
                    if !out.visited.insert(name) {
                        continue;
                    }
                    let spread = spread.or_else(|| {
                        out.spreads += 1;
                        Some(out.spreads)
                    });
                    let parent = Some(frag.type_condition.item);
                    self.collect(parent, &frag.selection_set, spread, origin, out);
                }
            }
        }
    }

    /// Why `a` and `b` can't share a response key, if they can't.
    ///
    /// Fields selected on two different object types never apply to the
    /// same value, so only the shape of their results has to agree.
    fn conflict<Ctx>(
        &self,
        schema: &'a SchemaType<Ctx>,
        a: &Selected<'a>,
        b: &Selected<'a>,
        exclusive: bool,
    ) -> Option<String> {
        let ty_a = field_type(schema, a);
        let ty_b = field_type(schema, b);

        let exclusive = exclusive
            || (a.parent != b.parent && is_object(schema, a.parent) && is_object(schema, b.parent));

        if !exclusive {
            let (name_a, name_b) = (a.field.item.name.item, b.field.item.name.item);
            if name_a != name_b {
                return Some(format!("{name_a} and {name_b} are different fields"));
            }
            if !same_arguments(a.field.item.arguments.as_ref(), b.field.item.arguments.as_ref()) {
                return Some("they have differing arguments".into());
            }
        }

        match (ty_a, ty_b) {
            (Some(ty_a), Some(ty_b)) if shapes_differ(schema, ty_a, ty_b) => {
                return Some(format!("they return conflicting types {ty_a} and {ty_b}"));
            }
            _ => {}
        }

        let (Some(set_a), Some(set_b)) = (&a.field.item.selection_set, &b.field.item.selection_set)
        else {
            return None;
        };
        let mut subfields = Collection::default();
        let parent_a = ty_a.map(|t| t.innermost_name().as_str());
        let parent_b = ty_b.map(|t| t.innermost_name().as_str());
        self.collect(parent_a, set_a, None, 0, &mut subfields);
        subfields.visited.clear();
        self.collect(parent_b, set_b, None, 1, &mut subfields);

        let mut reasons = Vec::new();
        for (key, fields) in &subfields.by_key {
            for l in fields.iter().filter(|f| f.origin == 0) {
                for r in fields.iter().filter(|f| f.origin == 1) {
                    if let Some(reason) = self.conflict(schema, l, r, exclusive) {
                        reasons.push(format!("subfields \"{key}\" conflict because {reason}"));
                    }
                }
            }
        }
        (!reasons.is_empty()).then(|| reasons.join(" and "))
    }
}

fn field_type<'a, Ctx>(schema: &'a SchemaType<Ctx>, selected: &Selected<'a>) -> Option<&'a Type> {
    schema
        .concrete_type_by_name(selected.parent?)?
        .field_by_name(selected.field.item.name.item)
        .map(|f| &f.field_type)
}

fn is_object<Ctx>(schema: &SchemaType<Ctx>, name: Option<&str>) -> bool {
    name.and_then(|n| schema.concrete_type_by_name(n))
        .is_some_and(|t| matches!(t, MetaType::Object(_)))
}

fn same_arguments(
    a: Option<&Spanning<Arguments<'_>>>,
    b: Option<&Spanning<Arguments<'_>>>,
) -> bool {
    let (a, b) = (a.map(|a| &a.item.items[..]), b.map(|b| &b.item.items[..]));
    let (a, b) = (a.unwrap_or_default(), b.unwrap_or_default());
    a.len() == b.len()
        && a.iter().all(|(name, value)| {
            b.iter().any(|(other_name, other_value)| {
                name.item == other_name.item
                    && value.item.to_string() == other_value.item.to_string()
            })
        })
}

/// Whether values of the two types can't be merged into one response entry.
///
/// Composite types agree as long as the list and non-null wrappers do, their
/// subfields are compared separately.
fn shapes_differ<Ctx>(schema: &SchemaType<Ctx>, a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::NonNull(a), Type::NonNull(b)) | (Type::List(a), Type::List(b)) => {
            shapes_differ(schema, a, b)
        }
        (Type::Named(a), Type::Named(b)) => {
            let is_leaf = |n: &str| schema.concrete_type_by_name(n).is_some_and(MetaType::is_leaf);
            a != b && (is_leaf(a.as_str()) || is_leaf(b.as_str()))
        }
        _ => true,
    }
}

fn error_message(response_key: &str, reason: &str) -> String {
    format!(
        "Fields \"{response_key}\" conflict because {reason}. \
         Use different aliases on the fields to fetch both if this was intentional",
    )
}
