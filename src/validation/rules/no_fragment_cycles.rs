use std::collections::{HashMap, HashSet};

use crate::{
    ast::{Document, Fragment, FragmentSpread},
    parser::Spanning,
    validation::{RuleError, ValidatorContext, Visitor},
};

pub struct NoFragmentCycles<'a> {
    current_fragment: Option<&'a str>,
    spreads: HashMap<&'a str, Vec<Spanning<&'a str>>>,
    fragment_order: Vec<&'a str>,
}

struct CycleDetector<'s, 'a> {
    visited: HashSet<&'a str>,
    spreads: &'s HashMap<&'a str, Vec<Spanning<&'a str>>>,
    path_indices: HashMap<&'a str, usize>,
    errors: Vec<RuleError>,
}

pub fn factory<'a>() -> NoFragmentCycles<'a> {
    NoFragmentCycles {
        current_fragment: None,
        spreads: HashMap::new(),
        fragment_order: Vec::new(),
    }
}

impl<'a, Ctx> Visitor<'a, Ctx> for NoFragmentCycles<'a> {
    fn exit_document(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, _: &'a Document<'a>) {
        let mut detector = CycleDetector {
            visited: HashSet::new(),
            spreads: &self.spreads,
            path_indices: HashMap::new(),
            errors: Vec::new(),
        };

        for &frag in &self.fragment_order {
            if !detector.visited.contains(frag) {
                detector.detect_from(frag, &mut Vec::new());
            }
        }

        ctx.append_errors(detector.errors);
    }

    fn enter_fragment_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        fragment: &'a Spanning<Fragment<'a>>,
    ) {
        let fragment_name = fragment.item.name.item;
        self.current_fragment = Some(fragment_name);
        self.fragment_order.push(fragment_name);
    }

    fn exit_fragment_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        _: &'a Spanning<Fragment<'a>>,
    ) {
        self.current_fragment = None;
    }

    fn enter_fragment_spread(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        spread: &'a Spanning<FragmentSpread<'a>>,
    ) {
        if let Some(current_fragment) = self.current_fragment {
            self.spreads
                .entry(current_fragment)
                .or_default()
                .push(Spanning::new(spread.span, spread.item.name.item));
        }
    }
}

impl<'s, 'a> CycleDetector<'s, 'a> {
    fn detect_from(&mut self, from: &'a str, path: &mut Vec<&'s Spanning<&'a str>>) {
        self.visited.insert(from);

        let spreads = self.spreads;
        let Some(nodes) = spreads.get(from) else {
            return;
        };

        self.path_indices.insert(from, path.len());

        for node in nodes {
            let name = node.item;

            if let Some(&index) = self.path_indices.get(name) {
                let err_pos = path.get(index).copied().unwrap_or(node);
                self.errors
                    .push(RuleError::new(&error_message(name), &[err_pos.span.start]));
            } else if !self.visited.contains(name) {
                path.push(node);
                self.detect_from(name, path);
                path.pop();
            }
        }

        self.path_indices.remove(from);
    }
}

fn error_message(frag_name: &str) -> String {
    format!(r#"Cannot spread fragment "{frag_name}""#)
}
