//! The transmutation engine: master text in, derived text out.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use dtgen_model::{
    Field, FieldSet, GenError, Result, SubstitutionScope, TokenKind, TransmutationSpec,
    TypeDescriptor,
};

use crate::base_class::strip_extends;
use crate::rules::{Rule, RuleSet};
use crate::specialize::{
    DirectiveAction, GET_ELEMENT_WITH_CAST, RuleTable, SpecializationRules, has_marker,
    insert_cast, uncomment, value_equality,
};

/// Applies [`TransmutationSpec`]s using a fixed set of specialization tables.
#[derive(Debug, Clone, Default)]
pub struct Transmuter {
    rules: SpecializationRules,
}

impl Transmuter {
    pub fn new(rules: SpecializationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SpecializationRules {
        &self.rules
    }

    /// Derive the target text from the master text.
    ///
    /// # Errors
    ///
    /// `MissingToken` when a required default token (or the default class
    /// identifier) is absent from the master; `ConflictingTokens` when two
    /// default tokens are equal but map to different target values.
    pub fn transmutate(&self, spec: &TransmutationSpec<'_>) -> Result<String> {
        check_tokens(spec)?;

        let tables = self.rules.active(spec.flags);
        let shaped = apply_directives(spec.master, &tables);

        let idioms: Vec<Rule> = tables
            .iter()
            .flat_map(|table| table.idioms.iter())
            .map(|idiom| idiom.render(spec.default, spec.target))
            .collect();

        let mut text = match spec.options.scope {
            SubstitutionScope::Global => {
                let rules = build_rules(spec, FieldSet::all(), &idioms)?;
                let (text, hits) = rules.apply_counting(&shaped);
                trace!(
                    target_class = spec.target_class,
                    substitutions = hits.iter().sum::<usize>(),
                    "global substitution"
                );
                text
            }
            SubstitutionScope::Marked => substitute_marked(spec, &shaped, &idioms)?,
        };

        if let Some(cast) = spec.target.cast_prefix() {
            text = map_lines(&text, |line| {
                if has_marker(line, GET_ELEMENT_WITH_CAST) {
                    insert_cast(line, spec.target.accessor(), cast)
                } else {
                    line.to_string()
                }
            });
        }

        if spec.flags.strip_base_class {
            text = strip_extends(&text, spec.target_class);
        }

        if let Some(header) = &spec.options.header {
            text = insert_header(&text, header);
        }

        debug!(
            default_class = spec.default_class,
            target_class = spec.target_class,
            bytes = text.len(),
            "transmutation complete"
        );
        Ok(text)
    }
}

/// Transmutate with the built-in specialization tables.
pub fn transmutate(spec: &TransmutationSpec<'_>) -> Result<String> {
    Transmuter::default().transmutate(spec)
}

fn check_tokens(spec: &TransmutationSpec<'_>) -> Result<()> {
    if !spec.master.contains(spec.default_class) {
        return Err(GenError::missing_token(
            spec.target_class,
            TokenKind::ClassName,
            spec.default_class,
        ));
    }
    for field in spec.options.required.iter() {
        let token = spec.default.get(field);
        let present = match spec.options.scope {
            SubstitutionScope::Global => spec.master.contains(token),
            SubstitutionScope::Marked => spec
                .master
                .lines()
                .any(|line| has_marker(line, field.marker()) && line.contains(token)),
        };
        if !present {
            return Err(GenError::missing_token(
                spec.target_class,
                TokenKind::Field(field),
                token,
            ));
        }
    }
    Ok(())
}

fn build_rules(spec: &TransmutationSpec<'_>, fields: FieldSet, idioms: &[Rule]) -> Result<RuleSet> {
    let mut rules = Vec::with_capacity(1 + fields.len() + idioms.len());
    rules.push(Rule::new(spec.default_class, spec.target_class));
    rules.extend(idioms.iter().cloned());
    rules.extend(fields.iter().map(|field| field_rule(spec.default, spec.target, field)));
    RuleSet::new(rules)
}

fn field_rule(default: &TypeDescriptor, target: &TypeDescriptor, field: Field) -> Rule {
    Rule::new(default.get(field), target.get(field))
}

fn substitute_marked(spec: &TransmutationSpec<'_>, text: &str, idioms: &[Rule]) -> Result<String> {
    let mut cache: HashMap<u8, RuleSet> = HashMap::new();
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let fields: FieldSet = Field::ALL
            .into_iter()
            .filter(|field| has_marker(line, field.marker()))
            .collect();
        let rules = match cache.entry(fields.bits()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(build_rules(spec, fields, idioms)?),
        };
        out.push_str(&rules.apply(line));
    }
    Ok(out)
}

fn apply_directives(master: &str, tables: &[&RuleTable]) -> String {
    if tables.is_empty() {
        return master.to_string();
    }
    let mut out = String::with_capacity(master.len());
    for line in master.split_inclusive('\n') {
        let directive = tables.iter().find_map(|table| table.directive_for(line));
        match directive.map(|directive| directive.action) {
            Some(DirectiveAction::Omit) => {}
            Some(DirectiveAction::Uncomment) => out.push_str(&uncomment(line)),
            Some(DirectiveAction::ValueEquality) => out.push_str(&value_equality(line)),
            None => out.push_str(line),
        }
    }
    out
}

fn map_lines(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        out.push_str(&f(line));
    }
    out
}

fn insert_header(text: &str, header: &str) -> String {
    let comment = format!("// {header}\n\n");
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("package ") {
            return format!("{}{comment}{}", &text[..offset], &text[offset..]);
        }
        offset += line.len();
    }
    format!("{comment}{text}")
}

#[cfg(test)]
mod tests {
    use dtgen_model::{SpecializationFlags, TransmuteOptions};

    use super::*;

    fn double() -> TypeDescriptor {
        TypeDescriptor::new(
            "FLOAT64",
            "Double",
            "double",
            "getElementDoubleAbs",
            "DTypeUtils.toReal(obj)",
            "%.8g",
            "NaN",
        )
        .unwrap()
    }

    fn float() -> TypeDescriptor {
        TypeDescriptor::new(
            "FLOAT32",
            "Float",
            "float",
            "getElementDoubleAbs",
            "(float) DTypeUtils.toReal(obj)",
            "%.8g",
            "NaN",
        )
        .unwrap()
    }

    #[test]
    fn header_goes_before_package() {
        assert_eq!(
            insert_header("/* c */\n\npackage a.b;\n", "generated"),
            "/* c */\n\n// generated\n\npackage a.b;\n"
        );
        assert_eq!(insert_header("class A {}", "g"), "// g\n\nclass A {}");
    }

    #[test]
    fn marked_scope_only_touches_marked_lines() {
        let master = "class DoubleDatasetImpl {\n\
                      \tdouble[] data; // PRIM_TYPE\n\
                      \tdouble residual(double x) { return x; }\n\
                      \tint getDType() { return FLOAT64; } // DATA_TYPE\n\
                      \tDouble box = DTypeUtils.toReal(obj); // CLASS_TYPE // FROM_OBJECT\n\
                      \tString fmt = \"%.8g\"; // FORMAT_STRING\n\
                      \tdouble nan = Double.NaN; // PRIM_TYPE // DEFAULT_VAL\n\
                      \tv = ds.getElementDoubleAbs(i); // GET_ELEMENT\n\
                      }\n";
        let options = TransmuteOptions::new().with_scope(SubstitutionScope::Marked);
        let spec = TransmutationSpec {
            master,
            default_class: "DoubleDatasetImpl",
            default: &double(),
            target_class: "FloatDatasetImpl",
            target: &float(),
            flags: SpecializationFlags::none(),
            options: &options,
        };
        let text = transmutate(&spec).unwrap();
        assert!(text.contains("\tfloat[] data; // PRIM_TYPE\n"));
        assert!(text.contains("\tdouble residual(double x) { return x; }\n"));
        assert!(text.contains("return FLOAT32; } // DATA_TYPE"));
        assert!(text.contains("\tFloat box = (float) DTypeUtils.toReal(obj);"));
        assert!(text.contains("\tfloat nan = Double.NaN; // PRIM_TYPE // DEFAULT_VAL\n"));
        assert!(text.starts_with("class FloatDatasetImpl {"));
    }

    #[test]
    fn marked_scope_requires_token_on_marked_line() {
        let master = "class DoubleDatasetImpl {\n\
                      \tdouble[] data;\n\
                      }\n";
        let options = TransmuteOptions::new()
            .with_scope(SubstitutionScope::Marked)
            .with_required(FieldSet::only(Field::PrimitiveName));
        let spec = TransmutationSpec {
            master,
            default_class: "DoubleDatasetImpl",
            default: &double(),
            target_class: "FloatDatasetImpl",
            target: &float(),
            flags: SpecializationFlags::none(),
            options: &options,
        };
        let err = transmutate(&spec).unwrap_err();
        assert!(matches!(err, GenError::MissingToken { ref token, .. } if token == "double"));
    }
}
