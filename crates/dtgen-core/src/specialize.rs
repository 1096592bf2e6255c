//! Specialization tables for element types that cannot use numeric idioms.
//!
//! Each table pairs line directives (keyed on a trailing `// MARKER` comment)
//! with idiom rules (literal rewrites that join the substitution pass). The
//! built-in tables cover the markers used by the dataset masters; a catalog can
//! replace any of them.

use serde::{Deserialize, Serialize};

use dtgen_model::{SpecializationFlags, TypeDescriptor};

use crate::rules::Rule;

/// Marker of lines whose accessor result needs the target's cast.
pub const GET_ELEMENT_WITH_CAST: &str = "GET_ELEMENT_WITH_CAST";

/// What a directive does to a matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveAction {
    /// Drop the line.
    Omit,
    /// Remove the leading `//` so the line becomes live code.
    Uncomment,
    /// Rewrite `a != b` as `!a.equals(b)`.
    ValueEquality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDirective {
    /// Marker name without the comment prefix, e.g. `BOOLEAN_USE`.
    pub marker: String,
    pub action: DirectiveAction,
}

impl LineDirective {
    pub fn new(marker: impl Into<String>, action: DirectiveAction) -> Self {
        Self {
            marker: marker.into(),
            action,
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        has_marker(line, &self.marker)
    }
}

/// Idiom rewrite with `{boxed}`, `{primitive}`, `{sentinel}` and `{storage}`
/// placeholders. The matcher is rendered from the default descriptor and the
/// replacement from the target descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomRule {
    pub matcher: String,
    pub replacement: String,
}

impl IdiomRule {
    pub fn new(matcher: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            matcher: matcher.into(),
            replacement: replacement.into(),
        }
    }

    pub fn render(&self, default: &TypeDescriptor, target: &TypeDescriptor) -> Rule {
        Rule::new(
            render_template(&self.matcher, default),
            render_template(&self.replacement, target),
        )
    }
}

fn render_template(template: &str, descriptor: &TypeDescriptor) -> String {
    template
        .replace("{boxed}", descriptor.boxed_name())
        .replace("{primitive}", descriptor.primitive_name())
        .replace("{sentinel}", descriptor.sentinel())
        .replace("{storage}", descriptor.storage_kind())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    #[serde(default)]
    pub directives: Vec<LineDirective>,
    #[serde(default)]
    pub idioms: Vec<IdiomRule>,
}

impl RuleTable {
    pub fn boolean() -> Self {
        Self {
            directives: vec![
                LineDirective::new("BOOLEAN_USE", DirectiveAction::Uncomment),
                LineDirective::new("BOOLEAN_OMIT", DirectiveAction::Omit),
                LineDirective::new("NAN_OMIT", DirectiveAction::Omit),
            ],
            idioms: vec![
                IdiomRule::new("{boxed}.{sentinel}", "false"),
                IdiomRule::new("{boxed}.isNaN(", "java.util.Objects.isNull("),
                IdiomRule::new("{boxed}.isInfinite(", "java.util.Objects.isNull("),
                IdiomRule::new("Math.max(", "Boolean.logicalOr("),
                IdiomRule::new("Math.min(", "Boolean.logicalAnd("),
                IdiomRule::new("Math.abs(", "("),
            ],
        }
    }

    pub fn string() -> Self {
        Self {
            directives: vec![
                LineDirective::new("OBJECT_USE", DirectiveAction::Uncomment),
                LineDirective::new("OBJECT_OMIT", DirectiveAction::Omit),
                LineDirective::new("NAN_OMIT", DirectiveAction::Omit),
                LineDirective::new("OBJECT_UNEQUAL", DirectiveAction::ValueEquality),
            ],
            idioms: vec![
                IdiomRule::new("{boxed}.{sentinel}", "null"),
                IdiomRule::new("{boxed}.isNaN(", "java.util.Objects.isNull("),
                IdiomRule::new("{boxed}.isInfinite(", "java.util.Objects.isNull("),
            ],
        }
    }

    pub fn integer() -> Self {
        Self {
            directives: vec![LineDirective::new("NAN_OMIT", DirectiveAction::Omit)],
            idioms: vec![
                IdiomRule::new("{boxed}.isNaN(", "java.util.Objects.isNull("),
                IdiomRule::new("{boxed}.isInfinite(", "java.util.Objects.isNull("),
            ],
        }
    }

    /// First directive matching the line.
    pub fn directive_for(&self, line: &str) -> Option<&LineDirective> {
        self.directives.iter().find(|directive| directive.matches(line))
    }
}

/// The per-flag rule tables used by a transmuter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationRules {
    #[serde(default = "RuleTable::boolean")]
    pub boolean: RuleTable,
    #[serde(default = "RuleTable::string")]
    pub string: RuleTable,
    #[serde(default = "RuleTable::integer")]
    pub integer: RuleTable,
}

impl Default for SpecializationRules {
    fn default() -> Self {
        Self {
            boolean: RuleTable::boolean(),
            string: RuleTable::string(),
            integer: RuleTable::integer(),
        }
    }
}

impl SpecializationRules {
    /// Tables enabled by the flags, in boolean, string, integer order.
    pub fn active(&self, flags: SpecializationFlags) -> Vec<&RuleTable> {
        let mut tables = Vec::new();
        if flags.boolean {
            tables.push(&self.boolean);
        }
        if flags.string {
            tables.push(&self.string);
        }
        if flags.integer {
            tables.push(&self.integer);
        }
        tables
    }
}

/// True when the line carries `// <marker>`. Markers match as prefixes, so
/// `GET_ELEMENT` also matches `GET_ELEMENT_WITH_CAST`.
pub fn has_marker(line: &str, marker: &str) -> bool {
    let marker = marker.trim_start_matches("//").trim_start();
    line.match_indices("//")
        .any(|(index, _)| line[index + 2..].trim_start().starts_with(marker))
}

/// Strip the comment prefix of a commented-out line, keeping indentation.
pub fn uncomment(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    match body.strip_prefix("//") {
        Some(rest) => format!("{indent}{}", rest.strip_prefix(' ').unwrap_or(rest)),
        None => line.to_string(),
    }
}

/// Rewrite the first `a != b` in the code part of the line as `!a.equals(b)`.
pub fn value_equality(line: &str) -> String {
    let Some(op) = line.find(" != ") else {
        return line.to_string();
    };
    let left_start = operand_start(line, op);
    let right_start = op + 4;
    let right_end = operand_end(line, right_start);
    if left_start == op || right_start == right_end {
        return line.to_string();
    }
    format!(
        "{}!{}.equals({}){}",
        &line[..left_start],
        &line[left_start..op],
        &line[right_start..right_end],
        &line[right_end..]
    )
}

fn is_operand_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn operand_start(line: &str, end: usize) -> usize {
    let mut depth = 0usize;
    let mut start = end;
    for (index, c) in line[..end].char_indices().rev() {
        match c {
            ')' | ']' => depth += 1,
            '(' | '[' if depth == 0 => break,
            '(' | '[' => depth -= 1,
            c if is_operand_char(c) => {}
            _ if depth > 0 => {}
            _ => break,
        }
        start = index;
    }
    start
}

fn operand_end(line: &str, start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, c) in line[start..].char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' if depth == 0 => return start + offset,
            ')' | ']' => depth -= 1,
            c if is_operand_char(c) => {}
            _ if depth > 0 => {}
            _ => return start + offset,
        }
    }
    line.len()
}

/// Insert `cast` before the receiver of the first `.accessor(` call.
///
/// The receiver may be chained or parenthesised; a line whose call has no
/// receiver is returned unchanged.
pub fn insert_cast(line: &str, accessor: &str, cast: &str) -> String {
    let call = format!(".{accessor}(");
    let Some(dot) = line.find(&call) else {
        return line.to_string();
    };
    let receiver = operand_start(line, dot);
    if receiver == dot {
        return line.to_string();
    }
    format!("{}{cast}{}", &line[..receiver], &line[receiver..])
}
