//! Configuration options for source generation.

use serde::{Deserialize, Serialize};

use crate::descriptor::{ElementKind, FieldSet};

/// Suffix of implementation-class master files.
pub const IMPL_SUFFIX: &str = "Impl";

/// Structural edits applied on top of token substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecializationFlags {
    /// Remove the `extends` clause of the generated class declaration.
    pub strip_base_class: bool,
    /// Rewrite numeric idioms for boolean elements.
    pub boolean: bool,
    /// Rewrite numeric idioms for reference (string/object) elements.
    pub string: bool,
    /// Drop NaN handling for integer elements.
    pub integer: bool,
}

impl SpecializationFlags {
    pub fn none() -> Self {
        Self::default()
    }

    /// Flags implied by an element kind.
    pub fn for_kind(kind: ElementKind) -> Self {
        Self {
            strip_base_class: false,
            boolean: kind == ElementKind::Boolean,
            string: kind == ElementKind::Object,
            integer: kind == ElementKind::Integer,
        }
    }

    #[must_use]
    pub fn with_strip_base_class(mut self, strip: bool) -> Self {
        self.strip_base_class = strip;
        self
    }
}

/// Where descriptor tokens are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionScope {
    /// Every occurrence anywhere in the text.
    #[default]
    Global,
    /// Only on lines carrying the field's line marker.
    Marked,
}

/// Options shared by every transmutation of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmuteOptions {
    pub scope: SubstitutionScope,
    /// Fields whose default token must appear in the master text.
    pub required: FieldSet,
    /// Comment inserted before the `package` line, without the `//` prefix.
    pub header: Option<String>,
}

impl Default for TransmuteOptions {
    fn default() -> Self {
        Self {
            scope: SubstitutionScope::Global,
            required: FieldSet::all(),
            header: None,
        }
    }
}

impl TransmuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scope(mut self, scope: SubstitutionScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: FieldSet) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }
}

/// Whether the master is an implementation class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassMode {
    /// `FooImpl.java`; generated classes carry the `Impl` suffix.
    Implementation,
    /// Any other file name; no suffix, and `Base` is dropped from class names.
    Interface,
}

impl ClassMode {
    /// Select the mode from a master file name.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.ends_with("Impl.java") {
            ClassMode::Implementation
        } else {
            ClassMode::Interface
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ClassMode::Implementation => IMPL_SUFFIX,
            ClassMode::Interface => "",
        }
    }

    /// Class identifier as it appears in source, e.g. `FloatDatasetImpl`.
    pub fn class_identifier(self, class_name: &str) -> String {
        let base = match self {
            ClassMode::Implementation => class_name,
            ClassMode::Interface => class_name.strip_suffix("Base").unwrap_or(class_name),
        };
        format!("{base}{}", self.suffix())
    }

    pub fn file_name(self, class_name: &str) -> String {
        format!("{}.java", self.class_identifier(class_name))
    }
}

/// What the driver does when one target fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing target.
    #[default]
    FailFast,
    /// Generate every target that succeeds and report the failures.
    KeepGoing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_mode_from_file_name() {
        assert_eq!(
            ClassMode::from_file_name("DoubleDatasetImpl.java"),
            ClassMode::Implementation
        );
        assert_eq!(
            ClassMode::from_file_name("DoubleDataset.java"),
            ClassMode::Interface
        );
        assert_eq!(
            ClassMode::from_file_name("DoubleDatasetImpl.txt"),
            ClassMode::Interface
        );
    }

    #[test]
    fn interface_mode_drops_base() {
        assert_eq!(
            ClassMode::Interface.class_identifier("BooleanDatasetBase"),
            "BooleanDataset"
        );
        assert_eq!(
            ClassMode::Implementation.class_identifier("BooleanDatasetBase"),
            "BooleanDatasetBaseImpl"
        );
        assert_eq!(
            ClassMode::Implementation.file_name("FloatDataset"),
            "FloatDatasetImpl.java"
        );
    }

    #[test]
    fn flags_follow_element_kind() {
        let flags = SpecializationFlags::for_kind(ElementKind::Boolean);
        assert!(flags.boolean && !flags.string && !flags.integer);
        assert_eq!(
            SpecializationFlags::for_kind(ElementKind::Real),
            SpecializationFlags::none()
        );
    }
}
