use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::descriptor::{ElementKind, TypeDescriptor};
use crate::error::{GenError, Result};

/// A registered element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Class name without mode suffix, e.g. `FloatDataset`.
    pub class_name: String,
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
    #[serde(default)]
    pub kind: ElementKind,
    /// Drop the `extends` clause when generating this type.
    #[serde(default)]
    pub strip_base_class: bool,
}

impl TableEntry {
    pub fn new(
        class_name: impl Into<String>,
        descriptor: TypeDescriptor,
        kind: ElementKind,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            descriptor,
            kind,
            strip_base_class: false,
        }
    }

    #[must_use]
    pub fn with_strip_base_class(mut self, strip: bool) -> Self {
        self.strip_base_class = strip;
        self
    }
}

/// Immutable catalog of element types with one designated default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorTable {
    default_index: usize,
    entries: Vec<TableEntry>,
}

impl DescriptorTable {
    /// Build a table; class names must be unique and the default registered.
    pub fn new(default_class: impl Into<String>, entries: Vec<TableEntry>) -> Result<Self> {
        let default_class = default_class.into();
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.class_name.as_str()) {
                return Err(GenError::DuplicateType {
                    class_name: entry.class_name.clone(),
                });
            }
        }
        let default_index = entries
            .iter()
            .position(|entry| entry.class_name == default_class)
            .ok_or_else(|| GenError::unknown_type(&default_class))?;
        Ok(Self {
            default_index,
            entries,
        })
    }

    pub fn default_class(&self) -> &str {
        &self.default_entry().class_name
    }

    pub fn default_entry(&self) -> &TableEntry {
        &self.entries[self.default_index]
    }

    pub fn default_descriptor(&self) -> &TypeDescriptor {
        &self.default_entry().descriptor
    }

    pub fn entry(&self, class_name: &str) -> Result<&TableEntry> {
        self.entries
            .iter()
            .find(|entry| entry.class_name == class_name)
            .ok_or_else(|| GenError::unknown_type(class_name))
    }

    pub fn lookup(&self, class_name: &str) -> Result<&TypeDescriptor> {
        self.entry(class_name).map(|entry| &entry.descriptor)
    }

    /// Every entry except the default, in registration order.
    pub fn all_targets(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != self.default_index)
            .map(|(_, entry)| entry)
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
