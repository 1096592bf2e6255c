//! Element type descriptors.
//!
//! A [`TypeDescriptor`] holds the seven literal tokens that identify an element
//! type inside a master source file. Substitution works field by field, so the
//! field set is modelled explicitly as [`Field`] rather than as tuple positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// One of the seven descriptor attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    StorageKind,
    BoxedName,
    PrimitiveName,
    Accessor,
    Conversion,
    FormatSpec,
    Sentinel,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 7] = [
        Field::StorageKind,
        Field::BoxedName,
        Field::PrimitiveName,
        Field::Accessor,
        Field::Conversion,
        Field::FormatSpec,
        Field::Sentinel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::StorageKind => "storage kind",
            Field::BoxedName => "boxed name",
            Field::PrimitiveName => "primitive name",
            Field::Accessor => "accessor",
            Field::Conversion => "conversion",
            Field::FormatSpec => "format spec",
            Field::Sentinel => "sentinel",
        }
    }

    /// Trailing comment marker that scopes this field on a master line.
    pub fn marker(self) -> &'static str {
        match self {
            Field::StorageKind => "// DATA_TYPE",
            Field::BoxedName => "// CLASS_TYPE",
            Field::PrimitiveName => "// PRIM_TYPE",
            Field::Accessor => "// GET_ELEMENT",
            Field::Conversion => "// FROM_OBJECT",
            Field::FormatSpec => "// FORMAT_STRING",
            Field::Sentinel => "// DEFAULT_VAL",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compact set of [`Field`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldSet(u8);

impl FieldSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Field::ALL.into_iter().collect()
    }

    pub fn only(field: Field) -> Self {
        Self(field.bit())
    }

    #[must_use]
    pub fn with(mut self, field: Field) -> Self {
        self.insert(field);
        self
    }

    #[must_use]
    pub fn without(mut self, field: Field) -> Self {
        self.0 &= !field.bit();
        self
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Raw bits, stable for use as a cache key.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |field| self.contains(*field))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

/// Storage family of an element type; decides which specializations apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Floating point; has NaN.
    #[default]
    Real,
    /// Fixed-width integers; no NaN.
    Integer,
    /// Boolean elements; no ordering or arithmetic.
    Boolean,
    /// Reference elements (strings, objects); equality by value.
    Object,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Real => "real",
            ElementKind::Integer => "integer",
            ElementKind::Boolean => "boolean",
            ElementKind::Object => "object",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven literal tokens describing an element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct TypeDescriptor {
    storage_kind: String,
    boxed_name: String,
    primitive_name: String,
    accessor: String,
    conversion: String,
    format_spec: String,
    sentinel: String,
}

impl TypeDescriptor {
    /// Build a descriptor, rejecting empty fields.
    pub fn new(
        storage_kind: impl Into<String>,
        boxed_name: impl Into<String>,
        primitive_name: impl Into<String>,
        accessor: impl Into<String>,
        conversion: impl Into<String>,
        format_spec: impl Into<String>,
        sentinel: impl Into<String>,
    ) -> Result<Self, GenError> {
        let descriptor = Self {
            storage_kind: storage_kind.into(),
            boxed_name: boxed_name.into(),
            primitive_name: primitive_name.into(),
            accessor: accessor.into(),
            conversion: conversion.into(),
            format_spec: format_spec.into(),
            sentinel: sentinel.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<(), GenError> {
        for field in Field::ALL {
            if self.get(field).trim().is_empty() {
                return Err(GenError::InvalidDescriptor { field });
            }
        }
        Ok(())
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StorageKind => &self.storage_kind,
            Field::BoxedName => &self.boxed_name,
            Field::PrimitiveName => &self.primitive_name,
            Field::Accessor => &self.accessor,
            Field::Conversion => &self.conversion,
            Field::FormatSpec => &self.format_spec,
            Field::Sentinel => &self.sentinel,
        }
    }

    pub fn storage_kind(&self) -> &str {
        &self.storage_kind
    }

    pub fn boxed_name(&self) -> &str {
        &self.boxed_name
    }

    pub fn primitive_name(&self) -> &str {
        &self.primitive_name
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    pub fn conversion(&self) -> &str {
        &self.conversion
    }

    pub fn format_spec(&self) -> &str {
        &self.format_spec
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Cast prefix carried by a conversion of the form `(type) expr`.
    ///
    /// Returns `"(float) "` for `"(float) DTypeUtils.toReal(obj)"` and `None`
    /// when the conversion does not start with a cast.
    pub fn cast_prefix(&self) -> Option<&str> {
        let conversion = self.conversion.trim_start();
        if !conversion.starts_with('(') {
            return None;
        }
        let close = conversion.find(')')?;
        let inner = conversion[1..close].trim();
        if inner.is_empty() || !inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        let end = conversion[close + 1..]
            .find(|c: char| !c.is_whitespace())
            .map_or(conversion.len(), |offset| close + 1 + offset);
        Some(&conversion[..end])
    }
}

#[derive(Deserialize)]
struct RawDescriptor {
    storage_kind: String,
    boxed_name: String,
    primitive_name: String,
    accessor: String,
    conversion: String,
    format_spec: String,
    sentinel: String,
}

impl TryFrom<RawDescriptor> for TypeDescriptor {
    type Error = GenError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        TypeDescriptor::new(
            raw.storage_kind,
            raw.boxed_name,
            raw.primitive_name,
            raw.accessor,
            raw.conversion,
            raw.format_spec,
            raw.sentinel,
        )
    }
}
