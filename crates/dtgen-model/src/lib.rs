//! Data model for the dtgen source generator.
//!
//! Descriptors, descriptor tables, and the inputs and outputs of a
//! transmutation. Nothing here touches the filesystem.

#![deny(unsafe_code)]

pub mod descriptor;
pub mod error;
pub mod options;
pub mod table;
pub mod transmutation;

pub use descriptor::{ElementKind, Field, FieldSet, TypeDescriptor};
pub use error::{GenError, Result, TokenKind};
pub use options::{
    ClassMode, FailurePolicy, IMPL_SUFFIX, SpecializationFlags, SubstitutionScope,
    TransmuteOptions,
};
pub use table::{DescriptorTable, TableEntry};
pub use transmutation::{GeneratedFile, TransmutationSpec};
