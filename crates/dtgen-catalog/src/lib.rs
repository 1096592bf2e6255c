//! Descriptor catalogs for dtgen.
//!
//! Three catalogs ship with the crate (`scalar`, `compound`, `complex`);
//! others are read from TOML files with a `default` class, a `[[types]]`
//! array and optional `[rules.boolean]`, `[rules.string]` and
//! `[rules.integer]` tables replacing the built-in specialization rules.
//! An optional `required = ["primitive_name", ...]` key narrows the default
//! tokens a master must contain; without it every field is required.

#![deny(unsafe_code)]

pub mod catalog;
pub mod error;

pub use crate::catalog::{BUILTIN_CATALOGS, Catalog};
pub use crate::error::CatalogError;
