use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use dtgen_core::{SpecializationRules, Transmuter};
use dtgen_model::{ClassMode, DescriptorTable, Field, FieldSet, TableEntry};

use crate::error::CatalogError;

/// Names accepted by [`Catalog::builtin`].
pub const BUILTIN_CATALOGS: [&str; 3] = ["scalar", "compound", "complex"];

const SCALAR: &str = include_str!("../catalogs/scalar.toml");
const COMPOUND: &str = include_str!("../catalogs/compound.toml");
const COMPLEX: &str = include_str!("../catalogs/complex.toml");

/// On-disk layout of a catalog file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    name: Option<String>,
    default: String,
    types: Vec<TableEntry>,
    /// Fields whose default token must appear in the master.
    required: Option<Vec<Field>>,
    #[serde(default)]
    rules: SpecializationRules,
}

/// A descriptor table together with the specialization rules it is
/// generated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    name: String,
    table: DescriptorTable,
    rules: SpecializationRules,
    required: Option<FieldSet>,
}

impl Catalog {
    pub fn new(
        name: impl Into<String>,
        table: DescriptorTable,
        rules: SpecializationRules,
    ) -> Self {
        Self {
            name: name.into(),
            table,
            rules,
            required: None,
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: Option<FieldSet>) -> Self {
        self.required = required;
        self
    }

    /// One of the catalogs shipped with dtgen.
    pub fn builtin(name: &str) -> Result<Self, CatalogError> {
        let contents = match name {
            "scalar" => SCALAR,
            "compound" => COMPOUND,
            "complex" => COMPLEX,
            _ => {
                return Err(CatalogError::UnknownCatalog {
                    name: name.to_string(),
                    expected: BUILTIN_CATALOGS.join(", "),
                });
            }
        };
        parse(contents, &format!("built-in {name}"), name)
    }

    pub fn builtins() -> Result<Vec<Self>, CatalogError> {
        BUILTIN_CATALOGS.iter().map(|name| Self::builtin(name)).collect()
    }

    /// The built-in catalog whose default class is declared by `file_name`.
    ///
    /// `DoubleDatasetImpl.java` and `DoubleDataset.java` both select
    /// `scalar`; unknown masters yield `None`.
    pub fn for_master(file_name: &str) -> Result<Option<Self>, CatalogError> {
        let mode = ClassMode::from_file_name(file_name);
        let stem = file_name.strip_suffix(".java").unwrap_or(file_name);
        for catalog in Self::builtins()? {
            if mode.class_identifier(catalog.table.default_class()) == stem {
                debug!(
                    catalog = %catalog.name,
                    master = file_name,
                    "catalog selected from master name"
                );
                return Ok(Some(catalog));
            }
        }
        Ok(None)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        parse(contents, "inline catalog", "custom")
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let fallback = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("custom");
        parse(&contents, &path.display().to_string(), fallback)
    }

    /// A built-in name or the path of a catalog file.
    pub fn resolve(name_or_path: &str) -> Result<Self, CatalogError> {
        if BUILTIN_CATALOGS.contains(&name_or_path) {
            return Self::builtin(name_or_path);
        }
        let path = Path::new(name_or_path);
        if path.extension().is_some_and(|ext| ext == "toml") || path.exists() {
            return Self::load(path);
        }
        Self::builtin(name_or_path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    pub fn rules(&self) -> &SpecializationRules {
        &self.rules
    }

    /// Required fields declared by the catalog file, if any.
    pub fn required(&self) -> Option<FieldSet> {
        self.required
    }

    pub fn transmuter(&self) -> Transmuter {
        Transmuter::new(self.rules.clone())
    }
}

fn parse(contents: &str, origin: &str, fallback_name: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(contents).map_err(|e| CatalogError::Toml {
        origin: origin.to_string(),
        source: e,
    })?;
    let table = DescriptorTable::new(file.default, file.types).map_err(|e| CatalogError::Model {
        origin: origin.to_string(),
        source: e,
    })?;
    let name = file.name.unwrap_or_else(|| fallback_name.to_string());
    debug!(catalog = %name, origin, types = table.len(), "catalog loaded");
    let required = file.required.map(|fields| fields.into_iter().collect());
    Ok(Catalog::new(name, table, file.rules).with_required(required))
}

#[cfg(test)]
mod tests {
    use dtgen_model::ElementKind;

    use super::*;

    #[test]
    fn builtins_parse() {
        let catalogs = Catalog::builtins().unwrap();
        let sizes: Vec<(&str, usize)> = catalogs
            .iter()
            .map(|catalog| (catalog.name(), catalog.table().len()))
            .collect();
        assert_eq!(sizes, vec![("scalar", 9), ("compound", 6), ("complex", 2)]);
    }

    #[test]
    fn scalar_kinds() {
        let catalog = Catalog::builtin("scalar").unwrap();
        let kinds: Vec<(&str, ElementKind)> = catalog
            .table()
            .all_targets()
            .map(|entry| (entry.class_name.as_str(), entry.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("FloatDataset", ElementKind::Real),
                ("IntegerDataset", ElementKind::Integer),
                ("LongDataset", ElementKind::Integer),
                ("ShortDataset", ElementKind::Integer),
                ("ByteDataset", ElementKind::Integer),
                ("BooleanDatasetBase", ElementKind::Boolean),
                ("StringDatasetBase", ElementKind::Object),
                ("ObjectDatasetBase", ElementKind::Object),
            ]
        );
    }

    #[test]
    fn complex_storage_kinds() {
        let catalog = Catalog::builtin("complex").unwrap();
        assert_eq!(catalog.table().default_descriptor().storage_kind(), "COMPLEX128");
        assert_eq!(
            catalog.table().lookup("ComplexFloatDataset").unwrap().storage_kind(),
            "COMPLEX64"
        );
    }

    #[test]
    fn builtins_require_every_field() {
        for catalog in Catalog::builtins().unwrap() {
            assert_eq!(catalog.required(), None, "{}", catalog.name());
        }
    }

    #[test]
    fn unknown_builtin() {
        let err = Catalog::builtin("quaternion").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown built-in catalog: quaternion (expected one of scalar, compound, complex)"
        );
    }
}
