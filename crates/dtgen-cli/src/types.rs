use serde::Serialize;

use dtgen_catalog::Catalog;
use dtgen_model::TableEntry;

/// JSON shape of `dtgen types --json`.
#[derive(Debug, Serialize)]
pub struct CatalogListing<'a> {
    pub name: &'a str,
    pub default: &'a str,
    pub types: &'a [TableEntry],
}

impl<'a> CatalogListing<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            name: catalog.name(),
            default: catalog.table().default_class(),
            types: catalog.table().entries(),
        }
    }
}
