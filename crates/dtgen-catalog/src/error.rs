use std::path::PathBuf;

use dtgen_model::GenError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML catalog {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown built-in catalog: {name} (expected one of {expected})")]
    UnknownCatalog { name: String, expected: String },

    #[error("invalid catalog {origin}: {source}")]
    Model {
        origin: String,
        #[source]
        source: GenError,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
