use std::path::Path;

use serde::Serialize;

use crate::descriptor::TypeDescriptor;
use crate::options::{SpecializationFlags, TransmuteOptions};

/// Input of a single transmutation: master text, both descriptors, and flags.
#[derive(Debug, Clone, Copy)]
pub struct TransmutationSpec<'a> {
    pub master: &'a str,
    /// Identifier of the master class, suffix included.
    pub default_class: &'a str,
    pub default: &'a TypeDescriptor,
    /// Identifier of the generated class, suffix included.
    pub target_class: &'a str,
    pub target: &'a TypeDescriptor,
    pub flags: SpecializationFlags,
    pub options: &'a TransmuteOptions,
}

/// A derived source file held in memory until it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub class_name: String,
    pub file_name: String,
    pub text: String,
}

impl GeneratedFile {
    pub fn new(class_name: impl Into<String>, text: String) -> Self {
        let class_name = class_name.into();
        let file_name = format!("{class_name}.java");
        Self {
            class_name,
            file_name,
            text,
        }
    }

    pub fn path_in(&self, dir: &Path) -> std::path::PathBuf {
        dir.join(&self.file_name)
    }
}
