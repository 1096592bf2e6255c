//! Generation driver: one transmutation per non-default table entry.

use std::time::Instant;

use tracing::{info, info_span, warn};

use dtgen_model::{
    ClassMode, DescriptorTable, FailurePolicy, GenError, GeneratedFile, Result,
    SpecializationFlags, TableEntry, TransmutationSpec, TransmuteOptions,
};

use crate::engine::Transmuter;

/// Everything needed to generate the sibling classes of one master file.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub master: &'a str,
    pub table: &'a DescriptorTable,
    pub mode: ClassMode,
    pub options: TransmuteOptions,
    /// Strip the base class for every target, on top of per-entry settings.
    pub strip_base_class: bool,
    pub policy: FailurePolicy,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(master: &'a str, table: &'a DescriptorTable, mode: ClassMode) -> Self {
        Self {
            master,
            table,
            mode,
            options: TransmuteOptions::default(),
            strip_base_class: false,
            policy: FailurePolicy::FailFast,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TransmuteOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_strip_base_class(mut self, strip: bool) -> Self {
        self.strip_base_class = strip;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Identifier of the master class, e.g. `DoubleDatasetImpl`.
    pub fn default_class(&self) -> String {
        self.mode.class_identifier(self.table.default_class())
    }
}

#[derive(Debug)]
pub struct TargetFailure {
    pub class_name: String,
    pub error: GenError,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    pub failures: Vec<TargetFailure>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the transmuter over every target of a descriptor table.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    transmuter: Transmuter,
}

impl Generator {
    pub fn new(transmuter: Transmuter) -> Self {
        Self { transmuter }
    }

    /// Generate every non-default type of the table.
    ///
    /// With [`FailurePolicy::FailFast`] the first failure is returned as the
    /// error; with [`FailurePolicy::KeepGoing`] failures are collected in the
    /// report next to the files that succeeded.
    pub fn generate(&self, request: &GenerationRequest<'_>) -> Result<GenerationReport> {
        let default_class = request.default_class();
        let span = info_span!("generate", default_class = %default_class);
        let _guard = span.enter();
        let start = Instant::now();

        let mut report = GenerationReport::default();
        for entry in request.table.all_targets() {
            match self.generate_one(request, &default_class, entry) {
                Ok(file) => report.files.push(file),
                Err(error) => match request.policy {
                    FailurePolicy::FailFast => return Err(error),
                    FailurePolicy::KeepGoing => {
                        warn!(class_name = %entry.class_name, %error, "target failed");
                        report.failures.push(TargetFailure {
                            class_name: entry.class_name.clone(),
                            error,
                        });
                    }
                },
            }
        }

        info!(
            generated = report.files.len(),
            failed = report.failures.len(),
            duration_ms = start.elapsed().as_millis(),
            "generation complete"
        );
        Ok(report)
    }

    fn generate_one(
        &self,
        request: &GenerationRequest<'_>,
        default_class: &str,
        entry: &TableEntry,
    ) -> Result<GeneratedFile> {
        let target_class = request.mode.class_identifier(&entry.class_name);
        if target_class == default_class {
            return Err(GenError::SelfGeneration {
                class_name: target_class,
            });
        }
        let flags = SpecializationFlags::for_kind(entry.kind)
            .with_strip_base_class(request.strip_base_class || entry.strip_base_class);
        let spec = TransmutationSpec {
            master: request.master,
            default_class,
            default: request.table.default_descriptor(),
            target_class: &target_class,
            target: &entry.descriptor,
            flags,
            options: &request.options,
        };
        let text = info_span!("transmutate", target_class = %target_class)
            .in_scope(|| self.transmuter.transmutate(&spec))?;
        Ok(GeneratedFile::new(target_class, text))
    }
}
