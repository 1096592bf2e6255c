//! Generation pipeline: read the master, pick a catalog, derive every
//! sibling class, then write the results.
//!
//! Nothing is written until the generator has returned, so a fail-fast
//! error leaves the output directory untouched.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use dtgen_catalog::Catalog;
use dtgen_core::{GenerationRequest, Generator, TargetFailure};
use dtgen_model::{
    ClassMode, FailurePolicy, FieldSet, GenError, GeneratedFile, SubstitutionScope,
    TransmuteOptions,
};

/// Master used when none is given on the command line.
pub const DEFAULT_MASTER: &str = "../DoubleDatasetImpl.java";

/// Catalog used when the master name matches no built-in catalog.
pub const FALLBACK_CATALOG: &str = "scalar";

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub master: PathBuf,
    /// Built-in catalog name or catalog file; inferred from the master when
    /// `None`.
    pub catalog: Option<String>,
    pub output_dir: PathBuf,
    pub scope: SubstitutionScope,
    /// Fields whose default token the master must contain. Falls back to the
    /// catalog's `required` list, then to every field.
    pub required: Option<FieldSet>,
    pub strip_base_class: bool,
    pub policy: FailurePolicy,
    pub dry_run: bool,
    pub header: bool,
}

impl GenerateConfig {
    pub fn new(master: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            master: master.into(),
            catalog: None,
            output_dir: output_dir.into(),
            scope: SubstitutionScope::Global,
            required: None,
            strip_base_class: false,
            policy: FailurePolicy::FailFast,
            dry_run: false,
            header: true,
        }
    }
}

/// One generated class and where it went.
#[derive(Debug)]
pub struct OutputFile {
    pub class_name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug)]
pub struct GenerateResult {
    pub master: PathBuf,
    pub catalog: String,
    pub mode: ClassMode,
    pub output_dir: PathBuf,
    pub files: Vec<OutputFile>,
    pub failures: Vec<TargetFailure>,
    pub dry_run: bool,
}

impl GenerateResult {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Read a master file as UTF-8 text.
pub fn read_master(path: &Path) -> Result<String, GenError> {
    let bytes = fs::read(path).map_err(|e| GenError::MalformedInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| GenError::MalformedInput {
        path: path.to_path_buf(),
        reason: format!("not valid UTF-8: {e}"),
    })
}

/// Resolve the catalog named on the command line, or the one matching the
/// master file name.
pub fn select_catalog(explicit: Option<&str>, master_file_name: &str) -> Result<Catalog> {
    if let Some(name) = explicit {
        return Catalog::resolve(name).with_context(|| format!("load catalog {name}"));
    }
    match Catalog::for_master(master_file_name).context("load built-in catalogs")? {
        Some(catalog) => Ok(catalog),
        None => {
            debug!(
                master = master_file_name,
                catalog = FALLBACK_CATALOG,
                "no catalog matches master name"
            );
            Catalog::builtin(FALLBACK_CATALOG).context("load fallback catalog")
        }
    }
}

pub fn run_generate(config: &GenerateConfig) -> Result<GenerateResult> {
    let master_path = &config.master;
    let span = info_span!("dtgen", master = %master_path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let text = read_master(master_path)?;
    let file_name = master_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| GenError::MalformedInput {
            path: master_path.clone(),
            reason: "master path has no UTF-8 file name".to_string(),
        })?;
    let mode = ClassMode::from_file_name(file_name);
    let catalog = select_catalog(config.catalog.as_deref(), file_name)?;
    info!(catalog = catalog.name(), ?mode, "master loaded");

    let header = config
        .header
        .then(|| format!("This is generated from {file_name} by dtgen"));
    let required = config
        .required
        .or(catalog.required())
        .unwrap_or_else(FieldSet::all);
    debug!(required = required.len(), "required default tokens");
    let options = TransmuteOptions::new()
        .with_scope(config.scope)
        .with_required(required)
        .with_header(header);
    let request = GenerationRequest::new(&text, catalog.table(), mode)
        .with_options(options)
        .with_strip_base_class(config.strip_base_class)
        .with_policy(config.policy);
    let report = Generator::new(catalog.transmuter())
        .generate(&request)
        .with_context(|| format!("generate from {}", master_path.display()))?;

    let files = if config.dry_run {
        report
            .files
            .iter()
            .map(|file| planned_output(file, &config.output_dir))
            .collect()
    } else {
        write_outputs(&report.files, &config.output_dir)?
    };

    info!(
        written = if config.dry_run { 0 } else { files.len() },
        failed = report.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "dtgen complete"
    );

    Ok(GenerateResult {
        master: master_path.clone(),
        catalog: catalog.name().to_string(),
        mode,
        output_dir: config.output_dir.clone(),
        files,
        failures: report.failures,
        dry_run: config.dry_run,
    })
}

fn planned_output(file: &GeneratedFile, output_dir: &Path) -> OutputFile {
    OutputFile {
        class_name: file.class_name.clone(),
        path: file.path_in(output_dir),
        bytes: file.text.len(),
    }
}

/// Write every file into `output_dir`, replacing existing files.
pub fn write_outputs(
    files: &[GeneratedFile],
    output_dir: &Path,
) -> Result<Vec<OutputFile>, GenError> {
    if !files.is_empty() {
        fs::create_dir_all(output_dir).map_err(|source| GenError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let output = planned_output(file, output_dir);
        fs::write(&output.path, &file.text).map_err(|source| GenError::Write {
            path: output.path.clone(),
            source,
        })?;
        debug!(path = %output.path.display(), bytes = output.bytes, "wrote class");
        written.push(output);
    }
    Ok(written)
}
