//! CLI argument definitions for dtgen.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dtgen_cli::pipeline::DEFAULT_MASTER;
use dtgen_model::{Field, SubstitutionScope};

#[derive(Parser)]
#[command(
    name = "dtgen",
    version,
    about = "Generate dataset classes for every element type from one master class",
    long_about = "Generate dataset classes for every element type from one master class.\n\n\
                  The master is written for the default element type of a catalog \
                  (DoubleDataset for the scalar catalog). Every other type in the \
                  catalog gets its own class, derived by substituting type tokens.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the sibling classes of a master file (the default command).
    Generate(GenerateArgs),

    /// List the element types of a catalog.
    Types(TypesArgs),
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Master class file; `*Impl.java` selects implementation mode.
    #[arg(value_name = "MASTER", default_value = DEFAULT_MASTER)]
    pub master: PathBuf,

    /// Built-in catalog (scalar, compound, complex) or a catalog TOML file.
    ///
    /// Inferred from the master file name when omitted.
    #[arg(long = "catalog", value_name = "NAME|PATH")]
    pub catalog: Option<String>,

    /// Directory for generated files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Where type tokens are replaced.
    #[arg(long = "scope", value_enum, default_value = "global")]
    pub scope: ScopeArg,

    /// Default tokens the master must contain (comma separated).
    ///
    /// Defaults to the catalog's `required` list, or every field. Interface
    /// masters usually only carry the primitive and boxed names.
    #[arg(long = "require", value_enum, value_delimiter = ',', value_name = "FIELD")]
    pub require: Vec<FieldArg>,

    /// Remove the `extends` clause from every generated class.
    #[arg(long = "strip-base-class")]
    pub strip_base_class: bool,

    /// Generate every type that succeeds instead of stopping at the first
    /// failure.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Generate and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Omit the "generated from" comment.
    #[arg(long = "no-header")]
    pub no_header: bool,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Built-in catalog (scalar, compound, complex) or a catalog TOML file.
    #[arg(long = "catalog", value_name = "NAME|PATH", default_value = "scalar")]
    pub catalog: String,

    /// Print the catalog as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    /// Replace tokens anywhere in the master.
    Global,
    /// Replace tokens only on lines carrying the field's marker comment.
    Marked,
}

impl From<ScopeArg> for SubstitutionScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Global => SubstitutionScope::Global,
            ScopeArg::Marked => SubstitutionScope::Marked,
        }
    }
}

/// Descriptor fields as named on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum FieldArg {
    StorageKind,
    BoxedName,
    PrimitiveName,
    Accessor,
    Conversion,
    FormatSpec,
    Sentinel,
}

impl From<FieldArg> for Field {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::StorageKind => Field::StorageKind,
            FieldArg::BoxedName => Field::BoxedName,
            FieldArg::PrimitiveName => Field::PrimitiveName,
            FieldArg::Accessor => Field::Accessor,
            FieldArg::Conversion => Field::Conversion,
            FieldArg::FormatSpec => Field::FormatSpec,
            FieldArg::Sentinel => Field::Sentinel,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
