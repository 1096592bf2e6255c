use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Table};

use dtgen_catalog::Catalog;
use dtgen_cli::pipeline::{GenerateConfig, GenerateResult, run_generate};
use dtgen_model::{FailurePolicy, Field};

use crate::cli::{GenerateArgs, TypesArgs};
use crate::summary::apply_table_style;
use crate::types::CatalogListing;

pub fn run_types(args: &TypesArgs) -> Result<()> {
    let catalog = Catalog::resolve(&args.catalog)
        .with_context(|| format!("load catalog {}", args.catalog))?;
    if args.json {
        let json = serde_json::to_string_pretty(&CatalogListing::new(&catalog))
            .context("serialize catalog")?;
        println!("{json}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Class",
        "Kind",
        "Storage",
        "Boxed",
        "Primitive",
        "Accessor",
        "Conversion",
        "Format",
        "Sentinel",
    ]);
    apply_table_style(&mut table);
    let default_class = catalog.table().default_class();
    for entry in catalog.table().entries() {
        let descriptor = &entry.descriptor;
        let class_cell = if entry.class_name == default_class {
            Cell::new(format!("{} (default)", entry.class_name)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&entry.class_name)
        };
        table.add_row(vec![
            class_cell,
            Cell::new(entry.kind),
            Cell::new(descriptor.storage_kind()),
            Cell::new(descriptor.boxed_name()),
            Cell::new(descriptor.primitive_name()),
            Cell::new(descriptor.accessor()),
            Cell::new(descriptor.conversion()),
            Cell::new(descriptor.format_spec()),
            Cell::new(descriptor.sentinel()),
        ]);
    }
    println!("Catalog: {}", catalog.name());
    println!("{table}");
    Ok(())
}

pub fn run_generate_command(args: &GenerateArgs) -> Result<GenerateResult> {
    let config = GenerateConfig {
        catalog: args.catalog.clone(),
        scope: args.scope.into(),
        required: (!args.require.is_empty())
            .then(|| args.require.iter().copied().map(Field::from).collect()),
        strip_base_class: args.strip_base_class,
        policy: if args.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        },
        dry_run: args.dry_run,
        header: !args.no_header,
        ..GenerateConfig::new(&args.master, &args.output_dir)
    };
    run_generate(&config)
}
