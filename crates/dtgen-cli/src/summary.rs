use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dtgen_cli::pipeline::GenerateResult;

pub fn print_summary(result: &GenerateResult) {
    println!("Master: {}", result.master.display());
    println!("Catalog: {} ({:?} mode)", result.catalog, result.mode);
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("File"),
        header_cell("Bytes"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    let status = if result.dry_run { "planned" } else { "written" };
    for file in &result.files {
        let file_name = file
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&file.class_name),
            Cell::new(file_name),
            Cell::new(file.bytes),
            Cell::new(status).fg(Color::Green),
        ]);
    }
    for failure in &result.failures {
        table.add_row(vec![
            Cell::new(&failure.class_name),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");

    if result.has_errors() {
        eprintln!("Errors:");
        for failure in &result.failures {
            eprintln!("- {}: {}", failure.class_name, failure.error);
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
