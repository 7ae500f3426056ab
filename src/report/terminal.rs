use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::LicenseSummary;

/// Render the license catalogue as a table.
pub fn render(licenses: &[LicenseSummary], quiet: bool) -> String {
    if quiet {
        return licenses
            .iter()
            .map(|l| l.key.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Key").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
        ]);

    for license in licenses {
        table.add_row(vec![
            Cell::new(&license.key).fg(Color::Cyan),
            Cell::new(&license.name),
        ]);
    }

    format!(
        "\n {} v{}\n {} licenses available\n\n{}",
        "add-license".bold(),
        env!("CARGO_PKG_VERSION"),
        licenses.len(),
        table
    )
}
