//! Plain-text preview of the parsed table: schema line plus the first rows,
//! with a row-index gutter and width-aligned columns. Used as a quick check
//! that the log populated the table the way the run expected.

use crate::log::Table;

pub fn render_head(table: &Table, limit: usize) -> String {
    if table.schema().is_empty() {
        return "(no data records)\n".to_string();
    }

    let shown: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(limit)
        .map(|row| row.values.iter().map(f64::to_string).collect())
        .collect();

    // Column width: widest of the header and every shown value.
    let mut widths: Vec<usize> = table
        .schema()
        .columns()
        .iter()
        .map(|name| name.len())
        .collect();
    for row in &shown {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let gutter = shown.len().saturating_sub(1).to_string().len().max(1);

    let mut out = String::new();
    out.push_str(&" ".repeat(gutter));
    for (i, name) in table.schema().columns().iter().enumerate() {
        out.push_str("  ");
        out.push_str(&format!("{:>width$}", name, width = widths[i]));
    }
    out.push('\n');

    for (idx, row) in shown.iter().enumerate() {
        out.push_str(&format!("{:>gutter$}", idx));
        for (i, cell) in row.iter().enumerate() {
            out.push_str("  ");
            out.push_str(&format!("{:>width$}", cell, width = widths[i]));
        }
        out.push('\n');
    }

    out
}
