use super::ui;
use crate::core::category::ProductCategory;
use crate::core::money::{IDR, USD};
use crate::core::rate::RateState;
use crate::core::view::View;
use crate::core::worksheet::{Field, RowEntry, RowOutput};
use comfy_table::{Cell, CellAlignment, Table};

/// Renders the rate displays and the worksheet to the terminal.
pub struct ConsoleView;

impl ConsoleView {
    pub fn new() -> Self {
        ConsoleView
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole rates render as plain IDR; a fractional rate keeps a secondary
/// 2-decimal rendering next to its floored value.
fn raw_rate_display(raw: f64) -> String {
    if raw.fract() == 0.0 {
        IDR.format(raw)
    } else {
        format!(
            "{} ({})",
            IDR.format(raw.floor()),
            IDR.format_number(raw, 2)
        )
    }
}

/// A worksheet input cell exactly as the user wrote it, empty when unset.
fn entry_text(field: &Option<Field>) -> String {
    match field {
        None => String::new(),
        Some(Field::Number(n)) if n.fract() == 0.0 => format!("{n:.0}"),
        Some(Field::Number(n)) => n.to_string(),
        Some(Field::Text(t)) => t.clone(),
    }
}

fn rate_line(label: &str, value: Option<String>) -> String {
    let (text, style_type) = match value {
        Some(text) => (text, ui::StyleType::RateValue),
        None => (ui::EMPTY_MARKER.to_string(), ui::StyleType::Error),
    };
    format!(
        "{} {}",
        ui::style_text(label, ui::StyleType::RateLabel),
        ui::style_text(&text, style_type)
    )
}

fn worksheet_table(entries: &[RowEntry], outputs: &[RowOutput]) -> Table {
    let mut table = ui::new_styled_table();
    let mut headers = vec![
        ui::header_cell("Bottom Price (USD)"),
        ui::header_cell("Bottom Price (IDR)"),
        ui::header_cell("Year"),
    ];
    for category in ProductCategory::ALL {
        headers.push(ui::header_cell(&format!("{category} (USD)")));
        headers.push(ui::header_cell(&format!("{category} (IDR)")));
    }
    table.set_header(headers);

    for (entry, output) in entries.iter().zip(outputs) {
        let mut cells = vec![
            Cell::new(entry_text(&entry.usd)).set_alignment(CellAlignment::Right),
            ui::format_optional_cell(output.idr, |v| IDR.format(v)),
            Cell::new(entry_text(&entry.year)).set_alignment(CellAlignment::Right),
        ];
        for category in ProductCategory::ALL {
            let (usd, idr) = output.projection(category);
            cells.push(ui::format_optional_cell(usd, |v| USD.format(v)));
            cells.push(ui::format_optional_cell(idr, |v| IDR.format(v)));
        }
        table.add_row(cells);
    }

    table
}

impl View for ConsoleView {
    fn render_rates(&mut self, rates: &RateState) {
        println!(
            "{}",
            rate_line(
                "Exchange Rate (USD/IDR):",
                rates.raw().map(raw_rate_display)
            )
        );
        println!(
            "{}",
            rate_line(
                "Buffered Rate (USD/IDR):",
                rates.buffered().map(|b| IDR.format(b))
            )
        );
    }

    fn render_worksheet(&mut self, entries: &[RowEntry], outputs: &[RowOutput]) {
        println!("\n{}", worksheet_table(entries, outputs));
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", ui::style_text(message, ui::StyleType::Error));
    }
}
