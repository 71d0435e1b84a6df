//! The price worksheet: row inputs, validation, and the projection pass.

use crate::core::category::ProductCategory;
use crate::core::rate::RateState;
use crate::core::rounding::round_to_nearest;
use crate::core::view::View;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// The worksheet always renders this many rows.
pub const ROW_COUNT: usize = 10;

/// IDR amounts are rounded to this unit before display.
pub const IDR_ROUND: f64 = 1000.0;

pub const YEAR_MIN: i32 = 2000;
pub const YEAR_MAX: i32 = 2100;

/// Notification shown at most once per calculator pass when any row has an
/// incomplete or unparsable entry.
pub const INCOMPLETE_ROW_NOTICE: &str = "Both Bottom Price > USD and Year must be filled.";

/// A worksheet cell as written in the config file. YAML numbers and strings
/// are both accepted so blank or non-numeric entries survive deserialization
/// and are reported as invalid rows instead of failing the whole load.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    /// A blank string counts as an absent entry, not an invalid one.
    fn is_blank(&self) -> bool {
        match self {
            Field::Number(_) => false,
            Field::Text(t) => t.trim().is_empty(),
        }
    }

    fn as_price(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(*n),
            Field::Text(t) => t.trim().parse().ok(),
        }
    }

    fn as_year(&self) -> Option<i32> {
        match self {
            // Numeric years keep their integer part, like a year spinner.
            Field::Number(n) => Some(n.trunc() as i32),
            Field::Text(t) => t.trim().parse().ok(),
        }
    }
}

/// One user-editable worksheet row: a bottom price in USD and the year it
/// was quoted.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RowEntry {
    #[serde(default)]
    pub usd: Option<Field>,
    #[serde(default)]
    pub year: Option<Field>,
}

enum RowInput {
    Empty,
    Invalid,
    Valid { usd: f64, year: i32 },
}

impl RowEntry {
    fn classify(&self) -> RowInput {
        let usd_blank = self.usd.as_ref().is_none_or(Field::is_blank);
        let year_blank = self.year.as_ref().is_none_or(Field::is_blank);
        if usd_blank && year_blank {
            return RowInput::Empty;
        }
        if usd_blank || year_blank {
            return RowInput::Invalid;
        }

        let usd = self.usd.as_ref().and_then(Field::as_price);
        let year = self.year.as_ref().and_then(Field::as_year);
        match (usd, year) {
            (Some(usd), Some(year))
                if usd.is_finite() && usd >= 0.0 && (YEAR_MIN..=YEAR_MAX).contains(&year) =>
            {
                RowInput::Valid { usd, year }
            }
            _ => RowInput::Invalid,
        }
    }
}

/// The five derived outputs of a row. `None` renders as the empty marker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowOutput {
    pub idr: Option<f64>,
    pub spices_usd: Option<f64>,
    pub spices_idr: Option<f64>,
    pub seasoning_usd: Option<f64>,
    pub seasoning_idr: Option<f64>,
}

impl RowOutput {
    /// The `(USD, IDR)` projection pair for one category.
    pub fn projection(&self, category: ProductCategory) -> (Option<f64>, Option<f64>) {
        match category {
            ProductCategory::Spices => (self.spices_usd, self.spices_idr),
            ProductCategory::Seasoning => (self.seasoning_usd, self.seasoning_idr),
        }
    }
}

/// Result of one calculator pass over the whole worksheet.
#[derive(Debug)]
pub struct TableOutcome {
    pub rows: Vec<RowOutput>,
    /// False when at least one row was incomplete or unparsable.
    pub all_valid: bool,
}

/// Bails when the worksheet holds more rows than the table can show.
pub fn check_row_count(entries: &[RowEntry]) -> Result<()> {
    if entries.len() > ROW_COUNT {
        bail!(
            "Worksheet has {} rows; at most {ROW_COUNT} are supported",
            entries.len()
        );
    }
    Ok(())
}

/// Pads `entries` with empty rows up to [`ROW_COUNT`].
pub fn padded(entries: &[RowEntry]) -> Vec<RowEntry> {
    let mut rows = entries.to_vec();
    rows.resize_with(rows.len().max(ROW_COUNT), RowEntry::default);
    rows
}

/// Computes the derived outputs for every row. Pure: the result depends only
/// on the arguments.
///
/// With no buffered rate yet, `partial_before_rate` decides whether valid
/// rows still show their USD projections (IDR cells stay empty) or stay
/// fully empty until a rate arrives. Row validation runs either way.
pub fn compute_table(
    entries: &[RowEntry],
    buffered_rate: Option<f64>,
    current_year: i32,
    partial_before_rate: bool,
) -> TableOutcome {
    let mut rows = Vec::with_capacity(entries.len());
    let mut all_valid = true;

    for entry in entries {
        let mut output = RowOutput::default();
        match entry.classify() {
            RowInput::Empty => {}
            RowInput::Invalid => all_valid = false,
            RowInput::Valid { usd, year } => {
                let years_elapsed = (current_year - year).max(0) as u32;
                if buffered_rate.is_some() || partial_before_rate {
                    let spices = ProductCategory::Spices.formula().project(usd, years_elapsed);
                    let seasoning = ProductCategory::Seasoning
                        .formula()
                        .project(usd, years_elapsed);
                    output.spices_usd = Some(spices);
                    output.seasoning_usd = Some(seasoning);
                    if let Some(rate) = buffered_rate {
                        output.idr = Some(round_to_nearest(usd * rate, IDR_ROUND));
                        // The projected IDR amounts convert the already
                        // rounded USD projections.
                        output.spices_idr = Some(round_to_nearest(spices * rate, IDR_ROUND));
                        output.seasoning_idr = Some(round_to_nearest(seasoning * rate, IDR_ROUND));
                    }
                }
            }
        }
        rows.push(output);
    }

    TableOutcome { rows, all_valid }
}

/// Runs one calculator pass and reflects it on the view: the worksheet table
/// plus, when any row was invalid, a single aggregated notification.
pub fn run_calculator(
    entries: &[RowEntry],
    rates: &RateState,
    current_year: i32,
    partial_before_rate: bool,
    view: &mut dyn View,
) -> bool {
    let outcome = compute_table(entries, rates.buffered(), current_year, partial_before_rate);
    view.render_worksheet(entries, &outcome.rows);
    if !outcome.all_valid {
        view.notify(INCOMPLETE_ROW_NOTICE);
    }
    outcome.all_valid
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2024;
    const RATE: f64 = 16100.0;

    fn entry(usd: Field, year: Field) -> RowEntry {
        RowEntry {
            usd: Some(usd),
            year: Some(year),
        }
    }

    fn num(n: f64) -> Field {
        Field::Number(n)
    }

    fn text(t: &str) -> Field {
        Field::Text(t.to_string())
    }

    #[derive(Default)]
    struct RecordingView {
        worksheets: usize,
        notifications: Vec<String>,
    }

    impl View for RecordingView {
        fn render_rates(&mut self, _rates: &RateState) {}

        fn render_worksheet(&mut self, _entries: &[RowEntry], _outputs: &[RowOutput]) {
            self.worksheets += 1;
        }

        fn notify(&mut self, message: &str) {
            self.notifications.push(message.to_string());
        }
    }

    #[test]
    fn test_empty_row_yields_empty_outputs_without_invalidating() {
        let outcome = compute_table(&[RowEntry::default()], Some(RATE), YEAR, true);
        assert_eq!(outcome.rows[0], RowOutput::default());
        assert!(outcome.all_valid);
    }

    #[test]
    fn test_blank_strings_count_as_empty() {
        let outcome = compute_table(&[entry(text(""), text("  "))], Some(RATE), YEAR, true);
        assert_eq!(outcome.rows[0], RowOutput::default());
        assert!(outcome.all_valid);
    }

    #[test]
    fn test_half_filled_row_is_invalid() {
        let row = RowEntry {
            usd: Some(num(100.0)),
            year: None,
        };
        let outcome = compute_table(&[row], Some(RATE), YEAR, true);
        assert_eq!(outcome.rows[0], RowOutput::default());
        assert!(!outcome.all_valid);
    }

    #[test]
    fn test_non_numeric_entries_are_invalid() {
        for row in [
            entry(text("12abc"), num(2024.0)),
            entry(num(100.0), text("twenty")),
        ] {
            let outcome = compute_table(&[row], Some(RATE), YEAR, true);
            assert_eq!(outcome.rows[0], RowOutput::default());
            assert!(!outcome.all_valid);
        }
    }

    #[test]
    fn test_negative_price_and_out_of_range_year_are_invalid() {
        for row in [
            entry(num(-5.0), num(2024.0)),
            entry(num(100.0), num(1999.0)),
            entry(num(100.0), num(2101.0)),
        ] {
            let outcome = compute_table(std::slice::from_ref(&row), Some(RATE), YEAR, true);
            assert!(!outcome.all_valid, "{row:?}");
        }
    }

    #[test]
    fn test_numeric_strings_parse() {
        let outcome = compute_table(&[entry(text("100"), text("2024"))], Some(RATE), YEAR, true);
        assert!(outcome.all_valid);
        assert_eq!(outcome.rows[0].spices_usd, Some(110.0));
    }

    #[test]
    fn test_spices_projection_for_current_year() {
        // 100 * 1.005^0 * 1.10 = 110.0; 110 * 16100 = 1,771,000
        let outcome = compute_table(&[entry(num(100.0), num(2024.0))], Some(RATE), YEAR, true);
        let row = &outcome.rows[0];
        assert_eq!(row.spices_usd, Some(110.0));
        assert_eq!(row.seasoning_usd, Some(120.0));
        assert_eq!(row.idr, Some(1_610_000.0));
        assert_eq!(row.spices_idr, Some(1_771_000.0));
        assert_eq!(row.seasoning_idr, Some(1_932_000.0));
    }

    #[test]
    fn test_future_year_clamps_to_zero_elapsed() {
        let current = compute_table(&[entry(num(100.0), num(2024.0))], Some(RATE), YEAR, true);
        let future = compute_table(&[entry(num(100.0), num(2030.0))], Some(RATE), YEAR, true);
        assert_eq!(current.rows[0], future.rows[0]);
    }

    #[test]
    fn test_elapsed_years_compound_growth() {
        // 100 * 1.005^4 * 1.10 = 112.2 after rounding to one decimal
        let outcome = compute_table(&[entry(num(100.0), num(2020.0))], Some(RATE), YEAR, true);
        assert_eq!(outcome.rows[0].spices_usd, Some(112.2));
    }

    #[test]
    fn test_projected_idr_converts_the_rounded_usd_amount() {
        // 10.3758 * 1.2 = 12.45096, displayed as 12.5; converting the
        // displayed amount lands on 201,000 where the unrounded amount
        // would have landed on 200,000.
        let outcome = compute_table(&[entry(num(10.3758), num(2024.0))], Some(RATE), YEAR, true);
        let row = &outcome.rows[0];
        assert_eq!(row.seasoning_usd, Some(12.5));
        assert_eq!(row.seasoning_idr, Some(201_000.0));
    }

    #[test]
    fn test_missing_rate_with_partial_display_keeps_usd_outputs() {
        let outcome = compute_table(&[entry(num(100.0), num(2024.0))], None, YEAR, true);
        let row = &outcome.rows[0];
        assert_eq!(row.spices_usd, Some(110.0));
        assert_eq!(row.seasoning_usd, Some(120.0));
        assert_eq!(row.idr, None);
        assert_eq!(row.spices_idr, None);
        assert_eq!(row.seasoning_idr, None);
    }

    #[test]
    fn test_missing_rate_without_partial_display_blanks_everything() {
        let outcome = compute_table(&[entry(num(100.0), num(2024.0))], None, YEAR, false);
        assert_eq!(outcome.rows[0], RowOutput::default());
        assert!(outcome.all_valid);
    }

    #[test]
    fn test_validation_still_runs_without_a_rate() {
        let outcome = compute_table(&[entry(num(100.0), text("soon"))], None, YEAR, false);
        assert!(!outcome.all_valid);
    }

    #[test]
    fn test_invalid_rows_do_not_block_valid_ones() {
        let rows = vec![
            entry(num(100.0), num(2024.0)),
            entry(text("oops"), num(2024.0)),
            entry(num(50.0), num(2024.0)),
        ];
        let outcome = compute_table(&rows, Some(RATE), YEAR, true);
        assert!(!outcome.all_valid);
        assert_eq!(outcome.rows[0].spices_usd, Some(110.0));
        assert_eq!(outcome.rows[1], RowOutput::default());
        assert_eq!(outcome.rows[2].spices_usd, Some(55.0));
    }

    #[test]
    fn test_run_calculator_notifies_once_for_many_invalid_rows() {
        let rows = vec![
            entry(text("bad"), num(2024.0)),
            entry(num(100.0), text("worse")),
        ];
        let mut state = RateState::new();
        state.set(15623.0);
        let mut view = RecordingView::default();

        let valid = run_calculator(&rows, &state, YEAR, true, &mut view);

        assert!(!valid);
        assert_eq!(view.worksheets, 1);
        assert_eq!(view.notifications, vec![INCOMPLETE_ROW_NOTICE.to_string()]);
    }

    #[test]
    fn test_run_calculator_is_silent_when_all_rows_are_valid() {
        let rows = vec![entry(num(100.0), num(2024.0)), RowEntry::default()];
        let mut state = RateState::new();
        state.set(15623.0);
        let mut view = RecordingView::default();

        assert!(run_calculator(&rows, &state, YEAR, true, &mut view));
        assert!(view.notifications.is_empty());
    }

    #[test]
    fn test_padded_fills_up_to_row_count() {
        let rows = padded(&[entry(num(1.0), num(2024.0))]);
        assert_eq!(rows.len(), ROW_COUNT);
        assert_eq!(rows[9], RowEntry::default());
    }

    #[test]
    fn test_check_row_count_rejects_oversized_worksheets() {
        let rows = vec![RowEntry::default(); ROW_COUNT + 1];
        assert!(check_row_count(&rows).is_err());
        assert!(check_row_count(&rows[..ROW_COUNT]).is_ok());
    }
}
