use serde::{Deserialize, Serialize};

/// Fixed positional layout of a revenue sheet: semantic names for the first
/// eight columns, in order. Columns beyond the eighth are ignored.
pub const SHEET_COLUMNS: [&str; 8] = [
    "municipality",
    "class",
    "item_group",
    "item_subgroup",
    "item_label",
    "planned",
    "revised",
    "actual",
];

pub const SHEET_COLUMN_COUNT: usize = SHEET_COLUMNS.len();

/// One revenue line item that survived filtering and coercion.
///
/// `actual` is always a valid number; rows without one never make it past
/// the sheet reader. Category fields stay optional and are substituted
/// with a placeholder at grouping time, so no row is dropped for a
/// missing category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRow {
    pub municipality: Option<String>,
    /// Top-level budget category, e.g. tax revenue.
    pub class: Option<String>,
    /// Mid-level category within a class.
    pub item_group: Option<String>,
    pub item_subgroup: Option<String>,
    pub item_label: Option<String>,
    pub planned: Option<f64>,
    pub revised: Option<f64>,
    /// Realized year-to-date amount.
    pub actual: f64,
    /// 1-indexed row in the source sheet, for diagnostics.
    pub row_number: usize,
}
