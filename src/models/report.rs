use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::models::BudgetRow;
use crate::services::analytics::{self, AggregateRow};
use crate::services::flow::{self, FlowGraph};
use crate::services::sheet_reader::ReadResult;

/// How many rows/groups the ranked views keep.
pub const TOP_ITEM_COUNT: usize = 10;

/// All derived views for one uploaded revenue sheet.
///
/// Computed in a single pass at upload time and held in memory until the
/// next upload replaces it. Every grouping sums to `total`; only the
/// sheet reader's filter removes rows.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: String,
    pub file_name: String,
    pub generated_at: DateTime<Local>,
    /// Filtered rows, every one with a valid actual amount.
    pub rows: Vec<BudgetRow>,
    pub total: f64,
    pub top_rows: Vec<BudgetRow>,
    pub class_totals: Vec<AggregateRow>,
    pub item_group_totals: Vec<AggregateRow>,
    pub flow: FlowGraph,
    /// Rows dropped because the actual-amount cell was blank.
    pub blank_amount_rows: usize,
    /// Rows dropped because the actual-amount cell failed numeric coercion.
    pub bad_amount_rows: usize,
}

impl Report {
    pub fn from_sheet(file_name: &str, sheet: ReadResult, currency: &str, locale: &str) -> Self {
        let rows = sheet.rows;

        let total = analytics::total_amount(&rows);
        let top_rows = analytics::top_n(&rows, TOP_ITEM_COUNT);
        let class_totals = analytics::group_sum(&rows, |r| r.class.as_deref());
        let item_group_totals =
            analytics::group_sum_top_n(&rows, |r| r.item_group.as_deref(), TOP_ITEM_COUNT);
        let pair_totals =
            analytics::group_sum_pair(&rows, |r| r.class.as_deref(), |r| r.item_group.as_deref());
        let flow = flow::build_flow_graph(&pair_totals, currency, locale);

        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            generated_at: Local::now(),
            rows,
            total,
            top_rows,
            class_totals,
            item_group_totals,
            flow,
            blank_amount_rows: sheet.blank_amount_rows,
            bad_amount_rows: sheet.bad_amount_rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
