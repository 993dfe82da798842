use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::filters;
use crate::models::Report;
use crate::services::analytics::UNKNOWN_LABEL;
use crate::services::flow::FlowGraph;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the plotted top-N subtotal, in percent.
    pub percentage: f64,
    pub percentage_formatted: String,
    pub formatted: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
    pub formatted: String,
}

fn current_report(state: &AppState) -> AppResult<Arc<Report>> {
    state
        .reports
        .current()
        .ok_or_else(|| AppError::MissingInput("No revenue sheet has been uploaded yet".into()))
}

/// Pie chart input: the top-N revenue items by actual amount.
pub async fn top_items(State(state): State<AppState>) -> AppResult<Json<Vec<PieSlice>>> {
    let report = current_report(&state)?;
    let top_total: f64 = report.top_rows.iter().map(|r| r.actual).sum();

    let slices = report
        .top_rows
        .iter()
        .map(|row| {
            let percentage = if top_total > 0.0 {
                row.actual / top_total * 100.0
            } else {
                0.0
            };

            PieSlice {
                label: row
                    .item_label
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                value: row.actual,
                percentage,
                percentage_formatted: filters::format_percent(percentage, &state.config.locale),
                formatted: filters::format_amount(
                    row.actual,
                    &state.config.currency,
                    &state.config.locale,
                ),
            }
        })
        .collect();

    Ok(Json(slices))
}

/// Bar chart input: summed actual amount per class, descending.
pub async fn classes(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryTotal>>> {
    let report = current_report(&state)?;
    Ok(Json(category_totals(&state, &report.class_totals)))
}

/// Bar chart input: the top-N item groups by summed actual amount.
pub async fn item_groups(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryTotal>>> {
    let report = current_report(&state)?;
    Ok(Json(category_totals(&state, &report.item_group_totals)))
}

/// Sankey input: class → item-group flow graph.
pub async fn flow(State(state): State<AppState>) -> AppResult<Json<FlowGraph>> {
    let report = current_report(&state)?;
    Ok(Json(report.flow.clone()))
}

fn category_totals(
    state: &AppState,
    aggregates: &[crate::services::analytics::AggregateRow],
) -> Vec<CategoryTotal> {
    aggregates
        .iter()
        .map(|a| CategoryTotal {
            name: a.key.clone(),
            total: a.total,
            formatted: filters::format_amount(a.total, &state.config.currency, &state.config.locale),
        })
        .collect()
}
