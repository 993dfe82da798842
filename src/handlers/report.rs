use askama::Template;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, RenderHtml};
use crate::filters;
use crate::models::{BudgetRow, Report};
use crate::services::sheet_reader;
use crate::state::AppState;
use crate::VERSION;

// Templates

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub version: &'static str,
    pub current_file: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/report.html")]
pub struct ReportTemplate {
    pub title: String,
    pub version: &'static str,
    pub file_name: String,
    pub generated_at: String,
    pub total_formatted: String,
    pub row_count: usize,
    pub top_rows: Vec<TopRowView>,
    pub blank_amount_rows: usize,
    pub bad_amount_rows: usize,
}

/// Display values for one row of the top-N table, all eight columns.
pub struct TopRowView {
    pub municipality: String,
    pub class: String,
    pub item_group: String,
    pub item_subgroup: String,
    pub item_label: String,
    pub planned: String,
    pub revised: String,
    pub actual: String,
}

impl TopRowView {
    fn from_row(row: &BudgetRow, locale: &str) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let number = |value: Option<f64>| {
            value
                .map(|n| filters::format_number(n, locale))
                .unwrap_or_default()
        };

        Self {
            municipality: text(&row.municipality),
            class: text(&row.class),
            item_group: text(&row.item_group),
            item_subgroup: text(&row.item_subgroup),
            item_label: text(&row.item_label),
            planned: number(row.planned),
            revised: number(row.revised),
            actual: filters::format_number(row.actual, locale),
        }
    }
}

// Handlers

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let template = IndexTemplate {
        title: "Nahrání výkazu".into(),
        version: VERSION,
        current_file: state.reports.current().map(|r| r.file_name.clone()),
    };

    template.render_html()
}

pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> AppResult<Redirect> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());

        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?
            .to_vec();

        if !content.is_empty() {
            debug!(file_name = %file_name, size_bytes = content.len(), "Received revenue sheet");
            upload = Some((file_name, content));
        }
    }

    let Some((file_name, content)) = upload else {
        warn!("No file in upload request");
        return Err(AppError::MalformedInput("No file was uploaded".into()));
    };

    // One synchronous pipeline pass; the finished report replaces any
    // previous one wholesale.
    let sheet = sheet_reader::read_sheet(&file_name, &content)?;
    let report = Report::from_sheet(
        &file_name,
        sheet,
        &state.config.currency,
        &state.config.locale,
    );

    info!(
        report_id = %report.id,
        file_name = %file_name,
        row_count = report.row_count(),
        blank_amount_rows = report.blank_amount_rows,
        bad_amount_rows = report.bad_amount_rows,
        "Report generated"
    );

    state.reports.replace(report);

    Ok(Redirect::to("/report"))
}

pub async fn show(State(state): State<AppState>) -> AppResult<Response> {
    let Some(report) = state.reports.current() else {
        debug!("No report yet, redirecting to upload page");
        return Ok(Redirect::to("/").into_response());
    };

    let locale = &state.config.locale;

    let template = ReportTemplate {
        title: "Přehled příjmů".into(),
        version: VERSION,
        file_name: report.file_name.clone(),
        generated_at: report.generated_at.format("%Y-%m-%d %H:%M").to_string(),
        total_formatted: filters::format_amount(report.total, &state.config.currency, locale),
        row_count: report.row_count(),
        top_rows: report
            .top_rows
            .iter()
            .map(|r| TopRowView::from_row(r, locale))
            .collect(),
        blank_amount_rows: report.blank_amount_rows,
        bad_amount_rows: report.bad_amount_rows,
    };

    Ok(template.render_html()?.into_response())
}
