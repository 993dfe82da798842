//! Revenue sheet ingestion.
//!
//! Reads the first sheet of an uploaded workbook (or a CSV export of the
//! same layout), skips the title block, assigns semantic names to the
//! first eight columns by position, and drops rows without a usable
//! actual amount.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Reader};
use tracing::{debug, trace, warn};

use crate::error::AppError;
use crate::models::row::{BudgetRow, SHEET_COLUMNS, SHEET_COLUMN_COUNT};

/// Number of leading title/header-block rows above the real column header.
/// The header row itself is also skipped, so data starts at sheet row 12.
pub const HEADER_SKIP_ROWS: usize = 10;

#[derive(Debug)]
pub struct ReadResult {
    pub rows: Vec<BudgetRow>,
    /// Rows dropped because the actual-amount cell was blank.
    pub blank_amount_rows: usize,
    /// Rows dropped because the actual-amount cell failed numeric coercion.
    pub bad_amount_rows: usize,
}

pub fn read_sheet(file_name: &str, content: &[u8]) -> Result<ReadResult, AppError> {
    trace!(file_name, content_size = content.len(), "Reading revenue sheet");

    let extension = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let raw_rows = match extension.as_str() {
        "xlsx" | "xls" | "ods" => workbook_rows(content)?,
        "csv" => csv_rows(content)?,
        other => {
            return Err(AppError::MalformedInput(format!(
                "Unsupported file format '.{}', expected .xlsx, .xls, .ods or .csv",
                other
            )))
        }
    };

    if raw_rows.len() <= HEADER_SKIP_ROWS {
        return Err(AppError::MalformedInput(format!(
            "Sheet has {} rows, expected a {}-row title block followed by a header row",
            raw_rows.len(),
            HEADER_SKIP_ROWS
        )));
    }

    let header = &raw_rows[HEADER_SKIP_ROWS];
    if header.len() < SHEET_COLUMN_COUNT {
        return Err(AppError::MalformedInput(format!(
            "Header row has {} columns, expected at least {} ({})",
            header.len(),
            SHEET_COLUMN_COUNT,
            SHEET_COLUMNS.join(", ")
        )));
    }

    debug!(
        total_rows = raw_rows.len(),
        columns = header.len(),
        "Sheet header located"
    );

    let mut rows = Vec::new();
    let mut blank_amount_rows = 0;
    let mut bad_amount_rows = 0;

    for (index, cells) in raw_rows.iter().enumerate().skip(HEADER_SKIP_ROWS + 1) {
        let row_number = index + 1;
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");

        let actual_raw = cell(7);
        if actual_raw.is_empty() {
            blank_amount_rows += 1;
            continue;
        }
        let Some(actual) = parse_amount(actual_raw) else {
            warn!(
                row_number,
                value = actual_raw,
                "Dropping row with non-numeric actual amount"
            );
            bad_amount_rows += 1;
            continue;
        };

        rows.push(BudgetRow {
            municipality: non_empty(cell(0)),
            class: non_empty(cell(1)),
            item_group: non_empty(cell(2)),
            item_subgroup: non_empty(cell(3)),
            item_label: non_empty(cell(4)),
            planned: parse_amount(cell(5)),
            revised: parse_amount(cell(6)),
            actual,
            row_number,
        });
    }

    if bad_amount_rows > 0 {
        warn!(
            bad_amount_rows,
            "Sheet contained non-numeric actual amounts"
        );
    }
    debug!(
        row_count = rows.len(),
        blank_amount_rows, bad_amount_rows, "Revenue sheet read"
    );

    Ok(ReadResult {
        rows,
        blank_amount_rows,
        bad_amount_rows,
    })
}

/// First sheet of an xlsx/xls/ods workbook as trimmed text cells.
/// Empty cells become empty strings.
fn workbook_rows(content: &[u8]) -> Result<Vec<Vec<String>>, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content))
        .map_err(|e| AppError::MalformedInput(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| AppError::MalformedInput("Workbook contains no sheets".into()))?;

    let range = workbook.worksheet_range(&first_sheet).map_err(|e| {
        AppError::MalformedInput(format!("Failed to read sheet '{}': {}", first_sheet, e))
    })?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| trim_cell(&cell.to_string())).collect())
        .collect())
}

fn csv_rows(content: &[u8]) -> Result<Vec<Vec<String>>, AppError> {
    let text = std::str::from_utf8(content)
        .map_err(|e| AppError::MalformedInput(format!("CSV is not valid UTF-8: {}", e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| AppError::MalformedInput(format!("Failed to read CSV row: {}", e)))?;
        rows.push(record.iter().map(trim_cell).collect());
    }
    Ok(rows)
}

fn trim_cell(cell: &str) -> String {
    cell.trim().trim_start_matches('\u{feff}').trim().to_string()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Coerce a raw amount cell to a number. Blank or unparseable cells
/// become `None` and the caller decides whether that drops the row.
fn parse_amount(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    clean_amount(value).parse::<f64>().ok()
}

/// Strip currency symbols, spaces and thousands separators from a raw
/// amount, normalizing the decimal separator to '.'.
///
/// When both '.' and ',' appear, the later one is the decimal separator.
/// A separator that repeats is a thousands separator, not a decimal point.
fn clean_amount(amount: &str) -> String {
    let decimal_char = match (amount.rfind('.'), amount.rfind(',')) {
        (Some(d), Some(c)) => Some(if d > c { '.' } else { ',' }),
        (Some(_), None) => Some('.'),
        (None, Some(_)) => Some(','),
        (None, None) => None,
    };
    let decimal_char = decimal_char.filter(|&c| amount.matches(c).count() == 1);

    let mut cleaned = String::new();
    for c in amount.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if Some(c) == decimal_char && !cleaned.contains('.') {
            cleaned.push('.');
        } else if c == '-' && cleaned.is_empty() {
            cleaned.push('-');
        }
    }
    cleaned
}
