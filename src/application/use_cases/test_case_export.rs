use std::io::Cursor;

use calamine::{DataType, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::test_case::{column_union, TestCaseField, TestCaseRecord};

pub const SHEET_NAME: &str = "Test Cases";
pub const COLUMN_WIDTH: f64 = 20.0;
pub const HEADER_FILL: u32 = 0xD7E4BC;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv; charset=utf-8";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_MIME,
            ExportFormat::Csv => CSV_MIME,
        }
    }
}

fn export_err(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::ExportError(format!("{}: {}", context, err))
}

/// Builds a single-sheet workbook: a formatted header row with the union of
/// used columns, then one row per record.
pub fn export_xlsx(records: &[TestCaseRecord]) -> Result<Vec<u8>> {
    let columns = column_union(records);

    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| export_err("Failed to name worksheet", e))?;

    for (col, field) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, field.label(), &header_format)
            .map_err(|e| export_err("Failed to write header", e))?;
        worksheet
            .set_column_width(col, COLUMN_WIDTH)
            .map_err(|e| export_err("Failed to size column", e))?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, field) in columns.iter().enumerate() {
            worksheet
                .write_string(row, col as u16, record.get(*field).unwrap_or(""))
                .map_err(|e| export_err("Failed to write cell", e))?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| export_err("Failed to serialize workbook", e))?;

    debug!(
        records = records.len(),
        columns = columns.len(),
        bytes = bytes.len(),
        "Exported test cases workbook"
    );
    Ok(bytes)
}

/// Same layout as the workbook, as RFC 4180 CSV.
pub fn export_csv(records: &[TestCaseRecord]) -> Result<Vec<u8>> {
    let columns = column_union(records);
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(columns.iter().map(|field| field.label()))
        .map_err(|e| export_err("Failed to write CSV header", e))?;
    for record in records {
        writer
            .write_record(columns.iter().map(|field| record.get(*field).unwrap_or("")))
            .map_err(|e| export_err("Failed to write CSV row", e))?;
    }

    writer
        .into_inner()
        .map_err(|e| export_err("Failed to flush CSV", e))
}

pub fn export(records: &[TestCaseRecord], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Xlsx => export_xlsx(records),
        ExportFormat::Csv => export_csv(records),
    }
}

/// Cell text of the first sheet of an `.xlsx` buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetContents {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_xlsx(bytes: &[u8]) -> Result<SheetContents> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| {
                cell.as_string()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{}", cell))
            })
            .collect::<Vec<String>>()
    });

    let header = rows.next().unwrap_or_default();
    let rows = rows.collect();

    Ok(SheetContents {
        sheet_name,
        header,
        rows,
    })
}

/// Rebuilds records from a workbook. Unknown header columns are skipped and
/// empty cells leave their field unset.
pub fn import_xlsx(bytes: &[u8]) -> Result<Vec<TestCaseRecord>> {
    let contents = read_xlsx(bytes)?;
    let columns: Vec<Option<TestCaseField>> = contents
        .header
        .iter()
        .map(|label| TestCaseField::from_label(label))
        .collect();

    if !contents.header.is_empty() && columns.iter().all(Option::is_none) {
        return Err(AppError::ParseError(format!(
            "Sheet '{}' has no test case columns",
            contents.sheet_name
        )));
    }

    let records = contents
        .rows
        .iter()
        .map(|row| {
            let mut record = TestCaseRecord::new();
            for (cell, column) in row.iter().zip(columns.iter()) {
                if let Some(field) = column {
                    if !cell.is_empty() {
                        record.set(*field, cell.as_str());
                    }
                }
            }
            record
        })
        .filter(|record| !record.is_empty())
        .collect();

    Ok(records)
}
