//! Reads the first sheet of the directory workbook (or a CSV export) into
//! physician records.
//!
//! Header names and cell values are trimmed: the source sheet ships
//! `" ADDRESS LINE 2"` with a leading space. Integral numbers are rendered
//! without a fractional part so zip codes stay `94596`.

use crate::config::toml_config::{ColumnMapping, InputConfig};
use crate::domain::model::PhysicianRecord;
use crate::utils::error::{DirectoryError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::io::Read;
use std::path::Path;

/// Header row plus data rows, all as text.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 依副檔名讀取試算表或 CSV，再轉成醫師資料
pub fn load_records(input: &InputConfig) -> Result<Vec<PhysicianRecord>> {
    let table = RawTable::from_path(&input.path)?;
    tracing::debug!(
        "Read {} rows with headers: {}",
        table.rows.len(),
        table.headers.join(", ")
    );
    table.into_records(&input.columns, &input.na_values)
}

impl RawTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?),
            "xls" | "xlsx" | "xlsm" | "ods" => Self::from_workbook(path),
            _ => Err(DirectoryError::UnsupportedInputError {
                path: path.display().to_string(),
            }),
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    /// 只讀第一個工作表
    pub fn from_workbook(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DirectoryError::EmptyWorkbookError {
                path: path.display().to_string(),
            })??;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(cell_text).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<String>> = rows.map(|row| row.iter().map(cell_text).collect()).collect();

        Ok(Self { headers, rows })
    }

    /// Maps columns onto records. Any mapped header missing from the sheet is
    /// an error; missing cells and `na_values` become empty strings.
    pub fn into_records(self, columns: &ColumnMapping, na_values: &[String]) -> Result<Vec<PhysicianRecord>> {
        let mut indices = Vec::with_capacity(11);
        for (_, header) in columns.headers() {
            let header = header.trim();
            let index = self
                .headers
                .iter()
                .position(|h| h == header)
                .ok_or_else(|| DirectoryError::MissingColumnError {
                    column: header.to_string(),
                    available: self.headers.join(", "),
                })?;
            indices.push(index);
        }

        let mut records = Vec::with_capacity(self.rows.len());
        let mut blank_rows = 0;

        for row in &self.rows {
            if row.iter().all(|v| v.is_empty()) {
                blank_rows += 1;
                continue;
            }

            let field = |position: usize| -> String {
                match row.get(indices[position]) {
                    Some(value) if !na_values.iter().any(|na| na == value) => value.clone(),
                    _ => String::new(),
                }
            };

            records.push(PhysicianRecord {
                last_name: field(0),
                first_name: field(1),
                title: field(2),
                specialty: field(3),
                address_line1: field(4),
                address_line2: field(5),
                city: field(6),
                state: field(7),
                zip: field(8),
                office_phone: field(9),
                office_fax: field(10),
            });
        }

        if blank_rows > 0 {
            tracing::debug!("Skipped {} blank rows", blank_rows);
        }

        Ok(records)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        // #N/A、#DIV/0! 等錯誤儲存格視為空值
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}
