//! CSV report export
use chrono::NaiveDate;
use thiserror::Error;
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::shared::date_utils::format_iso_day;
use crate::shared::downloads::trigger_anchor_download;

/// Types that can be written as report rows
pub trait CsvExportable {
    /// Column headers, in display order
    fn headers() -> Vec<&'static str>;

    /// Row values, aligned with `headers()`
    fn to_csv_row(&self) -> Vec<String>;
}

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,
    #[error("Download failed: {0}")]
    Download(String),
}

/// Every cell is quoted; quotes inside the value are doubled
fn quote_cell(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|cell| quote_cell(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build CSV text: header row plus one row per record
pub fn build_csv<T: CsvExportable>(data: &[T]) -> Result<String, ExportError> {
    if data.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut csv = csv_line(&T::headers());
    csv.push('\n');
    for item in data {
        csv.push_str(&csv_line(&item.to_csv_row()));
        csv.push('\n');
    }
    Ok(csv)
}

/// Report file name for a given day, e.g. "lab_report_2024-05-01.csv"
pub fn report_file_name(day: NaiveDate) -> String {
    format!("lab_report_{}.csv", format_iso_day(day))
}

/// Build the CSV and hand it to the browser as a download
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), ExportError> {
    let csv = build_csv(data)?;
    let blob = create_csv_blob(&csv).map_err(ExportError::Download)?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| ExportError::Download(format!("Failed to create object URL: {:?}", e)))?;
    let result = trigger_anchor_download(&url, filename).map_err(ExportError::Download);
    let _ = Url::revoke_object_url(&url);

    log::info!("Exported {} rows to {}", data.len(), filename);
    result
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}
