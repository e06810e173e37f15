//! Spreadsheet export of a finished result list.
//!
//! The workbook layout (sheet name, header labels) matches what existing
//! users of the G-Finder download already expect to open.

mod error;
mod xlsx;

pub use error::ExportError;
pub use xlsx::{export_filename, export_xlsx, HEADERS, SHEET_NAME, XLSX_CONTENT_TYPE};
