use chrono::NaiveDate;
use gfinder_core::EnrichedContact;
use rust_xlsxwriter::{Format, Workbook};

use crate::ExportError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SHEET_NAME: &str = "Clientes";

/// Header row, one label per column.
pub const HEADERS: [&str; 2] = ["Nome", "Telefone"];

const NAME_COLUMN_WIDTH: f64 = 40.0;
const PHONE_COLUMN_WIDTH: f64 = 22.0;

/// Serializes `contacts` into an `.xlsx` workbook, one row per contact in
/// the order given, below a bold header row.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] for an empty slice and
/// [`ExportError::Xlsx`] if the workbook cannot be written.
pub fn export_xlsx(contacts: &[EnrichedContact]) -> Result<Vec<u8>, ExportError> {
    if contacts.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        sheet.set_column_width(0, NAME_COLUMN_WIDTH)?;
        sheet.set_column_width(1, PHONE_COLUMN_WIDTH)?;

        for (col, label) in (0u16..).zip(HEADERS) {
            sheet.write_string_with_format(0, col, label, &header_format)?;
        }

        for (row, contact) in (1u32..).zip(contacts) {
            sheet.write_string(row, 0, &contact.name)?;
            sheet.write_string(row, 1, &contact.phone)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = contacts.len(), bytes = bytes.len(), "xlsx export built");
    Ok(bytes)
}

/// Download filename for an export produced on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("g-finder-results-{}.xlsx", date.format("%Y-%m-%d"))
}
