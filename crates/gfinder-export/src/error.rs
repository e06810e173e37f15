use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there are no results to export")]
    Empty,

    #[error("failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
