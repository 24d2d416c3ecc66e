use anyhow::{Context, Result, anyhow};
use rust_xlsxwriter::Workbook;
use tracing::info;

use super::{COLUMN_HEADERS, SHEET_NAME, row_cells};
use crate::{config::ReportSettings, store::Registration};

/// Writes the records to an in-memory `.xlsx` workbook with a single sheet.
pub fn export_spreadsheet(records: &[Registration], settings: &ReportSettings) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    for (col, label) in COLUMN_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *label)
            .context("failed to write header")?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row: u32 = (idx + 1)
            .try_into()
            .map_err(|_| anyhow!("too many registrations for one worksheet"))?;
        for (col, value) in row_cells(record, &settings.utc_offset).iter().enumerate() {
            worksheet
                .write_string(row, col as u16, value)
                .context("failed to write registration cell")?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .context("failed to save workbook")?;
    info!(records = records.len(), size = bytes.len(), "rendered spreadsheet report");
    Ok(bytes)
}
