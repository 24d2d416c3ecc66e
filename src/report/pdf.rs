use std::{io::Cursor, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use docx_rs::{Docx, Paragraph, Run, Shading, Table, TableCell, TableRow};
use tokio::fs as tokio_fs;
use tracing::{info, warn};
use uuid::Uuid;

use super::{COLUMN_HEADERS, REPORT_TITLE, format_id_date, row_cells};
use crate::{config::ReportSettings, store::Registration, utils::docx_to_pdf::convert_docx_to_pdf};

const TITLE_COLOR: &str = "D4AF37";
const SUBTITLE_COLOR: &str = "646464";
const HEADER_FILL: &str = "1E40AF";
const HEADER_TEXT: &str = "FFFFFF";
const ALTERNATE_FILL: &str = "F8FAFC";
// Run sizes are in half-points.
const TITLE_SIZE: usize = 36;
const SUBTITLE_SIZE: usize = 24;
const CELL_SIZE: usize = 16;

/// Lays out the report as a Word document: title, count, export date and one
/// grid row per record.
pub fn build_report_docx(
    records: &[Registration],
    now: DateTime<Utc>,
    settings: &ReportSettings,
) -> Docx {
    let title = Paragraph::new().add_run(
        Run::new()
            .add_text(REPORT_TITLE)
            .size(TITLE_SIZE)
            .color(TITLE_COLOR)
            .bold(),
    );
    let total = subtitle(format!("Total Registrasi: {}", records.len()));
    let exported = subtitle(format!(
        "Tanggal Export: {}",
        format_id_date(&now, &settings.utc_offset)
    ));

    let header = TableRow::new(
        COLUMN_HEADERS
            .iter()
            .map(|label| {
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(
                        Run::new()
                            .add_text(*label)
                            .size(CELL_SIZE)
                            .color(HEADER_TEXT)
                            .bold(),
                    ))
                    .shading(Shading::new().fill(HEADER_FILL))
            })
            .collect(),
    );

    let mut rows = vec![header];
    for (idx, record) in records.iter().enumerate() {
        let cells = row_cells(record, &settings.utc_offset)
            .into_iter()
            .map(|text| {
                let cell = TableCell::new().add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text(text).size(CELL_SIZE)),
                );
                if idx % 2 == 1 {
                    cell.shading(Shading::new().fill(ALTERNATE_FILL))
                } else {
                    cell
                }
            })
            .collect();
        rows.push(TableRow::new(cells));
    }

    Docx::new()
        .add_paragraph(title)
        .add_paragraph(total)
        .add_paragraph(exported)
        .add_paragraph(Paragraph::new())
        .add_table(Table::new(rows))
}

fn subtitle(text: String) -> Paragraph {
    Paragraph::new().add_run(
        Run::new()
            .add_text(text)
            .size(SUBTITLE_SIZE)
            .color(SUBTITLE_COLOR),
    )
}

fn pack_docx(docx: Docx) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    docx.build()
        .pack(Cursor::new(&mut buffer))
        .context("failed to pack report DOCX")?;
    Ok(buffer)
}

/// Renders the records to PDF bytes through a scratch DOCX and LibreOffice.
pub async fn export_pdf(
    records: &[Registration],
    now: DateTime<Utc>,
    settings: &ReportSettings,
) -> Result<Vec<u8>> {
    let docx_bytes = pack_docx(build_report_docx(records, now, settings))?;

    let work_dir = std::env::temp_dir().join(format!("kkr-export-{}", Uuid::new_v4()));
    tokio_fs::create_dir_all(&work_dir)
        .await
        .with_context(|| format!("failed to create {}", work_dir.display()))?;

    let result = convert_in(&work_dir, &docx_bytes, &settings.soffice_bin).await;

    if let Err(err) = tokio_fs::remove_dir_all(&work_dir).await {
        warn!(?err, dir = %work_dir.display(), "failed to clean export directory");
    }

    let bytes = result?;
    info!(records = records.len(), size = bytes.len(), "rendered PDF report");
    Ok(bytes)
}

async fn convert_in(work_dir: &Path, docx_bytes: &[u8], soffice_bin: &str) -> Result<Vec<u8>> {
    let docx_path = work_dir.join("registrasi-kkr.docx");
    tokio_fs::write(&docx_path, docx_bytes)
        .await
        .with_context(|| format!("failed to write {}", docx_path.display()))?;
    let pdf_path = convert_docx_to_pdf(soffice_bin, &docx_path).await?;
    tokio_fs::read(&pdf_path)
        .await
        .with_context(|| format!("failed to read {}", pdf_path.display()))
}
