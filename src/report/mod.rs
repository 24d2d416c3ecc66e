//! Admin listing and exports of the registration records.

mod pdf;
mod spreadsheet;

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use tracing::{error, info};

use crate::{
    store::{ListQuery, Registration, RegistrationStore, StoreError},
    web::responses::Notice,
};

pub use pdf::export_pdf;
pub use spreadsheet::export_spreadsheet;

pub const PDF_FILENAME: &str = "registrasi-kkr.pdf";
pub const XLSX_FILENAME: &str = "registrasi-kkr.xlsx";
pub const REPORT_TITLE: &str = "Data Registrasi KKR";
pub const SHEET_NAME: &str = "Registrasi KKR";
pub const COLUMN_HEADERS: [&str; 5] = ["Nama", "Sekolah", "Instagram", "Nomor HP", "Tanggal Daftar"];

pub const LOAD_FAILED: Notice = Notice::error("Error", "Gagal mengambil data registrasi");

/// Fetches every record, newest first.
pub async fn load_all<S>(store: &S, query: &ListQuery) -> Result<Vec<Registration>, StoreError>
where
    S: RegistrationStore,
{
    let mut records = store.query_all(query).await?;
    // The store is asked for `created desc`; re-sort so any backend honours it.
    records.sort_by(|a, b| b.created.cmp(&a.created));
    Ok(records)
}

/// Last successfully loaded listing shown on the admin panel.
#[derive(Clone, Debug, Default)]
pub struct RegistrationBoard {
    records: Vec<Registration>,
    loaded_at: Option<DateTime<Utc>>,
}

impl RegistrationBoard {
    pub fn records(&self) -> &[Registration] {
        &self.records
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Replaces the listing on success. On failure the previous listing is
    /// kept and the returned notice describes the error.
    pub fn apply(
        &mut self,
        result: Result<Vec<Registration>, StoreError>,
        now: DateTime<Utc>,
    ) -> Option<Notice> {
        match result {
            Ok(records) => {
                info!(count = records.len(), "registration listing refreshed");
                self.records = records;
                self.loaded_at = Some(now);
                None
            }
            Err(err) => {
                error!(?err, "error fetching registrations");
                Some(LOAD_FAILED)
            }
        }
    }
}

/// Short date in the Indonesian locale, e.g. `19/10/2026`.
pub fn format_id_date<Tz: TimeZone>(instant: &DateTime<Tz>, offset: &FixedOffset) -> String {
    let local = instant.with_timezone(offset);
    format!("{}/{}/{}", local.day(), local.month(), local.year())
}

/// Cells of one report row, in column order.
pub fn row_cells(record: &Registration, offset: &FixedOffset) -> [String; 5] {
    [
        record.fields.nama.clone(),
        record.fields.sekolah.clone(),
        record.fields.instagram.clone(),
        record.fields.no_hp.clone(),
        format_id_date(&record.created, offset),
    ]
}
