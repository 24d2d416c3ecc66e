//! Registration form submission.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    store::{RegistrationFields, RegistrationStore, StoreError},
    web::responses::Notice,
};

pub const REGISTERED: Notice = Notice::success(
    "Registrasi Berhasil!",
    "Terima kasih telah mendaftar untuk acara KKR",
);
pub const INCOMPLETE: Notice = Notice::error(
    "Data Tidak Lengkap",
    "Mohon isi semua field yang diperlukan",
);
pub const SEND_FAILED: Notice = Notice::error(
    "Error",
    "Terjadi kesalahan saat mengirim data. Silakan coba lagi.",
);

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("failed to store registration: {0}")]
    Store(#[from] StoreError),
}

impl SubmitError {
    pub fn notice(&self) -> Notice {
        match self {
            SubmitError::MissingFields(_) => INCOMPLETE,
            SubmitError::Store(_) => SEND_FAILED,
        }
    }
}

#[derive(Debug)]
pub struct Submitted {
    pub object_id: Option<String>,
    pub notice: Notice,
}

/// Sends the form to the store once. The form is cleared only after the store
/// accepts it; on any failure it keeps what the attendee typed.
pub async fn submit<S>(store: &S, form: &mut RegistrationFields) -> Result<Submitted, SubmitError>
where
    S: RegistrationStore,
{
    let missing = form.missing_fields();
    if !missing.is_empty() {
        warn!(?missing, "registration rejected before sending");
        return Err(SubmitError::MissingFields(missing));
    }

    match store.create(form).await {
        Ok(object_id) => {
            info!(object_id = ?object_id, "registration stored");
            form.clear();
            Ok(Submitted {
                object_id,
                notice: REGISTERED,
            })
        }
        Err(err) => {
            error!(?err, "submission error");
            Err(SubmitError::Store(err))
        }
    }
}
