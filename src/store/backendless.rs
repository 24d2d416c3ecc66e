use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ListQuery, Registration, RegistrationFields, RegistrationStore, StoreError};

/// Backendless REST data API bound to a single table.
#[derive(Clone)]
pub struct BackendlessStore {
    http: Client,
    table_url: String,
}

#[derive(Deserialize)]
struct CreatedObject {
    #[serde(rename = "objectId")]
    object_id: Option<String>,
}

impl BackendlessStore {
    pub fn new(base_url: &str, table: &str) -> Self {
        Self::with_client(Client::new(), base_url, table)
    }

    pub fn with_client(http: Client, base_url: &str, table: &str) -> Self {
        Self {
            http,
            table_url: format!("{}/api/data/{}", base_url.trim_end_matches('/'), table),
        }
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }
}

impl RegistrationStore for BackendlessStore {
    async fn create(&self, payload: &RegistrationFields) -> Result<Option<String>, StoreError> {
        let response = self.http.post(&self.table_url).json(payload).send().await?;
        let body = success_body(response).await?;

        match serde_json::from_str::<CreatedObject>(&body) {
            Ok(created) => Ok(created.object_id),
            Err(err) => {
                // The write already succeeded; an unreadable echo is not a failure.
                warn!(?err, "store accepted record but response body was not understood");
                Ok(None)
            }
        }
    }

    async fn query_all(&self, query: &ListQuery) -> Result<Vec<Registration>, StoreError> {
        let page_size = query.page_size.to_string();
        let response = self
            .http
            .get(&self.table_url)
            .query(&[
                ("pageSize", page_size.as_str()),
                ("sortBy", query.order.as_param()),
            ])
            .send()
            .await?;
        let body = success_body(response).await?;

        let records: Vec<Registration> = serde_json::from_str(&body)?;
        debug!(count = records.len(), "fetched registrations from store");
        Ok(records)
    }
}

async fn success_body(response: Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
