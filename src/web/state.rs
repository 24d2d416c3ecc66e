use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    config::{AdminSecret, AppConfig, ReportSettings},
    report::{self, RegistrationBoard},
    store::{BackendlessStore, ListQuery, Registration},
    web::responses::Notice,
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    store: BackendlessStore,
    board: Arc<RwLock<RegistrationBoard>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = BackendlessStore::new(&config.store.base_url, &config.store.table);
        Self {
            config: Arc::new(config),
            store,
            board: Arc::new(RwLock::new(RegistrationBoard::default())),
        }
    }

    pub fn store(&self) -> &BackendlessStore {
        &self.store
    }

    pub fn admin_secret(&self) -> &AdminSecret {
        &self.config.admin_secret
    }

    pub fn report_settings(&self) -> &ReportSettings {
        &self.config.report
    }

    pub fn list_query(&self) -> ListQuery {
        ListQuery::newest_first(self.config.store.page_size)
    }

    /// Reloads the listing from the store. The lock is only taken once the
    /// response is in, so the last response to arrive wins.
    pub async fn refresh_board(&self) -> (RegistrationBoard, Option<Notice>) {
        let result = report::load_all(&self.store, &self.list_query()).await;
        let mut guard = self.board.write().await;
        let notice = guard.apply(result, Utc::now());
        (guard.clone(), notice)
    }

    /// Records already on the board; exports never go back to the store.
    pub async fn board_snapshot(&self) -> Vec<Registration> {
        let guard = self.board.read().await;
        guard.records().to_vec()
    }
}
