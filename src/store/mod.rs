//! External registration store.
//!
//! The hosted data service is reached only through [`RegistrationStore`], so
//! any backend that can create a record and list records can stand in for it.

mod backendless;
mod error;
mod models;

use std::future::Future;

pub use backendless::BackendlessStore;
pub use error::StoreError;
pub use models::{ListQuery, Registration, RegistrationFields, SortOrder};

pub trait RegistrationStore: Send + Sync {
    /// Persists one submission and returns the store-assigned id when the
    /// store reports one.
    fn create(
        &self,
        payload: &RegistrationFields,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    fn query_all(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<Registration>, StoreError>> + Send;
}
