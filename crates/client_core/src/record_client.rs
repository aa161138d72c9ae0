use async_trait::async_trait;
use shared::{
    domain::{EmployeeRecord, RecordId},
    protocol::{EmployeeUpdate, NewEmployee},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rejected by server: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl RecordClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// CRUD operations against the remote employee collection.
#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, RecordClientError>;
    async fn search_by_id(&self, employee_id: &str) -> Result<EmployeeRecord, RecordClientError>;
    async fn create(&self, employee: &NewEmployee) -> Result<EmployeeRecord, RecordClientError>;
    async fn update_by_id(
        &self,
        id: RecordId,
        update: &EmployeeUpdate,
    ) -> Result<EmployeeRecord, RecordClientError>;
    async fn delete_by_id(&self, id: RecordId) -> Result<(), RecordClientError>;
}
