//! Client side of the employee skill directory: the record client used to talk
//! to the backend, and the controller that owns the directory view state.

pub mod config;
pub mod controller;
pub mod form;
pub mod http_client;
pub mod notification;
pub mod record_client;
pub mod reducer;
pub mod state;

pub use config::{load_client_settings, ClientSettings, DEFAULT_API_URL};
pub use controller::{DeleteConfirmation, DirectoryController, DirectoryEvent, OperationOutcome};
pub use form::{EmployeeForm, FormError, FormField};
pub use http_client::HttpRecordClient;
pub use notification::{Notification, NotificationKind, NOTIFICATION_TTL};
pub use record_client::{RecordClient, RecordClientError};
pub use state::{DirectoryState, View, ViewMode};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
