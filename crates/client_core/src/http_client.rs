use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{EmployeeRecord, RecordId},
    error::ApiError,
    protocol::{EmployeeUpdate, NewEmployee},
};
use tracing::{debug, warn};
use url::Url;

use crate::record_client::{RecordClient, RecordClientError};

/// [`RecordClient`] over the backend's REST collection endpoint.
pub struct HttpRecordClient {
    http: Client,
    base_url: Url,
}

impl HttpRecordClient {
    pub fn new(base_url: &str) -> Result<Self, RecordClientError> {
        let invalid = |reason: String| RecordClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        // `http://host/employees/` and `http://host/employees` name the same
        // collection.
        match parsed.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty();
            }
            Err(()) => return Err(invalid("url cannot carry a path".to_string())),
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the collection url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, RecordClientError> {
        let request = request
            .build()
            .map_err(|e| RecordClientError::Transport(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "making request");

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "request failed");
            RecordClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "response received");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|err| err.message)
            .unwrap_or(body);
        warn!(%method, %url, status = status.as_u16(), %message, "api error");
        Err(match status {
            StatusCode::NOT_FOUND => RecordClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                RecordClientError::Validation(message)
            }
            _ => RecordClientError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RecordClientError> {
        self.execute(request)
            .await?
            .json()
            .await
            .map_err(|e| RecordClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, RecordClientError> {
        self.execute_json(self.http.get(self.base_url.clone()))
            .await
    }

    async fn search_by_id(&self, employee_id: &str) -> Result<EmployeeRecord, RecordClientError> {
        let url = self.endpoint(&["search", employee_id]);
        self.execute_json(self.http.get(url)).await
    }

    async fn create(&self, employee: &NewEmployee) -> Result<EmployeeRecord, RecordClientError> {
        self.execute_json(self.http.post(self.base_url.clone()).json(employee))
            .await
    }

    async fn update_by_id(
        &self,
        id: RecordId,
        update: &EmployeeUpdate,
    ) -> Result<EmployeeRecord, RecordClientError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()]);
        self.execute_json(self.http.put(url).json(update)).await
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<(), RecordClientError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()]);
        self.execute(self.http.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/http_client_tests.rs"]
mod tests;
