//! Shared JSON-over-HTTP call used by every collaborator client

use super::CollaboratorError;
use serde::de::DeserializeOwned;

/// Send `request`, check the status, and decode the JSON body
///
/// Transport errors are stripped of the request URL before they are
/// formatted; error text ends up in client-facing responses.
///
/// # Errors
/// * `Transport` if the request cannot be sent or the body cannot be read
/// * `RateLimited` / `Status` for a non-success HTTP status
/// * `Decode` if the body is not the expected JSON
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, CollaboratorError> {
    let response = request.send().await.map_err(|e| {
        CollaboratorError::Transport(format!(
            "Failed to send HTTP request to {}: {}",
            service,
            e.without_url()
        ))
    })?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        tracing::error!(
            service = %service,
            status_code = status_code,
            error_body = %error_body,
            "Collaborator returned error status"
        );

        return Err(CollaboratorError::from_status(service, status_code, error_body));
    }

    let body = response.text().await.map_err(|e| {
        CollaboratorError::Transport(format!(
            "Failed to read response body from {}: {}",
            service,
            e.without_url()
        ))
    })?;

    serde_json::from_str(&body).map_err(|e| CollaboratorError::Decode {
        service: service.to_string(),
        message: format!("{} - Response body: {}", e, body),
    })
}
