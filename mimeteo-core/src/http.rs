//! Fetch-and-decode helper used by every provider.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::ports::PortError;

/// Send `req` and decode the body as JSON into `T`.
///
/// The body is read fully before decoding so that a transport failure and a
/// malformed payload surface as different [`PortError`] variants.
///
/// # Errors
///
/// - [`PortError::Network`] when the request or the body read fails.
/// - [`PortError::Upstream`] when the status is not 2xx.
/// - [`PortError::Decode`] when the body does not decode into `T`.
pub async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    let resp = req.send().await?;

    let status = resp.status();
    if !status.is_success() {
        tracing::debug!(url = %resp.url(), %status, "upstream rejected request");
        return Err(PortError::Upstream {
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(PortError::from)
}
