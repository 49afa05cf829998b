//! Request plumbing shared by the directory adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::ports::DirectorySourceError;

/// Client for one directory; `timeout` bounds each request when set.
pub(super) fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder();
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
    .build()
}

/// Append path `segments` to `base`, keeping any path prefix it carries.
pub(super) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, DirectorySourceError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DirectorySourceError::transport(format!("invalid base URL {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send `request` and decode a successful JSON body into `T`.
pub(super) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, DirectorySourceError> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    decode(body.as_ref())
}

pub(super) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DirectorySourceError> {
    serde_json::from_slice(body).map_err(|error| DirectorySourceError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> DirectorySourceError {
    if error.is_timeout() {
        DirectorySourceError::transport(format!("timed out: {error}"))
    } else {
        DirectorySourceError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> DirectorySourceError {
    DirectorySourceError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
