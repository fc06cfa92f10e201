//! Reqwest plumbing shared by the upstream HTTP clients.
//!
//! Owns transport details only: URL building, JSON encoding and decoding,
//! and mapping statuses onto [`UpstreamError`]. Resource-specific paths live
//! in the individual clients.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{DeleteOutcome, UpstreamError};
use crate::domain::{TRACE_ID_HEADER, TraceId};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Build the reqwest client used by upstream adapters.
///
/// No request timeout is applied unless `timeout` is given.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder();
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}

/// One upstream service reached under a base URL.
#[derive(Debug, Clone)]
pub(crate) struct Upstream {
    client: Client,
    base: String,
}

impl Upstream {
    pub(crate) fn new(client: Client, base: &Url) -> Self {
        Self {
            client,
            base: base.as_str().trim_end_matches('/').to_owned(),
        }
    }

    /// `base + path`; `path` starts with `/`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, UpstreamError> {
        Url::parse(&format!("{}{path}", self.base))
            .map_err(|err| UpstreamError::transport(format!("invalid upstream URL: {err}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, UpstreamError> {
        let builder = self
            .client
            .request(method, self.url(path)?)
            .header(reqwest::header::ACCEPT, "application/json");
        Ok(match TraceId::current() {
            Some(id) => builder.header(TRACE_ID_HEADER, id.to_string()),
            None => builder,
        })
    }

    /// `GET path` and decode the JSON body.
    pub(crate) async fn get<T>(&self, path: &str, resource: &str) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        self.get_with_query::<T, [(&str, &str); 0]>(path, &[], resource)
            .await
    }

    /// `GET path?query` and decode the JSON body.
    pub(crate) async fn get_with_query<T, Q>(
        &self,
        path: &str,
        query: &Q,
        resource: &str,
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        let body = execute(builder, resource).await?;
        decode(&body)
    }

    /// Send `body` as JSON with `method` and decode the JSON response.
    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path)?.json(body);
        let response = execute(builder, resource).await?;
        decode(&response)
    }

    /// Send `body` as JSON and ignore the response body.
    pub(crate) async fn send_discarding<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<(), UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(method, path)?.json(body);
        execute(builder, resource).await.map(|_| ())
    }

    /// `DELETE path`; a 404 is [`DeleteOutcome::NotFound`].
    pub(crate) async fn delete(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<DeleteOutcome, UpstreamError> {
        let builder = self.request(Method::DELETE, path)?;
        match execute(builder, resource).await {
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(UpstreamError::NotFound { .. }) => Ok(DeleteOutcome::NotFound),
            Err(err) => Err(err),
        }
    }
}

async fn execute(builder: RequestBuilder, resource: &str) -> Result<Vec<u8>, UpstreamError> {
    let response = builder.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        let error = map_status_error(status, body.as_ref(), resource);
        debug!(status = status.as_u16(), kind = error.kind(), resource, "upstream call failed");
        return Err(error);
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, UpstreamError> {
    serde_json::from_slice(body).map_err(|err| {
        UpstreamError::decode(format!("{err}; body: {}", body_preview(body)))
    })
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    UpstreamError::transport(error.to_string())
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8], resource: &str) -> UpstreamError {
    if status == StatusCode::NOT_FOUND {
        return UpstreamError::not_found(resource, structured_message(body));
    }
    if status.is_client_error() {
        let message = error_message(body).unwrap_or_else(|| {
            let preview = body_preview(body);
            if preview.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                preview
            }
        });
        return UpstreamError::rejected(status.as_u16(), message);
    }
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    UpstreamError::transport(message)
}

/// The `message` of an error body shaped `{code, message}`.
fn structured_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("code")?.as_str()?;
    value
        .get("message")?
        .as_str()
        .filter(|message| !message.trim().is_empty())
        .map(str::to_owned)
}

/// The `message`, `error` or `detail` string of a JSON error body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error", "detail"]
        .into_iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_owned))
}

pub(crate) fn body_preview(body: &[u8]) -> String {
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
