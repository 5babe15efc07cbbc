use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;

use crate::model::{ArchivePayload, ArchiveQuery};

use super::{ArchiveClient, TransportError};

pub const DEFAULT_ENDPOINT: &str = "https://archive-api.open-meteo.com/v1/archive";

#[derive(Debug, Clone)]
pub struct OpenMeteoArchive {
    endpoint: String,
    http: Client,
}

impl OpenMeteoArchive {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The GET request for `query`, not yet sent.
    pub fn request(&self, query: &ArchiveQuery) -> Result<Request, TransportError> {
        let mut params = query.params();
        // `time` must come back as unix seconds, not ISO strings.
        params.push(("timeformat", "unixtime".to_string()));

        Ok(self.http.get(&self.endpoint).query(&params).build()?)
    }
}

impl Default for OpenMeteoArchive {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT.to_string())
    }
}

/// Error body the archive sends alongside a 4xx.
#[derive(Debug, Deserialize)]
struct OmError {
    reason: String,
}

#[async_trait]
impl ArchiveClient for OpenMeteoArchive {
    async fn fetch_hourly(&self, query: &ArchiveQuery) -> Result<ArchivePayload, TransportError> {
        let request = self.request(query)?;
        debug!("GET {}", request.url());

        let res = self.http.execute(request).await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        decode_payload(&body)
    }
}

/// Map a non-2xx response to an error, preferring the archive's `reason`.
pub(crate) fn status_error(status: StatusCode, body: &str) -> TransportError {
    let body = serde_json::from_str::<OmError>(body)
        .map(|e| e.reason)
        .unwrap_or_else(|_| truncate_body(body));

    TransportError::Status { status, body }
}

pub(crate) fn decode_payload(body: &str) -> Result<ArchivePayload, TransportError> {
    let payload: ArchivePayload = serde_json::from_str(body)?;

    if let Some(hourly) = &payload.hourly
        && !hourly.is_aligned()
    {
        return Err(TransportError::Misaligned {
            times: hourly.time.len(),
            temperatures: hourly.temperature_2m.len(),
        });
    }

    debug!(
        "Archive returned {} hourly rows",
        payload.hourly.as_ref().map_or(0, |h| h.len())
    );

    Ok(payload)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
