use crate::{ArchivePayload, ArchiveQuery, Config, client::open_meteo::OpenMeteoArchive};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod open_meteo;

/// Anything that went wrong between sending the request and holding a
/// well-formed payload.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to the archive failed")]
    Request(#[from] reqwest::Error),

    #[error("Archive responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse archive response JSON")]
    Decode(#[from] serde_json::Error),

    #[error("Hourly series is misaligned: {times} timestamps, {temperatures} temperatures")]
    Misaligned { times: usize, temperatures: usize },
}

#[async_trait]
pub trait ArchiveClient: Send + Sync + Debug {
    async fn fetch_hourly(&self, query: &ArchiveQuery) -> Result<ArchivePayload, TransportError>;
}

#[async_trait]
impl<T: ArchiveClient + ?Sized> ArchiveClient for Box<T> {
    async fn fetch_hourly(&self, query: &ArchiveQuery) -> Result<ArchivePayload, TransportError> {
        (**self).fetch_hourly(query).await
    }
}

/// Construct the archive client pointed at the configured endpoint.
pub fn client_from_config(config: &Config) -> Box<dyn ArchiveClient> {
    Box::new(OpenMeteoArchive::new(config.endpoint().to_owned()))
}
