//! Core library for the `weather-archive` CLI.
//!
//! This crate defines:
//! - The query controller: form input, validation gate, request state
//! - The archive client seam and its Open-Meteo implementation
//! - Configuration handling
//!
//! It is used by `archive-cli`, but any other front end can drive the
//! controller and render its [`StateView`].

pub mod client;
pub mod config;
pub mod controller;
pub mod model;
pub mod state;
pub mod validate;

pub use client::{ArchiveClient, TransportError, client_from_config};
pub use config::Config;
pub use controller::{PendingQuery, QueryController};
pub use model::{ArchivePayload, ArchiveQuery, Field, HourlySeries, QueryInput};
pub use state::{RequestState, StateView};
pub use validate::{ValidationError, is_valid_date, validate};
