use log::{error, info, warn};

use crate::{
    client::{ArchiveClient, TransportError},
    model::{ArchivePayload, ArchiveQuery, Field, QueryInput},
    state::{RequestState, StateView},
    validate::validate,
};

/// A validated query waiting for its response, tagged with the sequence
/// number it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    seq: u64,
    query: ArchiveQuery,
}

impl PendingQuery {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ArchiveQuery {
        &self.query
    }
}

/// Holds the form input and the state of the last query cycle.
#[derive(Debug)]
pub struct QueryController<C> {
    client: C,
    input: QueryInput,
    state: RequestState,
    issued: u64,
}

impl<C: ArchiveClient> QueryController<C> {
    pub fn new(client: C) -> Self {
        Self { client, input: QueryInput::default(), state: RequestState::Idle, issued: 0 }
    }

    pub fn with_input(client: C, input: QueryInput) -> Self {
        Self { input, ..Self::new(client) }
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn view(&self) -> StateView<'_> {
        self.state.view()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value.into());
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> anyhow::Result<()> {
        let field = Field::try_from(name)?;
        self.set_field(field, value);
        Ok(())
    }

    /// Run the validation gate. Moves to `Loading` and hands back a ticket
    /// when the input is usable, otherwise moves straight to `Error`.
    ///
    /// Either way every earlier ticket becomes stale.
    pub fn begin(&mut self) -> Option<PendingQuery> {
        self.issued += 1;

        match validate(&self.input) {
            Ok(query) => {
                self.state = RequestState::Loading;
                Some(PendingQuery { seq: self.issued, query })
            }
            Err(err) => {
                warn!("Rejected query input: {err}");
                self.state = RequestState::Error;
                None
            }
        }
    }

    /// Send the request for a ticket obtained from [`begin`](Self::begin).
    pub async fn fetch(&self, pending: &PendingQuery) -> Result<ArchivePayload, TransportError> {
        self.client.fetch_hourly(&pending.query).await
    }

    /// Apply a response. Returns `false` and leaves the state alone when a
    /// newer ticket has been issued since.
    pub fn complete(
        &mut self,
        pending: PendingQuery,
        outcome: Result<ArchivePayload, TransportError>,
    ) -> bool {
        if pending.seq != self.issued {
            info!("Discarding response #{} superseded by #{}", pending.seq, self.issued);
            return false;
        }

        self.state = match outcome {
            Ok(payload) => RequestState::Success(payload),
            Err(err) => {
                error!("Error fetching weather data: {err}");
                RequestState::Error
            }
        };
        true
    }

    /// One full query cycle.
    pub async fn submit(&mut self) -> &RequestState {
        if let Some(pending) = self.begin() {
            let outcome = self.fetch(&pending).await;
            self.complete(pending, outcome);
        }
        &self.state
    }
}
