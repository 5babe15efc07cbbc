use crate::model::ArchivePayload;

/// Outcome of the most recent query cycle. Each transition replaces the
/// previous value entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Error,
    Success(ArchivePayload),
}

/// What the presentation layer renders: a spinner, an error glyph, or a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateView<'a> {
    pub loading: bool,
    pub error: bool,
    pub data: Option<&'a ArchivePayload>,
}

impl RequestState {
    pub fn view(&self) -> StateView<'_> {
        StateView {
            loading: matches!(self, RequestState::Loading),
            error: matches!(self, RequestState::Error),
            data: self.payload(),
        }
    }

    pub fn payload(&self) -> Option<&ArchivePayload> {
        match self {
            RequestState::Success(payload) => Some(payload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_shows_nothing() {
        let view = RequestState::Idle.view();
        assert!(!view.loading);
        assert!(!view.error);
        assert!(view.data.is_none());
    }

    #[test]
    fn flags_are_exclusive() {
        assert!(RequestState::Loading.view().loading);
        assert!(!RequestState::Loading.view().error);
        assert!(RequestState::Error.view().error);
        assert!(RequestState::Error.view().data.is_none());

        let success = RequestState::Success(ArchivePayload::default());
        let view = success.view();
        assert!(!view.loading && !view.error);
        assert!(view.data.is_some());
    }
}
