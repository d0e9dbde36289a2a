/// Crate-wide result alias.
pub type CardResult<T> = Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
/// Error taxonomy for the card layout core.
///
/// Most editing-surface failures (stale ids, locked targets) are deliberately
/// *not* errors; they are reported through
/// [`MutationOutcome`](crate::MutationOutcome) so a rapid UI interaction
/// degrades to a no-op. `CardError` is reserved for the cases that must reach
/// the caller: invalid documents, duplicate ids, malformed persisted layouts.
pub enum CardError {
    /// A document or layer violates a structural invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Adding a layer whose id already exists in the document.
    #[error("duplicate layer id '{0}'")]
    DuplicateId(String),

    /// A persisted layout file is corrupt or foreign.
    #[error("malformed layout: {0}")]
    MalformedLayout(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all passthrough.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::DuplicateId`].
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    /// Build a [`CardError::MalformedLayout`].
    pub fn malformed_layout(msg: impl Into<String>) -> Self {
        Self::MalformedLayout(msg.into())
    }

    /// Build a [`CardError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
