//! UseCase error types.

use thiserror::Error;

use crate::domain::ClientError;

/// Errors of the queries forwarded to the WhatsApp client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The client has not reported a ready session yet
    #[error("WhatsApp client not ready")]
    NotReady,

    #[error(transparent)]
    Client(#[from] ClientError),
}
