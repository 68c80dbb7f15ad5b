use crate::security::DecodeError;

/// User-facing reasons a magic link visit is rejected. Surfaced as an HTTP 400 response with a
/// human-readable message, never as a crash.
#[derive(thiserror::Error, Debug)]
pub enum InvalidLinkError {
    #[error("'magic' search parameter does not exist")]
    MissingPayload,
    #[error("invalid magic link payload")]
    MalformedPayload(#[from] DecodeError),
    #[error("invalid nonce")]
    NonceMismatch,
    #[error("magic link has expired")]
    Expired,
}

impl From<InvalidLinkError> for crate::error::Error {
    fn from(err: InvalidLinkError) -> Self {
        crate::error::Error::client_with_root_cause(anyhow::anyhow!(err))
    }
}
