/// Describes how an error should be treated at the HTTP boundary.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum ErrorKind {
    /// Caused by the client and safe to report back (HTTP 400).
    ClientError,
    /// The client is not authenticated (HTTP 401).
    Unauthorized,
    /// Anything else; the root cause is never exposed to the client (HTTP 500).
    Unknown,
}
