/// Describes the categories of errors the client can produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request couldn't be sent or the server responded with a non-success status.
    Transport,
    /// The response body couldn't be decoded.
    Decode,
    /// No record matches the requested id or name.
    NotFound,
    /// The input is malformed, nothing was sent to the server.
    InvalidInput,
    /// The remote state was changed, but only partially.
    PartiallyApplied,
    /// Unknown error.
    Unknown,
}
