mod error_kind;

use anyhow::anyhow;
use reqwest::StatusCode;
use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// Native error type of the client.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
    status: Option<StatusCode>,
}

impl Error {
    /// Creates a Transport error for the response with a non-success status code.
    pub fn transport(status: StatusCode, body: impl AsRef<str>) -> Self {
        Self {
            root_cause: anyhow!("API error: {status}: {}", body.as_ref()),
            kind: ErrorKind::Transport,
            status: Some(status),
        }
    }

    /// Creates a Transport error for the request that didn't produce any response.
    pub fn transport_with_root_cause(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Transport,
            status: None,
        }
    }

    /// Creates a Decode error instance with the given root cause.
    pub fn decode_with_root_cause(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Decode,
            status: None,
        }
    }

    /// Creates a Decode error instance with the given message.
    pub fn decode<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::decode_with_root_cause(anyhow!(message))
    }

    /// Creates a Not Found error instance with the given message.
    pub fn not_found<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::NotFound,
            status: None,
        }
    }

    /// Creates an Invalid Input error instance with the given message.
    pub fn invalid_input<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::InvalidInput,
            status: None,
        }
    }

    /// Creates an error for the remote change that was applied only partially.
    pub fn partially_applied(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::PartiallyApplied,
            status: None,
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns HTTP status code the server responded with, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Extracts HTTP status code from the error, looking through any attached context.
    pub fn status_of(err: &anyhow::Error) -> Option<StatusCode> {
        err.downcast_ref::<Error>().and_then(|err| err.status)
    }

    /// Extracts kind of the error, looking through any attached context.
    pub fn kind_of(err: &anyhow::Error) -> ErrorKind {
        err.downcast_ref::<Error>()
            .map_or(ErrorKind::Unknown, |err| err.kind)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            root_cause,
            kind: ErrorKind::Unknown,
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use anyhow::{Context, anyhow};
    use insta::assert_debug_snapshot;
    use reqwest::StatusCode;

    #[test]
    fn can_create_transport_errors() -> anyhow::Result<()> {
        let error = Error::transport(StatusCode::NOT_FOUND, r#"{"error":"Not found"}"#);

        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            error.to_string(),
            r#"API error: 404 Not Found: {"error":"Not found"}"#
        );

        let error = Error::transport_with_root_cause(anyhow!("connection refused"));
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), None);
        assert_debug_snapshot!(error, @r###""connection refused""###);

        Ok(())
    }

    #[test]
    fn can_create_lookup_errors() -> anyhow::Result<()> {
        let error = Error::not_found("No role was found with name Admins.");
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_debug_snapshot!(error, @r###""No role was found with name Admins.""###);

        let error = Error::invalid_input("Expected numeric ID but got: abc");
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_debug_snapshot!(error, @r###""Expected numeric ID but got: abc""###);

        Ok(())
    }

    #[test]
    fn can_create_unknown_errors() -> anyhow::Result<()> {
        let error = Error::from(anyhow!("Something unexpected"));

        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.status(), None);
        assert_debug_snapshot!(error, @r###""Something unexpected""###);

        Ok(())
    }

    #[test]
    fn can_recover_original_error() -> anyhow::Result<()> {
        let result: anyhow::Result<()> =
            Err(anyhow!(Error::transport(StatusCode::BAD_GATEWAY, "Upstream is down")));
        let err = result
            .context("Cannot retrieve user (1).")
            .context("Cannot update user (1).")
            .unwrap_err();

        assert_eq!(Error::kind_of(&err), ErrorKind::Transport);
        assert_eq!(Error::status_of(&err), Some(StatusCode::BAD_GATEWAY));

        let error = Error::from(err);
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(
            error.to_string(),
            "API error: 502 Bad Gateway: Upstream is down"
        );

        assert_eq!(Error::kind_of(&anyhow!("Uh oh.")), ErrorKind::Unknown);
        assert_eq!(Error::status_of(&anyhow!("Uh oh.")), None);

        Ok(())
    }
}
