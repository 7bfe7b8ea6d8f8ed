use std::fmt::{Debug, Formatter};

/// API key pair used to authenticate every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Creates credentials from the access and secret keys.
    pub fn new<A: Into<String>, S: Into<String>>(access_key: A, secret_key: S) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Returns the access key.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the value for the `X-ApiKeys` header. The format, including trailing semicolons,
    /// is expected verbatim by the server.
    pub fn header_value(&self) -> String {
        format!(
            "accessKey={}; secretKey={};",
            self.access_key, self.secret_key
        )
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &"***")
            .field("secret_key", &"***")
            .finish()
    }
}
