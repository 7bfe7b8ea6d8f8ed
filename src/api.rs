use crate::client::Client;

/// Collection of APIs for the remote resources.
#[derive(Clone)]
pub struct Api {
    pub client: Client,
}

impl Api {
    /// Instantiates APIs collection with the specified client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}
