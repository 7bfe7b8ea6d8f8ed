use crate::{
    codec::{FromRawRecord, RawRecord, read_bool, read_integer, read_string},
    lookup::LookupRecord,
    users::UserId,
};
use serde_derive::Serialize;

/// Account type used when none is requested or reported by the server.
pub const DEFAULT_ACCOUNT_TYPE: &str = "local";

/// User account as reported by the API. Passwords are never part of it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub uuid: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub permissions: i64,
    #[serde(rename = "type")]
    pub account_type: String,
    pub enabled: bool,
    /// The user object as received from the API. It's kept for introspection only and is never
    /// sent back to the server.
    #[serde(skip_serializing)]
    pub raw: RawRecord,
}

impl FromRawRecord for User {
    fn from_raw(raw: RawRecord) -> Self {
        Self {
            id: UserId::from(read_integer(&raw, "id").unwrap_or_default()),
            uuid: read_string(&raw, "uuid").unwrap_or_default(),
            username: read_string(&raw, "username").unwrap_or_default(),
            name: read_string(&raw, "name"),
            email: read_string(&raw, "email"),
            permissions: read_integer(&raw, "permissions").unwrap_or_default(),
            account_type: read_string(&raw, "type")
                .unwrap_or_else(|| DEFAULT_ACCOUNT_TYPE.to_string()),
            enabled: read_bool(&raw, "enabled").unwrap_or_default(),
            raw,
        }
    }
}

impl LookupRecord for User {
    fn lookup_id(&self) -> i64 {
        *self.id
    }

    fn lookup_name(&self) -> &str {
        &self.username
    }
}
