use crate::{
    codec::{FromRawRecord, RawRecord, read_integer, read_string},
    lookup::LookupRecord,
};
use serde_derive::Serialize;

/// User group. Groups are read-only.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub raw: RawRecord,
}

impl FromRawRecord for Group {
    fn from_raw(raw: RawRecord) -> Self {
        Self {
            id: read_integer(&raw, "id").unwrap_or_default(),
            uuid: read_string(&raw, "uuid").unwrap_or_default(),
            name: read_string(&raw, "name").unwrap_or_default(),
            description: read_string(&raw, "description"),
            raw,
        }
    }
}

impl LookupRecord for Group {
    fn lookup_id(&self) -> i64 {
        self.id
    }

    fn lookup_name(&self) -> &str {
        &self.name
    }
}
