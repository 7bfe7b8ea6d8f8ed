use crate::error::Error as TenableError;
use anyhow::bail;
use std::fmt::{Display, Formatter};

/// Record that can be found by its numeric id or by its name.
pub trait LookupRecord {
    /// Numeric identifier of the record.
    fn lookup_id(&self) -> i64;
    /// Name used for the case-insensitive name lookups.
    fn lookup_name(&self) -> &str;
}

/// Selects at most one record from a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(i64),
    Name(String),
}

impl Selector {
    /// Builds selector from the optional id and name. The id takes precedence over the name and
    /// empty values are treated as absent.
    pub fn from_parts(id: Option<&str>, name: Option<&str>) -> anyhow::Result<Self> {
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            return match id.parse::<i64>() {
                Ok(id) if id > 0 => Ok(Self::Id(id)),
                _ => bail!(TenableError::invalid_input(format!(
                    "Expected numeric ID but got: {id}"
                ))),
            };
        }

        match name.filter(|name| !name.is_empty()) {
            Some(name) => Ok(Self::Name(name.to_string())),
            None => bail!(TenableError::invalid_input(
                "Either an id or a name must be set to look up a record."
            )),
        }
    }

    /// Checks whether the record matches the selector. Names are compared case-insensitively, but
    /// must match in full.
    pub fn matches<R: LookupRecord>(&self, record: &R) -> bool {
        match self {
            Self::Id(id) => record.lookup_id() == *id,
            Self::Name(name) => record.lookup_name().to_lowercase() == name.to_lowercase(),
        }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name {name}"),
        }
    }
}

/// Returns the first record matching the selector.
pub fn find_record<R: LookupRecord>(records: Vec<R>, selector: &Selector) -> Option<R> {
    records.into_iter().find(|record| selector.matches(record))
}
