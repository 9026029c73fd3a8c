use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Circulation status of a book copy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum CopyStatus {
    /// On the shelf.
    #[sea_orm(string_value = "Available")]
    Available,
    /// Withdrawn for repair. New copies start here.
    #[default]
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
    /// Checked out; `due_back` says when it returns.
    #[sea_orm(string_value = "Loaned")]
    Loaned,
    #[sea_orm(string_value = "Reserved")]
    Reserved,
}

impl CopyStatus {
    /// Every status, in the order the form offers them.
    pub const ALL: &'static [CopyStatus] = &[
        Self::Maintenance,
        Self::Available,
        Self::Loaned,
        Self::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Maintenance => "Maintenance",
            Self::Loaned => "Loaned",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no [`CopyStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown copy status {0:?}")]
pub struct ParseStatusError(String);

impl FromStr for CopyStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Maintenance" => Ok(Self::Maintenance),
            "Loaned" => Ok(Self::Loaned),
            "Reserved" => Ok(Self::Reserved),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
