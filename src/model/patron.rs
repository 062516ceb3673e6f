//! Patron identity. Patrons are not stored; a patron is its library card
//! number plus whatever borrow records reference it.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits on a library card.
pub const PATRON_ID_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid patron ID. Must be exactly 6 digits.")]
pub struct PatronIdError;

/// A validated six-digit library card number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatronId(String);

impl PatronId {
    pub fn parse(raw: &str) -> Result<Self, PatronIdError> {
        if raw.len() == PATRON_ID_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(PatronIdError)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PatronId {
    type Err = PatronIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PatronId {
    type Error = PatronIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<PatronId> for String {
    fn from(id: PatronId) -> Self {
        id.0
    }
}

impl Display for PatronId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
