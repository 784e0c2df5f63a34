//! Polymorphic `"<model>,<id>"` references.
//!
//! The host stores polymorphic many-to-one fields (an invoice line's `origin`,
//! a stock move's `shipment`) as a single text column holding the target model
//! name and the target id separated by a comma. [`Reference`] is the parsed
//! form; the record families that can be reached through a reference decide
//! which models they accept.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::RecordId;
use crate::value_object::ValueObject;

/// Separator between model name and id in the stored representation.
pub const SEPARATOR: char = ',';

/// Parsed polymorphic reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reference {
    model: String,
    id: RecordId,
}

impl Reference {
    pub fn new(model: impl Into<String>, id: RecordId) -> Self {
        Self {
            model: model.into(),
            id,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// `LIKE` pattern matching every stored reference to `model`.
    pub fn like_pattern(model: &str) -> String {
        format!("{model}{SEPARATOR}%")
    }
}

impl ValueObject for Reference {}

impl core::fmt::Display for Reference {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}{}", self.model, SEPARATOR, self.id)
    }
}

impl FromStr for Reference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (model, id) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| DomainError::invalid_reference(format!("missing separator in {s:?}")))?;
        if model.is_empty() {
            return Err(DomainError::invalid_reference(format!("empty model in {s:?}")));
        }
        let id = id
            .parse::<RecordId>()
            .map_err(|e| DomainError::invalid_reference(format!("{s:?}: {e}")))?;
        Ok(Self::new(model, id))
    }
}

impl TryFrom<String> for Reference {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Reference> for String {
    fn from(value: Reference) -> Self {
        value.to_string()
    }
}
