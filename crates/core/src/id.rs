//! Strongly-typed identifiers used across the domain.
//!
//! Records are identified by the integer primary key the host database assigns.
//! Each record family wraps [`RecordId`] in its own newtype via [`record_id!`]
//! so a sale id can never be passed where a purchase id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Raw integer identifier of a stored record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = i64::from_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("RecordId: {e}")))?;
        Ok(Self(id))
    }
}

/// Declare a typed identifier wrapping [`RecordId`].
#[macro_export]
macro_rules! record_id {
    ($(#[$meta:meta])* $vis:vis $t:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        $vis struct $t(pub $crate::RecordId);

        impl $t {
            pub const fn new(id: i64) -> Self {
                Self($crate::RecordId::new(id))
            }

            pub const fn record_id(self) -> $crate::RecordId {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$crate::RecordId> for $t {
            fn from(value: $crate::RecordId) -> Self {
                Self(value)
            }
        }

        impl From<$t> for $crate::RecordId {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}
