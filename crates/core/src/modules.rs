//! Companion modules that may or may not be installed next to invoicing.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Optional companion module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Sale,
    Purchase,
    Stock,
}

impl FromStr for Module {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sale" => Ok(Module::Sale),
            "purchase" => Ok(Module::Purchase),
            "stock" => Ok(Module::Stock),
            other => Err(DomainError::validation(format!("unknown module {other:?}"))),
        }
    }
}

/// Which companions are installed.
///
/// Search translators omit the join branch of a missing companion instead of
/// failing; the shipment field only exists when stock is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledModules {
    pub sale: bool,
    pub purchase: bool,
    pub stock: bool,
}

impl InstalledModules {
    pub const fn all() -> Self {
        Self {
            sale: true,
            purchase: true,
            stock: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            sale: false,
            purchase: false,
            stock: false,
        }
    }

    pub fn with(mut self, module: Module) -> Self {
        match module {
            Module::Sale => self.sale = true,
            Module::Purchase => self.purchase = true,
            Module::Stock => self.stock = true,
        }
        self
    }

    pub fn contains(&self, module: Module) -> bool {
        match module {
            Module::Sale => self.sale,
            Module::Purchase => self.purchase,
            Module::Stock => self.stock,
        }
    }

    /// Parse a comma separated list such as `"sale,stock"`.
    pub fn parse_list(list: &str) -> Result<Self, DomainError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .try_fold(Self::none(), |acc, name| Ok(acc.with(name.parse()?)))
    }
}

impl Default for InstalledModules {
    fn default() -> Self {
        Self::all()
    }
}
