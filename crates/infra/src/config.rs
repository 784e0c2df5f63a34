//! Configuration loading from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `ORIGIN_INVOICE_TYPE` | `in`, `out` or `both` | `both` |
//! | `ORIGIN_DATE_FORMAT` | strftime pattern for dates | `%Y-%m-%d` |
//! | `ORIGIN_MODULES` | installed companions, e.g. `sale,purchase,stock` | all |
//! | `DATABASE_URL` | Postgres connection string | none |

use anyhow::Context as _;

use origin_core::{Context, InstalledModules, InvoiceType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginConfig {
    pub context: Context,
    pub modules: InstalledModules,
    pub database_url: Option<String>,
}

impl OriginConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let invoice_type = match lookup("ORIGIN_INVOICE_TYPE") {
            Some(raw) => raw
                .parse::<InvoiceType>()
                .with_context(|| format!("ORIGIN_INVOICE_TYPE={raw}"))?,
            None => InvoiceType::Both,
        };

        let mut context = Context::new(invoice_type);
        if let Some(format) = lookup("ORIGIN_DATE_FORMAT") {
            context = context.with_date_format(format);
        }

        let modules = match lookup("ORIGIN_MODULES") {
            Some(raw) => InstalledModules::parse_list(&raw)
                .with_context(|| format!("ORIGIN_MODULES={raw}"))?,
            None => InstalledModules::all(),
        };

        let database_url = lookup("DATABASE_URL");
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set; only in-memory search is available");
        }

        tracing::info!(
            invoice_type = ?context.invoice_type,
            date_format = context.date_format(),
            ?modules,
            "origin configuration loaded"
        );

        Ok(Self {
            context,
            modules,
            database_url,
        })
    }
}
