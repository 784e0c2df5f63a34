//! Executing translated searches.

use std::collections::BTreeSet;

use async_trait::async_trait;

use origin_core::Context;
use origin_invoicing::{InvoiceLineId, OriginFields};
use origin_query::{Clause, SearchDomain};

use crate::error::InfraError;
use crate::memory::InMemoryDatabase;

/// Runs an `id IN (...)` domain against invoice line storage.
#[async_trait]
pub trait InvoiceLineSearch: Send + Sync {
    async fn search(&self, domain: &SearchDomain) -> Result<BTreeSet<InvoiceLineId>, InfraError>;
}

#[async_trait]
impl InvoiceLineSearch for InMemoryDatabase {
    async fn search(&self, domain: &SearchDomain) -> Result<BTreeSet<InvoiceLineId>, InfraError> {
        self.search_ids(domain)
    }
}

/// Translate `clause` on a derived field and execute it.
pub async fn find_lines<S>(
    searcher: &S,
    fields: &OriginFields,
    clause: &Clause,
    ctx: &Context,
) -> Result<BTreeSet<InvoiceLineId>, InfraError>
where
    S: InvoiceLineSearch + ?Sized,
{
    let domain = fields.search(clause, ctx)?;
    let ids = searcher.search(&domain).await?;
    tracing::info!(
        field = %clause.field,
        operator = clause.operator.symbol(),
        matched = ids.len(),
        "invoice line search"
    );
    Ok(ids)
}
