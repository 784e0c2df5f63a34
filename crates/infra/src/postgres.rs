//! Postgres execution of translated searches.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions};
use sqlx::query::QueryScalar;
use sqlx::Postgres;

use origin_invoicing::{InvoiceLineId, schema};
use origin_query::{SearchDomain, Sql, Value};

use crate::error::InfraError;
use crate::search::InvoiceLineSearch;

type IdQuery<'q> = QueryScalar<'q, Postgres, i64, PgArguments>;

#[derive(Clone)]
pub struct PgInvoiceLineSearch {
    pool: Arc<PgPool>,
}

impl PgInvoiceLineSearch {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    pub async fn connect(database_url: &str) -> Result<Self, InfraError> {
        let pool = PgPoolOptions::new().max_connections(5).connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Full statement selecting matching invoice line ids.
    pub fn statement(domain: &SearchDomain) -> Sql {
        let filter = domain.to_sql();
        Sql {
            text: format!(
                "SELECT CAST(\"id\" AS BIGINT) FROM \"{}\" WHERE {}",
                schema::INVOICE_LINE,
                filter.text
            ),
            params: filter.params,
        }
    }
}

/// Postgres width for an integer parameter.
///
/// Record ids and string offsets are `integer` columns and functions; an
/// `i64` parameter would be typed `bigint` and rule out `int4` overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegerParam {
    Int4(i32),
    Int8(i64),
}

impl From<i64> for IntegerParam {
    fn from(value: i64) -> Self {
        i32::try_from(value).map_or(IntegerParam::Int8(value), IntegerParam::Int4)
    }
}

fn bind<'q>(query: IdQuery<'q>, value: &Value) -> Result<IdQuery<'q>, InfraError> {
    Ok(match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Integer(i) => match IntegerParam::from(*i) {
            IntegerParam::Int4(n) => query.bind(n),
            IntegerParam::Int8(n) => query.bind(n),
        },
        Value::Text(s) => query.bind(s.clone()),
        Value::Date(d) => query.bind(*d),
        Value::List(_) => return Err(InfraError::UnsupportedParameter(value.to_string())),
    })
}

#[async_trait]
impl InvoiceLineSearch for PgInvoiceLineSearch {
    async fn search(&self, domain: &SearchDomain) -> Result<BTreeSet<InvoiceLineId>, InfraError> {
        let sql = Self::statement(domain);
        tracing::debug!(sql = %sql.text, params = sql.params.len(), "postgres search");

        let mut query = sqlx::query_scalar::<_, i64>(&sql.text);
        for value in &sql.params {
            query = bind(query, value)?;
        }
        let ids = query.fetch_all(&*self.pool).await?;
        Ok(ids.into_iter().map(InvoiceLineId::new).collect())
    }
}
