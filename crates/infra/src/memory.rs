//! In-memory database backing both record lookups and query execution.
//!
//! Every insert updates the typed record map and the table rows the query
//! evaluator reads, so the resolvers and the search translator see the same
//! data. Inserting a record whose id already exists replaces it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use origin_core::RecordId;
use origin_invoicing::schema;
use origin_invoicing::{Invoice, InvoiceId, InvoiceLine, InvoiceLineId, LineMove, RecordStore};
use origin_purchasing::{Purchase, PurchaseId, PurchaseLine, PurchaseLineId};
use origin_query::{Row, SearchDomain, TableSource, Value, execute};
use origin_sales::{Sale, SaleId, SaleLine, SaleLineId};
use origin_stock::{Move, MoveId, Shipment, ShipmentId, ShipmentKind};

use crate::error::InfraError;

#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    invoices: BTreeMap<InvoiceId, Invoice>,
    invoice_lines: BTreeMap<InvoiceLineId, InvoiceLine>,
    sales: BTreeMap<SaleId, Sale>,
    sale_lines: BTreeMap<SaleLineId, SaleLine>,
    purchases: BTreeMap<PurchaseId, Purchase>,
    purchase_lines: BTreeMap<PurchaseLineId, PurchaseLine>,
    moves: BTreeMap<MoveId, Move>,
    line_moves: Vec<LineMove>,
    shipments: BTreeMap<(ShipmentKind, ShipmentId), Shipment>,
    tables: HashMap<&'static str, Vec<Row>>,
}

fn id_value(id: impl Into<RecordId>) -> Value {
    Value::from(id.into())
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert_row(&mut self, table: &'static str, id: RecordId, row: Row) {
        let rows = self.tables.entry(table).or_default();
        let key = Value::from(id);
        rows.retain(|r| r.get("id") != Some(&key));
        rows.push(row);
    }

    pub fn insert_invoice(&mut self, invoice: Invoice) {
        let row = Row::new()
            .with("id", id_value(invoice.id))
            .with("number", invoice.number.clone())
            .with("reference", invoice.reference.clone())
            .with("invoice_date", invoice.invoice_date);
        self.upsert_row(schema::INVOICE, invoice.id.into(), row);
        self.invoices.insert(invoice.id, invoice);
    }

    pub fn insert_invoice_line(&mut self, line: InvoiceLine) {
        let row = Row::new()
            .with("id", id_value(line.id))
            .with("invoice", line.invoice.map(RecordId::from))
            .with("origin", line.origin.as_ref().map(|o| o.to_reference().to_string()));
        self.upsert_row(schema::INVOICE_LINE, line.id.into(), row);
        self.invoice_lines.insert(line.id, line);
    }

    pub fn insert_sale(&mut self, sale: Sale) {
        let row = Row::new()
            .with("id", id_value(sale.id))
            .with("number", sale.number.clone())
            .with("reference", sale.reference.clone())
            .with("sale_date", sale.sale_date);
        self.upsert_row(schema::SALE, sale.id.into(), row);
        self.sales.insert(sale.id, sale);
    }

    pub fn insert_sale_line(&mut self, line: SaleLine) {
        let row = Row::new()
            .with("id", id_value(line.id))
            .with("sale", line.sale.map(RecordId::from));
        self.upsert_row(schema::SALE_LINE, line.id.into(), row);
        self.sale_lines.insert(line.id, line);
    }

    pub fn insert_purchase(&mut self, purchase: Purchase) {
        let row = Row::new()
            .with("id", id_value(purchase.id))
            .with("number", purchase.number.clone())
            .with("reference", purchase.reference.clone())
            .with("purchase_date", purchase.purchase_date);
        self.upsert_row(schema::PURCHASE, purchase.id.into(), row);
        self.purchases.insert(purchase.id, purchase);
    }

    pub fn insert_purchase_line(&mut self, line: PurchaseLine) {
        let row = Row::new()
            .with("id", id_value(line.id))
            .with("purchase", line.purchase.map(RecordId::from));
        self.upsert_row(schema::PURCHASE_LINE, line.id.into(), row);
        self.purchase_lines.insert(line.id, line);
    }

    pub fn insert_move(&mut self, stock_move: Move) {
        let row = Row::new()
            .with("id", id_value(stock_move.id))
            .with("shipment", stock_move.shipment.as_ref().map(|s| s.to_reference().to_string()));
        self.upsert_row(schema::MOVE, stock_move.id.into(), row);
        self.moves.insert(stock_move.id, stock_move);
    }

    pub fn insert_shipment(&mut self, shipment: Shipment) {
        let row = Row::new()
            .with("id", id_value(shipment.id))
            .with("number", shipment.number.clone())
            .with("effective_date", shipment.effective_date);
        self.upsert_row(shipment.kind.table(), shipment.id.into(), row);
        self.shipments.insert((shipment.kind, shipment.id), shipment);
    }

    /// Link an invoice line to a stock move; duplicate links are ignored.
    pub fn link_move(&mut self, invoice_line: InvoiceLineId, stock_move: MoveId) {
        let link = LineMove {
            invoice_line,
            stock_move,
        };
        if self.line_moves.contains(&link) {
            return;
        }
        let id = RecordId::new(self.line_moves.len() as i64 + 1);
        let row = Row::new()
            .with("id", id)
            .with("invoice_line", RecordId::from(invoice_line))
            .with("stock_move", RecordId::from(stock_move));
        self.tables.entry(schema::LINE_MOVE).or_default().push(row);
        self.line_moves.push(link);
    }

    pub fn invoice_lines(&self) -> impl Iterator<Item = &InvoiceLine> {
        self.invoice_lines.values()
    }

    /// Ids of the invoice lines matched by `domain`.
    ///
    /// Subquery ids that name no stored line are dropped, as an outer
    /// `id IN (...)` against the line table would.
    pub fn search_ids(&self, domain: &SearchDomain) -> Result<BTreeSet<InvoiceLineId>, InfraError> {
        let rows = execute(domain.subquery(), self)?;
        let mut ids = BTreeSet::new();
        for row in rows {
            let id = match row.first() {
                Some(Value::Null) => continue,
                Some(value) => value
                    .as_integer()
                    .map(InvoiceLineId::new)
                    .ok_or_else(|| InfraError::UnexpectedId(value.to_string()))?,
                None => return Err(InfraError::UnexpectedId("no column".into())),
            };
            if self.invoice_lines.contains_key(&id) {
                ids.insert(id);
            }
        }
        tracing::debug!(matched = ids.len(), "in-memory search executed");
        Ok(ids)
    }
}

impl TableSource for InMemoryDatabase {
    fn rows(&self, table: &str) -> &[Row] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RecordStore for InMemoryDatabase {
    fn invoice(&self, id: InvoiceId) -> Option<Invoice> {
        self.invoices.get(&id).cloned()
    }

    fn invoice_line(&self, id: InvoiceLineId) -> Option<InvoiceLine> {
        self.invoice_lines.get(&id).cloned()
    }

    fn sale(&self, id: SaleId) -> Option<Sale> {
        self.sales.get(&id).cloned()
    }

    fn sale_line(&self, id: SaleLineId) -> Option<SaleLine> {
        self.sale_lines.get(&id).cloned()
    }

    fn purchase(&self, id: PurchaseId) -> Option<Purchase> {
        self.purchases.get(&id).cloned()
    }

    fn purchase_line(&self, id: PurchaseLineId) -> Option<PurchaseLine> {
        self.purchase_lines.get(&id).cloned()
    }

    fn line_moves(&self, line: InvoiceLineId) -> Vec<Move> {
        self.line_moves
            .iter()
            .filter(|link| link.invoice_line == line)
            .filter_map(|link| self.moves.get(&link.stock_move).cloned())
            .collect()
    }

    fn shipment(&self, kind: ShipmentKind, id: ShipmentId) -> Option<Shipment> {
        self.shipments.get(&(kind, id)).cloned()
    }
}
