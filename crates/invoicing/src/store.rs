//! Record access the resolvers need from the host.

use origin_purchasing::{Purchase, PurchaseId, PurchaseLine, PurchaseLineId};
use origin_sales::{Sale, SaleId, SaleLine, SaleLineId};
use origin_stock::{Move, Shipment, ShipmentKind, ShipmentId};

use crate::invoice::{Invoice, InvoiceId, InvoiceLine, InvoiceLineId};
use crate::origin::{Origin, ParentDocument};

/// Read-only record lookups. A missing record is `None`, never an error.
pub trait RecordStore {
    fn invoice(&self, id: InvoiceId) -> Option<Invoice>;
    fn invoice_line(&self, id: InvoiceLineId) -> Option<InvoiceLine>;
    fn sale(&self, id: SaleId) -> Option<Sale>;
    fn sale_line(&self, id: SaleLineId) -> Option<SaleLine>;
    fn purchase(&self, id: PurchaseId) -> Option<Purchase>;
    fn purchase_line(&self, id: PurchaseLineId) -> Option<PurchaseLine>;

    /// Stock moves linked to an invoice line.
    fn line_moves(&self, line: InvoiceLineId) -> Vec<Move>;

    fn shipment(&self, kind: ShipmentKind, id: ShipmentId) -> Option<Shipment>;

    /// Document owning the origin line, if the origin and its parent exist.
    fn parent_document(&self, origin: &Origin) -> Option<ParentDocument> {
        match origin {
            Origin::InvoiceLine(id) => {
                let invoice = self.invoice_line(*id)?.invoice?;
                self.invoice(invoice).map(ParentDocument::Invoice)
            }
            Origin::SaleLine(id) => {
                let sale = self.sale_line(*id)?.sale?;
                self.sale(sale).map(ParentDocument::Sale)
            }
            Origin::PurchaseLine(id) => {
                let purchase = self.purchase_line(*id)?.purchase?;
                self.purchase(purchase).map(ParentDocument::Purchase)
            }
            Origin::Unsupported(_) => None,
        }
    }
}
