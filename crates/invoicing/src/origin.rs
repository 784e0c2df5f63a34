//! The polymorphic `origin` of an invoice line and the documents behind it.

use chrono::NaiveDate;

use origin_core::{Reference, RecordId};
use origin_purchasing::{Purchase, PurchaseLineId};
use origin_sales::{Sale, SaleLineId};

use crate::invoice::{Invoice, InvoiceLineId};

/// Origin line families whose parent document can be resolved.
///
/// This is the single source of truth for which documents are reachable
/// through `origin`: each family names its line model and the field on the
/// line that points at the parent document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginKind {
    InvoiceLine,
    SaleLine,
    PurchaseLine,
}

impl OriginKind {
    pub const ALL: [OriginKind; 3] = [
        OriginKind::InvoiceLine,
        OriginKind::PurchaseLine,
        OriginKind::SaleLine,
    ];

    pub fn model(self) -> &'static str {
        match self {
            OriginKind::InvoiceLine => "account.invoice.line",
            OriginKind::SaleLine => "sale.line",
            OriginKind::PurchaseLine => "purchase.line",
        }
    }

    /// Field on the origin line holding its parent document.
    pub fn parent_field(self) -> &'static str {
        match self {
            OriginKind::InvoiceLine => "invoice",
            OriginKind::SaleLine => "sale",
            OriginKind::PurchaseLine => "purchase",
        }
    }

    /// Date column of the parent document, `<parent>_date` by convention.
    pub fn date_field(self) -> &'static str {
        match self {
            OriginKind::InvoiceLine => "invoice_date",
            OriginKind::SaleLine => "sale_date",
            OriginKind::PurchaseLine => "purchase_date",
        }
    }

    pub fn from_model(model: &str) -> Option<Self> {
        OriginKind::ALL.into_iter().find(|k| k.model() == model)
    }
}

/// Where an invoice line came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    InvoiceLine(InvoiceLineId),
    SaleLine(SaleLineId),
    PurchaseLine(PurchaseLineId),
    /// A model outside [`OriginKind`]; it resolves to nothing.
    Unsupported(Reference),
}

impl Origin {
    pub fn kind(&self) -> Option<OriginKind> {
        match self {
            Origin::InvoiceLine(_) => Some(OriginKind::InvoiceLine),
            Origin::SaleLine(_) => Some(OriginKind::SaleLine),
            Origin::PurchaseLine(_) => Some(OriginKind::PurchaseLine),
            Origin::Unsupported(_) => None,
        }
    }

    pub fn to_reference(&self) -> Reference {
        let (kind, id): (OriginKind, RecordId) = match self {
            Origin::InvoiceLine(id) => (OriginKind::InvoiceLine, (*id).into()),
            Origin::SaleLine(id) => (OriginKind::SaleLine, (*id).into()),
            Origin::PurchaseLine(id) => (OriginKind::PurchaseLine, (*id).into()),
            Origin::Unsupported(r) => return r.clone(),
        };
        Reference::new(kind.model(), id)
    }
}

impl From<Reference> for Origin {
    fn from(reference: Reference) -> Self {
        let id = reference.id();
        match OriginKind::from_model(reference.model()) {
            Some(OriginKind::InvoiceLine) => Origin::InvoiceLine(id.into()),
            Some(OriginKind::SaleLine) => Origin::SaleLine(id.into()),
            Some(OriginKind::PurchaseLine) => Origin::PurchaseLine(id.into()),
            None => {
                tracing::warn!(
                    model = reference.model(),
                    "invoice line origin has unsupported model"
                );
                Origin::Unsupported(reference)
            }
        }
    }
}

impl From<InvoiceLineId> for Origin {
    fn from(id: InvoiceLineId) -> Self {
        Origin::InvoiceLine(id)
    }
}

impl From<SaleLineId> for Origin {
    fn from(id: SaleLineId) -> Self {
        Origin::SaleLine(id)
    }
}

impl From<PurchaseLineId> for Origin {
    fn from(id: PurchaseLineId) -> Self {
        Origin::PurchaseLine(id)
    }
}

/// The document owning an origin line. Every family exposes the same fixed
/// field set: number, reference and a family-specific date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentDocument {
    Invoice(Invoice),
    Sale(Sale),
    Purchase(Purchase),
}

impl ParentDocument {
    pub fn kind(&self) -> OriginKind {
        match self {
            ParentDocument::Invoice(_) => OriginKind::InvoiceLine,
            ParentDocument::Sale(_) => OriginKind::SaleLine,
            ParentDocument::Purchase(_) => OriginKind::PurchaseLine,
        }
    }

    pub fn number(&self) -> Option<&str> {
        match self {
            ParentDocument::Invoice(d) => d.number.as_deref(),
            ParentDocument::Sale(d) => d.number.as_deref(),
            ParentDocument::Purchase(d) => d.number.as_deref(),
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            ParentDocument::Invoice(d) => d.reference.as_deref(),
            ParentDocument::Sale(d) => d.reference.as_deref(),
            ParentDocument::Purchase(d) => d.reference.as_deref(),
        }
    }

    /// `invoice_date`, `sale_date` or `purchase_date`.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ParentDocument::Invoice(d) => d.invoice_date,
            ParentDocument::Sale(d) => d.sale_date,
            ParentDocument::Purchase(d) => d.purchase_date,
        }
    }

    pub fn rec_name(&self) -> String {
        match self {
            ParentDocument::Invoice(d) => d.rec_name(),
            ParentDocument::Sale(d) => d.rec_name(),
            ParentDocument::Purchase(d) => d.rec_name(),
        }
    }
}
