//! Integration tests for origin resolution and search over the in-memory
//! database.
//!
//! Verifies:
//! - Searches on derived fields return the counts of the purchase/sale
//!   shipping scenario
//! - Search results agree with filtering lines by their computed values
//! - Shipment references are joined per shipment family, not by bare id

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use origin_core::{Context, InstalledModules, InvoiceType, Module};
    use origin_invoicing::{
        FieldValue, Invoice, InvoiceId, InvoiceLine, InvoiceLineId, OriginFields,
    };
    use origin_purchasing::{Purchase, PurchaseId, PurchaseLine, PurchaseLineId};
    use origin_query::{Clause, Operator, Value};
    use origin_sales::{Sale, SaleId, SaleLine, SaleLineId};
    use origin_stock::{Move, MoveId, Shipment, ShipmentId, ShipmentKind, ShipmentRef};

    use crate::memory::InMemoryDatabase;
    use crate::search::find_lines;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
    }

    fn yesterday() -> NaiveDate {
        today().pred_opt().unwrap()
    }

    fn tomorrow() -> NaiveDate {
        today().succ_opt().unwrap()
    }

    /// Three purchases and three sales of three lines each, invoiced.
    ///
    /// - purchase 1 (today): two lines received in supplier shipment "1"
    /// - purchase 2 (tomorrow): one line received in supplier shipment "2"
    /// - purchase 3 (yesterday): nothing received
    /// - sale 1 (today), sale 2 (tomorrow, reference "ABC"), sale 3
    ///   (yesterday): each shipped whole in customer shipments "1", "2" and
    ///   "3"; shipment "3" is still waiting
    ///
    /// Supplier and customer shipments share ids so that joining by id alone
    /// would mix them up.
    fn scenario() -> InMemoryDatabase {
        origin_observability::init_for_tests();
        let mut db = InMemoryDatabase::new();

        let supplier_invoice = InvoiceId::new(1);
        let customer_invoice = InvoiceId::new(2);
        db.insert_invoice(Invoice::new(supplier_invoice));
        db.insert_invoice(Invoice::new(customer_invoice));

        db.insert_shipment(
            Shipment::new(ShipmentKind::In, ShipmentId::new(1))
                .with_number("1")
                .with_effective_date(today()),
        );
        db.insert_shipment(
            Shipment::new(ShipmentKind::In, ShipmentId::new(2))
                .with_number("2")
                .with_effective_date(today()),
        );
        db.insert_shipment(
            Shipment::new(ShipmentKind::Out, ShipmentId::new(1))
                .with_number("1")
                .with_effective_date(today()),
        );
        db.insert_shipment(
            Shipment::new(ShipmentKind::Out, ShipmentId::new(2))
                .with_number("2")
                .with_effective_date(today()),
        );
        db.insert_shipment(Shipment::new(ShipmentKind::Out, ShipmentId::new(3)).with_number("3"));

        let purchase_dates = [today(), tomorrow(), yesterday()];
        for (p, date) in (1..=3).zip(purchase_dates) {
            db.insert_purchase(
                Purchase::new(PurchaseId::new(p))
                    .with_number(p.to_string())
                    .with_purchase_date(date),
            );
            for n in 0..3 {
                let id = (p - 1) * 3 + n + 1;
                db.insert_purchase_line(PurchaseLine::new(
                    PurchaseLineId::new(id),
                    PurchaseId::new(p),
                ));
                db.insert_invoice_line(
                    InvoiceLine::new(InvoiceLineId::new(id))
                        .in_invoice(supplier_invoice)
                        .with_origin(PurchaseLineId::new(id)),
                );
            }
        }
        let received = [(1, Some(1)), (2, Some(1)), (3, None), (4, Some(2)), (5, None)];
        for (line, shipment) in received {
            let mut stock_move = Move::new(MoveId::new(line));
            if let Some(s) = shipment {
                stock_move = stock_move
                    .in_shipment(ShipmentRef::new(ShipmentKind::In, ShipmentId::new(s)));
            }
            db.insert_move(stock_move);
            db.link_move(InvoiceLineId::new(line), MoveId::new(line));
        }

        let sale_dates = [today(), tomorrow(), yesterday()];
        for (s, date) in (1..=3).zip(sale_dates) {
            let mut sale = Sale::new(SaleId::new(s))
                .with_number(s.to_string())
                .with_sale_date(date);
            if s == 2 {
                sale = sale.with_reference("ABC");
            }
            db.insert_sale(sale);
            for n in 0..3 {
                let id = (s - 1) * 3 + n + 1;
                let line = id + 9;
                db.insert_sale_line(SaleLine::new(SaleLineId::new(id), SaleId::new(s)));
                db.insert_invoice_line(
                    InvoiceLine::new(InvoiceLineId::new(line))
                        .in_invoice(customer_invoice)
                        .with_origin(SaleLineId::new(id)),
                );
                db.insert_move(
                    Move::new(MoveId::new(line))
                        .in_shipment(ShipmentRef::new(ShipmentKind::Out, ShipmentId::new(s))),
                );
                db.link_move(InvoiceLineId::new(line), MoveId::new(line));
            }
        }
        db
    }

    fn search(
        db: &InMemoryDatabase,
        field: &str,
        op: Operator,
        value: impl Into<Value>,
        ctx: &Context,
    ) -> BTreeSet<InvoiceLineId> {
        let fields = OriginFields::new(InstalledModules::all());
        let domain = fields.search(&Clause::new(field, op, value), ctx).unwrap();
        db.search_ids(&domain).unwrap()
    }

    fn count(db: &InMemoryDatabase, field: &str, op: Operator, value: impl Into<Value>) -> usize {
        search(db, field, op, value, &Context::default()).len()
    }

    fn ids(range: std::ops::RangeInclusive<i64>) -> BTreeSet<InvoiceLineId> {
        range.map(InvoiceLineId::new).collect()
    }

    #[test]
    fn scenario_has_eighteen_lines() {
        let db = scenario();
        assert_eq!(db.invoice_lines().count(), 18);
    }

    #[test]
    fn origin_number_search() {
        let db = scenario();
        assert_eq!(count(&db, "origin_number", Operator::Equal, "2"), 6);
        assert_eq!(count(&db, "origin_number", Operator::Equal, "ABC"), 0);
    }

    #[test]
    fn origin_reference_search() {
        let db = scenario();
        assert_eq!(count(&db, "origin_reference", Operator::Equal, "2"), 6);
        assert_eq!(
            search(&db, "origin_reference", Operator::Equal, "ABC", &Context::default()),
            ids(13..=15)
        );
    }

    #[test]
    fn origin_reference_search_respects_invoice_type() {
        let db = scenario();
        let supplier = Context::new(InvoiceType::In);
        assert_eq!(search(&db, "origin_reference", Operator::Equal, "2", &supplier), ids(4..=6));
        let customer = Context::new(InvoiceType::Out);
        assert_eq!(search(&db, "origin_reference", Operator::Equal, "2", &customer), ids(13..=15));
    }

    #[test]
    fn origin_date_search() {
        let db = scenario();
        assert_eq!(count(&db, "origin_date", Operator::Equal, yesterday()), 6);
        assert_eq!(count(&db, "origin_date", Operator::GreaterEqual, today()), 12);

        let ctx = Context::default().with_date_format("%m/%d/%Y");
        let typed = today().format("%m/%d/%Y").to_string();
        assert_eq!(search(&db, "origin_date", Operator::GreaterEqual, typed, &ctx).len(), 12);
    }

    #[test]
    fn origin_shipment_search() {
        let db = scenario();
        assert_eq!(count(&db, "origin_shipment", Operator::NotEqual, "1"), 7);
        assert_eq!(count(&db, "origin_shipment", Operator::Equal, "2"), 4);
        assert_eq!(count(&db, "origin_shipment", Operator::NotEqual, "2"), 8);

        let ctx = Context::default().with_date_format("%m/%d/%Y");
        let typed = today().format("%m/%d/%Y").to_string();
        assert_eq!(search(&db, "origin_shipment", Operator::Equal, typed, &ctx).len(), 9);
    }

    #[test]
    fn shipment_numbers_are_matched_per_family() {
        let db = scenario();
        // supplier shipment 2 and customer shipment 2 share an id
        assert_eq!(
            search(&db, "origin_shipment", Operator::Equal, "2", &Context::default()),
            [4, 13, 14, 15].into_iter().map(InvoiceLineId::new).collect()
        );
    }

    fn search_clause(db: &InMemoryDatabase, clause: &Clause) -> BTreeSet<InvoiceLineId> {
        let fields = OriginFields::new(InstalledModules::all());
        let domain = fields.search(clause, &Context::default()).unwrap();
        db.search_ids(&domain).unwrap()
    }

    fn line_ids(ids: &[i64]) -> BTreeSet<InvoiceLineId> {
        ids.iter().copied().map(InvoiceLineId::new).collect()
    }

    /// Line 11 re-invoices line 10 of invoice INV-1; line 12 comes from a sale.
    fn reinvoiced() -> InMemoryDatabase {
        let mut db = InMemoryDatabase::new();
        db.insert_invoice(
            Invoice::new(InvoiceId::new(1))
                .with_number("INV-1")
                .with_reference("CUST-9")
                .with_invoice_date(yesterday()),
        );
        db.insert_invoice_line(
            InvoiceLine::new(InvoiceLineId::new(10)).in_invoice(InvoiceId::new(1)),
        );
        db.insert_invoice_line(
            InvoiceLine::new(InvoiceLineId::new(11)).with_origin(InvoiceLineId::new(10)),
        );

        db.insert_sale(
            Sale::new(SaleId::new(1))
                .with_number("S1")
                .with_reference("PO-7")
                .with_sale_date(today()),
        );
        db.insert_sale_line(SaleLine::new(SaleLineId::new(1), SaleId::new(1)));
        db.insert_invoice_line(
            InvoiceLine::new(InvoiceLineId::new(12)).with_origin(SaleLineId::new(1)),
        );
        db
    }

    #[test]
    fn invoice_line_origins_are_searched_through_their_invoice() {
        let db = reinvoiced();
        assert_eq!(
            search(&db, "origin_reference", Operator::Equal, "CUST-9", &Context::default()),
            line_ids(&[11])
        );
        assert_eq!(
            search(&db, "origin_number", Operator::ILike, "inv-%", &Context::default()),
            line_ids(&[11])
        );
        assert_eq!(
            search(&db, "origin_date", Operator::Less, today(), &Context::new(InvoiceType::Out)),
            line_ids(&[11])
        );
        assert_eq!(
            search(&db, "origin_reference", Operator::NotEqual, "CUST-9", &Context::default()),
            line_ids(&[12])
        );
    }

    /// Customer shipments: line 1 done yesterday ("1"), line 2 done today
    /// ("2"), line 3 still waiting ("3"); line 4 has no stock move.
    fn dated_shipments() -> InMemoryDatabase {
        let mut db = InMemoryDatabase::new();
        let shipments = [(1, Some(yesterday())), (2, Some(today())), (3, None)];
        for (id, date) in shipments {
            let mut shipment =
                Shipment::new(ShipmentKind::Out, ShipmentId::new(id)).with_number(id.to_string());
            shipment.effective_date = date;
            db.insert_shipment(shipment);
            db.insert_move(
                Move::new(MoveId::new(id))
                    .in_shipment(ShipmentRef::new(ShipmentKind::Out, ShipmentId::new(id))),
            );
            db.insert_invoice_line(InvoiceLine::new(InvoiceLineId::new(id)));
            db.link_move(InvoiceLineId::new(id), MoveId::new(id));
        }
        db.insert_invoice_line(InvoiceLine::new(InvoiceLineId::new(4)));
        db
    }

    #[test]
    fn shipment_date_inequality_skips_undated_and_unshipped_lines() {
        let db = dated_shipments();
        let clause = Clause::parse("origin_shipment", "!=", "2024-10-19").unwrap();
        assert_eq!(search_clause(&db, &clause), line_ids(&[1]));

        let clause = Clause::parse("origin_shipment", "=", "2024-10-19").unwrap();
        assert_eq!(search_clause(&db, &clause), line_ids(&[2]));
    }

    #[test]
    fn shipment_date_lists() {
        let db = dated_shipments();
        let dates = vec!["2024-10-19", "2024-10-18"];
        let clause = Clause::parse("origin_shipment", "in", dates).unwrap();
        assert_eq!(search_clause(&db, &clause), line_ids(&[1, 2]));

        let clause = Clause::parse("origin_shipment", "not in", vec!["2024-10-19"]).unwrap();
        assert_eq!(search_clause(&db, &clause), line_ids(&[1]));

        // one non-date item turns the whole list into a number search
        let clause = Clause::parse("origin_shipment", "in", vec!["3", "2024-10-19"]).unwrap();
        assert_eq!(search_clause(&db, &clause), line_ids(&[3]));
    }

    #[test]
    fn computed_values_follow_the_origin() {
        let db = scenario();
        let fields = OriginFields::new(InstalledModules::all());
        let ctx = Context::default().with_date_format("%m/%d/%Y");
        let line = |id| {
            db.invoice_lines()
                .find(|l| l.id == InvoiceLineId::new(id))
                .unwrap()
                .clone()
        };

        assert_eq!(
            fields.get(&db, &line(14), "origin_reference", &ctx).unwrap(),
            FieldValue::Char("2 / ABC".into())
        );
        assert_eq!(
            fields.get(&db, &line(7), "origin_date", &ctx).unwrap(),
            FieldValue::Date(yesterday())
        );
        assert_eq!(
            fields.get(&db, &line(1), "origin_shipment", &ctx).unwrap(),
            FieldValue::Char("1 - 10/19/2024".into())
        );
        assert_eq!(
            fields.get(&db, &line(18), "origin_shipment", &ctx).unwrap(),
            FieldValue::Char("3".into())
        );
        assert_eq!(
            fields.get(&db, &line(9), "origin_shipment", &ctx).unwrap(),
            FieldValue::Char(String::new())
        );
    }

    #[test]
    fn shipment_field_unavailable_without_stock() {
        let db = scenario();
        let modules = InstalledModules::none().with(Module::Sale).with(Module::Purchase);
        let fields = OriginFields::new(modules);
        let clause = Clause::new("origin_shipment", Operator::Equal, "1");
        assert!(fields.search(&clause, &Context::default()).is_err());
        let line = db.invoice_lines().next().unwrap().clone();
        assert!(fields.get(&db, &line, "origin_shipment", &Context::default()).is_err());
    }

    #[tokio::test]
    async fn find_lines_through_search_trait() {
        let db = scenario();
        let fields = OriginFields::new(InstalledModules::all());
        let clause = Clause::new("origin_number", Operator::In, vec!["1", "3"]);
        let found = find_lines(&db, &fields, &clause, &Context::default()).await.unwrap();
        let expected: BTreeSet<_> = [1, 2, 3, 7, 8, 9, 10, 11, 12, 16, 17, 18]
            .into_iter()
            .map(InvoiceLineId::new)
            .collect();
        assert_eq!(found, expected);
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;

        /// One sale per entry, one invoice line per sale.
        fn database(sales: &[(Option<String>, Option<String>, i64)]) -> InMemoryDatabase {
            let mut db = InMemoryDatabase::new();
            for (i, (number, reference, offset)) in sales.iter().enumerate() {
                let id = i as i64 + 1;
                let mut sale = Sale::new(SaleId::new(id))
                    .with_sale_date(today() + chrono::Days::new(*offset as u64));
                sale.number = number.clone();
                sale.reference = reference.clone();
                db.insert_sale(sale);
                db.insert_sale_line(SaleLine::new(SaleLineId::new(id), SaleId::new(id)));
                db.insert_invoice_line(
                    InvoiceLine::new(InvoiceLineId::new(id)).with_origin(SaleLineId::new(id)),
                );
            }
            // one line without origin, never matched
            db.insert_invoice_line(InvoiceLine::new(InvoiceLineId::new(1000)));
            db
        }

        fn filter(
            db: &InMemoryDatabase,
            name: &str,
            keep: impl Fn(&FieldValue) -> bool,
        ) -> BTreeSet<InvoiceLineId> {
            let fields = OriginFields::new(InstalledModules::all());
            db.invoice_lines()
                .filter(|l| keep(&fields.get(db, l, name, &Context::default()).unwrap()))
                .map(|l| l.id)
                .collect()
        }

        fn sales() -> impl Strategy<Value = Vec<(Option<String>, Option<String>, i64)>> {
            proptest::collection::vec(
                (
                    proptest::option::of("[ab]{1,2}"),
                    proptest::option::of("[ab]{1,2}"),
                    0i64..3,
                ),
                1..8,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

            #[test]
            fn number_search_matches_computed_number(
                sales in sales(),
                value in "[ab]{1,2}",
                negate in any::<bool>(),
            ) {
                let db = database(&sales);
                let op = if negate { Operator::NotEqual } else { Operator::Equal };
                let found = search(&db, "origin_number", op, value.as_str(), &Context::default());
                let expected = filter(&db, "origin_number", |v| match v.as_char() {
                    Some(n) => (n == value) != negate,
                    None => false,
                });
                prop_assert_eq!(found, expected);
            }

            #[test]
            fn reference_equality_matches_a_label_part(sales in sales(), value in "[ab]{1,2}") {
                let db = database(&sales);
                let ctx = Context::default();
                let found = search(&db, "origin_reference", Operator::Equal, value.as_str(), &ctx);
                let expected = filter(&db, "origin_reference", |v| {
                    v.as_char().is_some_and(|label| label.split(" / ").any(|part| part == value))
                });
                prop_assert_eq!(found, expected);
            }

            #[test]
            fn date_search_matches_computed_date(sales in sales(), offset in 0u64..3) {
                let db = database(&sales);
                let bound = today() + chrono::Days::new(offset);
                let ctx = Context::default();
                let found = search(&db, "origin_date", Operator::GreaterEqual, bound, &ctx);
                let expected =
                    filter(&db, "origin_date", |v| v.as_date().is_some_and(|d| d >= bound));
                prop_assert_eq!(found, expected);
            }
        }
    }
}
