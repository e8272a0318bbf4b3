//! Integration tests for the catalog, cart and ledger working together.

use std::num::NonZeroU32;

use common::SessionId;
use ordering::{Cart, Catalog, ItemCode, Ledger, Money};

fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

fn price(catalog: &Catalog, code: u32) -> u64 {
    catalog.resolve(ItemCode::new(code)).unwrap().unit_price.naira()
}

#[test]
fn cart_total_matches_lines_after_every_operation() {
    let catalog = Catalog::standard();
    let mut cart = Cart::new();

    for (code, quantity) in [(100, 3), (101, 1), (100, 2), (103, 7)] {
        let item = catalog.resolve(ItemCode::new(code)).unwrap().clone();
        let running = cart.add_line(item, qty(quantity)).unwrap();
        let sum: Money = cart.lines().iter().map(|l| l.subtotal()).sum();
        assert_eq!(running, sum);
        assert_eq!(cart.total(), sum);
    }

    let expected =
        5 * price(&catalog, 100) + price(&catalog, 101) + 7 * price(&catalog, 103);
    assert_eq!(cart.total().naira(), expected);

    cart.clear();
    assert_eq!(cart.total(), Money::zero());
}

#[test]
fn ledger_entry_survives_cart_mutation() {
    let catalog = Catalog::standard();
    let ledger = Ledger::new();
    let session = SessionId::new();
    let mut cart = Cart::new();

    let jollof = catalog.resolve(ItemCode::new(100)).unwrap().clone();
    cart.add_line(jollof.clone(), qty(2)).unwrap();

    let entry = ledger.record(session, Some("Amy".to_string()), cart.snapshot());
    cart.clear();
    cart.add_line(jollof, qty(9)).unwrap();

    let recorded = &ledger.history()[0];
    assert_eq!(recorded, &entry);
    assert_eq!(recorded.lines.len(), 1);
    assert_eq!(recorded.lines[0].quantity(), 2);
    assert_eq!(recorded.total.naira(), 2 * price(&catalog, 100));
}

#[test]
fn ledger_length_only_grows() {
    let ledger = Ledger::new();
    let mut previous = ledger.len();

    for _ in 0..5 {
        ledger.record(SessionId::new(), None, Vec::new());
        let now = ledger.len();
        assert_eq!(now, previous + 1);
        previous = now;
    }
}
