//! Race condition tests for the reservation engine.
//!
//! Each thread opens its own connection to the same database file, the way
//! separate processes would, and all threads are released together by a
//! barrier so their units of work contend for the write lock.
//!
//! **Invariant verified throughout:** a pool's counter equals its starting
//! capacity minus the units held by active reservations, no matter how the
//! writers interleave.

mod common;

use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

use common::{appointment, Marketplace};
use petcare::database::DatabaseConfig;
use petcare::{
    Actor, AppointmentStatus, BookingError, OrderRequest, OrderStatus, PoolId,
    ReservationService,
};

fn open(path: &PathBuf) -> ReservationService {
    ReservationService::open(DatabaseConfig::new(path)).unwrap()
}

/// Many owners race for a veterinarian's last slot.
///
/// **What this tests:**
/// - The conditional decrement admits exactly one winner
/// - Losers see `SlotUnavailable`, never a stale success
/// - No appointment row exists for a losing attempt
#[test]
fn test_last_slot_goes_to_exactly_one_owner() {
    const CONTENDERS: usize = 8;

    let mut market = Marketplace::new();
    let (_, vet) = market.vet("dr-park", 1);
    let owners: Vec<_> = (0..CONTENDERS)
        .map(|i| market.owner(&format!("owner-{i}")))
        .collect();
    let path = market.db_path().to_path_buf();

    let barrier = Arc::new(Barrier::new(CONTENDERS));
    let handles: Vec<_> = owners
        .into_iter()
        .map(|(owner, pet)| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut service = open(&path);
                barrier.wait();
                service.create_appointment(owner, appointment(pet, vet))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one booking should win: {results:?}");

    for result in results.iter().filter(|r| r.is_err()) {
        assert!(
            matches!(result, Err(BookingError::SlotUnavailable { .. })),
            "losers should be told the slot is gone, got {result:?}"
        );
    }

    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 0);
    let rows: i64 = market
        .service
        .database()
        .connection()
        .query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

/// Concurrent orders drain a stock pool without overselling.
#[test]
fn test_concurrent_orders_never_oversell() {
    const BUYERS: usize = 6;
    const STOCK: u32 = 7;

    let mut market = Marketplace::new();
    let (manager, shop) = market.shop("corner");
    let kibble = market.product(manager, "Kibble", 10_000, STOCK);
    let buyers: Vec<Actor> = (0..BUYERS)
        .map(|i| market.owner(&format!("buyer-{i}")).0)
        .collect();
    let path = market.db_path().to_path_buf();

    let barrier = Arc::new(Barrier::new(BUYERS));
    let handles: Vec<_> = buyers
        .into_iter()
        .map(|buyer| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut service = open(&path);
                barrier.wait();
                service.create_order(
                    buyer,
                    OrderRequest::new(shop, "12 Main St").with_line(kibble, 2),
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let placed = u32::try_from(results.iter().filter(|r| r.is_ok()).count()).unwrap();

    // 7 units at 2 per order: three orders fit.
    assert_eq!(placed, 3);
    assert_eq!(
        market.service.capacity(PoolId::ProductStock(kibble)).unwrap(),
        STOCK - placed * 2
    );
}

/// Two cancellations of the same appointment race.
///
/// **What this tests:**
/// - Only one cancellation takes effect
/// - The slot is restored exactly once
#[test]
fn test_concurrent_cancel_restores_once() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (vet_user, vet) = market.vet("dr-park", 3);
    let id = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 2);
    let path = market.db_path().to_path_buf();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut service = open(&path);
                barrier.wait();
                service.transition_appointment(vet_user, id, AppointmentStatus::Cancelled)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 3);
}

/// Cancellations and new orders interleave on one product.
#[test]
fn test_cancel_and_order_interleave_consistently() {
    const ROUNDS: usize = 4;

    let mut market = Marketplace::new();
    let (manager, shop) = market.shop("corner");
    let kibble = market.product(manager, "Kibble", 10_000, 10);
    let (buyer, _) = market.owner("mina");

    let orders: Vec<_> = (0..ROUNDS)
        .map(|_| {
            market
                .service
                .create_order(buyer, OrderRequest::new(shop, "12 Main St").with_line(kibble, 1))
                .unwrap()
        })
        .collect();
    let path = market.db_path().to_path_buf();

    let barrier = Arc::new(Barrier::new(ROUNDS * 2));
    let mut handles = Vec::new();
    for order in orders {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let mut service = open(&path);
            barrier.wait();
            service
                .transition_order(manager, order, OrderStatus::Cancelled)
                .is_ok()
        }));
    }
    for _ in 0..ROUNDS {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let mut service = open(&path);
            barrier.wait();
            service
                .create_order(buyer, OrderRequest::new(shop, "12 Main St").with_line(kibble, 1))
                .is_ok()
        }));
    }

    assert!(handles.into_iter().all(|h| h.join().unwrap()));

    let held: i64 = market
        .service
        .database()
        .connection()
        .query_row(
            "SELECT COALESCE(SUM(i.quantity), 0) FROM order_items i
             JOIN orders o ON o.order_id = i.order_id
             WHERE o.status != 'Cancelled' AND i.product_id = ?1",
            [kibble],
            |row| row.get(0),
        )
        .unwrap();
    let on_hand = market.service.capacity(PoolId::ProductStock(kibble)).unwrap();
    assert_eq!(i64::from(on_hand) + held, 10);
}
