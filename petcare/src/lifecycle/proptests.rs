//! Property-based tests for the transition tables.

use super::{AppointmentStatus, BookingStatus, Lifecycle, OrderStatus, SideEffect};
use proptest::prelude::*;

fn appointment_status() -> impl Strategy<Value = AppointmentStatus> {
    prop::sample::select(AppointmentStatus::ALL)
}

fn booking_status() -> impl Strategy<Value = BookingStatus> {
    prop::sample::select(BookingStatus::ALL)
}

fn order_status() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(OrderStatus::ALL)
}

// Walk a random sequence of requested targets from the initial state,
// applying only the legal ones, and count restorations.
fn walk<S: Lifecycle>(targets: &[S]) -> (S, usize) {
    let mut current = S::INITIAL;
    let mut restores = 0;
    for &target in targets {
        if let Some(effect) = current.transition_to(target) {
            if effect != SideEffect::None {
                restores += 1;
            }
            current = target;
        }
    }
    (current, restores)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // No self loops: a record never "moves" into the status it already holds
    #[test]
    fn no_self_transitions(a in appointment_status(), b in booking_status(), o in order_status()) {
        prop_assert!(a.transition_to(a).is_none());
        prop_assert!(b.transition_to(b).is_none());
        prop_assert!(o.transition_to(o).is_none());
    }

    // Any path restores capacity at most once
    #[test]
    fn appointment_restores_at_most_once(targets in prop::collection::vec(appointment_status(), 0..20)) {
        let (end, restores) = walk(&targets);
        prop_assert!(restores <= 1);
        prop_assert_eq!(restores == 1, end == AppointmentStatus::Cancelled);
    }

    #[test]
    fn order_restores_at_most_once(targets in prop::collection::vec(order_status(), 0..20)) {
        let (end, restores) = walk(&targets);
        prop_assert!(restores <= 1);
        prop_assert_eq!(restores == 1, end == OrderStatus::Cancelled);
    }

    #[test]
    fn booking_never_restores(targets in prop::collection::vec(booking_status(), 0..20)) {
        let (_, restores) = walk(&targets);
        prop_assert_eq!(restores, 0);
    }

    // Every restoring edge ends in Cancelled, every edge into Cancelled restores
    #[test]
    fn restoring_edges_are_cancellations(from in order_status(), to in order_status()) {
        if let Some(effect) = from.transition_to(to) {
            prop_assert_eq!(
                effect == SideEffect::RestoreOrderStock,
                to == OrderStatus::Cancelled
            );
        }
    }

    #[test]
    fn display_parses_back(a in appointment_status(), o in order_status()) {
        prop_assert_eq!(a.to_string().parse::<AppointmentStatus>().unwrap(), a);
        prop_assert_eq!(o.as_str().parse::<OrderStatus>().unwrap(), o);
    }
}
