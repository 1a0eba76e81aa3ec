//! Property-based tests for request validation.

use super::{OrderRequest, SitterBookingRequest};
use crate::ids::{PetId, ProductId, ShopId, SitterId};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset)
    })
}

fn line_strategy() -> impl Strategy<Value = (i64, u32)> {
    (1i64..50, 0u32..20)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Booking validity is exactly: positive hours and an ordered range
    #[test]
    fn sitter_booking_validity(start in date_strategy(), end in date_strategy(), hours in 0u32..100) {
        let req = SitterBookingRequest::new(PetId::new(1), SitterId::new(1), start, end, hours);
        prop_assert_eq!(req.validate().is_ok(), hours > 0 && end >= start);
    }

    // An order validates iff it has lines and none of them is empty
    #[test]
    fn order_validity(lines in prop::collection::vec(line_strategy(), 0..8)) {
        let req = lines.iter().fold(
            OrderRequest::new(ShopId::new(1), "1 Harbour Rd"),
            |req, &(product, qty)| req.with_line(ProductId::new(product), qty),
        );
        let expected = !lines.is_empty() && lines.iter().all(|&(_, qty)| qty > 0);
        prop_assert_eq!(req.validate().is_ok(), expected);
    }
}
