//! Property-based tests for pool accounting.

use super::{capacity, restore, try_consume, PoolId};
use crate::database::test_util::{create_test_database, seed_product};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Consume(u32),
    Restore(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..6).prop_map(Op::Consume),
        (0u32..4).prop_map(Op::Restore),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // After every prefix the stored counter matches a saturating model and never goes below zero
    #[test]
    fn counter_tracks_model(initial in 0u32..10, ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut db = create_test_database();
        let (_, product) = seed_product(&mut db, initial);
        let pool = PoolId::ProductStock(product);
        let conn = db.connection();

        let mut model = initial;
        for op in ops {
            match op {
                Op::Consume(n) => {
                    let ok = try_consume(conn, pool, n).is_ok();
                    prop_assert_eq!(ok, model >= n);
                    if ok {
                        model -= n;
                    }
                }
                Op::Restore(n) => {
                    restore(conn, pool, n).unwrap();
                    model += n;
                }
            }
            prop_assert_eq!(capacity(conn, pool).unwrap(), model);
        }
    }

    // A successful consume followed by a restore of the same amount nets to zero
    #[test]
    fn consume_restore_balance(initial in 1u32..20, amount in 1u32..20) {
        let mut db = create_test_database();
        let (_, product) = seed_product(&mut db, initial);
        let pool = PoolId::ProductStock(product);
        let conn = db.connection();

        if try_consume(conn, pool, amount).is_ok() {
            restore(conn, pool, amount).unwrap();
        }
        prop_assert_eq!(capacity(conn, pool).unwrap(), initial);
    }
}
