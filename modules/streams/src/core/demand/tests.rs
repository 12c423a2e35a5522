use proptest::prelude::*;

use super::{add_cap, multiply_cap, UNBOUNDED};

#[test]
fn addition_saturates_into_the_sentinel() {
  assert_eq!(add_cap(UNBOUNDED - 1, 2), UNBOUNDED);
  assert_eq!(add_cap(UNBOUNDED, 1), UNBOUNDED);
  assert_eq!(add_cap(3, 4), 7);
}

#[test]
fn multiplication_saturates_into_the_sentinel() {
  assert_eq!(multiply_cap(UNBOUNDED / 2, 3), UNBOUNDED);
  assert_eq!(multiply_cap(5, 6), 30);
  assert_eq!(multiply_cap(0, UNBOUNDED), 0);
}

proptest! {
  #[test]
  fn add_cap_never_loses_demand(current in 0_u64.., amount in 0_u64..) {
    let total = add_cap(current, amount);
    prop_assert!(total >= current);
    prop_assert!(total >= amount);
  }

  #[test]
  fn add_cap_matches_plain_addition_below_the_sentinel(current in 0_u64..u32::MAX as u64, amount in 0_u64..u32::MAX as u64) {
    prop_assert_eq!(add_cap(current, amount), current + amount);
  }

  #[test]
  fn multiply_cap_is_exact_below_the_sentinel(lhs in 0_u64..u32::MAX as u64, rhs in 0_u64..u32::MAX as u64) {
    prop_assert_eq!(multiply_cap(lhs, rhs), lhs * rhs);
  }
}
