// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ordering_is_lexicographic_on_seconds_then_nanos() {
    assert!(Timeout::new(1, 999_999_999) < Timeout::new(2, 0));
    assert!(Timeout::new(5, 100) < Timeout::new(5, 200));
    assert_eq!(Timeout::new(5, 200), Timeout::new(5, 200));
}

#[test]
fn boundary_equal_is_not_greater() {
    let max = Timeout::new(600, 0);
    let requested = Timeout::new(600, 0);
    assert!(!(requested > max));
}

#[test]
fn duration_roundtrip() {
    let d = Duration::new(12, 500);
    let t: Timeout = d.into();
    let back: Duration = t.into();
    assert_eq!(d, back);
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ordering_matches_seconds_then_nanos_pair(
            a_secs in 0i64..10_000,
            a_nanos in 0i32..1_000_000_000,
            b_secs in 0i64..10_000,
            b_nanos in 0i32..1_000_000_000,
        ) {
            let a = Timeout::new(a_secs, a_nanos);
            let b = Timeout::new(b_secs, b_nanos);
            prop_assert_eq!(a.cmp(&b), (a_secs, a_nanos).cmp(&(b_secs, b_nanos)));
        }

        #[test]
        fn duration_roundtrip_for_non_negative_values(secs in 0u64..100_000, nanos in 0u32..1_000_000_000) {
            let d = Duration::new(secs, nanos);
            let t: Timeout = d.into();
            let back: Duration = t.into();
            prop_assert_eq!(d, back);
        }
    }
}
