//! Custom assertion macros
//!
//! Brought into scope by `#[macro_use] mod common;` in each test file.

#![allow(unused_macros)]

/// Assert that two values are approximately equal (for floating point)
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < 1e-9,
            "Values are not approximately equal: {} vs {}",
            left,
            right
        );
    }};
}

/// Assert that every numeric field of a snapshot is finite and non-negative
macro_rules! assert_well_formed {
    ($snapshot:expr) => {
        for (field, value) in $snapshot.numeric_fields() {
            assert!(
                value.is_finite() && value >= 0.0,
                "field {} is not finite and non-negative: {}",
                field,
                value
            );
        }
    };
}
