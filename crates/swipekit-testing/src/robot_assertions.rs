//! Assertion utilities for swipe tests.

use crate::element::TestElement;
use swipekit_foundation::SwipeElement;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the element shows no trace of a swipe: zero offset, full
/// opacity and the given height.
pub fn assert_at_rest(element: &TestElement, height: i32, msg: &str) {
    assert_eq!(
        element.translation_x(),
        0.0,
        "{}: translation of {:?}",
        msg,
        element
    );
    assert_eq!(element.alpha(), 1.0, "{}: alpha of {:?}", msg, element);
    assert_eq!(element.height(), height, "{}: height of {:?}", msg, element);
}

/// Assert that a sequence never increases.
pub fn assert_non_increasing(values: &[i32], msg: &str) {
    for pair in values.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "{}: {} followed by {} in {:?}",
            msg,
            pair[0],
            pair[1],
            values
        );
    }
}
