//! Assertion functions for testing windowing outputs.
//!
//! Window results are unordered, so most helpers sort before comparing.

use crate::emitter::{WindowEmitter, WindowedValue};
use crate::window::Window;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use beamwindow::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections contain the same elements, ignoring order.
///
/// # Panics
///
/// Panics if the collections differ in content (ignoring order).
///
/// # Example
///
/// ```
/// use beamwindow::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 2], &[1, 2, 3]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    let actual_set: HashSet<_> = actual.iter().collect();
    let expected_set: HashSet<_> = expected.iter().collect();
    if actual_set != expected_set {
        let missing: Vec<_> = expected_set.difference(&actual_set).collect();
        let extra: Vec<_> = actual_set.difference(&expected_set).collect();
        panic!(
            "Collection content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

/// Assert per-window values of an unkeyed run, ignoring result order.
///
/// # Panics
///
/// Panics if the windows or their values differ.
///
/// # Example
///
/// ```
/// use beamwindow::*;
/// use beamwindow::testing::assert_window_values;
///
/// let out = vec![
///     WindowedValue::new((), Window::new(30, 60), 2u64),
///     WindowedValue::new((), Window::new(0, 30), 1u64),
/// ];
/// assert_window_values(out, &[(Window::new(0, 30), 1), (Window::new(30, 60), 2)]);
/// ```
pub fn assert_window_values<K, O>(actual: Vec<WindowedValue<K, O>>, expected: &[(Window, O)])
where
    O: Debug + PartialEq,
{
    let actual = WindowEmitter::by_window(actual);
    let mut expected: Vec<&(Window, O)> = expected.iter().collect();
    expected.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(
        actual.len(),
        expected.len(),
        "Window count mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            a.0 == e.0 && a.1 == e.1,
            "Window mismatch:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert keyed results equal `expected` after sorting both by `(key, window)`.
///
/// # Panics
///
/// Panics if the sorted results differ.
pub fn assert_keyed_results_equal<K, O>(actual: Vec<WindowedValue<K, O>>, expected: Vec<WindowedValue<K, O>>)
where
    K: Debug + Ord,
    O: Debug + PartialEq,
{
    let actual = WindowEmitter::sorted(actual);
    let expected = WindowEmitter::sorted(expected);
    assert_collections_equal(&actual, &expected);
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics with the first offending element.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(predicate(item), "Element at index {i} failed predicate: {item:?}");
    }
}
