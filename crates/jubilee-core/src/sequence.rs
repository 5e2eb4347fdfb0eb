//! The fixed Jubilee sequence.
//!
//! Only the eleven literal terms count. Larger Fibonacci numbers are not
//! recognized, however they are derived.

/// The Jubilee terms, in ascending order.
pub const FIBONACCI_SEQUENCE: [u64; 11] = [1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

/// Check whether `n` is one of the fixed Jubilee terms.
///
/// # Examples
///
/// ```
/// use jubilee_core::is_fibonacci_number;
///
/// assert!(is_fibonacci_number(13));
/// assert!(!is_fibonacci_number(4));
/// assert!(!is_fibonacci_number(233)); // Fibonacci, but not in the list
/// ```
pub fn is_fibonacci_number(n: u64) -> bool {
    fibonacci_index(n).is_some()
}

/// Zero-based position of `n` in the fixed sequence.
pub fn fibonacci_index(n: u64) -> Option<usize> {
    FIBONACCI_SEQUENCE.binary_search(&n).ok()
}
