use num::Zero;

/// The reduction operator for the maximum. Returns the greater input,
/// keeping `a` when the two compare equal or do not compare at all.
pub fn max_op<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Maximum of a slice, `None` if the slice is empty.
pub fn max_element<T: PartialOrd + Copy>(elements: &[T]) -> Option<T> {
    elements.iter().copied().reduce(max_op)
}

/// Maximum of a slice, zero if the slice is empty.
///
/// Zero is not an ordering identity: when all elements of the full
/// buffer are negative and some rank holds an empty slice, the empty
/// rank's zero wins the reduction and the reported maximum is wrong.
/// This can only happen with more ranks than elements.
pub fn max_or_zero<T: PartialOrd + Copy + Zero>(elements: &[T]) -> T {
    max_element(elements).unwrap_or_else(T::zero)
}
