//! C-library `bisect`-style binary searches.
//!
//! The corner grids are only ever accessed through these two bounds; no
//! pipeline stage scans a grid linearly.

/// Index of the first element that is not less than `value`.
pub fn lower_bound<T: PartialOrd>(slice: &[T], value: T) -> usize {
    slice.partition_point(|probe| *probe < value)
}

/// Index of the first element that is greater than `value`.
pub fn upper_bound<T: PartialOrd>(slice: &[T], value: T) -> usize {
    slice.partition_point(|probe| *probe <= value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_on_duplicates() {
        let values = [1.0, 2.0, 2.0, 2.0, 5.0];

        assert_eq!(lower_bound(&values, 2.0), 1);
        assert_eq!(upper_bound(&values, 2.0), 4);
        assert_eq!(lower_bound(&values, 0.0), 0);
        assert_eq!(upper_bound(&values, 5.0), 5);
        assert_eq!(lower_bound(&values, 6.0), 5);
    }

    #[test]
    fn bounds_between_elements() {
        let values = [0, 10, 20];

        assert_eq!(lower_bound(&values, 5), 1);
        assert_eq!(upper_bound(&values, 5), 1);
    }
}
