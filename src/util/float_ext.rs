pub trait FloatExt: Sized {
    /// Tolerance of exact-match checks against grid positions.
    const GRID_EPSILON: Self;

    /// `self == other` within [`GRID_EPSILON`](Self::GRID_EPSILON).
    fn almost_eq(self, other: Self) -> bool;
}

impl FloatExt for f64 {
    const GRID_EPSILON: Self = 1e-9;

    fn almost_eq(self, other: Self) -> bool {
        (self - other).abs() <= Self::GRID_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn almost_eq() {
        assert!(1.0_f64.almost_eq(1.0));
        assert!(1.0_f64.almost_eq(1.0 + 1e-12));
        assert!(!1.0_f64.almost_eq(1.0 + 1e-6));
    }
}
