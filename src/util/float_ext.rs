/// Float comparisons up to machine epsilon or a custom tolerance.
pub trait FloatExt: Sized {
    fn eq(self, other: Self) -> bool;

    fn not_eq(self, other: Self) -> bool;

    fn almost_eq(self, other: Self, acceptable_difference: Self) -> bool;
}

macro_rules! impl_float_ext {
    ( $ty:ty ) => {
        impl FloatExt for $ty {
            fn eq(self, other: Self) -> bool {
                (self - other).abs() < <$ty>::EPSILON
            }

            fn not_eq(self, other: Self) -> bool {
                (self - other).abs() >= <$ty>::EPSILON
            }

            fn almost_eq(self, other: Self, acceptable_difference: Self) -> bool {
                (self - other).abs() <= acceptable_difference
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);

#[cfg(test)]
mod tests {
    use super::FloatExt;

    #[test]
    fn tolerance() {
        assert!(FloatExt::eq(0.1_f64 + 0.2, 0.3));
        assert!(FloatExt::not_eq(1.0_f32, 1.01));
        assert!(1.0_f64.almost_eq(1.05, 0.1));
        assert!(!1.0_f64.almost_eq(1.2, 0.1));
    }
}
