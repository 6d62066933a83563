/// The type used for elements of `sizes()`.
pub type SizesType = i32;
/// The type used for elements of `strides()`.
pub type StridesType = i32;
/// The type used for elements of `dim_order()`.
pub type DimOrderType = u8;

/// Element types a tensor may hold.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 8-bit unsigned integer, `u8`
    Byte = 0,
    /// 8-bit signed integer, `i8`
    Char = 1,
    /// 16-bit signed integer, `i16`
    Short = 2,
    /// 32-bit signed integer, `i32`
    Int = 3,
    /// 64-bit signed integer, `i64`
    Long = 4,
    /// 32-bit floating point, `f32`
    Float = 6,
    /// 64-bit floating point, `f64`
    Double = 7,
    /// Boolean, `bool`
    Bool = 11,
}

impl ScalarType {
    /// Size in bytes of one element of this type.
    pub fn element_size(self) -> usize {
        match self {
            ScalarType::Byte | ScalarType::Char | ScalarType::Bool => 1,
            ScalarType::Short => 2,
            ScalarType::Int | ScalarType::Float => 4,
            ScalarType::Long | ScalarType::Double => 8,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Rust types that can be used as tensor elements.
pub trait Scalar: Copy + sealed::Sealed + 'static {
    /// The [`ScalarType`] tag of the implementing type.
    const TYPE: ScalarType;
}

macro_rules! impl_scalar {
    ($rust_type:ty, $variant:ident) => {
        impl sealed::Sealed for $rust_type {}
        impl Scalar for $rust_type {
            const TYPE: ScalarType = ScalarType::$variant;
        }
    };
}

impl_scalar!(u8, Byte);
impl_scalar!(i8, Char);
impl_scalar!(i16, Short);
impl_scalar!(i32, Int);
impl_scalar!(i64, Long);
impl_scalar!(f32, Float);
impl_scalar!(f64, Double);
impl_scalar!(bool, Bool);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_size_matches_rust_type() {
        fn check<S: Scalar>() {
            assert_eq!(S::TYPE.element_size(), std::mem::size_of::<S>());
        }
        check::<u8>();
        check::<i8>();
        check::<i16>();
        check::<i32>();
        check::<i64>();
        check::<f32>();
        check::<f64>();
        check::<bool>();
    }
}
