use crate::{
    tensor::scalar::{DimOrderType, SizesType, StridesType},
    utils::error::TensorError,
};

// Reject negative extents
pub fn validate_sizes(sizes: &[SizesType]) -> Result<(), TensorError> {
    match sizes.iter().position(|&s| s < 0) {
        Some(dim) => Err(TensorError::InvalidArgument(format!(
            "Size at dim {} is negative: {}",
            dim, sizes[dim]
        ))),
        None => Ok(()),
    }
}

/// Number of elements described by `sizes`, or `None` on overflow.
///
/// A zero-dimensional shape holds one element. Sizes must already be
/// non-negative.
pub fn num_elements(sizes: &[SizesType]) -> Option<usize> {
    sizes
        .iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(s as usize))
}

/// Row-major strides for `sizes`: the last dimension is contiguous and
/// `strides[i] == strides[i + 1] * sizes[i + 1]`.
///
/// Returns `None` if a stride does not fit in [`StridesType`].
pub fn compute_strides(sizes: &[SizesType]) -> Option<Vec<StridesType>> {
    let mut strides: Vec<StridesType> = vec![1; sizes.len()];
    for i in (1..sizes.len()).rev() {
        strides[i - 1] = strides[i].checked_mul(sizes[i])?;
    }
    Some(strides)
}

// Contiguous tensors keep their dimensions in declaration order
pub fn default_dim_order(ndim: usize) -> Vec<DimOrderType> {
    (0..ndim).map(|d| d as DimOrderType).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_row_major() {
        assert_eq!(compute_strides(&[2, 3, 4]), Some(vec![12, 4, 1]));
        assert_eq!(compute_strides(&[5]), Some(vec![1]));
        assert_eq!(compute_strides(&[4, 4]), Some(vec![4, 1]));
    }

    #[test]
    fn strides_zero_dim() {
        assert_eq!(compute_strides(&[]), Some(vec![]));
    }

    #[test]
    fn strides_with_empty_axis() {
        // a zero extent zeroes every stride to its left
        assert_eq!(compute_strides(&[2, 0, 3]), Some(vec![0, 3, 1]));
    }

    #[test]
    fn strides_overflow() {
        assert_eq!(compute_strides(&[2, 65536, 65536]), None);
    }

    #[test]
    fn element_counts() {
        assert_eq!(num_elements(&[]), Some(1));
        assert_eq!(num_elements(&[2, 3, 4]), Some(24));
        assert_eq!(num_elements(&[7, 0]), Some(0));
    }

    #[test]
    fn negative_size_rejected() {
        assert!(validate_sizes(&[1, 2, 3]).is_ok());
        let err = validate_sizes(&[1, -2]).unwrap_err();
        assert_eq!(err.kind(), crate::utils::error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn dim_order_identity() {
        assert_eq!(default_dim_order(3), vec![0, 1, 2]);
        assert!(default_dim_order(0).is_empty());
    }
}
