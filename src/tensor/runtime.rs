//! The runtime's non-owning tensor handle and its in-place resize.

use std::{fmt::Debug, marker::PhantomData, ptr::NonNull};

use crate::{
    tensor::{
        desc,
        scalar::{DimOrderType, Scalar, ScalarType, SizesType, StridesType},
    },
    utils::error::TensorError,
};

/// Whether, and how far, a tensor's shape may change after construction.
///
/// [`TensorView`](crate::TensorView) handles are always `DynamicBound`. The
/// other variants are for callers that build a [`Tensor`] directly with
/// [`Tensor::from_parts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TensorShapeDynamism {
    /// Sizes are fixed. Resizing to the current sizes is a no-op, anything else fails.
    Static,
    /// Sizes may change as long as the element count stays within the bound.
    DynamicBound,
    /// Sizes may change without bound. Needs an allocator, so unsupported here.
    DynamicUnbound,
}

/// A tensor that does not own its data or its metadata.
///
/// Sizes, strides and dim order are borrowed from whoever built the handle;
/// [`resize_tensor`] writes through those borrows in place.
pub struct Tensor<'t, S: Scalar> {
    data: NonNull<S>,
    sizes: &'t mut [SizesType],
    strides: &'t mut [StridesType],
    dim_order: &'t [DimOrderType],
    numel_bound: usize,
    dynamism: TensorShapeDynamism,
    _marker: PhantomData<&'t mut [S]>,
}

impl<'t, S: Scalar> Tensor<'t, S> {
    /// Wraps existing metadata and storage into a handle.
    ///
    /// # Panics
    ///
    /// If the metadata slices differ in length, a size is negative, or the
    /// element count exceeds `numel_bound`.
    ///
    /// # Safety
    ///
    /// `data` must be valid for reads and writes of `numel_bound` elements for
    /// `'t`, and must not be accessed through any other path while the handle
    /// is alive.
    pub unsafe fn from_parts(
        data: NonNull<S>,
        sizes: &'t mut [SizesType],
        strides: &'t mut [StridesType],
        dim_order: &'t [DimOrderType],
        numel_bound: usize,
        dynamism: TensorShapeDynamism,
    ) -> Self {
        assert_eq!(
            sizes.len(),
            strides.len(),
            "Sizes and strides must have the same length"
        );
        assert_eq!(
            sizes.len(),
            dim_order.len(),
            "Sizes and dim order must have the same length"
        );
        assert!(
            desc::validate_sizes(sizes).is_ok(),
            "Tensor sizes cannot be negative: {:?}",
            sizes
        );

        let numel = desc::num_elements(sizes);
        assert!(
            numel.is_some_and(|n| n <= numel_bound),
            "Tensor of sizes {:?} exceeds its bound of {} elements",
            sizes,
            numel_bound
        );

        Self {
            data,
            sizes,
            strides,
            dim_order,
            numel_bound,
            dynamism,
            _marker: PhantomData,
        }
    }

    /// Returns the tensor's number of dimensions.
    pub fn dim(&self) -> usize {
        self.sizes.len()
    }

    /// Returns the size of the tensor at the given dimension.
    pub fn size(&self, dim: usize) -> SizesType {
        self.sizes[dim]
    }

    pub fn sizes(&self) -> &[SizesType] {
        &*self.sizes
    }

    pub fn strides(&self) -> &[StridesType] {
        &*self.strides
    }

    pub fn dim_order(&self) -> &[DimOrderType] {
        self.dim_order
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.sizes.iter().map(|&s| s as usize).product()
    }

    /// Returns the size of the live elements in bytes, not the capacity.
    pub fn nbytes(&self) -> usize {
        self.numel() * S::TYPE.element_size()
    }

    pub fn scalar_type(&self) -> ScalarType {
        S::TYPE
    }

    pub fn shape_dynamism(&self) -> TensorShapeDynamism {
        self.dynamism
    }

    pub fn numel_bound(&self) -> usize {
        self.numel_bound
    }

    pub fn as_ptr(&self) -> *const S {
        self.data.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut S {
        self.data.as_ptr()
    }

    /// The live elements in memory order.
    pub fn as_slice(&self) -> &[S] {
        // Safety: numel <= numel_bound, and the buffer holds numel_bound elements
        unsafe { std::slice::from_raw_parts(self.data.as_ptr(), self.numel()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [S] {
        // Safety: see as_slice, and &mut self keeps this the only access path
        unsafe { std::slice::from_raw_parts_mut(self.data.as_ptr(), self.numel()) }
    }
}

impl<S: Scalar + Debug> Debug for Tensor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("scalar_type", &self.scalar_type())
            .field("sizes", &self.sizes())
            .field("strides", &self.strides())
            .field("dynamism", &self.dynamism)
            .field("data", &self.as_slice())
            .finish()
    }
}

/// Resizes `tensor` in place to `new_sizes`, recomputing contiguous strides.
///
/// The dimensionality cannot change. On error the tensor's metadata is left
/// untouched.
pub fn resize_tensor<S: Scalar>(
    tensor: &mut Tensor<'_, S>,
    new_sizes: &[SizesType],
) -> Result<(), TensorError> {
    if new_sizes.len() != tensor.dim() {
        return Err(TensorError::InvalidArgument(format!(
            "Attempted to change the tensor rank from {} to {}",
            tensor.dim(),
            new_sizes.len()
        )));
    }
    desc::validate_sizes(new_sizes)?;

    match tensor.dynamism {
        TensorShapeDynamism::Static => {
            if new_sizes != tensor.sizes() {
                return Err(TensorError::ResizeFailed(format!(
                    "Attempted to resize a static tensor from {:?} to {:?}",
                    tensor.sizes(),
                    new_sizes
                )));
            }
            Ok(())
        }
        TensorShapeDynamism::DynamicUnbound => Err(TensorError::ResizeFailed(
            "Unbounded dynamic shapes are not supported".to_string(),
        )),
        TensorShapeDynamism::DynamicBound => {
            let numel = desc::num_elements(new_sizes).ok_or_else(|| {
                TensorError::ResizeFailed(format!(
                    "Element count of {:?} overflows usize",
                    new_sizes
                ))
            })?;
            if numel > tensor.numel_bound {
                return Err(TensorError::ResizeFailed(format!(
                    "Sizes {:?} need {} elements, bound is {}",
                    new_sizes, numel, tensor.numel_bound
                )));
            }

            let strides = desc::compute_strides(new_sizes).ok_or_else(|| {
                TensorError::ResizeFailed(format!("Strides of {:?} overflow", new_sizes))
            })?;

            tensor.sizes.copy_from_slice(new_sizes);
            tensor.strides.copy_from_slice(&strides);
            Ok(())
        }
    }
}
