use std::{borrow::Cow, ptr::NonNull};

use ndarray::{ArrayBase, ArrayViewMut, IxDyn};

use crate::{
    backend::{AliasingTensor, TensorBackend},
    tensor::{
        desc,
        scalar::{Scalar, SizesType, StridesType},
    },
    utils::error::TensorError,
};

/// Hands `(data, sizes)` to `ndarray` and lets it derive the layout.
///
/// ndarray gives every axis a zero stride when any extent is zero, so the
/// reported strides are kept row-major alongside the view. The handle itself
/// still carries ndarray's strides.
pub struct NativeDerivedBackend<'a, S: Scalar> {
    array: ArrayViewMut<'a, S, IxDyn>,
    sizes: Vec<SizesType>,
    strides: Vec<StridesType>,
    numel_bound: usize,
}

fn to_shape(sizes: &[SizesType]) -> IxDyn {
    let shape: Vec<usize> = sizes.iter().map(|&s| s as usize).collect();
    IxDyn(&shape)
}

impl<'a, S: Scalar> TensorBackend<'a, S> for NativeDerivedBackend<'a, S> {
    type Handle<'t>
        = ArrayViewMut<'t, S, IxDyn>
    where
        Self: 't;

    unsafe fn build(data: NonNull<S>, sizes: &[SizesType], numel_bound: usize) -> Self {
        // Safety: the caller guarantees data holds at least numel(sizes) elements
        let array = unsafe { ArrayViewMut::from_shape_ptr(to_shape(sizes), data.as_ptr()) };
        let strides = desc::compute_strides(sizes)
            .unwrap_or_else(|| panic!("Strides of {:?} overflow", sizes));
        Self {
            array,
            sizes: sizes.to_vec(),
            strides,
            numel_bound,
        }
    }

    fn sizes(&self) -> &[SizesType] {
        &self.sizes
    }

    fn strides(&self) -> Cow<'_, [StridesType]> {
        Cow::Borrowed(&self.strides)
    }

    fn resize(&mut self, new_sizes: &[SizesType]) -> Result<(), TensorError> {
        if new_sizes.len() != self.sizes.len() {
            return Err(TensorError::InvalidArgument(format!(
                "Attempted to change the tensor rank from {} to {}",
                self.sizes.len(),
                new_sizes.len()
            )));
        }
        desc::validate_sizes(new_sizes)?;

        match desc::num_elements(new_sizes) {
            Some(numel) if numel <= self.numel_bound => {}
            _ => {
                return Err(TensorError::ResizeFailed(format!(
                    "Sizes {:?} exceed the bound of {} elements",
                    new_sizes, self.numel_bound
                )));
            }
        }
        let Some(strides) = desc::compute_strides(new_sizes) else {
            return Err(TensorError::ResizeFailed(format!(
                "Strides of {:?} overflow",
                new_sizes
            )));
        };

        let ptr = self.array.as_mut_ptr();
        // Safety: same buffer as build, and the new shape fits within numel_bound
        self.array = unsafe { ArrayViewMut::from_shape_ptr(to_shape(new_sizes), ptr) };
        self.sizes.copy_from_slice(new_sizes);
        self.strides = strides;
        Ok(())
    }

    fn aliasing_tensor(&mut self) -> ArrayViewMut<'_, S, IxDyn> {
        self.array.view_mut()
    }
}

impl<S: Scalar> AliasingTensor<S> for ArrayViewMut<'_, S, IxDyn> {
    fn dim(&self) -> usize {
        self.ndim()
    }

    fn size(&self, dim: usize) -> SizesType {
        self.shape()[dim] as SizesType
    }

    fn stride(&self, dim: usize) -> StridesType {
        self.strides()[dim] as StridesType
    }

    fn numel(&self) -> usize {
        self.len()
    }

    fn as_ptr(&self) -> *const S {
        ArrayBase::as_ptr(self)
    }

    fn as_mut_slice(&mut self) -> &mut [S] {
        let len = self.len();
        // Safety: views built by this backend are always in standard layout
        unsafe { std::slice::from_raw_parts_mut(ArrayBase::as_mut_ptr(self), len) }
    }
}
