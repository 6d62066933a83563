use std::{borrow::Cow, marker::PhantomData, ptr::NonNull};

use crate::{
    backend::{AliasingTensor, TensorBackend},
    tensor::{
        desc,
        runtime::{Tensor, TensorShapeDynamism, resize_tensor},
        scalar::{DimOrderType, Scalar, SizesType, StridesType},
    },
    utils::error::TensorError,
};

/// Owns sizes, row-major strides and dim order, and lends them to the
/// runtime's [`Tensor`] on demand.
pub struct ExplicitStrideBackend<'a, S: Scalar> {
    data: NonNull<S>,
    sizes: Vec<SizesType>,
    strides: Vec<StridesType>,
    dim_order: Vec<DimOrderType>,
    numel_bound: usize,
    _marker: PhantomData<&'a mut [S]>,
}

impl<'a, S: Scalar> TensorBackend<'a, S> for ExplicitStrideBackend<'a, S> {
    type Handle<'t>
        = Tensor<'t, S>
    where
        Self: 't;

    unsafe fn build(data: NonNull<S>, sizes: &[SizesType], numel_bound: usize) -> Self {
        let strides = desc::compute_strides(sizes)
            .unwrap_or_else(|| panic!("Strides of {:?} overflow", sizes));

        Self {
            data,
            sizes: sizes.to_vec(),
            strides,
            dim_order: desc::default_dim_order(sizes.len()),
            numel_bound,
            _marker: PhantomData,
        }
    }

    fn sizes(&self) -> &[SizesType] {
        &self.sizes
    }

    fn strides(&self) -> Cow<'_, [StridesType]> {
        Cow::Borrowed(&self.strides)
    }

    fn resize(&mut self, new_sizes: &[SizesType]) -> Result<(), TensorError> {
        resize_tensor(&mut self.aliasing_tensor(), new_sizes)
    }

    fn aliasing_tensor(&mut self) -> Tensor<'_, S> {
        // Safety: build's contract covers data for 'a, which outlives this borrow
        unsafe {
            Tensor::from_parts(
                self.data,
                &mut self.sizes,
                &mut self.strides,
                &self.dim_order,
                self.numel_bound,
                TensorShapeDynamism::DynamicBound,
            )
        }
    }
}

impl<S: Scalar> AliasingTensor<S> for Tensor<'_, S> {
    fn dim(&self) -> usize {
        Tensor::dim(self)
    }

    fn size(&self, dim: usize) -> SizesType {
        Tensor::size(self, dim)
    }

    fn stride(&self, dim: usize) -> StridesType {
        self.strides()[dim]
    }

    fn numel(&self) -> usize {
        Tensor::numel(self)
    }

    fn as_ptr(&self) -> *const S {
        Tensor::as_ptr(self)
    }

    fn as_mut_slice(&mut self) -> &mut [S] {
        Tensor::as_mut_slice(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build<'a>(data: &'a mut [i32], sizes: &[SizesType]) -> ExplicitStrideBackend<'a, i32> {
        let bound = data.len();
        let data = NonNull::new(data.as_mut_ptr()).unwrap();
        unsafe { ExplicitStrideBackend::build(data, sizes, bound) }
    }

    #[test]
    fn test_build_owns_strides() {
        let mut data = vec![0; 24];
        let backend = build(&mut data, &[2, 3, 4]);
        assert_eq!(backend.sizes(), &[2, 3, 4]);
        assert_eq!(&*backend.strides(), &[12, 4, 1]);
        assert_eq!(backend.dim_order, vec![0, 1, 2]);
    }

    #[test]
    fn test_handle_is_dynamic_bound() {
        let mut data = vec![0; 6];
        let mut backend = build(&mut data, &[2, 3]);
        let tensor = backend.aliasing_tensor();
        assert_eq!(tensor.shape_dynamism(), TensorShapeDynamism::DynamicBound);
        assert_eq!(tensor.numel_bound(), 6);
    }

    #[test]
    fn test_resize_goes_through_runtime() {
        let mut data = vec![0; 6];
        let mut backend = build(&mut data, &[2, 3]);
        backend.resize(&[3, 1]).unwrap();
        assert_eq!(backend.sizes(), &[3, 1]);
        assert_eq!(&*backend.strides(), &[1, 1]);

        let tensor = backend.aliasing_tensor();
        assert_eq!(tensor.sizes(), &[3, 1]);
        assert_eq!(tensor.strides(), &[1, 1]);
    }

    #[test]
    fn test_zero_dim() {
        let mut data = vec![42];
        let mut backend = build(&mut data, &[]);
        assert!(backend.strides().is_empty());
        let tensor = backend.aliasing_tensor();
        assert_eq!(tensor.numel(), 1);
        assert_eq!(tensor.as_slice(), &[42]);
    }
}
