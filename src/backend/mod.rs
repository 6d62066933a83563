//! Tensor representations a [`TensorView`](crate::TensorView) can hand to an executor.
//!
//! Two are provided. [`ExplicitStrideBackend`] computes and owns the strides
//! and dim order itself and produces the runtime's [`Tensor`](crate::Tensor).
//! [`NativeDerivedBackend`] leaves layout derivation to `ndarray` and produces
//! an `ArrayViewMut`. The `native-backend` feature picks which one is
//! [`DefaultBackend`].

use std::{borrow::Cow, ptr::NonNull};

use crate::{
    tensor::scalar::{Scalar, ScalarType, SizesType, StridesType},
    utils::error::TensorError,
};

mod explicit;
mod native;

pub use explicit::ExplicitStrideBackend;
pub use native::NativeDerivedBackend;

#[cfg(not(feature = "native-backend"))]
pub type DefaultBackend<'a, S> = ExplicitStrideBackend<'a, S>;
#[cfg(feature = "native-backend")]
pub type DefaultBackend<'a, S> = NativeDerivedBackend<'a, S>;

/// The caller-facing surface shared by every backend's handle type.
pub trait AliasingTensor<S: Scalar> {
    fn scalar_type(&self) -> ScalarType {
        S::TYPE
    }

    fn dim(&self) -> usize;

    fn size(&self, dim: usize) -> SizesType;

    fn stride(&self, dim: usize) -> StridesType;

    fn numel(&self) -> usize;

    fn as_ptr(&self) -> *const S;

    /// The live elements in memory order, aliasing the view's buffer.
    fn as_mut_slice(&mut self) -> &mut [S];
}

/// Metadata holder for a tensor over a borrowed buffer of `S`.
pub trait TensorBackend<'a, S: Scalar>: Sized {
    /// Handle produced by [`TensorBackend::aliasing_tensor`].
    type Handle<'t>: AliasingTensor<S>
    where
        Self: 't;

    /// Builds the metadata for `sizes` over `data`.
    ///
    /// # Safety
    ///
    /// `data` must be valid for reads and writes of `numel_bound` elements
    /// for `'a` and not accessed through any other path while a handle is
    /// alive. `sizes`
    /// must be non-negative, describe at most `numel_bound` elements and have
    /// strides representable as [`StridesType`].
    unsafe fn build(data: NonNull<S>, sizes: &[SizesType], numel_bound: usize) -> Self;

    fn sizes(&self) -> &[SizesType];

    fn strides(&self) -> Cow<'_, [StridesType]>;

    /// Resizes in place. Leaves the metadata unchanged on error.
    fn resize(&mut self, new_sizes: &[SizesType]) -> Result<(), TensorError>;

    /// A fresh handle aliasing the buffer and the current metadata.
    fn aliasing_tensor(&mut self) -> Self::Handle<'_>;
}
