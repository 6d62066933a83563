//! managed-tensor - Tensor metadata over caller-owned buffers
//!
//! A [`TensorView`] owns the sizes and strides of a tensor whose elements
//! live in a buffer it only borrows, and hands out lightweight handles that
//! alias that buffer for an executor to run against.

mod backend;

mod tensor;

mod utils;

pub use backend::{
    AliasingTensor, DefaultBackend, ExplicitStrideBackend, NativeDerivedBackend, TensorBackend,
};
pub use tensor::{
    DimOrderType, ResizePolicy, Scalar, ScalarType, SizesType, StridesType, Tensor,
    TensorShapeDynamism, TensorView, TensorViewConfig, desc, resize_tensor,
};
pub use utils::{ErrorKind, TensorError};
