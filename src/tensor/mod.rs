pub mod config;
pub mod desc;
pub mod runtime;
pub mod scalar;
mod view;

pub use config::{ResizePolicy, TensorViewConfig};
pub use runtime::{Tensor, TensorShapeDynamism, resize_tensor};
pub use scalar::{DimOrderType, Scalar, ScalarType, SizesType, StridesType};
pub use view::TensorView;
