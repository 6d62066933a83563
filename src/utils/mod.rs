pub mod error;
pub mod halt;

pub use error::{ErrorKind, TensorError};
