use thiserror::Error;

/// Coarse classification of a [`TensorError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    ResizeFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Resize failed: {0}")]
    ResizeFailed(String),
}

impl TensorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TensorError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            TensorError::ResizeFailed(_) => ErrorKind::ResizeFailed,
        }
    }
}
