use std::{borrow::Cow, fmt::Debug, marker::PhantomData, ptr::NonNull};

use crate::{
    backend::{DefaultBackend, TensorBackend},
    tensor::{
        config::{ResizePolicy, TensorViewConfig},
        desc,
        scalar::{Scalar, ScalarType, SizesType, StridesType},
    },
    utils::{error::TensorError, halt::HaltOnError},
};

/// A tensor over a caller-owned buffer.
///
/// The view owns the shape and stride metadata but never the elements: it
/// does not allocate, free or copy them. Handles returned by
/// [`TensorView::aliasing_tensor`] borrow the view and so cannot outlive it,
/// and the view itself cannot outlive the buffer lifetime `'a`.
///
/// The dimensionality is fixed at construction. [`TensorView::resize`] may
/// change the extents as long as the element count stays within
/// [`TensorView::numel_bound`].
pub struct TensorView<'a, S: Scalar, B: TensorBackend<'a, S> = DefaultBackend<'a, S>> {
    backend: B,
    numel_bound: usize,
    resize_policy: ResizePolicy,
    _marker: PhantomData<&'a mut [S]>,
}

impl<'a, S: Scalar, B: TensorBackend<'a, S>> TensorView<'a, S, B> {
    /// Creates a view over `data` with the default configuration.
    ///
    /// # Panics
    ///
    /// If a size is negative, or `sizes` needs more elements than `data` holds.
    pub fn new(data: &'a mut [S], sizes: &[SizesType]) -> Self {
        Self::with_config(data, sizes, TensorViewConfig::default())
    }

    pub fn with_config(data: &'a mut [S], sizes: &[SizesType], config: TensorViewConfig) -> Self {
        let capacity = data.len();
        // Safety: the slice is valid and exclusively borrowed for 'a
        unsafe { Self::from_raw_parts(data.as_mut_ptr(), capacity, sizes, config) }
    }

    /// Creates a view over a raw buffer of `capacity` elements.
    ///
    /// # Panics
    ///
    /// If `data` is null, a size is negative, `sizes` needs more elements
    /// than the resolved bound, the bound exceeds `capacity`, or the strides
    /// of `sizes` overflow.
    ///
    /// # Safety
    ///
    /// `data` must be valid for reads and writes of `capacity` elements for
    /// `'a`, and must not be accessed through any other path while a handle
    /// from [`TensorView::aliasing_tensor`] is alive.
    pub unsafe fn from_raw_parts(
        data: *mut S,
        capacity: usize,
        sizes: &[SizesType],
        config: TensorViewConfig,
    ) -> Self {
        let Some(data) = NonNull::new(data) else {
            panic!("Tensor data pointer cannot be null");
        };
        assert!(
            desc::validate_sizes(sizes).is_ok(),
            "Tensor sizes cannot be negative: {:?}",
            sizes
        );

        let numel_bound = config.numel_bound_for(capacity);
        let numel = desc::num_elements(sizes);
        assert!(
            numel.is_some_and(|n| n <= numel_bound),
            "Tensor of sizes {:?} does not fit in {} elements",
            sizes,
            numel_bound
        );
        assert!(
            desc::compute_strides(sizes).is_some(),
            "Strides of {:?} overflow",
            sizes
        );

        // Safety: forwarded from the caller, inputs validated above
        let backend = unsafe { B::build(data, sizes, numel_bound) };

        log::debug!(
            "Created {:?} tensor view: sizes={:?}, numel_bound={}",
            S::TYPE,
            sizes,
            numel_bound
        );

        Self {
            backend,
            numel_bound,
            resize_policy: config.resize_policy,
            _marker: PhantomData,
        }
    }

    /// Resizes the view in place. The buffer is never touched.
    ///
    /// Fails with `InvalidArgument` if `new_sizes` changes the dimensionality
    /// or holds a negative extent, and with `ResizeFailed` if the backend
    /// rejects the shape, e.g. because it exceeds [`TensorView::numel_bound`].
    /// The sizes and strides are unchanged after a failure.
    ///
    /// # Panics
    ///
    /// On any failure when configured with [`ResizePolicy::Halt`].
    pub fn resize(&mut self, new_sizes: &[SizesType]) -> Result<(), TensorError> {
        let result = self.backend.resize(new_sizes);
        if result.is_ok() {
            log::debug!("Resized tensor view to {:?}", new_sizes);
        }

        match self.resize_policy {
            ResizePolicy::Propagate => {
                if let Err(e) = &result {
                    log::warn!("Rejected resize to {:?}: {}", new_sizes, e);
                }
                result
            }
            // halt_on_error logs the failure itself
            ResizePolicy::Halt => {
                result.halt_on_error("Tensor resize failed");
                Ok(())
            }
        }
    }

    /// Get a backend tensor aliasing this view's buffer and metadata.
    ///
    /// Cheap: no element or metadata copy.
    pub fn aliasing_tensor(&mut self) -> B::Handle<'_> {
        self.backend.aliasing_tensor()
    }

    pub fn sizes(&self) -> &[SizesType] {
        self.backend.sizes()
    }

    pub fn strides(&self) -> Cow<'_, [StridesType]> {
        self.backend.strides()
    }

    pub fn dim(&self) -> usize {
        self.sizes().len()
    }

    pub fn numel(&self) -> usize {
        self.sizes().iter().map(|&s| s as usize).product()
    }

    pub fn nbytes(&self) -> usize {
        self.numel() * S::TYPE.element_size()
    }

    pub fn scalar_type(&self) -> ScalarType {
        S::TYPE
    }

    pub fn numel_bound(&self) -> usize {
        self.numel_bound
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }
}

impl<'a, S: Scalar, B: TensorBackend<'a, S>> Debug for TensorView<'a, S, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TensorView")
            .field("scalar_type", &self.scalar_type())
            .field("sizes", &self.sizes())
            .field("strides", &self.strides())
            .field("numel_bound", &self.numel_bound)
            .finish()
    }
}
