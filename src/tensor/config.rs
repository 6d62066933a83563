/// What [`TensorView::resize`](crate::TensorView::resize) does with a rejected resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Log the error and panic.
    Halt,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TensorViewConfig {
    /// Largest element count a resize may request.
    /// `None` uses the full buffer capacity.
    pub numel_bound: Option<usize>,
    pub resize_policy: ResizePolicy,
}

impl TensorViewConfig {
    /// Resolves the element bound for a buffer holding `capacity` elements.
    pub fn numel_bound_for(&self, capacity: usize) -> usize {
        let bound = self.numel_bound.unwrap_or(capacity);
        assert!(
            bound <= capacity,
            "Element bound {} exceeds the buffer capacity of {}",
            bound,
            capacity
        );
        bound
    }
}
