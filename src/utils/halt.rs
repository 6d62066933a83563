use std::fmt::Display;

/// Turns a failed result into a panic, logging the diagnostic first.
///
/// Used where a caller has opted into aborting on errors the crate would
/// otherwise return.
pub trait HaltOnError<T> {
    fn halt_on_error(self, context: &str) -> T;
}

impl<T, E: Display> HaltOnError<T> for Result<T, E> {
    fn halt_on_error(self, context: &str) -> T {
        match self {
            Ok(val) => val,
            Err(err) => {
                log::error!("{}: {}", context, err);
                panic!("{}: {}", context, err)
            }
        }
    }
}
