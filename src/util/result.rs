use std::error::Error;

/// Turns the `Result` of a `try_` method into the value its panicking counterpart returns.
pub(crate) trait ResultExtension<T> {
    /// Unwraps an [`Ok`] value, or panics with the error's own message, reported at the caller's
    /// location.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}
