//! Login redirect signal.

/// Host hook invoked when the session cannot be recovered and the user has
/// to log in again.
pub trait Navigator: Send + Sync {
    fn navigate_to_login(&self);
}

impl<F> Navigator for F
where
    F: Fn() + Send + Sync,
{
    fn navigate_to_login(&self) {
        self()
    }
}
