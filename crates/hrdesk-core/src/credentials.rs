//! Login credentials type.

use std::fmt;

use serde::Serialize;

/// Email and password used to open a session.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use hrdesk_core::Credentials;
///
/// let creds = Credentials::new("ada@example.com", "hunter2");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
