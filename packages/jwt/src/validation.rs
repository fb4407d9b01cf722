//! JWT validation options.

use chrono::Duration;

/// JWT validation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Tolerated clock skew when checking `exp`.
    pub leeway: Duration,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationOptions {
    /// No leeway: a token is expired as soon as `exp < now`.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            leeway: Duration::zero(),
        }
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }
}
