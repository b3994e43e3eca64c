//! Local storage for the session token.

/// Where the client keeps the token between page loads.
pub trait TokenStore {
    /// The stored token, if any.
    fn get(&self) -> Option<String>;

    /// Replace the stored token.
    fn set(&mut self, token: String);

    /// Forget the stored token.
    fn clear(&mut self);
}

/// Token kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    /// A store that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.clone().filter(|t| !t.is_empty())
    }

    fn set(&mut self, token: String) {
        self.token = Some(token);
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
