//! Auth configuration types

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Create bearer auth from a token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
