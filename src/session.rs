use tracing::debug;

use crate::model::Ms;

/// A backend-issued access token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub issued_at: Ms,
    pub expires_at: Ms,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    AlreadyExpired { issued_at: Ms, expires_at: Ms },
    EmptyToken,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::AlreadyExpired {
                issued_at,
                expires_at,
            } => write!(f, "token expires at {expires_at}, not after issue time {issued_at}"),
            SessionError::EmptyToken => write!(f, "empty token"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Caller-owned cache for one session token.
///
/// Every read takes `now` explicitly; the cache never consults a clock.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    current: Option<SessionToken>,
    /// How long before expiry a refresh is requested.
    refresh_margin: Ms,
}

impl TokenCache {
    pub fn new(refresh_margin: Ms) -> Self {
        Self {
            current: None,
            refresh_margin: refresh_margin.max(0),
        }
    }

    /// Replace the cached token.
    pub fn store(&mut self, token: SessionToken) -> Result<(), SessionError> {
        if token.token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if token.expires_at <= token.issued_at {
            return Err(SessionError::AlreadyExpired {
                issued_at: token.issued_at,
                expires_at: token.expires_at,
            });
        }
        debug!("session token stored, expires at {}", token.expires_at);
        self.current = Some(token);
        Ok(())
    }

    /// The cached token, if still valid at `now`.
    pub fn get(&self, now: Ms) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|t| now < t.expires_at)
            .map(|t| t.token.as_str())
    }

    /// True when there is no usable token or it expires within the margin.
    pub fn needs_refresh(&self, now: Ms) -> bool {
        match &self.current {
            Some(t) => now >= t.expires_at.saturating_sub(self.refresh_margin),
            None => true,
        }
    }

    /// Drop the token if it has expired at `now`, returning it.
    pub fn evict_expired(&mut self, now: Ms) -> Option<SessionToken> {
        if self.current.as_ref().is_some_and(|t| now >= t.expires_at) {
            debug!("session token expired at {now}");
            return self.current.take();
        }
        None
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
