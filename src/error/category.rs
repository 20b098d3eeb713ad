//! Error category classification.
//!
//! Every failed operation falls into one of four categories, which decide
//! how the failure is reported to the operator.

use std::fmt;

/// High-level categorization of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The backend answered 2xx but reported a logical failure.
    Business,

    /// The backend answered with a non-2xx status.
    Transport,

    /// The request never completed (DNS, refused, timeout, reset).
    Network,

    /// Anything else: undecodable bodies, local storage failures.
    Unknown,
}

impl ErrorCategory {
    /// Whether re-triggering the same operation unchanged may succeed.
    ///
    /// Advisory only; nothing in the crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Business => "business",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Network => "network",
            ErrorCategory::Unknown => "unknown",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Business => "Request rejected by the server",
            ErrorCategory::Transport => "Server returned an error status",
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Unknown => "Unexpected error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_is_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(!ErrorCategory::Business.is_retryable());
        assert!(!ErrorCategory::Transport.is_retryable());
        assert!(!ErrorCategory::Unknown.is_retryable());
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(ErrorCategory::Transport.to_string(), "transport");
        assert_eq!(ErrorCategory::Unknown.as_str(), "unknown");
    }
}
