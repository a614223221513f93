// ABOUTME: Error types for the IMS SMS dispatcher and the transport gateway it drives
// ABOUTME: Separates bookkeeping violations, transport failures and caller-visible delivery failures

use crate::dispatcher::token::Token;
use thiserror::Error;

/// Errors raised by the dispatcher itself
///
/// These indicate bookkeeping or protocol violations. Transport failures on
/// the send path are recovered locally by falling back to the circuit-switched
/// transport and never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Callback referenced a token that is not tracked
    #[error("Invalid token: {0}")]
    InvalidToken(Token),

    /// Token is already tracked
    #[error("Duplicate token: {0}")]
    DuplicateToken(Token),

    /// Token counter would overflow
    #[error("Token space exhausted")]
    TokenSpaceExhausted,

    /// Tracker payload cannot be sent
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type alias for dispatcher operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failure reported by the IMS transport gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// IMS service is not reachable or not registered
    #[error("IMS service unavailable: {0}")]
    Unavailable(String),

    /// IMS service refused the request
    #[error("IMS request rejected: {0}")]
    Rejected(String),
}

/// Why a message ended in the failed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Transport reported a permanent failure
    Transport { reason: i32, error_code: i32 },

    /// Transient failures exceeded the configured retry bound
    RetriesExhausted { retries: u32 },
}
