// ABOUTME: Token handles and the per-engine allocator that issues them
// ABOUTME: Tokens are strictly increasing and the allocator refuses to wrap on overflow

use crate::dispatcher::error::{DispatchError, DispatchResult};
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};

/// Engine-local handle correlating an outbound send with its callbacks
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(i32);

impl Token {
    /// Wrap a raw token received from the transport
    pub const fn new(raw: i32) -> Self {
        Token(raw)
    }

    /// Raw value as carried on the transport
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for Token {
    fn from(raw: i32) -> Self {
        Token(raw)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues strictly increasing tokens, starting at 1
///
/// Safe to share between concurrent callbacks. Once the 32-bit range is used
/// up every call fails with `TokenSpaceExhausted` instead of wrapping.
#[derive(Debug, Default)]
pub struct TokenAllocator {
    last: AtomicI32,
}

impl TokenAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating after `last`, so the next token is `last + 1`
    pub fn starting_after(last: i32) -> Self {
        Self {
            last: AtomicI32::new(last),
        }
    }

    /// Allocate the next token
    pub fn next(&self) -> DispatchResult<Token> {
        self.last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                last.checked_add(1)
            })
            .map(|previous| Token(previous + 1))
            .map_err(|_| DispatchError::TokenSpaceExhausted)
    }

    /// Most recently issued token, if any
    pub fn last_issued(&self) -> Option<Token> {
        match self.last.load(Ordering::Acquire) {
            0 => None,
            last => Some(Token(last)),
        }
    }
}
