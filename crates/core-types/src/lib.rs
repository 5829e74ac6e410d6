use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type surfaced by the public driving operations.
///
/// Only two of these are produced by normal operation of the layer:
/// [`DriveError::WaitExhausted`] when a retry budget runs out, and
/// [`DriveError::FrameSearchExhausted`] when a frame-aware walk finds no node
/// where the operation can be applied. Driver faults that escape outside a
/// retry scope are wrapped as [`DriveError::Session`] rather than propagated
/// raw.
#[derive(Debug, Error, Clone)]
pub enum DriveError {
    #[error("wait exhausted: {what}")]
    WaitExhausted { what: String },

    #[error("could not find {what} anywhere in the frame tree")]
    FrameSearchExhausted { what: String },

    #[error("session failure: {message}")]
    Session { message: String },
}

impl DriveError {
    pub fn wait_exhausted(what: impl Into<String>) -> Self {
        Self::WaitExhausted { what: what.into() }
    }

    pub fn frame_search_exhausted(what: impl Into<String>) -> Self {
        Self::FrameSearchExhausted { what: what.into() }
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque element locator handed through to the driver.
///
/// The layer never interprets `value`; it only forwards the descriptor and
/// uses its display form in diagnostics. `strategy` names the resolution
/// scheme the driver should apply (`css`, `tag`, `xpath`, ...).
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Locator {
    pub strategy: String,
    pub value: String,
}

impl Locator {
    pub fn new(strategy: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            value: value.into(),
        }
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new("css", value)
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::new("tag", value)
    }

    /// The probe used to enumerate embedded documents in the active context.
    pub fn frames() -> Self {
        Self::tag("iframe")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy, self.value)
    }
}
