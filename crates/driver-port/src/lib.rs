//! Capability surface the concrete browser driver plugs into.
//!
//! The driving layer never talks to a browser directly. It consumes exactly
//! three ports: [`Session`] for element queries and context switching,
//! [`Element`] for interactions with a resolved element, and [`Reporter`] for
//! failure and diagnostic sinks. The adapter crate wiring a real WebDriver or
//! DevTools backend lives outside this workspace.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use framewise_core_types::Locator;

/// Faults raised by the driver while servicing a port call.
///
/// Inside a retry scope every variant is treated as transient regardless of
/// classification; `retriable` exists for callers that want to log or bail
/// early outside one.
#[derive(Clone, Debug, Error)]
pub enum SessionError {
    #[error("driver i/o failure: {0}")]
    Io(String),

    #[error("stale element: {0}")]
    StaleElement(String),

    #[error("no such frame: {0}")]
    NoSuchFrame(String),

    #[error("control does not support the requested interaction: {0}")]
    UnsupportedControl(String),

    #[error("internal driver error: {0}")]
    Internal(String),
}

impl SessionError {
    pub fn retriable(&self) -> bool {
        matches!(self, SessionError::Io(_) | SessionError::StaleElement(_))
    }
}

pub type ElementHandle = Arc<dyn Element>;

/// A resolved element in whatever document context it was found in.
///
/// Handles may go stale when the document re-renders; interactions then fail
/// with [`SessionError::StaleElement`] and callers re-resolve.
#[async_trait]
pub trait Element: Send + Sync {
    /// Attribute value, or `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError>;

    async fn is_displayed(&self) -> Result<bool, SessionError>;

    async fn text(&self) -> Result<String, SessionError>;

    async fn click(&self) -> Result<(), SessionError>;

    async fn send_keys(&self, text: &str) -> Result<(), SessionError>;

    async fn clear(&self) -> Result<(), SessionError>;

    /// Select-control adapter: pick the option with the given visible text.
    async fn select_by_visible_text(&self, option: &str) -> Result<(), SessionError>;
}

/// One live browser session with a single mutable "active document context".
#[async_trait]
pub trait Session: Send + Sync {
    /// All elements matching the locator in the active context, in document
    /// order. "Not found" is an empty vec, never an error.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, SessionError>;

    /// Reset the active context to the top-level document.
    async fn switch_to_default(&self) -> Result<(), SessionError>;

    /// Switch the active context into the given embedded-document element.
    async fn switch_to_frame(&self, frame: &ElementHandle) -> Result<(), SessionError>;
}

/// Failure and diagnostic sink supplied by the embedding test harness.
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Terminal failure for the current operation. Assertion reporting and
    /// screenshot capture live behind this, outside the core.
    async fn fail(&self, message: &str);

    /// Best-effort diagnostic line, non-fatal.
    async fn trace(&self, message: &str);
}
