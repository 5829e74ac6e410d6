//! Discovery and navigation of nested embedded documents.
//!
//! A [`FrameTree`] is rebuilt from the live session every time a frame-aware
//! operation needs one; frame contents change between operations, so trees
//! are never cached. Nodes are keyed by their `src` attribute — a frame
//! without one cannot be re-entered later and is treated as a dead end.

pub mod discover;
pub mod model;
pub mod navigate;

#[cfg(test)]
pub(crate) mod fake;

pub use discover::discover;
pub use model::{FrameIdentity, FrameNode, FrameTree, NodeId};
pub use navigate::navigate_to;
