//! Framewise — a resilience layer for driving one browser-automation
//! session.
//!
//! Flaky UI queries are retried until they succeed or a bounded budget runs
//! out, and element operations issued against the top-level document are
//! transparently redirected into whichever nested embedded document (frame)
//! can satisfy them. The browser driver itself is an external collaborator
//! plugged in through the [`driver_port`] capability traits.
//!
//! ```no_run
//! # async fn demo(session: std::sync::Arc<dyn framewise::Session>,
//! #               reporter: std::sync::Arc<dyn framewise::Reporter>) {
//! use framewise::prelude::*;
//!
//! let dispatcher = DispatcherBuilder::new(DispatchPolicy::default())
//!     .with_session(session)
//!     .with_reporter(reporter)
//!     .build();
//!
//! dispatcher
//!     .click_where_text_equals(
//!         &Locator::css("a.result"),
//!         "Apple",
//!         DispatchOpt::searching_frames(),
//!     )
//!     .await
//!     .unwrap();
//! # }
//! ```

pub use action_retry::{ProbeOutcome, RetryEngine, RetryPolicy};
pub use driver_port::{Element, ElementHandle, Reporter, Session, SessionError};
pub use frame_graph::{discover, navigate_to, FrameIdentity, FrameNode, FrameTree, NodeId};
pub use framewise_core_types::{ActionId, DriveError, Locator, SessionId};
pub use tool_dispatch::{ActionReport, DispatchOpt, DispatchPolicy, Dispatcher, DispatcherBuilder};

pub mod prelude {
    pub use crate::{
        DispatchOpt, DispatchPolicy, Dispatcher, DispatcherBuilder, DriveError, Locator,
        RetryPolicy,
    };
}
