use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Per-operation toggles.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DispatchOpt {
    /// When the top-level document cannot satisfy the operation, discover
    /// the frame tree and walk it until some node can.
    pub search_frames: bool,
}

impl DispatchOpt {
    pub fn searching_frames() -> Self {
        Self {
            search_frames: true,
        }
    }
}

/// Outcome of one dispatched operation.
#[derive(Clone, Debug)]
pub struct ActionReport {
    pub ok: bool,
    pub started_at: Instant,
    pub finished_at: Instant,
    pub latency_ms: u128,
    /// Slash-joined `src` path of the context the operation was applied in;
    /// `None` when it ran at the current context without a frame walk.
    pub frame_path: Option<String>,
}

impl ActionReport {
    pub fn new(started_at: Instant) -> Self {
        Self {
            ok: false,
            started_at,
            finished_at: started_at,
            latency_ms: 0,
            frame_path: None,
        }
    }

    pub fn finish(mut self, finished_at: Instant) -> Self {
        self.finished_at = finished_at;
        self.latency_ms = finished_at
            .saturating_duration_since(self.started_at)
            .as_millis();
        self
    }
}
