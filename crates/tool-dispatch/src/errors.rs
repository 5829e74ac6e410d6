use thiserror::Error;

use framewise_core_types::DriveError;

/// Dispatcher-local failures, folded into [`DriveError`] at the API surface.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("could not find {0} anywhere in the frame tree")]
    FrameSearch(String),

    #[error("session failure outside retry scope: {0}")]
    Session(String),
}

impl From<DispatchError> for DriveError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::FrameSearch(what) => DriveError::frame_search_exhausted(what),
            DispatchError::Session(message) => DriveError::session(message),
        }
    }
}
