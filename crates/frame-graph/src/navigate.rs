use tracing::warn;

use driver_port::{ElementHandle, Session, SessionError};
use framewise_core_types::{DriveError, Locator};

use crate::discover::{read_identity, wrap};
use crate::model::{FrameIdentity, FrameTree, NodeId};

/// Re-enter a previously discovered node from the top of the document.
///
/// Always resets to the default context first, then replays the path one
/// step at a time, re-querying the live frames at each level and switching
/// into the one whose `(src, id, name)` triple matches the path node —
/// requiring that match to be unique. When a step no longer matches the live
/// document has drifted: the replay stops short and the session stays in the
/// last context it reached. Callers observe the drift through their own
/// match failing there.
pub async fn navigate_to(
    session: &dyn Session,
    tree: &FrameTree,
    node: NodeId,
    probe: &Locator,
) -> Result<(), DriveError> {
    session.switch_to_default().await.map_err(wrap)?;

    for step in tree.path_to(node) {
        let want = tree.node(step).identity();
        match unique_frame_match(session, want, probe).await.map_err(wrap)? {
            Some(frame) => session.switch_to_frame(&frame).await.map_err(wrap)?,
            None => {
                warn!(
                    src = %want.src,
                    target = %tree.src_path(node),
                    "frame path step no longer present, stopping navigation short"
                );
                break;
            }
        }
    }

    Ok(())
}

/// The frame element in the active context matching `want`, provided exactly
/// one does. Zero or several candidates are both "no match".
async fn unique_frame_match(
    session: &dyn Session,
    want: &FrameIdentity,
    probe: &Locator,
) -> Result<Option<ElementHandle>, SessionError> {
    let frames = session.find_all(probe).await?;
    let mut hit = None;
    let mut candidates = 0usize;
    for frame in frames {
        if read_identity(frame.as_ref()).await? == *want {
            candidates += 1;
            hit = Some(frame);
        }
    }
    Ok(if candidates == 1 { hit } else { None })
}
