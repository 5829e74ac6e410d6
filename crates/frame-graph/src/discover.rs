use tracing::{debug, instrument};

use driver_port::{Element, Session, SessionError};
use framewise_core_types::{DriveError, Locator};

use crate::model::{FrameIdentity, FrameTree};
use crate::navigate::navigate_to;

pub(crate) fn wrap(err: SessionError) -> DriveError {
    DriveError::session(err.to_string())
}

/// Read the identity triple off a live frame element. Absent attributes
/// normalize to empty strings so identity comparison stays total.
pub(crate) async fn read_identity(element: &dyn Element) -> Result<FrameIdentity, SessionError> {
    let src = element.attribute("src").await?.unwrap_or_default();
    let id = element.attribute("id").await?.unwrap_or_default();
    let name = element.attribute("name").await?.unwrap_or_default();
    Ok(FrameIdentity { id, name, src })
}

/// Probe the live session and build the frame tree, depth-first.
///
/// `probe` is the locator the driver resolves to the embedded-document
/// elements of the active context, usually [`Locator::frames`]. Each pending
/// node is entered by absolute replay from the root, so sibling discovery is
/// never affected by where a deeper probe left the context. A frame whose
/// `src` is empty is skipped entirely: it cannot be re-entered by identity
/// later, and descending into it would produce unreachable nodes. The
/// session is left in the default context.
#[instrument(skip_all)]
pub async fn discover(session: &dyn Session, probe: &Locator) -> Result<FrameTree, DriveError> {
    let mut tree = FrameTree::new();
    let mut pending = vec![tree.root()];

    while let Some(node) = pending.pop() {
        navigate_to(session, &tree, node, probe).await?;

        let frames = session.find_all(probe).await.map_err(wrap)?;
        let mut added = Vec::new();
        for frame in &frames {
            let identity = read_identity(frame.as_ref()).await.map_err(wrap)?;
            if !identity.is_trackable() {
                debug!("skipping frame without src");
                continue;
            }
            if let Some(child) = tree.insert_child(node, identity) {
                added.push(child);
            }
        }
        debug!(
            context = %tree.src_path(node),
            discovered = added.len(),
            "probed context for frames"
        );

        // LIFO stack: reversed so children expand in discovery order.
        for child in added.into_iter().rev() {
            pending.push(child);
        }
    }

    session.switch_to_default().await.map_err(wrap)?;
    Ok(tree)
}
