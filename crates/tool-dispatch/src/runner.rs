use std::time::Instant;

use tracing::{debug, instrument, warn};

use action_retry::{ProbeOutcome, RetryEngine};
use driver_port::{ElementHandle, Reporter, Session, SessionError};
use frame_graph::{discover, navigate_to};
use framewise_core_types::{ActionId, DriveError, Locator};

use crate::conditions::{evaluate, Condition};
use crate::errors::DispatchError;
use crate::model::{ActionReport, DispatchOpt};
use crate::policy::DispatchPolicy;

pub(crate) struct RuntimeDeps<'a> {
    pub session: &'a dyn Session,
    pub reporter: &'a dyn Reporter,
    pub engine: &'a RetryEngine,
    pub policy: &'a DispatchPolicy,
}

/// What to do with the element once the condition holds.
#[derive(Clone, Debug)]
pub(crate) enum Action {
    None,
    Click,
    SendKeys(String),
    SelectVisibleText(String),
    Clear,
}

async fn apply(action: &Action, element: &ElementHandle) -> Result<(), SessionError> {
    match action {
        Action::None => Ok(()),
        Action::Click => element.click().await,
        Action::SendKeys(text) => element.send_keys(text).await,
        Action::SelectVisibleText(option) => element.select_by_visible_text(option).await,
        Action::Clear => element.clear().await,
    }
}

fn session_fault(err: SessionError) -> DriveError {
    DispatchError::Session(err.to_string()).into()
}

/// Entry point shared by every dispatcher operation.
///
/// `poll_condition` drives the in-place retry loop with first-match
/// resolution; `walk_condition` is the stricter node-local test
/// a context must pass before the action is committed there. Frame search is
/// gated on a cheap probe: when the top-level document holds no frame
/// elements at all, the flag is inert and the operation polls in place
/// exactly as if it were off.
#[allow(clippy::too_many_arguments)]
#[instrument(skip_all, fields(action = %action_id.0, what = %description))]
pub(crate) async fn execute(
    deps: &RuntimeDeps<'_>,
    action_id: &ActionId,
    description: &str,
    locator: &Locator,
    poll_condition: &Condition,
    walk_condition: &Condition,
    action: &Action,
    opt: DispatchOpt,
) -> Result<ActionReport, DriveError> {
    let report = ActionReport::new(Instant::now());

    if opt.search_frames {
        let frames = deps
            .session
            .find_all(&deps.policy.frame_probe)
            .await
            .map_err(session_fault)?;
        if !frames.is_empty() {
            return frame_search(deps, description, locator, walk_condition, action, report).await;
        }
        debug!("top-level document has no frames, polling in place");
    }

    at_context(deps, description, locator, poll_condition, action, report).await
}

/// Poll the operation at the current context until it succeeds or the retry
/// budget runs out. The locator is re-resolved on every attempt.
async fn at_context(
    deps: &RuntimeDeps<'_>,
    description: &str,
    locator: &Locator,
    condition: &Condition,
    action: &Action,
    mut report: ActionReport,
) -> Result<ActionReport, DriveError> {
    let session = deps.session;
    deps.engine
        .poll_until(description, move || {
            let (session, locator, condition, action) = (session, locator, condition, action);
            async move {
                match evaluate(session, locator, condition).await {
                    Err(err) => ProbeOutcome::Faulted(err),
                    Ok(None) => ProbeOutcome::NotReady,
                    Ok(Some(element)) => match apply(action, &element).await {
                        Ok(()) => ProbeOutcome::Ready,
                        Err(err) => ProbeOutcome::Faulted(err),
                    },
                }
            }
        })
        .await?;

    report.ok = true;
    Ok(report.finish(Instant::now()))
}

/// Poll at the current context until no matching element is displayed.
/// Mirrors the visibility assertion's swallow rules from the other side: a
/// query fault counts as "not there".
pub(crate) async fn execute_absence(
    deps: &RuntimeDeps<'_>,
    description: &str,
    locator: &Locator,
) -> Result<ActionReport, DriveError> {
    let mut report = ActionReport::new(Instant::now());
    let session = deps.session;
    deps.engine
        .poll_until(description, move || {
            let (session, locator) = (session, locator);
            async move {
                match evaluate(session, locator, &Condition::Visible).await {
                    Ok(Some(_)) => ProbeOutcome::NotReady,
                    Ok(None) | Err(_) => ProbeOutcome::Ready,
                }
            }
        })
        .await?;

    report.ok = true;
    Ok(report.finish(Instant::now()))
}

/// Discover the frame tree and walk it depth-first until some context
/// satisfies the condition, then run the action there. The default context
/// is restored on every exit path before anything is returned.
async fn frame_search(
    deps: &RuntimeDeps<'_>,
    description: &str,
    locator: &Locator,
    condition: &Condition,
    action: &Action,
    mut report: ActionReport,
) -> Result<ActionReport, DriveError> {
    let outcome = walk(deps, description, locator, condition, action).await;

    let reset = deps.session.switch_to_default().await;

    let found = outcome?;
    reset.map_err(session_fault)?;

    match found {
        Some(frame_path) => {
            report.ok = true;
            report.frame_path = Some(frame_path);
            Ok(report.finish(Instant::now()))
        }
        None => {
            deps.reporter
                .fail(&format!(
                    "could not find {description} anywhere in the frame tree"
                ))
                .await;
            Err(DispatchError::FrameSearch(description.to_string()).into())
        }
    }
}

async fn walk(
    deps: &RuntimeDeps<'_>,
    description: &str,
    locator: &Locator,
    condition: &Condition,
    action: &Action,
) -> Result<Option<String>, DriveError> {
    // The top-level document gets the first try.
    deps.session
        .switch_to_default()
        .await
        .map_err(session_fault)?;
    if let Some(element) = try_here(deps.session, locator, condition).await {
        perform(deps, description, action, element).await?;
        return Ok(Some("/".to_string()));
    }

    let tree = discover(deps.session, &deps.policy.frame_probe).await?;
    for node in tree.depth_first() {
        navigate_to(deps.session, &tree, node, &deps.policy.frame_probe).await?;
        if let Some(element) = try_here(deps.session, locator, condition).await {
            debug!(context = %tree.src_path(node), "condition satisfied in frame");
            perform(deps, description, action, element).await?;
            return Ok(Some(tree.src_path(node)));
        }
    }

    Ok(None)
}

/// One non-polled evaluation in the active context. A fault here is treated
/// like a miss so the walk can move on to the next node.
async fn try_here(
    session: &dyn Session,
    locator: &Locator,
    condition: &Condition,
) -> Option<ElementHandle> {
    match evaluate(session, locator, condition).await {
        Ok(hit) => hit,
        Err(err) => {
            warn!(%err, "condition probe faulted in this context, moving on");
            None
        }
    }
}

/// Run the action on the matched element, retrying on transient faults. The
/// handle is reused across attempts, as a caller holding it would.
async fn perform(
    deps: &RuntimeDeps<'_>,
    description: &str,
    action: &Action,
    element: ElementHandle,
) -> Result<(), DriveError> {
    deps.engine
        .retry_action(description, move || {
            let element = element.clone();
            let action = action;
            async move { apply(action, &element).await }
        })
        .await
}
