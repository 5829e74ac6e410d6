use std::sync::Arc;

use async_trait::async_trait;

use action_retry::RetryEngine;
use driver_port::{Reporter, Session};
use framewise_core_types::{ActionId, DriveError, Locator};

use crate::conditions::Condition;
use crate::model::{ActionReport, DispatchOpt};
use crate::policy::DispatchPolicy;
use crate::runner::{execute, execute_absence, Action, RuntimeDeps};

/// Frame-aware driving operations over one live session.
///
/// Failures come in two user-visible kinds: [`DriveError::WaitExhausted`]
/// when the retry budget runs out in one context, and
/// [`DriveError::FrameSearchExhausted`] when a frame walk finds no context
/// that satisfies the operation.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Wait until a matching, displayed element exists.
    async fn assert_visible(
        &self,
        locator: &Locator,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;

    /// Wait until no matching element is displayed at the current context.
    /// Absence (and a failing query) count as success.
    async fn assert_not_visible(&self, locator: &Locator) -> Result<ActionReport, DriveError>;

    /// Wait until a matching, displayed element whose text contains `text`
    /// exists.
    async fn assert_text_visible(
        &self,
        locator: &Locator,
        text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;

    /// Click a matching element.
    async fn click(
        &self,
        locator: &Locator,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;

    /// Click the unique matching element whose text contains `text`. Two
    /// candidates with the same text are deterministically "not found".
    async fn click_where_text_equals(
        &self,
        locator: &Locator,
        text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;

    /// Send keystrokes to a matching element.
    async fn type_text(
        &self,
        locator: &Locator,
        text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;

    /// Select the option with the given visible text on a matching select
    /// control.
    async fn select_option(
        &self,
        locator: &Locator,
        option_text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;

    /// Clear a matching input element.
    async fn clear(
        &self,
        locator: &Locator,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError>;
}

pub struct DispatcherBuilder {
    policy: DispatchPolicy,
    session: Option<Arc<dyn Session>>,
    reporter: Option<Arc<dyn Reporter>>,
}

impl DispatcherBuilder {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            policy,
            session: None,
            reporter: None,
        }
    }

    pub fn with_session(mut self, session: Arc<dyn Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Arc<dyn Dispatcher> {
        let session = self.session.expect("session port is required");
        let reporter = self.reporter.expect("reporter port is required");
        let engine = RetryEngine::new(self.policy.retry.clone(), reporter.clone());
        Arc::new(DispatcherImpl {
            policy: self.policy,
            session,
            reporter,
            engine,
        })
    }
}

struct DispatcherImpl {
    policy: DispatchPolicy,
    session: Arc<dyn Session>,
    reporter: Arc<dyn Reporter>,
    engine: RetryEngine,
}

impl DispatcherImpl {
    fn deps(&self) -> RuntimeDeps<'_> {
        RuntimeDeps {
            session: self.session.as_ref(),
            reporter: self.reporter.as_ref(),
            engine: &self.engine,
            policy: &self.policy,
        }
    }
}

#[async_trait]
impl Dispatcher for DispatcherImpl {
    async fn assert_visible(
        &self,
        locator: &Locator,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter
            .trace(&format!("checking {locator} is visible"))
            .await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} should be visible"),
            locator,
            &Condition::Visible,
            &Condition::Visible,
            &Action::None,
            opt,
        )
        .await
    }

    async fn assert_not_visible(&self, locator: &Locator) -> Result<ActionReport, DriveError> {
        self.reporter
            .trace(&format!("checking {locator} is not visible"))
            .await;
        execute_absence(
            &self.deps(),
            &format!("{locator} should not be visible"),
            locator,
        )
        .await
    }

    async fn assert_text_visible(
        &self,
        locator: &Locator,
        text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter
            .trace(&format!("checking {locator} contains '{text}'"))
            .await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} should contain '{text}'"),
            locator,
            &Condition::TextVisible(text.to_string()),
            &Condition::TextVisible(text.to_string()),
            &Action::None,
            opt,
        )
        .await
    }

    async fn click(
        &self,
        locator: &Locator,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter.trace(&format!("clicking {locator}")).await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} attempting click"),
            locator,
            &Condition::First,
            &Condition::Unique,
            &Action::Click,
            opt,
        )
        .await
    }

    async fn click_where_text_equals(
        &self,
        locator: &Locator,
        text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter
            .trace(&format!("clicking {locator} with text '{text}'"))
            .await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} with text '{text}' attempting click"),
            locator,
            &Condition::UniqueText(text.to_string()),
            &Condition::UniqueText(text.to_string()),
            &Action::Click,
            opt,
        )
        .await
    }

    async fn type_text(
        &self,
        locator: &Locator,
        text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter
            .trace(&format!("typing into {locator}"))
            .await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} should accept input"),
            locator,
            &Condition::First,
            &Condition::Unique,
            &Action::SendKeys(text.to_string()),
            opt,
        )
        .await
    }

    async fn select_option(
        &self,
        locator: &Locator,
        option_text: &str,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter
            .trace(&format!("selecting '{option_text}' on {locator}"))
            .await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} should be selectable"),
            locator,
            &Condition::First,
            &Condition::Unique,
            &Action::SelectVisibleText(option_text.to_string()),
            opt,
        )
        .await
    }

    async fn clear(
        &self,
        locator: &Locator,
        opt: DispatchOpt,
    ) -> Result<ActionReport, DriveError> {
        self.reporter.trace(&format!("clearing {locator}")).await;
        execute(
            &self.deps(),
            &ActionId::new(),
            &format!("{locator} should be clearable"),
            locator,
            &Condition::First,
            &Condition::Unique,
            &Action::Clear,
            opt,
        )
        .await
    }
}
