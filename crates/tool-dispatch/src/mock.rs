//! Mock ports for the unit tests in this crate. Frames are out of scope
//! here — the workspace-level scenario tests drive a full scripted document.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use driver_port::{Element, ElementHandle, Reporter, Session, SessionError};
use framewise_core_types::Locator;

struct MockElement {
    label: String,
    text: String,
    displayed: bool,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Element for MockElement {
    async fn attribute(&self, _name: &str) -> Result<Option<String>, SessionError> {
        Ok(None)
    }

    async fn is_displayed(&self) -> Result<bool, SessionError> {
        Ok(self.displayed)
    }

    async fn text(&self) -> Result<String, SessionError> {
        Ok(self.text.clone())
    }

    async fn click(&self) -> Result<(), SessionError> {
        self.log.lock().unwrap().push(format!("click:{}", self.label));
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), SessionError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("keys:{}:{}", self.label, text));
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.log.lock().unwrap().push(format!("clear:{}", self.label));
        Ok(())
    }

    async fn select_by_visible_text(&self, option: &str) -> Result<(), SessionError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("select:{}:{}", self.label, option));
        Ok(())
    }
}

#[derive(Clone)]
struct ElementSpec {
    label: String,
    text: String,
    displayed: bool,
}

pub(crate) struct MockSession {
    elements: Mutex<Vec<ElementSpec>>,
    log: Arc<Mutex<Vec<String>>>,
    element_finds: AtomicU32,
    appear_after: AtomicU32,
    switches: AtomicUsize,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            elements: Mutex::new(Vec::new()),
            log: Arc::new(Mutex::new(Vec::new())),
            element_finds: AtomicU32::new(0),
            appear_after: AtomicU32::new(0),
            switches: AtomicUsize::new(0),
        }
    }

    pub fn add_element(&self, label: &str, text: &str, displayed: bool) {
        self.elements.lock().unwrap().push(ElementSpec {
            label: label.to_string(),
            text: text.to_string(),
            displayed,
        });
    }

    /// Make the first `n` element queries come back empty, simulating a
    /// document that is still rendering.
    pub fn appear_after(&self, n: u32) {
        self.appear_after.store(n, Ordering::SeqCst);
    }

    pub fn actions(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn switch_calls(&self) -> usize {
        self.switches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Session for MockSession {
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, SessionError> {
        if *locator == Locator::frames() {
            return Ok(Vec::new());
        }

        let call = self.element_finds.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.appear_after.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }

        Ok(self
            .elements
            .lock()
            .unwrap()
            .iter()
            .filter(|spec| spec.label == locator.value)
            .map(|spec| {
                Arc::new(MockElement {
                    label: spec.label.clone(),
                    text: spec.text.clone(),
                    displayed: spec.displayed,
                    log: self.log.clone(),
                }) as ElementHandle
            })
            .collect())
    }

    async fn switch_to_default(&self) -> Result<(), SessionError> {
        self.switches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn switch_to_frame(&self, _frame: &ElementHandle) -> Result<(), SessionError> {
        self.switches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockReporter {
    fails: Mutex<Vec<String>>,
    traces: Mutex<Vec<String>>,
}

impl MockReporter {
    pub fn fails(&self) -> Vec<String> {
        self.fails.lock().unwrap().clone()
    }

    pub fn traces(&self) -> Vec<String> {
        self.traces.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reporter for MockReporter {
    async fn fail(&self, message: &str) {
        self.fails.lock().unwrap().push(message.to_string());
    }

    async fn trace(&self, message: &str) {
        self.traces.lock().unwrap().push(message.to_string());
    }
}
