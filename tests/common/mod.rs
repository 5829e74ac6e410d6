//! Scripted in-memory driver used by the workspace scenario tests.
//!
//! The document is a tree of frames and plain elements; the session tracks
//! one active context exactly like a real driver, and every interaction is
//! journaled so tests can assert what happened where.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use framewise::{
    Element, ElementHandle, FrameIdentity, Locator, Reporter, Session, SessionError,
};

#[derive(Clone, Default)]
pub struct Doc {
    pub frames: Vec<Frame>,
    pub elements: Vec<Elem>,
}

#[derive(Clone)]
pub struct Frame {
    pub identity: FrameIdentity,
    pub doc: Doc,
}

#[derive(Clone)]
pub struct Elem {
    pub selector: String,
    pub text: String,
    pub displayed: bool,
}

pub fn doc(frames: Vec<Frame>, elements: Vec<Elem>) -> Doc {
    Doc { frames, elements }
}

pub fn frame(id: &str, name: &str, src: &str, doc: Doc) -> Frame {
    Frame {
        identity: FrameIdentity::new(id, name, src),
        doc,
    }
}

pub fn el(selector: &str, text: &str) -> Elem {
    Elem {
        selector: selector.to_string(),
        text: text.to_string(),
        displayed: true,
    }
}

struct State {
    doc: Mutex<Doc>,
    context: Mutex<Vec<FrameIdentity>>,
    actions: Mutex<Vec<String>>,
    default_switches: AtomicUsize,
    frame_switches: AtomicUsize,
}

impl State {
    fn context_path(context: &[FrameIdentity]) -> String {
        if context.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for step in context {
            path.push('/');
            path.push_str(&step.src);
        }
        path
    }

    fn active_doc(&self) -> Option<Doc> {
        let doc = self.doc.lock().unwrap();
        let context = self.context.lock().unwrap();
        let mut current = &*doc;
        for step in context.iter() {
            current = &current.frames.iter().find(|f| f.identity == *step)?.doc;
        }
        Some(current.clone())
    }
}

pub struct ScriptedSession {
    state: Arc<State>,
}

impl ScriptedSession {
    pub fn new(doc: Doc) -> Self {
        Self {
            state: Arc::new(State {
                doc: Mutex::new(doc),
                context: Mutex::new(Vec::new()),
                actions: Mutex::new(Vec::new()),
                default_switches: AtomicUsize::new(0),
                frame_switches: AtomicUsize::new(0),
            }),
        }
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.actions.lock().unwrap().clone()
    }

    pub fn current_context(&self) -> Vec<FrameIdentity> {
        self.state.context.lock().unwrap().clone()
    }

    pub fn frame_switches(&self) -> usize {
        self.state.frame_switches.load(Ordering::SeqCst)
    }
}

enum HandleKind {
    Frame(FrameIdentity),
    Element(Elem),
}

struct ScriptedHandle {
    state: Arc<State>,
    ctx: Vec<FrameIdentity>,
    kind: HandleKind,
}

impl ScriptedHandle {
    fn journal(&self, verb: &str, detail: Option<&str>) -> Result<(), SessionError> {
        match &self.kind {
            HandleKind::Frame(identity) => Err(SessionError::UnsupportedControl(format!(
                "frame element {}",
                identity.src
            ))),
            HandleKind::Element(elem) => {
                let mut line = format!(
                    "{verb}:{}:{}",
                    State::context_path(&self.ctx),
                    elem.selector
                );
                if let Some(detail) = detail {
                    line.push(':');
                    line.push_str(detail);
                }
                self.state.actions.lock().unwrap().push(line);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Element for ScriptedHandle {
    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        match &self.kind {
            HandleKind::Frame(identity) => {
                let value = match name {
                    "src" => &identity.src,
                    "id" => &identity.id,
                    "name" => &identity.name,
                    _ => return Ok(None),
                };
                Ok(Some(value.clone()))
            }
            HandleKind::Element(_) => Ok(None),
        }
    }

    async fn is_displayed(&self) -> Result<bool, SessionError> {
        match &self.kind {
            HandleKind::Frame(_) => Ok(true),
            HandleKind::Element(elem) => Ok(elem.displayed),
        }
    }

    async fn text(&self) -> Result<String, SessionError> {
        match &self.kind {
            HandleKind::Frame(_) => Ok(String::new()),
            HandleKind::Element(elem) => Ok(elem.text.clone()),
        }
    }

    async fn click(&self) -> Result<(), SessionError> {
        self.journal("click", None)
    }

    async fn send_keys(&self, text: &str) -> Result<(), SessionError> {
        self.journal("keys", Some(text))
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.journal("clear", None)
    }

    async fn select_by_visible_text(&self, option: &str) -> Result<(), SessionError> {
        self.journal("select", Some(option))
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, SessionError> {
        let ctx = self.state.context.lock().unwrap().clone();
        let Some(active) = self.state.active_doc() else {
            return Ok(Vec::new());
        };

        if *locator == Locator::frames() {
            return Ok(active
                .frames
                .into_iter()
                .map(|f| {
                    Arc::new(ScriptedHandle {
                        state: self.state.clone(),
                        ctx: ctx.clone(),
                        kind: HandleKind::Frame(f.identity),
                    }) as ElementHandle
                })
                .collect());
        }

        Ok(active
            .elements
            .into_iter()
            .filter(|elem| elem.selector == locator.value)
            .map(|elem| {
                Arc::new(ScriptedHandle {
                    state: self.state.clone(),
                    ctx: ctx.clone(),
                    kind: HandleKind::Element(elem),
                }) as ElementHandle
            })
            .collect())
    }

    async fn switch_to_default(&self) -> Result<(), SessionError> {
        self.state.default_switches.fetch_add(1, Ordering::SeqCst);
        self.state.context.lock().unwrap().clear();
        Ok(())
    }

    async fn switch_to_frame(&self, frame: &ElementHandle) -> Result<(), SessionError> {
        let identity = FrameIdentity {
            src: frame.attribute("src").await?.unwrap_or_default(),
            id: frame.attribute("id").await?.unwrap_or_default(),
            name: frame.attribute("name").await?.unwrap_or_default(),
        };

        let Some(active) = self.state.active_doc() else {
            return Err(SessionError::NoSuchFrame(identity.src));
        };
        if !active.frames.iter().any(|f| f.identity == identity) {
            return Err(SessionError::NoSuchFrame(identity.src));
        }

        self.state.frame_switches.fetch_add(1, Ordering::SeqCst);
        self.state.context.lock().unwrap().push(identity);
        Ok(())
    }
}

#[derive(Default)]
pub struct SpyReporter {
    fails: Mutex<Vec<String>>,
    traces: Mutex<Vec<String>>,
}

impl SpyReporter {
    pub fn fails(&self) -> Vec<String> {
        self.fails.lock().unwrap().clone()
    }

    pub fn traces(&self) -> Vec<String> {
        self.traces.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reporter for SpyReporter {
    async fn fail(&self, message: &str) {
        self.fails.lock().unwrap().push(message.to_string());
    }

    async fn trace(&self, message: &str) {
        self.traces.lock().unwrap().push(message.to_string());
    }
}
