//! Scripted in-memory session used by the unit tests in this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use driver_port::{Element, ElementHandle, Session, SessionError};
use framewise_core_types::Locator;

use crate::model::FrameIdentity;

#[derive(Clone, Default)]
pub struct FakeDoc {
    pub frames: Vec<FakeFrame>,
}

#[derive(Clone)]
pub struct FakeFrame {
    pub identity: FrameIdentity,
    pub doc: FakeDoc,
}

pub fn doc(frames: Vec<FakeFrame>) -> FakeDoc {
    FakeDoc { frames }
}

pub fn frame(id: &str, name: &str, src: &str, doc: FakeDoc) -> FakeFrame {
    FakeFrame {
        identity: FrameIdentity::new(id, name, src),
        doc,
    }
}

pub struct FakeSession {
    doc: Mutex<FakeDoc>,
    context: Mutex<Vec<FrameIdentity>>,
}

impl FakeSession {
    pub fn new(doc: FakeDoc) -> Self {
        Self {
            doc: Mutex::new(doc),
            context: Mutex::new(Vec::new()),
        }
    }

    /// Replace the document, simulating a re-render between operations.
    pub fn set_doc(&self, doc: FakeDoc) {
        *self.doc.lock().unwrap() = doc;
    }

    pub fn current_context(&self) -> Vec<FrameIdentity> {
        self.context.lock().unwrap().clone()
    }

    fn active_frames(&self) -> Vec<FakeFrame> {
        let doc = self.doc.lock().unwrap();
        let context = self.context.lock().unwrap();
        let mut current = &*doc;
        for step in context.iter() {
            match current.frames.iter().find(|f| f.identity == *step) {
                Some(found) => current = &found.doc,
                None => return Vec::new(),
            }
        }
        current.frames.clone()
    }
}

struct FakeFrameHandle {
    identity: FrameIdentity,
}

#[async_trait]
impl Element for FakeFrameHandle {
    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        let value = match name {
            "src" => &self.identity.src,
            "id" => &self.identity.id,
            "name" => &self.identity.name,
            _ => return Ok(None),
        };
        Ok(Some(value.clone()))
    }

    async fn is_displayed(&self) -> Result<bool, SessionError> {
        Ok(true)
    }

    async fn text(&self) -> Result<String, SessionError> {
        Ok(String::new())
    }

    async fn click(&self) -> Result<(), SessionError> {
        Err(SessionError::UnsupportedControl("frame element".into()))
    }

    async fn send_keys(&self, _text: &str) -> Result<(), SessionError> {
        Err(SessionError::UnsupportedControl("frame element".into()))
    }

    async fn clear(&self) -> Result<(), SessionError> {
        Err(SessionError::UnsupportedControl("frame element".into()))
    }

    async fn select_by_visible_text(&self, _option: &str) -> Result<(), SessionError> {
        Err(SessionError::UnsupportedControl("frame element".into()))
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, SessionError> {
        if *locator == Locator::frames() {
            Ok(self
                .active_frames()
                .into_iter()
                .map(|f| Arc::new(FakeFrameHandle { identity: f.identity }) as ElementHandle)
                .collect())
        } else {
            Ok(Vec::new())
        }
    }

    async fn switch_to_default(&self) -> Result<(), SessionError> {
        self.context.lock().unwrap().clear();
        Ok(())
    }

    async fn switch_to_frame(&self, frame: &ElementHandle) -> Result<(), SessionError> {
        let identity = FrameIdentity {
            src: frame.attribute("src").await?.unwrap_or_default(),
            id: frame.attribute("id").await?.unwrap_or_default(),
            name: frame.attribute("name").await?.unwrap_or_default(),
        };
        if !self
            .active_frames()
            .iter()
            .any(|f| f.identity == identity)
        {
            return Err(SessionError::NoSuchFrame(identity.src));
        }
        self.context.lock().unwrap().push(identity);
        Ok(())
    }
}
