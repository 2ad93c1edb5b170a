#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, rc::Rc, thread, time::Duration};

use font_checker::{FontHandle, FontPlatform, PlatformError, PlatformResult};
use futures::{channel::oneshot, future, future::LocalBoxFuture, FutureExt};

/// How a mocked local font load behaves.
#[derive(Debug, Clone, Copy)]
pub enum Load {
    Succeed,
    Fail,
    Pending,
    After(u64),
    Throw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockFace {
    id: u32,
    pub family: String,
    pub source: String,
}

impl MockFace {
    pub fn new(id: u32, family: &str) -> Self {
        Self {
            id,
            family: family.to_owned(),
            source: format!("url(/fonts/{}.woff2)", family),
        }
    }
}

impl FontHandle for MockFace {
    fn family(&self) -> String {
        self.family.clone()
    }
}

struct State {
    font_face: bool,
    registry: bool,
    ready_fails: bool,
    installed: Vec<String>,
    loads: HashMap<String, Load>,
    faces: Vec<MockFace>,
    next_id: u32,
    fail_add: bool,
    fail_delete: Option<String>,
    checks: Vec<String>,
    delete_calls: usize,
}

/// In-memory font platform. Clones share state.
#[derive(Clone)]
pub struct MockPlatform {
    state: Rc<RefCell<State>>,
}

pub const SYSTEM_FONTS: [&str; 3] = ["Arial", "Helvetica", "Times New Roman"];

impl MockPlatform {
    /// Arial, Helvetica and Times New Roman are installed and load instantly.
    pub fn new() -> Self {
        let loads = SYSTEM_FONTS
            .iter()
            .map(|name| (name.to_string(), Load::Succeed))
            .collect();
        Self {
            state: Rc::new(RefCell::new(State {
                font_face: true,
                registry: true,
                ready_fails: false,
                installed: SYSTEM_FONTS.iter().map(|n| n.to_string()).collect(),
                loads,
                faces: Vec::new(),
                next_id: 0,
                fail_add: false,
                fail_delete: None,
                checks: Vec::new(),
                delete_calls: 0,
            })),
        }
    }

    pub fn without_font_face(self) -> Self {
        self.state.borrow_mut().font_face = false;
        self
    }

    pub fn without_registry(self) -> Self {
        self.state.borrow_mut().registry = false;
        self
    }

    pub fn with_installed(self, family: &str) -> Self {
        self.state.borrow_mut().installed.push(family.to_owned());
        self
    }

    pub fn with_load(self, family: &str, load: Load) -> Self {
        self.state.borrow_mut().loads.insert(family.to_owned(), load);
        self
    }

    pub fn failing_ready(self) -> Self {
        self.state.borrow_mut().ready_fails = true;
        self
    }

    pub fn failing_add(self) -> Self {
        self.state.borrow_mut().fail_add = true;
        self
    }

    /// Deleting a face of `family` throws. `"*"` fails every delete.
    pub fn failing_delete(self, family: &str) -> Self {
        self.state.borrow_mut().fail_delete = Some(family.to_owned());
        self
    }

    pub fn face(&self, family: &str) -> MockFace {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        MockFace::new(state.next_id, family)
    }

    pub fn faces(&self) -> Vec<MockFace> {
        self.state.borrow().faces.clone()
    }

    pub fn checks(&self) -> Vec<String> {
        self.state.borrow().checks.clone()
    }

    pub fn delete_calls(&self) -> usize {
        self.state.borrow().delete_calls
    }
}

fn delay(millis: u64) -> LocalBoxFuture<'static, ()> {
    let (sender, fired) = oneshot::channel();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(millis));
        let _ = sender.send(());
    });
    async move {
        let _ = fired.await;
    }
    .boxed_local()
}

impl FontPlatform for MockPlatform {
    type Handle = MockFace;

    fn supports_font_face(&self) -> bool {
        self.state.borrow().font_face
    }

    fn load_local(&self, family: &str) -> PlatformResult<LocalBoxFuture<'static, PlatformResult<()>>> {
        let load = self
            .state
            .borrow()
            .loads
            .get(family)
            .copied()
            .unwrap_or(Load::Fail);
        let rejected = PlatformError::Rejected(format!("Failed to load font: {}", family));
        match load {
            Load::Succeed => Ok(future::ready(Ok(())).boxed_local()),
            Load::Fail => Ok(future::ready(Err(rejected)).boxed_local()),
            Load::Pending => Ok(future::pending().boxed_local()),
            Load::After(millis) => Ok(delay(millis).map(Ok).boxed_local()),
            Load::Throw => Err(PlatformError::Exception("FontFace constructor threw".into())),
        }
    }

    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        delay(millis as u64)
    }

    fn registry_available(&self) -> bool {
        self.state.borrow().registry
    }

    fn check(&self, shorthand: &str) -> PlatformResult<bool> {
        let mut state = self.state.borrow_mut();
        state.checks.push(shorthand.to_owned());
        Ok(state.installed.iter().any(|name| shorthand.contains(name.as_str())))
    }

    fn ready(&self) -> LocalBoxFuture<'static, PlatformResult<()>> {
        let result = if self.state.borrow().ready_fails {
            Err(PlatformError::Rejected("fonts never settled".into()))
        } else {
            Ok(())
        };
        future::ready(result).boxed_local()
    }

    fn families(&self) -> PlatformResult<Vec<String>> {
        let state = self.state.borrow();
        Ok(state
            .installed
            .iter()
            .cloned()
            .chain(state.faces.iter().map(|face| face.family.clone()))
            .collect())
    }

    fn add(&self, handle: &MockFace) -> PlatformResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_add {
            return Err(PlatformError::Exception("Add font failed".into()));
        }
        if !state.faces.contains(handle) {
            state.faces.push(handle.clone());
        }
        Ok(())
    }

    fn delete(&self, handle: &MockFace) -> PlatformResult<bool> {
        let mut state = self.state.borrow_mut();
        state.delete_calls += 1;
        if let Some(family) = &state.fail_delete {
            if family == "*" || *family == handle.family {
                return Err(PlatformError::Exception("Delete font failed".into()));
            }
        }
        let before = state.faces.len();
        state.faces.retain(|face| face != handle);
        Ok(state.faces.len() != before)
    }

    fn create_handle(&self, family: &str, source: &str) -> PlatformResult<MockFace> {
        let mut face = self.face(family);
        face.source = source.to_owned();
        Ok(face)
    }
}
