use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    checker::FontChecker,
    platform::FontPlatform,
    result::{FontLoadResult, FontQuery},
};

/// Keeps the latest check result for a UI binding.
///
/// Each [`refresh`](FontWatch::refresh) supersedes the ones before it: a
/// result is only stored if no newer refresh or [`detach`](FontWatch::detach)
/// happened while it was pending.
pub struct FontWatch<P: FontPlatform> {
    checker: Rc<FontChecker<P>>,
    generation: Cell<u64>,
    loading: Cell<bool>,
    results: RefCell<Option<FontLoadResult>>,
}

impl<P: FontPlatform> FontWatch<P> {
    pub fn new(checker: Rc<FontChecker<P>>) -> Self {
        Self {
            checker,
            generation: Cell::new(0),
            loading: Cell::new(false),
            results: RefCell::default(),
        }
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn results(&self) -> Option<FontLoadResult> {
        self.results.borrow().clone()
    }

    /// Re-runs the check. Returns whether the outcome was applied.
    pub async fn refresh(&self, query: impl Into<FontQuery>) -> bool {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.loading.set(true);

        let result = self.checker.check(query).await;
        if self.generation.get() != generation {
            log::debug!("Dropping stale font check result");
            return false;
        }
        *self.results.borrow_mut() = Some(result);
        self.loading.set(false);
        true
    }

    /// Stops pending refreshes from publishing their results.
    pub fn detach(&self) {
        self.generation.set(self.generation.get() + 1);
        self.loading.set(false);
    }
}
