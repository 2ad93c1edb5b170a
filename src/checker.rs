use std::{cell::RefCell, collections::HashSet};

use futures::future::{join_all, select, Either};

use crate::{
    options::CheckerOptions,
    platform::{FontHandle, FontPlatform},
    result::{normalize_family, probe_shorthand, FontCheckResult, FontLoadResult, FontQuery, FontStatus},
};

/// Answers whether fonts are usable and tracks the fonts it registered.
///
/// Mutating operations take `&self` so a checker can be shared with pending
/// checks. They are not synchronized against each other; callers issuing
/// concurrent `add_font`/`delete_font` on one checker must order them.
pub struct FontChecker<P: FontPlatform> {
    platform: P,
    options: CheckerOptions,
    /// Handles this checker added to the registry and must remove.
    registered: RefCell<Vec<P::Handle>>,
}

impl<P: FontPlatform> FontChecker<P> {
    pub fn new(platform: P, options: CheckerOptions) -> Self {
        Self {
            platform,
            options,
            registered: RefCell::default(),
        }
    }

    pub fn options(&self) -> CheckerOptions {
        self.options
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Checks the queried fonts.
    ///
    /// With no names, reports every family in the registry once it has
    /// settled. Otherwise probes each name concurrently; results come back
    /// in input order.
    pub async fn check(&self, query: impl Into<FontQuery>) -> FontLoadResult {
        let results = match query.into() {
            FontQuery::All => self.check_all().await,
            FontQuery::One(name) => vec![self.check_single(&name).await],
            FontQuery::Many(names) => join_all(names.iter().map(|name| self.check_single(name))).await,
        };
        FontLoadResult::from_results(results)
    }

    async fn check_single(&self, name: &str) -> FontCheckResult {
        if !self.platform.supports_font_face() {
            let loaded = self.is_font_loaded(name);
            let status = if loaded {
                FontStatus::Loaded
            } else {
                FontStatus::Unloaded
            };
            return FontCheckResult::new(name, loaded, status);
        }

        let load = match self.platform.load_local(&normalize_family(name)) {
            Ok(load) => load,
            Err(err) => {
                log::debug!("Probing '{}' failed ({}), using registry check", name, err);
                return FontCheckResult::new(name, self.is_font_loaded(name), FontStatus::Fallback);
            }
        };

        // First to settle wins; the other future is dropped.
        match select(load, self.platform.sleep(self.options.timeout)).await {
            Either::Left((Ok(()), _)) => FontCheckResult::loaded(name),
            Either::Left((Err(err), _)) => {
                log::debug!("Font '{}' did not load: {}", name, err);
                FontCheckResult::new(name, false, FontStatus::Error)
            }
            Either::Right(((), _)) => {
                log::debug!("Font '{}' timed out after {}ms", name, self.options.timeout);
                FontCheckResult::new(name, false, FontStatus::Error)
            }
        }
    }

    async fn check_all(&self) -> Vec<FontCheckResult> {
        if !self.platform.registry_available() {
            log::warn!("Font registry unavailable, nothing to report");
            return Vec::new();
        }
        if let Err(err) = self.platform.ready().await {
            log::warn!("Waiting for fonts failed: {}", err);
            return Vec::new();
        }
        let families = match self.platform.families() {
            Ok(families) => families,
            Err(err) => {
                log::warn!("Listing fonts failed: {}", err);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        families
            .iter()
            .map(|family| normalize_family(family))
            .filter(|family| seen.insert(family.clone()))
            .map(FontCheckResult::loaded)
            .collect()
    }

    /// Synchronous registry check. `false` without a registry.
    pub fn is_font_loaded(&self, family: &str) -> bool {
        is_font_loaded(&self.platform, family)
    }

    /// Adds `handle` to the registry and starts tracking it.
    pub fn add_font(&self, handle: P::Handle) -> bool {
        if !self.platform.registry_available() {
            log::warn!("Cannot add font '{}': font registry unavailable", handle.family());
            return false;
        }
        match self.platform.add(&handle) {
            Ok(()) => {
                let mut registered = self.registered.borrow_mut();
                if !registered.contains(&handle) {
                    registered.push(handle);
                }
                true
            }
            Err(err) => {
                log::warn!("Failed to add font '{}': {}", handle.family(), err);
                false
            }
        }
    }

    /// Removes `handle` from the registry and stops tracking it.
    pub fn delete_font(&self, handle: &P::Handle) -> bool {
        if !self.platform.registry_available() {
            log::warn!("Cannot delete font '{}': font registry unavailable", handle.family());
            return false;
        }
        match self.platform.delete(handle) {
            Ok(_) => {
                self.registered.borrow_mut().retain(|h| h != handle);
                true
            }
            Err(err) => {
                log::warn!("Failed to delete font '{}': {}", handle.family(), err);
                false
            }
        }
    }

    /// Deletes every tracked handle of the given family.
    ///
    /// Returns `false` if none is tracked or any removal failed.
    pub fn delete_font_by_name(&self, family: &str) -> bool {
        let family = normalize_family(family);
        let matching: Vec<_> = self
            .registered
            .borrow()
            .iter()
            .filter(|handle| normalize_family(&handle.family()) == family)
            .cloned()
            .collect();

        if matching.is_empty() {
            log::debug!("No registered font named '{}'", family);
            return false;
        }
        matching
            .iter()
            .fold(true, |ok, handle| self.delete_font(handle) && ok)
    }

    /// Removes every tracked handle from the registry.
    ///
    /// Keeps going after a failed removal. Handles that could not be removed
    /// stay tracked and the result is `false`.
    pub fn clear_fonts(&self) -> bool {
        if !self.platform.registry_available() {
            log::warn!("Cannot clear fonts: font registry unavailable");
            return false;
        }

        let handles = self.registered.borrow().clone();
        let mut ok = true;
        for handle in handles {
            match self.platform.delete(&handle) {
                Ok(_) => self.registered.borrow_mut().retain(|h| *h != handle),
                Err(err) => {
                    log::warn!("Failed to delete font '{}': {}", handle.family(), err);
                    ok = false;
                }
            }
        }
        ok
    }

    pub fn registered(&self) -> Vec<P::Handle> {
        self.registered.borrow().clone()
    }

    pub fn registered_len(&self) -> usize {
        self.registered.borrow().len()
    }
}

/// Synchronous `12px '<family>'` registry check.
pub fn is_font_loaded<P: FontPlatform>(platform: &P, family: &str) -> bool {
    if !platform.registry_available() {
        return false;
    }
    platform.check(&probe_shorthand(family)).unwrap_or_else(|err| {
        log::debug!("Registry check for '{}' failed: {}", family, err);
        false
    })
}
