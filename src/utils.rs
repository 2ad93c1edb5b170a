//! Convenience functions over a caller-owned [`FontChecker`].

use crate::{
    checker::{self, FontChecker},
    options::CheckerOptions,
    platform::FontPlatform,
    result::{FontCheckResult, FontLoadResult},
};

pub fn create_font_checker<P: FontPlatform>(platform: P, options: CheckerOptions) -> FontChecker<P> {
    FontChecker::new(platform, options)
}

/// Probes a single font and returns its own result.
pub async fn check_font<P: FontPlatform>(checker: &FontChecker<P>, name: &str) -> FontCheckResult {
    checker
        .check(name)
        .await
        .all_fonts
        .into_iter()
        .find(|font| font.name == name)
        // An empty name is a registry snapshot; it has no probe of its own.
        .unwrap_or_else(|| FontCheckResult::loaded(name))
}

pub async fn check_fonts<P: FontPlatform, S: AsRef<str>>(
    checker: &FontChecker<P>,
    names: &[S],
) -> FontLoadResult {
    let names: Vec<String> = names.iter().map(|n| n.as_ref().to_owned()).collect();
    checker.check(names).await
}

/// Registers `family` loaded from `source`.
///
/// A bare source is treated as a URL. Sources already written as
/// `url(...)` or `local(...)` are passed through.
pub fn add_font<P: FontPlatform>(checker: &FontChecker<P>, family: &str, source: &str) -> bool {
    let source = css_source(source);
    match checker.platform().create_handle(family, &source) {
        Ok(handle) => checker.add_font(handle),
        Err(err) => {
            log::warn!("Failed to create font '{}': {}", family, err);
            false
        }
    }
}

pub fn add_font_face<P: FontPlatform>(checker: &FontChecker<P>, handle: P::Handle) -> bool {
    checker.add_font(handle)
}

pub fn delete_font<P: FontPlatform>(checker: &FontChecker<P>, handle: &P::Handle) -> bool {
    checker.delete_font(handle)
}

pub fn delete_font_by_name<P: FontPlatform>(checker: &FontChecker<P>, family: &str) -> bool {
    checker.delete_font_by_name(family)
}

pub fn clear_fonts<P: FontPlatform>(checker: &FontChecker<P>) -> bool {
    checker.clear_fonts()
}

pub fn is_font_loaded<P: FontPlatform>(platform: &P, family: &str) -> bool {
    checker::is_font_loaded(platform, family)
}

/// Probes `names` with a fresh checker bounded by `timeout`.
pub async fn wait_for_fonts<P: FontPlatform, S: AsRef<str>>(
    platform: P,
    names: &[S],
    timeout: Option<u32>,
) -> FontLoadResult {
    let options = timeout.map(CheckerOptions::with_timeout).unwrap_or_default();
    check_fonts(&FontChecker::new(platform, options), names).await
}

pub(crate) fn css_source(source: &str) -> String {
    let trimmed = source.trim();
    if trimmed.starts_with("url(") || trimmed.starts_with("local(") {
        trimmed.to_owned()
    } else {
        format!("url({})", trimmed)
    }
}
