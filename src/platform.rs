use futures::future::LocalBoxFuture;

use crate::error::PlatformResult;

/// A font handle the platform registry accepts.
pub trait FontHandle: Clone + PartialEq {
    fn family(&self) -> String;
}

/// The font-loading primitives a [`FontChecker`](crate::FontChecker) is built on.
///
/// Futures are `!Send`: everything runs on one cooperative thread.
pub trait FontPlatform {
    type Handle: FontHandle;

    /// Whether the platform can construct loadable font descriptors.
    fn supports_font_face(&self) -> bool;

    /// Starts loading the locally installed family `family`.
    ///
    /// An `Err` means constructing or starting the load threw. A failed load
    /// is reported through the returned future instead.
    fn load_local(&self, family: &str) -> PlatformResult<LocalBoxFuture<'static, PlatformResult<()>>>;

    /// Resolves after `millis` milliseconds. Dropping it stops the timer.
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()>;

    fn registry_available(&self) -> bool;

    /// Synchronous registry membership for a CSS font shorthand.
    fn check(&self, shorthand: &str) -> PlatformResult<bool>;

    /// Resolves once the registry considers pending loads settled.
    fn ready(&self) -> LocalBoxFuture<'static, PlatformResult<()>>;

    /// Family names of every font in the registry, as registered.
    fn families(&self) -> PlatformResult<Vec<String>>;

    fn add(&self, handle: &Self::Handle) -> PlatformResult<()>;

    /// Removes `handle`, returning whether the registry contained it.
    fn delete(&self, handle: &Self::Handle) -> PlatformResult<bool>;

    /// Builds a handle for `family` loaded from a CSS `src` value.
    fn create_handle(&self, family: &str, source: &str) -> PlatformResult<Self::Handle>;
}
