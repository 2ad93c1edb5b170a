//! Tells whether fonts are loaded and usable for rendering.
//!
//! [`FontChecker`] probes fonts through a [`FontPlatform`]. On `wasm32` the
//! platform is the page's `FontFace` constructor and `document.fonts`, and the
//! checker is exported to JavaScript.

mod checker;
mod error;
mod options;
mod platform;
mod result;
pub mod utils;
mod watch;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod console;

pub use crate::checker::{is_font_loaded, FontChecker};
pub use crate::error::{PlatformError, PlatformResult};
pub use crate::options::{CheckerOptions, DEFAULT_TIMEOUT};
pub use crate::platform::{FontHandle, FontPlatform};
pub use crate::result::{normalize_family, probe_shorthand, FontCheckResult, FontLoadResult, FontQuery, FontStatus};
pub use crate::watch::FontWatch;

#[cfg(target_arch = "wasm32")]
pub use crate::bindings::WebFontChecker;
#[cfg(target_arch = "wasm32")]
pub use crate::browser::BrowserPlatform;
