use std::{
    future::{self, Future},
    pin::Pin,
    task::{Context, Poll},
};

use futures::{channel::oneshot, future::LocalBoxFuture, FutureExt};
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::FontFace;

use crate::{
    error::{PlatformError, PlatformResult},
    platform::{FontHandle, FontPlatform},
};

/// `FontFace` and `document.fonts` of the current page.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserPlatform;

impl BrowserPlatform {
    /// `document.fonts`, if the page has one.
    fn registry(&self) -> Option<JsValue> {
        let document = web_sys::window()?.document()?;
        let fonts = Reflect::get(&document, &JsValue::from_str("fonts")).ok()?;
        if fonts.is_undefined() || fonts.is_null() {
            None
        } else {
            Some(fonts)
        }
    }

    fn require_registry(&self) -> PlatformResult<JsValue> {
        self.registry()
            .ok_or(PlatformError::Unavailable("document.fonts"))
    }
}

impl FontHandle for FontFace {
    fn family(&self) -> String {
        FontFace::family(self)
    }
}

impl FontPlatform for BrowserPlatform {
    type Handle = FontFace;

    fn supports_font_face(&self) -> bool {
        Reflect::get(&js_sys::global(), &JsValue::from_str("FontFace"))
            .map(|constructor| constructor.is_function())
            .unwrap_or(false)
    }

    fn load_local(&self, family: &str) -> PlatformResult<LocalBoxFuture<'static, PlatformResult<()>>> {
        let face = FontFace::new_with_str(family, &format!("local('{}')", family)).map_err(exception)?;
        let promise = face.load().map_err(exception)?;
        Ok(settle(promise).boxed_local())
    }

    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        match Timeout::start(millis) {
            Ok(timeout) => timeout.boxed_local(),
            Err(err) => {
                log::warn!("Cannot start timer: {}", err);
                future::ready(()).boxed_local()
            }
        }
    }

    fn registry_available(&self) -> bool {
        self.registry().is_some()
    }

    fn check(&self, shorthand: &str) -> PlatformResult<bool> {
        let registry = self.require_registry()?;
        let found = call_method(&registry, "check", &[JsValue::from_str(shorthand)])?;
        Ok(found.is_truthy())
    }

    fn ready(&self) -> LocalBoxFuture<'static, PlatformResult<()>> {
        let promise = self.require_registry().and_then(|registry| {
            Reflect::get(&registry, &JsValue::from_str("ready"))
                .map_err(exception)?
                .dyn_into::<Promise>()
                .map_err(|_| PlatformError::Unavailable("document.fonts.ready"))
        });
        match promise {
            Ok(promise) => settle(promise).boxed_local(),
            Err(err) => future::ready(Err(err)).boxed_local(),
        }
    }

    fn families(&self) -> PlatformResult<Vec<String>> {
        let registry = self.require_registry()?;
        let iter = js_sys::try_iter(&registry)
            .map_err(exception)?
            .ok_or(PlatformError::Unavailable("document.fonts iteration"))?;

        let mut families = Vec::new();
        for face in iter {
            let face = face.map_err(exception)?;
            if let Some(family) = Reflect::get(&face, &JsValue::from_str("family"))
                .map_err(exception)?
                .as_string()
            {
                families.push(family);
            }
        }
        Ok(families)
    }

    fn add(&self, handle: &FontFace) -> PlatformResult<()> {
        let registry = self.require_registry()?;
        let face: &JsValue = handle.as_ref();
        call_method(&registry, "add", &[face.clone()]).map(|_| ())
    }

    fn delete(&self, handle: &FontFace) -> PlatformResult<bool> {
        let registry = self.require_registry()?;
        let face: &JsValue = handle.as_ref();
        call_method(&registry, "delete", &[face.clone()]).map(|removed| removed.is_truthy())
    }

    fn create_handle(&self, family: &str, source: &str) -> PlatformResult<FontFace> {
        FontFace::new_with_str(family, source).map_err(exception)
    }
}

/// Calls `target[name](...args)`, turning a throw into an error.
fn call_method(target: &JsValue, name: &'static str, args: &[JsValue]) -> PlatformResult<JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .map_err(exception)?
        .dyn_into::<Function>()
        .map_err(|_| PlatformError::Unavailable(name))?;
    let args: Array = args.iter().collect();
    Reflect::apply(&method, target, &args).map_err(exception)
}

async fn settle(promise: Promise) -> PlatformResult<()> {
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| PlatformError::Rejected(describe(&err)))
}

fn exception(err: JsValue) -> PlatformError {
    PlatformError::Exception(describe(&err))
}

fn describe(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    match err.dyn_ref::<js_sys::Error>() {
        Some(error) => error.message().into(),
        None => format!("{:?}", err),
    }
}

/// A `setTimeout` timer, cleared when dropped.
struct Timeout {
    id: JsValue,
    fired: oneshot::Receiver<()>,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    fn start(millis: u32) -> PlatformResult<Self> {
        let (sender, fired) = oneshot::channel();
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            let _ = sender.send(());
        });

        let id = global_function("setTimeout")?
            .call2(&js_sys::global(), callback.as_ref(), &JsValue::from(millis))
            .map_err(exception)?;

        Ok(Self {
            id,
            fired,
            _callback: callback,
        })
    }
}

impl Future for Timeout {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.fired.poll_unpin(cx).map(|_| ())
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Ok(clear) = global_function("clearTimeout") {
            let _ = clear.call1(&js_sys::global(), &self.id);
        }
    }
}

fn global_function(name: &'static str) -> PlatformResult<Function> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map_err(exception)?
        .dyn_into::<Function>()
        .map_err(|_| PlatformError::Unavailable(name))
}
