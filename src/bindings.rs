use std::rc::Rc;

use js_sys::{Array, Promise};
use log::LevelFilter;
use serde::Serialize;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::future_to_promise;
use web_sys::FontFace;

use crate::{
    browser::BrowserPlatform, checker::FontChecker, console, options::CheckerOptions,
    result::FontQuery, utils,
};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init(LevelFilter::Warn);
}

#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = level
        .parse::<LevelFilter>()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    console::init(level);
    Ok(())
}

#[wasm_bindgen(js_name = FontChecker)]
pub struct WebFontChecker {
    inner: Rc<FontChecker<BrowserPlatform>>,
}

#[wasm_bindgen(js_class = FontChecker)]
impl WebFontChecker {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WebFontChecker, JsValue> {
        Ok(Self {
            inner: Rc::new(FontChecker::new(BrowserPlatform, parse_options(options)?)),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn timeout(&self) -> u32 {
        self.inner.options().timeout
    }

    /// Resolves to `{ success, failedFonts?, allFonts }`.
    pub fn check(&self, names: JsValue) -> Result<Promise, JsValue> {
        let query = parse_query(&names)?;
        let inner = self.inner.clone();
        Ok(future_to_promise(async move {
            to_js(&inner.check(query).await)
        }))
    }

    #[wasm_bindgen(js_name = addFont)]
    pub fn add_font(&self, font: &FontFace) -> bool {
        self.inner.add_font(font.clone())
    }

    /// Accepts a `FontFace` or a family name.
    #[wasm_bindgen(js_name = deleteFont)]
    pub fn delete_font(&self, font: &JsValue) -> bool {
        delete(&self.inner, font)
    }

    #[wasm_bindgen(js_name = clearFonts)]
    pub fn clear_fonts(&self) -> bool {
        self.inner.clear_fonts()
    }

    #[wasm_bindgen(js_name = isFontLoaded)]
    pub fn is_font_loaded(&self, name: &str) -> bool {
        self.inner.is_font_loaded(name)
    }
}

#[wasm_bindgen(js_name = createFontChecker)]
pub fn create_font_checker(options: JsValue) -> Result<WebFontChecker, JsValue> {
    WebFontChecker::new(options)
}

#[wasm_bindgen(js_name = checkFont)]
pub fn check_font(checker: &WebFontChecker, name: String) -> Promise {
    let inner = checker.inner.clone();
    future_to_promise(async move { to_js(&utils::check_font(&inner, &name).await) })
}

#[wasm_bindgen(js_name = checkFonts)]
pub fn check_fonts(checker: &WebFontChecker, names: &Array) -> Result<Promise, JsValue> {
    let names = string_array(names)?;
    let inner = checker.inner.clone();
    Ok(future_to_promise(async move {
        to_js(&utils::check_fonts(&inner, &names).await)
    }))
}

#[wasm_bindgen(js_name = addFont)]
pub fn add_font(checker: &WebFontChecker, family: &str, source: &str) -> bool {
    utils::add_font(&checker.inner, family, source)
}

#[wasm_bindgen(js_name = addFontFace)]
pub fn add_font_face(checker: &WebFontChecker, font: &FontFace) -> bool {
    utils::add_font_face(&checker.inner, font.clone())
}

#[wasm_bindgen(js_name = deleteFont)]
pub fn delete_font(checker: &WebFontChecker, font: &JsValue) -> bool {
    delete(&checker.inner, font)
}

#[wasm_bindgen(js_name = clearFonts)]
pub fn clear_fonts(checker: &WebFontChecker) -> bool {
    utils::clear_fonts(&checker.inner)
}

#[wasm_bindgen(js_name = isFontLoaded)]
pub fn is_font_loaded(name: &str) -> bool {
    utils::is_font_loaded(&BrowserPlatform, name)
}

#[wasm_bindgen(js_name = waitForFonts)]
pub fn wait_for_fonts(names: &Array, timeout: Option<u32>) -> Result<Promise, JsValue> {
    let names = string_array(names)?;
    Ok(future_to_promise(async move {
        to_js(&utils::wait_for_fonts(BrowserPlatform, &names, timeout).await)
    }))
}

fn delete(checker: &FontChecker<BrowserPlatform>, font: &JsValue) -> bool {
    if let Some(name) = font.as_string() {
        return utils::delete_font_by_name(checker, &name);
    }
    match font.dyn_ref::<FontFace>() {
        Some(face) => utils::delete_font(checker, face),
        None => {
            log::warn!("deleteFont expects a FontFace or a family name");
            false
        }
    }
}

fn parse_options(options: JsValue) -> Result<CheckerOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CheckerOptions::default());
    }
    Ok(serde_wasm_bindgen::from_value(options)?)
}

fn parse_query(names: &JsValue) -> Result<FontQuery, JsValue> {
    if names.is_undefined() || names.is_null() {
        return Ok(FontQuery::All);
    }
    if let Some(name) = names.as_string() {
        return Ok(FontQuery::from(name));
    }
    match names.dyn_ref::<Array>() {
        Some(names) => Ok(FontQuery::Many(string_array(names)?)),
        None => Err(JsValue::from_str(
            "expected a font name or an array of font names",
        )),
    }
}

fn string_array(names: &Array) -> Result<Vec<String>, JsValue> {
    names
        .iter()
        .map(|name| {
            name.as_string()
                .ok_or_else(|| JsValue::from_str("font names must be strings"))
        })
        .collect()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
