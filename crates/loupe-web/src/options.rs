//! JavaScript option objects
//!
//! Data options go through `JSON.stringify` (which drops functions) and
//! `serde_json`; hook functions are read separately by name.

use std::rc::Rc;

use js_sys::{Function, Reflect, JSON};
use loupe_core::{Callback, HookKind, Hooks, Options, OptionsPatch, TargetRef};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::log;

/// Split a JavaScript options object into data options and hooks.
/// `undefined` and `null` mean "no changes".
pub fn parse_options(value: &JsValue) -> Result<(OptionsPatch, Hooks<Element>), JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok((OptionsPatch::default(), Hooks::new()));
    }
    if !value.is_object() {
        return Err(JsValue::from_str("options must be an object"));
    }

    let json = JSON::stringify(value)?
        .as_string()
        .unwrap_or_else(|| "{}".to_string());
    let patch: OptionsPatch = serde_json::from_str(&json)
        .map_err(|err| JsValue::from_str(&format!("invalid options: {}", err)))?;

    let mut hooks = Hooks::new();
    for kind in HookKind::ALL {
        let hook = Reflect::get(value, &JsValue::from_str(kind.option_name()))?;
        if let Some(func) = hook.dyn_ref::<Function>() {
            let func = func.clone();
            let name = kind.option_name();
            hooks.set(
                kind,
                Rc::new(move |el: &Element| {
                    if let Err(err) = func.call1(&JsValue::NULL, el) {
                        log(&format!("[loupe] {} threw: {:?}", name, err));
                    }
                }),
            );
        }
    }
    Ok((patch, hooks))
}

/// Current data options as a plain JavaScript object
pub fn options_to_js(options: &Options) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(options)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    JSON::parse(&json)
}

/// Per-call callback argument
pub fn callback(cb: Option<Function>) -> Option<Callback<Element>> {
    cb.map(|func| -> Callback<Element> {
        Box::new(move |el: &Element| {
            if let Err(err) = func.call1(&JsValue::NULL, el) {
                log(&format!("[loupe] callback threw: {:?}", err));
            }
        })
    })
}

/// A CSS selector string or an element
pub fn target_ref(value: JsValue) -> Result<TargetRef<Element>, JsValue> {
    if let Some(selector) = value.as_string() {
        return Ok(TargetRef::Selector(selector));
    }
    value
        .dyn_into::<Element>()
        .map(TargetRef::Element)
        .map_err(|_| JsValue::from_str("expected a selector or an element"))
}
