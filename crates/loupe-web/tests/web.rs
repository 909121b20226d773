//! Browser tests, run with `wasm-pack test --headless --firefox`

use loupe_core::{HookKind, TargetRef};
use loupe_web::options::{parse_options, target_ref};
use loupe_web::Zooming;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn add_image(id: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let img = document.create_element("img").unwrap();
    img.set_id(id);
    img.set_attribute("src", "data:image/gif;base64,R0lGODlhAQABAAAAACw=")
        .unwrap();
    document.body().unwrap().append_child(&img).unwrap();
    img
}

fn js_object(source: &str) -> JsValue {
    js_sys::eval(&format!("({})", source)).unwrap()
}

#[wasm_bindgen_test]
fn test_parse_options_reads_values_and_hooks() {
    let value = js_object("{ bgColor: 'black', scaleBase: 1, onOpen: function () {} }");
    let (patch, hooks) = parse_options(&value).unwrap();

    assert_eq!(patch.bg_color.as_deref(), Some("black"));
    assert_eq!(patch.scale_base, Some(1.0));
    assert!(hooks.get(HookKind::Open).is_some());
    assert!(hooks.get(HookKind::Close).is_none());
}

#[wasm_bindgen_test]
fn test_parse_options_rejects_bad_percentage() {
    let value = js_object("{ customSize: 'big' }");
    assert!(parse_options(&value).is_err());
}

#[wasm_bindgen_test]
fn test_target_ref_accepts_selector_and_element() {
    let img = add_image("target-ref");
    assert_eq!(
        target_ref(JsValue::from_str("#target-ref")).unwrap(),
        TargetRef::Selector("#target-ref".to_string())
    );
    assert_eq!(
        target_ref(img.clone().into()).unwrap(),
        TargetRef::Element(img)
    );
    assert!(target_ref(JsValue::from_f64(1.0)).is_err());
}

#[wasm_bindgen_test]
fn test_open_and_close_through_js_api() {
    let img = add_image("zoom-me");
    let zooming = Zooming::new(JsValue::UNDEFINED).unwrap();
    zooming.listen(JsValue::from_str("#zoom-me")).unwrap();
    assert_eq!(zooming.state(), "closed");

    zooming.open(img.clone().into(), None).unwrap();
    assert_eq!(zooming.state(), "opening");
    let html = img.dyn_ref::<web_sys::HtmlElement>().unwrap();
    assert_eq!(html.style().get_property_value("position").unwrap(), "relative");

    // Locked while the transition runs
    zooming.close(None);
    assert_eq!(zooming.state(), "opening");
}

#[wasm_bindgen_test]
fn test_config_without_argument_returns_options() {
    let zooming = Zooming::new(js_object("{ zIndex: 5 }")).unwrap();
    let options = zooming.config(JsValue::UNDEFINED).unwrap();
    let z_index = js_sys::Reflect::get(&options, &JsValue::from_str("zIndex")).unwrap();
    assert_eq!(z_index.as_f64(), Some(5.0));
}

#[wasm_bindgen_test]
fn test_config_rejects_negative_duration() {
    let zooming = Zooming::new(JsValue::UNDEFINED).unwrap();
    assert!(zooming
        .config(js_object("{ transitionDuration: -1 }"))
        .is_err());
}

#[wasm_bindgen_test]
fn test_state_readable_from_hook() {
    let img = add_image("hook-state");
    let zooming = Zooming::new(js_object(
        "{ onBeforeOpen: function () { globalThis.__loupeSeen = globalThis.__loupe.state; } }",
    ))
    .unwrap();
    let global = js_sys::global();
    js_sys::Reflect::set(&global, &"__loupe".into(), &zooming.clone().into()).unwrap();

    zooming.open(img.into(), None).unwrap();

    let seen = js_sys::Reflect::get(&global, &"__loupeSeen".into()).unwrap();
    assert_eq!(seen.as_string().as_deref(), Some("closed"));
    assert_eq!(zooming.state(), "opening");
}
