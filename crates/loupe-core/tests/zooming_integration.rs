//! Zooming Integration Tests
//!
//! Drives a full `Zooming` instance against the in-memory host.

use std::cell::RefCell;
use std::rc::Rc;

use loupe_core::{
    DomHost, EventKind, HookKind, Hooks, InputResult, ListenTarget, MemoryDom, Modifiers, NodeId,
    Options, OptionsPatch, Rect, Size, StyleProp, TargetRef, TimerId, Vec2, ZoomError, ZoomEvent,
    ZoomState, Zooming,
};

type Log = Rc<RefCell<Vec<&'static str>>>;

/// 200x100 image at (100, 100) wrapped in a link to its original, in a
/// 1000x800 viewport
fn page() -> (MemoryDom, NodeId) {
    let mut dom = MemoryDom::with_viewport(Size::new(1000.0, 800.0));
    let body = dom.body();
    let link = dom.create_element("a");
    dom.set_attribute(&link, "href", "full.jpg");
    dom.append_child(&body, &link);

    let img = dom.create_element("img");
    dom.set_attribute(&img, "src", "thumb.jpg");
    dom.append_child(&link, &img);
    dom.set_rect(&img, Rect::new(100.0, 100.0, 200.0, 100.0));
    dom.set_natural_size(&img, Size::new(200.0, 100.0));
    (dom, img)
}

fn logging_hooks(log: &Log) -> Hooks<NodeId> {
    let names = [
        (HookKind::BeforeOpen, "before_open"),
        (HookKind::Open, "open"),
        (HookKind::BeforeClose, "before_close"),
        (HookKind::Close, "close"),
        (HookKind::BeforeGrab, "before_grab"),
        (HookKind::Grab, "grab"),
        (HookKind::BeforeRelease, "before_release"),
        (HookKind::Release, "release"),
        (HookKind::Move, "move"),
        (HookKind::ImageLoading, "image_loading"),
        (HookKind::ImageLoaded, "image_loaded"),
    ];
    let mut hooks = Hooks::new();
    for (kind, name) in names {
        let log = Rc::clone(log);
        hooks = hooks.on(kind, move |_| log.borrow_mut().push(name));
    }
    hooks
}

fn setup_with(options: Options) -> (Zooming<MemoryDom>, NodeId, Log) {
    let (dom, img) = page();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut zooming = Zooming::new(dom, options, logging_hooks(&log)).unwrap();
    zooming.listen("img");
    (zooming, img, log)
}

fn setup() -> (Zooming<MemoryDom>, NodeId, Log) {
    setup_with(Options::default())
}

/// Open and let the zoom-in transition end
fn opened() -> (Zooming<MemoryDom>, NodeId, Log) {
    let (mut zooming, img, log) = setup();
    zooming.click(img);
    zooming.finish_transition();
    log.borrow_mut().clear();
    (zooming, img, log)
}

fn count(log: &Log, name: &str) -> usize {
    log.borrow().iter().filter(|n| **n == name).count()
}

fn mouse_down(x: f64, y: f64) -> ZoomEvent<NodeId> {
    ZoomEvent::MouseDown {
        button: 0,
        position: Vec2::new(x, y),
        modifiers: Modifiers::default(),
    }
}

fn mouse_up() -> ZoomEvent<NodeId> {
    ZoomEvent::MouseUp {
        button: 0,
        modifiers: Modifiers::default(),
    }
}

fn escape() -> ZoomEvent<NodeId> {
    ZoomEvent::KeyDown {
        key: "Escape".to_string(),
        key_code: 27,
    }
}

#[test]
fn test_open_then_close_lifecycle() {
    let (mut zooming, img, log) = setup();

    assert_eq!(zooming.click(img), InputResult::PreventDefault);
    assert_eq!(zooming.state(), ZoomState::Opening);
    assert!(zooming.is_locked());
    let overlay = *zooming.overlay_element();
    assert_eq!(zooming.host().parent(&overlay), Some(zooming.host().body()));
    assert!(zooming
        .host()
        .is_listening(&ListenTarget::Document, EventKind::Scroll));

    zooming.finish_transition();
    assert_eq!(zooming.state(), ZoomState::Open);
    assert!(zooming
        .host()
        .is_listening(&ListenTarget::Document, EventKind::MouseDown));

    zooming.click(img);
    assert_eq!(zooming.state(), ZoomState::Closing);
    zooming.finish_transition();
    assert_eq!(zooming.state(), ZoomState::Closed);
    assert_eq!(zooming.target_element(), None);
    assert_eq!(zooming.host().parent(&overlay), None);

    assert_eq!(
        *log.borrow(),
        vec!["before_open", "image_loading", "open", "before_close", "close"]
    );
}

#[test]
fn test_second_open_is_rejected() {
    let (mut zooming, img, log) = setup();

    assert!(zooming.open(TargetRef::Element(img), None).is_ok());
    let err = zooming.open(TargetRef::Element(img), None).err();
    assert_eq!(
        err,
        Some(ZoomError::InvalidOperation {
            op: "open",
            reason: "an image is already zoomed",
        })
    );
    assert_eq!(count(&log, "before_open"), 1);
    assert_eq!(zooming.pending_transitions(), vec!["open"]);
}

#[test]
fn test_open_rejects_bad_targets() {
    let (mut dom, _) = page();
    let body = dom.body();
    let div = dom.create_element("div");
    dom.set_attribute(&div, "id", "box");
    dom.append_child(&body, &div);
    let mut zooming = Zooming::with_defaults(dom);

    assert_eq!(
        zooming.open("#box", None).err(),
        Some(ZoomError::NotAnImage)
    );
    assert_eq!(
        zooming.open("#missing", None).err(),
        Some(ZoomError::TargetNotFound("#missing".to_string()))
    );
    assert_eq!(zooming.state(), ZoomState::Closed);
}

#[test]
fn test_listen_skips_non_images() {
    let (mut dom, img) = page();
    let body = dom.body();
    let div = dom.create_element("div");
    dom.append_child(&body, &div);
    let mut zooming = Zooming::with_defaults(dom);

    zooming.listen("div").listen("img").listen(TargetRef::Element(img));
    assert_eq!(zooming.listening(), &[img]);
    assert_eq!(zooming.host().style(&img, StyleProp::Cursor), "zoom-in");
    assert_eq!(zooming.host().style(&div, StyleProp::Cursor), "");
    assert_eq!(zooming.click(div), InputResult::Ignored);
}

#[test]
fn test_close_restores_inline_style() {
    let (mut dom, img) = page();
    dom.set_style(&img, StyleProp::Width, "50%");
    dom.set_style(&img, StyleProp::Position, "static");
    let mut zooming = Zooming::with_defaults(dom);
    zooming.listen("img");

    let props = [
        StyleProp::Position,
        StyleProp::ZIndex,
        StyleProp::Cursor,
        StyleProp::Transition,
        StyleProp::Transform,
        StyleProp::Width,
        StyleProp::Height,
    ];
    let before: Vec<String> = props.iter().map(|p| zooming.host().style(&img, *p)).collect();

    zooming.click(img);
    zooming.finish_transition();
    assert_eq!(zooming.host().style(&img, StyleProp::Width), "200px");

    zooming.close(None).unwrap();
    zooming.finish_transition();

    let after: Vec<String> = props.iter().map(|p| zooming.host().style(&img, *p)).collect();
    assert_eq!(before, after);
    assert_eq!(zooming.host().style(&img, StyleProp::Cursor), "zoom-in");
}

#[test]
fn test_geometry_is_frozen_at_open() {
    let (mut zooming, img, _) = setup();
    zooming.open(TargetRef::Element(img), None).unwrap();

    let target = zooming.target().unwrap();
    assert_eq!(target.translate(), Vec2::new(300.0, 250.0));
    assert_eq!(target.scale(), Vec2::splat(4.5));

    // Layout changes after open do not move the zoomed image
    zooming
        .host_mut()
        .set_rect(&img, Rect::new(0.0, 0.0, 50.0, 50.0));
    zooming.finish_transition();
    assert_eq!(zooming.target().unwrap().translate(), Vec2::new(300.0, 250.0));
}

#[test]
fn test_scroll_threshold_closes_once() {
    let (mut zooming, _, log) = opened();

    for y in [0.0, 10.0, 35.0] {
        zooming.host_mut().set_scroll_position(Vec2::new(0.0, y));
        zooming.handle_event(ZoomEvent::Scroll);
        assert_eq!(zooming.state(), ZoomState::Open, "closed at {}", y);
    }

    zooming.host_mut().set_scroll_position(Vec2::new(0.0, 45.0));
    zooming.handle_event(ZoomEvent::Scroll);
    assert_eq!(zooming.state(), ZoomState::Closing);

    zooming.host_mut().set_scroll_position(Vec2::new(0.0, 120.0));
    zooming.handle_event(ZoomEvent::Scroll);
    zooming.handle_event(ZoomEvent::Scroll);
    assert_eq!(count(&log, "before_close"), 1);
    assert!(!zooming
        .host()
        .is_listening(&ListenTarget::Document, EventKind::Scroll));
}

#[test]
fn test_scroll_tracking_resets_on_open() {
    let (mut zooming, img, _) = opened();
    zooming.host_mut().set_scroll_position(Vec2::new(0.0, 500.0));
    zooming.handle_event(ZoomEvent::Scroll);
    zooming.close(None).unwrap();
    zooming.finish_transition();

    zooming.click(img);
    zooming.finish_transition();
    zooming.host_mut().set_scroll_position(Vec2::new(0.0, 0.0));
    zooming.handle_event(ZoomEvent::Scroll);
    assert_eq!(zooming.state(), ZoomState::Open);
}

#[test]
fn test_short_press_never_grabs() {
    let (mut zooming, _, log) = opened();

    assert_eq!(
        zooming.handle_event(mouse_down(450.0, 420.0)),
        InputResult::PreventDefault
    );
    assert!(zooming.is_pressing());
    zooming.run_timers(100);
    zooming.handle_event(mouse_up());

    assert!(!zooming.is_pressing());
    assert_eq!(count(&log, "before_grab"), 0);
    // A click-length press closes, as a click would
    assert_eq!(zooming.state(), ZoomState::Closing);
    zooming.run_timers(1000);
    assert_eq!(count(&log, "before_grab"), 0);
}

#[test]
fn test_long_press_grabs_then_releases() {
    let (mut zooming, img, log) = opened();

    zooming.handle_event(mouse_down(450.0, 420.0));
    zooming.run_timers(250);
    assert_eq!(zooming.state(), ZoomState::Grabbed);
    assert!(!zooming.is_locked());
    assert_eq!(
        zooming.host().style(&img, StyleProp::Transform),
        "translate3d(350px, 230px, 0px) scale(7,7)"
    );

    zooming.handle_event(ZoomEvent::MouseMove {
        position: Vec2::new(500.0, 400.0),
    });
    let body = zooming.host().body();
    assert_eq!(zooming.host().style(&body, StyleProp::Cursor), "move");

    zooming.handle_event(mouse_up());
    assert_eq!(zooming.state(), ZoomState::Releasing);
    assert_eq!(zooming.host().style(&body, StyleProp::Cursor), "auto");

    zooming.finish_transition();
    assert_eq!(zooming.state(), ZoomState::Open);
    assert_eq!(
        *log.borrow(),
        vec!["before_grab", "before_release", "grab", "move", "release"]
    );
}

#[test]
fn test_second_press_replaces_first() {
    let (mut zooming, _, log) = opened();

    zooming.handle_event(mouse_down(100.0, 100.0));
    zooming.run_timers(150);
    zooming.handle_event(mouse_down(200.0, 200.0));
    zooming.run_timers(150);
    assert_eq!(count(&log, "before_grab"), 0);
    zooming.run_timers(50);
    assert_eq!(count(&log, "before_grab"), 1);
}

#[test]
fn test_press_ignores_other_buttons_and_modifiers() {
    let (mut zooming, _, _) = opened();

    let right = ZoomEvent::MouseDown {
        button: 2,
        position: Vec2::ZERO,
        modifiers: Modifiers::default(),
    };
    let ctrl = ZoomEvent::MouseDown {
        button: 0,
        position: Vec2::ZERO,
        modifiers: Modifiers {
            meta: false,
            ctrl: true,
        },
    };
    assert_eq!(zooming.handle_event(right), InputResult::Ignored);
    assert_eq!(zooming.handle_event(ctrl), InputResult::Ignored);
    assert!(!zooming.is_pressing());
}

#[test]
fn test_escape_while_grabbed_releases_then_closes() {
    let (mut zooming, _, log) = opened();
    zooming.grab(450.0, 420.0, None, None).unwrap();

    zooming.handle_event(escape());
    assert_eq!(zooming.state(), ZoomState::Releasing);

    zooming.finish_transition();
    assert_eq!(zooming.state(), ZoomState::Closing);
    assert_eq!(zooming.pending_transitions(), vec!["close"]);

    zooming.finish_transition();
    assert_eq!(zooming.state(), ZoomState::Closed);
    assert_eq!(
        *log.borrow(),
        vec!["before_grab", "before_release", "grab", "before_close", "close"]
    );
}

#[test]
fn test_escape_when_released_closes() {
    let (mut zooming, _, _) = opened();
    let esc_by_code = ZoomEvent::KeyDown {
        key: String::new(),
        key_code: 27,
    };
    assert_eq!(zooming.handle_event(esc_by_code), InputResult::Handled);
    assert_eq!(zooming.state(), ZoomState::Closing);
}

#[test]
fn test_fallback_unlocks_missing_transition_end() {
    let (mut zooming, img, log) = setup();
    zooming.open(TargetRef::Element(img), None).unwrap();

    zooming.run_timers(499);
    assert_eq!(zooming.state(), ZoomState::Opening);
    zooming.run_timers(1);
    assert_eq!(zooming.state(), ZoomState::Open);
    assert_eq!(count(&log, "open"), 1);

    // A late transition-end does not run anything twice
    assert_eq!(
        zooming.handle_event(ZoomEvent::TransitionEnd { target: img }),
        InputResult::Ignored
    );

    zooming.close(None).unwrap();
    zooming.run_timers(500);
    assert_eq!(zooming.state(), ZoomState::Closed);
    assert_eq!(count(&log, "close"), 1);
}

#[test]
fn test_huge_transition_duration_saturates_fallback() {
    let (mut zooming, img, log) = setup();
    zooming
        .config(OptionsPatch {
            transition_duration: Some(5_000_000.0),
            ..OptionsPatch::default()
        })
        .unwrap();

    zooming.open(TargetRef::Element(img), None).unwrap();
    assert_eq!(zooming.host().pending_timers(), 1);
    assert_eq!(zooming.host().timer_delay(TimerId(1)), Some(u32::MAX));

    zooming.run_timers(1_000);
    assert_eq!(zooming.state(), ZoomState::Opening);
    assert_eq!(zooming.finish_transition(), InputResult::Handled);
    assert_eq!(zooming.state(), ZoomState::Open);
    assert_eq!(count(&log, "open"), 1);
}

#[test]
fn test_release_without_grab_settles_via_fallback() {
    let (mut zooming, _, _) = opened();
    zooming.release(None).unwrap();
    assert!(zooming.is_locked());

    zooming.run_timers(500);
    assert_eq!(zooming.state(), ZoomState::Open);
    assert!(!zooming.is_locked());
}

#[test]
fn test_grab_and_move_do_not_lock() {
    let (mut zooming, _, _) = opened();

    zooming.grab(10.0, 10.0, Some(1.0), None).unwrap();
    assert!(!zooming.is_locked());
    zooming.move_to(20.0, 20.0, None, None).unwrap();
    zooming.move_to(30.0, 30.0, None, None).unwrap();
    assert_eq!(zooming.pending_transitions(), vec!["grab", "move"]);

    zooming.release(None).unwrap();
    assert!(zooming.is_locked());
    assert!(matches!(
        zooming.grab(0.0, 0.0, None, None),
        Err(ZoomError::InvalidOperation { op: "grab", .. })
    ));
}

#[test]
fn test_operations_rejected_when_closed() {
    let (mut zooming, _, log) = setup();
    assert!(zooming.close(None).is_err());
    assert!(zooming.grab(0.0, 0.0, None, None).is_err());
    assert!(zooming.move_to(0.0, 0.0, None, None).is_err());
    assert!(zooming.release(None).is_err());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_callback_replaces_hook() {
    let (mut zooming, _, log) = opened();
    let called = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&called);

    zooming
        .close(Some(Box::new(move |_| *flag.borrow_mut() = true)))
        .unwrap();
    zooming.finish_transition();

    assert!(*called.borrow());
    assert_eq!(*log.borrow(), vec!["before_close"]);
}

#[test]
fn test_source_upgrade_and_downgrade() {
    let (mut zooming, img, _) = opened();
    assert_eq!(zooming.host().attribute(&img, "src").as_deref(), Some("thumb.jpg"));

    zooming.run_timers(50);
    assert_eq!(zooming.host().attribute(&img, "src").as_deref(), Some("full.jpg"));

    zooming.close(None).unwrap();
    zooming.finish_transition();
    assert_eq!(zooming.host().attribute(&img, "src").as_deref(), Some("thumb.jpg"));
}

#[test]
fn test_image_loading_hooks() {
    let (mut zooming, img, log) = setup();
    zooming.click(img);
    assert_eq!(
        zooming.host().loaded_images(),
        &[("full.jpg".to_string(), Some(img))]
    );
    zooming.handle_event(ZoomEvent::ImageLoaded { target: img });
    assert_eq!(*log.borrow(), vec!["before_open", "image_loading", "image_loaded"]);
}

#[test]
fn test_preload_on_listen() {
    let options = Options {
        preload_image: true,
        ..Options::default()
    };
    let (mut zooming, img, log) = setup_with(options);
    assert_eq!(
        zooming.host().loaded_images(),
        &[("full.jpg".to_string(), None)]
    );

    zooming.click(img);
    assert_eq!(zooming.host().loaded_images().len(), 1);
    assert_eq!(count(&log, "image_loading"), 0);
}

#[test]
fn test_meta_click_opens_original() {
    let (mut zooming, img, _) = setup();
    let result = zooming.handle_event(ZoomEvent::Click {
        target: img,
        modifiers: Modifiers {
            meta: true,
            ctrl: false,
        },
    });
    assert_eq!(result, InputResult::PreventDefault);
    assert_eq!(zooming.host().opened_urls(), &["full.jpg".to_string()]);
    assert_eq!(zooming.state(), ZoomState::Closed);
}

#[test]
fn test_overlay_click_closes() {
    let (mut zooming, _, _) = opened();
    let overlay = *zooming.overlay_element();
    assert_eq!(zooming.click(overlay), InputResult::Handled);
    assert_eq!(zooming.state(), ZoomState::Closing);
}

#[test]
fn test_resize_closes_only_when_enabled() {
    let (mut zooming, _, _) = opened();
    assert_eq!(zooming.handle_event(ZoomEvent::Resize), InputResult::Handled);
    assert_eq!(zooming.state(), ZoomState::Closing);

    let options = Options {
        close_on_window_resize: false,
        ..Options::default()
    };
    let (mut zooming, img, _) = setup_with(options);
    zooming.click(img);
    zooming.finish_transition();
    assert_eq!(zooming.handle_event(ZoomEvent::Resize), InputResult::Ignored);
    assert_eq!(zooming.state(), ZoomState::Open);
}

#[test]
fn test_resize_listener_detached_after_config_change() {
    let (mut zooming, _, _) = opened();
    zooming
        .config(OptionsPatch {
            close_on_window_resize: Some(false),
            ..OptionsPatch::default()
        })
        .unwrap();
    zooming.close(None).unwrap();
    assert!(!zooming
        .host()
        .is_listening(&ListenTarget::Window, EventKind::Resize));
}

#[test]
fn test_touch_end_waits_for_last_finger() {
    let (mut zooming, _, _) = opened();
    zooming.grab(10.0, 10.0, None, None).unwrap();

    assert_eq!(
        zooming.handle_event(ZoomEvent::TouchEnd { remaining: 1 }),
        InputResult::Ignored
    );
    assert_eq!(zooming.state(), ZoomState::Grabbed);
    zooming.handle_event(ZoomEvent::TouchEnd { remaining: 0 });
    assert_eq!(zooming.state(), ZoomState::Releasing);
}

#[test]
fn test_disabled_grab_attaches_no_press_listeners() {
    let options = Options {
        enable_grab: false,
        ..Options::default()
    };
    let (mut zooming, img, _) = setup_with(options);
    zooming.click(img);
    zooming.finish_transition();

    assert_eq!(zooming.host().style(&img, StyleProp::Cursor), "zoom-out");
    assert_eq!(
        zooming.handle_event(ZoomEvent::TouchStart {
            position: Vec2::ZERO
        }),
        InputResult::Ignored
    );
}

#[test]
fn test_close_cleans_up_listeners_and_timers() {
    let (mut zooming, _, _) = opened();
    zooming.handle_event(mouse_down(1.0, 1.0));
    zooming.close(None).unwrap();
    zooming.finish_transition();

    assert!(!zooming.is_pressing());
    // Click on the listened image and click on the overlay
    assert_eq!(zooming.host().listener_count(), 2);
    assert_eq!(zooming.host().pending_timers(), 0);
}

#[test]
fn test_config_restyles_overlay_and_rejects_invalid() {
    let (mut zooming, _, _) = setup();
    let overlay = *zooming.overlay_element();

    zooming
        .config(OptionsPatch {
            bg_color: Some("black".to_string()),
            ..OptionsPatch::default()
        })
        .unwrap();
    assert_eq!(
        zooming.host().style(&overlay, StyleProp::BackgroundColor),
        "black"
    );

    let invalid = OptionsPatch {
        transition_duration: Some(-1.0),
        ..OptionsPatch::default()
    };
    assert!(matches!(
        zooming.config(invalid),
        Err(ZoomError::InvalidOption(_))
    ));
    assert_eq!(zooming.options().transition_duration, 0.4);
    assert_eq!(zooming.options().bg_color, "black");
}
