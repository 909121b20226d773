//! Inline style plumbing
//!
//! [`StyleMap`] is an ordered list of property/value pairs and
//! [`apply_style`] writes one onto an element, optionally returning the
//! previous values so the element can later be restored exactly.

use crate::host::DomHost;
use crate::math::Vec2;

/// Z translation used in every transform; forces a compositing layer and
/// avoids a Chrome paint glitch with images inside CSS grid
const TRANSLATE_Z: f64 = 0.0;

/// Inline style properties the widget touches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProp {
    Position,
    Top,
    Left,
    Right,
    Bottom,
    ZIndex,
    Cursor,
    Transition,
    Transform,
    Width,
    Height,
    Opacity,
    BackgroundColor,
    Visibility,
}

impl StyleProp {
    /// CSS property name
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProp::Position => "position",
            StyleProp::Top => "top",
            StyleProp::Left => "left",
            StyleProp::Right => "right",
            StyleProp::Bottom => "bottom",
            StyleProp::ZIndex => "z-index",
            StyleProp::Cursor => "cursor",
            StyleProp::Transition => "transition",
            StyleProp::Transform => "transform",
            StyleProp::Width => "width",
            StyleProp::Height => "height",
            StyleProp::Opacity => "opacity",
            StyleProp::BackgroundColor => "background-color",
            StyleProp::Visibility => "visibility",
        }
    }

    /// Applied after everything else, `transition` before `transform`, so the
    /// transition is in place when the transform changes
    fn apply_rank(&self) -> u8 {
        match self {
            StyleProp::Transition => 1,
            StyleProp::Transform => 2,
            _ => 0,
        }
    }
}

/// Ordered set of inline style assignments
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap {
    entries: Vec<(StyleProp, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, prop: StyleProp, value: impl Into<String>) -> Self {
        self.set(prop, value);
        self
    }

    /// Insert or replace a value, keeping the original position on replace
    pub fn set(&mut self, prop: StyleProp, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prop) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((prop, value)),
        }
    }

    pub fn get(&self, prop: StyleProp) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProp, &str)> {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write `styles` onto `el`.
///
/// When `remember` is set the return value holds each touched property's
/// previous inline value (empty string if it was unset); applying that map
/// later restores the element exactly. Otherwise the returned map is empty.
pub fn apply_style<H: DomHost>(
    host: &mut H,
    el: &H::Element,
    styles: &StyleMap,
    remember: bool,
) -> StyleMap {
    let mut ordered: Vec<(StyleProp, &str)> = styles.iter().collect();
    // Stable: keeps caller order within each rank
    ordered.sort_by_key(|(prop, _)| prop.apply_rank());

    let mut original = StyleMap::new();
    for (prop, value) in ordered {
        if remember {
            original.set(prop, host.style(el, prop));
        }
        host.set_style(el, prop, value);
    }
    original
}

/// `transform` value placing an element at `translate` with `scale`
pub fn transform_value(translate: Vec2, scale: Vec2) -> String {
    format!(
        "translate3d({}px, {}px, {}px) scale({},{})",
        translate.x, translate.y, TRANSLATE_Z, scale.x, scale.y
    )
}

/// `transition` value for a single property
pub fn transition_value(property: &str, duration_secs: f64, timing: &str) -> String {
    format!("{} {}s {}", property, duration_secs, timing)
}

/// Pixel length
pub fn px(value: f64) -> String {
    format!("{}px", value)
}
