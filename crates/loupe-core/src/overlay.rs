//! Full-viewport backdrop shown behind the zoomed image

use crate::host::{DomHost, EventKind, ListenTarget};
use crate::options::Options;
use crate::style::{apply_style, transition_value, StyleMap, StyleProp};

/// The overlay element and whether it is currently in the document
pub struct Overlay<E> {
    el: E,
    inserted: bool,
}

impl<E: Clone + PartialEq> Overlay<E> {
    /// Create the detached overlay `<div>` and start listening for clicks on it
    pub fn new<H>(host: &mut H, options: &Options) -> Self
    where
        H: DomHost<Element = E>,
    {
        let el = host.create_element("div");
        let base = StyleMap::new()
            .with(StyleProp::Position, "fixed")
            .with(StyleProp::Top, "0")
            .with(StyleProp::Left, "0")
            .with(StyleProp::Right, "0")
            .with(StyleProp::Bottom, "0")
            .with(StyleProp::Opacity, "0");
        apply_style(host, &el, &base, false);

        let overlay = Self {
            el,
            inserted: false,
        };
        overlay.update_style(host, options);
        host.set_listener(ListenTarget::Element(overlay.el.clone()), EventKind::Click, true);
        overlay
    }

    pub fn element(&self) -> &E {
        &self.el
    }

    /// Re-apply the option-driven part of the style
    pub fn update_style<H>(&self, host: &mut H, options: &Options)
    where
        H: DomHost<Element = E>,
    {
        let styles = StyleMap::new()
            .with(StyleProp::ZIndex, options.z_index.to_string())
            .with(StyleProp::BackgroundColor, options.bg_color.as_str())
            .with(
                StyleProp::Transition,
                transition_value(
                    "opacity",
                    options.transition_duration,
                    &options.transition_timing_function,
                ),
            );
        apply_style(host, &self.el, &styles, false);
    }

    pub fn insert<H>(&mut self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        if !self.inserted {
            let body = host.body();
            host.append_child(&body, &self.el);
            self.inserted = true;
        }
    }

    pub fn remove<H>(&mut self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        if self.inserted {
            let body = host.body();
            host.remove_child(&body, &self.el);
            self.inserted = false;
        }
    }

    pub fn fade_in<H>(&self, host: &mut H, options: &Options)
    where
        H: DomHost<Element = E>,
    {
        host.force_layout(&self.el);
        host.set_style(&self.el, StyleProp::Opacity, &options.bg_opacity.to_string());
    }

    pub fn fade_out<H>(&self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        host.set_style(&self.el, StyleProp::Opacity, "0");
    }
}
