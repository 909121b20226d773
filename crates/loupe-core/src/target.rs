//! The image currently zoomed
//!
//! A [`ZoomTarget`] is created by `open`, keeps the geometry frozen at that
//! moment, and is dropped once the close transition has finished.

use crate::geometry::{self, TargetMetrics};
use crate::host::DomHost;
use crate::math::{Rect, Vec2};
use crate::options::Options;
use crate::source::ImageSources;
use crate::style::{apply_style, px, transform_value, transition_value, StyleMap, StyleProp};
use crate::types::Cursor;

pub struct ZoomTarget<E> {
    el: E,
    sources: ImageSources,
    rect: Rect,
    translate: Vec2,
    scale: Vec2,
    /// Style applied while zoomed
    style_open: StyleMap,
    /// Inline values from before `zoom_in`, restored on close
    style_close: StyleMap,
}

impl<E: Clone + PartialEq> ZoomTarget<E> {
    /// Capture sources and the bounding rect of `el`
    pub fn capture<H>(host: &H, el: E) -> Self
    where
        H: DomHost<Element = E>,
    {
        let sources = ImageSources::capture(host, &el);
        let rect = host.bounding_rect(&el);
        Self {
            el,
            sources,
            rect,
            translate: Vec2::ZERO,
            scale: Vec2::splat(1.0),
            style_open: StyleMap::new(),
            style_close: StyleMap::new(),
        }
    }

    pub fn element(&self) -> &E {
        &self.el
    }

    pub fn sources(&self) -> &ImageSources {
        &self.sources
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Compute the frozen geometry and apply the zoomed style, snapshotting
    /// what it overwrites
    pub fn zoom_in<H>(&mut self, host: &mut H, options: &Options)
    where
        H: DomHost<Element = E>,
    {
        let metrics = TargetMetrics {
            rect: self.rect,
            natural: host.natural_size(&self.el),
            zooming_width: zooming_dimension(host, &self.el, "data-zooming-width"),
            zooming_height: zooming_dimension(host, &self.el, "data-zooming-height"),
        };
        let zoom = geometry::compute(
            &metrics,
            host.viewport_size(),
            options.custom_size,
            options.scale_base,
        );
        self.translate = zoom.translate;
        self.scale = zoom.scale;

        let cursor = if options.enable_grab {
            Cursor::Grab
        } else {
            Cursor::ZoomOut
        };
        self.style_open = StyleMap::new()
            .with(StyleProp::Position, "relative")
            .with(StyleProp::ZIndex, (options.z_index + 1).to_string())
            .with(StyleProp::Cursor, cursor.css())
            .with(
                StyleProp::Transition,
                transition_value(
                    "transform",
                    options.transition_duration,
                    &options.transition_timing_function,
                ),
            )
            .with(StyleProp::Transform, transform_value(self.translate, self.scale))
            .with(StyleProp::Height, px(self.rect.height))
            .with(StyleProp::Width, px(self.rect.width));

        host.force_layout(&self.el);
        self.style_close = apply_style(host, &self.el, &self.style_open, true);
    }

    /// Start the transition back to the thumbnail position
    pub fn zoom_out<H>(&self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        host.force_layout(&self.el);
        host.set_style(&self.el, StyleProp::Transform, "none");
    }

    /// Pan toward `(x, y)` with extra zoom; animated with the open transition
    pub fn grab<H>(&self, host: &mut H, x: f64, y: f64, scale_extra: f64)
    where
        H: DomHost<Element = E>,
    {
        let styles = StyleMap::new()
            .with(StyleProp::Cursor, Cursor::Move.css())
            .with(StyleProp::Transform, self.offset_transform(host, x, y, scale_extra));
        apply_style(host, &self.el, &styles, false);
    }

    /// Follow the pointer without animating
    pub fn move_to<H>(&self, host: &mut H, x: f64, y: f64, scale_extra: f64)
    where
        H: DomHost<Element = E>,
    {
        let styles = StyleMap::new()
            .with(StyleProp::Transition, "transform")
            .with(StyleProp::Transform, self.offset_transform(host, x, y, scale_extra));
        apply_style(host, &self.el, &styles, false);
    }

    /// Undo grab/move offsets
    pub fn restore_open_style<H>(&self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        apply_style(host, &self.el, &self.style_open, false);
    }

    /// Put back every inline value the zoom overwrote
    pub fn restore_close_style<H>(&self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        apply_style(host, &self.el, &self.style_close, false);
    }

    fn offset_transform<H>(&self, host: &H, x: f64, y: f64, scale_extra: f64) -> String
    where
        H: DomHost<Element = E>,
    {
        let offset = host.viewport_size().center() - Vec2::new(x, y);
        transform_value(self.translate + offset, self.scale.offset(scale_extra))
    }
}

/// A positive `data-zooming-*` dimension
fn zooming_dimension<H: DomHost>(host: &H, el: &H::Element, name: &str) -> Option<f64> {
    host.attribute(el, name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| *v > 0.0)
}
